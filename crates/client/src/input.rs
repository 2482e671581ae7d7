//! Line-based command parsing for the headless driver.

use crawl_core::Command;
use crawl_runtime::SessionCommand;

/// A parsed input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Turn(Command),
    Session(SessionCommand),
    Help,
    Quit,
}

pub const HELP: &str = "\
moves: h j k l (west south north east), y u b n (diagonals)
g: pick up   1-5: use item   .: wait
new [seed] | save | load | menu | help | quit";

/// Parses one line of input. Unknown input yields `None`.
pub fn parse(line: &str, next_seed: u64) -> Option<Input> {
    let mut words = line.split_whitespace();
    let word = words.next()?;
    let input = match word {
        "h" => Input::Turn(Command::MoveBy(-1, 0)),
        "l" => Input::Turn(Command::MoveBy(1, 0)),
        "k" => Input::Turn(Command::MoveBy(0, -1)),
        "j" => Input::Turn(Command::MoveBy(0, 1)),
        "y" => Input::Turn(Command::MoveBy(-1, -1)),
        "u" => Input::Turn(Command::MoveBy(1, -1)),
        "b" => Input::Turn(Command::MoveBy(-1, 1)),
        "n" => Input::Turn(Command::MoveBy(1, 1)),
        "g" => Input::Turn(Command::PickUp),
        "." => Input::Turn(Command::Wait),
        "new" => {
            let seed = match words.next() {
                Some(seed) => seed.parse().ok()?,
                None => next_seed,
            };
            Input::Session(SessionCommand::NewGame { seed })
        }
        "save" => Input::Session(SessionCommand::Save),
        "load" => Input::Session(SessionCommand::Load),
        "menu" => Input::Session(SessionCommand::ReturnToMenu),
        "help" | "?" => Input::Help,
        "quit" | "q" => Input::Quit,
        slot => {
            let slot: usize = slot.parse().ok()?;
            Input::Turn(Command::UseItem(slot.checked_sub(1)?))
        }
    };
    Some(input)
}
