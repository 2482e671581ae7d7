//! Procedural level generation.
//!
//! [`partition`] subdivides the map into a binary tree of regions and
//! [`generator`] carves one room per leaf, joining sibling subtrees with
//! L-shaped corridors while the tree unwinds.
pub mod generator;
pub mod partition;

pub use generator::DungeonGenerator;
pub use partition::{Region, RoomCarver, SplitAxis};
