//! Binary space partition of the map rectangle.
//!
//! The tree is owned top-down: each internal region owns exactly two
//! children and leaves own at most one room. Rooms flow back up the tree as
//! return values of [`Region::collect_rooms`], so no parent links are needed.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::GenerationConfig;
use crate::map::{MapDimensions, Room};
use crate::rng::range_inclusive;

/// Aspect ratio at which the split axis stops being random.
const ASPECT_BIAS: f64 = 1.25;

/// Orientation of the cut line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitAxis {
    /// Horizontal cut: children share the width and divide the height.
    Horizontal,
    /// Vertical cut: children share the height and divide the width.
    Vertical,
}

/// Receives rooms and room-to-room connections while the tree unwinds.
pub trait RoomCarver<R: Rng + ?Sized> {
    fn carve_room(&mut self, room: Room);
    fn connect(&mut self, first: Room, second: Room, rng: &mut R);
}

/// Node of the partition tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    children: Option<Box<(Region, Region)>>,
    room: Option<Room>,
}

impl Region {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            children: None,
            room: None,
        }
    }

    /// Builds the full tree covering `dimensions`, splitting regions in
    /// breadth-first order until no queued region can split.
    pub fn build<R: Rng + ?Sized>(
        dimensions: MapDimensions,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> Self {
        let mut root = Self::new(0, 0, dimensions.width as i32, dimensions.height as i32);

        let min_leaf = i32::try_from(config.min_leaf_size).unwrap_or(i32::MAX);
        let mut queue: VecDeque<&mut Region> = VecDeque::new();
        queue.push_back(&mut root);
        while let Some(region) = queue.pop_front() {
            if region.split(min_leaf, rng)
                && let Some(children) = region.children.as_deref_mut()
            {
                queue.push_back(&mut children.0);
                queue.push_back(&mut children.1);
            }
        }

        root
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<(&Region, &Region)> {
        self.children.as_deref().map(|(left, right)| (left, right))
    }

    pub fn room(&self) -> Option<Room> {
        self.room
    }

    /// Number of leaves below (and including) this region.
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
            None => 1,
        }
    }

    /// Splits this region once into two children.
    ///
    /// Returns false, leaving the region a leaf, when it is already split or
    /// when the extent along the chosen axis cannot hold two leaves of
    /// `min_leaf` cells. A `min_leaf` below one never splits.
    pub fn split<R: Rng + ?Sized>(&mut self, min_leaf: i32, rng: &mut R) -> bool {
        if self.children.is_some() || min_leaf < 1 {
            return false;
        }

        let axis = self.choose_axis(rng);
        let extent = match axis {
            SplitAxis::Horizontal => self.h,
            SplitAxis::Vertical => self.w,
        };
        let max_offset = extent - min_leaf;
        if max_offset < min_leaf {
            return false;
        }

        let offset = range_inclusive(rng, min_leaf, max_offset);
        let (first, second) = match axis {
            SplitAxis::Horizontal => (
                Region::new(self.x, self.y, self.w, offset),
                Region::new(self.x, self.y + offset, self.w, self.h - offset),
            ),
            SplitAxis::Vertical => (
                Region::new(self.x, self.y, offset, self.h),
                Region::new(self.x + offset, self.y, self.w - offset, self.h),
            ),
        };
        self.children = Some(Box::new((first, second)));
        true
    }

    fn choose_axis<R: Rng + ?Sized>(&self, rng: &mut R) -> SplitAxis {
        let random = if rng.gen_bool(0.5) {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        };

        let (w, h) = (f64::from(self.w), f64::from(self.h));
        if self.w > self.h && w / h >= ASPECT_BIAS {
            SplitAxis::Horizontal
        } else if self.h > self.w && h / w >= ASPECT_BIAS {
            SplitAxis::Vertical
        } else {
            random
        }
    }

    /// Post-order walk that places one room per leaf and connects sibling
    /// subtrees. Returns the room representing this subtree: a leaf's own
    /// room, the only child room available, or one of the two picked at random.
    pub fn collect_rooms<R, C>(
        &mut self,
        config: &GenerationConfig,
        carver: &mut C,
        rng: &mut R,
    ) -> Option<Room>
    where
        R: Rng + ?Sized,
        C: RoomCarver<R>,
    {
        if let Some((left, right)) = self.children.as_deref_mut() {
            let first = left.collect_rooms(config, carver, rng);
            let second = right.collect_rooms(config, carver, rng);
            return match (first, second) {
                (Some(a), Some(b)) => {
                    carver.connect(a, b, rng);
                    Some(if rng.gen_bool(0.5) { a } else { b })
                }
                (Some(room), None) | (None, Some(room)) => Some(room),
                (None, None) => None,
            };
        }

        let room = self.place_room(config, rng)?;
        self.room = Some(room);
        carver.carve_room(room);
        Some(room)
    }

    fn place_room<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Option<Room> {
        let min = (config.room_min_size as i32).max(1);
        let pad = config.room_padding as i32;

        let w = range_inclusive(rng, min, min.max(self.w - pad * 2));
        let h = range_inclusive(rng, min, min.max(self.h - pad * 2));
        let x = self.x + range_inclusive(rng, pad, pad.max(self.w - w - pad));
        let y = self.y + range_inclusive(rng, pad, pad.max(self.h - h - pad));

        // Leaves too small for the minimum room produce no room at all.
        if w < 1 || h < 1 || x + w > self.x + self.w || y + h > self.y + self.h {
            return None;
        }
        Some(Room::new(x, y, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    struct Recorder {
        rooms: Vec<Room>,
        links: Vec<(Room, Room)>,
    }

    impl<R: Rng + ?Sized> RoomCarver<R> for Recorder {
        fn carve_room(&mut self, room: Room) {
            self.rooms.push(room);
        }

        fn connect(&mut self, first: Room, second: Room, _rng: &mut R) {
            self.links.push((first, second));
        }
    }

    fn leaves(region: &Region, out: &mut Vec<(i32, i32, i32, i32)>) {
        match region.children() {
            Some((left, right)) => {
                leaves(left, out);
                leaves(right, out);
            }
            None => out.push((region.x, region.y, region.w, region.h)),
        }
    }

    #[test]
    fn split_refuses_regions_below_two_leaves() {
        let mut rng = seeded(1);
        let mut region = Region::new(0, 0, 19, 19);
        assert!(!region.split(10, &mut rng));
        assert!(region.is_leaf());
    }

    #[test]
    fn zero_leaf_size_leaves_the_root_whole() {
        let mut rng = seeded(3);
        let mut region = Region::new(0, 0, 40, 40);
        assert!(!region.split(0, &mut rng));

        let config = GenerationConfig {
            min_leaf_size: 0,
            ..GenerationConfig::default()
        };
        let root = Region::build(MapDimensions::new(80, 60), &config, &mut rng);
        assert!(root.is_leaf());
    }

    #[test]
    fn split_happens_at_most_once() {
        let mut rng = seeded(1);
        let mut region = Region::new(0, 0, 40, 40);
        assert!(region.split(10, &mut rng));
        assert!(!region.split(10, &mut rng));
    }

    #[test]
    fn wide_regions_are_cut_horizontally() {
        let mut rng = seeded(9);
        for _ in 0..16 {
            let mut region = Region::new(0, 0, 50, 30);
            assert!(region.split(10, &mut rng));
            let (left, right) = region.children().expect("split");
            assert_eq!(left.w, 50);
            assert_eq!(right.w, 50);
            assert_eq!(left.h + right.h, 30);
            assert!(left.h >= 10 && right.h >= 10);
        }
    }

    #[test]
    fn tall_regions_are_cut_vertically() {
        let mut rng = seeded(10);
        let mut region = Region::new(5, 5, 30, 50);
        assert!(region.split(10, &mut rng));
        let (left, right) = region.children().expect("split");
        assert_eq!((left.x, left.h), (5, 50));
        assert_eq!(right.x, 5 + left.w);
        assert_eq!(left.w + right.w, 30);
    }

    #[test]
    fn leaves_tile_the_root_without_overlap() {
        let config = GenerationConfig::default();
        let mut rng = seeded(42);
        let root = Region::build(config.dimensions, &config, &mut rng);
        let mut out = Vec::new();
        leaves(&root, &mut out);
        let area: i32 = out.iter().map(|(_, _, w, h)| w * h).sum();
        assert_eq!(area, 80 * 60);
        assert!(out.iter().all(|&(_, _, w, h)| w >= 10 && h >= 10));
        assert_eq!(root.leaf_count(), out.len());
    }

    #[test]
    fn rooms_sit_inside_their_leaf_with_padding() {
        let config = GenerationConfig::default();
        let mut rng = seeded(5);
        let mut root = Region::build(config.dimensions, &config, &mut rng);
        let mut recorder = Recorder {
            rooms: Vec::new(),
            links: Vec::new(),
        };
        let top = root.collect_rooms(&config, &mut recorder, &mut rng);

        assert!(top.is_some());
        assert_eq!(recorder.rooms.len(), root.leaf_count());
        assert_eq!(recorder.links.len(), root.leaf_count() - 1);

        let mut out = Vec::new();
        leaves(&root, &mut out);
        for (room, (lx, ly, lw, lh)) in recorder.rooms.iter().zip(out) {
            assert!(room.w >= 5 && room.h >= 5);
            assert!(room.x >= lx + 2 && room.y >= ly + 2);
            assert!(room.x + room.w <= lx + lw);
            assert!(room.y + room.h <= ly + lh);
        }
    }
}
