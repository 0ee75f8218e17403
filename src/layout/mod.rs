pub mod hit;
pub mod slice;

pub use self::hit::{find_leaf, hit_test};
pub use self::slice::{compute_layout, leaf_order, treemap};

use crate::render::colors::Rgb;
use crate::tree::arena::NodeId;

/// Integer screen rectangle, `(x, y, width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether `p` lies inside or on any of the four edges.
    pub fn contains_inclusive(&self, p: Point) -> bool {
        let (px, py) = (p.x as u64, p.y as u64);
        let (x, y) = (self.x as u64, self.y as u64);
        x <= px && px <= x + self.w as u64 && y <= py && py <= y + self.h as u64
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
}

impl From<(u32, u32, u32, u32)> for Rect {
    fn from((x, y, w, h): (u32, u32, u32, u32)) -> Self {
        Rect::new(x, y, w, h)
    }
}

/// Screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A positioned leaf in the treemap layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRect {
    pub node: NodeId,
    pub rect: Rect,
    pub colour: Rgb,
}
