// Public library interface for treemap-rs
// The binary and external drivers use the core modules through this crate

pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod scanner;
pub mod tree;
pub mod ui;

pub use error::TreeError;
pub use layout::{LayoutRect, Point, Rect};
pub use tree::{NodeId, WeightedTree};
