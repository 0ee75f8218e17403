pub mod aggregate;
pub mod arena;
pub mod path;

pub use self::aggregate::TreeStats;
pub use self::arena::{Node, NodeId, NodeKind, WeightedTree};
pub use self::path::{FileSystemPath, PathFormat, PopulationPath};
