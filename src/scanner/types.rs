use compact_str::CompactString;

use crate::tree::arena::{NodeId, WeightedTree};

/// Raw entry collected while walking, before tree construction.
#[derive(Debug, Clone)]
pub struct RawFileEntry {
    /// File or directory name (not full path)
    pub name: CompactString,
    /// Depth below the scan root (root = 0)
    pub depth: usize,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Whether this entry is a directory
    pub is_dir: bool,
}

/// A loaded tree together with the root the caller should lay out.
#[derive(Debug)]
pub struct ScannedTree {
    pub tree: WeightedTree,
    pub root: NodeId,
}
