pub mod population;
pub mod types;

use std::path::Path;

use anyhow::{Context, Result};
use compact_str::CompactString;
use jwalk::WalkDir;

use self::types::{RawFileEntry, ScannedTree};
use crate::tree::arena::{NodeId, WeightedTree};
use crate::tree::path::FileSystemPath;

/// Walk `path` and build its weighted tree.
///
/// Directories become internal nodes (a directory with nothing in it becomes
/// a zero-sized leaf), files become leaves sized in bytes. Children are
/// ordered by name. A plain file path yields a one-leaf tree.
pub fn scan_path(path: &Path) -> Result<ScannedTree> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let root_name = root_label(path);

    if !metadata.is_dir() {
        let mut tree = WeightedTree::with_path_format(Box::new(FileSystemPath));
        let root = tree.leaf(&root_name, metadata.len())?;
        tracing::info!("Scanned single file '{}' ({} bytes)", root_name, metadata.len());
        return Ok(ScannedTree { tree, root });
    }

    let entries = walk(path, &root_name);
    let dir_count = entries.iter().filter(|e| e.is_dir).count();
    tracing::info!(
        "Building tree from {} entries ({} dirs, {} files)",
        entries.len(),
        dir_count,
        entries.len() - dir_count
    );

    let scanned = build_tree(&entries)?;
    tracing::info!(
        "Tree built: {} nodes, root '{}' = {} bytes",
        scanned.tree.node_count(),
        root_name,
        scanned.tree.size(scanned.root)
    );
    Ok(scanned)
}

/// Collect entries in sorted depth-first order. Unreadable entries are skipped.
fn walk(path: &Path, root_name: &str) -> Vec<RawFileEntry> {
    let mut entries = Vec::new();
    let walker = WalkDir::new(path)
        .sort(true)
        .skip_hidden(false)
        .follow_links(false);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.depth == 0 {
            entries.push(RawFileEntry {
                name: CompactString::new(root_name),
                depth: 0,
                size: 0,
                is_dir: true,
            });
            continue;
        }

        let is_dir = entry.file_type.is_dir();
        let size = if is_dir {
            0
        } else {
            match entry.metadata() {
                Ok(md) => md.len(),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            }
        };

        entries.push(RawFileEntry {
            name: CompactString::new(entry.file_name.to_string_lossy()),
            depth: entry.depth,
            size,
            is_dir,
        });
    }
    entries
}

/// Assemble a tree from entries in depth-first (pre-order) order.
///
/// Walks the list backwards so every child exists before its directory is
/// constructed; `pending[d]` holds the finished nodes waiting for a parent at
/// depth `d - 1`. Iterative, so deep hierarchies cannot overflow the stack.
pub fn build_tree(entries: &[RawFileEntry]) -> Result<ScannedTree> {
    let mut tree = WeightedTree::with_path_format(Box::new(FileSystemPath));
    let mut pending: Vec<Vec<NodeId>> = Vec::new();
    let mut root = None;

    for entry in entries.iter().rev() {
        let id = if entry.is_dir {
            let mut children = pending
                .get_mut(entry.depth + 1)
                .map(std::mem::take)
                .unwrap_or_default();
            children.reverse();
            tree.internal(&entry.name, children)?
        } else {
            tree.leaf(&entry.name, entry.size)?
        };

        if entry.depth == 0 {
            root = Some(id);
            continue;
        }
        if pending.len() <= entry.depth {
            pending.resize_with(entry.depth + 1, Vec::new);
        }
        pending[entry.depth].push(id);
    }

    let root = root.context("walk produced no root entry")?;
    Ok(ScannedTree { tree, root })
}

fn root_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn entry(name: &str, depth: usize, size: u64, is_dir: bool) -> RawFileEntry {
        RawFileEntry {
            name: CompactString::new(name),
            depth,
            size,
            is_dir,
        }
    }

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("treemap-rs-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn build_tree_restores_nesting_and_order() {
        let entries = vec![
            entry("Depth 1-2", 0, 0, true),
            entry("City.jpg", 1, 40, false),
            entry("Empty Folder", 1, 0, true),
            entry("Stuff", 1, 0, true),
            entry("Nature.jpg", 2, 5, false),
            entry("Squirrel.jpg", 2, 7, false),
            entry("zebra.txt", 1, 3, false),
        ];
        let ScannedTree { tree, root } = build_tree(&entries).unwrap();

        let labels: Vec<&str> = tree
            .children(root)
            .iter()
            .map(|&c| tree.label(c).unwrap())
            .collect();
        assert_eq!(labels, ["City.jpg", "Empty Folder", "Stuff", "zebra.txt"]);
        assert_eq!(tree.size(root), 55);

        let stuff = tree.children(root)[2];
        assert_eq!(tree.size(stuff), 12);
        let squirrel = tree.children(stuff)[1];
        assert_eq!(tree.path_string(squirrel, "\\"), "Depth 1-2\\Stuff\\Squirrel.jpg");

        let empty_folder = tree.children(root)[1];
        assert!(tree.is_leaf(empty_folder));
        assert_eq!(tree.size(empty_folder), 0);
        tree.check_aggregates(root).unwrap();
    }

    #[test]
    fn build_tree_needs_a_root() {
        assert!(build_tree(&[]).is_err());
    }

    #[test]
    fn scans_a_directory() {
        let dir = fixture_dir("scan");
        fs::write(dir.join("b.txt"), b"0123456789").unwrap();
        fs::write(dir.join("a.txt"), b"x").unwrap();
        fs::create_dir_all(dir.join("sub/empty")).unwrap();
        fs::write(dir.join("sub/c.bin"), [0u8; 25]).unwrap();

        let ScannedTree { tree, root } = scan_path(&dir).unwrap();
        assert_eq!(tree.size(root), 36);

        let labels: Vec<&str> = tree
            .children(root)
            .iter()
            .map(|&c| tree.label(c).unwrap())
            .collect();
        assert_eq!(labels, ["a.txt", "b.txt", "sub"]);

        let sub = tree.children(root)[2];
        assert_eq!(tree.size(sub), 25);
        assert_eq!(tree.children(sub).len(), 2);
        tree.check_aggregates(root).unwrap();

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn scans_nested_empty_folders_to_zero() {
        let dir = fixture_dir("nested-empty");
        fs::create_dir_all(dir.join("inner/inner")).unwrap();

        let ScannedTree { tree, root } = scan_path(&dir).unwrap();
        assert_eq!(tree.size(root), 0);
        assert_eq!(tree.stats(root).depth, 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn scans_a_single_file() {
        let dir = fixture_dir("single");
        let file = dir.join("Birds.txt");
        fs::write(&file, b"birds birds birds bird").unwrap();

        let ScannedTree { tree, root } = scan_path(&file).unwrap();
        assert!(tree.is_leaf(root));
        assert_eq!(tree.size(root), 22);
        assert_eq!(tree.label(root), Some("Birds.txt"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = fixture_dir("missing");
        assert!(scan_path(&dir.join("nope")).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
