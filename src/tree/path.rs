use std::fmt::Debug;

use super::arena::{NodeId, WeightedTree};

/// How a tree's breadcrumbs are joined. Chosen once, when the arena is created.
pub trait PathFormat: Debug + Send + Sync {
    fn separator(&self) -> &str;

    /// Join labels given root-first.
    fn format(&self, labels: &[&str]) -> String {
        labels.join(self.separator())
    }
}

/// Files and folders: joined with the platform path separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemPath;

impl PathFormat for FileSystemPath {
    fn separator(&self) -> &str {
        std::path::MAIN_SEPARATOR_STR
    }
}

/// World / region / country.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopulationPath;

impl PathFormat for PopulationPath {
    fn separator(&self) -> &str {
        "/"
    }
}

impl WeightedTree {
    /// Labels from the root down to `id`. Empty for a tombstone.
    pub fn path_labels(&self, id: NodeId) -> Vec<&str> {
        let mut parts = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            let node = self.get(node_id);
            let Some(label) = node.label() else {
                break;
            };
            parts.push(label);
            current = node.parent();
        }

        parts.reverse();
        parts
    }

    /// Root-first labels of `id` and its ancestors joined with `separator`.
    pub fn path_string(&self, id: NodeId, separator: &str) -> String {
        self.path_labels(id).join(separator)
    }

    /// [`path_string`](Self::path_string) using this tree's own path format.
    pub fn breadcrumb(&self, id: NodeId) -> String {
        self.path_format().format(&self.path_labels(id))
    }
}
