use crate::config::ViewConfig;
use crate::error::TreeError;
use crate::layout::{self, LayoutRect, Point};
use crate::scanner::types::ScannedTree;
use crate::tree::arena::{NodeId, WeightedTree};
use crate::ui::input::InputAction;

/// Interactive treemap state without a window: the tree, the current
/// selection and the status line shown under the treemap.
#[derive(Debug)]
pub struct Session {
    tree: WeightedTree,
    root: NodeId,
    config: ViewConfig,
    selected: Option<NodeId>,
    status: String,
    layout: Vec<LayoutRect>,
    needs_relayout: bool,
}

impl Session {
    pub fn new(scanned: ScannedTree, config: ViewConfig) -> Self {
        Self {
            tree: scanned.tree,
            root: scanned.root,
            config,
            selected: None,
            status: String::new(),
            layout: Vec::new(),
            needs_relayout: true,
        }
    }

    pub fn tree(&self) -> &WeightedTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// `"{breadcrumb} ({size})"` for the selected leaf, empty otherwise.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Current layout, recomputed only after the tree or window changed.
    pub fn layout(&mut self) -> &[LayoutRect] {
        if self.needs_relayout {
            self.layout = layout::compute_layout(&self.tree, self.root, self.config.treemap_area());
            self.needs_relayout = false;
            tracing::debug!("Layout computed: {} rectangles", self.layout.len());
        }
        &self.layout
    }

    /// Apply one input action and refresh the status line.
    pub fn apply(&mut self, action: InputAction) -> Result<(), TreeError> {
        match action {
            InputAction::Select { x, y } => self.select_at(Point::new(x, y)),
            InputAction::Delete { x, y } => self.delete_at(Point::new(x, y))?,
            InputAction::Grow => self.resize_selected(true)?,
            InputAction::Shrink => self.resize_selected(false)?,
            InputAction::Resize { width, height } => {
                self.config.width = width;
                self.config.height = height;
                self.needs_relayout = true;
            }
            InputAction::None => {}
        }
        Ok(())
    }

    fn leaf_at(&mut self, point: Point) -> Option<NodeId> {
        layout::hit_test(self.layout(), point)
    }

    fn select_at(&mut self, point: Point) {
        let previous = self.selected;
        self.selected = match (self.leaf_at(point), previous) {
            (Some(hit), Some(prev)) if self.tree.same_slot(hit, prev) => None,
            (hit, _) => hit,
        };
        self.refresh_status();
    }

    fn delete_at(&mut self, point: Point) -> Result<(), TreeError> {
        if let Some(target) = self.leaf_at(point) {
            tracing::info!("Deleting '{}'", self.tree.breadcrumb(target));
            self.tree.delete_leaf(target)?;
            self.needs_relayout = true;
        }
        if self.selected.is_some_and(|s| self.tree.is_empty(s)) {
            self.selected = None;
        }
        self.refresh_status();
        Ok(())
    }

    fn resize_selected(&mut self, grow: bool) -> Result<(), TreeError> {
        if let Some(leaf) = self.selected {
            let changed = if grow {
                self.tree.increase_size(leaf)?
            } else {
                self.tree.decrease_size(leaf)?
            };
            self.needs_relayout |= changed;
        }
        self.refresh_status();
        Ok(())
    }

    fn refresh_status(&mut self) {
        self.status = match self.selected {
            Some(leaf) if !self.tree.is_empty(leaf) => {
                format!("{} ({})", self.tree.breadcrumb(leaf), self.tree.size(leaf))
            }
            _ => String::new(),
        };
    }
}
