use crate::layout::Rect;

/// Window geometry for the treemap view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    /// Window width (px)
    pub width: u32,
    /// Window height (px), status line included
    pub height: u32,
    /// Height of the status line under the treemap (px)
    pub status_height: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            status_height: 30,
        }
    }
}

impl ViewConfig {
    pub fn treemap_height(&self) -> u32 {
        self.height.saturating_sub(self.status_height)
    }

    /// Area the treemap is laid out in, anchored at the origin.
    pub fn treemap_area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.treemap_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_is_carved_from_the_bottom() {
        let config = ViewConfig::default();
        assert_eq!(config.treemap_area(), Rect::new(0, 0, 1024, 738));
    }

    #[test]
    fn tiny_window_has_no_treemap_rows() {
        let config = ViewConfig {
            width: 100,
            height: 10,
            status_height: 30,
        };
        assert_eq!(config.treemap_height(), 0);
    }
}
