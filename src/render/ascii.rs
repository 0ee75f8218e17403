use crate::layout::{LayoutRect, Point, Rect};

const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Glyph used for the `index`-th rectangle of a layout.
pub fn glyph_for(index: usize) -> char {
    GLYPHS[index % GLYPHS.len()] as char
}

/// Rasterise a layout into a `cols` x `rows` character grid covering `area`.
///
/// Each cell shows the glyph of the rectangle under its centre (first match in
/// layout order, like a click would), or a space if nothing is there.
pub fn render_ascii(layout: &[LayoutRect], area: Rect, cols: usize, rows: usize) -> String {
    let mut out = String::with_capacity((cols + 1) * rows);
    for row in 0..rows {
        for col in 0..cols {
            let x = area.x as u64 + (2 * col as u64 + 1) * area.w as u64 / (2 * cols as u64);
            let y = area.y as u64 + (2 * row as u64 + 1) * area.h as u64 / (2 * rows as u64);
            let point = Point::new(x as u32, y as u32);
            let glyph = layout
                .iter()
                .position(|r| r.rect.contains_inclusive(point))
                .map(glyph_for)
                .unwrap_or(' ');
            out.push(glyph);
        }
        if row + 1 < rows {
            out.push('\n');
        }
    }
    out
}
