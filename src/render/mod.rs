pub mod ascii;
pub mod colors;

pub use self::ascii::{glyph_for, render_ascii};
pub use self::colors::{colour_for, Rgb};
