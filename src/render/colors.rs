use std::fmt;

/// 8-bit RGB colour attached to every node as its display attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Pick a colour for a node from its label and arena slot.
///
/// Deterministic, so the same tree always renders the same way, while nodes
/// with identical labels in different places still differ.
pub fn colour_for(label: &str, seed: u32) -> Rgb {
    let h = fnv1a(label.as_bytes(), seed);
    let hue = ((h >> 8) as f32) / ((u32::MAX >> 8) as f32);
    let sat = 0.55 + ((h & 0x0F) as f32 / 15.0) * 0.30;
    let val = 0.70 + (((h >> 4) & 0x0F) as f32 / 15.0) * 0.25;
    hsv_to_rgb(hue, sat, val)
}

fn fnv1a(bytes: &[u8], seed: u32) -> u32 {
    let mut h: u32 = 2166136261;
    for &b in bytes.iter().chain(seed.to_le_bytes().iter()) {
        h ^= b as u32;
        h = h.wrapping_mul(16777619);
    }
    h
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}

fn to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_is_deterministic() {
        assert_eq!(colour_for("Birds.txt", 3), colour_for("Birds.txt", 3));
    }

    #[test]
    fn seed_separates_identical_labels() {
        let colours: Vec<Rgb> = (0..8).map(|seed| colour_for("same", seed)).collect();
        assert!(colours.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb::new(255, 0, 16).to_hex(), "#ff0010");
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "(1, 2, 3)");
    }

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), Rgb::new(0, 0, 255));
    }
}
