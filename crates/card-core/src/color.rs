use std::fmt;

/// 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parse `#rrggbb` at compile time. Malformed input yields black.
    pub const fn hex(s: &str) -> Rgb {
        let b = s.as_bytes();
        if b.len() != 7 || b[0] != b'#' {
            return Rgb::BLACK;
        }
        Rgb(
            (nibble(b[1]) << 4) | nibble(b[2]),
            (nibble(b[3]) << 4) | nibble(b[4]),
            (nibble(b[5]) << 4) | nibble(b[6]),
        )
    }

    /// Mix toward white by `amount` (0..1).
    pub fn lighten(self, amount: f32) -> Rgb {
        let a = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * a).round() as u8;
        Rgb(mix(self.0), mix(self.1), mix(self.2))
    }

    /// CSS color string usable as a canvas fill/stroke style.
    pub fn css(self) -> String {
        self.to_string()
    }
}

const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const FIREWORK_PALETTE: [Rgb; 12] = [
    Rgb::hex("#FF6B6B"),
    Rgb::hex("#4ECDC4"),
    Rgb::hex("#FFD93D"),
    Rgb::hex("#6BCF7F"),
    Rgb::hex("#A8E6CF"),
    Rgb::hex("#95E1D3"),
    Rgb::hex("#F38181"),
    Rgb::hex("#FFA07A"),
    Rgb::hex("#C7CEEA"),
    Rgb::hex("#FF9FF3"),
    Rgb::hex("#54A0FF"),
    Rgb::hex("#5F27CD"),
];

pub const CONFETTI_PALETTE: [Rgb; 15] = [
    Rgb::hex("#FF6B6B"),
    Rgb::hex("#4ECDC4"),
    Rgb::hex("#FFD93D"),
    Rgb::hex("#6BCF7F"),
    Rgb::hex("#A8E6CF"),
    Rgb::hex("#95E1D3"),
    Rgb::hex("#F38181"),
    Rgb::hex("#FFA07A"),
    Rgb::hex("#C7CEEA"),
    Rgb::hex("#FF9FF3"),
    Rgb::hex("#54A0FF"),
    Rgb::hex("#5F27CD"),
    Rgb::hex("#00D2D3"),
    Rgb::hex("#FF9F43"),
    Rgb::hex("#FF6348"),
];

/// (center, petals)
pub const FLOWER_PALETTE: [(Rgb, Rgb); 5] = [
    (Rgb::hex("#fbbf24"), Rgb::hex("#fef3c7")),
    (Rgb::hex("#fb7185"), Rgb::hex("#fce7f3")),
    (Rgb::hex("#c084fc"), Rgb::hex("#f3e8ff")),
    (Rgb::hex("#60a5fa"), Rgb::hex("#dbeafe")),
    (Rgb::hex("#f59e0b"), Rgb::hex("#fed7aa")),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_and_prints() {
        assert_eq!(Rgb::hex("#FF6B6B"), Rgb(255, 107, 107));
        assert_eq!(Rgb::hex("#ff6b6b").css(), "#ff6b6b");
        assert_eq!(Rgb::hex("nope"), Rgb::BLACK);
    }

    #[test]
    fn lighten_moves_toward_white() {
        assert_eq!(Rgb(0, 0, 0).lighten(1.0), Rgb::WHITE);
        assert_eq!(Rgb(100, 100, 100).lighten(0.0), Rgb(100, 100, 100));
        let l = Rgb(100, 0, 200).lighten(0.5);
        assert!(l.0 > 100 && l.1 > 0 && l.2 > 200);
    }
}
