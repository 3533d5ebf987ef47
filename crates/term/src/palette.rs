//! Theme palettes.
//!
//! `dark` and `light` are fixed; `crazy` rolls a bright random colour per piece
//! kind every time it is built.

use rand::Rng;

use crate::fb::{CellStyle, Rgb};
use crate::types::{PieceKind, Theme};

const DARK_PIECES: [Rgb; 7] = [
    Rgb::from_hex(0x00e5ff), // I
    Rgb::from_hex(0xffd000), // O
    Rgb::from_hex(0xb400ff), // T
    Rgb::from_hex(0x00d66b), // S
    Rgb::from_hex(0xff4d4d), // Z
    Rgb::from_hex(0x3b82f6), // J
    Rgb::from_hex(0xff9800), // L
];

const LIGHT_PIECES: [Rgb; 7] = [
    Rgb::from_hex(0x00bcd4),
    Rgb::from_hex(0xe4b700),
    Rgb::from_hex(0x8a2be2),
    Rgb::from_hex(0x1faa59),
    Rgb::from_hex(0xef5350),
    Rgb::from_hex(0x3949ab),
    Rgb::from_hex(0xf57c00),
];

/// Colours for one theme, indexed by [`PieceKind::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub theme: Theme,
    pub pieces: [Rgb; 7],
    /// Screen background outside the board.
    pub background: Rgb,
    /// Board well background.
    pub well: Rgb,
    pub grid: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub label: Rgb,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            theme: Theme::Dark,
            pieces: DARK_PIECES,
            background: Rgb::new(12, 14, 20),
            well: Rgb::new(24, 27, 36),
            grid: Rgb::new(48, 52, 64),
            border: Rgb::new(190, 195, 210),
            text: Rgb::new(210, 214, 224),
            label: Rgb::new(245, 245, 250),
        }
    }

    pub fn light() -> Self {
        Self {
            theme: Theme::Light,
            pieces: LIGHT_PIECES,
            background: Rgb::new(236, 238, 243),
            well: Rgb::new(250, 250, 252),
            grid: Rgb::new(214, 217, 225),
            border: Rgb::new(70, 74, 88),
            text: Rgb::new(50, 54, 66),
            label: Rgb::new(20, 22, 30),
        }
    }

    /// Dark chrome with a random bright colour per piece.
    pub fn crazy(rng: &mut impl Rng) -> Self {
        let mut pieces = [Rgb::default(); 7];
        for slot in pieces.iter_mut() {
            *slot = bright_color(rng);
        }
        Self {
            theme: Theme::Crazy,
            pieces,
            ..Self::dark()
        }
    }

    pub fn for_theme(theme: Theme, rng: &mut impl Rng) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
            Theme::Crazy => Self::crazy(rng),
        }
    }

    pub fn piece(&self, kind: PieceKind) -> Rgb {
        self.pieces[kind.index()]
    }

    /// Style for a filled block of `kind`.
    pub fn block(&self, kind: PieceKind) -> CellStyle {
        CellStyle::new(self.piece(kind), self.well).bold()
    }

    /// Faint outline style for the ghost piece.
    pub fn ghost(&self, kind: PieceKind) -> CellStyle {
        CellStyle::new(self.well.blend(self.piece(kind), 110), self.well)
    }

    pub fn empty_cell(&self) -> CellStyle {
        CellStyle::new(self.grid, self.well)
    }

    pub fn screen(&self) -> CellStyle {
        CellStyle::new(self.text, self.background)
    }

    pub fn frame(&self) -> CellStyle {
        CellStyle::new(self.border, self.background)
    }

    pub fn value(&self) -> CellStyle {
        CellStyle::new(self.text, self.background)
    }

    pub fn heading(&self) -> CellStyle {
        CellStyle::new(self.label, self.background).bold()
    }

    pub fn overlay(&self) -> CellStyle {
        CellStyle::new(self.label, self.well).bold()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Random hue at 85% saturation and 50% lightness.
pub fn bright_color(rng: &mut impl Rng) -> Rgb {
    let hue: u16 = rng.random_range(0..360);
    hsl_to_rgb(hue, 0.85, 0.5)
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to RGB.
pub fn hsl_to_rgb(hue: u16, s: f32, l: f32) -> Rgb {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h = f32::from(hue % 360) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(to_u8(r), to_u8(g), to_u8(b))
}
