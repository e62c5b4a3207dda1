//! Cell: one glyph position on the rain grid.
//!
//! A cell is a `char` plus the pen it is drawn with. Cells are `Copy` and
//! compared by value, so a frame is just a flat `Vec<Cell>`.

use bitflags::bitflags;

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Default foreground (white)
    pub const DEFAULT_FG: Self = Self::WHITE;

    /// Create from a 24-bit hex color (e.g., 0x00FF41).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// # Example
    /// ```
    /// use digital_rain::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::DIM;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single grid cell: the symbol and the pen it is drawn with.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    symbol: char,
    fg: Rgb,
    modifiers: Modifiers,
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Cell {
    /// A blank cell (space with the default pen).
    pub const BLANK: Self = Self {
        symbol: ' ',
        fg: Rgb::DEFAULT_FG,
        modifiers: Modifiers::empty(),
    };

    /// Create a cell drawn with the default pen.
    #[inline]
    pub const fn new(symbol: char) -> Self {
        Self {
            symbol,
            fg: Rgb::DEFAULT_FG,
            modifiers: Modifiers::empty(),
        }
    }

    /// Builder: set the foreground color.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Builder: set the modifiers.
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The displayed symbol.
    #[inline]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Text modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether the cell shows nothing (a space, whatever its pen).
    #[inline]
    pub const fn is_blank(&self) -> bool {
        self.symbol == ' '
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("symbol", &self.symbol)
            .field("fg", &self.fg)
            .field("modifiers", &self.modifiers)
            .finish()
    }
}
