//! Cell: The atomic unit of terminal display.
//!
//! A stopwatch screen only ever shows single code points (digits, box
//! drawing, labels), so a cell stores one `char` plus its style. Wide
//! characters occupy two columns; the second column holds a continuation
//! cell that the renderer skips.

use bitflags::bitflags;

/// True-color RGB representation.
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

    /// Create from a 24-bit hex color (e.g., 0x88C0D0).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Linear blend towards `other`; `amount` is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn blend(self, other: Self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mix = |a: u8, b: u8| (f32::from(b) - f32::from(a)).mul_add(t, f32::from(a)).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// ```
    /// use stopwatch::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::DIM;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0001_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single terminal cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character shown; `'\0'` marks a wide-character continuation.
    ch: char,
    /// Display width (0 = continuation, 1 = normal, 2 = wide).
    width: u8,
    /// Foreground color.
    fg: Rgb,
    /// Background color.
    bg: Rgb,
    /// Text modifiers.
    modifiers: Modifiers,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space, white on black).
    pub const EMPTY: Self = Self {
        ch: ' ',
        width: 1,
        fg: Rgb::WHITE,
        bg: Rgb::BLACK,
        modifiers: Modifiers::empty(),
    };

    /// Create a cell holding `ch` with default colors.
    ///
    /// Zero-width characters are replaced by a space so every cell
    /// advances the cursor.
    pub fn new(ch: char) -> Self {
        let width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        match width {
            0 => Self::EMPTY,
            #[allow(clippy::cast_possible_truncation)]
            w => Self { ch, width: w.min(2) as u8, ..Self::EMPTY },
        }
    }

    /// The trailing half of a wide character.
    pub const fn continuation() -> Self {
        Self { ch: '\0', width: 0, ..Self::EMPTY }
    }

    /// Character in this cell.
    #[inline]
    pub const fn ch(&self) -> char {
        self.ch
    }

    /// Display width (0, 1, or 2).
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Whether this is the trailing half of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    /// Set the modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("ch", &self.ch)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}
