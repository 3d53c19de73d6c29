//! Cell styles and color resources.
//!
//! [`CellStyle`] is the terminal analog of a font/color resource pair:
//! colors are stored as strings (named or `#rrggbb` hex) and parsed by
//! [`parse_color`]. [`CellStyle::validated`] performs that parse up
//! front so an unknown color fails at construction rather than during
//! a frame.

use crossterm::style::Color;

use crate::error::Error;

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are optional strings that can be parsed as named colors or
/// `#rrggbb` hex values; `None` means the terminal default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl CellStyle {
    /// Create a new `CellStyle` with all attributes unset/false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a style with the given foreground and background colors,
    /// validating both eagerly.
    ///
    /// This is the color-resource allocation step: an unparseable name
    /// is a construction error, not a silently-ignored cell attribute.
    pub fn validated(fg: Option<&str>, bg: Option<&str>) -> Result<Self, Error> {
        for name in [fg, bg].into_iter().flatten() {
            if parse_color(name).is_none() {
                return Err(Error::Color { name: name.to_owned() });
            }
        }
        Ok(Self {
            fg: fg.map(str::to_owned),
            bg: bg.map(str::to_owned),
            ..Self::default()
        })
    }

    /// Copy of this style with a different background color.
    ///
    /// Used for selection highlights, which keep the glyph color but
    /// repaint the cell behind it.
    pub fn on_background(&self, bg: &str) -> Self {
        Self { bg: Some(bg.to_owned()), ..self.clone() }
    }

    /// Set the bold flag (builder).
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    /// Create a new styled cell.
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell with default style.
    pub fn blank() -> Self {
        Self { ch: ' ', style: CellStyle::default() }
    }

    /// A blank (space) cell with the given style.
    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Color parsing
// ---------------------------------------------------------------------------

/// Parse a color string into a crossterm `Color`.
///
/// Supports:
/// - Hex colors: `#rrggbb` or `#rgb`
/// - Named colors: `black`, `red`, `green`, `yellow`, `blue`, `magenta`, `cyan`, `white`,
///   `dark_red`, `dark_green`, `dark_yellow`, `dark_blue`, `dark_magenta`, `dark_cyan`,
///   `dark_grey`/`dark_gray`, `grey`/`gray`
///
/// Returns `None` if the color string cannot be parsed.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();

    // Hex color
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    // Named colors (case-insensitive)
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "dark_red" | "darkred" => Some(Color::DarkRed),
        "dark_green" | "darkgreen" => Some(Color::DarkGreen),
        "dark_yellow" | "darkyellow" => Some(Color::DarkYellow),
        "dark_blue" | "darkblue" => Some(Color::DarkBlue),
        "dark_magenta" | "darkmagenta" => Some(Color::DarkMagenta),
        "dark_cyan" | "darkcyan" => Some(Color::DarkCyan),
        "dark_grey" | "dark_gray" | "darkgrey" | "darkgray" => Some(Color::DarkGrey),
        "grey" | "gray" => Some(Color::Grey),
        _ => None,
    }
}

/// Parse a hex color string (without the leading `#`).
///
/// Supports 6-digit (`rrggbb`) and 3-digit (`rgb`) formats.
fn parse_hex_color(hex: &str) -> Option<Color> {
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb { r, g, b })
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            // Expand: 0xA -> 0xAA
            Some(Color::Rgb { r: r * 16 + r, g: g * 16 + g, b: b * 16 + b })
        }
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
