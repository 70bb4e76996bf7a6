//! Shape and text styling
//!
//! Styles are plain values. Layout never mutates a style it was given: text alignment
//! and margins that depend on where a label is placed are applied to a copy via
//! [`TextStyle::with_alignment`] / [`TextStyle::with_margins`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::units::{pt, Length};
use crate::{LayoutError, TextLayout};

/// An RGB colour with 0-255 channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Build from a `[r, g, b]` triple
    pub fn from_array(rgb: [u8; 3]) -> Self {
        Rgb(rgb[0], rgb[1], rgb[2])
    }

    /// `#rrggbb` notation
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Vertical anchoring of text inside its box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

impl FromStr for VerticalAlign {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(VerticalAlign::Top),
            "middle" => Ok(VerticalAlign::Middle),
            "bottom" => Ok(VerticalAlign::Bottom),
            _ => Err(LayoutError::UnknownAlignment(s.to_string())),
        }
    }
}

/// Horizontal alignment of text inside its box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Right,
    #[default]
    Centre,
}

impl HorizontalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Right => "right",
            HorizontalAlign::Centre => "centre",
        }
    }
}

impl FromStr for HorizontalAlign {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(HorizontalAlign::Left),
            "right" => Ok(HorizontalAlign::Right),
            "centre" | "center" => Ok(HorizontalAlign::Centre),
            _ => Err(LayoutError::UnknownAlignment(s.to_string())),
        }
    }
}

/// Alignment of a label given where it is laid out relative to its shape.
///
/// Text overflowing to the left hugs the shape with its right edge and vice versa.
pub fn resolve_text_alignment(layout: TextLayout) -> HorizontalAlign {
    match layout {
        TextLayout::Left => HorizontalAlign::Right,
        TextLayout::Right => HorizontalAlign::Left,
        TextLayout::Shape => HorizontalAlign::Centre,
    }
}

/// Text formatting attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub margin_top: Length,
    pub margin_left: Length,
    pub margin_bottom: Length,
    pub margin_right: Length,
    pub vertical_align: VerticalAlign,
    pub horizontal_align: HorizontalAlign,
    /// Font size in EMU
    pub font_size: Length,
    pub bold: bool,
    pub italic: bool,
    pub font_colour: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            margin_top: 0,
            margin_left: 0,
            margin_bottom: 0,
            margin_right: 0,
            vertical_align: VerticalAlign::Middle,
            horizontal_align: HorizontalAlign::Centre,
            font_size: pt(10.0),
            bold: false,
            italic: false,
            font_colour: Rgb(26, 26, 26),
        }
    }
}

impl TextStyle {
    /// Same margin on all four sides
    pub fn uniform_margin(mut self, margin: Length) -> Self {
        self.margin_top = margin;
        self.margin_left = margin;
        self.margin_bottom = margin;
        self.margin_right = margin;
        self
    }

    pub fn with_alignment(mut self, align: HorizontalAlign) -> Self {
        self.horizontal_align = align;
        self
    }

    pub fn with_vertical_alignment(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = align;
        self
    }

    /// Replace the left and right margins
    pub fn with_margins(mut self, left: Length, right: Length) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    pub fn font(mut self, size: Length, colour: Rgb) -> Self {
        self.font_size = size;
        self.font_colour = colour;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

/// Visual attributes of a shape, with the text formatting used for its label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Fill colour; `None` is transparent
    pub fill: Option<Rgb>,
    /// Outline colour; `None` draws no outline
    pub line: Option<Rgb>,
    /// Corner radius, only used by rounded shapes
    pub corner_radius: Length,
    pub text: TextStyle,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            line: None,
            corner_radius: 0,
            text: TextStyle::default(),
        }
    }
}

impl Style {
    /// Solid style with fill and outline
    pub fn new(fill: Rgb, line: Rgb) -> Self {
        Self {
            fill: Some(fill),
            line: Some(line),
            ..Self::default()
        }
    }

    /// No fill and no outline, carrying only text formatting
    pub fn transparent(text: TextStyle) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    /// Outline only, as used for connector lines
    pub fn line_only(line: Rgb) -> Self {
        Self {
            line: Some(line),
            ..Self::default()
        }
    }

    pub fn corner_radius(mut self, radius: Length) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn text(mut self, text: TextStyle) -> Self {
        self.text = text;
        self
    }
}
