//! Plotable elements: the output unit of the layout engine

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::style::{Style, TextStyle};
use crate::units::Length;
use crate::LayoutError;

/// Geometric shape kinds a rendering backend must support
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    RoundedRectangle,
    Diamond,
    /// Straight connector from (left, top) to (right, bottom)
    Line,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::RoundedRectangle => "rounded_rectangle",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Line => "line",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = LayoutError;

    /// Accepts `ROUNDED_RECTANGLE`, `rounded rectangle`, `Rounded-Rectangle`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "rounded_rectangle" => Ok(ShapeKind::RoundedRectangle),
            "diamond" => Ok(ShapeKind::Diamond),
            "line" => Ok(ShapeKind::Line),
            _ => Err(LayoutError::UnknownShape(s.to_string())),
        }
    }
}

/// A positioned, sized and styled shape ready for a rendering backend.
///
/// Coordinates are absolute and already rounded; width and height are derived from
/// the edges and never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotableElement {
    pub kind: ShapeKind,
    pub top: Length,
    pub left: Length,
    pub bottom: Length,
    pub right: Length,
    pub style: Style,
    pub text: Option<String>,
    pub text_style: Option<TextStyle>,
}

impl PlotableElement {
    pub fn new(
        kind: ShapeKind,
        top: Length,
        left: Length,
        bottom: Length,
        right: Length,
        style: Style,
    ) -> Self {
        Self {
            kind,
            top,
            left,
            bottom,
            right,
            style,
            text: None,
            text_style: None,
        }
    }

    /// Attach a label with its resolved text formatting
    pub fn with_text(mut self, text: impl Into<String>, text_style: TextStyle) -> Self {
        self.text = Some(text.into());
        self.text_style = Some(text_style);
        self
    }

    pub fn width(&self) -> Length {
        self.right - self.left
    }

    pub fn height(&self) -> Length {
        self.bottom - self.top
    }

    /// Corner radius as a fraction of the height, for rounded rectangles only
    pub fn corner_fraction(&self) -> Option<f64> {
        if self.kind != ShapeKind::RoundedRectangle || self.height() == 0 {
            return None;
        }
        Some(self.style.corner_radius as f64 / self.height() as f64)
    }

    /// Whether this element is a transparent text-only box
    pub fn is_text_only(&self) -> bool {
        self.text.is_some() && self.style.fill.is_none() && self.style.line.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Rgb;

    #[test]
    fn derived_dimensions() {
        let element = PlotableElement::new(
            ShapeKind::Rectangle,
            100,
            200,
            460,
            1_200,
            Style::new(Rgb::WHITE, Rgb::BLACK),
        );
        assert_eq!(element.width(), 1_000);
        assert_eq!(element.height(), 360);
        assert_eq!(element.corner_fraction(), None);
        assert!(!element.is_text_only());
    }

    #[test]
    fn corner_fraction_for_rounded_shapes() {
        let style = Style::new(Rgb::WHITE, Rgb::BLACK).corner_radius(90);
        let element = PlotableElement::new(ShapeKind::RoundedRectangle, 0, 0, 360, 720, style);
        assert_eq!(element.corner_fraction(), Some(0.25));
    }

    #[test]
    fn parse_shape_kinds() {
        assert_eq!(
            "ROUNDED_RECTANGLE".parse::<ShapeKind>().unwrap(),
            ShapeKind::RoundedRectangle
        );
        assert_eq!(
            "rounded rectangle".parse::<ShapeKind>().unwrap(),
            ShapeKind::RoundedRectangle
        );
        assert_eq!("Diamond".parse::<ShapeKind>().unwrap(), ShapeKind::Diamond);
        assert!(matches!(
            "hexagon".parse::<ShapeKind>(),
            Err(LayoutError::UnknownShape(name)) if name == "hexagon"
        ));
    }
}
