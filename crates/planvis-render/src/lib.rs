//! # planvis-render
//!
//! Rendering backends for planvis plot elements.
//!
//! This crate provides:
//! - `SvgBackend`: draws elements into an SVG document whose user units are the
//!   engine's native length unit, so every coordinate is written exactly as laid out
//!
//! ## Example
//!
//! ```rust
//! use planvis_core::{PlotableElement, RenderBackend, Rgb, ShapeKind, Style};
//! use planvis_render::SvgBackend;
//!
//! let mut backend = SvgBackend::new(1_000_000, 500_000);
//! let bar = PlotableElement::new(
//!     ShapeKind::Rectangle,
//!     100_000,
//!     200_000,
//!     316_000,
//!     800_000,
//!     Style::new(Rgb(0, 112, 192), Rgb(0, 0, 0)),
//! );
//! backend.draw(&bar)?;
//!
//! let svg = backend.finish()?;
//! assert!(svg.contains(r##"fill="#0070c0""##));
//! # Ok::<(), planvis_core::RenderError>(())
//! ```

use svg::node::element::{Group, Line, Polygon, Rectangle, Text};
use svg::Document;

use planvis_core::units::{to_cm, Length};
use planvis_core::{
    HorizontalAlign, PlotableElement, RenderBackend, RenderError, Rgb, ShapeKind, TextStyle,
    VerticalAlign,
};

/// Widescreen slide width
pub const SLIDE_WIDTH: Length = 12_192_000;
/// Widescreen slide height
pub const SLIDE_HEIGHT: Length = 6_858_000;

/// SVG backend configuration and the elements drawn so far
#[derive(Clone, Debug)]
pub struct SvgBackend {
    /// Canvas width in native units
    pub width: Length,
    /// Canvas height in native units
    pub height: Length,
    /// Outline width in native units
    pub stroke_width: Length,
    /// Background colour; transparent when `None`
    pub background: Option<Rgb>,
    /// Font family
    pub font_family: String,
    drawn: Vec<Group>,
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self::new(SLIDE_WIDTH, SLIDE_HEIGHT)
    }
}

impl SvgBackend {
    pub fn new(width: Length, height: Length) -> Self {
        Self {
            width,
            height,
            stroke_width: 9_525,
            background: Some(Rgb::WHITE),
            font_family: "Calibri, Arial, sans-serif".into(),
            drawn: Vec::new(),
        }
    }

    pub fn stroke_width(mut self, width: Length) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn background(mut self, colour: Option<Rgb>) -> Self {
        self.background = colour;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Number of elements drawn
    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }

    /// Serialise everything drawn so far
    pub fn finish(&self) -> Result<String, RenderError> {
        let mut document = Document::new()
            .set("width", format!("{}cm", to_cm(self.width)))
            .set("height", format!("{}cm", to_cm(self.height)))
            .set("viewBox", (0, 0, self.width, self.height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        if let Some(background) = self.background {
            document = document.add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background.to_hex()),
            );
        }

        for group in &self.drawn {
            document = document.add(group.clone());
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }

    fn shape(&self, element: &PlotableElement) -> Group {
        let style = &element.style;
        let fill = paint(style.fill);
        let stroke = paint(style.line);
        let mut group = Group::new().set("class", element.kind.as_str());

        match element.kind {
            ShapeKind::Rectangle | ShapeKind::RoundedRectangle => {
                let mut rect = Rectangle::new()
                    .set("x", element.left)
                    .set("y", element.top)
                    .set("width", element.width())
                    .set("height", element.height())
                    .set("fill", fill)
                    .set("stroke", stroke)
                    .set("stroke-width", self.stroke_width);
                if element.kind == ShapeKind::RoundedRectangle {
                    let radius = style.corner_radius.min(element.height() / 2);
                    rect = rect.set("rx", radius).set("ry", radius);
                }
                group = group.add(rect);
            }
            ShapeKind::Diamond => {
                let cx = element.left as f64 + element.width() as f64 / 2.0;
                let cy = element.top as f64 + element.height() as f64 / 2.0;
                let diamond = Polygon::new()
                    .set(
                        "points",
                        format!(
                            "{},{} {},{} {},{} {},{}",
                            cx, element.top, element.right, cy, cx, element.bottom, element.left, cy
                        ),
                    )
                    .set("fill", fill)
                    .set("stroke", stroke)
                    .set("stroke-width", self.stroke_width);
                group = group.add(diamond);
            }
            ShapeKind::Line => {
                let line = Line::new()
                    .set("x1", element.left)
                    .set("y1", element.top)
                    .set("x2", element.right)
                    .set("y2", element.bottom)
                    .set("stroke", stroke)
                    .set("stroke-width", self.stroke_width);
                group = group.add(line);
            }
        }

        if let (Some(text), Some(text_style)) = (&element.text, &element.text_style) {
            group = group.add(self.text(element, text, text_style));
        }
        group
    }

    fn text(&self, element: &PlotableElement, content: &str, style: &TextStyle) -> Text {
        let inner_left = element.left + style.margin_left;
        let inner_right = element.right - style.margin_right;
        let (x, anchor) = match style.horizontal_align {
            HorizontalAlign::Left => (inner_left as f64, "start"),
            HorizontalAlign::Right => (inner_right as f64, "end"),
            HorizontalAlign::Centre => ((inner_left + inner_right) as f64 / 2.0, "middle"),
        };
        let (y, baseline) = match style.vertical_align {
            VerticalAlign::Top => ((element.top + style.margin_top) as f64, "hanging"),
            VerticalAlign::Middle => ((element.top + element.bottom) as f64 / 2.0, "central"),
            VerticalAlign::Bottom => (
                (element.bottom - style.margin_bottom) as f64,
                "text-after-edge",
            ),
        };

        let mut text = Text::new(content)
            .set("x", x)
            .set("y", y)
            .set("text-anchor", anchor)
            .set("dominant-baseline", baseline)
            .set("font-family", self.font_family.as_str())
            .set("font-size", style.font_size)
            .set("fill", style.font_colour.to_hex());
        if style.bold {
            text = text.set("font-weight", "bold");
        }
        if style.italic {
            text = text.set("font-style", "italic");
        }
        text
    }
}

fn paint(colour: Option<Rgb>) -> String {
    colour.map_or_else(|| "none".to_string(), |c| c.to_hex())
}

impl RenderBackend for SvgBackend {
    /// Position of the element in draw order
    type Handle = usize;

    fn draw(&mut self, element: &PlotableElement) -> Result<usize, RenderError> {
        if element.kind != ShapeKind::Line && (element.width() < 0 || element.height() < 0) {
            return Err(RenderError::InvalidData(format!(
                "{} with negative size at ({}, {})",
                element.kind, element.left, element.top
            )));
        }
        let group = self.shape(element);
        self.drawn.push(group);
        Ok(self.drawn.len() - 1)
    }
}
