//! Named formats
//!
//! A format is the nine attributes a plan row can refer to by name. The table always
//! holds a `"Default"` format so rows without one, and slide-level styles nobody
//! configured, still resolve.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use planvis_core::units::{cm, pt, Length};
use planvis_core::{LayoutObserver, Rgb, Style, TextStyle, VerticalAlign};
use planvis_layout::PlanStyles;

use crate::InputError;

/// Name of the format used when none is given
pub const DEFAULT_FORMAT: &str = "Default";

/// One named format as configured
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleRecord {
    pub fill_rgb: [u8; 3],
    pub line_rgb: [u8; 3],
    /// Centimetres
    #[serde(default)]
    pub corner_radius: f64,
    /// Points
    pub font_size: f64,
    #[serde(default)]
    pub font_bold: bool,
    #[serde(default)]
    pub font_italic: bool,
    pub font_colour_rgb: [u8; 3],
    #[serde(default = "default_vertical_align")]
    pub text_vertical_align: String,
}

fn default_vertical_align() -> String {
    "middle".into()
}

impl StyleRecord {
    /// Format synthesised when no `"Default"` is configured
    pub fn fallback() -> Self {
        Self {
            fill_rgb: [0, 255, 255],
            line_rgb: [255, 0, 0],
            corner_radius: 0.0,
            font_size: 8.0,
            font_bold: false,
            font_italic: false,
            font_colour_rgb: [0, 0, 0],
            text_vertical_align: default_vertical_align(),
        }
    }

    /// Build the style, with every text margin set to `text_margin`
    pub fn to_style(&self, text_margin: Length) -> Result<Style, InputError> {
        let text = TextStyle::default()
            .uniform_margin(text_margin)
            .with_vertical_alignment(self.text_vertical_align.parse::<VerticalAlign>()?)
            .font(pt(self.font_size), Rgb::from_array(self.font_colour_rgb))
            .bold(self.font_bold)
            .italic(self.font_italic);

        Ok(Style::new(Rgb::from_array(self.fill_rgb), Rgb::from_array(self.line_rgb))
            .corner_radius(cm(self.corner_radius))
            .text(text))
    }
}

/// Resolved styles by format name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleTable {
    styles: BTreeMap<String, Style>,
}

impl StyleTable {
    /// Resolve every record, adding the fallback `"Default"` when missing
    pub fn from_records(
        records: &BTreeMap<String, StyleRecord>,
        text_margin: Length,
    ) -> Result<Self, InputError> {
        let mut styles = BTreeMap::new();
        for (name, record) in records {
            styles.insert(name.clone(), record.to_style(text_margin)?);
        }
        if !styles.contains_key(DEFAULT_FORMAT) {
            styles.insert(
                DEFAULT_FORMAT.to_string(),
                StyleRecord::fallback().to_style(text_margin)?,
            );
        }
        Ok(Self { styles })
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// The `"Default"` style
    pub fn default_style(&self) -> Style {
        self.styles
            .get(DEFAULT_FORMAT)
            .copied()
            .unwrap_or_default()
    }

    /// Style a plan row refers to; unknown names are an error
    pub fn resolve(&self, activity: &str, format: &str) -> Result<Style, InputError> {
        self.get(format)
            .copied()
            .ok_or_else(|| InputError::UnknownFormat {
                activity: activity.to_string(),
                format: format.to_string(),
            })
    }

    /// Slide-level styles, falling back to `"Default"` for any not configured
    pub fn plan_styles(&self, observer: &mut dyn LayoutObserver) -> PlanStyles {
        PlanStyles::resolve(|name| self.get(name).copied(), self.default_style(), observer)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planvis_core::{CollectingObserver, LayoutError, LayoutNotice};
    use pretty_assertions::assert_eq;

    fn blue() -> StyleRecord {
        StyleRecord {
            fill_rgb: [0, 112, 192],
            line_rgb: [0, 0, 0],
            corner_radius: 0.1,
            font_size: 10.0,
            font_bold: true,
            font_italic: false,
            font_colour_rgb: [255, 255, 255],
            text_vertical_align: "top".into(),
        }
    }

    #[test]
    fn record_to_style() {
        let style = blue().to_style(cm(0.1)).unwrap();
        assert_eq!(style.fill, Some(Rgb(0, 112, 192)));
        assert_eq!(style.corner_radius, 36_000);
        assert_eq!(style.text.font_size, 127_000);
        assert_eq!(style.text.vertical_align, VerticalAlign::Top);
        assert_eq!(style.text.margin_left, 36_000);
        assert!(style.text.bold);
    }

    #[test]
    fn default_format_is_synthesised() {
        let mut records = BTreeMap::new();
        records.insert("Blue".to_string(), blue());
        let table = StyleTable::from_records(&records, 0).unwrap();

        assert_eq!(table.len(), 2);
        let default = table.default_style();
        assert_eq!(default.fill, Some(Rgb(0, 255, 255)));
        assert_eq!(default.line, Some(Rgb(255, 0, 0)));
        assert_eq!(default.text.font_size, pt(8.0));
        assert_eq!(default.text.font_colour, Rgb::BLACK);
        assert_eq!(default.text.vertical_align, VerticalAlign::Middle);
    }

    #[test]
    fn configured_default_is_kept() {
        let mut records = BTreeMap::new();
        records.insert(DEFAULT_FORMAT.to_string(), blue());
        let table = StyleTable::from_records(&records, 0).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.default_style().fill, Some(Rgb(0, 112, 192)));
    }

    #[test]
    fn unknown_format_and_alignment() {
        let table = StyleTable::from_records(&BTreeMap::new(), 0).unwrap();
        assert!(matches!(
            table.resolve("Build", "Green"),
            Err(InputError::UnknownFormat { format, .. }) if format == "Green"
        ));

        let mut record = blue();
        record.text_vertical_align = "centre-ish".into();
        assert!(matches!(
            record.to_style(0),
            Err(InputError::Layout(LayoutError::UnknownAlignment(_)))
        ));
    }

    #[test]
    fn plan_styles_fall_back_to_default() {
        let mut records = BTreeMap::new();
        records.insert(PlanStyles::TODAY_LINE.to_string(), blue());
        let table = StyleTable::from_records(&records, 0).unwrap();
        let mut observer = CollectingObserver::new();

        let styles = table.plan_styles(&mut observer);
        assert_eq!(styles.today_line.fill, Some(Rgb(0, 112, 192)));
        assert_eq!(styles.month_odd, table.default_style());
        assert_eq!(observer.notices.len(), 4);
        assert!(observer.notices.contains(&LayoutNotice::StyleFallback {
            requested: PlanStyles::SWIMLANE_ODD.to_string()
        }));
    }
}
