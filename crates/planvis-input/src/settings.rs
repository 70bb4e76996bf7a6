//! Plot settings as written by people: centimetres and shape names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use planvis_core::units::cm;
use planvis_core::ShapeKind;
use planvis_layout::{PlotConfig, DEFAULT_SHAPE_GAP};

use crate::InputError;

/// Plot area and track geometry, lengths in centimetres
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub track_height: f64,
    pub track_gap: f64,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub today: Option<NaiveDate>,
    pub milestone_width: f64,
    pub milestone_text_width: f64,
    pub activity_text_width: f64,
    pub text_margin: f64,
    pub activity_shape: String,
    pub milestone_shape: String,
    /// Inset between adjacent shapes; the engine default when absent
    pub shape_gap: Option<f64>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            top: 3.0,
            left: 1.0,
            bottom: 18.0,
            right: 32.87,
            track_height: 0.6,
            track_gap: 0.2,
            min_date: None,
            max_date: None,
            today: None,
            milestone_width: 0.4,
            milestone_text_width: 5.0,
            activity_text_width: 5.0,
            text_margin: 0.1,
            activity_shape: "RECTANGLE".into(),
            milestone_shape: "DIAMOND".into(),
            shape_gap: None,
        }
    }
}

impl PlotSettings {
    /// Convert to native units, parsing the shape names
    pub fn to_plot_config(&self) -> Result<PlotConfig, InputError> {
        for (name, value) in [
            ("track_height", self.track_height),
            ("milestone_width", self.milestone_width),
        ] {
            if value <= 0.0 {
                return Err(InputError::InvalidValue(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.right <= self.left || self.bottom <= self.top {
            return Err(InputError::InvalidValue(format!(
                "empty plot area: top {} left {} bottom {} right {}",
                self.top, self.left, self.bottom, self.right
            )));
        }

        Ok(PlotConfig {
            top: cm(self.top),
            left: cm(self.left),
            bottom: cm(self.bottom),
            right: cm(self.right),
            track_height: cm(self.track_height),
            track_gap: cm(self.track_gap),
            min_start_date: self.min_date,
            max_end_date: self.max_date,
            today: self.today,
            milestone_width: cm(self.milestone_width),
            activity_text_width: cm(self.activity_text_width),
            milestone_text_width: cm(self.milestone_text_width),
            text_margin: cm(self.text_margin),
            activity_shape: self.activity_shape.parse::<ShapeKind>()?,
            milestone_shape: self.milestone_shape.parse::<ShapeKind>()?,
            shape_gap: self.shape_gap.map_or(DEFAULT_SHAPE_GAP, cm),
        })
    }
}
