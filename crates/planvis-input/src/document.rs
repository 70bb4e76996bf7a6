//! Plan documents: plot settings, swimlane order, formats and rows in one file.
//!
//! ```toml
//! swimlanes = ["Engineering", "Operations"]
//!
//! [plot]
//! right = 33.87
//! today = "2021-06-29"
//!
//! [formats.Blue]
//! fill_rgb = [0, 112, 192]
//! line_rgb = [0, 0, 0]
//! font_size = 10
//! font_colour_rgb = [255, 255, 255]
//!
//! [[activities]]
//! task_name = "Build"
//! start = "2021-01-15"
//! finish = "2021-07-27"
//! format = "Blue"
//! ```
//!
//! Dates are written as quoted `YYYY-MM-DD` strings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use planvis_core::{Activity, LayoutObserver};
use planvis_layout::{PlanVisualiser, PlotConfig};

use crate::records::{normalize_activities, RawActivity};
use crate::settings::PlotSettings;
use crate::styles::{StyleRecord, StyleTable};
use crate::InputError;

/// A plan document as written
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanDocument {
    pub plot: PlotSettings,
    /// Preferred swimlane order, top to bottom
    pub swimlanes: Vec<String>,
    pub formats: BTreeMap<String, StyleRecord>,
    pub activities: Vec<RawActivity>,
}

impl PlanDocument {
    /// Resolve settings, formats and rows
    pub fn resolve(&self, observer: &mut dyn LayoutObserver) -> Result<Plan, InputError> {
        let config = self.plot.to_plot_config()?;
        let styles = StyleTable::from_records(&self.formats, config.text_margin)?;
        let activities = normalize_activities(&self.activities, &styles, observer)?;
        Ok(Plan {
            config,
            swimlanes: self.swimlanes.clone(),
            styles,
            activities,
        })
    }
}

/// A resolved plan, ready for layout
#[derive(Clone, Debug)]
pub struct Plan {
    pub config: PlotConfig,
    pub swimlanes: Vec<String>,
    pub styles: StyleTable,
    pub activities: Vec<Activity>,
}

impl Plan {
    /// Build the visualiser for this plan
    pub fn into_visualiser(
        self,
        observer: &mut dyn LayoutObserver,
    ) -> Result<PlanVisualiser, InputError> {
        let plan_styles = self.styles.plan_styles(observer);
        Ok(PlanVisualiser::new(
            self.config,
            self.activities,
            &self.swimlanes,
            plan_styles,
            observer,
        )?)
    }
}
