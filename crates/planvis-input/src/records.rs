//! Plan rows and their normalisation into activities
//!
//! Rows arrive with most layout fields optional. Normalisation fills each gap with its
//! documented default and reports every default it applied, so the layout engine only
//! ever sees complete activities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use planvis_core::{
    Activity, ActivityId, ActivityType, LayoutNotice, LayoutObserver, ShapeKind, TextLayout,
    DEFAULT_SWIMLANE,
};

use crate::styles::{StyleTable, DEFAULT_FORMAT};
use crate::InputError;

/// One row of a plan as exported from a planning tool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawActivity {
    pub task_name: String,
    /// Text shown on the plot instead of the task name
    #[serde(default)]
    pub visual_text: Option<String>,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    /// Duration in days; zero marks a milestone
    #[serde(default)]
    pub duration: Option<u32>,
    /// Explicit type, overriding the duration rule
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
    /// Rows not flagged are left off the plot
    #[serde(default = "flagged")]
    pub visual_flag: bool,
    #[serde(default)]
    pub swimlane: Option<String>,
    #[serde(default)]
    pub track: Option<u32>,
    #[serde(default)]
    pub tracks_to_cover: Option<u32>,
    #[serde(default)]
    pub text_layout: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub done_format: Option<String>,
    #[serde(default)]
    pub shape: Option<String>,
}

fn flagged() -> bool {
    true
}

impl RawActivity {
    /// Minimal row with every optional field unset
    pub fn new(task_name: impl Into<String>, start: NaiveDate, finish: NaiveDate) -> Self {
        Self {
            task_name: task_name.into(),
            visual_text: None,
            start,
            finish,
            duration: None,
            activity_type: None,
            visual_flag: true,
            swimlane: None,
            track: None,
            tracks_to_cover: None,
            text_layout: None,
            format: None,
            done_format: None,
            shape: None,
        }
    }

    fn resolved_type(&self) -> Result<ActivityType, InputError> {
        match (&self.activity_type, self.duration) {
            (Some(name), _) => Ok(name.parse::<ActivityType>()?),
            (None, Some(0)) => Ok(ActivityType::Milestone),
            (None, _) => Ok(ActivityType::Bar),
        }
    }
}

/// Highest track handed out so far in each swimlane
#[derive(Debug, Default)]
struct TrackCounter {
    highest: HashMap<String, u32>,
}

impl TrackCounter {
    /// Record an explicit track
    fn seen(&mut self, swimlane: &str, track: u32) {
        let entry = self.highest.entry(swimlane.to_string()).or_insert(track);
        *entry = (*entry).max(track);
    }

    /// Next free track below everything seen in the swimlane
    fn next(&mut self, swimlane: &str) -> u32 {
        let track = self.highest.get(swimlane).map_or(1, |t| t + 1);
        self.highest.insert(swimlane.to_string(), track);
        track
    }
}

/// Turn plan rows into activities, applying defaults for missing fields.
///
/// Rows with `visual_flag = false` are skipped; ids are the row index.
pub fn normalize_activities(
    rows: &[RawActivity],
    styles: &StyleTable,
    observer: &mut dyn LayoutObserver,
) -> Result<Vec<Activity>, InputError> {
    let mut tracks = TrackCounter::default();
    let mut activities = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        if !row.visual_flag {
            observer.notice(LayoutNotice::RowSkipped {
                row: index,
                description: row.task_name.clone(),
            });
            continue;
        }

        let description = row.visual_text.clone().unwrap_or_else(|| row.task_name.clone());
        let mut defaulted = |field: &'static str, value: String| {
            observer.notice(LayoutNotice::FieldDefaulted {
                activity: description.clone(),
                field,
                value,
            });
        };

        let activity_type = row.resolved_type()?;

        let swimlane = match &row.swimlane {
            Some(name) => name.clone(),
            None => {
                defaulted("swimlane", format!("\"{}\"", DEFAULT_SWIMLANE));
                DEFAULT_SWIMLANE.to_string()
            }
        };

        let track_number = match row.track {
            Some(track) => {
                tracks.seen(&swimlane, track);
                track
            }
            None => {
                let track = tracks.next(&swimlane);
                defaulted("track", track.to_string());
                track
            }
        };

        let track_span = row.tracks_to_cover.unwrap_or_else(|| {
            defaulted("tracks_to_cover", "1".into());
            1
        });

        let format = row.format.as_deref().unwrap_or_else(|| {
            defaulted("format", format!("\"{}\"", DEFAULT_FORMAT));
            DEFAULT_FORMAT
        });

        let text_layout = match &row.text_layout {
            Some(layout) => layout.parse::<TextLayout>()?,
            None => {
                let layout = activity_type.default_text_layout();
                defaulted("text_layout", format!("\"{}\"", layout.as_str()));
                layout
            }
        };

        let primary_style = styles.resolve(&description, format)?;
        let secondary_style = row
            .done_format
            .as_deref()
            .map(|name| styles.resolve(&description, name))
            .transpose()?;

        let mut activity = Activity::new(
            index as ActivityId,
            description.clone(),
            activity_type,
            row.start,
            row.finish,
            primary_style,
        )
        .swimlane(swimlane)
        .track(track_number)
        .span(track_span)
        .text_layout(text_layout);
        if let Some(shape) = &row.shape {
            activity = activity.shape(shape.parse::<ShapeKind>()?);
        }
        activity.secondary_style = secondary_style;

        activities.push(activity);
    }

    Ok(activities)
}
