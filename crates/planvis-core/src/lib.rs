//! # planvis-core
//!
//! Core domain model and traits for the planvis plan visualiser.
//!
//! This crate provides:
//! - Domain types: `Activity`, `Style`, `TextStyle`, `PlotableElement`
//! - Calendar utilities and the past/current/future classification
//! - Core traits: `RenderBackend`, `LayoutObserver`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use planvis_core::{Activity, Rgb, Style, TextLayout};
//!
//! let style = Style::new(Rgb(0, 112, 192), Rgb(0, 0, 0));
//! let design = Activity::bar(
//!     1,
//!     "Design",
//!     NaiveDate::from_ymd_opt(2021, 1, 4).unwrap(),
//!     NaiveDate::from_ymd_opt(2021, 2, 26).unwrap(),
//!     style,
//! )
//! .swimlane("Engineering")
//! .track(2)
//! .text_layout(TextLayout::Right);
//!
//! assert!(design.validate().is_ok());
//! assert_eq!(design.highest_track(), 2);
//! ```

pub mod calendar;
pub mod element;
pub mod observer;
pub mod style;
pub mod units;

pub use calendar::TemporalState;
pub use element::{PlotableElement, ShapeKind};
pub use observer::{CollectingObserver, LayoutNotice, LayoutObserver, NullObserver, TracingObserver};
pub use style::{resolve_text_alignment, HorizontalAlign, Rgb, Style, TextStyle, VerticalAlign};
pub use units::{cm, pt, Length};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Identifier of an activity (its row in the plan)
pub type ActivityId = u32;

/// Name of the swimlane used when a plan row does not specify one
pub const DEFAULT_SWIMLANE: &str = "Default";

// ============================================================================
// Activity
// ============================================================================

/// Whether a plan item has duration or marks a point in time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Plotted as a bar spanning its dates
    Bar,
    /// Plotted as a marker centred on its date
    Milestone,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Bar => "bar",
            ActivityType::Milestone => "milestone",
        }
    }

    /// Default label placement for this type
    pub fn default_text_layout(&self) -> TextLayout {
        match self {
            ActivityType::Bar => TextLayout::Shape,
            ActivityType::Milestone => TextLayout::Left,
        }
    }
}

impl FromStr for ActivityType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" | "activity" => Ok(ActivityType::Bar),
            "milestone" => Ok(ActivityType::Milestone),
            _ => Err(LayoutError::UnknownActivityType(s.to_string())),
        }
    }
}

/// Placement of an activity's label relative to its shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextLayout {
    /// Overflow to the left of the shape, right-aligned
    Left,
    /// Overflow to the right of the shape, left-aligned
    Right,
    /// Coincide with the shape, centred
    Shape,
}

impl TextLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextLayout::Left => "Left",
            TextLayout::Right => "Right",
            TextLayout::Shape => "Shape",
        }
    }
}

impl FromStr for TextLayout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(TextLayout::Left),
            "right" => Ok(TextLayout::Right),
            "shape" => Ok(TextLayout::Shape),
            _ => Err(LayoutError::UnknownTextLayout(s.to_string())),
        }
    }
}

/// A plan item: an activity bar or a milestone, with its placement and formatting
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    /// Label text
    pub description: String,
    pub activity_type: ActivityType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub swimlane: String,
    /// 1-based track within the swimlane
    pub track_number: u32,
    /// Number of tracks the shape covers vertically
    pub track_span: u32,
    pub text_layout: TextLayout,
    /// Shape override; the plot's default shape for the type is used when absent
    pub shape: Option<ShapeKind>,
    /// Formatting for the whole item, or for its future part when split
    pub primary_style: Style,
    /// Formatting for the past ("done") part; presence enables the split
    pub secondary_style: Option<Style>,
}

impl Activity {
    /// Create an item in the default swimlane, on track 1, spanning one track
    pub fn new(
        id: ActivityId,
        description: impl Into<String>,
        activity_type: ActivityType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        primary_style: Style,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            activity_type,
            start_date,
            end_date,
            swimlane: DEFAULT_SWIMLANE.to_string(),
            track_number: 1,
            track_span: 1,
            text_layout: activity_type.default_text_layout(),
            shape: None,
            primary_style,
            secondary_style: None,
        }
    }

    /// Create an activity bar
    pub fn bar(
        id: ActivityId,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        style: Style,
    ) -> Self {
        Self::new(id, description, ActivityType::Bar, start_date, end_date, style)
    }

    /// Create a milestone on a single date
    pub fn milestone(
        id: ActivityId,
        description: impl Into<String>,
        date: NaiveDate,
        style: Style,
    ) -> Self {
        Self::new(id, description, ActivityType::Milestone, date, date, style)
    }

    /// Set the swimlane
    pub fn swimlane(mut self, name: impl Into<String>) -> Self {
        self.swimlane = name.into();
        self
    }

    /// Set the track within the swimlane
    pub fn track(mut self, track_number: u32) -> Self {
        self.track_number = track_number;
        self
    }

    /// Set the number of tracks covered
    pub fn span(mut self, track_span: u32) -> Self {
        self.track_span = track_span;
        self
    }

    pub fn text_layout(mut self, text_layout: TextLayout) -> Self {
        self.text_layout = text_layout;
        self
    }

    pub fn shape(mut self, shape: ShapeKind) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Enable the done/to-do split with the given style for the done part
    pub fn secondary_style(mut self, style: Style) -> Self {
        self.secondary_style = Some(style);
        self
    }

    pub fn is_milestone(&self) -> bool {
        self.activity_type == ActivityType::Milestone
    }

    /// Whether past and future parts are styled differently
    pub fn split_enabled(&self) -> bool {
        self.secondary_style.is_some()
    }

    /// Last track (relative to the swimlane) covered by this item
    pub fn highest_track(&self) -> u32 {
        self.track_number
            .saturating_add(self.track_span.saturating_sub(1))
    }

    /// Classify against `today`
    pub fn temporal_state(&self, today: NaiveDate) -> Option<TemporalState> {
        TemporalState::classify(self.start_date, self.end_date, today)
    }

    /// Check the invariants the layout engine relies on
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.track_number == 0 {
            return Err(LayoutError::InvalidTrack {
                activity: self.description.clone(),
                field: "track_number",
            });
        }
        if self.track_span == 0 || self.track_number.checked_add(self.track_span - 1).is_none() {
            return Err(LayoutError::InvalidTrack {
                activity: self.description.clone(),
                field: "track_span",
            });
        }
        if self.end_date < self.start_date {
            return Err(LayoutError::InvalidDateRange {
                activity: self.description.clone(),
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Traits
// ============================================================================

/// A drawing target for plotable elements
pub trait RenderBackend {
    /// Backend-specific reference to a drawn shape
    type Handle;

    /// Draw one element at exactly the coordinates it carries
    fn draw(&mut self, element: &PlotableElement) -> Result<Self::Handle, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Layout error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unknown activity type: {0}")]
    UnknownActivityType(String),

    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    #[error("Unknown text layout: {0}")]
    UnknownTextLayout(String),

    #[error("Unknown alignment: {0}")]
    UnknownAlignment(String),

    #[error("Swimlane start track for '{0}' not available")]
    SwimlaneNotAllocated(String),

    #[error("Invalid {field} for [{activity}]: must be at least 1 and keep the track range within u32")]
    InvalidTrack {
        activity: String,
        field: &'static str,
    },

    #[error("Invalid date range for [{activity}]: {end} is before {start}")]
    InvalidDateRange {
        activity: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Plot date range invalid: {0}")]
    InvalidPlotRange(String),

    #[error("No activities to plot")]
    EmptyPlan,

    #[error("Plot date range has not been finalised")]
    DateRangeUnset,
}

impl LayoutError {
    /// Whether this is a caller ordering bug rather than bad configuration or data
    pub fn is_data_range_error(&self) -> bool {
        matches!(self, LayoutError::DateRangeUnset)
    }
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
