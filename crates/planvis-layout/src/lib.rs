//! # planvis-layout
//!
//! Layout engine turning plan activities into positioned, styled plot elements.
//!
//! This crate provides:
//! - `PlotDriver`: date to x, track to y, track count to height
//! - `SwimlaneTable`: absolute track ranges for each swimlane
//! - `layout_activity`: shapes and label for one activity, split at today when styled so
//! - `PlanVisualiser`: the whole plot in draw order, optionally drawn on a backend
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use planvis_core::{Activity, NullObserver, Rgb, Style};
//! use planvis_layout::{PlanStyles, PlanVisualiser, PlotConfig};
//!
//! let date = |m, d| NaiveDate::from_ymd_opt(2021, m, d).unwrap();
//! let style = Style::new(Rgb(0, 112, 192), Rgb(0, 0, 0));
//! let activities = vec![
//!     Activity::bar(1, "Design", date(1, 4), date(2, 26), style).swimlane("Engineering"),
//!     Activity::milestone(2, "Sign-off", date(3, 1), style).swimlane("Engineering"),
//! ];
//!
//! let visualiser = PlanVisualiser::new(
//!     PlotConfig::default().today(date(2, 1)),
//!     activities,
//!     &["Engineering".to_string()],
//!     PlanStyles::default(),
//!     &mut NullObserver,
//! )?;
//! let elements = visualiser.layout()?;
//! assert!(!elements.is_empty());
//! # Ok::<(), planvis_core::LayoutError>(())
//! ```

pub mod activity;
pub mod driver;
pub mod swimlane;
pub mod visualiser;

pub use activity::{layout_activity, ActivityLayout, LayoutContext};
pub use driver::{DateRange, PlotConfig, PlotDriver, XAlign, DEFAULT_SHAPE_GAP};
pub use swimlane::{SwimlaneExtent, SwimlaneRanking, SwimlaneTable};
pub use visualiser::{PlanStyles, PlanVisualiser};

use planvis_core::{LayoutError, RenderError};
use thiserror::Error;

/// Error from laying out or drawing a plan
#[derive(Debug, Error)]
pub enum VisualiseError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
}
