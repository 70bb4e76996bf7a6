//! Layout diagnostics
//!
//! Components that default missing input, derive values or fall back to another style
//! report it through a [`LayoutObserver`] passed in by the caller. Nothing in the
//! library writes to a process-wide logger directly; [`TracingObserver`] forwards
//! notices to `tracing` when the caller wants that.

use chrono::NaiveDate;

/// Something the engine or an input adapter decided on the caller's behalf
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutNotice {
    /// A missing input field was replaced by its default
    FieldDefaulted {
        activity: String,
        field: &'static str,
        value: String,
    },
    /// A plan row was excluded from the visual
    RowSkipped { row: usize, description: String },
    /// The plotted date range was not configured and was taken from the plan
    DateRangeDerived {
        min_start: NaiveDate,
        max_end: NaiveDate,
    },
    /// The plotted date range after snapping to whole months
    DateRangeAligned {
        min_start: NaiveDate,
        max_end: NaiveDate,
        num_days: i64,
    },
    /// A swimlane used by the plan was missing from the declared order
    SwimlaneAppended { name: String, rank: usize },
    /// A named style was missing and `"Default"` was used instead
    StyleFallback { requested: String },
    /// Today lies outside the plotted range so no today marker is drawn
    TodayOutsideRange { today: NaiveDate },
}

impl LayoutNotice {
    /// Whether the notice points at incomplete input rather than routine derivation
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            LayoutNotice::FieldDefaulted { .. }
                | LayoutNotice::StyleFallback { .. }
                | LayoutNotice::TodayOutsideRange { .. }
        )
    }
}

impl std::fmt::Display for LayoutNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutNotice::FieldDefaulted {
                activity,
                field,
                value,
            } => write!(f, "no {} specified for [{:.40}], using {}", field, activity, value),
            LayoutNotice::RowSkipped { row, description } => {
                write!(f, "row {} [{:.40}] not flagged for the visual", row, description)
            }
            LayoutNotice::DateRangeDerived { min_start, max_end } => {
                write!(f, "date range taken from plan: {} to {}", min_start, max_end)
            }
            LayoutNotice::DateRangeAligned {
                min_start,
                max_end,
                num_days,
            } => write!(
                f,
                "date range aligned to months: {} to {} ({} days)",
                min_start, max_end, num_days
            ),
            LayoutNotice::SwimlaneAppended { name, rank } => {
                write!(f, "swimlane '{}' not in declared order, placed at {}", name, rank)
            }
            LayoutNotice::StyleFallback { requested } => {
                write!(f, "style '{}' not configured, using 'Default'", requested)
            }
            LayoutNotice::TodayOutsideRange { today } => {
                write!(f, "today ({}) is outside the plotted range", today)
            }
        }
    }
}

/// Receiver for layout notices
pub trait LayoutObserver {
    fn notice(&mut self, notice: LayoutNotice);
}

/// Forwards notices to `tracing` events
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl LayoutObserver for TracingObserver {
    fn notice(&mut self, notice: LayoutNotice) {
        if notice.is_warning() {
            tracing::warn!(target: "planvis", "{}", notice);
        } else {
            tracing::debug!(target: "planvis", "{}", notice);
        }
    }
}

/// Keeps every notice, in order
#[derive(Clone, Debug, Default)]
pub struct CollectingObserver {
    pub notices: Vec<LayoutNotice>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LayoutNotice> {
        self.notices.iter().filter(|n| n.is_warning())
    }
}

impl LayoutObserver for CollectingObserver {
    fn notice(&mut self, notice: LayoutNotice) {
        self.notices.push(notice);
    }
}

/// Discards all notices
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl LayoutObserver for NullObserver {
    fn notice(&mut self, _notice: LayoutNotice) {}
}
