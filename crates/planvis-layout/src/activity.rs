//! Activity Layout Engine
//!
//! Turns one activity or milestone into the shapes that represent it on the plot,
//! plus exactly one text label.
//!
//! # Shapes emitted
//!
//! | secondary style | type      | state          | shapes                                   |
//! |-----------------|-----------|----------------|------------------------------------------|
//! | no              | any       | any            | 1, primary                               |
//! | yes             | milestone | any            | 1, secondary when past else primary      |
//! | yes             | bar       | past or future | 1, secondary when past else primary      |
//! | yes             | bar       | current        | 2, split at today: secondary then primary |
//!
//! The label is always placed against the full, unsplit range and formatted with the
//! primary style's text attributes.

use chrono::NaiveDate;
use tracing::debug;

use planvis_core::{
    resolve_text_alignment, Activity, LayoutError, Length, PlotableElement,
    ShapeKind, Style, TemporalState, TextLayout,
};

use crate::driver::{PlotDriver, XAlign};
use crate::swimlane::SwimlaneTable;

// ============================================================================
// Context
// ============================================================================

/// Everything shared by all activities of one plot
#[derive(Clone, Copy, Debug)]
pub struct LayoutContext<'a> {
    pub driver: &'a PlotDriver,
    pub swimlanes: &'a SwimlaneTable,
    /// Reference date for the past/current/future split
    pub today: NaiveDate,
}

impl<'a> LayoutContext<'a> {
    /// Context using the driver's own today
    pub fn new(driver: &'a PlotDriver, swimlanes: &'a SwimlaneTable) -> Self {
        Self {
            driver,
            swimlanes,
            today: driver.today(),
        }
    }

    /// Override the reference date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

// ============================================================================
// Result
// ============================================================================

/// Laid-out representation of one activity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityLayout {
    /// Classification against today; `None` only for an inverted date range
    pub state: Option<TemporalState>,
    /// Graphic shapes in draw order
    pub shapes: Vec<PlotableElement>,
    /// Transparent text box holding the description
    pub label: PlotableElement,
}

impl ActivityLayout {
    /// Graphic shapes followed by the label
    pub fn into_elements(self) -> Vec<PlotableElement> {
        let mut elements = self.shapes;
        elements.push(self.label);
        elements
    }

    /// Graphic shapes plus the label
    pub fn element_count(&self) -> usize {
        self.shapes.len() + 1
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Horizontal extent of a shape
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    left: Length,
    right: Length,
}

impl Span {
    fn width(&self) -> Length {
        self.right - self.left
    }
}

/// Lay out one activity.
///
/// The driver's date range must be finalised and the activity's swimlane allocated;
/// otherwise `DateRangeUnset` or `SwimlaneNotAllocated` is returned.
pub fn layout_activity(
    activity: &Activity,
    ctx: &LayoutContext<'_>,
) -> Result<ActivityLayout, LayoutError> {
    let driver = ctx.driver;
    let swimlane_start = ctx.swimlanes.start_track(&activity.swimlane)?;
    let track = activity
        .track_number
        .checked_sub(1)
        .and_then(|offset| swimlane_start.checked_add(offset))
        .ok_or_else(|| LayoutError::InvalidTrack {
            activity: activity.description.clone(),
            field: "track_number",
        })?;
    let top = driver.track_number_to_y(track);
    let bottom = top + driver.height_of_track(activity.track_span);

    let kind = activity
        .shape
        .unwrap_or_else(|| driver.default_shape(activity.activity_type));
    let state = activity.temporal_state(ctx.today);
    let full = full_span(activity, driver)?;

    let shape = |span: Span, style: Style| {
        PlotableElement::new(kind, top, span.left, bottom, span.right, style)
    };

    let shapes = match activity.secondary_style {
        None => vec![shape(full, activity.primary_style)],
        Some(done) if !activity.is_milestone() && state == Some(TemporalState::Current) => {
            let seam = driver.date_to_x(ctx.today, XAlign::Start)?;
            let done_part = Span {
                left: full.left,
                right: seam,
            };
            // the gap inset may reach left of today on a bar ending today
            let todo_part = Span {
                left: seam,
                right: full.right.max(seam),
            };
            vec![
                shape(done_part, done),
                shape(todo_part, activity.primary_style),
            ]
        }
        Some(done) => {
            let style = if state == Some(TemporalState::Past) {
                done
            } else {
                activity.primary_style
            };
            vec![shape(full, style)]
        }
    };

    let label = label_element(activity, driver, full, top, bottom);

    debug!(
        activity = %activity.description,
        state = state.map(|s| s.as_str()).unwrap_or("unclassified"),
        shapes = shapes.len(),
        "laid out activity"
    );

    Ok(ActivityLayout {
        state,
        shapes,
        label,
    })
}

/// Extent of the unsplit shape
fn full_span(activity: &Activity, driver: &PlotDriver) -> Result<Span, LayoutError> {
    if activity.is_milestone() {
        let left = driver.milestone_left(activity.start_date)?;
        Ok(Span {
            left,
            right: left + driver.config().milestone_width,
        })
    } else {
        let (left, right, _) =
            driver.shape_parameters(activity.start_date, activity.end_date, true)?;
        Ok(Span { left, right })
    }
}

/// Text box for the description, placed according to the activity's text layout
fn label_element(
    activity: &Activity,
    driver: &PlotDriver,
    full: Span,
    top: Length,
    bottom: Length,
) -> PlotableElement {
    let config = driver.config();
    let align = resolve_text_alignment(activity.text_layout);
    let mut margin_left = config.text_margin;
    let mut margin_right = config.text_margin;

    let (left, right) = if activity.is_milestone() {
        let centre = full.left + config.milestone_width / 2;
        let box_width = full.width().max(config.milestone_text_width);
        let clearance = config.milestone_width / 2 + config.text_margin;
        match activity.text_layout {
            TextLayout::Left => {
                margin_right = clearance;
                (centre - box_width, centre)
            }
            TextLayout::Right => {
                margin_left = clearance;
                (centre, centre + box_width)
            }
            TextLayout::Shape => (full.left, full.right),
        }
    } else {
        let box_width = full.width().max(config.activity_text_width);
        match activity.text_layout {
            TextLayout::Left => (full.right - box_width, full.right),
            TextLayout::Right => (full.left, full.left + box_width),
            TextLayout::Shape => (full.left, full.right),
        }
    };

    let text_style = activity
        .primary_style
        .text
        .with_alignment(align)
        .with_margins(margin_left, margin_right);

    PlotableElement::new(
        ShapeKind::Rectangle,
        top,
        left,
        bottom,
        right,
        Style::transparent(text_style),
    )
    .with_text(activity.description.clone(), text_style)
}
