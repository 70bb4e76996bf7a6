//! Plan Visualiser
//!
//! Orchestrates a full plot: finalises the date range, allocates swimlanes, then
//! produces every element in draw order and optionally feeds them to a backend.
//!
//! Construction performs the two steps every coordinate conversion depends on, so a
//! `PlanVisualiser` value can never be asked for positions it cannot compute.

use chrono::NaiveDate;
use tracing::{debug, info};

use planvis_core::calendar::{iterate_months, last_day_of_month, month_abbreviation, months_between};
use planvis_core::{
    Activity, HorizontalAlign, LayoutError, LayoutNotice, LayoutObserver, PlotableElement,
    RenderBackend, Rgb, ShapeKind, Style, VerticalAlign,
};

use crate::activity::{layout_activity, LayoutContext};
use crate::driver::{DateRange, PlotConfig, PlotDriver, XAlign};
use crate::swimlane::SwimlaneTable;
use crate::VisualiseError;

// ============================================================================
// Slide-level styles
// ============================================================================

/// Styles for elements that do not belong to any activity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanStyles {
    pub swimlane_odd: Style,
    pub swimlane_even: Style,
    pub month_odd: Style,
    pub month_even: Style,
    pub today_line: Style,
}

impl PlanStyles {
    pub const SWIMLANE_ODD: &'static str = "swimlane_format_odd";
    pub const SWIMLANE_EVEN: &'static str = "swimlane_format_even";
    pub const MONTH_ODD: &'static str = "month_shape_format_odd";
    pub const MONTH_EVEN: &'static str = "month_shape_format_even";
    pub const TODAY_LINE: &'static str = "today_line";

    /// Look every slide-level style up by name.
    ///
    /// Names the lookup does not know resolve to `fallback`, with a notice.
    pub fn resolve<F>(lookup: F, fallback: Style, observer: &mut dyn LayoutObserver) -> Self
    where
        F: Fn(&str) -> Option<Style>,
    {
        let mut get = |name: &str| {
            lookup(name).unwrap_or_else(|| {
                observer.notice(LayoutNotice::StyleFallback {
                    requested: name.to_string(),
                });
                fallback
            })
        };
        Self {
            swimlane_odd: get(Self::SWIMLANE_ODD),
            swimlane_even: get(Self::SWIMLANE_EVEN),
            month_odd: get(Self::MONTH_ODD),
            month_even: get(Self::MONTH_EVEN),
            today_line: get(Self::TODAY_LINE),
        }
    }
}

impl Default for PlanStyles {
    fn default() -> Self {
        Self {
            swimlane_odd: Style::new(Rgb(242, 242, 242), Rgb(242, 242, 242)),
            swimlane_even: Style::new(Rgb(217, 217, 217), Rgb(217, 217, 217)),
            month_odd: Style::new(Rgb(38, 38, 38), Rgb::WHITE),
            month_even: Style::new(Rgb(89, 89, 89), Rgb::WHITE),
            today_line: Style::line_only(Rgb(255, 0, 0)),
        }
    }
}

// ============================================================================
// Visualiser
// ============================================================================

/// A plan ready to be laid out
#[derive(Clone, Debug)]
pub struct PlanVisualiser {
    driver: PlotDriver,
    swimlanes: SwimlaneTable,
    activities: Vec<Activity>,
    styles: PlanStyles,
}

impl PlanVisualiser {
    /// Validate the activities, finalise the date range and allocate swimlanes
    pub fn new(
        config: PlotConfig,
        activities: Vec<Activity>,
        swimlane_order: &[String],
        styles: PlanStyles,
        observer: &mut dyn LayoutObserver,
    ) -> Result<Self, LayoutError> {
        for activity in &activities {
            activity.validate()?;
        }

        let mut driver = PlotDriver::new(config);
        let range = driver.finalize_date_range(&activities, observer)?;
        let swimlanes = SwimlaneTable::allocate(swimlane_order, &activities, observer);

        if !range.contains(driver.today()) {
            observer.notice(LayoutNotice::TodayOutsideRange {
                today: driver.today(),
            });
        }

        info!(
            activities = activities.len(),
            swimlanes = swimlanes.len(),
            tracks = swimlanes.total_tracks(),
            days = range.num_days,
            "plan prepared"
        );

        Ok(Self {
            driver,
            swimlanes,
            activities,
            styles,
        })
    }

    pub fn driver(&self) -> &PlotDriver {
        &self.driver
    }

    pub fn swimlanes(&self) -> &SwimlaneTable {
        &self.swimlanes
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn styles(&self) -> &PlanStyles {
        &self.styles
    }

    pub fn date_range(&self) -> Result<DateRange, LayoutError> {
        self.driver.date_range()
    }

    /// One background band per swimlane, alternating styles
    pub fn swimlane_backgrounds(&self) -> Vec<PlotableElement> {
        let config = self.driver.config();
        let half_gap = config.track_gap / 2;

        self.swimlanes
            .iter()
            .map(|extent| {
                let mut top = self.driver.track_number_to_y(extent.start_track);
                if extent.row > 1 {
                    top -= half_gap;
                }
                let bottom = self.driver.track_number_to_y(extent.end_track)
                    + config.track_height
                    + (config.track_gap - half_gap);

                let style = if extent.row % 2 == 0 {
                    self.styles.swimlane_even
                } else {
                    self.styles.swimlane_odd
                };
                let text_style = style
                    .text
                    .uniform_margin(config.text_margin)
                    .with_alignment(HorizontalAlign::Left)
                    .with_vertical_alignment(VerticalAlign::Top);

                PlotableElement::new(
                    ShapeKind::Rectangle,
                    top,
                    config.left,
                    bottom,
                    config.right,
                    style,
                )
                .with_text(extent.name.clone(), text_style)
            })
            .collect()
    }

    /// One labelled bar per month of the range, one track high, above the plot area
    pub fn month_bars(&self) -> Result<Vec<PlotableElement>, LayoutError> {
        let config = self.driver.config();
        let range = self.driver.date_range()?;
        let bottom = config.top;
        let top = bottom - config.track_height;

        iterate_months(range.min_start, months_between(range.min_start, range.max_end))
            .enumerate()
            .map(|(index, first)| {
                let (left, right, _) =
                    self.driver
                        .shape_parameters(first, last_day_of_month(first), false)?;
                let style = if index % 2 == 1 {
                    self.styles.month_odd
                } else {
                    self.styles.month_even
                };
                Ok(
                    PlotableElement::new(ShapeKind::Rectangle, top, left, bottom, right, style)
                        .with_text(month_abbreviation(first), style.text),
                )
            })
            .collect()
    }

    /// Shapes and labels for every activity, in input order
    pub fn activity_elements(&self) -> Result<Vec<PlotableElement>, LayoutError> {
        self.activity_elements_at(self.driver.today())
    }

    /// As [`activity_elements`](Self::activity_elements) against another reference date
    pub fn activity_elements_at(&self, today: NaiveDate) -> Result<Vec<PlotableElement>, LayoutError> {
        let ctx = LayoutContext::new(&self.driver, &self.swimlanes).with_today(today);
        let mut elements = Vec::with_capacity(self.activities.len() * 2);
        for activity in &self.activities {
            elements.extend(layout_activity(activity, &ctx)?.into_elements());
        }
        Ok(elements)
    }

    /// Vertical line at today across the plot area; `None` when today is off the plot
    pub fn today_marker(&self) -> Result<Option<PlotableElement>, LayoutError> {
        let today = self.driver.today();
        if !self.driver.date_range()?.contains(today) {
            return Ok(None);
        }
        let config = self.driver.config();
        let x = self.driver.date_to_x(today, XAlign::Start)?;
        Ok(Some(PlotableElement::new(
            ShapeKind::Line,
            config.top,
            x,
            config.bottom,
            x,
            self.styles.today_line,
        )))
    }

    /// Every element in draw order: swimlanes, months, activities, today marker
    pub fn layout(&self) -> Result<Vec<PlotableElement>, LayoutError> {
        let mut elements = self.swimlane_backgrounds();
        elements.extend(self.month_bars()?);
        elements.extend(self.activity_elements()?);
        elements.extend(self.today_marker()?);
        debug!(elements = elements.len(), "layout complete");
        Ok(elements)
    }

    /// Draw the full layout on a backend, returning one handle per element
    pub fn render<B: RenderBackend>(&self, backend: &mut B) -> Result<Vec<B::Handle>, VisualiseError> {
        let elements = self.layout()?;
        let mut handles = Vec::with_capacity(elements.len());
        for element in &elements {
            handles.push(backend.draw(element)?);
        }
        Ok(handles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planvis_core::units::cm;
    use planvis_core::{CollectingObserver, NullObserver};
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn config(today: NaiveDate) -> PlotConfig {
        PlotConfig::default()
            .plot_area(cm(3.0), 0, cm(18.0), cm(33.87))
            .tracks(cm(0.6), cm(0.2))
            .today(today)
    }

    fn plan() -> Vec<Activity> {
        let style = Style::new(Rgb(0, 112, 192), Rgb::BLACK);
        vec![
            Activity::bar(1, "Design", date(2021, 1, 15), date(2021, 3, 10), style).swimlane("Eng"),
            Activity::bar(2, "Build", date(2021, 3, 1), date(2021, 6, 30), style)
                .swimlane("Eng")
                .track(2),
            Activity::milestone(3, "Go live", date(2021, 7, 2), style).swimlane("Ops"),
        ]
    }

    #[test]
    fn swimlane_backgrounds_abut() {
        let vis = PlanVisualiser::new(
            config(date(2021, 4, 1)),
            plan(),
            &[],
            PlanStyles::default(),
            &mut NullObserver,
        )
        .unwrap();

        let bands = vis.swimlane_backgrounds();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].top, cm(3.0));
        assert_eq!(bands[0].bottom, bands[1].top);
        assert_eq!(bands[0].style, PlanStyles::default().swimlane_odd);
        assert_eq!(bands[1].style, PlanStyles::default().swimlane_even);
        assert_eq!(bands[1].text.as_deref(), Some("Ops"));
        assert_eq!((bands[0].left, bands[0].right), (0, cm(33.87)));
        let text_style = bands[0].text_style.unwrap();
        assert_eq!(text_style.horizontal_align, HorizontalAlign::Left);
        assert_eq!(text_style.vertical_align, VerticalAlign::Top);
    }

    #[test]
    fn month_bars_cover_the_range() {
        let vis = PlanVisualiser::new(
            config(date(2021, 4, 1)),
            plan(),
            &[],
            PlanStyles::default(),
            &mut NullObserver,
        )
        .unwrap();

        let months = vis.month_bars().unwrap();
        let labels: Vec<&str> = months.iter().filter_map(|m| m.text.as_deref()).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"]);
        assert_eq!(months[0].left, 0);
        assert_eq!(months[6].right, cm(33.87));
        for pair in months.windows(2) {
            assert_eq!(pair[0].right, pair[1].left);
        }
        assert_eq!(months[0].bottom, cm(3.0));
        assert_eq!(months[0].height(), cm(0.6));
        assert_eq!(months[0].style, PlanStyles::default().month_even);
        assert_eq!(months[1].style, PlanStyles::default().month_odd);
    }

    #[test]
    fn layout_draw_order() {
        let vis = PlanVisualiser::new(
            config(date(2021, 4, 1)),
            plan(),
            &[],
            PlanStyles::default(),
            &mut NullObserver,
        )
        .unwrap();

        let elements = vis.layout().unwrap();
        // 2 swimlanes + 7 months + 3 shapes + 3 labels + today
        assert_eq!(elements.len(), 2 + 7 + 6 + 1);
        let today = elements.last().unwrap();
        assert_eq!(today.kind, ShapeKind::Line);
        assert_eq!(today.width(), 0);
        assert_eq!((today.top, today.bottom), (cm(3.0), cm(18.0)));
    }

    #[test]
    fn today_outside_range_omits_marker() {
        let mut observer = CollectingObserver::new();
        let vis = PlanVisualiser::new(
            config(date(2022, 1, 1)),
            plan(),
            &[],
            PlanStyles::default(),
            &mut observer,
        )
        .unwrap();

        assert_eq!(vis.today_marker().unwrap(), None);
        assert!(observer
            .notices
            .contains(&LayoutNotice::TodayOutsideRange {
                today: date(2022, 1, 1)
            }));
    }

    #[test]
    fn track_span_past_u32_is_rejected() {
        let mut activities = plan();
        activities.push(
            Activity::bar(4, "Deep", date(2021, 5, 1), date(2021, 5, 2), Style::default())
                .track(u32::MAX)
                .span(2),
        );
        let result = PlanVisualiser::new(
            config(date(2021, 4, 1)),
            activities,
            &[],
            PlanStyles::default(),
            &mut NullObserver,
        );
        assert!(matches!(
            result,
            Err(LayoutError::InvalidTrack { field: "track_span", .. })
        ));
    }

    #[test]
    fn invalid_activity_is_rejected_up_front() {
        let mut activities = plan();
        activities.push(
            Activity::bar(4, "Broken", date(2021, 5, 1), date(2021, 4, 1), Style::default()),
        );
        let result = PlanVisualiser::new(
            config(date(2021, 4, 1)),
            activities,
            &[],
            PlanStyles::default(),
            &mut NullObserver,
        );
        assert!(matches!(result, Err(LayoutError::InvalidDateRange { .. })));
    }

    #[test]
    fn missing_styles_fall_back() {
        let red = Style::new(Rgb(255, 0, 0), Rgb::BLACK);
        let mut observer = CollectingObserver::new();
        let styles = PlanStyles::resolve(
            |name| (name == PlanStyles::TODAY_LINE).then(|| Style::line_only(Rgb(0, 0, 255))),
            red,
            &mut observer,
        );

        assert_eq!(styles.today_line, Style::line_only(Rgb(0, 0, 255)));
        assert_eq!(styles.swimlane_odd, red);
        assert_eq!(observer.warnings().count(), 4);
    }
}
