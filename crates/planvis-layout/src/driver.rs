//! Coordinate Driver
//!
//! Translates plan data into plot coordinates: dates to horizontal positions, track
//! numbers to vertical positions, track counts to heights.
//!
//! # Horizontal mapping
//!
//! A day occupies a finite width, so a date maps to one of three positions:
//!
//! - `Start`: left edge of the day (`days_before / num_days * width`)
//! - `End`: left edge of the following day, so a bar ending on a date covers it
//! - `Middle`: `Start` plus half a day, used to centre milestones
//!
//! Every conversion is rounded to the nearest whole unit before it is returned.
//!
//! # Date range
//!
//! The plotted range may be left open in configuration and derived from the plan.
//! Either way it is snapped to whole months by [`PlotDriver::finalize_date_range`]
//! and no date conversion is possible before that has happened.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use planvis_core::calendar::{days_in_range, first_day_of_month, last_day_of_month};
use planvis_core::units::{cm, Length};
use planvis_core::{Activity, ActivityType, LayoutError, LayoutNotice, LayoutObserver, ShapeKind};

/// Right-edge inset separating adjacent shapes
pub const DEFAULT_SHAPE_GAP: Length = 15_000;

/// Plot area and track geometry, in native units
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub top: Length,
    pub left: Length,
    pub bottom: Length,
    pub right: Length,
    pub track_height: Length,
    pub track_gap: Length,
    /// Start of the plotted range; derived from the plan when absent
    pub min_start_date: Option<NaiveDate>,
    /// End of the plotted range; derived from the plan when absent
    pub max_end_date: Option<NaiveDate>,
    /// Reference date for past/future; the local date when absent
    pub today: Option<NaiveDate>,
    pub milestone_width: Length,
    /// Minimum width of an activity label box
    pub activity_text_width: Length,
    /// Minimum width of a milestone label box
    pub milestone_text_width: Length,
    pub text_margin: Length,
    pub activity_shape: ShapeKind,
    pub milestone_shape: ShapeKind,
    /// Inset applied to the right edge of standalone shapes
    pub shape_gap: Length,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            top: cm(3.0),
            left: cm(1.0),
            bottom: cm(18.0),
            right: cm(32.87),
            track_height: cm(0.6),
            track_gap: cm(0.2),
            min_start_date: None,
            max_end_date: None,
            today: None,
            milestone_width: cm(0.4),
            activity_text_width: cm(5.0),
            milestone_text_width: cm(5.0),
            text_margin: cm(0.1),
            activity_shape: ShapeKind::Rectangle,
            milestone_shape: ShapeKind::Diamond,
            shape_gap: DEFAULT_SHAPE_GAP,
        }
    }
}

impl PlotConfig {
    /// Set the plot rectangle
    pub fn plot_area(mut self, top: Length, left: Length, bottom: Length, right: Length) -> Self {
        self.top = top;
        self.left = left;
        self.bottom = bottom;
        self.right = right;
        self
    }

    /// Set track height and the gap between tracks
    pub fn tracks(mut self, height: Length, gap: Length) -> Self {
        self.track_height = height;
        self.track_gap = gap;
        self
    }

    /// Fix the plotted range instead of deriving it from the plan
    pub fn date_range(mut self, min_start: NaiveDate, max_end: NaiveDate) -> Self {
        self.min_start_date = Some(min_start);
        self.max_end_date = Some(max_end);
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn milestone_width(mut self, width: Length) -> Self {
        self.milestone_width = width;
        self
    }

    pub fn shape_gap(mut self, gap: Length) -> Self {
        self.shape_gap = gap;
        self
    }

    pub fn text_widths(mut self, activity: Length, milestone: Length) -> Self {
        self.activity_text_width = activity;
        self.milestone_text_width = milestone;
        self
    }

    pub fn text_margin(mut self, margin: Length) -> Self {
        self.text_margin = margin;
        self
    }
}

/// Which point of a day a date maps to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XAlign {
    Start,
    End,
    Middle,
}

/// A finalised plotted range, aligned to whole months
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub min_start: NaiveDate,
    pub max_end: NaiveDate,
    /// Inclusive day count of the range
    pub num_days: i64,
}

impl DateRange {
    /// Snap `[min_start, max_end]` outwards to month boundaries
    pub fn aligned(min_start: NaiveDate, max_end: NaiveDate) -> Result<Self, LayoutError> {
        if max_end < min_start {
            return Err(LayoutError::InvalidPlotRange(format!(
                "{} is before {}",
                max_end, min_start
            )));
        }
        let min_start = first_day_of_month(min_start);
        let max_end = last_day_of_month(max_end);
        Ok(Self {
            min_start,
            max_end,
            num_days: days_in_range(min_start, max_end),
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min_start <= date && date <= self.max_end
    }
}

/// Converts dates and tracks into plot coordinates
#[derive(Clone, Debug)]
pub struct PlotDriver {
    config: PlotConfig,
    today: NaiveDate,
    range: Option<DateRange>,
}

impl PlotDriver {
    /// Create a driver whose date range is not yet finalised
    pub fn new(config: PlotConfig) -> Self {
        let today = config.today.unwrap_or_else(|| Local::now().date_naive());
        Self {
            config,
            today,
            range: None,
        }
    }

    /// Create a driver and finalise its range from the configured dates alone
    pub fn with_configured_range(config: PlotConfig) -> Result<Self, LayoutError> {
        let mut driver = Self::new(config);
        driver.finalize_date_range(&[], &mut planvis_core::NullObserver)?;
        Ok(driver)
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Fill in any unset end of the range from the plan's extremes, then snap both
    /// ends to whole months and recompute the day count.
    pub fn finalize_date_range(
        &mut self,
        activities: &[Activity],
        observer: &mut dyn LayoutObserver,
    ) -> Result<DateRange, LayoutError> {
        let derived_min = activities.iter().map(|a| a.start_date).min();
        let derived_max = activities.iter().map(|a| a.end_date).max();

        let min_start = self
            .config
            .min_start_date
            .or(derived_min)
            .ok_or(LayoutError::EmptyPlan)?;
        let max_end = self
            .config
            .max_end_date
            .or(derived_max)
            .ok_or(LayoutError::EmptyPlan)?;

        if self.config.min_start_date.is_none() || self.config.max_end_date.is_none() {
            observer.notice(LayoutNotice::DateRangeDerived { min_start, max_end });
        }

        let range = DateRange::aligned(min_start, max_end)?;
        observer.notice(LayoutNotice::DateRangeAligned {
            min_start: range.min_start,
            max_end: range.max_end,
            num_days: range.num_days,
        });
        self.range = Some(range);
        Ok(range)
    }

    /// The finalised range
    pub fn date_range(&self) -> Result<DateRange, LayoutError> {
        self.range.ok_or(LayoutError::DateRangeUnset)
    }

    pub fn plot_area_width(&self) -> Length {
        self.config.right - self.config.left
    }

    /// Default shape for an activity type
    pub fn default_shape(&self, activity_type: ActivityType) -> ShapeKind {
        match activity_type {
            ActivityType::Bar => self.config.activity_shape,
            ActivityType::Milestone => self.config.milestone_shape,
        }
    }

    /// Unrounded width of one day
    pub fn width_of_one_day(&self) -> Result<f64, LayoutError> {
        let range = self.date_range()?;
        Ok(self.plot_area_width() as f64 / range.num_days as f64)
    }

    fn exact_x(&self, date: NaiveDate, align: XAlign) -> Result<f64, LayoutError> {
        let range = self.date_range()?;
        let days_before =
            i64::from(date.num_days_from_ce()) - i64::from(range.min_start.num_days_from_ce());
        let (num_days, additional) = match align {
            XAlign::Start => (days_before, 0.0),
            XAlign::End => (days_before + 1, 0.0),
            XAlign::Middle => (days_before, self.width_of_one_day()? / 2.0),
        };
        let main = num_days as f64 / range.num_days as f64 * self.plot_area_width() as f64;
        Ok(self.config.left as f64 + main + additional)
    }

    /// Horizontal position of `date`
    pub fn date_to_x(&self, date: NaiveDate, align: XAlign) -> Result<Length, LayoutError> {
        Ok(self.exact_x(date, align)?.round() as Length)
    }

    /// Top of a 1-based track
    pub fn track_number_to_y(&self, track_number: u32) -> Length {
        let pitch = self.config.track_height + self.config.track_gap;
        self.config.top + (i64::from(track_number) - 1) * pitch
    }

    /// Height covered by `num_tracks` contiguous tracks, including the gaps between them
    pub fn height_of_track(&self, num_tracks: u32) -> Length {
        let n = i64::from(num_tracks);
        n * self.config.track_height + (n - 1).max(0) * self.config.track_gap
    }

    /// `(left, right, width)` of a shape covering `[start, end]`.
    ///
    /// With `gap` the right edge is pulled in by the configured shape gap so adjacent
    /// shapes stay visibly apart; without it edges abut exactly. The inset never takes
    /// more than half of the shape, so the width is never negative.
    pub fn shape_parameters(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        gap: bool,
    ) -> Result<(Length, Length, Length), LayoutError> {
        let left = self.date_to_x(start, XAlign::Start)?;
        let full_right = self.date_to_x(end, XAlign::End)?;
        let inset = if gap {
            self.config.shape_gap.min((full_right - left) / 2).max(0)
        } else {
            0
        };
        let right = full_right - inset;
        Ok((left, right, right - left))
    }

    /// Left edge of a milestone marker centred on `date`
    pub fn milestone_left(&self, date: NaiveDate) -> Result<Length, LayoutError> {
        Ok(self.date_to_x(date, XAlign::Middle)? - self.config.milestone_width / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planvis_core::{CollectingObserver, Style};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// 20cm wide plot over January 2021
    fn january_driver() -> PlotDriver {
        let config = PlotConfig::default()
            .plot_area(0, 0, cm(10.0), cm(20.0))
            .tracks(cm(1.0), cm(0.5))
            .date_range(date(2021, 1, 1), date(2021, 1, 31))
            .today(date(2021, 1, 15));
        PlotDriver::with_configured_range(config).unwrap()
    }

    #[test]
    fn date_to_x_start_of_day() {
        let driver = january_driver();
        assert_eq!(driver.date_to_x(date(2021, 1, 1), XAlign::Start).unwrap(), 0);
        assert_eq!(
            driver.date_to_x(date(2021, 1, 31), XAlign::Start).unwrap(),
            6_967_742
        );
    }

    #[test]
    fn date_to_x_end_covers_last_day() {
        let driver = january_driver();
        assert_eq!(
            driver.date_to_x(date(2021, 1, 31), XAlign::End).unwrap(),
            7_200_000
        );
        assert_eq!(
            driver.date_to_x(date(2021, 1, 10), XAlign::End).unwrap(),
            driver.date_to_x(date(2021, 1, 11), XAlign::Start).unwrap()
        );
    }

    #[test]
    fn date_to_x_middle_is_half_a_day_in() {
        let driver = january_driver();
        // 7 200 000 / 31 / 2 = 116 129.03
        assert_eq!(
            driver.date_to_x(date(2021, 1, 1), XAlign::Middle).unwrap(),
            116_129
        );
    }

    #[test]
    fn conversion_before_finalising_is_an_error() {
        let driver = PlotDriver::new(PlotConfig::default().today(date(2021, 1, 1)));
        assert_eq!(
            driver.date_to_x(date(2021, 1, 1), XAlign::Start),
            Err(LayoutError::DateRangeUnset)
        );
        assert_eq!(driver.width_of_one_day(), Err(LayoutError::DateRangeUnset));
    }

    #[test]
    fn track_geometry() {
        let driver = january_driver();
        assert_eq!(driver.track_number_to_y(1), 0);
        assert_eq!(driver.track_number_to_y(3), 2 * cm(1.5));
        assert_eq!(driver.height_of_track(1), cm(1.0));
        assert_eq!(driver.height_of_track(3), cm(3.0) + cm(1.0));
    }

    #[test]
    fn shape_parameters_with_and_without_gap() {
        let driver = january_driver();
        let (left, right, width) = driver
            .shape_parameters(date(2021, 1, 1), date(2021, 1, 31), false)
            .unwrap();
        assert_eq!((left, right, width), (0, 7_200_000, 7_200_000));

        let (_, gapped_right, gapped_width) = driver
            .shape_parameters(date(2021, 1, 1), date(2021, 1, 31), true)
            .unwrap();
        assert_eq!(gapped_right, 7_200_000 - DEFAULT_SHAPE_GAP);
        assert_eq!(gapped_width, 7_200_000 - DEFAULT_SHAPE_GAP);
    }

    #[test]
    fn gap_never_exceeds_half_a_short_shape() {
        // five years on the default plot: one day is narrower than the gap
        let config = PlotConfig::default()
            .date_range(date(2020, 1, 1), date(2024, 12, 31))
            .today(date(2022, 1, 1));
        let driver = PlotDriver::with_configured_range(config).unwrap();
        assert!(driver.width_of_one_day().unwrap() < DEFAULT_SHAPE_GAP as f64);

        let day = date(2022, 6, 1);
        let (_, _, full_width) = driver.shape_parameters(day, day, false).unwrap();
        let (left, right, width) = driver.shape_parameters(day, day, true).unwrap();
        assert!(width > 0);
        assert_eq!(right - left, width);
        assert_eq!(width, full_width - full_width / 2);

        // long shapes still get the whole gap
        let (_, _, long_width) = driver
            .shape_parameters(date(2020, 1, 1), date(2024, 12, 31), true)
            .unwrap();
        assert_eq!(long_width, cm(32.87) - cm(1.0) - DEFAULT_SHAPE_GAP);
    }

    #[test]
    fn milestone_left_offsets_by_half_width() {
        let config = PlotConfig::default()
            .plot_area(0, 0, cm(10.0), cm(20.0))
            .date_range(date(2021, 1, 1), date(2021, 1, 31))
            .milestone_width(cm(0.5))
            .today(date(2021, 1, 1));
        let driver = PlotDriver::with_configured_range(config).unwrap();
        assert_eq!(driver.milestone_left(date(2021, 1, 1)).unwrap(), 26_129);
    }

    #[test]
    fn range_derived_from_plan_and_snapped_to_months() {
        let style = Style::default();
        let activities = vec![
            Activity::bar(1, "A", date(2021, 1, 15), date(2021, 3, 2), style),
            Activity::milestone(2, "M", date(2021, 7, 2), style),
        ];
        let mut driver = PlotDriver::new(PlotConfig::default().today(date(2021, 2, 1)));
        let mut observer = CollectingObserver::new();

        let range = driver.finalize_date_range(&activities, &mut observer).unwrap();

        assert_eq!(range.min_start, date(2021, 1, 1));
        assert_eq!(range.max_end, date(2021, 7, 31));
        assert_eq!(range.num_days, 212);
        assert_eq!(driver.date_range().unwrap(), range);
        assert!(matches!(
            observer.notices[0],
            LayoutNotice::DateRangeDerived { min_start, max_end }
                if min_start == date(2021, 1, 15) && max_end == date(2021, 7, 2)
        ));
    }

    #[test]
    fn configured_range_is_still_snapped() {
        let config = PlotConfig::default()
            .date_range(date(2021, 2, 10), date(2021, 2, 20))
            .today(date(2021, 2, 1));
        let driver = PlotDriver::with_configured_range(config).unwrap();
        let range = driver.date_range().unwrap();
        assert_eq!(range.min_start, date(2021, 2, 1));
        assert_eq!(range.max_end, date(2021, 2, 28));
        assert_eq!(range.num_days, 28);
    }

    #[test]
    fn empty_plan_without_configured_range_fails() {
        let mut driver = PlotDriver::new(PlotConfig::default().today(date(2021, 2, 1)));
        assert_eq!(
            driver.finalize_date_range(&[], &mut planvis_core::NullObserver),
            Err(LayoutError::EmptyPlan)
        );
    }

    #[test]
    fn inverted_configured_range_fails() {
        let config = PlotConfig::default().date_range(date(2021, 5, 1), date(2021, 1, 1));
        assert!(matches!(
            PlotDriver::with_configured_range(config),
            Err(LayoutError::InvalidPlotRange(_))
        ));
    }
}
