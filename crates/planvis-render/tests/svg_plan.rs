//! SVG output for complete plans

use chrono::NaiveDate;
use planvis_core::{Activity, NullObserver, Rgb, Style};
use planvis_layout::{PlanStyles, PlanVisualiser, PlotConfig};
use planvis_render::SvgBackend;
use pretty_assertions::assert_eq;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn visualiser() -> PlanVisualiser {
    let todo = Style::new(Rgb(0, 112, 192), Rgb::BLACK);
    let done = Style::new(Rgb(191, 191, 191), Rgb::BLACK);
    let activities = vec![
        Activity::bar(1, "Design", date(2021, 1, 4), date(2021, 2, 26), todo)
            .swimlane("Engineering")
            .secondary_style(done),
        Activity::bar(2, "Build", date(2021, 2, 15), date(2021, 5, 28), todo)
            .swimlane("Engineering")
            .track(2)
            .secondary_style(done),
        Activity::milestone(3, "Go live", date(2021, 6, 1), todo).swimlane("Operations"),
    ];
    PlanVisualiser::new(
        PlotConfig::default().today(date(2021, 4, 1)),
        activities,
        &[],
        PlanStyles::default(),
        &mut NullObserver,
    )
    .unwrap()
}

#[test]
fn every_element_becomes_a_group() {
    let visualiser = visualiser();
    let mut backend = SvgBackend::default();
    let handles = visualiser.render(&mut backend).unwrap();

    assert_eq!(handles.len(), visualiser.layout().unwrap().len());
    assert_eq!(backend.len(), handles.len());

    let svg = backend.finish().unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<polygon").count(), 1);
    assert_eq!(svg.matches("<line").count(), 1);
    for label in ["Engineering", "Operations", "Jan", "Jun", "Design", "Build", "Go live"] {
        assert!(svg.contains(label), "missing {}", label);
    }
}

#[test]
fn split_bar_colours_are_both_present() {
    let visualiser = visualiser();
    let mut backend = SvgBackend::default();
    visualiser.render(&mut backend).unwrap();
    let svg = backend.finish().unwrap();

    assert!(svg.contains(r##"fill="#0070c0""##));
    assert!(svg.contains(r##"fill="#bfbfbf""##));
}

#[test]
fn one_day_bar_in_a_five_year_plan_renders() {
    let style = Style::new(Rgb(0, 112, 192), Rgb::BLACK);
    let activities = vec![
        Activity::bar(1, "Programme", date(2020, 1, 1), date(2024, 12, 31), style),
        Activity::bar(2, "Cutover", date(2022, 6, 1), date(2022, 6, 1), style).track(2),
    ];
    let visualiser = PlanVisualiser::new(
        PlotConfig::default().today(date(2022, 6, 1)),
        activities,
        &[],
        PlanStyles::default(),
        &mut NullObserver,
    )
    .unwrap();

    let mut backend = SvgBackend::default();
    let handles = visualiser.render(&mut backend).unwrap();
    assert_eq!(handles.len(), visualiser.layout().unwrap().len());
    assert!(backend.finish().unwrap().contains("Cutover"));
}
