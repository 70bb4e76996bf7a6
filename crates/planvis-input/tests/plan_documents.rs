//! Plan Document Test Suite
//!
//! Whole documents through parsing, normalisation and layout.

use chrono::NaiveDate;
use planvis_core::{CollectingObserver, LayoutNotice, NullObserver, Rgb, ShapeKind, TextLayout};
use planvis_input::{parse_plan, FileFormat, InputError};
use pretty_assertions::assert_eq;

const PLAN: &str = r#"
swimlanes = ["Engineering", "Operations"]

[plot]
top = 3.86
left = 0.0
right = 33.87
today = "2021-06-29"
shape_gap = 0.0

[formats.Blue]
fill_rgb = [0, 112, 192]
line_rgb = [0, 0, 0]
font_size = 10
font_colour_rgb = [255, 255, 255]

[formats.Done]
fill_rgb = [191, 191, 191]
line_rgb = [0, 0, 0]
font_size = 10
font_colour_rgb = [0, 0, 0]

[formats.today_line]
fill_rgb = [255, 0, 0]
line_rgb = [255, 0, 0]
font_size = 8
font_colour_rgb = [0, 0, 0]

[[activities]]
task_name = "Build"
start = "2021-01-15"
finish = "2021-07-27"
swimlane = "Engineering"
track = 1
tracks_to_cover = 1
text_layout = "Shape"
format = "Blue"
done_format = "Done"

[[activities]]
task_name = "Go live"
visual_text = "Launch"
start = "2021-07-01"
finish = "2021-07-01"
duration = 0
swimlane = "Operations"
format = "Blue"

[[activities]]
task_name = "Internal checkpoint"
start = "2021-03-01"
finish = "2021-03-01"
visual_flag = false
"#;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn document_resolves_to_activities() {
    let mut observer = CollectingObserver::new();
    let plan = parse_plan(PLAN, FileFormat::Toml, &mut observer).unwrap();

    assert_eq!(plan.swimlanes, vec!["Engineering", "Operations"]);
    assert_eq!(plan.config.right, 12_193_200);
    assert_eq!(plan.config.today, Some(date(2021, 6, 29)));
    assert_eq!(plan.activities.len(), 2);

    let build = &plan.activities[0];
    assert!(build.split_enabled());
    assert_eq!(build.primary_style.fill, Some(Rgb(0, 112, 192)));

    let launch = &plan.activities[1];
    assert_eq!(launch.id, 1);
    assert_eq!(launch.description, "Launch");
    assert!(launch.is_milestone());
    assert_eq!(launch.text_layout, TextLayout::Left);

    assert!(observer.notices.contains(&LayoutNotice::RowSkipped {
        row: 2,
        description: "Internal checkpoint".into()
    }));
}

#[test]
fn document_lays_out_with_reference_numbers() {
    let mut observer = CollectingObserver::new();
    let plan = parse_plan(PLAN, FileFormat::Toml, &mut observer).unwrap();
    let visualiser = plan.into_visualiser(&mut observer).unwrap();

    let range = visualiser.date_range().unwrap();
    assert_eq!((range.min_start, range.max_end), (date(2021, 1, 1), date(2021, 7, 31)));
    assert_eq!(range.num_days, 212);

    let elements = visualiser.activity_elements().unwrap();
    // split bar + label, milestone + label
    assert_eq!(elements.len(), 5);
    assert_eq!((elements[0].left, elements[0].width()), (805_211, 9_489_991));
    assert_eq!((elements[1].left, elements[1].width()), (10_295_202, 1_667_938));
    assert_eq!(elements[3].kind, ShapeKind::Diamond);

    let today = visualiser.today_marker().unwrap().unwrap();
    assert_eq!(today.style.line, Some(Rgb(255, 0, 0)));

    // today_line configured, four slide styles fall back
    let fallbacks = observer
        .notices
        .iter()
        .filter(|n| matches!(n, LayoutNotice::StyleFallback { .. }))
        .count();
    assert_eq!(fallbacks, 4);
}

#[test]
fn empty_document_has_nothing_to_plot() {
    let plan = parse_plan("", FileFormat::Toml, &mut NullObserver).unwrap();
    assert!(plan.activities.is_empty());
    assert_eq!(plan.styles.len(), 1);

    let result = plan.into_visualiser(&mut NullObserver);
    assert!(matches!(
        result,
        Err(InputError::Layout(planvis_core::LayoutError::EmptyPlan))
    ));
}

#[test]
fn malformed_documents_are_rejected() {
    assert!(matches!(
        parse_plan("[plot\n", FileFormat::Toml, &mut NullObserver),
        Err(InputError::Toml(_))
    ));
    assert!(matches!(
        parse_plan(
            r#"[[activities]]
task_name = "A"
start = "2021-13-01"
finish = "2021-01-02"
"#,
            FileFormat::Toml,
            &mut NullObserver
        ),
        Err(InputError::Toml(_))
    ));
    assert!(matches!(
        parse_plan("{", FileFormat::Json, &mut NullObserver),
        Err(InputError::Json(_))
    ));
}
