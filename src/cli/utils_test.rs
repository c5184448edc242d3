use crate::cli::utils::*;
use crate::db::{Planned, SetUnit, Weight, WeightUnit};

fn planned(sets: Vec<f64>, unit: SetUnit) -> Planned {
    Planned {
        sets,
        unit,
        weight: None,
        equipment: None,
        is_unilateral: None,
    }
}

#[test]
fn test_truncate_with_ellipsis_short_string() {
    let result = truncate_with_ellipsis("hello", 10);
    assert_eq!(result, "hello");
}

#[test]
fn test_truncate_with_ellipsis_long_string() {
    let result = truncate_with_ellipsis("hello world this is a long string", 10);
    assert_eq!(result, "hello w...");
}

#[test]
fn test_truncate_with_ellipsis_unicode() {
    let result = truncate_with_ellipsis("Überkopfdrücken", 8);
    assert_eq!(result, "Überk...");
}

#[test]
fn test_format_number_drops_whole_fraction() {
    assert_eq!(format_number(135.0), "135");
    assert_eq!(format_number(22.5), "22.5");
}

#[test]
fn test_format_sets() {
    let p = planned(vec![5.0, 5.0, 3.0], SetUnit::Reps);
    assert_eq!(format_sets(&p), "5/5/3 reps");

    let mut p = planned(vec![30.0, 30.0], SetUnit::Seconds);
    p.is_unilateral = Some(true);
    assert_eq!(format_sets(&p), "30/30 seconds (each side)");

    assert_eq!(format_sets(&planned(vec![], SetUnit::Reps)), "-");
}

#[test]
fn test_format_weight() {
    let mut p = planned(vec![5.0], SetUnit::Reps);
    assert_eq!(format_weight(&p), "-");

    p.weight = Some(Weight {
        amount: 135.0,
        unit: WeightUnit::Lb,
    });
    assert_eq!(format_weight(&p), "135 lb");

    p.weight = Some(Weight::bodyweight());
    assert_eq!(format_weight(&p), "bodyweight");

    p.weight = Some(Weight {
        amount: 10.0,
        unit: WeightUnit::Bodyweight,
    });
    assert_eq!(format_weight(&p), "10 bodyweight");
}

#[test]
fn test_apply_table_style() {
    use tabled::builder::Builder;

    let mut builder = Builder::default();
    builder.push_record(["Name", "Value"]);
    builder.push_record(["Squat", "5/5/5 reps"]);

    let mut table = builder.build();
    apply_table_style(&mut table);

    let output = table.to_string();
    // Rounded style uses ╭─╮│╰─╯ characters
    assert!(output.contains("╭"), "Table should use rounded style");
}
