use super::*;
use serde_json::json;

fn record(value: serde_json::Value) -> Record {
    serde_json::from_value(value).unwrap()
}

#[test]
fn cell_text_renders_scalars_and_dashes_the_rest() {
    let row = record(json!({ "id": 1, "name": "Ana", "hectares": 2.5, "active": true, "tags": ["x"] }));
    assert_eq!(cell_text(&row, "name"), "Ana");
    assert_eq!(cell_text(&row, "hectares"), "2.5");
    assert_eq!(cell_text(&row, "active"), "true");
    assert_eq!(cell_text(&row, "tags"), "-");
    assert_eq!(cell_text(&row, "missing"), "-");
}

#[test]
fn clicking_active_column_flips_direction() {
    let current = Sort::default();
    let next = next_sort(&current, "created_at");
    assert_eq!(next.by, "created_at");
    assert_eq!(next.direction, SortDirection::Asc);
    assert_eq!(next_sort(&next, "created_at").direction, SortDirection::Desc);
}

#[test]
fn clicking_other_column_starts_ascending() {
    let current = Sort { by: "name".to_owned(), direction: SortDirection::Desc };
    let next = next_sort(&current, "email");
    assert_eq!(next, Sort { by: "email".to_owned(), direction: SortDirection::Asc });
}

#[test]
fn sort_indicator_marks_only_active_column() {
    let current = Sort { by: "name".to_owned(), direction: SortDirection::Asc };
    assert_eq!(sort_indicator(&current, "name"), "▲");
    assert_eq!(sort_indicator(&current, "email"), "");
    let flipped = Sort { direction: SortDirection::Desc, ..current };
    assert_eq!(sort_indicator(&flipped, "name"), "▼");
}

#[test]
fn status_line_counts_records() {
    assert_eq!(status_line(0, false), "No records found.");
    assert_eq!(status_line(1, false), "1 record");
    assert_eq!(status_line(3, false), "3 records");
    assert_eq!(status_line(20, true), "20 loaded, more available");
}

#[test]
fn column_constructors_set_sortable_flag() {
    assert!(!Column::new("name", "Name").sortable);
    assert!(Column::sortable("name", "Name").sortable);
}
