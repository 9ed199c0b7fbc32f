use super::*;

#[test]
fn all_option_clears_filter() {
    assert_eq!(select_filter("all"), None);
    assert_eq!(select_filter(""), None);
}

#[test]
fn concrete_option_sets_filter() {
    assert_eq!(select_filter("growing").as_deref(), Some("growing"));
    assert_eq!(select_filter(" 4 ").as_deref(), Some("4"));
}
