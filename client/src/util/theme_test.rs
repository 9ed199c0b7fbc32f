#![cfg(not(feature = "csr"))]

use super::*;

#[test]
fn stored_value_wins_over_system() {
    assert!(resolve_preference(Some("dark"), false));
    assert!(!resolve_preference(Some("light"), true));
}

#[test]
fn missing_or_unknown_value_follows_system() {
    assert!(resolve_preference(None, true));
    assert!(!resolve_preference(None, false));
    assert!(resolve_preference(Some("sepia"), true));
}

#[test]
fn storage_value_round_trips_through_resolve() {
    assert_eq!(storage_value(true), "dark");
    assert_eq!(storage_value(false), "light");
    assert!(resolve_preference(Some(storage_value(true)), false));
}

#[test]
fn read_preference_is_light_outside_the_browser() {
    assert!(!read_preference());
}

#[test]
fn toggle_flips_boolean_value() {
    assert!(toggle(false));
    assert!(!toggle(true));
}
