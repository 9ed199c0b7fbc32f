use super::*;
use serde_json::json;

#[test]
fn permission_list_is_trimmed_and_deduplicated() {
    assert_eq!(
        parse_permission_list(" manage farmers,view reports\nmanage farmers ,, "),
        vec!["manage farmers".to_owned(), "view reports".to_owned()]
    );
}

#[test]
fn empty_permission_list_is_empty() {
    assert!(parse_permission_list("  ,\n ").is_empty());
}

#[test]
fn profile_permissions_accept_names_and_objects() {
    let profile = json!({ "permissions": ["view reports", { "id": 3, "name": "manage users" }] });
    assert_eq!(permissions_from_profile(&profile), "view reports, manage users");
}

#[test]
fn profile_permissions_are_read_through_data_wrapper() {
    let profile = json!({ "data": { "permissions": ["export"] } });
    assert_eq!(permissions_from_profile(&profile), "export");
}

#[test]
fn profile_without_permissions_yields_empty_text() {
    assert_eq!(permissions_from_profile(&json!({ "name": "Ana" })), "");
}
