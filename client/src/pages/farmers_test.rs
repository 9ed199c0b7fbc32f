use super::*;
use serde_json::json;

#[test]
fn payload_keeps_only_filled_fields() {
    let form = FarmerForm {
        name: " Rosa ".to_owned(),
        phone: "555-0101".to_owned(),
        association: String::new(),
        address: "  ".to_owned(),
    };
    assert_eq!(farmer_payload(&form).unwrap(), json!({ "name": "Rosa", "phone": "555-0101" }));
}

#[test]
fn payload_requires_name() {
    assert_eq!(farmer_payload(&FarmerForm::default()), Err("Farmer name is required."));
}
