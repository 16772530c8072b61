use super::*;
use crate::config::ConfigError;
use crate::item::GalleryError;
use crate::ordering::KeyError;
use crate::store::StoreError;

fn parse(json: &str) -> serde_json::Value {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_structured_error_json_format() {
    let se = StructuredError::new(
        "default",
        "/tmp/photo-gallery.log",
        "ITEM_NOT_FOUND",
        "Item not found: default/a0".to_string(),
    );
    let parsed = parse(&se.to_json());
    assert_eq!(parsed["gallery"], "default");
    assert_eq!(parsed["logs"], "/tmp/photo-gallery.log");
    assert_eq!(parsed["messages"][0]["code"], "ITEM_NOT_FOUND");
    assert_eq!(parsed["messages"][0]["message"], "Item not found: default/a0");
    assert!(parsed["messages"][0].get("tip").is_none());
}

#[test]
fn test_structured_error_with_tip() {
    let se = StructuredError::new("g", "", "CONFIG_INVALID", "bad".to_string())
        .with_tip("Fix the config");
    let parsed = parse(&se.to_json());
    assert_eq!(parsed["messages"][0]["tip"], "Fix the config");
}

#[test]
fn test_gallery_error_codes() {
    let cases = [
        (
            GalleryError::from(KeyError::Inverted {
                lower: "m".to_string(),
                upper: "a".to_string(),
            }),
            "INVALID_RANGE",
        ),
        (GalleryError::validation("no updates provided"), "VALIDATION_ERROR"),
        (GalleryError::not_found("g", "a0"), "ITEM_NOT_FOUND"),
        (GalleryError::storage("move failed"), "STORAGE_ERROR"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code_and_tip().0, code);
    }
}

#[test]
fn test_not_found_has_tip() {
    let err = GalleryError::not_found("g", "a0");
    let (_, tip) = err.error_code_and_tip();
    assert!(tip.is_some_and(|t| t.contains("list")));
}

#[test]
fn test_to_error_json_includes_cause_chain() {
    let err = GalleryError::from_store(
        "move failed for item a0",
        StoreError::TransactionCanceled(Box::new(StoreError::Backend("conflict".to_string()))),
    );
    let parsed = parse(&to_error_json("g", "/tmp/log", &err));
    let messages = parsed["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["code"], "STORAGE_ERROR");
    assert!(messages[1]["message"].as_str().unwrap().contains("conflict"));
}

#[test]
fn test_config_and_store_codes() {
    let err = ConfigError::Invalid("x".to_string());
    assert_eq!(err.error_code_and_tip().0, "CONFIG_INVALID");
    let err = StoreError::Backend("x".to_string());
    assert_eq!(err.error_code_and_tip().0, "STORAGE_ERROR");
}
