use super::Config;
use crate::error::NavError;

#[test]
fn test_defaults_from_empty_toml() {
    let cfg = facet_toml::from_str::<Config>("").unwrap();

    assert_eq!(cfg.attention_top, 10);
    assert_eq!(cfg.attention_bottom, 60);
    assert_eq!(cfg.scroll_margin().top, 3);
    assert_eq!(cfg.scroll_margin().bottom, 2);
    assert_eq!(cfg.scroll_ease, 4);
    assert!(cfg.log_file.is_empty());
    assert!(cfg.attention_window().is_ok());
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let cfg = facet_toml::from_str::<Config>("scroll_ease = 8\n").unwrap();

    assert_eq!(cfg.scroll_ease, 8);
    assert_eq!(cfg.scroll_margin_top, 3);
}

#[test]
fn test_invalid_attention_window() {
    let mut cfg = facet_toml::from_str::<Config>("").unwrap();
    cfg.attention_top = 50;
    cfg.attention_bottom = 50;

    assert!(matches!(
        cfg.attention_window(),
        Err(NavError::InvalidAttentionWindow { .. })
    ));
}
