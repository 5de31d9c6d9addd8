//! Unit tests for config module
//!
//! Tests configuration types, defaults, and serialization.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use crate::{
    PanelError,
    config::{Config, DEFAULT_TEMPLATE, LogLevel},
    services::mpris::{ControllerSettings, ProtocolVersion},
};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.player.protocol, ProtocolVersion::V1);
    assert_eq!(config.player.fallback, "clementine");
    assert!(config.player.requery_status_after_toggle);
    assert_eq!(config.display.template, DEFAULT_TEMPLATE);
    assert!(config.display.show_placeholders_on_connect);
}

#[test]
fn config_serialize_toml() {
    let toml_str = toml::to_string(&Config::default()).unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[player]"));
    assert!(toml_str.contains("[display]"));
    assert!(toml_str.contains("protocol = \"v1\""));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [player]
        protocol = "v2"
        fallback = "vlc"

        [display]
        template = "%title"
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.player.protocol, ProtocolVersion::V2);
    assert_eq!(config.player.fallback, "vlc");
    assert!(config.player.requery_status_after_toggle);
    assert_eq!(config.display.template, "%title");
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(original, deserialized);
}

#[test]
fn config_minimal_toml() {
    let config = Config::from_toml("[general]").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_empty_toml() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn unknown_protocol_is_a_parse_error() {
    let result = Config::from_toml("[player]\nprotocol = \"v3\"");
    assert!(matches!(result, Err(PanelError::TomlParseError { .. })));
}

#[test]
fn blank_fallback_is_rejected() {
    let result = Config::from_toml("[player]\nfallback = \"\"");

    match result {
        Err(PanelError::InvalidConfigField { field, component, .. }) => {
            assert_eq!(field, "fallback");
            assert_eq!(component, "player");
        }
        other => panic!("expected invalid field, got {other:?}"),
    }
}

#[test]
fn empty_template_is_rejected() {
    let result = Config::from_toml("[display]\ntemplate = \"  \"");
    assert!(matches!(result, Err(PanelError::InvalidConfigField { .. })));
}

#[test]
fn log_level_display_matches_serde_names() {
    for level in [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        let parsed: LogLevel = toml::Value::String(level.to_string()).try_into().unwrap();
        assert_eq!(parsed, level);
    }
}

#[test]
fn controller_settings_follow_config() {
    let config = Config::from_toml(
        r#"
        [player]
        protocol = "v2"
        requery_status_after_toggle = false

        [display]
        show_placeholders_on_connect = false
    "#,
    )
    .unwrap();

    let settings = ControllerSettings::from(&config);

    assert_eq!(settings.protocol, ProtocolVersion::V2);
    assert_eq!(settings.fallback, "clementine");
    assert!(settings.player.is_none());
    assert!(!settings.requery_status_after_toggle);
    assert!(!settings.show_placeholders_on_connect);
}
