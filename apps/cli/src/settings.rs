//! Settings for the `quickgo` binary
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file passed with `--config`, then `QUICKGO_` environment variables
//! (`QUICKGO_FIELD_SET=ontology`, `QUICKGO_LOGGING__LEVEL=debug`).

use quickgo_search::solr::DEFAULT_REQUEST_HANDLER;
use quickgo_search::SearchableFields;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_SETTINGS: &str = r#"
field_set = "annotation"
request_handler = "/search"

[logging]
level = "warn"
json = false
"#;

const ENV_PREFIX: &str = "QUICKGO";

/// Predefined searchable field sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSet {
    Ontology,
    #[default]
    Annotation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub field_set: FieldSet,
    /// Explicit searchable fields. Takes precedence over `field_set`.
    #[serde(default)]
    pub searchable_fields: Vec<String>,
    #[serde(default)]
    pub default_field: Option<String>,
    #[serde(default = "default_request_handler")]
    pub request_handler: String,
    /// Fields whose OR queries render as a single field group.
    #[serde(default)]
    pub grouped_fields: Vec<String>,
    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_request_handler() -> String {
    DEFAULT_REQUEST_HANDLER.to_string()
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_SETTINGS,
            config::FileFormat::Toml,
        ));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("searchable_fields")
                    .with_list_parse_key("grouped_fields")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Defaults overlaid with `toml`, without reading files or the environment.
    pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_SETTINGS,
                config::FileFormat::Toml,
            ))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.request_handler.trim().is_empty() {
            return Err("request_handler cannot be empty".to_string());
        }
        if self.searchable().is_empty() {
            return Err("at least one searchable field is required".to_string());
        }
        if let Some(field) = &self.default_field {
            if field.trim().is_empty() {
                return Err("default_field cannot be blank when set".to_string());
            }
        }
        Ok(())
    }

    pub fn searchable(&self) -> SearchableFields {
        if !self.searchable_fields.is_empty() {
            return self.searchable_fields.iter().map(String::as_str).collect();
        }
        match self.field_set {
            FieldSet::Ontology => SearchableFields::ontology(),
            FieldSet::Annotation => SearchableFields::annotation(),
        }
    }
}
