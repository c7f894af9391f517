use crate::errors::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Repository-scope field: base URL of the MLflow tracking server
pub const MLFLOW_URL: &str = "MLFLOW_URL";
/// Package-scope field: experiment whose runs back this package
pub const EXPERIMENT_ID: &str = "EXPERIMENT_ID";
/// Package-scope field: tag key marking a run as promoted
pub const PROMOTION_TAG_NAME: &str = "PROMOTION_TAG_NAME";
/// Package-scope field: tag value marking a run as promoted
pub const PROMOTION_TAG_VALUE: &str = "PROMOTION_TAG_VALUE";

/// Scope keys under which the host nests configuration in request bodies
pub const REPOSITORY_CONFIGURATION: &str = "repository-configuration";
pub const PACKAGE_CONFIGURATION: &str = "package-configuration";

/// Metadata describing one configurable field, as the host renders it.
///
/// Serialized with the host's kebab-case keys; a missing default is
/// serialized as an explicit `null`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ConfigField {
    #[serde(rename = "display-name")]
    pub display_name: &'static str,
    #[serde(rename = "default-value")]
    pub default_value: Option<&'static str>,
    #[serde(rename = "part-of-identity")]
    pub part_of_identity: bool,
    pub required: bool,
    pub secure: bool,
    #[serde(rename = "display-order")]
    pub display_order: &'static str,
}

impl ConfigField {
    fn new(
        display_name: &'static str,
        default_value: Option<&'static str>,
        part_of_identity: bool,
        required: bool,
        display_order: &'static str,
    ) -> Self {
        Self {
            display_name,
            default_value,
            part_of_identity,
            required,
            secure: false,
            display_order,
        }
    }
}

/// Fields the host offers when defining a repository.
pub fn repository_fields() -> IndexMap<&'static str, ConfigField> {
    IndexMap::from([(MLFLOW_URL, ConfigField::new("MLFlow URL", None, true, true, "1"))])
}

/// Fields the host offers when defining a package within a repository.
pub fn package_fields() -> IndexMap<&'static str, ConfigField> {
    IndexMap::from([
        (
            EXPERIMENT_ID,
            ConfigField::new("Experiment ID", None, true, true, "1"),
        ),
        (
            PROMOTION_TAG_NAME,
            ConfigField::new("Promotion Tag Name", Some("promote"), false, false, "2"),
        ),
        (
            PROMOTION_TAG_VALUE,
            ConfigField::new("Promotion Tag Value", Some("true"), false, false, "3"),
        ),
    ])
}

/// One configured value as the host nests it: `{"value": "..."}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    value: Option<String>,
}

/// Flat key/value configuration extracted from one scope of a request body.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ScopeConfig(HashMap<String, FieldValue>);

impl ScopeConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|field| field.value.as_deref())
    }
}

/// Extracts the configuration nested under `scope` in a request body.
///
/// A body without the scope key yields an empty configuration; malformed
/// JSON is a fault rather than a validation result.
pub fn scope_config(body: &str, scope: &str) -> Result<ScopeConfig> {
    let mut envelope: HashMap<String, serde_json::Value> = serde_json::from_str(body)?;
    match envelope.remove(scope) {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(ScopeConfig::default()),
    }
}

/// One failed validation check, keyed by the offending field.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl ValidationError {
    fn new(key: &str, message: &str) -> Self {
        Self {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Presence checks for the repository scope.
pub fn validate_repository(repository: &ScopeConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if is_blank(repository.get(MLFLOW_URL)) {
        errors.push(ValidationError::new(
            MLFLOW_URL,
            "MLFlow URL must be specified",
        ));
    }
    errors
}

/// Presence checks for the package scope.
pub fn validate_package(package: &ScopeConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if is_blank(package.get(EXPERIMENT_ID)) {
        errors.push(ValidationError::new(
            EXPERIMENT_ID,
            "Experiment ID must be specified",
        ));
    }
    errors
}
