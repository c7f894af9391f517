//! Wire contract between a package-repository plugin and its host.
//!
//! The host delivers a named request with a raw JSON body and expects a
//! response code plus a JSON body back. Nothing here interprets the body;
//! that is the plugin's job.

use serde::Serialize;

/// Response code the host reads as "request handled".
pub const SUCCESS_RESPONSE_CODE: u16 = 200;
/// Response code for failed connectivity or repository resolution.
pub const FAILURE_RESPONSE_CODE: u16 = 500;

/// Inbound envelope: a request name plus its raw JSON body.
#[derive(Clone, Debug)]
pub struct PluginRequest {
    pub name: String,
    pub body: String,
}

impl PluginRequest {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// Outbound envelope handed back to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginResponse {
    pub response_code: u16,
    pub body: String,
}

impl PluginResponse {
    pub fn success(body: impl Into<String>) -> Self {
        Self {
            response_code: SUCCESS_RESPONSE_CODE,
            body: body.into(),
        }
    }

    pub fn failure(body: impl Into<String>) -> Self {
        Self {
            response_code: FAILURE_RESPONSE_CODE,
            body: body.into(),
        }
    }

    /// Serializes `body` as JSON under the success code.
    pub fn success_json<T: Serialize>(body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::success(serde_json::to_string(body)?))
    }

    /// Serializes `body` as JSON under the failure code.
    pub fn failure_json<T: Serialize>(body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::failure(serde_json::to_string(body)?))
    }

    pub fn is_success(&self) -> bool {
        self.response_code == SUCCESS_RESPONSE_CODE
    }
}

/// Identity the plugin negotiates with the host on load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginIdentifier {
    pub extension: &'static str,
    pub supported_versions: Vec<&'static str>,
}

impl PluginIdentifier {
    pub fn package_repository() -> Self {
        Self {
            extension: "package-repository",
            supported_versions: vec!["1.0"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_codes() {
        assert!(PluginResponse::success("{}").is_success());
        assert!(!PluginResponse::failure("{}").is_success());
        assert_eq!(PluginResponse::failure("{}").response_code, 500);
    }

    #[test]
    fn package_repository_identity() {
        let id = PluginIdentifier::package_repository();
        assert_eq!(id.extension, "package-repository");
        assert_eq!(id.supported_versions, vec!["1.0"]);
    }
}
