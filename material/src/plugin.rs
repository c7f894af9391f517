use crate::config;
use crate::connection::{self, CheckResult};
use crate::errors::{MaterialError, Result};
use plugin_api::{PluginIdentifier, PluginRequest, PluginResponse};
use serde::Serialize;
use std::str::FromStr;

/// The fixed set of requests the host may issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestName {
    RepositoryConfiguration,
    PackageConfiguration,
    ValidateRepositoryConfiguration,
    ValidatePackageConfiguration,
    CheckRepositoryConnection,
    CheckPackageConnection,
    LatestRevision,
    LatestRevisionSince,
}

impl RequestName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RepositoryConfiguration => "repository-configuration",
            Self::PackageConfiguration => "package-configuration",
            Self::ValidateRepositoryConfiguration => "validate-repository-configuration",
            Self::ValidatePackageConfiguration => "validate-package-configuration",
            Self::CheckRepositoryConnection => "check-repository-connection",
            Self::CheckPackageConnection => "check-package-connection",
            Self::LatestRevision => "latest-revision",
            Self::LatestRevisionSince => "latest-revision-since",
        }
    }
}

impl FromStr for RequestName {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "repository-configuration" => Ok(Self::RepositoryConfiguration),
            "package-configuration" => Ok(Self::PackageConfiguration),
            "validate-repository-configuration" => Ok(Self::ValidateRepositoryConfiguration),
            "validate-package-configuration" => Ok(Self::ValidatePackageConfiguration),
            "check-repository-connection" => Ok(Self::CheckRepositoryConnection),
            "check-package-connection" => Ok(Self::CheckPackageConnection),
            "latest-revision" => Ok(Self::LatestRevision),
            "latest-revision-since" => Ok(Self::LatestRevisionSince),
            other => Err(MaterialError::UnsupportedRequest(other.to_string())),
        }
    }
}

/// The adapter itself: one dispatcher over eight independent handlers.
///
/// Holds a single HTTP client; each request is otherwise self-contained and
/// no state survives a request/response cycle.
#[derive(Clone, Debug, Default)]
pub struct MaterialPlugin {
    client: reqwest::Client,
}

impl MaterialPlugin {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Identity negotiated with the host on load.
    pub fn identifier(&self) -> PluginIdentifier {
        PluginIdentifier::package_repository()
    }

    /// Routes a host request to its handler.
    ///
    /// An unrecognized request name is an explicit fault rather than an
    /// empty response the host could mistake for success.
    pub async fn handle(&self, request: PluginRequest) -> Result<PluginResponse> {
        let name = RequestName::from_str(&request.name)?;
        tracing::debug!(request = name.as_str(), "Dispatching plugin request");

        match name {
            RequestName::RepositoryConfiguration => respond(&config::repository_fields()),
            RequestName::PackageConfiguration => respond(&config::package_fields()),
            RequestName::ValidateRepositoryConfiguration => {
                let repository =
                    config::scope_config(&request.body, config::REPOSITORY_CONFIGURATION)?;
                respond(&config::validate_repository(&repository))
            }
            RequestName::ValidatePackageConfiguration => {
                let package = config::scope_config(&request.body, config::PACKAGE_CONFIGURATION)?;
                respond(&config::validate_package(&package))
            }
            RequestName::CheckRepositoryConnection => {
                let repository =
                    config::scope_config(&request.body, config::REPOSITORY_CONFIGURATION)?;
                check_response(&connection::check_repository(&self.client, &repository).await)
            }
            RequestName::CheckPackageConnection => {
                let repository =
                    config::scope_config(&request.body, config::REPOSITORY_CONFIGURATION)?;
                let package = config::scope_config(&request.body, config::PACKAGE_CONFIGURATION)?;
                check_response(
                    &connection::check_package(&self.client, &repository, &package).await,
                )
            }
            RequestName::LatestRevision | RequestName::LatestRevisionSince => {
                // Revision polling was never implemented upstream; keep the
                // no-op visible to operators.
                tracing::warn!(request = name.as_str(), "Revision polling is not implemented");
                Ok(PluginResponse::success(""))
            }
        }
    }
}

fn respond<T: Serialize>(body: &T) -> Result<PluginResponse> {
    PluginResponse::success_json(body)
        .map_err(|err| MaterialError::ResponseSerializationError(err.to_string()))
}

fn check_response(result: &CheckResult) -> Result<PluginResponse> {
    let response = if result.success {
        PluginResponse::success_json(result)
    } else {
        PluginResponse::failure_json(result)
    };
    response.map_err(|err| MaterialError::ResponseSerializationError(err.to_string()))
}
