use crate::config::{self, ScopeConfig};
use http::StatusCode;
use serde::Serialize;

const GET_EXPERIMENT_ENDPOINT: &str = "/api/2.0/preview/mlflow/experiments/get";

/// Outcome of a connectivity probe, delivered in the response body.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CheckResult {
    pub success: bool,
    pub message: String,
}

impl CheckResult {
    fn ok() -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Probes the configured tracking server base URL.
///
/// Only the status code is inspected; the response body is ignored.
pub async fn check_repository(client: &reqwest::Client, repository: &ScopeConfig) -> CheckResult {
    let mlflow_url = repository.get(config::MLFLOW_URL);
    if config::is_blank(mlflow_url) {
        return CheckResult::fail("MLFlow url must be specified");
    }
    let url = mlflow_url.unwrap_or_default();

    match client.get(url).send().await {
        Ok(response) if response.status() == StatusCode::OK => CheckResult::ok(),
        Ok(_) => CheckResult::fail(format!("Unable to reach MLFlow at {url}")),
        Err(err) => {
            tracing::error!(url, error = %err, "Unable to reach MLFlow");
            CheckResult::fail(format!("Unable to reach MLFlow at {url} - {err}"))
        }
    }
}

/// Probes the get-experiment endpoint for the configured experiment.
pub async fn check_package(
    client: &reqwest::Client,
    repository: &ScopeConfig,
    package: &ScopeConfig,
) -> CheckResult {
    let mlflow_url = repository.get(config::MLFLOW_URL);
    let experiment_id = package.get(config::EXPERIMENT_ID).unwrap_or_default();

    if config::is_blank(mlflow_url) {
        // Message kept verbatim from the original plugin, which reports the
        // experiment id field here even though the URL is what is missing.
        return CheckResult::fail("Experiment id must be specified");
    }
    let url = mlflow_url.unwrap_or_default();
    let endpoint = format!("{url}{GET_EXPERIMENT_ENDPOINT}?experiment_id={experiment_id}");

    match client.get(&endpoint).send().await {
        Ok(response) if response.status() == StatusCode::OK => CheckResult::ok(),
        Ok(_) => CheckResult::fail(format!("Experiment {experiment_id} not found")),
        Err(err) => {
            tracing::error!(url, experiment_id, error = %err, "Unable to reach MLFlow");
            CheckResult::fail(format!("Unable to reach MLFlow at {url} - {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PACKAGE_CONFIGURATION, REPOSITORY_CONFIGURATION, scope_config};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repository_config(url: &str) -> ScopeConfig {
        let body = format!(r#"{{"repository-configuration": {{"MLFLOW_URL": {{"value": "{url}"}}}}}}"#);
        scope_config(&body, REPOSITORY_CONFIGURATION).unwrap()
    }

    fn package_config(experiment_id: &str) -> ScopeConfig {
        let body =
            format!(r#"{{"package-configuration": {{"EXPERIMENT_ID": {{"value": "{experiment_id}"}}}}}}"#);
        scope_config(&body, PACKAGE_CONFIGURATION).unwrap()
    }

    #[tokio::test]
    async fn repository_check_succeeds_on_200() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let result = check_repository(&client, &repository_config(&mock_server.uri())).await;
        assert_eq!(result, CheckResult::ok());
    }

    #[tokio::test]
    async fn repository_check_fails_on_non_200() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let result = check_repository(&client, &repository_config(&mock_server.uri())).await;
        assert!(!result.success);
        assert_eq!(
            result.message,
            format!("Unable to reach MLFlow at {}", mock_server.uri())
        );
    }

    #[tokio::test]
    async fn repository_check_reports_transport_errors() {
        // Nothing listens here; the connection is refused.
        let url = "http://127.0.0.1:9";
        let client = reqwest::Client::new();
        let result = check_repository(&client, &repository_config(url)).await;
        assert!(!result.success);
        assert!(result.message.starts_with(&format!("Unable to reach MLFlow at {url} - ")));
    }

    #[tokio::test]
    async fn repository_check_requires_url() {
        let client = reqwest::Client::new();
        let empty = scope_config("{}", REPOSITORY_CONFIGURATION).unwrap();
        let result = check_repository(&client, &empty).await;
        assert_eq!(result, CheckResult::fail("MLFlow url must be specified"));

        let blank = repository_config("   ");
        let result = check_repository(&client, &blank).await;
        assert_eq!(result, CheckResult::fail("MLFlow url must be specified"));
    }

    #[tokio::test]
    async fn package_check_hits_get_experiment_endpoint() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/2.0/preview/mlflow/experiments/get"))
            .and(query_param("experiment_id", "42"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let result = check_package(
            &client,
            &repository_config(&mock_server.uri()),
            &package_config("42"),
        )
        .await;
        assert_eq!(result, CheckResult::ok());
    }

    #[tokio::test]
    async fn package_check_reports_missing_experiment() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let result = check_package(
            &client,
            &repository_config(&mock_server.uri()),
            &package_config("42"),
        )
        .await;
        assert_eq!(result, CheckResult::fail("Experiment 42 not found"));
    }

    #[tokio::test]
    async fn package_check_requires_url() {
        let client = reqwest::Client::new();
        let empty = scope_config("{}", REPOSITORY_CONFIGURATION).unwrap();
        let result = check_package(&client, &empty, &package_config("42")).await;
        assert_eq!(result, CheckResult::fail("Experiment id must be specified"));
    }
}
