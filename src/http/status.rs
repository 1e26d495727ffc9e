//! Classification of HTTP failures into the cases callers act on.

use reqwest::StatusCode;

/// Non-2xx responses, split by how the caller has to react.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusFailure {
    /// HTTP 404
    #[error("Not found: {0}")]
    NotFound(String),
    /// Other 4xx responses
    #[error("Request error: HTTP {0}")]
    ClientError(u16),
    /// 5xx responses
    #[error("Server error: HTTP {0}")]
    ServerError(u16),
}

/// A 2xx response whose body is not valid JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid response body: {0}")]
pub struct InvalidBody(pub String);

/// Classifies an error coming out of `error_for_status()`.
/// Returns `None` for errors without a status (connection, timeout, ...).
pub fn classify_error(error: &reqwest::Error) -> Option<StatusFailure> {
    let status = error.status()?;
    let failure = match status {
        StatusCode::NOT_FOUND => {
            let target = error
                .url()
                .map(|u| u.path().to_string())
                .unwrap_or_else(|| "the requested resource".to_string());
            StatusFailure::NotFound(target)
        }
        s if s.is_client_error() => StatusFailure::ClientError(s.as_u16()),
        s => StatusFailure::ServerError(s.as_u16()),
    };
    Some(failure)
}

/// Wraps a status error, replacing it with a [`StatusFailure`] when it has a status.
pub fn check_status(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Some(failure) => anyhow::Error::from(failure),
        None => anyhow::Error::from(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn status_error(status: usize) -> reqwest::Error {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(status)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let response = client.get(server.url()).send().await.unwrap();
        response.error_for_status().unwrap_err()
    }

    #[test]
    fn test_status_failure_display() {
        let err = StatusFailure::NotFound("/api/v1/github/ghost".to_string());
        assert!(err.to_string().contains("Not found"));
        assert!(err.to_string().contains("ghost"));

        let err = StatusFailure::ClientError(400);
        assert_eq!(err.to_string(), "Request error: HTTP 400");

        let err = StatusFailure::ServerError(502);
        assert_eq!(err.to_string(), "Server error: HTTP 502");
    }

    #[tokio::test]
    async fn test_classify_error_not_found() {
        let err = status_error(404).await;
        assert!(matches!(
            classify_error(&err),
            Some(StatusFailure::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_classify_error_other_client_error() {
        let err = status_error(403).await;
        assert_eq!(classify_error(&err), Some(StatusFailure::ClientError(403)));
    }

    #[tokio::test]
    async fn test_classify_error_server_error() {
        let err = status_error(500).await;
        assert_eq!(classify_error(&err), Some(StatusFailure::ServerError(500)));
    }

    #[tokio::test]
    async fn test_check_status_keeps_failure_downcastable() {
        let err = check_status(status_error(404).await);
        assert!(matches!(
            err.downcast_ref::<StatusFailure>(),
            Some(StatusFailure::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_classify_error_without_status() {
        // Nothing listens on port 9 of localhost
        let client = reqwest::Client::new();
        let err = client.get("http://127.0.0.1:9/").send().await.unwrap_err();
        assert_eq!(classify_error(&err), None);
        assert!(check_status(err).downcast_ref::<StatusFailure>().is_none());
    }
}
