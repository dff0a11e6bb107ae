//! One status query across the fallback endpoints.
//!
//! Service deployments differ in which status endpoints they expose, so a
//! query tries [`QueryStrategy::FALLBACK_ORDER`] and stops at the first
//! endpoint that answers.

use tracing::debug;
use vidcache_core::{MediaService, QueryStrategy, ServiceResponse, TrackedRequest};

/// A response together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusAnswer {
    pub strategy: QueryStrategy,
    pub response: ServiceResponse,
}

/// Ask the service for the current state of `request`.
///
/// Returns `None` when every strategy came back empty. That is a transient
/// condition for the caller, not an error.
pub async fn query_status<S: MediaService>(
    service: &S,
    request: &TrackedRequest,
) -> Option<StatusAnswer> {
    for strategy in QueryStrategy::FALLBACK_ORDER {
        let endpoint = strategy.endpoint(request);
        if let Some(response) = service.query(endpoint).await {
            return Some(StatusAnswer { strategy, response });
        }
        debug!("No answer from {endpoint}, trying next endpoint");
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::ScriptedService;
    use vidcache_core::Status;

    fn tracked() -> TrackedRequest {
        let first = ServiceResponse::parse(r#"{"hash":"abc123","status":"pending"}"#);
        TrackedRequest::from_first_response("https://youtu.be/x", &first).unwrap()
    }

    #[tokio::test]
    async fn test_first_strategy_short_circuits() {
        let service = ScriptedService::new()
            .script("video", &[Some(r#"{"hash":"abc123","status":"downloading"}"#)])
            .script("status", &[Some(r#"{"status":"ready"}"#)])
            .script("info", &[Some(r#"{"status":"ready"}"#)]);

        let answer = query_status(&service, &tracked()).await.unwrap();
        assert_eq!(answer.strategy, QueryStrategy::Refetch);
        assert_eq!(answer.response.status(), Status::Downloading);
        assert_eq!(service.calls(), ["video"]);
    }

    #[tokio::test]
    async fn test_falls_back_in_order() {
        let service = ScriptedService::new()
            .script("video", &[None])
            .script("info", &[Some(r#"{"status":"downloading","title":"T"}"#)]);

        let answer = query_status(&service, &tracked()).await.unwrap();
        assert_eq!(answer.strategy, QueryStrategy::InfoPath);
        assert_eq!(service.calls(), ["video", "status", "info"]);
    }

    #[tokio::test]
    async fn test_status_path_before_info_path() {
        let service = ScriptedService::new()
            .script("status", &[Some(r#"{"status":"processing"}"#)])
            .script("info", &[Some(r#"{"status":"ready"}"#)]);

        let answer = query_status(&service, &tracked()).await.unwrap();
        assert_eq!(answer.strategy, QueryStrategy::StatusPath);
        assert_eq!(service.calls(), ["video", "status"]);
    }

    #[tokio::test]
    async fn test_all_empty_is_unreachable() {
        let service = ScriptedService::new();
        assert!(query_status(&service, &tracked()).await.is_none());
        assert_eq!(service.calls(), ["video", "status", "info"]);
    }

    #[tokio::test]
    async fn test_statusless_response_still_counts() {
        let service = ScriptedService::new().script("video", &[Some("garbage")]);
        let answer = query_status(&service, &tracked()).await.unwrap();
        assert_eq!(answer.response.status(), Status::Unknown);
        assert_eq!(service.calls(), ["video"]);
    }
}
