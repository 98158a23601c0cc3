use crate::commands::start::CLIENT;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{trace, warn};
use url::Url;

/// The data service every trigger request is relayed to. This is not
/// configurable.
static UPSTREAM_DATA_URL: Lazy<Url> = Lazy::new(|| {
    Url::parse("http://api-service-1:8080/api/data").expect("upstream url should be valid")
});

const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// The client and address used to reach the data service.
#[derive(Clone)]
pub(crate) struct Upstream {
    client: reqwest::Client,
    url: Url,
}

impl Upstream {
    pub(crate) fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Issue a single GET request to the data service and decode its body as
    /// arbitrary JSON. Nothing from the inbound request is forwarded.
    async fn fetch(&self) -> Result<Value, UpstreamError> {
        let res = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        let status = res.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        res.json().await.map_err(UpstreamError::Decode)
    }
}

impl Default for Upstream {
    fn default() -> Self {
        Self::new(CLIENT.clone(), UPSTREAM_DATA_URL.clone())
    }
}

#[derive(Serialize)]
pub(crate) struct TriggerResponse {
    result: Value,
}

pub(crate) async fn handler(
    State(upstream): State<Upstream>,
) -> Result<Json<TriggerResponse>, UpstreamError> {
    match upstream.fetch().await {
        Ok(result) => {
            trace!(upstream_uri=%upstream.url, "Relaying response from the upstream source");
            Ok(Json(TriggerResponse { result }))
        }
        Err(err) => {
            warn!(
                upstream_uri=%upstream.url,
                err=%err,
                "Unable to retrieve data from the upstream source",
            );
            Err(err)
        }
    }
}

/// Everything that can go wrong while talking to the data service. The
/// variants are only used for logging; callers always receive the same
/// response.
#[derive(Debug, Error)]
pub(crate) enum UpstreamError {
    #[error("request to upstream failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("unable to decode upstream response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: GENERIC_ERROR_MESSAGE,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
