//! HTTP surface: the single relay endpoint plus a liveness probe.
//!
//! `GET` and `POST` on [`PROXY_PATH`] are signed and forwarded; every other verb on that
//! path is answered with `500 {"error":"Unsupported method: <VERB>"}` rather than axum's
//! default 405, matching the upstream-facing contract.

// crates.io
use axum::{
	Json, Router,
	body::Bytes,
	extract::State,
	http::{Method, header::CONTENT_TYPE},
	response::{IntoResponse, Response},
	routing::{any, get},
};
use tokio::net::TcpListener;
// self
use crate::{
	_prelude::*,
	http::UpstreamHttpClient,
	relay::{JSON_CONTENT_TYPE, Relay, RelayResponse},
};

/// Path of the relay endpoint.
pub const PROXY_PATH: &str = "/api/customers";
/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/health";

/// Liveness payload served on [`HEALTH_PATH`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
	/// Always `ok` while the process is serving.
	pub status: String,
	/// Service name.
	pub service: String,
	/// Crate version.
	pub version: String,
}

/// Builds the application router around a shared relay.
pub fn router<C>(relay: Arc<Relay<C>>) -> Router
where
	C: ?Sized + UpstreamHttpClient,
{
	Router::new()
		.route(PROXY_PATH, any(relay_call::<C>))
		.route(HEALTH_PATH, get(health))
		.with_state(relay)
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<C, F>(
	relay: Arc<Relay<C>>,
	listener: TcpListener,
	shutdown: F,
) -> std::io::Result<()>
where
	C: ?Sized + UpstreamHttpClient,
	F: 'static + Send + Future<Output = ()>,
{
	axum::serve(listener, router(relay)).with_graceful_shutdown(shutdown).await
}

/// Resolves once the process receives Ctrl-C.
pub async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
	}

	tracing::info!("Shutdown signal received; draining connections.");
}

async fn relay_call<C>(
	State(relay): State<Arc<Relay<C>>>,
	method: Method,
	body: Bytes,
) -> Response
where
	C: ?Sized + UpstreamHttpClient,
{
	match relay.relay(&method, body.to_vec()).await {
		Ok(response) => response.into_response(),
		Err(e) => e.into_response(),
	}
}

async fn health() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok".into(),
		service: env!("CARGO_PKG_NAME").into(),
		version: env!("CARGO_PKG_VERSION").into(),
	})
}

impl IntoResponse for RelayResponse {
	fn into_response(self) -> Response {
		(self.status, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], self.body).into_response()
	}
}
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		(self.status(), Json(self.body())).into_response()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// crates.io
	use axum::{
		body::{Body, to_bytes},
		http::{Request, StatusCode, header::AUTHORIZATION},
	};
	use tower::ServiceExt;
	// self
	use super::*;
	use crate::{
		auth::{ConsumerCredentials, TokenCredentials},
		config::RelayConfig,
		error::ErrorBody,
		http::{UpstreamFuture, UpstreamRequest},
	};

	#[derive(Debug)]
	struct NeverFails;
	impl Display for NeverFails {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str("unreachable")
		}
	}
	impl StdError for NeverFails {}

	struct CannedUpstream {
		status: StatusCode,
		body: &'static str,
		seen: Mutex<Vec<UpstreamRequest>>,
	}
	impl CannedUpstream {
		fn new(status: StatusCode, body: &'static str) -> Self {
			Self { status, body, seen: Mutex::new(Vec::new()) }
		}

		fn seen(&self) -> Vec<(Method, String, Vec<u8>)> {
			self.seen
				.lock()
				.expect("Recorded requests lock should not be poisoned.")
				.iter()
				.map(|request| {
					let authorization = request
						.headers()
						.get(AUTHORIZATION)
						.and_then(|value| value.to_str().ok())
						.unwrap_or_default()
						.to_owned();

					(request.method().clone(), authorization, request.body().clone())
				})
				.collect()
		}
	}
	impl UpstreamHttpClient for CannedUpstream {
		type TransportError = NeverFails;

		fn execute(&self, request: UpstreamRequest) -> UpstreamFuture<'_, Self::TransportError> {
			self.seen.lock().expect("Recorded requests lock should not be poisoned.").push(request);

			let mut response = http::Response::new(self.body.as_bytes().to_vec());

			*response.status_mut() = self.status;

			Box::pin(async move { Ok::<_, NeverFails>(response) })
		}
	}

	fn app(upstream: Arc<CannedUpstream>) -> Router {
		let config = RelayConfig::builder()
			.consumer(ConsumerCredentials::new("ck", "cs"))
			.token(TokenCredentials::new("tk", "ts"))
			.realm("REALM_1")
			.base_url("https://erp.example.com/services/rest/record/v1/customer")
			.build()
			.expect("Test configuration should build.");

		router(Arc::new(Relay::<CannedUpstream>::with_http_client(Arc::new(config), upstream)))
	}

	async fn call(app: Router, method: Method, body: &str) -> (StatusCode, Vec<u8>) {
		let request = Request::builder()
			.method(method)
			.uri(PROXY_PATH)
			.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
			.body(Body::from(body.to_owned()))
			.expect("Inbound request should build.");
		let response = app.oneshot(request).await.expect("Router should answer.");
		let status = response.status();
		let bytes =
			to_bytes(response.into_body(), usize::MAX).await.expect("Body should be readable.");

		(status, bytes.to_vec())
	}

	#[tokio::test]
	async fn get_is_signed_and_relayed_verbatim() {
		let upstream =
			Arc::new(CannedUpstream::new(StatusCode::OK, r#"{"items":[{"id":"1","links":[]}]}"#));
		let (status, body) = call(app(upstream.clone()), Method::GET, "").await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, br#"{"items":[{"id":"1","links":[]}]}"#);

		let seen = upstream.seen();

		assert_eq!(seen.len(), 1);
		assert_eq!(seen[0].0, Method::GET);
		assert!(seen[0].1.starts_with("OAuth realm=\"REALM_1\", oauth_consumer_key=\"ck\""));
		assert!(seen[0].2.is_empty());
	}

	#[tokio::test]
	async fn post_forwards_body_unmodified() {
		let payload = r#"{"companyName":"Acme Co","subsidiary":{"id":"1","refName":""}}"#;
		let upstream =
			Arc::new(CannedUpstream::new(StatusCode::OK, r#"{"id":"42","links":[]}"#));
		let (status, body) = call(app(upstream.clone()), Method::POST, payload).await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, br#"{"id":"42","links":[]}"#);

		let seen = upstream.seen();

		assert_eq!(seen[0].0, Method::POST);
		assert!(seen[0].1.starts_with("OAuth realm=\"REALM_1\", "));
		assert_eq!(seen[0].2, payload.as_bytes());
	}

	#[tokio::test]
	async fn unsupported_method_returns_500_without_calling_upstream() {
		let upstream = Arc::new(CannedUpstream::new(StatusCode::OK, "{}"));
		let (status, body) = call(app(upstream.clone()), Method::DELETE, "").await;
		let body: ErrorBody = serde_json::from_slice(&body).expect("Error body should be JSON.");

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body.error, "Unsupported method: DELETE");
		assert!(body.details.is_none());
		assert!(upstream.seen().is_empty());
	}

	#[tokio::test]
	async fn upstream_failure_status_is_relayed() {
		let upstream = Arc::new(CannedUpstream::new(
			StatusCode::UNAUTHORIZED,
			r#"{"title":"Unauthorized","status":401}"#,
		));
		let (status, body) = call(app(upstream), Method::GET, "").await;
		let body: ErrorBody = serde_json::from_slice(&body).expect("Error body should be JSON.");

		assert_eq!(status, StatusCode::UNAUTHORIZED);
		assert_eq!(body.error, "Request failed with status code 401");
		assert_eq!(
			body.details.expect("Upstream details should be kept.")["title"],
			"Unauthorized"
		);
	}

	#[tokio::test]
	async fn health_reports_service_identity() {
		let upstream = Arc::new(CannedUpstream::new(StatusCode::OK, "{}"));
		let request = Request::builder()
			.uri(HEALTH_PATH)
			.body(Body::empty())
			.expect("Health request should build.");
		let response = app(upstream).oneshot(request).await.expect("Router should answer.");

		assert_eq!(response.status(), StatusCode::OK);

		let bytes =
			to_bytes(response.into_body(), usize::MAX).await.expect("Body should be readable.");
		let health: HealthResponse =
			serde_json::from_slice(&bytes).expect("Health body should be JSON.");

		assert_eq!(health.status, "ok");
		assert_eq!(health.service, "oauth1-relay");
	}
}
