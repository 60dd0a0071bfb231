//! Transport primitives for forwarding signed requests upstream.
//!
//! The module exposes [`UpstreamHttpClient`] so the relay can run over any HTTP stack
//! (and over in-process fakes in tests). Requests and responses are plain
//! [`http::Request`]/[`http::Response`] values with owned byte bodies, which keeps the
//! signer and the relay independent of the transport crate.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Outbound request handed to a transport.
pub type UpstreamRequest = http::Request<Vec<u8>>;
/// Upstream response returned by a transport.
pub type UpstreamResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`UpstreamHttpClient::execute`].
pub type UpstreamFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<UpstreamResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing one signed upstream call.
///
/// Implementations must be `Send + Sync + 'static` so a single instance can be shared by
/// every in-flight request behind an `Arc`. A transport reports only transport failures
/// through its error type; any HTTP status (including 4xx/5xx) is a successful exchange
/// and is classified by the relay.
pub trait UpstreamHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the full upstream response.
	fn execute(&self, request: UpstreamRequest) -> UpstreamFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// No timeout is configured beyond reqwest's defaults; one upstream call is made per
/// inbound call and never retried.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that never follows redirects, so a redirecting upstream is relayed
	/// as-is instead of being re-requested without a fresh signature.
	pub fn build() -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl UpstreamHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: UpstreamRequest) -> UpstreamFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let response = self.0.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = http::Response::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok::<_, ReqwestError>(response_new)
		})
	}
}
