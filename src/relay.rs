//! Signing relay: turn one inbound GET/POST into one signed upstream call and relay the result.
//!
//! [`Relay::relay`] maps the inbound verb onto the closed [`RelayMethod`] set (anything
//! else fails with [`Error::UnsupportedMethod`]), builds the outbound request for the
//! configured base URL, signs it through [`RequestSignerExt`], and performs exactly one
//! upstream exchange. A 2xx response is returned verbatim; a non-2xx response becomes
//! [`Error::Upstream`] carrying the upstream status.

// crates.io
use http::{
	Method, StatusCode,
	header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	config::RelayConfig,
	error::{ConfigError, TransportError},
	ext::RequestSignerExt,
	http::{UpstreamHttpClient, UpstreamRequest},
	oauth::OAuthSigner,
	obs::{self, RelayOutcome, RelaySpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// `application/json`, sent and relayed on every exchange.
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// `User-Agent` presented to the upstream system.
pub const RELAY_USER_AGENT: &str = concat!("oauth1-relay/", env!("CARGO_PKG_VERSION"));

#[cfg(feature = "reqwest")]
/// Relay specialized for the crate's default reqwest transport.
pub type ReqwestRelay = Relay<ReqwestHttpClient>;

/// HTTP verbs the relay forwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelayMethod {
	/// List records.
	Get,
	/// Create a record from the inbound JSON body.
	Post,
}
impl RelayMethod {
	/// Returns the uppercase verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			RelayMethod::Get => "GET",
			RelayMethod::Post => "POST",
		}
	}

	/// Returns the matching [`Method`].
	pub fn to_method(self) -> Method {
		match self {
			RelayMethod::Get => Method::GET,
			RelayMethod::Post => Method::POST,
		}
	}
}
impl Display for RelayMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl TryFrom<&Method> for RelayMethod {
	type Error = Error;

	fn try_from(method: &Method) -> Result<Self> {
		if method == Method::GET {
			Ok(Self::Get)
		} else if method == Method::POST {
			Ok(Self::Post)
		} else {
			Err(Error::UnsupportedMethod { method: method.as_str().to_owned() })
		}
	}
}

/// Successful upstream exchange, relayed verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayResponse {
	/// Upstream 2xx status.
	pub status: StatusCode,
	/// Upstream body bytes (JSON, or empty for 204).
	pub body: Vec<u8>,
}

/// Signs and forwards calls to the single configured upstream URL.
///
/// The configuration is immutable and shared; the relay keeps no per-request state, so one
/// instance serves every concurrent call.
#[derive(Clone)]
pub struct Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// Immutable configuration loaded at startup.
	pub config: Arc<RelayConfig>,
	/// Signer built from the configuration's credentials and realm.
	pub signer: OAuthSigner,
	/// Transport used for every upstream call.
	pub http_client: Arc<C>,
}
impl<C> Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// Creates a relay that reuses the caller-provided transport.
	pub fn with_http_client(config: Arc<RelayConfig>, http_client: impl Into<Arc<C>>) -> Self {
		let signer = OAuthSigner::from_config(&config);

		Self { config, signer, http_client: http_client.into() }
	}

	/// Dispatches an inbound call by verb.
	///
	/// `body` is forwarded unmodified for POST and ignored for GET.
	pub async fn relay(&self, method: &Method, body: Vec<u8>) -> Result<RelayResponse> {
		let method = RelayMethod::try_from(method).inspect_err(|e| {
			tracing::warn!(error = %e, "Rejected inbound call.");
		})?;
		let body = match method {
			RelayMethod::Get => None,
			RelayMethod::Post => Some(body),
		};

		self.forward(method, body).await
	}

	/// Performs one signed upstream exchange.
	pub async fn forward(
		&self,
		method: RelayMethod,
		body: Option<Vec<u8>>,
	) -> Result<RelayResponse> {
		let span = RelaySpan::new(method, "forward");

		obs::record_relay_outcome(method, RelayOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = self.signer.sign_request(self.build_request(method, body)?)?;
				let response = self
					.http_client
					.execute(request)
					.await
					.map_err(TransportError::network)?;
				let status = response.status();
				let body = response.into_body();

				if status.is_success() {
					tracing::info!(status = status.as_u16(), "Relayed upstream response.");

					Ok(RelayResponse { status, body })
				} else {
					Err(upstream_error(status, &body))
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_relay_outcome(method, RelayOutcome::Success),
			Err(e) => {
				tracing::warn!(
					method = method.as_str(),
					status = e.status().as_u16(),
					error = %e,
					"Relay call failed."
				);

				obs::record_relay_outcome(method, RelayOutcome::Failure);
			},
		}

		result
	}

	fn build_request(
		&self,
		method: RelayMethod,
		body: Option<Vec<u8>>,
	) -> Result<UpstreamRequest> {
		let request = http::Request::builder()
			.method(method.to_method())
			.uri(self.config.base_url.as_str())
			.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
			.header(ACCEPT, JSON_CONTENT_TYPE)
			.header(USER_AGENT, RELAY_USER_AGENT)
			.body(body.unwrap_or_default())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl Relay<ReqwestHttpClient> {
	/// Creates a relay backed by a default reqwest transport.
	pub fn new(config: Arc<RelayConfig>) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay")
			.field("base_url", &self.config.base_url.as_str())
			.field("realm", &self.signer.realm())
			.finish()
	}
}

fn upstream_error(status: StatusCode, body: &[u8]) -> Error {
	let details = serde_json::from_slice::<Value>(body).ok();

	Error::Upstream {
		status: status.as_u16(),
		message: format!("Request failed with status code {}", status.as_u16()),
		details,
	}
}
