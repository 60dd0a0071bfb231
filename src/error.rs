//! Relay-level error types shared across signing, transport, and the HTTP surface.

// crates.io
use http::StatusCode;
use serde_json::Value;
// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Inbound call used a verb the relay does not forward.
	#[error("Unsupported method: {method}")]
	UnsupportedMethod {
		/// Verb as received from the caller.
		method: String,
	},
	/// Upstream answered with a non-2xx status.
	#[error("{message}")]
	Upstream {
		/// HTTP status returned by the upstream system.
		status: u16,
		/// Human-readable summary of the failure.
		message: String,
		/// Upstream JSON error body, when it could be parsed.
		details: Option<Value>,
	},
}
impl Error {
	/// Returns the status to relay: the upstream status when present, otherwise 500.
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Upstream { status, .. } =>
				StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Builds the JSON body returned to callers for this failure.
	pub fn body(&self) -> ErrorBody {
		let details = match self {
			Self::Upstream { details, .. } => details.clone(),
			_ => None,
		};

		ErrorBody { error: self.to_string(), details }
	}
}

/// JSON error payload returned by the relay endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Error message.
	pub error: String,
	/// Upstream error document, when one was returned.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub details: Option<Value>,
}

/// Configuration and request construction failures raised by the relay.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Signed header could not be encoded as an HTTP header value.
	#[error("Authorization header contains invalid characters.")]
	InvalidHeader(#[from] http::header::InvalidHeaderValue),
	/// Outbound request URI is not an absolute URL.
	#[error("Outbound request URI is invalid.")]
	InvalidRequestUri {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HMAC key could not be initialized.
	#[error("Signing key is invalid for HMAC-SHA256.")]
	InvalidSigningKey,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the upstream endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the upstream endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures observed by [`crate::client::RelayClient`] when calling the relay endpoint.
#[derive(Debug, ThisError)]
pub enum ClientError {
	/// Relay answered with a non-OK status.
	#[error("Error: {}", status_line(.status, .status_text))]
	Status {
		/// Numeric HTTP status.
		status: u16,
		/// Canonical reason phrase for the status; empty when the status has none.
		status_text: String,
	},
	/// Relay could not be reached.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Payload could not be encoded, or the response was not the expected JSON document.
	#[error("JSON payload could not be processed: {0}")]
	Json(#[from] serde_json::Error),
}

fn status_line(status: &u16, status_text: &str) -> String {
	if status_text.is_empty() { status.to_string() } else { format!("{status} {status_text}") }
}
