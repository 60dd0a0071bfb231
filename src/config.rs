//! Process-wide relay configuration, built once at startup and shared immutably.
//!
//! [`RelayConfig::from_env`] reads the `RELAY_*` environment variables listed below and
//! validates them through [`RelayConfigBuilder`], so a missing credential fails fast at
//! boot instead of producing an unsigned (or wrongly signed) upstream call.
//!
//! | Variable | Required | Default |
//! | --- | --- | --- |
//! | `RELAY_CONSUMER_KEY` | yes | |
//! | `RELAY_CONSUMER_SECRET` | yes | |
//! | `RELAY_ACCESS_TOKEN` | yes | |
//! | `RELAY_TOKEN_SECRET` | yes | |
//! | `RELAY_REALM` | yes | |
//! | `RELAY_BASE_URL` | yes | |
//! | `RELAY_BIND_ADDRESS` | no | `127.0.0.1:3000` |
//! | `RELAY_ALLOW_INSECURE_UPSTREAM` | no | `false` |
//! | `RELAY_LOG_FORMAT` | no | `compact` |

// std
use std::net::{AddrParseError, SocketAddr};
// self
use crate::{
	_prelude::*,
	auth::{ConsumerCredentials, Secret, TokenCredentials},
};

/// Environment variable holding the consumer key.
pub const ENV_CONSUMER_KEY: &str = "RELAY_CONSUMER_KEY";
/// Environment variable holding the consumer secret.
pub const ENV_CONSUMER_SECRET: &str = "RELAY_CONSUMER_SECRET";
/// Environment variable holding the access token key.
pub const ENV_ACCESS_TOKEN: &str = "RELAY_ACCESS_TOKEN";
/// Environment variable holding the access token secret.
pub const ENV_TOKEN_SECRET: &str = "RELAY_TOKEN_SECRET";
/// Environment variable holding the OAuth realm.
pub const ENV_REALM: &str = "RELAY_REALM";
/// Environment variable holding the upstream REST URL.
pub const ENV_BASE_URL: &str = "RELAY_BASE_URL";
/// Environment variable holding the listen address.
pub const ENV_BIND_ADDRESS: &str = "RELAY_BIND_ADDRESS";
/// Environment variable toggling plain-HTTP upstreams.
pub const ENV_ALLOW_INSECURE_UPSTREAM: &str = "RELAY_ALLOW_INSECURE_UPSTREAM";
/// Environment variable selecting the log output format.
pub const ENV_LOG_FORMAT: &str = "RELAY_LOG_FORMAT";

/// Validation failures raised while assembling a [`RelayConfig`].
#[derive(Debug, ThisError)]
pub enum RelayConfigError {
	/// A required environment variable is absent.
	#[error("Missing required configuration value: {name}.")]
	MissingVariable {
		/// Variable name.
		name: &'static str,
	},
	/// A required builder field was never set.
	#[error("Relay configuration is missing the {field}.")]
	MissingField {
		/// Field label.
		field: &'static str,
	},
	/// A credential or realm was set to an empty string.
	#[error("The {field} cannot be empty.")]
	EmptyValue {
		/// Field label.
		field: &'static str,
	},
	/// Upstream URL cannot be parsed.
	#[error("Upstream base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Upstream URL is not HTTPS and insecure upstreams are not allowed.
	#[error("Upstream base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// URL that failed validation.
		url: String,
	},
	/// Listen address cannot be parsed.
	#[error("Bind address `{value}` is invalid.")]
	InvalidBindAddress {
		/// Raw value.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: AddrParseError,
	},
	/// Boolean flag holds something other than `true`/`false`/`1`/`0`.
	#[error("Flag {name} must be `true` or `false`, got `{value}`.")]
	InvalidFlag {
		/// Variable name.
		name: &'static str,
		/// Raw value.
		value: String,
	},
	/// Log format is not one of the supported values.
	#[error("Log format `{value}` is not one of compact, pretty, json.")]
	InvalidLogFormat {
		/// Raw value.
		value: String,
	},
}

/// Output format for the binary's log subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	/// Single-line human-readable output.
	#[default]
	Compact,
	/// Multi-line human-readable output.
	Pretty,
	/// Newline-delimited JSON.
	Json,
}
impl LogFormat {
	/// Returns a stable label for the format.
	pub const fn as_str(self) -> &'static str {
		match self {
			LogFormat::Compact => "compact",
			LogFormat::Pretty => "pretty",
			LogFormat::Json => "json",
		}
	}
}
impl Display for LogFormat {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for LogFormat {
	type Err = RelayConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"compact" => Ok(Self::Compact),
			"pretty" => Ok(Self::Pretty),
			"json" => Ok(Self::Json),
			_ => Err(RelayConfigError::InvalidLogFormat { value: s.to_owned() }),
		}
	}
}

/// Immutable relay configuration: signing credentials, realm, and upstream target.
#[derive(Clone, Debug)]
pub struct RelayConfig {
	/// Consumer key/secret pair.
	pub consumer: ConsumerCredentials,
	/// Access token key/secret pair.
	pub token: TokenCredentials,
	/// Realm prefixed to every `Authorization` header.
	pub realm: String,
	/// Fixed upstream REST URL every call is forwarded to.
	pub base_url: Url,
	/// Address the HTTP server listens on.
	pub bind_address: SocketAddr,
	/// Log output format used by the binary.
	pub log_format: LogFormat,
}
impl RelayConfig {
	/// Creates a new builder.
	pub fn builder() -> RelayConfigBuilder {
		RelayConfigBuilder::default()
	}

	/// Loads the configuration from the process environment.
	pub fn from_env() -> Result<Self, RelayConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads the configuration from an arbitrary name → value lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let required = |name: &'static str| {
			lookup(name).ok_or(RelayConfigError::MissingVariable { name })
		};
		let mut builder = Self::builder()
			.consumer(ConsumerCredentials::new(
				required(ENV_CONSUMER_KEY)?,
				required(ENV_CONSUMER_SECRET)?,
			))
			.token(TokenCredentials::new(required(ENV_ACCESS_TOKEN)?, required(ENV_TOKEN_SECRET)?))
			.realm(required(ENV_REALM)?)
			.base_url(required(ENV_BASE_URL)?);

		if let Some(raw) = lookup(ENV_BIND_ADDRESS) {
			let address = raw.trim().parse().map_err(|source| {
				RelayConfigError::InvalidBindAddress { value: raw.clone(), source }
			})?;

			builder = builder.bind_address(address);
		}
		if let Some(raw) = lookup(ENV_ALLOW_INSECURE_UPSTREAM) {
			builder =
				builder.allow_insecure_upstream(parse_flag(ENV_ALLOW_INSECURE_UPSTREAM, &raw)?);
		}
		if let Some(raw) = lookup(ENV_LOG_FORMAT) {
			builder = builder.log_format(raw.parse()?);
		}

		builder.build()
	}
}

/// Builder for [`RelayConfig`] values.
#[derive(Debug)]
pub struct RelayConfigBuilder {
	/// Consumer key/secret pair.
	pub consumer: Option<ConsumerCredentials>,
	/// Access token key/secret pair.
	pub token: Option<TokenCredentials>,
	/// OAuth realm.
	pub realm: Option<String>,
	/// Raw upstream URL, parsed during [`RelayConfigBuilder::build`].
	pub base_url: Option<String>,
	/// Listen address.
	pub bind_address: SocketAddr,
	/// Permit `http://` upstreams (local mocks and tests).
	pub allow_insecure_upstream: bool,
	/// Log output format.
	pub log_format: LogFormat,
}
impl Default for RelayConfigBuilder {
	fn default() -> Self {
		Self {
			consumer: None,
			token: None,
			realm: None,
			base_url: None,
			bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
			allow_insecure_upstream: false,
			log_format: LogFormat::default(),
		}
	}
}
impl RelayConfigBuilder {
	/// Sets the consumer credentials.
	pub fn consumer(mut self, consumer: ConsumerCredentials) -> Self {
		self.consumer = Some(consumer);

		self
	}

	/// Sets the access token credentials.
	pub fn token(mut self, token: TokenCredentials) -> Self {
		self.token = Some(token);

		self
	}

	/// Sets the realm.
	pub fn realm(mut self, realm: impl Into<String>) -> Self {
		self.realm = Some(realm.into());

		self
	}

	/// Sets the upstream URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Overrides the listen address.
	pub fn bind_address(mut self, address: SocketAddr) -> Self {
		self.bind_address = address;

		self
	}

	/// Allows or forbids plain-HTTP upstream URLs.
	pub fn allow_insecure_upstream(mut self, allow: bool) -> Self {
		self.allow_insecure_upstream = allow;

		self
	}

	/// Overrides the log output format.
	pub fn log_format(mut self, format: LogFormat) -> Self {
		self.log_format = format;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<RelayConfig, RelayConfigError> {
		let consumer =
			self.consumer.ok_or(RelayConfigError::MissingField { field: "consumer credentials" })?;
		let token =
			self.token.ok_or(RelayConfigError::MissingField { field: "token credentials" })?;
		let realm = self.realm.ok_or(RelayConfigError::MissingField { field: "realm" })?;
		let raw_url = self.base_url.ok_or(RelayConfigError::MissingField { field: "base URL" })?;

		ensure_present("consumer key", &consumer.key)?;
		ensure_present("consumer secret", &consumer.secret)?;
		ensure_present("token key", &token.key)?;
		ensure_present("token secret", &token.secret)?;

		if realm.trim().is_empty() {
			return Err(RelayConfigError::EmptyValue { field: "realm" });
		}

		let base_url = Url::parse(raw_url.trim())
			.map_err(|source| RelayConfigError::InvalidBaseUrl { source })?;

		if base_url.scheme() != "https" && !self.allow_insecure_upstream {
			return Err(RelayConfigError::InsecureBaseUrl { url: base_url.to_string() });
		}

		Ok(RelayConfig {
			consumer,
			token,
			realm,
			base_url,
			bind_address: self.bind_address,
			log_format: self.log_format,
		})
	}
}

fn ensure_present(field: &'static str, value: &Secret) -> Result<(), RelayConfigError> {
	if value.is_blank() { Err(RelayConfigError::EmptyValue { field }) } else { Ok(()) }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, RelayConfigError> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" => Ok(true),
		"false" | "0" | "no" | "" => Ok(false),
		_ => Err(RelayConfigError::InvalidFlag { name, value: raw.to_owned() }),
	}
}
