//! OAuth 1.0a request signing (RFC 5849) with HMAC-SHA256 and a realm-prefixed header.
//!
//! [`OAuthSigner`] owns the consumer and token credential pairs and produces one
//! [`AuthorizationHeader`] per outbound request. The realm is prepended to the header but
//! never takes part in the signature, which is what the upstream's authorization check
//! expects.

mod encode;
mod params;

pub use encode::*;
pub use params::*;

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use http::{HeaderValue, Method, Request, header::AUTHORIZATION};
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{ConsumerCredentials, Secret, TokenCredentials},
	config::RelayConfig,
	error::ConfigError,
	ext::RequestSignerExt,
};

/// Length of the random `oauth_nonce`.
pub const NONCE_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Signs outbound requests with a fixed consumer/token pair and realm.
#[derive(Clone, Debug)]
pub struct OAuthSigner {
	consumer: ConsumerCredentials,
	token: TokenCredentials,
	realm: String,
	signature_method: SignatureMethod,
}
impl OAuthSigner {
	/// Creates a signer using HMAC-SHA256.
	pub fn new(
		consumer: ConsumerCredentials,
		token: TokenCredentials,
		realm: impl Into<String>,
	) -> Self {
		Self { consumer, token, realm: realm.into(), signature_method: SignatureMethod::HmacSha256 }
	}

	/// Creates a signer from the relay configuration.
	pub fn from_config(config: &RelayConfig) -> Self {
		Self::new(config.consumer.clone(), config.token.clone(), config.realm.clone())
	}

	/// Returns the realm prefixed to every header.
	pub fn realm(&self) -> &str {
		&self.realm
	}

	/// Signs `method` + `url` with a fresh nonce and the current time.
	pub fn sign(&self, method: &Method, url: &Url) -> Result<AuthorizationHeader> {
		self.sign_with(method, url, generate_nonce(), OffsetDateTime::now_utc().unix_timestamp())
	}

	/// Signs `method` + `url` with a caller-chosen nonce and timestamp.
	pub fn sign_with(
		&self,
		method: &Method,
		url: &Url,
		nonce: impl Into<String>,
		timestamp: i64,
	) -> Result<AuthorizationHeader> {
		let params = OAuthParameters {
			consumer_key: self.consumer.key.clone(),
			nonce: nonce.into(),
			signature_method: self.signature_method,
			timestamp,
			token: self.token.key.clone(),
		};
		let base_string = signature_base_string(method, url, &params);
		let signature = self.compute_signature(&base_string)?;

		Ok(AuthorizationHeader { realm: self.realm.clone(), params, signature })
	}

	fn compute_signature(&self, base_string: &str) -> Result<Secret> {
		let key = format!(
			"{}&{}",
			percent_encode(self.consumer.secret.expose()),
			percent_encode(self.token.secret.expose())
		);

		match self.signature_method {
			SignatureMethod::HmacSha256 => {
				let mut mac = HmacSha256::new_from_slice(key.as_bytes())
					.map_err(|_| ConfigError::InvalidSigningKey)?;

				mac.update(base_string.as_bytes());

				Ok(Secret::new(STANDARD.encode(mac.finalize().into_bytes())))
			},
		}
	}
}
impl RequestSignerExt<Request<Vec<u8>>, Error> for OAuthSigner {
	fn sign_request(&self, mut request: Request<Vec<u8>>) -> Result<Request<Vec<u8>>> {
		let url = Url::parse(&request.uri().to_string())
			.map_err(|source| ConfigError::InvalidRequestUri { source })?;
		let header = self.sign(request.method(), &url)?;

		tracing::debug!(authorization = ?header, "Signed upstream request.");

		request.headers_mut().insert(AUTHORIZATION, header.to_header_value()?);

		Ok(request)
	}
}

/// A computed `Authorization: OAuth realm="…", …` header.
///
/// The `Debug` impl redacts the consumer key, token, and signature so the header can be
/// logged safely; use [`AuthorizationHeader::expose`] to obtain the wire value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
	/// Realm prefixed ahead of the protocol parameters.
	pub realm: String,
	/// Protocol parameters that were signed.
	pub params: OAuthParameters,
	/// Base64 HMAC signature.
	pub signature: Secret,
}
impl AuthorizationHeader {
	/// Renders the full header value, including secret-bearing parameters.
	pub fn expose(&self) -> String {
		let mut pairs = self.params.pairs().to_vec();

		pairs.push(("oauth_signature", self.signature.expose().to_owned()));
		pairs.sort_by(|a, b| a.0.cmp(b.0));

		let rendered = pairs
			.into_iter()
			.map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(&value)))
			.collect::<Vec<_>>()
			.join(", ");

		format!("OAuth realm=\"{}\", {rendered}", self.realm)
	}

	/// Converts the header into an HTTP header value marked as sensitive.
	pub fn to_header_value(&self) -> Result<HeaderValue> {
		let mut value = HeaderValue::from_str(&self.expose()).map_err(ConfigError::from)?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl Debug for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationHeader")
			.field("realm", &self.realm)
			.field("params", &self.params)
			.field("signature", &self.signature)
			.finish()
	}
}

fn generate_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const NONCE: &str = "abcdef0123456789abcdef0123456789";
	const TIMESTAMP: i64 = 1_700_000_000;
	const CUSTOMER_URL: &str =
		"https://1234567-sb1.suitetalk.api.netsuite.com/services/rest/record/v1/customer";

	fn signer() -> OAuthSigner {
		OAuthSigner::new(
			ConsumerCredentials::new("consumer-key", "consumer-secret"),
			TokenCredentials::new("token-key", "token-secret"),
			"1234567_SB1",
		)
	}

	fn url(raw: &str) -> Url {
		Url::parse(raw).expect("Test URL should parse.")
	}

	#[test]
	fn get_signature_matches_reference_vector() {
		let header = signer()
			.sign_with(&Method::GET, &url(CUSTOMER_URL), NONCE, TIMESTAMP)
			.expect("Signing should succeed.");

		assert_eq!(header.signature.expose(), "60kSvp8nMBVMDEdtVNWKN+HPzvl/10+vS/GDcoZVLJU=");
	}

	#[test]
	fn post_signature_differs_by_method() {
		let header = signer()
			.sign_with(&Method::POST, &url(CUSTOMER_URL), NONCE, TIMESTAMP)
			.expect("Signing should succeed.");

		assert_eq!(header.signature.expose(), "2Yph3HbGoZKTfEaoNcEqgbY9QnwTnHOHAwzD3nh/JUQ=");
	}

	#[test]
	fn query_parameters_take_part_in_signature() {
		let header = signer()
			.sign_with(
				&Method::GET,
				&url(&format!("{CUSTOMER_URL}?limit=5&q=companyName%20CONTAIN%20%22Acme%20Co%22")),
				NONCE,
				TIMESTAMP,
			)
			.expect("Signing should succeed.");

		assert_eq!(header.signature.expose(), "a0Mgmj62JWSRWq2XOMcHwTxMCOmXH7jT0pRaPLmCMPU=");
	}

	#[test]
	fn header_is_realm_prefixed_and_key_ordered() {
		let header = signer()
			.sign_with(&Method::GET, &url(CUSTOMER_URL), NONCE, TIMESTAMP)
			.expect("Signing should succeed.");

		assert_eq!(
			header.expose(),
			"OAuth realm=\"1234567_SB1\", oauth_consumer_key=\"consumer-key\", \
			 oauth_nonce=\"abcdef0123456789abcdef0123456789\", \
			 oauth_signature=\"60kSvp8nMBVMDEdtVNWKN%2BHPzvl%2F10%2BvS%2FGDcoZVLJU%3D\", \
			 oauth_signature_method=\"HMAC-SHA256\", oauth_timestamp=\"1700000000\", \
			 oauth_token=\"token-key\", oauth_version=\"1.0\""
		);
	}

	#[test]
	fn fresh_signatures_use_random_nonces() {
		let signer = signer();
		let first = signer.sign(&Method::GET, &url(CUSTOMER_URL)).expect("Signing should succeed.");
		let second =
			signer.sign(&Method::GET, &url(CUSTOMER_URL)).expect("Signing should succeed.");

		assert_eq!(first.params.nonce.len(), NONCE_LEN);
		assert!(first.params.nonce.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first.params.nonce, second.params.nonce);
	}

	#[test]
	fn header_debug_redacts_secret_material() {
		let header = signer()
			.sign_with(&Method::GET, &url(CUSTOMER_URL), NONCE, TIMESTAMP)
			.expect("Signing should succeed.");
		let rendered = format!("{header:?}");

		assert!(rendered.contains("1234567_SB1"));
		assert!(!rendered.contains("consumer-key"));
		assert!(!rendered.contains("token-key"));
		assert!(!rendered.contains("60kSvp8n"));
	}

	#[test]
	fn sign_request_attaches_sensitive_authorization_header() {
		let request = Request::builder()
			.method(Method::POST)
			.uri(CUSTOMER_URL)
			.body(b"{}".to_vec())
			.expect("Request should build.");
		let signed = signer().sign_request(request).expect("Signing should succeed.");
		let value = signed.headers().get(AUTHORIZATION).expect("Authorization header is set.");

		assert!(value.is_sensitive());
		assert!(
			value
				.to_str()
				.expect("Header should be ASCII.")
				.starts_with("OAuth realm=\"1234567_SB1\", oauth_consumer_key=\"consumer-key\"")
		);
		assert_eq!(signed.body(), b"{}");
	}
}
