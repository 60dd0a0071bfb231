//! Protocol parameters and the signature base string.

// crates.io
use http::Method;
// self
use crate::{_prelude::*, auth::Secret, oauth::percent_encode};

/// Protocol version sent as `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Signature algorithms understood by the signer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SignatureMethod {
	/// HMAC with SHA-256, the only method the upstream accepts for token-based auth.
	#[default]
	HmacSha256,
}
impl SignatureMethod {
	/// Returns the wire label sent as `oauth_signature_method`.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha256 => "HMAC-SHA256",
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// The `oauth_*` parameters that accompany one signed request, minus the signature.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthParameters {
	/// `oauth_consumer_key`.
	pub consumer_key: Secret,
	/// `oauth_nonce`.
	pub nonce: String,
	/// `oauth_signature_method`.
	pub signature_method: SignatureMethod,
	/// `oauth_timestamp`, in Unix seconds.
	pub timestamp: i64,
	/// `oauth_token`.
	pub token: Secret,
}
impl OAuthParameters {
	/// Returns `(name, value)` pairs in lexical key order.
	///
	/// Values are raw (not yet percent-encoded) and include secret-bearing keys, so the
	/// result must never be logged.
	pub fn pairs(&self) -> [(&'static str, String); 6] {
		[
			("oauth_consumer_key", self.consumer_key.expose().to_owned()),
			("oauth_nonce", self.nonce.clone()),
			("oauth_signature_method", self.signature_method.as_str().to_owned()),
			("oauth_timestamp", self.timestamp.to_string()),
			("oauth_token", self.token.expose().to_owned()),
			("oauth_version", OAUTH_VERSION.to_owned()),
		]
	}
}
impl Debug for OAuthParameters {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthParameters")
			.field("consumer_key", &self.consumer_key)
			.field("nonce", &self.nonce)
			.field("signature_method", &self.signature_method)
			.field("timestamp", &self.timestamp)
			.field("token", &self.token)
			.field("version", &OAUTH_VERSION)
			.finish()
	}
}

/// Computes the base string URI: scheme, host, non-default port, and path.
pub fn base_uri(url: &Url) -> String {
	let mut out = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());

	if let Some(port) = url.port() {
		out.push(':');
		out.push_str(&port.to_string());
	}

	out.push_str(url.path());

	out
}

/// Builds the signature base string for `method` + `url` + `params`.
///
/// Query pairs on `url` take part in the signature alongside the protocol parameters; the
/// request body does not, since the relay only forwards JSON.
pub fn signature_base_string(method: &Method, url: &Url, params: &OAuthParameters) -> String {
	let mut normalized = params
		.pairs()
		.into_iter()
		.map(|(key, value)| (percent_encode(key), percent_encode(&value)))
		.chain(url.query_pairs().map(|(key, value)| (percent_encode(&key), percent_encode(&value))))
		.collect::<Vec<_>>();

	normalized.sort();

	let joined = normalized
		.into_iter()
		.map(|(key, value)| format!("{key}={value}"))
		.collect::<Vec<_>>()
		.join("&");

	format!(
		"{}&{}&{}",
		method.as_str().to_ascii_uppercase(),
		percent_encode(&base_uri(url)),
		percent_encode(&joined)
	)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn params() -> OAuthParameters {
		OAuthParameters {
			consumer_key: Secret::new("consumer-key"),
			nonce: "abcdef0123456789abcdef0123456789".into(),
			signature_method: SignatureMethod::HmacSha256,
			timestamp: 1_700_000_000,
			token: Secret::new("token-key"),
		}
	}

	#[test]
	fn base_uri_drops_query_fragment_and_default_port() {
		let url = Url::parse("HTTPS://Example.COM:443/services/rest?limit=5#top")
			.expect("Test URL should parse.");

		assert_eq!(base_uri(&url), "https://example.com/services/rest");

		let url = Url::parse("http://127.0.0.1:8080/customer").expect("Test URL should parse.");

		assert_eq!(base_uri(&url), "http://127.0.0.1:8080/customer");
	}

	#[test]
	fn base_string_matches_reference_vector() {
		let url = Url::parse(
			"https://1234567-sb1.suitetalk.api.netsuite.com/services/rest/record/v1/customer",
		)
		.expect("Test URL should parse.");

		assert_eq!(
			signature_base_string(&Method::GET, &url, &params()),
			"GET&https%3A%2F%2F1234567-sb1.suitetalk.api.netsuite.com%2Fservices%2Frest%2Frecord%2Fv1%2Fcustomer&oauth_consumer_key%3Dconsumer-key%26oauth_nonce%3Dabcdef0123456789abcdef0123456789%26oauth_signature_method%3DHMAC-SHA256%26oauth_timestamp%3D1700000000%26oauth_token%3Dtoken-key%26oauth_version%3D1.0"
		);
	}

	#[test]
	fn query_pairs_are_decoded_then_reencoded_and_sorted() {
		let url = Url::parse(
			"https://1234567-sb1.suitetalk.api.netsuite.com/services/rest/record/v1/customer?q=companyName%20CONTAIN%20%22Acme%20Co%22&limit=5",
		)
		.expect("Test URL should parse.");
		let base = signature_base_string(&Method::GET, &url, &params());

		assert!(base.contains("&limit%3D5%26oauth_consumer_key%3D"));
		assert!(base.ends_with(
			"oauth_version%3D1.0%26q%3DcompanyName%2520CONTAIN%2520%2522Acme%2520Co%2522"
		));
	}

	#[test]
	fn debug_redacts_key_and_token() {
		let rendered = format!("{:?}", params());

		assert!(!rendered.contains("consumer-key"));
		assert!(!rendered.contains("token-key"));
		assert!(rendered.contains("abcdef0123456789abcdef0123456789"));
	}
}
