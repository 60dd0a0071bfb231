//! Consumer and access-token key/secret pairs used to sign upstream requests.

// self
use crate::{_prelude::*, auth::Secret};

/// Consumer (integration) key and secret issued by the upstream system.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerCredentials {
	/// Public consumer key, sent as `oauth_consumer_key`.
	pub key: Secret,
	/// Consumer secret, the first half of the HMAC signing key.
	pub secret: Secret,
}
impl ConsumerCredentials {
	/// Pairs a consumer key with its secret.
	pub fn new(key: impl Into<Secret>, secret: impl Into<Secret>) -> Self {
		Self { key: key.into(), secret: secret.into() }
	}
}
impl Debug for ConsumerCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConsumerCredentials")
			.field("key", &self.key)
			.field("secret", &self.secret)
			.finish()
	}
}

/// Access token key and secret bound to the upstream user/role.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCredentials {
	/// Token key, sent as `oauth_token`.
	pub key: Secret,
	/// Token secret, the second half of the HMAC signing key.
	pub secret: Secret,
}
impl TokenCredentials {
	/// Pairs a token key with its secret.
	pub fn new(key: impl Into<Secret>, secret: impl Into<Secret>) -> Self {
		Self { key: key.into(), secret: secret.into() }
	}
}
impl Debug for TokenCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCredentials")
			.field("key", &self.key)
			.field("secret", &self.secret)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credential_debug_never_prints_material() {
		let consumer = ConsumerCredentials::new("ck-visible", "cs-visible");
		let token = TokenCredentials::new("tk-visible", "ts-visible");
		let rendered = format!("{consumer:?} {token:?}");

		assert!(!rendered.contains("visible"));
		assert!(rendered.contains("<redacted>"));
	}
}
