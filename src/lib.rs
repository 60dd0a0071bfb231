//! OAuth 1.0a signing relay: sign inbound GET/POST calls with HMAC-SHA256 and forward them to a
//! single upstream ERP REST endpoint, relaying its status and JSON body verbatim.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
#[cfg(feature = "reqwest")] pub mod client;
pub mod config;
pub mod customer;
pub mod error;
pub mod ext;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod relay;
pub mod server;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{ConsumerCredentials, TokenCredentials},
		config::RelayConfig,
		relay::ReqwestRelay,
	};

	/// Consumer key shared by integration tests.
	pub const TEST_CONSUMER_KEY: &str = "consumer-key";
	/// Consumer secret shared by integration tests.
	pub const TEST_CONSUMER_SECRET: &str = "consumer-secret";
	/// Access token key shared by integration tests.
	pub const TEST_TOKEN_KEY: &str = "token-key";
	/// Access token secret shared by integration tests.
	pub const TEST_TOKEN_SECRET: &str = "token-secret";
	/// Realm shared by integration tests.
	pub const TEST_REALM: &str = "1234567_SB1";

	/// Builds a relay configuration that points at a plain-HTTP mock upstream.
	pub fn test_relay_config(base_url: &str) -> RelayConfig {
		RelayConfig::builder()
			.consumer(ConsumerCredentials::new(TEST_CONSUMER_KEY, TEST_CONSUMER_SECRET))
			.token(TokenCredentials::new(TEST_TOKEN_KEY, TEST_TOKEN_SECRET))
			.realm(TEST_REALM)
			.base_url(base_url)
			.allow_insecure_upstream(true)
			.build()
			.expect("Test relay configuration should build successfully.")
	}

	/// Constructs a reqwest-backed [`ReqwestRelay`] against the provided mock upstream URL.
	pub fn build_reqwest_test_relay(base_url: &str) -> ReqwestRelay {
		ReqwestRelay::new(Arc::new(test_relay_config(base_url)))
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
use color_eyre as _;
#[cfg(test)] use {httpmock as _, tower as _};
