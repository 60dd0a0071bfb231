//! `oauth1-relay` server binary: load the environment configuration once, install logging,
//! and serve the signing relay until Ctrl-C.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use tokio::net::TcpListener;
// self
use oauth1_relay::{
	config::RelayConfig,
	http::ReqwestHttpClient,
	obs,
	relay::ReqwestRelay,
	server::{self, PROXY_PATH},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = Arc::new(RelayConfig::from_env()?);

	obs::init_subscriber(config.log_format);

	let relay =
		Arc::new(ReqwestRelay::with_http_client(config.clone(), ReqwestHttpClient::build()?));
	let listener = TcpListener::bind(config.bind_address).await?;

	tracing::info!(
		bind_address = %config.bind_address,
		path = PROXY_PATH,
		upstream = %config.base_url,
		realm = %config.realm,
		"Relay listening."
	);

	server::serve(relay, listener, server::shutdown_signal()).await?;

	tracing::info!("Relay stopped.");

	Ok(())
}
