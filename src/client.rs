//! Caller-side helpers for the relay endpoint: a typed HTTP client and the customer
//! directory view state built on top of it.

pub mod view;

pub use view::*;

// crates.io
use reqwest::{RequestBuilder, header::CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	customer::{Customer, CustomerPage, NewCustomer},
	error::{ClientError, TransportError},
	relay::JSON_CONTENT_TYPE,
};

/// Talks to a running relay over plain HTTP.
#[derive(Clone, Debug)]
pub struct RelayClient {
	http_client: ReqwestClient,
	endpoint: Url,
}
impl RelayClient {
	/// Creates a client for the relay endpoint at `endpoint`, e.g.
	/// `http://127.0.0.1:3000/api/customers`.
	pub fn new(endpoint: Url) -> Self {
		Self::with_client(ReqwestClient::default(), endpoint)
	}

	/// Creates a client that reuses an existing reqwest [`ReqwestClient`].
	pub fn with_client(http_client: ReqwestClient, endpoint: Url) -> Self {
		Self { http_client, endpoint }
	}

	/// Returns the relay endpoint this client calls.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Fetches the current page of customers.
	pub async fn list_customers(&self) -> Result<CustomerPage, ClientError> {
		let body = self.send(self.http_client.get(self.endpoint.clone())).await?;

		Ok(serde_json::from_slice(&body)?)
	}

	/// Creates a customer and returns the record echoed by the upstream.
	///
	/// A 2xx response with an empty body (e.g. `204 No Content`) still means the record was
	/// created; the submitted payload is returned in its place, without an id.
	pub async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ClientError> {
		let payload = serde_json::to_vec(customer)?;
		let body = self
			.send(
				self.http_client
					.post(self.endpoint.clone())
					.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
					.body(payload.clone()),
			)
			.await?;
		let echoed = if body.trim_ascii().is_empty() { &payload } else { &body };

		Ok(serde_json::from_slice(echoed)?)
	}

	async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
		let response = request.send().await.map_err(TransportError::from)?;
		let status = response.status();

		if !status.is_success() {
			return Err(ClientError::Status {
				status: status.as_u16(),
				status_text: status.canonical_reason().unwrap_or_default().into(),
			});
		}

		Ok(response.bytes().await.map_err(TransportError::from)?.to_vec())
	}
}
