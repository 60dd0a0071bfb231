//! Customer records owned by the upstream ERP system.
//!
//! The relay never inspects these shapes; they exist for [`crate::client`] and for tests that
//! stand in for the upstream system.

// crates.io
use serde_json::{Map, Value};
// self
use crate::_prelude::*;

/// Hyperlink descriptor attached to an upstream record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
	/// Relation name, e.g. `self`.
	pub rel: String,
	/// Absolute URL of the linked resource.
	pub href: String,
}

/// Upstream customer record.
///
/// Creation echoes are not guaranteed to carry an `id`, so the id is optional and any other
/// field is kept in [`Customer::fields`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
	/// Opaque upstream identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Links published by the upstream; the first one is treated as the details link.
	#[serde(default)]
	pub links: Vec<Link>,
	/// Remaining fields of the record, e.g. `companyName`.
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}
impl Customer {
	/// Creates a record with the given id and no links.
	pub fn with_id(id: impl Into<String>) -> Self {
		Self { id: Some(id.into()), ..Default::default() }
	}

	/// Returns the upstream id, if the record carries one.
	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	/// Returns the link used to open the record's details, if any.
	pub fn details_link(&self) -> Option<&Link> {
		self.links.first()
	}
}

/// One page of customers as returned by the upstream list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
	/// Records on this page; absent in some upstream responses.
	#[serde(default)]
	pub items: Option<Vec<Customer>>,
	/// Number of records on this page.
	#[serde(default)]
	pub count: Option<u64>,
	/// Whether another page follows.
	#[serde(default)]
	pub has_more: Option<bool>,
	/// Offset of the first record.
	#[serde(default)]
	pub offset: Option<u64>,
	/// Total number of matching records.
	#[serde(default)]
	pub total_results: Option<u64>,
}
impl CustomerPage {
	/// Consumes the page, treating a missing `items` field as an empty list.
	pub fn into_items(self) -> Vec<Customer> {
		self.items.unwrap_or_default()
	}
}

/// Reference to the subsidiary a new customer belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsidiaryRef {
	/// Upstream subsidiary id.
	pub id: String,
	/// Display name of the subsidiary.
	pub ref_name: String,
}
impl Default for SubsidiaryRef {
	fn default() -> Self {
		Self { id: "1".into(), ref_name: String::new() }
	}
}

/// Creation payload sent verbatim to the upstream system.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
	/// Company name; the only field the form requires.
	pub company_name: String,
	/// Owning subsidiary.
	pub subsidiary: SubsidiaryRef,
}
