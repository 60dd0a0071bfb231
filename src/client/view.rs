//! Customer directory view state: one list, one creation form, and a single status value.
//!
//! The loading, error, and success indicators live in one [`ViewStatus`] enum so at most
//! one of them is visible at a time.

// self
use crate::{
	_prelude::*,
	client::RelayClient,
	customer::{Customer, NewCustomer, SubsidiaryRef},
};

/// Heading rendered above a non-empty list.
pub const DIRECTORY_HEADING: &str = "Customers";
/// Text rendered while the initial load is in flight.
pub const LOADING_TEXT: &str = "Loading...";
/// Text rendered when the upstream returned no customers.
pub const EMPTY_TEXT: &str = "No customers available.";
/// Text rendered for a customer without links.
pub const NO_LINKS_TEXT: &str = "No Links Available";
/// Text rendered in place of the id for a record the upstream echoed without one.
pub const MISSING_ID_TEXT: &str = "-";
/// Message shown after a successful creation.
pub const CREATED_TEXT: &str = "Customer created successfully!";

/// Visible status of the directory; the variants are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewStatus {
	/// Initial load has not completed.
	Loading,
	/// Nothing to report.
	Idle,
	/// The last request failed with this message.
	Failed(String),
	/// The last creation succeeded with this message.
	Succeeded(String),
}

/// In-memory customer list plus the creation form bound to it.
#[derive(Clone, Debug)]
pub struct CustomerDirectory {
	customers: Vec<Customer>,
	form: NewCustomer,
	status: ViewStatus,
}
impl Default for CustomerDirectory {
	fn default() -> Self {
		Self::new()
	}
}
impl CustomerDirectory {
	/// Creates an empty directory in the loading state.
	pub fn new() -> Self {
		Self { customers: Vec::new(), form: NewCustomer::default(), status: ViewStatus::Loading }
	}

	/// Returns the customers currently held in memory.
	pub fn customers(&self) -> &[Customer] {
		&self.customers
	}

	/// Returns the current form values.
	pub fn form(&self) -> &NewCustomer {
		&self.form
	}

	/// Returns the visible status.
	pub fn status(&self) -> &ViewStatus {
		&self.status
	}

	/// Binds the company name field.
	pub fn set_company_name(&mut self, value: impl Into<String>) {
		self.form.company_name = value.into();
	}

	/// Binds the subsidiary field.
	pub fn set_subsidiary(&mut self, subsidiary: SubsidiaryRef) {
		self.form.subsidiary = subsidiary;
	}

	/// Issues the initial read and populates the list or the error state.
	pub async fn load(&mut self, client: &RelayClient) {
		self.status = ViewStatus::Loading;

		match client.list_customers().await {
			Ok(page) => {
				self.customers = page.into_items();
				self.status = ViewStatus::Idle;
			},
			Err(e) => {
				tracing::warn!(error = %e, "Failed to load customers.");

				self.status = ViewStatus::Failed(format!("Error fetching customers: {e}"));
			},
		}
	}

	/// Submits the form; on success appends the echoed record and resets the form.
	///
	/// A blank company name is rejected locally without calling the relay.
	pub async fn submit(&mut self, client: &RelayClient) {
		if self.form.company_name.trim().is_empty() {
			self.status = ViewStatus::Failed("Company name is required.".into());

			return;
		}

		match client.create_customer(&self.form).await {
			Ok(created) => {
				self.customers.push(created);
				self.form = NewCustomer::default();
				self.status = ViewStatus::Succeeded(CREATED_TEXT.into());
			},
			Err(e) => {
				tracing::warn!(error = %e, "Failed to create customer.");

				self.status = ViewStatus::Failed(format!("Error creating customer: {e}"));
			},
		}
	}

	/// Renders the directory as the lines a page would display.
	pub fn render(&self) -> String {
		match &self.status {
			ViewStatus::Loading => return LOADING_TEXT.into(),
			ViewStatus::Failed(message) => return message.clone(),
			ViewStatus::Idle | ViewStatus::Succeeded(_) => {},
		}

		if self.customers.is_empty() {
			return EMPTY_TEXT.into();
		}

		let mut lines = vec![DIRECTORY_HEADING.to_owned()];

		if let ViewStatus::Succeeded(message) = &self.status {
			lines.push(message.clone());
		}

		lines.extend(self.customers.iter().map(render_customer));

		lines.join("\n")
	}
}

fn render_customer(customer: &Customer) -> String {
	let id = customer.id().unwrap_or(MISSING_ID_TEXT);

	match customer.details_link() {
		Some(link) => format!("ID: {id} | Details ({})", link.href),
		None => format!("ID: {id} | {NO_LINKS_TEXT}"),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::customer::Link;

	#[test]
	fn new_directory_renders_loading() {
		assert_eq!(CustomerDirectory::new().render(), LOADING_TEXT);
	}

	#[test]
	fn customers_render_details_or_placeholder() {
		let directory = CustomerDirectory {
			customers: vec![
				Customer::with_id("1"),
				Customer {
					links: vec![Link {
						rel: "self".into(),
						href: "https://erp.example.com/customer/2".into(),
					}],
					..Customer::with_id("2")
				},
				Customer::default(),
			],
			form: NewCustomer::default(),
			status: ViewStatus::Idle,
		};

		assert_eq!(
			directory.render(),
			"Customers\n\
			 ID: 1 | No Links Available\n\
			 ID: 2 | Details (https://erp.example.com/customer/2)\n\
			 ID: - | No Links Available"
		);
	}

	#[test]
	fn failure_message_replaces_list() {
		let directory = CustomerDirectory {
			customers: vec![Customer::with_id("1")],
			form: NewCustomer::default(),
			status: ViewStatus::Failed(
				"Error creating customer: Error: 500 Internal Server Error".into(),
			),
		};

		assert_eq!(
			directory.render(),
			"Error creating customer: Error: 500 Internal Server Error"
		);
	}
}
