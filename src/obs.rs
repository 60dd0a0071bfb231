//! Observability helpers for relay calls.
//!
//! - Every forwarded call runs inside a span named `oauth1_relay.relay` with the `method` and
//!   `stage` fields.
//! - Enable `metrics` to increment the `oauth1_relay_request_total` counter for every
//!   attempt/success/failure, labeled by `method` + `outcome`.
//! - [`init_subscriber`] installs the `tracing-subscriber` formatter used by the binary.

mod metrics;
mod subscriber;
mod tracing;

pub use metrics::*;
pub use subscriber::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each relay call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelayOutcome {
	/// Entry to the relay.
	Attempt,
	/// Upstream answered with a 2xx status.
	Success,
	/// Signing, transport, or upstream failure propagated back to the caller.
	Failure,
}
impl RelayOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RelayOutcome::Attempt => "attempt",
			RelayOutcome::Success => "success",
			RelayOutcome::Failure => "failure",
		}
	}
}
impl Display for RelayOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
