// self
use crate::{obs::RelayOutcome, relay::RelayMethod};

/// Records a relay outcome via the global metrics recorder (when enabled).
pub fn record_relay_outcome(method: RelayMethod, outcome: RelayOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_relay_request_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_relay_outcome_noop_without_recorder() {
		record_relay_outcome(RelayMethod::Post, RelayOutcome::Failure);
	}
}
