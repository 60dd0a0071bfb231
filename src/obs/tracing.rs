// crates.io
use tracing::{Instrument, instrument::Instrumented};
// self
use crate::{_prelude::*, relay::RelayMethod};

/// A span builder used by the relay.
#[derive(Clone, Debug)]
pub struct RelaySpan {
	span: tracing::Span,
}
impl RelaySpan {
	/// Creates a new span tagged with the relayed method + stage.
	pub fn new(method: RelayMethod, stage: &'static str) -> Self {
		Self { span: tracing::info_span!("oauth1_relay.relay", method = method.as_str(), stage) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}
