// self
use crate::{_prelude::*, obs::FlowKind};

/// `oauth2_reddit.flow` span tagged with an operation and the call site.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens a span for `kind` at `stage`.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oauth2_reddit.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Runs a synchronous section inside the span.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Drives `fut` to completion with the span entered on every poll.
	pub async fn instrument<Fut>(&self, fut: Fut) -> Fut::Output
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			tracing::Instrument::instrument(fut, self.span.clone()).await
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut.await
		}
	}
}

/// Emits a debug event with the HTTP status an endpoint answered with.
pub fn record_http_status(endpoint: &'static str, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(endpoint, status, "Reddit endpoint responded.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (endpoint, status);
	}
}
