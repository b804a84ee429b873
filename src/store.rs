//! State store contracts and the built-in in-memory implementation.
//!
//! A state value is issued when the authorize URL is built and verified once when the
//! callback arrives. Hosts that keep state in their own session layer can skip the store
//! entirely and pass the expected value with the callback instead.

pub mod memory;

pub use memory::MemoryStateStore;

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

/// Length of generated state values.
pub const STATE_LEN: usize = 32;

/// Future returned by [`StateStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Backend that issues and verifies authorization `state` values.
pub trait StateStore
where
	Self: Send + Sync,
{
	/// Issues a fresh state value and remembers it for verification.
	fn issue(&self) -> StoreFuture<'_, String>;

	/// Verifies (and consumes) a state value returned on the callback.
	fn verify<'a>(&'a self, state: &'a str) -> StoreFuture<'a, StateVerdict>;
}

/// Result of verifying a returned state value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateVerdict {
	/// The value was issued by the store and is still fresh.
	Valid,
	/// The value was never issued or has already been consumed.
	Unknown,
	/// The value was issued but outlived the store's time-to-live.
	Expired,
}
impl StateVerdict {
	/// Returns true only for [`StateVerdict::Valid`].
	pub fn is_valid(self) -> bool {
		matches!(self, Self::Valid)
	}
}

/// Error type produced by [`StateStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("State store backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Generates a random alphanumeric state value of [`STATE_LEN`] characters.
pub fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_strategy_error_with_source() {
		let store_error = StoreError::Backend { message: "redis unreachable".into() };
		let err: Error = store_error.clone().into();

		assert!(matches!(err, Error::State(_)));
		assert!(err.to_string().contains("redis unreachable"));

		let source = StdError::source(&err)
			.expect("Strategy error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn random_state_is_alphanumeric_and_unique() {
		let first = random_state();
		let second = random_state();

		assert_eq!(first.len(), STATE_LEN);
		assert!(first.chars().all(|ch| ch.is_ascii_alphanumeric()));
		assert_ne!(first, second);
	}
}
