//! Thread-safe in-memory [`StateStore`] for single-process deployments and tests.

// self
use crate::{
	_prelude::*,
	store::{self, StateStore, StateVerdict, StoreError, StoreFuture},
};

type StateMap = Arc<Mutex<HashMap<String, OffsetDateTime>>>;

/// Keeps issued state values in-process until they are verified or expire.
#[derive(Clone, Debug)]
pub struct MemoryStateStore {
	states: StateMap,
	ttl: Duration,
}
impl MemoryStateStore {
	/// Time-to-live applied by [`MemoryStateStore::default`].
	pub const DEFAULT_TTL: Duration = Duration::minutes(10);

	/// Creates a store whose state values expire after `ttl`.
	pub fn with_ttl(ttl: Duration) -> Self {
		Self { states: Default::default(), ttl }
	}

	/// Number of outstanding (issued, unverified) state values.
	pub fn pending(&self) -> usize {
		self.states.lock().len()
	}

	fn issue_now(map: &StateMap, ttl: Duration, now: OffsetDateTime) -> String {
		let state = store::random_state();
		let mut guard = map.lock();

		guard.retain(|_, expires_at| *expires_at > now);
		guard.insert(state.clone(), now + ttl);

		state
	}

	fn verify_now(map: &StateMap, state: &str, now: OffsetDateTime) -> StateVerdict {
		match map.lock().remove(state) {
			Some(expires_at) if expires_at > now => StateVerdict::Valid,
			Some(_) => StateVerdict::Expired,
			None => StateVerdict::Unknown,
		}
	}
}
impl Default for MemoryStateStore {
	fn default() -> Self {
		Self::with_ttl(Self::DEFAULT_TTL)
	}
}
impl StateStore for MemoryStateStore {
	fn issue(&self) -> StoreFuture<'_, String> {
		Box::pin(async move {
			Ok::<_, StoreError>(Self::issue_now(&self.states, self.ttl, OffsetDateTime::now_utc()))
		})
	}

	fn verify<'a>(&'a self, state: &'a str) -> StoreFuture<'a, StateVerdict> {
		Box::pin(async move { Ok(Self::verify_now(&self.states, state, OffsetDateTime::now_utc())) })
	}
}
