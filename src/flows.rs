//! Strategy entry points for the authorization code flow against Reddit.

pub mod authorize;
pub mod callback;
pub mod exchange;
pub mod profile;

pub use authorize::*;
pub use callback::*;

// crates.io
use oauth2::http::HeaderValue;
// self
use crate::{
	_prelude::*,
	auth::{Profile, TokenResult},
	config::{StrategyConfig, StrategyOptions},
	error::{BoxError, ConfigError},
	http::ProviderHttpClient,
	provider::{CredentialSigner, ProfileMapper, RedditBasicSigner, RedditProfileMapper},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Strategy specialized for the crate's default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestStrategy<V> = Strategy<V, ReqwestHttpClient>;

/// Future returned by [`Verify::verify`].
pub type VerifyFuture<'a, U> =
	Pin<Box<dyn Future<Output = Result<Option<U>, BoxError>> + 'a + Send>>;

/// Host callback that turns tokens and a profile into an application user.
///
/// Returning `Ok(None)` rejects the login without an error. Any async closure
/// `Fn(TokenResult, Profile) -> impl Future<Output = Result<Option<U>, BoxError>>`
/// implements this trait.
pub trait Verify
where
	Self: Send + Sync,
{
	/// Application user produced on success.
	type User: Send;

	/// Resolves the user for an authenticated Reddit account.
	fn verify(&self, tokens: TokenResult, profile: Profile) -> VerifyFuture<'_, Self::User>;
}
impl<F, Fut, U> Verify for F
where
	F: Send + Sync + Fn(TokenResult, Profile) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Option<U>, BoxError>>,
	U: Send,
{
	type User = U;

	fn verify(&self, tokens: TokenResult, profile: Profile) -> VerifyFuture<'_, Self::User> {
		Box::pin((self)(tokens, profile))
	}
}

/// Reddit OAuth 2.0 strategy.
///
/// Holds the normalized configuration, the HTTP transport, both pipeline policies, and the
/// host verify callback. Everything is shared through [`Arc`] so clones are cheap and each
/// operation runs independently of the others.
pub struct Strategy<V, C>
where
	C: ?Sized + ProviderHttpClient,
{
	config: Arc<StrategyConfig>,
	http_client: Arc<C>,
	signer: Arc<dyn CredentialSigner>,
	profile_mapper: Arc<dyn ProfileMapper>,
	verify: Arc<V>,
}
impl<V, C> Strategy<V, C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Creates a strategy that reuses the caller-provided transport.
	pub fn with_http_client(
		options: StrategyOptions,
		verify: V,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let config = StrategyConfig::try_from(options)?;

		Ok(Self {
			config: Arc::new(config),
			http_client: http_client.into(),
			signer: Arc::new(RedditBasicSigner),
			profile_mapper: Arc::new(RedditProfileMapper),
			verify: Arc::new(verify),
		})
	}

	/// Replaces the token request signing policy.
	pub fn with_signer(mut self, signer: impl 'static + CredentialSigner) -> Self {
		self.signer = Arc::new(signer);

		self
	}

	/// Replaces the profile mapping policy.
	pub fn with_profile_mapper(mut self, mapper: impl 'static + ProfileMapper) -> Self {
		self.profile_mapper = Arc::new(mapper);

		self
	}

	/// Effective configuration.
	pub fn config(&self) -> &StrategyConfig {
		&self.config
	}

	/// Provider label stamped on every profile.
	pub fn name(&self) -> &'static str {
		crate::provider::reddit::PROVIDER_NAME
	}

	fn user_agent(&self) -> Result<HeaderValue, ConfigError> {
		HeaderValue::try_from(self.config.user_agent.as_str())
			.map_err(|source| ConfigError::InvalidHeader { header: "user-agent", source })
	}
}
#[cfg(feature = "reqwest")]
impl<V> Strategy<V, ReqwestHttpClient> {
	/// Creates a strategy backed by a default reqwest client.
	pub fn new(options: StrategyOptions, verify: V) -> Result<Self> {
		Self::with_http_client(options, verify, ReqwestHttpClient::default())
	}
}
impl<V, C> Clone for Strategy<V, C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			config: Arc::clone(&self.config),
			http_client: Arc::clone(&self.http_client),
			signer: Arc::clone(&self.signer),
			profile_mapper: Arc::clone(&self.profile_mapper),
			verify: Arc::clone(&self.verify),
		}
	}
}
impl<V, C> Debug for Strategy<V, C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Strategy").field("name", &self.name()).field("config", &self.config).finish()
	}
}
