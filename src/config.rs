//! Caller-facing strategy options and their normalization into [`StrategyConfig`].
//!
//! [`StrategyOptions`] is what hosts build or deserialize from their own configuration
//! files; nothing here reads the environment. [`StrategyConfig::try_from`] runs once at
//! strategy construction: it rejects missing credentials, fills Reddit's default
//! endpoints, enforces the `identity` scope, and settles whether state is enabled.

// crates.io
use oauth2::{ClientId, ClientSecret};
// self
use crate::{
	_prelude::*,
	auth::{RequestedScope, ScopeInput},
	error::ConfigError,
	provider::reddit,
	store::StateStore,
};

/// `User-Agent` sent when the caller does not configure one.
pub const DEFAULT_USER_AGENT: &str = concat!("oauth2-reddit/", env!("CARGO_PKG_VERSION"));

/// Raw strategy options as supplied by the host.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
	/// Reddit application client id.
	pub client_id: Option<String>,
	/// Reddit application client secret.
	pub client_secret: Option<String>,
	/// Redirect URI registered with the Reddit application.
	pub callback_url: Option<Url>,
	/// Authorization endpoint override.
	pub authorization_url: Option<Url>,
	/// Token endpoint override.
	pub token_url: Option<Url>,
	/// Profile endpoint override.
	pub user_profile_url: Option<Url>,
	/// Requested scope, as a list or a comma-delimited string.
	pub scope: Option<ScopeInput>,
	/// Scope separator; ignored for list scopes, which always use `,`.
	pub scope_separator: Option<char>,
	/// Explicit state toggle.
	pub state: Option<bool>,
	/// External store that issues and verifies state values.
	#[serde(skip)]
	pub state_store: Option<Arc<dyn StateStore>>,
	/// `User-Agent` header; Reddit throttles generic agents.
	pub user_agent: Option<String>,
}
impl StrategyOptions {
	/// Starts options with the required credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: Some(client_id.into()),
			client_secret: Some(client_secret.into()),
			..Default::default()
		}
	}

	/// Sets the redirect URI.
	pub fn callback_url(mut self, url: Url) -> Self {
		self.callback_url = Some(url);

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: Url) -> Self {
		self.authorization_url = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Overrides the profile endpoint.
	pub fn user_profile_url(mut self, url: Url) -> Self {
		self.user_profile_url = Some(url);

		self
	}

	/// Sets the requested scope.
	pub fn scope(mut self, scope: impl Into<ScopeInput>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Sets the scope separator.
	pub fn scope_separator(mut self, separator: char) -> Self {
		self.scope_separator = Some(separator);

		self
	}

	/// Enables or disables state explicitly.
	pub fn state(mut self, enabled: bool) -> Self {
		self.state = Some(enabled);

		self
	}

	/// Delegates state issuance and verification to `store`.
	pub fn state_store(mut self, store: Arc<dyn StateStore>) -> Self {
		self.state_store = Some(store);

		self
	}

	/// Sets the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}
}
impl Debug for StrategyOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyOptions")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("callback_url", &self.callback_url)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("user_profile_url", &self.user_profile_url)
			.field("scope", &self.scope)
			.field("scope_separator", &self.scope_separator)
			.field("state", &self.state)
			.field("state_store_set", &self.state_store.is_some())
			.field("user_agent", &self.user_agent)
			.finish()
	}
}

/// Effective, immutable strategy configuration.
#[derive(Clone)]
pub struct StrategyConfig {
	/// Reddit application client id.
	pub client_id: ClientId,
	/// Reddit application client secret; redacted by its formatter.
	pub client_secret: ClientSecret,
	/// Redirect URI, sent on authorization and code exchange when configured.
	pub callback_url: Option<Url>,
	/// Authorization endpoint.
	pub authorization_url: Url,
	/// Token endpoint.
	pub token_url: Url,
	/// Profile endpoint.
	pub user_profile_url: Url,
	/// Normalized scope, always including `identity`.
	pub scope: RequestedScope,
	/// Whether authorizations carry and verify a `state` value.
	pub state_enabled: bool,
	/// External state store, when the host supplied one.
	pub state_store: Option<Arc<dyn StateStore>>,
	/// `User-Agent` header attached to every outbound request.
	pub user_agent: String,
}
impl StrategyConfig {
	/// Normalized scope string.
	pub fn scope(&self) -> &str {
		self.scope.as_str()
	}

	/// Separator recorded for the scope.
	pub fn scope_separator(&self) -> char {
		self.scope.separator()
	}
}
impl TryFrom<StrategyOptions> for StrategyConfig {
	type Error = ConfigError;

	fn try_from(options: StrategyOptions) -> Result<Self, Self::Error> {
		let client_id = options
			.client_id
			.filter(|value| !value.is_empty())
			.ok_or(ConfigError::MissingClientId)?;
		let client_secret = options
			.client_secret
			.filter(|value| !value.is_empty())
			.ok_or(ConfigError::MissingClientSecret)?;
		let state_enabled = match (options.state, &options.state_store) {
			(Some(enabled), _) => enabled,
			(None, Some(_)) => false,
			(None, None) => true,
		};

		Ok(Self {
			client_id: ClientId::new(client_id),
			client_secret: ClientSecret::new(client_secret),
			callback_url: options.callback_url,
			authorization_url: endpoint_or_default(
				"authorization",
				options.authorization_url,
				reddit::AUTHORIZATION_URL,
			)?,
			token_url: endpoint_or_default("token", options.token_url, reddit::TOKEN_URL)?,
			user_profile_url: endpoint_or_default(
				"user_profile",
				options.user_profile_url,
				reddit::USER_PROFILE_URL,
			)?,
			scope: RequestedScope::normalize(options.scope, options.scope_separator),
			state_enabled,
			state_store: options.state_store,
			user_agent: options.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
		})
	}
}
impl Debug for StrategyConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("callback_url", &self.callback_url)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("user_profile_url", &self.user_profile_url)
			.field("scope", &self.scope)
			.field("state_enabled", &self.state_enabled)
			.field("state_store_set", &self.state_store.is_some())
			.field("user_agent", &self.user_agent)
			.finish()
	}
}

fn endpoint_or_default(
	endpoint: &'static str,
	configured: Option<Url>,
	default: &str,
) -> Result<Url, ConfigError> {
	match configured {
		Some(url) => Ok(url),
		None =>
			Url::parse(default).map_err(|source| ConfigError::InvalidEndpoint { endpoint, source }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::MemoryStateStore;

	fn config(options: StrategyOptions) -> StrategyConfig {
		StrategyConfig::try_from(options).expect("Options fixture should normalize.")
	}

	#[test]
	fn defaults_point_at_reddit() {
		let config = config(StrategyOptions::new("ABC123", "secret"));

		assert_eq!(config.authorization_url.as_str(), reddit::AUTHORIZATION_URL);
		assert_eq!(config.token_url.as_str(), reddit::TOKEN_URL);
		assert_eq!(config.user_profile_url.as_str(), reddit::USER_PROFILE_URL);
		assert_eq!(config.scope(), "identity");
		assert!(config.state_enabled);
		assert!(config.callback_url.is_none());
		assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
	}

	#[test]
	fn missing_credentials_are_rejected() {
		let err = StrategyConfig::try_from(StrategyOptions {
			client_secret: Some("secret".into()),
			..Default::default()
		})
		.expect_err("Missing client_id must be rejected.");

		assert!(matches!(err, ConfigError::MissingClientId));

		let err = StrategyConfig::try_from(StrategyOptions::new("ABC123", ""))
			.expect_err("Empty client_secret must be rejected.");

		assert!(matches!(err, ConfigError::MissingClientSecret));
	}

	#[test]
	fn scope_options_are_normalized() {
		let listed = config(StrategyOptions::new("ABC123", "secret").scope(["one", "two", "five"]));

		assert!(listed.scope.contains("identity"));
		assert_eq!(listed.scope_separator(), ',');

		let delimited = config(StrategyOptions::new("ABC123", "secret").scope("one,two,,,five"));

		assert_eq!(delimited.scope(), "identity,one,two,five");
	}

	#[test]
	fn state_defaults_follow_flag_and_store() {
		let explicit_off = config(StrategyOptions::new("ABC123", "secret").state(false));
		let with_store = config(
			StrategyOptions::new("ABC123", "secret")
				.state_store(Arc::new(MemoryStateStore::default())),
		);
		let store_and_flag = config(
			StrategyOptions::new("ABC123", "secret")
				.state(true)
				.state_store(Arc::new(MemoryStateStore::default())),
		);

		assert!(!explicit_off.state_enabled);
		assert!(!with_store.state_enabled);
		assert!(with_store.state_store.is_some());
		assert!(store_and_flag.state_enabled);
	}

	#[test]
	fn options_deserialize_from_host_configuration() {
		let options: StrategyOptions = serde_json::from_str(
			r#"{
				"client_id": "ABC123",
				"client_secret": "secret",
				"callback_url": "https://app.example.com/auth/reddit/callback",
				"scope": ["read", "history"],
				"state": false
			}"#,
		)
		.expect("Options JSON should deserialize.");
		let config = config(options);

		assert_eq!(config.scope(), "read,history,identity");
		assert!(!config.state_enabled);
		assert_eq!(
			config.callback_url.as_ref().map(Url::as_str),
			Some("https://app.example.com/auth/reddit/callback")
		);
	}

	#[test]
	fn debug_output_redacts_client_secret() {
		let config = config(StrategyOptions::new("ABC123", "very-secret-value"));
		let rendered = format!("{config:?}");

		assert!(!rendered.contains("very-secret-value"));
		assert!(rendered.contains("ABC123"));
	}
}
