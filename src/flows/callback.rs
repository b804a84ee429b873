//! Callback pipeline: provider error, state check, code exchange, profile, verify.

// crates.io
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	error::ProtocolMismatchError,
	flows::{Strategy, Verify},
	http::ProviderHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::GrantType,
	store::StateVerdict,
};

/// OAuth `error` value Reddit sends when the user declines the authorization.
pub const ACCESS_DENIED: &str = "access_denied";

/// Query parameters Reddit appends to the redirect URI, plus the host's expected state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackParams {
	/// One-time authorization code.
	pub code: Option<String>,
	/// State echoed back by Reddit.
	pub state: Option<String>,
	/// OAuth error code when the authorization did not succeed.
	pub error: Option<String>,
	/// Human-readable description accompanying `error`.
	pub error_description: Option<String>,
	/// State the host stored in its session; used when no state store is configured.
	#[serde(skip)]
	pub expected_state: Option<String>,
}
impl CallbackParams {
	/// Reads the parameters from a raw callback query string.
	pub fn from_query(query: &str) -> Self {
		let mut params = Self::default();

		for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
			let slot = match key.as_ref() {
				"code" => &mut params.code,
				"state" => &mut params.state,
				"error" => &mut params.error,
				"error_description" => &mut params.error_description,
				_ => continue,
			};

			*slot = Some(value.into_owned());
		}

		params
	}

	/// Sets the state value the host expects to see echoed back.
	pub fn expected_state(mut self, state: impl Into<String>) -> Self {
		self.expected_state = Some(state.into());

		self
	}
}

/// Result of a completed callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome<U> {
	/// Verify callback produced a user.
	Success(U),
	/// Login rejected without an error: bad state or a verify callback returning `None`.
	Failure {
		/// Reason suitable for a flash message.
		message: String,
	},
	/// User declined the authorization on Reddit.
	Denied {
		/// Provider-supplied `error_description`, when present.
		description: Option<String>,
	},
}
impl<U> AuthOutcome<U> {
	/// Returns the user for [`AuthOutcome::Success`].
	pub fn user(self) -> Option<U> {
		match self {
			Self::Success(user) => Some(user),
			_ => None,
		}
	}
}

const STATE_MISSING: &str = "Unable to verify authorization request state.";
const STATE_INVALID: &str = "Invalid authorization request state.";
const STATE_EXPIRED: &str = "Authorization request state has expired.";
const VERIFY_REJECTED: &str = "Verify callback rejected the Reddit account.";

impl<V, C> Strategy<V, C>
where
	V: Verify,
	C: ?Sized + ProviderHttpClient,
{
	/// Completes an authorization from the callback parameters.
	pub async fn authenticate(&self, params: CallbackParams) -> Result<AuthOutcome<V::User>> {
		const KIND: FlowKind = FlowKind::Authenticate;

		let span = FlowSpan::new(KIND, "authenticate");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.run_callback(params)).await;

		obs::record_result(KIND, &result);

		result
	}

	async fn run_callback(&self, params: CallbackParams) -> Result<AuthOutcome<V::User>> {
		let CallbackParams { code, state, error, error_description, expected_state } = params;

		if let Some(error) = error {
			if error == ACCESS_DENIED {
				return Ok(AuthOutcome::Denied { description: error_description });
			}

			return Err(Error::Authorization { error, description: error_description });
		}

		let code = code
			.filter(|code| !code.is_empty())
			.ok_or(ProtocolMismatchError::MissingCode)?;

		if let Some(message) = self.check_state(state.as_deref(), expected_state.as_deref()).await? {
			return Ok(AuthOutcome::Failure { message: message.to_owned() });
		}

		let mut exchange_params = BTreeMap::from([(
			"grant_type".to_owned(),
			GrantType::AuthorizationCode.as_str().to_owned(),
		)]);

		if let Some(callback) = &self.config.callback_url {
			exchange_params.insert("redirect_uri".to_owned(), callback.as_str().to_owned());
		}

		let tokens = self.get_access_token(code, exchange_params).await?;
		let profile = self.user_profile(tokens.access_token.expose()).await?;

		match self.verify.verify(tokens, profile).await.map_err(Error::Verify)? {
			Some(user) => Ok(AuthOutcome::Success(user)),
			None => Ok(AuthOutcome::Failure { message: VERIFY_REJECTED.to_owned() }),
		}
	}

	async fn check_state(
		&self,
		returned: Option<&str>,
		expected: Option<&str>,
	) -> Result<Option<&'static str>> {
		if let Some(store) = &self.config.state_store {
			let Some(returned) = returned else {
				return Ok(Some(STATE_MISSING));
			};

			return Ok(match store.verify(returned).await? {
				StateVerdict::Valid => None,
				StateVerdict::Unknown => Some(STATE_INVALID),
				StateVerdict::Expired => Some(STATE_EXPIRED),
			});
		}
		if !self.config.state_enabled {
			return Ok(None);
		}

		Ok(match (returned, expected) {
			(Some(returned), Some(expected)) if returned == expected => None,
			(Some(_), Some(_)) => Some(STATE_INVALID),
			_ => Some(STATE_MISSING),
		})
	}
}
