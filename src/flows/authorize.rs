//! Authorization redirect: extra parameters and the full authorize URL.

// self
use crate::{
	_prelude::*,
	flows::Strategy,
	http::ProviderHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store,
};

/// Lifetime Reddit grants to the issued tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenDuration {
	/// One-hour access token without a refresh token.
	Temporary,
	/// Access token accompanied by a refresh token.
	Permanent,
}
impl TokenDuration {
	/// Value sent in the `duration` query parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Temporary => "temporary",
			Self::Permanent => "permanent",
		}
	}
}
impl Display for TokenDuration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Per-attempt options for the authorization redirect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizeOptions {
	/// Requested token lifetime; omitted from the redirect when unset.
	pub duration: Option<TokenDuration>,
}
impl AuthorizeOptions {
	/// Requests the given token lifetime.
	pub fn duration(mut self, duration: TokenDuration) -> Self {
		self.duration = Some(duration);

		self
	}
}

/// Authorization redirect target plus the state value it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRedirect {
	/// Fully-formed authorize URL.
	pub url: Url,
	/// State embedded in the URL; hosts without a store keep it in their session.
	pub state: Option<String>,
}

impl<V, C> Strategy<V, C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Extra authorization parameters derived from `options`.
	///
	/// Only `duration` is ever produced, and only when the caller supplied it.
	pub fn authorization_params(&self, options: &AuthorizeOptions) -> BTreeMap<String, String> {
		FlowSpan::new(FlowKind::Authorize, "authorization_params").in_scope(|| {
			let mut params = BTreeMap::new();

			if let Some(duration) = options.duration {
				params.insert("duration".to_owned(), duration.as_str().to_owned());
			}

			params
		})
	}

	/// Builds the authorize URL the host redirects the user agent to.
	pub async fn authorize_url(&self, options: AuthorizeOptions) -> Result<AuthorizationRedirect> {
		const KIND: FlowKind = FlowKind::Authorize;

		let span = FlowSpan::new(KIND, "authorize_url");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let state = self.issue_state().await?;
				let mut url = self.config.authorization_url.clone();

				{
					let mut query = url.query_pairs_mut();

					query
						.append_pair("response_type", "code")
						.append_pair("client_id", self.config.client_id.as_str());

					if let Some(callback) = &self.config.callback_url {
						query.append_pair("redirect_uri", callback.as_str());
					}

					query.append_pair("scope", self.config.scope());

					if let Some(state) = &state {
						query.append_pair("state", state);
					}

					query.extend_pairs(self.authorization_params(&options));
				}

				Ok(AuthorizationRedirect { url, state })
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	async fn issue_state(&self) -> Result<Option<String>> {
		if let Some(store) = &self.config.state_store {
			return Ok(Some(store.issue().await?));
		}
		if self.config.state_enabled {
			return Ok(Some(store::random_state()));
		}

		Ok(None)
	}
}
