//! Reddit endpoints and Reddit's implementations of the pipeline policies.
//!
//! Reddit deviates from RFC 6749 in two places this module owns: the token endpoint
//! only accepts client credentials through HTTP Basic (with the raw id and secret, no
//! form-encoding first) and expects a `type=web_server` form field.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use oauth2::{
	ClientId, ClientSecret,
	http::{HeaderValue, header::AUTHORIZATION},
};
// self
use crate::{
	_prelude::*,
	auth::Profile,
	error::{BoxError, ConfigError},
	provider::{CredentialSigner, ExchangeRequest, ProfileMapper, SignedTokenRequest},
};

/// Fixed provider label stamped on every [`Profile`].
pub const PROVIDER_NAME: &str = "reddit";
/// Default authorization endpoint.
pub const AUTHORIZATION_URL: &str = "https://ssl.reddit.com/api/v1/authorize";
/// Default token endpoint.
pub const TOKEN_URL: &str = "https://ssl.reddit.com/api/v1/access_token";
/// Default profile endpoint.
pub const USER_PROFILE_URL: &str = "https://oauth.reddit.com/api/v1/me";

/// Signs token requests the way Reddit's token endpoint demands.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedditBasicSigner;
impl RedditBasicSigner {
	/// `Basic base64(client_id:client_secret)` header value.
	pub fn authorization_value(
		client_id: &ClientId,
		client_secret: &ClientSecret,
	) -> Result<HeaderValue, ConfigError> {
		let credentials = format!("{}:{}", client_id.as_str(), client_secret.secret());
		let mut value = HeaderValue::try_from(format!("Basic {}", STANDARD.encode(credentials)))
			.map_err(|source| ConfigError::InvalidHeader { header: "authorization", source })?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl CredentialSigner for RedditBasicSigner {
	fn sign_token_request(
		&self,
		client_id: &ClientId,
		client_secret: &ClientSecret,
		request: ExchangeRequest,
	) -> Result<SignedTokenRequest, ConfigError> {
		let ExchangeRequest { value, grant, params } = request;
		let mut signed = SignedTokenRequest::form_encoded();

		signed.form = params;
		signed.form.insert("type".into(), "web_server".into());
		signed.form.insert(grant.value_field().into(), value);
		signed.headers.insert(AUTHORIZATION, Self::authorization_value(client_id, client_secret)?);

		Ok(signed)
	}
}

#[derive(Deserialize)]
struct RedditAccount {
	id: String,
	name: String,
	#[serde(default)]
	link_karma: i64,
	#[serde(default)]
	comment_karma: i64,
}

/// Lifts `id`, `name`, and both karma counters out of `/api/v1/me`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedditProfileMapper;
impl ProfileMapper for RedditProfileMapper {
	fn map_profile(&self, raw: String, json: JsonValue) -> Result<Profile, BoxError> {
		let account: RedditAccount = serde_path_to_error::deserialize(&json)?;

		Ok(Profile {
			provider: PROVIDER_NAME.to_owned(),
			id: account.id,
			name: account.name,
			link_karma: account.link_karma,
			comment_karma: account.comment_karma,
			raw,
			json,
		})
	}
}
