//! Policy hooks that customize the exchange and profile pipelines.
//!
//! The pipelines in [`crate::flows`] never hard-code provider behavior. They hand an
//! [`ExchangeRequest`] to a [`CredentialSigner`] to obtain the headers and form of the
//! outgoing token request, and hand the profile body to a [`ProfileMapper`] to obtain a
//! [`Profile`]. Both hooks work on crate-owned data so implementations stay independent
//! of the HTTP client in use.

// crates.io
use oauth2::{
	ClientId, ClientSecret,
	http::{HeaderMap, HeaderValue, header::CONTENT_TYPE},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::Profile,
	error::{BoxError, ConfigError},
	provider::GrantType,
};

/// Media type of every token request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Code-or-refresh-token exchange, alive for the duration of one token call.
#[derive(Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
	/// Authorization code or refresh token, depending on [`Self::grant`].
	pub value: String,
	/// Grant inferred from `params`.
	pub grant: GrantType,
	/// Extra caller params forwarded in the form body.
	pub params: BTreeMap<String, String>,
}
impl ExchangeRequest {
	/// Builds a request, inferring the grant from `params["grant_type"]`.
	pub fn new(value: impl Into<String>, params: BTreeMap<String, String>) -> Self {
		let grant = GrantType::from_params(&params);

		Self { value: value.into(), grant, params }
	}
}
impl Debug for ExchangeRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ExchangeRequest")
			.field("value", &"<redacted>")
			.field("grant", &self.grant)
			.field("params", &self.params)
			.finish()
	}
}

/// Headers and form fields produced by a [`CredentialSigner`].
#[derive(Clone, Debug, Default)]
pub struct SignedTokenRequest {
	/// Headers to attach, typically `Authorization` and `Content-Type`.
	pub headers: HeaderMap,
	/// Form fields, url-encoded into the POST body.
	pub form: BTreeMap<String, String>,
}
impl SignedTokenRequest {
	/// Creates an empty request declaring the form content type.
	pub fn form_encoded() -> Self {
		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

		Self { headers, form: BTreeMap::new() }
	}

	/// Serializes [`Self::form`] as `application/x-www-form-urlencoded`.
	pub fn encoded_body(&self) -> String {
		form_urlencoded::Serializer::new(String::new()).extend_pairs(self.form.iter()).finish()
	}
}

/// Signing capability injected into the token exchange pipeline.
///
/// Given client credentials and an [`ExchangeRequest`], produce everything the request
/// needs beyond its method and URL. Implementations must not perform I/O.
pub trait CredentialSigner: Send + Sync {
	/// Produces the headers and form for the token request.
	fn sign_token_request(
		&self,
		client_id: &ClientId,
		client_secret: &ClientSecret,
		request: ExchangeRequest,
	) -> Result<SignedTokenRequest, ConfigError>;
}

/// Mapping policy from a profile response to the canonical [`Profile`].
pub trait ProfileMapper: Send + Sync {
	/// Maps the response body (`raw`) and its parsed form (`json`) into a profile.
	fn map_profile(&self, raw: String, json: JsonValue) -> Result<Profile, BoxError>;
}
