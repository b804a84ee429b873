//! Token exchange results and the redacted secret wrapper they carry.

// self
use crate::{_prelude::*, error::ProtocolMismatchError};

/// Access or refresh token value whose formatters never print the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenSecret(<redacted>)")
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Outcome of a successful code or refresh-token exchange.
///
/// `extra` holds every response field except `access_token` and `refresh_token`, so
/// provider additions such as `expires_in`, `scope`, or `token_type` reach the caller
/// untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenResult {
	/// Bearer token for the profile and API endpoints.
	pub access_token: TokenSecret,
	/// Refresh token, issued only for `duration=permanent` authorizations.
	pub refresh_token: Option<TokenSecret>,
	/// Remaining response fields.
	pub extra: JsonMap<String, JsonValue>,
}
impl TokenResult {
	/// Splits a token endpoint JSON object into tokens and extras.
	pub fn from_response(
		mut fields: JsonMap<String, JsonValue>,
	) -> Result<Self, ProtocolMismatchError> {
		let access_token = match fields.remove("access_token") {
			Some(JsonValue::String(token)) if !token.is_empty() => TokenSecret::new(token),
			_ =>
				return Err(match fields.get("error") {
					Some(error) => ProtocolMismatchError::TokenEndpointError {
						error: error.as_str().map_or_else(|| error.to_string(), str::to_owned),
					},
					None => ProtocolMismatchError::MissingAccessToken,
				}),
		};
		let refresh_token = match fields.remove("refresh_token") {
			Some(JsonValue::String(token)) if !token.is_empty() => Some(TokenSecret::new(token)),
			_ => None,
		};

		Ok(Self { access_token, refresh_token, extra: fields })
	}

	/// Lifetime advertised via `expires_in`, when present and positive.
	pub fn expires_in(&self) -> Option<Duration> {
		let seconds = match self.extra.get("expires_in")? {
			JsonValue::Number(number) => number.as_i64()?,
			JsonValue::String(text) => text.parse().ok()?,
			_ => return None,
		};

		(seconds > 0).then(|| Duration::seconds(seconds))
	}

	/// Token type reported by the provider (Reddit answers `bearer`).
	pub fn token_type(&self) -> Option<&str> {
		self.extra.get("token_type").and_then(JsonValue::as_str)
	}

	/// Scope string granted by the provider.
	pub fn scope(&self) -> Option<&str> {
		self.extra.get("scope").and_then(JsonValue::as_str)
	}
}
