//! Token endpoint exchanges for authorization codes and refresh tokens.
//!
//! Failures here are never wrapped: transport errors and non-success statuses reach
//! the caller as raw [`TransportError`] values, and unreadable success bodies as
//! [`ProtocolMismatchError`] values.

// crates.io
use oauth2::http::{
	HeaderValue, Method, Request,
	header::{ACCEPT, USER_AGENT},
};
// self
use crate::{
	_prelude::*,
	auth::TokenResult,
	error::{ConfigError, ProtocolMismatchError, TransportError},
	flows::Strategy,
	http::{self, ProviderHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{ExchangeRequest, GrantType},
};

impl<V, C> Strategy<V, C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Exchanges `code` (or a refresh token) at the token endpoint.
	///
	/// `params` is forwarded in the form body; `grant_type=refresh_token` switches the
	/// value into the `refresh_token` field, anything else sends it as `code`.
	pub async fn get_access_token(
		&self,
		code: impl Into<String>,
		params: BTreeMap<String, String>,
	) -> Result<TokenResult> {
		let request = ExchangeRequest::new(code, params);
		let kind = match request.grant {
			GrantType::AuthorizationCode => FlowKind::TokenExchange,
			GrantType::RefreshToken => FlowKind::Refresh,
		};
		let span = FlowSpan::new(kind, "get_access_token");

		obs::record_flow_outcome(kind, FlowOutcome::Attempt);

		let result = span.instrument(self.exchange(request)).await;

		obs::record_result(kind, &result);

		result
	}

	/// Trades `refresh_token` for a new access token.
	pub async fn refresh_access_token(
		&self,
		refresh_token: impl Into<String>,
	) -> Result<TokenResult> {
		let params = BTreeMap::from([(
			"grant_type".to_owned(),
			GrantType::RefreshToken.as_str().to_owned(),
		)]);

		self.get_access_token(refresh_token, params).await
	}

	async fn exchange(&self, request: ExchangeRequest) -> Result<TokenResult> {
		let signed = self.signer.sign_token_request(
			&self.config.client_id,
			&self.config.client_secret,
			request,
		)?;
		let mut http_request = Request::builder()
			.method(Method::POST)
			.uri(self.config.token_url.as_str())
			.body(signed.encoded_body().into_bytes())
			.map_err(ConfigError::from)?;
		let headers = http_request.headers_mut();

		headers.extend(signed.headers);
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
		headers.insert(USER_AGENT, self.user_agent()?);

		let response = http::execute(self.http_client.as_ref(), http_request).await?;
		let status = response.status();

		obs::record_http_status("token", status.as_u16());

		if !status.is_success() {
			return Err(TransportError::Status {
				status: status.as_u16(),
				body: String::from_utf8_lossy(response.body()).into_owned(),
			}
			.into());
		}

		Ok(parse_token_response(response.body())?)
	}
}

/// Parses a successful token endpoint body into a [`TokenResult`].
pub fn parse_token_response(body: &[u8]) -> Result<TokenResult, ProtocolMismatchError> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);
	let value: JsonValue = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ProtocolMismatchError::MalformedTokenResponse { source })?;
	let JsonValue::Object(fields) = value else {
		return Err(ProtocolMismatchError::NonObjectTokenResponse);
	};

	TokenResult::from_response(fields)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn tokens_are_lifted_out_of_the_extras() {
		let body = br#"{"access_token":"2YotnFZFEjr1zCsicMWpAA","refresh_token":"tGzv3JOkF0XG5Qx2TlKWIA","token_type":"bearer","expires_in":3600,"scope":"identity"}"#;
		let tokens = parse_token_response(body).expect("Token body should parse.");

		assert_eq!(tokens.access_token.expose(), "2YotnFZFEjr1zCsicMWpAA");
		assert_eq!(
			tokens.refresh_token.as_ref().map(|secret| secret.expose()),
			Some("tGzv3JOkF0XG5Qx2TlKWIA")
		);
		assert!(!tokens.extra.contains_key("access_token"));
		assert!(!tokens.extra.contains_key("refresh_token"));
		assert_eq!(tokens.token_type(), Some("bearer"));
		assert_eq!(tokens.expires_in(), Some(Duration::hours(1)));
	}

	#[test]
	fn unreadable_bodies_are_protocol_mismatches() {
		assert!(matches!(
			parse_token_response(b"<html>oops</html>"),
			Err(ProtocolMismatchError::MalformedTokenResponse { .. })
		));
		assert!(matches!(
			parse_token_response(b"[1,2,3]"),
			Err(ProtocolMismatchError::NonObjectTokenResponse)
		));
		assert!(matches!(
			parse_token_response(br#"{"error":"invalid_grant"}"#),
			Err(ProtocolMismatchError::TokenEndpointError { error }) if error == "invalid_grant"
		));
		assert!(matches!(
			parse_token_response(br#"{"token_type":"bearer"}"#),
			Err(ProtocolMismatchError::MissingAccessToken)
		));
	}
}
