//! Profile fetch against `/api/v1/me`.

// crates.io
use oauth2::http::{
	HeaderValue, Method, Request,
	header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
// self
use crate::{
	_prelude::*,
	auth::Profile,
	error::{BoxError, ConfigError, TransportError, UpstreamOAuthError},
	flows::Strategy,
	http::{self, ProviderHttpClient},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<V, C> Strategy<V, C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Fetches and normalizes the Reddit account behind `access_token`.
	///
	/// Every failure, from transport to schema mismatch, is reported as an
	/// [`UpstreamOAuthError`] with the message
	/// [`UpstreamOAuthError::PROFILE_FETCH_FAILED`] and the original cause as its source.
	pub async fn user_profile(&self, access_token: &str) -> Result<Profile> {
		const KIND: FlowKind = FlowKind::UserProfile;

		let span = FlowSpan::new(KIND, "user_profile");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.fetch_profile(access_token).await.map_err(|cause| {
					Error::from(UpstreamOAuthError::wrap(
						UpstreamOAuthError::PROFILE_FETCH_FAILED,
						cause,
					))
				})
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	async fn fetch_profile(&self, access_token: &str) -> Result<Profile, BoxError> {
		let mut bearer = HeaderValue::try_from(format!("Bearer {access_token}"))
			.map_err(|source| ConfigError::InvalidHeader { header: "authorization", source })?;

		bearer.set_sensitive(true);

		let request = Request::builder()
			.method(Method::GET)
			.uri(self.config.user_profile_url.as_str())
			.header(AUTHORIZATION, bearer)
			.header(ACCEPT, HeaderValue::from_static("application/json"))
			.header(USER_AGENT, self.user_agent()?)
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let response = http::execute(self.http_client.as_ref(), request).await?;
		let status = response.status();

		obs::record_http_status("user_profile", status.as_u16());

		if !status.is_success() {
			return Err(TransportError::Status {
				status: status.as_u16(),
				body: String::from_utf8_lossy(response.body()).into_owned(),
			}
			.into());
		}

		let raw = String::from_utf8(response.into_body())?;
		let json = serde_json::from_str::<JsonValue>(&raw)?;

		self.profile_mapper.map_profile(raw, json)
	}
}
