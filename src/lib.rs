//! Reddit OAuth 2.0 strategy for host authentication layers.
//!
//! The crate normalizes strategy options (always requesting the `identity` scope), builds
//! authorize redirects, exchanges codes at Reddit's Basic-authenticated token endpoint, and
//! fetches the account profile from `/api/v1/me`. Token exchange failures surface their raw
//! transport cause; profile failures are wrapped in [`error::UpstreamOAuthError`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use oauth2::{
		AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
		http::{HeaderMap, Method, Response, StatusCode},
	};
	use url::form_urlencoded;
	// self
	use crate::{
		auth::{Profile, TokenResult},
		config::StrategyOptions,
		error::BoxError,
		flows::{ReqwestStrategy, Strategy, Verify},
		http::{ProviderHttpClient, ReqwestHttpClient},
	};

	/// Client identifier shared by integration fixtures.
	pub const TEST_CLIENT_ID: &str = "ABC123";
	/// Client secret shared by integration fixtures.
	pub const TEST_CLIENT_SECRET: &str = "secret";
	/// `Authorization` header Reddit expects for the fixture credentials.
	pub const TEST_BASIC_HEADER: &str = "Basic QUJDMTIzOnNlY3JldA==";

	/// User type returned by [`accept_all`]: the profile name and the refresh token.
	pub type TestUser = (String, Option<String>);

	/// Verify callback that accepts every profile.
	pub async fn accept_all(
		tokens: TokenResult,
		profile: Profile,
	) -> Result<Option<TestUser>, BoxError> {
		Ok(Some((profile.name, tokens.refresh_token.map(|secret| secret.expose().to_owned()))))
	}

	/// Builds a reqwest HTTP client suitable for talking to `httpmock` servers.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Options pointing every endpoint at the provided mock server base URL.
	pub fn mock_options(base_url: &str) -> StrategyOptions {
		let endpoint =
			|path: &str| Url::parse(&format!("{base_url}{path}")).expect("Mock URL should parse.");

		StrategyOptions::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
			.callback_url(endpoint("/auth/reddit/callback"))
			.authorization_url(endpoint("/api/v1/authorize"))
			.token_url(endpoint("/api/v1/access_token"))
			.user_profile_url(endpoint("/api/v1/me"))
	}

	/// Constructs a reqwest-backed [`Strategy`] with the [`accept_all`] verify callback.
	pub fn build_reqwest_test_strategy(
		options: StrategyOptions,
	) -> ReqwestStrategy<impl Verify<User = TestUser>> {
		Strategy::with_http_client(options, accept_all, test_reqwest_http_client())
			.expect("Test strategy should build successfully.")
	}

	/// Constructs a [`Strategy`] on top of `client`, with endpoints under `http://reddit.test`.
	pub fn build_recording_test_strategy(
		client: &RecordingHttpClient,
	) -> Strategy<impl Verify<User = TestUser>, RecordingHttpClient> {
		Strategy::with_http_client(mock_options("http://reddit.test"), accept_all, client.clone())
			.expect("Recording strategy should build successfully.")
	}

	/// Error raised by [`RecordingHttpClient::failing`].
	#[derive(Debug, ThisError)]
	pub enum FakeTransportError {
		/// Simulated connection reset.
		#[error("Connection reset by fake peer.")]
		ConnectionReset,
	}

	/// Request captured by [`RecordingHttpClient`].
	#[derive(Clone, Debug)]
	pub struct RecordedRequest {
		/// HTTP method.
		pub method: Method,
		/// Full request URI.
		pub uri: String,
		/// Request headers.
		pub headers: HeaderMap,
		/// Raw request body.
		pub body: Vec<u8>,
	}
	impl RecordedRequest {
		/// Returns a header value as a string, when present and valid.
		pub fn header(&self, name: &str) -> Option<&str> {
			self.headers.get(name).and_then(|value| value.to_str().ok())
		}

		/// Decodes the body as url-encoded form pairs.
		pub fn form(&self) -> Vec<(String, String)> {
			form_urlencoded::parse(&self.body)
				.map(|(key, value)| (key.into_owned(), value.into_owned()))
				.collect()
		}
	}

	#[derive(Clone, Debug)]
	enum Reply {
		Respond { status: StatusCode, body: String },
		Fail,
	}

	/// Transport that records every request and answers with a canned reply.
	#[derive(Clone, Debug)]
	pub struct RecordingHttpClient {
		requests: Arc<Mutex<Vec<RecordedRequest>>>,
		reply: Reply,
	}
	impl RecordingHttpClient {
		/// Answers every request with `status` and `body`.
		pub fn responding(status: u16, body: impl Into<String>) -> Self {
			let status = StatusCode::from_u16(status).expect("Fixture status should be valid.");

			Self {
				requests: Default::default(),
				reply: Reply::Respond { status, body: body.into() },
			}
		}

		/// Fails every request with [`FakeTransportError::ConnectionReset`].
		pub fn failing() -> Self {
			Self { requests: Default::default(), reply: Reply::Fail }
		}

		/// Requests sent so far, oldest first.
		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().clone()
		}

		/// Most recent request.
		pub fn last_request(&self) -> RecordedRequest {
			self.requests().pop().expect("At least one request should have been sent.")
		}
	}
	impl ProviderHttpClient for RecordingHttpClient {
		type Handle = RecordingHandle;
		type TransportError = FakeTransportError;

		fn handle(&self) -> Self::Handle {
			RecordingHandle(self.clone())
		}
	}

	/// [`AsyncHttpClient`] handle returned by [`RecordingHttpClient`].
	#[derive(Debug)]
	pub struct RecordingHandle(RecordingHttpClient);
	impl<'c> AsyncHttpClient<'c> for RecordingHandle {
		type Error = HttpClientError<FakeTransportError>;
		type Future =
			Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

		fn call(&'c self, request: HttpRequest) -> Self::Future {
			let client = self.0.clone();

			Box::pin(async move {
				let (parts, body) = request.into_parts();

				client.requests.lock().push(RecordedRequest {
					method: parts.method,
					uri: parts.uri.to_string(),
					headers: parts.headers,
					body,
				});

				match client.reply {
					Reply::Respond { status, body } =>
						Ok(Response::builder().status(status).body(body.into_bytes())?),
					Reply::Fail =>
						Err(HttpClientError::Reqwest(Box::new(FakeTransportError::ConnectionReset))),
				}
			})
		}
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
