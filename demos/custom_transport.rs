//! Plugs a custom transport into the strategy and shows how failures are classified:
//! token exchange errors arrive raw, profile errors arrive wrapped.

// std
use std::{future::Future, pin::Pin};
// crates.io
use color_eyre::Result;
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{Response, StatusCode},
};
use url::Url;
// self
use oauth2_reddit::{
	auth::{Profile, TokenResult},
	config::StrategyOptions,
	error::{BoxError, Error},
	flows::Strategy,
	http::ProviderHttpClient,
};

/// Transport that answers every request with a fixed status and body.
#[derive(Clone, Debug)]
struct CannedHttpClient {
	status: StatusCode,
	body: &'static str,
}
impl ProviderHttpClient for CannedHttpClient {
	type Handle = CannedHttpClient;
	type TransportError = std::io::Error;

	fn handle(&self) -> Self::Handle {
		self.clone()
	}
}
impl<'c> AsyncHttpClient<'c> for CannedHttpClient {
	type Error = HttpClientError<std::io::Error>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			println!("{} {}", request.method(), request.uri());

			Ok(Response::builder().status(self.status).body(self.body.as_bytes().to_vec())?)
		})
	}
}

async fn verify(_: TokenResult, profile: Profile) -> Result<Option<String>, BoxError> {
	Ok(Some(profile.name))
}

fn strategy(
	status: StatusCode,
	body: &'static str,
) -> Result<Strategy<impl oauth2_reddit::flows::Verify<User = String>, CannedHttpClient>> {
	let options = StrategyOptions::new("demo-client", "demo-secret")
		.callback_url(Url::parse("https://app.example.com/auth/reddit/callback")?);

	Ok(Strategy::with_http_client(options, verify, CannedHttpClient { status, body })?)
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let throttled = strategy(StatusCode::TOO_MANY_REQUESTS, "Too Many Requests")?;

	match throttled.refresh_access_token("demo-refresh").await {
		Err(Error::Transport(err)) => println!("Token endpoint failed raw: {err} ({err:?})."),
		other => println!("Unexpected exchange result: {other:?}."),
	}
	match throttled.user_profile("demo-access").await {
		Err(Error::UpstreamProfile(err)) =>
			println!("Profile fetch failed wrapped: {} caused by {}.", err.message(), err.cause()),
		other => println!("Unexpected profile result: {other:?}."),
	}

	let healthy = strategy(StatusCode::OK, r#"{"id":"t2demo","name":"demo_user"}"#)?;
	let profile = healthy.user_profile("demo-access").await?;

	println!("Fetched u/{} with id {}.", profile.name, profile.id);

	Ok(())
}
