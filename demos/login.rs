//! Walks through a full Reddit login: print the authorize URL, paste back the callback
//! query, and let the strategy exchange the code and fetch the account.
//!
//! Set `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET`, and optionally `REDDIT_CALLBACK_URL`
//! (defaults to `http://127.0.0.1:3000/auth/reddit/callback`).

// std
use std::{env, io, sync::Arc};
// crates.io
use color_eyre::{Result, eyre::eyre};
use url::Url;
// self
use oauth2_reddit::{
	auth::{Profile, TokenResult},
	config::StrategyOptions,
	error::BoxError,
	flows::{AuthOutcome, AuthorizeOptions, CallbackParams, ReqwestStrategy, TokenDuration},
	store::MemoryStateStore,
};

async fn verify(tokens: TokenResult, profile: Profile) -> Result<Option<String>, BoxError> {
	println!(
		"Authenticated u/{} ({} karma); refresh token issued: {}.",
		profile.name,
		profile.total_karma(),
		tokens.refresh_token.is_some()
	);

	Ok(Some(profile.id))
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id = env::var("REDDIT_CLIENT_ID")?;
	let client_secret = env::var("REDDIT_CLIENT_SECRET")?;
	let callback = env::var("REDDIT_CALLBACK_URL")
		.unwrap_or_else(|_| "http://127.0.0.1:3000/auth/reddit/callback".into());
	let options = StrategyOptions::new(client_id, client_secret)
		.callback_url(Url::parse(&callback)?)
		.scope(["read", "history"])
		.state_store(Arc::new(MemoryStateStore::default()))
		.user_agent("web:oauth2-reddit-demo:v0.1.0 (by /u/oauth2-reddit)");
	let strategy = ReqwestStrategy::new(options, verify)?;
	let redirect = strategy
		.authorize_url(AuthorizeOptions::default().duration(TokenDuration::Permanent))
		.await?;

	println!("Send your user to {}.", redirect.url);
	println!("Paste the query string Reddit redirected back with:");

	let mut query = String::new();

	io::stdin().read_line(&mut query)?;

	match strategy.authenticate(CallbackParams::from_query(query.trim())).await? {
		AuthOutcome::Success(id) => println!("Logged in Reddit account {id}."),
		AuthOutcome::Failure { message } => return Err(eyre!("Login failed: {message}")),
		AuthOutcome::Denied { description } => println!(
			"The user declined the authorization ({}).",
			description.as_deref().unwrap_or("no description")
		),
	}

	Ok(())
}
