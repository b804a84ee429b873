#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use oauth2_reddit::{
	_preludet::*,
	error::{Error, TransportError, UpstreamOAuthError},
};

const ME_BODY: &str = r#"{"name":"redditor","link_karma":100,"comment_karma":900,"id":"woohoo","icon_img":"https://styles.redditmedia.com/icon.png"}"#;

fn upstream(err: Error) -> UpstreamOAuthError {
	match err {
		Error::UpstreamProfile(upstream) => upstream,
		other => panic!("Expected a wrapped profile error, got {other:?}."),
	}
}

#[tokio::test]
async fn profile_is_fetched_with_bearer_token_and_normalized() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/v1/me")
				.header("authorization", "Bearer token")
				.header("accept", "application/json");
			then.status(200).header("content-type", "application/json").body(ME_BODY);
		})
		.await;
	let strategy = build_reqwest_test_strategy(mock_options(&server.base_url()));
	let profile = strategy.user_profile("token").await.expect("Profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(profile.provider, "reddit");
	assert_eq!(profile.id, "woohoo");
	assert_eq!(profile.name, "redditor");
	assert_eq!(profile.link_karma, 100);
	assert_eq!(profile.comment_karma, 900);
	assert_eq!(profile.raw, ME_BODY);
	assert_eq!(profile.json["icon_img"], "https://styles.redditmedia.com/icon.png");
}

#[tokio::test]
async fn token_never_travels_in_the_query() {
	let client = RecordingHttpClient::responding(200, ME_BODY);
	let strategy = build_recording_test_strategy(&client);

	strategy.user_profile("token").await.expect("Profile fetch should succeed.");

	let request = client.last_request();

	assert_eq!(request.uri, "http://reddit.test/api/v1/me");
	assert_eq!(request.header("authorization"), Some("Bearer token"));
	assert!(request.body.is_empty());
}

#[tokio::test]
async fn non_json_body_is_wrapped_with_the_profile_message() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/me");
			then.status(200).body("Hello, world.");
		})
		.await;

	let strategy = build_reqwest_test_strategy(mock_options(&server.base_url()));
	let err = upstream(
		strategy.user_profile("token").await.expect_err("Non-JSON bodies must fail."),
	);

	assert_eq!(err.message(), "failed to fetch user profile");
	assert_eq!(err.to_string(), UpstreamOAuthError::PROFILE_FETCH_FAILED);
	assert!(err.cause().downcast_ref::<serde_json::Error>().is_some());
}

#[tokio::test]
async fn unsuccessful_status_is_wrapped_with_the_profile_message() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/me");
			then.status(401).body(r#"{"message":"Unauthorized","error":401}"#);
		})
		.await;

	let strategy = build_reqwest_test_strategy(mock_options(&server.base_url()));
	let err = upstream(strategy.user_profile("expired").await.expect_err("401 must fail."));
	let cause = err
		.cause()
		.downcast_ref::<TransportError>()
		.expect("Status failures keep the transport error as cause.");

	assert_eq!(err.message(), UpstreamOAuthError::PROFILE_FETCH_FAILED);
	assert_eq!(cause.status(), Some(401));
}

#[tokio::test]
async fn transport_failures_are_wrapped_with_the_original_cause() {
	let client = RecordingHttpClient::failing();
	let strategy = build_recording_test_strategy(&client);
	let err = upstream(
		strategy.user_profile("token").await.expect_err("Transport failures must fail."),
	);
	let source = StdError::source(&err).expect("Wrapped errors expose their cause as source.");

	assert_eq!(err.message(), UpstreamOAuthError::PROFILE_FETCH_FAILED);
	assert_eq!(source.to_string(), "Connection reset by fake peer.");
	assert!(matches!(
		err.cause().downcast_ref::<Error>(),
		Some(Error::Transport(TransportError::Network(_)))
	));
}

#[tokio::test]
async fn schema_mismatch_reports_the_offending_field() {
	let client = RecordingHttpClient::responding(200, r#"{"id":"woohoo","link_karma":1}"#);
	let strategy = build_recording_test_strategy(&client);
	let err = upstream(
		strategy.user_profile("token").await.expect_err("Profiles without a name must fail."),
	);

	assert_eq!(err.message(), UpstreamOAuthError::PROFILE_FETCH_FAILED);
	assert!(err.cause().to_string().contains("name"), "Unexpected cause: {}.", err.cause());
}
