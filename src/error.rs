//! Strategy-level error types shared across configuration, exchanges, and profile fetching.
//!
//! The taxonomy is deliberately asymmetric: token exchange failures surface their raw
//! transport cause through [`TransportError`], while every profile failure is wrapped in
//! an [`UpstreamOAuthError`] carrying a stable message.

// self
use crate::_prelude::*;

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used to carry causes across the transport and verify seams.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected at construction or request assembly.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Raw transport failure raised while calling the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Profile endpoint failure wrapped by the error classifier.
	#[error(transparent)]
	UpstreamProfile(#[from] UpstreamOAuthError),
	/// Provider answered with a shape the strategy cannot interpret.
	#[error(transparent)]
	ProtocolMismatch(#[from] ProtocolMismatchError),
	/// State store backend failure.
	#[error("{0}")]
	State(
		#[from]
		#[source]
		crate::store::StoreError,
	),

	/// Provider redirected back with an OAuth error other than `access_denied`.
	#[error("Authorization request was rejected: {error}.")]
	Authorization {
		/// Provider-supplied `error` parameter.
		error: String,
		/// Provider-supplied `error_description` parameter, when present.
		description: Option<String>,
	},
	/// Host verify callback failed.
	#[error("Verify callback failed.")]
	Verify(#[source] BoxError),
}

/// Configuration and validation failures raised by the strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// `client_id` was absent or empty.
	#[error("Reddit strategy requires a client_id option.")]
	MissingClientId,
	/// `client_secret` was absent or empty.
	#[error("Reddit strategy requires a client_secret option.")]
	MissingClientSecret,
	/// An endpoint URL could not be parsed.
	#[error("The {endpoint} endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A configured value cannot be used as an HTTP header.
	#[error("The {header} header value is invalid.")]
	InvalidHeader {
		/// Header name being assembled.
		header: &'static str,
		/// Underlying header validation failure.
		#[source]
		source: oauth2::http::header::InvalidHeaderValue,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, unsuccessful status).
///
/// These are never reclassified: callers receive the cause produced by the HTTP client.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error(transparent)]
	Network(BoxError),
	/// Underlying IO failure surfaced during transport.
	#[error(transparent)]
	Io(#[from] std::io::Error),
	/// Endpoint answered with a non-success HTTP status.
	#[error("Endpoint responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, verbatim.
		body: String,
	},
	/// HTTP client reported a failure without a typed cause.
	#[error("HTTP client error: {0}.")]
	Other(String),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network(Box::new(src))
	}

	/// Returns the HTTP status for [`TransportError::Status`] failures.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Upstream failure wrapper carrying a human-readable message and the original cause.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct UpstreamOAuthError {
	message: String,
	#[source]
	source: BoxError,
}
impl UpstreamOAuthError {
	/// Message used for every profile endpoint failure.
	pub const PROFILE_FETCH_FAILED: &'static str = "failed to fetch user profile";

	/// Wraps `cause` behind a stable `message`.
	pub fn wrap(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
		Self { message: message.into(), source: cause.into() }
	}

	/// Human-readable message supplied at wrap time.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// Borrows the wrapped cause.
	pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
		self.source.as_ref()
	}

	/// Consumes the wrapper and returns the original cause.
	pub fn into_cause(self) -> BoxError {
		self.source
	}
}

/// Unexpected response shapes from the provider.
#[derive(Debug, ThisError)]
pub enum ProtocolMismatchError {
	/// Token endpoint body was not valid JSON.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedTokenResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint answered with JSON that is not an object.
	#[error("Token endpoint returned a non-object JSON payload.")]
	NonObjectTokenResponse,
	/// Token endpoint answered successfully but with an OAuth error object.
	#[error("Token endpoint returned an OAuth error: {error}.")]
	TokenEndpointError {
		/// Provider-supplied `error` field.
		error: String,
	},
	/// Token endpoint answered successfully but omitted `access_token`.
	#[error("Token endpoint response is missing access_token.")]
	MissingAccessToken,
	/// Callback did not carry an authorization code.
	#[error("Authorization callback is missing the code parameter.")]
	MissingCode,
}
