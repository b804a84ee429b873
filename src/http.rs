//! Transport seam for the token and profile endpoints.
//!
//! [`ProviderHttpClient`] is the strategy's only dependency on an HTTP stack. Each call
//! asks the client for a fresh [`AsyncHttpClient`] handle, so handles own whatever they
//! need and their futures stay `Send` while a request is in flight. The default
//! implementation wraps [`ReqwestClient`] behind the `reqwest` feature.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Abstraction over HTTP transports able to reach Reddit's endpoints.
///
/// Implementations must be `Send + Sync + 'static` so strategies can share them behind an
/// [`Arc`]. Non-success statuses are returned as ordinary responses; the strategy decides
/// how to classify them.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single request.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for the next request.
	fn handle(&self) -> Self::Handle;
}

/// Executes `request` on a fresh handle from `client`, mapping client failures.
///
/// Failures keep their raw cause: request construction problems become
/// [`ConfigError::HttpRequest`] and everything else a [`TransportError`].
pub async fn execute<C>(client: &C, request: HttpRequest) -> Result<HttpResponse>
where
	C: ?Sized + ProviderHttpClient,
{
	let handle = client.handle();

	handle.call(request).await.map_err(map_client_error)
}

/// Converts an [`HttpClientError`] into a strategy [`Error`] without rewording it.
pub fn map_client_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network(inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other(message).into(),
		_ => TransportError::Other("unrecognized HTTP client failure".into()).into(),
	}
}

/// Thin wrapper around [`ReqwestClient`] used as the default transport.
///
/// Reddit's endpoints answer directly, so custom clients should disable redirect
/// following to keep `Authorization` headers from leaking to another host.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// [`AsyncHttpClient`] handle returned by [`ReqwestHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn client_errors_keep_their_raw_cause() {
		let io: HttpClientError<std::io::Error> =
			HttpClientError::Io(std::io::Error::other("socket closed"));
		let err = map_client_error(io);

		assert!(matches!(err, Error::Transport(TransportError::Io(_))));
		assert_eq!(err.to_string(), "socket closed");

		let network: HttpClientError<std::io::Error> =
			HttpClientError::Reqwest(Box::new(std::io::Error::other("connection refused")));
		let err = map_client_error(network);

		assert!(matches!(err, Error::Transport(TransportError::Network(_))));
		assert_eq!(err.to_string(), "connection refused");

		let other: HttpClientError<std::io::Error> = HttpClientError::Other("boom".into());

		assert!(matches!(map_client_error(other), Error::Transport(TransportError::Other(_))));
	}
}
