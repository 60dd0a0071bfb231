//! Request signing contract that lets the relay (or any caller) attach OAuth 1.0a
//! authorization to an outbound HTTP request.

/// Describes how to sign an outbound request without constraining the HTTP client type.
///
/// The trait is generic over both the request and error types so implementers can
/// integrate with any request representation (`http::Request`, a `reqwest` builder, a
/// bespoke SDK, etc.). [`crate::oauth::OAuthSigner`] implements it for
/// `http::Request<Vec<u8>>`.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and returns it with authorization attached.
	fn sign_request(&self, request: Request) -> Result<Request, Error>;
}
