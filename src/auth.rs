//! OAuth 1.0a credential pairs and the redacting secret wrapper that carries them.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;
