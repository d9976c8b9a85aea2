pub mod apple_sign_in;
pub mod backend;
pub mod credential;
pub mod error;
pub mod id_token_claims;
pub mod id_token_signer;
pub mod id_token_verifier;
pub mod memory_backend;
pub mod session_manager;

pub use apple_sign_in::{AppleSignInRequest, DEFAULT_NONCE_LENGTH, random_nonce, sha256_hex};
pub use backend::{AuthBackend, BackendUser};
pub use credential::{AppleSignInResult, Credential, GoogleSignInTokens};
pub use error::{AuthError, Result};
pub use id_token_claims::IdTokenClaims;
pub use id_token_signer::IdTokenSigner;
pub use id_token_verifier::IdTokenVerifier;
pub use memory_backend::{EmailKind, InMemoryAuthBackend, OutboundEmail};
pub use session_manager::SessionManager;

#[cfg(test)]
mod tests;
