//! End-to-end walk-through against the in-process authentication backend:
//! anonymous sign-in, profile creation, Google then Apple linking.

use crate::account_service::{AccountService, AccountSnapshot};
use crate::error::Result as AppErrorResult;

use acct_auth::{
    AppleSignInRequest, Credential, IdTokenSigner, IdTokenVerifier, InMemoryAuthBackend,
    SessionManager,
};
use acct_config::AuthConfig;
use acct_core::ProviderKind;
use acct_db::ProfileStore;

use std::collections::BTreeSet;
use std::sync::Arc;

use log::info;
use rand::Rng;
use serde::Serialize;
use sqlx::SqlitePool;

const DEMO_AUDIENCE: &str = "acct-demo";
const TOKEN_TTL_SECS: i64 = 3600;
/// Stand-in for the OAuth access token Google returns next to the ID token
pub const DEMO_GOOGLE_ACCESS_TOKEN: &str = "demo-access-token";

#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub anonymous: AccountSnapshot,
    pub linked: AccountSnapshot,
    pub providers: BTreeSet<ProviderKind>,
}

pub async fn run_demo(pool: SqlitePool, auth: &AuthConfig) -> AppErrorResult<DemoReport> {
    let mut secret = [0u8; 32];
    rand::rng().fill(&mut secret);

    let backend = Arc::new(InMemoryAuthBackend::new(
        IdTokenVerifier::with_hs256(&secret, DEMO_AUDIENCE, auth.token_leeway_secs),
        auth.min_password_length,
    ));
    let signer = IdTokenSigner::with_hs256(&secret, DEMO_AUDIENCE);
    let service = AccountService::new(
        Arc::new(SessionManager::new(backend)),
        Arc::new(ProfileStore::new(pool)),
    );

    let anonymous = service.sign_in_anonymously().await?;
    info!("Demo: anonymous user {}", anonymous.identity.id);
    service.add_preference("dark-mode").await?;

    let handle = &anonymous.identity.id[..8.min(anonymous.identity.id.len())];
    let email = format!("demo-{handle}@example.com");

    let mut google = signer.claims(format!("google-{handle}"), Some(email), TOKEN_TTL_SECS);
    google.picture = Some(format!("https://example.com/avatars/{handle}.png"));
    let google_token = signer.sign(&google)?;
    service
        .link(Credential::google(google_token, DEMO_GOOGLE_ACCESS_TOKEN))
        .await?;

    let request = AppleSignInRequest::with_nonce_length(auth.nonce_length);
    let mut apple = signer.claims(format!("apple-{handle}"), None, TOKEN_TTL_SECS);
    apple.nonce = Some(request.hashed_nonce().to_string());
    let apple_token = signer.sign(&apple)?;
    let linked = service
        .link(request.complete(apple_token, None, None).into_credential())
        .await?;

    let providers = service.providers().await?;
    info!("Demo: {} now linked to {:?}", linked.identity.id, providers);

    Ok(DemoReport {
        anonymous,
        linked,
        providers,
    })
}
