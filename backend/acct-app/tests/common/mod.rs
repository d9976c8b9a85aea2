#![allow(dead_code)]

use acct_app::AccountService;
use acct_auth::{
    Credential, IdTokenSigner, IdTokenVerifier, InMemoryAuthBackend, SessionManager,
};
use acct_db::{ProfileStore, in_memory_pool};

use std::sync::Arc;

pub const SECRET: &[u8] = b"account-flow-test-secret-32-byte";
pub const AUDIENCE: &str = "acct-app-tests";

pub struct TestApp {
    pub service: AccountService,
    pub backend: Arc<InMemoryAuthBackend>,
    pub signer: IdTokenSigner,
}

impl TestApp {
    pub async fn new() -> Self {
        let backend = Arc::new(InMemoryAuthBackend::new(
            IdTokenVerifier::with_hs256(SECRET, AUDIENCE, 0),
            6,
        ));
        let pool = in_memory_pool().await.expect("Failed to create test pool");
        let service = AccountService::new(
            Arc::new(SessionManager::new(backend.clone())),
            Arc::new(ProfileStore::new(pool)),
        );

        Self {
            service,
            backend,
            signer: IdTokenSigner::with_hs256(SECRET, AUDIENCE),
        }
    }

    pub fn google(&self, sub: &str, email: &str) -> Credential {
        let mut claims = self.signer.claims(sub, Some(email.to_string()), 3600);
        claims.picture = Some(format!("https://example.com/{sub}.png"));
        Credential::google(
            self.signer.sign(&claims).expect("sign google token"),
            "access-token",
        )
    }
}
