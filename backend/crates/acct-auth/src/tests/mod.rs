mod credential;

use crate::{
    AppleSignInRequest, AuthBackend, BackendUser, Credential, IdTokenSigner, IdTokenVerifier,
    InMemoryAuthBackend, Result as AuthErrorResult, SessionManager,
};

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

pub(crate) const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
pub(crate) const AUDIENCE: &str = "acct-test-client";
pub(crate) const MIN_PASSWORD_LENGTH: usize = 6;

pub(crate) struct TestContext {
    pub backend: Arc<InMemoryAuthBackend>,
    pub manager: SessionManager,
    pub signer: IdTokenSigner,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        let backend = Arc::new(InMemoryAuthBackend::new(
            IdTokenVerifier::with_hs256(SECRET, AUDIENCE, 0),
            MIN_PASSWORD_LENGTH,
        ));
        let manager = SessionManager::new(backend.clone());

        Self {
            backend,
            manager,
            signer: IdTokenSigner::with_hs256(SECRET, AUDIENCE),
        }
    }

    pub(crate) fn google(&self, sub: &str, email: Option<&str>) -> Credential {
        let claims = self.signer.claims(sub, email.map(str::to_string), 3600);
        Credential::google(self.signer.sign(&claims).unwrap(), "google-access-token")
    }

    pub(crate) fn expired_google(&self, sub: &str) -> Credential {
        let claims = self.signer.claims(sub, None, -3600);
        Credential::google(self.signer.sign(&claims).unwrap(), "google-access-token")
    }

    pub(crate) fn apple(&self, sub: &str, email: Option<&str>) -> Credential {
        let request = AppleSignInRequest::new();
        let mut claims = self.signer.claims(sub, email.map(str::to_string), 3600);
        claims.nonce = Some(request.hashed_nonce().to_string());
        let token = self.signer.sign(&claims).unwrap();

        request.complete(token, None, None).into_credential()
    }
}

/// Backend whose `link_credential` stops after the link landed until released.
pub(crate) struct GatedBackend {
    pub inner: Arc<InMemoryAuthBackend>,
    pub linked: Notify,
    pub release: Notify,
}

impl GatedBackend {
    pub(crate) fn new(inner: Arc<InMemoryAuthBackend>) -> Self {
        Self {
            inner,
            linked: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl AuthBackend for GatedBackend {
    async fn create_user(&self, email: &str, password: &str) -> AuthErrorResult<BackendUser> {
        self.inner.create_user(email, password).await
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthErrorResult<BackendUser> {
        self.inner.sign_in_with_password(email, password).await
    }

    async fn sign_in_with_credential(
        &self,
        credential: &Credential,
    ) -> AuthErrorResult<BackendUser> {
        self.inner.sign_in_with_credential(credential).await
    }

    async fn sign_in_anonymously(&self) -> AuthErrorResult<BackendUser> {
        self.inner.sign_in_anonymously().await
    }

    async fn link_credential(
        &self,
        uid: &str,
        credential: &Credential,
    ) -> AuthErrorResult<BackendUser> {
        let user = self.inner.link_credential(uid, credential).await?;
        self.linked.notify_one();
        self.release.notified().await;
        Ok(user)
    }

    async fn fetch_user(&self, uid: &str) -> AuthErrorResult<BackendUser> {
        self.inner.fetch_user(uid).await
    }

    async fn end_session(&self, uid: &str) -> AuthErrorResult<()> {
        self.inner.end_session(uid).await
    }

    async fn send_password_reset(&self, email: &str) -> AuthErrorResult<()> {
        self.inner.send_password_reset(email).await
    }

    async fn update_password(&self, uid: &str, new_password: &str) -> AuthErrorResult<()> {
        self.inner.update_password(uid, new_password).await
    }

    async fn send_email_change_verification(
        &self,
        uid: &str,
        new_email: &str,
    ) -> AuthErrorResult<()> {
        self.inner.send_email_change_verification(uid, new_email).await
    }

    async fn delete_user(&self, uid: &str) -> AuthErrorResult<()> {
        self.inner.delete_user(uid).await
    }
}

/// Session manager over a [`GatedBackend`], sharing the context's signer.
pub(crate) fn gated_manager(ctx: &TestContext) -> (Arc<GatedBackend>, SessionManager) {
    let gated = Arc::new(GatedBackend::new(ctx.backend.clone()));
    let manager = SessionManager::new(gated.clone());
    (gated, manager)
}
