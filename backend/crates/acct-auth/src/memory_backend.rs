//! In-process authentication backend.
//!
//! Behaves like the managed service the client talks to in production:
//! validates emails and password strength, keeps emails unique, verifies
//! OAuth ID tokens and tracks live sessions. Used by the test suites and
//! the `acct demo` command.

use crate::{
    AuthBackend, AuthError, BackendUser, Credential, IdTokenClaims, IdTokenVerifier,
    Result as AuthErrorResult, sha256_hex,
};

use acct_core::ProviderKind;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    PasswordReset,
    VerifyAndChangeEmail,
}

/// Mail the backend would have delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub kind: EmailKind,
    pub to: String,
}

#[derive(Debug, Clone)]
struct LinkedProvider {
    provider_id: String,
    /// Account id on the provider side (email for passwords, `sub` for OAuth)
    provider_uid: String,
}

#[derive(Debug, Clone)]
struct StoredUser {
    uid: String,
    email: Option<String>,
    photo_url: Option<String>,
    password_digest: Option<String>,
    is_anonymous: bool,
    providers: Vec<LinkedProvider>,
}

impl StoredUser {
    fn to_backend_user(&self) -> BackendUser {
        BackendUser {
            uid: self.uid.clone(),
            email: self.email.clone(),
            photo_url: self.photo_url.clone(),
            is_anonymous: self.is_anonymous,
            provider_ids: self
                .providers
                .iter()
                .map(|p| p.provider_id.clone())
                .collect(),
        }
    }

    fn has_provider_id(&self, provider_id: &str) -> bool {
        self.providers.iter().any(|p| p.provider_id == provider_id)
    }
}

#[derive(Default)]
struct BackendState {
    users: HashMap<String, StoredUser>,
    sessions: HashSet<String>,
    outbox: Vec<OutboundEmail>,
}

impl BackendState {
    fn uid_by_email(&self, email: &str) -> Option<&str> {
        self.users
            .values()
            .find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            })
            .map(|u| u.uid.as_str())
    }

    fn uid_by_provider(&self, provider_id: &str, provider_uid: &str) -> Option<&str> {
        self.users
            .values()
            .find(|u| {
                u.providers
                    .iter()
                    .any(|p| p.provider_id == provider_id && p.provider_uid == provider_uid)
            })
            .map(|u| u.uid.as_str())
    }

    #[track_caller]
    fn live_user_mut(&mut self, uid: &str) -> AuthErrorResult<&mut StoredUser> {
        if !self.sessions.contains(uid) {
            return Err(AuthError::session_expired(format!("no live session for {uid}")));
        }
        self.users
            .get_mut(uid)
            .ok_or_else(|| AuthError::session_expired(format!("account {uid} no longer exists")))
    }
}

/// Resolved credential ready to attach to an account.
struct VerifiedCredential {
    kind: ProviderKind,
    provider_uid: String,
    email: Option<String>,
    photo_url: Option<String>,
    password_digest_input: Option<String>,
}

pub struct InMemoryAuthBackend {
    state: RwLock<BackendState>,
    verifier: IdTokenVerifier,
    min_password_length: usize,
    unavailable: AtomicBool,
    fail_teardown: AtomicBool,
}

impl InMemoryAuthBackend {
    pub fn new(verifier: IdTokenVerifier, min_password_length: usize) -> Self {
        Self {
            state: RwLock::new(BackendState::default()),
            verifier,
            min_password_length,
            unavailable: AtomicBool::new(false),
            fail_teardown: AtomicBool::new(false),
        }
    }

    /// Simulate an outage: every call fails with `BackendUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make `end_session` fail with `SessionTeardownFailed`.
    pub fn set_fail_teardown(&self, fail: bool) {
        self.fail_teardown.store(fail, Ordering::SeqCst);
    }

    /// Attach a raw provider id this client may not know about.
    pub async fn attach_raw_provider(&self, uid: &str, provider_id: &str) -> bool {
        let mut state = self.state.write().await;
        match state.users.get_mut(uid) {
            Some(user) => {
                user.providers.push(LinkedProvider {
                    provider_id: provider_id.to_string(),
                    provider_uid: uid.to_string(),
                });
                user.is_anonymous = false;
                true
            }
            None => false,
        }
    }

    /// Drop the session of `uid` as if revoked server-side.
    pub async fn revoke_session(&self, uid: &str) {
        self.state.write().await.sessions.remove(uid);
    }

    pub async fn has_session(&self, uid: &str) -> bool {
        self.state.read().await.sessions.contains(uid)
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn sent_emails(&self) -> Vec<OutboundEmail> {
        self.state.read().await.outbox.clone()
    }

    #[track_caller]
    fn ensure_available(&self) -> AuthErrorResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::backend_unavailable("authentication service unreachable"));
        }
        Ok(())
    }

    #[track_caller]
    fn validate_email(email: &str) -> AuthErrorResult<()> {
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };

        if !valid {
            return Err(AuthError::invalid_credentials(format!(
                "malformed email address '{email}'"
            )));
        }
        Ok(())
    }

    #[track_caller]
    fn validate_password(&self, password: &str) -> AuthErrorResult<()> {
        if password.chars().count() < self.min_password_length {
            return Err(AuthError::invalid_credentials(format!(
                "weak password: at least {} characters required",
                self.min_password_length
            )));
        }
        Ok(())
    }

    fn password_digest(uid: &str, password: &str) -> String {
        sha256_hex(&format!("{uid}:{password}"))
    }

    fn new_uid() -> String {
        Uuid::new_v4().simple().to_string()
    }

    #[track_caller]
    fn verify_oauth(&self, credential: &Credential) -> AuthErrorResult<IdTokenClaims> {
        let verified = match credential {
            Credential::Google { id_token, .. } => self.verifier.verify(id_token),
            Credential::Apple {
                id_token,
                raw_nonce,
            } => self.verifier.verify_with_nonce(id_token, raw_nonce),
            Credential::Password { .. } => {
                return Err(AuthError::invalid_credentials("not an OAuth credential"));
            }
        };

        verified.map_err(|e| AuthError::invalid_credentials(e.to_string()))
    }

    fn resolve(&self, credential: &Credential) -> AuthErrorResult<VerifiedCredential> {
        match credential {
            Credential::Password { email, password } => {
                Self::validate_email(email)?;
                self.validate_password(password)?;
                Ok(VerifiedCredential {
                    kind: ProviderKind::Password,
                    provider_uid: email.to_lowercase(),
                    email: Some(email.clone()),
                    photo_url: None,
                    password_digest_input: Some(password.clone()),
                })
            }
            Credential::Google { .. } | Credential::Apple { .. } => {
                let claims = self.verify_oauth(credential)?;
                Ok(VerifiedCredential {
                    kind: credential.provider_kind(),
                    provider_uid: claims.sub,
                    email: claims.email,
                    photo_url: claims.picture,
                    password_digest_input: None,
                })
            }
        }
    }
}

#[async_trait]
impl AuthBackend for InMemoryAuthBackend {
    async fn create_user(&self, email: &str, password: &str) -> AuthErrorResult<BackendUser> {
        self.ensure_available()?;
        Self::validate_email(email)?;
        self.validate_password(password)?;

        let mut state = self.state.write().await;
        if state.uid_by_email(email).is_some() {
            return Err(AuthError::already_exists(format!(
                "email '{email}' is already in use"
            )));
        }

        let uid = Self::new_uid();
        let user = StoredUser {
            uid: uid.clone(),
            email: Some(email.to_string()),
            photo_url: None,
            password_digest: Some(Self::password_digest(&uid, password)),
            is_anonymous: false,
            providers: vec![LinkedProvider {
                provider_id: ProviderKind::Password.as_str().to_string(),
                provider_uid: email.to_lowercase(),
            }],
        };

        let reported = user.to_backend_user();
        state.users.insert(uid.clone(), user);
        state.sessions.insert(uid.clone());
        debug!("Created password account {uid}");
        Ok(reported)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthErrorResult<BackendUser> {
        self.ensure_available()?;

        let mut state = self.state.write().await;
        let user = state
            .uid_by_email(email)
            .and_then(|uid| state.users.get(uid))
            .filter(|u| {
                u.password_digest.as_deref()
                    == Some(Self::password_digest(&u.uid, password).as_str())
            })
            .map(StoredUser::to_backend_user)
            .ok_or_else(|| AuthError::invalid_credentials("email or password is incorrect"))?;

        state.sessions.insert(user.uid.clone());
        Ok(user)
    }

    async fn sign_in_with_credential(
        &self,
        credential: &Credential,
    ) -> AuthErrorResult<BackendUser> {
        if let Credential::Password { email, password } = credential {
            return self.sign_in_with_password(email, password).await;
        }

        self.ensure_available()?;
        let verified = self.resolve(credential)?;
        let provider_id = verified.kind.as_str();

        let mut state = self.state.write().await;

        if let Some(uid) = state
            .uid_by_provider(provider_id, &verified.provider_uid)
            .map(str::to_string)
        {
            state.sessions.insert(uid.clone());
            let user = state.users[&uid].to_backend_user();
            return Ok(user);
        }

        if let Some(email) = verified.email.as_deref()
            && state.uid_by_email(email).is_some()
        {
            return Err(AuthError::already_exists(format!(
                "an account already exists for '{email}' with a different sign-in method"
            )));
        }

        let uid = Self::new_uid();
        let user = StoredUser {
            uid: uid.clone(),
            email: verified.email,
            photo_url: verified.photo_url,
            password_digest: None,
            is_anonymous: false,
            providers: vec![LinkedProvider {
                provider_id: provider_id.to_string(),
                provider_uid: verified.provider_uid,
            }],
        };

        let reported = user.to_backend_user();
        state.users.insert(uid.clone(), user);
        state.sessions.insert(uid.clone());
        debug!("Created {provider_id} account {uid}");
        Ok(reported)
    }

    async fn sign_in_anonymously(&self) -> AuthErrorResult<BackendUser> {
        self.ensure_available()?;

        let uid = Self::new_uid();
        let user = StoredUser {
            uid: uid.clone(),
            email: None,
            photo_url: None,
            password_digest: None,
            is_anonymous: true,
            providers: Vec::new(),
        };

        let reported = user.to_backend_user();
        let mut state = self.state.write().await;
        state.users.insert(uid.clone(), user);
        state.sessions.insert(uid.clone());
        debug!("Created anonymous account {uid}");
        Ok(reported)
    }

    async fn link_credential(
        &self,
        uid: &str,
        credential: &Credential,
    ) -> AuthErrorResult<BackendUser> {
        self.ensure_available()?;
        let verified = self.resolve(credential)?;
        let provider_id = verified.kind.as_str();

        let mut state = self.state.write().await;

        if state.live_user_mut(uid)?.has_provider_id(provider_id) {
            return Err(AuthError::already_linked(verified.kind));
        }

        if let Some(owner) = state.uid_by_provider(provider_id, &verified.provider_uid)
            && owner != uid
        {
            return Err(AuthError::already_exists(format!(
                "this {provider_id} credential belongs to another account"
            )));
        }

        if let Some(email) = verified.email.as_deref()
            && let Some(owner) = state.uid_by_email(email)
            && owner != uid
        {
            return Err(AuthError::already_exists(format!(
                "email '{email}' is already in use"
            )));
        }

        let user = state.live_user_mut(uid)?;
        user.providers.push(LinkedProvider {
            provider_id: provider_id.to_string(),
            provider_uid: verified.provider_uid,
        });
        user.is_anonymous = false;
        if user.email.is_none() {
            user.email = verified.email;
        }
        if user.photo_url.is_none() {
            user.photo_url = verified.photo_url;
        }
        if let Some(password) = verified.password_digest_input {
            user.password_digest = Some(Self::password_digest(uid, &password));
        }

        debug!("Linked {provider_id} to {uid}");
        Ok(user.to_backend_user())
    }

    async fn fetch_user(&self, uid: &str) -> AuthErrorResult<BackendUser> {
        self.ensure_available()?;

        let mut state = self.state.write().await;
        Ok(state.live_user_mut(uid)?.to_backend_user())
    }

    async fn end_session(&self, uid: &str) -> AuthErrorResult<()> {
        self.ensure_available()?;

        if self.fail_teardown.load(Ordering::SeqCst) {
            return Err(AuthError::session_teardown_failed(
                "could not clear persisted session",
            ));
        }

        self.state.write().await.sessions.remove(uid);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> AuthErrorResult<()> {
        self.ensure_available()?;
        Self::validate_email(email)?;

        let mut state = self.state.write().await;
        if state.uid_by_email(email).is_none() {
            return Err(AuthError::invalid_credentials(format!(
                "no account registered for '{email}'"
            )));
        }

        state.outbox.push(OutboundEmail {
            kind: EmailKind::PasswordReset,
            to: email.to_string(),
        });
        Ok(())
    }

    async fn update_password(&self, uid: &str, new_password: &str) -> AuthErrorResult<()> {
        self.ensure_available()?;
        self.validate_password(new_password)?;

        let mut state = self.state.write().await;
        let user = state.live_user_mut(uid)?;
        if user.email.is_none() {
            return Err(AuthError::invalid_credentials(
                "account has no email to attach a password to",
            ));
        }

        user.password_digest = Some(Self::password_digest(uid, new_password));
        Ok(())
    }

    async fn send_email_change_verification(
        &self,
        uid: &str,
        new_email: &str,
    ) -> AuthErrorResult<()> {
        self.ensure_available()?;
        Self::validate_email(new_email)?;

        let mut state = self.state.write().await;
        state.live_user_mut(uid)?;

        if let Some(owner) = state.uid_by_email(new_email)
            && owner != uid
        {
            return Err(AuthError::already_exists(format!(
                "email '{new_email}' is already in use"
            )));
        }

        state.outbox.push(OutboundEmail {
            kind: EmailKind::VerifyAndChangeEmail,
            to: new_email.to_string(),
        });
        Ok(())
    }

    async fn delete_user(&self, uid: &str) -> AuthErrorResult<()> {
        self.ensure_available()?;

        let mut state = self.state.write().await;
        state.live_user_mut(uid)?;
        state.users.remove(uid);
        state.sessions.remove(uid);
        Ok(())
    }
}
