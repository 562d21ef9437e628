use thiserror::Error;
use tracing::debug;

use crate::backend::{AuthReceipt, Backend, BackendError};
use crate::store::{Credential, CredentialStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    /// Signup confirmation mismatch. Reported before any backend call.
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Authentication state, re-derived from the credential store on demand so
/// it survives process restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated(Credential),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(credential) => Some(&credential.user_id),
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(credential) => Some(&credential.token),
        }
    }
}

/// Orchestrates signup, login and logout against a backend and the
/// credential store. The backend is passed per call rather than owned, so
/// one controller serves both variants.
pub struct SessionController {
    store: CredentialStore,
}

impl SessionController {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn current(&self) -> Session {
        match self.store.load() {
            Some(credential) => Session::Authenticated(credential),
            None => Session::Anonymous,
        }
    }

    pub fn signup(
        &self,
        backend: &dyn Backend,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<AuthReceipt, SessionError> {
        if password != confirm {
            return Err(SessionError::PasswordMismatch);
        }
        let receipt = backend.signup(email, password)?;
        self.persist(&receipt)?;
        debug!(user_id = %receipt.user_id, "signed up");
        Ok(receipt)
    }

    pub fn login(
        &self,
        backend: &dyn Backend,
        email: &str,
        password: &str,
    ) -> Result<AuthReceipt, SessionError> {
        let receipt = backend.login(email, password)?;
        self.persist(&receipt)?;
        debug!(user_id = %receipt.user_id, "logged in");
        Ok(receipt)
    }

    /// Always succeeds; clearing an absent credential is a no-op.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        debug!("logged out");
        Ok(())
    }

    fn persist(&self, receipt: &AuthReceipt) -> Result<(), StoreError> {
        self.store.save(&Credential {
            token: receipt.token.clone(),
            user_id: receipt.user_id.clone(),
        })
    }
}
