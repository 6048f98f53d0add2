use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use models::{validate, Account, PublicProfile};

use super::domain::{AuthResult, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password;
use super::repository::{StoreError, UserStore};
use super::token::TokenIssuer;

/// Auth business service independent of transport and storage backend.
pub struct AuthService<S: UserStore> {
    store: Arc<S>,
    tokens: TokenIssuer,
}

impl<S: UserStore> AuthService<S> {
    pub fn new(store: Arc<S>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Register a new account and issue its first token pair.
    ///
    /// The existence pre-checks give fast, specific errors on the common
    /// path; the store's atomic uniqueness enforcement on `save` is what
    /// decides concurrent duplicates. Nothing is written before that single
    /// save, so a failure part-way leaves no record.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, TokenIssuer};
    /// use service::auth::repository::memory::MemoryUserStore;
    /// use service::auth::domain::RegisterInput;
    /// let store = Arc::new(MemoryUserStore::default());
    /// let svc = AuthService::new(store, TokenIssuer::new("0123456789abcdef", 900, 86400));
    /// let input = RegisterInput {
    ///     email: "user@example.com".into(),
    ///     username: "user1".into(),
    ///     password: "Secret123".into(),
    ///     full_name: "Test User".into(),
    /// };
    /// let res = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(res.profile.username, "user1");
    /// assert!(!res.access_token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResult, AuthError> {
        validate::validate_email(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        validate::validate_username(&input.username)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        validate::validate_password(&input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        validate::validate_full_name(&input.full_name)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        if self
            .store
            .exists_by_email(&input.email)
            .await
            .map_err(map_store_err)?
        {
            debug!("email already registered");
            return Err(AuthError::EmailTaken);
        }
        if self
            .store
            .exists_by_username(&input.username)
            .await
            .map_err(map_store_err)?
        {
            debug!("username already taken");
            return Err(AuthError::UsernameTaken);
        }

        let hash = password::hash_password(&input.password)?;
        let account = Account::new(&input.email, &input.username, hash, &input.full_name);
        // A racing registration loses here, not at the pre-checks above.
        let account = self.store.save(account).await.map_err(map_store_err)?;

        info!(account_id = %account.id, username = %account.username, "account_registered");
        self.issue_result(&account)
    }

    /// Authenticate by email or username and issue a token pair.
    ///
    /// Unknown identifier and wrong password both return
    /// `AuthError::InvalidCredentials` with the same message; the status
    /// check only runs after the password proves the caller's identity.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, TokenIssuer};
    /// use service::auth::repository::memory::MemoryUserStore;
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// let store = Arc::new(MemoryUserStore::default());
    /// let svc = AuthService::new(store, TokenIssuer::new("0123456789abcdef", 900, 86400));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     email: "u@e.com".into(), username: "user1".into(),
    ///     password: "Passw0rd".into(), full_name: "N".into(),
    /// }));
    /// let res = tokio_test::block_on(svc.login(LoginInput {
    ///     identifier: "user1".into(), password: "Passw0rd".into(),
    /// })).unwrap();
    /// assert!(res.profile.last_login_at.is_some());
    /// ```
    #[instrument(skip(self, input), fields(identifier = %input.identifier))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthResult, AuthError> {
        let mut account = self
            .store
            .find_by_email_or_username(&input.identifier)
            .await
            .map_err(map_store_err)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(&input.password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        if !account.is_active() {
            return Err(AuthError::AccountNotActive);
        }

        account.record_login(Utc::now());
        let account = self.store.save(account).await.map_err(map_store_err)?;

        info!(account_id = %account.id, username = %account.username, "account_logged_in");
        self.issue_result(&account)
    }

    fn issue_result(&self, account: &Account) -> Result<AuthResult, AuthError> {
        let access_token =
            self.tokens
                .issue_access_token(account.id, &account.username, account.role)?;
        let refresh_token = self.tokens.issue_refresh_token(account.id)?;
        Ok(AuthResult {
            access_token,
            refresh_token,
            expires_in: self.tokens.access_ttl_seconds(),
            profile: PublicProfile::from(account),
        })
    }
}

/// Translate collaborator failures into the auth taxonomy. A late uniqueness
/// violation from `save` means this call lost the registration race.
fn map_store_err(err: StoreError) -> AuthError {
    match err {
        StoreError::DuplicateEmail => AuthError::EmailTaken,
        StoreError::DuplicateUsername => AuthError::UsernameTaken,
        StoreError::Unavailable(msg) => AuthError::StoreUnavailable(msg),
    }
}
