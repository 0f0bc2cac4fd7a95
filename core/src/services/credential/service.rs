//! Credential workflow: registration by e-mail, verification, login,
//! password management and session tokens

use std::sync::Arc;
use uuid::Uuid;

use af_shared::utils::email::{is_valid_email, mask_email, normalize_email};
use af_shared::utils::validation::{limits, validators};

use crate::domain::entities::notification::{EmailLinkMessage, NotificationQueue};
use crate::domain::entities::one_time_token::TokenPurpose;
use crate::domain::entities::token::{AccessToken, Claims, TokenPair, TokenType};
use crate::domain::entities::user::{User, UserChanges, UserLookup, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::cache::CacheStore;
use crate::services::notification::NotificationPublisher;
use crate::services::password::PasswordHasher;
use crate::services::token::{RevocationList, TokenService};
use crate::services::token_store::{CooldownStatus, OneTimeTokenStore};

use super::config::CredentialServiceConfig;

/// Credential workflow service
///
/// Owns no state: users live in the repository, one-time tokens and the
/// revocation list live in the cache.
pub struct CredentialService<U, C, P>
where
    U: UserRepository,
    C: CacheStore,
    P: NotificationPublisher,
{
    users: Arc<U>,
    verify_tokens: OneTimeTokenStore<C>,
    reset_tokens: OneTimeTokenStore<C>,
    revocations: RevocationList<C>,
    tokens: Arc<TokenService>,
    publisher: Arc<P>,
    hasher: PasswordHasher,
    config: CredentialServiceConfig,
}

impl<U, C, P> CredentialService<U, C, P>
where
    U: UserRepository,
    C: CacheStore,
    P: NotificationPublisher,
{
    /// Create a new credential service
    ///
    /// # Arguments
    ///
    /// * `users` - User repository
    /// * `cache` - Cache holding one-time tokens and the revocation list
    /// * `publisher` - Broker client for outgoing mail
    /// * `tokens` - JWT service
    /// * `hasher` - Password hasher
    /// * `config` - Token lifetimes and link base URL
    pub fn new(
        users: Arc<U>,
        cache: Arc<C>,
        publisher: Arc<P>,
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
        config: CredentialServiceConfig,
    ) -> Self {
        Self {
            users,
            verify_tokens: OneTimeTokenStore::new(Arc::clone(&cache), TokenPurpose::Verify),
            reset_tokens: OneTimeTokenStore::new(Arc::clone(&cache), TokenPurpose::Reset),
            revocations: RevocationList::new(cache),
            tokens,
            publisher,
            hasher,
            config,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.tokens
    }

    /// Start registration for an e-mail address and mail a verification link
    ///
    /// The user row is created on the first call; repeated calls after the
    /// cooldown rotate the token and mail a new link.
    pub async fn pre_register(&self, email: &str) -> DomainResult<()> {
        let email = Self::checked_email(email)?;

        if let Some(user) = self.users.find(&UserLookup::Email(email.clone())).await? {
            if user.email_verified {
                return Err(AuthError::EmailAlreadyVerified.into());
            }
        }

        let status = self
            .config
            .verify_policy
            .check(&self.verify_tokens, &email)
            .await?;
        if let CooldownStatus::Blocked(seconds) = status {
            return Err(AuthError::ResendCooldown { seconds }.into());
        }

        match self.users.create(User::new(email.clone())).await {
            Ok(user) => {
                tracing::info!(
                    user_id = %user.id,
                    email = %mask_email(&email),
                    event = "user_pre_registered",
                    "Created pending user"
                );
            }
            Err(DomainError::UniqueViolation { .. }) => {
                tracing::debug!(
                    email = %mask_email(&email),
                    "Pending user already exists"
                );
            }
            Err(e) => return Err(e),
        }

        let lifetime = self.config.verify_policy.token_lifetime;
        let token = match status {
            CooldownStatus::Allowed => self.verify_tokens.rotate(&email, lifetime).await?,
            _ => self.verify_tokens.issue(&email, lifetime).await?,
        };

        self.notify(
            NotificationQueue::SendVerifyToken,
            &self.verify_tokens,
            &email,
            &token,
        )
        .await
    }

    /// Mail a new verification link, honoring the resend cooldown
    pub async fn resend_verification(&self, email: &str) -> DomainResult<()> {
        let email = Self::checked_email(email)?;

        if let Some(user) = self.users.find(&UserLookup::Email(email.clone())).await? {
            if user.email_verified {
                return Err(AuthError::EmailAlreadyVerified.into());
            }
        }

        let status = self
            .config
            .verify_policy
            .check(&self.verify_tokens, &email)
            .await?;
        match status {
            CooldownStatus::NoActiveToken => Err(AuthError::RegistrationRestartRequired.into()),
            CooldownStatus::Blocked(seconds) => Err(AuthError::ResendCooldown { seconds }.into()),
            CooldownStatus::Allowed => {
                let token = self
                    .verify_tokens
                    .rotate(&email, self.config.verify_policy.token_lifetime)
                    .await?;
                self.notify(
                    NotificationQueue::ResendVerifyToken,
                    &self.verify_tokens,
                    &email,
                    &token,
                )
                .await
            }
        }
    }

    /// Confirm an e-mail address and set the account's username and password
    pub async fn verify_email(&self, token: &str, username: &str, password: &str) -> DomainResult<()> {
        Self::validate_username(username)?;
        Self::validate_password("password", password)?;

        let email = self
            .verify_tokens
            .resolve(token)
            .await?
            .ok_or(AuthError::TokenExpiredOrNotRequested)?;

        let user = self
            .users
            .find(&UserLookup::Email(email.clone()))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.email_verified {
            return Err(AuthError::EmailAlreadyVerified.into());
        }

        if let Some(owner) = self
            .users
            .find(&UserLookup::Username(username.to_string()))
            .await?
        {
            if owner.id != user.id {
                return Err(AuthError::UsernameTaken.into());
            }
        }

        let password_hash = self.hasher.hash(password).await?;
        let updated = self
            .users
            .update(
                &UserLookup::Id(user.id),
                UserChanges::verification(username.to_string(), password_hash),
            )
            .await
            .map_err(|e| match e {
                DomainError::UniqueViolation { .. } => AuthError::UsernameTaken.into(),
                other => other,
            })?;
        if updated == 0 {
            return Err(AuthError::UserNotFound.into());
        }

        self.verify_tokens.invalidate(token, &email).await?;

        tracing::info!(
            user_id = %user.id,
            event = "email_verified",
            "Email verified and credentials set"
        );
        Ok(())
    }

    /// Check credentials and issue an access and a refresh token
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<TokenPair> {
        let user = self
            .users
            .find(&UserLookup::Username(username.to_string()))
            .await?;

        // every rejection pays for one bcrypt comparison
        let Some(user) = user else {
            self.hasher.verify_nothing(password).await?;
            tracing::info!(event = "login_failed", reason = "unknown_user", "Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        };

        let matches = match &user.password_hash {
            Some(hash) => self.hasher.verify(password, hash).await?,
            None => self.hasher.verify_nothing(password).await?,
        };
        if !matches {
            tracing::info!(
                user_id = %user.id,
                event = "login_failed",
                reason = "bad_password",
                "Login rejected"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            tracing::warn!(user_id = %user.id, event = "login_blocked", "Blocked account tried to log in");
            return Err(AuthError::AccountBlocked.into());
        }

        let pair = self.tokens.issue_pair(user.id)?;
        tracing::info!(user_id = %user.id, event = "login_succeeded", "User logged in");
        Ok(pair)
    }

    /// Replace the password of a logged-in user
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        Self::validate_password("new_password", new_password)?;

        let user = self
            .users
            .find(&UserLookup::Id(user_id))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let matches = match &user.password_hash {
            Some(hash) => self.hasher.verify(old_password, hash).await?,
            None => false,
        };
        if !matches {
            return Err(AuthError::IncorrectPassword.into());
        }

        let password_hash = self.hasher.hash(new_password).await?;
        self.users
            .update(&UserLookup::Id(user_id), UserChanges::password(password_hash))
            .await?;

        tracing::info!(user_id = %user_id, event = "password_changed", "Password changed");
        Ok(())
    }

    /// Mail a password reset link to a verified account
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = Self::checked_email(email)?;

        if self.reset_tokens.has_active_token(&email).await? {
            return Err(AuthError::TokenAlreadySent.into());
        }

        let user = self
            .users
            .find(&UserLookup::Email(email.clone()))
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !user.email_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let token = self
            .reset_tokens
            .issue(&email, self.config.reset_token_lifetime)
            .await?;

        self.notify(
            NotificationQueue::SendResetPasswordToken,
            &self.reset_tokens,
            &email,
            &token,
        )
        .await
    }

    /// Set a new password using a mailed reset token
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        Self::validate_password("new_password", new_password)?;

        let email = self
            .reset_tokens
            .resolve(token)
            .await?
            .ok_or(AuthError::TokenExpiredOrNotRequested)?;

        let user = self
            .users
            .find(&UserLookup::Email(email.clone()))
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !user.email_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let password_hash = self.hasher.hash(new_password).await?;
        self.users
            .update(&UserLookup::Id(user.id), UserChanges::password(password_hash))
            .await?;

        self.reset_tokens.invalidate(token, &email).await?;

        tracing::info!(user_id = %user.id, event = "password_reset", "Password reset");
        Ok(())
    }

    /// Revoke the refresh token of the session owned by `user_id`
    pub async fn logout(&self, user_id: Uuid, refresh_token: &str) -> DomainResult<()> {
        let claims = self.tokens.decode(refresh_token, TokenType::Refresh)?;
        if claims.sub != user_id.to_string() {
            return Err(TokenError::InvalidClaims.into());
        }

        self.revocations.revoke(&claims.jti, claims.exp).await?;

        tracing::info!(user_id = %user_id, event = "logout", "User logged out");
        Ok(())
    }

    /// Issue a new access token from a refresh token that is not revoked
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AccessToken> {
        let claims = self.tokens.decode(refresh_token, TokenType::Refresh)?;

        if self.revocations.is_revoked(&claims.jti).await? {
            tracing::warn!(jti = %claims.jti, event = "revoked_token_used", "Revoked refresh token presented");
            return Err(TokenError::TokenRevoked.into());
        }

        let user_id = claims.user_id().map_err(|_| TokenError::InvalidClaims)?;
        self.tokens.issue_access_token(user_id)
    }

    /// Decode an access token presented by a client
    pub fn authenticate(&self, access_token: &str) -> DomainResult<Claims> {
        self.tokens.decode(access_token, TokenType::Access)
    }

    /// Profile of the current user
    pub async fn me(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        self.users
            .find(&UserLookup::Id(user_id))
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Publish the link for `token`; the token is withdrawn if publishing
    /// fails so the caller can retry without waiting out the cooldown
    async fn notify(
        &self,
        queue: NotificationQueue,
        store: &OneTimeTokenStore<C>,
        email: &str,
        token: &str,
    ) -> DomainResult<()> {
        let message = EmailLinkMessage::new(email, self.config.link(store.purpose(), token));

        if let Err(e) = self.publisher.publish(queue, &message).await {
            tracing::error!(
                queue = %queue,
                email = %mask_email(email),
                error = %e,
                event = "notification_publish_failed",
                "Failed to publish notification"
            );
            if let Err(cleanup) = store.invalidate(token, email).await {
                tracing::warn!(error = %cleanup, "Failed to withdraw unsent token");
            }
            return Err(e);
        }

        tracing::info!(
            queue = %queue,
            email = %mask_email(email),
            event = "notification_published",
            "Notification queued"
        );
        Ok(())
    }

    fn checked_email(email: &str) -> DomainResult<String> {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(normalize_email(email))
    }

    fn validate_username(username: &str) -> DomainResult<()> {
        if !validators::is_valid_username(username) {
            return Err(ValidationError::InvalidLength {
                field: "username".to_string(),
                min: limits::USERNAME_MIN,
                max: limits::USERNAME_MAX,
            }
            .into());
        }
        Ok(())
    }

    fn validate_password(field: &str, password: &str) -> DomainResult<()> {
        if !validators::is_valid_password(password) {
            return Err(ValidationError::InvalidLength {
                field: field.to_string(),
                min: limits::PASSWORD_MIN,
                max: limits::PASSWORD_MAX,
            }
            .into());
        }
        Ok(())
    }
}
