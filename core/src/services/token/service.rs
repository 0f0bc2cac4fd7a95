//! JWT issuing and decoding for access and refresh tokens

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{AccessToken, Claims, TokenPair, TokenType};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs and verifies session tokens
///
/// Stateless; revocation is handled by [`super::RevocationList`].
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues an access and a refresh token for a user
    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let access = self.issue_access_token(user_id)?;
        let refresh_claims = self.claims(user_id, TokenType::Refresh);

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: self.encode_jwt(&refresh_claims)?,
            access_expires_in: access.expires_in,
            refresh_expires_in: self.config.refresh_token_expiry,
        })
    }

    /// Issues a fresh access token
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<AccessToken, DomainError> {
        let claims = self.claims(user_id, TokenType::Access);
        Ok(AccessToken {
            token: self.encode_jwt(&claims)?,
            expires_in: self.config.access_token_expiry,
        })
    }

    /// Verifies a token's signature, time window, issuer and audience, and
    /// checks it is of the expected type
    pub fn decode(&self, token: &str, expected: TokenType) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                ErrorKind::ImmatureSignature => DomainError::Token(TokenError::TokenNotYetValid),
                ErrorKind::InvalidSignature => DomainError::Token(TokenError::InvalidSignature),
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    DomainError::Token(TokenError::InvalidClaims)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })?;

        if token_data.claims.token_type != expected {
            return Err(DomainError::Token(TokenError::WrongTokenType {
                expected: expected.as_str().to_string(),
            }));
        }

        Ok(token_data.claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn claims(&self, user_id: Uuid, token_type: TokenType) -> Claims {
        let ttl = match token_type {
            TokenType::Access => self.config.access_token_expiry,
            TokenType::Refresh => self.config.refresh_token_expiry,
        };
        Claims::new(
            user_id,
            token_type,
            ttl,
            &self.config.issuer,
            &self.config.audience,
        )
    }
}
