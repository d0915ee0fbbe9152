use super::config::JwtConfig;
use crate::errors::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use super::config::{ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL};

/// Role carried by every authenticated account
pub const ROLE_USER: &str = "user";
/// Role carried by staff accounts; required for the review endpoints
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication credentials were not provided")]
    MissingToken,

    #[error("Token is invalid or expired")]
    InvalidToken,

    #[error("Token is invalid or expired")]
    Expired,

    #[error("Token has wrong type")]
    WrongTokenType,

    #[error("Failed to sign token: {0}")]
    Encoding(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Encoding(msg) => AppError::InternalServerError(msg),
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

/// Distinguishes short-lived access tokens from refresh tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // hrms_id of the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl JwtClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

/// Access and refresh token pair returned by login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Stateless HS256 token issuer and verifier.
///
/// Tokens are self-contained: there is no revocation list, so a token stays
/// valid until `exp`.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: i64,
    refresh_ttl: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(
            access_ttl = config.access_ttl_secs,
            refresh_ttl = config.refresh_ttl_secs,
            "JWT auth initialized"
        );
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl: config.access_ttl_secs,
            refresh_ttl: config.refresh_ttl_secs,
        }
    }

    /// Issue an access/refresh pair for a freshly authenticated account.
    pub fn issue_pair(
        &self,
        sub: &str,
        email: Option<&str>,
        roles: &[String],
    ) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.create_access_token(sub, email, roles)?,
            refresh: self.create_refresh_token(sub, email, roles)?,
        })
    }

    pub fn create_access_token(
        &self,
        sub: &str,
        email: Option<&str>,
        roles: &[String],
    ) -> Result<String, AuthError> {
        self.create_token(sub, email, roles, TokenType::Access, self.access_ttl)
    }

    pub fn create_refresh_token(
        &self,
        sub: &str,
        email: Option<&str>,
        roles: &[String],
    ) -> Result<String, AuthError> {
        self.create_token(sub, email, roles, TokenType::Refresh, self.refresh_ttl)
    }

    fn create_token(
        &self,
        sub: &str,
        email: Option<&str>,
        roles: &[String],
        token_type: TokenType,
        ttl_seconds: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: sub.to_string(),
            email: email.map(str::to_string),
            roles: roles.to_vec(),
            token_type,
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            })
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<JwtClaims, AuthError> {
        let claims = self.decode(token)?;
        if claims.token_type != expected {
            return Err(AuthError::WrongTokenType);
        }
        Ok(claims)
    }

    /// Verify a token presented as a bearer credential.
    pub fn verify_access_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        self.verify(token, TokenType::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        self.verify(token, TokenType::Refresh)
    }

    /// Exchange a valid refresh token for a new access token with the same identity.
    pub fn refresh_access_token(&self, refresh: &str) -> Result<String, AuthError> {
        let claims = self.verify_refresh_token(refresh)?;
        self.create_access_token(&claims.sub, claims.email.as_deref(), &claims.roles)
    }
}
