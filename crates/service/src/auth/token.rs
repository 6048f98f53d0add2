use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::Role;

use super::errors::AuthError;

/// Marker claim distinguishing refresh tokens from access tokens.
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    token_type: Option<String>,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256 session tokens.
///
/// The signing secret and both TTLs are fixed at construction and immutable
/// for the process lifetime. Issuance and verification are pure and safe to
/// call from any number of threads.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    pub fn from_config(cfg: &configs::TokenConfig) -> Self {
        Self::new(&cfg.secret, cfg.access_ttl_secs, cfg.refresh_ttl_secs)
    }

    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Short-lived token carrying the claims API handlers authorize against.
    pub fn issue_access_token(
        &self,
        account_id: Uuid,
        username: &str,
        role: Role,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        self.sign(Claims {
            sub: account_id.to_string(),
            username: Some(username.to_string()),
            role: Some(role.as_str().to_string()),
            token_type: None,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        })
    }

    /// Longer-lived token carrying only the subject and a type marker, so it
    /// cannot stand in for an access token at a claims-checking caller.
    pub fn issue_refresh_token(&self, account_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        self.sign(Claims {
            sub: account_id.to_string(),
            username: None,
            role: None,
            token_type: Some(REFRESH_TOKEN_TYPE.to_string()),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        })
    }

    /// True iff the signature verifies and the token is not expired.
    /// Never errors; any malformed input is simply invalid.
    pub fn validate(&self, token: &str) -> bool {
        self.decode_claims(token).is_ok()
    }

    /// Extract the subject account id. Unlike [`validate`](Self::validate)
    /// this is for callers that need the identity, and it fails with
    /// `InvalidToken` on any signature, structure, or expiry problem.
    pub fn subject_of(&self, token: &str) -> Result<Uuid, AuthError> {
        let claims = self.decode_claims(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::InvalidToken("subject is not a valid account id".into()))
    }

    /// Extract a named claim after verification. A claim the token does not
    /// carry (e.g. `username` on a refresh token) is an `InvalidToken` error.
    pub fn claim(&self, token: &str, name: &str) -> Result<String, AuthError> {
        let claims = self.decode_claims(token)?;
        let value = match name {
            "sub" => Some(claims.sub),
            "username" => claims.username,
            "role" => claims.role,
            "type" => claims.token_type,
            _ => None,
        };
        value.ok_or_else(|| AuthError::InvalidToken(format!("missing claim: {}", name)))
    }

    /// True iff this is a valid, unexpired refresh token.
    pub fn is_refresh_token(&self, token: &str) -> bool {
        matches!(self.decode_claims(token), Ok(c) if c.token_type.as_deref() == Some(REFRESH_TOKEN_TYPE))
    }

    fn sign(&self, claims: Claims) -> Result<String, AuthError> {
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("0123456789abcdef0123456789abcdef", 900, 86_400)
    }

    #[test]
    fn subject_round_trip() {
        let iss = issuer();
        let id = Uuid::new_v4();
        let token = iss.issue_access_token(id, "alice", Role::Standard).unwrap();
        assert!(iss.validate(&token));
        assert_eq!(iss.subject_of(&token).unwrap(), id);
    }

    #[test]
    fn access_token_claims() {
        let iss = issuer();
        let token = iss
            .issue_access_token(Uuid::new_v4(), "alice", Role::Creator)
            .unwrap();
        assert_eq!(iss.claim(&token, "username").unwrap(), "alice");
        assert_eq!(iss.claim(&token, "role").unwrap(), "creator");
        assert!(!iss.is_refresh_token(&token));
    }

    #[test]
    fn refresh_token_has_no_authorization_claims() {
        let iss = issuer();
        let token = iss.issue_refresh_token(Uuid::new_v4()).unwrap();
        assert!(iss.validate(&token));
        assert!(iss.is_refresh_token(&token));
        assert_eq!(iss.claim(&token, "type").unwrap(), REFRESH_TOKEN_TYPE);
        assert!(matches!(
            iss.claim(&token, "username"),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(matches!(
            iss.claim(&token, "role"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_rejected() {
        // Negative TTL yields a token whose expiry is already in the past.
        let iss = TokenIssuer::new("0123456789abcdef0123456789abcdef", -5, -5);
        let token = iss
            .issue_access_token(Uuid::new_v4(), "alice", Role::Standard)
            .unwrap();
        assert!(!iss.validate(&token));
        assert!(matches!(
            iss.subject_of(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn built_from_config() {
        let cfg = configs::TokenConfig {
            secret: "0123456789abcdef0123456789abcdef".into(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 86_400,
        };
        let iss = TokenIssuer::from_config(&cfg);
        assert_eq!(iss.access_ttl_seconds(), 900);
        let token = iss.issue_refresh_token(Uuid::new_v4()).unwrap();
        assert!(iss.validate(&token));
    }

    #[test]
    fn wrong_secret_rejected() {
        let iss = issuer();
        let other = TokenIssuer::new("another-secret-another-secret!!!", 900, 86_400);
        let token = iss.issue_access_token(Uuid::new_v4(), "alice", Role::Standard).unwrap();
        assert!(!other.validate(&token));
    }

    #[test]
    fn tampered_token_rejected() {
        let iss = issuer();
        let token = iss.issue_access_token(Uuid::new_v4(), "alice", Role::Standard).unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        assert!(!iss.validate(&tampered));
        assert!(!iss.validate("not.a.jwt"));
        assert!(!iss.validate(""));
    }
}
