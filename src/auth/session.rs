//! Cookie-carried session tokens.
//!
//! The session is an HS256 JWT stored in an `HttpOnly` cookie. Nothing is kept
//! server-side: the signature is what makes the user id trustworthy, and an
//! expired, tampered or foreign token simply reads as "no session".

use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    config::{SessionConfig, MAX_SESSION_TTL_MINUTES},
    error::AppError,
    state::AppState,
};

/// Session token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,   // user ID
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}

/// Signing keys plus the cookie settings they travel with.
#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl From<&SessionConfig> for SessionKeys {
    fn from(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::from_secs(cfg.ttl_minutes.clamp(0, MAX_SESSION_TTL_MINUTES) as u64 * 60),
            cookie_name: cfg.cookie_name.clone(),
            cookie_secure: cfg.cookie_secure,
        }
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        SessionKeys::from(&state.config.session)
    }
}

impl SessionKeys {
    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = SessionClaims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "session token signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<SessionClaims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<SessionClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// `Set-Cookie` value binding the client to `user_id`.
    pub fn set_cookie(&self, user_id: Uuid) -> Result<HeaderValue, AppError> {
        let token = self.sign(user_id)?;
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            token,
            self.ttl.as_secs()
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.into()))
    }

    /// `Set-Cookie` value that makes the client drop its session.
    pub fn clear_cookie(&self) -> Result<HeaderValue, AppError> {
        let mut cookie = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.into()))
    }

    /// User id of the session presented in `headers`, if any and valid.
    ///
    /// Every cookie carrying the session name is tried in order; browsers may
    /// send several when cookies for more than one path or domain apply.
    pub fn read(&self, headers: &HeaderMap) -> Option<Uuid> {
        cookie_values(headers, &self.cookie_name).find_map(|token| match self.verify(token) {
            Ok(claims) => Some(claims.sub),
            Err(e) => {
                warn!(error = %e, "rejected session cookie");
                None
            }
        })
    }
}

fn cookie_values<'a>(headers: &'a HeaderMap, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(move |(k, v)| *k == name && !v.is_empty())
        .map(|(_, v)| v)
}

/// Authenticated caller, resolved to an existing user.
///
/// Rejects with 401 when the request has no valid session or the session's
/// user is gone.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let user_id = keys.read(&parts.headers).ok_or(AppError::Unauthorized)?;
        match state.users.find_by_id(user_id).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                warn!(%user_id, "session refers to a missing user");
                Err(AppError::Unauthorized)
            }
        }
    }
}
