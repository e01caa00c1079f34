use tracing::{error, warn};

use crate::auth::{
    password::{hash_password, verify_password},
    repo::UserStore,
    repo_types::{NewUser, User},
};
use crate::error::{AppError, AppResult};

/// Input to [`create_user`], already pulled out of the request body.
#[derive(Debug, Default)]
pub struct Registration<'a> {
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub bio: Option<&'a str>,
}

fn present(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}

/// Validates, hashes and persists a new user.
///
/// The pre-check on the username only gives a fast answer; the unique
/// constraint in the store is what decides concurrent signups.
pub async fn create_user(store: &dyn UserStore, reg: Registration<'_>) -> AppResult<User> {
    let (Some(username), Some(password)) = (present(reg.username), present(reg.password)) else {
        return Err(AppError::validation("Username and password are required."));
    };

    if store.find_by_username(username).await?.is_some() {
        warn!(%username, "username already taken");
        return Err(AppError::DuplicateUsername);
    }

    let password_hash = hash_password(password)?;
    store
        .insert(NewUser {
            username,
            password_hash: &password_hash,
            image_url: reg.image_url,
            bio: reg.bio,
        })
        .await
}

/// True when `password` matches the hash stored for `user`.
pub fn authenticate(user: &User, password: &str) -> bool {
    match verify_password(password, &user.password_hash) {
        Ok(ok) => ok,
        Err(e) => {
            error!(error = %e, user_id = %user.id, "stored password hash unreadable");
            false
        }
    }
}

/// Looks up `username` and checks `password`, collapsing both failure modes
/// into [`AppError::InvalidCredentials`].
pub async fn login(store: &dyn UserStore, username: &str, password: &str) -> AppResult<User> {
    let Some(user) = store.find_by_username(username).await? else {
        warn!(%username, "login unknown username");
        return Err(AppError::InvalidCredentials);
    };
    if !authenticate(&user, password) {
        warn!(%username, user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }
    Ok(user)
}
