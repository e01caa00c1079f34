use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String, // Argon2 PHC string; responses go through PublicUser
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Insert payload; the hash is already derived.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub image_url: Option<&'a str>,
    pub bio: Option<&'a str>,
}
