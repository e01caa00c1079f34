use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: i32,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub instructions: &'a str,
    pub minutes_to_complete: i32,
    pub user_id: Uuid,
}

/// A recipe joined with its owner's public columns.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeWithOwnerRow {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: i32,
    pub user_id: Uuid,
    pub owner_username: String,
    pub owner_image_url: Option<String>,
    pub owner_bio: Option<String>,
}
