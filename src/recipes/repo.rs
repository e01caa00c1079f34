use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::recipes::repo_types::{NewRecipe, Recipe, RecipeWithOwnerRow};

/// Persistence for recipes.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn insert(&self, new: NewRecipe<'_>) -> AppResult<Recipe>;
    /// Recipes owned by `owner_id`, oldest first, joined with the owner's profile.
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<RecipeWithOwnerRow>>;
}

#[derive(Clone)]
pub struct PgRecipeStore {
    db: PgPool,
}

impl PgRecipeStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn insert(&self, new: NewRecipe<'_>) -> AppResult<Recipe> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (title, instructions, minutes_to_complete, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, instructions, minutes_to_complete, user_id, created_at
            "#,
        )
        .bind(new.title)
        .bind(new.instructions)
        .bind(new.minutes_to_complete)
        .bind(new.user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(recipe)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<RecipeWithOwnerRow>> {
        let rows = sqlx::query_as::<_, RecipeWithOwnerRow>(
            r#"
            SELECT r.id, r.title, r.instructions, r.minutes_to_complete, r.user_id,
                   u.username  AS owner_username,
                   u.image_url AS owner_image_url,
                   u.bio       AS owner_bio
              FROM recipes r
              JOIN users u ON u.id = r.user_id
             WHERE r.user_id = $1
             ORDER BY r.created_at ASC, r.id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
