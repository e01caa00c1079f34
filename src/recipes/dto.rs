use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::dto::PublicUser;
use crate::recipes::repo_types::{Recipe, RecipeWithOwnerRow};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub minutes_to_complete: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: i32,
    pub user: PublicUser,
}

impl RecipeResponse {
    pub fn new(recipe: Recipe, owner: PublicUser) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            instructions: recipe.instructions,
            minutes_to_complete: recipe.minutes_to_complete,
            user: owner,
        }
    }
}

impl From<RecipeWithOwnerRow> for RecipeResponse {
    fn from(r: RecipeWithOwnerRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            instructions: r.instructions,
            minutes_to_complete: r.minutes_to_complete,
            user: PublicUser {
                id: r.user_id,
                username: r.owner_username,
                image_url: r.owner_image_url,
                bio: r.owner_bio,
            },
        }
    }
}
