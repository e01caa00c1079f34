//! In-memory stores used by the test suite in place of Postgres.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::{
    repo::UserStore,
    repo_types::{NewUser, User},
};
use crate::error::{AppError, AppResult};
use crate::recipes::{
    repo::RecipeStore,
    repo_types::{NewRecipe, Recipe, RecipeWithOwnerRow},
};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new: NewUser<'_>) -> AppResult<User> {
        // uniqueness check and push under one lock, like a UNIQUE index
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new.username) {
            return Err(AppError::DuplicateUsername);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new.username.to_string(),
            password_hash: new.password_hash.to_string(),
            image_url: new.image_url.map(str::to_string),
            bio: new.bio.map(str::to_string),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

pub struct MemoryRecipeStore {
    recipes: Mutex<Vec<Recipe>>,
    users: Arc<MemoryUserStore>,
}

impl MemoryRecipeStore {
    pub fn new(users: Arc<MemoryUserStore>) -> Self {
        Self {
            recipes: Mutex::new(Vec::new()),
            users,
        }
    }

    pub fn len(&self) -> usize {
        self.recipes.lock().unwrap().len()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn insert(&self, new: NewRecipe<'_>) -> AppResult<Recipe> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            title: new.title.to_string(),
            instructions: new.instructions.to_string(),
            minutes_to_complete: new.minutes_to_complete,
            user_id: new.user_id,
            created_at: OffsetDateTime::now_utc(),
        };
        self.recipes.lock().unwrap().push(recipe.clone());
        Ok(recipe)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<RecipeWithOwnerRow>> {
        let Some(owner) = self.users.find_by_id(owner_id).await? else {
            return Ok(Vec::new());
        };
        let recipes = self.recipes.lock().unwrap();
        Ok(recipes
            .iter()
            .filter(|r| r.user_id == owner_id)
            .map(|r| RecipeWithOwnerRow {
                id: r.id,
                title: r.title.clone(),
                instructions: r.instructions.clone(),
                minutes_to_complete: r.minutes_to_complete,
                user_id: r.user_id,
                owner_username: owner.username.clone(),
                owner_image_url: owner.image_url.clone(),
                owner_bio: owner.bio.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn concurrent_inserts_keep_usernames_unique() {
        let store = Arc::new(MemoryUserStore::default());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert(NewUser {
                        username: "chef1",
                        password_hash: "h",
                        image_url: None,
                        bio: None,
                    })
                    .await
                    .is_ok()
            }));
        }
        let mut ok = 0;
        for h in handles {
            if h.await.unwrap() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.len(), 1);
    }
}
