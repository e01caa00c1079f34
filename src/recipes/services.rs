use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::recipes::{
    repo::RecipeStore,
    repo_types::{NewRecipe, Recipe},
};

pub const MIN_INSTRUCTIONS_CHARS: usize = 50;

#[derive(Debug, Default)]
pub struct RecipeDraft<'a> {
    pub title: Option<&'a str>,
    pub instructions: Option<&'a str>,
    pub minutes_to_complete: Option<i64>,
}

/// Presence and length checks. Runs before anything touches the store.
pub fn validate<'a>(draft: &RecipeDraft<'a>, owner_id: Uuid) -> AppResult<NewRecipe<'a>> {
    let title = draft.title.filter(|s| !s.trim().is_empty());
    let instructions = draft.instructions.filter(|s| !s.trim().is_empty());
    let (Some(title), Some(instructions), Some(minutes)) =
        (title, instructions, draft.minutes_to_complete.filter(|m| *m != 0))
    else {
        return Err(AppError::validation(
            "Title, instructions, and minutes to complete are required.",
        ));
    };

    if instructions.chars().count() < MIN_INSTRUCTIONS_CHARS {
        return Err(AppError::validation(format!(
            "Instructions must be at least {MIN_INSTRUCTIONS_CHARS} characters long."
        )));
    }

    let minutes_to_complete = i32::try_from(minutes)
        .ok()
        .filter(|m| *m > 0)
        .ok_or_else(|| AppError::validation("Minutes to complete must be a positive integer."))?;

    Ok(NewRecipe {
        title,
        instructions,
        minutes_to_complete,
        user_id: owner_id,
    })
}

pub async fn create_recipe(
    store: &dyn RecipeStore,
    draft: RecipeDraft<'_>,
    owner_id: Uuid,
) -> AppResult<Recipe> {
    let new = validate(&draft, owner_id)?;
    store.insert(new).await
}
