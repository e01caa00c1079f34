use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{dto::PublicUser, session::CurrentUser},
    error::AppResult,
    recipes::{
        dto::{CreateRecipeRequest, RecipeResponse},
        services::{self, RecipeDraft},
    },
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new().route("/recipes", get(list_recipes).post(create_recipe))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_recipes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<RecipeResponse>>> {
    let rows = state.recipes.list_by_owner(user.id).await?;
    Ok(Json(rows.into_iter().map(RecipeResponse::from).collect()))
}

#[instrument(skip(state, owner, payload), fields(user_id = %owner.id))]
pub async fn create_recipe(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RecipeResponse>)> {
    let Json(body) = payload?;

    let recipe = services::create_recipe(
        state.recipes.as_ref(),
        RecipeDraft {
            title: body.title.as_deref(),
            instructions: body.instructions.as_deref(),
            minutes_to_complete: body.minutes_to_complete,
        },
        owner.id,
    )
    .await?;

    info!(recipe_id = %recipe.id, "recipe created");
    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse::new(recipe, PublicUser::from(owner))),
    ))
}
