/**
 * Profile Handlers
 *
 * # Routes
 *
 * - `GET /api/profile/me` - caller's profile (protected)
 * - `POST /api/profile` - create or update caller's profile (protected)
 * - `GET /api/profile` - all profiles
 * - `GET /api/profile/user/{user_id}` - profile by owner
 * - `DELETE /api/profile` - delete caller's posts, profile and account (protected)
 * - `PUT /api/profile/experience` - add experience (protected)
 * - `DELETE /api/profile/experience/{exp_id}` - remove experience (protected)
 * - `PUT /api/profile/education` - add education (protected)
 * - `DELETE /api/profile/education/{edu_id}` - remove education (protected)
 * - `GET /api/profile/github/{username}` - recent GitHub repositories
 *
 * Profiles are returned with the owner's name and avatar embedded as `user`.
 */
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::backend::auth::ownership::ensure_owner;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::store::Store;
use crate::shared::identity::Identity;
use crate::shared::profile::{EducationRequest, ExperienceRequest, Profile, ProfileRequest, ProfileView};

const NO_PROFILE_MSG: &str = "There is no profile for this user";

/// Attach the owner's summary; `None` if the owner no longer exists
async fn to_view(store: &dyn Store, profile: Profile) -> Result<Option<ProfileView>, ApiError> {
    let owner = store.find_user_by_id(&profile.user).await?;
    Ok(owner.map(|owner| ProfileView::new(profile, owner.summary())))
}

async fn view_or_not_found(store: &dyn Store, profile: Profile) -> Result<Json<ProfileView>, ApiError> {
    to_view(store, profile)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NO_PROFILE_MSG))
}

/// Load the caller's profile and confirm they own it
async fn load_own_profile(store: &dyn Store, caller: &Identity) -> Result<Profile, ApiError> {
    let profile = store
        .find_profile_by_user(caller)
        .await?
        .ok_or_else(|| ApiError::not_found(NO_PROFILE_MSG))?;
    ensure_owner(caller, &profile)?;
    Ok(profile)
}

pub async fn get_my_profile(
    user: AuthUser,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<ProfileView>, ApiError> {
    let profile = store
        .find_profile_by_user(user.identity())
        .await?
        .ok_or_else(|| ApiError::not_found(NO_PROFILE_MSG))?;
    view_or_not_found(store.as_ref(), profile).await
}

/// Create the caller's profile, or update the fields present in the request
pub async fn upsert_profile(
    user: AuthUser,
    State(store): State<Arc<dyn Store>>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<ProfileView>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let caller = user.identity();
    let profile = match store.find_profile_by_user(caller).await? {
        Some(mut existing) => {
            ensure_owner(caller, &existing)?;
            existing.apply(request);
            existing
        }
        None => {
            tracing::info!("Creating profile for {}", caller);
            Profile::create(caller.clone(), request)
        }
    };

    let profile = store.save_profile(profile).await?;
    view_or_not_found(store.as_ref(), profile).await
}

pub async fn list_profiles(
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Vec<ProfileView>>, ApiError> {
    let mut views = Vec::new();
    for profile in store.list_profiles().await? {
        if let Some(view) = to_view(store.as_ref(), profile).await? {
            views.push(view);
        }
    }
    Ok(Json(views))
}

pub async fn get_profile_by_user(
    Path(user_id): Path<String>,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<ProfileView>, ApiError> {
    let profile = store
        .find_profile_by_user(&Identity::new(user_id))
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;
    to_view(store.as_ref(), profile)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Profile not found"))
}

/// Delete the caller's posts, profile and account
pub async fn delete_account(
    user: AuthUser,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Value>, ApiError> {
    let caller = user.identity();

    let posts = store.delete_account(caller).await?;

    tracing::info!("Deleted account {} and {} posts", caller, posts);
    Ok(Json(json!({ "msg": "User deleted" })))
}

pub async fn add_experience(
    user: AuthUser,
    State(store): State<Arc<dyn Store>>,
    payload: Result<Json<ExperienceRequest>, JsonRejection>,
) -> Result<Json<ProfileView>, ApiError> {
    let Json(request) = payload?;
    let experience = request.into_experience()?;

    let mut profile = load_own_profile(store.as_ref(), user.identity()).await?;
    profile.experience.insert(0, experience);

    let profile = store.save_profile(profile).await?;
    view_or_not_found(store.as_ref(), profile).await
}

pub async fn delete_experience(
    user: AuthUser,
    Path(exp_id): Path<String>,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<ProfileView>, ApiError> {
    let mut profile = load_own_profile(store.as_ref(), user.identity()).await?;

    let index = profile
        .experience
        .iter()
        .position(|e| e.id == exp_id)
        .ok_or_else(|| ApiError::not_found("Experience not found"))?;
    profile.experience.remove(index);

    let profile = store.save_profile(profile).await?;
    view_or_not_found(store.as_ref(), profile).await
}

pub async fn add_education(
    user: AuthUser,
    State(store): State<Arc<dyn Store>>,
    payload: Result<Json<EducationRequest>, JsonRejection>,
) -> Result<Json<ProfileView>, ApiError> {
    let Json(request) = payload?;
    let education = request.into_education()?;

    let mut profile = load_own_profile(store.as_ref(), user.identity()).await?;
    profile.education.insert(0, education);

    let profile = store.save_profile(profile).await?;
    view_or_not_found(store.as_ref(), profile).await
}

pub async fn delete_education(
    user: AuthUser,
    Path(edu_id): Path<String>,
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<ProfileView>, ApiError> {
    let mut profile = load_own_profile(store.as_ref(), user.identity()).await?;

    let index = profile
        .education
        .iter()
        .position(|e| e.id == edu_id)
        .ok_or_else(|| ApiError::not_found("Education not found"))?;
    profile.education.remove(index);

    let profile = store.save_profile(profile).await?;
    view_or_not_found(store.as_ref(), profile).await
}

/// Proxy the five most recent repositories of a GitHub user
pub async fn github_repos(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let repos = state.github.recent_repos(&username).await?;
    Ok(Json(repos))
}
