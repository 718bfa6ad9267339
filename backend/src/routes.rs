use rocket::{State, get, post, http::Status, serde::json::Json};
use rustrict::CensorStr;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info, instrument};
use shared::{
    models::*,
    user_info::UserInfo,
    validate_member_request,
    CategoryFilter, LeaderboardEntry, PhotoCatalog, LEADERBOARD_SIZE,
};
use crate::{
    error::ApiError,
    members::MemberRepository,
    password::{hash_password, verify_password},
    rate_limiter::RateLimiter,
};

const SIGNUP_WINDOW_MINUTES: i64 = 60;
const MAX_SIGNUPS_PER_WINDOW: u32 = 5;
const LOGIN_WINDOW_MINUTES: i64 = 15;
const MAX_LOGINS_PER_WINDOW: u32 = 10;

pub struct AppState {
    pub signup_limiter: RateLimiter,
    pub login_limiter: RateLimiter,
    pub catalog: PhotoCatalog,
    pub db: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool, catalog: PhotoCatalog) -> Self {
        Self {
            signup_limiter: RateLimiter::new(MAX_SIGNUPS_PER_WINDOW, SIGNUP_WINDOW_MINUTES),
            login_limiter: RateLimiter::new(MAX_LOGINS_PER_WINDOW, LOGIN_WINDOW_MINUTES),
            catalog,
            db: pool,
        }
    }
}

#[derive(Serialize)]
pub struct HealthStatus {
    ok: bool,
}

#[get("/health")]
pub fn health() -> Json<HealthStatus> {
    Json(HealthStatus { ok: true })
}

#[get("/photos?<category>")]
pub fn list_photos(state: &State<AppState>, category: Option<&str>) -> Result<Json<Vec<Photo>>, ApiError> {
    let filter: CategoryFilter = category.map(str::parse::<CategoryFilter>).transpose()?.unwrap_or_default();
    let photos = shared::filter_photos(state.catalog.photos(), &filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(photos))
}

#[get("/photos/leaderboard")]
pub fn photo_leaderboard(state: &State<AppState>) -> Json<Vec<LeaderboardEntry>> {
    Json(
        shared::leaderboard(state.catalog.photos(), LEADERBOARD_SIZE)
            .iter()
            .map(|ranked| ranked.to_entry())
            .collect(),
    )
}

#[get("/categories")]
pub fn list_categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(|c| c.name()).collect())
}

#[get("/users")]
pub async fn list_users(state: &State<AppState>) -> Result<Json<Vec<MemberAccount>>, ApiError> {
    MemberRepository::list(&state.db).await.map(Json)
}

#[instrument(skip(state, request, user_info), fields(request_id = %user_info.request_id))]
#[post("/users", format = "json", data = "<request>")]
pub async fn create_user(
    state: &State<AppState>,
    request: Json<CreateMemberRequest>,
    user_info: UserInfo,
) -> Result<(Status, Json<CreatedMember>), ApiError> {
    let request = request.into_inner();
    validate_member_request(&request)?;

    if request.name.is_inappropriate() {
        return Err(ApiError::Inappropriate("name"));
    }

    state.signup_limiter.check_rate_limit(&format!("create_user:{}", user_info.fingerprint))?;

    let name = request.name.trim();
    let email = request.email.trim().to_lowercase();
    let password_hash = hash_password(&request.password)?;
    let member = MemberRepository::create(&state.db, name, &email, &password_hash).await?;

    info!(member = %member.id, "Member created");
    Ok((Status::Created, Json(CreatedMember { id: member.id, name: member.name, email: member.email })))
}

#[instrument(skip(state, request, user_info), fields(request_id = %user_info.request_id))]
#[post("/login", format = "json", data = "<request>")]
pub async fn login(
    state: &State<AppState>,
    request: Json<LoginRequest>,
    user_info: UserInfo,
) -> Result<Json<CurrentUser>, ApiError> {
    let LoginRequest { email, password } = request.into_inner();
    state.login_limiter.check_rate_limit(&format!("login:{}", user_info.fingerprint))?;

    let email = email.trim().to_lowercase();
    let Some(member) = MemberRepository::find_by_email(&state.db, &email).await? else {
        debug!("Login for unknown email");
        return Err(ApiError::NotFound);
    };

    if !verify_password(&password, &member.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let account = member.into_account();
    Ok(Json(CurrentUser {
        id: account.id.into(),
        name: account.name,
        email: account.email,
        is_admin: false,
    }))
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}
