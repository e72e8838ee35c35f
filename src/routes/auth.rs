//! Authentication Endpoints
//!
//! 회원가입 / 로그인 / 내 정보 조회.
//! 비밀번호 해시는 어떤 응답에도 포함되지 않음 (projection에서 제외).

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};

use crate::{db::User, error::ApiError, services::AuthUser, AppState};

// ============ Request/Response Types ============

/// 회원가입 요청
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    /// 상점 주인으로 가입 여부 (기본 false)
    #[serde(default)]
    pub is_shop_owner: bool,
}

/// 사용자 공개 projection (비밀번호 해시 제외)
#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub is_shop_owner: bool,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_shop_owner: user.is_shop_owner,
        }
    }
}

/// 로그인 폼 (OAuth2 password form 호환: username = 이메일)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// 토큰 응답
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

// ============ Handlers ============

/// POST /auth/register
///
/// # Flow
///
/// 1. 이메일 중복 pre-check → Conflict
/// 2. 비밀번호 해싱
/// 3. INSERT (UNIQUE 제약이 레이스까지 보장 — 위반 시에도 Conflict)
/// 4. 공개 projection 반환
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserOut>, ApiError> {
    if state.db.find_user_by_email(&req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let hashed = state.auth.hash_password(&req.password)?;

    let id = state
        .db
        .insert_user(&req.email, &req.name, &hashed, req.is_shop_owner)
        .await?;

    Ok(Json(UserOut {
        id,
        email: req.email,
        name: req.name,
        is_shop_owner: req.is_shop_owner,
    }))
}

/// POST /auth/login
///
/// 이메일 없음 / 비밀번호 불일치 모두 동일한 401
/// (어느 쪽이 틀렸는지 노출하지 않음)
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .db
        .find_user_by_email(&form.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !state.auth.verify_password(&form.password, &user.hashed_password) {
        return Err(ApiError::Unauthorized);
    }

    let access_token = state.auth.create_access_token(user.id)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /me
///
/// Bearer 토큰 → 사용자 공개 projection
pub async fn me(AuthUser(user): AuthUser) -> Json<UserOut> {
    Json(user.into())
}
