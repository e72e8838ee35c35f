//! Community Post Endpoints
//!
//! 동네 게시판: 사고팔기 / 분실물 / 동네행사.
//! 게시글은 생성 후 불변, 목록은 항상 최신순.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, routes::shops::CreatedResponse, services::AuthUser, AppState};

// ============ Request/Response Types ============

fn default_category() -> String {
    "general".to_string()
}

/// 게시글 작성 요청
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// 자유 문자열 — 관례상 buy-sell / lost-found / events
    #[serde(default = "default_category")]
    pub category: String,
    /// buy-sell 게시글에서만 의미 있는 가격
    pub price: Option<f64>,
}

/// 목록 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    /// 카테고리 exact match 필터
    pub category: Option<String>,
}

/// 게시글 공개 projection
#[derive(Debug, Serialize)]
pub struct PostOut {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub price: Option<f64>,
    pub created_at: String,
}

// ============ Handlers ============

/// POST /posts
///
/// 인증된 사용자 누구나 작성 가능 (role 체크 없음).
/// created_at은 서버에서 UTC ISO-8601로 캡처.
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let created_at = Utc::now().to_rfc3339();

    let id = state
        .db
        .insert_post(
            user.id,
            &req.title,
            &req.content,
            &req.category,
            req.price,
            &created_at,
        )
        .await?;

    Ok(Json(CreatedResponse { id }))
}

/// GET /posts?category=
///
/// 인증 불필요. id 내림차순 = 최신순 (AUTOINCREMENT).
/// 빈 category 값(`?category=`)은 필터 없음으로 취급.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostOut>>, ApiError> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let posts = state.db.list_posts(category).await?;

    Ok(Json(
        posts
            .into_iter()
            .map(|p| PostOut {
                id: p.id,
                user_id: p.user_id,
                title: p.title,
                content: p.content,
                category: p.category,
                price: p.price,
                created_at: p.created_at,
            })
            .collect(),
    ))
}
