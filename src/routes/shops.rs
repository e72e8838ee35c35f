//! Shop Endpoints
//!
//! 상점 생성(상점 주인 전용) + 공개 목록 조회.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, services::AuthUser, AppState};

// ============ Request/Response Types ============

/// 상점 생성 요청
#[derive(Debug, Deserialize)]
pub struct CreateShopRequest {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// 위도/경도 — 각각 독립적으로 생략 가능
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default)]
    pub address: String,
}

/// 생성 응답 (id만 반환)
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// 목록 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct ListShopsQuery {
    /// 카테고리 exact match 필터
    pub category: Option<String>,
}

/// 상점 공개 projection (owner_id는 노출하지 않음)
#[derive(Debug, Serialize)]
pub struct ShopOut {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: String,
}

// ============ Handlers ============

/// POST /shops
///
/// is_shop_owner가 아닌 사용자는 403
pub async fn create_shop(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateShopRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    if !user.is_shop_owner {
        return Err(ApiError::Forbidden(
            "Only shop owners can create shops".to_string(),
        ));
    }

    let id = state
        .db
        .insert_shop(
            user.id,
            &req.name,
            &req.category,
            &req.description,
            req.lat,
            req.lng,
            &req.address,
        )
        .await?;

    Ok(Json(CreatedResponse { id }))
}

/// GET /shops?category=
///
/// 인증 불필요. 페이지네이션 없음, 저장 순서 그대로.
/// 빈 category 값(`?category=`)은 필터 없음으로 취급.
pub async fn list_shops(
    State(state): State<AppState>,
    Query(query): Query<ListShopsQuery>,
) -> Result<Json<Vec<ShopOut>>, ApiError> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let shops = state.db.list_shops(category).await?;

    Ok(Json(
        shops
            .into_iter()
            .map(|s| ShopOut {
                id: s.id,
                name: s.name,
                category: s.category,
                description: s.description,
                lat: s.lat,
                lng: s.lng,
                address: s.address,
            })
            .collect(),
    ))
}
