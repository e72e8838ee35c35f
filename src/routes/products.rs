//! Product Endpoints
//!
//! 상품 등록(상점 소유자 전용) + 공개 목록/검색.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, routes::shops::CreatedResponse, services::AuthUser, AppState};

// ============ Request/Response Types ============

/// 상품 등록 요청
#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub name: String,
    pub price: f64,
    /// 재고 (기본 0)
    #[serde(default)]
    pub stock: i64,
    /// 이미지 URL — 검증 없이 문자열로 저장
    #[serde(default)]
    pub image_url: String,
}

/// 목록 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    /// 상점 exact match 필터 (SQL에서 적용)
    pub shop_id: Option<i64>,
    /// 이름 부분 일치 검색 (대소문자 무시, 조회 후 in-memory 적용)
    pub q: Option<String>,
}

/// 상품 공개 projection
#[derive(Debug, Serialize)]
pub struct ProductOut {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub image_url: String,
    pub shop_id: i64,
}

// ============ Handlers ============

/// POST /shops/:shop_id/products
///
/// # Authorization
///
/// 호출자가 해당 상점의 소유자여야 함.
/// 상점이 없는 경우와 남의 상점인 경우 모두 동일한 403으로 수렴
/// (소유자가 아닌 사람에게 상점 존재 여부를 노출하지 않음)
pub async fn add_product(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(shop_id): Path<i64>,
    Json(req): Json<AddProductRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let shop = state.db.find_shop_by_id(shop_id).await?;

    match shop {
        Some(shop) if shop.owner_id == user.id => {}
        _ => return Err(ApiError::Forbidden("Not your shop".to_string())),
    }

    let id = state
        .db
        .insert_product(shop_id, &req.name, req.price, req.stock, &req.image_url)
        .await?;

    Ok(Json(CreatedResponse { id }))
}

/// GET /products?shop_id=&q=
///
/// 인증 불필요.
///
/// # Search Semantics
///
/// `q`는 대소문자 무시 substring 검색 (fuzzy 아님):
/// "Organic Honey"는 "honey", "HONEY"로 찾을 수 있지만 "gan hon"은 불일치.
/// 인덱스 없이 조회 결과에 대한 post-filter로 구현.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductOut>>, ApiError> {
    let products = state.db.list_products(query.shop_id).await?;

    let needle = query.q.as_deref().map(str::to_lowercase);

    Ok(Json(
        products
            .into_iter()
            .filter(|p| match &needle {
                Some(needle) => p.name.to_lowercase().contains(needle),
                None => true,
            })
            .map(|p| ProductOut {
                id: p.id,
                name: p.name,
                price: p.price,
                stock: p.stock,
                image_url: p.image_url,
                shop_id: p.shop_id,
            })
            .collect(),
    ))
}
