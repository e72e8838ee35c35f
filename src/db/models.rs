//! Database Models
//!
//! Plain row structs for the four marketplace entities.
//! ORM 스타일의 암묵적 관계(lazy traversal) 대신 명시적 FK 필드만 유지.

use sqlx::FromRow;

/// 사용자
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,

    /// 이메일 (UNIQUE, 로그인 아이디로 사용)
    pub email: String,

    pub name: String,

    /// bcrypt 해시 — 응답 projection에는 절대 포함하지 않음
    pub hashed_password: String,

    /// 상점 주인 여부 (상점 생성 권한)
    pub is_shop_owner: bool,
}

/// 상점
#[derive(Debug, Clone, FromRow)]
pub struct Shop {
    pub id: i64,

    /// 소유자 (users.id)
    pub owner_id: i64,

    pub name: String,

    /// 카테고리 (예: grocery, cafe) — 자유 문자열
    pub category: String,

    pub description: String,

    /// 위도/경도 — 각각 독립적으로 NULL 가능
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    pub address: String,
}

/// 상품
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,

    /// 소속 상점 (shops.id, 상점 삭제 시 cascade)
    pub shop_id: i64,

    pub name: String,

    pub price: f64,

    /// 재고 (기본값 0)
    pub stock: i64,

    /// 이미지 URL — 문자열로만 저장, URL 검증 없음
    pub image_url: String,
}

/// 커뮤니티 게시글
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,

    /// 작성자 (users.id)
    pub user_id: i64,

    pub title: String,

    pub content: String,

    /// 카테고리 — 관례상 buy-sell / lost-found / events,
    /// 스키마 레벨 제약은 없음 (기본값 "general")
    pub category: String,

    /// 가격 — buy-sell 게시글에서만 의미 있음
    pub price: Option<f64>,

    /// 생성 시각 (ISO-8601 UTC 문자열)
    pub created_at: String,
}
