//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Routes
//! - `GET  /` - liveness probe
//! - `GET  /health` - 깊은 헬스체크 (DB 포함)
//! - `POST /auth/register` - 회원가입
//! - `POST /auth/login` - 로그인 (form)
//! - `GET  /me` - 내 정보 (bearer)
//! - `POST /shops` - 상점 생성 (bearer, 상점 주인만)
//! - `GET  /shops` - 상점 목록 (category 필터)
//! - `POST /shops/:shop_id/products` - 상품 등록 (bearer, 소유자만)
//! - `GET  /products` - 상품 목록/검색 (shop_id, q 필터)
//! - `POST /posts` - 게시글 작성 (bearer)
//! - `GET  /posts` - 게시글 목록 (category 필터, 최신순)

pub mod auth;
pub mod health;
pub mod posts;
pub mod products;
pub mod shops;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// 라우터 생성
///
/// # CORS
///
/// 설정의 origin allow-list만 허용, 허용된 origin에는
/// 모든 메서드/헤더 개방 (bearer 인증이라 쿠키/credential 불필요)
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness / Health
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/me", get(auth::me))
        // Shops
        .route("/shops", get(shops::list_shops).post(shops::create_shop))
        // Products
        .route("/shops/:shop_id/products", post(products::add_product))
        .route("/products", get(products::list_products))
        // Posts
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        // 미들웨어
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // 상태 주입
        .with_state(state)
}
