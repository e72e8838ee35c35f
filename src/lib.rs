//! WeLocals API Library
//!
//! # Overview
//!
//! 동네 마켓플레이스(WeLocals) 백엔드 API.
//! 회원가입/로그인, 상점·상품 등록/조회, 동네 게시판을 제공합니다.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      WeLocals API                        │
//! │                                                          │
//! │  ┌─────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │  │ Routes  │──▶│ AuthService  │   │    Database      │  │
//! │  │ (axum)  │   │ (bcrypt/JWT) │   │ (SQLx + SQLite)  │  │
//! │  └────┬────┘   └──────────────┘   └────────┬─────────┘  │
//! │       │                                    │            │
//! │       └──────────── AppState ──────────────┘            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 처리
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `services`: 인증 서비스 (비밀번호 해싱, 토큰)
//! - `db`: 데이터베이스 연동
//!
//! ## Usage
//!
//! ```rust,ignore
//! use welocals_api::{config::Config, db::Database, services::AuthService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database_url).await?;
//!     db.init_schema().await?;
//!
//!     // ... 서버 시작
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::ApiError;
pub use services::AuthService;

/// 애플리케이션 전역 상태
///
/// 시작 시 한 번 구성되는 읽기 전용 공유 상태.
/// 요청 간 공유되는 가변 상태는 SQLx 커넥션 풀뿐.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
    pub config: Arc<Config>,
}
