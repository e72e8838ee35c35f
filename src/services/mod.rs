//! Services Module
//!
//! 비즈니스 로직을 담당하는 서비스 레이어
//!
//! # Services
//! - `AuthService`: 비밀번호 해싱, 토큰 발급/검증
//! - `AuthUser`: 인증된 사용자 extractor

mod auth;

pub use auth::{AuthService, AuthUser, Claims};
