//! Configuration Module
//!
//! # Interview Q&A
//!
//! Q: 환경변수 vs 설정 파일, 어떤 방식을 선택했고 왜인가?
//! A: 환경변수를 선택
//!    - 12-Factor App 원칙 준수
//!    - Docker/K8s 배포 시 환경별 설정 분리 용이
//!    - 민감 정보(SECRET_KEY 등)를 코드에 포함하지 않음
//!    - CI/CD 파이프라인에서 쉽게 주입 가능
//!
//! Q: 설정을 전역 싱글톤으로 두지 않은 이유는?
//! A: 명시적 의존성 주입
//!    - `Config`는 시작 시 한 번 생성되는 불변 구조체
//!    - 필요한 컴포넌트(AuthService, Database, CORS)에 값으로 전달
//!    - 테스트에서 임의 설정으로 컴포넌트 생성 가능

use std::env;

use anyhow::{Context, Result};
use jsonwebtoken::Algorithm;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트 (기본값: 8000)
    pub port: u16,

    /// 토큰 서명용 대칭 비밀키
    pub secret_key: String,

    /// SQLite 연결 문자열
    /// 형식: sqlite://welocals.db
    pub database_url: String,

    /// 허용할 CORS origin 목록 (쉼표 구분)
    pub cors_origins: String,

    /// 토큰 서명 알고리즘 (기본값: HS256)
    pub algorithm: Algorithm,

    /// 액세스 토큰 수명 (분, 기본값: 7일)
    pub access_token_expire_minutes: i64,
}

impl Config {
    /// 환경변수에서 설정 로드
    ///
    /// # Environment Variables
    ///
    /// - `SECRET_KEY`: 토큰 서명 비밀키 (기본값: changeme — 운영에서는 반드시 교체)
    /// - `DB_URL`: SQLite 연결 문자열 (기본값: sqlite://welocals.db)
    /// - `CORS_ORIGINS`: 허용 origin 목록, 쉼표 구분
    /// - `ALGORITHM`: HS256 | HS384 | HS512
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES`: 토큰 수명 (분)
    /// - `PORT`: 서버 포트
    ///
    /// # Design Decision
    ///
    /// 모든 값에 개발용 기본값 제공, 파싱 실패는 즉시 에러 (fail-fast)
    /// - 런타임 에러보다 시작 실패가 디버깅에 유리
    pub fn from_env() -> Result<Self> {
        let algorithm = match env::var("ALGORITHM")
            .unwrap_or_else(|_| "HS256".to_string())
            .to_uppercase()
            .as_str()
        {
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            _ => Algorithm::HS256,
        };

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,

            secret_key: env::var("SECRET_KEY").unwrap_or_else(|_| "changeme".to_string()),

            database_url: env::var("DB_URL")
                .unwrap_or_else(|_| "sqlite://welocals.db".to_string()),

            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),

            algorithm,

            access_token_expire_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or_else(|_| (60 * 24 * 7).to_string())
                .parse()
                .context("ACCESS_TOKEN_EXPIRE_MINUTES must be a valid number")?,
        })
    }

    /// 허용 origin 목록 파싱
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // 환경변수 없이 기본값으로 설정 생성
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_expire_minutes, 60 * 24 * 7);
    }

    #[test]
    fn test_allowed_origins_split() {
        let config = Config {
            port: 8000,
            secret_key: "test".to_string(),
            database_url: "sqlite::memory:".to_string(),
            cors_origins: "http://localhost:5173, http://localhost:3000".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: 60,
        };

        let origins = config.allowed_origins();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:5173");
        assert_eq!(origins[1], "http://localhost:3000");
    }
}
