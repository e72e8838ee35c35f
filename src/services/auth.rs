//! Credential & Token Service
//!
//! # Interview Q&A
//!
//! Q: 세션 대신 JWT를 선택한 이유는?
//! A: stateless 인증
//!    - 서버에 세션 저장소 불필요 (DB 테이블, Redis 없음)
//!    - 토큰 자체에 subject(user id)와 만료 시각 포함
//!    - 단점: 만료 전 강제 무효화 불가 → 짧은 수명으로 완화
//!
//! Q: 비밀번호 해싱에 bcrypt를 쓴 이유는?
//! A: 느린 adaptive 해시
//!    - salt 자동 생성/내장 (해시 문자열에 포함)
//!    - cost factor로 연산 비용 조절 가능 (하드웨어 발전 대응)
//!    - 검증은 라이브러리의 verify 루틴 사용 (타이밍 공격 고려)
//!
//! Q: 토큰 검증 실패를 왜 한 종류의 에러로 수렴시키는가?
//! A: 정보 유출 방지
//!    - 서명 위조 / 만료 / 잘못된 payload / 없는 사용자 모두 동일한 401
//!    - 어떤 요소가 틀렸는지 알려주면 공격자에게 힌트가 됨

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{config::Config, db::User, error::ApiError, AppState};

/// JWT payload
///
/// - `sub`: user id (문자열 — JWT 관례)
/// - `exp`: 만료 시각 (unix timestamp, 초)
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// 비밀번호 해싱 + 토큰 발급/검증 서비스
///
/// `Config`에서 비밀키/알고리즘/수명을 받아 생성되는 불변 서비스.
/// `AppState`에 Arc로 보관되어 모든 핸들러가 공유.
pub struct AuthService {
    secret: String,
    algorithm: Algorithm,
    expire_minutes: i64,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            secret: config.secret_key.clone(),
            algorithm: config.algorithm,
            expire_minutes: config.access_token_expire_minutes,
        }
    }

    /// 비밀번호 해싱 (bcrypt, 기본 cost)
    pub fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
            tracing::error!("bcrypt hash failed: {:?}", e);
            ApiError::InternalError
        })
    }

    /// 비밀번호 검증
    ///
    /// 해시 파싱 실패 등 모든 에러는 "불일치"로 취급
    pub fn verify_password(&self, password: &str, hashed: &str) -> bool {
        bcrypt::verify(password, hashed).unwrap_or(false)
    }

    /// 액세스 토큰 발급
    ///
    /// sub = user id, exp = 현재 시각 + 설정된 수명
    pub fn create_access_token(&self, user_id: i64) -> Result<String, ApiError> {
        let expire = Utc::now() + Duration::minutes(self.expire_minutes);
        let claims = Claims {
            sub: user_id.to_string(),
            exp: expire.timestamp(),
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!("token encoding failed: {:?}", e);
            ApiError::InternalError
        })
    }

    /// 토큰 검증 → user id
    ///
    /// 서명/만료/payload/subject 어느 하나라도 실패하면 Unauthorized
    /// (부분 성공 없음)
    pub fn decode_token(&self, token: &str) -> Result<i64, ApiError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(self.algorithm),
        )
        .map_err(|_| ApiError::Unauthorized)?;

        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| ApiError::Unauthorized)
    }
}

// ============ Extractor ============

/// 인증된 사용자 extractor
///
/// `Authorization: Bearer <token>` 헤더를 검증하고 사용자 행을 로드.
/// 핸들러 시그니처에 `AuthUser`를 추가하는 것만으로 인증 강제.
///
/// # Failure Modes
///
/// 헤더 없음 / Bearer 아님 / 토큰 무효 / 사용자 없음 → 모두 401
pub struct AuthUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let user_id = state.auth.decode_token(token)?;

        let user = state
            .db
            .find_user_by_id(user_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service(secret: &str, expire_minutes: i64) -> AuthService {
        AuthService::new(&Config {
            port: 8000,
            secret_key: secret.to_string(),
            database_url: "sqlite::memory:".to_string(),
            cors_origins: String::new(),
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: expire_minutes,
        })
    }

    #[test]
    fn test_password_hash_and_verify() {
        let auth = test_service("secret", 60);

        let hash = auth.hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2"); // 평문 저장 금지

        assert!(auth.verify_password("hunter2", &hash));
        assert!(!auth.verify_password("hunter3", &hash));
    }

    #[test]
    fn test_verify_password_with_garbage_hash() {
        let auth = test_service("secret", 60);
        // 해시 파싱 실패는 불일치로 취급
        assert!(!auth.verify_password("hunter2", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_token_round_trip() {
        let auth = test_service("secret", 60);

        let token = auth.create_access_token(42).unwrap();
        assert_eq!(auth.decode_token(&token).unwrap(), 42);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        // A의 비밀키로 서명한 토큰은 B의 서비스에서 실패해야 함
        let auth_a = test_service("secret-a", 60);
        let auth_b = test_service("secret-b", 60);

        let token = auth_a.create_access_token(1).unwrap();
        assert!(matches!(
            auth_b.decode_token(&token),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let auth = test_service("secret", 60);

        let token = auth.create_access_token(1).unwrap();
        // 서명 마지막 문자 조작
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            auth.decode_token(&tampered),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // 음수 수명 → 발급 즉시 만료 (기본 leeway 60초를 넘김)
        let auth = test_service("secret", -5);

        let token = auth.create_access_token(1).unwrap();
        assert!(matches!(
            auth.decode_token(&token),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_non_integer_subject_rejected() {
        let auth = test_service("secret", 60);

        // sub가 정수가 아닌 토큰을 직접 제작
        let claims = Claims {
            sub: "not-a-number".to_string(),
            exp: (Utc::now() + Duration::minutes(60)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(matches!(
            auth.decode_token(&token),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let auth = test_service("secret", 60);
        assert!(matches!(
            auth.decode_token("garbage"),
            Err(ApiError::Unauthorized)
        ));
    }
}
