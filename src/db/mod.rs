//! Database Module
//!
//! # Interview Q&A
//!
//! Q: 왜 SQLite를 선택했는가?
//! A: 동네 마켓플레이스 규모에 적합한 이유
//!
//!    1. 단일 파일: 배포/백업이 간단 (동네 단위 소규모 트래픽)
//!    2. 제로 운영 비용: 별도 DB 서버 불필요
//!    3. UNIQUE / FK 제약: 이메일 중복, 참조 무결성을 스토리지가 보장
//!    4. 생태계: SQLx의 sqlite 드라이버 지원
//!
//!    트래픽 증가 시 DB_URL만 바꿔 PostgreSQL로 이전 가능
//!
//! Q: 마이그레이션 도구를 쓰지 않은 이유는?
//! A: 시작 시 `CREATE TABLE IF NOT EXISTS`로 스키마 생성
//!    - 스키마가 4개 테이블로 고정적
//!    - 별도 마이그레이션 이력 관리가 오버엔지니어링
//!
//! Q: 커넥션 풀은 어떻게 관리하는가?
//! A: SQLx의 SqlitePool 사용
//!    - 쿼리 단위로 커넥션 획득, 모든 종료 경로에서 자동 반환
//!    - 타임아웃 처리

mod models;

pub use models::*;

use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// 데이터베이스 연결 및 쿼리 담당
///
/// ORM 엔티티 대신 명시적 insert/find/list 메서드 제공.
/// 관계(owner, shop)는 FK 필드로만 표현하고 필요 시 조회로 해소.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// 데이터베이스 연결
    ///
    /// # Connection Pool Settings
    ///
    /// - max_connections: 10 (트래픽에 따라 조정)
    /// - acquire_timeout: 3초 (커넥션 획득 대기)
    /// - foreign_keys: ON (SQLite는 기본 OFF — cascade delete에 필요)
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // in-memory SQLite는 커넥션마다 별도 DB → 풀을 커넥션 1개로 제한
        let max_connections = if database_url.contains(":memory:") { 1 } else { 10 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// 스키마 생성 (존재하면 no-op)
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                email           TEXT    NOT NULL UNIQUE,
                name            TEXT    NOT NULL,
                hashed_password TEXT    NOT NULL,
                is_shop_owner   BOOLEAN NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS shops (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id    INTEGER NOT NULL REFERENCES users(id),
                name        TEXT    NOT NULL,
                category    TEXT    NOT NULL,
                description TEXT    NOT NULL DEFAULT '',
                lat         REAL,
                lng         REAL,
                address     TEXT    NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                shop_id   INTEGER NOT NULL REFERENCES shops(id) ON DELETE CASCADE,
                name      TEXT    NOT NULL,
                price     REAL    NOT NULL,
                stock     INTEGER NOT NULL DEFAULT 0,
                image_url TEXT    NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id    INTEGER NOT NULL REFERENCES users(id),
                title      TEXT    NOT NULL,
                content    TEXT    NOT NULL DEFAULT '',
                category   TEXT    NOT NULL DEFAULT 'general',
                price      REAL,
                created_at TEXT    NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ============ Users ============

    /// 사용자 생성, 생성된 id 반환
    ///
    /// 이메일 UNIQUE 제약 위반은 sqlx::Error로 그대로 전파
    /// (호출부에서 Conflict로 매핑)
    pub async fn insert_user(
        &self,
        email: &str,
        name: &str,
        hashed_password: &str,
        is_shop_owner: bool,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, name, hashed_password, is_shop_owner)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(hashed_password)
        .bind(is_shop_owner)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// 이메일로 사용자 조회 (로그인, 중복 체크)
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, hashed_password, is_shop_owner
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// id로 사용자 조회 (토큰 → 사용자 해소)
    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, hashed_password, is_shop_owner
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    // ============ Shops ============

    /// 상점 생성, 생성된 id 반환
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_shop(
        &self,
        owner_id: i64,
        name: &str,
        category: &str,
        description: &str,
        lat: Option<f64>,
        lng: Option<f64>,
        address: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO shops (owner_id, name, category, description, lat, lng, address)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(lat)
        .bind(lng)
        .bind(address)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// id로 상점 조회 (상품 등록 시 소유권 확인)
    pub async fn find_shop_by_id(&self, id: i64) -> Result<Option<Shop>, sqlx::Error> {
        sqlx::query_as::<_, Shop>(
            r#"
            SELECT id, owner_id, name, category, description, lat, lng, address
            FROM shops
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// 상점 목록 조회 (카테고리 exact match 필터, 저장 순서)
    pub async fn list_shops(&self, category: Option<&str>) -> Result<Vec<Shop>, sqlx::Error> {
        match category {
            Some(category) => {
                sqlx::query_as::<_, Shop>(
                    r#"
                    SELECT id, owner_id, name, category, description, lat, lng, address
                    FROM shops
                    WHERE category = ?
                    "#,
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Shop>(
                    r#"
                    SELECT id, owner_id, name, category, description, lat, lng, address
                    FROM shops
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    // ============ Products ============

    /// 상품 생성, 생성된 id 반환
    pub async fn insert_product(
        &self,
        shop_id: i64,
        name: &str,
        price: f64,
        stock: i64,
        image_url: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (shop_id, name, price, stock, image_url)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(shop_id)
        .bind(name)
        .bind(price)
        .bind(stock)
        .bind(image_url)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// 상품 목록 조회 (상점 필터는 SQL에서, 이름 검색은 호출부의 in-memory 필터)
    pub async fn list_products(&self, shop_id: Option<i64>) -> Result<Vec<Product>, sqlx::Error> {
        match shop_id {
            Some(shop_id) => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, shop_id, name, price, stock, image_url
                    FROM products
                    WHERE shop_id = ?
                    "#,
                )
                .bind(shop_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, shop_id, name, price, stock, image_url
                    FROM products
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    // ============ Posts ============

    /// 게시글 생성, 생성된 id 반환
    pub async fn insert_post(
        &self,
        user_id: i64,
        title: &str,
        content: &str,
        category: &str,
        price: Option<f64>,
        created_at: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (user_id, title, content, category, price, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(category)
        .bind(price)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// 게시글 목록 조회 (최신순 — AUTOINCREMENT id 내림차순)
    pub async fn list_posts(&self, category: Option<&str>) -> Result<Vec<Post>, sqlx::Error> {
        match category {
            Some(category) => {
                sqlx::query_as::<_, Post>(
                    r#"
                    SELECT id, user_id, title, content, category, price, created_at
                    FROM posts
                    WHERE category = ?
                    ORDER BY id DESC
                    "#,
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Post>(
                    r#"
                    SELECT id, user_id, title, content, category, price, created_at
                    FROM posts
                    ORDER BY id DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.init_schema().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_email_unique_constraint() {
        let db = test_db().await;

        db.insert_user("a@x.com", "A", "hash", false).await.unwrap();

        // 같은 이메일로 두 번째 INSERT → UNIQUE 위반
        let err = db
            .insert_user("a@x.com", "B", "hash2", true)
            .await
            .unwrap_err();

        match err {
            sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
            other => panic!("expected unique violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_shop_category_filter() {
        let db = test_db().await;

        let owner = db.insert_user("o@x.com", "O", "hash", true).await.unwrap();
        db.insert_shop(owner, "Corner Store", "grocery", "", None, None, "")
            .await
            .unwrap();
        db.insert_shop(owner, "Dawn Cafe", "cafe", "", Some(37.5), Some(127.0), "")
            .await
            .unwrap();

        // 필터 없음 → 전체
        assert_eq!(db.list_shops(None).await.unwrap().len(), 2);

        // exact match 필터
        let grocery = db.list_shops(Some("grocery")).await.unwrap();
        assert_eq!(grocery.len(), 1);
        assert_eq!(grocery[0].name, "Corner Store");

        // 매칭 없는 카테고리
        assert!(db.list_shops(Some("bakery")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_product_shop_filter_and_defaults() {
        let db = test_db().await;

        let owner = db.insert_user("o@x.com", "O", "hash", true).await.unwrap();
        let shop_a = db
            .insert_shop(owner, "A", "grocery", "", None, None, "")
            .await
            .unwrap();
        let shop_b = db
            .insert_shop(owner, "B", "grocery", "", None, None, "")
            .await
            .unwrap();

        db.insert_product(shop_a, "Milk", 2.5, 0, "").await.unwrap();
        db.insert_product(shop_b, "Bread", 1.0, 3, "").await.unwrap();

        let in_a = db.list_products(Some(shop_a)).await.unwrap();
        assert_eq!(in_a.len(), 1);
        assert_eq!(in_a[0].name, "Milk");
        assert_eq!(in_a[0].stock, 0);

        assert_eq!(db.list_products(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_posts_newest_first() {
        let db = test_db().await;

        let user = db.insert_user("u@x.com", "U", "hash", false).await.unwrap();
        db.insert_post(user, "first", "", "events", None, "2024-01-01T00:00:00")
            .await
            .unwrap();
        db.insert_post(user, "second", "", "buy-sell", Some(10.0), "2024-01-02T00:00:00")
            .await
            .unwrap();

        // 최신 글이 먼저
        let all = db.list_posts(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "second");
        assert_eq!(all[1].title, "first");

        // 카테고리 필터
        let events = db.list_posts(Some("events")).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "first");
    }

    #[tokio::test]
    async fn test_deleting_shop_cascades_to_products() {
        let db = test_db().await;

        let owner = db.insert_user("o@x.com", "O", "hash", true).await.unwrap();
        let shop = db
            .insert_shop(owner, "A", "grocery", "", None, None, "")
            .await
            .unwrap();
        db.insert_product(shop, "Milk", 2.5, 0, "").await.unwrap();

        // 삭제 엔드포인트는 없지만 스키마 레벨 cascade는 보장되어야 함
        sqlx::query("DELETE FROM shops WHERE id = ?")
            .bind(shop)
            .execute(&db.pool)
            .await
            .unwrap();

        assert!(db.list_products(Some(shop)).await.unwrap().is_empty());
    }
}
