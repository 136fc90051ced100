//! # RobotRepository
//!
//! Robot の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **1 操作 1 クエリ**: トランザクションや複数文の組み合わせは行わない
//! - **バインドパラメータ**: クライアント入力は `$1` 等で渡し、SQL 文字列に埋め込まない
//! - **影響行数を返す**: 更新・削除は存在確認をせず、影響行数の解釈は呼び出し側に委ねる

use async_trait::async_trait;
use robotics_domain::robot::{Robot, RobotAttributes, RobotId};
use sqlx::PgPool;

use crate::error::InfraError;

/// Robot リポジトリトレイト
#[async_trait]
pub trait RobotRepository: Send + Sync {
    /// 全 Robot を name 昇順で取得する
    async fn find_all(&self) -> Result<Vec<Robot>, InfraError>;

    /// name に `fragment` を部分文字列として含む Robot を name 昇順で取得する
    ///
    /// `%` や `_` はワイルドカードではなく文字として扱う。
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Robot>, InfraError>;

    /// ID で Robot を検索する
    async fn find_by_id(&self, id: RobotId) -> Result<Option<Robot>, InfraError>;

    /// Robot を挿入し、採番された ID を返す
    async fn insert(&self, attributes: &RobotAttributes) -> Result<RobotId, InfraError>;

    /// Robot を更新し、影響行数を返す
    async fn update(&self, id: RobotId, attributes: &RobotAttributes) -> Result<u64, InfraError>;

    /// Robot を削除し、影響行数を返す
    async fn delete(&self, id: RobotId) -> Result<u64, InfraError>;
}

/// `robots` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct RobotRow {
    id:         i64,
    name:       String,
    #[sqlx(rename = "type")]
    robot_type: String,
    year:       i32,
}

impl From<RobotRow> for Robot {
    fn from(row: RobotRow) -> Self {
        Robot::from_db(row.id, row.name, row.robot_type, row.year)
    }
}

/// PostgreSQL 実装の RobotRepository
#[derive(Debug, Clone)]
pub struct PostgresRobotRepository {
    pool: PgPool,
}

impl PostgresRobotRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RobotRepository for PostgresRobotRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Robot>, InfraError> {
        let rows = sqlx::query_as::<_, RobotRow>(
            r#"
            SELECT id, name, type, year
            FROM robots
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Robot::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%fragment))]
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Robot>, InfraError> {
        let pattern = format!("%{}%", escape_like(fragment));

        let rows = sqlx::query_as::<_, RobotRow>(
            r#"
            SELECT id, name, type, year
            FROM robots
            WHERE name LIKE $1 ESCAPE '\'
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Robot::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: RobotId) -> Result<Option<Robot>, InfraError> {
        let row = sqlx::query_as::<_, RobotRow>(
            r#"
            SELECT id, name, type, year
            FROM robots
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Robot::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, attributes: &RobotAttributes) -> Result<RobotId, InfraError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO robots (name, type, year)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(attributes.name.as_str())
        .bind(attributes.robot_type.as_str())
        .bind(attributes.year.as_i32())
        .fetch_one(&self.pool)
        .await?;

        Ok(RobotId::new(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: RobotId, attributes: &RobotAttributes) -> Result<u64, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE robots
            SET name = $1, type = $2, year = $3
            WHERE id = $4
            "#,
        )
        .bind(attributes.name.as_str())
        .bind(attributes.robot_type.as_str())
        .bind(attributes.year.as_i32())
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: RobotId) -> Result<u64, InfraError> {
        let result = sqlx::query("DELETE FROM robots WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// LIKE パターンのメタ文字をエスケープする（エスケープ文字は `\`）
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
