//! # Robotics インフラ層
//!
//! PostgreSQL との接続と、Robot の永続化を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールの作成、マイグレーション、疎通確認
//! - **リポジトリ実装**: [`RobotRepository`](repository::RobotRepository) の PostgreSQL 実装
//! - **テスト支援**: `test-utils` feature でインメモリモックを公開
//!
//! ## 依存関係
//!
//! ```text
//! robots-service → infra → domain
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use robotics_infra::{db, repository::PostgresRobotRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/robotics", 10).await?;
//!     db::run_migrations(&pool).await?;
//!     let repository = PostgresRobotRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
