//! # リポジトリ実装
//!
//! ドメインモデルの永続化を担当する。トレイト経由でモックに差し替え可能。

pub mod robot_repository;

pub use robot_repository::{PostgresRobotRepository, RobotRepository};
