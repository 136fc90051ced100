//! # Robotics 共有ユーティリティ
//!
//! Robots API を構成するクレート群で共通に使うレスポンス型と
//! Observability 基盤を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存を持たない（`IntoResponse` 変換はサービス側の責務）
//! - トレーシング初期化は `observability` feature で有効化する

pub mod api_response;
pub mod error_response;
pub mod health;
pub mod observability;

pub use api_response::{ApiResponse, ResponseStatus};
pub use error_response::{ErrorResponse, RouteNotFoundResponse};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
