//! # Robotics ドメイン層
//!
//! Robots API の中核となるドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! robots-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`robot`] - Robot エンティティと入力ドラフト
//!
//! ## 使用例
//!
//! ```rust
//! use robotics_domain::{DomainError, robot::RobotId};
//!
//! let error = DomainError::NotFound {
//!     entity_type: "Robot",
//!     id:          RobotId::new(42).to_string(),
//! };
//! assert_eq!(error.to_string(), "Robot not found: 42");
//! ```

#[macro_use]
mod macros;

pub mod error;
pub mod robot;

pub use error::DomainError;
