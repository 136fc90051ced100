//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、検証と永続化はユースケースに委譲する

pub mod fallback;
pub mod health;
pub mod robot;

pub use fallback::{DocsState, not_found, redirect_to_docs, route_not_found};
pub use health::{ReadinessState, health_check, readiness_check};
pub use robot::{
    RobotDto,
    RobotState,
    create_robot,
    delete_robot,
    get_robot,
    list_robots,
    search_robots,
    update_robot,
};
