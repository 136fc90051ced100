//! # Robots Service ライブラリ
//!
//! ルーター構築とハンドラ・ユースケースを公開する。
//! `main.rs` と結合テストの両方から同じルーターを組み立てるために lib として切り出している。

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use handler::{
    DocsState,
    ReadinessState,
    RobotState,
    create_robot,
    delete_robot,
    get_robot,
    health_check,
    list_robots,
    not_found,
    readiness_check,
    redirect_to_docs,
    search_robots,
    update_robot,
};
use robotics_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// ルーターを構築する
///
/// `readiness_state` が `None` の場合 `/health/ready` は登録しない（DB を持たないテスト用）。
/// 未登録パスとメソッド不一致はどちらも [`not_found`] が処理する。
pub fn build_router(
    robot_state: Arc<RobotState>,
    docs_state: Arc<DocsState>,
    readiness_state: Option<Arc<ReadinessState>>,
) -> Router {
    let mut router = Router::new()
        .route("/robots", get(list_robots))
        .route("/robots/search/{name}", get(search_robots))
        .route("/robots/add", post(create_robot))
        .route("/robots/update/{id}", post(update_robot))
        .route("/robots/delete/{id}", get(delete_robot))
        .route("/robots/{id}", get(get_robot))
        .with_state(robot_state)
        .merge(
            Router::new()
                .route("/", get(redirect_to_docs))
                .with_state(docs_state),
        )
        .route("/health", get(health_check));

    if let Some(readiness_state) = readiness_state {
        router = router.merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        );
    }

    router
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}

/// Request ID とリクエストスパンのレイヤーを付与する
///
/// 1. SetRequestIdLayer（最外）: UUID v7 を生成（クライアント提供値があればそれを使う）
/// 2. TraceLayer: request_id を含むスパンを作成
/// 3. PropagateRequestIdLayer: レスポンスヘッダーに `x-request-id` をコピー
pub fn with_request_tracing(router: Router) -> Router {
    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
