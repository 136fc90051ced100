//! # Robots Service サーバー
//!
//! Robot リソースの CRUD を提供する HTTP API。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ROBOTS_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `ROBOTS_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 接続プールの最大接続数（デフォルト: `10`） |
//! | `API_DOC_URL` | No | `GET /` のリダイレクト先（デフォルト: `/apidoc/`） |
//! | `RUN_MIGRATIONS` | No | 起動時にマイグレーションを適用するか（デフォルト: `true`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/robotics cargo run -p robotics-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use robotics_infra::{
    db,
    repository::{PostgresRobotRepository, RobotRepository},
};
use robotics_service::{
    build_router,
    config::RobotsConfig,
    handler::{DocsState, ReadinessState, RobotState},
    usecase::RobotUseCaseImpl,
    with_request_tracing,
};
use robotics_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("robots-service"));
    let _tracing_guard = tracing::info_span!("app", service = "robots-service").entered();

    let config = RobotsConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Robots Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    if config.run_migrations {
        db::run_migrations(&pool)
            .await
            .context("マイグレーションの実行に失敗しました")?;
        tracing::info!("マイグレーションを適用しました");
    }

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    let robot_repository: Arc<dyn RobotRepository> = Arc::new(PostgresRobotRepository::new(pool));
    let robot_state = Arc::new(RobotState {
        usecase: RobotUseCaseImpl::new(robot_repository),
    });
    let docs_state = Arc::new(DocsState {
        api_doc_url: config.api_doc_url.clone(),
    });

    let app = with_request_tracing(build_router(
        robot_state,
        docs_state,
        Some(readiness_state),
    ));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Robots Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Robots Service サーバーを停止しました");
    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
