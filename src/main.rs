// ==========================================
// 轮胎库存上报系统 - 服务主入口
// ==========================================
// 技术栈: tokio + axum
// 流程: 日志 → 配置 → AppState → 绑定端口 → 提供服务
// ==========================================

use anyhow::Context;
use std::net::SocketAddr;
use tire_stock_sender::app::{router, AppState};
use tire_stock_sender::{logging, AppConfig, APP_NAME, VERSION};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", APP_NAME);
    tracing::info!("系统版本: {}", VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env().context("读取配置失败")?;
    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        processed_dir = %config.processed_dir.display(),
        start_row = config.parser.start_row,
        vendor_enabled = config.vendor.is_configured(),
        "配置已加载"
    );

    let addr: SocketAddr = ([0, 0, 0, 0], config.server_port).into();
    let state = AppState::from_config(config).context("初始化 AppState 失败")?;
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定端口 {}", addr))?;
    tracing::info!("服务已启动: http://{}", addr);

    axum::serve(listener, app).await.context("HTTP 服务异常退出")?;
    Ok(())
}
