// ==========================================
// 轮胎库存上报系统 - 日志初始化
// ==========================================
// 输出: tracing-subscriber fmt，级别由 RUST_LOG 控制
// 格式: LOG_FORMAT=json 时输出 JSON 行，否则为文本
// 默认: 本服务 info，HTTP 客户端/服务端依赖降为 warn
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的过滤规则
const DEFAULT_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn";

/// 测试使用的过滤规则
const TEST_FILTER: &str = "tire_stock_sender=debug";

/// 解析 RUST_LOG，缺失或非法时使用默认规则
fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn json_requested() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// 服务启动时调用一次
///
/// 例如 `RUST_LOG=tire_stock_sender::importer=trace` 只放开导入层
pub fn init() {
    let builder = fmt()
        .with_env_filter(filter_or(DEFAULT_FILTER))
        .with_target(true)
        .with_line_number(true);

    if json_requested() {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// 测试中可重复调用，输出进入测试捕获
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(filter_or(TEST_FILTER))
        .with_test_writer()
        .try_init();
}
