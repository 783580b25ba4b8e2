// ==========================================
// 轮胎库存上报系统 - 应用层
// ==========================================
// 职责: axum HTTP 接口，连接浏览器表单与 StockApi
// ==========================================

pub mod routes;
pub mod state;

// 重导出
pub use routes::{router, Envelope};
pub use state::AppState;
