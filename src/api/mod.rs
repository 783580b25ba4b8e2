// ==========================================
// 轮胎库存上报系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供 HTTP 路由调用
// ==========================================

pub mod error;
pub mod stock_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use stock_api::{ClearSummary, DownloadArtifact, StockApi};
