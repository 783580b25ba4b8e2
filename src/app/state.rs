// ==========================================
// 轮胎库存上报系统 - 应用状态
// ==========================================
// 职责: HTTP 层共享的只读状态
// ==========================================

use crate::api::{ApiResult, StockApi};
use crate::config::AppConfig;
use std::sync::Arc;

/// 应用状态（axum State，克隆只复制 Arc）
#[derive(Clone)]
pub struct AppState {
    pub stock_api: Arc<StockApi>,
}

impl AppState {
    pub fn new(stock_api: StockApi) -> Self {
        Self {
            stock_api: Arc::new(stock_api),
        }
    }

    /// 根据启动配置创建状态
    pub fn from_config(config: AppConfig) -> ApiResult<Self> {
        Ok(Self::new(StockApi::from_config(config)?))
    }
}
