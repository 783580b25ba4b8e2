// ==========================================
// 轮胎库存上报系统 - 核心库
// ==========================================
// 技术栈: axum + calamine + rust_xlsxwriter + reqwest
// 系统定位: 经销商库存表 → 标准化记录 → 供应商 CSV / 汇总报表 / 接口上报
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与结果类型
pub mod domain;

// 配置层 - 启动配置与导入/报表配置
pub mod config;

// 导入层 - 工作表读取、清洗、分类、校验
pub mod importer;

// 引擎层 - 分组汇总
pub mod engine;

// 导出层 - 供应商 CSV 与汇总报表
pub mod export;

// 文件仓储层 - 上传文件与解析结果
pub mod repository;

// 外部服务 - 供应商上报接口
pub mod services;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 路由
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{AppConfig, GroupConfig, ParserConfig};
pub use domain::stock::{ParseOutcome, ParseStats, StockRecord, VendorGroupSums};
pub use domain::types::Season;
pub use engine::GroupAggregator;
pub use export::{GroupReportBuilder, VendorCsvExporter};
pub use importer::StockImporter;
pub use api::{ApiError, StockApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "轮胎库存上报系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
