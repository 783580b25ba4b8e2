// ==========================================
// 轮胎库存上报系统 - 配置层
// ==========================================
// 职责: 启动配置（环境变量）+ 导入/报表配置
// ==========================================

pub mod app_config;
pub mod import_config;

// 重导出核心配置类型
pub use app_config::{AppConfig, ConfigError, VendorConfig};
pub use import_config::{
    BrandGroup, ColumnMap, GroupConfig, GroupConfigError, ParserConfig, DEFAULT_START_ROW,
    DEFAULT_VENDOR_BRANDS,
};
