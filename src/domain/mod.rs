// ==========================================
// 轮胎库存上报系统 - 领域模型层
// ==========================================
// 职责: 定义库存记录、解析结果、汇总结果等领域类型
// 红线: 不含文件读写逻辑，不含导出逻辑
// ==========================================

pub mod stock;
pub mod types;

// 重导出核心类型
pub use stock::{
    ParseOutcome, ParseStats, RawRow, RowDiagnostic, StockRecord, VendorGroupSums,
    VendorResponse, VendorUploadEntry,
};
pub use types::Season;
