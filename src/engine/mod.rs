// ==========================================
// 轮胎库存上报系统 - 引擎层
// ==========================================
// 职责: 实现业务汇总规则，不做文件读写
// ==========================================

pub mod group_aggregator;

// 重导出核心引擎
pub use group_aggregator::GroupAggregator;
