// ==========================================
// 轮胎库存上报系统 - 导出层
// ==========================================
// 职责: 供应商 CSV 库存文件 + 分组汇总报表
// 红线: 只读 ParseOutcome 中的记录，不修改
// ==========================================

pub mod error;
pub mod group_report;
pub mod vendor_csv;

use chrono::{DateTime, Local};

pub use error::{ExportError, ExportResult};
pub use group_report::{GroupReport, GroupReportBuilder, ReportCell};
pub use vendor_csv::{validate_for_upload, VendorCsvExporter};

/// 生成产物文件名: `<prefix>_<customer_code>_<YYYYMMDD>.<ext>`
///
/// 同一天内重复生成会得到相同文件名（不去重）
pub fn artifact_filename(prefix: &str, customer_code: &str, at: &DateTime<Local>, ext: &str) -> String {
    format!("{}_{}_{}.{}", prefix, customer_code, at.format("%Y%m%d"), ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_artifact_filename() {
        let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(
            artifact_filename("IR", "5700097", &at, "csv"),
            "IR_5700097_20240305.csv"
        );
    }
}
