// ==========================================
// 轮胎库存上报系统 - 导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导出模块错误类型（导出调用整体失败，不产生部分输出）
#[derive(Error, Debug)]
pub enum ExportError {
    // ===== 上报前校验 =====
    #[error("导出校验失败（内部编码 {internal_code}）: {reason}")]
    Validation {
        internal_code: String,
        reason: String,
    },

    #[error("没有可导出的供应商记录")]
    NoItems,

    // ===== 生成失败 =====
    #[error("CSV 写入失败（第 {row} 行，内部编码 {internal_code}）: {message}")]
    CsvWrite {
        row: usize,
        internal_code: String,
        message: String,
    },

    #[error("Excel 生成失败: {0}")]
    Xlsx(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Xlsx(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
