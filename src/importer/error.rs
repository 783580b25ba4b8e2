// ==========================================
// 轮胎库存上报系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 结构性错误（整次解析失败） / 行级校验错误（跳过该行继续）
// ==========================================

use crate::domain::stock::StockRecord;
use thiserror::Error;

/// 导入模块错误类型（结构性错误，不产生部分结果）
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 工作表结构错误 =====
    #[error("文件不包含工作表")]
    NoSheets,

    #[error("工作表为空")]
    EmptySheet,

    #[error("工作表行数不足: 至少需要 {required} 行，实际 {actual} 行")]
    InsufficientRows { required: usize, actual: usize },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

// ==========================================
// RowValidationError - 行级校验错误
// ==========================================
// 携带已完整填充的记录，调用方可记录其字段
#[derive(Error, Debug, Clone)]
#[error("row {row_number}: {}", .reasons.join("; "))]
pub struct RowValidationError {
    pub row_number: usize,
    pub reasons: Vec<String>,
    pub record: Box<StockRecord>,
}

impl RowValidationError {
    /// 所有违规原因（"; " 拼接）
    pub fn reason(&self) -> String {
        self.reasons.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_validation_error_message_joins_reasons() {
        let err = RowValidationError {
            row_number: 14,
            reasons: vec![
                "internal code is empty".to_string(),
                "tire size is empty".to_string(),
            ],
            record: Box::default(),
        };
        assert_eq!(
            err.to_string(),
            "row 14: internal code is empty; tire size is empty"
        );
    }

    #[test]
    fn test_insufficient_rows_message() {
        let err = ImportError::InsufficientRows {
            required: 12,
            actual: 3,
        };
        assert!(err.to_string().contains("12"));
    }
}
