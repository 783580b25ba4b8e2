// ==========================================
// 轮胎库存上报系统 - 库存导入器实现
// ==========================================
// 职责: 整合导入流程，从工作表行到 ParseOutcome
// 流程: 读取 → 跳过表头区域 → 映射/校验 → 统计 → 分区（全部 / 供应商）
// 红线: 每次调用构建全新结果，不保留跨调用状态
// ==========================================

use crate::config::ParserConfig;
use crate::domain::stock::{ParseOutcome, ParseStats, RawRow, RowDiagnostic};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{open_sheet_reader, SheetReader};
use chrono::Local;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// StockImporter - 库存导入器
// ==========================================
pub struct StockImporter {
    config: ParserConfig,
    field_mapper: FieldMapper,
}

impl StockImporter {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            field_mapper: FieldMapper,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// 从文件导入（按扩展名选择读取器）
    ///
    /// # 参数
    /// - path: 文件路径（.xlsx / .csv）
    /// - original_file: 结果中记录的源文件名
    #[instrument(skip(self, path))]
    pub fn import_file<P: AsRef<Path>>(
        &self,
        path: P,
        original_file: &str,
    ) -> ImportResult<ParseOutcome> {
        let mut reader = open_sheet_reader(path)?;
        let mut outcome = self.parse(reader.as_mut())?;
        outcome.original_file = original_file.to_string();
        Ok(outcome)
    }

    /// 解析读取器中的第一个工作表
    pub fn parse(&self, reader: &mut dyn SheetReader) -> ImportResult<ParseOutcome> {
        let sheets = reader.list_sheets()?;
        let sheet = sheets.first().ok_or(ImportError::NoSheets)?;
        debug!(sheet = %sheet, sheet_count = sheets.len(), "读取第一个工作表");

        let rows = reader.read_rows(sheet)?;
        self.run(&rows)
    }

    /// 对已读取的行执行解析流程
    ///
    /// # 返回
    /// - Ok(ParseOutcome): 有效记录与统计（行级错误只进入诊断）
    /// - Err(ImportError): 工作表为空或行数不足
    #[instrument(skip(self, rows), fields(batch_id))]
    pub fn run(&self, rows: &[RawRow]) -> ImportResult<ParseOutcome> {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        if rows.is_empty() {
            return Err(ImportError::EmptySheet);
        }
        // 按绝对行号判断（CSV 会跳过空行，记录数可能小于行号）
        let start_row = self.config.start_row;
        let last_row = rows.iter().map(|r| r.row_number).max().unwrap_or(0);
        if last_row < start_row {
            return Err(ImportError::InsufficientRows {
                required: start_row,
                actual: last_row,
            });
        }

        info!(
            batch_id = %batch_id,
            rows = rows.len(),
            start_row = start_row,
            "开始解析库存表"
        );

        let min_columns = self.config.columns.min_columns();
        let mut stats = ParseStats::default();
        let mut all_items = Vec::new();
        let mut vendor_items = Vec::new();

        for row in rows.iter().filter(|r| r.row_number >= start_row) {
            // 列数不足: 跳过且不计入统计
            if row.cell_count() < min_columns {
                debug!(row_number = row.row_number, cells = row.cell_count(), "列数不足，跳过");
                continue;
            }

            match self
                .field_mapper
                .map_row(row, &self.config.columns, self.config.vendor_brands.as_slice())
            {
                Ok(record) => {
                    stats.valid_rows += 1;
                    if record.is_exportable() {
                        vendor_items.push(record.clone());
                    }
                    all_items.push(record);
                }
                Err(e) => {
                    warn!(
                        row_number = e.row_number,
                        name = %e.record.name,
                        internal_code = %e.record.internal_code,
                        reason = %e.reason(),
                        "行校验失败"
                    );
                    stats.invalid_rows += 1;
                    stats.diagnostics.push(RowDiagnostic {
                        row_number: e.row_number,
                        reason: e.reason(),
                    });
                }
            }
        }

        stats.total_rows = stats.valid_rows + stats.invalid_rows;
        stats.vendor_count = vendor_items.len();

        info!(
            batch_id = %batch_id,
            total = stats.total_rows,
            valid = stats.valid_rows,
            invalid = stats.invalid_rows,
            vendor = stats.vendor_count,
            "库存表解析完成"
        );

        let processed_at = Local::now();
        Ok(ParseOutcome {
            key: ParseOutcome::key_for(&processed_at),
            original_file: String::new(),
            processed_at,
            batch_id,
            stats,
            all_items,
            vendor_items,
        })
    }
}

impl Default for StockImporter {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}
