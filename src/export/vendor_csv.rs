// ==========================================
// 轮胎库存上报系统 - 供应商 CSV 导出器
// ==========================================
// 职责: 供应商库存 CSV 生成 + 上报前校验
// 格式: 固定表头 6 列，逗号分隔，库存日期 YYYYMMDD
// 红线: 库存日期每次调用只计算一次，所有行一致
// ==========================================

use crate::domain::stock::StockRecord;
use crate::export::artifact_filename;
use crate::export::error::{ExportError, ExportResult};
use chrono::{DateTime, Local, NaiveDate};
use std::io::Write;
use tracing::{debug, info, instrument};

/// CSV 表头（供应商约定的列名）
pub const CSV_HEADERS: [&str; 6] = [
    "Pirelli Customer Code",
    "Customer Material Code",
    "Pirelli Material Code",
    "Material Description",
    "Stock Quantity",
    "Stock Date",
];

/// 文件名前缀
pub const FILENAME_PREFIX: &str = "IR";

const STOCK_DATE_FORMAT: &str = "%Y%m%d";

// ==========================================
// 上报前校验
// ==========================================

/// 校验记录是否可以上报给供应商
///
/// 每条记录必须数量 > 0 且厂商编码非空；首个违规记录即失败
pub fn validate_for_upload(records: &[StockRecord]) -> ExportResult<()> {
    for record in records {
        if record.quantity == 0 {
            return Err(ExportError::Validation {
                internal_code: record.internal_code.clone(),
                reason: "quantity is zero".to_string(),
            });
        }
        if record.vendor_sku.is_empty() {
            return Err(ExportError::Validation {
                internal_code: record.internal_code.clone(),
                reason: "vendor SKU is empty".to_string(),
            });
        }
    }
    Ok(())
}

// ==========================================
// VendorCsvExporter - 供应商 CSV 导出器
// ==========================================
#[derive(Debug, Clone)]
pub struct VendorCsvExporter {
    customer_code: String,
}

impl VendorCsvExporter {
    pub fn new(customer_code: impl Into<String>) -> Self {
        Self {
            customer_code: customer_code.into(),
        }
    }

    pub fn customer_code(&self) -> &str {
        &self.customer_code
    }

    /// 写出 CSV（表头 + 每条记录一行）
    ///
    /// 任一行写入失败立即返回，并带上该行的来源行号与内部编码
    pub fn write_csv<W: Write>(
        &self,
        items: &[StockRecord],
        writer: W,
        stock_date: NaiveDate,
    ) -> ExportResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(CSV_HEADERS)
            .map_err(|e| ExportError::CsvWrite {
                row: 0,
                internal_code: String::new(),
                message: e.to_string(),
            })?;

        let stock_date = stock_date.format(STOCK_DATE_FORMAT).to_string();
        for item in items {
            let quantity = item.quantity.to_string();
            csv_writer
                .write_record([
                    self.customer_code.as_str(),
                    item.internal_code.as_str(),
                    item.vendor_sku.as_str(),
                    item.name.as_str(),
                    quantity.as_str(),
                    stock_date.as_str(),
                ])
                .map_err(|e| ExportError::CsvWrite {
                    row: item.row_number,
                    internal_code: item.internal_code.clone(),
                    message: e.to_string(),
                })?;
        }

        csv_writer.flush()?;
        debug!(rows = items.len(), "CSV 写出完成");
        Ok(())
    }

    /// 生成 CSV 字节流（库存日期取今天）
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub fn generate_export(&self, items: &[StockRecord]) -> ExportResult<Vec<u8>> {
        if items.is_empty() {
            return Err(ExportError::NoItems);
        }

        let mut buffer = Vec::new();
        self.write_csv(items, &mut buffer, Local::now().date_naive())?;

        info!(
            customer_code = %self.customer_code,
            rows = items.len(),
            bytes = buffer.len(),
            "供应商 CSV 已生成"
        );
        Ok(buffer)
    }

    /// 上报准备: 先校验，校验通过后才生成字节流
    pub fn prepare_upload(&self, items: &[StockRecord]) -> ExportResult<Vec<u8>> {
        if items.is_empty() {
            return Err(ExportError::NoItems);
        }
        validate_for_upload(items)?;
        self.generate_export(items)
    }

    /// 产物文件名: IR_<客户编码>_<YYYYMMDD>.csv
    pub fn filename(&self, at: &DateTime<Local>) -> String {
        artifact_filename(FILENAME_PREFIX, &self.customer_code, at, "csv")
    }
}
