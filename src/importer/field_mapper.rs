// ==========================================
// 轮胎库存上报系统 - 字段映射器实现
// ==========================================
// 职责: 原始行（固定列布局） → StockRecord + 行级校验
// 顺序: 名称 → 年份标记 → 品牌/季节 → 供应商判定 → 编码 → 规格 → 数量 → 价格 → 校验
// ==========================================

use crate::config::ColumnMap;
use crate::domain::stock::{RawRow, StockRecord};
use crate::importer::brand_classifier::BrandClassifier;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::RowValidationError;

pub struct FieldMapper;

impl FieldMapper {
    /// 将原始行映射为 StockRecord
    ///
    /// # 返回
    /// - Ok(StockRecord): 校验通过
    /// - Err(RowValidationError): 收集全部违规原因，并携带已填充的记录
    ///
    /// # 说明
    /// 列数不足的行由调用方跳过，此处越界列按空串处理
    pub fn map_row<S: AsRef<str>>(
        &self,
        row: &RawRow,
        columns: &ColumnMap,
        vendor_brands: &[S],
    ) -> Result<StockRecord, RowValidationError> {
        let cleaner = DataCleaner;
        let classifier = BrandClassifier;

        let name = cleaner.collapse_whitespace(row.cell(columns.name));
        let is_year_old = classifier.is_year_old(&name);

        let raw_brand_field = cleaner.collapse_whitespace(row.cell(columns.brand));
        let (clean_brand, season) = classifier.classify_brand_season(&raw_brand_field);
        let is_vendor_eligible = classifier.is_vendor_brand(&clean_brand, vendor_brands);

        let internal_code = cleaner.digits_only(row.cell(columns.internal_code));
        let vendor_sku = cleaner.digits_only(row.cell(columns.vendor_sku));
        let tire_size = cleaner.collapse_whitespace(row.cell(columns.tire_size));

        let quantity = cleaner.parse_quantity(row.cell(columns.quantity));
        let unit_price = cleaner.parse_decimal(row.cell(columns.price));

        let record = StockRecord {
            row_number: row.row_number,
            name,
            raw_brand_field,
            clean_brand,
            season,
            internal_code,
            vendor_sku,
            tire_size,
            quantity,
            unit_price,
            is_year_old,
            is_vendor_eligible,
        };

        let reasons = self.validate(&record);
        if reasons.is_empty() {
            Ok(record)
        } else {
            Err(RowValidationError {
                row_number: row.row_number,
                reasons,
                record: Box::new(record),
            })
        }
    }

    /// 必填字段校验（返回全部违规原因）
    fn validate(&self, record: &StockRecord) -> Vec<String> {
        let mut reasons = Vec::new();
        if record.internal_code.is_empty() {
            reasons.push("internal code is empty".to_string());
        }
        if record.tire_size.is_empty() {
            reasons.push("tire size is empty".to_string());
        }
        reasons
    }
}
