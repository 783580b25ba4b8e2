// ==========================================
// 轮胎库存上报系统 - 导入层
// ==========================================
// 职责: 外部库存表导入，生成标准化库存记录
// 支持: Excel (.xlsx), CSV
// ==========================================

// 模块声明
pub mod brand_classifier;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod stock_importer;

// 重导出核心类型
pub use brand_classifier::BrandClassifier;
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult, RowValidationError};
pub use field_mapper::FieldMapper;
pub use file_parser::{
    open_sheet_reader, CsvSheetReader, ExcelSheetReader, MemorySheetReader, SheetReader,
};
pub use stock_importer::StockImporter;
