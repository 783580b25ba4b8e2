// ==========================================
// 轮胎库存上报系统 - 库存领域模型
// ==========================================
// 用途: 导入层写入，导出层/报表层只读
// 持久化: ParseOutcome 以 JSON 形式落盘，供后续下载/上报复用
// ==========================================

use crate::domain::types::Season;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// RawRow - 原始行
// ==========================================
// 生命周期: 仅在单次解析调用内
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    pub row_number: usize,  // 工作表中的行号（从 1 开始）
    pub cells: Vec<String>, // 单元格文本（末尾缺失的单元格视为空）
}

impl RawRow {
    pub fn new(row_number: usize, cells: Vec<String>) -> Self {
        Self { row_number, cells }
    }

    /// 按列下标取单元格，越界返回空串
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// 实际单元格数量（行尾空单元格已由读取器去除）
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

// ==========================================
// StockRecord - 库存记录
// ==========================================
// 红线: 创建后不可变
// 红线: internal_code 或 tire_size 为空的记录不进入任何结果集
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockRecord {
    pub row_number: usize,       // 来源行号
    pub name: String,            // 商品名称（A 列）
    pub raw_brand_field: String, // 品牌+季节原文（B 列）
    pub clean_brand: String,     // 去除季节关键字与 * 后的品牌
    pub season: Season,          // 季节
    pub internal_code: String,   // 内部编码（F 列，仅数字）
    pub vendor_sku: String,      // 厂商编码（G 列，仅数字）
    pub tire_size: String,       // 规格（H 列）
    pub quantity: u32,           // 库存数量（I 列）
    pub unit_price: f64,         // 单价（J 列）
    pub is_year_old: bool,       // 名称中含“год”
    pub is_vendor_eligible: bool, // 品牌属于供应商品牌清单
}

impl StockRecord {
    /// 是否可进入供应商导出集合
    ///
    /// 规则: 供应商品牌 + 数量 > 0 + 厂商编码非空
    pub fn is_exportable(&self) -> bool {
        self.is_vendor_eligible && self.quantity > 0 && !self.vendor_sku.is_empty()
    }
}

// ==========================================
// RowDiagnostic - 行级诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    pub row_number: usize,
    pub reason: String,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row_number, self.reason)
    }
}

// ==========================================
// ParseStats - 解析统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    pub total_rows: usize,   // valid_rows + invalid_rows（列数不足的行不计入）
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub vendor_count: usize, // vendor_items 数量
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<RowDiagnostic>,
}

impl ParseStats {
    /// 诊断信息文本（"row <n>: <reasons>"）
    pub fn error_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

// ==========================================
// ParseOutcome - 单个文件的解析结果
// ==========================================
// 红线: 写入后只读，存储键 = key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub key: String,                 // 结果存储键（文件名）
    pub original_file: String,       // 上传的源文件名
    pub processed_at: DateTime<Local>,
    pub batch_id: String,
    pub stats: ParseStats,
    pub all_items: Vec<StockRecord>,    // 全部有效记录
    pub vendor_items: Vec<StockRecord>, // 可导出给供应商的记录
}

impl ParseOutcome {
    /// 根据处理时间生成结果存储键
    pub fn key_for(at: &DateTime<Local>) -> String {
        format!("{}_processed.json", at.format("%Y%m%d_%H%M%S"))
    }
}

// ==========================================
// VendorGroupSums - 分组汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorGroupSums {
    pub summer: BTreeMap<String, u64>,
    pub winter: BTreeMap<String, u64>,
    pub grand_total: u64,
}

impl VendorGroupSums {
    pub fn summer_sum(&self, label: &str) -> u64 {
        self.summer.get(label).copied().unwrap_or(0)
    }

    pub fn winter_sum(&self, label: &str) -> u64 {
        self.winter.get(label).copied().unwrap_or(0)
    }
}

// ==========================================
// VendorResponse - 供应商接口应答
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorResponse {
    pub status: bool,
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Vec<VendorUploadEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorUploadEntry {
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub original_name: String,
}
