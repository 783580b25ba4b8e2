// ==========================================
// 轮胎库存上报系统 - 分组汇总报表
// ==========================================
// 职责: 分组汇总 → 报表网格 → xlsx 字节流
// 布局: 第 1 行表头，第 2 行汇总值
//   A = 公司名 | 夏季分组... | SUMMER total | 冬季分组... | WINTER total | TOTAL | 全部库存
// 红线: 公式单元格同时携带缓存值，缓存值等于所引用单元格之和
// ==========================================

use crate::config::GroupConfig;
use crate::domain::stock::{StockRecord, VendorGroupSums};
use crate::engine::group_aggregator::GroupAggregator;
use crate::export::error::ExportResult;
use rust_xlsxwriter::{Color, Format, Formula, Workbook};
use tracing::{info, instrument};

pub const SUMMER_TOTAL_LABEL: &str = "SUMMER total";
pub const WINTER_TOTAL_LABEL: &str = "WINTER total";
pub const TOTAL_LABEL: &str = "TOTAL";
pub const ALL_STOCK_LABEL: &str =
    "Все остатки клиента (по всем конкурентам и Нокиан в том числе)";

/// 文件名前缀
pub const FILENAME_PREFIX: &str = "IkonReport";

const SHEET_NAME: &str = "Sheet1";
const HEADER_FONT_SIZE: f64 = 12.0;
const HEADER_BACKGROUND: u32 = 0xE0E0E0;
const COLUMN_WIDTH: f64 = 20.0;

/// 汇总值所在行（1-based，公式引用使用）
const VALUE_ROW: usize = 2;

// ==========================================
// ReportCell - 报表单元格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ReportCell {
    Empty,
    Text(String),
    Number(f64),
    /// 公式 + 生成时的计算结果
    Formula { expr: String, value: f64 },
}

impl ReportCell {
    /// 单元格数值（文本/空为 None）
    pub fn value(&self) -> Option<f64> {
        match self {
            ReportCell::Number(v) => Some(*v),
            ReportCell::Formula { value, .. } => Some(*value),
            _ => None,
        }
    }
}

// ==========================================
// GroupReport - 报表网格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub rows: Vec<Vec<ReportCell>>,
}

impl GroupReport {
    /// 按 0-based 行/列取单元格
    pub fn cell(&self, row: usize, col: usize) -> Option<&ReportCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// 按 A1 风格地址取单元格（如 "F2"）
    pub fn cell_at(&self, address: &str) -> Option<&ReportCell> {
        let split = address.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = address.split_at(split);
        let row: usize = digits.parse().ok()?;
        let col = letters
            .chars()
            .try_fold(0usize, |acc, c| {
                c.is_ascii_uppercase()
                    .then(|| acc * 26 + (c as usize - 'A' as usize + 1))
            })?;
        if row == 0 || col == 0 {
            return None;
        }
        self.cell(row - 1, col - 1)
    }

    /// 渲染为 xlsx（表头加粗 12 号灰底，所有列宽 20）
    pub fn to_xlsx(&self) -> ExportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(HEADER_FONT_SIZE)
            .set_background_color(Color::RGB(HEADER_BACKGROUND));

        for (r, row) in self.rows.iter().enumerate() {
            let row_idx = r as u32;
            for (c, cell) in row.iter().enumerate() {
                let col_idx = c as u16;
                match cell {
                    ReportCell::Empty if r == 0 => {
                        sheet.write_blank(row_idx, col_idx, &header_format)?;
                    }
                    ReportCell::Empty => {}
                    ReportCell::Text(text) if r == 0 => {
                        sheet.write_string_with_format(row_idx, col_idx, text, &header_format)?;
                    }
                    ReportCell::Text(text) => {
                        sheet.write_string(row_idx, col_idx, text)?;
                    }
                    ReportCell::Number(value) => {
                        sheet.write_number(row_idx, col_idx, *value)?;
                    }
                    ReportCell::Formula { expr, value } => {
                        let formula = Formula::new(expr).set_result(format_number(*value));
                        sheet.write_formula(row_idx, col_idx, formula)?;
                    }
                }
            }
        }

        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        for col in 0..width {
            sheet.set_column_width(col as u16, COLUMN_WIDTH)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

// ==========================================
// GroupReportBuilder - 报表构建器
// ==========================================
pub struct GroupReportBuilder;

impl GroupReportBuilder {
    /// 汇总并构建报表
    #[instrument(skip(self, records, config), fields(count = records.len()))]
    pub fn build(&self, records: &[StockRecord], config: &GroupConfig) -> GroupReport {
        let sums = GroupAggregator.aggregate(records, config);
        let report = self.from_sums(&sums, config);
        info!(grand_total = sums.grand_total, "汇总报表已构建");
        report
    }

    /// 由已有汇总结果构建报表网格
    pub fn from_sums(&self, sums: &VendorGroupSums, config: &GroupConfig) -> GroupReport {
        let mut header = vec![ReportCell::Text(config.company_name.clone())];
        let mut values = vec![ReportCell::Empty];

        // 夏季分组 + SUMMER total
        let summer_first = header.len();
        for group in &config.summer_groups {
            header.push(ReportCell::Text(group.label.clone()));
            values.push(ReportCell::Number(sums.summer_sum(&group.label) as f64));
        }
        let summer_total_col = header.len();
        let summer_total = sum_range(&values, summer_first, summer_total_col);
        header.push(ReportCell::Text(SUMMER_TOTAL_LABEL.to_string()));
        values.push(ReportCell::Formula {
            expr: range_formula(summer_first, summer_total_col),
            value: summer_total,
        });

        // 冬季分组 + WINTER total
        let winter_first = header.len();
        for group in &config.winter_groups {
            header.push(ReportCell::Text(group.label.clone()));
            values.push(ReportCell::Number(sums.winter_sum(&group.label) as f64));
        }
        let winter_total_col = header.len();
        let winter_total = sum_range(&values, winter_first, winter_total_col);
        header.push(ReportCell::Text(WINTER_TOTAL_LABEL.to_string()));
        values.push(ReportCell::Formula {
            expr: range_formula(winter_first, winter_total_col),
            value: winter_total,
        });

        // TOTAL = SUMMER total + WINTER total
        header.push(ReportCell::Text(TOTAL_LABEL.to_string()));
        values.push(ReportCell::Formula {
            expr: format!(
                "=SUM({}{row},{}{row})",
                column_letter(summer_total_col),
                column_letter(winter_total_col),
                row = VALUE_ROW
            ),
            value: summer_total + winter_total,
        });

        header.push(ReportCell::Text(ALL_STOCK_LABEL.to_string()));
        values.push(ReportCell::Number(sums.grand_total as f64));

        GroupReport {
            rows: vec![header, values],
        }
    }
}

/// `[first, end)` 区间的 SUM 公式；区间为空时为 0
fn range_formula(first: usize, end: usize) -> String {
    if end <= first {
        return "=0".to_string();
    }
    format!(
        "=SUM({}{row}:{}{row})",
        column_letter(first),
        column_letter(end - 1),
        row = VALUE_ROW
    )
}

fn sum_range(values: &[ReportCell], first: usize, end: usize) -> f64 {
    values[first..end].iter().filter_map(ReportCell::value).sum()
}

/// 0-based 列下标 → 列字母（0 → A，26 → AA）
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
