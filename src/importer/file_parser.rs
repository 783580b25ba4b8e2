// ==========================================
// 轮胎库存上报系统 - 工作表读取器实现
// ==========================================
// 支持: Excel (.xlsx) / CSV (.csv)
// 输出: 按绝对行号排列的 RawRow（行号从 1 开始，含表头区域）
// ==========================================

use crate::domain::stock::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// ==========================================
// SheetReader Trait
// ==========================================
// 用途: 屏蔽文件格式差异，便于测试注入内存数据
pub trait SheetReader {
    /// 列出工作表名称（按工作簿顺序）
    fn list_sheets(&mut self) -> ImportResult<Vec<String>>;

    /// 读取指定工作表的全部行
    ///
    /// 返回的行号为工作表中的绝对行号（第 1 行 = 1），
    /// 已用区域之前的空行与空列会补齐为空串
    fn read_rows(&mut self, sheet: &str) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// ExcelSheetReader - calamine 读取 .xlsx
// ==========================================
pub struct ExcelSheetReader {
    workbook: Xlsx<BufReader<File>>,
}

impl ExcelSheetReader {
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let workbook: Xlsx<_> = open_workbook(path)?;
        Ok(Self { workbook })
    }
}

impl SheetReader for ExcelSheetReader {
    fn list_sheets(&mut self) -> ImportResult<Vec<String>> {
        Ok(self.workbook.sheet_names())
    }

    fn read_rows(&mut self, sheet: &str) -> ImportResult<Vec<RawRow>> {
        let range = self.workbook.worksheet_range(sheet)?;

        // 已用区域的左上角（0-based），用于还原绝对行号/列号
        let (first_row, first_col) = match range.start() {
            Some((row, col)) => (row as usize, col as usize),
            None => return Ok(Vec::new()),
        };

        let mut rows = Vec::with_capacity(first_row + range.height());
        for idx in 0..first_row {
            rows.push(RawRow::new(idx + 1, Vec::new()));
        }

        for (offset, data_row) in range.rows().enumerate() {
            let mut cells = vec![String::new(); first_col];
            cells.extend(data_row.iter().map(cell_to_string));
            // 已用区域按最宽行补齐，需还原实际列数
            trim_trailing_empty(&mut cells);
            rows.push(RawRow::new(first_row + offset + 1, cells));
        }

        Ok(rows)
    }
}

/// 去掉行尾的空单元格（空行/合计行因此列数不足而被跳过）
fn trim_trailing_empty(cells: &mut Vec<String>) {
    while cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }
}

/// 单元格转文本（整数值浮点不带 ".0"）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

// ==========================================
// CsvSheetReader - 单工作表的 CSV 文件
// ==========================================
pub struct CsvSheetReader {
    path: PathBuf,
}

/// CSV 文件的虚拟工作表名
pub const CSV_SHEET_NAME: &str = "Sheet1";

impl CsvSheetReader {
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl SheetReader for CsvSheetReader {
    fn list_sheets(&mut self) -> ImportResult<Vec<String>> {
        Ok(vec![CSV_SHEET_NAME.to_string()])
    }

    fn read_rows(&mut self, _sheet: &str) -> ImportResult<Vec<RawRow>> {
        let file = File::open(&self.path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 空行会被 csv 跳过，行号取记录起始的物理行
        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);
            let mut cells: Vec<String> = record.iter().map(|v| v.to_string()).collect();
            trim_trailing_empty(&mut cells);
            rows.push(RawRow::new(row_number, cells));
        }
        Ok(rows)
    }
}

// ==========================================
// MemorySheetReader - 内存数据（测试/嵌入调用）
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MemorySheetReader {
    sheets: Vec<(String, Vec<Vec<String>>)>,
}

impl MemorySheetReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个工作表（第一行对应行号 1）
    pub fn with_sheet(mut self, name: &str, rows: Vec<Vec<String>>) -> Self {
        self.sheets.push((name.to_string(), rows));
        self
    }
}

impl SheetReader for MemorySheetReader {
    fn list_sheets(&mut self) -> ImportResult<Vec<String>> {
        Ok(self.sheets.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read_rows(&mut self, sheet: &str) -> ImportResult<Vec<RawRow>> {
        let (_, rows) = self
            .sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .ok_or_else(|| ImportError::Other(anyhow::anyhow!("工作表不存在: {}", sheet)))?;

        Ok(rows
            .iter()
            .enumerate()
            .map(|(idx, cells)| RawRow::new(idx + 1, cells.clone()))
            .collect())
    }
}

// ==========================================
// 根据扩展名选择读取器
// ==========================================
pub fn open_sheet_reader<P: AsRef<Path>>(path: P) -> ImportResult<Box<dyn SheetReader>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" => Ok(Box::new(ExcelSheetReader::open(path)?)),
        "csv" => Ok(Box::new(CsvSheetReader::open(path)?)),
        _ => Err(ImportError::UnsupportedFormat(ext)),
    }
}
