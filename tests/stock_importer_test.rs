// ==========================================
// 库存导入器集成测试
// ==========================================
// 覆盖: 内存工作表 / CSV 文件 / xlsx 文件三种入口
// ==========================================

use rust_xlsxwriter::Workbook;
use tempfile::NamedTempFile;
use tire_stock_sender::config::ParserConfig;
use tire_stock_sender::domain::Season;
use tire_stock_sender::importer::{ImportError, MemorySheetReader, StockImporter};

use test_helpers::{header_rows, numbered, sample_sheet, stock_cells, write_csv_fixture};

#[test]
fn test_pirelli_winter_row_is_normalized() {
    let importer = StockImporter::default();
    let mut rows = header_rows();
    rows.push(stock_cells(
        "Tire X",
        "PIRELLI ЗИМА*",
        "1234",
        "5678",
        "205/55R16",
        "10",
        "2 581,00",
    ));

    let outcome = importer.run(&numbered(rows)).unwrap();

    assert_eq!(outcome.stats.valid_rows, 1);
    let record = &outcome.all_items[0];
    assert_eq!(record.row_number, 12);
    assert_eq!(record.clean_brand, "PIRELLI");
    assert_eq!(record.season, Season::Winter);
    assert!(record.is_vendor_eligible);
    assert_eq!(record.quantity, 10);
    assert!((record.unit_price - 2581.0).abs() < f64::EPSILON);
    assert_eq!(outcome.vendor_items.len(), 1);
}

#[test]
fn test_missing_internal_code_excluded_everywhere() {
    let importer = StockImporter::default();
    let mut rows = header_rows();
    rows.push(stock_cells("Tire Y", "Pirelli", "", "5678", "205/55R16", "3", "100"));

    let outcome = importer.run(&numbered(rows)).unwrap();

    assert_eq!(outcome.stats.invalid_rows, 1);
    assert_eq!(outcome.stats.total_rows, 1);
    assert!(outcome.all_items.is_empty());
    assert!(outcome.vendor_items.is_empty());
    assert!(outcome.stats.diagnostics[0].reason.contains("internal code"));
    assert_eq!(outcome.stats.diagnostics[0].row_number, 12);
}

#[test]
fn test_hundred_rows_three_vendor_eligible() {
    let importer = StockImporter::default();
    let mut rows = header_rows();
    for i in 0..100 {
        let code = format!("{}", 1000 + i);
        let (brand, sku, qty) = match i {
            // 三条可上报
            3 | 50 | 97 => ("Pirelli лето", "777", "5"),
            // 供应商品牌但数量为 0
            10 => ("Pirelli", "778", "0"),
            // 供应商品牌但无厂商编码
            20 => ("Formula", "", "2"),
            _ => ("Nokian", "", "1"),
        };
        rows.push(stock_cells("Шина", brand, &code, sku, "205/55R16", qty, "10"));
    }

    let outcome = importer.run(&numbered(rows)).unwrap();

    assert_eq!(outcome.stats.total_rows, 100);
    assert_eq!(outcome.stats.valid_rows, 100);
    assert_eq!(outcome.all_items.len(), 100);
    assert_eq!(outcome.vendor_items.len(), 3);
    assert_eq!(outcome.stats.vendor_count, 3);
    assert!(outcome.vendor_items.iter().all(|r| r.is_exportable()));
}

#[test]
fn test_short_sheet_is_rejected() {
    let importer = StockImporter::default();
    let rows = numbered(header_rows()[..5].to_vec());

    let err = importer.run(&rows).unwrap_err();
    assert!(matches!(
        err,
        ImportError::InsufficientRows {
            required: 12,
            actual: 5
        }
    ));
}

#[test]
fn test_custom_start_row() {
    let config = ParserConfig {
        start_row: 2,
        ..ParserConfig::default()
    };
    let importer = StockImporter::new(config);

    let rows = numbered(vec![
        vec!["Наименование".to_string()],
        stock_cells("A", "Pirelli", "1", "2", "R16", "1", "1"),
    ]);
    let outcome = importer.run(&rows).unwrap();

    assert_eq!(outcome.stats.valid_rows, 1);
    assert_eq!(outcome.all_items[0].row_number, 2);
}

#[test]
fn test_memory_reader_sample_sheet() {
    let importer = StockImporter::default();
    let mut reader = MemorySheetReader::new().with_sheet("Остатки", sample_sheet());

    let outcome = importer.parse(&mut reader).unwrap();

    assert_eq!(outcome.stats.valid_rows, 3);
    assert_eq!(outcome.stats.invalid_rows, 1);
    assert_eq!(outcome.stats.vendor_count, 2);

    let formula = outcome
        .all_items
        .iter()
        .find(|r| r.internal_code == "2001")
        .unwrap();
    assert_eq!(formula.clean_brand, "Formula");
    assert_eq!(formula.season, Season::Summer);
    assert!(formula.is_year_old);

    let nokian = outcome
        .all_items
        .iter()
        .find(|r| r.internal_code == "4001")
        .unwrap();
    assert!(!nokian.is_vendor_eligible);
    assert!((nokian.unit_price - 9900.5).abs() < f64::EPSILON);
}

#[test]
fn test_import_csv_file() {
    let file = NamedTempFile::with_suffix(".csv").unwrap();
    write_csv_fixture(file.path(), &sample_sheet());

    let outcome = StockImporter::default()
        .import_file(file.path(), "остатки.csv")
        .unwrap();

    assert_eq!(outcome.original_file, "остатки.csv");
    assert_eq!(outcome.stats.valid_rows, 3);
    assert_eq!(outcome.stats.vendor_count, 2);
    assert!(outcome.key.ends_with("_processed.json"));
    assert!(!outcome.batch_id.is_empty());
}

#[test]
fn test_import_xlsx_file_with_numeric_cells() {
    let file = NamedTempFile::with_suffix(".xlsx").unwrap();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in header_rows().iter().enumerate() {
        sheet.write_string(r as u32, 0, &row[0]).unwrap();
    }
    sheet.write_string(11, 0, "Pirelli Scorpion").unwrap();
    sheet.write_string(11, 1, "Pirelli лето").unwrap();
    sheet.write_number(11, 5, 1234.0).unwrap();
    sheet.write_number(11, 6, 5678.0).unwrap();
    sheet.write_string(11, 7, "235/60R18").unwrap();
    sheet.write_number(11, 8, 8.0).unwrap();
    sheet.write_number(11, 9, 12500.5).unwrap();
    workbook.save(file.path()).unwrap();

    let outcome = StockImporter::default()
        .import_file(file.path(), "stock.xlsx")
        .unwrap();

    assert_eq!(outcome.stats.valid_rows, 1);
    let record = &outcome.vendor_items[0];
    assert_eq!(record.internal_code, "1234");
    assert_eq!(record.vendor_sku, "5678");
    assert_eq!(record.quantity, 8);
    assert!((record.unit_price - 12500.5).abs() < f64::EPSILON);
}

#[test]
fn test_import_xlsx_skips_blank_and_footer_rows() {
    let file = NamedTempFile::with_suffix(".xlsx").unwrap();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in header_rows().iter().enumerate() {
        sheet.write_string(r as u32, 0, &row[0]).unwrap();
    }
    sheet.write_string(11, 0, "Pirelli Cinturato").unwrap();
    sheet.write_string(11, 1, "Pirelli").unwrap();
    sheet.write_number(11, 5, 1234.0).unwrap();
    sheet.write_number(11, 6, 5678.0).unwrap();
    sheet.write_string(11, 7, "205/55R16").unwrap();
    sheet.write_number(11, 8, 8.0).unwrap();
    sheet.write_number(11, 9, 4500.0).unwrap();
    // 第 13 行留空，第 14 行为合计行（最后一列为空）
    sheet.write_string(13, 0, "Итого").unwrap();
    sheet.write_number(13, 8, 8.0).unwrap();
    workbook.save(file.path()).unwrap();

    let outcome = StockImporter::default()
        .import_file(file.path(), "stock.xlsx")
        .unwrap();

    assert_eq!(outcome.stats.total_rows, 1);
    assert_eq!(outcome.stats.valid_rows, 1);
    assert_eq!(outcome.stats.invalid_rows, 0);
    assert!(outcome.stats.diagnostics.is_empty());
    assert_eq!(outcome.all_items[0].row_number, 12);
}

#[test]
fn test_import_csv_with_blank_header_line() {
    let file = NamedTempFile::with_suffix(".csv").unwrap();

    // 第 2 行为空行，数据仍位于第 12 行
    let mut lines = vec!["Остатки на складе".to_string(), String::new()];
    for i in 3..=11 {
        lines.push(format!("Заголовок {}", i));
    }
    lines.push("Tire,Pirelli,,,,1234,5678,205/55R16,4,100".to_string());
    std::fs::write(file.path(), lines.join("\n") + "\n").unwrap();

    let outcome = StockImporter::default()
        .import_file(file.path(), "stock.csv")
        .unwrap();

    assert_eq!(outcome.stats.valid_rows, 1);
    assert_eq!(outcome.all_items[0].row_number, 12);
    assert_eq!(outcome.vendor_items.len(), 1);
}

#[test]
fn test_import_unsupported_extension() {
    let file = NamedTempFile::with_suffix(".txt").unwrap();
    let err = StockImporter::default()
        .import_file(file.path(), "x.txt")
        .unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}
