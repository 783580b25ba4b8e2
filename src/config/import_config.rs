// ==========================================
// 轮胎库存上报系统 - 导入与报表配置
// ==========================================
// 职责: 固定列布局、数据起始行、供应商品牌清单、报表分组
// 红线: 启动时构造，显式传入导入器/汇总器，不作为全局状态读取
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// 数据起始行（1-based，表头占用前 11 行）
pub const DEFAULT_START_ROW: usize = 12;

/// 供应商（Pirelli/Formula）品牌清单
pub const DEFAULT_VENDOR_BRANDS: [&str; 4] = ["pirelli", "пирелли", "formula", "формула"];

// ==========================================
// ColumnMap - 固定列布局（0-based 列下标）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub name: usize,          // A
    pub brand: usize,         // B
    pub internal_code: usize, // F
    pub vendor_sku: usize,    // G
    pub tire_size: usize,     // H
    pub quantity: usize,      // I
    pub price: usize,         // J
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            name: 0,
            brand: 1,
            internal_code: 5,
            vendor_sku: 6,
            tire_size: 7,
            quantity: 8,
            price: 9,
        }
    }
}

impl ColumnMap {
    /// 行至少需要的单元格数量（能取到最右侧的列）
    pub fn min_columns(&self) -> usize {
        [
            self.name,
            self.brand,
            self.internal_code,
            self.vendor_sku,
            self.tire_size,
            self.quantity,
            self.price,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

// ==========================================
// ParserConfig - 解析器配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    pub start_row: usize,
    pub columns: ColumnMap,
    pub vendor_brands: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            start_row: DEFAULT_START_ROW,
            columns: ColumnMap::default(),
            vendor_brands: DEFAULT_VENDOR_BRANDS.iter().map(|b| b.to_string()).collect(),
        }
    }
}

// ==========================================
// GroupConfig - 汇总报表分组
// ==========================================
// 分组按声明顺序匹配，首个命中的分组计入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandGroup {
    pub label: String,
    pub brands: Vec<String>,
}

impl BrandGroup {
    pub fn new(label: &str, brands: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            brands: brands.iter().map(|b| b.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub company_name: String,
    #[serde(default)]
    pub summer_groups: Vec<BrandGroup>,
    #[serde(default)]
    pub winter_groups: Vec<BrandGroup>,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            company_name: "Company".to_string(),
            summer_groups: vec![
                BrandGroup::new("Summer A", &["Ikon", "Nokian"]),
                BrandGroup::new("Summer B", &["Hakka"]),
                BrandGroup::new("Bars", &["Bars"]),
                BrandGroup::new("Attar", &["Attar"]),
            ],
            winter_groups: vec![
                BrandGroup::new("Winter A", &["Ikon", "Nokian"]),
                BrandGroup::new("Winter B", &["Hakka"]),
                BrandGroup::new("Attar", &["Attar"]),
            ],
        }
    }
}

/// 分组配置错误
#[derive(Error, Debug)]
pub enum GroupConfigError {
    #[error("分组配置 JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    // 汇总按标签累加，同季节标签重复会导致重复计数
    #[error("{season} 分组标签重复: {label}")]
    DuplicateLabel { season: &'static str, label: String },
}

impl GroupConfig {
    /// 从 JSON 文本加载分组配置（加载后校验）
    pub fn from_json(raw: &str) -> Result<Self, GroupConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验同一季节内分组标签唯一（跨季节可重名）
    pub fn validate(&self) -> Result<(), GroupConfigError> {
        check_unique_labels("summer_groups", &self.summer_groups)?;
        check_unique_labels("winter_groups", &self.winter_groups)
    }
}

fn check_unique_labels(season: &'static str, groups: &[BrandGroup]) -> Result<(), GroupConfigError> {
    let mut seen = HashSet::new();
    for group in groups {
        if !seen.insert(group.label.as_str()) {
            return Err(GroupConfigError::DuplicateLabel {
                season,
                label: group.label.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_column_map_min_columns() {
        // 价格在 J 列（下标 9），至少 10 个单元格
        assert_eq!(ColumnMap::default().min_columns(), 10);
    }

    #[test]
    fn test_default_parser_config() {
        let config = ParserConfig::default();
        assert_eq!(config.start_row, 12);
        assert!(config.vendor_brands.iter().any(|b| b == "пирелли"));
    }

    #[test]
    fn test_group_config_from_json() {
        let raw = r#"{
            "company_name": "Шинный центр",
            "summer_groups": [{"label": "A", "brands": ["Nokian"]}]
        }"#;
        let config = GroupConfig::from_json(raw).unwrap();
        assert_eq!(config.company_name, "Шинный центр");
        assert_eq!(config.summer_groups[0].brands, vec!["Nokian".to_string()]);
        assert!(config.winter_groups.is_empty());
    }

    #[test]
    fn test_group_config_rejects_duplicate_label_in_season() {
        let raw = r#"{
            "company_name": "X",
            "summer_groups": [
                {"label": "A", "brands": ["Nokian"]},
                {"label": "A", "brands": ["Hakka"]}
            ]
        }"#;
        let err = GroupConfig::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            GroupConfigError::DuplicateLabel { season: "summer_groups", ref label } if label == "A"
        ));
    }

    #[test]
    fn test_group_config_same_label_across_seasons() {
        // 默认配置中 Attar 同时出现在夏季与冬季
        assert!(GroupConfig::default().validate().is_ok());

        let raw = r#"{
            "company_name": "X",
            "summer_groups": [{"label": "A", "brands": ["Nokian"]}],
            "winter_groups": [{"label": "A", "brands": ["Nokian"]}]
        }"#;
        assert!(GroupConfig::from_json(raw).is_ok());
    }

    #[test]
    fn test_group_config_invalid_json() {
        let err = GroupConfig::from_json("{").unwrap_err();
        assert!(matches!(err, GroupConfigError::Json(_)));
    }

    #[test]
    fn test_default_group_layout_matches_report_columns() {
        let config = GroupConfig::default();
        assert_eq!(config.summer_groups.len(), 4);
        assert_eq!(config.winter_groups.len(), 3);
    }
}
