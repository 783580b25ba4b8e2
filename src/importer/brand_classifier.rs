// ==========================================
// 轮胎库存上报系统 - 品牌/季节分类器
// ==========================================
// 职责: 从品牌原文中识别季节、清理品牌名、判定供应商品牌
// 匹配方式: 大小写不敏感的子串匹配（启发式）
// ==========================================

use crate::domain::types::Season;
use crate::importer::data_cleaner::DataCleaner;

/// 冬季关键字（含“шип” 钉胎）
pub const WINTER_KEYWORDS: [&str; 4] = ["зима", "шип", "ice", "winter"];

/// 夏季关键字
pub const SUMMER_KEYWORDS: [&str; 2] = ["лето", "summer"];

/// 标记字符
const MARKER: char = '*';

/// 名称中的“年份”标记
const YEAR_MARKER: &str = "год";

pub struct BrandClassifier;

impl BrandClassifier {
    /// 识别季节并清理品牌
    ///
    /// # 规则
    /// - 冬季关键字优先于夏季关键字
    /// - 命中的季节关键字（不区分大小写）与 `*` 全部删除
    /// - 其余文本保持原有大小写，再折叠空白
    pub fn classify_brand_season(&self, field: &str) -> (String, Season) {
        let lower = field.to_lowercase();

        let season = if WINTER_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Season::Winter
        } else if SUMMER_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Season::Summer
        } else {
            Season::Unknown
        };

        let mut brand = field.replace(MARKER, "");
        for keyword in WINTER_KEYWORDS.iter().chain(SUMMER_KEYWORDS.iter()) {
            if lower.contains(keyword) {
                brand = strip_keyword(&brand, keyword);
            }
        }

        (DataCleaner.collapse_whitespace(&brand), season)
    }

    /// 判定是否属于供应商品牌
    ///
    /// 双向包含: 品牌包含清单项，或清单项包含品牌。
    /// 空品牌永不匹配，清单中的空项忽略。
    pub fn is_vendor_brand<S: AsRef<str>>(&self, clean_brand: &str, vendor_brands: &[S]) -> bool {
        let brand = clean_brand.trim().to_lowercase();
        if brand.is_empty() {
            return false;
        }

        vendor_brands.iter().any(|candidate| {
            let candidate = candidate.as_ref().trim().to_lowercase();
            !candidate.is_empty() && (brand.contains(&candidate) || candidate.contains(&brand))
        })
    }

    /// 名称中是否含“год”（去年库存标记）
    pub fn is_year_old(&self, name: &str) -> bool {
        name.to_lowercase().contains(YEAR_MARKER)
    }
}

/// 不区分大小写地删除关键字的所有出现，其余字符原样保留
fn strip_keyword(text: &str, keyword: &str) -> String {
    let needle: Vec<char> = keyword.chars().collect();
    if needle.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let matched = i + needle.len() <= chars.len()
            && chars[i..i + needle.len()]
                .iter()
                .zip(&needle)
                .all(|(c, n)| c.to_lowercase().eq(n.to_lowercase()));
        if matched {
            i += needle.len();
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}
