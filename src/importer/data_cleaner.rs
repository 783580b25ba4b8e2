// ==========================================
// 轮胎库存上报系统 - 数据清洗器实现
// ==========================================
// 职责: 空白折叠 / 数字提取 / 本地化小数解析
// 红线: 纯函数，数值解析失败一律返回 0，不报错
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// 去除首尾空白，内部连续空白折叠为单个空格
    ///
    /// 非 ASCII 字符（西里尔字母等）原样保留
    pub fn collapse_whitespace(&self, value: &str) -> String {
        value.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// 仅保留 ASCII 数字（编码、厂商编码、数量）
    pub fn digits_only(&self, value: &str) -> String {
        value.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// 解析本地化小数（"2 581,00" → 2581.0）
    ///
    /// # 规则
    /// 1. 去除所有空白
    /// 2. 没有小数点且恰好一个逗号时，逗号视为小数点
    /// 3. 只保留数字与第一个小数点
    /// 4. 结果为空或无法解析时返回 0
    pub fn parse_decimal(&self, value: &str) -> f64 {
        let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();

        let normalized = if !compact.contains('.') && compact.matches(',').count() == 1 {
            compact.replacen(',', ".", 1)
        } else {
            compact
        };

        let mut seen_point = false;
        let kept: String = normalized
            .chars()
            .filter(|c| {
                if c.is_ascii_digit() {
                    true
                } else if *c == '.' && !seen_point {
                    seen_point = true;
                    true
                } else {
                    false
                }
            })
            .collect();

        match kept.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v,
            _ => 0.0,
        }
    }

    /// 解析库存数量
    ///
    /// 负数、无数字或溢出均视为 0
    pub fn parse_quantity(&self, value: &str) -> u32 {
        let trimmed = value.trim();
        if trimmed.starts_with('-') {
            return 0;
        }
        self.digits_only(trimmed).parse::<u32>().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.collapse_whitespace("  Tire \t X \r\n"), "Tire X");
        assert_eq!(cleaner.collapse_whitespace("205/55R16   91V"), "205/55R16 91V");
        assert_eq!(cleaner.collapse_whitespace("   "), "");
    }

    #[test]
    fn test_collapse_whitespace_keeps_cyrillic() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.collapse_whitespace(" Шина  Nokian\tНордман 7 "),
            "Шина Nokian Нордман 7"
        );
    }

    #[test]
    fn test_digits_only() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.digits_only(" 00-12 34 "), "001234");
        assert_eq!(cleaner.digits_only("ЦБ-"), "");
        let once = cleaner.digits_only("A1b2-3");
        assert_eq!(cleaner.digits_only(&once), once);
    }

    #[test]
    fn test_parse_decimal_localized() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_decimal("2 581,00"), 2581.0);
        assert_eq!(cleaner.parse_decimal("1234.5"), 1234.5);
        assert_eq!(cleaner.parse_decimal("1,234,567"), 1234567.0);
        assert_eq!(cleaner.parse_decimal("12.5.3"), 12.53);
        assert_eq!(cleaner.parse_decimal("3 500 руб."), 3500.0);
    }

    #[test]
    fn test_parse_decimal_defaults_to_zero() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_decimal(""), 0.0);
        assert_eq!(cleaner.parse_decimal("нет"), 0.0);
        assert_eq!(cleaner.parse_decimal("."), 0.0);
        assert_eq!(cleaner.parse_decimal("-15,5"), 15.5);
    }

    #[test]
    fn test_parse_quantity() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_quantity("10"), 10);
        assert_eq!(cleaner.parse_quantity(" 1 000 "), 1000);
        assert_eq!(cleaner.parse_quantity("-4"), 0);
        assert_eq!(cleaner.parse_quantity("много"), 0);
        assert_eq!(cleaner.parse_quantity("99999999999"), 0);
    }
}
