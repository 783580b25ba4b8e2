// ==========================================
// 轮胎库存上报系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 季节类型 (Season Type)
// ==========================================
// 由品牌字段中的季节关键字推断
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    Summer, // 夏季
    Winter, // 冬季
    #[default]
    Unknown, // 未识别
}

impl Season {
    pub fn is_known(&self) -> bool {
        !matches!(self, Season::Unknown)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Summer => write!(f, "SUMMER"),
            Season::Winter => write!(f, "WINTER"),
            Season::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
