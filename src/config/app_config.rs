// ==========================================
// 轮胎库存上报系统 - 应用配置
// ==========================================
// 来源: 环境变量（支持 .env 文件）
// 默认目录: 用户数据目录下的 tire-stock-sender/
// ==========================================

use crate::config::import_config::{GroupConfig, ParserConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_PIRELLI_BASE_URL: &str =
    "https://reports.pirelli.ru/local/templates/dealer/ajax/api.php";
const DEFAULT_CUSTOMER_CODE: &str = "5700097";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// VendorConfig - Pirelli 接口配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorConfig {
    pub base_url: String,
    pub login: String,
    pub token: String,
    pub customer_code: String,
}

impl VendorConfig {
    /// 登录名与令牌均已配置时才启用上报
    pub fn is_configured(&self) -> bool {
        !self.login.trim().is_empty() && !self.token.trim().is_empty()
    }
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PIRELLI_BASE_URL.to_string(),
            login: String::new(),
            token: String::new(),
            customer_code: DEFAULT_CUSTOMER_CODE.to_string(),
        }
    }
}

// ==========================================
// AppConfig - 启动配置
// ==========================================
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub admin_password: String,
    pub upload_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub parser: ParserConfig,
    pub vendor: VendorConfig,
    pub report: GroupConfig,
}

impl AppConfig {
    /// 从进程环境变量读取配置（先加载 .env）
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置
    ///
    /// # 环境变量
    /// - SERVER_PORT (默认 8080)
    /// - ADMIN_PASSWORD (默认 admin123)
    /// - UPLOAD_DIR / PROCESSED_DIR
    /// - DATA_START_ROW (默认 12)
    /// - VENDOR_BRANDS: 逗号分隔
    /// - PIRELLI_BASE_URL / PIRELLI_LOGIN / PIRELLI_TOKEN / PIRELLI_CUSTOMER_CODE
    /// - IKON_COMPANY_NAME / REPORT_GROUPS_PATH (JSON)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_port = match get("SERVER_PORT") {
            Some(raw) => parse_value("SERVER_PORT", &raw)?,
            None => 8080,
        };

        let data_root = default_data_root();
        let upload_dir = get("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_root.join("uploads"));
        let processed_dir = get("PROCESSED_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| upload_dir.join("processed"));

        let mut parser = ParserConfig::default();
        if let Some(raw) = get("DATA_START_ROW") {
            let start_row: usize = parse_value("DATA_START_ROW", &raw)?;
            if start_row == 0 {
                return Err(ConfigError::ConfigValueError {
                    key: "DATA_START_ROW".to_string(),
                    value: raw,
                    message: "起始行从 1 开始".to_string(),
                });
            }
            parser.start_row = start_row;
        }
        if let Some(raw) = get("VENDOR_BRANDS") {
            parser.vendor_brands = raw
                .split(',')
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect();
        }

        let defaults = VendorConfig::default();
        let vendor = VendorConfig {
            base_url: get("PIRELLI_BASE_URL").unwrap_or(defaults.base_url),
            login: get("PIRELLI_LOGIN").unwrap_or_default(),
            token: get("PIRELLI_TOKEN").unwrap_or_default(),
            customer_code: get("PIRELLI_CUSTOMER_CODE").unwrap_or(defaults.customer_code),
        };

        let mut report = match get("REPORT_GROUPS_PATH") {
            Some(path) => load_group_config(Path::new(&path))?,
            None => GroupConfig::default(),
        };
        if let Some(name) = get("IKON_COMPANY_NAME") {
            report.company_name = name;
        }

        Ok(Self {
            server_port,
            admin_password: get("ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string()),
            upload_dir,
            processed_dir,
            parser,
            vendor,
            report,
        })
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::ConfigValueError {
        key: key.to_string(),
        value: raw.to_string(),
        message: e.to_string(),
    })
}

fn load_group_config(path: &Path) -> Result<GroupConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigReadError {
        key: "REPORT_GROUPS_PATH".to_string(),
        message: format!("{}: {}", path.display(), e),
    })?;
    GroupConfig::from_json(&raw).map_err(|e| ConfigError::ConfigValueError {
        key: "REPORT_GROUPS_PATH".to_string(),
        value: path.display().to_string(),
        message: e.to_string(),
    })
}

/// 默认数据目录
///
/// 优先使用用户数据目录，取不到时回退到当前目录
fn default_data_root() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("tire-stock-sender"),
        None => PathBuf::from("."),
    }
}
