// ==========================================
// 轮胎库存上报系统 - 库存上报 API
// ==========================================
// 职责: 封装上传/解析/导出/上报/清理，统一密码校验
// 红线: 每个操作先校验密码；配置在构造时注入，不读取全局状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{AppConfig, GroupConfig};
use crate::domain::stock::{ParseOutcome, VendorResponse};
use crate::export::error::ExportError;
use crate::export::group_report::{GroupReportBuilder, FILENAME_PREFIX as REPORT_PREFIX};
use crate::export::{artifact_filename, VendorCsvExporter};
use crate::importer::StockImporter;
use crate::repository::{JsonFileStore, ProcessedStore, UploadStore};
use crate::services::vendor_upload::{PirelliApiClient, VendorUploader};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 允许上传的文件扩展名
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "csv"];

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 下载产物
#[derive(Debug, Clone)]
pub struct DownloadArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// 清理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearSummary {
    pub upload_removed: usize,
    pub processed_removed: usize,
}

// ==========================================
// StockApi - 库存上报 API
// ==========================================
pub struct StockApi {
    admin_password: String,
    importer: StockImporter,
    csv_exporter: VendorCsvExporter,
    report_config: GroupConfig,
    upload_store: UploadStore,
    processed_store: Arc<dyn ProcessedStore>,
    uploader: Option<Arc<dyn VendorUploader>>,
}

impl StockApi {
    /// 根据配置创建 API（登录名/令牌已配置时创建 Pirelli 客户端）
    pub fn from_config(config: AppConfig) -> ApiResult<Self> {
        let uploader: Option<Arc<dyn VendorUploader>> = if config.vendor.is_configured() {
            Some(Arc::new(PirelliApiClient::new(&config.vendor)?))
        } else {
            warn!("Pirelli 登录名/令牌未配置，上报功能不可用");
            None
        };
        Self::new(config, uploader)
    }

    /// 显式注入上报客户端（测试中可传入内存实现）
    pub fn new(config: AppConfig, uploader: Option<Arc<dyn VendorUploader>>) -> ApiResult<Self> {
        let upload_store = UploadStore::new(&config.upload_dir)?;
        let processed_store: Arc<dyn ProcessedStore> =
            Arc::new(JsonFileStore::new(&config.processed_dir)?);

        Ok(Self {
            admin_password: config.admin_password,
            importer: StockImporter::new(config.parser),
            csv_exporter: VendorCsvExporter::new(config.vendor.customer_code),
            report_config: config.report,
            upload_store,
            processed_store,
            uploader,
        })
    }

    // ==========================================
    // 访问控制
    // ==========================================

    pub fn check_password(&self, password: &str) -> ApiResult<()> {
        if password == self.admin_password {
            Ok(())
        } else {
            warn!("密码校验失败");
            Err(ApiError::Unauthorized)
        }
    }

    // ==========================================
    // 上传与解析
    // ==========================================

    /// 保存上传文件，返回存储文件名
    #[instrument(skip(self, password, bytes), fields(bytes = bytes.len()))]
    pub fn save_upload(&self, password: &str, original_name: &str, bytes: &[u8]) -> ApiResult<String> {
        self.check_password(password)?;

        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ApiError::InvalidInput(format!(
                "只能上传 .xlsx 或 .csv 文件: {}",
                original_name
            )));
        }
        if bytes.is_empty() {
            return Err(ApiError::InvalidInput("上传文件为空".to_string()));
        }

        Ok(self.upload_store.save(original_name, bytes, &Local::now())?)
    }

    /// 解析已上传的文件并保存结果
    #[instrument(skip(self, password))]
    pub fn process(&self, password: &str, filename: &str) -> ApiResult<ParseOutcome> {
        self.check_password(password)?;

        let path = self.upload_store.path_of(filename)?;
        let outcome = self.importer.import_file(&path, filename)?;
        self.processed_store.save(&outcome.key, &outcome)?;

        info!(
            key = %outcome.key,
            valid = outcome.stats.valid_rows,
            invalid = outcome.stats.invalid_rows,
            vendor = outcome.stats.vendor_count,
            "文件已处理"
        );
        Ok(outcome)
    }

    // ==========================================
    // 导出与上报
    // ==========================================

    /// 下载供应商 CSV
    #[instrument(skip(self, password))]
    pub fn vendor_csv(&self, password: &str, key: &str) -> ApiResult<DownloadArtifact> {
        self.check_password(password)?;

        let outcome = self.processed_store.load(key)?;
        let bytes = self.csv_exporter.generate_export(&outcome.vendor_items)?;

        Ok(DownloadArtifact {
            filename: self.csv_exporter.filename(&Local::now()),
            content_type: CSV_CONTENT_TYPE,
            bytes,
        })
    }

    /// 校验并上报供应商
    #[instrument(skip(self, password))]
    pub async fn send_to_vendor(&self, password: &str, key: &str) -> ApiResult<VendorResponse> {
        self.check_password(password)?;

        let uploader = self.uploader.as_ref().ok_or(ApiError::VendorNotConfigured)?;
        let outcome = self.processed_store.load(key)?;

        let bytes = match self.csv_exporter.prepare_upload(&outcome.vendor_items) {
            Ok(bytes) => bytes,
            Err(ExportError::NoItems) => {
                return Err(ApiError::InvalidInput("没有可上报的 Pirelli 数据".to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let filename = self.csv_exporter.filename(&Local::now());
        let response = uploader.upload(bytes, &filename).await?;
        info!(file = %filename, status = response.status, "上报完成");
        Ok(response)
    }

    /// 下载分组汇总报表
    #[instrument(skip(self, password))]
    pub fn group_report(&self, password: &str, key: &str) -> ApiResult<DownloadArtifact> {
        self.check_password(password)?;

        let outcome = self.processed_store.load(key)?;
        let report = GroupReportBuilder.build(&outcome.all_items, &self.report_config);
        let bytes = report.to_xlsx()?;

        Ok(DownloadArtifact {
            filename: artifact_filename(
                REPORT_PREFIX,
                self.csv_exporter.customer_code(),
                &Local::now(),
                "xlsx",
            ),
            content_type: XLSX_CONTENT_TYPE,
            bytes,
        })
    }

    // ==========================================
    // 清理
    // ==========================================

    /// 删除全部上传文件与解析结果
    #[instrument(skip(self, password))]
    pub fn clear(&self, password: &str) -> ApiResult<ClearSummary> {
        self.check_password(password)?;

        let summary = ClearSummary {
            upload_removed: self.upload_store.clear()?,
            processed_removed: self.processed_store.clear()?,
        };
        info!(
            upload_removed = summary.upload_removed,
            processed_removed = summary.processed_removed,
            "清理完成"
        );
        Ok(summary)
    }

    pub fn vendor_enabled(&self) -> bool {
        self.uploader.is_some()
    }
}
