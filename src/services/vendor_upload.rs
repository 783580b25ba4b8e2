// ==========================================
// 轮胎库存上报系统 - 供应商上报客户端
// ==========================================
// 协议: multipart/form-data POST
//   action=upload, auth_login, auth_token, file（text/csv）
// 红线: 单次请求 30 秒超时，不重试；错误带上下文原样返回调用方
// ==========================================

use crate::config::VendorConfig;
use crate::domain::stock::VendorResponse;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// 请求超时
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0";
const CSV_MIME: &str = "text/csv";

// ==========================================
// UploadError - 上报错误
// ==========================================
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("供应商请求失败（{context}）: {message}")]
    Request { context: String, message: String },

    #[error("供应商响应解析失败（HTTP {status}）: {message}")]
    Decode { status: u16, message: String },
}

// ==========================================
// VendorUploader Trait
// ==========================================
// 实现者: PirelliApiClient；测试中可替换为内存实现
#[async_trait]
pub trait VendorUploader: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<VendorResponse, UploadError>;
}

// ==========================================
// PirelliApiClient - reqwest 实现
// ==========================================
pub struct PirelliApiClient {
    client: reqwest::Client,
    base_url: String,
    login: String,
    token: String,
}

impl PirelliApiClient {
    pub fn new(config: &VendorConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UploadError::Request {
                context: "构建 HTTP 客户端".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            login: config.login.clone(),
            token: config.token.clone(),
        })
    }

    fn build_form(&self, bytes: Vec<u8>, filename: &str) -> Result<Form, UploadError> {
        let file_part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(CSV_MIME)
            .map_err(|e| UploadError::Request {
                context: "构建文件分段".to_string(),
                message: e.to_string(),
            })?;

        Ok(Form::new()
            .text("action", "upload")
            .text("auth_login", self.login.clone())
            .text("auth_token", self.token.clone())
            .part("file", file_part))
    }
}

#[async_trait]
impl VendorUploader for PirelliApiClient {
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<VendorResponse, UploadError> {
        let form = self.build_form(bytes, filename)?;

        let response = self
            .client
            .post(&self.base_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Request {
                context: format!("POST {}", self.base_url),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| UploadError::Request {
            context: "读取响应体".to_string(),
            message: e.to_string(),
        })?;

        let parsed: VendorResponse =
            serde_json::from_str(&body).map_err(|e| UploadError::Decode {
                status,
                message: e.to_string(),
            })?;

        if parsed.status {
            info!(file = %filename, code = parsed.code, message = %parsed.message, "文件已上报供应商");
        } else {
            warn!(file = %filename, code = parsed.code, message = %parsed.message, "供应商拒绝上报");
        }
        Ok(parsed)
    }
}
