// ==========================================
// 轮胎库存上报系统 - HTTP 路由
// ==========================================
// 响应格式: { success, message, data }
// 状态码: 密码错误 401 / 结果不存在 404 / 输入或校验失败 400
// ==========================================

use crate::api::{ApiError, DownloadArtifact};
use crate::app::state::AppState;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

/// 上传文件大小上限
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

const INDEX_HTML: &str = include_str!("../../static/index.html");

// ==========================================
// 请求/响应结构
// ==========================================

/// 统一响应包
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    fn ok(message: &str, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct FileRequest {
    pub password: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub password: String,
    pub file: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
}

// ==========================================
// 错误映射
// ==========================================

/// ApiError → HTTP 响应
pub struct HttpError(ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::InvalidInput(_) | ApiError::ValidationError(_) | ApiError::ImportError(_) => {
            StatusCode::BAD_REQUEST
        }
        ApiError::UploadError(_) => StatusCode::BAD_GATEWAY,
        ApiError::VendorNotConfigured
        | ApiError::ExportError(_)
        | ApiError::StorageError(_)
        | ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "请求失败");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "请求被拒绝");
        }

        let body = Envelope::<()> {
            success: false,
            message: self.0.to_string(),
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

type HttpResult<T> = Result<T, HttpError>;

fn attachment(artifact: DownloadArtifact) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    (
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}

// ==========================================
// Handlers
// ==========================================

/// GET /
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /api/check-password
async fn check_password(
    State(state): State<AppState>,
    Json(req): Json<PasswordRequest>,
) -> HttpResult<Json<Envelope<()>>> {
    state.stock_api.check_password(&req.password)?;
    Ok(Json(Envelope {
        success: true,
        message: "密码正确".to_string(),
        data: None,
    }))
}

/// POST /api/upload (multipart: password, file)
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> HttpResult<Json<Envelope<UploadResponse>>> {
    let mut password = String::new();
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("表单读取失败: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "password" => {
                password = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InvalidInput(format!("密码字段读取失败: {}", e)))?;
            }
            "file" => {
                let original = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidInput(format!("文件读取失败: {}", e)))?;
                file = Some((original, bytes.to_vec()));
            }
            _ => {}
        }
    }

    state.stock_api.check_password(&password)?;
    let (original, bytes) =
        file.ok_or_else(|| ApiError::InvalidInput("缺少文件字段 file".to_string()))?;

    let filename = state.stock_api.save_upload(&password, &original, &bytes)?;
    Ok(Envelope::ok("文件已上传", UploadResponse { filename }))
}

/// POST /api/process
async fn process(
    State(state): State<AppState>,
    Json(req): Json<FileRequest>,
) -> HttpResult<Response> {
    // 解析为同步文件 I/O，放到阻塞线程池
    let api = state.stock_api.clone();
    let outcome = tokio::task::spawn_blocking(move || api.process(&req.password, &req.filename))
        .await
        .map_err(|e| ApiError::Other(anyhow::anyhow!("解析任务异常终止: {}", e)))??;

    Ok(Envelope::ok("文件已处理", outcome).into_response())
}

/// GET /api/download-pirelli?password&file
async fn download_pirelli(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> HttpResult<Response> {
    let artifact = state.stock_api.vendor_csv(&query.password, &query.file)?;
    Ok(attachment(artifact))
}

/// POST /api/send-pirelli
async fn send_pirelli(
    State(state): State<AppState>,
    Json(req): Json<FileRequest>,
) -> HttpResult<Response> {
    let response = state
        .stock_api
        .send_to_vendor(&req.password, &req.filename)
        .await?;

    // 供应商的业务结果原样透传（HTTP 200）
    let body = Envelope {
        success: response.status,
        message: response.message.clone(),
        data: Some(response),
    };
    Ok(Json(body).into_response())
}

/// GET /api/download-ikon?password&file
async fn download_ikon(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> HttpResult<Response> {
    let artifact = state.stock_api.group_report(&query.password, &query.file)?;
    Ok(attachment(artifact))
}

/// POST /api/clear
async fn clear(
    State(state): State<AppState>,
    Json(req): Json<PasswordRequest>,
) -> HttpResult<Response> {
    let summary = state.stock_api.clear(&req.password)?;
    Ok(Envelope::ok("已清理", summary).into_response())
}

// ==========================================
// Router
// ==========================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/check-password", post(check_password))
        .route("/api/upload", post(upload))
        .route("/api/process", post(process))
        .route("/api/download-pirelli", get(download_pirelli))
        .route("/api/send-pirelli", post(send_pirelli))
        .route("/api/download-ikon", get(download_ikon))
        .route("/api/clear", post(clear))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
