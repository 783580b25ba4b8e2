// ==========================================
// 轮胎库存上报系统 - API层错误类型
// ==========================================
// 职责: 统一各层错误，转换为用户可读的错误消息
// 红线: 所有错误信息必须包含显式原因
// ==========================================

use crate::export::error::ExportError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use crate::services::vendor_upload::UploadError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 访问控制
    // ==========================================
    #[error("密码错误")]
    Unauthorized,

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 导入/导出错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("文件生成失败: {0}")]
    ExportError(String),

    // ==========================================
    // 外部服务错误
    // ==========================================
    #[error("供应商接口未配置")]
    VendorNotConfigured,

    #[error("供应商上报失败: {0}")]
    UploadError(String),

    // ==========================================
    // 存储错误
    // ==========================================
    #[error("存储错误: {0}")]
    StorageError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::InvalidKey(key) => ApiError::InvalidInput(format!("无效的文件名: {}", key)),
            RepositoryError::Io(msg) | RepositoryError::Serialization(msg) => {
                ApiError::StorageError(msg)
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::NotFound(format!("文件不存在: {}", path)),
            ImportError::UnsupportedFormat(_) => ApiError::InvalidInput(err.to_string()),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
// 没有供应商记录默认视为资源不存在（下载场景）
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Validation { .. } => ApiError::ValidationError(err.to_string()),
            ExportError::NoItems => ApiError::NotFound(err.to_string()),
            other => ApiError::ExportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 UploadError 转换
// ==========================================
impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        ApiError::UploadError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_maps_to_not_found() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "ParseOutcome".to_string(),
            id: "x.json".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(err.to_string().contains("x.json"));
    }

    #[test]
    fn test_export_validation_keeps_internal_code() {
        let err: ApiError = ExportError::Validation {
            internal_code: "1234".to_string(),
            reason: "quantity is zero".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert!(err.to_string().contains("1234"));
    }
}
