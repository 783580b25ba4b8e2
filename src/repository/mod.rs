// ==========================================
// 轮胎库存上报系统 - 文件仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 上传文件与解析结果的落盘/读取/清理
// 约束: 存储键只能是单层文件名（不含路径分隔符与 ".."）
// ==========================================

pub mod error;
pub mod processed_store;
pub mod upload_store;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use processed_store::{JsonFileStore, ProcessedStore};
pub use upload_store::UploadStore;

use std::fs;
use std::path::Path;

/// 校验存储键（单层文件名）
pub(crate) fn validate_key(key: &str) -> RepositoryResult<()> {
    let invalid = key.trim().is_empty()
        || key.contains('/')
        || key.contains('\\')
        || key.contains("..")
        || key.contains('\0');
    if invalid {
        return Err(RepositoryError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// 删除目录下的所有文件（不递归，子目录保留），返回删除数量
///
/// 目录不存在视为空目录
pub(crate) fn remove_files_in(dir: &Path) -> RepositoryResult<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}
