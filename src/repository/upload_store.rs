// ==========================================
// 轮胎库存上报系统 - 上传文件仓储
// ==========================================
// 存储: <YYYYMMDD_HHMMSS>_<原文件名>
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{remove_files_in, validate_key};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// 创建仓储（目录不存在时自动创建）
    pub fn new<P: AsRef<Path>>(dir: P) -> RepositoryResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 保存上传文件，返回存储文件名
    ///
    /// 原文件名只保留最后一级（客户端可能带路径）
    pub fn save(
        &self,
        original_name: &str,
        bytes: &[u8],
        at: &DateTime<Local>,
    ) -> RepositoryResult<String> {
        let base = original_name
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(original_name)
            .trim();
        let stored = format!("{}_{}", at.format("%Y%m%d_%H%M%S"), base);
        let path = self.resolve(&stored)?;

        fs::write(&path, bytes)?;
        info!(file = %stored, bytes = bytes.len(), "上传文件已保存");
        Ok(stored)
    }

    /// 已存储文件的完整路径（不存在时返回 NotFound）
    pub fn path_of(&self, filename: &str) -> RepositoryResult<PathBuf> {
        let path = self.resolve(filename)?;
        if !path.is_file() {
            return Err(RepositoryError::NotFound {
                entity: "UploadedFile".to_string(),
                id: filename.to_string(),
            });
        }
        Ok(path)
    }

    /// 删除全部上传文件（子目录保留），返回删除数量
    pub fn clear(&self) -> RepositoryResult<usize> {
        let removed = remove_files_in(&self.dir)?;
        info!(removed = removed, dir = %self.dir.display(), "上传文件已清理");
        Ok(removed)
    }

    fn resolve(&self, filename: &str) -> RepositoryResult<PathBuf> {
        validate_key(filename)?;
        Ok(self.dir.join(filename))
    }
}
