// ==========================================
// 轮胎库存上报系统 - 解析结果仓储
// ==========================================
// 存储: 每个 ParseOutcome 一个 JSON 文件，文件名 = 存储键
// 红线: 写入后只读；读取与清理并发时返回 NotFound，不 panic
// ==========================================

use crate::domain::stock::ParseOutcome;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{remove_files_in, validate_key};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// ProcessedStore Trait
// ==========================================
pub trait ProcessedStore: Send + Sync {
    fn save(&self, key: &str, outcome: &ParseOutcome) -> RepositoryResult<()>;

    fn load(&self, key: &str) -> RepositoryResult<ParseOutcome>;

    /// 删除全部结果，返回删除数量
    fn clear(&self) -> RepositoryResult<usize>;
}

// ==========================================
// JsonFileStore - JSON 文件实现
// ==========================================
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// 创建仓储（目录不存在时自动创建）
    pub fn new<P: AsRef<Path>>(dir: P) -> RepositoryResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> RepositoryResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl ProcessedStore for JsonFileStore {
    fn save(&self, key: &str, outcome: &ParseOutcome) -> RepositoryResult<()> {
        let path = self.path_for(key)?;
        let json = serde_json::to_vec_pretty(outcome)?;
        fs::write(&path, json)?;
        info!(key = %key, items = outcome.all_items.len(), "解析结果已保存");
        Ok(())
    }

    fn load(&self, key: &str) -> RepositoryResult<ParseOutcome> {
        let path = self.path_for(key)?;
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RepositoryError::NotFound {
                    entity: "ParseOutcome".to_string(),
                    id: key.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        debug!(key = %key, bytes = raw.len(), "读取解析结果");
        Ok(serde_json::from_slice(&raw)?)
    }

    fn clear(&self) -> RepositoryResult<usize> {
        let removed = remove_files_in(&self.dir)?;
        info!(removed = removed, dir = %self.dir.display(), "解析结果已清理");
        Ok(removed)
    }
}
