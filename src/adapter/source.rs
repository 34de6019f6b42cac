// ==========================================
// 车队投运计划系统 - 车队数据源接口
// ==========================================
// 职责: 定义计划引擎所需的快照读取接口
// 实现者: 外部协作层 (登记库 / 证书库 / 广告合同库)
// 内置实现: InMemoryFleetSource (测试) / JsonFileFleetSource (CLI)
// 红线: 只读,不含业务逻辑
// ==========================================

use crate::domain::snapshot::FleetSnapshot;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 数据源错误类型
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("快照读取失败: path={path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("快照解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

// ==========================================
// FleetDataSource Trait
// ==========================================
#[async_trait]
pub trait FleetDataSource: Send + Sync {
    /// 加载计划日的车队快照
    ///
    /// # 参数
    /// - plan_date: 计划日期 (实现者可据此过滤过期证书 / 合同)
    ///
    /// # 返回
    /// - Ok(FleetSnapshot): 快照 (可为空,由引擎判定 DataUnavailable)
    /// - Err(SourceError): 数据源故障
    async fn load_snapshot(&self, plan_date: NaiveDate) -> Result<FleetSnapshot, SourceError>;
}

// ==========================================
// InMemoryFleetSource - 内存数据源
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryFleetSource {
    snapshot: FleetSnapshot,
}

impl InMemoryFleetSource {
    pub fn new(snapshot: FleetSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl FleetDataSource for InMemoryFleetSource {
    async fn load_snapshot(&self, _plan_date: NaiveDate) -> Result<FleetSnapshot, SourceError> {
        Ok(self.snapshot.clone())
    }
}

// ==========================================
// JsonFileFleetSource - JSON 文件数据源
// ==========================================
#[derive(Debug, Clone)]
pub struct JsonFileFleetSource {
    path: PathBuf,
}

impl JsonFileFleetSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FleetDataSource for JsonFileFleetSource {
    async fn load_snapshot(&self, plan_date: NaiveDate) -> Result<FleetSnapshot, SourceError> {
        debug!(path = %self.path.display(), plan_date = %plan_date, "读取车队快照");

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let snapshot: FleetSnapshot = serde_json::from_str(&raw)?;

        info!(
            path = %self.path.display(),
            units = snapshot.units.len(),
            "车队快照加载完成"
        );
        Ok(snapshot)
    }
}
