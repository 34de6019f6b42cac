// ==========================================
// 车队投运计划系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分层:
// - EngineError: 计划运行级致命错误
// - SolveError: 精确求解结果 (触发启发式兜底,不外抛)
// - ScoringError: 单车评分失败 (兜底默认记录,不中断批量)
// ==========================================

use crate::adapter::source::SourceError;
use crate::config::error::ConfigError;
use crate::domain::unit::UnitId;
use std::time::Duration;
use thiserror::Error;

/// 计划运行错误
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("车队数据不可用: {0}")]
    DataUnavailable(String),

    #[error("车队快照无效: {0}")]
    InvalidSnapshot(String),

    #[error("排班时间超出可表示范围: {0}")]
    TimeOverflow(String),

    #[error("配置无效: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("数据源错误: {0}")]
    Source(#[from] SourceError),

    #[error("引擎内部错误: {0}")]
    Internal(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

/// 精确求解错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("约束不可满足: {0}")]
    Infeasible(String),

    #[error("求解超时: 预算 {limit:?}")]
    Timeout { limit: Duration },

    #[error("状态空间过大: {states} > {max_states}")]
    StateSpaceTooLarge { states: usize, max_states: usize },

    #[error("求解输入无效: {0}")]
    InvalidInput(String),
}

/// 单车评分错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("车辆 {unit_id} 子分数 {factor} 非有限值")]
    NonFiniteFactor { unit_id: UnitId, factor: String },

    #[error("车辆 {unit_id} 数据无效: {message}")]
    InvalidData { unit_id: UnitId, message: String },
}
