// ==========================================
// 车队投运计划系统 - 协作方适配层
// ==========================================
// 职责: 快照读取接口 + 缺失字段的默认值解析
// ==========================================

pub mod profile;
pub mod source;

pub use profile::{UnitProfile, UNKNOWN_STATUS};
pub use source::{FleetDataSource, InMemoryFleetSource, JsonFileFleetSource, SourceError};
