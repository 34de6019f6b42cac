// ==========================================
// 车队投运计划系统 - 核心库
// ==========================================
// 系统定位: 决策支持 (计划结果由调度人员最终确认)
// 输入: 车队快照 (内存) + 计划配置
// 输出: 就绪度 / 角色分配 / 风险分析 / 排班 / 计划记录
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 适配层 - 快照读取 / 缺失字段默认值
pub mod adapter;

// 引擎层 - 计划规则
pub mod engine;

// 配置层 - 计划配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DutyClass, InductionRole, PriorityLevel, ReadinessStatus, RiskLevel};

// 领域实体
pub use domain::{
    Allocation, FleetSnapshot, InductionPlanRecord, ReadinessRecord, RiskAnalysis, Schedule,
    ScheduleSlot, Unit, UnitId, ValidationReport,
};

// 配置
pub use config::{ConfigError, ConfigManager, PlanningConfig};

// 数据源
pub use adapter::{FleetDataSource, InMemoryFleetSource, JsonFileFleetSource, SourceError};

// 引擎
pub use engine::{
    AllocationOptimizer, AllocationStrategy, EngineError, EngineResult, InductionPlanner,
    PlanOutcome, ReadinessAssessor, RiskSimulator, ScheduleComposer,
};

// ==========================================
// 版本信息
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "车队投运计划系统";
