// ==========================================
// 车队投运计划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod readiness;
pub mod risk;
pub mod schedule;
pub mod snapshot;
pub mod types;
pub mod unit;

// 重导出核心类型
pub use allocation::{Allocation, InductionPlanRecord, ValidationReport, ValidationSummary};
pub use readiness::{ReadinessDistribution, ReadinessRecord, ReadinessSummary};
pub use risk::{Mitigation, RiskAnalysis, RiskScenario};
pub use schedule::{ContingencyPlan, EfficiencyMetrics, Schedule, ScheduleSlot};
pub use snapshot::FleetSnapshot;
pub use types::{DutyClass, InductionRole, PriorityLevel, ReadinessStatus, RiskLevel};
pub use unit::{BrandingContract, FitnessCertificate, PerformanceHistory, Unit, UnitId};
