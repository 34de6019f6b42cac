// ==========================================
// 车队投运计划系统 - 引擎层
// ==========================================
// 职责: 就绪度评估 / 角色分配 / 风险仿真 / 排班编排
// 红线: 引擎无状态、不做 I/O,所有分配必须输出 reason
// ==========================================

pub mod allocation;
pub mod error;
pub mod fleet_stats;
pub mod orchestrator;
pub mod readiness;
pub mod risk;
pub mod schedule;
pub mod solver;
pub mod strategy;

// 重导出核心引擎
pub use allocation::{AllocationMethod, AllocationOptimizer, AllocationOutcome};
pub use error::{EngineError, EngineResult, ScoringError, SolveError};
pub use fleet_stats::FleetStatistics;
pub use orchestrator::{InductionPlanner, PlanOutcome};
pub use readiness::ReadinessAssessor;
pub use risk::RiskSimulator;
pub use schedule::ScheduleComposer;
pub use solver::{
    Assignment, AssignmentConstraints, AssignmentSolver, CostMatrix, DynamicProgrammingSolver,
};
pub use strategy::AllocationStrategy;
