// ==========================================
// 车队投运计划系统 - 角色分配引擎
// ==========================================
// 职责: 就绪度 → 运营 / 热备 / 检修 角色分配
// 输入: 就绪度列表 + 计划配置
// 输出: Allocation 列表 (全局排名 1..n)
// ==========================================
//
// 流程:
// 1) 精确求解 (AssignmentSolver)
// 2) 求解失败 (不可行 / 超时 / 状态空间过大) → 启发式兜底
// 3) 两条路径统一排名: 运营按分数降序 → 热备按分数降序 → 检修按分数升序
// 红线: 每辆车恰好一个分配;约束违规仅报告,不阻断

mod heuristic;


use crate::config::planning_config::PlanningConfig;
use crate::domain::allocation::{Allocation, ValidationReport, ValidationSummary};
use crate::domain::readiness::ReadinessRecord;
use crate::domain::types::InductionRole;
use crate::engine::error::SolveError;
use crate::engine::readiness::compare_by_score_desc;
use crate::engine::solver::{
    Assignment, AssignmentConstraints, AssignmentSolver, CostMatrix, DynamicProgrammingSolver,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, instrument, warn};

// ===== 分配原因 =====
pub const REASON_OPTIMIZED_SERVICE: &str = "optimized_service_assignment";
pub const REASON_OPTIMIZED_STANDBY: &str = "optimized_standby_assignment";
pub const REASON_OPTIMIZED_MAINTENANCE: &str = "optimized_maintenance_assignment";
pub const REASON_MINIMUM_SERVICE: &str = "minimum_service_requirement";
pub const REASON_HIGH_READINESS: &str = "high_readiness_score";
pub const REASON_STANDBY: &str = "standby_assignment";
pub const REASON_MAINTENANCE: &str = "maintenance_scheduling";
pub const REASON_BRANDING_EXPOSURE: &str = "branding_exposure";

/// 分配路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    Exact,
    HeuristicFallback,
}

impl AllocationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationMethod::Exact => "exact",
            AllocationMethod::HeuristicFallback => "heuristic_fallback",
        }
    }
}

/// 分配结果
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    pub allocations: Vec<Allocation>,
    pub method: AllocationMethod,
    /// 精确求解失败原因 (仅兜底路径)
    pub fallback_reason: Option<SolveError>,
}

// ==========================================
// AllocationOptimizer - 角色分配引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct AllocationOptimizer {
    solver: Arc<dyn AssignmentSolver>,
}

impl Default for AllocationOptimizer {
    fn default() -> Self {
        Self::new(Arc::new(DynamicProgrammingSolver::new()))
    }
}

impl AllocationOptimizer {
    /// 构造函数
    ///
    /// # 参数
    /// - solver: 精确求解器
    pub fn new(solver: Arc<dyn AssignmentSolver>) -> Self {
        Self { solver }
    }

    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 分配角色
    ///
    /// # 参数
    /// - readiness: 就绪度列表 (顺序不限,内部按 score 降序 / unit_id 升序处理)
    /// - config: 计划配置 (已校验)
    #[instrument(skip_all, fields(
        units = readiness.len(),
        strategy = config.strategy.as_str(),
        solver = self.solver.name()
    ))]
    pub fn allocate(&self, readiness: &[ReadinessRecord], config: &PlanningConfig) -> AllocationOutcome {
        let mut ordered: Vec<&ReadinessRecord> = readiness.iter().collect();
        ordered.sort_by(|a, b| compare_by_score_desc(a, b));

        if ordered.is_empty() {
            return AllocationOutcome {
                allocations: Vec::new(),
                method: AllocationMethod::Exact,
                fallback_reason: None,
            };
        }

        let (allocations, method, fallback_reason) = match self.solve_exact(&ordered, config) {
            Ok(assignment) => {
                info!(
                    total_cost = assignment.total_cost,
                    elapsed_ms = assignment.elapsed.as_millis() as u64,
                    service = assignment.count(InductionRole::Service),
                    standby = assignment.count(InductionRole::Standby),
                    maintenance = assignment.count(InductionRole::Maintenance),
                    "精确求解成功"
                );
                let allocations: Vec<Allocation> = ordered
                    .iter()
                    .zip(&assignment.roles)
                    .map(|(record, role)| build_allocation(record, *role, exact_reason(*role)))
                    .collect();
                (allocations, AllocationMethod::Exact, None)
            }
            Err(e) => {
                warn!(error = %e, "精确求解失败,启用启发式兜底");
                let allocations: Vec<Allocation> = heuristic::assign(&ordered, config)
                    .into_iter()
                    .zip(&ordered)
                    .map(|((role, reason), record)| build_allocation(record, role, reason))
                    .collect();
                (allocations, AllocationMethod::HeuristicFallback, Some(e))
            }
        };

        AllocationOutcome {
            allocations: assign_ranks(allocations),
            method,
            fallback_reason,
        }
    }

    /// 约束校验 (非致命)
    pub fn validate(&self, allocations: &[Allocation], config: &PlanningConfig) -> ValidationReport {
        let summary = ValidationSummary::count(allocations);
        let mut violations = Vec::new();

        if summary.service_units < config.min_service {
            violations.push(format!(
                "运营车数 {} 低于下限 {}",
                summary.service_units, config.min_service
            ));
        }
        if summary.service_units > config.max_service {
            violations.push(format!(
                "运营车数 {} 超过上限 {}",
                summary.service_units, config.max_service
            ));
        }
        if summary.standby_units < config.min_standby {
            violations.push(format!(
                "热备车数 {} 低于下限 {}",
                summary.standby_units, config.min_standby
            ));
        }
        if summary.standby_units > config.max_standby {
            violations.push(format!(
                "热备车数 {} 超过上限 {}",
                summary.standby_units, config.max_standby
            ));
        }
        if summary.maintenance_units > config.max_maintenance {
            violations.push(format!(
                "检修车数 {} 超过上限 {}",
                summary.maintenance_units, config.max_maintenance
            ));
        }

        ValidationReport {
            is_valid: violations.is_empty(),
            violations,
            summary,
        }
    }

    // ==========================================
    // 精确求解
    // ==========================================

    fn solve_exact(
        &self,
        ordered: &[&ReadinessRecord],
        config: &PlanningConfig,
    ) -> Result<Assignment, SolveError> {
        let costs = build_cost_matrix(ordered, config)?;
        let branding: Vec<bool> = ordered.iter().map(|r| r.branding_priority).collect();
        let branding_count = branding.iter().filter(|b| **b).count();

        let constraints = AssignmentConstraints {
            min_service: config.min_service,
            max_service: config.max_service,
            min_standby: config.min_standby,
            max_standby: config.max_standby,
            max_maintenance: config.max_maintenance,
            min_branding_in_service: min_branding_in_service(
                branding_count,
                config.target_branding_exposure,
            ),
            branding,
            time_limit: config.solver_time_limit(),
            max_states: config.solver_max_states,
        };

        let assignment = self.solver.solve(&costs, &constraints)?;
        if assignment.roles.len() != ordered.len() {
            return Err(SolveError::InvalidInput(format!(
                "求解结果长度 {} 与车辆数 {} 不一致",
                assignment.roles.len(),
                ordered.len()
            )));
        }
        Ok(assignment)
    }
}

/// 单车效用 u = 1 - 策略代价
pub fn unit_utility(record: &ReadinessRecord, config: &PlanningConfig) -> f64 {
    1.0 - config.strategy.unit_cost(record.score, record.risk_factor)
}

/// 代价矩阵: 运营 -u·w_s / 热备 -u·w_sb / 检修 -(1-u)·w_m
pub fn build_cost_matrix(
    ordered: &[&ReadinessRecord],
    config: &PlanningConfig,
) -> Result<CostMatrix, SolveError> {
    let rows = ordered
        .iter()
        .map(|record| {
            let u = unit_utility(record, config);
            [
                -u * config.service_weight,
                -u * config.standby_weight,
                -(1.0 - u) * config.maintenance_weight,
            ]
        })
        .collect();
    CostMatrix::new(rows)
}

/// 广告车进入运营的下限: ceil(广告车数 × 目标比例)
pub fn min_branding_in_service(branding_count: usize, target_fraction: f64) -> usize {
    // 消除 0.7 × 10 = 7.000000000000001 之类的浮点误差
    let raw = branding_count as f64 * target_fraction.clamp(0.0, 1.0);
    ((raw - 1e-9).ceil().max(0.0) as usize).min(branding_count)
}

fn exact_reason(role: InductionRole) -> &'static str {
    match role {
        InductionRole::Service => REASON_OPTIMIZED_SERVICE,
        InductionRole::Standby => REASON_OPTIMIZED_STANDBY,
        InductionRole::Maintenance => REASON_OPTIMIZED_MAINTENANCE,
    }
}

fn build_allocation(record: &ReadinessRecord, role: InductionRole, reason: &str) -> Allocation {
    let mut reasons = vec![reason.to_string()];
    if role == InductionRole::Service && record.branding_priority {
        reasons.push(REASON_BRANDING_EXPOSURE.to_string());
    }

    let mut metadata = record.factors.clone();
    metadata.insert("branding_score".to_string(), record.branding_score);
    metadata.insert("risk_factor".to_string(), record.risk_factor);

    Allocation {
        unit_id: record.unit_id,
        unit_number: record.unit_number.clone(),
        role,
        rank: 0,
        score: record.score,
        risk_factor: record.risk_factor,
        reasons,
        metadata,
    }
}

/// 统一排名: 运营 (分数降序) → 热备 (分数降序) → 检修 (分数升序),同分按 unit_id 升序
pub(crate) fn assign_ranks(mut allocations: Vec<Allocation>) -> Vec<Allocation> {
    allocations.sort_by(compare_for_rank);
    for (i, allocation) in allocations.iter_mut().enumerate() {
        allocation.rank = (i + 1) as u32;
    }
    allocations
}

fn compare_for_rank(a: &Allocation, b: &Allocation) -> Ordering {
    a.role
        .index()
        .cmp(&b.role.index())
        .then_with(|| match a.role {
            InductionRole::Maintenance => a.score.total_cmp(&b.score),
            _ => b.score.total_cmp(&a.score),
        })
        .then_with(|| a.unit_id.cmp(&b.unit_id))
}
