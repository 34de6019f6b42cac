// ==========================================
// 车队投运计划系统 - 引擎编排器
// ==========================================
// 用途: 协调各引擎的执行顺序
// 流程: 快照 → 车队统计 → 就绪度 → 角色分配 (精确 / 兜底) → 校验
//       → 风险仿真 → 排班编排 → 计划记录
// 红线: 引擎本身同步执行;异步仅存在于数据源读取边界
// ==========================================

use crate::adapter::source::FleetDataSource;
use crate::config::planning_config::PlanningConfig;
use crate::domain::allocation::{Allocation, InductionPlanRecord, ValidationReport};
use crate::domain::readiness::{ReadinessRecord, ReadinessSummary};
use crate::domain::risk::RiskAnalysis;
use crate::domain::schedule::Schedule;
use crate::domain::snapshot::FleetSnapshot;
use crate::domain::unit::UnitId;
use crate::engine::allocation::{AllocationMethod, AllocationOptimizer};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::fleet_stats::FleetStatistics;
use crate::engine::readiness::ReadinessAssessor;
use crate::engine::risk::RiskSimulator;
use crate::engine::schedule::ScheduleComposer;
use crate::engine::solver::AssignmentSolver;
use crate::engine::strategy::AllocationStrategy;
use chrono::{DateTime, NaiveDate, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// PlanOutcome - 计划结果
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub plan_id: Uuid,
    pub plan_date: NaiveDate,
    pub strategy: AllocationStrategy,

    // 就绪度输出
    pub readiness: Vec<ReadinessRecord>,
    pub readiness_summary: ReadinessSummary,

    // 分配输出
    pub allocations: Vec<Allocation>,
    pub allocation_method: AllocationMethod,
    pub solver: String, // 精确求解器名称
    pub validation: ValidationReport,

    // 风险 / 排班输出
    pub risk: RiskAnalysis,
    pub schedule: Schedule,

    /// 非致命提示 (兜底原因 / 约束违规 / 评分降级)
    pub warnings: Vec<String>,

    /// 交由持久化协作方落库
    pub records: Vec<InductionPlanRecord>,
    pub generated_at: DateTime<Utc>,
}

impl PlanOutcome {
    /// 是否走了启发式兜底
    pub fn used_fallback(&self) -> bool {
        self.allocation_method == AllocationMethod::HeuristicFallback
    }
}

// ==========================================
// InductionPlanner - 引擎编排器
// ==========================================

#[derive(Debug, Clone)]
pub struct InductionPlanner {
    config: PlanningConfig,
    assessor: ReadinessAssessor,
    optimizer: AllocationOptimizer,
    simulator: RiskSimulator,
    composer: ScheduleComposer,
}

impl InductionPlanner {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 计划配置 (构造时校验,之后不可变)
    ///
    /// # 返回
    /// 配置无效时返回 InvalidConfiguration
    pub fn new(config: PlanningConfig) -> EngineResult<Self> {
        config.validate()?;

        Ok(Self {
            assessor: ReadinessAssessor::new(config.readiness.clone()),
            optimizer: AllocationOptimizer::default(),
            simulator: RiskSimulator::new(
                config.risk.clone(),
                config.duty.clone(),
                config.monte_carlo_trials,
            ),
            composer: ScheduleComposer::new(config.duty.clone()),
            config,
        })
    }

    /// 替换精确求解器
    pub fn with_solver(mut self, solver: Arc<dyn AssignmentSolver>) -> Self {
        self.optimizer = AllocationOptimizer::new(solver);
        self
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    // ==========================================
    // 入口
    // ==========================================

    /// 执行计划 (计划日期按配置解析,随机数按配置种子)
    pub fn plan(&self, snapshot: &FleetSnapshot) -> EngineResult<PlanOutcome> {
        let plan_date = self.config.resolve_plan_date(Utc::now().date_naive());
        self.plan_for_date(snapshot, plan_date)
    }

    /// 执行指定日期的计划 (随机数按配置种子)
    pub fn plan_for_date(
        &self,
        snapshot: &FleetSnapshot,
        plan_date: NaiveDate,
    ) -> EngineResult<PlanOutcome> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.random_seed);
        self.plan_with_rng(snapshot, plan_date, &mut rng)
    }

    /// 从数据源加载快照并执行计划
    ///
    /// 快照读取为异步;计算密集的引擎流程放到阻塞线程池执行
    ///
    /// # 参数
    /// - source: 车队数据源
    /// - today: 当前日期 (用于解析计划日期)
    pub async fn plan_from_source(
        &self,
        source: &dyn FleetDataSource,
        today: NaiveDate,
    ) -> EngineResult<PlanOutcome> {
        let plan_date = self.config.resolve_plan_date(today);
        let snapshot = source.load_snapshot(plan_date).await?;

        let planner = self.clone();
        tokio::task::spawn_blocking(move || planner.plan_for_date(&snapshot, plan_date))
            .await
            .map_err(|e| EngineError::Internal(format!("计划任务异常退出: {}", e)))?
    }

    /// 执行完整计划流程
    ///
    /// # 参数
    /// - snapshot: 车队快照 (只读)
    /// - plan_date: 计划日期
    /// - rng: 注入的随机数发生器 (仅风险仿真使用)
    ///
    /// # 返回
    /// 计划结果;空快照返回 DataUnavailable
    #[instrument(skip(self, snapshot, rng), fields(
        units = snapshot.units.len(),
        strategy = self.config.strategy.as_str()
    ))]
    pub fn plan_with_rng<R: Rng>(
        &self,
        snapshot: &FleetSnapshot,
        plan_date: NaiveDate,
        rng: &mut R,
    ) -> EngineResult<PlanOutcome> {
        if snapshot.is_empty() {
            return Err(EngineError::DataUnavailable(format!(
                "计划日 {} 的车队快照为空",
                plan_date
            )));
        }

        check_unique_unit_ids(snapshot)?;

        info!(plan_date = %plan_date, "开始执行投运计划流程");
        let mut warnings = Vec::new();

        // ==========================================
        // 步骤1: 车队统计
        // ==========================================
        let stats = FleetStatistics::compute(&snapshot.units, plan_date);
        debug!(
            mileage_samples = stats.mileage_samples,
            mean_mileage = ?stats.mean_mileage,
            "步骤1: 车队统计完成"
        );

        // ==========================================
        // 步骤2: 就绪度评估
        // ==========================================
        let readiness = self.assessor.assess_fleet(snapshot, &stats, plan_date);
        let readiness_summary = ReadinessSummary::from_records(&readiness);
        let degraded: Vec<&str> = readiness
            .iter()
            .filter(|r| r.degraded)
            .map(|r| r.unit_number.as_str())
            .collect();
        if !degraded.is_empty() {
            warn!(count = degraded.len(), "部分车辆评分降级");
            warnings.push(format!("评分降级车辆: {}", degraded.join(", ")));
        }
        debug!(
            available_units = readiness_summary.available_units,
            average_score = readiness_summary.average_readiness_score,
            "步骤2: 就绪度评估完成"
        );

        // ==========================================
        // 步骤3: 角色分配 + 约束校验
        // ==========================================
        let outcome = self.optimizer.allocate(&readiness, &self.config);
        if let Some(reason) = &outcome.fallback_reason {
            warnings.push(format!("精确求解失败,已使用启发式分配: {}", reason));
        }

        let validation = self.optimizer.validate(&outcome.allocations, &self.config);
        if !validation.is_valid {
            warn!(violations = validation.violations.len(), "分配结果存在约束违规");
            warnings.extend(validation.violations.iter().map(|v| format!("约束违规: {}", v)));
        }
        debug!(
            method = outcome.method.as_str(),
            service = validation.summary.service_units,
            standby = validation.summary.standby_units,
            maintenance = validation.summary.maintenance_units,
            "步骤3: 角色分配完成"
        );

        // ==========================================
        // 步骤4: 风险仿真
        // ==========================================
        let risk = self.simulator.simulate(&outcome.allocations, rng);
        debug!(
            overall_risk = risk.overall_risk,
            level = ?risk.risk_level,
            "步骤4: 风险仿真完成"
        );

        // ==========================================
        // 步骤5: 排班编排
        // ==========================================
        let schedule = self.composer.compose(&outcome.allocations, &risk, plan_date)?;

        // ==========================================
        // 步骤6: 计划记录
        // ==========================================
        let plan_id = Uuid::new_v4();
        let generated_at = Utc::now();
        let records = outcome
            .allocations
            .iter()
            .map(|a| InductionPlanRecord::from_allocation(plan_id, plan_date, a, generated_at))
            .collect();

        info!(
            plan_id = %plan_id,
            method = outcome.method.as_str(),
            slots = schedule.slots.len(),
            warnings = warnings.len(),
            "投运计划流程完成"
        );

        Ok(PlanOutcome {
            plan_id,
            plan_date,
            strategy: self.config.strategy,
            readiness,
            readiness_summary,
            allocations: outcome.allocations,
            allocation_method: outcome.method,
            solver: self.optimizer.solver_name().to_string(),
            validation,
            risk,
            schedule,
            warnings,
            records,
            generated_at,
        })
    }
}

/// 车辆ID 在快照内必须唯一
fn check_unique_unit_ids(snapshot: &FleetSnapshot) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(snapshot.units.len());
    let duplicates: BTreeSet<UnitId> = snapshot
        .units
        .iter()
        .map(|u| u.unit_id)
        .filter(|id| !seen.insert(*id))
        .collect();

    if duplicates.is_empty() {
        return Ok(());
    }
    let ids: Vec<String> = duplicates.iter().map(|id| id.to_string()).collect();
    Err(EngineError::InvalidSnapshot(format!("车辆ID 重复: {}", ids.join(", "))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::domain::unit::Unit;

    fn fleet(n: u32) -> FleetSnapshot {
        FleetSnapshot::new(
            (1..=n)
                .map(|id| {
                    let mut unit = Unit::new(id, format!("TS-{:02}", id));
                    unit.mileage = Some(40_000.0 + id as f64 * 1_000.0);
                    unit
                })
                .collect(),
        )
    }

    fn small_config() -> PlanningConfig {
        PlanningConfig {
            min_service: 2,
            max_service: 3,
            min_standby: 1,
            max_standby: 1,
            max_maintenance: 2,
            monte_carlo_trials: 50,
            ..Default::default()
        }
    }

    fn plan_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PlanningConfig {
            min_service: 5,
            max_service: 4,
            ..Default::default()
        };
        let err = InductionPlanner::new(config).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidConfiguration(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_snapshot_is_data_unavailable() {
        let planner = InductionPlanner::new(small_config()).unwrap();
        let err = planner
            .plan_for_date(&FleetSnapshot::default(), plan_date())
            .unwrap_err();
        assert!(matches!(err, EngineError::DataUnavailable(_)));
    }

    #[test]
    fn test_duplicate_unit_ids_rejected() {
        let mut snapshot = fleet(3);
        snapshot.units.push(Unit::new(1, "TS-DUP"));
        snapshot.units.push(Unit::new(3, "TS-DUP-3"));

        let planner = InductionPlanner::new(small_config()).unwrap();
        let err = planner.plan_for_date(&snapshot, plan_date()).unwrap_err();
        match err {
            EngineError::InvalidSnapshot(message) => assert!(message.ends_with("1, 3")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_oversized_stagger_rejected_at_construction() {
        let mut config = small_config();
        config.duty.slot_stagger_hours = 1e10;
        let err = InductionPlanner::new(config).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_full_pipeline_small_fleet() {
        let planner = InductionPlanner::new(small_config()).unwrap();
        let outcome = planner.plan_for_date(&fleet(5), plan_date()).unwrap();

        assert_eq!(outcome.plan_date, plan_date());
        assert_eq!(outcome.allocation_method, AllocationMethod::Exact);
        assert_eq!(outcome.solver, "dynamic_programming");
        assert!(outcome.validation.is_valid);
        assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
        assert_eq!(outcome.allocations.len(), 5);
        assert_eq!(outcome.schedule.slots.len(), 5);
        assert_eq!(outcome.risk.scenarios.len(), 5);
        assert_eq!(outcome.records.len(), 5);
        assert!(outcome.records.iter().all(|r| r.plan_id == outcome.plan_id));
        assert_eq!(outcome.readiness_summary.total_units_assessed, 5);
    }

    #[test]
    fn test_fallback_reported_as_warning() {
        // 默认配置至少 15 辆运营车,5 辆车不可行
        let config = PlanningConfig {
            monte_carlo_trials: 10,
            ..Default::default()
        };
        let planner = InductionPlanner::new(config).unwrap();
        let outcome = planner.plan_for_date(&fleet(5), plan_date()).unwrap();

        assert!(outcome.used_fallback());
        assert!(!outcome.validation.is_valid);
        assert!(outcome.warnings[0].starts_with("精确求解失败"));
        assert!(outcome.warnings.iter().any(|w| w.starts_with("约束违规")));
    }
}
