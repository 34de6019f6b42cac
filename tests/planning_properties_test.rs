// ==========================================
// 投运计划性质测试 (proptest)
// ==========================================
// 测试目标: 任意车队快照下的不变量
// - 就绪度 ∈ [0,1]
// - 每辆车恰好一个分配,排名 1..n 唯一
// - 运营 / 热备数量不超过上限 (精确与兜底两条路径)
// - 单车就绪度提高且角色不变时,桶内名次单调
//   (运营 / 热备不后移;检修按紧迫度升序,不前移)
// ==========================================

mod helpers;

use fleet_induction::config::PlanningConfig;
use fleet_induction::domain::{
    Allocation, FleetSnapshot, InductionRole, PriorityLevel, ReadinessRecord, ReadinessStatus, Unit,
};
use fleet_induction::engine::{
    AllocationMethod, AllocationOptimizer, Assignment, AssignmentConstraints, AssignmentSolver,
    CostMatrix, InductionPlanner, SolveError,
};
use helpers::{plan_date, FleetBuilder, UnitBuilder};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

const STATUSES: [&str; 6] = ["active", "running", "maintenance", "out_of_service", "standby", "retired"];
const EQUIPMENT: [&str; 4] = ["operational", "degraded", "failed", "unknown_state"];

fn unit_strategy(id: u32) -> impl Strategy<Value = (Unit, usize, Option<f64>)> {
    (
        proptest::option::of(0.0f64..1_500_000.0),
        proptest::option::of(0i64..400),
        proptest::option::of(0i64..40 * 365),
        0usize..STATUSES.len(),
        0usize..EQUIPMENT.len(),
        0usize..=5,
        proptest::option::of(0.0f64..=1.0),
    )
        .prop_map(move |(mileage, maintained, age, status, equipment, certs, history)| {
            let mut builder = UnitBuilder::new(id)
                .operational_status(STATUSES[status])
                .equipment_status(EQUIPMENT[equipment]);
            if let Some(m) = mileage {
                builder = builder.mileage(m);
            }
            if let Some(days) = maintained {
                builder = builder.maintained_days_ago(days);
            }
            if let Some(days) = age {
                builder = builder.age_days(days);
            }
            (builder.build(), certs, history)
        })
}

fn fleet_strategy() -> impl Strategy<Value = FleetSnapshot> {
    (1u32..=24)
        .prop_flat_map(|n| (1..=n).map(unit_strategy).collect::<Vec<_>>())
        .prop_map(|units| {
            units
                .into_iter()
                .fold(FleetBuilder::new(), |builder, (unit, certs, history)| {
                    let id = unit.unit_id;
                    let builder = builder.unit(unit).certificates(id, certs);
                    match history {
                        Some(r) => builder.history(id, r),
                        None => builder,
                    }
                })
                .build()
        })
}

fn config_strategy() -> impl Strategy<Value = PlanningConfig> {
    (0usize..=8, 0usize..=6, 0usize..=3, 0usize..=3, 0usize..=8).prop_map(
        |(min_service, extra_service, min_standby, extra_standby, max_maintenance)| {
            PlanningConfig {
                min_service,
                max_service: min_service + extra_service,
                min_standby,
                max_standby: min_standby + extra_standby,
                max_maintenance,
                monte_carlo_trials: 10,
                ..Default::default()
            }
        },
    )
}

// ==========================================
// 分配单调性辅助
// ==========================================

/// 精确求解始终超时,强制走启发式兜底
#[derive(Debug)]
struct AlwaysTimeoutSolver;

impl AssignmentSolver for AlwaysTimeoutSolver {
    fn name(&self) -> &'static str {
        "always_timeout"
    }

    fn solve(
        &self,
        _costs: &CostMatrix,
        constraints: &AssignmentConstraints,
    ) -> Result<Assignment, SolveError> {
        Err(SolveError::Timeout {
            limit: constraints.time_limit,
        })
    }
}

fn readiness_record(unit_id: u32, score: f64, branding_priority: bool) -> ReadinessRecord {
    ReadinessRecord {
        unit_id,
        unit_number: format!("TS-{:02}", unit_id),
        score,
        status: ReadinessStatus::Available,
        priority: PriorityLevel::Medium,
        constraints: BTreeSet::new(),
        capabilities: BTreeSet::new(),
        factors: BTreeMap::new(),
        estimated_uptime_hours: 8.0 * (0.5 + 0.5 * score),
        risk_factor: (1.0 - score) * 0.3,
        branding_score: if branding_priority { 0.8 } else { 0.3 },
        branding_priority,
        degraded: false,
    }
}

/// 就绪度列表 (分数取两位小数,制造并列)
fn readiness_strategy() -> impl Strategy<Value = Vec<ReadinessRecord>> {
    proptest::collection::vec((0u32..=100, proptest::bool::weighted(0.2)), 1..=16).prop_map(
        |entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (score, branding))| {
                    readiness_record(i as u32 + 1, score as f64 / 100.0, branding)
                })
                .collect()
        },
    )
}

fn role_of(allocations: &[Allocation], unit_id: u32) -> Option<InductionRole> {
    allocations.iter().find(|a| a.unit_id == unit_id).map(|a| a.role)
}

/// 同桶共同车辆中排在目标之前的数量
fn peers_ahead(allocations: &[Allocation], unit_id: u32, peers: &HashSet<u32>) -> usize {
    allocations
        .iter()
        .take_while(|a| a.unit_id != unit_id)
        .filter(|a| peers.contains(&a.unit_id))
        .count()
}

/// 两次分配中与目标同桶的车辆 (不含目标)
fn shared_bucket(
    before: &[Allocation],
    after: &[Allocation],
    role: InductionRole,
    unit_id: u32,
) -> HashSet<u32> {
    let in_bucket = |allocations: &[Allocation]| -> HashSet<u32> {
        allocations
            .iter()
            .filter(|a| a.role == role && a.unit_id != unit_id)
            .map(|a| a.unit_id)
            .collect()
    };
    in_bucket(before).intersection(&in_bucket(after)).copied().collect()
}

/// 提高一辆车的就绪度后检查桶内名次单调
fn check_rank_monotonic(
    optimizer: &AllocationOptimizer,
    readiness: &[ReadinessRecord],
    target: usize,
    raise: f64,
    config: &PlanningConfig,
) -> Result<AllocationMethod, TestCaseError> {
    let unit_id = readiness[target].unit_id;
    let before = optimizer.allocate(readiness, config);

    let mut raised = readiness.to_vec();
    raised[target].score = (raised[target].score + raise).min(1.0);
    let after = optimizer.allocate(&raised, config);

    let role = match role_of(&before.allocations, unit_id) {
        Some(role) => role,
        None => return Err(TestCaseError::fail(format!("车辆 {} 未分配", unit_id))),
    };
    // 角色变化时名次不可比
    if role_of(&after.allocations, unit_id) != Some(role) {
        return Ok(after.method);
    }

    let peers = shared_bucket(&before.allocations, &after.allocations, role, unit_id);
    let ahead_before = peers_ahead(&before.allocations, unit_id, &peers);
    let ahead_after = peers_ahead(&after.allocations, unit_id, &peers);

    match role {
        InductionRole::Maintenance => prop_assert!(
            ahead_after >= ahead_before,
            "检修车辆 {} 提分后前移: {} -> {}",
            unit_id,
            ahead_before,
            ahead_after
        ),
        _ => prop_assert!(
            ahead_after <= ahead_before,
            "{:?} 车辆 {} 提分后后移: {} -> {}",
            role,
            unit_id,
            ahead_before,
            ahead_after
        ),
    }
    Ok(after.method)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rank_monotonic_exact_path(
        readiness in readiness_strategy(),
        pick in any::<prop::sample::Index>(),
        raise in 1u32..=50,
        config in config_strategy(),
    ) {
        let target = pick.index(readiness.len());
        check_rank_monotonic(
            &AllocationOptimizer::default(),
            &readiness,
            target,
            raise as f64 / 100.0,
            &config,
        )?;
    }

    #[test]
    fn prop_rank_monotonic_fallback_path(
        readiness in readiness_strategy(),
        pick in any::<prop::sample::Index>(),
        raise in 1u32..=50,
        config in config_strategy(),
    ) {
        let target = pick.index(readiness.len());
        let optimizer = AllocationOptimizer::new(Arc::new(AlwaysTimeoutSolver));
        let method = check_rank_monotonic(
            &optimizer,
            &readiness,
            target,
            raise as f64 / 100.0,
            &config,
        )?;
        prop_assert_eq!(method, AllocationMethod::HeuristicFallback);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_plan_invariants(snapshot in fleet_strategy(), config in config_strategy()) {
        let max_service = config.max_service;
        let max_standby = config.max_standby;
        let planner = InductionPlanner::new(config).unwrap();
        let outcome = planner.plan_for_date(&snapshot, plan_date()).unwrap();

        for record in &outcome.readiness {
            prop_assert!((0.0..=1.0).contains(&record.score), "score={}", record.score);
            prop_assert!((0.0..=1.0).contains(&record.risk_factor));
        }

        prop_assert_eq!(outcome.allocations.len(), snapshot.units.len());
        let ids: HashSet<u32> = outcome.allocations.iter().map(|a| a.unit_id).collect();
        prop_assert_eq!(ids.len(), snapshot.units.len());

        let ranks: Vec<u32> = outcome.allocations.iter().map(|a| a.rank).collect();
        prop_assert_eq!(ranks, (1..=snapshot.units.len() as u32).collect::<Vec<_>>());

        prop_assert!(outcome.validation.summary.service_units <= max_service);
        prop_assert!(outcome.validation.summary.standby_units <= max_standby);

        for scenario in &outcome.risk.scenarios {
            prop_assert!((0.0..=1.0).contains(&scenario.failure_probability));
            prop_assert!((0.0..=1.0).contains(&scenario.simulated_failure_rate));
        }
    }
}
