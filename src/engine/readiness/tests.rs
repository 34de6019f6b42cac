use super::scoring;
use super::*;
use crate::config::model_params::ReadinessParams;
use crate::domain::readiness::ReadinessRecord;
use crate::domain::snapshot::FleetSnapshot;
use crate::domain::types::{PriorityLevel, ReadinessStatus};
use crate::domain::unit::{BrandingContract, FitnessCertificate, PerformanceHistory, Unit};
use crate::engine::fleet_stats::FleetStatistics;
use chrono::{Duration, NaiveDate};

// ==========================================
// 测试辅助函数
// ==========================================

fn plan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn healthy_unit(id: u32) -> Unit {
    let mut unit = Unit::new(id, format!("TS-{:02}", id));
    unit.mileage = Some(120_000.0);
    unit.commissioning_date = Some(plan_date() - Duration::days(365 * 3));
    unit.last_maintenance_date = Some(plan_date() - Duration::days(5));
    unit.operational_status = Some("active".to_string());
    unit.equipment_status = Some("operational".to_string());
    unit.capacity = Some(180);
    unit.max_speed = Some(90.0);
    unit.model = Some("Metro-A".to_string());
    unit
}

fn full_certificates() -> Vec<FitnessCertificate> {
    ["rolling_stock", "signalling", "telecom", "traction", "safety"]
        .iter()
        .map(|dept| FitnessCertificate {
            department: dept.to_string(),
            valid_from: Some(plan_date() - Duration::days(30)),
            valid_until: Some(plan_date() + Duration::days(30)),
            is_valid: true,
        })
        .collect()
}

fn assess_single(unit: Unit, snapshot_setup: impl FnOnce(&mut FleetSnapshot)) -> ReadinessRecord {
    let mut snapshot = FleetSnapshot::new(vec![unit]);
    snapshot_setup(&mut snapshot);
    let stats = FleetStatistics::compute(&snapshot.units, plan_date());
    let assessor = ReadinessAssessor::default();
    let records = assessor.assess_fleet(&snapshot, &stats, plan_date());
    records.into_iter().next().unwrap()
}

// ==========================================
// 子分数
// ==========================================

#[test]
fn test_status_table() {
    assert_eq!(scoring::status_score("running"), 1.0);
    assert_eq!(scoring::status_score("available"), 0.9);
    assert_eq!(scoring::status_score("standby"), 0.8);
    assert_eq!(scoring::status_score("maintenance"), 0.3);
    assert_eq!(scoring::status_score("out_of_service"), 0.0);
    assert_eq!(scoring::status_score("unknown"), 0.5);
    assert_eq!(scoring::status_score("garbage"), 0.5);
}

#[test]
fn test_fitness_score() {
    let params = ReadinessParams::default();
    assert_eq!(scoring::fitness_score(0, 0, &params), 0.3);
    assert!((scoring::fitness_score(2, 3, &params) - 0.6).abs() < 1e-12);
    assert_eq!(scoring::fitness_score(5, 5, &params), 1.0);
}

#[test]
fn test_maintenance_weibull() {
    let params = ReadinessParams::default();
    assert_eq!(scoring::maintenance_score(None, &params), 0.5);
    assert_eq!(scoring::maintenance_score(Some(0), &params), 1.0);
    // exp(-1) at the characteristic life
    let at_scale = scoring::maintenance_score(Some(45), &params);
    assert!((at_scale - (-1.0f64).exp()).abs() < 1e-12);
    // floor
    assert_eq!(scoring::maintenance_score(Some(100), &params), 0.1);
}

#[test]
fn test_mileage_and_age_decay() {
    let params = ReadinessParams::default();
    assert_eq!(scoring::mileage_score(None, &params), 0.5);
    assert_eq!(scoring::mileage_score(Some(0.0), &params), 1.0);
    assert!(scoring::mileage_score(Some(800_000.0), &params) < 0.4);

    assert!((scoring::age_score(Some(15.0), &params) - 0.5).abs() < 1e-12);
    assert!(scoring::age_score(Some(2.0), &params) > 0.9);
    assert_eq!(scoring::age_score(None, &params), 0.5);
}

#[test]
fn test_penalty_and_bonus_caps() {
    let params = ReadinessParams::default();
    // 无证书 0.1 + 超期 0.3
    assert!((scoring::constraint_penalty(0, 0, Some(61), &params) - 0.4).abs() < 1e-12);
    // 全部无效 0.2 + 0.3 = 0.5 (恰好封顶)
    assert!((scoring::constraint_penalty(0, 4, Some(90), &params) - 0.5).abs() < 1e-12);
    assert!((scoring::constraint_penalty(4, 4, Some(50), &params) - 0.15).abs() < 1e-12);

    assert!((scoring::capability_bonus("advanced-x", 250, &params) - 0.15).abs() < 1e-12);
    assert_eq!(scoring::capability_bonus("metro-a", 100, &params), 0.0);
}

#[test]
fn test_branding_score() {
    let date = plan_date();
    assert_eq!(scoring::branding_score(&[], date), 0.3);

    let urgent = BrandingContract {
        exposure_hours_required: 100.0,
        exposure_hours_fulfilled: 0.0,
        contract_value: Some(200_000.0),
        start_date: date - Duration::days(30),
        end_date: date + Duration::days(2),
    };
    // 单合同: 加权均值 = 缺口 1.0,截断至 0.9
    assert_eq!(scoring::branding_score(&[urgent.clone()], date), 0.9);

    let expired = BrandingContract {
        end_date: date - Duration::days(1),
        ..urgent
    };
    assert_eq!(scoring::branding_score(&[expired], date), 0.3);
}

#[test]
fn test_classify_thresholds() {
    assert_eq!(scoring::classify(0.8), (ReadinessStatus::Available, PriorityLevel::High));
    assert_eq!(scoring::classify(0.6), (ReadinessStatus::Available, PriorityLevel::Medium));
    assert_eq!(scoring::classify(0.4), (ReadinessStatus::Restricted, PriorityLevel::Low));
    assert_eq!(
        scoring::classify(0.2),
        (ReadinessStatus::MaintenanceNeeded, PriorityLevel::Minimal)
    );
    assert_eq!(scoring::classify(0.19), (ReadinessStatus::Unavailable, PriorityLevel::Minimal));
}

// ==========================================
// 单车评估
// ==========================================

#[test]
fn test_healthy_unit_is_available() {
    let record = assess_single(healthy_unit(1), |s| {
        s.fitness_certificates.insert(1, full_certificates());
        s.performance_history.insert(
            1,
            PerformanceHistory {
                on_time: 0.95,
                reliability: 0.95,
                availability: 0.9,
            },
        );
    });

    assert!(record.score >= 0.8, "score = {}", record.score);
    assert_eq!(record.status, ReadinessStatus::Available);
    assert_eq!(record.priority, PriorityLevel::High);
    assert!(record.constraints.is_empty(), "{:?}", record.constraints);
    assert!(record.capabilities.contains(CAPABILITY_HIGH_SPEED));
    assert!(!record.degraded);
    assert!((record.estimated_uptime_hours - 8.0 * (0.5 + 0.5 * record.score)).abs() < 1e-9);
}

#[test]
fn test_missing_history_surfaces_reliability_unknown() {
    let record = assess_single(healthy_unit(1), |s| {
        s.fitness_certificates.insert(1, full_certificates());
    });

    assert!(record.constraints.contains(CONSTRAINT_RELIABILITY_UNKNOWN));
    assert_eq!(record.factors["reliability"], 0.6);
}

#[test]
fn test_overdue_maintenance_constraints() {
    let mut unit = healthy_unit(2);
    unit.last_maintenance_date = Some(plan_date() - Duration::days(100));
    let record = assess_single(unit, |_| {});

    assert!(record.factors["maintenance"] < 0.2);
    assert!(record.constraints.contains(CONSTRAINT_MAINTENANCE_DUE));
    assert!(record.constraints.contains(CONSTRAINT_CERTIFICATE_ISSUES));
    assert!((record.factors["penalty"] - 0.4).abs() < 1e-12);
}

#[test]
fn test_maintenance_interval_exceeded() {
    let mut unit = healthy_unit(2);
    unit.last_maintenance_date = Some(plan_date() - Duration::days(21));
    unit.maintenance_interval_days = Some(20);
    let record = assess_single(unit, |_| {});
    assert!(record.constraints.contains(CONSTRAINT_MAINTENANCE_INTERVAL_EXCEEDED));

    // 恰好到期不算超期
    let mut unit = healthy_unit(3);
    unit.last_maintenance_date = Some(plan_date() - Duration::days(20));
    unit.maintenance_interval_days = Some(20);
    let record = assess_single(unit, |_| {});
    assert!(!record.constraints.contains(CONSTRAINT_MAINTENANCE_INTERVAL_EXCEEDED));

    // 周期未登记
    let mut unit = healthy_unit(4);
    unit.last_maintenance_date = Some(plan_date() - Duration::days(100));
    let record = assess_single(unit, |_| {});
    assert!(!record.constraints.contains(CONSTRAINT_MAINTENANCE_INTERVAL_EXCEEDED));
}

#[test]
fn test_status_and_equipment_constraints() {
    let mut unit = healthy_unit(3);
    unit.operational_status = Some("standby".to_string());
    unit.equipment_status = Some("degraded".to_string());
    unit.model = Some("Advanced-Metro".to_string());
    unit.capacity = Some(240);
    let record = assess_single(unit, |_| {});

    assert!(record.constraints.contains(CONSTRAINT_STATUS_LIMITATION));
    assert!(record.constraints.contains(CONSTRAINT_EQUIPMENT_DEGRADED));
    assert!(record.capabilities.contains(CAPABILITY_MODERN_EQUIPMENT));
    assert!(record.capabilities.contains(CAPABILITY_HIGH_CAPACITY));
    assert!((record.factors["bonus"] - 0.15).abs() < 1e-12);
}

#[test]
fn test_unknown_everything_is_neutral() {
    let record = assess_single(Unit::new(9, "TS-09"), |_| {});

    assert_eq!(record.factors["status"], 0.5);
    assert_eq!(record.factors["maintenance"], 0.5);
    assert_eq!(record.factors["mileage"], 0.5);
    assert_eq!(record.factors["age"], 0.5);
    assert!(record.score >= 0.0 && record.score <= 1.0);
    // 车龄未知: 风险因子只含检修与证书两项
    let expected_risk = ((1.0 - 0.5) * 0.4 + (1.0 - 0.3) * 0.3) / 2.0;
    assert!((record.risk_factor - expected_risk).abs() < 1e-12);
}

#[test]
fn test_branding_priority_flag() {
    let record = assess_single(healthy_unit(4), |s| {
        s.branding_contracts.insert(
            4,
            vec![BrandingContract {
                exposure_hours_required: 200.0,
                exposure_hours_fulfilled: 10.0,
                contract_value: Some(150_000.0),
                start_date: plan_date() - Duration::days(10),
                end_date: plan_date() + Duration::days(5),
            }],
        );
    });

    assert!(record.branding_score > 0.7);
    assert!(record.branding_priority);
}

// ==========================================
// 车队评估
// ==========================================

#[test]
fn test_fleet_sorted_and_low_mileage() {
    let mut units: Vec<Unit> = (1..=6).map(healthy_unit).collect();
    units[5].mileage = Some(1_000.0);
    units[2].last_maintenance_date = Some(plan_date() - Duration::days(80));

    let snapshot = FleetSnapshot::new(units);
    let stats = FleetStatistics::compute(&snapshot.units, plan_date());
    let records = ReadinessAssessor::default().assess_fleet(&snapshot, &stats, plan_date());

    assert_eq!(records.len(), 6);
    for pair in records.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].unit_id < pair[1].unit_id)
        );
    }
    let low = records.iter().find(|r| r.unit_id == 6).unwrap();
    assert!(low.capabilities.contains(CAPABILITY_LOW_MILEAGE));
    assert_eq!(records.last().unwrap().unit_id, 3);
}

#[test]
fn test_scoring_failure_uses_fallback_record() {
    let units = vec![healthy_unit(1), Unit::new(2, "  ")];
    let snapshot = FleetSnapshot::new(units);
    let stats = FleetStatistics::compute(&snapshot.units, plan_date());
    let records = ReadinessAssessor::default().assess_fleet(&snapshot, &stats, plan_date());

    assert_eq!(records.len(), 2);
    let fallback = records.iter().find(|r| r.unit_id == 2).unwrap();
    assert!(fallback.degraded);
    assert_eq!(fallback.score, 0.5);
    assert_eq!(fallback.status, ReadinessStatus::Restricted);
    assert_eq!(fallback.priority, PriorityLevel::Low);
    assert_eq!(fallback.risk_factor, 0.5);
    assert!(fallback.constraints.contains(CONSTRAINT_SCORING_FALLBACK));
}
