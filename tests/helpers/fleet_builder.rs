// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{Duration, NaiveDate};
use fleet_induction::config::PlanningConfig;
use fleet_induction::domain::unit::{BrandingContract, FitnessCertificate, PerformanceHistory};
use fleet_induction::domain::{FleetSnapshot, Unit, UnitId};

pub const DEPARTMENTS: [&str; 5] = ["rolling_stock", "signalling", "telecom", "traction", "safety"];

/// 固定计划日期
pub fn plan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

/// 小规模车队配置 (试验次数较少,加快测试)
pub fn small_config() -> PlanningConfig {
    PlanningConfig {
        min_service: 3,
        max_service: 5,
        min_standby: 1,
        max_standby: 2,
        max_maintenance: 3,
        monte_carlo_trials: 100,
        ..Default::default()
    }
}

// ==========================================
// Unit 构建器
// ==========================================

pub struct UnitBuilder {
    unit: Unit,
}

impl UnitBuilder {
    pub fn new(unit_id: UnitId) -> Self {
        Self {
            unit: Unit::new(unit_id, format!("TS-{:02}", unit_id)),
        }
    }

    /// 数据齐全、状态良好的车辆
    pub fn healthy(unit_id: UnitId) -> Self {
        Self::new(unit_id)
            .mileage(100_000.0 + unit_id as f64 * 2_500.0)
            .age_days(365 * 4)
            .maintained_days_ago(7)
            .operational_status("active")
            .equipment_status("operational")
            .capacity(180)
            .max_speed(90.0)
            .model("Metro-A")
    }

    pub fn mileage(mut self, mileage: f64) -> Self {
        self.unit.mileage = Some(mileage);
        self
    }

    pub fn age_days(mut self, days: i64) -> Self {
        self.unit.commissioning_date = Some(plan_date() - Duration::days(days));
        self
    }

    pub fn maintained_days_ago(mut self, days: i64) -> Self {
        self.unit.last_maintenance_date = Some(plan_date() - Duration::days(days));
        self
    }

    pub fn maintenance_interval(mut self, days: u32) -> Self {
        self.unit.maintenance_interval_days = Some(days);
        self
    }

    pub fn operational_status(mut self, status: &str) -> Self {
        self.unit.operational_status = Some(status.to_string());
        self
    }

    pub fn equipment_status(mut self, status: &str) -> Self {
        self.unit.equipment_status = Some(status.to_string());
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.unit.capacity = Some(capacity);
        self
    }

    pub fn max_speed(mut self, speed: f64) -> Self {
        self.unit.max_speed = Some(speed);
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.unit.model = Some(model.to_string());
        self
    }

    pub fn build(self) -> Unit {
        self.unit
    }
}

// ==========================================
// FleetSnapshot 构建器
// ==========================================

#[derive(Default)]
pub struct FleetBuilder {
    snapshot: FleetSnapshot,
}

impl FleetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// n 辆健康车辆,均持有全部部门证书
    pub fn healthy(n: u32) -> Self {
        (1..=n).fold(Self::new(), |builder, id| {
            builder
                .unit(UnitBuilder::healthy(id).build())
                .certificates(id, DEPARTMENTS.len())
        })
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.snapshot.units.push(unit);
        self
    }

    /// 为车辆签发前 count 个部门的有效证书
    pub fn certificates(mut self, unit_id: UnitId, count: usize) -> Self {
        let certificates = DEPARTMENTS
            .iter()
            .take(count)
            .map(|dept| FitnessCertificate {
                department: dept.to_string(),
                valid_from: Some(plan_date() - Duration::days(60)),
                valid_until: Some(plan_date() + Duration::days(60)),
                is_valid: true,
            })
            .collect();
        self.snapshot.fitness_certificates.insert(unit_id, certificates);
        self
    }

    /// 生效中的广告合同
    pub fn branding(mut self, unit_id: UnitId, required: f64, fulfilled: f64) -> Self {
        self.snapshot
            .branding_contracts
            .entry(unit_id)
            .or_default()
            .push(BrandingContract {
                exposure_hours_required: required,
                exposure_hours_fulfilled: fulfilled,
                contract_value: Some(50_000.0),
                start_date: plan_date() - Duration::days(30),
                end_date: plan_date() + Duration::days(30),
            });
        self
    }

    pub fn history(mut self, unit_id: UnitId, reliability: f64) -> Self {
        self.snapshot.performance_history.insert(
            unit_id,
            PerformanceHistory {
                on_time: reliability,
                reliability,
                availability: reliability,
            },
        );
        self
    }

    pub fn build(self) -> FleetSnapshot {
        self.snapshot
    }
}
