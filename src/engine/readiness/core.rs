use super::scoring;
use crate::adapter::profile::UnitProfile;
use crate::config::model_params::ReadinessParams;
use crate::domain::readiness::ReadinessRecord;
use crate::domain::snapshot::FleetSnapshot;
use crate::domain::types::{PriorityLevel, ReadinessStatus};
use crate::domain::unit::Unit;
use crate::engine::error::ScoringError;
use crate::engine::fleet_stats::FleetStatistics;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument, warn};

// ===== 约束标签 =====
pub const CONSTRAINT_CERTIFICATE_ISSUES: &str = "certificate_issues";
pub const CONSTRAINT_MAINTENANCE_DUE: &str = "maintenance_due";
pub const CONSTRAINT_MAINTENANCE_INTERVAL_EXCEEDED: &str = "maintenance_interval_exceeded";
pub const CONSTRAINT_STATUS_LIMITATION: &str = "status_limitation";
pub const CONSTRAINT_EQUIPMENT_DEGRADED: &str = "equipment_degraded";
pub const CONSTRAINT_RELIABILITY_UNKNOWN: &str = "reliability_unknown";
pub const CONSTRAINT_SCORING_FALLBACK: &str = "scoring_fallback";

// ===== 能力标签 =====
pub const CAPABILITY_HIGH_CAPACITY: &str = "high_capacity";
pub const CAPABILITY_HIGH_SPEED: &str = "high_speed";
pub const CAPABILITY_MODERN_EQUIPMENT: &str = "modern_equipment";
pub const CAPABILITY_LOW_MILEAGE: &str = "low_mileage";

/// 兜底记录的就绪度 / 风险因子
const FALLBACK_SCORE: f64 = 0.5;
const FALLBACK_RISK: f64 = 0.5;
const FALLBACK_BRANDING: f64 = 0.3;

// ==========================================
// ReadinessAssessor - 就绪度评估引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct ReadinessAssessor {
    params: ReadinessParams,
}

impl Default for ReadinessAssessor {
    fn default() -> Self {
        Self::new(ReadinessParams::default())
    }
}

impl ReadinessAssessor {
    /// 构造函数
    ///
    /// # 参数
    /// - params: 评分参数 (构造后不可变)
    pub fn new(params: ReadinessParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ReadinessParams {
        &self.params
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 评估全车队就绪度
    ///
    /// 逐车评分并行执行 (rayon),单车失败使用兜底记录,不中断批量
    ///
    /// # 返回
    /// 按 score 降序、unit_id 升序排列的就绪度列表
    #[instrument(skip(self, snapshot, stats), fields(
        units = snapshot.units.len(),
        plan_date = %plan_date
    ))]
    pub fn assess_fleet(
        &self,
        snapshot: &FleetSnapshot,
        stats: &FleetStatistics,
        plan_date: NaiveDate,
    ) -> Vec<ReadinessRecord> {
        let mut records: Vec<ReadinessRecord> = snapshot
            .units
            .par_iter()
            .map(|unit| match self.assess_unit(unit, snapshot, stats, plan_date) {
                Ok(record) => record,
                Err(e) => {
                    warn!(unit_id = unit.unit_id, error = %e, "单车评分失败,使用兜底记录");
                    self.fallback_record(unit)
                }
            })
            .collect();

        records.sort_by(compare_by_score_desc);

        let degraded = records.iter().filter(|r| r.degraded).count();
        debug!(assessed = records.len(), degraded = degraded, "就绪度评估完成");

        records
    }

    /// 评估单车就绪度
    ///
    /// # 返回
    /// - Ok(ReadinessRecord): 评估结果
    /// - Err(ScoringError): 子分数非有限值等数据异常
    pub fn assess_unit(
        &self,
        unit: &Unit,
        snapshot: &FleetSnapshot,
        stats: &FleetStatistics,
        plan_date: NaiveDate,
    ) -> Result<ReadinessRecord, ScoringError> {
        let p = &self.params;
        let profile = UnitProfile::resolve(unit, stats.mean_mileage);

        if profile.unit_number.trim().is_empty() {
            return Err(ScoringError::InvalidData {
                unit_id: unit.unit_id,
                message: "车号为空".to_string(),
            });
        }

        // ===== 子分数 =====
        let (valid_certs, total_certs) =
            scoring::certificate_counts(snapshot.certificates_for(unit.unit_id), plan_date);
        let days_since = profile.days_since_maintenance(plan_date);
        let age_years = profile.age_years(plan_date);
        let reliability = scoring::reliability_score(snapshot.history_for(unit.unit_id));

        let status = scoring::status_score(&profile.operational_status);
        let fitness = scoring::fitness_score(valid_certs, total_certs, p);
        let maintenance = scoring::maintenance_score(days_since, p);
        let mileage = scoring::mileage_score(profile.mileage, p);
        let age = scoring::age_score(age_years, p);
        let reliability_value = reliability.unwrap_or(p.neutral_reliability);

        let sub_scores = [
            ("status", status),
            ("fitness", fitness),
            ("maintenance", maintenance),
            ("mileage", mileage),
            ("age", age),
            ("reliability", reliability_value),
        ];
        for (name, value) in sub_scores {
            if !value.is_finite() {
                return Err(ScoringError::NonFiniteFactor {
                    unit_id: unit.unit_id,
                    factor: name.to_string(),
                });
            }
        }

        // ===== 加权汇总 =====
        let base_score: f64 = sub_scores
            .iter()
            .zip(p.weights.as_array())
            .map(|((_, value), weight)| value * weight)
            .sum();
        let penalty = scoring::constraint_penalty(valid_certs, total_certs, days_since, p);
        let bonus = scoring::capability_bonus(&profile.model, profile.capacity, p);
        let score = (base_score - penalty + bonus).clamp(0.0, 1.0);

        if !score.is_finite() {
            return Err(ScoringError::NonFiniteFactor {
                unit_id: unit.unit_id,
                factor: "score".to_string(),
            });
        }

        let (status_class, priority) = scoring::classify(score);

        // ===== 约束 =====
        let mut constraints = BTreeSet::new();
        if fitness < 0.5 {
            constraints.insert(CONSTRAINT_CERTIFICATE_ISSUES.to_string());
        }
        if maintenance < 0.6 {
            constraints.insert(CONSTRAINT_MAINTENANCE_DUE.to_string());
        }
        // 车辆自身检修周期已过 (周期未登记时不判定)
        if let (Some(days), Some(interval)) = (days_since, profile.maintenance_interval_days) {
            if days > i64::from(interval) {
                constraints.insert(CONSTRAINT_MAINTENANCE_INTERVAL_EXCEEDED.to_string());
            }
        }
        if !scoring::status_is_unrestricted(&profile.operational_status) {
            constraints.insert(CONSTRAINT_STATUS_LIMITATION.to_string());
        }
        if profile.equipment_status_known
            && !scoring::equipment_is_operational(&profile.equipment_status)
        {
            constraints.insert(CONSTRAINT_EQUIPMENT_DEGRADED.to_string());
        }
        if reliability.is_none() {
            constraints.insert(CONSTRAINT_RELIABILITY_UNKNOWN.to_string());
        }

        // ===== 能力 =====
        let mut capabilities = BTreeSet::new();
        if profile.capacity > p.high_capacity_threshold {
            capabilities.insert(CAPABILITY_HIGH_CAPACITY.to_string());
        }
        if profile.max_speed > p.high_speed_threshold {
            capabilities.insert(CAPABILITY_HIGH_SPEED.to_string());
        }
        if scoring::is_modern_model(&profile.model) {
            capabilities.insert(CAPABILITY_MODERN_EQUIPMENT.to_string());
        }
        let z_score = profile
            .mileage
            .filter(|_| !profile.mileage_imputed)
            .and_then(|m| stats.mileage_z_score(m));
        if matches!(z_score, Some(z) if z < -1.0) {
            capabilities.insert(CAPABILITY_LOW_MILEAGE.to_string());
        }

        // ===== 明细 =====
        let mut factors: BTreeMap<String, f64> = sub_scores
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        factors.insert("base_score".to_string(), base_score);
        factors.insert("penalty".to_string(), penalty);
        factors.insert("bonus".to_string(), bonus);
        if let Some(z) = z_score {
            factors.insert("mileage_z_score".to_string(), z);
        }

        let risk_factor = scoring::risk_factor(age_years, maintenance, fitness, p);
        let branding_score =
            scoring::branding_score(snapshot.contracts_for(unit.unit_id), plan_date);

        Ok(ReadinessRecord {
            unit_id: unit.unit_id,
            unit_number: profile.unit_number,
            score,
            status: status_class,
            priority,
            constraints,
            capabilities,
            factors,
            estimated_uptime_hours: p.base_uptime_hours * (0.5 + 0.5 * score),
            risk_factor,
            branding_score,
            branding_priority: branding_score > p.branding_priority_threshold,
            degraded: false,
        })
    }

    /// 兜底记录: score 0.5 / 受限 / 低优先级 / 风险 0.5
    pub fn fallback_record(&self, unit: &Unit) -> ReadinessRecord {
        let mut constraints = BTreeSet::new();
        constraints.insert(CONSTRAINT_SCORING_FALLBACK.to_string());

        ReadinessRecord {
            unit_id: unit.unit_id,
            unit_number: unit.unit_number.clone(),
            score: FALLBACK_SCORE,
            status: ReadinessStatus::Restricted,
            priority: PriorityLevel::Low,
            constraints,
            capabilities: BTreeSet::new(),
            factors: BTreeMap::new(),
            estimated_uptime_hours: self.params.base_uptime_hours * (0.5 + 0.5 * FALLBACK_SCORE),
            risk_factor: FALLBACK_RISK,
            branding_score: FALLBACK_BRANDING,
            branding_priority: false,
            degraded: true,
        }
    }
}

/// 排序: score 降序,unit_id 升序
pub(crate) fn compare_by_score_desc(a: &ReadinessRecord, b: &ReadinessRecord) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.unit_id.cmp(&b.unit_id))
}
