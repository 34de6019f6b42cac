// ==========================================
// 车队投运计划系统 - 计划运行配置
// ==========================================
// 职责: 角色数量边界 / 广告曝光目标 / 目标函数权重 / 求解与仿真参数
// 默认值: 与原调度规则一致 (运营 15-20, 热备 3-5, 检修 <=10)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::model_params::{DutyParams, ReadinessParams, RiskParams};
use crate::engine::strategy::AllocationStrategy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 值乘时长 / 时段间隔上限 (小时,一年)
pub const MAX_DUTY_HOURS: f64 = 24.0 * 366.0;

// ==========================================
// PlanningConfig - 计划运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 计划日期 (缺省为运行当日的次日)
    pub plan_date: Option<NaiveDate>,

    // ===== 角色数量边界 =====
    pub min_service: usize,
    pub max_service: usize,
    pub min_standby: usize,
    pub max_standby: usize,
    pub max_maintenance: usize,

    /// 广告优先车进入运营的最低比例
    pub target_branding_exposure: f64,

    // ===== 目标函数权重 =====
    pub service_weight: f64,
    pub standby_weight: f64,
    pub maintenance_weight: f64,

    pub strategy: AllocationStrategy,

    // ===== 精确求解 =====
    pub solver_time_limit_ms: u64,
    pub solver_max_states: usize, // 状态空间上限,超出视为超时

    // ===== 蒙特卡洛 =====
    pub monte_carlo_trials: u32,
    pub random_seed: u64,

    // ===== 模型参数 =====
    pub readiness: ReadinessParams,
    pub risk: RiskParams,
    pub duty: DutyParams,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            plan_date: None,
            min_service: 15,
            max_service: 20,
            min_standby: 3,
            max_standby: 5,
            max_maintenance: 10,
            target_branding_exposure: 0.8,
            service_weight: 0.6,
            standby_weight: 0.25,
            maintenance_weight: 0.15,
            strategy: AllocationStrategy::Balanced,
            solver_time_limit_ms: 2_000,
            solver_max_states: 20_000_000,
            monte_carlo_trials: 1_000,
            random_seed: 42,
            readiness: ReadinessParams::default(),
            risk: RiskParams::default(),
            duty: DutyParams::default(),
        }
    }
}

impl PlanningConfig {
    /// 求解时间预算
    pub fn solver_time_limit(&self) -> Duration {
        Duration::from_millis(self.solver_time_limit_ms)
    }

    /// 计划日期 (未配置时取 today 次日)
    pub fn resolve_plan_date(&self, today: NaiveDate) -> NaiveDate {
        self.plan_date.unwrap_or_else(|| today.succ_opt().unwrap_or(today))
    }

    /// 验证配置的有效性
    ///
    /// # 验证规则
    /// 1. 各角色 min <= max
    /// 2. 广告曝光比例 ∈ [0,1]
    /// 3. 权重非负且有限
    /// 4. 值乘时长 / 时段间隔 ∈ [0, MAX_DUTY_HOURS]
    /// 5. 求解时间预算 > 0
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_service > self.max_service {
            return Err(ConfigError::invalid(
                "min_service",
                format!("min_service={} 大于 max_service={}", self.min_service, self.max_service),
            ));
        }

        if self.min_standby > self.max_standby {
            return Err(ConfigError::invalid(
                "min_standby",
                format!("min_standby={} 大于 max_standby={}", self.min_standby, self.max_standby),
            ));
        }

        check_fraction("target_branding_exposure", self.target_branding_exposure)?;

        for (key, weight) in [
            ("service_weight", self.service_weight),
            ("standby_weight", self.standby_weight),
            ("maintenance_weight", self.maintenance_weight),
        ] {
            check_non_negative(key, weight)?;
        }

        let w = &self.readiness.weights;
        for (key, weight) in [
            ("readiness.weights.status", w.status),
            ("readiness.weights.fitness", w.fitness),
            ("readiness.weights.maintenance", w.maintenance),
            ("readiness.weights.mileage", w.mileage),
            ("readiness.weights.age", w.age),
            ("readiness.weights.reliability", w.reliability),
        ] {
            check_non_negative(key, weight)?;
        }

        if self.readiness.expected_departments == 0 {
            return Err(ConfigError::invalid("readiness.expected_departments", "必须大于 0"));
        }

        for (key, value) in [
            ("readiness.maintenance_scale_days", self.readiness.maintenance_scale_days),
            ("readiness.mileage_lifecycle_limit", self.readiness.mileage_lifecycle_limit),
            ("readiness.mileage_scale", self.readiness.mileage_scale),
            ("readiness.age_smoothing", self.readiness.age_smoothing),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(key, format!("必须为正数, 实际 {}", value)));
            }
        }

        check_fraction("risk.probability_cap", self.risk.probability_cap)?;
        check_non_negative("risk.base_failure_rate_per_hour", self.risk.base_failure_rate_per_hour)?;
        check_duty_hours("duty.base_duration_hours", self.duty.base_duration_hours)?;
        check_duty_hours("duty.slot_stagger_hours", self.duty.slot_stagger_hours)?;
        check_non_negative("duty.cost_per_hour", self.duty.cost_per_hour)?;

        if self.solver_time_limit_ms == 0 {
            return Err(ConfigError::invalid("solver_time_limit_ms", "必须大于 0"));
        }

        Ok(())
    }
}

fn check_fraction(key: &str, value: f64) -> ConfigResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::invalid(
            key,
            format!("{} 超出有效范围 [0.0, 1.0]", value),
        ));
    }
    Ok(())
}

fn check_duty_hours(key: &str, value: f64) -> ConfigResult<()> {
    check_non_negative(key, value)?;
    if value > MAX_DUTY_HOURS {
        return Err(ConfigError::invalid(
            key,
            format!("{} 小时超出上限 {}", value, MAX_DUTY_HOURS),
        ));
    }
    Ok(())
}

fn check_non_negative(key: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(key, format!("必须为非负有限数, 实际 {}", value)));
    }
    Ok(())
}
