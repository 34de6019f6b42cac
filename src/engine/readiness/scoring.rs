use crate::config::model_params::ReadinessParams;
use crate::domain::types::{PriorityLevel, ReadinessStatus};
use crate::domain::unit::{BrandingContract, FitnessCertificate, PerformanceHistory};
use chrono::NaiveDate;

// 广告曝光评分常量
const BRANDING_NO_CONTRACT_SCORE: f64 = 0.3;
const BRANDING_ZERO_WEIGHT_SCORE: f64 = 0.5;
const BRANDING_UNKNOWN_VALUE_FACTOR: f64 = 0.5;
const BRANDING_VALUE_NORMALIZER: f64 = 100_000.0;

/// 运营状态查表
pub(super) fn status_score(status: &str) -> f64 {
    match status {
        "active" | "operational" | "running" => 1.0,
        "available" => 0.9,
        "standby" => 0.8,
        "maintenance" => 0.3,
        "inactive" => 0.1,
        "out_of_service" => 0.0,
        _ => 0.5,
    }
}

/// 运营状态是否无运用限制
pub(super) fn status_is_unrestricted(status: &str) -> bool {
    matches!(status, "active" | "operational" | "available")
}

/// 设备状态是否正常
pub(super) fn equipment_is_operational(status: &str) -> bool {
    matches!(status, "operational" | "active" | "ok" | "good" | "normal")
}

/// 证书统计: (有效证书数, 证书总数)
pub(super) fn certificate_counts(certs: &[FitnessCertificate], plan_date: NaiveDate) -> (usize, usize) {
    let valid = certs.iter().filter(|c| c.is_valid_on(plan_date)).count();
    (valid, certs.len())
}

/// 适用证书子分数: 有效证书覆盖率 × 放大系数,封顶 1.0
pub(super) fn fitness_score(valid: usize, total: usize, params: &ReadinessParams) -> f64 {
    if total == 0 {
        return params.no_certificate_score;
    }
    let coverage = valid as f64 / params.expected_departments as f64;
    (coverage * params.fitness_coverage_scale).min(1.0)
}

/// 检修子分数: Weibull 生存函数 exp(-(d/λ)^k),下限 floor
pub(super) fn maintenance_score(days_since: Option<i64>, params: &ReadinessParams) -> f64 {
    match days_since {
        Some(days) => {
            let x = days.max(0) as f64 / params.maintenance_scale_days;
            (-x.powf(params.maintenance_shape)).exp().max(params.maintenance_floor)
        }
        None => params.neutral_score,
    }
}

/// 走行子分数: Weibull 衰减 exp(-((m/L)/λ)^k)
pub(super) fn mileage_score(mileage: Option<f64>, params: &ReadinessParams) -> f64 {
    match mileage {
        Some(m) => {
            let ratio = m / params.mileage_lifecycle_limit;
            (-(ratio / params.mileage_scale).powf(params.mileage_shape))
                .exp()
                .clamp(0.0, 1.0)
        }
        None => params.neutral_score,
    }
}

/// 车龄子分数: Logistic 衰减,中点为寿命周期一半
pub(super) fn age_score(age_years: Option<f64>, params: &ReadinessParams) -> f64 {
    match age_years {
        Some(age) => {
            let mid_life = params.lifecycle_years / 2.0;
            (1.0 / (1.0 + ((age - mid_life) / params.age_smoothing).exp())).clamp(0.0, 1.0)
        }
        None => params.neutral_score,
    }
}

/// 可靠性子分数,无历史数据时返回 None
pub(super) fn reliability_score(history: Option<PerformanceHistory>) -> Option<f64> {
    history.map(|h| {
        (0.4 * h.on_time + 0.4 * h.reliability + 0.2 * h.availability).clamp(0.1, 0.9)
    })
}

/// 约束扣分 (封顶 penalty_cap)
///
/// - 无证书: +0.1;否则 (1 - 有效率) × 0.2
/// - 距上次检修 >60 天: +0.3;>45 天: +0.15
pub(super) fn constraint_penalty(
    valid: usize,
    total: usize,
    days_since: Option<i64>,
    params: &ReadinessParams,
) -> f64 {
    let mut penalty = if total == 0 {
        0.1
    } else {
        (1.0 - valid as f64 / total as f64) * 0.2
    };

    match days_since {
        Some(days) if days > 60 => penalty += 0.3,
        Some(days) if days > 45 => penalty += 0.15,
        _ => {}
    }

    penalty.min(params.penalty_cap)
}

/// 型号是否为新型装备
pub(super) fn is_modern_model(model: &str) -> bool {
    ["modern", "new", "advanced"]
        .iter()
        .any(|keyword| model.contains(keyword))
}

/// 能力加分 (封顶 bonus_cap)
pub(super) fn capability_bonus(model: &str, capacity: u32, params: &ReadinessParams) -> f64 {
    let mut bonus: f64 = 0.0;
    if is_modern_model(model) {
        bonus += 0.1;
    }
    if capacity > params.high_capacity_threshold {
        bonus += 0.05;
    }
    bonus.min(params.bonus_cap)
}

/// 风险因子: 各风险分量的均值
///
/// - 车龄风险 min(1, age/寿命) × 0.3 (车龄已知时)
/// - 检修风险 (1 - 检修子分数) × 0.4
/// - 证书风险 (1 - 证书子分数) × 0.3
pub(super) fn risk_factor(
    age_years: Option<f64>,
    maintenance: f64,
    fitness: f64,
    params: &ReadinessParams,
) -> f64 {
    let mut components = Vec::with_capacity(3);
    if let Some(age) = age_years {
        components.push((age / params.lifecycle_years).min(1.0) * 0.3);
    }
    components.push((1.0 - maintenance) * 0.4);
    components.push((1.0 - fitness) * 0.3);

    (components.iter().sum::<f64>() / components.len() as f64).clamp(0.0, 1.0)
}

/// 广告曝光紧迫度: 生效合同的加权曝光缺口
///
/// 权重 = 缺口 × 1/max(剩余天数,1) × 金额系数
pub(super) fn branding_score(contracts: &[BrandingContract], plan_date: NaiveDate) -> f64 {
    let active: Vec<&BrandingContract> = contracts
        .iter()
        .filter(|c| c.is_active_on(plan_date))
        .collect();

    if active.is_empty() {
        return BRANDING_NO_CONTRACT_SCORE;
    }

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for contract in active {
        let ratio = contract.exposure_hours_fulfilled / contract.exposure_hours_required.max(1.0);
        let deficit = (1.0 - ratio).clamp(0.0, 1.0);
        let days_remaining = (contract.end_date - plan_date).num_days().max(1) as f64;
        let value_factor = match contract.contract_value {
            Some(v) if v > 0.0 => (v / BRANDING_VALUE_NORMALIZER).min(1.0),
            _ => BRANDING_UNKNOWN_VALUE_FACTOR,
        };

        let weight = deficit * (1.0 / days_remaining) * value_factor;
        weighted += deficit * weight;
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return BRANDING_ZERO_WEIGHT_SCORE;
    }
    (weighted / total_weight).clamp(0.1, 0.9)
}

/// 分数 → (就绪状态, 优先级)
pub(super) fn classify(score: f64) -> (ReadinessStatus, PriorityLevel) {
    if score >= 0.8 {
        (ReadinessStatus::Available, PriorityLevel::High)
    } else if score >= 0.6 {
        (ReadinessStatus::Available, PriorityLevel::Medium)
    } else if score >= 0.4 {
        (ReadinessStatus::Restricted, PriorityLevel::Low)
    } else if score >= 0.2 {
        (ReadinessStatus::MaintenanceNeeded, PriorityLevel::Minimal)
    } else {
        (ReadinessStatus::Unavailable, PriorityLevel::Minimal)
    }
}
