// ==========================================
// 车队投运计划系统 - 车辆画像解析
// ==========================================
// 职责: 可选字段 → 显式值 (唯一的缺省值解析点)
// 红线: 引擎只消费 UnitProfile,不直接判断字段缺失
// ==========================================
//
// 缺省规则:
// - mileage 缺失: 车队平均走行 (由调用方传入),车队无走行数据时为 None
// - 状态缺失: "unknown"
// - capacity 缺失: 0 (不触发大载客量能力)
// - max_speed 缺失: 0.0 (不触发高速能力)
// - model 缺失: 空串 (不触发新型车加分)
// - 日期缺失: None (对应子分数取中性值)

use crate::domain::unit::{Unit, UnitId};
use chrono::NaiveDate;

/// 状态缺失时的占位值
pub const UNKNOWN_STATUS: &str = "unknown";

// ==========================================
// UnitProfile - 已解析的车辆画像
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct UnitProfile {
    pub unit_id: UnitId,
    pub unit_number: String,

    /// 走行 (km),imputed=true 表示取自车队均值
    pub mileage: Option<f64>,
    pub mileage_imputed: bool,

    pub commissioning_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub maintenance_interval_days: Option<u32>,

    pub operational_status: String, // 小写
    pub equipment_status: String,   // 小写
    pub equipment_status_known: bool,

    pub capacity: u32,
    pub max_speed: f64,
    pub model: String, // 小写
}

impl UnitProfile {
    /// 解析车辆画像
    ///
    /// # 参数
    /// - unit: 原始车辆数据
    /// - fleet_mean_mileage: 车队平均走行 (用于缺失值插补)
    pub fn resolve(unit: &Unit, fleet_mean_mileage: Option<f64>) -> Self {
        let own_mileage = unit.mileage.filter(|m| m.is_finite() && *m >= 0.0);
        let (mileage, mileage_imputed) = match own_mileage {
            Some(m) => (Some(m), false),
            None => (fleet_mean_mileage, fleet_mean_mileage.is_some()),
        };

        Self {
            unit_id: unit.unit_id,
            unit_number: unit.unit_number.clone(),
            mileage,
            mileage_imputed,
            commissioning_date: unit.commissioning_date,
            last_maintenance_date: unit.last_maintenance_date,
            maintenance_interval_days: unit.maintenance_interval_days,
            operational_status: normalize_status(unit.operational_status.as_deref()),
            equipment_status: normalize_status(unit.equipment_status.as_deref()),
            equipment_status_known: unit
                .equipment_status
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty()),
            capacity: unit.capacity.unwrap_or(0),
            max_speed: unit.max_speed.filter(|v| v.is_finite()).unwrap_or(0.0),
            model: unit.model.as_deref().unwrap_or("").trim().to_lowercase(),
        }
    }

    /// 距上次检修天数 (未来日期视为 0)
    pub fn days_since_maintenance(&self, plan_date: NaiveDate) -> Option<i64> {
        self.last_maintenance_date
            .map(|d| (plan_date - d).num_days().max(0))
    }

    /// 计划日车龄 (年)
    pub fn age_years(&self, plan_date: NaiveDate) -> Option<f64> {
        self.commissioning_date
            .map(|d| ((plan_date - d).num_days().max(0)) as f64 / 365.25)
    }
}

fn normalize_status(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => UNKNOWN_STATUS.to_string(),
    }
}
