// ==========================================
// 车队投运计划系统 - 排班领域模型
// ==========================================
// 职责: 时段排班 + 后备车 + 应急预案 + 效率指标
// 时间格式: UTC, ISO-8601 (RFC 3339)
// ==========================================

use crate::domain::types::{DutyClass, InductionRole, RiskLevel};
use crate::domain::unit::UnitId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ContingencyPlan - 应急预案
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyPlan {
    pub action: String,
    pub response_time_minutes: u32,
    pub resources: String,
}

impl ContingencyPlan {
    /// 按风险等级查表
    pub fn for_risk_level(level: RiskLevel) -> Self {
        let (action, response_time_minutes, resources) = match level {
            RiskLevel::Low => ("monitor", 60, "none"),
            RiskLevel::Medium => ("standby_crew", 30, "minimal"),
            RiskLevel::High => ("backup_unit", 15, "moderate"),
            RiskLevel::Critical => ("immediate_replacement", 5, "full"),
        };
        Self {
            action: action.to_string(),
            response_time_minutes,
            resources: resources.to_string(),
        }
    }
}

// ==========================================
// ScheduleSlot - 排班时段
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub slot_id: u32,

    // ===== 分配引用 =====
    pub unit_id: UnitId,
    pub unit_number: String,
    pub role: InductionRole,
    pub rank: u32,
    pub duty_class: DutyClass,

    // ===== 时段 =====
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: f64,

    // ===== 风险 =====
    pub readiness_score: f64,
    pub risk_level: RiskLevel,
    pub backup_unit: Option<String>, // 后备车号 (轮转分配)
    pub contingency_plan: ContingencyPlan,

    pub cost_estimate: f64,
}

// ==========================================
// EfficiencyMetrics - 效率指标
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    pub utilization_rate: f64,
    pub cost_efficiency: f64,
    pub risk_adjusted_return: f64,
}

// ==========================================
// Schedule - 排班表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub slots: Vec<ScheduleSlot>,
    pub efficiency: EfficiencyMetrics,
}
