// ==========================================
// 车队投运计划系统 - 排班编排引擎
// ==========================================
// 职责: 分配 + 风险 → 时段排班 (后备车 / 应急预案 / 成本估算)
// 输入: Allocation 列表 (按排名) + RiskAnalysis + 计划日期
// 输出: Schedule
// ==========================================

use crate::config::model_params::DutyParams;
use crate::domain::allocation::Allocation;
use crate::domain::risk::RiskAnalysis;
use crate::domain::schedule::{ContingencyPlan, EfficiencyMetrics, Schedule, ScheduleSlot};
use crate::domain::types::RiskLevel;
use crate::domain::unit::UnitId;
use crate::engine::error::{EngineError, EngineResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// ScheduleComposer - 排班编排引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ScheduleComposer {
    duty: DutyParams,
}

impl ScheduleComposer {
    pub fn new(duty: DutyParams) -> Self {
        Self { duty }
    }

    /// 编排排班
    ///
    /// 时段 i (按排名, 0 起):
    /// - 起点 = 计划日 00:00 UTC + i × 错开间隔
    /// - 后备车 = 第 (i+1) mod n 个分配 (n <= 1 时无后备)
    /// - 应急预案按该时段风险等级查表
    ///
    /// 缺少风险场景 (试验次数为 0 / 无仿真) 时该时段按 medium 处理:
    /// 此时 RiskAnalysis 汇总为 0 风险 (low),各时段仍配置 standby_crew 预案
    ///
    /// # 返回
    /// - Err(EngineError::TimeOverflow): 时段起止时间超出可表示范围
    #[instrument(skip_all, fields(allocations = allocations.len(), plan_date = %plan_date))]
    pub fn compose(
        &self,
        allocations: &[Allocation],
        risk: &RiskAnalysis,
        plan_date: NaiveDate,
    ) -> EngineResult<Schedule> {
        let mut ordered: Vec<&Allocation> = allocations.iter().collect();
        ordered.sort_by_key(|a| a.rank);

        let levels: HashMap<UnitId, RiskLevel> = risk
            .scenarios
            .iter()
            .map(|s| (s.unit_id, s.risk_level))
            .collect();

        let n = ordered.len();
        let mut slots = Vec::with_capacity(n);

        for (i, allocation) in ordered.iter().enumerate() {
            let duty_class = allocation.role.duty_class();
            let hours = self.duty.planned_hours(duty_class, allocation.score);
            let start_time = slot_start(plan_date, i, self.duty.slot_stagger_hours)
                .ok_or_else(|| overflow(i, "起点"))?;
            let end_time = hours_to_duration(hours)
                .and_then(|d| start_time.checked_add_signed(d))
                .ok_or_else(|| overflow(i, "终点"))?;
            let risk_level = levels
                .get(&allocation.unit_id)
                .copied()
                .unwrap_or(RiskLevel::Medium);
            let backup_unit = if n <= 1 {
                None
            } else {
                Some(ordered[(i + 1) % n].unit_number.clone())
            };

            slots.push(ScheduleSlot {
                slot_id: (i + 1) as u32,
                unit_id: allocation.unit_id,
                unit_number: allocation.unit_number.clone(),
                role: allocation.role,
                rank: allocation.rank,
                duty_class,
                start_time,
                end_time,
                duration_hours: hours,
                readiness_score: allocation.score,
                risk_level,
                backup_unit,
                contingency_plan: ContingencyPlan::for_risk_level(risk_level),
                cost_estimate: self.duty.operational_cost(hours, allocation.score),
            });
        }

        let efficiency = efficiency_metrics(&slots);
        debug!(
            slots = slots.len(),
            utilization_rate = efficiency.utilization_rate,
            "排班编排完成"
        );

        Ok(Schedule { slots, efficiency })
    }
}

fn overflow(index: usize, which: &str) -> EngineError {
    EngineError::TimeOverflow(format!("时段 {} 的{}超出时间范围", index + 1, which))
}

/// 效率指标
///
/// - utilization_rate = 平均就绪度
/// - cost_efficiency = Σ就绪度 / max(1, Σ成本)
/// - risk_adjusted_return = Σ就绪度 / max(1, 0.1 × Σ成本)
pub fn efficiency_metrics(slots: &[ScheduleSlot]) -> EfficiencyMetrics {
    if slots.is_empty() {
        return EfficiencyMetrics::default();
    }

    let total_utilization: f64 = slots.iter().map(|s| s.readiness_score).sum();
    let total_cost: f64 = slots.iter().map(|s| s.cost_estimate).sum();

    EfficiencyMetrics {
        utilization_rate: total_utilization / slots.len() as f64,
        cost_efficiency: total_utilization / total_cost.max(1.0),
        risk_adjusted_return: total_utilization / (total_cost * 0.1).max(1.0),
    }
}

/// 小时 → chrono::Duration (毫秒精度);非有限值或超出范围时返回 None
fn hours_to_duration(hours: f64) -> Option<Duration> {
    let millis = (hours * 3_600_000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

/// 第 index 个时段起点;超出可表示范围时返回 None
pub fn slot_start(plan_date: NaiveDate, index: usize, stagger_hours: f64) -> Option<DateTime<Utc>> {
    let offset = hours_to_duration(stagger_hours * index as f64)?;
    plan_date
        .and_time(NaiveTime::MIN)
        .and_utc()
        .checked_add_signed(offset)
}
