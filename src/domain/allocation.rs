// ==========================================
// 车队投运计划系统 - 角色分配领域模型
// ==========================================
// 红线: 每辆车在一次计划中恰好出现一次
// ==========================================

use crate::domain::types::InductionRole;
use crate::domain::unit::UnitId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ==========================================
// Allocation - 角色分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub unit_id: UnitId,
    pub unit_number: String,
    pub role: InductionRole,
    pub rank: u32,                       // 全局排名 (1 起,唯一)
    pub score: f64,                      // 就绪度
    pub risk_factor: f64,                // 风险因子
    pub reasons: Vec<String>,            // 分配原因 (有序)
    pub metadata: BTreeMap<String, f64>, // 评分因子
}

// ==========================================
// ValidationReport - 约束校验报告
// ==========================================
// 违规不阻断计划输出,仅作提示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub violations: Vec<String>,
    pub summary: ValidationSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub service_units: usize,
    pub standby_units: usize,
    pub maintenance_units: usize,
    pub total_units: usize,
}

impl ValidationSummary {
    pub fn count(allocations: &[Allocation]) -> Self {
        let by_role = |role: InductionRole| allocations.iter().filter(|a| a.role == role).count();
        Self {
            service_units: by_role(InductionRole::Service),
            standby_units: by_role(InductionRole::Standby),
            maintenance_units: by_role(InductionRole::Maintenance),
            total_units: allocations.len(),
        }
    }
}

// ==========================================
// InductionPlanRecord - 投运计划落库记录
// ==========================================
// 用途: 交由外部存储协作方持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InductionPlanRecord {
    pub plan_id: Uuid,
    pub plan_date: NaiveDate,
    pub unit_id: UnitId,
    pub unit_number: String,
    pub induction_type: InductionRole,
    pub rank: u32,
    pub reason: String, // 分配原因 ("; " 连接)
    pub score: f64,
    pub metadata: BTreeMap<String, f64>,
    pub generated_at: DateTime<Utc>,
}

impl InductionPlanRecord {
    pub fn from_allocation(
        plan_id: Uuid,
        plan_date: NaiveDate,
        allocation: &Allocation,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            plan_id,
            plan_date,
            unit_id: allocation.unit_id,
            unit_number: allocation.unit_number.clone(),
            induction_type: allocation.role,
            rank: allocation.rank,
            reason: allocation.reasons.join("; "),
            score: allocation.score,
            metadata: allocation.metadata.clone(),
            generated_at,
        }
    }
}
