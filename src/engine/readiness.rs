// ==========================================
// 车队投运计划系统 - 就绪度评估引擎
// ==========================================
// 职责: 逐车多因子就绪度评分
// 输入: 车队快照 + 车队统计 + 计划日期
// 输出: ReadinessRecord 列表 (score 降序)
// ==========================================
//
// 评分 = clamp(加权子分数 - 约束扣分 + 能力加分, 0, 1)
// 子分数: 运营状态 / 适用证书 / 检修 / 走行 / 车龄 / 可靠性

mod core;
mod scoring;

#[cfg(test)]
mod tests;

pub use core::{
    ReadinessAssessor, CAPABILITY_HIGH_CAPACITY, CAPABILITY_HIGH_SPEED, CAPABILITY_LOW_MILEAGE,
    CAPABILITY_MODERN_EQUIPMENT, CONSTRAINT_CERTIFICATE_ISSUES, CONSTRAINT_EQUIPMENT_DEGRADED,
    CONSTRAINT_MAINTENANCE_DUE, CONSTRAINT_MAINTENANCE_INTERVAL_EXCEEDED,
    CONSTRAINT_RELIABILITY_UNKNOWN, CONSTRAINT_SCORING_FALLBACK, CONSTRAINT_STATUS_LIMITATION,
};
pub(crate) use core::compare_by_score_desc;
