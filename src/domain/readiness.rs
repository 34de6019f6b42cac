// ==========================================
// 车队投运计划系统 - 就绪度领域模型
// ==========================================
// 职责: 单车就绪度评估结果 + 车队就绪度汇总
// 生命周期: 每次计划运行重新生成,引擎不落库
// ==========================================

use crate::domain::types::{PriorityLevel, ReadinessStatus};
use crate::domain::unit::UnitId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// ReadinessRecord - 单车就绪度
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessRecord {
    pub unit_id: UnitId,
    pub unit_number: String,

    // ===== 评分结果 =====
    pub score: f64,                 // 就绪度 [0,1]
    pub status: ReadinessStatus,    // 就绪状态
    pub priority: PriorityLevel,    // 优先级

    // ===== 可解释性 =====
    pub constraints: BTreeSet<String>,   // 运用约束
    pub capabilities: BTreeSet<String>,  // 能力标签
    pub factors: BTreeMap<String, f64>,  // 子分数 / 扣分 / 加分明细

    // ===== 衍生指标 =====
    pub estimated_uptime_hours: f64, // 预计可用时长 (小时)
    pub risk_factor: f64,            // 风险因子 [0,1]

    // ===== 广告曝光 =====
    pub branding_score: f64,      // 广告曝光紧迫度 [0,1]
    pub branding_priority: bool,  // 是否广告优先车

    /// 评分失败时使用默认值兜底
    #[serde(default)]
    pub degraded: bool,
}

// ==========================================
// ReadinessSummary - 车队就绪度汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadinessSummary {
    pub total_units_assessed: usize,
    pub available_units: usize,       // 可用 + 受限
    pub availability_rate: f64,
    pub average_readiness_score: f64,
    pub distribution: ReadinessDistribution,
}

/// 分数分布: >=0.8 优 / [0.6,0.8) 良 / [0.4,0.6) 中 / <0.4 差
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl ReadinessSummary {
    /// 由就绪度列表汇总
    pub fn from_records(records: &[ReadinessRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let total = records.len();
        let available = records.iter().filter(|r| r.status.is_assignable()).count();
        let mean = records.iter().map(|r| r.score).sum::<f64>() / total as f64;

        let mut distribution = ReadinessDistribution::default();
        for record in records {
            match record.score {
                s if s >= 0.8 => distribution.excellent += 1,
                s if s >= 0.6 => distribution.good += 1,
                s if s >= 0.4 => distribution.fair += 1,
                _ => distribution.poor += 1,
            }
        }

        Self {
            total_units_assessed: total,
            available_units: available,
            availability_rate: available as f64 / total as f64,
            average_readiness_score: mean,
            distribution,
        }
    }
}
