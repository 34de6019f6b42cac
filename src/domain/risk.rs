// ==========================================
// 车队投运计划系统 - 风险领域模型
// ==========================================
// 职责: 单车故障场景 + 整体风险分析 + 缓解建议
// ==========================================

use crate::domain::types::{InductionRole, RiskLevel};
use crate::domain::unit::UnitId;
use serde::{Deserialize, Serialize};

// ==========================================
// RiskScenario - 故障场景
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScenario {
    // ===== 分配引用 =====
    pub unit_id: UnitId,
    pub rank: u32,
    pub role: InductionRole,

    // ===== 概率 =====
    pub failure_probability: f64,    // 解析故障概率
    pub simulated_failure_rate: f64, // 蒙特卡洛经验故障率 (仅用于方差核对)

    // ===== 影响 =====
    pub impact_severity: f64, // 影响严重度
    pub risk_score: f64,      // 故障概率 × 影响严重度
    pub risk_level: RiskLevel,
}

// ==========================================
// Mitigation - 缓解建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mitigation {
    pub unit_id: UnitId,
    pub mitigation: String,
    pub priority: String, // high / medium
    pub actions: Vec<String>,
}

// ==========================================
// RiskAnalysis - 风险分析结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub overall_risk: f64,
    pub risk_level: RiskLevel,
    pub scenarios: Vec<RiskScenario>,
    pub mitigations: Vec<Mitigation>,
    pub trials: u32, // 每个分配的蒙特卡洛试验次数
}

impl RiskAnalysis {
    /// 零风险结果 (无分配 / 无试验)
    pub fn zero(trials: u32) -> Self {
        Self {
            overall_risk: 0.0,
            risk_level: RiskLevel::Low,
            scenarios: Vec::new(),
            mitigations: Vec::new(),
            trials,
        }
    }

    pub fn scenario_for(&self, unit_id: UnitId) -> Option<&RiskScenario> {
        self.scenarios.iter().find(|s| s.unit_id == unit_id)
    }
}
