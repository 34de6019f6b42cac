// ==========================================
// 车队投运计划系统 - 分配策略定义
// ==========================================
// 用途：
// - 决定代价矩阵中 (1 - 就绪度) 与 风险因子 的组合方式；
// - 同一快照 + 同一策略 + 同一种子,结果可复现。

use serde::{Deserialize, Serialize};

/// 分配策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    Balanced,
    SafetyFirst,
    Efficiency,
    Utilization,
}

impl AllocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStrategy::Balanced => "balanced",
            AllocationStrategy::SafetyFirst => "safety_first",
            AllocationStrategy::Efficiency => "efficiency",
            AllocationStrategy::Utilization => "utilization",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            AllocationStrategy::Balanced => "均衡方案",
            AllocationStrategy::SafetyFirst => "安全优先",
            AllocationStrategy::Efficiency => "低风险优先",
            AllocationStrategy::Utilization => "利用率优先",
        }
    }

    /// 单车代价 ∈ [0,1],越小越适合投入运营
    ///
    /// - balanced: 0.6·(1-s) + 0.4·r
    /// - safety_first: 1-s
    /// - efficiency: r
    /// - utilization: 1/(s+0.1) 归一化到 [0,1]
    pub fn unit_cost(&self, readiness_score: f64, risk_factor: f64) -> f64 {
        let s = readiness_score.clamp(0.0, 1.0);
        let r = risk_factor.clamp(0.0, 1.0);

        match self {
            AllocationStrategy::Balanced => (1.0 - s) * 0.6 + r * 0.4,
            AllocationStrategy::SafetyFirst => 1.0 - s,
            AllocationStrategy::Efficiency => r,
            AllocationStrategy::Utilization => {
                let lo = 1.0 / 1.1;
                let hi = 1.0 / 0.1;
                (1.0 / (s + 0.1) - lo) / (hi - lo)
            }
        }
    }
}

impl Default for AllocationStrategy {
    fn default() -> Self {
        AllocationStrategy::Balanced
    }
}

impl std::str::FromStr for AllocationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balanced" => Ok(AllocationStrategy::Balanced),
            "safety_first" | "safety-first" => Ok(AllocationStrategy::SafetyFirst),
            "efficiency" => Ok(AllocationStrategy::Efficiency),
            "utilization" => Ok(AllocationStrategy::Utilization),
            other => Err(format!("未知策略类型: {}", other)),
        }
    }
}
