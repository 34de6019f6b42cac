// ==========================================
// 车队投运计划系统 - 风险仿真引擎
// ==========================================
// 职责: 逐分配故障概率 / 影响严重度 / 风险等级 + 缓解建议
// 输入: Allocation 列表 + 注入的随机数发生器
// 输出: RiskAnalysis
// ==========================================
//
// 故障概率 p = min(cap, 1 - exp(-λ · 计划时长 · (1 - 就绪度)))
// 蒙特卡洛: 每个分配从注入 RNG 顺序派生子种子,试验并行执行 (rayon)
// 红线: 无全局随机状态;同一种子结果可复现

use crate::config::model_params::{DutyParams, RiskParams};
use crate::domain::allocation::Allocation;
use crate::domain::risk::{Mitigation, RiskAnalysis, RiskScenario};
use crate::domain::types::{InductionRole, RiskLevel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, instrument};

pub const MITIGATION_ENHANCED_MONITORING: &str = "enhanced_monitoring";
pub const ACTION_FREQUENT_INSPECTIONS: &str = "frequent_inspections";
pub const ACTION_REDUCED_LOAD: &str = "reduced_operational_load";

/// 缓解建议优先级为 high 的影响严重度阈值
const HIGH_PRIORITY_IMPACT: f64 = 0.7;

// ==========================================
// RiskSimulator - 风险仿真引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct RiskSimulator {
    risk: RiskParams,
    duty: DutyParams,
    trials: u32,
}

impl Default for RiskSimulator {
    fn default() -> Self {
        Self::new(RiskParams::default(), DutyParams::default(), 1_000)
    }
}

impl RiskSimulator {
    /// 构造函数
    ///
    /// # 参数
    /// - risk: 风险模型参数
    /// - duty: 值乘时长模型 (与排班共用)
    /// - trials: 每个分配的蒙特卡洛试验次数
    pub fn new(risk: RiskParams, duty: DutyParams, trials: u32) -> Self {
        Self { risk, duty, trials }
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// 解析故障概率
    pub fn failure_probability(&self, role: InductionRole, readiness_score: f64) -> f64 {
        let s = readiness_score.clamp(0.0, 1.0);
        let hours = self.duty.planned_hours(role.duty_class(), s);
        let hazard = self.risk.base_failure_rate_per_hour * hours * (1.0 - s);
        (1.0 - (-hazard).exp()).clamp(0.0, self.risk.probability_cap)
    }

    /// 风险仿真
    ///
    /// # 参数
    /// - allocations: 分配列表 (按排名)
    /// - rng: 注入的随机数发生器 (仅用于顺序派生子种子)
    ///
    /// # 返回
    /// RiskAnalysis;无分配或试验次数为 0 时返回零风险结果
    #[instrument(skip_all, fields(allocations = allocations.len(), trials = self.trials))]
    pub fn simulate<R: Rng>(&self, allocations: &[Allocation], rng: &mut R) -> RiskAnalysis {
        if allocations.is_empty() || self.trials == 0 {
            debug!("无分配或试验次数为 0,返回零风险结果");
            return RiskAnalysis::zero(self.trials);
        }

        // 子种子顺序派生,保证并行结果与线程调度无关
        let seeds: Vec<u64> = allocations.iter().map(|_| rng.random::<u64>()).collect();

        let scenarios: Vec<RiskScenario> = allocations
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(allocation, seed)| self.simulate_one(allocation, *seed))
            .collect();

        let mitigations: Vec<Mitigation> = scenarios
            .iter()
            .filter(|s| s.failure_probability > self.risk.mitigation_threshold)
            .map(|s| Mitigation {
                unit_id: s.unit_id,
                mitigation: MITIGATION_ENHANCED_MONITORING.to_string(),
                priority: if s.impact_severity > HIGH_PRIORITY_IMPACT {
                    "high".to_string()
                } else {
                    "medium".to_string()
                },
                actions: vec![
                    ACTION_FREQUENT_INSPECTIONS.to_string(),
                    ACTION_REDUCED_LOAD.to_string(),
                ],
            })
            .collect();

        let overall_risk =
            scenarios.iter().map(|s| s.risk_score).sum::<f64>() / scenarios.len() as f64;

        debug!(
            overall_risk = overall_risk,
            mitigations = mitigations.len(),
            "风险仿真完成"
        );

        RiskAnalysis {
            overall_risk,
            risk_level: RiskLevel::from_score(overall_risk),
            scenarios,
            mitigations,
            trials: self.trials,
        }
    }

    fn simulate_one(&self, allocation: &Allocation, seed: u64) -> RiskScenario {
        let p = self.failure_probability(allocation.role, allocation.score);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let failures = (0..self.trials).filter(|_| rng.random_bool(p)).count();

        let impact = self.risk.impact_severity(allocation.role.duty_class());
        let risk_score = p * impact;

        RiskScenario {
            unit_id: allocation.unit_id,
            rank: allocation.rank,
            role: allocation.role,
            failure_probability: p,
            simulated_failure_rate: failures as f64 / self.trials as f64,
            impact_severity: impact,
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
        }
    }
}
