// ==========================================
// 车队投运计划系统 - 模型参数
// ==========================================
// 职责: 评分权重 / 衰减模型 / 风险模型 / 值乘时长 等不可变参数
// 红线: 构造引擎时显式传入,引擎内部不读全局常量
// ==========================================

use crate::domain::types::DutyClass;
use serde::{Deserialize, Serialize};

// ==========================================
// ReadinessWeights - 就绪度子分数权重
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessWeights {
    pub status: f64,
    pub fitness: f64,
    pub maintenance: f64,
    pub mileage: f64,
    pub age: f64,
    pub reliability: f64,
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        Self {
            status: 0.25,
            fitness: 0.20,
            maintenance: 0.20,
            mileage: 0.15,
            age: 0.10,
            reliability: 0.10,
        }
    }
}

impl ReadinessWeights {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.status,
            self.fitness,
            self.maintenance,
            self.mileage,
            self.age,
            self.reliability,
        ]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

// ==========================================
// ReadinessParams - 就绪度评估参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessParams {
    pub weights: ReadinessWeights,

    // ===== 适用证书 =====
    pub expected_departments: u32,   // 应具备证书的部门数
    pub fitness_coverage_scale: f64, // 覆盖率放大系数
    pub no_certificate_score: f64,   // 无证书时的子分数

    // ===== 检修 (Weibull 生存函数) =====
    pub maintenance_scale_days: f64,
    pub maintenance_shape: f64,
    pub maintenance_floor: f64,

    // ===== 走行 (Weibull 衰减) =====
    pub mileage_lifecycle_limit: f64,
    pub mileage_scale: f64,
    pub mileage_shape: f64,

    // ===== 车龄 (Logistic 衰减) =====
    pub lifecycle_years: f64,
    pub age_smoothing: f64,

    // ===== 缺省值 =====
    pub neutral_score: f64,       // 数据缺失时的中性子分数
    pub neutral_reliability: f64, // 无历史数据时的可靠性子分数

    // ===== 扣分 / 加分上限 =====
    pub penalty_cap: f64,
    pub bonus_cap: f64,

    // ===== 能力阈值 =====
    pub high_capacity_threshold: u32,
    pub high_speed_threshold: f64,

    // ===== 广告优先 =====
    pub branding_priority_threshold: f64,

    pub base_uptime_hours: f64,
}

impl Default for ReadinessParams {
    fn default() -> Self {
        Self {
            weights: ReadinessWeights::default(),
            expected_departments: 5,
            fitness_coverage_scale: 1.5,
            no_certificate_score: 0.3,
            maintenance_scale_days: 45.0,
            maintenance_shape: 2.0,
            maintenance_floor: 0.1,
            mileage_lifecycle_limit: 1_000_000.0,
            mileage_scale: 0.8,
            mileage_shape: 3.0,
            lifecycle_years: 30.0,
            age_smoothing: 5.0,
            neutral_score: 0.5,
            neutral_reliability: 0.6,
            penalty_cap: 0.5,
            bonus_cap: 0.2,
            high_capacity_threshold: 200,
            high_speed_threshold: 80.0,
            branding_priority_threshold: 0.7,
            base_uptime_hours: 8.0,
        }
    }
}

// ==========================================
// RiskParams - 风险仿真参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParams {
    pub base_failure_rate_per_hour: f64,
    pub probability_cap: f64,
    pub mitigation_threshold: f64, // 故障概率超过该值时生成缓解建议
    pub primary_impact: f64,
    pub secondary_impact: f64,
    pub backup_impact: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            base_failure_rate_per_hour: 0.01,
            probability_cap: 0.99,
            mitigation_threshold: 0.3,
            primary_impact: 0.9,
            secondary_impact: 0.6,
            backup_impact: 0.3,
        }
    }
}

impl RiskParams {
    /// 按值乘类别取影响严重度
    pub fn impact_severity(&self, duty: DutyClass) -> f64 {
        match duty {
            DutyClass::Primary => self.primary_impact,
            DutyClass::Secondary => self.secondary_impact,
            DutyClass::Backup => self.backup_impact,
        }
    }
}

// ==========================================
// DutyParams - 值乘时长与成本模型
// ==========================================
// 风险仿真与排班共用同一时长模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DutyParams {
    pub base_duration_hours: f64,
    pub cost_per_hour: f64,
    pub slot_stagger_hours: f64, // 相邻时段起点间隔
}

impl Default for DutyParams {
    fn default() -> Self {
        Self {
            base_duration_hours: 6.0,
            cost_per_hour: 150.0,
            slot_stagger_hours: 2.0,
        }
    }
}

impl DutyParams {
    /// 计划值乘时长 (小时)
    ///
    /// - primary: 基准 × (0.8 + 0.4s)
    /// - secondary: 基准 × (0.6 + 0.3s)
    /// - backup: 基准 × (0.4 + 0.2s)
    pub fn planned_hours(&self, duty: DutyClass, readiness_score: f64) -> f64 {
        let s = readiness_score.clamp(0.0, 1.0);
        let multiplier = match duty {
            DutyClass::Primary => 0.8 + s * 0.4,
            DutyClass::Secondary => 0.6 + s * 0.3,
            DutyClass::Backup => 0.4 + s * 0.2,
        };
        self.base_duration_hours * multiplier
    }

    /// 运营成本估算
    pub fn operational_cost(&self, hours: f64, readiness_score: f64) -> f64 {
        let efficiency_factor = 0.8 + readiness_score.clamp(0.0, 1.0) * 0.4;
        self.cost_per_hour * hours * efficiency_factor
    }
}
