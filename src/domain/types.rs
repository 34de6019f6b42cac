// ==========================================
// 车队投运计划系统 - 领域类型定义
// ==========================================
// 职责: 就绪状态 / 优先级 / 投运角色 / 值乘类别 / 风险等级
// 序列化格式: snake_case (与外部协作方约定一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 就绪状态 (Readiness Status)
// ==========================================
// 由就绪度分数按固定阈值推导
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Available,         // 可用
    Restricted,        // 受限可用
    MaintenanceNeeded, // 需检修
    Unavailable,       // 不可用
}

impl ReadinessStatus {
    /// 是否可进入候选池 (可用 + 受限)
    pub fn is_assignable(&self) -> bool {
        matches!(self, ReadinessStatus::Available | ReadinessStatus::Restricted)
    }
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessStatus::Available => write!(f, "available"),
            ReadinessStatus::Restricted => write!(f, "restricted"),
            ReadinessStatus::MaintenanceNeeded => write!(f, "maintenance_needed"),
            ReadinessStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}

// ==========================================
// 优先级 (Priority Level)
// ==========================================
// 数值越大优先级越高
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Minimal = 1,
    Low = 2,
    Medium = 3,
    High = 4,
    Critical = 5,
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityLevel::Minimal => write!(f, "minimal"),
            PriorityLevel::Low => write!(f, "low"),
            PriorityLevel::Medium => write!(f, "medium"),
            PriorityLevel::High => write!(f, "high"),
            PriorityLevel::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 投运角色 (Induction Role)
// ==========================================
// 每辆车每次计划只能属于一个角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InductionRole {
    Service,     // 正线运营
    Standby,     // 热备
    Maintenance, // 检修
}

impl InductionRole {
    /// 全部角色 (求解器列顺序)
    pub const ALL: [InductionRole; 3] = [
        InductionRole::Service,
        InductionRole::Standby,
        InductionRole::Maintenance,
    ];

    /// 角色在代价矩阵中的列下标
    pub fn index(&self) -> usize {
        match self {
            InductionRole::Service => 0,
            InductionRole::Standby => 1,
            InductionRole::Maintenance => 2,
        }
    }

    /// 角色对应的值乘类别
    pub fn duty_class(&self) -> DutyClass {
        match self {
            InductionRole::Service => DutyClass::Primary,
            InductionRole::Standby => DutyClass::Secondary,
            InductionRole::Maintenance => DutyClass::Backup,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InductionRole::Service => "service",
            InductionRole::Standby => "standby",
            InductionRole::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for InductionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 值乘类别 (Duty Class)
// ==========================================
// 决定计划时长与故障影响严重度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyClass {
    Primary,   // 主力
    Secondary, // 次要
    Backup,    // 后备
}

impl fmt::Display for DutyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DutyClass::Primary => write!(f, "primary"),
            DutyClass::Secondary => write!(f, "secondary"),
            DutyClass::Backup => write!(f, "backup"),
        }
    }
}

// ==========================================
// 风险等级 (Risk Level)
// ==========================================
// 由 故障概率 × 影响严重度 分级:
// <0.2 低 / <0.5 中 / <0.8 高 / 其余 严重
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// 按风险分数分级 (纯函数)
    pub fn from_score(risk_score: f64) -> Self {
        if risk_score < 0.2 {
            RiskLevel::Low
        } else if risk_score < 0.5 {
            RiskLevel::Medium
        } else if risk_score < 0.8 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}
