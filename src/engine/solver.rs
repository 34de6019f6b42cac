// ==========================================
// 车队投运计划系统 - 精确分配求解接口
// ==========================================
// 职责: 代价矩阵 + 硬约束 → 每车恰好一个角色
// 红线: 求解器不知道就绪度 / 策略,只看代价与约束
// ==========================================
//
// 实现者: DynamicProgrammingSolver (按计数状态的精确动态规划)
// 调用方: AllocationOptimizer,失败时走启发式兜底

mod dynamic;


pub use dynamic::DynamicProgrammingSolver;

use crate::domain::types::InductionRole;
use crate::engine::error::SolveError;
use std::fmt::Debug;
use std::time::Duration;

// ==========================================
// CostMatrix - 代价矩阵
// ==========================================
// 行: 车辆 (调用方决定顺序) / 列: InductionRole::index()
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: Vec<[f64; 3]>,
}

impl CostMatrix {
    /// 构造代价矩阵
    ///
    /// # 返回
    /// - Err(SolveError::InvalidInput): 存在非有限代价
    pub fn new(rows: Vec<[f64; 3]>) -> Result<Self, SolveError> {
        if let Some(row) = rows.iter().position(|r| r.iter().any(|c| !c.is_finite())) {
            return Err(SolveError::InvalidInput(format!("第 {} 行存在非有限代价", row)));
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cost(&self, row: usize, role: InductionRole) -> f64 {
        self.rows[row][role.index()]
    }

    /// 给定分配方案的总代价
    pub fn total_cost(&self, roles: &[InductionRole]) -> f64 {
        roles
            .iter()
            .enumerate()
            .map(|(row, role)| self.cost(row, *role))
            .sum()
    }
}

// ==========================================
// AssignmentConstraints - 硬约束
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentConstraints {
    pub min_service: usize,
    pub max_service: usize,
    pub min_standby: usize,
    pub max_standby: usize,
    pub max_maintenance: usize,

    /// 广告优先车 (每行一个标记,长度须与代价矩阵一致)
    pub branding: Vec<bool>,
    /// 进入运营的广告优先车下限
    pub min_branding_in_service: usize,

    // ===== 求解预算 =====
    pub time_limit: Duration,
    pub max_states: usize,
}

impl AssignmentConstraints {
    pub(crate) fn check(&self, rows: usize) -> Result<(), SolveError> {
        if self.min_service > self.max_service || self.min_standby > self.max_standby {
            return Err(SolveError::InvalidInput("角色数量下限大于上限".to_string()));
        }
        if self.branding.len() != rows {
            return Err(SolveError::InvalidInput(format!(
                "广告标记长度 {} 与车辆数 {} 不一致",
                self.branding.len(),
                rows
            )));
        }
        Ok(())
    }
}

// ==========================================
// Assignment - 求解结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// 与代价矩阵行一一对应
    pub roles: Vec<InductionRole>,
    pub total_cost: f64,
    pub elapsed: Duration,
}

impl Assignment {
    pub fn count(&self, role: InductionRole) -> usize {
        self.roles.iter().filter(|r| **r == role).count()
    }
}

// ==========================================
// AssignmentSolver Trait
// ==========================================
pub trait AssignmentSolver: Send + Sync + Debug {
    /// 求解器名称 (写入日志与计划元数据)
    fn name(&self) -> &'static str;

    /// 精确求解
    ///
    /// # 返回
    /// - Ok(Assignment): 最优分配
    /// - Err(SolveError): 不可行 / 超时 / 状态空间过大 / 输入无效
    fn solve(
        &self,
        costs: &CostMatrix,
        constraints: &AssignmentConstraints,
    ) -> Result<Assignment, SolveError>;
}
