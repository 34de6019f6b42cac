use super::{Assignment, AssignmentConstraints, AssignmentSolver, CostMatrix};
use crate::domain::types::InductionRole;
use crate::engine::error::SolveError;
use std::time::Instant;
use tracing::debug;

const UNREACHED: u32 = u32::MAX;

// ==========================================
// DynamicProgrammingSolver - 计数状态动态规划
// ==========================================
// 状态: (运营数, 热备数, 运营中广告车数 [封顶于下限])
// 检修数由 已处理车辆数 - 运营数 - 热备数 推出
// 逐车转移,每层记录前驱状态用于回溯
#[derive(Debug, Clone, Default)]
pub struct DynamicProgrammingSolver;

impl DynamicProgrammingSolver {
    pub fn new() -> Self {
        Self
    }
}

/// 状态编码
#[derive(Debug, Clone, Copy)]
struct StateSpace {
    standby_dim: usize,
    branding_dim: usize,
    size: usize,
}

impl StateSpace {
    fn new(max_service: usize, max_standby: usize, branding_cap: usize) -> Option<Self> {
        let standby_dim = max_standby + 1;
        let branding_dim = branding_cap + 1;
        let size = (max_service + 1)
            .checked_mul(standby_dim)?
            .checked_mul(branding_dim)?;
        Some(Self {
            standby_dim,
            branding_dim,
            size,
        })
    }

    fn index(&self, service: usize, standby: usize, branding: usize) -> usize {
        (service * self.standby_dim + standby) * self.branding_dim + branding
    }

    fn decode(&self, index: usize) -> (usize, usize, usize) {
        let branding = index % self.branding_dim;
        let rest = index / self.branding_dim;
        (rest / self.standby_dim, rest % self.standby_dim, branding)
    }
}

impl AssignmentSolver for DynamicProgrammingSolver {
    fn name(&self) -> &'static str {
        "dynamic_programming"
    }

    fn solve(
        &self,
        costs: &CostMatrix,
        constraints: &AssignmentConstraints,
    ) -> Result<Assignment, SolveError> {
        let started = Instant::now();
        let n = costs.len();
        constraints.check(n)?;
        let c = constraints;

        // ===== 快速可行性判断 =====
        let branding_total = c.branding.iter().filter(|b| **b).count();
        let k = c.min_branding_in_service;
        if n < c.min_service + c.min_standby {
            return Err(SolveError::Infeasible(format!(
                "车辆数 {} 小于运营与热备下限之和 {}",
                n,
                c.min_service + c.min_standby
            )));
        }
        if n > c.max_service + c.max_standby + c.max_maintenance {
            return Err(SolveError::Infeasible(format!(
                "车辆数 {} 超出三类角色上限之和 {}",
                n,
                c.max_service + c.max_standby + c.max_maintenance
            )));
        }
        if k > branding_total || k > c.max_service {
            return Err(SolveError::Infeasible(format!(
                "广告车运营下限 {} 无法满足 (广告车 {}, 运营上限 {})",
                k, branding_total, c.max_service
            )));
        }

        // 超出车辆数的上限不产生额外状态
        let max_service = c.max_service.min(n);
        let max_standby = c.max_standby.min(n);
        let space = StateSpace::new(max_service, max_standby, k).ok_or(
            SolveError::StateSpaceTooLarge {
                states: usize::MAX,
                max_states: c.max_states,
            },
        )?;
        let total_states = space.size.saturating_mul(n.max(1));
        if total_states > c.max_states || space.size > UNREACHED as usize {
            return Err(SolveError::StateSpaceTooLarge {
                states: total_states,
                max_states: c.max_states,
            });
        }

        debug!(units = n, states = space.size, branding_cap = k, "动态规划求解开始");

        // ===== 前向转移 =====
        let mut current = vec![f64::INFINITY; space.size];
        current[space.index(0, 0, 0)] = 0.0;
        let mut predecessors: Vec<Vec<u32>> = Vec::with_capacity(n);

        for row in 0..n {
            if started.elapsed() >= c.time_limit {
                return Err(SolveError::Timeout { limit: c.time_limit });
            }

            let mut next = vec![f64::INFINITY; space.size];
            let mut pred = vec![UNREACHED; space.size];
            let is_branding = c.branding[row];

            for (index, &value) in current.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let (s, t, b) = space.decode(index);
                let m = row - s - t;

                let mut relax = |target: usize, cost: f64| {
                    let candidate = value + cost;
                    if candidate < next[target] {
                        next[target] = candidate;
                        pred[target] = index as u32;
                    }
                };

                if s < max_service {
                    let nb = if is_branding { (b + 1).min(k) } else { b };
                    relax(
                        space.index(s + 1, t, nb),
                        costs.cost(row, InductionRole::Service),
                    );
                }
                if t < max_standby {
                    relax(
                        space.index(s, t + 1, b),
                        costs.cost(row, InductionRole::Standby),
                    );
                }
                if m < c.max_maintenance {
                    relax(index, costs.cost(row, InductionRole::Maintenance));
                }
            }

            predecessors.push(pred);
            current = next;
        }

        // ===== 终态选择 =====
        let mut best: Option<(usize, f64)> = None;
        for (index, &value) in current.iter().enumerate() {
            if !value.is_finite() {
                continue;
            }
            let (s, t, b) = space.decode(index);
            if s < c.min_service || t < c.min_standby || b < k {
                continue;
            }
            if best.map_or(true, |(_, v)| value < v) {
                best = Some((index, value));
            }
        }

        let (mut index, total_cost) = best.ok_or_else(|| {
            SolveError::Infeasible("不存在满足全部硬约束的分配".to_string())
        })?;

        // ===== 回溯 =====
        let mut roles = vec![InductionRole::Maintenance; n];
        for row in (0..n).rev() {
            let prev = predecessors[row][index];
            if prev == UNREACHED {
                return Err(SolveError::InvalidInput(format!("第 {} 行回溯失败", row)));
            }
            let prev = prev as usize;
            let (s, t, _) = space.decode(index);
            let (ps, pt, _) = space.decode(prev);
            roles[row] = if s == ps + 1 {
                InductionRole::Service
            } else if t == pt + 1 {
                InductionRole::Standby
            } else {
                InductionRole::Maintenance
            };
            index = prev;
        }

        let elapsed = started.elapsed();
        debug!(
            total_cost = total_cost,
            elapsed_ms = elapsed.as_millis() as u64,
            "动态规划求解完成"
        );

        Ok(Assignment {
            roles,
            total_cost,
            elapsed,
        })
    }
}
