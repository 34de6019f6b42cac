use super::{REASON_HIGH_READINESS, REASON_MAINTENANCE, REASON_MINIMUM_SERVICE, REASON_STANDBY};
use crate::config::planning_config::PlanningConfig;
use crate::domain::readiness::ReadinessRecord;
use crate::domain::types::InductionRole;
use tracing::debug;

/// 超过该分数的车辆可在运营下限之外继续投入运营
const HIGH_READINESS_THRESHOLD: f64 = 0.6;

/// 启发式分配 (贪心)
///
/// 1) 按顺序填满运营下限
/// 2) 分数 > 0.6 的车辆继续填充运营至上限
/// 3) 填充热备至上限
/// 4) 其余全部检修 (可能超出检修上限,由校验报告)
///
/// # 参数
/// - ordered: 已按 score 降序 / unit_id 升序排列
///
/// # 返回
/// 与 ordered 一一对应的 (角色, 原因)
pub(super) fn assign(
    ordered: &[&ReadinessRecord],
    config: &PlanningConfig,
) -> Vec<(InductionRole, &'static str)> {
    let mut assigned: Vec<Option<(InductionRole, &'static str)>> = vec![None; ordered.len()];
    let mut service = 0usize;
    let mut standby = 0usize;

    // ===== 运营下限 =====
    for slot in assigned.iter_mut() {
        if service >= config.min_service {
            break;
        }
        *slot = Some((InductionRole::Service, REASON_MINIMUM_SERVICE));
        service += 1;
    }

    // ===== 高分车继续运营 =====
    for (slot, record) in assigned.iter_mut().zip(ordered) {
        if slot.is_some() {
            continue;
        }
        if service < config.max_service && record.score > HIGH_READINESS_THRESHOLD {
            *slot = Some((InductionRole::Service, REASON_HIGH_READINESS));
            service += 1;
        }
    }

    // ===== 热备 =====
    for slot in assigned.iter_mut() {
        if slot.is_some() {
            continue;
        }
        if standby < config.max_standby {
            *slot = Some((InductionRole::Standby, REASON_STANDBY));
            standby += 1;
        }
    }

    debug!(
        service = service,
        standby = standby,
        maintenance = ordered.len() - service - standby,
        "启发式分配完成"
    );

    // ===== 其余检修 =====
    assigned
        .into_iter()
        .map(|slot| slot.unwrap_or((InductionRole::Maintenance, REASON_MAINTENANCE)))
        .collect()
}
