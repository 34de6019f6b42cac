// ==========================================
// 车队投运计划系统 - 车队统计
// ==========================================
// 职责: 车队级归一化统计 (走行 / 检修间隔)
// 输入: 车队快照 + 计划日期
// 输出: FleetStatistics (评分阶段只读共享)
// ==========================================

use crate::domain::unit::Unit;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// FleetStatistics - 车队统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetStatistics {
    pub unit_count: usize,

    // ===== 走行 (仅统计有数据的车辆) =====
    pub mileage_samples: usize,
    pub mean_mileage: Option<f64>,
    pub std_mileage: Option<f64>, // 总体标准差
    pub min_mileage: Option<f64>,
    pub max_mileage: Option<f64>,

    /// 平均距上次检修天数
    pub mean_days_since_maintenance: Option<f64>,
}

impl FleetStatistics {
    /// 计算车队统计
    pub fn compute(units: &[Unit], plan_date: NaiveDate) -> Self {
        let mileages: Vec<f64> = units
            .iter()
            .filter_map(|u| u.mileage)
            .filter(|m| m.is_finite() && *m >= 0.0)
            .collect();

        let days: Vec<f64> = units
            .iter()
            .filter_map(|u| u.last_maintenance_date)
            .map(|d| (plan_date - d).num_days().max(0) as f64)
            .collect();

        let mean_mileage = mean(&mileages);
        let std_mileage = mean_mileage.map(|mu| {
            let var = mileages.iter().map(|m| (m - mu).powi(2)).sum::<f64>() / mileages.len() as f64;
            var.sqrt()
        });

        Self {
            unit_count: units.len(),
            mileage_samples: mileages.len(),
            mean_mileage,
            std_mileage,
            min_mileage: mileages.iter().copied().reduce(f64::min),
            max_mileage: mileages.iter().copied().reduce(f64::max),
            mean_days_since_maintenance: mean(&days),
        }
    }

    /// 走行 z-score (标准差为 0 或无数据时为 None)
    pub fn mileage_z_score(&self, mileage: f64) -> Option<f64> {
        match (self.mean_mileage, self.std_mileage) {
            (Some(mu), Some(sigma)) if sigma > 0.0 => Some((mileage - mu) / sigma),
            _ => None,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
