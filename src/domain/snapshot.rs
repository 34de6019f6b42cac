// ==========================================
// 车队投运计划系统 - 车队快照
// ==========================================
// 职责: 单次计划运行的只读输入
// 来源: 外部协作层 (登记库 / 证书库 / 广告合同库 / 运营统计)
// ==========================================

use crate::domain::unit::{BrandingContract, FitnessCertificate, PerformanceHistory, Unit, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// FleetSnapshot - 车队快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub units: Vec<Unit>,

    #[serde(default)]
    pub fitness_certificates: HashMap<UnitId, Vec<FitnessCertificate>>,

    #[serde(default)]
    pub branding_contracts: HashMap<UnitId, Vec<BrandingContract>>,

    /// 历史表现 (可选数据源,未接入时为空)
    #[serde(default)]
    pub performance_history: HashMap<UnitId, PerformanceHistory>,
}

impl FleetSnapshot {
    pub fn new(units: Vec<Unit>) -> Self {
        Self {
            units,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn certificates_for(&self, unit_id: UnitId) -> &[FitnessCertificate] {
        self.fitness_certificates
            .get(&unit_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contracts_for(&self, unit_id: UnitId) -> &[BrandingContract] {
        self.branding_contracts
            .get(&unit_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn history_for(&self, unit_id: UnitId) -> Option<PerformanceHistory> {
        self.performance_history.get(&unit_id).copied()
    }
}
