// ==========================================
// 车队投运计划系统 - 车辆领域模型
// ==========================================
// 职责: 车辆主数据 + 适用证书 + 广告合同 + 历史表现
// 红线: 本引擎只读快照,不修改车辆登记数据
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 车辆ID
pub type UnitId = u32;

// ==========================================
// Unit - 车辆
// ==========================================
// 除 unit_id / unit_number 外的字段均可缺失,缺失值的默认规则
// 统一在 adapter::UnitProfile 中解析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub unit_id: UnitId,      // 车辆ID
    pub unit_number: String,  // 外部车号

    // ===== 运用数据 =====
    #[serde(default)]
    pub mileage: Option<f64>,                   // 累计走行 (km)
    #[serde(default)]
    pub commissioning_date: Option<NaiveDate>,  // 投运日期
    #[serde(default)]
    pub last_maintenance_date: Option<NaiveDate>, // 上次检修日期
    #[serde(default)]
    pub maintenance_interval_days: Option<u32>, // 检修周期 (天)

    // ===== 状态 =====
    #[serde(default)]
    pub equipment_status: Option<String>,   // 设备状态
    #[serde(default)]
    pub operational_status: Option<String>, // 运营状态

    // ===== 性能参数 =====
    #[serde(default)]
    pub capacity: Option<u32>,   // 载客量
    #[serde(default)]
    pub max_speed: Option<f64>,  // 最高速度 (km/h)
    #[serde(default)]
    pub model: Option<String>,   // 车型
}

impl Unit {
    /// 仅含必填字段的车辆
    pub fn new(unit_id: UnitId, unit_number: impl Into<String>) -> Self {
        Self {
            unit_id,
            unit_number: unit_number.into(),
            mileage: None,
            commissioning_date: None,
            last_maintenance_date: None,
            maintenance_interval_days: None,
            equipment_status: None,
            operational_status: None,
            capacity: None,
            max_speed: None,
            model: None,
        }
    }
}

// ==========================================
// FitnessCertificate - 适用证书
// ==========================================
// 各部门签发,有效期内且 is_valid 才计入有效证书
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessCertificate {
    pub department: String,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_valid: bool,
}

impl FitnessCertificate {
    /// 判断证书在指定日期是否有效
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        if !self.is_valid {
            return false;
        }
        if matches!(self.valid_from, Some(from) if date < from) {
            return false;
        }
        if matches!(self.valid_until, Some(until) if date > until) {
            return false;
        }
        true
    }
}

fn default_true() -> bool {
    true
}

// ==========================================
// BrandingContract - 车身广告合同
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandingContract {
    pub exposure_hours_required: f64,  // 合同要求曝光时长
    pub exposure_hours_fulfilled: f64, // 已完成曝光时长
    #[serde(default)]
    pub contract_value: Option<f64>,   // 合同金额
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl BrandingContract {
    /// 判断合同在指定日期是否生效
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

// ==========================================
// PerformanceHistory - 历史表现
// ==========================================
// 三项指标均为 [0,1] 比率
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceHistory {
    pub on_time: f64,
    pub reliability: f64,
    pub availability: f64,
}
