// ==========================================
// 车队投运计划系统 - 配置层
// ==========================================
// 职责: 计划运行配置 + 模型参数,支持多级覆写
// 来源: 内置默认值 / TOML 文件 / key-value 覆写
// ==========================================

pub mod config_manager;
pub mod error;
pub mod model_params;
pub mod planning_config;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use model_params::{DutyParams, ReadinessParams, ReadinessWeights, RiskParams};
pub use planning_config::PlanningConfig;
