// ==========================================
// 车队投运计划系统 - 配置管理器
// ==========================================
// 职责: 配置加载、覆写、校验
// 优先级: 内置默认值 < TOML 配置文件 < key-value 覆写
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::planning_config::PlanningConfig;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: PlanningConfig,
}

impl ConfigManager {
    /// 使用内置默认值创建
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 TOML 文本创建 (缺失项取默认值)
    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        let config: PlanningConfig = toml::from_str(raw)?;
        Ok(Self { config })
    }

    /// 从 TOML 配置文件创建
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), "加载配置文件");
        Self::from_toml_str(&raw)
    }

    /// 当前配置 (未校验)
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 覆写单个配置项
    ///
    /// # 参数
    /// - key: 配置键 (见 config_keys)
    /// - value: 字符串形式的值
    pub fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        let value = value.trim();
        let c = &mut self.config;

        match key {
            config_keys::PLAN_DATE => {
                c.plan_date = if value.is_empty() {
                    None
                } else {
                    Some(parse_value::<NaiveDate>(key, value)?)
                }
            }
            config_keys::MIN_SERVICE => c.min_service = parse_value(key, value)?,
            config_keys::MAX_SERVICE => c.max_service = parse_value(key, value)?,
            config_keys::MIN_STANDBY => c.min_standby = parse_value(key, value)?,
            config_keys::MAX_STANDBY => c.max_standby = parse_value(key, value)?,
            config_keys::MAX_MAINTENANCE => c.max_maintenance = parse_value(key, value)?,
            config_keys::TARGET_BRANDING_EXPOSURE => {
                c.target_branding_exposure = parse_value(key, value)?
            }
            config_keys::SERVICE_WEIGHT => c.service_weight = parse_value(key, value)?,
            config_keys::STANDBY_WEIGHT => c.standby_weight = parse_value(key, value)?,
            config_keys::MAINTENANCE_WEIGHT => c.maintenance_weight = parse_value(key, value)?,
            config_keys::STRATEGY => {
                c.strategy = value
                    .parse()
                    .map_err(|e: String| ConfigError::invalid(key, e))?
            }
            config_keys::SOLVER_TIME_LIMIT_MS => c.solver_time_limit_ms = parse_value(key, value)?,
            config_keys::MONTE_CARLO_TRIALS => c.monte_carlo_trials = parse_value(key, value)?,
            config_keys::RANDOM_SEED => c.random_seed = parse_value(key, value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }

        debug!(key = key, value = value, "配置项覆写");
        Ok(())
    }

    /// 批量覆写 (按键名排序后依次应用,保证错误信息稳定)
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> ConfigResult<()> {
        let mut keys: Vec<&String> = overrides.keys().collect();
        keys.sort();
        for key in keys {
            self.set(key, &overrides[key])?;
        }
        Ok(())
    }

    /// 获取配置快照（JSON格式）
    ///
    /// # 用途
    /// - 与计划结果一同交给存储协作方,保证结果可追溯
    pub fn config_snapshot_json(&self) -> ConfigResult<String> {
        serde_json::to_string(&self.config)
            .map_err(|e| ConfigError::invalid("snapshot", e.to_string()))
    }

    /// 校验并产出不可变配置
    pub fn build(self) -> ConfigResult<PlanningConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn parse_value<T>(key: &str, value: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::invalid(key, format!("无法解析 '{}': {}", value, e)))
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 计划日期
    pub const PLAN_DATE: &str = "plan_date";

    // 角色数量边界
    pub const MIN_SERVICE: &str = "min_service";
    pub const MAX_SERVICE: &str = "max_service";
    pub const MIN_STANDBY: &str = "min_standby";
    pub const MAX_STANDBY: &str = "max_standby";
    pub const MAX_MAINTENANCE: &str = "max_maintenance";

    // 广告曝光
    pub const TARGET_BRANDING_EXPOSURE: &str = "target_branding_exposure";

    // 目标函数权重
    pub const SERVICE_WEIGHT: &str = "service_weight";
    pub const STANDBY_WEIGHT: &str = "standby_weight";
    pub const MAINTENANCE_WEIGHT: &str = "maintenance_weight";

    // 求解
    pub const STRATEGY: &str = "strategy";
    pub const SOLVER_TIME_LIMIT_MS: &str = "solver_time_limit_ms";

    // 仿真
    pub const MONTE_CARLO_TRIALS: &str = "monte_carlo_trials";
    pub const RANDOM_SEED: &str = "random_seed";
}
