// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod fleet_builder;

pub use fleet_builder::*;
