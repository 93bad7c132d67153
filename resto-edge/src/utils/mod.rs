//! 工具模块 - 日志和 cookie

pub mod cookies;
pub mod logger;
