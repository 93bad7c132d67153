//! 核心模块 - 配置、状态、错误和服务器
//!
//! - [`Config`] - 服务器配置
//! - [`AppState`] - 共享状态
//! - [`Server`] - HTTP 服务器
//! - [`EdgeError`] - 错误类型

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{EdgeError, EdgeResult};
pub use server::Server;
pub use state::AppState;
