//! Resto Edge - 餐厅管理前端的边缘服务器
//!
//! # 架构概述
//!
//! 浏览器与后端 API 之间的一层：
//!
//! - **守卫** (`guard`): 页面渲染前按路径、角色和 cookie 中的凭证做导航拦截
//! - **认证代理** (`routes::auth`): 登录 / 登出 / 刷新请求转发到后端，并把凭证镜像到 cookie
//! - **静态资源** : 前端构建产物，未命中时回退到 `index.html`
//!
//! # 模块结构
//!
//! ```text
//! resto-edge/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── guard/         # 导航守卫（纯函数 + axum 中间件）
//! ├── routes/        # HTTP 路由
//! └── utils/         # 日志、cookie
//! ```

pub mod core;
pub mod guard;
pub mod routes;
pub mod utils;

pub use core::{AppState, Config, EdgeError, EdgeResult, Server};
pub use guard::{GuardDecision, GuardInput, RedirectReason, edge_guard, evaluate};
pub use routes::build_router;

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 .env、读取配置并初始化日志
pub fn setup_environment() -> Config {
    // .env 不存在时直接使用进程环境变量
    let _ = dotenv::dotenv();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
