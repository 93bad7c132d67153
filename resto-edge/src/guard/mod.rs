//! 导航守卫
//!
//! 页面渲染前的请求级拦截。只解码 refresh token 的载荷（不验签）：
//! 守卫只负责避免无意义的导航，真正的鉴权在后端每次 API 调用时完成。
//!
//! - [`evaluate`]: 纯函数状态机
//! - [`edge_guard`]: 从 cookie / 查询参数组装输入的 axum 中间件

mod middleware;
mod rules;

pub use middleware::edge_guard;
pub use rules::{GuardDecision, GuardInput, PathClass, RedirectReason, evaluate};
