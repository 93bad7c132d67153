use shared::Locale;

/// 边缘服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | BACKEND_API_URL | http://localhost:4000 | 后端 API 地址 |
/// | DEFAULT_LOCALE | en | 无 locale cookie 时使用的语言 |
/// | STATIC_DIR | (无) | 前端构建产物目录 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录，设置后按天滚动写文件 |
/// | COOKIE_SECURE | 生产环境为 true | 凭证 cookie 是否带 `Secure` |
/// | REQUEST_TIMEOUT_SECS | 10 | 转发到后端的请求超时(秒) |
///
/// # 示例
///
/// ```ignore
/// BACKEND_API_URL=http://api.internal:4000 STATIC_DIR=./dist cargo run -p resto-edge
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP 服务端口
    pub http_port: u16,
    /// 后端 API 地址
    pub backend_api_url: String,
    pub default_locale: Locale,
    /// 前端静态文件目录；未设置时不提供页面
    pub static_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub cookie_secure: bool,
    pub request_timeout_secs: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            backend_api_url: std::env::var("BACKEND_API_URL")
                .unwrap_or_else(|_| "http://localhost:4000".into()),
            default_locale: std::env::var("DEFAULT_LOCALE")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or_default(),
            static_dir: std::env::var("STATIC_DIR").ok().filter(|d| !d.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(is_production),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            environment,
        }
    }
}
