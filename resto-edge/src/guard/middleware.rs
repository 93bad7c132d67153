//! 守卫中间件
//!
//! 只处理页面导航：`/` 和 locale 前缀路径（`/en/*`, `/vi/*`）。
//! `/api/*`、`/health` 和静态资源直接放行。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use shared::Locale;

use super::{GuardDecision, GuardInput, evaluate};
use crate::core::AppState;
use crate::security_log;
use crate::utils::cookies;

/// 守卫中间件
///
/// # 重定向语言
///
/// locale cookie → 路径中的 locale → 配置的默认语言
///
/// 放行的 locale 路径会把路径语言写回 locale cookie，重定向响应不写。
pub async fn edge_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let path_locale = Locale::strip_prefix(&path).map(|(locale, _)| locale);
    if path != "/" && path_locale.is_none() {
        return next.run(req).await;
    }

    let access_token_param = req.uri().query().and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "accessToken")
            .map(|(_, value)| value.into_owned())
    });
    let cookie_locale = cookies::locale(&jar);
    let locale = cookie_locale
        .or(path_locale)
        .unwrap_or(state.config.default_locale);

    let input = GuardInput {
        path: &path,
        access_token: cookies::get(&jar, cookies::ACCESS_TOKEN),
        refresh_token: cookies::get(&jar, cookies::REFRESH_TOKEN),
        access_token_param: access_token_param.as_deref(),
        locale,
    };

    match evaluate(&input) {
        GuardDecision::Allow => {
            let response = next.run(req).await;
            match path_locale {
                Some(current) if cookie_locale != Some(current) => {
                    let jar = jar.add(cookies::locale_cookie(current, state.config.cookie_secure));
                    (jar, response).into_response()
                }
                _ => response,
            }
        }
        GuardDecision::Redirect { location, reason } => {
            security_log!(
                "INFO",
                "guard_redirect",
                path = path.as_str(),
                reason = reason.as_str(),
                location = location.as_str()
            );
            Redirect::temporary(&location).into_response()
        }
    }
}
