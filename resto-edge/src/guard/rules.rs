//! 守卫规则
//!
//! 路径分类（去掉 locale 前缀后按路径段匹配）：
//!
//! | 分类 | 路径 |
//! |------|------|
//! | private | `/manage/*`, `/guest/*` |
//! | unauth-only | `/login` |
//! | owner-only | `/manage/accounts/*` |
//!
//! 依次判断：
//! 1. private 且无 refresh token → 登录页 (`clearTokens=true`)
//! 2. 有 refresh token 且访问登录页 → 首页，除非带 `accessToken` 查询参数
//! 3. 有 refresh token、private 且无 access token → 刷新页
//! 4. 有 refresh token、private 且角色不符 → 首页
//!
//! 无法解码的 refresh token 视为不存在。

use shared::{Locale, Role, decode_unverified};

/// Everything the guard looks at for one navigation
#[derive(Debug, Clone, Copy)]
pub struct GuardInput<'a> {
    /// Request path, e.g. `/en/manage/orders`
    pub path: &'a str,
    pub access_token: Option<&'a str>,
    pub refresh_token: Option<&'a str>,
    /// `accessToken` query parameter
    pub access_token_param: Option<&'a str>,
    /// Locale used to build redirect targets
    pub locale: Locale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// `/` → `/{locale}`
    LocaleRoot,
    NotLoggedIn,
    AlreadyLoggedIn,
    AccessTokenMissing,
    RoleMismatch,
}

impl RedirectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocaleRoot => "locale_root",
            Self::NotLoggedIn => "not_logged_in",
            Self::AlreadyLoggedIn => "already_logged_in",
            Self::AccessTokenMissing => "access_token_missing",
            Self::RoleMismatch => "role_mismatch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect {
        location: String,
        reason: RedirectReason,
    },
}

impl GuardDecision {
    fn redirect(location: String, reason: RedirectReason) -> Self {
        Self::Redirect { location, reason }
    }
}

/// Path classification after stripping the locale prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathClass {
    pub manage: bool,
    pub guest: bool,
    pub owner_only: bool,
    pub login: bool,
}

impl PathClass {
    /// Only locale-prefixed paths are classified
    pub fn of(path: &str) -> Self {
        let Some((_, rest)) = Locale::strip_prefix(path) else {
            return Self::default();
        };
        Self {
            manage: has_segment_prefix(rest, "/manage"),
            guest: has_segment_prefix(rest, "/guest"),
            owner_only: has_segment_prefix(rest, "/manage/accounts"),
            login: has_segment_prefix(rest, "/login"),
        }
    }

    pub fn is_private(&self) -> bool {
        self.manage || self.guest
    }
}

/// `/manage` matches `/manage` and `/manage/x`, not `/managers`
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn evaluate(input: &GuardInput<'_>) -> GuardDecision {
    let locale = input.locale;

    if input.path == "/" {
        return GuardDecision::redirect(format!("/{}", locale), RedirectReason::LocaleRoot);
    }

    let class = PathClass::of(input.path);
    let refresh = input
        .refresh_token
        .filter(|t| !t.is_empty())
        .and_then(|t| decode_unverified(t).ok().map(|payload| (t, payload)));

    // 1. 未登录访问私有页面
    let Some((refresh_token, payload)) = refresh else {
        if class.is_private() {
            return GuardDecision::redirect(
                format!("/{}/login?clearTokens=true", locale),
                RedirectReason::NotLoggedIn,
            );
        }
        return GuardDecision::Allow;
    };

    // 2. 已登录访问登录页
    if class.login {
        if input.access_token_param.is_some_and(|t| !t.is_empty()) {
            return GuardDecision::Allow;
        }
        return GuardDecision::redirect(format!("/{}", locale), RedirectReason::AlreadyLoggedIn);
    }

    if !class.is_private() {
        return GuardDecision::Allow;
    }

    // 3. access token 过期（cookie 已失效）
    if input.access_token.is_none_or(str::is_empty) {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("refreshToken", refresh_token)
            .append_pair("redirect", input.path)
            .finish();
        return GuardDecision::redirect(
            format!("/{}/refresh-token?{}", locale, query),
            RedirectReason::AccessTokenMissing,
        );
    }

    // 4. 角色与路径不符
    let role = payload.role;
    let guest_on_manage = !role.is_staff() && class.manage;
    let staff_on_guest = role.is_staff() && class.guest;
    let non_owner_on_owner = role != Role::Owner && class.owner_only;
    if guest_on_manage || staff_on_guest || non_owner_on_owner {
        return GuardDecision::redirect(format!("/{}", locale), RedirectReason::RoleMismatch);
    }

    GuardDecision::Allow
}
