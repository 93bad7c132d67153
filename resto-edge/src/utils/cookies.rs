//! 凭证 cookie
//!
//! 守卫在任何前端代码执行之前运行，只能从 cookie 读取凭证；
//! 认证代理路由负责写入和删除这些 cookie。

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::{CredentialPair, Locale, decode_unverified};
use time::{Duration, OffsetDateTime};

use crate::core::{EdgeError, EdgeResult};

pub const ACCESS_TOKEN: &str = "accessToken";
pub const REFRESH_TOKEN: &str = "refreshToken";
/// 语言偏好
pub const LOCALE: &str = "locale";
/// 语言偏好保留一年
const LOCALE_MAX_AGE: Duration = Duration::days(365);

/// Non-empty cookie value
pub fn get<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(|c| c.value()).filter(|v| !v.is_empty())
}

pub fn locale(jar: &CookieJar) -> Option<Locale> {
    get(jar, LOCALE).and_then(|v| v.parse().ok())
}

/// Locale preference cookie, readable by page scripts
pub fn locale_cookie(locale: Locale, secure: bool) -> Cookie<'static> {
    Cookie::build((LOCALE, locale.as_str()))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(LOCALE_MAX_AGE)
        .build()
}

/// Token cookie expiring together with the token itself
fn token_cookie(name: &'static str, token: &str, secure: bool) -> EdgeResult<Cookie<'static>> {
    let payload = decode_unverified(token)
        .map_err(|e| EdgeError::bad_request(format!("Invalid {}: {}", name, e)))?;
    let expires = OffsetDateTime::from_unix_timestamp(payload.exp)
        .map_err(|e| EdgeError::bad_request(format!("Invalid {} expiry: {}", name, e)))?;
    Ok(Cookie::build((name, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .expires(expires)
        .build())
}

/// Mirror both tokens into the jar
pub fn set_credentials(
    jar: CookieJar,
    pair: &CredentialPair,
    secure: bool,
) -> EdgeResult<CookieJar> {
    let access = token_cookie(ACCESS_TOKEN, &pair.access_token, secure)?;
    let refresh = token_cookie(REFRESH_TOKEN, &pair.refresh_token, secure)?;
    Ok(jar.add(access).add(refresh))
}

pub fn clear_credentials(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN).path("/"))
        .remove(Cookie::build(REFRESH_TOKEN).path("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use shared::{Role, TokenPayload, TokenType};

    fn token(token_type: TokenType, exp: i64) -> String {
        let payload = TokenPayload {
            user_id: 1,
            role: Role::Owner,
            token_type,
            exp,
            iat: exp - 600,
        };
        encode(&Header::default(), &payload, &EncodingKey::from_secret(b"k")).unwrap()
    }

    #[test]
    fn test_set_credentials_uses_token_expiry() {
        let pair = CredentialPair::new(
            token(TokenType::AccessToken, 1_900_000_000),
            token(TokenType::RefreshToken, 1_900_086_400),
        );
        let jar = set_credentials(CookieJar::new(), &pair, true).unwrap();

        let access = jar.get(ACCESS_TOKEN).unwrap();
        assert_eq!(access.value(), pair.access_token);
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(
            access.expires_datetime().map(|t| t.unix_timestamp()),
            Some(1_900_000_000)
        );
        assert_eq!(
            jar.get(REFRESH_TOKEN)
                .and_then(|c| c.expires_datetime())
                .map(|t| t.unix_timestamp()),
            Some(1_900_086_400)
        );
    }

    #[test]
    fn test_set_credentials_rejects_garbage() {
        let pair = CredentialPair::new("not-a-jwt", "also-not");
        assert!(matches!(
            set_credentials(CookieJar::new(), &pair, false),
            Err(EdgeError::BadRequest(_))
        ));
    }

    #[test]
    fn test_locale_cookie_is_script_readable() {
        let cookie = locale_cookie(Locale::Vi, false);
        assert_eq!(cookie.value(), "vi");
        assert_eq!(cookie.http_only(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(365)));
    }

    #[test]
    fn test_get_ignores_empty_values() {
        let jar = CookieJar::new()
            .add(Cookie::new(ACCESS_TOKEN, ""))
            .add(Cookie::new(LOCALE, "vi"));
        assert_eq!(get(&jar, ACCESS_TOKEN), None);
        assert_eq!(locale(&jar), Some(Locale::Vi));
    }
}
