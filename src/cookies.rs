//! Cookie Reading
//!
//! The CSRF token lives in a same-origin cookie.

use percent_encoding::percent_decode_str;

/// Source of the raw `document.cookie` string
pub trait CookieSource {
    fn cookie_string(&self) -> String;
}

/// Value of cookie `name` in a `document.cookie`-style string.
///
/// Pairs are `;`-separated and trimmed; the first exact name match wins and
/// its value is percent-decoded.
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}
