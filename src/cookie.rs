/// Extract a cookie value from a `Cookie` request header.
pub fn get_cookie<'a>(header: Option<&'a str>, name: &str) -> Option<&'a str> {
    let header = header?;
    for pair in header.split(';') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key.trim() == name {
            return Some(value.trim());
        }
    }
    None
}

/// A `Set-Cookie` instruction produced by locale resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
}

impl SetCookie {
    pub fn new(name: &str, value: &str) -> Self {
        SetCookie {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }

    /// Render the full `Set-Cookie` header value. Release builds add
    /// `Secure`.
    pub fn header_value(&self) -> String {
        self.header_value_with_secure(!cfg!(debug_assertions))
    }

    fn header_value_with_secure(&self, secure: bool) -> String {
        let mut header = format!(
            "{}={}; Path=/; SameSite=Lax; HttpOnly",
            self.name, self.value
        );
        if secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// The pair of cookies recording a locale choice: `{param_name}` holds the
/// locale id and `full_{param_name}` the `locale-REGION` composite.
pub fn locale_cookies(locale: &str, region: &str, param_name: &str) -> (SetCookie, SetCookie) {
    (
        SetCookie::new(param_name, locale),
        SetCookie::new(
            &format!("full_{}", param_name),
            &crate::region::full_locale(locale, region),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cookie() {
        let header = Some("locale=en; full_locale=en-US; session=abc");
        assert_eq!(get_cookie(header, "locale"), Some("en"));
        assert_eq!(get_cookie(header, "full_locale"), Some("en-US"));
        assert_eq!(get_cookie(header, "session"), Some("abc"));
        assert_eq!(get_cookie(header, "missing"), None);
        assert_eq!(get_cookie(None, "locale"), None);
    }

    #[test]
    fn test_get_cookie_does_not_match_prefixes() {
        let header = Some("full_locale=en-US");
        assert_eq!(get_cookie(header, "locale"), None);
    }

    #[test]
    fn test_header_value_attributes() {
        let cookie = SetCookie::new("locale", "es");
        assert_eq!(
            cookie.header_value_with_secure(false),
            "locale=es; Path=/; SameSite=Lax; HttpOnly"
        );
        assert_eq!(
            cookie.header_value_with_secure(true),
            "locale=es; Path=/; SameSite=Lax; HttpOnly; Secure"
        );
    }

    #[test]
    fn test_locale_cookies() {
        let (locale, full) = locale_cookies("es", "AR", "locale");
        assert_eq!(locale, SetCookie::new("locale", "es"));
        assert_eq!(full, SetCookie::new("full_locale", "es-AR"));
    }
}
