/// Error types for locale configuration, loading and server-side resolution.
///
/// Missing translations are deliberately absent from this taxonomy: an
/// unresolved key or plural form degrades to the literal key and never
/// surfaces as an error. A redirect is likewise not an error, it is an
/// ordinary [`crate::resolve::Resolution`] variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// Invalid configuration detected at setup time
    Config(String),
    /// A load was requested for a locale with no registered loader
    UnknownLocale(String),
    /// A locale loader failed
    Load { locale: String, message: String },
    /// Server translation requested before locale resolution set the cookie
    MissingLocaleCookie { operation: &'static str },
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            I18nError::Config(msg) => write!(f, "Configuration error: {}", msg),
            I18nError::UnknownLocale(locale) => {
                write!(f, "No loader registered for locale '{}'", locale)
            }
            I18nError::Load { locale, message } => {
                write!(f, "Failed to load locale '{}': {}", locale, message)
            }
            I18nError::MissingLocaleCookie { operation } => write!(
                f,
                "Locale cookie not found. Make sure locale resolution ran before calling {}",
                operation
            ),
        }
    }
}

impl std::error::Error for I18nError {}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
