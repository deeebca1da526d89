use icu_locale::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

/// Select the plural category for `count` under the given locale's
/// cardinal rules.
///
/// A literal `count` of 0 always selects `Zero`, overriding the locale's
/// own classification of zero. Locales without a natural zero category can
/// still author a `#zero` entry; authors who want locale-pure behavior
/// simply omit it and the lookup cascades to `#other`.
///
/// Rule construction can fail for an unparseable locale; translation never
/// raises, so that degrades to `Other`.
pub fn select_category(locale_str: &str, count: i64) -> PluralCategory {
    if count == 0 {
        return PluralCategory::Zero;
    }
    cardinal_category(locale_str, count).unwrap_or(PluralCategory::Other)
}

fn cardinal_category(locale_str: &str, count: i64) -> Option<PluralCategory> {
    let locale: Locale = locale_str.parse().ok()?;
    let rules = PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into()).ok()?;
    Some(rules.category_for(count.unsigned_abs() as usize))
}

/// The `#<category>` key suffix for a plural category.
pub fn category_suffix(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}
