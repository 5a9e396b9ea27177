/// Set the active locale for user-visible strings.
///
/// Unknown locales fall through to the `en` fallback configured at the
/// crate root.
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}
