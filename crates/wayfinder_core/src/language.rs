//! Language code to English name mapping for prompt directives.

/// ISO language codes the prompt builder knows how to name.
///
/// Unmapped codes pass through as their raw code rather than failing, so a
/// site configured with an unusual language still generates content.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("nl", "Dutch"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("tr", "Turkish"),
    ("pl", "Polish"),
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
    ("fi", "Finnish"),
];

/// Returns the full English name for a language code.
///
/// Falls back to the raw code when the code is not in the table.
///
/// # Examples
///
/// ```
/// use wayfinder_core::language_name;
///
/// assert_eq!(language_name("es"), "Spanish");
/// assert_eq!(language_name("xx"), "xx");
/// ```
pub fn language_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}
