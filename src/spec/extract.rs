use std::sync::OnceLock;

use regex::Regex;

use super::error::SpecError;

/// The embedded block: `/*`, optional whitespace, the `@plugin` token, the
/// payload, then `@endplugin` and `*/`. The `(?s)` flag lets the payload span
/// lines, and the lazy capture stops the scan at the first block in the text.
const BLOCK_PATTERN: &str = r"(?s)/\*\s*@plugin\s*(.*?)\s*@endplugin\s*\*/";

fn block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BLOCK_PATTERN).expect("valid regex"))
}

/// Locate the first `@plugin` block in `text` and return the payload between
/// the markers, trimmed. Pure function of the input; the returned slice
/// borrows from `text`.
pub fn extract_block(text: &str) -> Result<&str, SpecError> {
    if text.is_empty() {
        return Err(SpecError::InvalidInput);
    }

    let payload = block_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or(SpecError::BlockNotFound)?;

    Ok(payload.as_str().trim())
}
