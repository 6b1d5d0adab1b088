// Language detection from file extension.

use std::path::Path;

use slate_core::LanguageId;

/// Map a file path to a language by extension, case-insensitively.
/// Missing or unknown extensions are simply not highlighted.
pub fn detect_language(path: &str) -> Option<LanguageId> {
    if path.is_empty() {
        return None;
    }
    let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "py" | "pyw" => Some(LanguageId::Python),
        "js" | "mjs" | "cjs" | "jsx" => Some(LanguageId::Javascript),
        "html" | "htm" => Some(LanguageId::Html),
        "css" => Some(LanguageId::Css),
        _ => None,
    }
}
