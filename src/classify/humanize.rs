//! Display names derived from raw column names.

use inflector::Inflector;
use regex::Regex;
use std::sync::LazyLock;

static ID_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:[-_ ])id$").unwrap());

/// Human-facing display name for a table or column name.
///
/// `CATEGORY_ID` → `Category`, `created_at` → `Created At`, `id` → `ID`.
pub fn humanize(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    if lower == "id" {
        return "ID".to_string();
    }

    let stripped = ID_SUFFIX.replace(&lower, "");
    let title = stripped.to_title_case();
    if title.is_empty() {
        name.to_string()
    } else {
        title
    }
}
