//! Presentation mapping for job status strings.
//!
//! The backend reports status as an open-ended string. Recognized values get
//! distinct styling; anything else falls back to a neutral default and is
//! rendered verbatim. This mapping is total and never fails.

/// Visual category for a job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Running,
    Completed,
    Failed,
    /// Any status string the client does not recognize.
    Other,
}

/// Map a raw status string to its visual category.
pub fn classify(status: &str) -> StatusKind {
    match status {
        "running" => StatusKind::Running,
        "completed" => StatusKind::Completed,
        "failed" => StatusKind::Failed,
        _ => StatusKind::Other,
    }
}

/// Status text as shown to the operator: first letter upper-cased.
///
/// Display only; the raw value is kept untouched everywhere else.
pub fn display_text(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shorten an id for table display: first 8 characters plus an ellipsis.
///
/// Lookups and requests always use the full id.
pub fn short_id(id: &str) -> String {
    let prefix: String = id.chars().take(8).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_statuses_map_to_distinct_kinds() {
        assert_eq!(classify("running"), StatusKind::Running);
        assert_eq!(classify("completed"), StatusKind::Completed);
        assert_eq!(classify("failed"), StatusKind::Failed);
    }

    #[test]
    fn unknown_status_falls_back_to_other() {
        assert_eq!(classify("queued"), StatusKind::Other);
        assert_eq!(classify(""), StatusKind::Other);
        assert_eq!(classify("RUNNING"), StatusKind::Other);
    }

    #[test]
    fn display_text_capitalizes_literal_value() {
        assert_eq!(display_text("queued"), "Queued");
        assert_eq!(display_text("running"), "Running");
        assert_eq!(display_text(""), "");
    }

    #[test]
    fn short_id_keeps_first_eight_chars_and_appends_ellipsis() {
        assert_eq!(short_id("3f2c1a9e-0000-4000"), "3f2c1a9e...");
        // Short ids still get the ellipsis, as the dashboard always renders it.
        assert_eq!(short_id("a1"), "a1...");
        assert_eq!(short_id("12345678"), "12345678...");
    }
}
