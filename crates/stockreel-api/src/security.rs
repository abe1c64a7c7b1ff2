//! Input sanitization for request text.

/// Strip control characters, keeping line breaks and tabs.
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// Sanitize a single-line field such as a title.
pub fn sanitize_title(input: &str) -> String {
    input.trim().chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_string() {
        assert_eq!(
            sanitize_string("Line one.\nLine\u{0000} two.\t\u{001b}[31m"),
            "Line one.\nLine two.\t[31m"
        );
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("  Ocean\u{0007} Life \n"), "Ocean Life");
        assert_eq!(sanitize_title("   "), "");
    }
}
