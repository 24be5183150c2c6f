//! HTTP handlers for all web routes.

pub mod data;
pub mod predict;

/// Navigation HTML template shared across all pages.
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");

/// Minimal HTML escaping for values echoed back into pages.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>"a" & b</script>"#),
            "&lt;script&gt;&quot;a&quot; &amp; b&lt;/script&gt;"
        );
    }
}
