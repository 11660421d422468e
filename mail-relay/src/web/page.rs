//! The send form page.

use askama::Template;

/// Form page, with the outcome of the last submission if any.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub message: Option<&'a str>,
}

/// Render the form page. The message is HTML-escaped by the template.
pub fn render(message: Option<&str>) -> Result<String, askama::Error> {
    IndexPage { message }.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_message() {
        let html = render(None).unwrap();
        assert!(html.contains("<form method=\"post\""));
        assert!(!html.contains("class=\"message\""));
    }

    #[test]
    fn test_render_escapes_message() {
        let html = render(Some("<script>alert('x')</script> & more")).unwrap();
        assert!(html.contains("class=\"message\""));
        assert!(html.contains("&lt;script&gt;alert("));
        assert!(html.contains("&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("alert('x')"));
    }
}
