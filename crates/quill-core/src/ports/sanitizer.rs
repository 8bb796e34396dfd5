/// HTML cleaning used before storing and listing posts.
pub trait HtmlSanitizer: Send + Sync {
    /// Reduce `html` to the post allow-list.
    fn sanitize_body(&self, html: &str) -> String;

    /// Strip every tag except `<p>`.
    fn paragraphs_only(&self, html: &str) -> String;
}
