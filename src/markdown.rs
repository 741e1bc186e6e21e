//! Renders document bodies from markdown to HTML.

use pulldown_cmark::{html, Options, Parser};

/// Converts markdown to HTML, appending the result to `out`.
pub fn to_html(out: &mut String, markdown: &str) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    html::push_html(out, Parser::new_ext(markdown, options));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_html() {
        let mut out = String::new();
        to_html(&mut out, "# Heading\n\nState is a *contract*.");
        assert!(out.contains("<h1>Heading</h1>"));
        assert!(out.contains("<em>contract</em>"));
    }
}
