//! Body text to markup conversion.
//!
//! # Responsibility
//! - Define the converter boundary card bodies are rendered through.
//! - Post-process converter output so body headings nest under card titles.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::{Captures, Regex};

static TOP_HEADING_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(/?)h1(\s[^>]*)?>").expect("valid heading tag regex"));

/// Pure text-to-markup converter.
pub trait MarkupConverter {
    fn to_markup(&self, text: &str) -> String;
}

impl<F> MarkupConverter for F
where
    F: Fn(&str) -> String,
{
    fn to_markup(&self, text: &str) -> String {
        self(text)
    }
}

/// CommonMark converter backed by `pulldown-cmark`.
#[derive(Debug, Clone, Copy)]
pub struct CommonMarkConverter {
    options: Options,
}

impl CommonMarkConverter {
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
        }
    }

    /// Enables tables, strikethrough and task lists.
    pub fn with_extensions() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl Default for CommonMarkConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupConverter for CommonMarkConverter {
    fn to_markup(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, self.options);
        let mut output = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

/// Demotes top-level headings (`h1`) to `h2`; `h2`..`h6` pass through.
///
/// Applies to opening and closing tags alike so the markup stays balanced.
pub fn demote_headings(markup: &str) -> String {
    TOP_HEADING_TAG_RE
        .replace_all(markup, |caps: &Captures<'_>| {
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            format!("<{}h2{}>", &caps[1], attrs)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::{demote_headings, CommonMarkConverter, MarkupConverter};

    #[test]
    fn demotes_opening_and_closing_tags() {
        let demoted = demote_headings("<h1>Top</h1><H1 id=\"x\">Again</H1>");
        assert_eq!(demoted, "<h2>Top</h2><h2 id=\"x\">Again</h2>");
    }

    #[test]
    fn lower_heading_levels_pass_through() {
        assert_eq!(
            demote_headings("<h1>Top</h1><h2>Details</h2>"),
            "<h2>Top</h2><h2>Details</h2>"
        );
        let nested = "<h2 id=\"a\">A</h2><h3>B</h3><h6>C</h6>";
        assert_eq!(demote_headings(nested), nested);
    }

    #[test]
    fn leaves_non_heading_tags_alone() {
        let markup = "<header><hr><p>h1</p></header>";
        assert_eq!(demote_headings(markup), markup);
    }

    #[test]
    fn common_mark_renders_headings_and_paragraphs() {
        let markup = CommonMarkConverter::new().to_markup("# Title\n\nBody");
        assert!(markup.contains("<h1>Title</h1>"));
        assert!(markup.contains("<p>Body</p>"));
    }

    #[test]
    fn closures_act_as_converters() {
        let upper = |text: &str| text.to_uppercase();
        assert_eq!(upper.to_markup("abc"), "ABC");
    }
}
