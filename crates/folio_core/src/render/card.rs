//! Catalog cards: the per-entry display projection.
//!
//! # Responsibility
//! - Project visible entries into display cards.
//! - Resolve image files and derive card classes.
//! - Produce card markup for surfaces that consume HTML.
//!
//! # Invariants
//! - Card order equals the order of the input entries.
//! - Image paths follow `{image_base}/{slug}_{suffix}`.
//! - A card is marked interactive iff it has a link or at least one image.

use crate::model::entry::Entry;
use crate::render::markup::{demote_headings, MarkupConverter};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Class added to cards with a link or an image strip.
pub const INTERACTIVE_CLASS: &str = "-link";

/// One rendered catalog card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub year: String,
    /// Converted body markup with headings demoted.
    pub body: String,
    pub link: Option<String>,
    /// Resolved image paths, in authored order.
    pub images: Vec<String>,
    /// Tag tokens, then the interactive marker when applicable.
    pub classes: Vec<String>,
}

impl Card {
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn is_interactive(&self) -> bool {
        self.classes.iter().any(|class| class == INTERACTIVE_CLASS)
    }

    /// Card markup as an `<article>` element.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<article class=\"{}\" data-slug=\"{}\">",
            encode_double_quoted_attribute(&self.classes.join(" ")),
            encode_double_quoted_attribute(&self.slug)
        ));
        html.push_str(&format!(
            "<h2>{}</h2><h3>{}</h3><h4>{}</h4><div>{}</div>",
            encode_text(&self.title),
            encode_text(&self.subtitle),
            encode_text(&self.year),
            self.body
        ));
        if let Some(link) = &self.link {
            html.push_str(&format!(
                "<div class=\"project-links\"><a class=\"project-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\"></a></div>",
                encode_double_quoted_attribute(link)
            ));
        }
        if self.has_images() {
            html.push_str("<div class=\"project-images\">");
            for image in &self.images {
                html.push_str(&format!(
                    "<img class=\"project-image\" data-src=\"{}\" alt=\"{}\">",
                    encode_double_quoted_attribute(image),
                    encode_double_quoted_attribute(&self.title)
                ));
            }
            html.push_str("</div>");
        }
        html.push_str("</article>");
        html
    }
}

/// Builds one card per entry, in input order.
pub fn render_cards<'a, M>(
    entries: impl IntoIterator<Item = &'a Entry>,
    converter: &M,
    image_base: &str,
) -> Vec<Card>
where
    M: MarkupConverter + ?Sized,
{
    entries
        .into_iter()
        .map(|entry| render_card(entry, converter, image_base))
        .collect()
}

/// Builds the card for one entry.
pub fn render_card<M>(entry: &Entry, converter: &M, image_base: &str) -> Card
where
    M: MarkupConverter + ?Sized,
{
    let mut classes: Vec<String> = entry
        .tag_tokens()
        .into_iter()
        .map(|token| token.into_string())
        .collect();
    if entry.is_interactive() {
        classes.push(INTERACTIVE_CLASS.to_string());
    }

    Card {
        slug: entry.slug.clone(),
        title: entry.title.clone(),
        subtitle: entry.company.clone(),
        year: entry.year.clone(),
        body: demote_headings(&converter.to_markup(&entry.content)),
        link: entry.url().map(str::to_string),
        images: entry
            .images
            .iter()
            .map(|suffix| image_path(image_base, &entry.slug, suffix))
            .collect(),
        classes,
    }
}

/// Resolves one image file as `{image_base}/{slug}_{suffix}`.
pub fn image_path(image_base: &str, slug: &str, suffix: &str) -> String {
    let base = image_base.trim_end_matches('/');
    if base.is_empty() {
        format!("{slug}_{suffix}")
    } else {
        format!("{base}/{slug}_{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::{image_path, render_card, INTERACTIVE_CLASS};
    use crate::model::entry::Entry;
    use crate::render::markup::CommonMarkConverter;

    fn sample() -> Entry {
        Entry::new(
            "alpha",
            "Alpha <Site>",
            vec!["Web".to_string(), "CMS Integration".to_string()],
        )
        .unwrap()
        .with_company("Acme")
        .with_year("2023")
        .with_content("# Overview\n\nBuilt things.")
    }

    #[test]
    fn card_carries_tag_tokens_and_demoted_body() {
        let card = render_card(&sample(), &CommonMarkConverter::new(), "images");
        assert_eq!(card.classes, vec!["web", "cms-integration"]);
        assert!(card.body.contains("<h2>Overview</h2>"));
        assert!(!card.body.contains("<h1>"));
        assert!(card.link.is_none());
        assert!(!card.is_interactive());
    }

    #[test]
    fn link_or_images_add_interactive_marker() {
        let linked = sample().with_url("https://example.com");
        let card = render_card(&linked, &CommonMarkConverter::new(), "images");
        assert_eq!(card.classes.last().map(String::as_str), Some(INTERACTIVE_CLASS));

        let pictured = sample().with_images(vec!["1.png".to_string(), "2.png".to_string()]);
        let card = render_card(&pictured, &CommonMarkConverter::new(), "images/");
        assert_eq!(card.images, vec!["images/alpha_1.png", "images/alpha_2.png"]);
        assert!(card.is_interactive());
    }

    #[test]
    fn html_escapes_text_fields() {
        let card = render_card(&sample(), &CommonMarkConverter::new(), "images");
        let html = card.to_html();
        assert!(html.contains("<h2>Alpha &lt;Site&gt;</h2>"));
        assert!(html.contains("data-slug=\"alpha\""));
        assert!(!html.contains("project-images"));
        assert!(!html.contains("project-links"));
    }

    #[test]
    fn image_path_handles_empty_base() {
        assert_eq!(image_path("", "a", "x.png"), "a_x.png");
        assert_eq!(image_path("images", "a", "x.png"), "images/a_x.png");
    }

    #[test]
    fn full_markup_orders_text_link_and_images() {
        let entry = Entry::new("beta", "Beta", vec!["Web".to_string()])
            .unwrap()
            .with_company("Co")
            .with_year("2024")
            .with_url("https://beta.example")
            .with_images(vec!["1.png".to_string()]);
        let card = render_card(&entry, &|_: &str| String::from("<p>x</p>"), "img");
        assert_eq!(
            card.to_html(),
            "<article class=\"web -link\" data-slug=\"beta\"><h2>Beta</h2><h3>Co</h3><h4>2024</h4><div><p>x</p></div>\
             <div class=\"project-links\"><a class=\"project-link\" href=\"https://beta.example\" target=\"_blank\" rel=\"noopener\"></a></div>\
             <div class=\"project-images\"><img class=\"project-image\" data-src=\"img/beta_1.png\" alt=\"Beta\"></div></article>"
        );
    }
}
