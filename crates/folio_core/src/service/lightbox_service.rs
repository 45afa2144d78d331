//! Image lightbox overlays.
//!
//! # Invariants
//! - One `open` call creates exactly one overlay.
//! - Clicks on an image are absorbed; background and close-button clicks
//!   remove exactly the clicked overlay.
//! - Clicks addressed to an unknown overlay are no-ops.

use html_escape::encode_double_quoted_attribute;
use log::debug;
use std::fmt::{Display, Formatter};

/// Identifier of one open overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(u64);

impl OverlayId {
    pub fn get(self) -> u64 {
        self.0
    }

    /// Rebuilds an id read back from a surface (e.g. a data attribute).
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl Display for OverlayId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An open overlay and the images it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub id: OverlayId,
    pub images: Vec<String>,
}

impl Overlay {
    /// Overlay markup: close button followed by the image container.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<div class=\"modal\" data-overlay=\"{}\"><button class=\"modal-close\">Close</button><div class=\"modal-container\">",
            self.id
        ));
        for image in &self.images {
            html.push_str(&format!(
                "<img src=\"{}\">",
                encode_double_quoted_attribute(image)
            ));
        }
        html.push_str("</div></div>");
        html
    }
}

/// Part of an overlay that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTarget {
    /// An image or the image container around it.
    Image,
    CloseButton,
    Background,
}

/// Outcome of a click dispatched to the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    Absorbed,
    Closed,
    /// No overlay with that id is open.
    Ignored,
}

/// Tracks open overlays.
#[derive(Debug, Clone, Default)]
pub struct LightboxController {
    next_id: u64,
    open: Vec<Overlay>,
}

impl LightboxController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens one overlay showing `images` in order.
    pub fn open(&mut self, images: Vec<String>) -> &Overlay {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        debug!(
            "event=lightbox_open module=lightbox status=ok overlay={} images={}",
            id,
            images.len()
        );
        self.open.push(Overlay { id, images });
        &self.open[self.open.len() - 1]
    }

    /// Removes the overlay. Returns `false` when it was not open.
    pub fn close(&mut self, id: OverlayId) -> bool {
        let before = self.open.len();
        self.open.retain(|overlay| overlay.id != id);
        before != self.open.len()
    }

    pub fn click(&mut self, id: OverlayId, target: OverlayTarget) -> OverlayClick {
        if self.get(id).is_none() {
            return OverlayClick::Ignored;
        }
        match target {
            OverlayTarget::Image => OverlayClick::Absorbed,
            OverlayTarget::CloseButton | OverlayTarget::Background => {
                self.close(id);
                OverlayClick::Closed
            }
        }
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.open.iter().find(|overlay| overlay.id == id)
    }

    pub fn open_overlays(&self) -> &[Overlay] {
        &self.open
    }
}

#[cfg(test)]
mod tests {
    use super::{LightboxController, Overlay, OverlayClick, OverlayId, OverlayTarget};

    fn images() -> Vec<String> {
        vec!["x.png".to_string(), "y.png".to_string()]
    }

    #[test]
    fn image_clicks_are_absorbed_and_background_closes() {
        let mut lightbox = LightboxController::new();
        let id = lightbox.open(images()).id;
        assert_eq!(lightbox.get(id).map(|o| o.images.len()), Some(2));

        assert_eq!(lightbox.click(id, OverlayTarget::Image), OverlayClick::Absorbed);
        assert!(lightbox.get(id).is_some());

        assert_eq!(lightbox.click(id, OverlayTarget::Background), OverlayClick::Closed);
        assert!(lightbox.open_overlays().is_empty());
    }

    #[test]
    fn close_only_removes_the_clicked_overlay() {
        let mut lightbox = LightboxController::new();
        let first = lightbox.open(images()).id;
        let second = lightbox.open(vec!["z.png".to_string()]).id;
        assert_ne!(first, second);

        assert_eq!(lightbox.click(first, OverlayTarget::CloseButton), OverlayClick::Closed);
        assert_eq!(lightbox.open_overlays().len(), 1);
        assert_eq!(lightbox.open_overlays()[0].id, second);
    }

    #[test]
    fn unknown_overlay_clicks_are_ignored() {
        let mut lightbox = LightboxController::new();
        assert_eq!(
            lightbox.click(OverlayId::from_raw(42), OverlayTarget::Background),
            OverlayClick::Ignored
        );
        assert!(!lightbox.close(OverlayId::from_raw(42)));
    }

    #[test]
    fn markup_renders_one_img_per_image() {
        let mut lightbox = LightboxController::new();
        let html = lightbox.open(images()).to_html();
        assert_eq!(html.matches("<img ").count(), 2);
        assert!(html.contains("modal-close"));
    }

    #[test]
    fn markup_is_exact_and_escapes_sources() {
        let overlay = Overlay {
            id: OverlayId::from_raw(3),
            images: vec!["a\"b.png".to_string()],
        };
        assert_eq!(
            overlay.to_html(),
            "<div class=\"modal\" data-overlay=\"3\"><button class=\"modal-close\">Close</button><div class=\"modal-container\"><img src=\"a&quot;b.png\"></div></div>"
        );
    }
}
