//! Tag selection controller and filter bar model.
//!
//! # Responsibility
//! - Build the filter bar (tag universe) from the entry store.
//! - Own the single current selection and mirror it into the URL.
//!
//! # Invariants
//! - `All` is always the first control; exactly one control is active.
//! - Tag controls are ordered by weight descending; equal weights keep
//!   first-discovery order across the store.
//! - `select` either fully applies or leaves selection and URL untouched.
//!
//! # See also
//! - `crate::service::page_service` for the re-render/scroll side effects.

use crate::config::SiteConfig;
use crate::model::tag::{normalize_tag, Selection, TagToken, ALL_TOKEN};
use crate::repo::entry_store::EntryStore;
use crate::surface::{Location, TAG_QUERY_PARAM};
use html_escape::{encode_double_quoted_attribute, encode_text};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ALL_LABEL: &str = "All";

/// One filter bar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub selection: Selection,
    /// Display label; the first authored spelling seen for the token.
    pub label: String,
    pub weight: i32,
}

impl FilterControl {
    /// Button markup carrying the token in `data-tag`.
    pub fn to_html(&self, active: bool) -> String {
        let class = if active { " class=\"active\"" } else { "" };
        format!(
            "<button{class} data-tag=\"{}\">{}</button>",
            encode_double_quoted_attribute(self.selection.as_str()),
            encode_text(&self.label)
        )
    }
}

/// Ordered set of selectable tags, `All` first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUniverse {
    controls: Vec<FilterControl>,
}

impl TagUniverse {
    pub fn build(store: &EntryStore, config: &SiteConfig) -> Self {
        let mut discovered: Vec<(TagToken, String)> = Vec::new();
        for entry in store.entries() {
            for raw in &entry.tags {
                let Some(token) = normalize_tag(raw) else {
                    continue;
                };
                // A tag spelled "all" would shadow the unfiltered control.
                if token.as_str() == ALL_TOKEN {
                    continue;
                }
                if !discovered.iter().any(|(known, _)| *known == token) {
                    discovered.push((token, raw.trim().to_string()));
                }
            }
        }

        let mut tags: Vec<FilterControl> = discovered
            .into_iter()
            .map(|(token, label)| FilterControl {
                weight: config.weight_of(&token),
                selection: Selection::Tag(token),
                label,
            })
            .collect();
        tags.sort_by(|a, b| b.weight.cmp(&a.weight));

        let mut controls = Vec::with_capacity(tags.len() + 1);
        controls.push(FilterControl {
            selection: Selection::All,
            label: ALL_LABEL.to_string(),
            weight: i32::MAX,
        });
        controls.extend(tags);
        Self { controls }
    }

    pub fn controls(&self) -> &[FilterControl] {
        &self.controls
    }

    pub fn position(&self, selection: &Selection) -> Option<usize> {
        self.controls
            .iter()
            .position(|control| control.selection == *selection)
    }

    pub fn contains(&self, selection: &Selection) -> bool {
        self.position(selection).is_some()
    }
}

/// Selection transition error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The value does not name a known tag (or is blank).
    UnknownTag(String),
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTag(value) => write!(f, "unknown tag: `{value}`"),
        }
    }
}

impl Error for SelectionError {}

/// Result of an applied selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Selection,
    pub current: Selection,
}

/// Owner of the current selection.
#[derive(Debug, Clone)]
pub struct SelectionController {
    universe: TagUniverse,
    active: usize,
}

impl SelectionController {
    /// Starts at `All`; call `restore_from_location` once at startup.
    pub fn new(universe: TagUniverse) -> Self {
        Self {
            universe,
            active: 0,
        }
    }

    pub fn universe(&self) -> &TagUniverse {
        &self.universe
    }

    pub fn current(&self) -> &Selection {
        &self.universe.controls[self.active].selection
    }

    pub fn active_control(&self) -> &FilterControl {
        &self.universe.controls[self.active]
    }

    /// Adopts the URL `tag` parameter when it names a known tag, else `All`.
    ///
    /// Never writes to the location.
    pub fn restore_from_location(&mut self, location: &impl Location) -> &Selection {
        let raw = location.query_param(TAG_QUERY_PARAM);
        let restored = raw
            .as_deref()
            .and_then(Selection::parse)
            .and_then(|selection| self.universe.position(&selection));

        match (raw.as_deref(), restored) {
            (_, Some(position)) => self.active = position,
            (Some(value), None) => {
                debug!(
                    "event=selection_restore module=selection status=fallback raw={:?}",
                    value
                );
                self.active = 0;
            }
            (None, None) => self.active = 0,
        }
        self.current()
    }

    /// Activates `raw` and pushes `tag=<token>` onto the history.
    ///
    /// Unknown or blank values are rejected without touching state or URL.
    pub fn select(
        &mut self,
        raw: &str,
        location: &mut impl Location,
    ) -> Result<SelectionChange, SelectionError> {
        let position = Selection::parse(raw)
            .and_then(|selection| self.universe.position(&selection))
            .ok_or_else(|| SelectionError::UnknownTag(raw.to_string()))?;

        let previous = self.current().clone();
        self.active = position;
        let current = self.current().clone();
        location.push_query_param(TAG_QUERY_PARAM, current.as_str());

        info!(
            "event=selection_change module=selection status=ok from={} to={}",
            previous, current
        );
        Ok(SelectionChange { previous, current })
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterControl, SelectionController, SelectionError, TagUniverse};
    use crate::config::SiteConfig;
    use crate::model::entry::Entry;
    use crate::model::tag::Selection;
    use crate::repo::entry_store::EntryStore;
    use crate::surface::{Location, MemoryLocation};

    fn store() -> EntryStore {
        let entry = |slug: &str, tags: &[&str]| {
            Entry::new(slug, slug, tags.iter().map(|t| t.to_string()).collect()).unwrap()
        };
        EntryStore::from_entries(vec![
            entry("a", &["Illustration", "Animation"]),
            entry("b", &["Web", "Print"]),
            entry("c", &["CMS  Integration", "web"]),
        ])
        .unwrap()
    }

    fn labels(universe: &TagUniverse) -> Vec<&str> {
        universe
            .controls()
            .iter()
            .map(|control| control.label.as_str())
            .collect()
    }

    #[test]
    fn universe_orders_by_weight_with_all_first() {
        let universe = TagUniverse::build(&store(), &SiteConfig::default());
        assert_eq!(
            labels(&universe),
            vec!["All", "Web", "CMS  Integration", "Animation", "Illustration", "Print"]
        );
        assert_eq!(
            universe.controls()[2].selection.as_str(),
            "cms-integration"
        );
    }

    #[test]
    fn tag_spelled_all_yields_a_single_all_control() {
        let entries = vec![
            Entry::new("a", "A", vec!["All".to_string(), "Web".to_string()]).unwrap(),
            Entry::new("b", "B", vec![" all ".to_string()]).unwrap(),
        ];
        let store = EntryStore::from_entries(entries).unwrap();
        let universe = TagUniverse::build(&store, &SiteConfig::default());

        assert_eq!(universe.controls().len(), 2);
        assert_eq!(universe.controls()[0].selection, Selection::All);
        assert_eq!(
            universe
                .controls()
                .iter()
                .filter(|control| control.selection.as_str() == "all")
                .count(),
            1
        );
        assert_eq!(labels(&universe), vec!["All", "Web"]);
    }

    #[test]
    fn restore_accepts_known_tag_and_falls_back_otherwise() {
        let universe = TagUniverse::build(&store(), &SiteConfig::default());
        let mut controller = SelectionController::new(universe);

        let known = MemoryLocation::with_query("tag", "print");
        assert_eq!(controller.restore_from_location(&known).as_str(), "print");

        let unknown = MemoryLocation::with_query("tag", "bogus");
        assert_eq!(controller.restore_from_location(&unknown), &Selection::All);

        assert_eq!(
            controller.restore_from_location(&MemoryLocation::new()),
            &Selection::All
        );
    }

    #[test]
    fn select_pushes_history_and_rejects_unknown() {
        let universe = TagUniverse::build(&store(), &SiteConfig::default());
        let mut controller = SelectionController::new(universe);
        let mut location = MemoryLocation::new();

        let change = controller.select("Animation", &mut location).unwrap();
        assert_eq!(change.previous, Selection::All);
        assert_eq!(location.query_param("tag").as_deref(), Some("animation"));
        assert_eq!(location.history_len(), 2);

        let err = controller.select("bogus-tag", &mut location).unwrap_err();
        assert_eq!(err, SelectionError::UnknownTag("bogus-tag".to_string()));
        assert_eq!(controller.current().as_str(), "animation");
        assert_eq!(location.query_param("tag").as_deref(), Some("animation"));
        assert_eq!(location.history_len(), 2);
    }

    #[test]
    fn filter_button_markup_escapes_label() {
        let control = FilterControl {
            selection: Selection::parse("r&d").unwrap(),
            label: "R&D <lab>".to_string(),
            weight: 0,
        };
        assert_eq!(
            control.to_html(false),
            "<button data-tag=\"r&amp;d\">R&amp;D &lt;lab&gt;</button>"
        );
        assert!(control.to_html(true).starts_with("<button class=\"active\""));
    }
}
