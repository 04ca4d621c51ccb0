use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use icu_collator::{CaseFirst, Collator, CollatorOptions, Strength};

use gamemap_types::marker::{Marker, MarkerId};

use crate::{config::NOTE_EXCERPT_LEN, map_renderer::MapRenderer};

/// Sidebar controls. Derived state, rebuilt from the form on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarOptions {
    #[serde(default)]
    pub filter_text: String,
    #[serde(default)]
    pub sort_alphabetically: bool,
    #[serde(default)]
    pub group_by_type: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarRow {
    pub marker_id: MarkerId,
    pub title: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarSection {
    /// Capitalized type name, only present when grouping.
    pub header: Option<String>,
    pub rows: Vec<SidebarRow>,
}

/// Output of one sidebar render: what to list, and which pins to show.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SidebarView {
    pub sections: Vec<SidebarSection>,
    pub visible: BTreeSet<MarkerId>,
}

impl SidebarView {
    pub fn rows(&self) -> impl Iterator<Item = &SidebarRow> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|section| section.rows.is_empty())
    }

    /// Shows every pin in `visible` and hides every other one. Returns how
    /// many pins changed membership.
    pub fn reconcile(&self, map: &mut MapRenderer) -> usize {
        let ids: Vec<MarkerId> = map.pin_ids().collect();

        ids.into_iter()
            .filter(|id| map.set_pin_visibility(*id, self.visible.contains(id)))
            .count()
    }
}

/// Authoritative marker list for the loaded game, in backend order.
#[derive(Debug, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn render(&self, options: &SidebarOptions) -> SidebarView {
        let needle = options.filter_text.to_lowercase();

        let mut matching: Vec<&Marker> = self
            .markers
            .iter()
            .filter(|marker| marker.matches(&needle))
            .collect();

        let visible = matching.iter().map(|marker| marker.id).collect();

        if options.sort_alphabetically {
            // `sort_by` is stable, equal titles keep backend order.
            matching.sort_by(|a, b| collate(&a.title, &b.title));
        }

        let sections = if options.group_by_type {
            let mut groups: BTreeMap<&str, Vec<&Marker>> = BTreeMap::new();
            for marker in matching {
                groups.entry(marker.kind_name()).or_default().push(marker);
            }

            groups
                .into_iter()
                .map(|(kind, markers)| SidebarSection {
                    header: Some(capitalize(kind)),
                    rows: markers.into_iter().map(row).collect(),
                })
                .collect()
        } else {
            vec![SidebarSection {
                header: None,
                rows: matching.into_iter().map(row).collect(),
            }]
        };

        SidebarView { sections, visible }
    }
}

fn row(marker: &Marker) -> SidebarRow {
    SidebarRow {
        marker_id: marker.id,
        title: marker.title.clone(),
        excerpt: marker.note.as_deref().map(excerpt).unwrap_or_default(),
    }
}

fn excerpt(note: &str) -> String {
    if note.chars().count() > NOTE_EXCERPT_LEN {
        let head: String = note.chars().take(NOTE_EXCERPT_LEN).collect();
        format!("{head}...")
    } else {
        note.to_string()
    }
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

thread_local! {
    static COLLATOR: Option<Collator> = {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        options.case_first = Some(CaseFirst::LowerFirst);

        match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(err) => {
                tracing::warn!(error = ?err, "Collator unavailable, sorting by code point");
                None
            }
        }
    };
}

/// Title ordering for the sidebar, using root locale collation: accents and
/// case only break ties, lowercase before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}
