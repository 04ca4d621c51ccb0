use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

use gamemap_types::{
    game::map_url,
    geometry::{Bounds, ImageSize, LatLng, ZoomRange},
    marker::{Marker, MarkerId, MarkerKind},
};

use crate::config::MAP_PADDING_RATIO;

/// Icon descriptor handed to the browser map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconSpec {
    pub url: String,
    pub size: [u32; 2],
    pub anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
}

impl IconSpec {
    pub fn for_kind(kind: MarkerKind) -> Self {
        Self {
            url: kind.icon_url(),
            size: [32, 32],
            anchor: [16, 16],
            popup_anchor: [0, -16],
        }
    }
}

/// Content of the popup bound to a pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub note: Option<String>,
    pub game_coords: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pin {
    pub marker_id: MarkerId,
    pub position: LatLng,
    pub icon: MarkerKind,
    pub popup: Popup,
}

impl Pin {
    fn from_marker(marker: &Marker) -> Self {
        Self {
            marker_id: marker.id,
            position: marker.position(),
            icon: marker.icon(),
            popup: Popup {
                title: marker.title.clone(),
                note: marker.note.clone(),
                game_coords: marker.game_coords.clone(),
                image_path: marker.image_path.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOverlay {
    pub url: String,
    pub bounds: Bounds,
}

/// Last navigation requested on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewCommand {
    FitBounds { bounds: Bounds },
    FlyTo { center: LatLng, zoom: i8 },
}

/// A click on the map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapClick {
    pub position: LatLng,
    pub modifier: bool,
}

/// Serializable snapshot of the map, mirrored by the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub zoom: ZoomRange,
    pub overlay: Option<ImageOverlay>,
    pub max_bounds: Option<Bounds>,
    pub view: Option<ViewCommand>,
    pub pins: Vec<ScenePin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePin {
    pub marker_id: MarkerId,
    pub position: LatLng,
    pub icon: IconSpec,
    pub popup: Popup,
}

/// Owns the flat-coordinate viewport, the map image overlay and the pin layer.
///
/// Pins live in `pins` for their whole lifetime; `layer` holds the ids that
/// are currently rendered, so hiding a pin never destroys it.
#[derive(Debug)]
pub struct MapRenderer {
    zoom_range: ZoomRange,
    overlay: Option<ImageOverlay>,
    max_bounds: Option<Bounds>,
    view: Option<ViewCommand>,
    pins: HashMap<MarkerId, Pin>,
    order: Vec<MarkerId>,
    layer: HashSet<MarkerId>,
}

impl MapRenderer {
    pub fn new(zoom_range: ZoomRange) -> Self {
        Self {
            zoom_range,
            overlay: None,
            max_bounds: None,
            view: None,
            pins: HashMap::new(),
            order: Vec::new(),
            layer: HashSet::new(),
        }
    }

    /// Coordinate for the add-marker form, if this click should open it.
    pub fn click_target(&self, click: MapClick, game_loaded: bool) -> Option<LatLng> {
        (game_loaded && click.modifier).then_some(click.position)
    }

    /// Removes the image overlay, its pan boundary and every pin.
    pub fn clear(&mut self) {
        self.overlay = None;
        self.max_bounds = None;
        self.view = None;
        self.clear_pins();
    }

    /// Places the map image over `[[0, 0], [height, width]]`, fits the view to
    /// it and pads the pannable area by half of each dimension.
    pub fn show_image(&mut self, map_path: &str, size: ImageSize) {
        let bounds = Bounds::from_image(size);

        self.overlay = Some(ImageOverlay {
            url: map_url(map_path),
            bounds,
        });
        self.view = Some(ViewCommand::FitBounds { bounds });
        self.max_bounds = Some(bounds.padded(MAP_PADDING_RATIO));
    }

    pub fn add_pin(&mut self, marker: &Marker) {
        if self.pins.insert(marker.id, Pin::from_marker(marker)).is_none() {
            self.order.push(marker.id);
        }
        self.layer.insert(marker.id);
    }

    pub fn remove_pin(&mut self, id: MarkerId) {
        if self.pins.remove(&id).is_some() {
            self.order.retain(|pinned| *pinned != id);
        }
        self.layer.remove(&id);
    }

    pub fn clear_pins(&mut self) {
        self.pins.clear();
        self.order.clear();
        self.layer.clear();
    }

    /// Adds or removes a pin from the rendered layer. Returns whether the
    /// layer changed; unknown ids are ignored.
    pub fn set_pin_visibility(&mut self, id: MarkerId, visible: bool) -> bool {
        if !self.pins.contains_key(&id) {
            return false;
        }

        if visible {
            self.layer.insert(id)
        } else {
            self.layer.remove(&id)
        }
    }

    pub fn focus(&mut self, center: LatLng, zoom: i8) {
        self.view = Some(ViewCommand::FlyTo {
            center,
            zoom: self.zoom_range.clamp(zoom),
        });
    }

    pub fn is_visible(&self, id: MarkerId) -> bool {
        self.layer.contains(&id)
    }

    pub fn visible_ids(&self) -> BTreeSet<MarkerId> {
        self.layer.iter().copied().collect()
    }

    pub fn pin(&self, id: MarkerId) -> Option<&Pin> {
        self.pins.get(&id)
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn pin_ids(&self) -> impl Iterator<Item = MarkerId> + '_ {
        self.order.iter().copied()
    }

    pub fn overlay(&self) -> Option<&ImageOverlay> {
        self.overlay.as_ref()
    }

    pub fn max_bounds(&self) -> Option<Bounds> {
        self.max_bounds
    }

    pub fn view(&self) -> Option<ViewCommand> {
        self.view
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    pub fn scene(&self) -> MapScene {
        let pins = self
            .order
            .iter()
            .filter(|id| self.layer.contains(*id))
            .filter_map(|id| self.pins.get(id))
            .map(|pin| ScenePin {
                marker_id: pin.marker_id,
                position: pin.position,
                icon: IconSpec::for_kind(pin.icon),
                popup: pin.popup.clone(),
            })
            .collect();

        MapScene {
            zoom: self.zoom_range,
            overlay: self.overlay.clone(),
            max_bounds: self.max_bounds,
            view: self.view,
            pins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: MarkerId, kind: &str) -> Marker {
        Marker {
            id,
            game_id: 1,
            lat: id as f64,
            lng: id as f64 * 2.0,
            title: format!("Marker {id}"),
            kind: Some(kind.to_string()),
            game_coords: Some("12, 40".to_string()),
            note: None,
            image_path: None,
        }
    }

    #[test]
    fn click_opens_form_only_with_game_and_modifier() {
        let map = MapRenderer::new(ZoomRange::DEFAULT);
        let position = LatLng::new(5.0, 6.0);

        let click = MapClick {
            position,
            modifier: true,
        };
        assert_eq!(map.click_target(click, true), Some(position));
        assert_eq!(map.click_target(click, false), None);

        let plain = MapClick {
            position,
            modifier: false,
        };
        assert_eq!(map.click_target(plain, true), None);
    }

    #[test]
    fn show_image_fits_and_pads_bounds() {
        let mut map = MapRenderer::new(ZoomRange::DEFAULT);
        map.show_image(
            "dungeon.png",
            ImageSize {
                width: 1000,
                height: 500,
            },
        );

        let overlay = map.overlay().unwrap();
        assert_eq!(overlay.url, "/maps/dungeon.png");
        assert_eq!(
            <[[f64; 2]; 2]>::from(overlay.bounds),
            [[0.0, 0.0], [500.0, 1000.0]]
        );
        assert_eq!(
            <[[f64; 2]; 2]>::from(map.max_bounds().unwrap()),
            [[-250.0, -500.0], [750.0, 1500.0]]
        );
        assert_eq!(
            map.view(),
            Some(ViewCommand::FitBounds {
                bounds: overlay.bounds
            })
        );
    }

    #[test]
    fn visibility_toggle_is_idempotent_and_keeps_pin() {
        let mut map = MapRenderer::new(ZoomRange::DEFAULT);
        map.add_pin(&marker(1, "food"));

        assert!(map.set_pin_visibility(1, false));
        assert!(!map.set_pin_visibility(1, false));
        assert!(!map.is_visible(1));
        assert!(map.pin(1).is_some());

        assert!(map.set_pin_visibility(1, true));
        assert!(!map.set_pin_visibility(1, true));
        assert!(map.is_visible(1));

        assert!(!map.set_pin_visibility(99, true));
        assert!(!map.is_visible(99));
    }

    #[test]
    fn unknown_type_pin_uses_default_icon() {
        let mut map = MapRenderer::new(ZoomRange::DEFAULT);
        map.add_pin(&marker(3, "unknown_value"));

        let scene = map.scene();
        assert_eq!(scene.pins[0].icon.url, "/static/icons/default.svg");
        assert_eq!(scene.pins[0].icon.size, [32, 32]);
    }

    #[test]
    fn scene_lists_only_rendered_pins_in_insertion_order() {
        let mut map = MapRenderer::new(ZoomRange::DEFAULT);
        for id in [3, 1, 2] {
            map.add_pin(&marker(id, "base"));
        }
        map.set_pin_visibility(1, false);

        let ids: Vec<_> = map.scene().pins.iter().map(|p| p.marker_id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn focus_clamps_zoom() {
        let mut map = MapRenderer::new(ZoomRange::DEFAULT);
        map.focus(LatLng::new(1.0, 2.0), 9);
        assert_eq!(
            map.view(),
            Some(ViewCommand::FlyTo {
                center: LatLng::new(1.0, 2.0),
                zoom: 2
            })
        );
    }

    #[test]
    fn clear_drops_overlay_and_pins() {
        let mut map = MapRenderer::new(ZoomRange::DEFAULT);
        map.show_image(
            "keep.png",
            ImageSize {
                width: 10,
                height: 10,
            },
        );
        map.add_pin(&marker(1, "base"));
        map.clear();

        assert!(map.overlay().is_none());
        assert!(map.max_bounds().is_none());
        assert_eq!(map.pin_count(), 0);
        assert!(map.visible_ids().is_empty());
    }
}
