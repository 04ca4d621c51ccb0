use serde::{Deserialize, Serialize};

/// A point in the flat map coordinate system: `lat` grows along the image
/// height, `lng` along its width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Pixel dimensions of a map image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Rectangle in map coordinates, serialized as `[[south, west], [north, east]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[[f64; 2]; 2]", from = "[[f64; 2]; 2]")]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Bounds covering an image placed at the origin: `[[0, 0], [height, width]]`.
    pub fn from_image(size: ImageSize) -> Self {
        Self {
            south_west: LatLng::new(0.0, 0.0),
            north_east: LatLng::new(size.height as f64, size.width as f64),
        }
    }

    pub fn height(&self) -> f64 {
        self.north_east.lat - self.south_west.lat
    }

    pub fn width(&self) -> f64 {
        self.north_east.lng - self.south_west.lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            self.south_west.lat + self.height() / 2.0,
            self.south_west.lng + self.width() / 2.0,
        )
    }

    /// Grows the bounds on every side by `ratio` of the matching dimension.
    pub fn padded(&self, ratio: f64) -> Self {
        let pad_lat = self.height() * ratio;
        let pad_lng = self.width() * ratio;
        Self {
            south_west: LatLng::new(self.south_west.lat - pad_lat, self.south_west.lng - pad_lng),
            north_east: LatLng::new(self.north_east.lat + pad_lat, self.north_east.lng + pad_lng),
        }
    }

    pub fn contains(&self, point: LatLng) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }
}

impl From<Bounds> for [[f64; 2]; 2] {
    fn from(bounds: Bounds) -> Self {
        [
            [bounds.south_west.lat, bounds.south_west.lng],
            [bounds.north_east.lat, bounds.north_east.lng],
        ]
    }
}

impl From<[[f64; 2]; 2]> for Bounds {
    fn from(value: [[f64; 2]; 2]) -> Self {
        Self {
            south_west: LatLng::new(value[0][0], value[0][1]),
            north_east: LatLng::new(value[1][0], value[1][1]),
        }
    }
}

/// Inclusive zoom bounds of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: i8,
    pub max: i8,
}

impl ZoomRange {
    pub const DEFAULT: ZoomRange = ZoomRange { min: -2, max: 2 };

    pub fn clamp(&self, zoom: i8) -> i8 {
        zoom.clamp(self.min, self.max)
    }

    pub fn levels(&self) -> impl Iterator<Item = i8> {
        self.min..=self.max
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}
