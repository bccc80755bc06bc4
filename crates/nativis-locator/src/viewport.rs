//! Viewport framing for the filtered subset.
//!
//! Zero results recentre on the active country's nominal view, one result
//! centres on that location, and more results fit the minimal bounding box.

use nativis_core::{Coordinates, Country, Location};
use serde::Serialize;

use crate::filter::Choice;

/// Zoom used when exactly one location is shown.
pub const SINGLE_RESULT_ZOOM: u8 = 12;
/// Padding (in screen pixels) applied when fitting a bounding box.
pub const FIT_PADDING_PX: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Viewport {
    Center { center: Coordinates, zoom: u8 },
    Bounds { bounds: BoundingBox, padding_px: u32 },
}

impl Viewport {
    /// Geographic centre of the framed region.
    #[must_use]
    pub fn center(&self) -> Coordinates {
        match self {
            Viewport::Center { center, .. } => *center,
            Viewport::Bounds { bounds, .. } => bounds.center(),
        }
    }
}

/// Lat/lng rectangle. `west > east` means the box crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Smallest box covering every point, or `None` for no points.
    ///
    /// Longitudes are treated as a circle: the box excludes the widest empty
    /// arc between neighbouring points, so points either side of ±180° get a
    /// narrow box that crosses the antimeridian instead of one spanning the globe.
    pub fn covering(points: impl IntoIterator<Item = Coordinates>) -> Option<Self> {
        let mut south = f64::INFINITY;
        let mut north = f64::NEG_INFINITY;
        let mut longitudes = Vec::new();

        for point in points {
            south = south.min(point.latitude);
            north = north.max(point.latitude);
            longitudes.push(point.longitude);
        }

        if longitudes.is_empty() {
            return None;
        }

        longitudes.sort_by(f64::total_cmp);
        longitudes.dedup();

        let first = longitudes[0];
        let last = longitudes[longitudes.len() - 1];

        // Start with the arc that wraps through ±180°: excluding it gives the
        // ordinary, non-crossing box.
        let mut widest_gap = first + 360.0 - last;
        let (mut west, mut east) = (first, last);

        for pair in longitudes.windows(2) {
            let gap = pair[1] - pair[0];
            if gap > widest_gap {
                widest_gap = gap;
                west = pair[1];
                east = pair[0];
            }
        }

        Some(Self {
            south,
            west,
            north,
            east,
        })
    }

    #[must_use]
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Longitudinal extent in degrees.
    #[must_use]
    pub fn width(&self) -> f64 {
        if self.crosses_antimeridian() {
            self.east + 360.0 - self.west
        } else {
            self.east - self.west
        }
    }

    #[must_use]
    pub fn center(&self) -> Coordinates {
        let mut longitude = self.west + self.width() / 2.0;
        if longitude > 180.0 {
            longitude -= 360.0;
        }
        Coordinates::new((self.south + self.north) / 2.0, longitude)
    }

    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        let lat_ok = (self.south..=self.north).contains(&point.latitude);
        let lng_ok = if self.crosses_antimeridian() {
            point.longitude >= self.west || point.longitude <= self.east
        } else {
            (self.west..=self.east).contains(&point.longitude)
        };
        lat_ok && lng_ok
    }
}

/// Nominal centre and zoom for a country filter; `All` is the regional overview.
#[must_use]
pub fn nominal_view(country: &Choice<Country>) -> (Coordinates, u8) {
    match country {
        Choice::All => (Coordinates::new(10.7500, 106.6667), 4),
        Choice::Only(Country::Singapore) => (Coordinates::new(1.3521, 103.8198), 11),
        Choice::Only(Country::HongKong) => (Coordinates::new(22.3193, 114.1694), 11),
        Choice::Only(Country::Philippines) => (Coordinates::new(12.8797, 121.7740), 6),
        Choice::Only(Country::Malaysia) => (Coordinates::new(4.2105, 101.9758), 7),
    }
}

/// Frame `subset` for display. Never fails; an empty subset yields the
/// nominal view of `country`.
#[must_use]
pub fn fit_viewport(subset: &[&Location], country: &Choice<Country>) -> Viewport {
    match subset {
        [] => {
            let (center, zoom) = nominal_view(country);
            Viewport::Center { center, zoom }
        }
        [only] => Viewport::Center {
            center: only.coordinates,
            zoom: SINGLE_RESULT_ZOOM,
        },
        many => match BoundingBox::covering(many.iter().map(|loc| loc.coordinates)) {
            Some(bounds) => Viewport::Bounds {
                bounds,
                padding_px: FIT_PADDING_PX,
            },
            None => {
                let (center, zoom) = nominal_view(country);
                Viewport::Center { center, zoom }
            }
        },
    }
}
