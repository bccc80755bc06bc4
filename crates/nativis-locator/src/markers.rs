use nativis_core::{BrandId, Coordinates, Directory, Location};
use serde::Serialize;

use crate::filter::Choice;
use crate::icon::{IconCache, MarkerIcon};

/// One pin on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// `"{location_id}:{brand}"`, unique within a [`MarkerSet`].
    pub key: String,
    pub location_id: String,
    pub brand: BrandId,
    pub position: Coordinates,
    pub title: String,
}

impl Marker {
    #[must_use]
    pub fn key_for(location_id: &str, brand: &BrandId) -> String {
        format!("{location_id}:{brand}")
    }
}

/// Markers plus the icons they reference (one per distinct brand).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerSet {
    pub markers: Vec<Marker>,
    pub icons: Vec<MarkerIcon>,
}

impl MarkerSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.key == key)
    }

    #[must_use]
    pub fn icon(&self, brand: &BrandId) -> Option<&MarkerIcon> {
        self.icons.iter().find(|icon| &icon.brand == brand)
    }
}

/// Build the markers for `subset`.
///
/// With every brand shown, a location gets one marker per brand it carries,
/// all at its own coordinate. With one brand selected, each location gets a
/// single marker with that brand's icon.
#[must_use]
pub fn render_markers(
    directory: &Directory,
    subset: &[&Location],
    brand_filter: &Choice<BrandId>,
    icons: &IconCache,
) -> MarkerSet {
    let mut markers = Vec::new();
    let mut used: Vec<&BrandId> = Vec::new();

    for location in subset {
        match brand_filter {
            Choice::All => {
                for brand in &location.brands {
                    let label = directory
                        .brand(brand)
                        .map_or_else(|| brand.to_string(), |b| b.label.clone());
                    markers.push(Marker {
                        key: Marker::key_for(&location.id, brand),
                        location_id: location.id.clone(),
                        brand: brand.clone(),
                        position: location.coordinates,
                        title: format!("{} - {label}", location.name),
                    });
                    if !used.contains(&brand) {
                        used.push(brand);
                    }
                }
            }
            Choice::Only(brand) => {
                markers.push(Marker {
                    key: Marker::key_for(&location.id, brand),
                    location_id: location.id.clone(),
                    brand: brand.clone(),
                    position: location.coordinates,
                    title: location.name.clone(),
                });
                if !used.contains(&brand) {
                    used.push(brand);
                }
            }
        }
    }

    let icons = used
        .into_iter()
        .filter_map(|id| directory.brand(id))
        .map(|brand| icons.icon_for(brand))
        .collect();

    MarkerSet { markers, icons }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, FilterState};

    fn setup() -> (Directory, IconCache) {
        let directory = Directory::bundled().unwrap();
        let icons = IconCache::new(directory.brands());
        (directory, icons)
    }

    #[test]
    fn all_brands_gives_one_marker_per_location_brand_pair() {
        let (directory, icons) = setup();
        let subset = filter(&directory, &FilterState::default().with_search_query("singapore"));
        let set = render_markers(&directory, &subset, &Choice::All, &icons);

        assert_eq!(set.len(), 16);
        assert_eq!(set.icons.len(), 4);
        let first = &set.markers[0];
        assert_eq!(first.key, "sg-barworks:Eldoria");
        assert_eq!(first.title, "Barworks Wine & Spirits Pte Ltd - Eldoria");
        for marker in &set.markers {
            let location = directory.location(&marker.location_id).unwrap();
            assert_eq!(marker.position, location.coordinates);
            assert!(location.carries(&marker.brand));
        }
    }

    #[test]
    fn marker_keys_are_unique() {
        let (directory, icons) = setup();
        let subset = filter(&directory, &FilterState::default());
        let set = render_markers(&directory, &subset, &Choice::All, &icons);
        let mut keys: Vec<&str> = set.markers.iter().map(|m| m.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), set.len());
    }

    #[test]
    fn specific_brand_gives_one_marker_per_location() {
        let (directory, icons) = setup();
        let lush = BrandId::new("Lush");
        let state = FilterState::default()
            .with_brand(Choice::Only(lush.clone()))
            .with_search_query("penang");
        let subset = filter(&directory, &state);
        let set = render_markers(&directory, &subset, &state.brand, &icons);

        assert_eq!(set.len(), 1);
        let marker = &set.markers[0];
        assert_eq!(marker.brand, lush);
        assert_eq!(marker.title, subset[0].name);
        assert_eq!(set.icons.len(), 1);
        assert_eq!(set.icon(&lush).unwrap().brand, lush);
    }

    #[test]
    fn empty_subset_gives_no_markers() {
        let (directory, icons) = setup();
        let set = render_markers(&directory, &[], &Choice::All, &icons);
        assert!(set.is_empty());
        assert!(set.icons.is_empty());
    }
}
