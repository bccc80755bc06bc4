//! Brand marker icons: a gradient pin with the brand logo (or a letter glyph)
//! in a white inner disc.

use std::collections::BTreeMap;

use nativis_core::{Brand, BrandId};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::assets::LogoAsset;
use crate::error::AssetError;

pub const ICON_WIDTH: u32 = 40;
pub const ICON_HEIGHT: u32 = 50;
const LOGO_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconPoint {
    pub x: u32,
    pub y: u32,
}

/// What sits inside the pin's inner disc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IconGlyph {
    Logo { url: String },
    Letter { letter: char },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerIcon {
    pub brand: BrandId,
    pub glyph: IconGlyph,
    pub svg: String,
    pub width: u32,
    pub height: u32,
    /// Pin tip; this pixel sits on the location's coordinate.
    pub anchor: IconPoint,
    pub label_origin: IconPoint,
}

impl MarkerIcon {
    /// `data:` URL a map widget can use directly as the marker image.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!(
            "data:image/svg+xml;charset=utf-8,{}",
            utf8_percent_encode(&self.svg, NON_ALPHANUMERIC)
        )
    }

    #[must_use]
    pub fn has_logo(&self) -> bool {
        matches!(self.glyph, IconGlyph::Logo { .. })
    }
}

/// Uppercase first letter of the brand label, `?` for an empty label.
#[must_use]
pub fn fallback_letter(brand: &Brand) -> char {
    brand
        .label
        .chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

fn svg_id(brand: &BrandId) -> String {
    brand
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Render the pin for `brand`. With a loaded `logo` the inner disc embeds
/// the image bytes; otherwise it holds the fallback letter in the brand color.
#[must_use]
pub fn render_marker_icon(brand: &Brand, logo: Option<&LogoAsset>) -> MarkerIcon {
    let id = svg_id(&brand.id);
    let mut svg = format!(
        concat!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"##,
            r##"<defs><linearGradient id="pin-{id}" gradientUnits="userSpaceOnUse" x1="6" y1="4" x2="34" y2="32">"##,
            r##"<stop offset="0" stop-color="{highlight}"/><stop offset="1" stop-color="{color}"/>"##,
            r##"</linearGradient><clipPath id="logo-{id}"><circle cx="20" cy="18" r="9"/></clipPath></defs>"##,
            r##"<ellipse cx="20" cy="47" rx="8" ry="3" fill="rgba(0,0,0,0.15)"/>"##,
            r##"<g fill="url(#pin-{id})" stroke="#ffffff" stroke-width="2">"##,
            r##"<circle cx="20" cy="18" r="14"/><path d="M20 32 L12 40 L28 40 Z"/></g>"##,
            r##"<circle cx="20" cy="18" r="10" fill="#ffffff"/>"##,
        ),
        w = ICON_WIDTH,
        h = ICON_HEIGHT,
        id = id,
        highlight = brand.highlight,
        color = brand.color,
    );

    let glyph = if let Some(asset) = logo {
        svg.push_str(&format!(
            r##"<image href="{href}" x="{x}" y="{y}" width="{size}" height="{size}" preserveAspectRatio="xMidYMid meet" clip-path="url(#logo-{id})"/>"##,
            href = escape_xml(&asset.data_uri()),
            x = 20 - LOGO_SIZE / 2,
            y = 18 - LOGO_SIZE / 2,
            size = LOGO_SIZE,
            id = id,
        ));
        IconGlyph::Logo {
            url: asset.url.clone(),
        }
    } else {
        let letter = fallback_letter(brand);
        svg.push_str(&format!(
            r#"<text x="20" y="18" fill="{color}" font-family="Arial" font-size="8" font-weight="bold" text-anchor="middle" dominant-baseline="central">{letter}</text>"#,
            color = brand.color,
            letter = escape_xml(&letter.to_string()),
        ));
        IconGlyph::Letter { letter }
    };

    svg.push_str("</svg>");

    MarkerIcon {
        brand: brand.id.clone(),
        glyph,
        svg,
        width: ICON_WIDTH,
        height: ICON_HEIGHT,
        anchor: IconPoint { x: 20, y: 50 },
        label_origin: IconPoint { x: 20, y: 60 },
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    brand: Brand,
    icon: MarkerIcon,
}

/// One icon per brand, built once. Starts with letter glyphs; logos are
/// swapped in as they load.
#[derive(Debug, Clone, Default)]
pub struct IconCache {
    entries: BTreeMap<BrandId, CacheEntry>,
}

impl IconCache {
    #[must_use]
    pub fn new(brands: &[Brand]) -> Self {
        let entries = brands
            .iter()
            .map(|brand| {
                let icon = render_marker_icon(brand, None);
                (
                    brand.id.clone(),
                    CacheEntry {
                        brand: brand.clone(),
                        icon,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, brand: &BrandId) -> Option<&MarkerIcon> {
        self.entries.get(brand).map(|entry| &entry.icon)
    }

    /// Cached icon, or a fresh glyph icon for a brand the cache never saw.
    #[must_use]
    pub fn icon_for(&self, brand: &Brand) -> MarkerIcon {
        self.get(&brand.id)
            .cloned()
            .unwrap_or_else(|| render_marker_icon(brand, None))
    }

    pub fn icons(&self) -> impl Iterator<Item = &MarkerIcon> {
        self.entries.values().map(|entry| &entry.icon)
    }

    /// Record the outcome of a logo load. Returns `true` when the icon changed.
    ///
    /// A failed load keeps (or restores) the letter glyph for that brand only.
    pub fn record_logo(
        &mut self,
        brand: &BrandId,
        outcome: Result<LogoAsset, AssetError>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(brand) else {
            tracing::warn!(brand = %brand, "logo result for unknown brand ignored");
            return false;
        };

        let next = match outcome {
            Ok(asset) => {
                tracing::debug!(brand = %brand, url = %asset.url, "brand logo loaded");
                render_marker_icon(&entry.brand, Some(&asset))
            }
            Err(error) => {
                tracing::warn!(brand = %brand, error = %error, "brand logo unavailable; using letter glyph");
                render_marker_icon(&entry.brand, None)
            }
        };

        if next == entry.icon {
            return false;
        }
        entry.icon = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use nativis_core::Directory;

    use super::*;

    fn brand(id: &str) -> Brand {
        Directory::bundled()
            .unwrap()
            .brand(&BrandId::new(id))
            .cloned()
            .unwrap()
    }

    #[test]
    fn glyph_icon_uses_brand_initial_and_colors() {
        let icon = render_marker_icon(&brand("Lumina"), None);
        assert_eq!(icon.glyph, IconGlyph::Letter { letter: 'L' });
        assert!(icon.svg.contains(r##"stop-color="#FFA500""##));
        assert!(icon.svg.contains(r##"stop-color="#FF8C00""##));
        assert!(icon.svg.contains(">L</text>"));
        assert_eq!((icon.width, icon.height), (40, 50));
        assert_eq!(icon.anchor, IconPoint { x: 20, y: 50 });
        assert_eq!(icon.label_origin, IconPoint { x: 20, y: 60 });
    }

    fn png_logo(url: &str) -> LogoAsset {
        LogoAsset {
            url: url.to_string(),
            content_type: "image/png; charset=binary".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn logo_icon_inlines_image_bytes() {
        let logo = png_logo("https://nativisgp.com/imgs/HOFMAN%20NAME.png");
        let icon = render_marker_icon(&brand("Hofman"), Some(&logo));
        assert!(icon.has_logo());
        assert!(icon
            .svg
            .contains(r#"<image href="data:image/png;base64,iVBORw==""#));
        assert!(!icon.svg.contains("href=\"http"));
        assert!(!icon.svg.contains("nativisgp.com"));
        assert!(!icon.svg.contains("<text"));
        assert_eq!(
            icon.glyph,
            IconGlyph::Logo {
                url: "https://nativisgp.com/imgs/HOFMAN%20NAME.png".to_string()
            }
        );
    }

    #[test]
    fn data_url_is_percent_encoded_svg() {
        let icon = render_marker_icon(&brand("Eldoria"), None);
        let url = icon.data_url();
        assert!(url.starts_with("data:image/svg+xml;charset=utf-8,%3Csvg"));
        assert!(!url.contains('<'));
        assert!(!url.contains('#'));
    }

    #[test]
    fn fallback_letter_is_uppercased() {
        let mut lower = brand("Lush");
        lower.label = "lush".to_string();
        assert_eq!(fallback_letter(&lower), 'L');
        lower.label = String::new();
        assert_eq!(fallback_letter(&lower), '?');
    }

    #[test]
    fn cache_starts_with_glyphs_and_swaps_in_logos() {
        let directory = Directory::bundled().unwrap();
        let mut cache = IconCache::new(directory.brands());
        assert_eq!(cache.icons().count(), 4);
        assert!(cache.icons().all(|icon| !icon.has_logo()));

        let lush = BrandId::new("Lush");
        let changed = cache.record_logo(
            &lush,
            Ok(png_logo("https://nativisgp.com/imgs/Lush_Logo_v2.png")),
        );
        assert!(changed);
        let icon = cache.get(&lush).unwrap();
        assert!(icon.has_logo());
        assert!(icon.svg.contains(r#"href="data:image/png;base64,"#));
        assert!(!icon.svg.contains("href=\"http"));
        assert!(!cache.get(&BrandId::new("Hofman")).unwrap().has_logo());
    }

    #[test]
    fn failed_logo_keeps_glyph_for_that_brand_only() {
        let directory = Directory::bundled().unwrap();
        let mut cache = IconCache::new(directory.brands());
        let hofman = BrandId::new("Hofman");
        let changed = cache.record_logo(&hofman, Err(AssetError::NoLogo(hofman.clone())));
        assert!(!changed);
        assert_eq!(
            cache.get(&hofman).unwrap().glyph,
            IconGlyph::Letter { letter: 'H' }
        );
    }

    #[test]
    fn unknown_brand_result_is_ignored() {
        let mut cache = IconCache::default();
        let ghost = BrandId::new("Ghost");
        assert!(!cache.record_logo(&ghost, Err(AssetError::NoLogo(ghost.clone()))));
        assert!(cache.get(&ghost).is_none());
    }
}
