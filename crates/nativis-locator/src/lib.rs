//! "Where to Buy" partner locator.
//!
//! Data flow: user input → [`filter`] → filtered subset → {[`map`] adapter,
//! [`list`] view} → marker/card click → shared selection → detail popup.
//! Everything except logo asset loading is pure and synchronous.

pub mod assets;
pub mod contact;
pub mod detail;
pub mod error;
pub mod filter;
pub mod icon;
pub mod list;
pub mod map;
pub mod markers;
pub mod selection;
pub mod session;
pub mod viewport;

pub use assets::{load_brand_logos, HttpLogoSource, LogoAsset, LogoSource};
pub use contact::{
    contact_links, contact_mailto, inquiry_links, ContactKind, ContactLink, InquiryLinks,
};
pub use detail::{location_detail, BadgeTone, BrandBadge, LocationDetail, PartnerTypeBadge};
pub use error::{AssetError, LocatorError, MapWidgetError};
pub use filter::{
    filter, filter_options, Choice, FilterOption, FilterOptions, FilterQuery, FilterState,
};
pub use icon::{render_marker_icon, IconCache, IconGlyph, IconPoint, MarkerIcon};
pub use list::{render_list, EmptyState, ListView, LocationCard, ResultSummary};
pub use map::{MapEvent, MapFallback, MapStatus, MapViewAdapter, MapWidget};
pub use markers::{render_markers, Marker, MarkerSet};
pub use selection::SelectionState;
pub use session::{LocatorSession, LocatorSnapshot};
pub use viewport::{fit_viewport, nominal_view, BoundingBox, Viewport};
