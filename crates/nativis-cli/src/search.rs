//! `search` and `markers` command handlers.

use nativis_core::AppConfig;
use nativis_locator::{
    filter, fit_viewport, load_brand_logos, location_detail, render_list, render_markers,
    ContactLink, FilterState, HttpLogoSource, IconCache, ListView, LocationDetail, MarkerSet,
    SelectionState, Viewport,
};

use crate::{open_directory, FilterArgs};

/// Print the locations matching `args`, as a table or as JSON.
///
/// # Errors
///
/// Returns an error if the directory cannot be loaded, a filter value is
/// unknown, or `selected` names a location that does not exist.
pub(crate) fn run_search(
    config: &AppConfig,
    args: &FilterArgs,
    selected: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let directory = open_directory(config, args.path.as_deref())?;
    let filters = FilterState::from_query(&directory, &args.filter_query())?;
    let subset = filter(&directory, &filters);

    let selection = match selected {
        Some(id) => {
            if directory.location(id).is_none() {
                anyhow::bail!("location '{id}' not found");
            }
            SelectionState::of(id).reconcile(&subset)
        }
        None => SelectionState::none(),
    };
    if selected.is_some() && selection.selected_id().is_none() {
        tracing::warn!("selected location is hidden by the current filters");
    }

    let list = render_list(&subset, &filters, &selection);
    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    for line in list_lines(&list) {
        println!("{line}");
    }

    if let Some(location) = selection.selected_id().and_then(|id| directory.location(id)) {
        println!();
        for line in detail_lines(&location_detail(&directory, location)) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Print markers and the fitted viewport for `args`.
///
/// # Errors
///
/// Returns an error if the directory cannot be loaded or a filter value is unknown.
pub(crate) async fn run_markers(
    config: &AppConfig,
    args: &FilterArgs,
    fetch_logos: bool,
    json: bool,
) -> anyhow::Result<()> {
    let directory = open_directory(config, args.path.as_deref())?;
    let filters = FilterState::from_query(&directory, &args.filter_query())?;
    let subset = filter(&directory, &filters);

    let mut icons = IconCache::new(directory.brands());
    if fetch_logos {
        let source = HttpLogoSource::new(
            &config.asset_base_url,
            config.asset_timeout_secs,
            &config.user_agent,
        )?;
        for (brand, outcome) in load_brand_logos(&source, directory.brands()).await {
            icons.record_logo(&brand, outcome);
        }
    }

    let markers = render_markers(&directory, &subset, &filters.brand, &icons);
    let viewport = fit_viewport(&subset, &filters.country);

    if json {
        let payload = serde_json::json!({
            "markers": markers,
            "viewport": viewport,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for line in marker_lines(&markers, &viewport) {
        println!("{line}");
    }
    Ok(())
}

fn contact_summary(contacts: &[ContactLink]) -> String {
    contacts
        .iter()
        .map(|link| link.href.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn list_lines(list: &ListView) -> Vec<String> {
    let summary = list.summary();
    let mut lines = vec![summary.label.clone()];

    match list {
        ListView::Empty { empty, .. } => {
            lines.push(format!("{}: {}", empty.title, empty.message));
        }
        ListView::Cards { cards, .. } => {
            lines.push(format!(
                "  {:<28}{:<34}{:<13}{:<18}ADDRESS",
                "ID", "NAME", "COUNTRY", "TYPE"
            ));
            for card in cards {
                let marker = if card.selected { '*' } else { ' ' };
                lines.push(format!(
                    "{marker} {:<28}{:<34}{:<13}{:<18}{}",
                    card.id, card.name, card.country, card.partner_type.label, card.address
                ));
            }
        }
    }

    if summary.show_clear_filters {
        lines.push("(filters active; run without flags to clear all filters)".to_string());
    }
    lines
}

pub(crate) fn detail_lines(detail: &LocationDetail) -> Vec<String> {
    let brands = detail
        .brands
        .iter()
        .map(|b| format!("{} ({})", b.label, b.color))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("{} [{}]", detail.name, detail.partner_type.label),
        format!("  {}", detail.address),
        format!(
            "  {:.4}, {:.4} ({})",
            detail.coordinates.latitude, detail.coordinates.longitude, detail.country
        ),
        format!("  brands: {brands}"),
    ];
    if let Some(person) = &detail.contact_person {
        lines.push(format!("  contact: {person}"));
    }
    if !detail.contacts.is_empty() {
        lines.push(format!("  {}", contact_summary(&detail.contacts)));
    }
    if let Some(fax) = &detail.fax {
        lines.push(format!("  fax: {fax}"));
    }
    lines
}

pub(crate) fn marker_lines(markers: &MarkerSet, viewport: &Viewport) -> Vec<String> {
    let mut lines = vec![match viewport {
        Viewport::Center { center, zoom } => format!(
            "viewport: center {:.4}, {:.4} zoom {zoom}",
            center.latitude, center.longitude
        ),
        Viewport::Bounds { bounds, padding_px } => format!(
            "viewport: bounds S{:.4} W{:.4} N{:.4} E{:.4} padding {padding_px}px",
            bounds.south, bounds.west, bounds.north, bounds.east
        ),
    }];

    lines.push(format!("{} marker(s)", markers.len()));
    for marker in &markers.markers {
        lines.push(format!(
            "  {:<40}{:>9.4}{:>10.4}  {}",
            marker.key, marker.position.latitude, marker.position.longitude, marker.title
        ));
    }
    for icon in &markers.icons {
        let glyph = if icon.has_logo() { "logo" } else { "letter" };
        lines.push(format!("  icon {} ({glyph})", icon.brand));
    }
    lines
}
