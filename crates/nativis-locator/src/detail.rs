//! Detail popup content for a selected location.

use nativis_core::{BrandId, Coordinates, Directory, Location, PartnerType};
use serde::Serialize;

use crate::contact::{contact_links, ContactLink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Green,
    Blue,
    Purple,
}

impl From<PartnerType> for BadgeTone {
    fn from(kind: PartnerType) -> Self {
        match kind {
            PartnerType::Distributor => BadgeTone::Green,
            PartnerType::Retail => BadgeTone::Blue,
            PartnerType::Bar => BadgeTone::Purple,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerTypeBadge {
    pub value: PartnerType,
    pub label: &'static str,
    pub tone: BadgeTone,
}

impl From<PartnerType> for PartnerTypeBadge {
    fn from(kind: PartnerType) -> Self {
        Self {
            value: kind,
            label: kind.label(),
            tone: kind.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandBadge {
    pub id: BrandId,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDetail {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub brands: Vec<BrandBadge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_label: Option<String>,
    pub contacts: Vec<ContactLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    pub partner_type: PartnerTypeBadge,
    pub country: &'static str,
}

#[must_use]
pub fn location_detail(directory: &Directory, location: &Location) -> LocationDetail {
    let brands = location
        .brands
        .iter()
        .filter_map(|id| directory.brand(id))
        .map(|brand| BrandBadge {
            id: brand.id.clone(),
            label: brand.label.clone(),
            color: brand.color.clone(),
        })
        .collect();

    LocationDetail {
        id: location.id.clone(),
        name: location.name.clone(),
        address: location.address.clone(),
        coordinates: location.coordinates,
        brands,
        contact_person: location.contact_person.clone(),
        area_label: location.area_label.clone(),
        contacts: contact_links(location),
        fax: location.fax.clone(),
        hours: location.hours.clone(),
        partner_type: location.partner_type.into(),
        country: location.country.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_carries_badges_and_contacts() {
        let directory = Directory::bundled().unwrap();
        let location = directory.location("my-drinksconnexion-penang").unwrap();
        let detail = location_detail(&directory, location);

        assert_eq!(detail.name, "Drinks Connexion - Penang");
        assert_eq!(detail.country, "Malaysia");
        assert_eq!(detail.contact_person.as_deref(), Some("Dollores DC"));
        assert_eq!(detail.partner_type.label, "Distributor");
        assert_eq!(detail.partner_type.tone, BadgeTone::Green);
        let colors: Vec<&str> = detail.brands.iter().map(|b| b.color.as_str()).collect();
        assert_eq!(colors, vec!["#00B14F", "#FF8C00", "#FF69B4", "#FFAB91"]);
        assert_eq!(detail.contacts.len(), 2);
    }

    #[test]
    fn fax_is_shown_when_published() {
        let directory = Directory::bundled().unwrap();
        let detail = location_detail(&directory, directory.location("hk-universal").unwrap());
        assert_eq!(detail.fax.as_deref(), Some("+852 2314 1117"));
    }

    #[test]
    fn badge_tones_per_partner_type() {
        assert_eq!(BadgeTone::from(PartnerType::Retail), BadgeTone::Blue);
        assert_eq!(BadgeTone::from(PartnerType::Bar), BadgeTone::Purple);
        let json = serde_json::to_value(PartnerTypeBadge::from(PartnerType::Bar)).unwrap();
        assert_eq!(json["value"], "bar");
        assert_eq!(json["tone"], "purple");
    }
}
