//! `tel:` / `mailto:` / website links for cards, popups, and the partner CTAs.

use nativis_core::Location;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Phone,
    Email,
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub kind: ContactKind,
    pub label: String,
    pub href: String,
}

fn tel_href(phone: &str) -> String {
    let dialable: String = phone
        .chars()
        .filter(|c| *c == '+' || c.is_ascii_digit())
        .collect();
    format!("tel:{dialable}")
}

fn mailto_href(address: &str, subject: Option<&str>) -> String {
    match subject {
        Some(subject) => format!(
            "mailto:{}?subject={}",
            address.trim(),
            utf8_percent_encode(subject, NON_ALPHANUMERIC)
        ),
        None => format!("mailto:{}", address.trim()),
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Phone, email, and website links for a location, in that order, skipping
/// whatever it does not publish.
#[must_use]
pub fn contact_links(location: &Location) -> Vec<ContactLink> {
    let mut links = Vec::with_capacity(3);

    if let Some(phone) = present(location.phone.as_ref()) {
        links.push(ContactLink {
            kind: ContactKind::Phone,
            label: phone.to_string(),
            href: tel_href(phone),
        });
    }
    if let Some(email) = present(location.email.as_ref()) {
        links.push(ContactLink {
            kind: ContactKind::Email,
            label: email.to_string(),
            href: mailto_href(email, None),
        });
    }
    if let Some(website) = present(location.website.as_ref()) {
        links.push(ContactLink {
            kind: ContactKind::Website,
            label: "Visit Website".to_string(),
            href: website.to_string(),
        });
    }

    links
}

/// "Become a partner" calls to action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryLinks {
    pub partnership: String,
    pub distribution: String,
}

#[must_use]
pub fn inquiry_links(contact_email: &str) -> InquiryLinks {
    InquiryLinks {
        partnership: mailto_href(contact_email, Some("Partnership Inquiry")),
        distribution: mailto_href(contact_email, Some("Distribution Inquiry")),
    }
}

/// Plain `mailto:` for the map-unavailable notice.
#[must_use]
pub fn contact_mailto(contact_email: &str) -> String {
    mailto_href(contact_email, None)
}
