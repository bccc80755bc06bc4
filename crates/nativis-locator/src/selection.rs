use nativis_core::Location;
use serde::Serialize;

/// At most one selected location id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionState(Option<String>);

impl SelectionState {
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn of(id: impl Into<String>) -> Self {
        Self(Some(id.into()))
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.0.as_deref() == Some(id)
    }

    /// Selection to keep after the visible subset changed.
    ///
    /// A selection that is no longer part of `subset` is cleared, so the popup
    /// never points at a marker that is not on the map.
    #[must_use]
    pub fn reconcile(self, subset: &[&Location]) -> Self {
        match self.0 {
            Some(id) if subset.iter().any(|loc| loc.id == id) => Self(Some(id)),
            _ => Self(None),
        }
    }
}
