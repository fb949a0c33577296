//! Cafe types

use serde::Serialize;

/// A stored cafe record.
///
/// Field order here is the field order on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl Cafe {
    /// Case-insensitive exact match on `location`.
    pub fn is_located_in(&self, location: &str) -> bool {
        self.location.to_lowercase() == location.to_lowercase()
    }
}

/// Insert payload for a new cafe.
///
/// Required text fields stay optional so that a missing value reaches
/// storage as NULL and is rejected by the column constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCafe {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub seats: Option<String>,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}
