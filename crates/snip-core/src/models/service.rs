//! Service catalog

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a service in the fixed catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    Haircut,
    Color,
    Highlights,
    Styling,
}

impl ServiceId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Haircut => "haircut",
            Self::Color => "color",
            Self::Highlights => "highlights",
            Self::Styling => "styling",
        }
    }

    /// Catalog entry for this service
    #[must_use]
    pub const fn info(self) -> &'static Service {
        match self {
            Self::Haircut => &CATALOG[0],
            Self::Color => &CATALOG[1],
            Self::Highlights => &CATALOG[2],
            Self::Styling => &CATALOG[3],
        }
    }

    /// Phrases that count as a mention of this service in free text
    const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Haircut => &["haircut"],
            Self::Color => &["color"],
            Self::Highlights => &["highlights"],
            Self::Styling => &["styling", "style"],
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bookable service: display name, appointment length, price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub id: ServiceId,
    pub name: &'static str,
    pub duration_minutes: u32,
    pub price_dollars: u32,
}

pub const CATALOG: [Service; 4] = [
    Service {
        id: ServiceId::Haircut,
        name: "Haircut",
        duration_minutes: 60,
        price_dollars: 65,
    },
    Service {
        id: ServiceId::Color,
        name: "Color Treatment",
        duration_minutes: 120,
        price_dollars: 120,
    },
    Service {
        id: ServiceId::Highlights,
        name: "Highlights",
        duration_minutes: 150,
        price_dollars: 150,
    },
    Service {
        id: ServiceId::Styling,
        name: "Styling",
        duration_minutes: 45,
        price_dollars: 45,
    },
];

/// Match free text against the catalog by case-insensitive containment.
///
/// Returns the first catalog entry (in catalog order) whose keyword or
/// display name appears in the message.
#[must_use]
pub fn match_service(message: &str) -> Option<ServiceId> {
    let message = message.to_lowercase();
    CATALOG
        .iter()
        .find(|service| {
            service
                .id
                .keywords()
                .iter()
                .any(|keyword| message.contains(keyword))
                || message.contains(&service.name.to_lowercase())
        })
        .map(|service| service.id)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn catalog_entries_resolve_by_id() {
        for service in &CATALOG {
            assert_eq!(service.id.info().name, service.name);
        }
    }

    #[test]
    fn match_service_by_keyword() {
        assert_eq!(match_service("I'd like a haircut"), Some(ServiceId::Haircut));
        assert_eq!(match_service("do you do HIGHLIGHTS?"), Some(ServiceId::Highlights));
        assert_eq!(match_service("just a quick style"), Some(ServiceId::Styling));
    }

    #[test]
    fn match_service_by_display_name() {
        assert_eq!(
            match_service("book me a color treatment"),
            Some(ServiceId::Color)
        );
    }

    #[test]
    fn match_service_rejects_unknown_text() {
        assert_eq!(match_service("a beard trim please"), None);
        assert_eq!(match_service(""), None);
    }

    #[test]
    fn service_id_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ServiceId::Highlights).unwrap(),
            "\"highlights\""
        );
    }
}
