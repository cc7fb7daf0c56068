//! Events as the Discovery API returns them
//!
//! The API omits whole substructures whenever it has no data for them, so almost everything here is optional.
//! Turning these records into display strings is the job of the [`normalize`](crate::normalize) module.

use serde::{Deserialize, Serialize};

/// A full event record, as returned by the API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub images: Vec<Image>,
    pub dates: Dates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<Sales>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_ranges: Option<Vec<PriceRange>>,
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifications: Option<Vec<Classification>>,
}

impl RawEvent {
    /// The first embedded venue, if any
    pub fn first_venue(&self) -> Option<&Venue> {
        self.embedded
            .as_ref()
            .and_then(|e| e.venues.as_ref())
            .and_then(|v| v.first())
    }

    pub fn status_code(&self) -> Option<&str> {
        self.dates.status.as_ref().map(|s| s.code.as_str())
    }

    pub fn public_sale(&self) -> Option<&PublicSale> {
        self.sales.as_ref().and_then(|s| s.public.as_ref())
    }

    pub fn first_price_range(&self) -> Option<&PriceRange> {
        self.price_ranges.as_ref().and_then(|p| p.first())
    }

    pub fn first_classification(&self) -> Option<&Classification> {
        self.classifications.as_ref().and_then(|c| c.first())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dates {
    pub start: Start,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DateStatus>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Start {
    /// ISO calendar date (`YYYY-MM-DD`), in the venue's timezone
    #[serde(default)]
    pub local_date: String,
    /// `HH:MM:SS`, when the start time is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
}

/// Sale status, e.g. `onsale`, `offsale`, `cancelled`, `rescheduled`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DateStatus {
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sales {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<PublicSale>,
}

/// The public sale window. Timestamps are RFC 3339 strings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub currency: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Embedded {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venues: Option<Vec<Venue>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Named>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Named>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Named>,
}

/// The `{ "name": ... }` wrapper the API uses for cities, states, segments, genres...
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<Named>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Named>,
}


/// One page of an event listing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    embedded: Option<EmbeddedEvents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct EmbeddedEvents {
    #[serde(default)]
    events: Vec<RawEvent>,
}

impl EventPage {
    /// The events of this page. A listing with no match has no `_embedded` at all, which is just an empty page
    pub fn events(&self) -> &[RawEvent] {
        match &self.embedded {
            None => &[],
            Some(e) => e.events.as_slice(),
        }
    }

    pub fn into_events(self) -> Vec<RawEvent> {
        self.embedded.map(|e| e.events).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_record() {
        let json = r#"{
            "id": "vv1",
            "name": "Some show",
            "url": "https://example.com/e/vv1",
            "dates": { "start": { "localDate": "2025-03-15" } }
        }"#;
        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert!(event.images.is_empty());
        assert!(event.first_venue().is_none());
        assert!(event.public_sale().is_none());
        assert!(event.status_code().is_none());
        assert_eq!(event.dates.start.local_time, None);
    }

    #[test]
    fn full_record() {
        let json = r#"{
            "id": "G5v",
            "name": "Phoenix Suns vs. Lakers",
            "url": "https://example.com/e/G5v",
            "type": "event",
            "images": [ { "url": "https://img/a.jpg", "width": 305, "height": 225, "ratio": "4_3" } ],
            "dates": {
                "start": { "localDate": "2025-03-15", "localTime": "19:00:00" },
                "status": { "code": "onsale" }
            },
            "sales": { "public": { "startDateTime": "2024-07-25T17:00:00Z", "endDateTime": "2025-03-16T02:00:00Z" } },
            "priceRanges": [ { "type": "standard", "currency": "USD", "min": 20.0, "max": 80.5 } ],
            "_embedded": { "venues": [ {
                "name": "Footprint Center",
                "city": { "name": "Phoenix" },
                "state": { "name": "Arizona", "stateCode": "AZ" },
                "country": { "name": "United States Of America" }
            } ] },
            "classifications": [ { "segment": { "name": "Sports" }, "genre": { "name": "Basketball" } } ]
        }"#;
        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.status_code(), Some("onsale"));
        assert_eq!(event.first_venue().unwrap().name, "Footprint Center");
        assert_eq!(event.first_price_range().unwrap().max, 80.5);
        assert_eq!(
            event.public_sale().unwrap().start_date_time.as_deref(),
            Some("2024-07-25T17:00:00Z")
        );
        assert_eq!(event.first_classification().unwrap().genre.as_ref().unwrap().name, "Basketball");
    }

    #[test]
    fn page_without_results() {
        let page: EventPage = serde_json::from_str(r#"{ "page": { "size": 12, "totalElements": 0, "totalPages": 0, "number": 0 } }"#).unwrap();
        assert!(page.events().is_empty());
        assert_eq!(page.page.unwrap().total_elements, 0);
    }
}
