//! Display attributes derived from raw API records
//!
//! Every function here is pure and never fails: whatever part of a [`RawEvent`] is missing,
//! a sentinel string (in the app's pt-BR locale) is returned instead.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::event::RawEvent;
use crate::saved_event::SavedEvent;

/// Shown when an event has no image at all
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x240?text=Sem+Imagem";
/// Images at least this wide are preferred
pub const PREFERRED_IMAGE_WIDTH: u32 = 640;

pub const UNKNOWN_VENUE: &str = "Local não informado";
pub const UNKNOWN_CITY: &str = "Cidade não informada";
pub const UNKNOWN_PRICE: &str = "Preço não informado";
pub const UNKNOWN_SEGMENT: &str = "Não informado";

/// Currency used when a price range does not tell
const DEFAULT_CURRENCY: &str = "USD";

const SHORT_MONTHS: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.",
    "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];


/// Whether tickets can be bought for an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventStatus {
    /// Off sale, cancelled, or the sale window is over
    SoldOut,
    /// The public sale has not started yet
    ComingSoon,
    OnSale,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::SoldOut => "Esgotado",
            EventStatus::ComingSoon => "Em Breve",
            EventStatus::OnSale => "Inscrições Abertas",
        }
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}


/// The first image that is at least [`PREFERRED_IMAGE_WIDTH`] wide, or the first image, or a placeholder
pub fn image(event: &RawEvent) -> String {
    event.images
        .iter()
        .find(|img| img.width >= PREFERRED_IMAGE_WIDTH)
        .or_else(|| event.images.first())
        .map(|img| img.url.clone())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

pub fn venue(event: &RawEvent) -> String {
    match event.first_venue() {
        Some(v) if v.name.is_empty() == false => v.name.clone(),
        _ => UNKNOWN_VENUE.to_string(),
    }
}

/// `"City, State"`, or just `"City"` for venues that have no state
pub fn city(event: &RawEvent) -> String {
    let venue = match event.first_venue() {
        None => return UNKNOWN_CITY.to_string(),
        Some(v) => v,
    };
    let city = match &venue.city {
        Some(c) if c.name.is_empty() == false => &c.name,
        _ => return UNKNOWN_CITY.to_string(),
    };

    match &venue.state {
        Some(state) if state.name.is_empty() == false => format!("{}, {}", city, state.name),
        _ => city.clone(),
    }
}

/// The start date, e.g. `15 de mar. de 2025`.
///
/// Dates that cannot be parsed are returned as they are.
pub fn date(event: &RawEvent) -> String {
    let raw = &event.dates.start.local_date;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(d) => format!("{:02} de {} de {}", d.day(), SHORT_MONTHS[d.month0() as usize], d.year()),
        Err(err) => {
            log::debug!("Event {} has an invalid start date {:?}: {}", event.id, raw, err);
            raw.clone()
        }
    }
}

/// The numeric date of a saved event, e.g. `15/03/2025`
pub fn short_date(saved: &SavedEvent) -> String {
    match NaiveDate::parse_from_str(&saved.date, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => saved.date.clone(),
    }
}

/// The local start time, when the API knows it
pub fn time(event: &RawEvent) -> Option<String> {
    event.dates.start.local_time
        .clone()
        .filter(|t| t.is_empty() == false)
}

/// See [`status_at`]
pub fn status(event: &RawEvent) -> EventStatus {
    status_at(event, Utc::now())
}

/// Whether tickets are available at `now`.
///
/// An `offsale` or `cancelled` status code always wins. Otherwise the public sale window decides,
/// and a missing or unreadable bound does not restrict anything.
pub fn status_at(event: &RawEvent, now: DateTime<Utc>) -> EventStatus {
    if matches!(event.status_code(), Some("offsale") | Some("cancelled")) {
        return EventStatus::SoldOut;
    }

    if let Some(sale) = event.public_sale() {
        let start = sale.start_date_time.as_deref().and_then(parse_timestamp);
        let end = sale.end_date_time.as_deref().and_then(parse_timestamp);

        if let Some(start) = start {
            if now < start {
                return EventStatus::ComingSoon;
            }
        }
        if let Some(end) = end {
            if now > end {
                return EventStatus::SoldOut;
            }
        }
    }

    EventStatus::OnSale
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(err) => {
            log::debug!("Ignoring invalid sale timestamp {:?}: {}", raw, err);
            None
        }
    }
}

/// The first price range, e.g. `US$ 20,00 - US$ 80,00`, or a single amount when min and max are equal
pub fn price(event: &RawEvent) -> String {
    let range = match event.first_price_range() {
        None => return UNKNOWN_PRICE.to_string(),
        Some(r) => r,
    };
    let currency = if range.currency.is_empty() { DEFAULT_CURRENCY } else { &range.currency };

    if range.min == range.max {
        return format_currency(range.min, currency);
    }
    format!("{} - {}", format_currency(range.min, currency), format_currency(range.max, currency))
}

/// `"Segment • Genre"` for the first classification, if there is any
pub fn category(event: &RawEvent) -> Option<String> {
    let classification = event.first_classification()?;
    let segment = classification.segment
        .as_ref()
        .map(|s| s.name.as_str())
        .filter(|s| s.is_empty() == false)
        .unwrap_or(UNKNOWN_SEGMENT);

    match classification.genre.as_ref().filter(|g| g.name.is_empty() == false) {
        Some(genre) => Some(format!("{} • {}", segment, genre.name)),
        None => Some(segment.to_string()),
    }
}

/// Build the summary that is kept when the user saves `event`
pub fn to_saved_event(event: &RawEvent) -> SavedEvent {
    SavedEvent {
        id: event.id.clone(),
        name: event.name.clone(),
        date: event.dates.start.local_date.clone(),
        venue: venue(event),
        city: city(event),
        image_url: image(event),
        url: event.url.clone(),
    }
}


/// Format an amount the pt-BR way: currency symbol, `.` as thousands separator, `,` before the cents
pub fn format_currency(amount: f64, currency: &str) -> String {
    format!("{} {}", currency_symbol(currency), format_amount(amount))
}

fn currency_symbol(code: &str) -> &str {
    match code {
        "BRL" => "R$",
        "USD" => "US$",
        "EUR" => "€",
        "GBP" => "£",
        "CAD" => "CA$",
        "AUD" => "AU$",
        "MXN" => "MX$",
        other => other,
    }
}

fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();

    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, c) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{}{},{:02}", sign, grouped, cents % 100)
}
