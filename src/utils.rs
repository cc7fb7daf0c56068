//! Some utility functions to print events

use crate::event::RawEvent;
use crate::normalize;
use crate::store::{SavedEvents, MAX_SAVED_EVENTS};

/// A one-line description of an event, as shown in listings
pub fn event_line(event: &RawEvent, is_saved: bool) -> String {
    let saved = if is_saved { "♥" } else { " " };
    let when = match normalize::time(event) {
        Some(time) => format!("{} • {}", normalize::date(event), time),
        None => normalize::date(event),
    };
    format!("{} {}\t{}\t{}\t[{}]\t{}",
        saved,
        event.name,
        when,
        normalize::venue(event),
        normalize::status(event),
        event.id,
    )
}

/// Print a list of events, marking the ones that are saved
pub fn print_event_list(events: &[RawEvent], store: &SavedEvents) {
    if events.is_empty() {
        println!("    (no events)");
        return;
    }
    for event in events {
        println!("    {}", event_line(event, store.is_saved(&event.id)));
    }
}

/// Print every detail of an event
pub fn print_event(event: &RawEvent, is_saved: bool) {
    println!("{}", event.name);
    println!("    Status:     {}", normalize::status(event));
    match normalize::time(event) {
        Some(time) => println!("    Data e Hora: {} • {}", normalize::date(event), time),
        None => println!("    Data e Hora: {}", normalize::date(event)),
    }
    println!("    Local:      {}", normalize::venue(event));
    println!("                {}", normalize::city(event));
    println!("    Preço:      {}", normalize::price(event));
    if let Some(category) = normalize::category(event) {
        println!("    Categoria:  {}", category);
    }
    println!("    Imagem:     {}", normalize::image(event));
    println!("    Ingressos:  {}", event.url);
    println!("    {}", if is_saved { "♥ Salvo" } else { "Não salvo" });
}

/// Print the saved events
pub fn print_saved_events(store: &SavedEvents) {
    println!("{} de {} eventos", store.len(), MAX_SAVED_EVENTS);
    if store.is_empty() {
        println!("    Nenhum evento salvo");
        return;
    }
    for saved in store.events() {
        println!("    {}\t{}\t{}\t{}\t{}",
            saved.name,
            normalize::short_date(saved),
            saved.venue,
            saved.city,
            saved.id,
        );
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{DateStatus, Dates, Start};

    #[test]
    fn listing_line() {
        let event = RawEvent {
            id: "evt-9".to_string(),
            name: "Cancelled show".to_string(),
            url: String::new(),
            images: Vec::new(),
            dates: Dates {
                start: Start { local_date: "2025-07-04".to_string(), local_time: Some("20:00:00".to_string()) },
                status: Some(DateStatus { code: "cancelled".to_string() }),
            },
            sales: None,
            price_ranges: None,
            embedded: None,
            classifications: None,
        };

        assert_eq!(
            event_line(&event, true),
            "♥ Cancelled show\t04 de jul. de 2025 • 20:00:00\tLocal não informado\t[Esgotado]\tevt-9"
        );
    }
}
