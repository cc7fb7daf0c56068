//! Scenarios that browse a (mocked) event source and save events locally

use std::collections::HashMap;

use async_trait::async_trait;

use eventhub::event::{Dates, EventPage, Start};
use eventhub::normalize;
use eventhub::provider::Toggle;
use eventhub::store::{AddOutcome, Confirmation, MAX_SAVED_EVENTS};
use eventhub::traits::{EventSource, SearchParams};
use eventhub::{Error, Provider, RawEvent, Result, SavedEvents};

/// An event source that serves a fixed set of events, and counts how often it is asked
#[derive(Default)]
struct MockSource {
    events: HashMap<String, RawEvent>,
    n_requests: u32,
}

impl MockSource {
    fn with_events(ids: &[&str]) -> Self {
        let events = ids.iter()
            .map(|id| (id.to_string(), raw_event(id)))
            .collect();
        Self { events, n_requests: 0 }
    }
}

#[async_trait]
impl EventSource for MockSource {
    async fn popular_events(&mut self) -> Result<Vec<RawEvent>> {
        self.n_requests += 1;
        let mut events: Vec<RawEvent> = self.events.values().cloned().collect();
        events.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(events)
    }

    async fn search_events(&mut self, params: &SearchParams) -> Result<EventPage> {
        self.n_requests += 1;
        let keyword = params.keyword.clone().unwrap_or_default();
        let matching: Vec<&RawEvent> = self.events.values().filter(|e| e.name.contains(&keyword)).collect();
        let json = serde_json::json!({ "_embedded": { "events": matching } });
        Ok(serde_json::from_value(json)?)
    }

    async fn event_by_id(&mut self, id: &str) -> Result<RawEvent> {
        self.n_requests += 1;
        self.events.get(id).cloned().ok_or_else(|| Error::Upstream {
            status: 404,
            message: "Evento não encontrado".to_string(),
        })
    }
}

fn raw_event(id: &str) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        name: format!("Show {}", id),
        url: format!("https://tickets.example.com/{}", id),
        images: Vec::new(),
        dates: Dates {
            start: Start { local_date: "2025-05-20".to_string(), local_time: None },
            status: None,
        },
        sales: None,
        price_ranges: None,
        embedded: None,
        classifications: None,
    }
}

fn provider(ids: &[&str]) -> (tempfile::TempDir, Provider<MockSource>) {
    let dir = tempfile::tempdir().unwrap();
    let store = SavedEvents::new(&dir.path().join("saved.json"));
    (dir, Provider::new(MockSource::with_events(ids), store))
}


#[tokio::test]
async fn toggle_saves_then_removes() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (_dir, mut provider) = provider(&["a", "b"]);

    let events = provider.popular().await.unwrap();
    assert_eq!(provider.toggle_saved(&events[0]).unwrap(), Toggle::Saved);
    assert!(provider.local().is_saved("a"));
    assert_eq!(provider.local().events()[0], normalize::to_saved_event(&events[0]));

    assert_eq!(provider.toggle_saved(&events[0]).unwrap(), Toggle::Removed);
    assert!(provider.local().is_saved("a") == false);
    assert!(provider.local().is_empty());
}

#[tokio::test]
async fn toggle_on_a_full_store() {
    let _ = env_logger::builder().is_test(true).try_init();
    let ids = ["1", "2", "3", "4", "5", "6"];
    let (_dir, mut provider) = provider(&ids);

    let events = provider.popular().await.unwrap();
    for event in &events[..MAX_SAVED_EVENTS] {
        assert_eq!(provider.toggle_saved(event).unwrap(), Toggle::Saved);
    }

    let err = provider.toggle_saved(&events[5]).unwrap_err();
    assert!(err.is_capacity());
    assert_eq!(provider.local().len(), MAX_SAVED_EVENTS);

    // Removing still works on a full store
    assert_eq!(provider.toggle_saved(&events[0]).unwrap(), Toggle::Removed);
    assert_eq!(provider.toggle_saved(&events[5]).unwrap(), Toggle::Saved);
    let saved: Vec<&str> = provider.local().events().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(saved, vec!["2", "3", "4", "5", "6"]);
}

#[tokio::test]
async fn save_by_id() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (_dir, mut provider) = provider(&["a", "b", "c", "d", "e", "f"]);

    assert_eq!(provider.save_by_id("a").await.unwrap(), AddOutcome::Added);
    assert_eq!(provider.remote().n_requests, 1);

    // Already saved: the source is not even asked
    assert_eq!(provider.save_by_id("a").await.unwrap(), AddOutcome::AlreadySaved);
    assert_eq!(provider.remote().n_requests, 1);

    assert!(matches!(provider.save_by_id("unknown").await, Err(Error::Upstream { status: 404, .. })));
    assert_eq!(provider.local().len(), 1);

    for id in &["b", "c", "d", "e"] {
        provider.save_by_id(id).await.unwrap();
    }
    let n_requests = provider.remote().n_requests;
    assert!(provider.save_by_id("f").await.unwrap_err().is_capacity());
    assert_eq!(provider.remote().n_requests, n_requests);
}

#[tokio::test]
async fn empty_searches_do_not_reach_the_source() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (_dir, mut provider) = provider(&["a"]);

    let page = provider.search(&SearchParams::default()).await.unwrap();
    assert!(page.events().is_empty());
    let page = provider.search(&SearchParams::keyword("   ")).await.unwrap();
    assert!(page.events().is_empty());
    assert_eq!(provider.remote().n_requests, 0);

    let page = provider.search(&SearchParams::keyword("Show")).await.unwrap();
    assert_eq!(page.events().len(), 1);
    assert_eq!(provider.remote().n_requests, 1);
}

#[tokio::test]
async fn saved_events_survive_a_restart() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (dir, mut provider) = provider(&["a", "b", "c"]);

    provider.save_by_id("c").await.unwrap();
    provider.save_by_id("a").await.unwrap();
    let before = provider.local().events().to_vec();

    let reloaded = SavedEvents::from_file(&dir.path().join("saved.json")).unwrap();
    assert_eq!(reloaded.events(), &before[..]);

    let mut provider = Provider::new(MockSource::with_events(&["a", "b", "c"]), reloaded);
    provider.local_mut().clear_all(Confirmation::Confirmed).unwrap();
    let reloaded = SavedEvents::load_or_default(&dir.path().join("saved.json"));
    assert!(reloaded.is_empty());
}
