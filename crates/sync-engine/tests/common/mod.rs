//! Shared fixtures: a scripted transport and a minimal store

#![allow(dead_code)]

use futures::channel::mpsc;
use futures::{FutureExt, StreamExt};
use resync_core::{Collection, Event, Item, ItemKey, ProgressEvent, Status};
use resync_network::{
    Exchange, Method, PreparedRequest, RawResponse, Transport, TransportError,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// What a scripted transport saw
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<bytes::Bytes>,
    pub include_credentials: bool,
}

impl SentRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport answering every request with the same script
///
/// Progress events are pushed one at a time with a yield in between, so the
/// executor sees them while the response is still pending.
#[derive(Clone)]
pub struct ScriptedTransport {
    reply: Result<RawResponse, String>,
    progress: Vec<ProgressEvent>,
    reports_progress: bool,
    sent: Arc<Mutex<Vec<SentRequest>>>,
}

impl ScriptedTransport {
    pub fn replying(response: RawResponse) -> Self {
        Self {
            reply: Ok(response),
            progress: Vec::new(),
            reports_progress: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            ..Self::replying(RawResponse::new(200, ""))
        }
    }

    pub fn with_progress(mut self, progress: Vec<ProgressEvent>) -> Self {
        self.progress = progress;
        self.reports_progress = true;
        self
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().expect("lock").clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: PreparedRequest) -> Exchange<'_> {
        self.sent.lock().expect("lock").push(SentRequest {
            method: request.method.clone(),
            url: request.url.clone(),
            headers: request
                .headers
                .iter()
                .map(|(n, v)| (n.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
                .collect(),
            body: request.body.clone(),
            include_credentials: request.credentials == resync_network::CredentialsMode::Include,
        });

        let (tx, rx) = mpsc::unbounded();
        let progress = self.progress.clone();
        let reply = self.reply.clone();

        let response = async move {
            for event in progress {
                let _ = tx.unbounded_send(event);
                tokio::task::yield_now().await;
            }
            reply.map_err(TransportError::Connection)
        }
        .boxed();

        Exchange {
            progress: rx.boxed(),
            response,
        }
    }

    fn reports_progress(&self) -> bool {
        self.reports_progress
    }
}

/// Reducer stand-in: applies events the way a store layer would
#[derive(Debug, Default)]
pub struct TestStore {
    pub items: HashMap<ItemKey, Item>,
    pub collections: HashMap<ItemKey, Collection>,
}

impl TestStore {
    pub fn with_item(mut self, key: &str, item: Item) -> Self {
        self.items.insert(ItemKey::from(key), item);
        self
    }

    /// Applies an event for a single-item resource
    pub fn apply_item_event(&mut self, event: &Event) {
        match event {
            Event::Fetching(e) => {
                if let Some(key) = &e.key {
                    self.items
                        .entry(key.clone())
                        .and_modify(|item| item.status = Status::Fetching)
                        .or_insert_with(|| Item::blank(e.projection.clone()));
                }
            }
            Event::Progress(_) => {}
            Event::Success(e) => {
                if let (Some(key), Some(item)) = (&e.key, &e.item) {
                    self.items.insert(key.clone(), item.clone());
                }
            }
            Event::Error(e) => {
                if let Some(item) = e.key.as_ref().and_then(|key| self.items.get_mut(key)) {
                    item.status = e.to_status();
                }
            }
        }
    }

    /// Applies an event for a collection resource
    pub fn apply_collection_event(&mut self, event: &Event) {
        if let Event::Success(e) = event {
            if let Some(items) = &e.items {
                self.items.extend(items.clone());
            }
            if let (Some(key), Some(collection)) = (&e.key, &e.collection) {
                self.collections.insert(key.clone(), collection.clone());
            }
        }
    }
}
