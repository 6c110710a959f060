use std::collections::HashMap;
use std::fmt;
use std::thread;

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::lifecycle::LifecycleError;

pub type ContentId = u64;

type Generator = Box<dyn FnOnce() -> Result<Vec<u8>> + Send + 'static>;
type OnLoad = Box<dyn FnOnce(&LoadedContent) -> Result<()>>;

/// Where the bytes of a content item come from.
pub enum ContentSource {
    /// Fetched by the host; completed through the returned [`ContentHandle`].
    Url(String),
    /// Produced by a closure on a worker thread.
    Generator(Generator),
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.debug_tuple("Url").field(url).finish(),
            Self::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// A queued load plus an optional callback run on the main thread on arrival.
pub struct ContentRequest {
    pub label: String,
    pub source: ContentSource,
    pub on_load: Option<OnLoad>,
}

impl ContentRequest {
    pub fn url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            label: url.clone(),
            source: ContentSource::Url(url),
            on_load: None,
        }
    }

    pub fn generator<F>(label: impl Into<String>, generate: F) -> Self
    where
        F: FnOnce() -> Result<Vec<u8>> + Send + 'static,
    {
        Self {
            label: label.into(),
            source: ContentSource::Generator(Box::new(generate)),
            on_load: None,
        }
    }

    pub fn on_load<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&LoadedContent) -> Result<()> + 'static,
    {
        self.on_load = Some(Box::new(f));
        self
    }
}

/// Bytes handed back by a finished load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedContent {
    pub id: ContentId,
    pub label: String,
    pub bytes: Vec<u8>,
}

enum Handoff {
    Loaded { id: ContentId, bytes: Vec<u8> },
    Failed { id: ContentId, reason: String },
}

/// Completion side of a queued load. `Send`, so it can move to a loader thread.
#[derive(Debug, Clone)]
pub struct ContentHandle {
    id: ContentId,
    tx: Sender<Handoff>,
}

impl ContentHandle {
    pub fn id(&self) -> ContentId {
        self.id
    }

    pub fn finish(self, bytes: Vec<u8>) {
        // A closed channel means the queue was disposed; the result is moot.
        let _ = self.tx.send(Handoff::Loaded { id: self.id, bytes });
    }

    pub fn fail(self, reason: impl Into<String>) {
        let _ = self.tx.send(Handoff::Failed {
            id: self.id,
            reason: reason.into(),
        });
    }
}

struct PendingItem {
    label: String,
    on_load: Option<OnLoad>,
}

/// Asset queue with a pending count.
pub struct ContentQueue {
    next_id: ContentId,
    pending: HashMap<ContentId, PendingItem>,
    loaded: usize,
    total: usize,
    tx: Sender<Handoff>,
    rx: Receiver<Handoff>,
}

impl ContentQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            next_id: 0,
            pending: HashMap::new(),
            loaded: 0,
            total: 0,
            tx,
            rx,
        }
    }

    /// Queues `request`. Generator sources start immediately on a worker thread.
    pub fn add(&mut self, request: ContentRequest) -> ContentHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.total += 1;

        let handle = ContentHandle { id, tx: self.tx.clone() };
        let ContentRequest { label, source, on_load } = request;

        match source {
            ContentSource::Url(url) => log::debug!("content #{id} queued: {url}"),
            ContentSource::Generator(generate) => {
                log::debug!("content #{id} generating: {label}");
                let worker = handle.clone();
                let spawned = thread::Builder::new()
                    .name(format!("content-{id}"))
                    .spawn(move || match generate() {
                        Ok(bytes) => worker.finish(bytes),
                        Err(e) => worker.fail(format!("{e:#}")),
                    });
                if let Err(e) = spawned {
                    handle.clone().fail(format!("failed to spawn loader: {e}"));
                }
            }
        }

        self.pending.insert(id, PendingItem { label, on_load });
        handle
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// `(loaded, total)` over the lifetime of the queue.
    pub fn progress(&self) -> (usize, usize) {
        (self.loaded, self.total)
    }

    /// Consumes every handoff that has arrived so far.
    ///
    /// Runs `on_load` callbacks in arrival order. All arrived handoffs are
    /// consumed even when one fails; the first failure is returned.
    pub fn drain(&mut self) -> Result<usize, LifecycleError> {
        let mut drained = 0;
        let mut first_failure = None;

        while let Ok(handoff) = self.rx.try_recv() {
            let (id, outcome) = match handoff {
                Handoff::Loaded { id, bytes } => (id, Ok(bytes)),
                Handoff::Failed { id, reason } => (id, Err(reason)),
            };

            let Some(item) = self.pending.remove(&id) else {
                log::warn!("content #{id} completed twice; ignoring");
                continue;
            };
            drained += 1;

            let result = outcome.and_then(|bytes| {
                let content = LoadedContent { id, label: item.label.clone(), bytes };
                match item.on_load {
                    Some(on_load) => on_load(&content).map_err(|e| format!("{e:#}")),
                    None => Ok(()),
                }
            });

            match result {
                Ok(()) => {
                    self.loaded += 1;
                    log::debug!("content #{id} loaded: {}", item.label);
                }
                Err(reason) => {
                    log::error!("content #{id} failed: {}: {reason}", item.label);
                    first_failure.get_or_insert(LifecycleError::ContentFailed {
                        label: item.label,
                        reason,
                    });
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(drained),
        }
    }
}

impl Default for ContentQueue {
    fn default() -> Self {
        Self::new()
    }
}
