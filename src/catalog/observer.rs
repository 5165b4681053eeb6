//! Observer: a news publisher fanning articles out to its readers.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::PatternError;
use crate::observer::{Subject, Subscriber};
use crate::sink::Sink;

pub struct Reader {
    name: String,
    out: Arc<dyn Sink>,
}

impl Reader {
    pub fn new(name: impl Into<String>, out: Arc<dyn Sink>) -> Self {
        Self {
            name: name.into(),
            out,
        }
    }
}

impl Subscriber<str> for Reader {
    fn update(&self, article: &str) {
        self.out.emit(&format!(
            "Hey {}, a new article is published: '{article}'",
            self.name
        ));
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Default)]
pub struct NewsPublisher {
    readers: Subject<str>,
    latest: Mutex<Option<String>>,
}

impl NewsPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, reader: Arc<dyn Subscriber<str>>) -> bool {
        self.readers.attach(reader)
    }

    pub fn unsubscribe(&self, reader: &Arc<dyn Subscriber<str>>) -> bool {
        self.readers.detach(reader)
    }

    /// Stores the article as the latest one, then notifies every reader.
    pub fn publish_article(&self, article: impl Into<String>) -> usize {
        let article = article.into();
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(article.clone());
        self.readers.notify(&article)
    }

    pub fn latest_article(&self) -> Option<String> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }
}

/// Readers write straight to `sink`, so their lines appear while each
/// article is being delivered.
pub fn run(sink: Arc<dyn Sink>) -> Result<(), PatternError> {
    let publisher = NewsPublisher::new();

    let alice: Arc<dyn Subscriber<str>> = Arc::new(Reader::new("Alice", Arc::clone(&sink)));
    let bob: Arc<dyn Subscriber<str>> = Arc::new(Reader::new("Bob", Arc::clone(&sink)));
    publisher.subscribe(Arc::clone(&alice));
    publisher.subscribe(Arc::clone(&bob));

    let delivered = publisher.publish_article("Introduction to Design Patterns");
    sink.emit(&format!("Delivered to {delivered} readers."));

    publisher.unsubscribe(&alice);
    let delivered = publisher.publish_article("Observer in Depth");
    sink.emit(&format!("Delivered to {delivered} reader."));
    Ok(())
}
