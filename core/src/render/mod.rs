use std::sync::{Arc, Mutex};

pub mod html;

pub use html::escape;

/// The display region the gallery draws into. Every call replaces the whole region.
pub trait RenderTarget: Send + Sync {
    fn replace(&self, markup: String);
}

impl<T: RenderTarget + ?Sized> RenderTarget for Arc<T> {
    fn replace(&self, markup: String) {
        (**self).replace(markup)
    }
}

/// In-memory display region, cloned handles share the same contents.
#[derive(Debug, Clone, Default)]
pub struct HtmlBuffer {
    contents: Arc<Mutex<String>>,
    replaced: Arc<Mutex<Vec<String>>>,
}

impl HtmlBuffer {
    pub fn new() -> HtmlBuffer {
        HtmlBuffer::default()
    }

    pub fn contents(&self) -> String {
        self.contents.lock().expect("lock poisoned").clone()
    }

    /// Everything that was shown, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.replaced.lock().expect("lock poisoned").clone()
    }
}

impl RenderTarget for HtmlBuffer {
    fn replace(&self, markup: String) {
        self.replaced
            .lock()
            .expect("lock poisoned")
            .push(markup.clone());
        *self.contents.lock().expect("lock poisoned") = markup;
    }
}
