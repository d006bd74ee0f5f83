use std::sync::Mutex;

use async_trait::async_trait;

/// Dialogs shown to the user: free text prompt, yes/no confirmation, and notices.
#[async_trait]
pub trait Interaction: Send + Sync {
    /// None when the user dismissed the prompt.
    async fn prompt(&self, message: &str) -> Option<String>;
    async fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Opens a download link outside the gallery, with no way back to it.
#[async_trait]
pub trait LinkOpener: Send + Sync {
    async fn open(&self, link: &str) -> eyre::Result<()>;
}

/// Answers known up front, e.g. submitted form fields. Alerts are collected.
#[derive(Debug, Default)]
pub struct PresetAnswers {
    prompt: Option<String>,
    confirm: bool,
    alerts: Mutex<Vec<String>>,
}

impl PresetAnswers {
    pub fn new(prompt: Option<String>, confirm: bool) -> PresetAnswers {
        PresetAnswers {
            prompt,
            confirm,
            alerts: Mutex::default(),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl Interaction for PresetAnswers {
    async fn prompt(&self, _message: &str) -> Option<String> {
        self.prompt.clone()
    }

    async fn confirm(&self, _message: &str) -> bool {
        self.confirm
    }

    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .expect("lock poisoned")
            .push(message.to_owned());
    }
}
