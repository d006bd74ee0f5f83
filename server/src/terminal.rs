use std::io::Write;

use async_trait::async_trait;
use camino::Utf8PathBuf as PathBuf;
use gallery_core::{interaction::Interaction, render::RenderTarget};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};

/// Prompts on stderr and reads answers line by line. Alerts go to stdout.
pub struct TerminalInteraction<R> {
    lines: Mutex<Lines<R>>,
}

impl TerminalInteraction<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        TerminalInteraction::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> TerminalInteraction<R> {
    pub fn new(reader: R) -> Self {
        TerminalInteraction {
            lines: Mutex::new(reader.lines()),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Interaction for TerminalInteraction<R> {
    async fn prompt(&self, message: &str) -> Option<String> {
        eprint!("{} ", message);
        let _ = std::io::stderr().flush();
        match self.lines.lock().await.next_line().await {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(%err, "error reading answer");
                None
            }
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        let answer = self.prompt(&format!("{} [y/N]", message)).await;
        matches!(
            answer.map(|a| a.trim().to_lowercase()).as_deref(),
            Some("y" | "yes")
        )
    }

    fn alert(&self, message: &str) {
        println!("{}", message);
    }
}

/// Display region backed by a file that is rewritten on every render.
#[derive(Debug, Clone)]
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    pub fn new(path: PathBuf) -> FileTarget {
        FileTarget { path }
    }
}

impl RenderTarget for FileTarget {
    fn replace(&self, markup: String) {
        if let Err(err) = std::fs::write(&self.path, markup) {
            tracing::error!(%err, path = %self.path, "error writing rendered assets");
        }
    }
}
