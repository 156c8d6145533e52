//! In-memory page source for unit tests

use crate::crawler::fetcher::PageFetcher;
use crate::ShelfError;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Scripted {
    Page(String),
    Status(u16),
}

/// Serves scripted responses per URL
///
/// Responses for a URL are served in the order they were added; the last one
/// repeats forever. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<HashMap<String, u32>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, url: &str, body: &str) {
        self.push(url, Scripted::Page(body.to_string()));
    }

    pub fn status(&self, url: &str, status: u16) {
        self.push(url, Scripted::Status(status));
    }

    pub fn calls(&self, url: &str) -> u32 {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    fn push(&self, url: &str, response: Scripted) {
        self.scripts
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    fn next(&self, url: &str) -> Option<Scripted> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_default() += 1;

        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.get_mut(url)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ShelfError> {
        match self.next(url) {
            Some(Scripted::Page(body)) => Ok(body),
            Some(Scripted::Status(status)) => Err(ShelfError::HttpStatus {
                url: url.to_string(),
                status,
            }),
            None => Err(ShelfError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
