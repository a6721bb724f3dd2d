use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use super::document_io::save_document;
use crate::model::document::Document;

/// The document as shared between the event loop and the autosave thread
pub type SharedDocument = Arc<Mutex<Document>>;

pub fn shared(doc: Document) -> SharedDocument {
    Arc::new(Mutex::new(doc))
}

/// Lock the shared document. A panic on the other side of the lock does not
/// leave the lines half-written, so a poisoned lock is still usable.
pub fn lock(doc: &SharedDocument) -> MutexGuard<'_, Document> {
    doc.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Outcome of an autosave tick that found unsaved changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveEvent {
    Saved,
    Failed(String),
}

/// Background thread that saves the document every `interval` while it has
/// unsaved changes. Stops when dropped.
pub struct Autosaver {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Autosaver {
    pub fn spawn(
        doc: SharedDocument,
        path: PathBuf,
        interval: Duration,
        events: Sender<AutosaveEvent>,
    ) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("autosave".into())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            if let Some(event) = tick(&doc, &path) {
                                let _ = events.send(event);
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("autosave stopped");
            })?;
        debug!(interval_secs = interval.as_secs(), "autosave started");
        Ok(Autosaver {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it to finish
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn tick(doc: &SharedDocument, path: &std::path::Path) -> Option<AutosaveEvent> {
    let mut doc = lock(doc);
    if !doc.is_modified() {
        return None;
    }
    match save_document(&mut doc, path) {
        Ok(()) => Some(AutosaveEvent::Saved),
        Err(e) => {
            warn!(error = %e, "autosave failed");
            Some(AutosaveEvent::Failed(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn saves_modified_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.md");
        let doc = shared(Document::new());
        lock(&doc).append_line("- [ ] a");

        let (tx, rx) = mpsc::channel();
        let saver =
            Autosaver::spawn(doc.clone(), path.clone(), Duration::from_millis(10), tx).unwrap();
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), AutosaveEvent::Saved);
        saver.stop();

        assert!(!lock(&doc).is_modified());
        assert_eq!(fs::read_to_string(&path).unwrap(), "- [ ] a\n");
    }

    #[test]
    fn unmodified_document_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.md");
        let doc = shared(Document::new());

        let (tx, rx) = mpsc::channel();
        let saver =
            Autosaver::spawn(doc.clone(), path.clone(), Duration::from_millis(5), tx).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        drop(saver);
        assert!(!path.exists());
    }

    #[test]
    fn reports_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("todo.md");
        let doc = shared(Document::new());
        lock(&doc).append_line("a");

        let (tx, rx) = mpsc::channel();
        let _saver = Autosaver::spawn(doc.clone(), path, Duration::from_millis(10), tx).unwrap();
        match rx.recv_timeout(WAIT).unwrap() {
            AutosaveEvent::Failed(msg) => assert!(msg.contains("could not write")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(lock(&doc).is_modified());
    }
}
