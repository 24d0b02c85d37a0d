//! Background thumbnail loading.
//!
//! Thumbnails are produced on a worker thread by an injected loader and handed
//! back one per [`ThumbnailWorker::poll`], so the panel fills in progressively
//! without ever blocking gesture handling.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A loaded thumbnail for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail<T> {
    pub path: PathBuf,
    pub image: T,
}

/// Loads thumbnails on a background thread.
///
/// Failed loads are logged and skipped.
pub struct ThumbnailWorker<T> {
    request_tx: Option<Sender<PathBuf>>,
    result_rx: Receiver<Thumbnail<T>>,
    thread: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> ThumbnailWorker<T> {
    /// Start the worker thread with `loader`.
    pub fn spawn<F>(loader: F) -> io::Result<Self>
    where
        F: Fn(&Path) -> io::Result<T> + Send + 'static,
    {
        let (request_tx, request_rx) = channel::<PathBuf>();
        let (result_tx, result_rx) = channel::<Thumbnail<T>>();

        let handle = thread::Builder::new()
            .name("foldr-thumbnails".to_string())
            .spawn(move || {
                log::debug!("Thumbnail thread started");
                for path in request_rx {
                    match loader(&path) {
                        Ok(image) => {
                            if result_tx.send(Thumbnail { path, image }).is_err() {
                                break;
                            }
                        }
                        Err(e) => log::warn!("No thumbnail for {}: {}", path.display(), e),
                    }
                }
                log::debug!("Thumbnail thread exiting");
            })?;

        Ok(Self {
            request_tx: Some(request_tx),
            result_rx,
            thread: Some(handle),
        })
    }

    /// Queue a thumbnail. Returns false once the worker has stopped.
    pub fn request(&self, path: impl Into<PathBuf>) -> bool {
        self.request_tx
            .as_ref()
            .is_some_and(|tx| tx.send(path.into()).is_ok())
    }

    /// Queue thumbnails for every path, in order.
    pub fn request_all<I>(&self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        paths.into_iter().filter(|path| self.request(path.clone())).count()
    }

    /// Take at most one finished thumbnail (non-blocking).
    pub fn poll(&self) -> Option<Thumbnail<T>> {
        self.result_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next thumbnail.
    pub fn wait(&self, timeout: Duration) -> Option<Thumbnail<T>> {
        match self.result_rx.recv_timeout(timeout) {
            Ok(thumbnail) => Some(thumbnail),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop accepting requests and wait for the thread to finish the queue.
    pub fn shutdown(&mut self) {
        self.request_tx = None;
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::error!("Thumbnail thread panicked");
            }
        }
    }
}

impl<T> Drop for ThumbnailWorker<T> {
    fn drop(&mut self) {
        // Closing the channel ends the thread's loop; it is not joined here.
        self.request_tx = None;
        self.thread = None;
    }
}
