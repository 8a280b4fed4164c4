// ── Reactive panel stream ──
//
// Subscription handle for consumers that render asynchronously (a TUI,
// a websocket bridge). The reconciler itself stays synchronous.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::PanelSnapshot;

/// A subscription to panel snapshots.
///
/// Provides point-in-time access and change notification via
/// [`changed()`](Self::changed) or by converting into a `Stream`.
pub struct PanelStream {
    current: Arc<PanelSnapshot>,
    receiver: watch::Receiver<Arc<PanelSnapshot>>,
}

impl PanelStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<PanelSnapshot>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation (or at the last `changed()`).
    pub fn current(&self) -> &Arc<PanelSnapshot> {
        &self.current
    }

    /// Wait for the next published snapshot.
    /// Returns `None` once the reconciler has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<PanelSnapshot>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    pub fn into_stream(self) -> PanelWatchStream {
        PanelWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding every published snapshot.
pub struct PanelWatchStream {
    inner: WatchStream<Arc<PanelSnapshot>>,
}

impl Stream for PanelWatchStream {
    type Item = Arc<PanelSnapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
