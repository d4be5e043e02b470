//! "Close all transient overlays" broadcast.
//!
//! Popups, dropdowns and the overflow surface are mutually exclusive. Before
//! an overlay opens it broadcasts a close request on the shared
//! [`OverlayHub`]; every other subscribed overlay hides itself in response.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use horizon_toolstrip_core::{ConnectionId, Signal};

/// Identity of an overlay registered with a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(u64);

impl OverlayId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_OVERLAY_ID: AtomicU64 = AtomicU64::new(1);

/// Shared broadcast channel for closing transient overlays.
///
/// Clones share the same channel.
#[derive(Clone, Default)]
pub struct OverlayHub {
    close_all: Arc<Signal<Option<OverlayId>>>,
}

impl OverlayHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an identity for an overlay that will broadcast on this hub.
    pub fn register(&self) -> OverlayId {
        OverlayId(NEXT_OVERLAY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Ask every subscribed overlay to close.
    pub fn close_all(&self) {
        self.close_all.emit(None);
    }

    /// Ask every overlay except `origin` to close.
    pub fn close_all_except(&self, origin: OverlayId) {
        self.close_all.emit(Some(origin));
    }

    /// Run `on_close` whenever an overlay other than `id` broadcasts.
    pub fn subscribe<F>(&self, id: OverlayId, on_close: F) -> ConnectionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.close_all.connect(move |origin| {
            if *origin != Some(id) {
                on_close();
            }
        })
    }

    pub fn unsubscribe(&self, connection: ConnectionId) -> bool {
        self.close_all.disconnect(connection)
    }

    pub fn subscriber_count(&self) -> usize {
        self.close_all.connection_count()
    }
}

impl std::fmt::Debug for OverlayHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
