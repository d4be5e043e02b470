//! Size-change notification source.

use horizon_toolstrip_core::{ConnectionId, Signal};

use crate::geometry::Size;

/// Callback invoked with the observed container's new size.
pub type ResizeCallback = Box<dyn Fn(Size) + Send + Sync>;

/// Something that reports size changes of the toolbar's container.
///
/// The reconciler only needs to subscribe and unsubscribe, so any resize
/// observer can stand behind this trait. [`Signal<Size>`] implements it,
/// which is what [`FlowContainer::resized`](crate::FlowContainer::resized)
/// hands out.
pub trait ResizeSignal: Send + Sync {
    /// Start receiving notifications.
    fn subscribe(&self, callback: ResizeCallback) -> ConnectionId;

    /// Stop receiving notifications. Returns `false` if already unsubscribed.
    fn unsubscribe(&self, connection: ConnectionId) -> bool;
}

impl ResizeSignal for Signal<Size> {
    fn subscribe(&self, callback: ResizeCallback) -> ConnectionId {
        self.connect(move |size| callback(*size))
    }

    fn unsubscribe(&self, connection: ConnectionId) -> bool {
        self.disconnect(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_signal_as_resize_source() {
        let signal = Signal::<Size>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        let id = ResizeSignal::subscribe(&signal, Box::new(move |size| seen_clone.lock().push(size)));

        signal.emit(Size::new(100.0, 40.0));
        assert!(ResizeSignal::unsubscribe(&signal, id));
        signal.emit(Size::new(50.0, 40.0));

        assert_eq!(*seen.lock(), vec![Size::new(100.0, 40.0)]);
    }
}
