//! Resize-driven rebalancing of the main strip and the overflow surface.
//!
//! [`rebalance`] is the pass itself: it runs against the current geometry of
//! the main strip's host and moves every item that wrapped past the first row
//! into the overflow surface. [`LayoutReconciler`] decides when passes run:
//! it subscribes to a [`ResizeSignal`] and schedules each pass two frames out
//! through a [`FrameScheduler`], so measurements are taken after the host has
//! laid out the new size.

use std::sync::{Arc, Weak};

use horizon_toolstrip_core::logging::targets;
use horizon_toolstrip_core::{ConnectionId, FrameCallbackId, FrameScheduler};
use parking_lot::Mutex;

use crate::overflow::OverflowSurface;
use crate::primary_bar::PrimaryBar;
use crate::resize::ResizeSignal;
use crate::toolbar::ToolbarInner;

/// Why a reconciliation pass did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The main strip's host is hidden or not laid out.
    ZeroHeight,
    /// There are no items to place.
    Empty,
    /// The host could not report where the strip's items are.
    Unmeasured,
    /// The toolbar was torn down before the pass ran.
    Destroyed,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// The pass made no changes.
    Skipped(SkipReason),
    /// Overflow items were moved back onto the main strip, but the strip
    /// could not be measured afterwards. The overflow is empty and the
    /// trigger hidden.
    Restored {
        /// Names on the main strip, in order.
        visible: Vec<String>,
    },
    /// The items were partitioned between the main strip and the overflow.
    Balanced {
        /// Top offset of the reference row.
        first_row_top: f32,
        /// Number of items moved into the overflow surface.
        overflow_count: usize,
        /// Names left on the main strip, trigger included, in order.
        visible: Vec<String>,
    },
}

impl ReconcileOutcome {
    /// Whether the pass was skipped without touching either surface.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Run one rebalancing pass.
///
/// Every overflow item is first moved back to the end of the main strip and
/// the trigger is seated in front. Items whose top offset is below the first
/// item's are then moved, in order, to the overflow surface, and the trigger
/// is re-appended at the end iff the overflow is non-empty.
///
/// A pass on a hidden host, or on a strip whose items the host can't measure
/// yet, returns [`ReconcileOutcome::Skipped`] before anything is moved.
///
/// Running the pass twice with unchanged geometry gives the same result.
#[tracing::instrument(skip_all, target = "horizon_toolstrip::reconcile", level = "debug")]
pub fn rebalance(bar: &mut PrimaryBar, overflow: &mut OverflowSurface) -> ReconcileOutcome {
    if bar.host().client_height() <= 0.0 {
        tracing::debug!(target: targets::RECONCILE, "container has zero height, skipping pass");
        return ReconcileOutcome::Skipped(SkipReason::ZeroHeight);
    }

    let host = bar.host();
    if let Some(item) = bar.items().iter().find(|item| host.offset_top(item.name()).is_none()) {
        tracing::debug!(target: targets::RECONCILE, item = %item.name(), "item not laid out, skipping pass");
        return ReconcileOutcome::Skipped(SkipReason::Unmeasured);
    }

    for item in overflow.drain() {
        let name = item.name().to_string();
        if let Err(err) = bar.collection_mut().push(item) {
            tracing::warn!(target: targets::RECONCILE, item = %name, %err, "failed to restore overflow item");
        }
    }

    if bar.items().iter().all(|item| item.is_trigger()) {
        bar.settle_trigger(false);
        tracing::debug!(target: targets::RECONCILE, "no items to place");
        return ReconcileOutcome::Skipped(SkipReason::Empty);
    }

    bar.seat_trigger_first();

    let host = bar.host();
    let Some(first_row_top) = bar.get(0).and_then(|first| host.offset_top(first.name())) else {
        // Restored items are not laid out yet; the next pass partitions them.
        bar.settle_trigger(false);
        let visible = bar.names();
        tracing::debug!(target: targets::RECONCILE, ?visible, "strip not measurable after restoring overflow");
        return ReconcileOutcome::Restored { visible };
    };

    let wrapped: Vec<String> = bar
        .items()
        .iter()
        .skip(1)
        .filter(|item| {
            host.offset_top(item.name())
                .is_some_and(|top| top > first_row_top)
        })
        .map(|item| item.name().to_string())
        .collect();

    for name in &wrapped {
        let moved = bar
            .collection_mut()
            .remove(name)
            .and_then(|item| overflow.add_item(item));
        if let Err(err) = moved {
            tracing::warn!(target: targets::RECONCILE, item = %name, %err, "failed to move item to overflow");
        }
    }

    bar.settle_trigger(!overflow.is_empty());

    let visible = bar.names();
    tracing::debug!(
        target: targets::RECONCILE,
        first_row_top,
        overflow_count = overflow.len(),
        ?visible,
        "reconciled toolbar"
    );

    ReconcileOutcome::Balanced {
        first_row_top,
        overflow_count: overflow.len(),
        visible,
    }
}

/// Schedules deferred passes against a toolbar.
#[derive(Clone)]
struct PassScheduler {
    inner: Weak<ToolbarInner>,
    frames: FrameScheduler,
    pending: Arc<Mutex<Vec<FrameCallbackId>>>,
}

impl PassScheduler {
    fn schedule(&self) -> FrameCallbackId {
        let inner = self.inner.clone();
        let id = self.frames.defer_past_next_frame(move || {
            if let Some(inner) = inner.upgrade() {
                inner.reconcile();
            }
        });

        let mut pending = self.pending.lock();
        pending.retain(|id| self.frames.is_pending(*id));
        pending.push(id);
        id
    }

    fn pending(&self) -> usize {
        self.pending
            .lock()
            .iter()
            .filter(|id| self.frames.is_pending(**id))
            .count()
    }

    fn cancel_all(&self) -> usize {
        let ids = std::mem::take(&mut *self.pending.lock());
        ids.into_iter().filter(|id| self.frames.cancel(*id)).count()
    }
}

type Subscription = (Arc<dyn ResizeSignal>, ConnectionId);

/// Drives reconciliation passes from size-change notifications.
///
/// Each notification closes the overflow surface right away and schedules
/// its own pass after the next rendered frame. Notifications are not
/// coalesced; a redundant pass leaves the toolbar unchanged.
pub struct LayoutReconciler {
    passes: PassScheduler,
    subscription: Mutex<Option<Subscription>>,
}

impl LayoutReconciler {
    pub(crate) fn new(inner: Weak<ToolbarInner>, frames: FrameScheduler) -> Self {
        Self {
            passes: PassScheduler {
                inner,
                frames,
                pending: Arc::new(Mutex::new(Vec::new())),
            },
            subscription: Mutex::new(None),
        }
    }

    /// Start observing `signal`.
    ///
    /// Like a resize observer's first notification, observing schedules an
    /// initial pass. Observing a new signal drops the previous subscription.
    pub(crate) fn observe(&self, signal: Arc<dyn ResizeSignal>) {
        self.unobserve();

        let passes = self.passes.clone();
        let connection = signal.subscribe(Box::new(move |size| {
            tracing::trace!(target: targets::RECONCILE, width = size.width, height = size.height, "container resized");
            if let Some(inner) = passes.inner.upgrade() {
                inner.close_overflow();
            }
            passes.schedule();
        }));

        *self.subscription.lock() = Some((signal, connection));
        self.passes.schedule();
    }

    fn unobserve(&self) -> bool {
        match self.subscription.lock().take() {
            Some((signal, connection)) => signal.unsubscribe(connection),
            None => false,
        }
    }

    /// Whether a resize source is currently observed.
    pub fn is_observing(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Schedule a pass after the next rendered frame.
    pub fn schedule_pass(&self) -> FrameCallbackId {
        self.passes.schedule()
    }

    /// Number of scheduled passes that have not run yet.
    pub fn pending_passes(&self) -> usize {
        self.passes.pending()
    }

    /// Release the resize subscription and cancel pending passes.
    ///
    /// Safe to call more than once.
    pub fn destroy(&self) {
        let unsubscribed = self.unobserve();
        let cancelled = self.passes.cancel_all();
        if unsubscribed || cancelled > 0 {
            tracing::debug!(target: targets::RECONCILE, cancelled, "reconciler stopped");
        }
    }
}

impl std::fmt::Debug for LayoutReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutReconciler")
            .field("observing", &self.is_observing())
            .field("pending_passes", &self.pending_passes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ItemRegistry;
    use crate::config::ToolbarStyle;
    use crate::flow::FlowContainer;
    use crate::host::ItemHost;
    use crate::item::{ItemDescriptor, ItemFactory, TRIGGER_NAME};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Fixture {
        bar: PrimaryBar,
        overflow: OverflowSurface,
        container: FlowContainer,
    }

    fn fixture(width: f32, count: usize) -> Fixture {
        let style = ToolbarStyle::default();
        let factory = ItemFactory::new(style.clone());
        let registry = ItemRegistry::new();
        let container = FlowContainer::with_style(width, &style);
        let mut bar = PrimaryBar::new(
            registry.clone(),
            Box::new(container.clone()),
            factory.create_trigger("More"),
        );
        let overflow = OverflowSurface::new(registry, Box::new(FlowContainer::new(200.0)));

        for i in 0..count {
            let item = factory
                .create(&ItemDescriptor::button(format!("item{i}")))
                .unwrap();
            bar.add_item(item).unwrap();
        }

        Fixture {
            bar,
            overflow,
            container,
        }
    }

    #[test]
    fn test_everything_fits() {
        let mut f = fixture(300.0, 6);
        let outcome = rebalance(&mut f.bar, &mut f.overflow);

        assert_eq!(
            outcome,
            ReconcileOutcome::Balanced {
                first_row_top: 4.0,
                overflow_count: 0,
                visible: (0..6).map(|i| format!("item{i}")).collect(),
            }
        );
        assert!(!f.bar.has_trigger());
    }

    #[test]
    fn test_one_item_overflows() {
        // Six slots fit: the trigger plus item0..item4.
        let mut f = fixture(210.0, 6);
        rebalance(&mut f.bar, &mut f.overflow);

        assert_eq!(f.overflow.names(), vec!["item5"]);
        assert_eq!(f.bar.trigger_index(), Some(5));
        assert_eq!(f.container.row_count(), 1);
    }

    #[test]
    fn test_pass_is_idempotent() {
        let mut f = fixture(120.0, 6);
        let first = rebalance(&mut f.bar, &mut f.overflow);
        let bar = f.bar.names();
        let overflow = f.overflow.names();

        let second = rebalance(&mut f.bar, &mut f.overflow);
        assert_eq!(first, second);
        assert_eq!(f.bar.names(), bar);
        assert_eq!(f.overflow.names(), overflow);
    }

    #[test]
    fn test_zero_height_is_a_no_op() {
        let mut f = fixture(120.0, 6);
        f.container.set_hidden(true);

        assert_eq!(
            rebalance(&mut f.bar, &mut f.overflow),
            ReconcileOutcome::Skipped(SkipReason::ZeroHeight)
        );
        assert_eq!(f.bar.len(), 6);
        assert!(f.overflow.is_empty());
    }

    #[test]
    fn test_empty_bar() {
        let mut f = fixture(120.0, 0);
        assert_eq!(
            rebalance(&mut f.bar, &mut f.overflow),
            ReconcileOutcome::Skipped(SkipReason::Empty)
        );
        assert!(!f.bar.has_trigger());
    }

    /// Wraps a flow container and stops reporting positions on demand.
    struct UnmeasuredHost {
        inner: FlowContainer,
        measurable: Arc<AtomicBool>,
    }

    impl ItemHost for UnmeasuredHost {
        fn attach(&mut self, index: usize, item: &crate::item::ToolbarItem) {
            self.inner.attach(index, item);
        }

        fn detach(&mut self, name: &str) {
            self.inner.detach(name);
        }

        fn offset_top(&self, name: &str) -> Option<f32> {
            if self.measurable.load(Ordering::SeqCst) {
                self.inner.offset_top(name)
            } else {
                None
            }
        }

        fn client_height(&self) -> f32 {
            self.inner.client_height()
        }

        fn set_visible(&mut self, visible: bool) {
            self.inner.set_visible(visible);
        }
    }

    #[test]
    fn test_unmeasurable_host_leaves_overflow_alone() {
        let style = ToolbarStyle::default();
        let factory = ItemFactory::new(style.clone());
        let registry = ItemRegistry::new();
        let measurable = Arc::new(AtomicBool::new(true));
        let host = UnmeasuredHost {
            inner: FlowContainer::with_style(120.0, &style),
            measurable: measurable.clone(),
        };
        let mut bar = PrimaryBar::new(registry.clone(), Box::new(host), factory.create_trigger("More"));
        let mut overflow = OverflowSurface::new(registry, Box::new(FlowContainer::new(200.0)));
        for i in 0..6 {
            bar.add_item(factory.create(&ItemDescriptor::button(format!("item{i}"))).unwrap())
                .unwrap();
        }

        rebalance(&mut bar, &mut overflow);
        let bar_before = bar.names();
        let overflow_before = overflow.names();
        assert_eq!(bar_before, vec!["item0", "item1", TRIGGER_NAME]);

        measurable.store(false, Ordering::SeqCst);
        let outcome = rebalance(&mut bar, &mut overflow);

        assert_eq!(outcome, ReconcileOutcome::Skipped(SkipReason::Unmeasured));
        assert!(outcome.is_skipped());
        assert_eq!(bar.names(), bar_before);
        assert_eq!(overflow.names(), overflow_before);

        measurable.store(true, Ordering::SeqCst);
        assert!(!rebalance(&mut bar, &mut overflow).is_skipped());
        assert_eq!(bar.names(), bar_before);
    }

    #[test]
    fn test_trigger_alone_is_legal() {
        // Only one slot fits on the first row.
        let mut f = fixture(40.0, 3);
        rebalance(&mut f.bar, &mut f.overflow);

        assert_eq!(f.bar.names(), vec![TRIGGER_NAME]);
        assert_eq!(f.overflow.names(), vec!["item0", "item1", "item2"]);
    }
}
