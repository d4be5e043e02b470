//! The toolbar façade.
//!
//! [`Toolbar`] composes the main strip, the overflow surface and the layout
//! reconciler behind one handle. Items are added through
//! [`insert_item`](Toolbar::insert_item); where each item is shown is decided
//! by reconciliation passes that run after the container is resized.
//!
//! # Example
//!
//! ```
//! use horizon_toolstrip::{FlowContainer, NoContainers, ToolbarBuilder, ToolbarConfig, ToolbarStyle};
//! use horizon_toolstrip_core::FrameScheduler;
//!
//! let frames = FrameScheduler::new();
//! let style = ToolbarStyle::default();
//! let container = FlowContainer::with_style(120.0, &style);
//!
//! let toolbar = ToolbarBuilder::new(ToolbarConfig::editor_defaults())
//!     .with_frames(frames.clone())
//!     .mount(&container, FlowContainer::with_style(200.0, &style), &NoContainers)
//!     .unwrap();
//!
//! // Passes run two frames after a resize notification.
//! frames.run_until_idle(4);
//! assert!(toolbar.has_trigger());
//! assert!(!toolbar.overflow_items().is_empty());
//! ```

use std::sync::Arc;

use horizon_toolstrip_core::logging::targets;
use horizon_toolstrip_core::{ConnectionId, FrameScheduler, Signal};
use parking_lot::Mutex;

use crate::collection::ItemRegistry;
use crate::config::ToolbarConfig;
use crate::error::{ToolbarError, ToolbarResult};
use crate::flow::FlowContainer;
use crate::host::ItemHost;
use crate::item::{ItemDescriptor, ItemFactory, ToolbarItem, TRIGGER_NAME};
use crate::mount::{resolve_mount, ContainerLookup, MountLocation, MountTarget, ResolvedMount};
use crate::overflow::OverflowSurface;
use crate::overlay::{OverlayHub, OverlayId};
use crate::primary_bar::PrimaryBar;
use crate::reconciler::{rebalance, LayoutReconciler, ReconcileOutcome, SkipReason};
use crate::resize::ResizeSignal;

/// Notifications emitted by a [`Toolbar`].
///
/// Slots are never invoked while the toolbar's state is locked, so they may
/// call back into the toolbar.
#[derive(Default)]
pub struct ToolbarSignals {
    /// The overflow surface was shown.
    pub overflow_opened: Signal<()>,
    /// The overflow surface was hidden.
    pub overflow_closed: Signal<()>,
    /// A reconciliation pass finished.
    pub reconciled: Signal<ReconcileOutcome>,
    /// An item with an event was activated. Carries the event name.
    pub item_triggered: Signal<String>,
}

pub(crate) struct ToolbarState {
    bar: PrimaryBar,
    overflow: OverflowSurface,
    destroyed: bool,
}

/// State shared between the façade, frame callbacks and signal slots.
pub(crate) struct ToolbarInner {
    state: Mutex<ToolbarState>,
    signals: ToolbarSignals,
    overlays: OverlayHub,
    overlay_id: OverlayId,
}

impl ToolbarInner {
    pub(crate) fn reconcile(&self) -> ReconcileOutcome {
        let outcome = {
            let mut state = self.state.lock();
            if state.destroyed {
                return ReconcileOutcome::Skipped(SkipReason::Destroyed);
            }
            let ToolbarState { bar, overflow, .. } = &mut *state;
            rebalance(bar, overflow)
        };

        self.signals.reconciled.emit(outcome.clone());
        outcome
    }

    pub(crate) fn close_overflow(&self) -> bool {
        let closed = {
            let mut state = self.state.lock();
            !state.destroyed && state.overflow.close()
        };
        if closed {
            self.signals.overflow_closed.emit(());
        }
        closed
    }

    fn open_overflow(&self) -> bool {
        {
            let state = self.state.lock();
            if state.destroyed || state.overflow.is_open() || state.overflow.is_empty() {
                return false;
            }
        }

        self.overlays.close_all_except(self.overlay_id);

        let opened = self.state.lock().overflow.open();
        if opened {
            self.signals.overflow_opened.emit(());
        }
        opened
    }
}

/// Builds a [`Toolbar`] from a [`ToolbarConfig`].
pub struct ToolbarBuilder {
    config: ToolbarConfig,
    frames: FrameScheduler,
    overlays: OverlayHub,
}

impl ToolbarBuilder {
    pub fn new(config: ToolbarConfig) -> Self {
        Self {
            config,
            frames: FrameScheduler::new(),
            overlays: OverlayHub::new(),
        }
    }

    /// Use the host's frame scheduler.
    pub fn with_frames(mut self, frames: FrameScheduler) -> Self {
        self.frames = frames;
        self
    }

    /// Share an overlay hub with the host's other popups.
    pub fn with_overlays(mut self, overlays: OverlayHub) -> Self {
        self.overlays = overlays;
        self
    }

    /// Mount at the location named by the configuration.
    ///
    /// `inline` is the editor's own toolbar section and is used whenever the
    /// configured container can't be found. `overflow` renders the overflow
    /// surface.
    pub fn mount(
        self,
        inline: &FlowContainer,
        overflow: FlowContainer,
        lookup: &dyn ContainerLookup,
    ) -> ToolbarResult<Toolbar> {
        let target = MountTarget::from(self.config.mount.clone());
        self.mount_at(target, inline, overflow, lookup)
    }

    /// Mount at an explicit target.
    pub fn mount_at(
        self,
        target: MountTarget,
        inline: &FlowContainer,
        overflow: FlowContainer,
        lookup: &dyn ContainerLookup,
    ) -> ToolbarResult<Toolbar> {
        let resolved = resolve_mount(target, inline, lookup);
        let resize: Arc<dyn ResizeSignal> = resolved.container.resized();
        self.build(
            Box::new(resolved.container.clone()),
            Box::new(overflow),
            resize,
            Some(resolved),
        )
    }

    /// Build against arbitrary hosts and resize source.
    pub fn build_with_hosts(
        self,
        bar_host: Box<dyn ItemHost>,
        overflow_host: Box<dyn ItemHost>,
        resize: Arc<dyn ResizeSignal>,
    ) -> ToolbarResult<Toolbar> {
        self.build(bar_host, overflow_host, resize, None)
    }

    fn build(
        self,
        bar_host: Box<dyn ItemHost>,
        overflow_host: Box<dyn ItemHost>,
        resize: Arc<dyn ResizeSignal>,
        mount: Option<ResolvedMount>,
    ) -> ToolbarResult<Toolbar> {
        let factory = ItemFactory::new(self.config.style.clone());
        let registry = ItemRegistry::new();
        let trigger = factory.create_trigger(&self.config.trigger_tooltip);
        let mut bar = PrimaryBar::new(registry.clone(), bar_host, trigger);

        let populated = self.config.items.iter().try_for_each(|descriptor| {
            let item = factory.create(descriptor)?;
            bar.add_item(item).map(|_| ())
        });
        if let Err(err) = populated {
            bar.clear();
            return Err(err);
        }

        let overflow = OverflowSurface::new(registry, overflow_host);
        let overlay_id = self.overlays.register();
        let inner = Arc::new(ToolbarInner {
            state: Mutex::new(ToolbarState {
                bar,
                overflow,
                destroyed: false,
            }),
            signals: ToolbarSignals::default(),
            overlays: self.overlays.clone(),
            overlay_id,
        });

        let weak = Arc::downgrade(&inner);
        let overlay_connection = self.overlays.subscribe(overlay_id, move || {
            if let Some(inner) = weak.upgrade() {
                inner.close_overflow();
            }
        });

        let reconciler = LayoutReconciler::new(Arc::downgrade(&inner), self.frames.clone());
        reconciler.observe(resize);

        tracing::debug!(
            target: targets::TOOLBAR,
            items = self.config.items.len(),
            location = ?mount.as_ref().map(|m| m.location),
            "toolbar created"
        );

        Ok(Toolbar {
            inner,
            reconciler,
            factory,
            frames: self.frames,
            config: self.config,
            mount,
            overlay_connection: Mutex::new(Some(overlay_connection)),
        })
    }
}

/// An adaptive toolbar with an overflow ("more") surface.
///
/// The trigger is shown, last on the main strip, exactly when the overflow
/// surface holds at least one item.
pub struct Toolbar {
    inner: Arc<ToolbarInner>,
    reconciler: LayoutReconciler,
    factory: ItemFactory,
    frames: FrameScheduler,
    config: ToolbarConfig,
    mount: Option<ResolvedMount>,
    overlay_connection: Mutex<Option<ConnectionId>>,
}

impl Toolbar {
    /// Insert an item into the main strip.
    ///
    /// The index is clamped, and never lands after the trigger. A pass is
    /// scheduled so the new item is balanced on the next frames. Returns the
    /// position the item landed at.
    pub fn insert_item(&self, index: usize, item: ToolbarItem) -> ToolbarResult<usize> {
        let name = item.name().to_string();
        let index = {
            let mut state = self.inner.state.lock();
            if state.destroyed {
                return Err(ToolbarError::Destroyed);
            }
            state.bar.insert_item(index, item)?
        };

        tracing::debug!(target: targets::TOOLBAR, item = %name, index, "item inserted");
        self.reconciler.schedule_pass();
        Ok(index)
    }

    /// Build an item from a descriptor and insert it.
    pub fn insert_descriptor(&self, index: usize, descriptor: &ItemDescriptor) -> ToolbarResult<usize> {
        let item = self.factory.create(descriptor)?;
        self.insert_item(index, item)
    }

    /// Append an item to the main strip, before the trigger.
    pub fn add_item(&self, item: ToolbarItem) -> ToolbarResult<usize> {
        self.insert_item(usize::MAX, item)
    }

    /// Remove an item from whichever surface holds it.
    pub fn remove_item(&self, name: &str) -> ToolbarResult<ToolbarItem> {
        let (item, closed) = {
            let mut guard = self.inner.state.lock();
            if guard.destroyed {
                return Err(ToolbarError::Destroyed);
            }
            let state = &mut *guard;

            if state.overflow.contains(name) {
                let item = state.overflow.remove_item(name)?;
                let emptied = state.overflow.is_empty();
                let closed = emptied && state.overflow.close();
                state.bar.sync_trigger(!emptied);
                (item, closed)
            } else {
                (state.bar.remove_item(name)?, false)
            }
        };

        if closed {
            self.inner.signals.overflow_closed.emit(());
        }
        tracing::debug!(target: targets::TOOLBAR, item = %name, "item removed");
        self.reconciler.schedule_pass();
        Ok(item)
    }

    /// Items on the main strip, trigger included, in display order.
    pub fn items(&self) -> Vec<ToolbarItem> {
        self.inner.state.lock().bar.items().to_vec()
    }

    /// Items in the overflow surface, in display order.
    pub fn overflow_items(&self) -> Vec<ToolbarItem> {
        self.inner.state.lock().overflow.items().to_vec()
    }

    /// Position of the named item on the main strip.
    pub fn index_of_item(&self, name: &str) -> Option<usize> {
        self.inner.state.lock().bar.index_of(name)
    }

    /// The item at `index` on the main strip.
    pub fn item(&self, index: usize) -> Option<ToolbarItem> {
        self.inner.state.lock().bar.get(index).cloned()
    }

    /// Whether the overflow trigger is shown.
    pub fn has_trigger(&self) -> bool {
        self.inner.state.lock().bar.has_trigger()
    }

    pub fn is_overflow_open(&self) -> bool {
        self.inner.state.lock().overflow.is_open()
    }

    /// Show the overflow surface, closing every other overlay on the hub.
    ///
    /// Does nothing while the overflow is empty. Returns `true` if it opened.
    pub fn open_overflow(&self) -> bool {
        self.inner.open_overflow()
    }

    /// Hide the overflow surface. Returns `true` if it was open.
    pub fn close_overflow(&self) -> bool {
        self.inner.close_overflow()
    }

    /// Toggle the overflow surface, as a click on the trigger does.
    ///
    /// Returns whether the surface is open afterwards.
    pub fn trigger_clicked(&self) -> bool {
        if self.is_overflow_open() {
            self.close_overflow();
            false
        } else {
            self.open_overflow()
        }
    }

    /// Activate the named item.
    ///
    /// The trigger toggles the overflow surface. Any other item emits
    /// [`ToolbarSignals::item_triggered`] with its event, if it has one; an
    /// item activated from the overflow surface closes it first.
    pub fn activate(&self, name: &str) -> ToolbarResult<()> {
        if name == TRIGGER_NAME {
            if self.is_destroyed() {
                return Err(ToolbarError::Destroyed);
            }
            self.trigger_clicked();
            return Ok(());
        }

        let (event, in_overflow) = {
            let state = self.inner.state.lock();
            if state.destroyed {
                return Err(ToolbarError::Destroyed);
            }
            let event_of = |item: &ToolbarItem| item.event().map(str::to_string);

            if let Some(item) = state.bar.items().iter().find(|item| item.name() == name) {
                (event_of(item), false)
            } else if let Some(item) = state.overflow.items().iter().find(|item| item.name() == name) {
                (event_of(item), true)
            } else {
                return Err(ToolbarError::NotFound(name.to_string()));
            }
        };

        if in_overflow {
            self.inner.close_overflow();
        }
        if let Some(event) = event {
            tracing::trace!(target: targets::TOOLBAR, item = %name, %event, "item activated");
            self.inner.signals.item_triggered.emit(event);
        }
        Ok(())
    }

    /// Run a pass immediately instead of waiting for the frame scheduler.
    pub fn reconcile_now(&self) -> ReconcileOutcome {
        self.inner.reconcile()
    }

    /// Hide the mounted container. Passes are no-ops while hidden.
    pub fn hide(&self) {
        if let Some(mount) = &self.mount {
            mount.container.set_hidden(true);
        }
    }

    /// Show the mounted container again.
    pub fn show(&self) {
        if let Some(mount) = &self.mount {
            mount.container.set_hidden(false);
        }
    }

    /// Where the toolbar ended up, if it was mounted.
    pub fn mount_location(&self) -> Option<MountLocation> {
        self.mount.as_ref().map(|m| m.location)
    }

    /// The container the main strip renders into, if it was mounted.
    pub fn container(&self) -> Option<&FlowContainer> {
        self.mount.as_ref().map(|m| &m.container)
    }

    pub fn signals(&self) -> &ToolbarSignals {
        &self.inner.signals
    }

    pub fn overlays(&self) -> &OverlayHub {
        &self.inner.overlays
    }

    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    pub fn reconciler(&self) -> &LayoutReconciler {
        &self.reconciler
    }

    pub fn factory(&self) -> &ItemFactory {
        &self.factory
    }

    pub fn config(&self) -> &ToolbarConfig {
        &self.config
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.state.lock().destroyed
    }

    /// Tear the toolbar down.
    ///
    /// Releases the resize subscription, cancels pending passes, leaves the
    /// overlay hub and detaches every item. Safe to call more than once; also
    /// runs on drop.
    pub fn destroy(&self) {
        let closed = {
            let mut state = self.inner.state.lock();
            if state.destroyed {
                return;
            }
            state.destroyed = true;
            let closed = state.overflow.close();
            state.overflow.drain();
            state.bar.clear();
            closed
        };

        self.reconciler.destroy();
        if let Some(connection) = self.overlay_connection.lock().take() {
            self.inner.overlays.unsubscribe(connection);
        }
        if closed {
            self.inner.signals.overflow_closed.emit(());
        }
        tracing::debug!(target: targets::TOOLBAR, "toolbar destroyed");
    }
}

impl Drop for Toolbar {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for Toolbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Toolbar")
            .field("bar", &state.bar)
            .field("overflow", &state.overflow)
            .field("destroyed", &state.destroyed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolbarStyle;
    use crate::mount::NoContainers;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn names(items: &[ToolbarItem]) -> Vec<String> {
        items.iter().map(|item| item.name().to_string()).collect()
    }

    fn config(count: usize) -> ToolbarConfig {
        ToolbarConfig::new().with_items(
            (0..count).map(|i| ItemDescriptor::button(format!("item{i}")).with_event(format!("event{i}"))),
        )
    }

    fn toolbar(width: f32, count: usize) -> (Toolbar, FlowContainer) {
        let style = ToolbarStyle::default();
        let container = FlowContainer::with_style(width, &style);
        let toolbar = ToolbarBuilder::new(config(count))
            .mount(&container, FlowContainer::with_style(200.0, &style), &NoContainers)
            .unwrap();
        (toolbar, container)
    }

    #[test]
    fn test_initial_pass_is_deferred() {
        let (toolbar, _) = toolbar(120.0, 6);
        assert_eq!(toolbar.items().len(), 6);

        toolbar.frames().run_frame();
        assert!(toolbar.overflow_items().is_empty());

        toolbar.frames().run_frame();
        assert_eq!(names(&toolbar.items()), vec!["item0", "item1", TRIGGER_NAME]);
        assert_eq!(toolbar.overflow_items().len(), 4);
    }

    #[test]
    fn test_duplicate_config_fails_cleanly() {
        let container = FlowContainer::new(300.0);
        let config = ToolbarConfig::new()
            .with_item(ItemDescriptor::button("a"))
            .with_item(ItemDescriptor::button("a"));

        let result = ToolbarBuilder::new(config).mount(&container, FlowContainer::new(100.0), &NoContainers);
        assert!(matches!(result, Err(ToolbarError::DuplicateItem(_))));
        assert_eq!(container.child_count(), 0);
    }

    #[test]
    fn test_open_overflow_requires_items() {
        let (toolbar, _) = toolbar(300.0, 2);
        toolbar.frames().run_until_idle(4);
        assert!(!toolbar.open_overflow());
        assert!(!toolbar.trigger_clicked());
    }

    #[test]
    fn test_trigger_toggles_overflow() {
        let (toolbar, _) = toolbar(120.0, 6);
        toolbar.frames().run_until_idle(4);

        let opened = Arc::new(AtomicUsize::new(0));
        let counter = opened.clone();
        toolbar.signals().overflow_opened.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(toolbar.trigger_clicked());
        assert!(toolbar.is_overflow_open());
        assert!(!toolbar.trigger_clicked());
        assert!(!toolbar.is_overflow_open());
        assert_eq!(opened.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_activate_overflow_item_closes_surface() {
        let (toolbar, _) = toolbar(120.0, 6);
        toolbar.frames().run_until_idle(4);

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        toolbar
            .signals()
            .item_triggered
            .connect(move |event| events_clone.lock().push(event.clone()));

        toolbar.activate(TRIGGER_NAME).unwrap();
        assert!(toolbar.is_overflow_open());

        toolbar.activate("item5").unwrap();
        assert!(!toolbar.is_overflow_open());
        toolbar.activate("item0").unwrap();

        assert_eq!(*events.lock(), vec!["event5", "event0"]);
        assert_eq!(toolbar.activate("missing"), Err(ToolbarError::NotFound("missing".into())));
    }

    #[test]
    fn test_remove_last_overflow_item_hides_trigger() {
        let (toolbar, _) = toolbar(210.0, 6);
        toolbar.frames().run_until_idle(4);
        assert!(toolbar.has_trigger());

        toolbar.remove_item("item5").unwrap();
        assert!(!toolbar.has_trigger());
        assert!(toolbar.overflow_items().is_empty());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (toolbar, container) = toolbar(120.0, 6);
        toolbar.frames().run_until_idle(4);

        toolbar.destroy();
        toolbar.destroy();

        assert!(toolbar.is_destroyed());
        assert_eq!(container.child_count(), 0);
        assert_eq!(toolbar.reconciler().pending_passes(), 0);
        assert_eq!(toolbar.overlays().subscriber_count(), 0);
        assert_eq!(toolbar.reconcile_now(), ReconcileOutcome::Skipped(SkipReason::Destroyed));
        assert_eq!(
            toolbar.insert_descriptor(0, &ItemDescriptor::button("late")),
            Err(ToolbarError::Destroyed)
        );

        container.set_width(500.0);
        assert_eq!(toolbar.frames().pending_count(), 0);
    }

    #[test]
    fn test_hide_mode_switch_reaches_host() {
        let style = ToolbarStyle::default();
        let toolbar = ToolbarBuilder::new(config(2).with_hide_mode_switch(true))
            .mount(
                &FlowContainer::with_style(300.0, &style),
                FlowContainer::with_style(200.0, &style),
                &NoContainers,
            )
            .unwrap();

        assert!(toolbar.config().hide_mode_switch);
        assert!(!ToolbarConfig::default().hide_mode_switch);
    }
}
