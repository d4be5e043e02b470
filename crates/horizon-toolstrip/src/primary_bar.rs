//! The always-visible main strip.

use crate::collection::{ItemCollection, ItemRegistry};
use crate::error::{ToolbarError, ToolbarResult};
use crate::host::ItemHost;
use crate::item::{ItemGroup, ToolbarItem, TRIGGER_NAME};

/// The main strip of the toolbar plus the reserved overflow trigger.
///
/// The trigger is owned by the bar at all times: while it is shown it lives
/// in the item collection, otherwise it is parked. Its presence is derived
/// through [`sync_trigger`](Self::sync_trigger) and can't be set through the
/// item API.
pub struct PrimaryBar {
    items: ItemCollection,
    parked_trigger: Option<ToolbarItem>,
}

impl PrimaryBar {
    pub(crate) fn new(registry: ItemRegistry, host: Box<dyn ItemHost>, trigger: ToolbarItem) -> Self {
        Self {
            items: ItemCollection::new(ItemGroup::Main, registry, host),
            parked_trigger: Some(trigger),
        }
    }

    /// Append an item, keeping the trigger last if it is shown.
    pub fn add_item(&mut self, item: ToolbarItem) -> ToolbarResult<usize> {
        self.insert_item(self.items.len(), item)
    }

    /// Insert an item at `index`.
    ///
    /// Positions at or past a shown trigger are redirected to just before it.
    pub fn insert_item(&mut self, index: usize, item: ToolbarItem) -> ToolbarResult<usize> {
        if item.is_trigger() {
            return Err(ToolbarError::ReservedItem(TRIGGER_NAME.to_string()));
        }

        let index = match self.trigger_index() {
            Some(trigger) if index >= trigger => trigger,
            _ => index,
        };
        self.items.insert(index, item)
    }

    /// Remove a non-trigger item.
    pub fn remove_item(&mut self, name: &str) -> ToolbarResult<ToolbarItem> {
        if name == TRIGGER_NAME {
            return Err(ToolbarError::ReservedItem(name.to_string()));
        }
        self.items.remove(name)
    }

    /// Show the trigger at the end if `overflow_non_empty`, otherwise hide it.
    ///
    /// Idempotent. Returns `true` if the trigger's presence changed.
    pub fn sync_trigger(&mut self, overflow_non_empty: bool) -> bool {
        match (overflow_non_empty, self.has_trigger()) {
            (true, false) => self.show_trigger_at(usize::MAX),
            (false, true) => self.park_trigger(),
            _ => false,
        }
    }

    /// Move the trigger to the front, showing it if needed.
    pub(crate) fn seat_trigger_first(&mut self) {
        self.park_trigger();
        self.show_trigger_at(0);
    }

    /// Remove the trigger and re-append it at the end iff `overflow_non_empty`.
    pub(crate) fn settle_trigger(&mut self, overflow_non_empty: bool) {
        self.park_trigger();
        self.sync_trigger(overflow_non_empty);
    }

    fn show_trigger_at(&mut self, index: usize) -> bool {
        let Some(trigger) = self.parked_trigger.take() else {
            return false;
        };
        match self.items.insert(index, trigger) {
            Ok(_) => true,
            Err(err) => {
                // Only reachable if the registry and collection disagree.
                tracing::error!(target: horizon_toolstrip_core::logging::targets::TOOLBAR, %err, "failed to show overflow trigger");
                false
            }
        }
    }

    fn park_trigger(&mut self) -> bool {
        match self.items.remove(TRIGGER_NAME) {
            Ok(trigger) => {
                self.parked_trigger = Some(trigger);
                true
            }
            Err(_) => false,
        }
    }

    /// Whether the trigger is currently shown.
    pub fn has_trigger(&self) -> bool {
        self.items.contains(TRIGGER_NAME)
    }

    /// Position of the shown trigger.
    pub fn trigger_index(&self) -> Option<usize> {
        self.items.index_of(TRIGGER_NAME)
    }

    /// The shown items, trigger included, in display order.
    pub fn items(&self) -> &[ToolbarItem] {
        self.items.items()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.items.index_of(name)
    }

    pub fn get(&self, index: usize) -> Option<&ToolbarItem> {
        self.items.get(index)
    }

    pub fn names(&self) -> Vec<String> {
        self.items.names()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The rendered host of the strip.
    pub fn host(&self) -> &dyn ItemHost {
        self.items.host()
    }

    pub(crate) fn collection_mut(&mut self) -> &mut ItemCollection {
        &mut self.items
    }

    /// Detach everything, including the trigger.
    pub(crate) fn clear(&mut self) {
        self.park_trigger();
        self.items.clear();
    }
}

impl std::fmt::Debug for PrimaryBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimaryBar")
            .field("items", &self.names())
            .field("trigger_shown", &self.has_trigger())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowContainer;
    use crate::geometry::Size;
    use crate::item::{ItemFactory, ItemKind};

    fn button(name: &str) -> ToolbarItem {
        ToolbarItem::new(name, ItemKind::Button, Size::new(32.0, 32.0))
    }

    fn bar() -> (PrimaryBar, FlowContainer) {
        let host = FlowContainer::new(400.0);
        let trigger = ItemFactory::default().create_trigger("More");
        let bar = PrimaryBar::new(ItemRegistry::new(), Box::new(host.clone()), trigger);
        (bar, host)
    }

    #[test]
    fn test_starts_without_trigger() {
        let (bar, _) = bar();
        assert!(bar.is_empty());
        assert!(!bar.has_trigger());
    }

    #[test]
    fn test_sync_trigger_is_idempotent() {
        let (mut bar, host) = bar();
        bar.add_item(button("a")).unwrap();

        assert!(bar.sync_trigger(true));
        assert!(!bar.sync_trigger(true));
        assert_eq!(bar.names(), vec!["a", TRIGGER_NAME]);
        assert_eq!(host.child_names(), bar.names());

        assert!(bar.sync_trigger(false));
        assert!(!bar.sync_trigger(false));
        assert_eq!(bar.names(), vec!["a"]);
    }

    #[test]
    fn test_insert_stays_before_trigger() {
        let (mut bar, _) = bar();
        bar.add_item(button("a")).unwrap();
        bar.add_item(button("b")).unwrap();
        bar.sync_trigger(true);

        assert_eq!(bar.insert_item(2, button("c")).unwrap(), 2);
        assert_eq!(bar.insert_item(99, button("d")).unwrap(), 3);
        bar.add_item(button("e")).unwrap();
        assert_eq!(bar.insert_item(0, button("z")).unwrap(), 0);

        assert_eq!(bar.names(), vec!["z", "a", "b", "c", "d", "e", TRIGGER_NAME]);
        assert_eq!(bar.trigger_index(), Some(6));
    }

    #[test]
    fn test_trigger_is_reserved() {
        let (mut bar, _) = bar();
        let fake = button(TRIGGER_NAME);
        assert!(matches!(bar.add_item(fake), Err(ToolbarError::ReservedItem(_))));

        bar.sync_trigger(true);
        assert!(matches!(
            bar.remove_item(TRIGGER_NAME),
            Err(ToolbarError::ReservedItem(_))
        ));
        assert!(bar.has_trigger());
    }

    #[test]
    fn test_seat_and_settle_trigger() {
        let (mut bar, _) = bar();
        bar.add_item(button("a")).unwrap();
        bar.add_item(button("b")).unwrap();

        bar.seat_trigger_first();
        assert_eq!(bar.trigger_index(), Some(0));

        bar.settle_trigger(true);
        assert_eq!(bar.names(), vec!["a", "b", TRIGGER_NAME]);

        bar.seat_trigger_first();
        bar.settle_trigger(false);
        assert_eq!(bar.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_clear_keeps_trigger_parked() {
        let (mut bar, host) = bar();
        bar.add_item(button("a")).unwrap();
        bar.sync_trigger(true);

        bar.clear();
        assert!(bar.is_empty());
        assert_eq!(host.child_count(), 0);

        bar.clear();
        assert!(bar.sync_trigger(true));
    }
}
