//! The collapsible "more" surface.

use crate::collection::{ItemCollection, ItemRegistry};
use crate::error::ToolbarResult;
use crate::host::ItemHost;
use crate::item::{ItemGroup, ToolbarItem};

/// Secondary container holding the items that did not fit on the first row.
///
/// Items keep the order the reconciler moved them in. The surface starts
/// closed and its host is hidden while closed.
pub struct OverflowSurface {
    items: ItemCollection,
    open: bool,
}

impl OverflowSurface {
    pub(crate) fn new(registry: ItemRegistry, mut host: Box<dyn ItemHost>) -> Self {
        host.set_visible(false);
        Self {
            items: ItemCollection::new(ItemGroup::Overflow, registry, host),
            open: false,
        }
    }

    /// Show the surface. Returns `true` if it was closed.
    pub fn open(&mut self) -> bool {
        self.set_open(true)
    }

    /// Hide the surface. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        self.set_open(false)
    }

    fn set_open(&mut self, open: bool) -> bool {
        if self.open == open {
            return false;
        }
        self.open = open;
        self.items.host_mut().set_visible(open);
        true
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Append an item.
    pub fn add_item(&mut self, item: ToolbarItem) -> ToolbarResult<usize> {
        self.items.push(item)
    }

    pub fn remove_item(&mut self, name: &str) -> ToolbarResult<ToolbarItem> {
        self.items.remove(name)
    }

    /// Items in display order.
    pub fn items(&self) -> &[ToolbarItem] {
        self.items.items()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.items.index_of(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains(name)
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

    /// Move every item out, keeping their order.
    pub(crate) fn drain(&mut self) -> Vec<ToolbarItem> {
        self.items.clear()
    }
}

impl std::fmt::Debug for OverflowSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverflowSurface")
            .field("items", &self.names())
            .field("open", &self.open)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowContainer;
    use crate::geometry::Size;
    use crate::item::ItemKind;

    fn surface() -> (OverflowSurface, FlowContainer) {
        let host = FlowContainer::new(200.0);
        let surface = OverflowSurface::new(ItemRegistry::new(), Box::new(host.clone()));
        (surface, host)
    }

    fn button(name: &str) -> ToolbarItem {
        ToolbarItem::new(name, ItemKind::Button, Size::new(32.0, 32.0))
    }

    #[test]
    fn test_starts_closed_and_hidden() {
        let (surface, host) = surface();
        assert!(!surface.is_open());
        assert!(host.is_hidden());
    }

    #[test]
    fn test_open_close_report_changes() {
        let (mut surface, host) = surface();

        assert!(surface.open());
        assert!(!surface.open());
        assert!(!host.is_hidden());

        assert!(surface.close());
        assert!(!surface.close());
        assert!(host.is_hidden());
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let (mut surface, host) = surface();
        surface.add_item(button("c")).unwrap();
        surface.add_item(button("a")).unwrap();
        surface.add_item(button("b")).unwrap();

        assert_eq!(surface.names(), vec!["c", "a", "b"]);
        assert_eq!(host.child_names(), surface.names());
        assert_eq!(surface.items()[0].group(), ItemGroup::Overflow);

        surface.remove_item("a").unwrap();
        assert_eq!(surface.names(), vec!["c", "b"]);
    }

    #[test]
    fn test_drain() {
        let (mut surface, _) = surface();
        surface.add_item(button("a")).unwrap();
        surface.add_item(button("b")).unwrap();

        let drained = surface.drain();
        assert_eq!(drained.iter().map(ToolbarItem::name).collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(surface.is_empty());
    }
}
