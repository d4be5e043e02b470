//! Ordered item collections shared by the main strip and the overflow surface.

use std::collections::HashMap;
use std::sync::Arc;

use horizon_toolstrip_core::logging::targets;
use parking_lot::Mutex;

use crate::error::{ToolbarError, ToolbarResult};
use crate::host::ItemHost;
use crate::item::{ItemGroup, ToolbarItem};

/// Toolbar-wide record of which names are in use and where.
///
/// Both collections of a toolbar share one registry, which is what makes item
/// identity unique across the whole toolbar rather than per collection.
#[derive(Clone, Default)]
pub(crate) struct ItemRegistry {
    names: Arc<Mutex<HashMap<String, ItemGroup>>>,
}

impl ItemRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn claim(&self, name: &str, group: ItemGroup) -> ToolbarResult<()> {
        let mut names = self.names.lock();
        if names.contains_key(name) {
            return Err(ToolbarError::DuplicateItem(name.to_string()));
        }
        names.insert(name.to_string(), group);
        Ok(())
    }

    fn release(&self, name: &str) {
        self.names.lock().remove(name);
    }

    /// The group currently owning `name`.
    pub(crate) fn group_of(&self, name: &str) -> Option<ItemGroup> {
        self.names.lock().get(name).copied()
    }
}

/// An ordered sequence of toolbar items bound to a rendered host.
///
/// Insertion order is display order. Every insertion and removal is mirrored
/// onto the host at the same position, so the host's children always appear
/// in the collection's logical order.
pub struct ItemCollection {
    group: ItemGroup,
    items: Vec<ToolbarItem>,
    registry: ItemRegistry,
    host: Box<dyn ItemHost>,
}

impl ItemCollection {
    pub(crate) fn new(group: ItemGroup, registry: ItemRegistry, host: Box<dyn ItemHost>) -> Self {
        Self {
            group,
            items: Vec::new(),
            registry,
            host,
        }
    }

    /// The group tag given to items owned by this collection.
    pub fn group(&self) -> ItemGroup {
        self.group
    }

    /// Insert an item at `index`, clamped to `[0, len]`.
    ///
    /// Returns the position the item landed at. Fails with
    /// [`ToolbarError::DuplicateItem`] if the name is used anywhere in the toolbar.
    pub fn insert(&mut self, index: usize, mut item: ToolbarItem) -> ToolbarResult<usize> {
        self.registry.claim(item.name(), self.group)?;

        let index = index.min(self.items.len());
        item.set_group(self.group);
        self.host.attach(index, &item);
        self.items.insert(index, item);
        Ok(index)
    }

    /// Append an item.
    pub fn push(&mut self, item: ToolbarItem) -> ToolbarResult<usize> {
        self.insert(self.items.len(), item)
    }

    /// Remove an item by name and hand it back.
    pub fn remove(&mut self, name: &str) -> ToolbarResult<ToolbarItem> {
        let index = self
            .index_of(name)
            .ok_or_else(|| ToolbarError::NotFound(name.to_string()))?;

        self.host.detach(name);
        self.registry.release(name);
        Ok(self.items.remove(index))
    }

    /// Remove every item, last to first. Never fails.
    pub(crate) fn clear(&mut self) -> Vec<ToolbarItem> {
        let mut removed = Vec::with_capacity(self.items.len());
        while let Some(item) = self.items.pop() {
            self.host.detach(item.name());
            self.registry.release(item.name());
            removed.push(item);
        }
        removed.reverse();
        tracing::trace!(target: targets::TOOLBAR, group = ?self.group, count = removed.len(), "collection cleared");
        removed
    }

    /// Position of the named item.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// The item at `index`.
    pub fn get(&self, index: usize) -> Option<&ToolbarItem> {
        self.items.get(index)
    }

    /// The items in display order.
    pub fn items(&self) -> &[ToolbarItem] {
        &self.items
    }

    /// A snapshot of the items in display order.
    pub fn to_ordered_list(&self) -> Vec<ToolbarItem> {
        self.items.clone()
    }

    /// Item names in display order.
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The rendered host.
    pub fn host(&self) -> &dyn ItemHost {
        self.host.as_ref()
    }

    pub(crate) fn host_mut(&mut self) -> &mut dyn ItemHost {
        self.host.as_mut()
    }
}

impl std::fmt::Debug for ItemCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemCollection")
            .field("group", &self.group)
            .field("items", &self.names())
            .finish()
    }
}
