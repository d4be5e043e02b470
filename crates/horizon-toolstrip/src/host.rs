//! The rendering side of an item collection.
//!
//! Every [`ItemCollection`](crate::ItemCollection) owns an [`ItemHost`]: the
//! rendered container its items are attached to. The collection keeps the
//! host's children in the same order as its logical sequence, and the
//! reconciler reads post-layout geometry back through the same trait.

use crate::item::ToolbarItem;

/// A rendered container that toolbar items are attached to.
///
/// Geometry queries are only meaningful after the host has laid out; a host
/// that is hidden or detached reports a client height of zero.
pub trait ItemHost: Send {
    /// Attach an item's rendered element as the child at `index`.
    fn attach(&mut self, index: usize, item: &ToolbarItem);

    /// Detach the rendered element of the named item. Unknown names are ignored.
    fn detach(&mut self, name: &str);

    /// Top offset of the named item relative to the container, if attached and laid out.
    fn offset_top(&self, name: &str) -> Option<f32>;

    /// Rendered inner height of the container.
    fn client_height(&self) -> f32;

    /// Show or hide the container. Used by the overflow surface.
    fn set_visible(&mut self, visible: bool);
}
