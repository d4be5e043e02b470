//! Horizon Toolstrip - an adaptive toolbar with an overflow menu.
//!
//! A horizontal toolbar shows as many items as fit on its first row. Items
//! that wrap onto later rows are moved into a collapsible overflow surface,
//! reached through a system-owned "more" trigger shown at the end of the
//! main strip. The split is recomputed whenever the toolbar's container
//! changes size.
//!
//! # Key Types
//!
//! - [`Toolbar`] / [`ToolbarBuilder`] - the public façade and its builder
//! - [`ToolbarConfig`] - item set, mount location and sizing, loadable from TOML or JSON
//! - [`LayoutReconciler`] and [`rebalance`] - resize-driven rebalancing
//! - [`FlowContainer`] - a headless wrapping container implementing [`ItemHost`]
//! - [`OverlayHub`] - mutual exclusion between the overflow surface and popups
//!
//! # Example
//!
//! ```
//! use horizon_toolstrip::{FlowContainer, ItemDescriptor, NoContainers, ToolbarBuilder, ToolbarConfig, ToolbarStyle};
//! use horizon_toolstrip_core::FrameScheduler;
//!
//! let frames = FrameScheduler::new();
//! let style = ToolbarStyle::default();
//! let container = FlowContainer::with_style(400.0, &style);
//!
//! let config = ToolbarConfig::new()
//!     .with_item(ItemDescriptor::button("bold").with_event("bold"))
//!     .with_item(ItemDescriptor::button("italic").with_event("italic"));
//!
//! let toolbar = ToolbarBuilder::new(config)
//!     .with_frames(frames.clone())
//!     .mount(&container, FlowContainer::with_style(200.0, &style), &NoContainers)
//!     .unwrap();
//!
//! // Narrow the container; the overflow is recomputed two frames later.
//! container.set_width(40.0);
//! frames.run_until_idle(4);
//!
//! assert_eq!(toolbar.overflow_items().len(), 2);
//! assert!(toolbar.has_trigger());
//! ```

mod collection;
mod config;
mod error;
mod flow;
mod geometry;
mod host;
mod item;
mod mount;
mod overflow;
mod overlay;
mod primary_bar;
mod reconciler;
mod resize;
mod toolbar;

#[cfg(feature = "color-plugin")]
pub mod plugins;

pub use collection::ItemCollection;
pub use config::{MountOption, ToolbarConfig, ToolbarStyle};
pub use error::{ConfigError, ToolbarError, ToolbarResult};
pub use flow::FlowContainer;
pub use geometry::{Point, Rect, Size};
pub use host::ItemHost;
pub use item::{
    ItemDescriptor, ItemFactory, ItemGroup, ItemKind, ToolbarItem, TRIGGER_CLASS_NAME, TRIGGER_NAME,
};
pub use mount::{resolve_mount, ContainerLookup, MountLocation, MountTarget, NoContainers, ResolvedMount};
pub use overflow::OverflowSurface;
pub use overlay::{OverlayHub, OverlayId};
pub use primary_bar::PrimaryBar;
pub use reconciler::{rebalance, LayoutReconciler, ReconcileOutcome, SkipReason};
pub use resize::{ResizeCallback, ResizeSignal};
pub use toolbar::{Toolbar, ToolbarBuilder, ToolbarSignals};
