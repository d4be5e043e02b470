//! Headless wrapping layout host.
//!
//! [`FlowContainer`] lays its children out left to right and starts a new row
//! whenever the next child would cross the container's right padding edge,
//! the way an inline-wrapping toolbar container behaves. It implements
//! [`ItemHost`], so the whole toolbar engine runs without a GUI backend.
//!
//! Changing the width or visibility notifies the container's resize signal,
//! playing the part of a resize observer bound to the container.
//!
//! # Example
//!
//! ```
//! use horizon_toolstrip::{FlowContainer, ItemHost, ItemKind, Size, ToolbarItem};
//!
//! let mut container = FlowContainer::new(70.0);
//! for name in ["a", "b", "c"] {
//!     let index = container.child_count();
//!     container.attach(index, &ToolbarItem::new(name, ItemKind::Button, Size::new(32.0, 32.0)));
//! }
//!
//! assert_eq!(container.offset_top("b"), Some(0.0));
//! assert_eq!(container.offset_top("c"), Some(32.0));
//! assert_eq!(container.row_count(), 2);
//! ```

use std::sync::Arc;

use horizon_toolstrip_core::Signal;
use parking_lot::RwLock;

use crate::config::ToolbarStyle;
use crate::geometry::{Rect, Size};
use crate::host::ItemHost;
use crate::item::ToolbarItem;

#[derive(Debug, Clone)]
struct FlowChild {
    name: String,
    size: Size,
}

#[derive(Debug)]
struct FlowState {
    width: f32,
    padding: f32,
    spacing: f32,
    hidden: bool,
    children: Vec<FlowChild>,
}

/// Result of one layout computation.
struct FlowLayout {
    rects: Vec<Rect>,
    rows: usize,
    height: f32,
}

impl FlowState {
    fn layout(&self) -> FlowLayout {
        let right_edge = self.width - self.padding;
        let mut rects = Vec::with_capacity(self.children.len());
        let mut x = self.padding;
        let mut y = self.padding;
        let mut row_height: f32 = 0.0;
        let mut in_row = 0usize;
        let mut rows = 0usize;

        for child in &self.children {
            if in_row > 0 && x + child.size.width > right_edge {
                y += row_height + self.spacing;
                x = self.padding;
                row_height = 0.0;
                in_row = 0;
            }
            if in_row == 0 {
                rows += 1;
            }

            rects.push(Rect::new(x, y, child.size.width, child.size.height));
            x += child.size.width + self.spacing;
            row_height = row_height.max(child.size.height);
            in_row += 1;
        }

        let height = if self.children.is_empty() {
            self.padding * 2.0
        } else {
            y + row_height + self.padding
        };

        FlowLayout {
            rects,
            rows,
            height,
        }
    }

    fn client_height(&self) -> f32 {
        if self.hidden {
            0.0
        } else {
            self.layout().height
        }
    }
}

/// Shared handle to a headless wrapping container.
///
/// Clones refer to the same container.
#[derive(Clone)]
pub struct FlowContainer {
    state: Arc<RwLock<FlowState>>,
    resized: Arc<Signal<Size>>,
}

impl FlowContainer {
    /// Create a visible container with no padding or spacing.
    pub fn new(width: f32) -> Self {
        Self {
            state: Arc::new(RwLock::new(FlowState {
                width,
                padding: 0.0,
                spacing: 0.0,
                hidden: false,
                children: Vec::new(),
            })),
            resized: Arc::new(Signal::new()),
        }
    }

    /// Create a container using the style's padding and spacing.
    pub fn with_style(width: f32, style: &ToolbarStyle) -> Self {
        Self::new(width)
            .with_padding(style.padding)
            .with_spacing(style.spacing)
    }

    /// Set padding using builder pattern.
    pub fn with_padding(self, padding: f32) -> Self {
        self.state.write().padding = padding;
        self
    }

    /// Set spacing using builder pattern.
    pub fn with_spacing(self, spacing: f32) -> Self {
        self.state.write().spacing = spacing;
        self
    }

    /// Signal emitted with the new size whenever width or visibility changes.
    pub fn resized(&self) -> Arc<Signal<Size>> {
        self.resized.clone()
    }

    pub fn width(&self) -> f32 {
        self.state.read().width
    }

    /// Change the width and notify observers.
    pub fn set_width(&self, width: f32) {
        let changed = {
            let mut state = self.state.write();
            let changed = state.width != width;
            state.width = width;
            changed
        };
        if changed {
            self.resized.emit(self.size());
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.state.read().hidden
    }

    /// Hide or show the container and notify observers.
    ///
    /// A hidden container reports zero client height.
    pub fn set_hidden(&self, hidden: bool) {
        let changed = {
            let mut state = self.state.write();
            let changed = state.hidden != hidden;
            state.hidden = hidden;
            changed
        };
        if changed {
            self.resized.emit(self.size());
        }
    }

    /// Current width and client height.
    pub fn size(&self) -> Size {
        let state = self.state.read();
        Size::new(state.width, state.client_height())
    }

    /// Names of the attached children in sibling order.
    pub fn child_names(&self) -> Vec<String> {
        self.state
            .read()
            .children
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn child_count(&self) -> usize {
        self.state.read().children.len()
    }

    /// Rectangles of all children in sibling order.
    pub fn child_rects(&self) -> Vec<(String, Rect)> {
        let state = self.state.read();
        let layout = state.layout();
        state
            .children
            .iter()
            .zip(layout.rects)
            .map(|(child, rect)| (child.name.clone(), rect))
            .collect()
    }

    /// Number of rows the children currently occupy.
    pub fn row_count(&self) -> usize {
        self.state.read().layout().rows
    }
}

impl ItemHost for FlowContainer {
    fn attach(&mut self, index: usize, item: &ToolbarItem) {
        let mut state = self.state.write();
        let index = index.min(state.children.len());
        state.children.insert(
            index,
            FlowChild {
                name: item.name().to_string(),
                size: item.size(),
            },
        );
    }

    fn detach(&mut self, name: &str) {
        self.state.write().children.retain(|c| c.name != name);
    }

    fn offset_top(&self, name: &str) -> Option<f32> {
        let state = self.state.read();
        if state.hidden {
            return None;
        }
        let pos = state.children.iter().position(|c| c.name == name)?;
        state.layout().rects.get(pos).map(Rect::top)
    }

    fn client_height(&self) -> f32 {
        self.state.read().client_height()
    }

    fn set_visible(&mut self, visible: bool) {
        self.set_hidden(!visible);
    }
}

impl std::fmt::Debug for FlowContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("FlowContainer")
            .field("width", &state.width)
            .field("hidden", &state.hidden)
            .field("children", &state.children.len())
            .finish()
    }
}
