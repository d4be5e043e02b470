//! Toolbar items and the factory that builds them from descriptors.
//!
//! A [`ToolbarItem`] is a single orderable command unit. Items are owned by
//! exactly one [`ItemCollection`](crate::ItemCollection) at a time; moving an
//! item between the main strip and the overflow surface removes it from one
//! collection and inserts it into the other.
//!
//! # Example
//!
//! ```
//! use horizon_toolstrip::{ItemDescriptor, ItemFactory, ItemKind, ToolbarStyle};
//!
//! let factory = ItemFactory::new(ToolbarStyle::default());
//! let bold = factory
//!     .create(&ItemDescriptor::button("bold").with_event("bold").with_tooltip("Bold"))
//!     .unwrap();
//!
//! assert_eq!(bold.name(), "bold");
//! assert_eq!(bold.kind(), ItemKind::Button);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::config::ToolbarStyle;
use crate::error::{ToolbarError, ToolbarResult};
use crate::geometry::Size;

/// Name of the system-owned overflow trigger ("more" button).
pub const TRIGGER_NAME: &str = "more";

/// Class name given to the overflow trigger.
pub const TRIGGER_CLASS_NAME: &str = "tui-more";

/// The kind of command an item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A push button.
    #[default]
    Button,
    /// A button that opens a list of choices.
    Dropdown,
    /// A visual separator between groups of buttons.
    Divider,
}

/// Which surface currently owns an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemGroup {
    /// The always-visible main strip.
    #[default]
    Main,
    /// The overflow ("more") surface.
    Overflow,
}

/// A single command unit in the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarItem {
    name: String,
    kind: ItemKind,
    class_name: String,
    tooltip: Option<String>,
    event: Option<String>,
    size: Size,
    group: ItemGroup,
}

impl ToolbarItem {
    /// Create an item with the given identity, kind and preferred size.
    pub fn new(name: impl Into<String>, kind: ItemKind, size: Size) -> Self {
        Self {
            name: name.into(),
            kind,
            class_name: String::new(),
            tooltip: None,
            event: None,
            size,
            group: ItemGroup::Main,
        }
    }

    /// Set the class name using builder pattern.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the tooltip using builder pattern.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Set the event emitted on activation using builder pattern.
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// The item's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Event name emitted when the item is activated, if any.
    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// Preferred rendered size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The surface that currently owns this item.
    pub fn group(&self) -> ItemGroup {
        self.group
    }

    pub(crate) fn set_group(&mut self, group: ItemGroup) {
        self.group = group;
    }

    /// Whether this is the overflow trigger.
    pub fn is_trigger(&self) -> bool {
        self.name == TRIGGER_NAME
    }
}

/// Declarative description of a toolbar item.
///
/// Field names follow the `{type, name, className, event, tooltip}` shape
/// used by host configuration files.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDescriptor {
    /// Item kind.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Unique name. Optional for dividers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Width override; the style decides when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height override; the style decides when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl ItemDescriptor {
    /// Describe a button.
    pub fn button(name: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Button,
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Describe a dropdown button.
    pub fn dropdown(name: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Dropdown,
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Describe a divider. A unique name is generated at creation time.
    pub fn divider() -> Self {
        Self {
            kind: ItemKind::Divider,
            ..Default::default()
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Override the style-derived size.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Counter for generated divider names.
static NEXT_DIVIDER_ID: AtomicU64 = AtomicU64::new(1);

fn next_divider_name() -> String {
    format!("divider-{}", NEXT_DIVIDER_ID.fetch_add(1, Ordering::Relaxed))
}

/// Builds [`ToolbarItem`]s from [`ItemDescriptor`]s.
#[derive(Debug, Clone, Default)]
pub struct ItemFactory {
    style: ToolbarStyle,
}

impl ItemFactory {
    /// Create a factory that sizes items according to `style`.
    pub fn new(style: ToolbarStyle) -> Self {
        Self { style }
    }

    /// The style used for default item sizes.
    pub fn style(&self) -> &ToolbarStyle {
        &self.style
    }

    /// Create an item from a descriptor.
    ///
    /// Buttons and dropdowns need a non-empty name; dividers get a generated
    /// one when none is given. The trigger's name is reserved.
    pub fn create(&self, descriptor: &ItemDescriptor) -> ToolbarResult<ToolbarItem> {
        let name = match (&descriptor.name, descriptor.kind) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, ItemKind::Divider) => next_divider_name(),
            (_, kind) => {
                return Err(ToolbarError::InvalidDescriptor(format!(
                    "{kind:?} item requires a name"
                )));
            }
        };

        if name == TRIGGER_NAME {
            return Err(ToolbarError::ReservedItem(name));
        }

        let default_size = match descriptor.kind {
            ItemKind::Button => self.style.button_size(),
            ItemKind::Dropdown => self.style.dropdown_size(),
            ItemKind::Divider => self.style.divider_size(),
        };
        let size = Size::new(
            descriptor.width.unwrap_or(default_size.width),
            descriptor.height.unwrap_or(default_size.height),
        );
        if size.is_empty() {
            return Err(ToolbarError::InvalidDescriptor(format!(
                "item '{name}' has an empty size"
            )));
        }

        let mut item = ToolbarItem::new(name, descriptor.kind, size);
        if let Some(class_name) = &descriptor.class_name {
            item = item.with_class_name(class_name.clone());
        }
        if let Some(event) = &descriptor.event {
            item = item.with_event(event.clone());
        }
        if let Some(tooltip) = &descriptor.tooltip {
            item = item.with_tooltip(tooltip.clone());
        }
        Ok(item)
    }

    /// Create the overflow trigger.
    pub(crate) fn create_trigger(&self, tooltip: &str) -> ToolbarItem {
        ToolbarItem::new(TRIGGER_NAME, ItemKind::Button, self.style.button_size())
            .with_class_name(TRIGGER_CLASS_NAME)
            .with_tooltip(tooltip)
    }
}
