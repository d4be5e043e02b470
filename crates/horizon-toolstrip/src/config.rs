//! Toolbar configuration.
//!
//! [`ToolbarConfig`] describes the initial item set, where the bar is mounted
//! and how items are sized. It can be built in code or loaded from a TOML or
//! JSON file.
//!
//! # Example
//!
//! ```
//! use horizon_toolstrip::{ItemDescriptor, MountOption, ToolbarConfig};
//!
//! let config = ToolbarConfig::new()
//!     .with_item(ItemDescriptor::button("bold").with_event("bold"))
//!     .with_item(ItemDescriptor::divider())
//!     .with_item(ItemDescriptor::button("italic").with_event("italic"))
//!     .with_mount(MountOption::ContainerId("toolbar-host".into()));
//!
//! assert_eq!(config.items.len(), 3);
//! ```
//!
//! The same configuration as TOML:
//!
//! ```toml
//! triggerTooltip = "More"
//!
//! [mount]
//! containerId = "toolbar-host"
//!
//! [[items]]
//! type = "button"
//! name = "bold"
//! event = "bold"
//!
//! [[items]]
//! type = "divider"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Size;
use crate::item::ItemDescriptor;

/// Sizing rules for toolbar items and their container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolbarStyle {
    /// Icon size for buttons.
    pub icon_size: Size,
    /// Internal padding added around a button's icon.
    pub button_padding: f32,
    /// Extra width taken by a dropdown's arrow indicator.
    pub dropdown_indicator_width: f32,
    /// Width of a divider.
    pub divider_width: f32,
    /// Spacing between items.
    pub spacing: f32,
    /// Padding around all items.
    pub padding: f32,
}

impl Default for ToolbarStyle {
    fn default() -> Self {
        Self {
            icon_size: Size::new(24.0, 24.0),
            button_padding: 8.0,
            dropdown_indicator_width: 12.0,
            divider_width: 8.0,
            spacing: 2.0,
            padding: 4.0,
        }
    }
}

impl ToolbarStyle {
    /// Size of a plain button.
    pub fn button_size(&self) -> Size {
        Size::new(
            self.icon_size.width + self.button_padding,
            self.icon_size.height + self.button_padding,
        )
    }

    /// Size of a dropdown button.
    pub fn dropdown_size(&self) -> Size {
        let button = self.button_size();
        Size::new(button.width + self.dropdown_indicator_width, button.height)
    }

    /// Size of a divider.
    pub fn divider_size(&self) -> Size {
        Size::new(self.divider_width, self.button_size().height)
    }
}

/// Where the toolbar is mounted, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MountOption {
    /// Inside the editor's own toolbar section.
    #[default]
    Inline,
    /// In a host-provided container looked up by identifier.
    ContainerId(String),
}

/// Complete toolbar configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolbarConfig {
    /// Items in display order.
    pub items: Vec<ItemDescriptor>,
    /// Mount location.
    pub mount: MountOption,
    /// Hide the mode-switch and markdown-tab companions.
    ///
    /// The toolbar does not render those companions. The flag is carried for
    /// the host editor, which reads it back through [`Toolbar::config`].
    ///
    /// [`Toolbar::config`]: crate::Toolbar::config
    pub hide_mode_switch: bool,
    /// Tooltip of the overflow trigger.
    pub trigger_tooltip: String,
    /// Item and container sizing.
    pub style: ToolbarStyle,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            mount: MountOption::Inline,
            hide_mode_switch: false,
            trigger_tooltip: "More".to_string(),
            style: ToolbarStyle::default(),
        }
    }
}

impl ToolbarConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with the standard editor command set.
    pub fn editor_defaults() -> Self {
        let button = |name: &str, event: &str, tooltip: &str| {
            ItemDescriptor::button(name)
                .with_class_name(format!("tui-{name}"))
                .with_event(event)
                .with_tooltip(tooltip)
        };

        Self::new().with_items([
            ItemDescriptor::dropdown("heading")
                .with_class_name("tui-heading")
                .with_event("openHeadingSelect")
                .with_tooltip("Headings"),
            button("bold", "command:Bold", "Bold"),
            button("italic", "command:Italic", "Italic"),
            button("strike", "command:Strike", "Strike"),
            ItemDescriptor::divider(),
            button("hr", "command:HR", "Line"),
            button("quote", "command:Blockquote", "Blockquote"),
            ItemDescriptor::divider(),
            button("ul", "command:UL", "Unordered list"),
            button("ol", "command:OL", "Ordered list"),
            button("task", "command:Task", "Task"),
            button("indent", "command:Indent", "Indent"),
            button("outdent", "command:Outdent", "Outdent"),
            ItemDescriptor::divider(),
            button("table", "openPopupAddTable", "Insert table"),
            button("image", "openPopupAddImage", "Insert image"),
            button("link", "openPopupAddLink", "Insert link"),
            ItemDescriptor::divider(),
            button("code", "command:Code", "Code"),
            button("codeblock", "command:CodeBlock", "Insert CodeBlock"),
        ])
    }

    /// Append an item using builder pattern.
    pub fn with_item(mut self, item: ItemDescriptor) -> Self {
        self.items.push(item);
        self
    }

    /// Append several items using builder pattern.
    pub fn with_items(mut self, items: impl IntoIterator<Item = ItemDescriptor>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn with_mount(mut self, mount: MountOption) -> Self {
        self.mount = mount;
        self
    }

    pub fn with_style(mut self, style: ToolbarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_trigger_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.trigger_tooltip = tooltip.into();
        self
    }

    pub fn with_hide_mode_switch(mut self, hide: bool) -> Self {
        self.hide_mode_switch = hide;
        self
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        parse(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    #[test]
    fn test_style_sizes() {
        let style = ToolbarStyle::default();
        assert_eq!(style.button_size(), Size::new(32.0, 32.0));
        assert_eq!(style.dropdown_size(), Size::new(44.0, 32.0));
        assert_eq!(style.divider_size(), Size::new(8.0, 32.0));
    }

    #[test]
    fn test_defaults() {
        let config = ToolbarConfig::default();
        assert!(config.items.is_empty());
        assert_eq!(config.mount, MountOption::Inline);
        assert_eq!(config.trigger_tooltip, "More");
        assert!(!config.hide_mode_switch);
    }

    #[test]
    fn test_editor_defaults_names_are_unique() {
        let config = ToolbarConfig::editor_defaults();
        let mut names: Vec<_> = config.items.iter().filter_map(|i| i.name.clone()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(config.items[0].kind, ItemKind::Dropdown);
    }

    #[test]
    fn test_from_toml() {
        let config = ToolbarConfig::from_toml_str(
            r#"
            hideModeSwitch = true

            [mount]
            containerId = "external"

            [style]
            spacing = 6.0

            [[items]]
            type = "button"
            name = "bold"
            event = "bold"

            [[items]]
            type = "divider"
            "#,
        )
        .unwrap();

        assert!(config.hide_mode_switch);
        assert_eq!(config.mount, MountOption::ContainerId("external".into()));
        assert_eq!(config.style.spacing, 6.0);
        assert_eq!(config.style.padding, ToolbarStyle::default().padding);
        assert_eq!(config.items.len(), 2);
        assert_eq!(config.items[1].kind, ItemKind::Divider);
        assert_eq!(config.trigger_tooltip, "More");
    }

    #[test]
    fn test_from_json_inline_mount() {
        let config = ToolbarConfig::from_json_str(
            r#"{"mount":"inline","items":[{"type":"button","name":"link"}]}"#,
        )
        .unwrap();
        assert_eq!(config.mount, MountOption::Inline);
        assert_eq!(config.items[0].name.as_deref(), Some("link"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ToolbarConfig::from_toml_str("items = 3"),
            Err(ConfigError::Toml(_))
        ));
    }
}
