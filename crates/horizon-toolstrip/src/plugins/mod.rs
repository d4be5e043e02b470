//! Feature plugins built on the public toolbar API.
//!
//! Plugins only use what any host can use: they insert items with
//! [`Toolbar::insert_item`](crate::Toolbar::insert_item), listen to
//! [`ToolbarSignals`](crate::ToolbarSignals) and take part in overlay
//! exclusion through the toolbar's [`OverlayHub`](crate::OverlayHub).

mod color_command;
mod color_syntax;

pub use color_command::{
    ColorCommand, ColorOptions, ColorPalette, ColorPreset, ColorSwatch, ScrollMemory,
    COLOR_BUTTON_CLASS_NAME, COLOR_BUTTON_EVENT, COLOR_BUTTON_INDEX, COLOR_BUTTON_NAME,
    COLOR_BUTTON_TOOLTIP,
};
pub use color_syntax::{custom_color_syntax, html_color_syntax, ColorSyntax, SyntaxRange, RESET_COLOR};

use thiserror::Error;

use crate::error::ToolbarError;

/// Errors reported while installing a plugin.
#[derive(Error, Debug)]
pub enum PluginError {
    /// The toolbar rejected the plugin's item.
    #[error(transparent)]
    Toolbar(#[from] ToolbarError),

    /// A conversion pattern failed to compile.
    #[error("invalid plugin pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The inserted item could not be found on the main strip afterwards.
    #[error("plugin item '{0}' is missing from the toolbar")]
    MissingItem(String),
}
