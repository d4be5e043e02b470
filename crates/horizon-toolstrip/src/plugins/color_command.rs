//! Font colour command: toolbar button, palette popup and editor hooks.

use std::sync::{Arc, Weak};

use horizon_toolstrip_core::logging::targets;
use horizon_toolstrip_core::{ConnectionId, Signal};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::color_syntax::{ColorSyntax, SyntaxRange, RESET_COLOR};
use super::PluginError;
use crate::item::ItemDescriptor;
use crate::overlay::{OverlayHub, OverlayId};
use crate::toolbar::Toolbar;

/// Name of the colour button.
pub const COLOR_BUTTON_NAME: &str = "colorSyntax";
pub const COLOR_BUTTON_CLASS_NAME: &str = "tui-color";
/// Event emitted when the colour button is activated.
pub const COLOR_BUTTON_EVENT: &str = "colorButtonClicked";
pub const COLOR_BUTTON_TOOLTIP: &str = "Change font colour";
/// Main-strip position the colour button is inserted at.
pub const COLOR_BUTTON_INDEX: usize = 3;

/// Palette used in restricted mode when no presets are given.
const GDS_COLORS: [(&str, &str); 13] = [
    ("#d4351c", "Red"),
    ("#fd0", "Yellow"),
    ("#00703c", "Green"),
    ("#1d70b8", "Blue"),
    ("#4c2c92", "Purple"),
    ("#f499be", "Pink"),
    ("#ffdd00", "Gold"),
    ("#00a33b", "Light green"),
    ("#003078", "Dark blue"),
    ("#5694ca", "Light blue"),
    ("#0b0c0c", "Black"),
    ("#6f777b", "Grey"),
    ("#ffffff", "White"),
];

/// A preset colour, either a bare colour value or a labelled one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorPreset {
    Color(String),
    Labeled {
        color: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl From<&str> for ColorPreset {
    fn from(color: &str) -> Self {
        Self::Color(color.to_string())
    }
}

/// One entry of the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSwatch {
    pub color: String,
    pub label: String,
}

/// The colours offered by the popup, with their labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPalette {
    swatches: Vec<ColorSwatch>,
}

impl ColorPalette {
    /// Build a palette from presets.
    ///
    /// Bare colours are labelled with their own value and labelled presets
    /// without a colour are skipped. In restricted mode an empty preset list
    /// falls back to [`gds_default`](Self::gds_default).
    pub fn from_presets(presets: &[ColorPreset], restricted: bool) -> Self {
        if restricted && presets.is_empty() {
            return Self::gds_default();
        }

        let swatches = presets
            .iter()
            .filter_map(|preset| match preset {
                ColorPreset::Color(color) => Some(ColorSwatch {
                    color: color.clone(),
                    label: color.clone(),
                }),
                ColorPreset::Labeled { color, .. } if color.is_empty() => None,
                ColorPreset::Labeled { color, label } => Some(ColorSwatch {
                    color: color.clone(),
                    label: label
                        .clone()
                        .filter(|label| !label.is_empty())
                        .unwrap_or_else(|| color.clone()),
                }),
            })
            .collect();

        Self { swatches }
    }

    /// The 13-colour GDS palette.
    pub fn gds_default() -> Self {
        Self {
            swatches: GDS_COLORS
                .iter()
                .map(|(color, label)| ColorSwatch {
                    color: color.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    pub fn swatches(&self) -> &[ColorSwatch] {
        &self.swatches
    }

    pub fn colors(&self) -> Vec<&str> {
        self.swatches.iter().map(|s| s.color.as_str()).collect()
    }

    pub fn label_of(&self, color: &str) -> Option<&str> {
        self.swatches
            .iter()
            .find(|s| s.color == color)
            .map(|s| s.label.as_str())
    }

    pub fn contains(&self, color: &str) -> bool {
        self.label_of(color).is_some()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}

/// Options of the colour command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorOptions {
    /// Preset colours.
    pub preset: Vec<ColorPreset>,
    /// Store colours as `{color:C}text{color}` instead of HTML spans.
    pub use_custom_syntax: bool,
    /// Only offer preset (or default) colours.
    pub restricted_mode: bool,
}

impl ColorOptions {
    pub fn with_preset(mut self, preset: impl IntoIterator<Item = ColorPreset>) -> Self {
        self.preset = preset.into_iter().collect();
        self
    }

    pub fn with_custom_syntax(mut self, use_custom_syntax: bool) -> Self {
        self.use_custom_syntax = use_custom_syntax;
        self
    }

    pub fn with_restricted_mode(mut self, restricted_mode: bool) -> Self {
        self.restricted_mode = restricted_mode;
        self
    }
}

/// Scroll position to restore when the WYSIWYG editor regains focus.
///
/// Applying a colour can move the editor's scroll position; the command
/// remembers it and hands it back once.
#[derive(Debug, Default)]
pub struct ScrollMemory {
    top: Mutex<f32>,
}

impl ScrollMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&self, top: f32) {
        *self.top.lock() = top;
    }

    /// Return the remembered position and forget it. Zero counts as nothing.
    pub fn take(&self) -> Option<f32> {
        let mut top = self.top.lock();
        if *top == 0.0 {
            None
        } else {
            Some(std::mem::take(&mut *top))
        }
    }
}

#[derive(Debug, Default)]
struct PopupState {
    shown: bool,
    selected: Option<String>,
}

struct ColorShared {
    popup: Mutex<PopupState>,
    palette: ColorPalette,
    overlays: OverlayHub,
    overlay_id: OverlayId,
    color_selected: Signal<String>,
    popup_visibility_changed: Signal<bool>,
}

impl ColorShared {
    fn show(&self) -> bool {
        if self.popup.lock().shown {
            return false;
        }
        self.overlays.close_all_except(self.overlay_id);
        self.popup.lock().shown = true;
        self.popup_visibility_changed.emit(true);
        true
    }

    fn hide(&self) -> bool {
        let was_shown = std::mem::take(&mut self.popup.lock().shown);
        if was_shown {
            self.popup_visibility_changed.emit(false);
        }
        was_shown
    }

    fn toggle(&self) -> bool {
        if self.popup.lock().shown {
            self.hide();
            false
        } else {
            self.show()
        }
    }
}

/// The font colour command.
///
/// Installing it adds a colour button to the toolbar. Activating the button
/// toggles the palette popup, which takes part in overlay exclusion: showing
/// it closes every other overlay, and any other overlay opening hides it.
pub struct ColorCommand {
    shared: Arc<ColorShared>,
    syntax: ColorSyntax,
    options: ColorOptions,
    button_index: usize,
    scroll: ScrollMemory,
    connections: Mutex<Option<(ConnectionId, ConnectionId)>>,
}

impl ColorCommand {
    /// Insert the colour button and wire up the popup.
    pub fn install(toolbar: &Toolbar, options: ColorOptions) -> Result<Self, PluginError> {
        let syntax = ColorSyntax::new(options.use_custom_syntax)?;
        let palette = ColorPalette::from_presets(&options.preset, options.restricted_mode);

        toolbar.insert_descriptor(
            COLOR_BUTTON_INDEX,
            &ItemDescriptor::button(COLOR_BUTTON_NAME)
                .with_class_name(COLOR_BUTTON_CLASS_NAME)
                .with_event(COLOR_BUTTON_EVENT)
                .with_tooltip(COLOR_BUTTON_TOOLTIP),
        )?;
        let button_index = toolbar
            .index_of_item(COLOR_BUTTON_NAME)
            .ok_or_else(|| PluginError::MissingItem(COLOR_BUTTON_NAME.to_string()))?;

        let overlays = toolbar.overlays().clone();
        let overlay_id = overlays.register();
        let shared = Arc::new(ColorShared {
            popup: Mutex::new(PopupState::default()),
            palette,
            overlays: overlays.clone(),
            overlay_id,
            color_selected: Signal::new(),
            popup_visibility_changed: Signal::new(),
        });

        let weak: Weak<ColorShared> = Arc::downgrade(&shared);
        let clicked = toolbar.signals().item_triggered.connect(move |event| {
            if event == COLOR_BUTTON_EVENT {
                if let Some(shared) = weak.upgrade() {
                    shared.toggle();
                }
            }
        });

        let weak = Arc::downgrade(&shared);
        let closed = overlays.subscribe(overlay_id, move || {
            if let Some(shared) = weak.upgrade() {
                shared.hide();
            }
        });

        tracing::debug!(
            target: targets::PLUGIN,
            button_index,
            colors = shared.palette.len(),
            "colour command installed"
        );

        Ok(Self {
            shared,
            syntax,
            options,
            button_index,
            scroll: ScrollMemory::new(),
            connections: Mutex::new(Some((clicked, closed))),
        })
    }

    /// Position the button landed at when installed.
    pub fn button_index(&self) -> usize {
        self.button_index
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.shared.palette
    }

    pub fn options(&self) -> &ColorOptions {
        &self.options
    }

    pub fn syntax(&self) -> &ColorSyntax {
        &self.syntax
    }

    pub fn is_shown(&self) -> bool {
        self.shared.popup.lock().shown
    }

    /// Show the popup, closing every other overlay. Returns `true` if it was hidden.
    pub fn show(&self) -> bool {
        self.shared.show()
    }

    /// Hide the popup. Returns `true` if it was shown.
    pub fn hide(&self) -> bool {
        self.shared.hide()
    }

    /// Toggle the popup, as a click on the colour button does.
    pub fn toggle(&self) -> bool {
        self.shared.toggle()
    }

    /// Pick a palette colour.
    ///
    /// Emits [`color_selected`](Self::color_selected) and hides the popup.
    /// Colours outside the palette are ignored and `false` is returned.
    pub fn select(&self, color: &str) -> bool {
        if !self.shared.palette.contains(color) {
            tracing::debug!(target: targets::PLUGIN, %color, "colour not in palette");
            return false;
        }

        self.shared.popup.lock().selected = Some(color.to_string());
        self.shared.color_selected.emit(color.to_string());
        self.shared.hide();
        true
    }

    /// The last selected colour, or the reset colour.
    pub fn selected_color(&self) -> String {
        self.shared
            .popup
            .lock()
            .selected
            .clone()
            .unwrap_or_else(|| RESET_COLOR.to_string())
    }

    /// Emitted with the colour to apply whenever a palette colour is picked.
    pub fn color_selected(&self) -> &Signal<String> {
        &self.shared.color_selected
    }

    /// Emitted with the new visibility whenever the popup is shown or hidden.
    pub fn popup_visibility_changed(&self) -> &Signal<bool> {
        &self.shared.popup_visibility_changed
    }

    /// Wrap a markdown selection in the configured colour syntax.
    ///
    /// Returns `None` for an empty colour. The range locates the original
    /// text inside the result, so the caller can keep it selected.
    pub fn apply_to_selection(&self, text: &str, color: &str) -> Option<SyntaxRange> {
        if color.is_empty() {
            return None;
        }
        Some(self.syntax.wrap(text, color))
    }

    pub fn markdown_to_html(&self, html: &str) -> String {
        self.syntax.markdown_to_html(html)
    }

    pub fn html_to_markdown(&self, markdown: &str) -> String {
        self.syntax.html_to_markdown(markdown)
    }

    /// Scroll memory for the WYSIWYG side of the command.
    pub fn scroll_memory(&self) -> &ScrollMemory {
        &self.scroll
    }

    /// The editor regained focus.
    ///
    /// Hides the popup. In WYSIWYG mode, returns the scroll position to
    /// restore, if one was remembered.
    pub fn on_editor_focus(&self, wysiwyg: bool) -> Option<f32> {
        self.hide();
        if wysiwyg { self.scroll.take() } else { None }
    }

    /// Disconnect from the toolbar and hide the popup. Safe to call twice.
    pub fn destroy(&self, toolbar: &Toolbar) {
        if let Some((clicked, closed)) = self.connections.lock().take() {
            toolbar.signals().item_triggered.disconnect(clicked);
            self.shared.overlays.unsubscribe(closed);
            tracing::debug!(target: targets::PLUGIN, "colour command removed");
        }
        self.hide();
    }
}

impl std::fmt::Debug for ColorCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorCommand")
            .field("button_index", &self.button_index)
            .field("shown", &self.is_shown())
            .field("palette", &self.shared.palette.len())
            .finish()
    }
}
