//! Integration tests for the font colour command.
#![cfg(feature = "color-plugin")]

use std::sync::Arc;

use horizon_toolstrip::plugins::{ColorCommand, ColorOptions, ColorPreset, COLOR_BUTTON_NAME, RESET_COLOR};
use horizon_toolstrip::{FlowContainer, NoContainers, Toolbar, ToolbarBuilder, ToolbarConfig, ToolbarStyle};
use parking_lot::Mutex;

fn editor_toolbar(width: f32) -> Toolbar {
    let style = ToolbarStyle::default();
    ToolbarBuilder::new(ToolbarConfig::editor_defaults())
        .mount(
            &FlowContainer::with_style(width, &style),
            FlowContainer::with_style(200.0, &style),
            &NoContainers,
        )
        .unwrap()
}

#[test]
fn test_button_lands_after_italic() {
    let toolbar = editor_toolbar(1200.0);
    ColorCommand::install(&toolbar, ColorOptions::default()).unwrap();

    let names: Vec<String> = toolbar.items().iter().take(5).map(|i| i.name().to_string()).collect();
    assert_eq!(names, vec!["heading", "bold", "italic", COLOR_BUTTON_NAME, "strike"]);
}

#[test]
fn test_button_in_overflow_still_opens_popup() {
    let toolbar = editor_toolbar(160.0);
    let command = ColorCommand::install(&toolbar, ColorOptions::default()).unwrap();
    toolbar.frames().run_until_idle(8);

    assert!(toolbar.overflow_items().iter().any(|i| i.name() == COLOR_BUTTON_NAME));

    assert!(toolbar.trigger_clicked());
    toolbar.activate(COLOR_BUTTON_NAME).unwrap();

    assert!(!toolbar.is_overflow_open());
    assert!(command.is_shown());
}

#[test]
fn test_selection_flow() {
    let toolbar = editor_toolbar(1200.0);
    let options = ColorOptions::default()
        .with_preset([
            ColorPreset::from("#181818"),
            ColorPreset::Labeled {
                color: "#d4351c".into(),
                label: Some("Red".into()),
            },
        ])
        .with_custom_syntax(true);
    let command = ColorCommand::install(&toolbar, options).unwrap();

    let applied = Arc::new(Mutex::new(Vec::new()));
    let applied_clone = applied.clone();
    command.color_selected().connect(move |color| applied_clone.lock().push(color.clone()));

    assert_eq!(command.selected_color(), RESET_COLOR);
    toolbar.activate(COLOR_BUTTON_NAME).unwrap();
    assert!(command.select("#d4351c"));

    assert!(!command.is_shown());
    assert_eq!(*applied.lock(), vec!["#d4351c"]);
    assert_eq!(command.palette().label_of("#d4351c"), Some("Red"));

    let wrapped = command
        .apply_to_selection("warning", &command.selected_color())
        .unwrap();
    assert_eq!(wrapped.result, "{color:#d4351c}warning{color}");

    let html = command.markdown_to_html(&wrapped.result);
    assert_eq!(html, r#"<span style="color:#d4351c">warning</span>"#);
    assert_eq!(command.html_to_markdown(&html), wrapped.result);
}
