//! The panels drawn around the heart: the welcome screen and the name input.

use crate::render::operation::RenderOperation;
use crate::render::properties::CanvasSize;
use crate::style::{Color, TextStyle};

const TITLE_COLOR: Color = Color::new(255, 182, 193);
const HINT_COLOR: Color = Color::new(160, 160, 160);
const INPUT_COLOR: Color = Color::WHITE;

/// The welcome screen: a title and a hint on how to continue.
pub(crate) fn welcome_panel(title: &str, canvas: CanvasSize) -> Vec<RenderOperation> {
    let (center_x, center_y) = canvas.center();
    vec![
        RenderOperation::RenderText {
            text: title.to_string(),
            center_x,
            y: center_y - 2.0,
            style: TextStyle::new(TITLE_COLOR).bold(),
        },
        RenderOperation::RenderText {
            text: "press Enter to come in, Esc to leave".into(),
            center_x,
            y: center_y + 2.0,
            style: TextStyle::new(HINT_COLOR),
        },
    ]
}

/// The name input, drawn right below the canvas.
pub(crate) fn input_panel(prompt: &str, name: &str, canvas: CanvasSize) -> Vec<RenderOperation> {
    let (center_x, _) = canvas.center();
    vec![RenderOperation::RenderText {
        text: format!("{prompt}: {name}_"),
        center_x,
        y: canvas.height as f32 + 1.0,
        style: TextStyle::new(INPUT_COLOR),
    }]
}

/// The key hints shown while the input is hidden.
pub(crate) fn controls_panel(canvas: CanvasSize) -> Vec<RenderOperation> {
    let (center_x, _) = canvas.center();
    vec![RenderOperation::RenderText {
        text: "ctrl+r reset   +/- pulse speed   esc quit".into(),
        center_x,
        y: canvas.height as f32 + 1.0,
        style: TextStyle::new(HINT_COLOR),
    }]
}
