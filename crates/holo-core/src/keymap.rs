//! Keyboard shortcuts shared by the native and web hosts.
//!
//! Hosts translate their key events into the DOM `KeyboardEvent.key` naming
//! ("a", "Enter", "Escape") and look the result up here.

use crate::constants::SCALE_STEP;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelCommand {
    TogglePanel,
    /// Zero-based position in the theme registry.
    SelectTheme(usize),
    CycleTextureSet,
    CycleScanMode,
    CycleGeometry,
    ToggleAutoRotate,
    /// Added to every scale axis.
    NudgeScale(f32),
    ResetDefaults,
    Apply,
    Discard,
}

impl PanelCommand {
    /// Commands that only make sense while editing a draft.
    pub fn edits_draft(self) -> bool {
        !matches!(
            self,
            PanelCommand::TogglePanel | PanelCommand::Apply | PanelCommand::Discard
        )
    }
}

#[inline]
pub fn theme_index_for_digit(key: &str) -> Option<usize> {
    match key {
        "1" => Some(0),
        "2" => Some(1),
        "3" => Some(2),
        "4" => Some(3),
        "5" => Some(4),
        "6" => Some(5),
        _ => None,
    }
}

pub fn command_for_key(key: &str) -> Option<PanelCommand> {
    if let Some(index) = theme_index_for_digit(key) {
        return Some(PanelCommand::SelectTheme(index));
    }
    let cmd = match key {
        "p" | "P" => PanelCommand::TogglePanel,
        "t" | "T" => PanelCommand::CycleTextureSet,
        "m" | "M" => PanelCommand::CycleScanMode,
        "g" | "G" => PanelCommand::CycleGeometry,
        "r" | "R" => PanelCommand::ToggleAutoRotate,
        "+" | "=" => PanelCommand::NudgeScale(SCALE_STEP),
        "-" | "_" => PanelCommand::NudgeScale(-SCALE_STEP),
        "0" => PanelCommand::ResetDefaults,
        "Enter" => PanelCommand::Apply,
        "Escape" => PanelCommand::Discard,
        _ => return None,
    };
    Some(cmd)
}
