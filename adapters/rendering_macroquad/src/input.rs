//! Keyboard bindings translated into logical frame input.

use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use platformer_rendering::FrameInput;

/// Keys bound to each logical action.
///
/// Movement and jump keys are sampled while held; the other actions fire
/// once on the frame their key goes down.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
    /// Keys moving the player left.
    pub move_left: Vec<KeyCode>,
    /// Keys moving the player right.
    pub move_right: Vec<KeyCode>,
    /// Keys making the player jump.
    pub jump: Vec<KeyCode>,
    /// Keys accepting menus and prompts.
    pub confirm: Vec<KeyCode>,
    /// Keys toggling pause.
    pub cancel: Vec<KeyCode>,
    /// Keys closing the window.
    pub quit: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec![KeyCode::Left, KeyCode::A],
            move_right: vec![KeyCode::Right, KeyCode::D],
            jump: vec![KeyCode::Space, KeyCode::Up, KeyCode::W],
            confirm: vec![KeyCode::Enter],
            cancel: vec![KeyCode::Escape],
            quit: vec![KeyCode::Q],
        }
    }
}

impl KeyBindings {
    /// Builds the frame input from arbitrary key observations.
    ///
    /// `held` reports whether a key is currently down and `pressed` whether
    /// it went down this frame.
    #[must_use]
    pub fn resolve<H, P>(&self, held: H, pressed: P) -> FrameInput
    where
        H: Fn(KeyCode) -> bool,
        P: Fn(KeyCode) -> bool,
    {
        FrameInput {
            move_left: any_key(&self.move_left, &held),
            move_right: any_key(&self.move_right, &held),
            jump: any_key(&self.jump, &held),
            confirm: any_key(&self.confirm, &pressed),
            cancel: any_key(&self.cancel, &pressed),
            quit: any_key(&self.quit, &pressed),
        }
    }

    pub(crate) fn poll(&self) -> FrameInput {
        self.resolve(is_key_down, is_key_pressed)
    }
}

fn any_key(keys: &[KeyCode], probe: &impl Fn(KeyCode) -> bool) -> bool {
    keys.iter().any(|key| probe(*key))
}
