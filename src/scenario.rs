//! Scripted input timeline for headless runs
//!
//! Cues are raw key and mouse events. They go through the same
//! `InputHandler` a window would feed, so bindings and key-repeat rules
//! apply exactly as they would with a player at the keyboard.

use strider_game::InputHandler;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// A raw input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueAction {
    Press(KeyCode),
    Release(KeyCode),
    /// Raw mouse motion (x, y)
    Mouse(f64, f64),
    /// Focus lost: every held key is dropped
    ReleaseAll,
}

/// An input event delivered at a fixed simulation time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub at: f32,
    pub action: CueAction,
}

/// Time-ordered list of input cues
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    cues: Vec<Cue>,
    next: usize,
}

impl Scenario {
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { cues, next: 0 }
    }

    /// Walk forward, turn right and jump, turn back and run into the wall, then stop
    pub fn demo() -> Self {
        use CueAction::*;

        let cue = |at, action| Cue { at, action };
        Self::new(vec![
            cue(0.5, Press(KeyCode::KeyW)),
            cue(1.5, Mouse(30.0, 0.0)),
            cue(2.0, Press(KeyCode::Space)),
            cue(2.1, Release(KeyCode::Space)),
            cue(3.0, Mouse(-30.0, 0.0)),
            cue(3.5, Press(KeyCode::KeyD)),
            cue(4.2, Press(KeyCode::Space)),
            cue(4.3, Release(KeyCode::Space)),
            cue(5.5, ReleaseAll),
            cue(6.0, Press(KeyCode::Space)),
            cue(6.1, Release(KeyCode::Space)),
        ])
    }

    /// Hand every cue whose time has been reached to `input`.
    /// Returns how many were delivered.
    pub fn feed(&mut self, now: f32, input: &mut InputHandler) -> usize {
        let start = self.next;
        while let Some(cue) = self.cues.get(self.next).filter(|cue| cue.at <= now) {
            match cue.action {
                CueAction::Press(key) => {
                    input.handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed)
                }
                CueAction::Release(key) => {
                    input.handle_keyboard(PhysicalKey::Code(key), ElementState::Released)
                }
                CueAction::Mouse(x, y) => input.handle_mouse_motion((x, y)),
                CueAction::ReleaseAll => input.release_all(),
            }
            self.next += 1;
        }
        self.next - start
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.cues.len()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use strider_game::InputEvent;

    use super::*;

    #[test]
    fn test_cues_delivered_once_in_order() {
        let mut input = InputHandler::new();
        let mut scenario = Scenario::new(vec![
            Cue {
                at: 1.0,
                action: CueAction::Press(KeyCode::Space),
            },
            Cue {
                at: 0.5,
                action: CueAction::Press(KeyCode::KeyW),
            },
        ]);

        assert_eq!(scenario.feed(0.1, &mut input), 0);
        assert_eq!(scenario.feed(0.6, &mut input), 1);
        assert_eq!(input.drain(), vec![InputEvent::Move(Vec2::X)]);

        assert_eq!(scenario.feed(2.0, &mut input), 1);
        assert_eq!(input.drain(), vec![InputEvent::Jump]);
        assert_eq!(scenario.feed(3.0, &mut input), 0);
        assert!(scenario.is_finished());
    }

    #[test]
    fn test_demo_ends_at_rest() {
        let mut input = InputHandler::new();
        let mut scenario = Scenario::demo();
        scenario.feed(f32::MAX, &mut input);

        let last_move = input.drain().into_iter().rev().find_map(|event| match event {
            InputEvent::Move(v) => Some(v),
            _ => None,
        });
        assert_eq!(last_move, Some(Vec2::ZERO));
        assert!(scenario.is_finished());
    }
}
