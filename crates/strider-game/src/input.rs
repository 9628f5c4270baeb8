//! Input system with action-based mapping
//!
//! Raw window events are mapped to actions through rebindable bindings and
//! turned into the payloads the locomotion controller consumes. Events only
//! queue payloads; nothing moves until the next frame tick.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Payload delivered to a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Current movement input, X forward / Y right (replaces the previous one)
    Move(Vec2),
    /// Look delta, X yaw / Y pitch (accumulated until the next frame)
    Look(Vec2),
    /// Jump request (latched until the next frame)
    Jump,
}

/// Game actions that can be triggered by keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
}

impl InputAction {
    fn is_movement(&self) -> bool {
        !matches!(self, InputAction::Jump)
    }
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<KeyCode, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);

        bindings
    }
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }
}

/// Turns raw window events into queued `InputEvent`s
#[derive(Debug)]
pub struct InputHandler {
    /// Input bindings
    pub bindings: InputBindings,
    /// Multiplier on raw mouse motion
    pub mouse_sensitivity: f32,
    /// Invert Y axis
    pub invert_y: bool,
    /// Mouse motion is only used while the cursor is captured
    pub cursor_captured: bool,
    held: HashSet<InputAction>,
    queue: Vec<InputEvent>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            bindings: InputBindings::default(),
            mouse_sensitivity: 1.0,
            invert_y: false,
            cursor_captured: true,
            held: HashSet::new(),
            queue: Vec::new(),
        }
    }

    /// Movement vector built from the held direction actions
    pub fn move_vector(&self) -> Vec2 {
        let axis = |positive, negative| {
            let mut value = 0.0;
            if self.held.contains(&positive) {
                value += 1.0;
            }
            if self.held.contains(&negative) {
                value -= 1.0;
            }
            value
        };

        Vec2::new(
            axis(InputAction::MoveForward, InputAction::MoveBackward),
            axis(InputAction::MoveRight, InputAction::MoveLeft),
        )
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(action) = self.bindings.get_key_action(key_code) else {
            return;
        };

        match element_state {
            ElementState::Pressed => {
                let newly_pressed = self.held.insert(action);
                if action == InputAction::Jump {
                    if newly_pressed {
                        self.queue.push(InputEvent::Jump);
                    }
                } else {
                    self.queue.push(InputEvent::Move(self.move_vector()));
                }
            }
            ElementState::Released => {
                self.held.remove(&action);
                if action.is_movement() {
                    self.queue.push(InputEvent::Move(self.move_vector()));
                }
            }
        }
    }

    /// Handle raw mouse motion
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if !self.cursor_captured {
            return;
        }
        let y_mult = if self.invert_y { -1.0 } else { 1.0 };
        self.queue.push(InputEvent::Look(Vec2::new(
            delta.0 as f32 * self.mouse_sensitivity,
            delta.1 as f32 * self.mouse_sensitivity * y_mult,
        )));
    }

    /// Take every event queued since the last call
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Forget held keys (e.g. on focus loss) and queue a stop
    pub fn release_all(&mut self) {
        if self.held.drain().any(|action| action.is_movement()) {
            self.queue.push(InputEvent::Move(Vec2::ZERO));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed);
    }

    fn release(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Released);
    }

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyW),
            Some(InputAction::MoveForward)
        );
        assert_eq!(bindings.get_key_action(KeyCode::Space), Some(InputAction::Jump));
    }

    #[test]
    fn test_move_sent_on_press_and_release() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::KeyW);
        press(&mut handler, KeyCode::KeyD);
        release(&mut handler, KeyCode::KeyW);
        release(&mut handler, KeyCode::KeyD);

        assert_eq!(
            handler.drain(),
            vec![
                InputEvent::Move(Vec2::new(1.0, 0.0)),
                InputEvent::Move(Vec2::new(1.0, 1.0)),
                InputEvent::Move(Vec2::new(0.0, 1.0)),
                InputEvent::Move(Vec2::ZERO),
            ]
        );
        assert!(handler.drain().is_empty());
    }

    #[test]
    fn test_jump_only_on_initial_press() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::Space);
        // Key repeat
        press(&mut handler, KeyCode::Space);
        release(&mut handler, KeyCode::Space);
        assert_eq!(handler.drain(), vec![InputEvent::Jump]);
    }

    #[test]
    fn test_mouse_motion_requires_capture() {
        let mut handler = InputHandler::new();
        handler.invert_y = true;
        handler.handle_mouse_motion((2.0, 3.0));
        handler.cursor_captured = false;
        handler.handle_mouse_motion((5.0, 5.0));
        assert_eq!(handler.drain(), vec![InputEvent::Look(Vec2::new(2.0, -3.0))]);
    }

    #[test]
    fn test_rebinding() {
        let mut handler = InputHandler::new();
        handler.bindings.unbind(KeyCode::Space);
        handler.bindings.bind(KeyCode::KeyJ, InputAction::Jump);
        press(&mut handler, KeyCode::Space);
        press(&mut handler, KeyCode::KeyJ);
        assert_eq!(handler.drain(), vec![InputEvent::Jump]);
    }
}
