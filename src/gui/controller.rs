use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use nalgebra::Vector2;

use crate::model::{BodyID, Change, Control, Direction};

// Key config, all in one place
const KEY_FORWARD: Key = Key::W;
const KEY_BACKWARD: Key = Key::S;
const KEY_LEFT: Key = Key::A;
const KEY_RIGHT: Key = Key::D;
const KEY_SPIN_FASTER: Key = Key::Up;
const KEY_SPIN_SLOWER: Key = Key::Down;
const KEY_ORBIT_FASTER: Key = Key::Right;
const KEY_ORBIT_SLOWER: Key = Key::Left;
const KEY_PREV_BODY: Key = Key::Q;
const KEY_NEXT_BODY: Key = Key::E;
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_TOGGLE_ORBITS: Key = Key::O;
const KEY_EXIT: Key = Key::Escape;

const LOOK_BUTTON: MouseButton = MouseButton::Button1;

const FLY_KEYS: [(Key, Direction); 4] = [
    (KEY_FORWARD, Direction::Forward),
    (KEY_BACKWARD, Direction::Backward),
    (KEY_LEFT, Direction::Left),
    (KEY_RIGHT, Direction::Right),
];

/// Turns window events into scene controls.
///
/// Movement and speed keys repeat every frame for as long as they're held;
/// everything else fires once per press. Rate keys act on the selected body,
/// which Q/E cycle through.
pub struct Controller {
    body_names: Vec<String>,
    selected: usize,
    held_keys: Vec<Key>,
    looking: bool,
    last_cursor_pos: Option<Vector2<f32>>,
    pending: Vec<Control>,
}

impl Controller {
    pub fn new(body_names: Vec<String>) -> Self {
        Controller {
            body_names,
            selected: 0,
            held_keys: vec![],
            looking: false,
            last_cursor_pos: None,
            pending: vec![],
        }
    }

    pub fn selected(&self) -> BodyID {
        BodyID(self.selected)
    }

    pub fn process_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::Key(key, Action::Press, _) => {
                if !self.held_keys.contains(&key) {
                    self.held_keys.push(key);
                }
                self.key_pressed(key);
            }
            WindowEvent::Key(key, Action::Release, _) => {
                self.held_keys.retain(|k| *k != key);
            }
            WindowEvent::MouseButton(button, action, _) if button == LOOK_BUTTON => {
                self.looking = action == Action::Press;
            }
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);
                if let (true, Some(last_pos)) = (self.looking, self.last_cursor_pos) {
                    let dpos = curr_pos - last_pos;
                    self.pending.push(Control::Look {
                        dx: dpos.x,
                        dy: dpos.y,
                    });
                }
                self.last_cursor_pos = Some(curr_pos);
            }
            _ => {}
        }
    }

    fn key_pressed(&mut self, key: Key) {
        match key {
            KEY_NEXT_BODY => self.select(1),
            KEY_PREV_BODY => self.select(self.body_names.len().saturating_sub(1)),
            KEY_TOGGLE_PAUSE => self.pending.push(Control::TogglePause),
            KEY_TOGGLE_ORBITS => self.pending.push(Control::ToggleOrbitPaths),
            KEY_EXIT => self.pending.push(Control::Exit),
            _ => {}
        }
    }

    fn select(&mut self, step: usize) {
        let num_bodies = self.body_names.len();
        if num_bodies == 0 {
            return;
        }
        self.selected = (self.selected + step) % num_bodies;
        log::info!("Selected {}", self.body_names[self.selected]);
    }

    fn is_held(&self, key: Key) -> bool {
        self.held_keys.contains(&key)
    }

    /// Everything that happened since the last call, plus one control per held key.
    pub fn controls(&mut self) -> Vec<Control> {
        let mut controls = std::mem::take(&mut self.pending);

        for (key, direction) in FLY_KEYS.iter() {
            if self.is_held(*key) {
                controls.push(Control::Fly(*direction));
            }
        }

        let body = self.selected();
        let rate_keys = [
            (KEY_SPIN_FASTER, Control::Spin { body, change: Change::Faster }),
            (KEY_SPIN_SLOWER, Control::Spin { body, change: Change::Slower }),
            (KEY_ORBIT_FASTER, Control::Orbit { body, change: Change::Faster }),
            (KEY_ORBIT_SLOWER, Control::Orbit { body, change: Change::Slower }),
        ];
        for (key, control) in rate_keys.iter() {
            if self.is_held(*key) {
                controls.push(*control);
            }
        }

        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use kiss3d::event::Modifiers;

    fn press(key: Key) -> WindowEvent {
        WindowEvent::Key(key, Action::Press, Modifiers::empty())
    }

    fn release(key: Key) -> WindowEvent {
        WindowEvent::Key(key, Action::Release, Modifiers::empty())
    }

    fn controller() -> Controller {
        let names = ["sun", "earth", "moon"];
        Controller::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_held_keys_repeat() {
        let mut controller = controller();
        controller.process_event(&press(Key::W));
        controller.process_event(&press(Key::Up));

        let expected = vec![
            Control::Fly(Direction::Forward),
            Control::Spin {
                body: BodyID(0),
                change: Change::Faster,
            },
        ];
        assert_eq!(controller.controls(), expected);
        assert_eq!(controller.controls(), expected);

        controller.process_event(&release(Key::W));
        controller.process_event(&release(Key::Up));
        assert!(controller.controls().is_empty());
    }

    #[test]
    fn test_one_shot_keys() {
        let mut controller = controller();
        controller.process_event(&press(Key::Space));
        controller.process_event(&press(Key::Escape));

        assert_eq!(
            controller.controls(),
            vec![Control::TogglePause, Control::Exit]
        );
        // Still held, but these don't repeat
        assert!(controller.controls().is_empty());
    }

    #[test]
    fn test_selection_wraps() {
        let mut controller = controller();
        controller.process_event(&press(Key::Q));
        assert_eq!(controller.selected(), BodyID(2));
        controller.process_event(&release(Key::Q));

        controller.process_event(&press(Key::E));
        assert_eq!(controller.selected(), BodyID(0));
        controller.process_event(&release(Key::E));
        controller.process_event(&press(Key::E));
        assert_eq!(controller.selected(), BodyID(1));

        controller.process_event(&press(Key::Left));
        assert_eq!(
            controller.controls(),
            vec![Control::Orbit {
                body: BodyID(1),
                change: Change::Slower,
            }]
        );
    }

    #[test]
    fn test_look_only_while_dragging() {
        let mut controller = controller();
        let cursor = |x, y| WindowEvent::CursorPos(x, y, Modifiers::empty());

        controller.process_event(&cursor(10.0, 10.0));
        controller.process_event(&cursor(20.0, 15.0));
        assert!(controller.controls().is_empty());

        controller.process_event(&WindowEvent::MouseButton(
            MouseButton::Button1,
            Action::Press,
            Modifiers::empty(),
        ));
        controller.process_event(&cursor(23.0, 11.0));
        assert_eq!(
            controller.controls(),
            vec![Control::Look { dx: 3.0, dy: -4.0 }]
        );

        controller.process_event(&WindowEvent::MouseButton(
            MouseButton::Button1,
            Action::Release,
            Modifiers::empty(),
        ));
        controller.process_event(&cursor(0.0, 0.0));
        assert!(controller.controls().is_empty());
    }
}
