use winit::event::{ElementState, MouseButton, VirtualKeyCode, WindowEvent};

/// The input vocabulary the game consumes. Everything else winit reports is
/// dropped at the window boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: u32, y: u32 },
    PointerMoved { x: u32, y: u32 },
    KeyDown(VirtualKeyCode),
    Text(char),
    Quit,
}

/// Converts winit window events into `InputEvent`s, tracking the cursor so
/// pointer-down events carry a position.
#[derive(Debug, Default)]
pub struct EventTranslator {
    pointer: Option<(u32, u32)>,
}

impl EventTranslator {
    pub fn pointer(&self) -> Option<(u32, u32)> {
        self.pointer
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::Quit),
            WindowEvent::CursorMoved { position, .. } => {
                let x = position.x.max(0.0) as u32;
                let y = position.y.max(0.0) as u32;
                self.pointer = Some((x, y));
                Some(InputEvent::PointerMoved { x, y })
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self
                .pointer
                .map(|(x, y)| InputEvent::PointerDown { x, y }),
            WindowEvent::KeyboardInput { input, .. } => {
                if input.state == ElementState::Pressed {
                    input.virtual_keycode.map(InputEvent::KeyDown)
                } else {
                    None
                }
            }
            // Control characters (backspace, escape, ...) arrive as key
            // events; only printable input becomes Text.
            WindowEvent::ReceivedCharacter(ch) if !ch.is_control() => Some(InputEvent::Text(*ch)),
            _ => None,
        }
    }
}
