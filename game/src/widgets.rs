use engine::graphics::{Canvas, text_height};
use engine::ui::{Rect, Size, vstack};
use winit::event::VirtualKeyCode;

use crate::config::Palette;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 12;

pub const MENU_BUTTON_SIZE: Size = Size::new(240, 44);
pub const MENU_BUTTON_GAP: u32 = 12;
const LABEL_SCALE: u32 = 2;

#[derive(Debug, Clone)]
pub struct Button<A: Copy> {
    pub rect: Rect,
    pub label: String,
    pub action: A,
    pub danger: bool,
}

impl<A: Copy> Button<A> {
    pub fn new(rect: Rect, label: &str, action: A) -> Self {
        Self {
            rect,
            label: label.to_string(),
            action,
            danger: false,
        }
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    pub fn hit(&self, x: u32, y: u32) -> bool {
        self.rect.contains(x, y)
    }

    pub fn draw(&self, canvas: &mut Canvas<'_>, palette: &Palette) {
        let fill = if self.danger {
            palette.error
        } else {
            palette.panel
        };
        canvas.fill_rect(self.rect, fill);
        canvas.rect_outline(self.rect, palette.panel_border);

        let tx = Canvas::centered_text_x(self.rect.center_x(), &self.label, LABEL_SCALE);
        let ty = self
            .rect
            .y
            .saturating_add(self.rect.h.saturating_sub(text_height(LABEL_SCALE)) / 2);
        canvas.draw_text_scaled(tx, ty, &self.label, palette.text, LABEL_SCALE);
    }
}

/// A titled, vertically centered stack of buttons.
#[derive(Debug, Clone)]
pub struct Menu<A: Copy> {
    title: String,
    buttons: Vec<Button<A>>,
}

impl<A: Copy> Menu<A> {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            buttons: Vec::new(),
        }
    }

    pub fn button(mut self, label: &str, action: A) -> Self {
        self.buttons
            .push(Button::new(Rect::default(), label, action));
        self
    }

    pub fn danger_button(mut self, label: &str, action: A) -> Self {
        self.buttons
            .push(Button::new(Rect::default(), label, action).danger());
        self
    }

    /// Computes the button rects for a window of the given size. Call once
    /// after the last `button`.
    pub fn layout(mut self, width: u32, height: u32) -> Self {
        let rects = vstack(
            Rect::from_size(width, height),
            MENU_BUTTON_SIZE,
            self.buttons.len() as u32,
            MENU_BUTTON_GAP,
        );
        for (button, rect) in self.buttons.iter_mut().zip(rects) {
            button.rect = rect;
        }
        self
    }

    pub fn action_at(&self, x: u32, y: u32) -> Option<A> {
        self.buttons.iter().find(|b| b.hit(x, y)).map(|b| b.action)
    }

    #[cfg(test)]
    pub(crate) fn button_rect_for_test(&self, index: usize) -> Rect {
        self.buttons[index].rect
    }

    pub fn draw(&self, canvas: &mut Canvas<'_>, palette: &Palette) {
        let title_scale = 4;
        let tx = Canvas::centered_text_x(canvas.width() / 2, &self.title, title_scale);
        canvas.draw_text_scaled(tx, 40, &self.title, palette.title, title_scale);
        for button in &self.buttons {
            button.draw(canvas, palette);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBoxEvent {
    None,
    Submitted,
}

/// Single-line text entry with a blinking cursor.
#[derive(Debug, Clone)]
pub struct InputBox {
    rect: Rect,
    value: String,
    max_len: usize,
    cursor_on: bool,
}

impl InputBox {
    pub fn new(rect: Rect, max_len: usize) -> Self {
        Self {
            rect,
            value: String::new(),
            max_len,
            cursor_on: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(self.max_len).collect();
    }

    pub fn handle_text(&mut self, ch: char) {
        let accepted = ch.is_ascii_alphanumeric() || ch == ' ' || ch == '-' || ch == '_';
        if accepted && self.value.chars().count() < self.max_len {
            self.value.push(ch.to_ascii_uppercase());
        }
    }

    pub fn handle_key(&mut self, key: VirtualKeyCode) -> InputBoxEvent {
        match key {
            VirtualKeyCode::Back => {
                self.value.pop();
                InputBoxEvent::None
            }
            VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => InputBoxEvent::Submitted,
            _ => InputBoxEvent::None,
        }
    }

    /// Advances the cursor blink; call from the owning scene's update.
    pub fn tick(&mut self, now_ms: u64, blink_ms: u64) {
        self.cursor_on = (now_ms / blink_ms.max(1)) % 2 == 0;
    }

    pub fn draw(&self, canvas: &mut Canvas<'_>, palette: &Palette) {
        canvas.fill_rect(self.rect, palette.panel);
        canvas.rect_outline(self.rect, palette.panel_border);

        let shown = if self.cursor_on {
            format!("{}_", self.value)
        } else {
            self.value.clone()
        };
        let tx = Canvas::centered_text_x(self.rect.center_x(), &shown, LABEL_SCALE);
        let ty = self
            .rect
            .y
            .saturating_add(self.rect.h.saturating_sub(text_height(LABEL_SCALE)) / 2);
        canvas.draw_text_scaled(tx, ty, &shown, palette.text, LABEL_SCALE);
    }
}
