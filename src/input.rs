use egui::{Key, Modifiers, Pos2, Rect};

/// Semantic input events consumed by the interaction machine.
///
/// Positions are in canvas logical coordinates; the translator below (or any
/// external input collaborator) has already mapped them from device space.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    PointerDown { pos: Pos2, modifiers: Modifiers },
    PointerMove { pos: Pos2 },
    PointerUp { pos: Pos2 },
    KeyPress { key: Key, modifiers: Modifiers },
}

/// Translates raw egui input into semantic [`InputEvent`]s for the canvas.
///
/// Pointer events outside the canvas rect are ignored, except that a release
/// is always delivered so an in-flight drag can complete when the pointer
/// leaves the canvas.
pub struct InputTranslator {
    canvas_rect: Option<Rect>,
    pointer_down: bool,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self {
            canvas_rect: None,
            pointer_down: false,
        }
    }

    /// Update the canvas rect for this frame; positions are reported
    /// relative to its origin.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        match self.canvas_rect {
            Some(rect) => pos - rect.min.to_vec2(),
            None => pos,
        }
    }

    /// Drain this frame's raw input into semantic events, in the order the
    /// machine expects them (moves before presses/releases, keys last).
    pub fn translate(&mut self, ctx: &egui::Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let canvas_rect = self.canvas_rect;

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            let inside = match (hover, canvas_rect) {
                (Some(pos), Some(rect)) => rect.contains(pos),
                (Some(_), None) => true,
                (None, _) => false,
            };

            if let Some(pos) = hover {
                if inside || self.pointer_down {
                    events.push(InputEvent::PointerMove {
                        pos: self.to_canvas(pos),
                    });
                }
                if input.pointer.primary_pressed() && inside {
                    self.pointer_down = true;
                    events.push(InputEvent::PointerDown {
                        pos: self.to_canvas(pos),
                        modifiers: input.modifiers,
                    });
                }
                if input.pointer.primary_released() && self.pointer_down {
                    self.pointer_down = false;
                    events.push(InputEvent::PointerUp {
                        pos: self.to_canvas(pos),
                    });
                }
            }

            for event in &input.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    events.push(InputEvent::KeyPress {
                        key: *key,
                        modifiers: *modifiers,
                    });
                }
            }
        });

        events
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new()
    }
}
