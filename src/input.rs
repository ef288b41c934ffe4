use egui::{Context, Pos2, Rect, Vec2, pos2};

/// Where an input event happened, already mapped into canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position in canvas pixels (may lie outside the canvas)
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Pointer events the editing session understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed (or first finger down) on the canvas
    PointerDown { location: InputLocation },
    /// Pointer moved while the primary button is held
    PointerMove { location: InputLocation },
    /// Primary button released
    PointerUp { location: InputLocation },
    /// Pointer left the canvas while the primary button was held
    PointerLeave { last_known_location: InputLocation },
    /// A complete press-and-release on the canvas
    Click { location: InputLocation },
}

/// Maps screen coordinates onto canvas pixels using the canvas's on-screen
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    screen_rect: Rect,
    canvas_size: [u32; 2],
}

impl CanvasMapping {
    pub fn new(screen_rect: Rect, canvas_size: [u32; 2]) -> Self {
        Self {
            screen_rect,
            canvas_size,
        }
    }

    fn scale(&self) -> Vec2 {
        let size = self.screen_rect.size();
        let axis = |canvas: u32, screen: f32| if screen > 0.0 { canvas as f32 / screen } else { 1.0 };
        Vec2::new(axis(self.canvas_size[0], size.x), axis(self.canvas_size[1], size.y))
    }

    pub fn to_canvas(&self, screen_pos: Pos2) -> Pos2 {
        let offset = screen_pos - self.screen_rect.min;
        let scale = self.scale();
        pos2(offset.x * scale.x, offset.y * scale.y)
    }

    pub fn location(&self, screen_pos: Pos2) -> InputLocation {
        let position = self.to_canvas(screen_pos);
        let [width, height] = self.canvas_size;
        InputLocation {
            position,
            is_in_canvas: position.x >= 0.0
                && position.y >= 0.0
                && position.x < width as f32
                && position.y < height as f32,
        }
    }
}

/// Rounds a canvas position to the nearest pixel, clamped to the canvas.
///
/// Returns `None` for positions outside the canvas.
pub fn pixel_at(position: Pos2, canvas_size: [u32; 2]) -> Option<(u32, u32)> {
    let [width, height] = canvas_size;
    if width == 0 || height == 0 {
        return None;
    }
    if position.x < 0.0 || position.y < 0.0 || position.x >= width as f32 || position.y >= height as f32 {
        return None;
    }
    // Nearest pixel, not the one containing the point.
    let x = (position.x.round() as u32).min(width - 1);
    let y = (position.y.round() as u32).min(height - 1);
    Some((x, y))
}

/// One frame's worth of primary-pointer state.
///
/// egui reports the first touch of a multi-touch gesture as the primary
/// pointer, so other fingers never show up here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub position: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
    pub clicked: bool,
}

impl PointerSample {
    pub fn from_context(ctx: &Context) -> Self {
        ctx.input(|input| Self {
            // A touch release arrives together with `PointerGone`, which clears
            // `latest_pos` but keeps the tap position in `interact_pos`.
            position: input.pointer.latest_pos().or_else(|| input.pointer.interact_pos()),
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
            clicked: input.pointer.primary_clicked(),
        })
    }
}

/// Turns raw pointer state into [`InputEvent`]s for the canvas.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_location: Option<InputLocation>,
    dragging: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context, mapping: &CanvasMapping) -> Vec<InputEvent> {
        self.process_sample(PointerSample::from_context(ctx), mapping)
    }

    pub fn process_sample(&mut self, sample: PointerSample, mapping: &CanvasMapping) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let Some(screen_pos) = sample.position else {
            // Pointer left the window
            if self.dragging {
                if let Some(last) = self.last_location {
                    events.push(InputEvent::PointerLeave {
                        last_known_location: last,
                    });
                }
                self.dragging = false;
            }
            self.last_location = None;
            return events;
        };

        let location = mapping.location(screen_pos);

        if sample.pressed && location.is_in_canvas {
            self.dragging = true;
            events.push(InputEvent::PointerDown { location });
        } else if self.dragging && self.last_location.map(|l| l.position) != Some(location.position) {
            if location.is_in_canvas {
                events.push(InputEvent::PointerMove { location });
            } else {
                events.push(InputEvent::PointerLeave {
                    last_known_location: self.last_location.unwrap_or(location),
                });
                self.dragging = false;
            }
        }

        if sample.released && self.dragging {
            events.push(InputEvent::PointerUp { location });
            self.dragging = false;
        }
        if sample.clicked && location.is_in_canvas {
            events.push(InputEvent::Click { location });
        }

        self.last_location = Some(location);
        events
    }
}
