use egui::{Event, Modifiers, PointerButton, RawInput, Rect, pos2, vec2};
use snapdoodle::input::{CanvasMapping, InputHandler, PointerSample};
use snapdoodle::{Document, EditorConfig, Pixel, PixelBuffer, Rgb, Tool};

fn outlined_document() -> Document {
    let mut line_art = PixelBuffer::filled(60, 40, Pixel::WHITE);
    for y in 0..40 {
        line_art.set(30, y, Pixel::BLACK).unwrap();
    }
    Document::new(line_art, &EditorConfig::default())
}

fn sample(x: f32, y: f32) -> PointerSample {
    PointerSample {
        position: Some(pos2(x, y)),
        ..Default::default()
    }
}

// Canvas drawn at (200, 100) on screen
fn mapping(document: &Document) -> CanvasMapping {
    CanvasMapping::new(Rect::from_min_size(pos2(200.0, 100.0), vec2(60.0, 40.0)), document.size())
}

fn drive(document: &mut Document, handler: &mut InputHandler, samples: &[PointerSample]) -> usize {
    let mapping = mapping(document);
    let mut changes = 0;
    for sample in samples {
        for event in handler.process_sample(*sample, &mapping) {
            if document.handle_event(&event).unwrap() {
                changes += 1;
            }
        }
    }
    changes
}

#[test]
fn test_screen_drag_paints_in_canvas_space() {
    let mut document = outlined_document();
    let mut handler = InputHandler::new();
    document.set_brush_size(2);

    drive(
        &mut document,
        &mut handler,
        &[
            PointerSample {
                pressed: true,
                ..sample(205.0, 110.0)
            },
            sample(215.0, 110.0),
            PointerSample {
                released: true,
                ..sample(215.0, 110.0)
            },
        ],
    );

    let red = Rgb::new(255, 0, 0).opaque();
    assert_eq!(document.paint_layer().get(10, 10).unwrap(), red);
    assert_eq!(document.paint_layer().get(10, 20).unwrap(), Pixel::TRANSPARENT);
    assert_eq!(document.history().len(), 2);
}

#[test]
fn test_fill_click_through_the_input_handler() {
    let mut document = outlined_document();
    let mut handler = InputHandler::new();
    document.set_tool(Tool::Fill);
    document.set_color("#00FF00");

    let changes = drive(
        &mut document,
        &mut handler,
        &[PointerSample {
            pressed: true,
            released: true,
            clicked: true,
            ..sample(250.0, 120.0)
        }],
    );
    assert_eq!(changes, 1);

    let green = Rgb::new(0, 255, 0).opaque();
    assert_eq!(document.paint_layer().get(59, 0).unwrap(), green);
    assert_eq!(document.paint_layer().get(29, 0).unwrap(), Pixel::TRANSPARENT);
    assert!(!document.is_stroking());
}

#[test]
fn test_eraser_never_touches_the_line_art() {
    let mut document = outlined_document();
    document.set_tool(Tool::Fill);
    document.fill_at(5, 5).unwrap();
    let line_art = document.boundary_layer().clone();

    document.set_tool(Tool::Eraser);
    document.set_brush_size(20);
    document.begin_stroke(pos2(0.0, 20.0)).unwrap();
    document.continue_stroke(pos2(59.0, 20.0)).unwrap();
    document.commit_stroke().unwrap();

    assert_eq!(document.boundary_layer(), &line_art);
    assert_eq!(document.paint_layer().get(5, 20).unwrap(), Pixel::TRANSPARENT);
    // Rows far from the stroke keep their fill.
    assert_eq!(document.paint_layer().get(5, 0).unwrap(), Rgb::new(255, 0, 0).opaque());
    assert_eq!(document.flatten().unwrap().get(30, 20).unwrap(), Pixel::BLACK);
}

#[test]
fn test_switching_tools_mid_stroke_commits_it() {
    let mut document = outlined_document();
    document.begin_stroke(pos2(10.0, 10.0)).unwrap();
    document.set_tool(Tool::Fill);
    assert!(!document.is_stroking());
    assert_eq!(document.history().len(), 2);
}

fn touch_frame(events: Vec<Event>) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0))),
        events,
        ..Default::default()
    }
}

fn primary(pos: egui::Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

#[test]
fn test_touch_tap_fills_with_the_fill_tool() {
    let mut document = outlined_document();
    document.set_tool(Tool::Fill);
    document.set_color("#00FF00");
    let mapping = mapping(&document);
    let mut handler = InputHandler::new();
    let ctx = egui::Context::default();
    let tap = pos2(250.0, 120.0);

    // Touch end delivers the release and `PointerGone` in the same frame.
    let frames = [
        touch_frame(vec![Event::PointerMoved(tap), primary(tap, true)]),
        touch_frame(vec![primary(tap, false), Event::PointerGone]),
    ];
    let mut changes = 0;
    for frame in frames {
        let _ = ctx.run(frame, |ctx| {
            for event in handler.process_input(ctx, &mapping) {
                if document.handle_event(&event).unwrap() {
                    changes += 1;
                }
            }
        });
    }

    assert_eq!(changes, 1);
    assert!(!handler.is_dragging());
    let green = Rgb::new(0, 255, 0).opaque();
    assert_eq!(document.paint_layer().get(50, 20).unwrap(), green);
    assert_eq!(document.paint_layer().get(10, 10).unwrap(), Pixel::TRANSPARENT);
}
