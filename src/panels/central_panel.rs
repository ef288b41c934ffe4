use crate::PaintApp;
use crate::input::CanvasMapping;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_rect_before_wrap();

        if let Some(bytes) = app.take_pending_line_art() {
            app.load_line_art(&bytes, available.size());
        }

        let (document, renderer, input) = app.parts_mut();
        let Some(document) = document else {
            ui.centered_and_justified(|ui| {
                ui.label("Drop a line-art image here to start coloring");
            });
            return;
        };

        let [width, height] = document.size();
        let canvas_rect = egui::Rect::from_center_size(
            available.center(),
            egui::vec2(width as f32, height as f32),
        );
        ui.allocate_rect(canvas_rect, egui::Sense::click_and_drag());

        let mapping = CanvasMapping::new(canvas_rect, document.size());
        let mut changed = false;
        for event in input.process_input(ctx, &mapping) {
            match document.handle_event(&event) {
                Ok(true) => changed = true,
                Ok(false) => {}
                Err(err) => log::error!("Ignoring {:?}: {}", event, err),
            }
        }

        if let Some(renderer) = renderer {
            if changed {
                renderer.invalidate();
            }
            if let Err(err) = renderer.update(document) {
                log::error!("Failed to composite canvas: {err}");
            }
            renderer.render(ui.painter(), canvas_rect);
        }
    });
}
