use crate::PaintApp;
use crate::color::Rgb;
use crate::tools::Tool;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active_tool = app.settings().tool;
            ui.horizontal_wrapped(|ui| {
                for tool in Tool::ALL {
                    if ui.selectable_label(active_tool == tool, tool.name()).clicked() {
                        app.set_tool(tool);
                    }
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                if ui.add_enabled(app.can_undo(), egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(app.can_redo(), egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });
            ui.horizontal(|ui| {
                let has_document = app.document().is_some();
                if ui.add_enabled(has_document, egui::Button::new("Clear")).clicked() {
                    app.clear();
                }
                if ui.add_enabled(has_document, egui::Button::new("Download")).clicked() {
                    app.export();
                }
            });
            if let Some(history) = app.document().map(|document| document.history()) {
                ui.label(format!("History: {}/{}", history.cursor() + 1, history.len()));
            }
            ui.separator();

            ui.strong("Colors");
            let active_color = app.settings().color.clone();
            let palette = app.config().palette.clone();
            egui::Grid::new("palette_grid").spacing([4.0, 4.0]).show(ui, |ui| {
                for (i, hex) in palette.iter().enumerate() {
                    let Some(rgb) = Rgb::from_hex(hex) else {
                        continue;
                    };
                    let selected = hex.eq_ignore_ascii_case(&active_color);
                    let stroke = if selected {
                        egui::Stroke::new(2.0, egui::Color32::from_rgb(0, 255, 255))
                    } else {
                        egui::Stroke::NONE
                    };
                    let swatch = egui::Button::new("")
                        .fill(egui::Color32::from(rgb))
                        .stroke(stroke)
                        .min_size(egui::vec2(20.0, 20.0));
                    if ui.add(swatch).on_hover_text(hex.as_str()).clicked() {
                        app.set_color(hex);
                    }
                    if i % 5 == 4 {
                        ui.end_row();
                    }
                }
            });
            ui.separator();

            ui.strong("Brush Size");
            let active_size = app.settings().brush_size;
            let sizes = app.config().brush_sizes.clone();
            ui.horizontal_wrapped(|ui| {
                for size in sizes {
                    if ui.selectable_label(active_size == size, format!("{size}px")).clicked() {
                        app.set_brush_size(size);
                    }
                }
            });

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}
