use egui::Color32;

use crate::editor::CanvasEditor;
use crate::input::InputTranslator;
use crate::renderer::CanvasRenderer;
use crate::tools::ToolKind;

/// Demo application wiring the editor core to an eframe window: raw input
/// is translated to semantic events, the core mutates the document, and the
/// renderer redraws from the store each frame.
pub struct AnnotateApp {
    editor: CanvasEditor,
    translator: InputTranslator,
    renderer: CanvasRenderer,
}

impl AnnotateApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            editor: CanvasEditor::new(),
            translator: InputTranslator::new(),
            renderer: CanvasRenderer::new(),
        }
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");
        ui.separator();

        let active = self.editor.config().active_tool;
        for (tool, label) in [
            (ToolKind::Point, "• Point"),
            (ToolKind::Rectangle, "▭ Rectangle"),
            (ToolKind::Ellipse, "⬭ Ellipse"),
            (ToolKind::Polygon, "⬠ Polygon"),
        ] {
            if ui.selectable_label(active == tool, label).clicked() {
                self.editor.set_tool(tool);
            }
        }

        ui.separator();

        let mut color = self.editor.config().color;
        ui.horizontal(|ui| {
            ui.label("Color:");
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                self.editor.set_color(color);
            }
        });

        let mut width = self.editor.config().line_width;
        ui.horizontal(|ui| {
            ui.label("Width:");
            if ui.add(egui::Slider::new(&mut width, 0.5..=10.0)).changed() {
                self.editor.set_line_width(width);
            }
        });

        ui.separator();

        let mut snap = self.editor.config().snap_to_grid;
        if ui.checkbox(&mut snap, "Snap to grid").changed() {
            self.editor.set_snap_to_grid(snap);
        }
        let mut grid = self.editor.config().grid_size;
        ui.horizontal(|ui| {
            ui.label("Grid:");
            if ui.add(egui::Slider::new(&mut grid, 2.0..=100.0)).changed() {
                self.editor.set_grid_size(grid);
            }
        });

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Undo").clicked() {
                self.editor.undo();
            }
            if ui.button("Redo").clicked() {
                self.editor.redo();
            }
        });
        if ui.button("Delete selected").clicked() {
            self.editor.delete_selected();
        }
        if ui.button("Clear all").clicked() {
            self.editor.clear_all();
        }
    }
}

impl eframe::App for AnnotateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("tools_panel")
            .resizable(false)
            .show(ctx, |ui| self.tools_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::canvas(&ctx.style()))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let canvas_rect = response.rect;

                self.translator.set_canvas_rect(canvas_rect);
                for event in self.translator.translate(ctx) {
                    self.editor.handle_event(event);
                }

                painter.rect_filled(canvas_rect, 0.0, Color32::from_gray(24));
                self.renderer.set_origin(canvas_rect.min.to_vec2());
                self.renderer.paint(&painter, canvas_rect, &self.editor);
            });
    }
}
