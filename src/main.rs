#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() -> eframe::Result {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };
    eframe::run_native(
        "eframe annotate",
        native_options,
        Box::new(|cc| Ok(Box::new(eframe_annotate::AnnotateApp::new(cc)))),
    )
}
