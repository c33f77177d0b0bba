//! Ultimate Tic-Tac-Toe GUI
//!
//! Play against the engine or against another player on the same screen.

use uttt::ui::UtttApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Ultimate Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Ultimate Tic-Tac-Toe",
        options,
        Box::new(|cc| Ok(Box::new(UtttApp::new(cc)))),
    )
}
