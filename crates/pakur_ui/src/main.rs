mod app;
mod ui;

fn main() -> eframe::Result<()> {
    pakur_core::logging::init_logger(None);
    ui::app_shell::run()
}
