//! Interactive Dijkstra shortest-path visualizer for the terminal.
//!
//! Run with `RUST_LOG=debug pathviz 2>pathviz.log` to capture a trace
//! without disturbing the alternate screen.

mod colors;
mod model;

use pathviz_core::app::{App, AppConfig};
use pathviz_crossterm::CrosstermDriver;

use model::{UI_HEIGHT, UI_WIDTH, VizModel};

fn main() {
    env_logger::init();

    let model = VizModel::new();
    let driver = CrosstermDriver::new();
    let mut app = App::new(AppConfig {
        model,
        driver,
        width: UI_WIDTH,
        height: UI_HEIGHT,
    });

    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
