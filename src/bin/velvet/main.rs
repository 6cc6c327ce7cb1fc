//! velvet - audition velvet-noise early reflections in the terminal
//!
//! Run with: cargo run --bin velvet

mod app;
mod ui;

use log::LevelFilter;
use simple_logger::SimpleLogger;
use velvet_reverb::patch::ReverbPatch;

use app::Audition;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    Audition::new(ReverbPatch::default())
        .click_interval(0.75)
        .run()
}
