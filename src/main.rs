use std::path::Path;

use log::LevelFilter;
use scribe_icons::{export, logger};

const ICONS_DIR: &str = "src-tauri/icons";

fn main() {
    logger::init(LevelFilter::Info);

    let report = match export::run(Path::new(ICONS_DIR)) {
        Ok(r) => r,
        Err(e) => {
            log::error!("icon export failed: {}", e);
            eprintln!("Icon export failed: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║              🎉 Icons generated successfully!             ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    log::info!("{} files written to {}", report.files_written(), ICONS_DIR);
}
