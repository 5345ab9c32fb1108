mod app;
mod registry;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Include external posts in the graph at startup.
    #[arg(long)]
    with_posts: bool,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "folio-graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::FolioGraphApp::new(cc, args.with_posts)))),
    )
}
