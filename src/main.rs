mod app;
mod chord;
mod data;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    data_path: String,

    #[arg(long, default_value_t = 0.25)]
    threshold: f64,

    #[arg(long)]
    show_only_selection: bool,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "chordview",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ChordViewApp::new(
                cc,
                args.data_path.clone(),
                args.threshold,
                args.show_only_selection,
            )))
        }),
    )
}
