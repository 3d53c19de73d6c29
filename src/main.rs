use std::path::PathBuf;
use std::process;

use clap::Parser;

use evalpad::app::{App, AppConfig};
use evalpad::event::TerminalEvents;
use evalpad::geometry::Region;
use evalpad::script::RhaiEngine;
use evalpad::widgets::Label;

/// A terminal scripting pad: type rhai code, Enter evaluates it.
#[derive(Debug, Parser)]
#[command(name = "evalpad", version, about)]
struct Options {
    /// Script file to execute at startup.
    script: Option<PathBuf>,

    /// Window title.
    #[arg(long, default_value = "evalpad")]
    title: String,
}

fn main() {
    env_logger::init();
    let options = Options::parse();

    if let Err(err) = run(options) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(options: Options) -> evalpad::Result<()> {
    let mut config = AppConfig::new().with_title(&options.title);
    if let Some(path) = options.script {
        config = config.with_script_path(path);
    }

    let mut app = App::new(config, Box::new(RhaiEngine::new()))?;
    let tracker = app.tracker();
    let width = (app.size().width - 2).max(1);

    let input = Label::new(
        "input",
        Region::new(1, 1, width, 1),
        "type code, Enter runs it",
        "#00aa55",
        tracker.clone(),
    )?;
    let result = Label::new("result", Region::new(1, 3, width, 1), "", "#00aa55", tracker.clone())?;
    let caption = Label::new(
        "caption",
        Region::new(1, 5, width, 1),
        "evalpad (Ctrl+C quits)",
        "#aa4400",
        tracker,
    )?;

    app.set_input_label(input);
    app.set_result_label(result);
    app.add_widget(Box::new(caption));

    app.run(&mut TerminalEvents::new())
}
