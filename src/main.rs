use anyhow::Context;
use clap::Parser;
use pie_menu::config;
use pie_menu::gui::app::AppModel;
use pie_menu::gui::menu::PieMenu;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pie-menu", version, about = "Pie menu demo", long_about = None)]
struct Cli {
    /// Config file to read instead of the default location
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Stylesheet applied to the demo window (overrides the config file)
    #[arg(short = 't', long)]
    theme: Option<PathBuf>,

    /// Number of pie buttons
    #[arg(short = 'b', long)]
    buttons: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut demo = config::load_or_default(cli.config.as_deref());
    if let Some(buttons) = cli.buttons {
        demo.menu.button_count = buttons;
    }
    let theme = cli.theme.or(demo.theme.take());

    let menu = PieMenu::new(demo.menu).context("Invalid pie menu configuration")?;

    // GTK must not see our own flags
    let app = RelmApp::new("org.piemenu.Demo").with_args(Vec::new());

    app.run::<AppModel>((menu, demo.icons, theme));
    Ok(())
}
