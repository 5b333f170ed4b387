use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use env_logger::Env;
use framegap::{
    AppConfig, FrameDetective, OutputFormat, PageHeader, Panel, PanelState, ResultView, TabBar,
};
use log::debug;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 2] = ["framegap.json", "framegap.toml"];

fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()));
    }

    // Look in the user config dir, then the current dir, then built-in default
    let mut tried: Vec<PathBuf> = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        for name in CONFIG_NAMES {
            tried.push(dir.join("framegap").join(name));
        }
    }
    for name in CONFIG_NAMES {
        tried.push(PathBuf::from(name));
    }

    for p in &tried {
        if p.exists() {
            return AppConfig::from_path(p)
                .with_context(|| format!("loading config {}", p.display()));
        }
        debug!("no config at {}", p.display());
    }

    Ok(AppConfig::default())
}

#[derive(Parser, Debug)]
#[command(version, about = "Find missing frame numbers and missing frame ranges.")]
struct Args {
    /// Panel to open: basic, advanced or professional
    #[arg(long, short)]
    panel: Option<Panel>,

    /// Comma separated frame numbers; runs a single analysis and exits
    #[arg(long, short)]
    frames: Option<String>,

    /// Print the analysis result as JSON (requires --frames)
    #[arg(long, default_value_t = false, requires = "frames")]
    json: bool,

    /// Path to a framegap.json or framegap.toml config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let cfg = load_config(args.config.as_deref())?;
    let detective = FrameDetective::with_config(cfg).context("validating config")?;
    let panel = args.panel.unwrap_or_else(|| detective.default_panel());

    match &args.frames {
        Some(frames) => run_once(&detective, panel, frames, args.json),
        None => run_interactive(&detective, panel),
    }
}

fn run_once(detective: &FrameDetective, panel: Panel, frames: &str, json: bool) -> Result<()> {
    let format = if json { OutputFormat::Json } else { OutputFormat::Text };
    let text = detective.report(panel, frames, format)?;
    println!("{}", text);
    Ok(())
}

fn run_interactive(detective: &FrameDetective, initial: Panel) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut states: Vec<PanelState> = Panel::ALL.iter().map(|&p| detective.panel_state(p)).collect();
    let mut active = Panel::ALL.iter().position(|&p| p == initial).unwrap_or(0);

    println!("{}", PageHeader);
    loop {
        let state = &mut states[active];
        println!("\n{}", TabBar(state.panel));

        let choices = ["Analyze frames", "Clear results", "Switch panel", "Quit"];
        let sel = Select::with_theme(&theme)
            .with_prompt("Choose an action")
            .default(0)
            .items(&choices)
            .interact()?;
        match sel {
            0 => {
                let text: String = Input::with_theme(&theme)
                    .with_prompt("Frame numbers (comma separated)")
                    .with_initial_text(state.input.clone())
                    .allow_empty(true)
                    .interact_text()?;
                state.set_input(text);
                let note = state.analyze();
                if note.is_success() {
                    if let Some(result) = &state.result {
                        println!("\n{}\n", ResultView::new(result, detective.grid_limit()));
                    }
                }
                println!("{}", note);
            }
            1 => {
                state.clear();
                println!("Results cleared.");
            }
            2 => {
                let labels: Vec<&str> = Panel::ALL.iter().map(|p| p.title()).collect();
                active = Select::with_theme(&theme)
                    .with_prompt("Select panel")
                    .default(active)
                    .items(&labels)
                    .interact()?;
            }
            _ => break,
        }
    }

    Ok(())
}
