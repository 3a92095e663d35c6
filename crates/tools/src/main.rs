use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use tools::reports::{minimap_report, render_ascii, route_report};
use tools::{Action, Session, ToolConfig, ToolError};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive the project pixel grid from the command line")]
struct Args {
    /// World generation seed (default: PIXELGRID_SEED or a fixed seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Window width in pixels, sidebar included
    #[arg(long)]
    width: Option<f64>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply actions and print both views' viewports plus the event log as JSON
    Simulate {
        /// up|down|left|right|jump:X,Y|resize:WxH
        actions: Vec<String>,
    },

    /// Print the visible window as text after applying actions
    Render {
        /// Maximum number of rows to print
        #[arg(long, default_value_t = 40)]
        rows: u32,

        actions: Vec<String>,
    },

    /// Print minimap zones and the viewport indicator as JSON
    Minimap { actions: Vec<String> },

    /// Resolve a site path
    Route { path: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = ToolConfig::from_env();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(w) = args.width {
        config.window_w = w;
    }
    if let Some(h) = args.height {
        config.window_h = h;
    }

    match args.command {
        Command::Simulate { actions } => {
            let session = run(config, &actions)?;
            println!("{}", serde_json::to_string_pretty(&session.report())?);
        }
        Command::Render { rows, actions } => {
            let session = run(config, &actions)?;
            let v = session.viewport();
            println!(
                "start={} columns={} visible={}",
                v.start_index(),
                v.columns_per_row(),
                v.visible_count()
            );
            print!("{}", render_ascii(session.world(), &v, rows));
        }
        Command::Minimap { actions } => {
            let session = run(config, &actions)?;
            let report = minimap_report(session.world(), &session.config().grid, &session.viewport());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Route { path } => {
            let now_ms = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0);
            let report = route_report(&path, now_ms)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn run(config: ToolConfig, actions: &[String]) -> Result<Session, ToolError> {
    let actions = actions
        .iter()
        .map(|a| a.parse::<Action>())
        .collect::<Result<Vec<_>, _>>()?;
    let mut session = Session::new(config)?;
    session.apply_all(&actions)?;
    info!(actions = actions.len(), "actions applied");
    Ok(session)
}
