use anyhow::Result;
use clap::Parser;
use neurodrive_core::init_logging;
use neurodrive_io::HistoryLogger;
use neurodrive_lib::app::App;
use neurodrive_lib::model::config::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Stop after this many generations (overrides the config file)
    #[arg(short, long)]
    generations: Option<u64>,

    /// RNG seed for a reproducible run (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for the run history
    #[arg(long, default_value = "logs")]
    log_dir: String,

    /// Do not write a run history
    #[arg(long)]
    no_history: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(generations) = self.generations {
            config.simulation.max_generations = Some(generations);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = AppConfig::load(&args.config)?;
    args.apply(&mut config);
    config.validate()?;

    let history = if args.no_history {
        HistoryLogger::new_dummy()
    } else {
        HistoryLogger::new_at(&args.log_dir)?
    };

    let mut app = App::new(config, history)?;
    tokio::spawn(app.shutdown.clone().wait_for_ctrl_c());

    let (summary, exit_code) =
        tokio::task::spawn_blocking(move || app.run().map(|s| (s, app.shutdown.exit_code())))
            .await??;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
