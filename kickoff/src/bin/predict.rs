use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use kickoff::config::EngineConfig;
use kickoff::data::Dataset;
use kickoff::domain::Fixture;
use kickoff::file::{write_json, ReadJsonFile};
use kickoff::print;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// dataset file with team statistics, results and model outputs
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// engine configuration file (defaults apply if omitted)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// home team of the fixture to analyse
    #[clap(long)]
    home: Option<String>,

    /// away team of the fixture to analyse
    #[clap(long)]
    away: Option<String>,

    /// fixtures to build a combo over, each as "Home v Away"
    #[clap(long, num_args = 1..)]
    combo: Vec<Fixture>,

    /// write the results as JSON to this file
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.home.is_some() != self.away.is_some() {
            bail!("--home and --away must be specified together");
        }
        if self.home.is_none() && self.combo.is_empty() {
            bail!("either --home/--away or --combo must be specified");
        }
        if self.home.is_some() && !self.combo.is_empty() {
            bail!("--home/--away and --combo are mutually exclusive");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let config = match &args.config {
        None => EngineConfig::default(),
        Some(path) => EngineConfig::read_json_file(path)?,
    };
    let engine = Dataset::read_from_file(&args.file)?.into_engine(config)?;

    let start = Instant::now();
    if let (Some(home), Some(away)) = (&args.home, &args.away) {
        let fixture = Fixture::new(home.as_str(), away.as_str());
        let analysis = engine.analyze_match(&fixture);
        let ensemble = engine.predict_ensemble(&fixture);
        let best_bet = engine.determine_best_bet(&ensemble.probs);
        info!("analysed {fixture} in {:?}", start.elapsed());

        println!("Statistical:\n{}", Console::default().render(&print::tabulate_analysis(&analysis)));
        println!("Form:\n{}", Console::default().render(&print::tabulate_forms(&analysis)));
        println!("Ensemble:\n{}", Console::default().render(&print::tabulate_ensemble(&ensemble)));
        println!("Best bet: {} @ {:.3}", best_bet.bet, best_bet.probability);

        if let Some(path) = &args.output {
            write_json(path, &analysis)?;
        }
    } else {
        let tips = engine.best_predictions(&args.combo);
        let slip = engine.build_best_combo(&args.combo);
        info!("built combo over {} fixtures in {:?}", args.combo.len(), start.elapsed());

        println!("Tips:\n{}", Console::default().render(&print::tabulate_tips(&tips)));
        if slip.is_empty() {
            println!("No fixture qualifies for a combo");
        } else {
            println!("Combo:\n{}", Console::default().render(&print::tabulate_combo(&slip)));
            println!("Expected return: {}%", slip.expected_return);
        }

        if let Some(path) = &args.output {
            write_json(path, &slip)?;
        }
    }
    Ok(())
}
