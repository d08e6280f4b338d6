use colored::*;
use screener::{core::config::ScreenerConfig, Aggregator, HttpFetcher};
use std::path::PathBuf;
use structopt::StructOpt;
use url::Url;

#[derive(StructOpt, Debug)]
#[structopt(name = "screener-cli", about = "Extract a company's financials into <SYMBOL>.json")]
struct Opt {
    /// Stock symbol, e.g. TCS
    symbol: String,

    /// Directory the JSON file is written to
    #[structopt(long, parse(from_os_str))]
    output_dir: Option<PathBuf>,

    /// Site root the company page and peers API are served from
    #[structopt(long)]
    base_url: Option<Url>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let opt = Opt::from_args();

    let mut config = ScreenerConfig::from_env()?;
    if let Some(dir) = opt.output_dir {
        config.output_dir = dir;
    }
    if let Some(base_url) = opt.base_url {
        config.set_base_url(base_url);
    }

    let symbol = screener::aggregate::normalize_symbol(&opt.symbol);
    let output_dir = config.output_dir.clone();
    let aggregator = Aggregator::new(HttpFetcher::new(config)?);

    let path = match aggregator.run_to_file(&symbol, &output_dir).await {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    println!(
        "{} Check '{}' for the output.",
        "Data extraction complete.".green(),
        path.display()
    );

    Ok(())
}
