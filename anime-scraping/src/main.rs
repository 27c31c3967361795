use std::path::PathBuf;

use anime_scraping::api::AnimeClient;
use anime_scraping::batch::read_anime_ids;
use anime_scraping::batch::run_batch;
use anime_scraping::batch::BatchOutput;
use anime_scraping::config::ScraperConfig;
use anime_scraping::schema::AnimeId;
use clap::Parser;
use log::info;

#[derive(Parser)]
struct Opts {
    /// Anime ids to fetch reviews for.
    #[arg(long, num_args = 1..)]
    anime_ids: Vec<AnimeId>,
    /// File with one anime id per line.
    #[arg(long)]
    id_file: Option<PathBuf>,
    /// Directory for the per-anime review csv files.
    #[arg(long, default_value = "reviews")]
    review_dir: PathBuf,
    /// Output csv with one metadata row per fetched id.
    #[arg(long, default_value = "metadata.csv")]
    metadata_path: PathBuf,
    /// TOML file overriding the site url, review slug or user agent.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let config = match &opts.config {
        Some(path) => ScraperConfig::load(path)?,
        None => ScraperConfig::default(),
    };
    let ids_from_file = match &opts.id_file {
        Some(path) => read_anime_ids(path)?,
        None => vec![],
    };

    let summary = run_batch(
        &[opts.anime_ids, ids_from_file],
        || AnimeClient::new(config.clone()),
        BatchOutput {
            metadata_path: &opts.metadata_path,
            review_dir: &opts.review_dir,
        },
    )
    .await?;
    info!(
        "Done: {} metadata rows, {} review files.",
        summary.metadata_rows(),
        summary.review_files().len()
    );
    Ok(())
}
