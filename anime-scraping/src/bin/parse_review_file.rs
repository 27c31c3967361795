use std::path::PathBuf;

use anime_scraping::parser::page::parse_review_html;
use clap::Parser;
use scraper::Html;

#[derive(Parser)]
struct Opts {
    input_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();
    let html = Html::parse_document(&fs_err::read_to_string(opts.input_file)?);
    let listing = parse_review_html(&html)?;
    println!("{:?}", listing.metadata);
    println!("Parsed {} reviews.", listing.reviews.len());
    for review in &listing.reviews {
        println!();
        println!("Overall score: {}", review.overall);
        println!("Review:");
        println!("{}", review.review);
    }
    Ok(())
}
