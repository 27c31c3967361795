use anyhow::Context;
use itertools::Itertools;
use log::info;

use crate::{schema::Review, tree::DocNode};

pub fn scrape_review_main_bar<'a, N: DocNode<'a>>(main_bar: N) -> anyhow::Result<Vec<Review>> {
    let review_divs = main_bar
        .descendants()
        .filter(|n| n.is_named("div") && n.has_class("borderDark"))
        .collect_vec();
    info!("Found {} reviews", review_divs.len());
    review_divs
        .into_iter()
        .enumerate()
        .map(|(i, div)| parse_review(div).with_context(|| format!("While parsing review #{i}")))
        .collect()
}

fn parse_review<'a, N: DocNode<'a>>(border_dark: N) -> anyhow::Result<Review> {
    // div.borderDark > div.spaceit > div.mb8 > 3rd div
    let first_div = |node: N| node.find_descendant(|n| n.is_named("div"));
    let rating_div = first_div(border_dark)
        .and_then(first_div)
        .context("Rating container was not found")?
        .children()
        .filter(|n| n.is_named("div"))
        .nth(2)
        .context("Rating div was not found")?;
    let overall = parse_overall_score(
        &rating_div
            .children()
            .nth(2)
            .context("Rating div has too few children")?
            .text_content(),
    )?;

    let review_div = border_dark
        .find_child(|n| n.is_named("div") && n.has_class("textReadability"))
        .context("Review text div was not found")?;

    Ok(Review {
        overall,
        review: reconstruct_review_text(review_div),
    })
}

/// The first whitespace-separated token consisting only of digits.
pub fn parse_overall_score(text: &str) -> anyhow::Result<u32> {
    text.split_whitespace()
        .find(|token| token.bytes().all(|b| b.is_ascii_digit()))
        .with_context(|| format!("No score was found in {text:?}"))?
        .parse()
        .with_context(|| format!("Score out of range in {text:?}"))
}

/// Direct text of the review div first, then the text inside its first span.
///
/// The span holds the collapsed part of a long review.  Its text is appended
/// after all the direct text, even if the span sits between two paragraphs.
pub fn reconstruct_review_text<'a, N: DocNode<'a>>(review_div: N) -> String {
    let direct = review_div.children().filter_map(|n| n.text_node());
    let hidden = review_div
        .find_descendant(|n| n.is_named("span"))
        .into_iter()
        .flat_map(|span| span.descendants().filter_map(|n| n.text_node()));
    direct
        .chain(hidden)
        .filter(|fragment| !matches!(*fragment, "Helpful" | "\n"))
        .map(str::trim)
        .join("\n")
}
