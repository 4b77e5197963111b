//! Match summary extraction from the tournament results listing
//!
//! Each listing row is team1 / team2 / winner / margin / ground / date /
//! scorecard link. The scorecard link doubles as the record's canonical
//! URL, so a row without one is corrupt and dropped.

use crate::extract::records::{MatchSummary, Record};
use crate::extract::strategy::{element_text, LISTING_ROWS, MATCH_MIN_COLUMNS};
use crate::fetch::RawPage;
use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// Extracts one `MatchSummary` per well-formed listing row
pub fn extract_match_summaries(page: &RawPage) -> Result<Vec<Record>, ScrapeError> {
    let document = Html::parse_document(&page.html);

    let rows = LISTING_ROWS.select_all(&document);
    if rows.is_empty() {
        return Err(ScrapeError::Parse {
            url: page.url.to_string(),
        });
    }

    let mut records = Vec::new();

    for row in rows {
        let cells = row_cells(row);
        if cells.len() < MATCH_MIN_COLUMNS {
            // Header and spacer rows land here
            continue;
        }

        let team1 = element_text(cells[0]);
        let team2 = element_text(cells[1]);
        if team1.is_empty() || team2.is_empty() {
            tracing::trace!(url = %page.url, "dropping listing row with empty team name");
            continue;
        }

        let Some(canonical_url) = scorecard_href(cells[6], page) else {
            tracing::trace!(url = %page.url, team1, team2, "dropping listing row without scorecard link");
            continue;
        };

        records.push(Record::MatchSummary(MatchSummary {
            team1,
            team2,
            winner: element_text(cells[2]),
            margin: element_text(cells[3]),
            ground: element_text(cells[4]),
            match_date: element_text(cells[5]),
            canonical_url,
        }));
    }

    Ok(records)
}

/// Absolute scorecard URL from the link cell, if present
fn scorecard_href(cell: ElementRef<'_>, page: &RawPage) -> Option<String> {
    let selector = Selector::parse("a[href]").ok()?;
    let anchor = cell.select(&selector).next()?;
    let href = anchor.value().attr("href")?;
    page.url.join(href).ok().map(|u| u.to_string())
}

fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    match Selector::parse("td") {
        Ok(selector) => row.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}
