//! Batting and bowling line extraction from full-scorecard pages
//!
//! A scorecard carries one section per innings. Batting figures live in a
//! `ci-scorecard-table` inside each section; bowling figures live in the
//! 2nd and 4th `ds-table` of the page, bowled by the team that was not
//! batting. Malformed rows are dropped silently; only a page with no
//! recognizable innings structure at all raises a parse error.

use crate::extract::clean::{clean_text, parse_f64, parse_u32};
use crate::extract::records::{BattingLine, BowlingLine, Record};
use crate::extract::strategy::{
    element_text, BATTING_MIN_COLUMNS, BATTING_TABLE, BOWLING_MIN_COLUMNS, INNINGS_SECTIONS,
    SCORECARD_TABLES, TEAM_NAME,
};
use crate::fetch::RawPage;
use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts one `BattingLine` per batsman across all innings of a scorecard
pub fn extract_batting(page: &RawPage) -> Result<Vec<Record>, ScrapeError> {
    let document = Html::parse_document(&page.html);

    let sections = INNINGS_SECTIONS.select_all(&document);
    if sections.is_empty() {
        return Err(ScrapeError::Parse {
            url: page.url.to_string(),
        });
    }

    let mut records = Vec::new();

    for section in sections {
        let team = match TEAM_NAME.first_text(section) {
            Some(name) => strip_innings_suffix(&name),
            // Team name is mandatory; without it every row in this
            // section would be corrupt, so the section is skipped whole.
            None => continue,
        };

        let Some(table) = BATTING_TABLE.select_within(section).into_iter().next() else {
            continue;
        };

        let mut position = 0u32;
        for row in table_rows(table) {
            let cells = row_cells(row);
            if cells.len() < BATTING_MIN_COLUMNS {
                tracing::trace!(
                    url = %page.url,
                    columns = cells.len(),
                    "dropping batting row below column minimum"
                );
                continue;
            }

            let player_name = element_text(cells[0]);
            if player_name.is_empty()
                || player_name.contains("Extras")
                || player_name.contains("TOTAL")
            {
                continue;
            }

            position += 1;
            records.push(Record::Batting(BattingLine {
                match_ref: page.url.to_string(),
                team_innings: team.clone(),
                batting_position: position,
                player_name,
                dismissal_text: non_empty(element_text(cells[1])),
                runs: parse_u32(&element_text(cells[2])),
                balls: parse_u32(&element_text(cells[3])),
                fours: parse_u32(&element_text(cells[5])),
                sixes: parse_u32(&element_text(cells[6])),
                strike_rate: parse_f64(&element_text(cells[7])),
            }));
        }
    }

    Ok(records)
}

/// Extracts one `BowlingLine` per bowler from the 2nd and 4th scorecard tables
pub fn extract_bowling(page: &RawPage) -> Result<Vec<Record>, ScrapeError> {
    let document = Html::parse_document(&page.html);

    let tables = SCORECARD_TABLES.select_all(&document);
    if tables.is_empty() {
        return Err(ScrapeError::Parse {
            url: page.url.to_string(),
        });
    }

    let teams = innings_teams(&document);
    if teams.len() < 2 {
        // Without both team names the mandatory bowlingTeam field cannot
        // be filled, so every row would be dropped anyway.
        tracing::warn!(url = %page.url, "could not identify both teams, no bowling rows emitted");
        return Ok(Vec::new());
    }

    let mut records = Vec::new();

    // The batting side's table is followed by the opposition's bowling
    // figures, so tables 1 and 3 are bowled by teams[1] and teams[0].
    for (innings, table_index) in [1usize, 3usize].into_iter().enumerate() {
        let Some(table) = tables.get(table_index) else {
            continue;
        };
        let bowling_team = teams[1 - innings].clone();

        for row in table_rows(*table) {
            let cells = row_cells(row);
            if cells.len() < BOWLING_MIN_COLUMNS {
                tracing::trace!(
                    url = %page.url,
                    columns = cells.len(),
                    "dropping bowling row below column minimum"
                );
                continue;
            }

            let player_name = element_text(cells[0]);
            if player_name.is_empty() {
                continue;
            }

            records.push(Record::Bowling(BowlingLine {
                match_ref: page.url.to_string(),
                bowling_team: bowling_team.clone(),
                player_name,
                overs: parse_f64(&element_text(cells[1])),
                maidens: parse_u32(&element_text(cells[2])),
                runs: parse_u32(&element_text(cells[3])),
                wickets: parse_u32(&element_text(cells[4])),
                economy: parse_f64(&element_text(cells[5])),
                dots: parse_u32(&element_text(cells[6])),
                fours: parse_u32(&element_text(cells[7])),
                sixes: parse_u32(&element_text(cells[8])),
                wides: parse_u32(&element_text(cells[9])),
                no_balls: parse_u32(&element_text(cells[10])),
            }));
        }
    }

    Ok(records)
}

/// Harvests player-profile URLs from the batting and bowling tables of a
/// scorecard; used by the profile pipeline's second discovery hop.
pub fn player_profile_links(page: &RawPage) -> Vec<Url> {
    let document = Html::parse_document(&page.html);
    let mut links = Vec::new();

    let Ok(anchor_selector) = Selector::parse("td:first-child a[href]") else {
        return links;
    };

    for table in SCORECARD_TABLES.select_all(&document) {
        for anchor in table.select(&anchor_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !href.contains("/cricketers/") {
                continue;
            }
            if let Ok(absolute) = page.url.join(href) {
                links.push(absolute);
            }
        }
    }

    links
}

/// Both team names in batting order, from the innings section headers
fn innings_teams(document: &Html) -> Vec<String> {
    let mut teams = Vec::new();
    for section in INNINGS_SECTIONS.select_all(document) {
        if let Some(name) = TEAM_NAME.first_text(section) {
            let team = strip_innings_suffix(&name);
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
    }
    teams
}

fn strip_innings_suffix(team: &str) -> String {
    clean_text(team.trim_end_matches(" Innings"))
}

fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    match Selector::parse("tbody tr") {
        Ok(selector) => table.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    match Selector::parse("td") {
        Ok(selector) => row.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
