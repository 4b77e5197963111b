//! Player biography extraction from profile pages
//!
//! The profile header is a grid of label/value cells ("Batting Style",
//! "Playing Role", ...); the biography is free text below it. A profile
//! page yields at most one record, and only when the player name is
//! present after normalization.

use crate::extract::records::{PlayerProfile, Record};
use crate::extract::strategy::{element_text, PROFILE_BIO, PROFILE_FIELDS, PROFILE_NAME};
use crate::fetch::RawPage;
use crate::ScrapeError;
use scraper::{Html, Selector};

/// Extracts the `PlayerProfile` from a player page
pub fn extract_profile(page: &RawPage) -> Result<Vec<Record>, ScrapeError> {
    let document = Html::parse_document(&page.html);

    let fields = PROFILE_FIELDS.select_all(&document);
    if fields.is_empty() {
        return Err(ScrapeError::Parse {
            url: page.url.to_string(),
        });
    }

    let root = document.root_element();
    let Some(name) = PROFILE_NAME.first_text(root) else {
        // Name is the mandatory field; a grid without it is a corrupt page
        // variant, treated as a dropped row rather than an error.
        tracing::debug!(url = %page.url, "profile page has no player name, dropping");
        return Ok(Vec::new());
    };

    let profile = PlayerProfile {
        name,
        team: grid_value(&document, "Teams").or_else(|| grid_value(&document, "National Side")),
        batting_style: grid_value(&document, "Batting Style"),
        bowling_style: grid_value(&document, "Bowling Style"),
        playing_role: grid_value(&document, "Playing Role"),
        bio_text: PROFILE_BIO.first_text(root),
        canonical_url: page.url.to_string(),
    };

    Ok(vec![Record::Profile(profile)])
}

/// Looks up a grid cell by its label paragraph and returns the value span
fn grid_value(document: &Html, label: &str) -> Option<String> {
    let label_selector = Selector::parse("p").ok()?;
    let value_selector = Selector::parse("span, h5").ok()?;

    for cell in PROFILE_FIELDS.select_all(document) {
        let matches_label = cell
            .select(&label_selector)
            .next()
            .map(|p| element_text(p) == label)
            .unwrap_or(false);
        if !matches_label {
            continue;
        }

        return cell
            .select(&value_selector)
            .map(element_text)
            .find(|text| !text.is_empty());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use url::Url;

    fn page(html: &str) -> RawPage {
        RawPage {
            url: Url::parse("https://www.espncricinfo.com/cricketers/virat-kohli-253802").unwrap(),
            html: html.to_string(),
            fetched_at: Utc::now(),
        }
    }

    fn profile_html(name: &str) -> String {
        format!(
            r#"<html><body>
            <h1 class="ds-text-title-l">{name}</h1>
            <div class="ds-grid">
                <div><p>Batting Style</p><span>Right hand Bat</span></div>
                <div><p>Bowling Style</p><span>Right arm Medium</span></div>
                <div><p>Playing Role</p><span>Top order Batter</span></div>
                <div><p>Teams</p><span>India</span></div>
            </div>
            <div class="ci-player-bio-content"><p>One of the finest chasers in the format.</p></div>
            </body></html>"#
        )
    }

    #[test]
    fn test_extract_full_profile() {
        let records = extract_profile(&page(&profile_html("Virat Kohli"))).unwrap();
        assert_eq!(records.len(), 1);

        let Record::Profile(profile) = &records[0] else {
            panic!("expected profile record");
        };
        assert_eq!(profile.name, "Virat Kohli");
        assert_eq!(profile.team.as_deref(), Some("India"));
        assert_eq!(profile.batting_style.as_deref(), Some("Right hand Bat"));
        assert_eq!(profile.playing_role.as_deref(), Some("Top order Batter"));
        assert_eq!(
            profile.bio_text.as_deref(),
            Some("One of the finest chasers in the format.")
        );
    }

    #[test]
    fn test_missing_optional_fields_become_null() {
        let html = r#"<html><body>
            <h1>Mystery Player</h1>
            <div class="ds-grid">
                <div><p>Batting Style</p><span>Left hand Bat</span></div>
            </div>
        </body></html>"#;

        let records = extract_profile(&page(html)).unwrap();
        let Record::Profile(profile) = &records[0] else {
            panic!("expected profile record");
        };
        assert_eq!(profile.name, "Mystery Player");
        assert!(profile.bowling_style.is_none());
        assert!(profile.playing_role.is_none());
        assert!(profile.bio_text.is_none());
    }

    #[test]
    fn test_profile_without_name_is_dropped() {
        let html = r#"<html><body>
            <div class="ds-grid">
                <div><p>Batting Style</p><span>Right hand Bat</span></div>
            </div>
        </body></html>"#;

        let records = extract_profile(&page(html)).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_error_without_profile_grid() {
        let html = "<html><body><h1>Checking your browser</h1></body></html>";
        let result = extract_profile(&page(html));
        assert!(matches!(result, Err(ScrapeError::Parse { .. })));
    }
}
