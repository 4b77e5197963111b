//! Discovery stage: listing URLs in, deduplicated content references out
//!
//! A listing page is walked with an ordered chain of selector strategies
//! (stats-layout rows, any table rows, then a structural anchor scan)
//! until one yields scorecard links. References are keyed by canonical
//! URL: repeated rows and overlapping listing pages merge silently.

use crate::extract::strategy::{ready_marker, LISTING_ROWS, MATCH_MIN_COLUMNS};
use crate::extract::{scorecard, RecordKind};
use crate::fetch::{PageFetcher, RawPage, ReadyCondition};
use crate::{Result, ScrapeError};
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use url::Url;

/// What kind of page a reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Listing,
    Detail,
    Profile,
}

/// A deduplicated pointer to one crawlable page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentReference {
    #[serde(rename = "canonicalURL")]
    pub canonical_url: Url,
    pub kind: ReferenceKind,
    #[serde(rename = "discoveredAt")]
    pub discovered_at: DateTime<Utc>,
}

impl ContentReference {
    pub fn new(canonical_url: Url, kind: ReferenceKind) -> Self {
        Self {
            canonical_url,
            kind,
            discovered_at: Utc::now(),
        }
    }
}

// The canonical URL is the only identity; label text and discovery time
// never distinguish two references.
impl PartialEq for ContentReference {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_url == other.canonical_url
    }
}

impl Eq for ContentReference {}

impl Hash for ContentReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_url.as_str().hash(state);
    }
}

/// Number of strategies in the listing chain, reported in discovery errors
const LISTING_STRATEGIES: usize = LISTING_ROWS.css.len() + 1;

/// Discovers scorecard references from one or more listing pages.
///
/// Duplicates across repeated rows and overlapping listings are merged;
/// the output preserves first-seen order. A listing page yielding zero
/// links after every strategy is a fatal discovery failure.
pub async fn discover_matches<F: PageFetcher>(
    fetcher: &mut F,
    listing_urls: &[Url],
) -> Result<Vec<ContentReference>> {
    let ready = ReadyCondition::css(ready_marker(RecordKind::MatchSummary));
    let mut seen: HashSet<String> = HashSet::new();
    let mut references = Vec::new();

    for listing in listing_urls {
        tracing::info!(url = %listing, "discovering scorecard links");
        let page = fetcher.fetch(listing, &ready).await?;

        let links = listing_scorecard_links(&page);
        if links.is_empty() {
            return Err(ScrapeError::Discovery {
                listing_url: listing.to_string(),
                strategies: LISTING_STRATEGIES,
            });
        }

        let mut added = 0usize;
        for link in links {
            if seen.insert(link.as_str().to_string()) {
                references.push(ContentReference::new(link, ReferenceKind::Detail));
                added += 1;
            }
        }
        tracing::info!(url = %listing, added, total = references.len(), "listing processed");
    }

    Ok(references)
}

/// Discovers player-profile references: listing pages to scorecards, then
/// player anchors on each scorecard.
///
/// The second hop is best-effort: an unreachable scorecard is skipped with
/// a warning. Only an overall-empty result is fatal.
pub async fn discover_profiles<F: PageFetcher>(
    fetcher: &mut F,
    listing_urls: &[Url],
) -> Result<Vec<ContentReference>> {
    let matches = discover_matches(fetcher, listing_urls).await?;
    let ready = ReadyCondition::css(ready_marker(RecordKind::Batting));

    let mut seen: HashSet<String> = HashSet::new();
    let mut references = Vec::new();

    for reference in &matches {
        let page = match fetcher.fetch(&reference.canonical_url, &ready).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    url = %reference.canonical_url,
                    error = %e,
                    "skipping scorecard during profile discovery"
                );
                continue;
            }
        };

        for link in scorecard::player_profile_links(&page) {
            if seen.insert(link.as_str().to_string()) {
                references.push(ContentReference::new(link, ReferenceKind::Profile));
            }
        }
    }

    if references.is_empty() {
        return Err(ScrapeError::Discovery {
            listing_url: listing_urls
                .first()
                .map(|u| u.to_string())
                .unwrap_or_default(),
            strategies: LISTING_STRATEGIES,
        });
    }

    Ok(references)
}

/// Walks the listing strategies and returns scorecard URLs in row order
fn listing_scorecard_links(page: &RawPage) -> Vec<Url> {
    let document = Html::parse_document(&page.html);
    let mut links = Vec::new();

    // Table strategies: the scorecard anchor lives in the 7th cell
    for row in LISTING_ROWS.select_all(&document) {
        if let Some(url) = row_scorecard_link(row, page) {
            links.push(url);
        }
    }
    if !links.is_empty() {
        return links;
    }

    // Structural fallback: any full-scorecard anchor, wherever it sits
    if let Ok(selector) = Selector::parse("a[href*='full-scorecard']") {
        for anchor in document.select(&selector) {
            if let Some(href) = anchor.value().attr("href") {
                if let Some(url) = resolve_link(href, &page.url) {
                    links.push(url);
                }
            }
        }
        if !links.is_empty() {
            tracing::debug!(url = %page.url, "listing rows empty, structural anchor scan used");
        }
    }

    links
}

/// Scorecard link from one listing row, if the row is well-formed
fn row_scorecard_link(row: ElementRef<'_>, page: &RawPage) -> Option<Url> {
    let cell_selector = Selector::parse("td").ok()?;
    let anchor_selector = Selector::parse("a[href]").ok()?;

    let cells: Vec<_> = row.select(&cell_selector).collect();
    if cells.len() < MATCH_MIN_COLUMNS {
        return None;
    }

    let anchor = cells[6].select(&anchor_selector).next()?;
    let href = anchor.value().attr("href")?;
    if !href.contains("scorecard") {
        return None;
    }

    resolve_link(href, &page.url)
}

/// Resolves an href to an absolute HTTP(S) URL, the canonical dedup form
fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
