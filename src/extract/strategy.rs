//! Versioned selector-fallback tables
//!
//! The site has shipped several markup generations (the legacy
//! `engineTable` stats layout and the newer `ds-*` utility-class layout),
//! and individual pages still serve either. Every extraction target
//! therefore carries an ordered chain of selector strategies; the first
//! strategy that yields anything wins. Supporting a new markup generation
//! means adding a strategy to a chain, not writing a new extractor.

use crate::extract::clean::clean_text;
use crate::extract::RecordKind;
use scraper::{ElementRef, Html, Selector};

/// An ordered chain of CSS selector strategies for one extraction target
#[derive(Debug, Clone, Copy)]
pub struct SelectorChain {
    /// Target name, used in logs when a fallback kicks in
    pub name: &'static str,
    /// Strategies in preference order
    pub css: &'static [&'static str],
}

/// Rows of the match-results listing table
pub const LISTING_ROWS: SelectorChain = SelectorChain {
    name: "listing rows",
    css: &[
        "table.engineTable tr.data1, table.engineTable tr.data2",
        "table tbody tr",
        "table tr",
    ],
};

/// Per-innings containers on a scorecard page
pub const INNINGS_SECTIONS: SelectorChain = SelectorChain {
    name: "innings sections",
    css: &["div[class*='ds-mb-4']"],
};

/// Team name inside an innings section (or page-wide for bowling)
pub const TEAM_NAME: SelectorChain = SelectorChain {
    name: "team name",
    css: &[
        "span.ds-text-title-xs.ds-font-bold",
        "span.ds-text-title-xs",
    ],
};

/// Batting table inside an innings section
pub const BATTING_TABLE: SelectorChain = SelectorChain {
    name: "batting table",
    css: &["table.ci-scorecard-table", "table.ds-table"],
};

/// All scorecard tables in document order; bowling figures live in the
/// 2nd and 4th ones
pub const SCORECARD_TABLES: SelectorChain = SelectorChain {
    name: "scorecard tables",
    css: &["table.ds-table", "table"],
};

/// Label/value cells of the player-profile header grid
pub const PROFILE_FIELDS: SelectorChain = SelectorChain {
    name: "profile fields",
    css: &["div.ds-grid > div"],
};

/// Player name heading on a profile page
pub const PROFILE_NAME: SelectorChain = SelectorChain {
    name: "profile name",
    css: &["h1.ds-text-title-l", "h1"],
};

/// Biography paragraph on a profile page
pub const PROFILE_BIO: SelectorChain = SelectorChain {
    name: "profile bio",
    css: &["div.ci-player-bio-content > p", "div.ci-player-bio-content"],
};

/// Structurally required column counts; a row below the minimum for its
/// kind is dropped, never emitted with nulls
pub const MATCH_MIN_COLUMNS: usize = 7;
pub const BATTING_MIN_COLUMNS: usize = 8;
pub const BOWLING_MIN_COLUMNS: usize = 11;

/// The "content ready" marker element the fetcher waits for, per kind
pub fn ready_marker(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::MatchSummary => "table tbody tr",
        RecordKind::Batting => "table.ci-scorecard-table",
        RecordKind::Bowling => "table.ds-table",
        RecordKind::Profile => "div.ds-grid",
    }
}

impl SelectorChain {
    /// Walks the chain against a whole document and returns the elements
    /// from the first strategy that matches anything.
    pub fn select_all<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for css in self.css {
            if let Ok(selector) = Selector::parse(css) {
                let matched: Vec<_> = document.select(&selector).collect();
                if !matched.is_empty() {
                    if *css != self.css[0] {
                        tracing::debug!(
                            "{}: primary strategy empty, fell back to '{}'",
                            self.name,
                            css
                        );
                    }
                    return matched;
                }
            }
        }
        Vec::new()
    }

    /// Walks the chain scoped to one element.
    pub fn select_within<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        for css in self.css {
            if let Ok(selector) = Selector::parse(css) {
                let matched: Vec<_> = scope.select(&selector).collect();
                if !matched.is_empty() {
                    return matched;
                }
            }
        }
        Vec::new()
    }

    /// First non-empty cleaned text the chain yields within a scope.
    ///
    /// Unlike `select_within`, a strategy that matches elements but only
    /// produces empty text does not stop the chain; the winner is the
    /// first strategy with actual content.
    pub fn first_text(&self, scope: ElementRef<'_>) -> Option<String> {
        for css in self.css {
            if let Ok(selector) = Selector::parse(css) {
                for element in scope.select(&selector) {
                    let text = clean_text(&element.text().collect::<String>());
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
        }
        None
    }
}

/// Cleaned text content of one element
pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}
