//! Shared fixtures: canned site markup and a fast-polling session config

use scorecrawl::config::SessionConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session config with short ready-wait bounds so tests stay fast
pub fn session_config() -> SessionConfig {
    SessionConfig {
        ready_timeout_ms: 3_000,
        poll_interval_ms: 100,
        ..SessionConfig::default()
    }
}

/// One result-listing row; rows without an href carry no scorecard link
pub fn listing_row(team1: &str, team2: &str, href: Option<&str>) -> String {
    let link_cell = match href {
        Some(h) => format!("<td><a href=\"{}\">T20I # 1</a></td>", h),
        None => "<td></td>".to_string(),
    };
    format!(
        "<tr class=\"data1\"><td>{}</td><td>{}</td><td>{}</td><td>5 runs</td>\
         <td>Melbourne</td><td>Oct 23, 2022</td>{}</tr>",
        team1, team2, team1, link_cell
    )
}

/// A result-listing page built from the given scorecard hrefs
pub fn listing_html(hrefs: &[&str]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|href| listing_row("India", "Pakistan", Some(href)))
        .collect();
    format!(r#"<html><body><table class="engineTable">{}</table></body></html>"#, rows)
}

/// A two-innings full-scorecard page with batting tables, bowling tables,
/// and player-profile anchors
pub fn scorecard_html() -> String {
    r#"<html><body>
    <div class="ds-mb-4">
        <span class="ds-text-title-xs ds-font-bold">India Innings</span>
        <table class="ds-table ci-scorecard-table"><tbody>
            <tr><td><a href="/cricketers/kl-rahul-1125976">KL Rahul</a></td><td>b Shaheen</td><td>4</td><td>8</td><td>11</td><td>1</td><td>0</td><td>50.00</td></tr>
            <tr><td><a href="/cricketers/rohit-sharma-34102">R Sharma</a></td><td>c Wade b Starc</td><td>53</td><td>41</td><td>62</td><td>4</td><td>2</td><td>129.26</td></tr>
        </tbody></table>
        <table class="ds-table"><tbody>
            <tr><td><a href="/cricketers/shaheen-afridi-1072470">Shaheen Afridi</a></td><td>4</td><td>0</td><td>32</td><td>1</td><td>8.00</td><td>10</td><td>3</td><td>1</td><td>2</td><td>0</td></tr>
        </tbody></table>
    </div>
    <div class="ds-mb-4">
        <span class="ds-text-title-xs ds-font-bold">Pakistan Innings</span>
        <table class="ds-table ci-scorecard-table"><tbody>
            <tr><td><a href="/cricketers/babar-azam-348144">Babar Azam</a></td><td>lbw b Arshdeep</td><td>0</td><td>1</td><td>2</td><td>0</td><td>0</td><td>0.00</td></tr>
        </tbody></table>
        <table class="ds-table"><tbody>
            <tr><td><a href="/cricketers/arshdeep-singh-1125971">Arshdeep Singh</a></td><td>4</td><td>1</td><td>24</td><td>2</td><td>6.00</td><td>12</td><td>2</td><td>0</td><td>1</td><td>1</td></tr>
        </tbody></table>
    </div>
    </body></html>"#
        .to_string()
}

/// Mounts a 200 HTML response at the given route
pub async fn mount_html(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}
