//! Link retrieval backed by DuckDuckGo's plain-HTML endpoint.
//!
//! The endpoint serves server-rendered markup with one `result__a` anchor
//! per organic result, which keeps extraction to plain string scanning. Each
//! anchor's href points at the provider's redirect route with the real
//! destination percent-encoded in the `uddg` parameter.

use std::time::Duration;

use async_trait::async_trait;
use events::LinkEntry;
use log::debug;
use reqwest::Client;

use crate::error::Error;
use crate::SearchProvider;

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; search-notify/0.1)";

const RESULT_ANCHOR_MARKER: &str = "result__a";

pub struct DuckDuckGoProvider {
    client: Client,
}

impl DuckDuckGoProvider {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<LinkEntry>, Error> {
        debug!("Searching for: {query}");

        let body = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let results = extract_results(&body, limit);
        debug!("Search for {query:?} returned {} link(s)", results.len());
        Ok(results)
    }
}

/// Pulls up to `limit` result anchors out of the result-page markup.
/// Anchors that are missing an href or a readable title are skipped.
fn extract_results(html: &str, limit: usize) -> Vec<LinkEntry> {
    let mut results = Vec::new();
    let mut offset = 0;

    while results.len() < limit {
        let Some(found) = html[offset..].find(RESULT_ANCHOR_MARKER) else {
            break;
        };
        let marker = offset + found;
        let Some(close) = html[marker..].find("</a>") else {
            break;
        };
        offset = marker + close + "</a>".len();

        let Some(open) = html[..marker].rfind("<a ") else {
            continue;
        };
        let anchor = &html[open..marker + close];

        let Some(href) = attribute(anchor, "href") else {
            continue;
        };
        let title = unescape(text_content(anchor).trim());
        let url = resolve_redirect(&href);
        if title.is_empty() || url.is_empty() {
            continue;
        }

        results.push(LinkEntry::new(title, url));
    }

    results
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    let needle = format!("{name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let end = tag[start..].find('"')? + start;
    Some(tag[start..end].to_string())
}

/// Everything after the element's opening tag, with nested markup stripped.
fn text_content(element: &str) -> String {
    let Some(start) = element.find('>') else {
        return String::new();
    };

    let mut out = String::new();
    let mut in_tag = false;
    for c in element[start + 1..].chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Unwraps the provider's redirect indirection. Hrefs without a `uddg`
/// parameter are already direct and pass through unchanged.
fn resolve_redirect(href: &str) -> String {
    let Some(start) = href.find("uddg=") else {
        return href.to_string();
    };
    let encoded = &href[start + "uddg=".len()..];
    let encoded = encoded.split('&').next().unwrap_or("");
    percent_decode(encoded)
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    // Malformed escape; keep the literal bytes.
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <div class="result results_links">
          <a rel="nofollow" class="result__a"
             href="//duckduckgo.com/l/?uddg=https%3A%2F%2Frust%2Dlang.org%2F&amp;rut=abc">
            Rust Programming Language
          </a>
        </div>
        <div class="result results_links">
          <a rel="nofollow" class="result__a" href="https://docs.rs/axum">
            axum <b>web</b> framework &amp; router
          </a>
        </div>
        <div class="result results_links">
          <a rel="nofollow" class="result__a" href="https://example.com/third">Third</a>
        </div>
    "#;

    #[test]
    fn extracts_anchors_with_titles_and_resolved_urls() {
        let results = extract_results(FIXTURE, 10);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].url, "https://rust-lang.org/");
        assert_eq!(results[1].title, "axum web framework & router");
        assert_eq!(results[1].url, "https://docs.rs/axum");
    }

    #[test]
    fn limit_caps_the_result_count() {
        let results = extract_results(FIXTURE, 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn markup_without_results_yields_nothing() {
        assert!(extract_results("<html><body>no results</body></html>", 5).is_empty());
    }

    #[test]
    fn redirect_hrefs_are_unwrapped_and_direct_ones_kept() {
        assert_eq!(
            resolve_redirect("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa%20b&rut=x"),
            "https://example.com/a b"
        );
        assert_eq!(
            resolve_redirect("https://example.com/direct"),
            "https://example.com/direct"
        );
    }

    #[test]
    fn percent_decoding_handles_plus_and_malformed_escapes() {
        assert_eq!(percent_decode("a+b%2Fc"), "a b/c");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }
}
