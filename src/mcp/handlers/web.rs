//! Mock web tools: search_web, fetch_url.
//!
//! Nothing here touches the network. Results are synthesized from the input so
//! the same query or URL always produces the same response shape.

use serde_json::Value;
use tracing::info;
use url::Url;

use super::{required_str, McpToolResult};

/// Domains used for the first search results, in order.
pub const SEARCH_DOMAINS: [&str; 5] = [
    "example.com",
    "wikipedia.org",
    "stackoverflow.com",
    "github.com",
    "docs.python.org",
];

const DEFAULT_SEARCH_LIMIT: usize = 5;
/// Largest `limit` accepted by `search_web`; larger values are a soft error.
pub const MAX_SEARCH_LIMIT: usize = 10_000;

/// A single synthesized search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Synthesized page content for `fetch_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub title: String,
    pub content: String,
    pub metadata: String,
}

// ---------------------------------------------------------------------------
// search_web
// ---------------------------------------------------------------------------

/// `search_web` -- return `limit` canned results for `query`.
pub async fn handle_search_web(args: &Value) -> McpToolResult {
    match search_web(args) {
        Ok(text) => McpToolResult::text(text),
        Err(e) => McpToolResult::text(format!("Error performing web search: {}", e)),
    }
}

fn search_web(args: &Value) -> Result<String, String> {
    let query = required_str(args, "query")?;
    let limit = parse_limit(args.get("limit"))?;

    info!("[websearch] Searching for: {} (limit {})", query, limit);

    let mut text = format!("Web Search Results for '{}':\n\n", query);
    for (i, result) in mock_search_results(query, limit)?.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, result.title));
        text.push_str(&format!("   URL: {}\n", result.url));
        text.push_str(&format!("   {}\n\n", result.snippet));
    }
    Ok(text)
}

/// Missing or null means the default; any JSON number is truncated toward
/// zero and clamped at zero. Values above [`MAX_SEARCH_LIMIT`] are rejected.
fn parse_limit(value: Option<&Value>) -> Result<usize, String> {
    let limit = match value {
        None | Some(Value::Null) => return Ok(DEFAULT_SEARCH_LIMIT),
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                u as f64
            } else {
                n.as_f64().map(f64::trunc).unwrap_or(0.0).max(0.0)
            }
        }
        Some(other) => return Err(format!("argument 'limit' must be a number, got {}", other)),
    };
    if limit > MAX_SEARCH_LIMIT as f64 {
        return Err(format!(
            "argument 'limit' must be at most {}, got {}",
            MAX_SEARCH_LIMIT, limit
        ));
    }
    Ok(limit as usize)
}

/// Build `limit` results: the fixed domains first, then numbered generic sites.
pub fn mock_search_results(query: &str, limit: usize) -> Result<Vec<SearchResult>, String> {
    let encoded = quote(query);
    let mut results = Vec::new();
    results.try_reserve(limit).map_err(|e| e.to_string())?;

    for (i, domain) in SEARCH_DOMAINS.iter().take(limit).enumerate() {
        let n = i + 1;
        results.push(SearchResult {
            title: format!("Search Result {} for '{}' - {}", n, query, title_case(domain)),
            url: format!("https://{}/search?q={}&result={}", domain, encoded, n),
            snippet: format!(
                "This is a mock search result for the query '{}' from {}. In a real \
                 implementation, this would contain actual search results from a search \
                 engine API.",
                query, domain
            ),
        });
    }

    for n in (SEARCH_DOMAINS.len() + 1)..=limit {
        results.push(SearchResult {
            title: format!("Additional Result for '{}' - Generic Site {}", query, n),
            url: format!("https://generic-site{}.com/search?q={}", n, encoded),
            snippet: format!(
                "Generic search result {} for '{}'. This demonstrates how the search tool \
                 would return multiple relevant results.",
                n, query
            ),
        });
    }

    Ok(results)
}

/// Percent-encode everything except unreserved characters and `/`.
fn quote(s: &str) -> String {
    s.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Upper-case the first letter of every alphabetic run: `docs.python.org` -> `Docs.Python.Org`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// fetch_url
// ---------------------------------------------------------------------------

/// `fetch_url` -- return canned page content chosen by the URL's host.
pub async fn handle_fetch_url(args: &Value) -> McpToolResult {
    match fetch_url(args) {
        Ok(text) => McpToolResult::text(text),
        Err(e) => McpToolResult::text(format!("Error fetching URL: {}", e)),
    }
}

fn fetch_url(args: &Value) -> Result<String, String> {
    let url = required_str(args, "url")?;
    info!("[websearch] Fetching: {}", url);

    let page = mock_page_content(url);
    Ok(format!(
        "Content fetched from {}:\n\nTitle: {}\nContent: {}\n\nMetadata: {}\n",
        url, page.title, page.content, page.metadata
    ))
}

/// Host (with port, if any) of `url`, or `"unknown"` when it has none.
pub fn url_host(url: &str) -> String {
    // Scheme-relative (`//host/path`) still names a host.
    let parsed = match url.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("http://{}", rest)),
        None => Url::parse(url),
    };
    parsed
        .ok()
        .and_then(|parsed| {
            let host = parsed.host_str().filter(|h| !h.is_empty())?.to_string();
            Some(match parsed.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host,
            })
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn mock_page_content(url: &str) -> PageContent {
    let host = url_host(url);

    let (title, body, metadata) = if host.contains("wikipedia") {
        (
            "Wikipedia Article",
            format!(
                "This is a mock Wikipedia article fetched from {}. In a real implementation, \
                 this would contain the actual article content, summary, and structured \
                 information from the Wikipedia page.",
                url
            ),
            "Source: Wikipedia, Type: Encyclopedia Article",
        )
    } else if host.contains("github") {
        (
            "GitHub Repository",
            format!(
                "This is a mock GitHub repository page from {}. In a real implementation, \
                 this would contain the repository description, README content, code files, \
                 and project information.",
                url
            ),
            "Source: GitHub, Type: Code Repository",
        )
    } else if host.contains("stackoverflow") {
        (
            "Stack Overflow Question",
            format!(
                "This is a mock Stack Overflow question from {}. In a real implementation, \
                 this would contain the question, answers, code examples, and community \
                 discussion.",
                url
            ),
            "Source: Stack Overflow, Type: Q&A Forum",
        )
    } else if host.contains("docs.python") {
        (
            "Python Documentation",
            format!(
                "This is mock Python documentation from {}. In a real implementation, this \
                 would contain the official Python documentation, code examples, API \
                 references, and tutorials.",
                url
            ),
            "Source: Python.org, Type: Official Documentation",
        )
    } else {
        (
            "Web Page",
            format!(
                "This is mock content from {}. In a real implementation, this would contain \
                 the actual webpage content, text, images metadata, and structured \
                 information from the URL.",
                url
            ),
            "Source: Generic Web Page, Type: HTML Content",
        )
    };

    PageContent {
        title: format!("{} - {}", title, url),
        content: body,
        metadata: metadata.to_string(),
    }
}
