//! Response assembly: splicing template fragments with page data
//!
//! Full responses are `pre + <nattramn-router>body</nattramn-router> + post`;
//! partial responses carry the body fragment alone and communicate the page
//! title out of band through the `X-Header-Updates` header so the client can
//! update the document title without receiving head markup.

use crate::config::Page;
use crate::http::response::PageResponse;
use crate::pages::PageData;
use crate::template::{ROUTER_TAG_CLOSE, ROUTER_TAG_OPEN};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::StatusCode;

/// Header carrying base64-encoded JSON updates for partial responses
pub const HEADER_UPDATES: &str = "x-header-updates";

/// Assemble the response for a matched page, status always 200
///
/// Failures do not originate here; handler errors are surfaced by the
/// dispatcher before assembly runs.
pub fn assemble(page: &Page, data: &PageData, partial: bool) -> PageResponse {
    let pre = page.template.pre(partial);
    let post = page.template.post(partial);

    let mut headers = data.headers.clone();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));

    // Out-of-band title update: only when head markup is suppressed
    if pre.is_none() {
        if let Some(title) = data.head.as_deref().and_then(extract_title) {
            if let Ok(value) = header_updates_value(title).parse() {
                headers.insert(HEADER_UPDATES, value);
            }
        }
    }

    let mut parts: Vec<String> = Vec::new();

    if let Some(pre) = pre {
        match data.head.as_deref() {
            Some(head) => match pre.split_once("<head>") {
                Some((before, after)) => {
                    parts.push(before.to_string());
                    parts.push(format!("<head>{}", head));
                    parts.push(after.to_string());
                }
                None => {
                    // Pre-fragment without a <head> tag: emit it literally and
                    // skip head injection (see DESIGN.md)
                    log::warn!(
                        "template for {} has no <head> tag, dropping page head",
                        page.route.raw()
                    );
                    parts.push(pre.to_string());
                }
            },
            // Template-only response: no dynamic head means no body or post
            None => {
                let body = minify(pre.to_string());
                return PageResponse::new(StatusCode::OK, headers, body);
            }
        }
    }

    // Degenerate marker-absent case: a full response against a template with
    // no router slot is the template alone (see DESIGN.md)
    if !partial && !page.template.has_router_slot() {
        log::debug!("template for {} has no router slot", page.route.raw());
        let body = minify(parts.join("\n"));
        return PageResponse::new(StatusCode::OK, headers, body);
    }

    if partial {
        parts.push(data.body.clone());
    } else {
        parts.push(format!("{}{}{}", ROUTER_TAG_OPEN, data.body, ROUTER_TAG_CLOSE));
    }

    if let Some(post) = post {
        parts.push(post.to_string());
    }

    let body = minify(parts.join("\n"));
    PageResponse::new(StatusCode::OK, headers, body)
}

/// Extract the text of the first `<title>` element, if any
fn extract_title(head: &str) -> Option<&str> {
    let start = head.find("<title>")? + "<title>".len();
    let end = head[start..].find("</title>")? + start;
    Some(&head[start..end])
}

/// Base64-encoded JSON `{ "title": ... }` payload for [`HEADER_UPDATES`]
fn header_updates_value(title: &str) -> String {
    let json = serde_json::json!({ "title": title }).to_string();
    STANDARD.encode(json.as_bytes())
}

/// HTML minification is intentionally a pass-through
pub fn minify(html: String) -> String {
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouterConfig;
    use crate::pages::{page_fn, PageRequest};

    const TEMPLATE: &str =
        "<html><head></head><body><nattramn-router></nattramn-router></body></html>";

    fn page_with_template(template: &str) -> Page {
        let config = RouterConfig::builder()
            .page("/users/:id", template, page_fn(|_req: PageRequest| async {
                Ok(PageData::new(""))
            }))
            .build()
            .unwrap();
        config.pages.into_iter().next().unwrap()
    }

    #[test]
    fn test_full_assembly_wraps_body_and_injects_head() {
        let page = page_with_template(TEMPLATE);
        let data = PageData::new("<p>123</p>").with_head("<title>U</title>");

        let resp = assemble(&page, &data, false);
        let body = String::from_utf8(resp.body.to_vec()).unwrap();

        assert_eq!(resp.status, StatusCode::OK);
        assert!(body.contains("<nattramn-router><p>123</p></nattramn-router>"));
        assert!(body.contains("<head><title>U</title>"));
        assert!(body.ends_with("</body></html>"));
        assert!(resp.headers.get(HEADER_UPDATES).is_none());
    }

    #[test]
    fn test_partial_emits_body_only_with_title_header() {
        let page = page_with_template(TEMPLATE);
        let data = PageData::new("<p>123</p>").with_head("<title>Home</title>");

        let resp = assemble(&page, &data, true);
        let body = String::from_utf8(resp.body.to_vec()).unwrap();

        assert_eq!(body, "<p>123</p>");

        let value = resp.headers.get(HEADER_UPDATES).unwrap().to_str().unwrap();
        let decoded = STANDARD.decode(value).unwrap();
        assert_eq!(decoded, br#"{"title":"Home"}"#);
    }

    #[test]
    fn test_partial_without_title_has_no_updates_header() {
        let page = page_with_template(TEMPLATE);
        let data = PageData::new("<p>123</p>").with_head("<meta charset=\"utf-8\">");

        let resp = assemble(&page, &data, true);
        assert!(resp.headers.get(HEADER_UPDATES).is_none());
    }

    #[test]
    fn test_missing_head_short_circuits_to_template_pre() {
        let page = page_with_template(TEMPLATE);
        let data = PageData::new("<p>123</p>");

        let resp = assemble(&page, &data, false);
        let body = String::from_utf8(resp.body.to_vec()).unwrap();

        // No dynamic head: the response is the pre-fragment alone
        assert_eq!(body, "<html><head></head><body>");
    }

    #[test]
    fn test_pre_without_head_tag_is_emitted_literally() {
        let page = page_with_template(
            "<html><body><nattramn-router></nattramn-router></body></html>",
        );
        let data = PageData::new("<p>123</p>").with_head("<title>U</title>");

        let resp = assemble(&page, &data, false);
        let body = String::from_utf8(resp.body.to_vec()).unwrap();

        assert!(body.starts_with("<html><body>"));
        assert!(!body.contains("<title>U</title>"));
        assert!(body.contains("<nattramn-router><p>123</p></nattramn-router>"));
    }

    #[test]
    fn test_template_without_slot_is_served_as_is() {
        let page = page_with_template("<html><head></head><body>static</body></html>");
        let data = PageData::new("<p>dropped</p>").with_head("<title>T</title>");

        let resp = assemble(&page, &data, false);
        let body = String::from_utf8(resp.body.to_vec()).unwrap();

        // The dynamic head is still injected, but the body has nowhere to go
        assert!(body.contains("<head><title>T</title>"));
        assert!(!body.contains("<p>dropped</p>"));
        assert!(!body.contains("<nattramn-router>"));
    }

    #[test]
    fn test_content_type_is_forced() {
        let page = page_with_template(TEMPLATE);
        let data =
            PageData::new("<p>x</p>").with_head("<title>T</title>").with_header("content-type", "application/json");

        let resp = assemble(&page, &data, false);
        assert_eq!(resp.headers.get(CONTENT_TYPE).unwrap(), "text/html");
    }

    #[test]
    fn test_extra_headers_pass_through() {
        let page = page_with_template(TEMPLATE);
        let data = PageData::new("<p>x</p>")
            .with_head("<title>T</title>")
            .with_header("cache-control", "no-store");

        let resp = assemble(&page, &data, false);
        assert_eq!(resp.headers.get("cache-control").unwrap(), "no-store");
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("<title>Home</title>"), Some("Home"));
        assert_eq!(extract_title("<meta><title>A</title><link>"), Some("A"));
        assert_eq!(extract_title("<meta charset=\"utf-8\">"), None);
    }
}
