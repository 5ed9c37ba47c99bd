//! Page templates and marker-based fragment splitting
//!
//! A template is a static HTML document carrying a router slot delimited by
//! the literal `<nattramn-router>` / `</nattramn-router>` tags. The split is
//! computed once at load time; per-request work is limited to choosing which
//! fragment (if any) to emit.

/// Opening marker tag locating the router slot inside a template
pub const ROUTER_TAG_OPEN: &str = "<nattramn-router>";

/// Closing marker tag of the router slot
pub const ROUTER_TAG_CLOSE: &str = "</nattramn-router>";

/// A page template with precomputed pre/post marker fragments
///
/// When a marker is absent from the template the corresponding fragment is
/// the full template, unmodified - assembly treats that as "no router slot
/// present" rather than an error.
#[derive(Debug, Clone)]
pub struct Template {
    raw: String,
    pre: String,
    post: String,
}

impl Template {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let pre = match raw.split_once(ROUTER_TAG_OPEN) {
            Some((before, _)) => before.to_string(),
            None => raw.clone(),
        };
        let post = match raw.split_once(ROUTER_TAG_CLOSE) {
            Some((_, after)) => after.to_string(),
            None => raw.clone(),
        };
        Self { raw, pre, post }
    }

    /// The template source as loaded
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the template carries a router slot at all
    ///
    /// Assembly consults this for the degenerate marker-absent case: a
    /// template without an opening marker has nowhere to put a body.
    pub fn has_router_slot(&self) -> bool {
        self.raw.contains(ROUTER_TAG_OPEN)
    }

    /// Fragment before the opening marker, or `None` in partial mode
    pub fn pre(&self, partial: bool) -> Option<&str> {
        if partial {
            None
        } else {
            Some(self.pre.as_str())
        }
    }

    /// Fragment after the closing marker, or `None` in partial mode
    pub fn post(&self, partial: bool) -> Option<&str> {
        if partial {
            None
        } else {
            Some(self.post.as_str())
        }
    }
}

impl From<&str> for Template {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Template {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
