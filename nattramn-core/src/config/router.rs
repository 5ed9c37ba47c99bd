//! Router configuration: registered pages
//!
//! Pages are registered in code through [`RouterBuilder`]; patterns are
//! parsed and validated once at build time, never per request. Registration
//! order is match order.

use crate::pages::PageHandler;
use crate::router::RoutePattern;
use crate::template::Template;
use anyhow::{Context, Result};
use std::fmt;
use std::sync::Arc;

/// A registered page: route pattern, template and handler
#[derive(Clone)]
pub struct Page {
    pub route: RoutePattern,
    pub template: Template,
    pub handler: Arc<dyn PageHandler>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page").field("route", &self.route.raw()).finish_non_exhaustive()
    }
}

/// Router configuration, immutable once built
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    pub pages: Vec<Page>,
}

impl RouterConfig {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }
}

/// Builder collecting page registrations; `build` validates every pattern
#[derive(Default)]
pub struct RouterBuilder {
    entries: Vec<(String, Template, Arc<dyn PageHandler>)>,
}

impl RouterBuilder {
    /// Register a page; first matching registration wins at dispatch time
    pub fn page(
        mut self,
        route: impl Into<String>,
        template: impl Into<Template>,
        handler: impl PageHandler + 'static,
    ) -> Self {
        self.entries.push((route.into(), template.into(), Arc::new(handler)));
        self
    }

    pub fn build(self) -> Result<RouterConfig> {
        let mut pages = Vec::with_capacity(self.entries.len());
        for (route, template, handler) in self.entries {
            let route = RoutePattern::parse(&route)
                .with_context(|| format!("Failed to register page {:?}", route))?;
            pages.push(Page { route, template, handler });
        }
        Ok(RouterConfig { pages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{page_fn, PageData, PageRequest};

    #[test]
    fn test_builder_validates_patterns() {
        let result = RouterConfig::builder()
            .page("/users/:", "<html></html>", page_fn(|_req: PageRequest| async {
                Ok(PageData::new(""))
            }))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_keeps_registration_order() {
        let config = RouterConfig::builder()
            .page("/", "<html></html>", page_fn(|_req: PageRequest| async {
                Ok(PageData::new("home"))
            }))
            .page("/users/:id", "<html></html>", page_fn(|_req: PageRequest| async {
                Ok(PageData::new("user"))
            }))
            .build()
            .unwrap();

        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[0].route.raw(), "/");
        assert_eq!(config.pages[1].route.raw(), "/users/:id");
    }
}
