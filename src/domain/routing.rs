use crate::domain::value_objects::{CacheRole, PageRequest, ResourceDestination};

/// Where the router sends a request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Disposition {
    NetworkFirst,
    CacheFirst(CacheRole),
}

/// One predicate the router can test a request against. Rules are plain
/// data so the classification order is enumerable and testable on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMatcher {
    PathPrefix(String),
    PathContains(String),
    Destination(ResourceDestination),
    Navigation,
    Any,
}

impl RequestMatcher {
    fn matches(&self, request: &PageRequest) -> bool {
        match self {
            RequestMatcher::PathPrefix(prefix) => request.url.path().starts_with(prefix.as_str()),
            RequestMatcher::PathContains(marker) => request.url.path().contains(marker.as_str()),
            RequestMatcher::Destination(destination) => request.destination == *destination,
            RequestMatcher::Navigation => request.is_navigation,
            RequestMatcher::Any => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub matcher: RequestMatcher,
    pub disposition: Disposition,
}

/// Ordered routing table. `resolve` walks the rules top to bottom and the
/// trailing `Any` rule guarantees exactly one disposition per request.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    rules: Vec<RouteRule>,
}

impl RoutingTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// The production table: API paths network-first, images and static
    /// assets cache-first, navigations network-first, everything else
    /// cache-first against the runtime cache.
    pub fn standard() -> Self {
        use Disposition::*;
        use RequestMatcher::*;

        Self::new(vec![
            RouteRule {
                matcher: PathPrefix("/api/".to_string()),
                disposition: NetworkFirst,
            },
            RouteRule {
                matcher: PathContains("supabase".to_string()),
                disposition: NetworkFirst,
            },
            RouteRule {
                matcher: PathContains("/rest/".to_string()),
                disposition: NetworkFirst,
            },
            RouteRule {
                matcher: Destination(ResourceDestination::Image),
                disposition: CacheFirst(CacheRole::Image),
            },
            RouteRule {
                matcher: Destination(ResourceDestination::Style),
                disposition: CacheFirst(CacheRole::Static),
            },
            RouteRule {
                matcher: Destination(ResourceDestination::Script),
                disposition: CacheFirst(CacheRole::Static),
            },
            RouteRule {
                matcher: Destination(ResourceDestination::Font),
                disposition: CacheFirst(CacheRole::Static),
            },
            RouteRule {
                matcher: Navigation,
                disposition: NetworkFirst,
            },
            RouteRule {
                matcher: Any,
                disposition: CacheFirst(CacheRole::Runtime),
            },
        ])
    }

    pub fn resolve(&self, request: &PageRequest) -> Disposition {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(request))
            .map(|rule| rule.disposition)
            // The standard table ends in Any; a custom table without a
            // catch-all still has to produce exactly one disposition.
            .unwrap_or(Disposition::CacheFirst(CacheRole::Runtime))
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self::standard()
    }
}
