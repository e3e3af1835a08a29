//! Exclusion rules applied to normalized interfaces before they join a collection.

use std::fmt;

use netgrid_common::network::interface::{InterfaceType, NetworkInterface};

/// Container plumbing, bridges and VPN overlays. Loopback is not listed.
pub const DEFAULT_DENYLIST: &[&str] = &["veth*", "br-*", "docker*", "virbr*", "tailscale*", "zt*"];

type Rule = Box<dyn Fn(&NetworkInterface) -> bool + Send + Sync>;

/// Glob over interface names. `*` matches any run of characters, including none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    raw: String,
}

impl NamePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            raw: pattern.into(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        if !self.raw.contains('*') {
            return name == self.raw;
        }
        let mut parts = self.raw.split('*');
        let Some(head) = parts.next() else {
            return false;
        };
        let Some(mut rest) = name.strip_prefix(head) else {
            return false;
        };

        let segments: Vec<&str> = parts.collect();
        let Some((tail, middle)) = segments.split_last() else {
            return true;
        };
        for segment in middle {
            match rest.find(segment) {
                Some(at) => rest = &rest[at + segment.len()..],
                None => return false,
            }
        }
        rest.len() >= tail.len() && rest.ends_with(tail)
    }
}

/// Pure predicate over normalized interfaces.
pub struct ExclusionFilter {
    patterns: Vec<NamePattern>,
    types: Vec<InterfaceType>,
    rules: Vec<Rule>,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::empty().with_patterns(DEFAULT_DENYLIST.iter().copied())
    }
}

impl ExclusionFilter {
    /// A filter that excludes nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            types: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns
            .extend(patterns.into_iter().map(NamePattern::new));
        self
    }

    pub fn exclude_type(mut self, kind: InterfaceType) -> Self {
        if !self.types.contains(&kind) {
            self.types.push(kind);
        }
        self
    }

    /// Adds an arbitrary predicate; returning `true` excludes the interface.
    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&NetworkInterface) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn excludes(&self, iface: &NetworkInterface) -> bool {
        self.patterns.iter().any(|p| p.matches(&iface.name))
            || self.types.contains(&iface.interface_type)
            || self.rules.iter().any(|rule| rule(iface))
    }
}

impl fmt::Debug for ExclusionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusionFilter")
            .field("patterns", &self.patterns)
            .field("types", &self.types)
            .field("rules", &self.rules.len())
            .finish()
    }
}
