//! Rule kind definitions.

use std::fmt;

/// RuleKind selects how a category of source documents is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Domain lists (geosite), rendered as `DOMAIN-SUFFIX` lines
    Domain,
    /// IP and CIDR lists (geoip), rendered as `IP-CIDR` lines
    IpCidr,
}

impl RuleKind {
    /// All kinds in processing order.
    pub const ALL: [RuleKind; 2] = [RuleKind::Domain, RuleKind::IpCidr];

    /// Get the internal name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Domain => "geosite",
            RuleKind::IpCidr => "geoip",
        }
    }

    /// Rule type written at the start of every output line.
    pub fn rule_prefix(&self) -> &'static str {
        match self {
            RuleKind::Domain => "DOMAIN-SUFFIX",
            RuleKind::IpCidr => "IP-CIDR",
        }
    }

    /// Render one payload entry as a rule line (without newline).
    ///
    /// Domain entries may carry an attribute tag after a colon
    /// (`example.com:cn`); the tag is dropped.
    pub fn format_entry(&self, entry: &str) -> String {
        let value = match self {
            RuleKind::Domain => entry.split(':').next().unwrap_or(entry),
            RuleKind::IpCidr => entry,
        };
        format!("{},{}", self.rule_prefix(), value)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
