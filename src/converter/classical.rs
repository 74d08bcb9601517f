//! Single-provider conversion to plain or classical rule text.

use ipnet::IpNet;
use std::net::IpAddr;

use super::provider::ProviderDocument;
use crate::Result;

/// Output style for [`convert_provider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvertMode {
    /// Payload entries as they appear in the provider
    #[default]
    Plain,
    /// One `TYPE,value` rule per entry
    Classical,
}

/// Convert a provider entry to classical `TYPE,value` form.
///
/// Entries that already contain a comma are assumed to be classical.
pub fn to_classical(entry: &str) -> String {
    if entry.contains(',') {
        return entry.to_string();
    }

    let ip = match entry.parse::<IpNet>() {
        Ok(net) => Some(net.addr()),
        Err(_) => entry.parse::<IpAddr>().ok(),
    };

    match ip {
        Some(IpAddr::V4(_)) => format!("IP-CIDR,{}", entry),
        Some(IpAddr::V6(_)) => format!("IP-CIDR6,{}", entry),
        None => format!("DOMAIN-REGEX,{}", entry),
    }
}

/// Convert provider YAML into newline-separated rule text.
pub fn convert_provider(content: &str, mode: ConvertMode) -> Result<String> {
    let document = ProviderDocument::parse(content)?;
    let lines: Vec<String> = match mode {
        ConvertMode::Plain => document.entries().map(str::to_string).collect(),
        ConvertMode::Classical => document.entries().map(to_classical).collect(),
    };
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_to_classical() {
        assert_eq!(to_classical("1.2.3.4"), "IP-CIDR,1.2.3.4");
        assert_eq!(to_classical("10.0.0.0/8"), "IP-CIDR,10.0.0.0/8");
        assert_eq!(to_classical("2001:db8::1"), "IP-CIDR6,2001:db8::1");
        assert_eq!(to_classical("fc00::/7"), "IP-CIDR6,fc00::/7");
        assert_eq!(to_classical("example.com"), "DOMAIN-REGEX,example.com");
        assert_eq!(to_classical("DOMAIN,example.com"), "DOMAIN,example.com");
        assert_eq!(to_classical("300.1.1.1"), "DOMAIN-REGEX,300.1.1.1");
    }

    #[test]
    fn test_convert_provider_plain() {
        let yaml = "payload:\n  - '+.google.com'\n  - 1\n  - youtube.com\n";
        let text = convert_provider(yaml, ConvertMode::Plain).unwrap();
        assert_eq!(text, "+.google.com\nyoutube.com");
    }

    #[test]
    fn test_convert_provider_classical() {
        let yaml = "payload:\n  - 8.8.8.8/32\n  - '2400:3200::/32'\n  - IP-CIDR,1.1.1.1/32,no-resolve\n";
        let text = convert_provider(yaml, ConvertMode::Classical).unwrap();
        assert_eq!(
            text,
            "IP-CIDR,8.8.8.8/32\nIP-CIDR6,2400:3200::/32\nIP-CIDR,1.1.1.1/32,no-resolve"
        );
    }

    #[test]
    fn test_convert_provider_invalid() {
        let result = convert_provider("rules: []", ConvertMode::Plain);
        assert!(matches!(result, Err(Error::InvalidDocument(_))));
    }
}
