//! # Discovery Record
//!
//! The one shape every tool adapter reduces its report to. Keeping this
//! narrow is what lets a new adapter plug into the ingestion pipeline
//! without touching it.

/// One discovered address, optionally with the hostname it resolved to.
///
/// Construct through [`DiscoveryRecord::new`]: the address is normalized and
/// must not be empty, and an empty hostname collapses to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveryRecord {
    address: String,
    hostname: Option<String>,
}

impl DiscoveryRecord {
    /// Normalizes both fields, returning `None` when no address is left.
    pub fn new(address: &str, hostname: Option<&str>) -> Option<Self> {
        let address = normalize(address)?;
        let hostname = hostname.and_then(normalize);
        Some(Self { address, hostname })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// The hostname as the candidate list a registry interface expects.
    pub fn hostname_candidates(&self) -> Vec<String> {
        self.hostname.iter().cloned().collect()
    }
}

/// Strips line breaks and surrounding whitespace. Empty results become `None`.
pub fn normalize(value: &str) -> Option<String> {
    let cleaned: String = value.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_trimmed() {
        let record = DiscoveryRecord::new("\n   10.0.0.1\n  ", None).unwrap();
        assert_eq!(record.address(), "10.0.0.1");
        assert_eq!(record.hostname(), None);
    }

    #[test]
    fn blank_address_is_rejected() {
        assert!(DiscoveryRecord::new("  \n\t ", Some("a.example.com")).is_none());
    }

    #[test]
    fn blank_hostname_is_absent() {
        let record = DiscoveryRecord::new("10.0.0.1", Some(" \n")).unwrap();
        assert_eq!(record.hostname(), None);
        assert!(record.hostname_candidates().is_empty());
    }

    #[test]
    fn hostname_becomes_single_candidate() {
        let record = DiscoveryRecord::new("10.0.0.1", Some("a.example.com\n")).unwrap();
        assert_eq!(record.hostname_candidates(), vec!["a.example.com".to_string()]);
    }
}
