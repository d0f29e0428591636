//! Apex (registrable) domain extraction and grouping.
//!
//! This module uses the Public Suffix List (PSL) to derive the registrable
//! domain of each hostname, and groups hostnames that share one so the
//! registration lookup runs once per apex.
//!
//! Key functions:
//! - `registrable_domain()` - Derives the apex domain of a single hostname
//! - `group_by_apex()` - Groups a batch of hostnames by apex, preserving order

use std::collections::HashMap;

use psl::{List, Psl};

use crate::error_handling::LookupError;

/// Hostnames sharing one apex domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApexGroup {
    /// The registrable domain
    pub apex: String,
    /// Indices into the original hostname slice, ascending
    pub members: Vec<usize>,
}

/// Result of grouping a batch of hostnames by apex domain.
#[derive(Debug, Clone)]
pub struct ApexGroups {
    /// Index into `groups` (or resolution failure) of each hostname, in input order
    pub per_host: Vec<Result<usize, LookupError>>,
    /// Unique apex domains in first-seen order
    pub groups: Vec<ApexGroup>,
}

/// Derives the registrable domain of a hostname using the Public Suffix List.
///
/// # Arguments
///
/// * `list` - The Public Suffix List instance
/// * `hostname` - The hostname (e.g. "a.example.co.uk")
///
/// # Returns
///
/// The registrable domain (e.g. "example.co.uk"), lower-cased.
///
/// # Errors
///
/// Returns `LookupError::Resolution` if the hostname is empty, is an IP
/// address, is not a syntactically valid host, or is itself a public suffix.
/// Unknown TLDs are treated as single-label suffixes.
pub fn registrable_domain(list: &List, hostname: &str) -> Result<String, LookupError> {
    let resolution_error = |reason: &str| LookupError::Resolution {
        host: hostname.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = hostname.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(resolution_error("empty hostname"));
    }

    // IP addresses do not have registrable domains
    if trimmed.parse::<std::net::IpAddr>().is_ok() {
        return Err(resolution_error("IP addresses have no registrable domain"));
    }

    let host = match url::Host::parse(trimmed) {
        Ok(url::Host::Domain(domain)) => domain,
        Ok(url::Host::Ipv4(_)) | Ok(url::Host::Ipv6(_)) => {
            return Err(resolution_error("IP addresses have no registrable domain"));
        }
        Err(e) => return Err(resolution_error(&format!("invalid hostname: {e}"))),
    };

    let domain = list
        .domain(host.as_bytes())
        .ok_or_else(|| resolution_error("hostname is a public suffix"))?;

    Ok(String::from_utf8_lossy(domain.as_bytes()).to_string())
}

/// Groups hostnames by their registrable domain.
///
/// Every hostname keeps its slot in `per_host`, including the ones whose apex
/// cannot be derived; only resolvable hostnames become group members.
pub fn group_by_apex(list: &List, hostnames: &[String]) -> ApexGroups {
    let mut per_host = Vec::with_capacity(hostnames.len());
    let mut groups: Vec<ApexGroup> = Vec::new();
    let mut index_by_apex: HashMap<String, usize> = HashMap::new();

    for (i, hostname) in hostnames.iter().enumerate() {
        let group = registrable_domain(list, hostname).map(|apex| {
            match index_by_apex.get(&apex) {
                Some(&group_index) => {
                    groups[group_index].members.push(i);
                    group_index
                }
                None => {
                    let group_index = groups.len();
                    index_by_apex.insert(apex.clone(), group_index);
                    groups.push(ApexGroup {
                        apex,
                        members: vec![i],
                    });
                    group_index
                }
            }
        });
        if let Err(ref e) = group {
            log::debug!("Skipping registration lookup for {hostname:?}: {e}");
        }
        per_host.push(group);
    }

    ApexGroups { per_host, groups }
}
