use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ingestr_common::registry::{AssetRegistry, HostId, InterfaceId, RegistryError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    pub id: HostId,
    /// Address the host was first registered under. Also its display name.
    pub address: String,
    pub interfaces: Vec<InterfaceId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceEntry {
    pub id: InterfaceId,
    pub host: HostId,
    pub address: String,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
    /// Known hostnames, first seen first.
    pub hostnames: Vec<String>,
}

/// [`AssetRegistry`] kept entirely in memory. Hosts are keyed by address,
/// interfaces by host and address.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    hosts: Vec<HostEntry>,
    interfaces: Vec<InterfaceEntry>,
    host_index: HashMap<String, HostId>,
    interface_index: HashMap<(HostId, String), InterfaceId>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hosts in creation order.
    pub fn hosts(&self) -> &[HostEntry] {
        &self.hosts
    }

    pub fn host(&self, id: HostId) -> Option<&HostEntry> {
        self.hosts.get(index_of(id.0)?)
    }

    pub fn interface(&self, id: InterfaceId) -> Option<&InterfaceEntry> {
        self.interfaces.get(index_of(id.0)?)
    }

    pub fn interfaces_of(&self, host: HostId) -> impl Iterator<Item = &InterfaceEntry> {
        self.host(host)
            .into_iter()
            .flat_map(|entry| entry.interfaces.iter())
            .filter_map(|id| self.interface(*id))
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }
}

impl AssetRegistry for InMemoryRegistry {
    fn ensure_host(&mut self, address: &str) -> Result<HostId, RegistryError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(RegistryError::EmptyAddress);
        }
        if let Some(id) = self.host_index.get(address) {
            return Ok(*id);
        }

        let id = HostId(self.hosts.len() as u64 + 1);
        self.hosts.push(HostEntry {
            id,
            address: address.to_string(),
            interfaces: Vec::new(),
        });
        self.host_index.insert(address.to_string(), id);
        debug!("registered {id} for {address}");
        Ok(id)
    }

    fn ensure_interface(
        &mut self,
        host: HostId,
        address: &str,
        hostname_candidates: &[String],
    ) -> Result<InterfaceId, RegistryError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(RegistryError::EmptyAddress);
        }
        let host_idx = index_of(host.0)
            .filter(|idx| *idx < self.hosts.len())
            .ok_or(RegistryError::UnknownHost(host))?;

        let key = (host, address.to_string());
        let existing = self.interface_index.get(&key).copied();
        let id = match existing {
            Some(id) => id,
            None => {
                let id = InterfaceId(self.interfaces.len() as u64 + 1);
                let ip = address.parse::<IpAddr>().ok();
                self.interfaces.push(InterfaceEntry {
                    id,
                    host,
                    address: address.to_string(),
                    ipv4: match ip {
                        Some(IpAddr::V4(v4)) => Some(v4),
                        _ => None,
                    },
                    ipv6: match ip {
                        Some(IpAddr::V6(v6)) => Some(v6),
                        _ => None,
                    },
                    hostnames: Vec::new(),
                });
                self.hosts[host_idx].interfaces.push(id);
                self.interface_index.insert(key, id);
                debug!("registered {id} for {address} on {host}");
                id
            }
        };

        if let Some(idx) = index_of(id.0)
            && let Some(entry) = self.interfaces.get_mut(idx)
        {
            merge_hostnames(&mut entry.hostnames, hostname_candidates);
        }
        Ok(id)
    }
}

// Identifiers start at 1 so they never look like a default value.
fn index_of(raw_id: u64) -> Option<usize> {
    usize::try_from(raw_id).ok()?.checked_sub(1)
}

fn merge_hostnames(known: &mut Vec<String>, candidates: &[String]) {
    for candidate in candidates {
        let candidate = candidate.trim();
        if !candidate.is_empty() && !known.iter().any(|k| k == candidate) {
            known.push(candidate.to_string());
        }
    }
}
