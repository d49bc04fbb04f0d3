use std::fmt;

use thiserror::Error;

/// Identifier of a host owned by an [`AssetRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(pub u64);

/// Identifier of an interface owned by an [`AssetRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(pub u64);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host#{}", self.0)
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iface#{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("address must not be empty")]
    EmptyAddress,
    #[error("{0} is not registered")]
    UnknownHost(HostId),
}

/// Defines the contract for the store that owns host and interface identity.
///
/// Both operations must be idempotent: calling them again with the same
/// address returns the identifier created the first time.
pub trait AssetRegistry {
    /// Returns the host registered under `address`, creating it if needed.
    fn ensure_host(&mut self, address: &str) -> Result<HostId, RegistryError>;

    /// Returns the interface `address` of `host`, creating it if needed.
    ///
    /// `hostname_candidates` are merged into the interface's known hostnames.
    fn ensure_interface(
        &mut self,
        host: HostId,
        address: &str,
        hostname_candidates: &[String],
    ) -> Result<InterfaceId, RegistryError>;
}
