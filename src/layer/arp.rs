//! The static neighbor table, relevant rfc826.
//!
//! Only passive lookup is modeled: the table is filled once from configuration and never learns,
//! ages or evicts. The engine assumes every next hop it will ever need is pre-populated; a miss
//! is a per-packet drop, not a trigger for an ARP exchange.
use crate::managed::Slice;
use crate::wire::{EthernetAddress, Ipv4Address};

/// One known mapping from a protocol address to a hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// The IPv4 address of the neighbor.
    pub protocol_addr: Ipv4Address,

    /// The link-layer address frames for that neighbor are sent to.
    pub hardware_addr: EthernetAddress,
}

/// A static neighbor table.
///
/// Lookup is a linear scan for an exact address match. The table is small and fixed, an index
/// structure would buy nothing.
#[derive(Debug)]
pub struct Table<'a> {
    entries: Slice<'a, Entry>,
}

impl<'a> Table<'a> {
    /// Create a table from the given entries.
    ///
    /// Order is irrelevant and duplicates are not rejected; the first match wins.
    pub fn new<T>(entries: T) -> Self
        where T: Into<Slice<'a, Entry>>
    {
        Table { entries: entries.into() }
    }

    /// The entries of the table.
    pub fn entries(&self) -> &[Entry] {
        self.entries.as_slice()
    }

    /// Find the entry for an exact protocol address.
    pub fn lookup(&self, addr: Ipv4Address) -> Option<&Entry> {
        self.entries.as_slice()
            .iter()
            .find(|entry| entry.protocol_addr == addr)
    }
}
