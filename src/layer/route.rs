//! The static routing table, relevant rfc1519, rfc4632.
//!
//! The table is an array of prefix entries sorted ascending by `(prefix, mask)`. It is sorted
//! once on construction and never mutated afterwards, which is what permits lookup by binary
//! search without any locking. Entries with the same prefix but different masks are adjacent
//! after sorting, the most specific one last, so a single bounded forward scan after the search
//! yields the longest matching prefix.
use crate::managed::Slice;
use crate::nic::InterfaceId;
use crate::wire::Ipv4Address;

/// One prefix of addresses routed to a common next hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// The network matched by this entry.
    ///
    /// Stray host bits are cleared on construction so that the stored prefix always satisfies
    /// `prefix == prefix & mask`.
    pub prefix: Ipv4Address,

    /// The subnet mask, as an address with contiguous leading ones.
    pub mask: Ipv4Address,

    /// Next hop for this network.
    pub next_hop: Ipv4Address,

    /// The interface out of which matching datagrams leave.
    pub interface: InterfaceId,
}

impl Entry {
    fn key(&self) -> (u32, u32) {
        (self.prefix.to_network_integer(), self.mask.to_network_integer())
    }

    fn matches(&self, addr: u32) -> bool {
        addr & self.mask.to_network_integer() == self.prefix.to_network_integer()
    }
}

/// A routing table.
///
/// # Examples
///
/// On systems with heap, this table can be created with:
///
/// ```rust
/// # #[cfg(feature = "std")] {
/// use nexthop::layer::route::{Entry, Table};
/// use nexthop::wire::Ipv4Address;
///
/// let table = Table::new(vec![Entry {
///     prefix: Ipv4Address::new(10, 0, 0, 0),
///     mask: Ipv4Address::new(255, 0, 0, 0),
///     next_hop: Ipv4Address::new(192, 168, 2, 1),
///     interface: 0,
/// }]);
/// # }
/// ```
///
/// On systems without heap, hand in a borrowed slice of entries instead.
#[derive(Debug)]
pub struct Table<'a> {
    entries: Slice<'a, Entry>,
}

impl<'a> Table<'a> {
    /// Create a table from entries in any order.
    ///
    /// Each prefix is masked by its own mask and the entries are then sorted ascending by
    /// `(prefix, mask)`. Lookup results depend only on the set of entries, not on the order in
    /// which they were handed in.
    pub fn new<T>(entries: T) -> Self
        where T: Into<Slice<'a, Entry>>
    {
        let mut entries = entries.into();

        for entry in entries.as_mut_slice() {
            entry.prefix = Ipv4Address::from_network_integer(
                entry.prefix.to_network_integer() & entry.mask.to_network_integer());
        }

        entries.as_mut_slice().sort_unstable_by_key(Entry::key);
        Table { entries }
    }

    /// The entries in their sorted order.
    pub fn entries(&self) -> &[Entry] {
        self.entries.as_slice()
    }

    /// Find the most specific entry matching the destination address.
    ///
    /// A binary search locates any entry whose masked destination equals its prefix, comparing
    /// `dest & mask` against the probed prefix to steer the search. Entries sharing that prefix
    /// sit in one contiguous run with masks ascending, so the scan that follows keeps the last
    /// index of the run whose mask also matches; a later match is always at least as specific.
    /// The scan stops at the end of the table.
    pub fn lookup(&self, dest: Ipv4Address) -> Option<&Entry> {
        let entries = self.entries.as_slice();
        let dest = dest.to_network_integer();

        let mut found = None;
        let (mut lo, mut hi) = (0, entries.len());
        while lo < hi {
            let mid = lo + (hi - 1 - lo) / 2;
            let entry = &entries[mid];
            if entry.matches(dest) {
                found = Some(mid);
                break;
            } else if dest & entry.mask.to_network_integer() < entry.prefix.to_network_integer() {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        let index = found?;
        let prefix = entries[index].prefix;
        let mut best = index;

        for (offset, entry) in entries[index + 1..].iter().enumerate() {
            if entry.prefix != prefix {
                break;
            }
            if entry.matches(dest) {
                best = index + 1 + offset;
            }
        }

        Some(&entries[best])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(a0: u8, a1: u8, a2: u8, a3: u8) -> Ipv4Address {
        Ipv4Address::new(a0, a1, a2, a3)
    }

    fn entry(prefix: Ipv4Address, mask: Ipv4Address, next_hop: Ipv4Address, interface: InterfaceId)
        -> Entry
    {
        Entry { prefix, mask, next_hop, interface }
    }

    fn sample_entries() -> Vec<Entry> {
        vec![
            entry(addr(10, 0, 0, 0), addr(255, 0, 0, 0), addr(192, 168, 2, 1), 1),
            entry(addr(10, 0, 0, 0), addr(255, 255, 255, 0), addr(192, 168, 3, 1), 2),
            entry(addr(172, 16, 0, 0), addr(255, 240, 0, 0), addr(192, 168, 4, 1), 3),
        ]
    }

    #[test]
    fn longest_prefix_wins() {
        let table = Table::new(sample_entries());

        let specific = table.lookup(addr(10, 0, 0, 5)).unwrap();
        assert_eq!(specific.next_hop, addr(192, 168, 3, 1));
        assert_eq!(specific.interface, 2);

        let broad = table.lookup(addr(10, 1, 2, 3)).unwrap();
        assert_eq!(broad.next_hop, addr(192, 168, 2, 1));
        assert_eq!(broad.interface, 1);
    }

    #[test]
    fn no_match() {
        let table = Table::new(sample_entries());
        assert_eq!(table.lookup(addr(192, 168, 1, 1)), None);
    }

    #[test]
    fn empty_table() {
        let table = Table::new(Vec::new());
        assert_eq!(table.lookup(addr(10, 0, 0, 1)), None);
    }

    #[test]
    fn run_reaching_table_end() {
        // The matching run of equal prefixes ends on the very last entry; the forward scan must
        // stop there instead of reading past the table.
        let table = Table::new(vec![
            entry(addr(10, 0, 0, 0), addr(255, 0, 0, 0), addr(192, 168, 2, 1), 1),
            entry(addr(10, 0, 0, 0), addr(255, 255, 255, 0), addr(192, 168, 3, 1), 2),
        ]);

        let found = table.lookup(addr(10, 0, 0, 5)).unwrap();
        assert_eq!(found.interface, 2);
    }

    #[test]
    fn input_order_is_irrelevant() {
        let mut reversed = sample_entries();
        reversed.reverse();

        let sorted = Table::new(sample_entries());
        let shuffled = Table::new(reversed);

        for probe in &[
            addr(10, 0, 0, 5), addr(10, 1, 2, 3), addr(172, 17, 0, 1),
            addr(192, 168, 1, 1), addr(8, 8, 8, 8),
        ] {
            assert_eq!(sorted.lookup(*probe), shuffled.lookup(*probe));
        }
    }

    #[test]
    fn prefixes_are_masked_on_construction() {
        let table = Table::new(vec![
            // Host bits set in the prefix; equivalent to 10.0.0.0/8.
            entry(addr(10, 1, 2, 3), addr(255, 0, 0, 0), addr(192, 168, 2, 1), 1),
        ]);

        assert_eq!(table.entries()[0].prefix, addr(10, 0, 0, 0));
        assert!(table.lookup(addr(10, 200, 0, 1)).is_some());
    }
}
