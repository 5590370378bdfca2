//! A static-table IPv4 forwarding engine.
//!
//! Given an inbound Ethernet frame carrying an IPv4 datagram, the engine decides whether to
//! forward it toward a next hop, answer it, or reject it with an ICMP error, and produces the
//! exact outbound frame bytes. Routing and neighbor resolution are static: both tables are
//! loaded once at startup and never change for the lifetime of the process.
//!
//! The pieces, leaf first:
//!
//! * [`wire`] interprets and overwrites the fixed-offset Ethernet, IPv4 and ICMP header fields
//!   of a byte buffer, including the internet checksum of RFC 1071.
//! * [`layer::route`] is the sorted, immutable-after-construction routing table with
//!   longest-prefix-match lookup; [`layer::arp`] is the static neighbor table next to it.
//! * [`layer::fwd`] is the per-packet state machine tying the two together. Each inbound frame
//!   ends in exactly one [`Disposition`]: forwarded, answered with an echo reply, answered with
//!   an ICMP error, or silently dropped.
//! * [`nic`] is the seam to the outside world: the [`Frame`] buffer, the blocking-receive /
//!   fire-and-forget-transmit [`Device`] trait, an in-memory device for tests, and a Linux
//!   raw-socket implementation behind the `sys` feature.
//!
//! The core never allocates: tables accept borrowed storage through [`managed::Slice`], so the
//! library builds without `std` when default features are disabled. The binary target is a
//! complete router daemon on top of the raw-socket device.
//!
//! [`wire`]: wire/index.html
//! [`layer::route`]: layer/route/index.html
//! [`layer::arp`]: layer/arp/index.html
//! [`layer::fwd`]: layer/fwd/index.html
//! [`nic`]: nic/index.html
//! [`Disposition`]: layer/fwd/enum.Disposition.html
//! [`Frame`]: nic/struct.Frame.html
//! [`Device`]: nic/trait.Device.html
//! [`managed::Slice`]: managed/enum.Slice.html
//!
//! ```
//! use nexthop::layer::route::{Entry, Table};
//! use nexthop::wire::Ipv4Address;
//!
//! let table = Table::new(vec![
//!     Entry {
//!         prefix: Ipv4Address::new(10, 0, 0, 0),
//!         mask: Ipv4Address::new(255, 0, 0, 0),
//!         next_hop: Ipv4Address::new(192, 168, 2, 1),
//!         interface: 1,
//!     },
//!     Entry {
//!         prefix: Ipv4Address::new(10, 0, 0, 0),
//!         mask: Ipv4Address::new(255, 255, 255, 0),
//!         next_hop: Ipv4Address::new(192, 168, 3, 1),
//!         interface: 2,
//!     },
//! ]);
//!
//! // The more specific of the two matching prefixes wins.
//! let route = table.lookup(Ipv4Address::new(10, 0, 0, 5)).unwrap();
//! assert_eq!(route.interface, 2);
//! ```
#![warn(missing_docs)]
#![warn(unreachable_pub)]

// tests should be able to use `std`
#![cfg_attr(all(
    not(feature = "std"),
    not(test)),
no_std)]

#[macro_use] mod macros;

#[cfg(feature = "std")]
pub mod config;
pub mod layer;
pub mod managed;
pub mod nic;
pub mod wire;
