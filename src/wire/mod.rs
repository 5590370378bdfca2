/*! Low-level packet access and construction.

# An overview over packet representations

The `wire` module deals with the packet *representation*. It provides two levels of
functionality.

 * First, it provides functions to extract fields from sequences of octets, and to insert fields
   into sequences of octets. This happens in the lowercase structures, e.g. [`ethernet_frame`] or
   [`ipv4_packet`]. These are unsized types wrapping the octet sequence itself, so that inspecting
   or patching a packet in place never copies any data.
 * Second, it provides the value types appearing inside those fields, e.g. [`Ipv4Address`] or
   [`EthernetProtocol`], with their conversions from and to raw octets and text.

[`ethernet_frame`]: struct.ethernet_frame.html
[`ipv4_packet`]: struct.ipv4_packet.html
[`Ipv4Address`]: struct.Ipv4Address.html
[`EthernetProtocol`]: enum.EthernetProtocol.html

The byte wrapper family of data structures guarantees that, if the `check_len()` method returned
`Ok(())`, then no field accessor or setter method will panic. The `new_checked` constructor is a
shorthand for a combination of `new_unchecked` and `check_len`. When parsing untrusted input, it
is *necessary* to use one of the checked methods; so long as the buffer is not shortened
afterwards, no accessor will fail.

All headers live at fixed offsets. IPv4 options are not supported: accessors treat the header as
exactly 20 octets long, whatever the IHL field claims, and the payload begins directly after.

# Examples

To parse an IPv4 header from an octet buffer:

```rust
use nexthop::wire::{ipv4_packet, Ipv4Address, IpProtocol};

static BYTES: [u8; 20] = [
    0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11,
    0xb8, 0x61, 0xc0, 0xa8, 0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7];

let packet = ipv4_packet::new_checked(&BYTES[..])
    .expect("truncated packet");
assert_eq!(packet.protocol(), IpProtocol::Udp);
assert_eq!(packet.dst_addr(), Ipv4Address::new(192, 168, 0, 199));
assert!(packet.verify_checksum());
```
*/
// Copyright (C) 2016 whitequark@whitequark.org
// Copyright (C) 2019 Andreas Molzer <andreas.molzer@tum.de>
//
// in large parts from `smoltcp` originally distributed under 0-clause BSD
//
// Applies to files in this folder unless otherwise noted. These are:
// * `error.rs`
// * `ethernet.rs`
// * `icmpv4.rs`
// * `ipv4.rs`
// * `mod.rs` (this file)

// FIXME: Most fields should be self-explanatory and there is the general guide but enable once the
// other issues have been resolved.
#![allow(missing_docs)]

mod field {
    pub(crate) type Field = ::core::ops::Range<usize>;
    pub(crate) type Rest  = ::core::ops::RangeFrom<usize>;
}

pub mod checksum;
mod error;
mod ethernet;
mod icmpv4;
mod ipv4;

// FIXME: All of these re-exports are pointless. A better way would be to put into each module the
// non-prefixed names that are supposed to be public. Then one can access `wire::ipv4::Address` and
// `wire::ethernet::Protocol` for example, or `use wire::ipv4` instead of listing all single items.
// The current way is againt the Rust philosophy and against usability.

pub use self::ethernet::{
    ethernet as ethernet_frame,
    EtherType as EthernetProtocol,
    Address as EthernetAddress,
    ParseAddressError as ParseEthernetAddressError};

pub use self::error::{
    Error,
    Result};

pub use self::ipv4::{
    ipv4 as ipv4_packet,
    Address as Ipv4Address,
    Protocol as IpProtocol};

#[cfg(feature = "std")]
pub use self::ipv4::ParseAddressError as ParseIpv4AddressError;

pub use self::icmpv4::{
    icmpv4 as icmpv4_packet,
    Message as Icmpv4Message};
