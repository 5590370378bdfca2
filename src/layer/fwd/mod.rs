//! The forwarding decision engine.
//!
//! One call to [`Router::process`] handles one inbound frame completely: validate the IPv4
//! header, pick a terminal [`Disposition`], synthesize whatever outbound frame that disposition
//! calls for, and hand it to the device. Nothing is retried or buffered; every early exit is a
//! diagnostic log line plus a silent drop.
//!
//! The decision order is fixed. A failed header checksum drops the frame before anything else,
//! since none of its fields can be trusted, not even the source address an error reply would go
//! to. An expired time to live answers with a time exceeded error. A missing route answers with
//! a destination unreachable error. A destination matching one of the router's own addresses
//! answers with an echo reply. Everything else is forwarded toward the next hop with the time
//! to live decremented, or dropped when the neighbor table has no link-layer address for it.
//!
//! Two deliberate quirks of this engine are worth knowing about. The echo reply is produced for
//! *any* datagram addressed to the router, without checking that it was an ICMP echo request in
//! the first place. And all headers are read at fixed offsets: IPv4 options are never parsed,
//! so a datagram carrying options is misread. Both match the behavior this engine is specified
//! to have, see the notes in `DESIGN.md`.
//!
//! [`Router::process`]: struct.Router.html#method.process
//! [`Disposition`]: enum.Disposition.html
use crate::layer::{arp, route, Result};
use crate::nic::{Device, Frame};
use crate::wire::{ethernet_frame, icmpv4_packet, ipv4_packet};
use crate::wire::{EthernetProtocol, Icmpv4Message, IpProtocol, Ipv4Address};

#[cfg(test)]
mod tests;

/// The time to live of every reply frame generated by the engine.
pub const DEFAULT_TTL: u8 = 32;

/// The terminal outcome of processing one inbound frame.
///
/// Exactly one disposition is chosen per packet. It is derived fresh each time and never
/// stored; callers that do not care can ignore it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Passed on toward the next hop with the time to live decremented.
    Forwarded,

    /// Answered with an echo reply because it was addressed to the router itself.
    EchoReplied,

    /// Answered with a time exceeded error because the time to live ran out.
    TimeExceededSent,

    /// Answered with a destination unreachable error because no route matched.
    DestUnreachableSent,

    /// Dropped without an answer because the header checksum did not verify.
    DroppedChecksum,

    /// Dropped without an answer for lack of a route.
    DroppedNoRoute,

    /// Dropped without an answer because the destination has no known link-layer address.
    ///
    /// A neighbor table miss is a local resource gap, not a condition reported to the sender.
    DroppedNoArp,
}

/// The per-packet forwarding state machine.
///
/// Borrows the routing table, the neighbor table and the router's own interface addresses, all
/// of which stay untouched while processing. The address list is indexed by interface id and a
/// destination equal to any element counts as addressed to the router.
#[derive(Debug)]
pub struct Router<'a> {
    routes: &'a route::Table<'a>,
    neighbors: &'a arp::Table<'a>,
    addresses: &'a [Ipv4Address],
}

impl<'a> Router<'a> {
    /// Create an engine over the given tables and interface addresses.
    pub fn new(
        routes: &'a route::Table<'a>,
        neighbors: &'a arp::Table<'a>,
        addresses: &'a [Ipv4Address],
    ) -> Self {
        Router { routes, neighbors, addresses }
    }

    /// Process one inbound frame to completion.
    ///
    /// Reply and error frames go out on the frame's ingress interface; a forwarded frame goes
    /// out on the interface of its route. An `Err` means the device rejected a transmit, which
    /// is recoverable per packet: the frame is lost but the engine carries no state into the
    /// next call.
    pub fn process<D: Device>(&self, frame: &mut Frame, device: &mut D) -> Result<Disposition> {
        let ingress = frame.interface();

        let (ttl, src_addr, dst_addr) = {
            let eth = ethernet_frame::new_unchecked(frame.payload());
            let ip = ipv4_packet::new_unchecked(eth.payload_slice());

            if !ip.verify_checksum() {
                net_debug!("bad ip header checksum on interface {}", ingress);
                return Ok(Disposition::DroppedChecksum);
            }

            (ip.hop_limit(), ip.src_addr(), ip.dst_addr())
        };

        if ttl <= 1 {
            net_debug!("time to live expired for {} from {}", dst_addr, src_addr);
            self.respond(frame, Icmpv4Message::TimeExceeded, device)?;
            return Ok(Disposition::TimeExceededSent);
        }

        let route = match self.routes.lookup(dst_addr) {
            Some(route) => route,
            None => {
                net_debug!("no route towards {}", dst_addr);
                self.respond(frame, Icmpv4Message::DstUnreachable, device)?;
                return Ok(Disposition::DestUnreachableSent);
            },
        };

        if self.addresses.contains(&dst_addr) {
            net_trace!("answering {} addressed to interface address {}", src_addr, dst_addr);
            self.respond(frame, Icmpv4Message::EchoReply, device)?;
            return Ok(Disposition::EchoReplied);
        }

        {
            let eth = ethernet_frame::new_unchecked_mut(frame.payload_mut());
            let ip = ipv4_packet::new_unchecked_mut(eth.payload_mut_slice());
            ip.set_hop_limit(ttl - 1);
            ip.fill_checksum();
        }

        let neighbor = match self.neighbors.lookup(dst_addr) {
            Some(neighbor) => neighbor,
            None => {
                net_debug!("no link-layer address for {}", dst_addr);
                return Ok(Disposition::DroppedNoArp);
            },
        };

        {
            let eth = ethernet_frame::new_unchecked_mut(frame.payload_mut());
            eth.set_dst_addr(neighbor.hardware_addr);
        }

        net_trace!("forwarding {} via {} on interface {}", dst_addr, route.next_hop, route.interface);
        device.transmit(route.interface, frame.as_slice())?;
        Ok(Disposition::Forwarded)
    }

    /// Build and transmit one ICMP response frame on the ingress interface.
    ///
    /// All three reply kinds share a single template and differ only in the message type. The
    /// reply is a bare header stack: Ethernet and IP addresses swapped from the original, time
    /// to live reset, identification carried over, and the echo identifier copied verbatim from
    /// the octets at the echo position of the original, whatever protocol they belonged to.
    fn respond<D: Device>(
        &self,
        original: &Frame,
        kind: Icmpv4Message,
        device: &mut D,
    ) -> Result<()> {
        let length = ethernet_frame::header_len()
            + ipv4_packet::header_len()
            + icmpv4_packet::header_len();

        let mut reply = Frame::new();
        reply.set_interface(original.interface());
        reply.set_len(length);

        {
            let original = ethernet_frame::new_unchecked(original.payload());
            let original_ip = ipv4_packet::new_unchecked(original.payload_slice());
            let original_icmp = icmpv4_packet::new_unchecked(original_ip.payload_slice());

            let eth = ethernet_frame::new_unchecked_mut(reply.payload_mut());
            eth.set_dst_addr(original.src_addr());
            eth.set_src_addr(original.dst_addr());
            eth.set_ethertype(EthernetProtocol::Ipv4);

            let ip = ipv4_packet::new_unchecked_mut(eth.payload_mut_slice());
            ip.set_version(4);
            ip.set_header_len(20);
            ip.set_dscp(0);
            ip.set_ecn(0);
            ip.set_total_len((ipv4_packet::header_len() + icmpv4_packet::header_len()) as u16);
            ip.set_ident(original_ip.ident());
            ip.set_hop_limit(DEFAULT_TTL);
            ip.set_protocol(IpProtocol::Icmp);
            ip.set_src_addr(original_ip.dst_addr());
            ip.set_dst_addr(original_ip.src_addr());
            ip.fill_checksum();

            let header = &mut ip.payload_mut_slice()[..icmpv4_packet::header_len()];
            let icmp = icmpv4_packet::new_unchecked_mut(header);
            icmp.set_msg_type(kind);
            icmp.set_msg_code(0);
            icmp.set_echo_ident(original_icmp.echo_ident());
            icmp.fill_checksum();
        }

        device.transmit(reply.interface(), reply.as_slice())
    }
}
