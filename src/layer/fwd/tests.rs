use super::*;
use crate::layer::Error;
use crate::nic::loopback::Loopback;
use crate::nic::InterfaceId;
use crate::wire::EthernetAddress;

const HOST_MAC: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 0, 0x01]);
const ROUTER_MAC: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 0, 0x02]);
const NEXT_HOP_MAC: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 0, 0x03]);

const HOST: Ipv4Address = Ipv4Address([192, 168, 1, 100]);
const ROUTER: Ipv4Address = Ipv4Address([192, 168, 1, 1]);

fn addr(a0: u8, a1: u8, a2: u8, a3: u8) -> Ipv4Address {
    Ipv4Address::new(a0, a1, a2, a3)
}

fn routes() -> route::Table<'static> {
    route::Table::new(vec![
        route::Entry {
            prefix: addr(10, 0, 0, 0),
            mask: addr(255, 0, 0, 0),
            next_hop: addr(192, 168, 2, 1),
            interface: 1,
        },
        route::Entry {
            prefix: addr(10, 0, 0, 0),
            mask: addr(255, 255, 255, 0),
            next_hop: addr(192, 168, 3, 1),
            interface: 2,
        },
        route::Entry {
            prefix: addr(192, 168, 1, 0),
            mask: addr(255, 255, 255, 0),
            next_hop: addr(192, 168, 1, 1),
            interface: 0,
        },
    ])
}

fn neighbors() -> arp::Table<'static> {
    arp::Table::new(vec![
        arp::Entry { protocol_addr: addr(10, 0, 0, 5), hardware_addr: NEXT_HOP_MAC },
    ])
}

fn addresses() -> Vec<Ipv4Address> {
    vec![ROUTER, addr(192, 168, 2, 2), addr(192, 168, 3, 3)]
}

/// An inbound frame received on interface 0, an echo request unless `protocol` says otherwise.
fn inbound(dst: Ipv4Address, ttl: u8, protocol: IpProtocol) -> Frame {
    let mut frame = Frame::new();
    frame.set_interface(0);
    frame.set_len(42);

    let eth = ethernet_frame::new_unchecked_mut(frame.payload_mut());
    eth.set_dst_addr(ROUTER_MAC);
    eth.set_src_addr(HOST_MAC);
    eth.set_ethertype(EthernetProtocol::Ipv4);

    let ip = ipv4_packet::new_unchecked_mut(eth.payload_mut_slice());
    ip.set_version(4);
    ip.set_header_len(20);
    ip.set_total_len(28);
    ip.set_ident(0x4242);
    ip.set_hop_limit(ttl);
    ip.set_protocol(protocol);
    ip.set_src_addr(HOST);
    ip.set_dst_addr(dst);
    ip.fill_checksum();

    let header = &mut ip.payload_mut_slice()[..icmpv4_packet::header_len()];
    let icmp = icmpv4_packet::new_unchecked_mut(header);
    icmp.set_msg_type(Icmpv4Message::EchoRequest);
    icmp.set_msg_code(0);
    icmp.set_echo_ident(0x1234);
    icmp.set_echo_seq_no(1);
    icmp.fill_checksum();

    frame
}

/// A device that rejects every operation, for exercising egress failure.
struct DeadDevice;

impl Device for DeadDevice {
    fn receive(&mut self, _: &mut Frame) -> crate::layer::Result<()> {
        Err(Error::Illegal)
    }

    fn transmit(&mut self, _: InterfaceId, _: &[u8]) -> crate::layer::Result<()> {
        Err(Error::Illegal)
    }
}

fn assert_response(bytes: &[u8], kind: Icmpv4Message, original_dst: Ipv4Address) {
    assert_eq!(bytes.len(), 42);

    let eth = ethernet_frame::new_unchecked(bytes);
    assert_eq!(eth.dst_addr(), HOST_MAC);
    assert_eq!(eth.src_addr(), ROUTER_MAC);
    assert_eq!(eth.ethertype(), EthernetProtocol::Ipv4);

    let ip = ipv4_packet::new_unchecked(eth.payload_slice());
    assert!(ip.verify_checksum());
    assert_eq!(ip.version(), 4);
    assert_eq!(ip.total_len(), 28);
    assert_eq!(ip.ident(), 0x4242);
    assert_eq!(ip.hop_limit(), DEFAULT_TTL);
    assert_eq!(ip.protocol(), IpProtocol::Icmp);
    assert_eq!(ip.src_addr(), original_dst);
    assert_eq!(ip.dst_addr(), HOST);

    let icmp = icmpv4_packet::new_unchecked(ip.payload_slice());
    assert!(icmp.verify_checksum());
    assert_eq!(icmp.msg_type(), kind);
    assert_eq!(icmp.msg_code(), 0);
    assert_eq!(icmp.echo_ident(), 0x1234);
}

#[test]
fn forwards_with_decremented_ttl() {
    let (routes, neighbors, addresses) = (routes(), neighbors(), addresses());
    let router = Router::new(&routes, &neighbors, &addresses);
    let mut device = Loopback::new();

    let mut frame = inbound(addr(10, 0, 0, 5), 2, IpProtocol::Icmp);
    assert_eq!(router.process(&mut frame, &mut device), Ok(Disposition::Forwarded));

    let (interface, bytes) = &device.transmitted()[0];
    // The more specific /24 route wins over the /8.
    assert_eq!(*interface, 2);
    assert_eq!(bytes.len(), 42);

    let eth = ethernet_frame::new_unchecked(bytes);
    assert_eq!(eth.dst_addr(), NEXT_HOP_MAC);
    // The source address is left as received.
    assert_eq!(eth.src_addr(), HOST_MAC);

    let ip = ipv4_packet::new_unchecked(eth.payload_slice());
    assert_eq!(ip.hop_limit(), 1);
    assert!(ip.verify_checksum());
    assert_eq!(ip.dst_addr(), addr(10, 0, 0, 5));
}

#[test]
fn ttl_expiry_answers_time_exceeded() {
    let (routes, neighbors, addresses) = (routes(), neighbors(), addresses());
    let router = Router::new(&routes, &neighbors, &addresses);
    let mut device = Loopback::new();

    let mut frame = inbound(addr(10, 0, 0, 5), 1, IpProtocol::Icmp);
    assert_eq!(router.process(&mut frame, &mut device), Ok(Disposition::TimeExceededSent));

    let (interface, bytes) = &device.transmitted()[0];
    assert_eq!(*interface, 0);
    assert_response(bytes, Icmpv4Message::TimeExceeded, addr(10, 0, 0, 5));
}

#[test]
fn ttl_zero_also_expires() {
    let (routes, neighbors, addresses) = (routes(), neighbors(), addresses());
    let router = Router::new(&routes, &neighbors, &addresses);
    let mut device = Loopback::new();

    let mut frame = inbound(addr(10, 0, 0, 5), 0, IpProtocol::Icmp);
    assert_eq!(router.process(&mut frame, &mut device), Ok(Disposition::TimeExceededSent));
}

#[test]
fn missing_route_answers_unreachable() {
    let (routes, neighbors, addresses) = (routes(), neighbors(), addresses());
    let router = Router::new(&routes, &neighbors, &addresses);
    let mut device = Loopback::new();

    let mut frame = inbound(addr(8, 8, 8, 8), 16, IpProtocol::Icmp);
    assert_eq!(router.process(&mut frame, &mut device), Ok(Disposition::DestUnreachableSent));

    let (interface, bytes) = &device.transmitted()[0];
    assert_eq!(*interface, 0);
    assert_response(bytes, Icmpv4Message::DstUnreachable, addr(8, 8, 8, 8));
}

#[test]
fn self_addressed_answers_echo_reply() {
    let (routes, neighbors, addresses) = (routes(), neighbors(), addresses());
    let router = Router::new(&routes, &neighbors, &addresses);
    let mut device = Loopback::new();

    let mut frame = inbound(ROUTER, 16, IpProtocol::Icmp);
    assert_eq!(router.process(&mut frame, &mut device), Ok(Disposition::EchoReplied));

    let (interface, bytes) = &device.transmitted()[0];
    assert_eq!(*interface, 0);
    assert_response(bytes, Icmpv4Message::EchoReply, ROUTER);
}

#[test]
fn echo_reply_ignores_inbound_protocol() {
    // A tcp segment addressed to the router is answered with an echo reply all the same; the
    // identifier octets are copied from where the echo identifier would sit.
    let (routes, neighbors, addresses) = (routes(), neighbors(), addresses());
    let router = Router::new(&routes, &neighbors, &addresses);
    let mut device = Loopback::new();

    let mut frame = inbound(ROUTER, 16, IpProtocol::Tcp);
    assert_eq!(router.process(&mut frame, &mut device), Ok(Disposition::EchoReplied));

    let (_, bytes) = &device.transmitted()[0];
    let eth = ethernet_frame::new_unchecked(&bytes[..]);
    let ip = ipv4_packet::new_unchecked(eth.payload_slice());
    assert_eq!(ip.protocol(), IpProtocol::Icmp);

    let icmp = icmpv4_packet::new_unchecked(ip.payload_slice());
    assert_eq!(icmp.msg_type(), Icmpv4Message::EchoReply);
    assert_eq!(icmp.echo_ident(), 0x1234);
}

#[test]
fn bad_checksum_drops_silently() {
    let (routes, neighbors, addresses) = (routes(), neighbors(), addresses());
    let router = Router::new(&routes, &neighbors, &addresses);
    let mut device = Loopback::new();

    let mut frame = inbound(addr(10, 0, 0, 5), 16, IpProtocol::Icmp);
    // Corrupt the ttl octet after the checksum was computed.
    frame.payload_mut()[22] ^= 0x01;

    assert_eq!(router.process(&mut frame, &mut device), Ok(Disposition::DroppedChecksum));
    assert!(device.transmitted().is_empty());
}

#[test]
fn neighbor_miss_drops_silently() {
    let (routes, neighbors, addresses) = (routes(), neighbors(), addresses());
    let router = Router::new(&routes, &neighbors, &addresses);
    let mut device = Loopback::new();

    // Matches the /24 route but has no neighbor entry.
    let mut frame = inbound(addr(10, 0, 0, 77), 16, IpProtocol::Icmp);
    assert_eq!(router.process(&mut frame, &mut device), Ok(Disposition::DroppedNoArp));
    assert!(device.transmitted().is_empty());
}

#[test]
fn egress_failure_is_an_error() {
    let (routes, neighbors, addresses) = (routes(), neighbors(), addresses());
    let router = Router::new(&routes, &neighbors, &addresses);
    let mut device = DeadDevice;

    let mut frame = inbound(addr(10, 0, 0, 5), 1, IpProtocol::Icmp);
    assert_eq!(router.process(&mut frame, &mut device), Err(Error::Illegal));

    // The engine keeps no state; the next packet processes normally on a healthy device.
    let mut device = Loopback::new();
    let mut frame = inbound(addr(10, 0, 0, 5), 2, IpProtocol::Icmp);
    assert_eq!(router.process(&mut frame, &mut device), Ok(Disposition::Forwarded));
}
