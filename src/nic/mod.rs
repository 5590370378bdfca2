//! The seam between the engine and the network interfaces.
//!
//! A [`Device`] hands frames in and takes frames out; everything the engine knows about the
//! outside world passes through it. Receiving blocks until a frame arrives, transmitting is
//! fire-and-forget. Two implementations ship with the crate: an in-memory [`loopback`] device
//! for tests, and a Linux raw-socket bundle under [`sys`] behind the `sys` feature.
//!
//! [`Device`]: trait.Device.html
//! [`loopback`]: loopback/index.html
//! [`sys`]: sys/index.html
#[cfg(any(feature = "std", test))]
pub mod loopback;

#[cfg(feature = "sys")]
#[path="sys/mod.rs"]
mod sys_internal;

#[cfg(feature = "sys")]
pub use self::sys_internal::exports as sys;

use core::fmt;

use crate::layer::Result;

/// Identifies one of the router's interfaces by its small integer id.
pub type InterfaceId = u16;

/// The frame buffer capacity: an Ethernet II header plus the common 1500 octet MTU.
pub const MAX_FRAME_LEN: usize = 1514;

/// One Ethernet frame together with its interface tag.
///
/// The buffer has fixed capacity and lives wherever the caller puts it; the engine never
/// allocates one. An inbound frame carries the id of the interface it arrived on and the number
/// of octets the device filled in. The engine reads headers from the full buffer at fixed
/// offsets, so the capacity, not the received length, bounds its accesses.
///
/// No frame outlives the processing of a single inbound packet.
pub struct Frame {
    payload: [u8; MAX_FRAME_LEN],
    length: usize,
    interface: InterfaceId,
}

impl Frame {
    /// A fresh frame: zeroed buffer, zero length, interface 0.
    pub fn new() -> Self {
        Frame {
            payload: [0; MAX_FRAME_LEN],
            length: 0,
            interface: 0,
        }
    }

    /// The whole buffer, not bounded by the frame length.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The whole buffer, mutably.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.payload
    }

    /// The valid octets of the frame.
    pub fn as_slice(&self) -> &[u8] {
        &self.payload[..self.length]
    }

    /// The number of valid octets.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether no octets are valid.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Set the number of valid octets.
    ///
    /// # Panics
    /// When `length` exceeds the buffer capacity.
    pub fn set_len(&mut self, length: usize) {
        assert!(length <= MAX_FRAME_LEN);
        self.length = length;
    }

    /// The interface this frame was received on or is destined for.
    pub fn interface(&self) -> InterfaceId {
        self.interface
    }

    /// Tag the frame with an interface id.
    pub fn set_interface(&mut self, interface: InterfaceId) {
        self.interface = interface;
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::new()
    }
}

impl Clone for Frame {
    fn clone(&self) -> Self {
        Frame {
            payload: self.payload,
            length: self.length,
            interface: self.interface,
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Frame")
            .field("length", &self.length)
            .field("interface", &self.interface)
            .finish()
    }
}

/// A layer 2 device owning the router's interfaces.
///
/// The engine drives exactly one device, single threaded: a blocking receive, then processing
/// to completion, then possibly one transmit, then the next receive.
pub trait Device {
    /// Block until a frame arrives on any interface.
    ///
    /// Fills the buffer, sets the frame length and tags the frame with its ingress interface.
    fn receive(&mut self, frame: &mut Frame) -> Result<()>;

    /// Transmit one frame on the given interface.
    ///
    /// Fire-and-forget: a returned `Ok` means the device accepted the octets, not that anyone
    /// received them. There is no retry and no delivery confirmation.
    fn transmit(&mut self, interface: InterfaceId, data: &[u8]) -> Result<()>;
}

impl<D: Device + ?Sized> Device for &'_ mut D {
    fn receive(&mut self, frame: &mut Frame) -> Result<()> {
        (**self).receive(frame)
    }

    fn transmit(&mut self, interface: InterfaceId, data: &[u8]) -> Result<()> {
        (**self).transmit(interface, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_length_accounting() {
        let mut frame = Frame::new();
        assert!(frame.is_empty());
        assert_eq!(frame.payload().len(), MAX_FRAME_LEN);

        frame.set_len(42);
        assert_eq!(frame.len(), 42);
        assert_eq!(frame.as_slice().len(), 42);
    }

    #[test]
    #[should_panic]
    fn oversized_length_rejected() {
        let mut frame = Frame::new();
        frame.set_len(MAX_FRAME_LEN + 1);
    }
}
