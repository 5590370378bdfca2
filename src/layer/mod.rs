//! The process logic above the wire representation.
//!
//! The `wire` module interprets single headers in place; this module holds the state that spans
//! packets. That state is small and fixed: the routing table, the neighbor table, and the list
//! of the router's own addresses. All of it is built before the processing loop starts and only
//! borrowed immutably afterwards, similar to reconfiguration on the OS level with utilities such
//! as `route` and `arp` happening strictly while no forwarding takes place.
//!
//! [`fwd`] consumes the two tables per packet. Every inbound frame runs to completion through
//! its state machine and ends in exactly one terminal [`Disposition`]; nothing is buffered,
//! retried or carried over into the next iteration.
//!
//! [`fwd`]: fwd/index.html
//! [`Disposition`]: fwd/enum.Disposition.html

pub mod arp;
pub mod fwd;
pub mod route;

/// The result type for engine and device operations.
pub type Result<T> = core::result::Result<T, Error>;

/// The error type of engine and device operations.
///
/// Per-packet outcomes such as a failed checksum or a missing route are not errors but
/// [`Disposition`] variants; an `Error` means the device itself rejected an operation.
///
/// [`Disposition`]: fwd/enum.Disposition.html
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The operation was not permitted.
    ///
    /// Returned when the device does not allow or implement an operation, for example
    /// transmitting on an interface id that was never configured, or when the underlying OS
    /// call failed.
    Illegal,

    /// Not enough space for the requested packet.
    BadSize,
}

/// Can convert from a wire error.
///
/// This indicates some layer tried to operate on a packet but failed.
impl From<crate::wire::Error> for Error {
    fn from(_: crate::wire::Error) -> Self {
        Error::Illegal
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::Illegal => write!(f, "illegal operation"),
            Error::BadSize => write!(f, "bad packet size"),
        }
    }
}
