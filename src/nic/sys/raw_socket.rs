// Copyright (C) 2016 whitequark@whitequark.org
// Copyright (C) 2019 Andreas Molzer <andreas.molzer@tum.de>
//
// in large parts from `smoltcp` originally distributed under 0-clause BSD
use core::mem;
use std::os::unix::io::{RawFd, AsRawFd};

use libc;
use super::{ifreq, linux, wait, Errno, FdResult, LibcResult, IoLenResult};
use super::linux::IfIndex;

use crate::layer;
use crate::nic::{Device, Frame, InterfaceId};
use crate::wire::Ipv4Address;

/// A static descriptor for interacting with a raw socket.
///
/// Contains the file descriptor and a pre-filled `ifreq` structure with the interface name that
/// is required for `ioctl` calls. This offers the raw methods for reading and writing but does
/// not encapsulate an actual `nic::Device`. A [`Bundle`] collects one of these per router
/// interface.
///
/// [`Bundle`]: struct.Bundle.html
#[derive(Debug)]
pub struct InterfaceDesc {
    lower: libc::c_int,
    ifreq: ifreq,
}

/// One bound raw socket per router interface, usable as a network device.
///
/// Descriptors are held in interface id order, so the id of an inbound frame is the position of
/// the socket it was read from. Uses the errno principle for storing the last underlying error
/// on a failed operation.
///
/// `receive` blocks in `select` across all descriptors; `transmit` writes to the descriptor of
/// the given id and reports nothing beyond acceptance by the OS.
#[derive(Debug)]
pub struct Bundle {
    interfaces: Vec<InterfaceDesc>,
    addresses: Vec<Ipv4Address>,
    last_err: Option<Errno>,
}

impl AsRawFd for InterfaceDesc {
    fn as_raw_fd(&self) -> RawFd {
        self.lower
    }
}

impl InterfaceDesc {
    /// Try to open a socket for the named interface.
    ///
    /// Note that this does *not* yet bind the interface to the socket, it only creates the
    /// necessary structures involved in doing so. Call [`bind_interface`] afterwards.
    ///
    /// [`bind_interface`]: #method.bind_interface
    pub fn new(name: &str) -> Result<InterfaceDesc, Errno> {
        let lower = unsafe {
            libc::socket(
                libc::AF_PACKET,
                libc::SOCK_RAW | libc::SOCK_NONBLOCK,
                linux::ETH_P_ALL.to_be() as i32)
        };

        FdResult(lower).errno()?;

        Ok(InterfaceDesc {
            lower,
            ifreq: ifreq::new(name),
        })
    }

    /// Bind the file descriptor to the named interface.
    ///
    /// See `bind` with `AF_PACKET` and `ETH_P_ALL` for errors and a discussion of platform
    /// requirements and checks.
    pub fn bind_interface(&mut self) -> Result<(), Errno> {
        let sockaddr = libc::sockaddr_ll {
            sll_family:   libc::AF_PACKET as u16,
            sll_protocol: linux::ETH_P_ALL.to_be() as u16,
            sll_ifindex:  self.ifreq.get_if_index(self.lower)?,
            sll_hatype:   1,
            sll_pkttype:  0,
            sll_halen:    6,
            sll_addr:     [0; 8],
        };

        let res = unsafe {
            libc::bind(
                self.lower,
                &sockaddr as *const libc::sockaddr_ll as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_ll>() as u32)
        };

        FdResult(res).errno()
    }

    /// Receive a single frame into the buffer.
    ///
    /// Note that the socket will have been opened with `O_NONBLOCK` so that this only returns an
    /// `Ok` when a buffer is ready.
    pub fn recv(&mut self, buffer: &mut [u8]) -> Result<usize, Errno> {
        let len = unsafe {
            libc::recv(
                self.lower,
                buffer.as_mut_ptr() as *mut libc::c_void,
                buffer.len(),
                0)
        };
        IoLenResult(len).errno()?;
        Ok(len as usize)
    }

    /// Send a single frame from a buffer.
    pub fn send(&mut self, buffer: &[u8]) -> Result<usize, Errno> {
        let len = unsafe {
            libc::send(
                self.lower,
                buffer.as_ptr() as *const libc::c_void,
                buffer.len(),
                0)
        };
        IoLenResult(len).errno()?;
        Ok(len as usize)
    }
}

impl Drop for InterfaceDesc {
    fn drop(&mut self) {
        unsafe { libc::close(self.lower); }
    }
}

impl Bundle {
    /// Open and bind one raw socket per named interface.
    ///
    /// Interface ids follow iteration order: the first interface becomes id 0 and so on. Each
    /// interface comes with its configured IPv4 address, kept for the engine's self-address
    /// check.
    pub fn open<'a, I>(interfaces: I) -> Result<Bundle, Errno>
        where I: IntoIterator<Item = (&'a str, Ipv4Address)>
    {
        let mut opened = Vec::new();
        let mut addresses = Vec::new();

        for (name, address) in interfaces {
            let mut desc = InterfaceDesc::new(name)?;
            desc.bind_interface()?;
            opened.push(desc);
            addresses.push(address);
        }

        Ok(Bundle {
            interfaces: opened,
            addresses,
            last_err: None,
        })
    }

    /// The configured address of each interface, indexed by interface id.
    pub fn addresses(&self) -> &[Ipv4Address] {
        &self.addresses
    }

    /// Take the last io error returned by the OS.
    pub fn last_err(&mut self) -> Option<Errno> {
        self.last_err.take()
    }

    fn store_err(&mut self, err: Errno) -> layer::Error {
        self.last_err = Some(err);
        layer::Error::Illegal
    }
}

impl Device for Bundle {
    fn receive(&mut self, frame: &mut Frame) -> layer::Result<()> {
        loop {
            let fds: Vec<RawFd> = self.interfaces.iter()
                .map(AsRawFd::as_raw_fd)
                .collect();

            let ready = match wait(&fds) {
                Ok(index) => index,
                Err(err) => return Err(self.store_err(err)),
            };

            match self.interfaces[ready].recv(frame.payload_mut()) {
                Ok(length) => {
                    frame.set_len(length);
                    frame.set_interface(ready as InterfaceId);
                    return Ok(());
                },
                // Someone else drained the socket between select and recv; wait again.
                Err(ref err) if err.0 == libc::EWOULDBLOCK => continue,
                Err(err) => return Err(self.store_err(err)),
            }
        }
    }

    fn transmit(&mut self, interface: InterfaceId, data: &[u8]) -> layer::Result<()> {
        let desc = match self.interfaces.get_mut(usize::from(interface)) {
            Some(desc) => desc,
            None => return Err(layer::Error::Illegal),
        };

        match desc.send(data) {
            Ok(_) => Ok(()),
            Err(err) => Err(self.store_err(err)),
        }
    }
}
