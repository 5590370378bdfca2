//! An in-memory device for tests and examples.
use std::collections::VecDeque;

use crate::layer::{Error, Result};
use super::{Device, Frame, InterfaceId};

/// A software device backed by in-memory queues.
///
/// Inbound frames are queued by hand with [`enqueue`] and handed out by `receive` in order;
/// every transmitted frame is recorded together with its egress interface. Nothing ever leaves
/// the process.
///
/// [`enqueue`]: #method.enqueue
#[derive(Debug, Default)]
pub struct Loopback {
    inbound: VecDeque<Frame>,
    transmitted: Vec<(InterfaceId, Vec<u8>)>,
}

impl Loopback {
    /// A device with no queued frames.
    pub fn new() -> Self {
        Loopback::default()
    }

    /// Queue a frame to be handed out by a later `receive`.
    pub fn enqueue(&mut self, frame: Frame) {
        self.inbound.push_back(frame);
    }

    /// The frames transmitted so far, oldest first.
    pub fn transmitted(&self) -> &[(InterfaceId, Vec<u8>)] {
        &self.transmitted
    }
}

impl Device for Loopback {
    /// Pop the next queued frame.
    ///
    /// An empty queue is an error: the hardware counterpart would block forever and a test
    /// should notice that rather than hang.
    fn receive(&mut self, frame: &mut Frame) -> Result<()> {
        match self.inbound.pop_front() {
            Some(next) => {
                *frame = next;
                Ok(())
            },
            None => Err(Error::Illegal),
        }
    }

    fn transmit(&mut self, interface: InterfaceId, data: &[u8]) -> Result<()> {
        self.transmitted.push((interface, data.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_and_record() {
        let mut device = Loopback::new();

        let mut queued = Frame::new();
        queued.set_len(3);
        queued.set_interface(1);
        queued.payload_mut()[..3].copy_from_slice(&[1, 2, 3]);
        device.enqueue(queued);

        let mut frame = Frame::new();
        device.receive(&mut frame).unwrap();
        assert_eq!(frame.interface(), 1);
        assert_eq!(frame.as_slice(), &[1, 2, 3]);

        device.transmit(2, frame.as_slice()).unwrap();
        assert_eq!(device.transmitted(), &[(2, vec![1, 2, 3])]);

        assert_eq!(device.receive(&mut frame), Err(Error::Illegal));
    }
}
