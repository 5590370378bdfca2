//! Storage that works with and without an allocator.
//!
//! The routing table, the ARP table and the interface address list all live in a [`Slice`]: a
//! caller with `std` hands in a `Vec`, an embedded caller hands in a borrowed buffer, and either
//! way the tables themselves never allocate or resize after construction.
//!
//! [`Slice`]: enum.Slice.html
use core::ops;
use core::slice;

/// A list of mutable objects.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slice<'a, T: 'a> {
    /// A single inline instance.
    ///
    /// Great when a static lifetime is required but no dynamic allocation should take place. It
    /// should be obvious that the slice managed by this has length one.
    One(T),

    /// An allocated list of objects.
    #[cfg(feature = "std")]
    Many(Vec<T>),

    /// A list of objects living in borrowed memory.
    ///
    /// Best used when allocation is to be avoided at all costs but a dynamic length is required.
    Borrowed(&'a mut [T]),
}

impl<'a, T: 'a> Slice<'a, T> {
    /// View the contained objects as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Slice::One(t) => slice::from_ref(t),
            #[cfg(feature = "std")]
            Slice::Many(vec) => vec.as_slice(),
            Slice::Borrowed(slice) => slice,
        }
    }

    /// View the contained objects as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Slice::One(t) => slice::from_mut(t),
            #[cfg(feature = "std")]
            Slice::Many(vec) => vec.as_mut_slice(),
            Slice::Borrowed(slice) => slice,
        }
    }
}

impl<T> From<T> for Slice<'_, T> {
    fn from(t: T) -> Self {
        Slice::One(t)
    }
}

impl<T> From<Option<T>> for Slice<'_, T> {
    fn from(t: Option<T>) -> Self {
        match t {
            None => Slice::Borrowed(<&mut [T]>::default()),
            Some(t) => Slice::One(t),
        }
    }
}

#[cfg(feature = "std")]
impl<T> From<Vec<T>> for Slice<'_, T> {
    fn from(t: Vec<T>) -> Self {
        Slice::Many(t)
    }
}

impl<'a, T> From<&'a mut [T]> for Slice<'a, T> {
    fn from(t: &'a mut [T]) -> Self {
        Slice::Borrowed(t)
    }
}

impl<T> ops::Deref for Slice<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> ops::DerefMut for Slice<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::Slice;

    #[test]
    fn one() {
        let mut slice = Slice::One(4usize);
        assert_eq!(slice.as_slice(), &[4]);
        slice[0] = 5;
        assert_eq!(slice.as_slice(), &[5]);
    }

    #[test]
    fn borrowed() {
        let mut backing = [1u8, 2, 3];
        let slice: Slice<u8> = Slice::from(&mut backing[..]);
        assert_eq!(slice.len(), 3);
        assert_eq!(&slice[1..], &[2, 3]);
    }

    #[test]
    fn many() {
        let slice: Slice<u8> = Slice::from(vec![1u8, 2]);
        assert_eq!(slice.as_slice(), &[1, 2]);
    }

    #[test]
    fn empty_from_none() {
        let slice = Slice::<u8>::from(None);
        assert!(slice.is_empty());
    }
}
