use crate::query::Contact;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

/// A free-list of scratch buffers, meant to be owned by a single worker thread.
///
/// Buffers are handed out through [`ScratchBuffer`] guards and go back to the pool, cleared
/// but with their capacity intact, when the guard is dropped. After a few queries, acquiring
/// a buffer no longer allocates.
#[derive(Default, Debug)]
pub struct ScratchPool {
    contacts: Vec<Vec<Contact>>,
}

impl ScratchPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires an empty contact buffer.
    pub fn contacts(&mut self) -> ScratchBuffer<'_, Contact> {
        let buffer = self.contacts.pop().unwrap_or_default();
        ScratchBuffer {
            buffer,
            free: &mut self.contacts,
        }
    }

    /// The number of contact buffers currently available without allocation.
    pub fn num_free_contact_buffers(&self) -> usize {
        self.contacts.len()
    }
}

/// A buffer borrowed from a [`ScratchPool`], returned to it on drop.
#[derive(Debug)]
pub struct ScratchBuffer<'a, T> {
    buffer: Vec<T>,
    free: &'a mut Vec<Vec<T>>,
}

impl<T> Deref for ScratchBuffer<'_, T> {
    type Target = Vec<T>;

    #[inline]
    fn deref(&self) -> &Vec<T> {
        &self.buffer
    }
}

impl<T> DerefMut for ScratchBuffer<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.buffer
    }
}

impl<T> Drop for ScratchBuffer<'_, T> {
    fn drop(&mut self) {
        let mut buffer = core::mem::take(&mut self.buffer);
        buffer.clear();
        self.free.push(buffer);
    }
}
