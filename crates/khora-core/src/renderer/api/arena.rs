// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Arena storage and reference-counted handles for GPU resources.
//!
//! Shaders, vertex arrays, textures and framebuffers are "owned by a
//! reference count; destroyed when the last reference drops, which releases
//! the backend object" (§3). A [`ResourceArena`] is the backend-side table a
//! `GraphicsDevice` indexes by raw slot; the [`Handle`] it hands back to
//! callers is a cheap `Clone`, and drops the slot's backend object exactly
//! once, when the last clone is dropped.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A slot-indexed store of backend resources of type `T`.
///
/// Freed slots are recycled via a free list so handle indices stay dense.
pub struct ResourceArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
}

impl<T> ResourceArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Inserts `value`, returning the slot index it occupies.
    pub fn insert(&mut self, value: T) -> u32 {
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(value);
            index
        } else {
            self.slots.push(Some(value));
            (self.slots.len() - 1) as u32
        }
    }

    /// Removes and returns the value at `index`, if any.
    pub fn remove(&mut self, index: u32) -> Option<T> {
        let slot = self.slots.get_mut(index as usize)?;
        let value = slot.take();
        if value.is_some() {
            self.free.push(index);
        }
        value
    }

    /// Returns a reference to the value at `index`.
    pub fn get(&self, index: u32) -> Option<&T> {
        self.slots.get(index as usize).and_then(|s| s.as_ref())
    }

    /// Returns a mutable reference to the value at `index`.
    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.slots.get_mut(index as usize).and_then(|s| s.as_mut())
    }
}

impl<T> Default for ResourceArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

type ReleaseFn = dyn FnOnce(u32) + Send;

struct HandleInner {
    id: u32,
    release: Mutex<Option<Box<ReleaseFn>>>,
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        if let Some(release) = self.release.lock().unwrap().take() {
            release(self.id);
        }
    }
}

/// A reference-counted handle to a slot in some backend's [`ResourceArena`].
///
/// `Clone` is a refcount increment; the `release` closure supplied at
/// construction runs exactly once, when the last clone drops. The type
/// parameter `T` only disambiguates handles to different resource kinds at
/// the type level; no `T` is stored.
pub struct Handle<T> {
    inner: Arc<HandleInner>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Wraps arena slot `id`, calling `release(id)` when the last clone of
    /// this handle is dropped.
    pub fn new(id: u32, release: impl FnOnce(u32) + Send + 'static) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id,
                release: Mutex::new(Some(Box::new(release))),
            }),
            _marker: std::marker::PhantomData,
        }
    }

    /// The arena slot this handle references.
    #[inline]
    pub fn id(&self) -> u32 {
        self.inner.id
    }

    /// The number of live clones of this handle, including `self`.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.id() == other.id()
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle").field("id", &self.id()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Dummy;

    #[test]
    fn arena_reuses_freed_slots() {
        let mut arena: ResourceArena<u32> = ResourceArena::new();
        let a = arena.insert(10);
        let b = arena.insert(20);
        arena.remove(a);
        let c = arena.insert(30);
        assert_eq!(c, a);
        assert_eq!(arena.get(b), Some(&20));
    }

    #[test]
    fn handle_releases_on_last_drop() {
        let released: Arc<AtomicU32> = Arc::new(AtomicU32::new(u32::MAX));
        let released_clone = Arc::clone(&released);
        let handle: Handle<Dummy> = Handle::new(7, move |id| {
            released_clone.store(id, Ordering::SeqCst);
        });
        let second = handle.clone();
        assert_eq!(handle.ref_count(), 2);
        drop(handle);
        assert_eq!(released.load(Ordering::SeqCst), u32::MAX);
        drop(second);
        assert_eq!(released.load(Ordering::SeqCst), 7);
    }
}
