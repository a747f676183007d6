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

//! A fixed-width bitset identifying which components an entity has.
//!
//! Generalizes the word-blocked bitset the engine already uses for domain
//! membership (`DomainBitset` in the data crate) to a general-purpose
//! signature: one bit per registered component type, word-blocked so the
//! coordinator can grow the bit space as new component types register
//! without invalidating existing signatures.

/// A bitset over registered component type ids.
///
/// Two signatures are compared with [`Signature::matches`] to implement the
/// system/group membership test of §4.1: a system's required signature
/// `matches` an entity's signature if every required bit is set and every
/// excluded bit is clear.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Signature {
    bits: Vec<u64>,
}

impl Signature {
    /// An empty signature (no bits set).
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    #[inline]
    fn ensure_capacity(&mut self, word: usize) {
        if word >= self.bits.len() {
            self.bits.resize(word + 1, 0);
        }
    }

    /// Sets the bit for component type id `bit`.
    pub fn set(&mut self, bit: u32) {
        let word = (bit / 64) as usize;
        self.ensure_capacity(word);
        self.bits[word] |= 1u64 << (bit % 64);
    }

    /// Clears the bit for component type id `bit`.
    pub fn clear(&mut self, bit: u32) {
        let word = (bit / 64) as usize;
        if word < self.bits.len() {
            self.bits[word] &= !(1u64 << (bit % 64));
        }
    }

    /// Returns whether bit `bit` is set.
    pub fn get(&self, bit: u32) -> bool {
        let word = (bit / 64) as usize;
        self.bits
            .get(word)
            .map(|w| (w & (1u64 << (bit % 64))) != 0)
            .unwrap_or(false)
    }

    /// Returns `true` iff `self` has every bit set in `required` and none of
    /// the bits set in `excluded`.
    pub fn matches(&self, required: &Signature, excluded: &Signature) -> bool {
        let len = required.bits.len().max(excluded.bits.len());
        for i in 0..len {
            let mine = self.bits.get(i).copied().unwrap_or(0);
            let req = required.bits.get(i).copied().unwrap_or(0);
            let exc = excluded.bits.get(i).copied().unwrap_or(0);
            if (mine & req) != req || (mine & exc) != 0 {
                return false;
            }
        }
        true
    }

    /// Returns `true` if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear_round_trip() {
        let mut sig = Signature::new();
        sig.set(3);
        sig.set(70);
        assert!(sig.get(3));
        assert!(sig.get(70));
        sig.clear(3);
        assert!(!sig.get(3));
        assert!(sig.get(70));
    }

    #[test]
    fn matches_respects_required_and_excluded() {
        let mut entity = Signature::new();
        entity.set(0);
        entity.set(2);

        let mut required = Signature::new();
        required.set(0);

        let mut excluded = Signature::new();
        excluded.set(1);

        assert!(entity.matches(&required, &excluded));

        excluded.set(2);
        assert!(!entity.matches(&required, &excluded));
    }

    #[test]
    fn missing_required_bit_fails_match() {
        let entity = Signature::new();
        let mut required = Signature::new();
        required.set(5);
        assert!(!entity.matches(&required, &Signature::new()));
    }
}
