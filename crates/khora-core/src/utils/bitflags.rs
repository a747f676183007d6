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

//! A small, local bitflags macro.
//!
//! The renderer API needs a handful of simple bitmask types (buffer usage,
//! draw-command filters, required-attribute sets). Rather than pull in the
//! `bitflags` crate for a handful of constants, this macro generates the same
//! shape the engine has always used: a newtype wrapping the backing integer
//! with `|`/`&`/`contains` operators.

/// Declares a bitflag-style newtype.
///
/// ```
/// khora_core::khora_bitflags! {
///     pub struct Example: u32 {
///         const A = 1 << 0;
///         const B = 1 << 1;
///     }
/// }
/// let both = Example::A | Example::B;
/// assert!(both.contains(Example::A));
/// ```
#[macro_export]
macro_rules! khora_bitflags {
    (
        $(#[$outer:meta])*
        $vis:vis struct $name:ident: $ty:ty {
            $(
                $(#[$inner:meta])*
                const $flag:ident = $value:expr;
            )*
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name {
            bits: $ty,
        }

        impl $name {
            $(
                $(#[$inner])*
                pub const $flag: Self = Self { bits: $value };
            )*

            /// The empty set of flags.
            pub const NONE: Self = Self { bits: 0 };

            /// Builds a flag set from raw bits.
            #[inline]
            pub const fn from_bits_truncate(bits: $ty) -> Self {
                Self { bits }
            }

            /// Returns the raw bits backing this flag set.
            #[inline]
            pub const fn bits(self) -> $ty {
                self.bits
            }

            /// Returns `true` if `self` contains every bit set in `other`.
            #[inline]
            pub const fn contains(self, other: Self) -> bool {
                (self.bits & other.bits) == other.bits
            }

            /// Returns `true` if `self` shares at least one set bit with `other`.
            #[inline]
            pub const fn intersects(self, other: Self) -> bool {
                (self.bits & other.bits) != 0
            }

            /// Returns `true` if no bits are set.
            #[inline]
            pub const fn is_empty(self) -> bool {
                self.bits == 0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            #[inline]
            fn bitor(self, rhs: Self) -> Self {
                Self { bits: self.bits | rhs.bits }
            }
        }

        impl std::ops::BitOrAssign for $name {
            #[inline]
            fn bitor_assign(&mut self, rhs: Self) {
                self.bits |= rhs.bits;
            }
        }

        impl std::ops::BitAnd for $name {
            type Output = Self;
            #[inline]
            fn bitand(self, rhs: Self) -> Self {
                Self { bits: self.bits & rhs.bits }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::khora_bitflags! {
        /// Test-only flag set.
        pub struct Flags: u32 {
            const A = 1 << 0;
            const B = 1 << 1;
            const C = 1 << 2;
        }
    }

    #[test]
    fn union_contains_each_member() {
        let combined = Flags::A | Flags::B;
        assert!(combined.contains(Flags::A));
        assert!(combined.contains(Flags::B));
        assert!(!combined.contains(Flags::C));
    }

    #[test]
    fn intersects_detects_overlap() {
        let lhs = Flags::A | Flags::B;
        let rhs = Flags::B | Flags::C;
        assert!(lhs.intersects(rhs));
        assert!(!lhs.intersects(Flags::C & Flags::A));
    }

    #[test]
    fn empty_has_no_bits() {
        assert!(Flags::NONE.is_empty());
        assert!(!Flags::A.is_empty());
    }
}
