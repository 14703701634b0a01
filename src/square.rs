// This file is part of the rochade library.
// Copyright (C) 2026 The rochade developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{error::Error, fmt, num, str::FromStr};

use crate::util::out_of_range_error;

/// A file of the chessboard.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn from_char(ch: char) -> Option<File> {
        match ch {
            'a'..='h' => Some(File::ALL[(ch as u8 - b'a') as usize]),
            _ => None,
        }
    }

    pub const fn char(self) -> char {
        (b'a' + self as u8) as char
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self as usize
    }

    /// Moves `delta` files towards the h-file, if still on the board.
    #[inline]
    pub const fn offset(self, delta: i32) -> Option<File> {
        let index = self as i32 + delta;
        if 0 <= index && index < 8 {
            Some(File::ALL[index as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn distance(self, other: File) -> u32 {
        (self as i32 - other as i32).unsigned_abs()
    }

    /// `A`, ..., `H`.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

/// A rank of the chessboard.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    First = 0,
    Second = 1,
    Third = 2,
    Fourth = 3,
    Fifth = 4,
    Sixth = 5,
    Seventh = 6,
    Eighth = 7,
}

impl Rank {
    pub const fn from_char(ch: char) -> Option<Rank> {
        match ch {
            '1'..='8' => Some(Rank::ALL[(ch as u8 - b'1') as usize]),
            _ => None,
        }
    }

    pub const fn char(self) -> char {
        (b'1' + self as u8) as char
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self as usize
    }

    /// Moves `delta` ranks towards the eighth rank, if still on the board.
    #[inline]
    pub const fn offset(self, delta: i32) -> Option<Rank> {
        let index = self as i32 + delta;
        if 0 <= index && index < 8 {
            Some(Rank::ALL[index as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn distance(self, other: Rank) -> u32 {
        (self as i32 - other as i32).unsigned_abs()
    }

    #[must_use]
    #[inline]
    pub const fn flip_vertical(self) -> Rank {
        Rank::ALL[7 - self as usize]
    }

    /// `First`, ..., `Eighth`.
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

macro_rules! try_from_int_impl {
    ($type:ty, $($t:ty)+) => {
        $(impl TryFrom<$t> for $type {
            type Error = num::TryFromIntError;

            #[inline]
            fn try_from(value: $t) -> Result<$type, Self::Error> {
                let index = usize::try_from(value)?;
                <$type>::ALL.get(index).copied().ok_or_else(out_of_range_error)
            }
        })+
    }
}

try_from_int_impl! { File, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }
try_from_int_impl! { Rank, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A square index.
///
/// Squares are numbered from `A1 = 0` to `H8 = 63`, one rank after the
/// other.
///
/// # Examples
///
/// ```
/// use rochade::{File, Rank, Square};
///
/// let sq = Square::from_coords(File::E, Rank::Fourth);
/// assert_eq!(sq, Square::E4);
/// assert_eq!(sq.to_string(), "e4");
/// assert_eq!(sq.offset(1, 2), Some(Square::F6));
/// assert_eq!(Square::H8.offset(1, 0), None);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Gets a `Square` from its index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=63`.
    #[track_caller]
    #[inline]
    pub const fn new(index: u32) -> Square {
        assert!(index < 64);
        Square(index as u8)
    }

    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square(file as u8 | ((rank as u8) << 3))
    }

    /// Parses a square name like `e4`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if the input is not a lowercase file
    /// letter followed by a rank digit.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match *s {
            [file, rank] => match (
                File::from_char(char::from(file)),
                Rank::from_char(char::from(rank)),
            ) {
                (Some(file), Some(rank)) => Ok(Square::from_coords(file, rank)),
                _ => Err(ParseSquareError),
            },
            _ => Err(ParseSquareError),
        }
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 & 7) as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 >> 3) as usize]
    }

    #[inline]
    pub const fn coords(self) -> (File, Rank) {
        (self.file(), self.rank())
    }

    /// The square `files` to the right and `ranks` up (from white's point of
    /// view), or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, files: i32, ranks: i32) -> Option<Square> {
        match (self.file().offset(files), self.rank().offset(ranks)) {
            (Some(file), Some(rank)) => Some(Square::from_coords(file, rank)),
            _ => None,
        }
    }

    /// Chebyshev distance, i.e. the number of king steps between the
    /// squares.
    pub const fn distance(self, other: Square) -> u32 {
        let files = self.file().distance(other.file());
        let ranks = self.rank().distance(other.rank());
        if files > ranks {
            files
        } else {
            ranks
        }
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// All 64 squares in index order.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);
    pub const B2: Square = Square(9);
    pub const C2: Square = Square(10);
    pub const D2: Square = Square(11);
    pub const E2: Square = Square(12);
    pub const F2: Square = Square(13);
    pub const G2: Square = Square(14);
    pub const H2: Square = Square(15);
    pub const A3: Square = Square(16);
    pub const B3: Square = Square(17);
    pub const C3: Square = Square(18);
    pub const D3: Square = Square(19);
    pub const E3: Square = Square(20);
    pub const F3: Square = Square(21);
    pub const G3: Square = Square(22);
    pub const H3: Square = Square(23);
    pub const A4: Square = Square(24);
    pub const B4: Square = Square(25);
    pub const C4: Square = Square(26);
    pub const D4: Square = Square(27);
    pub const E4: Square = Square(28);
    pub const F4: Square = Square(29);
    pub const G4: Square = Square(30);
    pub const H4: Square = Square(31);
    pub const A5: Square = Square(32);
    pub const B5: Square = Square(33);
    pub const C5: Square = Square(34);
    pub const D5: Square = Square(35);
    pub const E5: Square = Square(36);
    pub const F5: Square = Square(37);
    pub const G5: Square = Square(38);
    pub const H5: Square = Square(39);
    pub const A6: Square = Square(40);
    pub const B6: Square = Square(41);
    pub const C6: Square = Square(42);
    pub const D6: Square = Square(43);
    pub const E6: Square = Square(44);
    pub const F6: Square = Square(45);
    pub const G6: Square = Square(46);
    pub const H6: Square = Square(47);
    pub const A7: Square = Square(48);
    pub const B7: Square = Square(49);
    pub const C7: Square = Square(50);
    pub const D7: Square = Square(51);
    pub const E7: Square = Square(52);
    pub const F7: Square = Square(53);
    pub const G7: Square = Square(54);
    pub const H7: Square = Square(55);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl From<Square> for u32 {
    #[inline]
    fn from(sq: Square) -> u32 {
        sq.to_u32()
    }
}

impl From<Square> for usize {
    #[inline]
    fn from(sq: Square) -> usize {
        sq.to_usize()
    }
}

impl TryFrom<u32> for Square {
    type Error = num::TryFromIntError;

    #[inline]
    fn try_from(index: u32) -> Result<Square, Self::Error> {
        if index < 64 {
            Ok(Square(index as u8))
        } else {
            Err(out_of_range_error())
        }
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().char(), self.rank().char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.file().char().to_ascii_uppercase(),
            self.rank().char()
        )
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Square> {
        u.int_in_range::<u8>(0..=63).map(Square)
    }

    #[inline]
    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Square, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Square, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords() {
        for file in File::ALL {
            for rank in Rank::ALL {
                let square = Square::from_coords(file, rank);
                assert_eq!(square.file(), file);
                assert_eq!(square.rank(), rank);
                assert_eq!(square.coords(), (file, rank));
            }
        }
    }

    #[test]
    fn test_distance() {
        assert_eq!(Square::D2.distance(Square::G3), 3);
        assert_eq!(Square::A1.distance(Square::H8), 7);
        assert_eq!(Square::E4.distance(Square::E4), 0);
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::H1.offset(1, 1), None);
        assert_eq!(Square::G1.offset(-1, 2), Some(Square::F3));
    }

    #[test]
    fn test_parse() {
        assert_eq!("a1".parse::<Square>().ok(), Some(Square::A1));
        assert_eq!("h8".parse::<Square>().ok(), Some(Square::H8));
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("A1".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
        assert!("".parse::<Square>().is_err());
    }

    #[test]
    fn test_display() {
        for sq in Square::all() {
            assert_eq!(sq.to_string().parse::<Square>().ok(), Some(sq));
        }
    }
}
