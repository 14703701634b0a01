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

use crate::position::Chess;

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the final
/// position. Useful for comparing, testing and debugging move generation
/// correctness and performance.
///
/// # Examples
///
/// ```
/// use rochade::{perft, Chess};
///
/// let pos = Chess::default();
/// assert_eq!(perft(&pos, 1), 20);
/// assert_eq!(perft(&pos, 2), 400);
/// assert_eq!(perft(&pos, 3), 8902);
/// ```
pub fn perft(pos: &Chess, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = pos.legal_moves();

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|m| perft(&pos.play_unchecked(m), depth - 1))
                .sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn test_perft_zero() {
        assert_eq!(perft(&Chess::default(), 0), 1);
    }

    #[test]
    fn test_perft_en_passant_pin() {
        // The en passant capture would expose the king on the fifth rank.
        let pos = "8/8/8/K1pP3r/8/8/8/7k w - c6 0 2"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position();
        assert!(!pos.legal_moves().iter().any(|m| m.is_en_passant()));
        assert_eq!(perft(&pos, 1), 5);
    }
}
