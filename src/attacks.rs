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

//! Attack detection on a [`Board`].
//!
//! # Examples
//!
//! ```
//! use rochade::{attacks, Board, Color, Square};
//!
//! let board = Board::new();
//! assert!(attacks::is_attacked(&board, Square::F3, Color::White));
//! assert!(!attacks::is_attacked(&board, Square::E4, Color::White));
//! ```

use std::iter;

use crate::{board::Board, color::Color, role::Role, square::Square};

pub(crate) const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub(crate) const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub(crate) const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Squares reached by walking from `from` in the given direction, excluding
/// `from` itself, until the edge of the board.
pub fn ray(from: Square, (files, ranks): (i32, i32)) -> impl Iterator<Item = Square> {
    iter::successors(from.offset(files, ranks), move |sq| sq.offset(files, ranks))
}

/// The first occupied square on a ray, if any.
fn first_blocker(board: &Board, from: Square, direction: (i32, i32)) -> Option<Square> {
    ray(from, direction).find(|&sq| board.is_occupied(sq))
}

/// Tests if any piece of color `by` attacks `target`.
///
/// Pawns attack diagonally forward, knights and kings by their offsets,
/// sliders along rays until the first occupied square. The contents of
/// `target` itself do not matter.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    let attacker = |sq: Square, roles: &[Role]| {
        board
            .piece_at(sq)
            .is_some_and(|piece| piece.color == by && roles.contains(&piece.role))
    };

    // A pawn of color `by` attacks from one rank behind, relative to its
    // direction of travel.
    let behind = -by.pawn_direction();
    if [-1, 1]
        .into_iter()
        .filter_map(|files| target.offset(files, behind))
        .any(|sq| attacker(sq, &[Role::Pawn]))
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .into_iter()
        .filter_map(|(files, ranks)| target.offset(files, ranks))
        .any(|sq| attacker(sq, &[Role::Knight]))
    {
        return true;
    }

    if KING_OFFSETS
        .into_iter()
        .filter_map(|(files, ranks)| target.offset(files, ranks))
        .any(|sq| attacker(sq, &[Role::King]))
    {
        return true;
    }

    ROOK_DIRECTIONS
        .into_iter()
        .filter_map(|direction| first_blocker(board, target, direction))
        .any(|sq| attacker(sq, &[Role::Rook, Role::Queen]))
        || BISHOP_DIRECTIONS
            .into_iter()
            .filter_map(|direction| first_blocker(board, target, direction))
            .any(|sq| attacker(sq, &[Role::Bishop, Role::Queen]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_ascii_board_fen(fen.as_bytes()).expect("valid board fen")
    }

    #[test]
    fn test_ray() {
        let squares: Vec<_> = ray(Square::F6, (1, 1)).collect();
        assert_eq!(squares, [Square::G7, Square::H8]);
        assert_eq!(ray(Square::A1, (-1, 0)).count(), 0);
        assert_eq!(ray(Square::A1, (0, 1)).count(), 7);
    }

    #[test]
    fn test_pawn_attacks() {
        let board = board("8/8/8/3p4/4P3/8/8/8");
        assert!(is_attacked(&board, Square::D5, Color::White));
        assert!(is_attacked(&board, Square::F5, Color::White));
        assert!(!is_attacked(&board, Square::E5, Color::White));
        assert!(!is_attacked(&board, Square::D3, Color::White));
        assert!(is_attacked(&board, Square::E4, Color::Black));
        assert!(is_attacked(&board, Square::C4, Color::Black));
        assert!(!is_attacked(&board, Square::D6, Color::Black));
    }

    #[test]
    fn test_knight_and_king_attacks() {
        let board = board("8/8/8/8/8/8/8/NK6");
        assert!(is_attacked(&board, Square::B3, Color::White));
        assert!(is_attacked(&board, Square::C2, Color::White));
        assert!(is_attacked(&board, Square::A2, Color::White));
        assert!(!is_attacked(&board, Square::D3, Color::White));
        assert!(!is_attacked(&board, Square::B3, Color::Black));
    }

    #[test]
    fn test_slider_attacks_stop_at_blockers() {
        let board = board("8/8/8/8/R2p3q/8/8/8");
        assert!(is_attacked(&board, Square::D4, Color::White));
        assert!(!is_attacked(&board, Square::E4, Color::White));
        assert!(is_attacked(&board, Square::A8, Color::White));
        assert!(is_attacked(&board, Square::E4, Color::Black));
        assert!(is_attacked(&board, Square::D8, Color::Black));
        assert!(is_attacked(&board, Square::E1, Color::Black));
        assert!(!is_attacked(&board, Square::C4, Color::Black));
    }

    #[test]
    fn test_bishop_attacks() {
        let blocked = board("8/8/8/8/8/8/1p6/B7");
        assert!(!is_attacked(&blocked, Square::C3, Color::White));
        assert!(is_attacked(&blocked, Square::B2, Color::White));
        let open = board("7b/8/8/8/8/8/8/8");
        assert!(is_attacked(&open, Square::A1, Color::Black));
        assert!(!is_attacked(&open, Square::H1, Color::Black));
    }
}
