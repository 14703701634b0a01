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

use std::{error::Error, fmt, num::NonZeroU32};

use crate::{
    attacks,
    board::Board,
    castling::{CastlingRights, CastlingSide},
    color::Color,
    m::{Move, MoveList},
    role::Role,
    square::{Rank, Square},
};

/// Error when trying to play an illegal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayError {
    m: Move,
}

impl PlayError {
    /// The move that was rejected.
    pub fn illegal_move(&self) -> Move {
        self.m
    }
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move {}", self.m)
    }
}

impl Error for PlayError {}

/// A standard chess position: the complete state of a game.
///
/// Positions are values. Playing a move never modifies a position in place,
/// it returns the successor, so a clone taken at any point is a snapshot that
/// stays valid.
///
/// # Examples
///
/// ```
/// use rochade::{Chess, Square};
///
/// let pos = Chess::default();
/// assert_eq!(pos.legal_moves().len(), 20);
///
/// let m = pos
///     .legal_moves()
///     .into_iter()
///     .find(|m| m.from() == Square::E2 && m.to() == Square::E4)
///     .expect("e2e4 is legal");
/// let after = pos.play(&m)?;
/// assert_eq!(after.ep_square(), Some(Square::E3));
/// assert_eq!(pos.ep_square(), None);
/// # Ok::<_, rochade::PlayError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Chess {
    board: Board,
    turn: Color,
    castling_rights: CastlingRights,
    ep_square: Option<Square>,
    halfmoves: u32,
    fullmoves: NonZeroU32,
}

impl Default for Chess {
    fn default() -> Chess {
        Chess {
            board: Board::new(),
            turn: Color::White,
            castling_rights: CastlingRights::all(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }
}

impl Chess {
    /// The standard starting position.
    pub fn new() -> Chess {
        Chess::default()
    }

    pub(crate) fn from_parts(
        board: Board,
        turn: Color,
        castling_rights: CastlingRights,
        ep_square: Option<Square>,
        halfmoves: u32,
        fullmoves: NonZeroU32,
    ) -> Chess {
        Chess {
            board,
            turn,
            castling_rights,
            ep_square,
            halfmoves,
            fullmoves,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// The square a pawn skipped with a double step on the previous move.
    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Number of half-moves since the last capture or pawn move.
    #[inline]
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Current move number. Starts at 1 and is increased after every black
    /// move.
    #[inline]
    pub fn fullmoves(&self) -> NonZeroU32 {
        self.fullmoves
    }

    /// Generates all moves that follow the movement rules of the pieces,
    /// without checking whether the own king is left in check.
    ///
    /// Castling is the exception: it is only generated if neither the
    /// king's square, nor the square it passes, nor its destination is
    /// attacked.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();

        for (from, piece) in self.board.pieces() {
            if piece.color != self.turn {
                continue;
            }
            match piece.role {
                Role::Pawn => gen_pawn_moves(self, from, &mut moves),
                Role::Knight => KnightTag::gen_from(self, from, &mut moves),
                Role::Bishop => BishopTag::gen_from(self, from, &mut moves),
                Role::Rook => RookTag::gen_from(self, from, &mut moves),
                Role::Queen => QueenTag::gen_from(self, from, &mut moves),
                Role::King => KingTag::gen_from(self, from, &mut moves),
            }
        }

        for side in CastlingSide::ALL {
            if let Some(m) = self.castling_move(side) {
                moves.push(m);
            }
        }

        moves
    }

    /// Generates legal moves.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = self.pseudo_legal_moves();
        moves.retain(|m| self.is_safe(m));
        moves
    }

    /// Generates legal moves of the given role that land on `to`.
    pub fn san_candidates(&self, role: Role, to: Square) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|m| m.role() == role && m.to() == to);
        moves
    }

    /// Generates the legal castling move on one side, if any.
    pub fn castling_moves(&self, side: CastlingSide) -> MoveList {
        let mut moves = MoveList::new();
        if let Some(m) = self.castling_move(side).filter(|m| self.is_safe(m)) {
            moves.push(m);
        }
        moves
    }

    /// Tests a move for legality.
    pub fn is_legal(&self, m: &Move) -> bool {
        self.legal_moves().contains(m)
    }

    /// Validates and plays a move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if the move is not legal in this position. The
    /// position is not changed either way.
    pub fn play(&self, m: &Move) -> Result<Chess, PlayError> {
        if self.is_legal(m) {
            Ok(self.play_unchecked(m))
        } else {
            Err(PlayError { m: *m })
        }
    }

    /// Plays a move without checking legality. The move should come from
    /// [`Chess::pseudo_legal_moves()`] of this position, otherwise the
    /// result is unspecified.
    #[must_use]
    pub fn play_unchecked(&self, m: &Move) -> Chess {
        let mut pos = self.clone();
        pos.do_move(m);
        pos
    }

    /// Tests if the king of the side to move is attacked.
    pub fn is_check(&self) -> bool {
        self.is_king_attacked(self.turn)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// Tests for the two material configurations treated as dead draws:
    /// bare kings, and a lone bishop or knight besides the kings.
    ///
    /// Other drawn material balances (two knights, same-colored bishops)
    /// are not detected.
    pub fn is_insufficient_material(&self) -> bool {
        match self.board.len() {
            2 => true,
            3 => self
                .board
                .pieces()
                .find(|&(_, piece)| piece.role != Role::King)
                .is_some_and(|(_, piece)| matches!(piece.role, Role::Bishop | Role::Knight)),
            _ => false,
        }
    }

    fn is_king_attacked(&self, color: Color) -> bool {
        self.board
            .king_of(color)
            .is_some_and(|king| attacks::is_attacked(&self.board, king, !color))
    }

    /// Simulates the move and tests that the mover's king is not attacked
    /// afterwards.
    fn is_safe(&self, m: &Move) -> bool {
        !self.play_unchecked(m).is_king_attacked(self.turn)
    }

    fn castling_move(&self, side: CastlingSide) -> Option<Move> {
        let color = self.turn;
        if !self.castling_rights.has(color, side) {
            return None;
        }

        let king = CastlingSide::king_from(color);
        let rook = side.rook_from(color);
        if self.board.piece_at(king) != Some(color.king())
            || self.board.piece_at(rook) != Some(color.rook())
        {
            return None;
        }

        let direction = if side.is_king_side() { (1, 0) } else { (-1, 0) };
        if attacks::ray(king, direction)
            .take_while(|&sq| sq != rook)
            .any(|sq| self.board.is_occupied(sq))
        {
            return None;
        }

        if [king, side.rook_to(color), side.king_to(color)]
            .into_iter()
            .any(|sq| attacks::is_attacked(&self.board, sq, !color))
        {
            return None;
        }

        Some(Move::Castle { king, rook })
    }

    fn do_move(&mut self, m: &Move) {
        let color = self.turn;
        self.ep_square = None;
        self.halfmoves = if m.is_zeroing() {
            0
        } else {
            self.halfmoves.saturating_add(1)
        };

        match *m {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if role == Role::Pawn && from.rank().distance(to.rank()) == 2 {
                    self.ep_square = from.offset(0, color.pawn_direction());
                }

                if role == Role::King {
                    self.castling_rights.discard_color(color);
                } else if role == Role::Rook {
                    self.castling_rights.discard_rook(from);
                }
                if capture.is_some() {
                    self.castling_rights.discard_rook(to);
                }

                self.board.discard_piece_at(from);
                self.board
                    .set_piece_at(to, promotion.unwrap_or(role).of(color));
            }
            Move::EnPassant { from, to } => {
                // captured pawn
                self.board
                    .discard_piece_at(Square::from_coords(to.file(), from.rank()));
                self.board.discard_piece_at(from);
                self.board.set_piece_at(to, color.pawn());
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_king_side(king < rook);
                self.board.discard_piece_at(king);
                self.board.discard_piece_at(rook);
                self.board.set_piece_at(side.king_to(color), color.king());
                self.board.set_piece_at(side.rook_to(color), color.rook());
                self.castling_rights.discard_color(color);
            }
        }

        if color.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }

        self.turn = !color;
    }
}

fn push_normal(pos: &Chess, role: Role, from: Square, to: Square, moves: &mut MoveList) {
    moves.push(Move::Normal {
        role,
        from,
        capture: pos.board.role_at(to),
        to,
        promotion: None,
    });
}

trait Stepper {
    const ROLE: Role;
    const OFFSETS: [(i32, i32); 8];

    fn gen_from(pos: &Chess, from: Square, moves: &mut MoveList) {
        for to in Self::OFFSETS
            .into_iter()
            .filter_map(|(files, ranks)| from.offset(files, ranks))
        {
            if pos.board.color_at(to) != Some(pos.turn) {
                push_normal(pos, Self::ROLE, from, to, moves);
            }
        }
    }
}

trait Slider {
    const ROLE: Role;
    const DIRECTIONS: &'static [(i32, i32)];

    fn gen_from(pos: &Chess, from: Square, moves: &mut MoveList) {
        for &direction in Self::DIRECTIONS {
            for to in attacks::ray(from, direction) {
                match pos.board.color_at(to) {
                    None => push_normal(pos, Self::ROLE, from, to, moves),
                    Some(color) => {
                        if color != pos.turn {
                            push_normal(pos, Self::ROLE, from, to, moves);
                        }
                        break;
                    }
                }
            }
        }
    }
}

enum KingTag {}
enum KnightTag {}
enum BishopTag {}
enum RookTag {}
enum QueenTag {}

impl Stepper for KingTag {
    const ROLE: Role = Role::King;
    const OFFSETS: [(i32, i32); 8] = attacks::KING_OFFSETS;
}

impl Stepper for KnightTag {
    const ROLE: Role = Role::Knight;
    const OFFSETS: [(i32, i32); 8] = attacks::KNIGHT_OFFSETS;
}

impl Slider for BishopTag {
    const ROLE: Role = Role::Bishop;
    const DIRECTIONS: &'static [(i32, i32)] = &attacks::BISHOP_DIRECTIONS;
}

impl Slider for RookTag {
    const ROLE: Role = Role::Rook;
    const DIRECTIONS: &'static [(i32, i32)] = &attacks::ROOK_DIRECTIONS;
}

impl Slider for QueenTag {
    const ROLE: Role = Role::Queen;
    const DIRECTIONS: &'static [(i32, i32)] = &attacks::QUEEN_DIRECTIONS;
}

fn push_pawn_moves(moves: &mut MoveList, from: Square, to: Square, capture: Option<Role>) {
    if matches!(to.rank(), Rank::First | Rank::Eighth) {
        for promotion in Role::PROMOTIONS {
            moves.push(Move::Normal {
                role: Role::Pawn,
                from,
                capture,
                to,
                promotion: Some(promotion),
            });
        }
    } else {
        moves.push(Move::Normal {
            role: Role::Pawn,
            from,
            capture,
            to,
            promotion: None,
        });
    }
}

fn gen_pawn_moves(pos: &Chess, from: Square, moves: &mut MoveList) {
    let forward = pos.turn.pawn_direction();

    if let Some(to) = from.offset(0, forward) {
        if !pos.board.is_occupied(to) {
            push_pawn_moves(moves, from, to, None);

            if from.rank() == pos.turn.relative_rank(Rank::Second) {
                if let Some(double) = to
                    .offset(0, forward)
                    .filter(|&sq| !pos.board.is_occupied(sq))
                {
                    moves.push(Move::Normal {
                        role: Role::Pawn,
                        from,
                        capture: None,
                        to: double,
                        promotion: None,
                    });
                }
            }
        }
    }

    for to in [-1, 1]
        .into_iter()
        .filter_map(|files| from.offset(files, forward))
    {
        match pos.board.piece_at(to) {
            Some(piece) if piece.color != pos.turn => {
                push_pawn_moves(moves, from, to, Some(piece.role));
            }
            None if pos.ep_square == Some(to)
                && pos
                    .board
                    .piece_at(Square::from_coords(to.file(), from.rank()))
                    == Some((!pos.turn).pawn()) =>
            {
                moves.push(Move::EnPassant { from, to });
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn setup_fen(fen: &str) -> Chess {
        fen.parse::<Fen>().expect("valid fen").into_position()
    }

    fn find(pos: &Chess, from: Square, to: Square) -> Move {
        pos.legal_moves()
            .into_iter()
            .find(|m| m.from() == from && m.to() == to)
            .expect("move is legal")
    }

    #[test]
    fn test_starting_position() {
        let pos = Chess::default();
        assert_eq!(pos.pseudo_legal_moves().len(), 20);
        assert_eq!(pos.legal_moves().len(), 20);
        assert!(!pos.is_check());
        assert_eq!(pos.fullmoves().get(), 1);
    }

    #[test]
    fn test_play_does_not_modify_input() {
        let pos = Chess::default();
        let before = pos.clone();
        let after = pos.play_unchecked(&find(&pos, Square::G1, Square::F3));
        assert_eq!(pos, before);
        assert_ne!(after, before);
        assert_eq!(after.turn(), Color::Black);
        assert_eq!(after.halfmoves(), 1);
    }

    #[test]
    fn test_play_rejects_illegal() {
        let pos = Chess::default();
        let m = Move::Normal {
            role: Role::Queen,
            from: Square::D1,
            capture: None,
            to: Square::D5,
            promotion: None,
        };
        let err = pos.play(&m).expect_err("blocked queen");
        assert_eq!(err.illegal_move(), m);
    }

    #[test]
    fn test_double_step_sets_ep_square() {
        let pos = Chess::default();
        let after = pos.play_unchecked(&find(&pos, Square::D2, Square::D4));
        assert_eq!(after.ep_square(), Some(Square::D3));
        let after = after.play_unchecked(&find(&after, Square::G8, Square::F6));
        assert_eq!(after.ep_square(), None);
        assert_eq!(after.fullmoves().get(), 2);
    }

    #[test]
    fn test_en_passant_removes_pawn_beside() {
        let pos = setup_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        let m = find(&pos, Square::E5, Square::F6);
        assert!(m.is_en_passant());
        let after = pos.play_unchecked(&m);
        assert_eq!(after.board().piece_at(Square::F5), None);
        assert_eq!(after.board().piece_at(Square::F6), Some(Color::White.pawn()));
        assert_eq!(after.board().piece_at(Square::D5), Some(Color::Black.pawn()));
        assert_eq!(after.halfmoves(), 0);

        // No en passant onto the square of the pawn that did not double step.
        assert!(!pos
            .legal_moves()
            .iter()
            .any(|m| m.from() == Square::E5 && m.to() == Square::D6));
    }

    #[test]
    fn test_promotions_in_order() {
        let pos = setup_fen("8/4P3/8/8/8/k7/8/K7 w - - 0 1");
        let promotions: Vec<_> = pos
            .legal_moves()
            .into_iter()
            .filter_map(|m| m.promotion())
            .collect();
        assert_eq!(
            promotions,
            [Role::Queen, Role::Rook, Role::Bishop, Role::Knight]
        );
    }

    #[test]
    fn test_castling() {
        let pos = setup_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(pos.castling_moves(CastlingSide::KingSide).len(), 1);
        assert_eq!(pos.castling_moves(CastlingSide::QueenSide).len(), 1);

        let after = pos.play_unchecked(&Move::Castle {
            king: Square::E1,
            rook: Square::A1,
        });
        assert_eq!(after.board().piece_at(Square::C1), Some(Color::White.king()));
        assert_eq!(after.board().piece_at(Square::D1), Some(Color::White.rook()));
        assert_eq!(after.board().piece_at(Square::A1), None);
        assert_eq!(after.board().piece_at(Square::E1), None);
        assert_eq!(after.castling_rights().to_string(), "kq");
    }

    #[test]
    fn test_castling_through_check() {
        // Bishop on c4 covers f1.
        let pos = setup_fen("4k3/8/8/8/2b5/8/8/4K2R w K - 0 1");
        assert!(pos.castling_moves(CastlingSide::KingSide).is_empty());
        // Rook on g8 covers the destination.
        let pos = setup_fen("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(pos.castling_moves(CastlingSide::KingSide).is_empty());
        // In check.
        let pos = setup_fen("4k3/8/8/8/8/8/8/r3K2R w K - 0 1");
        assert!(pos.castling_moves(CastlingSide::KingSide).is_empty());
        // The rook may pass an attacked square on the queen side.
        let pos = setup_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert_eq!(pos.castling_moves(CastlingSide::QueenSide).len(), 1);
    }

    #[test]
    fn test_castling_blocked() {
        let pos = setup_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(pos.castling_moves(CastlingSide::QueenSide).is_empty());
    }

    #[test]
    fn test_castling_rights_updates() {
        let pos = setup_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let after = pos.play_unchecked(&find(&pos, Square::H1, Square::H8));
        assert_eq!(after.castling_rights().to_string(), "Qq");
        let after = pos.play_unchecked(&find(&pos, Square::A1, Square::A2));
        assert_eq!(after.castling_rights().to_string(), "Kkq");
        let after = pos.play_unchecked(&find(&pos, Square::E1, Square::E2));
        assert_eq!(after.castling_rights().to_string(), "kq");
    }

    #[test]
    fn test_no_legal_move_leaves_king_attacked() {
        let pos = setup_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        for m in pos.legal_moves() {
            let after = pos.play_unchecked(&m);
            let king = after.board().king_of(Color::White).expect("white king");
            assert!(!attacks::is_attacked(after.board(), king, Color::Black), "{m}");
        }
    }

    #[test]
    fn test_pinned_piece() {
        let pos = setup_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(!pos.legal_moves().iter().any(|m| m.role() == Role::Knight));
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        let pos = setup_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(pos.is_check());
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());

        let pos = setup_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!pos.is_check());
        assert!(pos.is_stalemate());
    }

    #[test]
    fn test_insufficient_material() {
        assert!(setup_fen("8/8/8/8/8/8/k7/K7 w - - 0 1").is_insufficient_material());
        assert!(setup_fen("8/8/8/8/8/8/kb6/K7 w - - 0 1").is_insufficient_material());
        assert!(setup_fen("8/8/8/8/8/8/k7/KN6 w - - 0 1").is_insufficient_material());
        assert!(!setup_fen("8/8/8/8/8/8/k7/KR6 w - - 0 1").is_insufficient_material());
        assert!(!setup_fen("8/8/8/8/8/8/kp6/K7 w - - 0 1").is_insufficient_material());
        assert!(!setup_fen("8/8/8/8/8/8/kn6/KN6 w - - 0 1").is_insufficient_material());
        assert!(!Chess::default().is_insufficient_material());
    }
}
