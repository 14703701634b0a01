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

//! The piece placement part of a position.

use std::{error::Error, fmt, fmt::Write as _};

use crate::{
    color::Color,
    role::Role,
    square::{File, Rank, Square},
    types::Piece,
};

/// Error when parsing the piece placement field of a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseBoardError;

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid board fen")
    }
}

impl Error for ParseBoardError {}

/// [`Piece`] positions on a board.
///
/// A plain 8x8 grid: every square holds at most one piece.
///
/// # Examples
///
/// ```
/// use rochade::{Board, Square, Color::Black};
///
/// let board = Board::new();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// assert_eq!(board.piece_at(Square::E8), Some(Black.king()));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let backrank = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty();
        for (file, role) in File::ALL.into_iter().zip(backrank) {
            for color in Color::ALL {
                board.set_piece_at(Square::from_coords(file, color.backrank()), role.of(color));
                board.set_piece_at(
                    Square::from_coords(file, color.relative_rank(Rank::Second)),
                    color.pawn(),
                );
            }
        }
        board
    }

    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    /// Parses the piece placement field of a FEN.
    ///
    /// Ranks are listed from the eighth down to the first, separated by `/`.
    /// Digits `1` to `8` stand for runs of empty squares.
    ///
    /// # Errors
    ///
    /// Returns [`ParseBoardError`] unless the input describes exactly 8 ranks
    /// of exactly 8 squares each, using only piece letters and digits.
    pub fn from_ascii_board_fen(board_fen: &[u8]) -> Result<Board, ParseBoardError> {
        let mut board = Board::empty();
        let mut ranks = 0;

        for (row, rank_fen) in board_fen.split(|&ch| ch == b'/').enumerate() {
            let rank = 7usize
                .checked_sub(row)
                .and_then(|index| Rank::ALL.get(index).copied())
                .ok_or(ParseBoardError)?;

            let mut file = 0;
            for &ch in rank_fen {
                if (b'1'..=b'8').contains(&ch) {
                    file += usize::from(ch - b'0');
                } else {
                    let piece = Piece::from_char(char::from(ch)).ok_or(ParseBoardError)?;
                    let piece_file = File::ALL.get(file).copied().ok_or(ParseBoardError)?;
                    board.set_piece_at(Square::from_coords(piece_file, rank), piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(ParseBoardError);
                }
            }

            if file != 8 {
                return Err(ParseBoardError);
            }
            ranks += 1;
        }

        if ranks == 8 {
            Ok(board)
        } else {
            Err(ParseBoardError)
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.to_usize()]
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.to_usize()].is_some()
    }

    /// Puts a piece on a square, replacing whatever was there.
    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.to_usize()] = Some(piece);
    }

    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.to_usize()].take()
    }

    #[inline]
    pub fn discard_piece_at(&mut self, sq: Square) {
        self.squares[sq.to_usize()] = None;
    }

    /// Finds the king of the given side. If there is more than one, the one
    /// on the lowest square index is returned.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece == color.king())
            .map(|(sq, _)| sq)
    }

    /// Iterates over all occupied squares, from `A1` to `H8`.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Number of pieces on the board, including kings.
    pub fn len(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    /// The grid in FEN order: the eighth rank first, each rank from the
    /// a-file to the h-file.
    pub fn rows(&self) -> impl Iterator<Item = [Option<Piece>; 8]> + '_ {
        Rank::ALL.into_iter().rev().map(move |rank| {
            File::ALL.map(|file| self.piece_at(Square::from_coords(file, rank)))
        })
    }

    /// Displays the piece placement field of a FEN.
    ///
    /// # Examples
    ///
    /// ```
    /// use rochade::Board;
    ///
    /// assert_eq!(
    ///     Board::new().board_fen().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    pub fn board_fen(&self) -> BoardFen<'_> {
        BoardFen { board: self }
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (file, piece) in row.into_iter().enumerate() {
                if file > 0 {
                    f.write_char(' ')?;
                }
                f.write_char(piece.map_or('.', Piece::char))?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

/// Piece placement field of a FEN, as returned by [`Board::board_fen()`].
#[derive(Debug)]
pub struct BoardFen<'b> {
    board: &'b Board,
}

impl fmt::Display for BoardFen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.board.rows().enumerate() {
            if row_index > 0 {
                f.write_char('/')?;
            }

            let mut empty = 0;
            for piece in row {
                match piece {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        f.write_char(piece.char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let board = Board::new();
        assert_eq!(board.len(), 32);
        assert_eq!(board.king_of(Color::White), Some(Square::E1));
        assert_eq!(board.king_of(Color::Black), Some(Square::E8));
        assert_eq!(board.piece_at(Square::D1), Some(Color::White.queen()));
        assert_eq!(board.piece_at(Square::G7), Some(Color::Black.pawn()));
        assert_eq!(board.piece_at(Square::E4), None);
    }

    #[test]
    fn test_remove_piece_at() {
        let mut board = Board::new();
        assert_eq!(board.remove_piece_at(Square::D1), Some(Color::White.queen()));
        assert_eq!(board.remove_piece_at(Square::D1), None);
        assert_eq!(board.len(), 31);
        assert_eq!(
            board.board_fen().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR"
        );
    }

    #[test]
    fn test_board_fen_roundtrip() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "8/8/8/8/8/8/k7/K7",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
        ] {
            let board = Board::from_ascii_board_fen(fen.as_bytes()).expect("valid board fen");
            assert_eq!(board.board_fen().to_string(), fen);
        }
    }

    #[test]
    fn test_invalid_board_fen() {
        for fen in [
            "",
            "8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/7",
            "8/8/8/8/8/8/8/ppppppppp",
            "8/8/8/8/8/8/8/44p",
            "8/8/8/8/8/8/8/7x",
            "8/8/8/8/8/8/8/8/",
        ] {
            assert_eq!(
                Board::from_ascii_board_fen(fen.as_bytes()),
                Err(ParseBoardError),
                "{fen}"
            );
        }
    }

    #[test]
    fn test_rows_start_at_eighth_rank() {
        let board = Board::new();
        let rows: Vec<_> = board.rows().collect();
        assert_eq!(rows[0][4], Some(Color::Black.king()));
        assert_eq!(rows[7][4], Some(Color::White.king()));
        assert_eq!(rows[3], [None; 8]);
    }

    #[test]
    fn test_debug_diagram() {
        let board = Board::from_ascii_board_fen(b"8/8/8/8/8/8/k7/K7").expect("valid board fen");
        assert_eq!(
            format!("{board:?}"),
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             k . . . . . . .\n\
             K . . . . . . .\n"
        );
    }
}
