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

//! Chess rules on a plain 8x8 board: positions, legal moves, notation and
//! game status.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use rochade::Chess;
//!
//! let pos = Chess::default();
//! let legals = pos.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! # use rochade::Chess;
//! use rochade::{Move, Role, Square};
//! #
//! # let pos = Chess::default();
//!
//! // 1. e4
//! let pos = pos.play(&Move::Normal {
//!     role: Role::Pawn,
//!     from: Square::E2,
//!     to: Square::E4,
//!     capture: None,
//!     promotion: None,
//! })?;
//! # Ok::<_, rochade::PlayError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! # use rochade::{Chess, Status};
//! # let pos = Chess::default();
//! assert!(!pos.is_checkmate());
//! assert!(!pos.is_stalemate());
//! assert!(!pos.is_insufficient_material());
//! assert_eq!(pos.status(), Status::InProgress);
//! ```
//!
//! Also supports [FEN](fen), [SAN](san) and [UCI](uci) formats for
//! positions and moves, and a string-level [game] interface for
//! applications.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde`](https://docs.rs/serde/1)
//!   serialization/deserialization for types with unique natural
//!   representations, and for the records of the [game] module.
//! * `arbitrary`: Implements [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//!
//! # Logging
//!
//! The [game] module emits [`tracing`](https://docs.rs/tracing/0.1) events
//! for applied and rejected moves. No subscriber is installed.

#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_cfg))]

mod castling;
mod color;
mod m;
mod perft;
mod position;
mod role;
mod square;
mod status;
mod types;
mod util;

pub mod attacks;
pub mod board;
pub mod fen;
pub mod game;
pub mod san;
pub mod uci;

pub use board::Board;
pub use castling::{CastlingRights, CastlingSide};
pub use color::{Color, ParseColorError};
pub use m::{Move, MoveList};
pub use perft::perft;
pub use position::{Chess, PlayError};
pub use role::Role;
pub use square::{File, ParseSquareError, Rank, Square};
pub use status::{ParseStatusError, Status};
pub use types::Piece;

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
