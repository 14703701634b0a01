#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rochade::{fen::Fen, Chess, Move};

#[derive(Debug, Arbitrary)]
struct Data {
    choices: Vec<u8>,
    candidate: Move,
}

fuzz_target!(|data: Data| {
    let mut pos = Chess::default();
    for choice in data.choices {
        let legals = pos.legal_moves();
        assert_eq!(legals.contains(&data.candidate), pos.is_legal(&data.candidate));
        assert!(legals.iter().all(|m| pos.is_legal(m)));

        let Some(m) = legals.get(usize::from(choice) % legals.len().max(1)) else {
            break;
        };
        pos = pos.play_unchecked(m);

        let fen = Fen::from_position(&pos).to_string();
        let reparsed = fen.parse::<Fen>().expect("roundtrip").into_position();
        assert_eq!(pos, reparsed);
    }
});
