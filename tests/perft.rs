use std::{
    fs::File,
    io::{prelude::*, BufReader},
};

use rochade::{fen::Fen, perft, Chess};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut pos = Chess::default();

    for line in reader.lines().map(|l| l.expect("readable line")) {
        println!("{line}");

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("epd") => {
                // Suites list positions without clocks.
                let epd = slices.next().expect("missing epd");
                pos = format!("{epd} 0 1")
                    .parse::<Fen>()
                    .expect("invalid fen")
                    .into_position();
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&pos, depth), nodes);
                }
            }
            _ => {}
        }
    }
}

// macro for generating tests
macro_rules! gen_tests {
    ($($fn_name:ident, $path:tt, $num:expr,)+) => {
        $(
            #[test]
            #[cfg_attr(miri, ignore)]
            fn $fn_name() {
                test_perft_file($path, $num);
            }
        )+
    }
}

gen_tests! {
    test_chess,  "tests/chess.perft",  200_000,
    test_tricky, "tests/tricky.perft", 100_000,
}
