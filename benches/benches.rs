use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rochade::{fen::Fen, game, perft, san::San, Chess, Move, Role, Square};

fn position(fen: &str) -> Chess {
    fen.parse::<Fen>().expect("valid fen").into_position()
}

fn bench_perft(c: &mut Criterion) {
    let pos = Chess::default();
    c.bench_function("shallow perft", |b| {
        b.iter(|| assert_eq!(perft(black_box(&pos), 3), 8_902))
    });

    let pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    c.bench_function("kiwipete", |b| {
        b.iter(|| assert_eq!(perft(black_box(&pos), 2), 2_039))
    });
}

fn bench_generate_moves(c: &mut Criterion) {
    let pos = position("rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq - 0 1");
    c.bench_function("legal moves", |b| {
        b.iter(|| assert_eq!(black_box(&pos).legal_moves().len(), 39))
    });
    c.bench_function("annotated legal moves", |b| {
        b.iter(|| game::legal_moves(black_box(&pos)))
    });
}

fn bench_play_unchecked(c: &mut Criterion) {
    let pos = position("rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq - 0 1");
    let m = Move::Normal {
        role: Role::Bishop,
        from: Square::F8,
        capture: None,
        to: Square::E7,
        promotion: None,
    };
    c.bench_function("play unchecked", |b| {
        b.iter(|| black_box(&pos).play_unchecked(black_box(&m)))
    });
}

fn bench_san(c: &mut Criterion) {
    let pos = position("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");
    c.bench_function("san to move", |b| {
        b.iter(|| {
            black_box("O-O")
                .parse::<San>()
                .expect("valid san")
                .to_move(&pos)
                .expect("legal san")
        })
    });
}

fn bench_fen(c: &mut Criterion) {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    c.bench_function("parse fen", |b| {
        b.iter(|| black_box(fen).parse::<Fen>().expect("valid fen"))
    });
}

criterion_group!(
    benches,
    bench_perft,
    bench_generate_moves,
    bench_play_unchecked,
    bench_san,
    bench_fen
);
criterion_main!(benches);
