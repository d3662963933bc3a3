use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use garame::agents::{decide, DecisionContext};
use garame::cards::{parse_cards, Card};
use garame::game::{Game, GameConfig, Seat};
use garame::rules::legal_moves;

fn context(hand: &str, table: Option<&str>, trick_no: u8, winners: &[Seat]) -> DecisionContext {
    let table_card: Option<Card> = table.map(|t| t.parse().unwrap());
    DecisionContext {
        seat: Seat::B,
        hand: parse_cards(hand).unwrap(),
        table_card,
        trick_no,
        trick_winners: winners.to_vec(),
        has_control: table_card.is_none(),
        own_table_card: None,
        opponent_table_card: table_card,
    }
}

fn bench_decide(c: &mut Criterion) {
    let follow = context("3s 5s 4h 9d 6c", Some("4s"), 1, &[]);
    let lead = context("3s 5s 4h 9d 6c", None, 1, &[]);
    let kora = context("3h", None, 5, &[Seat::B, Seat::A, Seat::B, Seat::B]);

    let mut g = c.benchmark_group("decide");
    g.bench_with_input(BenchmarkId::new("follow", "vs 4s"), &follow, |b, input| {
        b.iter(|| decide(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("lead", "trick 1"), &lead, |b, input| {
        b.iter(|| decide(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("kora", "trick 5"), &kora, |b, input| {
        b.iter(|| decide(black_box(input)))
    });
    g.finish();
}

fn bench_legal_moves(c: &mut Criterion) {
    let hand = parse_cards("3s 5s 4h 9d 6c").unwrap();
    let table: Card = "4s".parse().unwrap();
    c.bench_function("legal_moves", |b| b.iter(|| legal_moves(black_box(&hand), Some(table))));
}

fn bench_full_round(c: &mut Criterion) {
    c.bench_function("engine_vs_engine_round", |b| {
        let mut game = Game::new(GameConfig { seed: Some(1), first_leader: Seat::A });
        b.iter(|| {
            game.new_round().unwrap();
            while let Some(ctx) = game
                .round()
                .filter(|r| !r.is_over())
                .and_then(|r| DecisionContext::from_round(r, r.current()))
            {
                let d = decide(&ctx).unwrap();
                game.play_card(ctx.seat, d.card).unwrap();
            }
            black_box(game.take_reports())
        })
    });
}

criterion_group!(benches, bench_decide, bench_legal_moves, bench_full_round);
criterion_main!(benches);
