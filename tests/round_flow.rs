use garame::cards::Card;
use garame::deck::{DealError, EXCLUDED_CARD};
use garame::engine::GameEngine;
use garame::game::{Game, GameConfig, Phase, PlayError, Round, RoundEventVerb, Seat};
use garame::hand::{Hand, HandError};
use garame::rules::Obligation;

fn hand(s: &str) -> Hand {
    s.parse().unwrap()
}

fn card(s: &str) -> Card {
    s.parse().unwrap()
}

fn plain_round() -> Round {
    Round::new(hand("8s 9s 10h 6d 5c"), hand("8h 9h 10d 6c 5s"), Seat::A).unwrap()
}

#[test]
fn full_round_runs_five_tricks() {
    let mut r = plain_round();
    let plays = [
        (Seat::A, "8s"),
        (Seat::B, "5s"), // A keeps control
        (Seat::A, "10h"),
        (Seat::B, "8h"), // A keeps
        (Seat::A, "5c"),
        (Seat::B, "6c"), // B takes control
        (Seat::B, "10d"),
        (Seat::A, "6d"), // B keeps
        (Seat::B, "9h"),
        (Seat::A, "9s"), // discard: B keeps and wins
    ];
    for (i, (seat, c)) in plays.iter().enumerate() {
        let res = r.play_card(*seat, card(c)).unwrap();
        assert_eq!(res.trick_completed, i % 2 == 1);
    }
    assert!(r.is_over());
    assert_eq!(r.tricks().len(), 5);
    assert_eq!(r.trick_winners(), vec![Seat::A, Seat::A, Seat::B, Seat::B, Seat::B]);
    let outcome = r.outcome().unwrap();
    assert_eq!(outcome.winner, Seat::B);
    assert_eq!(outcome.multiplier(), 1);
    assert!(r.hand(Seat::A).is_empty() && r.hand(Seat::B).is_empty());
    assert_eq!(r.history().last().unwrap().verb, RoundEventVerb::Win);
}

#[test]
fn trick_winner_leads_next() {
    let mut r = plain_round();
    r.play_card(Seat::A, card("5c")).unwrap();
    let res = r.play_card(Seat::B, card("6c")).unwrap();
    assert_eq!(res.trick_winner, Some(Seat::B));
    assert_eq!(r.current(), Seat::B);
    assert_eq!(r.leader(), Seat::B);
    assert_eq!(r.phase(), Phase::Trick(2));
    assert_eq!(r.status(), Some(Obligation::Lead));
}

#[test]
fn illegal_move_leaves_state_unchanged() {
    let mut r = plain_round();
    r.play_card(Seat::A, card("10h")).unwrap();
    let before_hand = r.hand(Seat::B).clone();
    let before_history = r.history().len();

    let err = r.play_card(Seat::B, card("5s")).unwrap_err();
    assert_eq!(
        err,
        PlayError::IllegalMove {
            card: card("5s"),
            obligation: Obligation::SacrificeForced(garame::cards::Suit::Hearts),
        }
    );
    assert_eq!(err.to_string(), "illegal move 5s: sacrifice forced: play a ♥ card");
    assert_eq!(r.hand(Seat::B), &before_hand);
    assert_eq!(r.history().len(), before_history);
    assert_eq!(r.table_card(), Some(card("10h")));
    assert_eq!(r.current(), Seat::B);

    // The same seat may resubmit a legal card.
    assert!(r.play_card(Seat::B, card("9h")).is_ok());
}

#[test]
fn cannot_play_after_round_end() {
    let mut r = plain_round();
    for (seat, c) in [
        (Seat::A, "8s"),
        (Seat::B, "5s"),
        (Seat::A, "9s"),
        (Seat::B, "6c"),
        (Seat::A, "10h"),
        (Seat::B, "9h"),
        (Seat::A, "6d"),
        (Seat::B, "10d"),
        (Seat::B, "8h"),
        (Seat::A, "5c"),
    ] {
        r.play_card(seat, card(c)).unwrap();
    }
    assert!(r.is_over());
    assert_eq!(r.play_card(Seat::A, card("5c")), Err(PlayError::RoundOver));
    assert!(r.legal_moves(Seat::A).is_empty());
    assert_eq!(r.status(), None);
}

#[test]
fn history_labels_each_response() {
    let mut r = plain_round();
    r.play_card(Seat::A, card("8s")).unwrap();
    r.play_card(Seat::B, card("5s")).unwrap();
    r.play_card(Seat::A, card("9s")).unwrap();
    r.play_card(Seat::B, card("6c")).unwrap();
    r.play_card(Seat::A, card("6d")).unwrap();
    r.play_card(Seat::B, card("10d")).unwrap();
    let verbs: Vec<&str> = r.history().iter().map(|e| e.verb.label()).collect();
    assert_eq!(
        verbs,
        vec![
            "Lead",
            "Sacrifice",
            "Keeps control",
            "Lead",
            "Discard",
            "Keeps control",
            "Lead",
            "Follow",
            "Takes control",
        ]
    );
}

#[test]
fn session_deals_and_settles_rounds() {
    let mut g = Game::new(GameConfig { seed: Some(42), first_leader: Seat::A });
    assert!(g.round().is_none());
    assert_eq!(g.play_card(Seat::A, card("3s")), Err(PlayError::NoRound));

    let mut settled = 0;
    for _ in 0..20 {
        GameEngine::new_round(&mut g).unwrap();
        while let Some(seat) = g.current() {
            let c = g.legal_moves(seat)[0];
            g.play_card(seat, c).unwrap();
        }
        settled += g.take_reports().len();
    }
    assert_eq!(settled, 20);
    assert_eq!(g.round_id(), 20);
    assert_eq!(g.rounds_won(Seat::A) + g.rounds_won(Seat::B), 20);
    assert!(g.points(Seat::A) >= g.rounds_won(Seat::A));
    assert!(g.points(Seat::B) >= g.rounds_won(Seat::B));
}

#[test]
fn seeded_sessions_deal_identically() {
    let mut a = Game::new(GameConfig { seed: Some(7), first_leader: Seat::B });
    let mut b = Game::new(GameConfig { seed: Some(7), first_leader: Seat::B });
    for _ in 0..3 {
        a.new_round().unwrap();
        b.new_round().unwrap();
        let (ra, rb) = (a.round().unwrap(), b.round().unwrap());
        for seat in Seat::ALL {
            assert_eq!(ra.hand(seat), rb.hand(seat));
        }
    }
}

#[test]
fn abandoning_a_round_starts_fresh() {
    let mut g = Game::new(GameConfig { seed: Some(3), first_leader: Seat::A });
    g.start_round(hand("8s 9s 10h 6d 5c"), hand("8h 9h 10d 6c 5s")).unwrap();
    g.play_card(Seat::A, card("8s")).unwrap();
    g.new_round().unwrap();
    let r = g.round().unwrap();
    assert_eq!(g.round_id(), 2);
    assert!(r.tricks().is_empty() || r.is_over());
    assert!(g.take_reports().len() <= 1, "only an auto-win can settle a fresh deal");
    assert_eq!(g.rounds_won(Seat::A) + g.rounds_won(Seat::B), g.points(Seat::A) + g.points(Seat::B));
}

#[test]
fn ten_of_spades_never_reaches_a_round() {
    let with_ten = hand("10s 10h 10d 3c 3d");
    let other = hand("9s 9h 9d 8s 8h");
    let expected = DealError::Malformed(HandError::NotInDeck(EXCLUDED_CARD));
    assert_eq!(Round::new(with_ten.clone(), other.clone(), Seat::A).unwrap_err(), expected);
    assert_eq!(Round::new(other.clone(), with_ten.clone(), Seat::A).unwrap_err(), expected);

    let mut g = Game::new(GameConfig { seed: Some(5), first_leader: Seat::A });
    assert_eq!(g.start_round(with_ten, other), Err(expected));
    assert!(g.round().is_none());
    assert_eq!(g.round_id(), 0);
    assert_eq!(g.play_card(Seat::A, EXCLUDED_CARD), Err(PlayError::NoRound));
}
