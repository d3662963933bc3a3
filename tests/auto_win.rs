use garame::cards::{parse_cards, Card, Rank};
use garame::deck::Deck;
use garame::game::{Game, GameConfig, Phase, PlayError, Round, RoundEventVerb, Seat};
use garame::hand::Hand;
use garame::scoring::{check_auto_win, AutoWinKind, Kora};
use proptest::prelude::*;
use proptest::sample::subsequence;

fn hand(s: &str) -> Hand {
    s.parse().unwrap()
}

fn rank_sum(cards: &[Card]) -> u32 {
    cards.iter().map(|c| u32::from(c.rank().value())).sum()
}

proptest! {
    #[test]
    fn classification_matches_definition(cards in subsequence(Deck::garame().as_slice().to_vec(), 5)) {
        let sum = rank_sum(&cards);
        let sevens = cards.iter().filter(|c| c.rank() == Rank::Seven).count();
        match check_auto_win(&cards) {
            Some(w) if w.kind == AutoWinKind::Sum => {
                prop_assert!(sum < 21);
                prop_assert_eq!(w.value, sum);
            }
            Some(w) => {
                prop_assert!(sum >= 21 && sevens >= 3);
                prop_assert_eq!(w.value as usize, sevens);
            }
            None => prop_assert!(sum >= 21 && sevens < 3),
        }
    }
}

#[test]
fn low_sum_hand_wins_before_any_trick() {
    // 3+3+4+4+5 = 19
    let round = Round::new(hand("3s 3h 4d 4c 5s"), hand("8h 9h 10d 6c 5c"), Seat::B).unwrap();
    assert!(round.is_over());
    assert_eq!(round.phase(), Phase::Ended);
    let outcome = round.outcome().unwrap();
    assert_eq!(outcome.winner, Seat::A);
    let win = outcome.auto_win.unwrap();
    assert_eq!(win.kind, AutoWinKind::Sum);
    assert_eq!(win.value, 19);
    assert!(outcome.trick_winners.is_empty());
    assert_eq!(outcome.kora, Kora::None);
    assert!(round.tricks().is_empty());
}

#[test]
fn three_sevens_win_even_with_a_high_sum() {
    let cards = parse_cards("7s 7h 7d 8c 9s").unwrap();
    let win = check_auto_win(&cards).unwrap();
    assert_eq!(win.kind, AutoWinKind::Sevens);
    assert_eq!(win.value, 3);
    assert_eq!(win.kind.label(), "sevens");

    let round = Round::new(hand("8h 9h 10d 6c 5c"), Hand::new(cards), Seat::A).unwrap();
    assert_eq!(round.outcome().unwrap().winner, Seat::B);
}

#[test]
fn exactly_twenty_one_is_not_an_auto_win() {
    // 3+4+4+5+5 = 21
    assert!(check_auto_win(&parse_cards("3s 4h 4d 5c 5s").unwrap()).is_none());
}

#[test]
fn leader_has_priority_when_both_hands_qualify() {
    let a = hand("3s 3h 4d 4c 5s");
    let b = hand("3d 3c 4s 4h 5h");
    let led_by_b = Round::new(a.clone(), b.clone(), Seat::B).unwrap();
    assert_eq!(led_by_b.outcome().unwrap().winner, Seat::B);
    let led_by_a = Round::new(a, b, Seat::A).unwrap();
    assert_eq!(led_by_a.outcome().unwrap().winner, Seat::A);
}

#[test]
fn no_card_can_be_played_after_auto_win() {
    let mut round = Round::new(hand("3s 3h 4d 4c 5s"), hand("8h 9h 10d 6c 5c"), Seat::A).unwrap();
    let verbs: Vec<RoundEventVerb> = round.history().iter().map(|e| e.verb).collect();
    assert_eq!(verbs, vec![RoundEventVerb::AutoWin, RoundEventVerb::Win]);
    assert_eq!(round.play_card(Seat::A, "3s".parse().unwrap()), Err(PlayError::RoundOver));
}

#[test]
fn session_settles_auto_win_immediately() {
    let mut g = Game::new(GameConfig { seed: Some(11), first_leader: Seat::A });
    g.start_round(hand("8h 9h 10d 6c 5c"), hand("3s 3h 4d 4c 5s")).unwrap();
    let reports = g.take_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].winner, Seat::B);
    assert_eq!(reports[0].multiplier(), 1);
    assert_eq!(g.rounds_won(Seat::B), 1);
    assert_eq!(g.points(Seat::B), 1);
    assert!(g.take_reports().is_empty(), "reports are handed out once");
}
