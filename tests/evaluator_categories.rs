use holdem_table::cards::{parse_cards, Rank};
use holdem_table::evaluator::{describe, evaluate_five, evaluate_hand, HandCategory, HandResult};

fn five(s: &str) -> HandResult {
    let v = parse_cards(s).expect("valid cards");
    evaluate_five(&[v[0], v[1], v[2], v[3], v[4]])
}

fn seven(s: &str) -> HandResult {
    evaluate_hand(&parse_cards(s).expect("valid cards")).expect("enough cards")
}

#[test]
fn category_royal_flush() {
    let e = seven("As Ks Qs Js Ts 2h 3d");
    assert_eq!(e.category, HandCategory::RoyalFlush);
    assert_eq!(describe(&e), "Royal Flush");
}

#[test]
fn category_straight_flush() {
    let e = five("9h 8h 7h 6h 5h");
    assert_eq!(e.category, HandCategory::StraightFlush);
    assert_eq!(describe(&e), "Straight Flush, 9 high");
}

#[test]
fn category_four_of_a_kind() {
    let e = five("9c 9d 9h 9s Ac");
    assert_eq!(e.category, HandCategory::FourOfAKind);
    assert_eq!(e.kickers, vec![Rank::Nine, Rank::Ace]);
}

#[test]
fn category_full_house() {
    let e = five("Kc Kd Kh As Ac");
    assert_eq!(e.category, HandCategory::FullHouse);
    assert_eq!(describe(&e), "Full House, Kings full of Aces");
}

#[test]
fn category_flush() {
    let e = five("Kh Th 8h 6h 3h");
    assert_eq!(e.category, HandCategory::Flush);
    assert_eq!(describe(&e), "Flush, K high");
}

#[test]
fn category_straight_and_wheel() {
    let wheel = seven("Ah 2d 3c 4s 5h 9c 9d");
    assert_eq!(wheel.category, HandCategory::Straight);
    assert_eq!(wheel.kickers[0], Rank::Five);
    assert_eq!(describe(&wheel), "Straight, 5 high");
    let six_high = five("2c 3d 4h 5s 6c");
    assert!(six_high > wheel, "wheel ranks below a six-high straight");
}

#[test]
fn category_three_of_a_kind() {
    let e = five("Qc Qd Qh Ts 2c");
    assert_eq!(e.category, HandCategory::ThreeOfAKind);
    assert_eq!(describe(&e), "Three of a Kind, Queens");
}

#[test]
fn category_two_pair() {
    let e = five("Jc Jd 9c 9h 2s");
    assert_eq!(e.category, HandCategory::TwoPair);
    assert_eq!(describe(&e), "Two Pair, Jacks and 9s");
}

#[test]
fn category_pair() {
    let e = five("Ah Ad Ts 9c 2d");
    assert_eq!(e.category, HandCategory::OnePair);
    assert_eq!(describe(&e), "Pair of Aces");
}

#[test]
fn category_high_card() {
    let e = five("Ah Kd 7s 5c 2d");
    assert_eq!(e.category, HandCategory::HighCard);
    assert_eq!(describe(&e), "A high");
}

#[test]
fn seven_cards_pick_the_best_five() {
    let e = seven("Kh Kd 7s 7c 7d 2h 2c");
    assert_eq!(e.category, HandCategory::FullHouse);
    assert_eq!(e.kickers, vec![Rank::Seven, Rank::King]);
    assert_eq!(e.best_five.len(), 5);
}

#[test]
fn category_labels() {
    assert_eq!(HandCategory::OnePair.to_string(), "One Pair");
    assert_eq!(HandCategory::ThreeOfAKind.to_string(), "Three of a Kind");
    assert!(HandCategory::RoyalFlush > HandCategory::StraightFlush);
}
