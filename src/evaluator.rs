use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use crate::player::{Player, PlayerStatus};
use core::cmp::Ordering;
use serde::Serialize;
use std::fmt;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

/// Width of each category's band in the composite rank. Every category term
/// stays strictly below this, so bands never overlap.
const CATEGORY_BAND: u32 = 100_000_000;

impl HandCategory {
    const fn base(self) -> u32 {
        self as u32 * CATEGORY_BAND
    }

    pub const fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of evaluating a hand: the best five cards plus the keys used to order it.
///
/// Ordering and equality look only at `rank` and then `kickers`; two results with
/// different suits but identical strength compare equal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandResult {
    pub category: HandCategory,
    /// Category base plus category-specific tiebreak terms. Higher is better.
    pub rank: u32,
    /// Tiebreak ranks in descending significance.
    pub kickers: Vec<Rank>,
    pub best_five: [Card; 5],
}

impl Ord for HandResult {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

impl PartialOrd for HandResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandResult {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandResult {}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("need at least five cards to evaluate, got {0}")]
    NotEnoughCards(usize),
}

/// Compare by composite rank, then kickers lexicographically.
pub fn compare_hands(a: &HandResult, b: &HandResult) -> Ordering {
    a.rank.cmp(&b.rank).then_with(|| compare_kickers(&a.kickers, &b.kickers))
}

fn compare_kickers(a: &[Rank], b: &[Rank]) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Positional score over ranks in descending significance, base 15.
fn positional_score(ranks: &[Rank]) -> u32 {
    ranks.iter().fold(0, |acc, r| acc * 15 + r.value() as u32)
}

/// Evaluate exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandResult {
    let mut sorted = *cards;
    sorted.sort_by(|a, b| b.rank().cmp(&a.rank()).then(b.suit().cmp(&a.suit())));
    let ranks: [Rank; 5] = [
        sorted[0].rank(),
        sorted[1].rank(),
        sorted[2].rank(),
        sorted[3].rank(),
        sorted[4].rank(),
    ];

    let is_flush = sorted.iter().all(|c| c.suit() == sorted[0].suit());
    let straight_high = straight_high(&ranks);

    let mut counts = [0u8; 15];
    for r in ranks {
        counts[r.value() as usize] += 1;
    }
    // (rank, count) sorted by count desc, then rank desc
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter(|r| counts[r.value() as usize] > 0)
        .map(|&r| (r, counts[r.value() as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    let singles: Vec<Rank> = groups.iter().filter(|g| g.1 == 1).map(|g| g.0).collect();

    let make = |category: HandCategory, term: u32, kickers: Vec<Rank>| HandResult {
        category,
        rank: category.base() + term,
        kickers,
        best_five: sorted,
    };

    if let (true, Some(high)) = (is_flush, straight_high) {
        let category =
            if high == Rank::Ace { HandCategory::RoyalFlush } else { HandCategory::StraightFlush };
        return make(category, high.value() as u32, vec![high]);
    }

    let (top, top_count) = groups[0];
    if top_count == 4 {
        let kicker = singles[0];
        return make(
            HandCategory::FourOfAKind,
            top.value() as u32 * 100 + kicker.value() as u32,
            vec![top, kicker],
        );
    }

    if top_count == 3 && groups.len() > 1 && groups[1].1 == 2 {
        let pair = groups[1].0;
        return make(
            HandCategory::FullHouse,
            top.value() as u32 * 100 + pair.value() as u32,
            vec![top, pair],
        );
    }

    if is_flush {
        return make(HandCategory::Flush, positional_score(&ranks), ranks.to_vec());
    }

    if let Some(high) = straight_high {
        return make(HandCategory::Straight, high.value() as u32, vec![high]);
    }

    if top_count == 3 {
        let mut kickers = vec![top];
        kickers.extend_from_slice(&singles[..2]);
        return make(
            HandCategory::ThreeOfAKind,
            top.value() as u32 * 10_000 + positional_score(&singles[..2]),
            kickers,
        );
    }

    if top_count == 2 && groups[1].1 == 2 {
        let low = groups[1].0;
        let kicker = singles[0];
        return make(
            HandCategory::TwoPair,
            top.value() as u32 * 10_000 + low.value() as u32 * 100 + kicker.value() as u32,
            vec![top, low, kicker],
        );
    }

    if top_count == 2 {
        let mut kickers = vec![top];
        kickers.extend_from_slice(&singles[..3]);
        return make(
            HandCategory::OnePair,
            top.value() as u32 * 1_000_000 + positional_score(&singles[..3]),
            kickers,
        );
    }

    make(HandCategory::HighCard, positional_score(&ranks), ranks.to_vec())
}

/// High card of a five-card straight, if the descending ranks form one.
/// The wheel (A-5-4-3-2) plays five-high.
fn straight_high(desc: &[Rank; 5]) -> Option<Rank> {
    let distinct = desc.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if desc[0].value() - desc[4].value() == 4 {
        return Some(desc[0]);
    }
    if desc[0] == Rank::Ace && desc[1] == Rank::Five && desc[4] == Rank::Two {
        return Some(Rank::Five);
    }
    None
}

/// Best five-card hand out of five or more cards (every 5-subset is scored).
///
/// ```
/// use holdem_table::cards::parse_cards;
/// use holdem_table::evaluator::{evaluate_hand, HandCategory};
///
/// let seven = parse_cards("As Ks Qs Js Ts 2h 3d").unwrap();
/// let best = evaluate_hand(&seven).unwrap();
/// assert_eq!(best.category, HandCategory::RoyalFlush);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<HandResult, EvalError> {
    let n = cards.len();
    if n < 5 {
        return Err(EvalError::NotEnoughCards(n));
    }
    let mut best: Option<HandResult> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                for l in (k + 1)..n {
                    for m in (l + 1)..n {
                        let eval = evaluate_five(&[cards[i], cards[j], cards[k], cards[l], cards[m]]);
                        match &best {
                            Some(b) if compare_hands(&eval, b).is_le() => {}
                            _ => best = Some(eval),
                        }
                    }
                }
            }
        }
    }
    best.ok_or(EvalError::NotEnoughCards(n))
}

/// Evaluate hole cards against the board after checking that no card repeats.
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<HandResult, EvalError> {
    validate_holdem(hole, board)?;
    let mut cards = hole.as_array().to_vec();
    cards.extend_from_slice(board.as_slice());
    evaluate_hand(&cards)
}

/// Seats among `eligible` holding the best hand on `board`, in `eligible` order.
///
/// Folded and eliminated seats, and seats without hole cards, are skipped.
/// More than one seat is returned when hands tie exactly.
pub fn find_winners(players: &[Player], board: &Board, eligible: &[usize]) -> Vec<usize> {
    let mut scored: Vec<(usize, HandResult)> = Vec::with_capacity(eligible.len());
    for &seat in eligible {
        let Some(player) = players.get(seat) else { continue };
        if matches!(player.status, PlayerStatus::Folded | PlayerStatus::Eliminated) {
            continue;
        }
        let Some(hole) = player.hole else { continue };
        match evaluate_holdem(&hole, board) {
            Ok(result) => {
                log::debug!("seat {seat} shows {hole:?}: {}", describe(&result));
                scored.push((seat, result));
            }
            Err(e) => log::warn!("seat {seat} could not be evaluated: {e}"),
        }
    }
    let Some(best) = scored.iter().map(|(_, r)| r).max().cloned() else {
        return Vec::new();
    };
    scored.into_iter().filter(|(_, r)| *r == best).map(|(seat, _)| seat).collect()
}

/// Human-readable summary, e.g. "Full House, Kings full of Aces".
pub fn describe(result: &HandResult) -> String {
    let k = &result.kickers;
    match result.category {
        HandCategory::RoyalFlush => "Royal Flush".to_string(),
        HandCategory::StraightFlush => format!("Straight Flush, {} high", k[0]),
        HandCategory::FourOfAKind => format!("Four of a Kind, {}s", k[0].name()),
        HandCategory::FullHouse => {
            format!("Full House, {}s full of {}s", k[0].name(), k[1].name())
        }
        HandCategory::Flush => format!("Flush, {} high", k[0]),
        HandCategory::Straight => format!("Straight, {} high", k[0]),
        HandCategory::ThreeOfAKind => format!("Three of a Kind, {}s", k[0].name()),
        HandCategory::TwoPair => format!("Two Pair, {}s and {}s", k[0].name(), k[1].name()),
        HandCategory::OnePair => format!("Pair of {}s", k[0].name()),
        HandCategory::HighCard => format!("{} high", k[0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    fn seven(s: &str) -> HandResult {
        evaluate_hand(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn not_enough_cards_errors() {
        let cards = parse_cards("As Ks Qs Js").unwrap();
        assert!(matches!(evaluate_hand(&cards), Err(EvalError::NotEnoughCards(4))));
    }

    #[test]
    fn evaluate_five_categories() {
        let cases = [
            ("As Ks Qs Js Ts", HandCategory::RoyalFlush),
            ("9h 8h 7h 6h 5h", HandCategory::StraightFlush),
            ("5d 4d 3d 2d Ad", HandCategory::StraightFlush),
            ("Kc Kd Kh Ks 2s", HandCategory::FourOfAKind),
            ("Tc Td Th 2s 2h", HandCategory::FullHouse),
            ("Ah 9h 7h 3h 2h", HandCategory::Flush),
            ("Ac 2d 3h 4s 5c", HandCategory::Straight),
            ("Qc Qd Qh 9s 2c", HandCategory::ThreeOfAKind),
            ("Jc Jd 9c 9h 2s", HandCategory::TwoPair),
            ("Ah Ad Ts 9c 2d", HandCategory::OnePair),
            ("Ah Kd 7s 5c 2d", HandCategory::HighCard),
        ];
        for (cards, category) in cases {
            assert_eq!(evaluate_five(&five(cards)).category, category, "{cards}");
        }
    }

    #[test]
    fn categories_occupy_disjoint_bands() {
        // best possible hand of each category below the worst of the next one up
        let best_high = evaluate_five(&five("Ah Kd Qs Jc 9d"));
        let worst_pair = evaluate_five(&five("2h 2d 3s 4c 5d"));
        assert!(best_high.rank < worst_pair.rank);
        let best_pair = evaluate_five(&five("Ah Ad Ks Qc Jd"));
        let worst_two_pair = evaluate_five(&five("3h 3d 2s 2c 4d"));
        assert!(best_pair.rank < worst_two_pair.rank);
        let best_flush = evaluate_five(&five("Ah Kh Qh Jh 9h"));
        let worst_boat = evaluate_five(&five("2h 2d 2s 3c 3d"));
        assert!(best_flush.rank < worst_boat.rank);
    }

    #[test]
    fn royal_flush_is_the_maximum() {
        let royal = seven("As Ks Qs Js Ts 2h 3d");
        assert_eq!(royal.category, HandCategory::RoyalFlush);
        let steel_wheel = seven("Ah 2h 3h 4h 5h Kc Kd");
        assert_eq!(steel_wheel.category, HandCategory::StraightFlush);
        assert!(royal > steel_wheel);
        assert_eq!(describe(&royal), "Royal Flush");
    }

    #[test]
    fn wheel_is_five_high_and_below_six_high() {
        let wheel = seven("Ah 2d 3c 4s 5h 9c 9d");
        assert_eq!(wheel.category, HandCategory::Straight);
        assert_eq!(wheel.kickers, vec![Rank::Five]);
        let six_high = seven("6h 2d 3c 4s 5h 9c 9d");
        assert_eq!(six_high.kickers, vec![Rank::Six]);
        assert!(six_high > wheel);
        assert_eq!(describe(&wheel), "Straight, 5 high");
    }

    #[test]
    fn paired_board_is_not_a_straight() {
        let r = evaluate_five(&five("5h 5d 4c 3s 2h"));
        assert_eq!(r.category, HandCategory::OnePair);
        // A-2-3-4 plus a duplicate ace is not a wheel
        let r = evaluate_five(&five("Ah Ad 2c 3s 4h"));
        assert_eq!(r.category, HandCategory::OnePair);
    }

    #[test]
    fn seven_card_picks_best_subset() {
        let r = seven("Kh Kd Ks 7c 7d 7h 2s");
        assert_eq!(r.category, HandCategory::FullHouse);
        assert_eq!(r.kickers, vec![Rank::King, Rank::Seven]);
        assert_eq!(describe(&r), "Full House, Kings full of 7s");

        let r = seven("Ah Kh 2h 9h 4c 5h 3d");
        assert_eq!(r.category, HandCategory::Flush);
        assert_eq!(r.kickers[0], Rank::Ace);
    }

    #[test]
    fn kickers_break_ties_within_category() {
        let a = seven("Ah Ad Kc 9s 7d 4c 2h");
        let b = seven("As Ac Qc 9d 7h 4d 2s");
        assert_eq!(a.category, HandCategory::OnePair);
        assert!(a > b);

        let tp_a = seven("Jc Jd 9c 9h As 3d 2c");
        let tp_b = seven("Jh Js 9d 9s Kc 3h 2d");
        assert!(tp_a > tp_b, "two pair decided by kicker");
        assert_eq!(describe(&tp_a), "Two Pair, Jacks and 9s");
    }

    #[test]
    fn same_strength_different_suits_compare_equal() {
        let a = seven("Ah Kd 9c 9h 4s 3d 2c");
        let b = seven("As Kc 9d 9s 4h 3c 2d");
        assert_eq!(compare_hands(&a, &b), Ordering::Equal);
    }

    #[test]
    fn descriptions() {
        assert_eq!(describe(&seven("Kc Kd Kh Ks 2s 3d 4c")), "Four of a Kind, Kings");
        assert_eq!(describe(&seven("Qc Qd Qh 9s 2c 4d 6h")), "Three of a Kind, Queens");
        assert_eq!(describe(&seven("Ah Ad Ts 9c 2d 4h 6s")), "Pair of Aces");
        assert_eq!(describe(&seven("Ah Kd 7s 5c 2d 9h Jc")), "A high");
        assert_eq!(describe(&seven("9h 8h 7h 6h 5h 2c 3d")), "Straight Flush, 9 high");
        assert_eq!(HandCategory::ThreeOfAKind.to_string(), "Three of a Kind");
    }
}
