use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cards::{value_symbol, Card};
use crate::errors::GameError;

/// Hand category; the discriminant is the numeric rank reported to callers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
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

impl Category {
    /// Number of meaningful entries in the tie-break vector.
    fn tiebreak_len(self) -> usize {
        match self {
            Category::FourOfAKind | Category::FullHouse => 2,
            Category::ThreeOfAKind | Category::TwoPair => 3,
            Category::OnePair => 4,
            _ => 5,
        }
    }
}

/// Category plus tie-break vector of a five-card hand.
///
/// The derived ordering compares the category first and then the kickers
/// lexicographically, which is exactly the showdown order. Unused kicker
/// slots are zero, and hands of one category always use the same number of
/// slots.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    pub fn rank(&self) -> u8 {
        self.category as u8
    }

    pub fn tiebreak(&self) -> &[u8] {
        &self.kickers[..self.category.tiebreak_len()]
    }

    /// Human-readable label, e.g. "Full house, Kings over Twos".
    pub fn describe(&self) -> String {
        let k = &self.kickers;
        match self.category {
            Category::RoyalFlush => "Royal flush".to_string(),
            Category::StraightFlush => format!("Straight flush, {} high", value_name(k[0])),
            Category::FourOfAKind => format!("Four of a kind, {}", value_plural(k[0])),
            Category::FullHouse => format!(
                "Full house, {} over {}",
                value_plural(k[0]),
                value_plural(k[1])
            ),
            Category::Flush => format!("Flush, {} high", value_name(k[0])),
            Category::Straight => format!("Straight, {} high", value_name(k[0])),
            Category::ThreeOfAKind => format!("Three of a kind, {}", value_plural(k[0])),
            Category::TwoPair => format!(
                "Two pair, {} and {}",
                value_plural(k[0]),
                value_plural(k[1])
            ),
            Category::OnePair => format!("Pair of {}", value_plural(k[0])),
            Category::HighCard => format!("High card {}", value_name(k[0])),
        }
    }

    /// Compact code such as `"8:9-8-7-6-5"`, handy in logs.
    pub fn code(&self) -> String {
        let parts: Vec<String> = self
            .tiebreak()
            .iter()
            .map(|&v| value_symbol(v).to_string())
            .collect();
        format!("{}:{}", self.rank(), parts.join("-"))
    }
}

/// The winning five-card subset together with its strength.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BestHand {
    pub strength: HandStrength,
    pub cards: [Card; 5],
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Classifies exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut values: [u8; 5] = cards.map(|c| c.rank.value());
    values.sort_unstable_by(|a, b| b.cmp(a));

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = straight_high(&values);

    if let Some(high) = straight_high {
        let run = straight_values(high);
        if flush {
            let category = if high == 14 {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return HandStrength {
                category,
                kickers: run,
            };
        }
    }

    let groups = group_by_count(&values);
    let (top_value, top_count) = groups[0];

    if top_count == 4 {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [top_value, groups[1].0, 0, 0, 0],
        };
    }
    if top_count == 3 && groups[1].1 == 2 {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [top_value, groups[1].0, 0, 0, 0],
        };
    }
    if flush {
        return HandStrength {
            category: Category::Flush,
            kickers: values,
        };
    }
    if let Some(high) = straight_high {
        return HandStrength {
            category: Category::Straight,
            kickers: straight_values(high),
        };
    }
    if top_count == 3 {
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: [top_value, groups[1].0, groups[2].0, 0, 0],
        };
    }
    if top_count == 2 && groups[1].1 == 2 {
        return HandStrength {
            category: Category::TwoPair,
            kickers: [top_value, groups[1].0, groups[2].0, 0, 0],
        };
    }
    if top_count == 2 {
        return HandStrength {
            category: Category::OnePair,
            kickers: [top_value, groups[1].0, groups[2].0, groups[3].0, 0],
        };
    }
    HandStrength {
        category: Category::HighCard,
        kickers: values,
    }
}

/// Best five-card hand out of 5 to 7 distinct cards.
///
/// Every 5-card subset is evaluated; the first maximal subset in
/// enumeration order is returned, so the result does not depend on how the
/// input is ordered except for which of several equal subsets is reported.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{best_hand, Category};
///
/// let cards = parse_cards("AS KS QS JS TS 2C 3D").unwrap();
/// let best = best_hand(&cards).unwrap();
/// assert_eq!(best.strength.category, Category::RoyalFlush);
/// ```
pub fn best_hand(cards: &[Card]) -> Result<BestHand, GameError> {
    if cards.len() < 5 || cards.len() > 7 {
        return Err(GameError::InvalidCards(format!(
            "need 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    let unique: HashSet<&Card> = cards.iter().collect();
    if unique.len() != cards.len() {
        return Err(GameError::InvalidCards("duplicate card".into()));
    }

    let mut best: Option<BestHand> = None;
    for five in FiveCardCombos::new(cards) {
        let strength = evaluate_five(&five);
        match &best {
            Some(b) if b.strength >= strength => {}
            _ => {
                best = Some(BestHand {
                    strength,
                    cards: five,
                })
            }
        }
    }
    best.ok_or_else(|| GameError::InvalidCards("no five-card subset".into()))
}

/// Convenience for the common hole + board case.
pub fn evaluate_hand(cards: &[Card; 7]) -> Result<HandStrength, GameError> {
    best_hand(cards).map(|b| b.strength)
}

/// Iterates over every 5-card subset of a slice in lexicographic index order.
#[derive(Debug)]
pub struct FiveCardCombos<'a> {
    cards: &'a [Card],
    idx: [usize; 5],
    done: bool,
}

impl<'a> FiveCardCombos<'a> {
    pub fn new(cards: &'a [Card]) -> Self {
        Self {
            cards,
            idx: [0, 1, 2, 3, 4],
            done: cards.len() < 5,
        }
    }
}

impl Iterator for FiveCardCombos<'_> {
    type Item = [Card; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.idx.map(|i| self.cards[i]);

        let n = self.cards.len();
        // advance to the next combination
        let mut i = 5;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.idx[i] < n - 5 + i {
                self.idx[i] += 1;
                for j in i + 1..5 {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
                break;
            }
        }
        Some(out)
    }
}

/// High card of a straight in descending `values`, 5 for the wheel.
fn straight_high(values: &[u8; 5]) -> Option<u8> {
    let distinct = values.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if values[0] - values[4] == 4 {
        return Some(values[0]);
    }
    // A-5-4-3-2: the only place an ace plays low
    if values == &[14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

fn straight_values(high: u8) -> [u8; 5] {
    [high, high - 1, high - 2, high - 3, high - 4]
}

/// (value, count) pairs, most frequent first, then by value descending.
fn group_by_count(values: &[u8; 5]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for &v in values {
        match groups.iter_mut().find(|(g, _)| *g == v) {
            Some((_, n)) => *n += 1,
            None => groups.push((v, 1)),
        }
    }
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    groups
}

fn value_name(v: u8) -> &'static str {
    match v {
        1 | 14 => "Ace",
        13 => "King",
        12 => "Queen",
        11 => "Jack",
        10 => "Ten",
        9 => "Nine",
        8 => "Eight",
        7 => "Seven",
        6 => "Six",
        5 => "Five",
        4 => "Four",
        3 => "Three",
        _ => "Two",
    }
}

fn value_plural(v: u8) -> String {
    match v {
        6 => "Sixes".to_string(),
        _ => format!("{}s", value_name(v)),
    }
}
