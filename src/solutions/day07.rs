use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use thiserror::Error;

#[solution_runner(name = "Day 7: Camel Cards", parsed = Hands, part_one = Day07, part_two = Day07)]
impl super::Day<7> {}

#[derive(Error, Debug)]
enum ParseHandError {
    #[error("expected \"<five cards> <bid>\"")]
    Format,

    #[error("unknown card {0:?}")]
    UnknownCard(char),
}

/*
Each line is a hand of five cards and a bid. Hands are ordered by type first, then card by card from
the left. A hand's winnings are its bid times its rank, the weakest hand having rank 1.
*/

const CARD_ORDER: &str = "23456789TJQKA";

/// Card strength, from 0 for `2` to 12 for `A`.
type Card = u8;

const JACK: Card = 9;
/// Strength given to a jack when it is played as a joker, below every other card.
const JOKER: Card = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

impl HandType {
    /// Classify a hand, letting every joker copy the card of the largest group.
    fn classify(cards: &[Card; 5], jokers_wild: bool) -> Self {
        let mut counts = [0u8; CARD_ORDER.len()];
        let mut jokers = 0;
        for &card in cards {
            if jokers_wild && card == JACK {
                jokers += 1;
            } else {
                counts[usize::from(card)] += 1;
            }
        }
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts[0] += jokers;

        match (counts[0], counts[1]) {
            (5, _) => Self::FiveOfAKind,
            (4, _) => Self::FourOfAKind,
            (3, 2) => Self::FullHouse,
            (3, _) => Self::ThreeOfAKind,
            (2, 2) => Self::TwoPair,
            (2, _) => Self::OnePair,
            _ => Self::HighCard,
        }
    }
}

#[derive(Debug)]
struct Hand {
    cards: [Card; 5],
    bid: u64,
}

impl Hand {
    /// A key ordering hands from weakest to strongest.
    fn strength(&self, jokers_wild: bool) -> (HandType, [Card; 5]) {
        let tiebreak = self.cards.map(|card| {
            if jokers_wild && card == JACK {
                JOKER
            } else if jokers_wild && card < JACK {
                card + 1
            } else {
                card
            }
        });
        (HandType::classify(&self.cards, jokers_wild), tiebreak)
    }
}

fn parse_hand(line: &str) -> DynamicResult<Hand> {
    let (cards, bid) = line.split_once(' ').ok_or(ParseHandError::Format)?;
    let cards: Vec<Card> = cards
        .chars()
        .map(|ch| {
            CARD_ORDER
                .find(ch)
                .and_then(|index| Card::try_from(index).ok())
                .ok_or(ParseHandError::UnknownCard(ch))
        })
        .collect::<Result<_, _>>()?;
    Ok(Hand {
        cards: cards.try_into().map_err(|_| ParseHandError::Format)?,
        bid: parse_with_context(bid.trim())?,
    })
}

struct Hands(Vec<Hand>);

impl ParseData for Hands {
    fn parse(input: &str) -> DynamicResult<Self> {
        let hands = parse_input_lines(input, |_, line| parse_hand(line))
            .collect::<Result<_, _>>()?;
        Ok(Self(hands))
    }
}

fn total_winnings(hands: &[Hand], jokers_wild: bool) -> Option<u64> {
    let mut ranked: Vec<_> = hands
        .iter()
        .map(|hand| (hand.strength(jokers_wild), hand.bid))
        .collect();
    ranked.sort_unstable();
    let winnings: Option<Vec<u64>> = (1..)
        .zip(ranked)
        .map(|(rank, (_, bid))| bid.checked_mul(rank))
        .collect();
    winnings?.into_iter().checked_sum()
}

/*
For part 1, sum the winnings of every hand.
*/

struct Day07;

impl Solution<PartOne> for Day07 {
    type Input = Hands;
    type Output = u64;

    fn solve(input: &Hands) -> DynamicResult<u64> {
        Ok(total_winnings(&input.0, false).ok_or("total winnings overflowed")?)
    }
}

/*
For part 2, jacks are jokers. A joker acts as whatever card makes the best hand type, but on its own
is the weakest card when breaking ties.
*/

impl Solution<PartTwo> for Day07 {
    type Input = Hands;
    type Output = u64;

    fn solve(input: &Hands) -> DynamicResult<u64> {
        Ok(total_winnings(&input.0, true).ok_or("total winnings overflowed")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Hands::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 6440);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Hands::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 5905);
        Ok(())
    }

    #[test]
    fn jokers_join_the_largest_group() -> DynamicResult<()> {
        let all_jokers = parse_hand("JJJJJ 1")?;
        assert_eq!(
            HandType::classify(&all_jokers.cards, true),
            HandType::FiveOfAKind
        );
        let two_pair = parse_hand("KTJJT 1")?;
        assert_eq!(
            HandType::classify(&two_pair.cards, false),
            HandType::TwoPair
        );
        assert_eq!(
            HandType::classify(&two_pair.cards, true),
            HandType::FourOfAKind
        );
        Ok(())
    }

    #[test]
    fn bad_hands_are_rejected() {
        assert!(Hands::parse("32T3 765\n").is_err());
        assert!(Hands::parse("32T3X 765\n").is_err());
    }
}
