//! Built-in starter board used when no persisted snapshot exists.
//!
//! Seeds are plain `'static` data so they can live in `const` items and be
//! passed explicitly into the store's `load` as the fallback board.

use crate::model::board::{Board, BoardList, BoardValidationError, Card, CardId, ListId};

/// Static description of one seeded card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCard {
    pub id: &'static str,
    pub title: &'static str,
}

/// Static description of one seeded list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedList {
    pub id: &'static str,
    pub title: &'static str,
    pub cards: &'static [SeedCard],
}

/// Immutable board template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedBoard {
    pub lists: &'static [SeedList],
}

/// Starter board shown on first launch.
pub const DEFAULT_SEED: SeedBoard = SeedBoard {
    lists: &[
        SeedList {
            id: "list-1",
            title: "Todo",
            cards: &[
                SeedCard {
                    id: "card-1",
                    title: "Learning how to cook",
                },
                SeedCard {
                    id: "card-2",
                    title: "Making sandwich",
                },
                SeedCard {
                    id: "card-3",
                    title: "Taking the trash out",
                },
            ],
        },
        SeedList {
            id: "list-2",
            title: "Doing",
            cards: &[],
        },
    ],
};

/// Seed with no lists at all.
pub const EMPTY_SEED: SeedBoard = SeedBoard { lists: &[] };

impl SeedBoard {
    /// Materializes the template into a validated board.
    ///
    /// Seeded ids are stable, so two materializations compare equal.
    pub fn to_board(&self) -> Result<Board, BoardValidationError> {
        self.check_titles()?;
        let list_ids = self
            .lists
            .iter()
            .map(|list| ListId::from(list.id))
            .collect();
        let lists = self
            .lists
            .iter()
            .map(|list| {
                BoardList::with_id(ListId::from(list.id), list.title).with_cards(
                    list.cards
                        .iter()
                        .map(|card| Card::with_id(CardId::from(card.id), card.title))
                        .collect(),
                )
            })
            .collect();
        Board::from_parts(list_ids, lists)
    }

    fn check_titles(&self) -> Result<(), BoardValidationError> {
        for list in self.lists {
            if list.title.trim().is_empty() {
                return Err(BoardValidationError::BlankListTitle(ListId::from(list.id)));
            }
            if let Some(card) = list.cards.iter().find(|card| card.title.trim().is_empty()) {
                return Err(BoardValidationError::BlankCardTitle(CardId::from(card.id)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SeedBoard, SeedCard, SeedList, DEFAULT_SEED, EMPTY_SEED};
    use crate::model::board::{BoardValidationError, CardId};

    #[test]
    fn default_seed_is_a_valid_board() {
        let board = DEFAULT_SEED.to_board().expect("default seed should validate");
        assert_eq!(board.list_count(), 2);
        assert_eq!(board.card_count(), 3);
        assert_eq!(
            board.lists_in_order().map(|list| list.title.as_str()).collect::<Vec<_>>(),
            vec!["Todo", "Doing"]
        );
    }

    #[test]
    fn seeds_materialize_deterministically() {
        assert_eq!(
            DEFAULT_SEED.to_board().expect("seed"),
            DEFAULT_SEED.to_board().expect("seed")
        );
        assert_eq!(EMPTY_SEED.to_board().expect("empty seed").list_count(), 0);
    }

    #[test]
    fn seed_with_blank_card_title_is_refused() {
        const BAD_SEED: SeedBoard = SeedBoard {
            lists: &[SeedList {
                id: "l1",
                title: "Todo",
                cards: &[SeedCard { id: "c1", title: "  " }],
            }],
        };
        assert_eq!(
            BAD_SEED.to_board(),
            Err(BoardValidationError::BlankCardTitle(CardId::from("c1")))
        );
    }
}
