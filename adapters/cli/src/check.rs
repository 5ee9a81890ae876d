use platformer_core::Cell;
use platformer_world::{rle, LevelCatalog, LevelLoadError};
use tracing::warn;

/// Shape and contents of one decoded catalog level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LevelSummary {
    pub(crate) index: usize,
    pub(crate) columns: usize,
    pub(crate) rows: usize,
    pub(crate) coins: usize,
    pub(crate) enemies: usize,
    pub(crate) exits: usize,
    pub(crate) has_spawn: bool,
}

/// Decodes every level of the catalog, stopping at the first broken one.
pub(crate) fn summarise(catalog: &LevelCatalog) -> Result<Vec<LevelSummary>, LevelLoadError> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, definition)| -> Result<LevelSummary, LevelLoadError> {
            let grid = rle::decode_level(definition)
                .map_err(|source| LevelLoadError::Decode { index, source })?;
            let count = |kind: Cell| grid.iter().filter(|(_, cell)| *cell == kind).count();

            let summary = LevelSummary {
                index,
                columns: grid.columns(),
                rows: grid.rows(),
                coins: count(Cell::Coin),
                enemies: count(Cell::Enemy),
                exits: count(Cell::Exit),
                has_spawn: count(Cell::Player) > 0,
            };
            if !summary.has_spawn {
                warn!(index, "level has no player spawn marker");
            }
            if summary.exits == 0 {
                warn!(index, "level has no exit");
            }
            Ok(summary)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_count_level_contents() {
        let catalog = LevelCatalog::parse("; two rooms\n5-|-@*&E|5#.\n2*|3-.\n").expect("catalog");

        let summaries = summarise(&catalog).expect("valid levels");

        assert_eq!(
            summaries,
            vec![
                LevelSummary {
                    index: 0,
                    columns: 5,
                    rows: 3,
                    coins: 1,
                    enemies: 1,
                    exits: 1,
                    has_spawn: true,
                },
                LevelSummary {
                    index: 1,
                    columns: 3,
                    rows: 2,
                    coins: 2,
                    enemies: 0,
                    exits: 0,
                    has_spawn: false,
                },
            ]
        );
    }

    #[test]
    fn broken_level_reports_its_index() {
        let catalog = LevelCatalog::parse("3#.\n2#x.\n").expect("catalog");
        let error = summarise(&catalog).expect_err("unknown glyph");
        assert!(matches!(error, LevelLoadError::Decode { index: 1, .. }));
    }
}
