use platformer_rendering::{EntityPresentation, Hud, RenderingError, Scene};
use platformer_system_flow::Session;

/// Copies the session state the renderer needs into `scene`.
pub(crate) fn populate(session: &Session, scene: &mut Scene) -> Result<(), RenderingError> {
    let level = session.level();
    let grid = level.grid();
    scene.set_grid(grid.columns(), grid.rows(), grid.cells())?;

    let player = session.player();
    scene.player = EntityPresentation::new(player.position(), player.facing(), player.is_moving());
    scene.enemies.clear();
    scene.enemies.extend(
        session
            .enemies()
            .iter()
            .map(|enemy| EntityPresentation::new(enemy.position(), enemy.facing(), true)),
    );

    let countdown = session.countdown();
    scene.mode = session.mode();
    scene.exit_open = countdown.is_expired();
    scene.hud = Hud {
        lives: player.lives(),
        max_lives: player.max_lives(),
        level_score: player.score(level.level_index()),
        total_score: player.total_score(),
        seconds_remaining: countdown.seconds_remaining(),
        level_number: level.level_index() + 1,
        level_count: level.level_count(),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_core::{Cell, GameMode, Tunables};
    use platformer_system_flow::FlowInput;
    use platformer_world::{LevelCatalog, LevelStore};

    #[test]
    fn populated_scene_mirrors_the_session() {
        let catalog = LevelCatalog::parse("5-|-@*&-|5#.\n3#.\n").expect("catalog");
        let mut session = Session::new(LevelStore::new(catalog), Tunables::default());
        let mut events = Vec::new();
        session
            .advance(
                FlowInput {
                    confirm: true,
                    ..FlowInput::default()
                },
                &mut events,
            )
            .expect("level loads");

        let mut scene = Scene::empty();
        populate(&session, &mut scene).expect("grid fits");

        assert_eq!((scene.columns(), scene.rows()), (5, 3));
        assert_eq!(scene.cell(1, 1), Some(Cell::Air));
        assert_eq!(scene.cell(1, 2), Some(Cell::Coin));
        assert_eq!(scene.enemies.len(), 1);
        assert_eq!(scene.mode, GameMode::Playing);
        assert!(!scene.exit_open);
        assert_eq!(scene.hud.level_number, 1);
        assert_eq!(scene.hud.level_count, 2);
        assert_eq!(scene.hud.lives, 3);
        assert_eq!(scene.hud.seconds_remaining, 50);
    }
}
