//! Fixed timestep simulation tick
//!
//! One call advances the match by exactly one tick. Velocities are defined
//! per tick, so callers must pace calls at the configured rate.

use glam::Vec2;
use rand::Rng;

use super::enemy::EnemyColor;
use super::ship::Combatant;
use super::state::{GameState, MatchPhase};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub quit: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub wave_spawned: bool,
    /// Player lasers fired
    pub shots: u32,
    /// Enemies destroyed by player fire
    pub kills: usize,
    /// Enemy lasers that struck the player
    pub player_hits: u32,
    /// Enemies that reached the bottom of the field
    pub escapes: u32,
}

/// Advance the match by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();
    if state.phase == MatchPhase::Stopped {
        return events;
    }
    state.time_ticks += 1;

    // Loss check; once lost the match stays lost
    if state.lives <= 0 || state.player.health() <= 0 {
        if state.phase == MatchPhase::Running {
            log::info!(
                "Match lost at level {} (lives {}, health {})",
                state.level,
                state.lives,
                state.player.health()
            );
        }
        state.phase = MatchPhase::Lost;
        state.lost_ticks += 1;
    }

    // Frozen while the loss screen is up
    if state.phase == MatchPhase::Lost {
        if state.lost_ticks > state.rules.lost_timeout() {
            state.phase = MatchPhase::Stopped;
        }
        return events;
    }

    if state.enemies.is_empty() {
        spawn_wave(state);
        events.wave_spawned = true;
    }

    if input.quit {
        log::info!("Quit requested at tick {}", state.time_ticks);
        state.phase = MatchPhase::Stopped;
        return events;
    }

    let rules = state.rules;
    let field = rules.field;

    // Player movement: each direction is accepted or rejected on its own
    let steps = [
        (input.left, Vec2::new(-PLAYER_VEL, 0.0)),
        (input.right, Vec2::new(PLAYER_VEL, 0.0)),
        (input.up, Vec2::new(0.0, -PLAYER_VEL)),
        (input.down, Vec2::new(0.0, PLAYER_VEL)),
    ];
    for (pressed, delta) in steps {
        if pressed {
            state.player.try_move(delta, field);
        }
    }

    if input.fire && state.player.shoot() {
        events.shots += 1;
    }

    // Enemies: descend, fire at the player, escape off the bottom
    let GameState {
        player,
        enemies,
        rng,
        lives,
        ..
    } = state;
    enemies.retain_mut(|enemy| {
        enemy.move_by(ENEMY_VEL);
        events.player_hits += enemy.move_lasers(LASER_VEL, field.y, player);
        // No firing until the ship is on screen
        let visible = enemy.pos().y >= 0.0;
        if rules.enemy_fire && visible && rng.random_ratio(1, rules.enemy_fire_odds()) {
            enemy.shoot();
        }

        if enemy.escaped(field.y) {
            *lives -= 1;
            events.escapes += 1;
            log::debug!("Enemy escaped at x={}, lives left {}", enemy.pos().x, lives);
            return false;
        }
        true
    });
    if events.player_hits > 0 {
        log::debug!(
            "Player hit {} time(s), health {}",
            events.player_hits,
            player.health()
        );
    }

    events.kills = state
        .player
        .move_lasers(-LASER_VEL, field.y, &mut state.enemies);
    if events.kills > 0 {
        log::debug!(
            "Destroyed {} enemy(s), {} remaining",
            events.kills,
            state.enemies.len()
        );
    }

    events
}

/// Start the next wave: bump the level, grow the wave, and spawn it above
/// the visible field with random columns and colors
pub fn spawn_wave(state: &mut GameState) {
    state.level += 1;
    state.wave_length += WAVE_GROWTH;

    let x_max = (state.rules.field.x as i32 - SPAWN_MARGIN_RIGHT).max(SPAWN_MARGIN_LEFT + 1);
    for _ in 0..state.wave_length {
        let x = state.rng.random_range(SPAWN_MARGIN_LEFT..x_max);
        let y = state.rng.random_range(SPAWN_Y_MIN..SPAWN_Y_MAX);
        let color = EnemyColor::random(&mut state.rng);
        state.spawn_enemy(Vec2::new(x as f32, y as f32), color);
    }

    log::info!(
        "Level {}: spawned wave of {} enemies",
        state.level,
        state.wave_length
    );
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::assets::Assets;
    use crate::sim::state::Rules;

    /// Match without enemy fire, so outcomes depend only on input
    fn quiet_state() -> GameState {
        let rules = Rules {
            enemy_fire: false,
            ..Rules::default()
        };
        GameState::with_rules(7, rules, Rc::new(Assets::builtin()))
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_wave_escalation() {
        let mut state = quiet_state();
        let events = tick(&mut state, &TickInput::default());
        assert!(events.wave_spawned);
        assert_eq!(state.level, 1);
        assert_eq!(state.wave_length, 10);
        assert_eq!(state.enemies.len(), 10);

        state.enemies.clear();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
        assert_eq!(state.wave_length, 15);
        assert_eq!(state.enemies.len(), 15);

        state.enemies.clear();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 3);
        assert_eq!(state.wave_length, 20);
    }

    #[test]
    fn test_wave_spawns_above_field_in_margin() {
        let mut state = quiet_state();
        spawn_wave(&mut state);
        for enemy in &state.enemies {
            let pos = enemy.pos();
            assert!(pos.x >= SPAWN_MARGIN_LEFT as f32);
            assert!(pos.x < FIELD_WIDTH - SPAWN_MARGIN_RIGHT as f32);
            assert!(pos.y >= SPAWN_Y_MIN as f32 && pos.y < SPAWN_Y_MAX as f32);
        }
    }

    #[test]
    fn test_no_spawn_while_wave_alive() {
        let mut state = quiet_state();
        state.spawn_enemy(Vec2::new(300.0, 0.0), EnemyColor::Red);
        let events = tick(&mut state, &TickInput::default());
        assert!(!events.wave_spawned);
        assert_eq!(state.level, 0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_enemy_escape_costs_a_life() {
        let mut state = quiet_state();
        state.spawn_enemy(Vec2::new(300.0, 0.0), EnemyColor::Red);

        let mut escaped_at = None;
        for t in 1..=750 {
            let events = tick(&mut state, &TickInput::default());
            if events.escapes > 0 {
                escaped_at = Some(t);
                break;
            }
        }
        assert!(escaped_at.is_some());
        assert_eq!(state.lives, START_LIVES - 1);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health(), START_HEALTH);
    }

    #[test]
    fn test_enemy_laser_damages_player() {
        let mut state = quiet_state();
        state.spawn_enemy(Vec2::new(325.0, 400.0), EnemyColor::Blue);
        assert!(state.enemies[0].shoot());

        for _ in 0..100 {
            let events = tick(&mut state, &TickInput::default());
            if events.player_hits > 0 {
                break;
            }
        }
        assert_eq!(state.player.health(), START_HEALTH - LASER_DAMAGE);
        assert!(state.enemies[0].lasers().is_empty());
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_player_laser_destroys_enemy() {
        let mut state = quiet_state();
        state.spawn_enemy(Vec2::new(325.0, 300.0), EnemyColor::Green);

        let events = tick(&mut state, &fire());
        assert_eq!(events.shots, 1);
        assert_eq!(state.player.lasers().len(), 1);

        let mut killed = false;
        for _ in 0..100 {
            let events = tick(&mut state, &TickInput::default());
            if events.kills > 0 {
                killed = true;
                break;
            }
        }
        assert!(killed);
        assert!(state.enemies.is_empty());
        assert!(state.player.lasers().is_empty());
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_one_laser_kills_one_of_stacked_enemies() {
        let mut state = quiet_state();
        state.spawn_enemy(Vec2::new(325.0, 300.0), EnemyColor::Green);
        state.spawn_enemy(Vec2::new(325.0, 300.0), EnemyColor::Red);
        state.spawn_enemy(Vec2::new(100.0, 300.0), EnemyColor::Blue);

        tick(&mut state, &fire());
        let mut kills = 0;
        for _ in 0..100 {
            kills += tick(&mut state, &TickInput::default()).kills;
            if kills > 0 {
                break;
            }
        }
        assert_eq!(kills, 1);
        assert_eq!(state.enemies.len(), 2);
        assert!(state.player.lasers().is_empty());
        assert_eq!(state.enemies[1].color(), EnemyColor::Blue);
    }

    #[test]
    fn test_held_fire_clears_a_column() {
        let mut state = quiet_state();
        for y in [100.0, 250.0, 400.0] {
            state.spawn_enemy(Vec2::new(325.0, y), EnemyColor::Red);
        }

        let mut kills = 0;
        let mut most_in_flight = 0;
        for _ in 0..600 {
            kills += tick(&mut state, &fire()).kills;
            most_in_flight = most_in_flight.max(state.player.lasers().len());
            if state.enemies.is_empty() {
                break;
            }
        }
        assert_eq!(kills, 3);
        assert!(most_in_flight >= 2);
        assert_eq!(state.lives, START_LIVES);
        // Cleared before the next wave could spawn
        assert_eq!(state.level, 0);
    }

    #[test]
    fn test_simultaneous_escapes() {
        let mut state = quiet_state();
        state.spawn_enemy(Vec2::new(100.0, 710.0), EnemyColor::Red);
        state.spawn_enemy(Vec2::new(300.0, 0.0), EnemyColor::Green);
        state.spawn_enemy(Vec2::new(500.0, 710.0), EnemyColor::Blue);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events.escapes, 2);
        assert_eq!(state.lives, START_LIVES - 2);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].color(), EnemyColor::Green);
        assert_eq!(state.enemies[0].pos(), Vec2::new(300.0, 1.0));
    }

    #[test]
    fn test_enemies_hold_fire_above_field() {
        // fps 1 makes each visible enemy fire half the time
        let rules = Rules {
            fps: 1,
            ..Rules::default()
        };
        let mut state = GameState::with_rules(3, rules, Rc::new(Assets::builtin()));
        state.spawn_enemy(Vec2::new(300.0, -1000.0), EnemyColor::Red);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.enemies[0].lasers().is_empty());
        assert_eq!(state.enemies[0].ship().cooldown(), 0);

        state.enemies[0].ship_mut().pos.y = 0.0;
        let mut fired = false;
        for _ in 0..40 {
            tick(&mut state, &TickInput::default());
            if !state.enemies[0].lasers().is_empty() {
                fired = true;
                break;
            }
        }
        assert!(fired);
    }

    #[test]
    fn test_held_fire_respects_cooldown() {
        let mut state = quiet_state();
        let mut shots = 0;
        for _ in 0..61 {
            shots += tick(&mut state, &fire()).shots;
        }
        // Ticks 1, 31 and 61
        assert_eq!(shots, 3);
    }

    #[test]
    fn test_movement_input() {
        let mut state = quiet_state();
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(
            state.player.pos(),
            Vec2::new(PLAYER_START_X - PLAYER_VEL, PLAYER_START_Y - PLAYER_VEL)
        );

        // Opposite directions cancel
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos().x, PLAYER_START_X - PLAYER_VEL);
    }

    #[test]
    fn test_loss_freezes_then_stops() {
        let mut state = quiet_state();
        state.spawn_enemy(Vec2::new(300.0, 0.0), EnemyColor::Red);
        state.lives = 0;
        let enemy_y = state.enemies[0].pos().y;

        let input = TickInput {
            left: true,
            fire: true,
            quit: true,
            ..Default::default()
        };
        let timeout = state.rules.lost_timeout();
        for _ in 0..timeout {
            tick(&mut state, &input);
            assert_eq!(state.phase, MatchPhase::Lost);
        }
        // Nothing moved, nothing fired, quit ignored
        assert_eq!(state.player.pos().x, PLAYER_START_X);
        assert!(state.player.lasers().is_empty());
        assert_eq!(state.enemies[0].pos().y, enemy_y);

        tick(&mut state, &input);
        assert_eq!(state.phase, MatchPhase::Stopped);
        assert_eq!(state.lost_ticks, timeout + 1);
    }

    #[test]
    fn test_zero_health_loses() {
        let mut state = quiet_state();
        state.player.take_damage(START_HEALTH);
        tick(&mut state, &TickInput::default());
        assert!(state.is_lost());
    }

    #[test]
    fn test_quit_stops() {
        let mut state = quiet_state();
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.is_stopped());

        // Stopped is terminal
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_enemy_fire_happens() {
        let mut state = GameState::new(11, Rc::new(Assets::builtin()));
        tick(&mut state, &TickInput::default());
        // Bring the wave on screen so every enemy may fire
        for enemy in &mut state.enemies {
            enemy.ship_mut().pos.y = 0.0;
        }
        let mut fired = false;
        for _ in 0..600 {
            tick(&mut state, &TickInput::default());
            if state.enemies.iter().any(|e| !e.lasers().is_empty()) {
                fired = true;
                break;
            }
        }
        assert!(fired);
    }

    #[test]
    fn test_determinism() {
        let assets = Rc::new(Assets::builtin());
        let mut state1 = GameState::new(99999, Rc::clone(&assets));
        let mut state2 = GameState::new(99999, assets);

        let inputs = [
            TickInput::default(),
            fire(),
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos(), b.pos());
            assert_eq!(a.color(), b.color());
            assert_eq!(a.lasers().len(), b.lasers().len());
        }
        assert_eq!(state1.player.health(), state2.player.health());
    }
}
