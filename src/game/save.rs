//! Save / load as versioned JSON.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current format. Bump when fields are added.
//! - `MIN_COMPATIBLE_VERSION`: oldest format still loadable. Only bump on
//!   breaking changes (a field removed or its meaning changed); added fields
//!   fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Variant;
use crate::error::{GameError, Result};
use crate::gallery::Gallery;
use crate::rng::SimpleRng;
use crate::tarot::{ActiveEffects, TarotType};

use super::state::{LifeState, Stats};

pub const SAVE_VERSION: u32 = 1;
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: LifeSave,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct LifeSave {
    variant: Variant,
    money: i64,
    fatigue: u32,
    #[serde(default = "first_day")]
    day: u32,
    log: Vec<String>,
    effects: ActiveEffects,
    gallery: Gallery,
    pending_draw: Option<Vec<TarotType>>,
    rng_state: u64,
    cleared_with: Option<String>,
    stats: Stats,
}

fn first_day() -> u32 {
    1
}

fn extract_save(state: &LifeState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: LifeSave {
            variant: state.variant(),
            money: state.player.money,
            fatigue: state.player.fatigue,
            day: state.player.day,
            log: state.player.log.clone(),
            effects: state.effects.clone(),
            gallery: state.gallery.clone(),
            pending_draw: state.pending_draw.clone(),
            rng_state: state.rng.state(),
            cleared_with: state.cleared_with.clone(),
            stats: state.stats.clone(),
        },
    }
}

fn apply_save(state: &mut LifeState, save: LifeSave) {
    state.settings.game.variant = save.variant;
    state.player.money = save.money.max(0);
    state.player.fatigue = save.fatigue.min(state.player.max_fatigue);
    state.player.day = save.day.max(1);
    state.player.log = save.log;
    state.effects = save.effects;
    state.gallery = save.gallery;
    state.gallery.resume_numbering();
    state.pending_draw = save.pending_draw;
    state.rng = SimpleRng::new(save.rng_state);
    state.cleared_with = save.cleared_with;
    state.stats = save.stats;
    state.mole = None;
    state.clock.reset();
}

/// Serialise the game. Refused while a Whac-A-Mole round is running.
pub fn save_to_string(state: &LifeState) -> Result<String> {
    if state.mole.is_some() {
        return Err(GameError::MiniGameBusy);
    }
    serde_json::to_string_pretty(&extract_save(state)).map_err(|e| GameError::Save(e.to_string()))
}

/// Restore a game saved with [`save_to_string`] into `state`, keeping its
/// settings. On error `state` is left as it was.
pub fn load_from_str(state: &mut LifeState, json: &str) -> Result<()> {
    let data: SaveData =
        serde_json::from_str(json).map_err(|e| GameError::Save(format!("unreadable save: {}", e)))?;
    if data.version < MIN_COMPATIBLE_VERSION {
        return Err(GameError::Save(format!(
            "save version {} is too old (oldest supported is {})",
            data.version, MIN_COMPATIBLE_VERSION
        )));
    }
    if data.version < SAVE_VERSION {
        tracing::info!(saved = data.version, current = SAVE_VERSION, "migrating older save");
    }
    apply_save(state, data.game);
    Ok(())
}

pub fn save_to_file<P: AsRef<Path>>(state: &LifeState, path: P) -> Result<()> {
    let json = save_to_string(state)?;
    std::fs::write(path.as_ref(), json).map_err(|e| GameError::Save(e.to_string()))?;
    tracing::info!(path = %path.as_ref().display(), "game saved");
    Ok(())
}

pub fn load_from_file<P: AsRef<Path>>(state: &mut LifeState, path: P) -> Result<()> {
    let json =
        std::fs::read_to_string(path.as_ref()).map_err(|e| GameError::Save(e.to_string()))?;
    load_from_str(state, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;
    use crate::game::logic;

    fn played() -> LifeState {
        let mut state = LifeState::new(GameSettings::default(), 77);
        logic::work(&mut state).unwrap();
        let variant = state.variant();
        state
            .effects
            .apply(TarotType::TheEmpress, variant, &mut state.player);
        logic::draw_fortune(&mut state).unwrap();
        state
    }

    #[test]
    fn extract_and_apply_roundtrip() {
        let mut saved = played();
        let json = save_to_string(&saved).unwrap();

        let mut restored = LifeState::new(GameSettings::default(), 1);
        load_from_str(&mut restored, &json).unwrap();
        assert_eq!(restored.player, saved.player);
        assert_eq!(restored.effects, saved.effects);
        assert_eq!(restored.pending_draw, saved.pending_draw);
        assert_eq!(restored.stats, saved.stats);
        assert_eq!(restored.rng.next_u64(), saved.rng.next_u64());
    }

    #[test]
    fn missing_fields_default() {
        let mut state = LifeState::new(GameSettings::default(), 1);
        load_from_str(&mut state, r#"{"version":1,"game":{"money":42}}"#).unwrap();
        assert_eq!(state.player.money, 42);
        assert_eq!(state.player.day, 1);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn old_version_rejected() {
        let mut state = LifeState::new(GameSettings::default(), 1);
        let err = load_from_str(&mut state, r#"{"version":0,"game":{"money":42}}"#).unwrap_err();
        assert!(matches!(err, GameError::Save(_)));
        assert_eq!(state.player.money, 1000);
    }

    #[test]
    fn garbage_rejected() {
        let mut state = LifeState::new(GameSettings::default(), 1);
        assert!(load_from_str(&mut state, "not json").is_err());
    }

    #[test]
    fn cannot_save_mid_round() {
        let mut state = LifeState::new(GameSettings::default(), 1);
        logic::start_mole(&mut state).unwrap();
        assert_eq!(save_to_string(&state), Err(GameError::MiniGameBusy));
    }

    #[test]
    fn painting_after_load_gets_fresh_id() {
        let mut settings = GameSettings::default();
        settings.game.variant = Variant::Gallery;
        let mut state = LifeState::new(settings, 5);
        let json = r#"{"version":1,"game":{"variant":"gallery","gallery":{"paintings":[
            {"id":"painting_1","title":"Dawn","base_price":120,"state":"Displayed"},
            {"id":"painting_2","title":"Dusk","base_price":90,"state":"Inventory"}
        ]}}}"#;
        load_from_str(&mut state, json).unwrap();

        let painted = logic::create_painting(&mut state).unwrap();
        assert_eq!(painted.id, "painting_3");
        logic::display_painting(&mut state, "painting_2").unwrap();
        assert_eq!(
            state.gallery.get("painting_2").map(|p| p.title.as_str()),
            Some("Dusk")
        );
        assert_eq!(state.gallery.wall_count(), 2);
    }

    #[test]
    fn gallery_survives_roundtrip() {
        let mut settings = GameSettings::default();
        settings.game.variant = Variant::Gallery;
        let mut state = LifeState::new(settings, 5);
        let id = logic::create_painting(&mut state).unwrap().id;
        logic::display_painting(&mut state, &id).unwrap();
        let json = save_to_string(&state).unwrap();

        let mut restored = LifeState::new(GameSettings::default(), 1);
        load_from_str(&mut restored, &json).unwrap();
        assert_eq!(restored.variant(), Variant::Gallery);
        assert_eq!(restored.gallery, state.gallery);
    }
}
