//! Meat Clicker save/load.
//!
//! The save is a flat JSON record with camelCase keys. Upgrades and prestige
//! upgrades are stored as ordered lists and matched back by `id` on load;
//! prestige effects are never stored, they are re-bound from the catalogue.
//! Statistics fields are optional so a save holding only the economy loads.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// localStorage のキー。
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "meatClickerSave";

/// Errors raised by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to serialize save: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse save: {0}")]
    Parse(#[source] serde_json::Error),
    /// Only raised by `LocalStore`.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSave {
    pub id: String,
    pub base_cost: f64,
    pub count: u32,
    pub production: f64,
    pub cost_multiplier: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrestigeUpgradeSave {
    pub id: String,
    pub cost: u64,
    pub purchased: bool,
}

/// Serialized game state.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub meat: f64,
    pub prestige_points: u64,
    pub click_power: f64,
    pub auto_clicker_rate: f64,
    pub prestige_multiplier: f64,
    pub upgrades: Vec<UpgradeSave>,
    pub prestige_upgrades: Vec<PrestigeUpgradeSave>,

    // 統計
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub meat_all_time: f64,
    #[serde(default)]
    pub prestige_count: u32,
}

/// Extract the persistent part of a `GameState`.
pub fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        meat: state.meat,
        prestige_points: state.prestige_points,
        click_power: state.click_power,
        auto_clicker_rate: state.auto_clicker_rate,
        prestige_multiplier: state.prestige_multiplier,
        upgrades: state
            .upgrades
            .iter()
            .map(|u| UpgradeSave {
                id: u.id.to_string(),
                base_cost: u.base_cost,
                count: u.count,
                production: u.production,
                cost_multiplier: u.cost_multiplier,
            })
            .collect(),
        prestige_upgrades: state
            .prestige_upgrades
            .iter()
            .map(|u| PrestigeUpgradeSave {
                id: u.id.to_string(),
                cost: u.cost,
                purchased: u.purchased,
            })
            .collect(),
        total_clicks: state.total_clicks,
        meat_all_time: state.meat_all_time,
        prestige_count: state.prestige_count,
    }
}

/// Overwrite `state` with a save. Entries whose id is not in the catalogue
/// are ignored; catalogue entries missing from the save keep their values.
/// Effects are not re-applied: the stored multipliers already include them.
pub fn apply_save(state: &mut GameState, save: &SaveData) {
    state.meat = save.meat;
    state.prestige_points = save.prestige_points;
    state.click_power = save.click_power;
    state.auto_clicker_rate = save.auto_clicker_rate;
    state.prestige_multiplier = save.prestige_multiplier;

    for saved in &save.upgrades {
        if let Some(u) = state.upgrades.iter_mut().find(|u| u.id == saved.id) {
            u.base_cost = saved.base_cost;
            u.count = saved.count;
            u.production = saved.production;
            u.cost_multiplier = saved.cost_multiplier;
        }
    }

    for saved in &save.prestige_upgrades {
        if let Some(u) = state.prestige_upgrades.iter_mut().find(|u| u.id == saved.id) {
            u.cost = saved.cost;
            u.purchased = saved.purchased;
        }
    }

    state.total_clicks = save.total_clicks;
    state.meat_all_time = save.meat_all_time;
    state.prestige_count = save.prestige_count;
}

/// Durable key-value storage for one save slot.
pub trait Persistence {
    fn save(&mut self, data: &SaveData) -> Result<(), SaveError>;
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&mut self) -> Result<Option<SaveData>, SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// In-memory store holding the JSON text. Used by tests and native builds.
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
#[derive(Default)]
pub struct MemoryStore {
    json: Option<String>,
    /// When set, every write fails with `SaveError::Unavailable`.
    pub fail_writes: bool,
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text, as if written by an earlier session.
    #[cfg(test)]
    pub fn with_json(json: &str) -> Self {
        Self {
            json: Some(json.to_string()),
            fail_writes: false,
        }
    }

    #[cfg(test)]
    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl Persistence for MemoryStore {
    fn save(&mut self, data: &SaveData) -> Result<(), SaveError> {
        if self.fail_writes {
            return Err(SaveError::Unavailable);
        }
        self.json = Some(serde_json::to_string(data).map_err(SaveError::Serialize)?);
        Ok(())
    }

    fn load(&mut self) -> Result<Option<SaveData>, SaveError> {
        match &self.json {
            Some(json) => serde_json::from_str(json).map(Some).map_err(SaveError::Parse),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.json = None;
        Ok(())
    }
}

/// `window.localStorage` backed store. WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage, SaveError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(SaveError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Persistence for LocalStore {
    fn save(&mut self, data: &SaveData) -> Result<(), SaveError> {
        let json = serde_json::to_string(data).map_err(SaveError::Serialize)?;
        Self::storage()?
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn load(&mut self) -> Result<Option<SaveData>, SaveError> {
        let json = Self::storage()?
            .get_item(STORAGE_KEY)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))?;
        match json {
            Some(j) => serde_json::from_str(&j).map(Some).map_err(SaveError::Parse),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        Self::storage()?
            .remove_item(STORAGE_KEY)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }
}

/// Store used by the running app.
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> LocalStore {
    LocalStore
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> MemoryStore {
    MemoryStore::new()
}

/// Save `state` into `store`.
pub fn save_game<P: Persistence>(store: &mut P, state: &GameState) -> Result<(), SaveError> {
    store.save(&extract_save(state))
}

/// Restore `state` from `store`. Returns true if a save was applied.
/// A save that cannot be parsed is discarded and the defaults are kept.
pub fn load_game<P: Persistence>(store: &mut P, state: &mut GameState) -> bool {
    match store.load() {
        Ok(Some(save)) => {
            apply_save(state, &save);
            log::info!(
                "save loaded: {:.1} meat, {} prestige points",
                save.meat,
                save.prestige_points
            );
            true
        }
        Ok(None) => false,
        Err(SaveError::Parse(e)) => {
            log::warn!("discarding unreadable save: {e}");
            if let Err(e) = store.clear() {
                log::warn!("failed to remove unreadable save: {e}");
            }
            false
        }
        Err(e) => {
            log::warn!("failed to load save: {e}");
            false
        }
    }
}
