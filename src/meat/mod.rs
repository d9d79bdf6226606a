//! Meat Clicker: an incremental meat clicker with prestige resets.

pub mod actions;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use crate::input::InputEvent;
use crate::time::{GameClock, Schedule, ScheduleConfig};

use save::{Persistence, SaveError};
use state::GameState;

/// Which panel is shown below the meat counter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    Upgrades,
    Prestige,
    Stats,
}

/// One game instance: economy state, its save slot, and its timers.
pub struct MeatClicker<P: Persistence> {
    pub state: GameState,
    pub tab: Tab,
    store: P,
    clock: GameClock,
    schedule: Schedule,
}

impl<P: Persistence> MeatClicker<P> {
    pub fn new(store: P) -> Self {
        Self::with_config(store, ScheduleConfig::default())
    }

    /// Start a game from `store`'s save, or from defaults when there is none.
    pub fn with_config(mut store: P, config: ScheduleConfig) -> Self {
        let mut state = GameState::new();
        if save::load_game(&mut store, &mut state) {
            state.add_log("Partie chargée.", false);
        }
        Self {
            state,
            tab: Tab::Upgrades,
            store,
            clock: GameClock::new(),
            schedule: Schedule::new(config),
        }
    }

    pub fn manual_click(&mut self) -> f64 {
        logic::manual_click(&mut self.state)
    }

    pub fn purchase_upgrade(&mut self, upgrade_id: &str) -> bool {
        logic::purchase_upgrade(&mut self.state, upgrade_id)
    }

    pub fn purchase_prestige_upgrade(&mut self, upgrade_id: &str) -> bool {
        logic::purchase_prestige_upgrade(&mut self.state, upgrade_id)
    }

    pub fn advance_time(&mut self, elapsed_secs: f64) {
        logic::advance_time(&mut self.state, elapsed_secs);
    }

    /// Prestige reset, followed by an immediate save.
    pub fn prestige(&mut self) -> Option<u64> {
        let gained = logic::prestige(&mut self.state)?;
        self.autosave();
        Some(gained)
    }

    pub fn save(&mut self) -> Result<(), SaveError> {
        save::save_game(&mut self.store, &self.state)
    }

    /// Save, reporting a failure to the log instead of returning it.
    fn autosave(&mut self) {
        if let Err(e) = self.save() {
            log::warn!("save failed: {e}");
            self.state.add_log("⚠ Sauvegarde impossible", true);
        }
    }

    /// Drive the periodic tasks from a frame timestamp (ms).
    pub fn frame(&mut self, now_ms: f64) {
        self.clock.prime(now_ms);
        let due = self.schedule.poll(now_ms);
        if due.tick {
            let elapsed = self.clock.update(now_ms);
            self.advance_time(elapsed);
        }
        if due.autosave {
            self.autosave();
        }
    }

    /// Credit the time since the last tick and save now, outside the
    /// schedule. Used when the page is hidden, since hidden tabs get no frames.
    pub fn flush(&mut self, now_ms: f64) {
        if self.is_running() {
            self.clock.prime(now_ms);
            let elapsed = self.clock.update(now_ms);
            self.advance_time(elapsed);
        }
        self.autosave();
    }

    /// Cancel the tick and the autosave together.
    pub fn stop(&mut self) {
        self.schedule.stop();
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_running()
    }

    #[cfg(test)]
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    /// Tab-bound keys win over global ones: on the Prestige tab `c` buys the
    /// third prestige upgrade and only space clicks.
    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'u' => {
                self.tab = Tab::Upgrades;
                true
            }
            'p' => {
                self.tab = Tab::Prestige;
                true
            }
            's' => {
                self.tab = Tab::Stats;
                true
            }
            '1'..='8' if self.tab == Tab::Upgrades => {
                let idx = (key as u8 - b'1') as usize;
                self.buy_upgrade_at(idx);
                true
            }
            'a'..='d' if self.tab == Tab::Prestige => {
                let idx = (key as u8 - b'a') as usize;
                self.buy_prestige_upgrade_at(idx);
                true
            }
            'c' | ' ' => {
                self.manual_click();
                true
            }
            'r' if self.tab == Tab::Prestige => {
                self.try_prestige();
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        use crate::meat::actions::*;
        match action_id {
            CLICK_MEAT => {
                self.manual_click();
            }
            PRESTIGE_RESET => self.try_prestige(),
            TAB_UPGRADES => self.tab = Tab::Upgrades,
            TAB_PRESTIGE => self.tab = Tab::Prestige,
            TAB_STATS => self.tab = Tab::Stats,
            id if (BUY_UPGRADE_BASE..BUY_UPGRADE_BASE + 8).contains(&id) => {
                self.buy_upgrade_at((id - BUY_UPGRADE_BASE) as usize);
            }
            id if (BUY_PRESTIGE_UPGRADE_BASE..BUY_PRESTIGE_UPGRADE_BASE + 4).contains(&id) => {
                self.buy_prestige_upgrade_at((id - BUY_PRESTIGE_UPGRADE_BASE) as usize);
            }
            _ => return false,
        }
        true
    }

    fn buy_upgrade_at(&mut self, idx: usize) {
        if let Some(id) = self.state.upgrades.get(idx).map(|u| u.id) {
            self.purchase_upgrade(id);
        }
    }

    fn buy_prestige_upgrade_at(&mut self, idx: usize) {
        if let Some(id) = self.state.prestige_upgrades.get(idx).map(|u| u.id) {
            self.purchase_prestige_upgrade(id);
        }
    }

    fn try_prestige(&mut self) {
        if self.prestige().is_none() {
            self.state
                .add_log("⚠ Il faut 1M de viande pour le prestige", true);
        }
    }
}
