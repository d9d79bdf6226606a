//! Semantic action IDs for Meat Clicker click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_MEAT: u16 = 0;
pub const PRESTIGE_RESET: u16 = 1;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_UPGRADES: u16 = 10;
pub const TAB_PRESTIGE: u16 = 11;
pub const TAB_STATS: u16 = 12;

// ── Upgrade purchase (base + upgrade index 0..7) ────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

// ── Prestige upgrade purchase (base + prestige upgrade index 0..3) ──
pub const BUY_PRESTIGE_UPGRADE_BASE: u16 = 200;
