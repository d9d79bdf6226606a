//! Meat Clicker game state definitions.

/// Meat required before a prestige reset is allowed.
pub const PRESTIGE_THRESHOLD: f64 = 1_000_000.0;

/// Maximum number of entries kept in the event log.
pub const MAX_LOG_ENTRIES: usize = 50;

/// Cost growth factor shared by every regular upgrade.
const COST_MULTIPLIER: f64 = 1.15;

/// A purchasable producer. Each unit adds `production` meat per second.
#[derive(Clone, Debug, PartialEq)]
pub struct Upgrade {
    pub id: &'static str,
    pub name: &'static str,
    pub base_cost: f64,
    pub count: u32,
    /// Meat per second per unit, before the prestige multiplier.
    pub production: f64,
    /// Per-unit cost growth (> 1).
    pub cost_multiplier: f64,
}

impl Upgrade {
    fn new(id: &'static str, name: &'static str, base_cost: f64, production: f64) -> Self {
        Self {
            id,
            name,
            base_cost,
            count: 0,
            production,
            cost_multiplier: COST_MULTIPLIER,
        }
    }

    /// Exact cost of the next unit: `base_cost * cost_multiplier^count`.
    pub fn cost(&self) -> f64 {
        self.base_cost * self.cost_multiplier.powi(self.count as i32)
    }

    /// Cost as shown to the player (truncated). Never used for purchases.
    pub fn display_cost(&self) -> f64 {
        self.cost().floor()
    }
}

/// Permanent effect granted by a prestige upgrade.
///
/// Effects are data, interpreted by [`PrestigeEffect::apply`]. They are bound
/// to upgrades by id in [`GameState::create_prestige_upgrades`] and never
/// serialized.
#[derive(Clone, Debug, PartialEq)]
pub enum PrestigeEffect {
    MultiplyClickPower(f64),
    MultiplyPrestigeMultiplier(f64),
    AddAutoClickRate(f64),
    Composite(Vec<PrestigeEffect>),
}

impl PrestigeEffect {
    /// Apply this effect to the state's multipliers and rates.
    pub fn apply(&self, state: &mut GameState) {
        match self {
            PrestigeEffect::MultiplyClickPower(factor) => state.click_power *= factor,
            PrestigeEffect::MultiplyPrestigeMultiplier(factor) => {
                state.prestige_multiplier *= factor
            }
            PrestigeEffect::AddAutoClickRate(amount) => state.auto_clicker_rate += amount,
            PrestigeEffect::Composite(effects) => {
                for effect in effects {
                    effect.apply(state);
                }
            }
        }
    }

    /// Short description for the prestige shop.
    pub fn describe(&self) -> String {
        match self {
            PrestigeEffect::MultiplyClickPower(f) => format!("Clic x{}", f),
            PrestigeEffect::MultiplyPrestigeMultiplier(f) => format!("Production x{}", f),
            PrestigeEffect::AddAutoClickRate(a) => format!("+{} clic auto/s", a),
            PrestigeEffect::Composite(effects) => effects
                .iter()
                .map(|e| e.describe())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// One-time upgrade bought with prestige points.
#[derive(Clone, Debug, PartialEq)]
pub struct PrestigeUpgrade {
    pub id: &'static str,
    pub name: &'static str,
    /// Cost in prestige points.
    pub cost: u64,
    /// Only ever goes from false to true.
    pub purchased: bool,
    pub effect: PrestigeEffect,
}

/// Log entry shown in the side panel.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full state of a Meat Clicker game.
pub struct GameState {
    /// Current meat (kg).
    pub meat: f64,
    /// Unspent prestige points.
    pub prestige_points: u64,
    /// Base meat per manual click.
    pub click_power: f64,
    /// Virtual clicks per second.
    pub auto_clicker_rate: f64,
    /// Global multiplier on clicks and production.
    pub prestige_multiplier: f64,
    pub upgrades: Vec<Upgrade>,
    pub prestige_upgrades: Vec<PrestigeUpgrade>,

    // Lifetime statistics (not reset by prestige)
    pub total_clicks: u64,
    pub meat_all_time: f64,
    pub prestige_count: u32,

    /// Message log.
    pub log: Vec<LogEntry>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            meat: 0.0,
            prestige_points: 0,
            click_power: 1.0,
            auto_clicker_rate: 0.0,
            prestige_multiplier: 1.0,
            upgrades: Self::create_upgrades(),
            prestige_upgrades: Self::create_prestige_upgrades(),
            total_clicks: 0,
            meat_all_time: 0.0,
            prestige_count: 0,
            log: vec![LogEntry {
                text: "Bienvenue dans Meat Clicker !".into(),
                is_important: true,
            }],
        }
    }

    /// The eight regular upgrades in display order.
    pub fn create_upgrades() -> Vec<Upgrade> {
        vec![
            Upgrade::new("couteau", "Couteau Tranchant", 10.0, 0.1),
            Upgrade::new("boucher", "Boucher Expert", 50.0, 0.5),
            Upgrade::new("abattoir", "Mini Abattoir", 250.0, 2.0),
            Upgrade::new("ferme", "Ferme d'Élevage", 1_000.0, 10.0),
            Upgrade::new("usine", "Usine de Transformation", 5_000.0, 50.0),
            Upgrade::new("corporation", "Corporation Carnée", 25_000.0, 250.0),
            Upgrade::new("labo", "Laboratoire de Viande", 100_000.0, 1_000.0),
            Upgrade::new("dimension", "Dimension Carnivore", 500_000.0, 5_000.0),
        ]
    }

    /// The four prestige upgrades, each bound to its fixed effect.
    pub fn create_prestige_upgrades() -> Vec<PrestigeUpgrade> {
        vec![
            PrestigeUpgrade {
                id: "clickBoost",
                name: "Lame Affûtée",
                cost: 1,
                purchased: false,
                effect: PrestigeEffect::MultiplyClickPower(2.0),
            },
            PrestigeUpgrade {
                id: "productionBoost",
                name: "Efficacité Maximale",
                cost: 2,
                purchased: false,
                effect: PrestigeEffect::MultiplyPrestigeMultiplier(1.5),
            },
            PrestigeUpgrade {
                id: "autoClickBoost",
                name: "Automation Avancée",
                cost: 3,
                purchased: false,
                effect: PrestigeEffect::AddAutoClickRate(1.0),
            },
            PrestigeUpgrade {
                id: "megaBoost",
                name: "Viande Quantique",
                cost: 5,
                purchased: false,
                effect: PrestigeEffect::Composite(vec![
                    PrestigeEffect::MultiplyClickPower(3.0),
                    PrestigeEffect::MultiplyPrestigeMultiplier(2.0),
                ]),
            },
        ]
    }

    /// Meat gained by one manual click.
    pub fn click_gain(&self) -> f64 {
        self.click_power * self.prestige_multiplier
    }

    /// Passive meat per second: auto-clicks plus every owned upgrade.
    pub fn production_per_second(&self) -> f64 {
        self.upgrades.iter().fold(
            self.auto_clicker_rate * self.click_power * self.prestige_multiplier,
            |total, u| total + u.production * u.count as f64 * self.prestige_multiplier,
        )
    }

    /// Production of one more unit of `upgrade`, with the prestige multiplier.
    pub fn unit_production(&self, upgrade: &Upgrade) -> f64 {
        upgrade.production * self.prestige_multiplier
    }

    pub fn can_prestige(&self) -> bool {
        self.meat >= PRESTIGE_THRESHOLD
    }

    pub fn upgrade_index(&self, id: &str) -> Option<usize> {
        self.upgrades.iter().position(|u| u.id == id)
    }

    pub fn prestige_upgrade_index(&self, id: &str) -> Option<usize> {
        self.prestige_upgrades.iter().position(|u| u.id == id)
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG_ENTRIES {
            self.log.remove(0);
        }
    }
}
