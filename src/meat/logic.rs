//! Meat Clicker economy: pure functions over `GameState`.

use super::state::GameState;

/// Advance passive production by `elapsed_secs` of wall-clock time.
/// Negative or non-finite deltas are treated as zero.
pub fn advance_time(state: &mut GameState, elapsed_secs: f64) {
    let secs = if elapsed_secs.is_finite() {
        elapsed_secs.max(0.0)
    } else {
        0.0
    };
    if secs == 0.0 {
        return;
    }
    let production = state.production_per_second() * secs;
    state.meat += production;
    state.meat_all_time += production;
}

/// Manual click. Returns the meat gained.
pub fn manual_click(state: &mut GameState) -> f64 {
    let gain = state.click_gain();
    state.meat += gain;
    state.meat_all_time += gain;
    state.total_clicks += 1;
    gain
}

/// Try to buy one unit of a regular upgrade. Returns true if successful.
///
/// The exact cost is compared and deducted; truncation is display-only.
pub fn purchase_upgrade(state: &mut GameState, upgrade_id: &str) -> bool {
    let idx = match state.upgrade_index(upgrade_id) {
        Some(i) => i,
        None => return false,
    };

    let cost = state.upgrades[idx].cost();
    if state.meat < cost {
        return false;
    }

    state.meat -= cost;
    state.upgrades[idx].count += 1;

    let upgrade = &state.upgrades[idx];
    log::debug!("bought {} #{} for {:.2}", upgrade.id, upgrade.count, cost);
    let msg = format!("{} acheté ! ({})", upgrade.name, upgrade.count);
    state.add_log(&msg, false);
    true
}

/// Try to buy a prestige upgrade. Its effect is applied exactly once.
/// Returns true if successful.
pub fn purchase_prestige_upgrade(state: &mut GameState, upgrade_id: &str) -> bool {
    let idx = match state.prestige_upgrade_index(upgrade_id) {
        Some(i) => i,
        None => return false,
    };
    if state.prestige_upgrades[idx].purchased {
        return false;
    }
    let cost = state.prestige_upgrades[idx].cost;
    if state.prestige_points < cost {
        return false;
    }

    state.prestige_points -= cost;
    state.prestige_upgrades[idx].purchased = true;

    let effect = state.prestige_upgrades[idx].effect.clone();
    let name = state.prestige_upgrades[idx].name;
    effect.apply(state);

    log::debug!("prestige upgrade {} purchased", upgrade_id);
    state.add_log(
        &format!("✦ {} débloqué ! ({})", name, effect.describe()),
        true,
    );
    true
}

/// Prestige points a reset would grant with `meat` in hand.
///
/// Grows with orders of magnitude: 1e6 gives 1 point, 1e8 gives 3.
pub fn prestige_gain(meat: f64) -> u64 {
    let gain = (meat.log10() - 5.0).floor();
    if gain.is_nan() {
        return 0;
    }
    gain.max(0.0) as u64
}

/// Perform a prestige reset. Returns the points gained, or `None` when
/// below the threshold (state untouched).
///
/// Meat and upgrade counts reset; prestige upgrades, click power,
/// auto-clicker rate and the prestige multiplier carry over.
pub fn prestige(state: &mut GameState) -> Option<u64> {
    if !state.can_prestige() {
        return None;
    }

    let gained = prestige_gain(state.meat);
    state.prestige_points += gained;
    state.prestige_count += 1;

    state.meat = 0.0;
    for upgrade in &mut state.upgrades {
        upgrade.count = 0;
    }

    log::info!(
        "prestige #{}: +{} points (total {})",
        state.prestige_count,
        gained,
        state.prestige_points
    );
    state.add_log(
        &format!(
            "🌟 Prestige ! +{} points (total {})",
            gained, state.prestige_points
        ),
        true,
    );
    Some(gained)
}

/// Format a number with thousands separators (e.g. 1234567 → "1,234,567").
/// One decimal is kept when the fractional part is visible.
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    let int_part = n.floor() as u64;
    let frac = n - int_part as f64;

    let s = int_part.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let result: String = result.chars().rev().collect();

    let tenths = (frac * 10.0).round() as u8;
    if frac > 0.05 && tenths < 10 {
        format!("{}.{}", result, tenths)
    } else {
        result
    }
}

/// Short form with K/M/B/T suffix (e.g. 1500000 → "1.5M").
pub fn format_compact(n: f64) -> String {
    let abs = n.abs();
    if abs >= 1e12 {
        format!("{:.1}T", n / 1e12)
    } else if abs >= 1e9 {
        format!("{:.1}B", n / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", n / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", n / 1e3)
    } else {
        format!("{:.1}", n)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::meat::state::PRESTIGE_THRESHOLD;
    use proptest::prelude::*;

    fn arb_upgrade_idx() -> impl Strategy<Value = usize> {
        0usize..8
    }

    // ── cost curve ────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_cost_matches_closed_form(
            idx in arb_upgrade_idx(),
            count in 0u32..60,
        ) {
            let mut u = GameState::create_upgrades()[idx].clone();
            u.count = count;
            let expected = u.base_cost * u.cost_multiplier.powi(count as i32);
            prop_assert!((u.cost() - expected).abs() <= expected * 1e-12);
        }

        #[test]
        fn prop_cost_strictly_increases(
            idx in arb_upgrade_idx(),
            count in 0u32..60,
        ) {
            let mut u = GameState::create_upgrades()[idx].clone();
            u.count = count;
            let before = u.cost();
            u.count += 1;
            prop_assert!(u.cost() > before);
        }

        #[test]
        fn prop_cost_after_n_purchases(
            idx in arb_upgrade_idx(),
            n in 0u32..25,
        ) {
            let mut state = GameState::new();
            state.meat = 1e15;
            let id = state.upgrades[idx].id;
            for _ in 0..n {
                prop_assert!(purchase_upgrade(&mut state, id));
            }
            let u = &state.upgrades[idx];
            let expected = u.base_cost * u.cost_multiplier.powi(n as i32);
            prop_assert!((u.cost() - expected).abs() <= expected * 1e-12);
        }
    }

    // ── purchase_upgrade ──────────────────────────────────

    proptest! {
        #[test]
        fn prop_purchase_rejected_below_cost(
            idx in arb_upgrade_idx(),
            count in 0u32..30,
            short in 0.001f64..0.999,
        ) {
            let mut state = GameState::new();
            state.upgrades[idx].count = count;
            let cost = state.upgrades[idx].cost();
            state.meat = cost * short;
            let before = state.meat;
            let id = state.upgrades[idx].id;
            prop_assert!(!purchase_upgrade(&mut state, id));
            prop_assert_eq!(state.meat, before);
            prop_assert_eq!(state.upgrades[idx].count, count);
        }

        #[test]
        fn prop_purchase_deducts_exact_cost(
            idx in arb_upgrade_idx(),
            count in 0u32..30,
            extra in 0.0f64..1000.0,
        ) {
            let mut state = GameState::new();
            state.upgrades[idx].count = count;
            let cost = state.upgrades[idx].cost();
            state.meat = cost + extra;
            let before = state.meat;
            let id = state.upgrades[idx].id;
            prop_assert!(purchase_upgrade(&mut state, id));
            let expected = before - cost;
            prop_assert!((state.meat - expected).abs() < 1e-6 * cost.max(1.0),
                "expected {} meat left, got {}", expected, state.meat);
            prop_assert_eq!(state.upgrades[idx].count, count + 1);
        }

        #[test]
        fn prop_purchase_preserves_meat_all_time(
            idx in arb_upgrade_idx(),
        ) {
            let mut state = GameState::new();
            state.meat = 1e12;
            state.meat_all_time = 1e12;
            let id = state.upgrades[idx].id;
            purchase_upgrade(&mut state, id);
            prop_assert_eq!(state.meat_all_time, 1e12);
        }
    }

    // ── advance_time ──────────────────────────────────────

    proptest! {
        #[test]
        fn prop_advance_time_is_linear(
            counts in proptest::collection::vec(0u32..50, 8),
            t1 in 0.0f64..100.0,
            t2 in 0.0f64..100.0,
        ) {
            let mut split = GameState::new();
            let mut whole = GameState::new();
            for (i, c) in counts.iter().enumerate() {
                split.upgrades[i].count = *c;
                whole.upgrades[i].count = *c;
            }
            advance_time(&mut split, t1);
            advance_time(&mut split, t2);
            advance_time(&mut whole, t1 + t2);
            let tolerance = 1e-9 * whole.meat.max(1.0);
            prop_assert!((split.meat - whole.meat).abs() < tolerance,
                "split {} vs whole {}", split.meat, whole.meat);
        }

        #[test]
        fn prop_advance_time_never_reduces_meat(
            elapsed in -100.0f64..100.0,
        ) {
            let mut state = GameState::new();
            state.meat = 100.0;
            state.upgrades[0].count = 5;
            advance_time(&mut state, elapsed);
            prop_assert!(state.meat >= 100.0);
        }
    }

    // ── prestige ──────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_prestige_noop_below_threshold(
            meat in 0.0f64..PRESTIGE_THRESHOLD,
            count in 0u32..20,
            points in 0u64..10,
        ) {
            let mut state = GameState::new();
            state.meat = meat;
            state.prestige_points = points;
            state.upgrades[2].count = count;
            prop_assert_eq!(prestige(&mut state), None);
            prop_assert_eq!(state.meat, meat);
            prop_assert_eq!(state.prestige_points, points);
            prop_assert_eq!(state.upgrades[2].count, count);
        }

        #[test]
        fn prop_prestige_gain_matches_preview(
            meat in PRESTIGE_THRESHOLD..1e15,
        ) {
            let mut state = GameState::new();
            state.meat = meat;
            let preview = prestige_gain(meat);
            prop_assert!(preview >= 1);
            prop_assert_eq!(prestige(&mut state), Some(preview));
            prop_assert_eq!(state.prestige_points, preview);
        }
    }

    // ── format_number ─────────────────────────────────────

    proptest! {
        #[test]
        fn prop_format_number_no_panic(n in -1e12f64..1e12) {
            let _ = format_number(n);
        }

        #[test]
        fn prop_format_number_integer_no_dot(int_val in 0u64..1_000_000_000) {
            let s = format_number(int_val as f64);
            prop_assert!(!s.contains('.'));
            prop_assert_eq!(s.replace(',', ""), int_val.to_string());
        }
    }
}
