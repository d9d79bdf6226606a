//! Meat Clicker rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::{format_compact, format_number, prestige_gain};
use super::state::{GameState, PRESTIGE_THRESHOLD};
use super::Tab;

pub fn render(
    state: &GameState,
    tab: Tab,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    // Log panel on the right when wide enough
    let (main_area, log_area) = if !is_narrow_layout(area.width) && area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // counter
            Constraint::Length(3), // tab bar
            Constraint::Min(5),    // content
        ])
        .split(main_area);

    let mut cs = click_state.borrow_mut();
    render_counter(state, f, chunks[0], &mut cs);
    render_tab_bar(tab, f, chunks[1], &mut cs);
    match tab {
        Tab::Upgrades => render_upgrades(state, f, chunks[2], &mut cs),
        Tab::Prestige => render_prestige(state, f, chunks[2], &mut cs),
        Tab::Stats => render_stats(state, f, chunks[2]),
    }

    if let Some(log_area) = log_area {
        render_log(state, f, log_area);
    }
}

/// Meat counter. The whole panel is the click target.
fn render_counter(state: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let meat_style = Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        format!("🥩 {} kg", format_number(state.meat.floor())),
        meat_style,
    )));
    cl.push(Line::from(vec![
        Span::styled(
            format!("{:.1} kg/s", state.production_per_second()),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("   ✦ {} pts de prestige", state.prestige_points),
            Style::default().fg(Color::Yellow),
        ),
    ]));
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                " [Espace] ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("Découper la viande (+{:.1})", state.click_gain()),
                Style::default().fg(Color::White),
            ),
        ]),
        CLICK_MEAT,
    );

    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Meat Clicker "),
        );
    f.render_widget(widget, area);

    for row in area.y..area.y + area.height {
        cs.add_row_target(area, row, CLICK_MEAT);
    }
}

fn render_tab_bar(tab: Tab, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let style = |active: bool, color: Color| {
        if active {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    TabBar::new()
        .tab("U Améliorations", style(tab == Tab::Upgrades, Color::Red), TAB_UPGRADES)
        .tab("P Prestige", style(tab == Tab::Prestige, Color::Yellow), TAB_PRESTIGE)
        .tab("S Stats", style(tab == Tab::Stats, Color::Cyan), TAB_STATS)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(f, area, cs);
}

fn render_upgrades(state: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let compact = is_narrow_layout(area.width);
    let mut cl = ClickableList::new();

    for (i, upgrade) in state.upgrades.iter().enumerate() {
        let can_afford = state.meat >= upgrade.cost();
        let key_style = if can_afford {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text_style = if can_afford {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let cost = if compact {
            format_compact(upgrade.display_cost())
        } else {
            format_number(upgrade.display_cost())
        };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), key_style),
                Span::styled(format!("{:<24} {:>3}x ", upgrade.name, upgrade.count), text_style),
                Span::styled(format!("{:>10} kg ", cost), text_style),
                Span::styled(
                    format!("+{:.1}/s", state.unit_production(upgrade)),
                    Style::default().fg(Color::Green),
                ),
            ]),
            BUY_UPGRADE_BASE + i as u16,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Améliorations (tap/1-8 pour acheter) ");
    cl.register_targets(area, cs, 1, 1);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_prestige(state: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let gain = prestige_gain(state.meat);
    let can_prestige = state.can_prestige();
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        format!(
            " Points: {}   Multiplicateur: x{:.2}",
            state.prestige_points, state.prestige_multiplier
        ),
        Style::default().fg(Color::Yellow),
    )));

    let reset_style = if can_prestige {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    cl.push_clickable(
        Line::from(Span::styled(
            format!(
                " [R] Prestige (Nécessite {} de viande) - Gain: {} points",
                format_compact(PRESTIGE_THRESHOLD),
                gain
            ),
            reset_style,
        )),
        PRESTIGE_RESET,
    );
    cl.push(Line::from(""));

    for (i, upgrade) in state.prestige_upgrades.iter().enumerate() {
        let key = (b'A' + i as u8) as char;
        if upgrade.purchased {
            cl.push(Line::from(Span::styled(
                format!("  ✔  {} ({})", upgrade.name, upgrade.effect.describe()),
                Style::default().fg(Color::Green),
            )));
            continue;
        }
        let affordable = state.prestige_points >= upgrade.cost;
        let style = if affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", key),
                    style.fg(if affordable { Color::Yellow } else { Color::DarkGray }),
                ),
                Span::styled(
                    format!(
                        "{} · {} pt(s) · {}",
                        upgrade.name,
                        upgrade.cost,
                        upgrade.effect.describe()
                    ),
                    style,
                ),
            ]),
            BUY_PRESTIGE_UPGRADE_BASE + i as u16,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Prestige ");
    cl.register_targets(area, cs, 1, 1);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_stats(state: &GameState, f: &mut Frame, area: Rect) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let row = |name: &str, v: String| {
        Line::from(vec![
            Span::styled(format!(" {:<22}", name), label),
            Span::styled(v, value),
        ])
    };

    let owned: u32 = state.upgrades.iter().map(|u| u.count).sum();
    let lines = vec![
        row("Viande totale produite", format_number(state.meat_all_time.floor())),
        row("Clics", format_number(state.total_clicks as f64)),
        row("Production", format!("{:.1} kg/s", state.production_per_second())),
        row("Puissance de clic", format!("{:.1}", state.click_power)),
        row("Clics auto/s", format!("{:.1}", state.auto_clicker_rate)),
        row("Multiplicateur", format!("x{:.2}", state.prestige_multiplier)),
        row("Améliorations", owned.to_string()),
        row("Prestiges", state.prestige_count.to_string()),
        row("Points de prestige", state.prestige_points.to_string()),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Statistiques "),
    );
    f.render_widget(widget, area);
}

fn render_log(state: &GameState, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);

    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Journal "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
