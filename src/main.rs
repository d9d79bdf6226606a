mod input;
mod logger;
mod meat;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use input::{pixel_to_cell, ClickState, InputEvent};
use meat::save::Persistence;
use meat::MeatClicker;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Milliseconds from the page's monotonic clock, falling back to `Date.now()`.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.terminal_cols,
        cs.terminal_rows,
    )
}

/// Hidden tabs get no `draw_web` frames, so the schedule stalls while hidden.
/// Save when the page is hidden, and stop the timers when it is unloaded.
fn install_page_hooks<P: Persistence + 'static>(
    game: &Rc<RefCell<MeatClicker<P>>>,
) -> Option<()> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let on_visibility = {
        let game = game.clone();
        let document = document.clone();
        Closure::<dyn FnMut()>::new(move || {
            if document.hidden() {
                game.borrow_mut().flush(now_ms());
            }
        })
    };
    document
        .add_event_listener_with_callback(
            "visibilitychange",
            on_visibility.as_ref().unchecked_ref(),
        )
        .ok()?;
    on_visibility.forget();

    let on_pagehide = {
        let game = game.clone();
        Closure::<dyn FnMut(web_sys::PageTransitionEvent)>::new(
            move |event: web_sys::PageTransitionEvent| {
                let mut game = game.borrow_mut();
                game.flush(now_ms());
                // Kept in the back/forward cache: the page may resume.
                if !event.persisted() {
                    game.stop();
                }
            },
        )
    };
    window
        .add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())
        .ok()?;
    on_pagehide.forget();

    Some(())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logger::init();

    let game = Rc::new(RefCell::new(MeatClicker::new(meat::save::default_store())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    if install_page_hooks(&game).is_none() {
        log::warn!("page lifecycle hooks unavailable; saving on the 30s schedule only");
    }
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(action_id) = action {
                game.borrow_mut()
                    .handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut()
                    .handle_input(&InputEvent::Key(c.to_ascii_lowercase()));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut gs = game.borrow_mut();
            gs.frame(now_ms());

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(10), Constraint::Length(3)])
                .split(size);

            meat::render::render(&gs.state, gs.tab, f, chunks[0], &click_state);
            render_help(f, chunks[1]);
        }
    });

    Ok(())
}

fn render_help(f: &mut ratzilla::ratatui::Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "C/Espace: découper  1-8: acheter  A-D: prestige  R: reset  U/P/S: onglets",
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}
