mod app;
mod config;
mod keys;
mod log_buffer;
mod ui;

use std::time::{Duration, Instant};

use app::{App, Confirm};
use cinestream_core::{self as cc, store::FileStore};
use config::Config;
use keys::Action;
use log_buffer::{LogBuffer, LogBufferLayer};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    // Logs go to the in-app log view rather than stdout, which the UI owns.
    let log_buffer = LogBuffer::new();

    let log_file = std::fs::File::create("cinestream-tui.log")?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(LogBufferLayer::new(log_buffer.clone()))
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinestream=info")),
        )
        .init();

    let config = Config::load()?;

    let store = FileStore::new(config.storage.resolve_dir());
    tracing::info!("catalogue stored in {}", store.dir().display());

    let logic = cc::Logic::new(cc::LogicArgs {
        store: Box::new(store),
        storage_key: config.storage.key.clone(),
        back_target: config.navigation.back_target,
        enricher: config.enrichment.client(),
    });

    let mut app = App::new(config, logic, log_buffer);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(app.config.general.tick_rate_ms);
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::draw(frame, app))?;
            app.needs_redraw = false;
        }
        let term_size = terminal.size()?;
        let size = Rect::new(0, 0, term_size.width, term_size.height);

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let mut scroll_delta: i32 = 0;

            // Process the first event, then drain all remaining queued events.
            let mut process_event = |evt: Event, app: &mut App| match evt {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    handle_key_event(app, &key);
                    app.needs_redraw = true;
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        scroll_delta -= 1;
                        app.needs_redraw = true;
                    }
                    MouseEventKind::ScrollDown => {
                        scroll_delta += 1;
                        app.needs_redraw = true;
                    }
                    _ => {
                        handle_mouse_event(app, &mouse, size);
                        app.needs_redraw = true;
                    }
                },
                Event::Resize(_, _) => {
                    app.needs_redraw = true;
                }
                _ => {}
            };

            process_event(event::read()?, app);
            while event::poll(Duration::ZERO)? {
                process_event(event::read()?, app);
            }

            // Apply coalesced scroll as a single operation.
            if scroll_delta != 0 {
                apply_scroll(app, scroll_delta);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key_event(app: &mut App, key: &event::KeyEvent) {
    // A confirmation swallows the next key, whatever it is.
    if let Some(confirm) = app.confirm.take() {
        if keys::confirm_action(key) == Action::Select {
            app.confirm_accepted(confirm);
        }
        return;
    }

    app.logic.dismiss_notice();

    if app.logs_visible {
        if let Some(action) = keys::logs_action(key) {
            ui::logs::handle_key(app, action);
        }
        return;
    }

    if app.logic.form().is_some() {
        if let Some(action) = keys::form_action(key) {
            match action {
                Action::Char(c) => app.logic.type_char(c),
                Action::DeleteChar => app.logic.delete_char(),
                Action::ClearLine => app.logic.clear_field(),
                other => {
                    if let Some(input) = other.as_input() {
                        app.handle_input(input);
                    }
                }
            }
        }
        return;
    }

    let action = if app.logic.player().is_some() {
        keys::player_action(key)
    } else {
        keys::browse_action(key)
    };
    let Some(action) = action else {
        return;
    };

    match action {
        Action::Quit => app.confirm = Some(Confirm::Quit),
        Action::Logs => app.toggle_logs(),
        Action::Add => {
            app.logic.open_create();
        }
        Action::Edit => {
            app.logic.edit_current();
        }
        Action::Delete => app.request_delete(),
        other => {
            if let Some(input) = other.as_input() {
                app.handle_input(input);
            }
        }
    }
}

fn handle_mouse_event(app: &mut App, mouse: &MouseEvent, size: Rect) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    // Clicks only reach the browse screen.
    if app.confirm.is_some() || app.logs_visible || app.logic.focus().overlay().is_some() {
        return;
    }

    let (x, y) = (mouse.column, mouse.row);
    let main = ui::layout::split_main(size);
    let content = ui::layout::split_content(main.content);

    let target = if ui::layout::contains(main.sidebar, x, y) {
        ui::layout::sidebar_hit(main.sidebar, app.sidebar_scroll, x, y)
            .filter(|&index| index <= app.logic.categories().len())
            .map(cc::FocusTarget::Sidebar)
    } else if ui::layout::contains(content.hero, x, y) {
        app.logic
            .current_entry()
            .is_some()
            .then_some(cc::FocusTarget::Hero)
    } else if ui::layout::contains(content.shelf, x, y) {
        ui::layout::shelf_hit(content.shelf, app.shelf_scroll, x, y)
            .filter(|&index| index < app.logic.filtered().len())
            .map(cc::FocusTarget::Shelf)
    } else {
        None
    };

    if let Some(target) = target {
        app.activate_at(target);
    }
}

fn apply_scroll(app: &mut App, delta: i32) {
    if app.logs_visible {
        ui::logs::scroll(app, delta);
    } else if app.logic.focus().overlay().is_none() {
        let last = app
            .logic
            .filtered()
            .len()
            .saturating_sub(app.shelf_visible_cards);
        app.shelf_scroll = if delta < 0 {
            app.shelf_scroll.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (app.shelf_scroll + delta as usize).min(last)
        };
    }
}
