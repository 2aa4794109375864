use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::constants::{UI_PAGE_SCROLL_LINES, UI_POLL_INTERVAL_MS};
use crate::tui::app::{App, NoticeLevel, Screen};
use crate::tui::input::{map_key, InputAction};
use crate::tui::render::render_ui;

/// Run the terminal UI
pub async fn run_ui(mut app: App) -> Result<()> {
    // Check if we have an interactive terminal
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("❌ O assistente requer um terminal interativo.");
        eprintln!("   Para uso em scripts: advisor --prompt \"sua pergunta\"");
        return Err(anyhow::anyhow!("No interactive terminal available"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(Duration::from_millis(UI_POLL_INTERVAL_MS))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let action = map_key(key);
        match app.screen() {
            Screen::NamePrompt => handle_name_action(app, action),
            Screen::Chat => {
                if action == InputAction::Submit {
                    if !app.can_ask() {
                        continue;
                    }
                    app.is_generating = true;
                    app.set_notice(NoticeLevel::Info, "Aguardando resposta...");
                    terminal.draw(|f| render_ui(f, app))?;

                    app.submit_question().await;
                    app.is_generating = false;
                } else {
                    handle_chat_action(app, action);
                }
            }
        }
    }

    Ok(())
}

fn handle_name_action(app: &mut App, action: InputAction) {
    match action {
        InputAction::Insert(c) => app.insert_char(c),
        InputAction::Delete => app.delete_char(),
        InputAction::Submit => app.submit_name(),
        InputAction::Cancel | InputAction::Quit => app.quit(),
        _ => {}
    }
}

fn handle_chat_action(app: &mut App, action: InputAction) {
    match action {
        InputAction::Insert(c) if app.can_ask() => app.insert_char(c),
        InputAction::Delete => app.delete_char(),
        InputAction::SelectPrev => app.select_prev(),
        InputAction::SelectNext => app.select_next(),
        InputAction::ScrollUp => app.scroll_up(UI_PAGE_SCROLL_LINES),
        InputAction::ScrollDown => app.scroll_down(UI_PAGE_SCROLL_LINES),
        InputAction::Save => app.save(),
        InputAction::Cancel => {
            if app.input.is_empty() {
                app.quit();
            } else {
                app.input.clear();
            }
        }
        InputAction::Quit => app.quit(),
        _ => {}
    }
}
