use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::session::{Role, Session};
use crate::tui::app::{App, NoticeLevel, Screen};
use crate::tui::markdown::parse_markdown;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let empty = Session::new();
    let session = app.session().unwrap_or(&empty);

    match app.screen() {
        Screen::NamePrompt => render_name_screen(frame, app, session),
        Screen::Chat => render_chat_screen(frame, app, session),
    }
}

fn render_name_screen(frame: &mut Frame, app: &App, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Name input
            Constraint::Min(3),    // Transcript
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Olá! Qual é o seu nome? "),
    );
    frame.render_widget(input, chunks[1]);

    render_transcript(frame, chunks[2], app, session);
    render_status_bar(frame, chunks[3], app, session);
}

fn render_chat_screen(frame: &mut Frame, app: &App, session: &Session) {
    let quota_notice = app.advisor.notice(session);
    let question_rows = app.advisor.profile().suggested_questions.len() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                         // Header
            Constraint::Length(1),                                         // Welcome
            Constraint::Length(if quota_notice.is_some() { 1 } else { 0 }), // Quota notice
            Constraint::Length(if app.can_ask() { question_rows } else { 0 }), // Suggestions
            Constraint::Min(5),                                            // Transcript
            Constraint::Length(3),                                         // Input
            Constraint::Length(1),                                         // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let welcome = Paragraph::new(app.advisor.profile().welcome(session.name()))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(welcome, chunks[1]);

    if let Some(text) = quota_notice {
        let color = if app.can_ask() { Color::Yellow } else { Color::Red };
        let notice = Paragraph::new(text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        frame.render_widget(notice, chunks[2]);
    }

    if app.can_ask() {
        render_suggestions(frame, chunks[3], app, session);
    }

    render_transcript(frame, chunks[4], app, session);
    render_input(frame, chunks[5], app);
    render_status_bar(frame, chunks[6], app, session);
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_text = vec![Line::from(vec![
        Span::styled(
            app.advisor.profile().title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Modelo: "),
        Span::styled(app.advisor.model(), Style::default().fg(Color::Green)),
    ])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Render the suggested questions as a radio list
fn render_suggestions(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let typed = !app.input.trim().is_empty();

    let items: Vec<ListItem> = app
        .advisor
        .profile()
        .suggested_questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let selected = i == app.selected_question && !typed;
            let marker = if selected { "(•) " } else { "( ) " };
            let style = if typed {
                Style::default().fg(Color::DarkGray)
            } else if selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(*question, style),
            ]))
        })
        .collect();

    let title = format!(
        " {}, selecione uma das opções abaixo ou faça sua própria pergunta ",
        session.name()
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title),
    );
    frame.render_widget(list, area);
}

/// Render the running transcript
fn render_transcript(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let mut lines = Vec::new();

    for msg in session.messages() {
        let color = match msg.role {
            Role::User => Color::Blue,
            Role::Assistant => Color::Green,
        };

        lines.push(Line::from(Span::styled(
            format!("{}:", msg.role.display_name()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));

        match msg.role {
            Role::User => {
                for line in msg.content.lines() {
                    lines.push(Line::from(line.to_string()));
                }
            }
            Role::Assistant => lines.extend(parse_markdown(&msg.content)),
        }

        lines.push(Line::default());
    }

    if app.is_generating {
        lines.push(Line::from(Span::styled(
            "Assistente está digitando...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Rows after wrapping to the inner width, not logical lines
    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    let rows = body.line_count(area.width.saturating_sub(2));
    let viewport = area.height.saturating_sub(2);
    let max_scroll = u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_sub(viewport);
    app.set_max_scroll(max_scroll);
    let scroll = max_scroll.saturating_sub(app.scroll_offset.min(max_scroll));

    let transcript = body
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Histórico de Conversa "),
        )
        .scroll((scroll, 0));

    frame.render_widget(transcript, area);
}

/// Render the free-text input
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let (text, title, color) = if app.can_ask() {
        (
            app.input.clone(),
            " Ou escreva sua própria pergunta (Enter envia) ",
            Color::Cyan,
        )
    } else {
        (
            app.advisor.gate().exhausted_message(),
            " Limite de perguntas atingido ",
            Color::Red,
        )
    };

    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );
    frame.render_widget(input, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let mut spans = vec![Span::styled(
        format!(
            " Perguntas: {}/{} ",
            session.questions_asked(),
            app.advisor.gate().limit()
        ),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];

    match &app.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Gray,
                NoticeLevel::Warning => Color::Yellow,
                NoticeLevel::Error => Color::Red,
                NoticeLevel::Success => Color::Green,
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(notice.text.clone(), Style::default().fg(color)));
        }
        None => {
            spans.push(Span::styled(
                " Ctrl+S salvar conversa | PgUp/PgDn rolar | Esc sair",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
