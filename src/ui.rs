//! The UI renders the application state into a navigation bar and a document pane.
//!
//! The navigation bar lists sections indented by heading level, marks the active one and
//! highlights the selection. The document pane shows the visible rows with a gutter marking
//! the attention window.

use crate::app_state::{AppState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const HELP_HEIGHT: u16 = 3;
const NAV_WIDTH: u16 = 32;

#[must_use]
/// Rows available to the document pane in a terminal area.
pub fn document_height(area: Rect) -> u16 {
    area.height.saturating_sub(HELP_HEIGHT).saturating_sub(2)
}

/// Renders the navigation bar, document pane and help line.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(HELP_HEIGHT)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(NAV_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    draw_nav(f, app, columns[0]);
    draw_document(f, app, columns[1]);
    draw_help(f, app, rows[1]);
}

fn draw_nav(f: &mut Frame, app: &AppState, area: Rect) {
    let active = app.active_section_index();
    let items: Vec<ListItem> = app
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let indent = "  ".repeat(section.level.saturating_sub(1));
            let marker = if Some(i) == active { "▸ " } else { "  " };
            let mut style = if Some(i) == active {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if i == app.selected_section_index {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::raw(indent),
                Span::raw(section.title.clone()),
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Sections"));
    f.render_widget(list, area);
}

fn draw_document(f: &mut Frame, app: &mut AppState, area: Rect) {
    let title = match app.scope.active_id() {
        Some(id) => format!("{} | #{id}", app.path.display()),
        None => app.path.display().to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.viewport.resize(u32::from(inner.height));
    let (band_start, band_end) = app
        .scope
        .tracker()
        .window()
        .band(app.viewport.height());

    let offset = usize::try_from(app.viewport.offset()).unwrap_or(usize::MAX);
    let lines: Vec<Line> = app
        .lines
        .iter()
        .skip(offset)
        .take(usize::from(inner.height))
        .zip(0u32..)
        .map(|(text, row)| {
            let gutter = if (band_start..band_end).contains(&row) {
                Span::styled("│ ", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw("  ")
            };
            let body = if text.starts_with('#') {
                Span::styled(
                    text.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(text.clone())
            };
            Line::from(vec![gutter, body])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let (text, title) = if app.current_view == View::Command {
        (format!(":{}", app.command_buffer), "Command")
    } else if let Some(ref msg) = app.message {
        (msg.clone(), "")
    } else {
        (
            "j/k: Scroll | PgUp/PgDn: Page | Tab/S-Tab: Select | Enter: Jump | :goto <id> | r: Reload | q: Quit"
                .to_string(),
            "",
        )
    };
    let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(help, area);
}
