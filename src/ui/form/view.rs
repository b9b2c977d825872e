//! Drawing the form.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::state::{FormState, LogLevel, NOTICE};

const TITLE: &str = "KnowWhere Installer";
const HELP: &str =
    "Enter your API base and license key, then Install. Repo will be cloned if missing.";
const KEYS: &str = "Tab/↑↓ move · Enter next/install · F1 license · Esc quit";

fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Info => Style::new(),
        LogLevel::Success => Style::new().fg(Color::Green),
        LogLevel::Warning => Style::new().fg(Color::Yellow),
        LogLevel::Error => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Output => Style::new().add_modifier(Modifier::DIM),
    }
}

/// Render the whole form into `frame`.
pub fn render(frame: &mut Frame, state: &FormState) {
    let [header, fields, button, log] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(6),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(frame.area());

    let heading = vec![
        Line::from(Span::styled(
            TITLE,
            Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(HELP),
        Line::from(Span::styled(KEYS, Style::new().add_modifier(Modifier::DIM))),
    ];
    frame.render_widget(Paragraph::new(heading), header);

    let rows: Vec<Line> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = state.focus == i && !state.running;
            let label_style = if focused {
                Style::new().add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::new().add_modifier(Modifier::BOLD)
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:>17}", field.label), label_style),
                Span::raw("  "),
                Span::raw(field.display_value()),
                Span::raw(cursor),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(rows).block(Block::bordered()), fields);

    let button_label = if state.running {
        "[ Installing... ]"
    } else {
        "[ Install ]"
    };
    let button_style = if state.submit_focused() && !state.running {
        Style::new().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::new().add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(button_label, button_style)).centered()),
        button,
    );

    // Borders take two rows.
    let visible = log.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = if state.log.is_empty() {
        vec![Line::from(Span::styled(
            "Progress output...",
            Style::new().add_modifier(Modifier::DIM),
        ))]
    } else {
        state.log[start..]
            .iter()
            .map(|l| Line::from(Span::styled(l.text.as_str(), level_style(l.level))))
            .collect()
    };
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title("Progress")),
        log,
    );

    if state.show_notice {
        let area = centered(frame.area(), 70, 9);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(NOTICE)
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title("License")),
            area,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
