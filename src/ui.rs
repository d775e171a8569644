use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Screen, StatusKind};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const TITLE: &str = "Sistema Integrado de Aprendizado";

const CATALOG_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "tópico"),
    ("←/→", "linguagem"),
    ("tab", "nível"),
    ("enter", "praticar digitação"),
    ("d", "ver documentação"),
    ("x", "aleatório"),
    ("q", "sair"),
];

const PRACTICE_KEYS: &[(&str, &str)] = &[("F2/ctrl+s", "ver resultados"), ("esc", "voltar ao aprendizado")];

const RESULTS_KEYS: &[(&str, &str)] = &[("r", "repetir"), ("b", "voltar ao aprendizado"), ("q", "sair")];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Catalog => render_catalog(self, area, buf),
            Screen::Practice => render_practice(self, area, buf),
            Screen::Results => render_results(self, area, buf),
        }
    }
}

fn help_line(keys: &[(&str, &str)]) -> Paragraph<'static> {
    let text = keys
        .iter()
        .map(|(key, action)| format!("({key}) {action}"))
        .join("  ");

    Paragraph::new(Span::styled(
        text,
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
}

fn status_line(app: &App) -> Paragraph<'_> {
    let line = match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Warning => Color::Yellow,
                StatusKind::Error => Color::Red,
            };
            Line::from(Span::styled(
                status.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::default(),
    };
    Paragraph::new(line).alignment(Alignment::Center)
}

/// Rows needed to show `text` wrapped at `width` columns.
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .split('\n')
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn render_catalog(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // language / level
            Constraint::Min(5),    // topics and snippet
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Paragraph::new(Line::from(vec![
        Span::raw("Linguagem: "),
        Span::styled(app.language.to_string(), bold.fg(Color::Cyan)),
        Span::raw("    Nível: "),
        Span::styled(app.level.to_string(), bold.fg(Color::Cyan)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(TITLE))
    .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    let topics_block = Block::default().borders(Borders::ALL).title("Tópicos");
    let topic_lines: Vec<Line> = if app.topics().is_empty() {
        vec![Line::from(Span::styled(
            "Nenhum tópico disponível",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.topics()
            .iter()
            .enumerate()
            .map(|(idx, topic)| {
                if idx == app.selected {
                    Line::from(Span::styled(
                        format!("> {}", topic.name),
                        bold.add_modifier(Modifier::REVERSED),
                    ))
                } else {
                    Line::from(format!("  {}", topic.name))
                }
            })
            .collect()
    };
    Paragraph::new(topic_lines)
        .block(topics_block)
        .render(body[0], buf);

    let (snippet, url) = match app.selected_topic() {
        Some(topic) => (topic.snippet.as_str(), topic.url.as_str()),
        None => ("", ""),
    };
    Paragraph::new(snippet)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Exemplo")
                .title_bottom(Line::from(Span::styled(url, Style::default().fg(Color::Blue)))),
        )
        .render(body[1], buf);

    status_line(app).render(chunks[2], buf);
    help_line(CATALOG_KEYS).render(chunks[3], buf);
}

fn render_practice(app: &App, area: Rect, buf: &mut Buffer) {
    let reference = app
        .session
        .reference()
        .map(|text| text.as_str())
        .unwrap_or_default();

    let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2);
    let reference_height = wrapped_height(reference, inner_width)
        .saturating_add(2)
        .min(area.height / 2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(reference_height),
            Constraint::Min(3),    // typing area
            Constraint::Length(1), // timer
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(area);

    Paragraph::new(reference)
        .style(Style::default().add_modifier(Modifier::DIM | Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("Referência"))
        .wrap(Wrap { trim: false })
        .render(chunks[0], buf);

    let mut lines: Vec<Line> = app
        .typed
        .split('\n')
        .map(|line| Line::raw(line.to_string()))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(Span::styled(
            "█",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let typing_height = chunks[1].height.saturating_sub(2);
    let scroll = wrapped_height(&app.typed, chunks[1].width.saturating_sub(2))
        .saturating_sub(typing_height);
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Digite o texto acima exatamente como aparece"),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(chunks[1], buf);

    if let Some(elapsed) = app.elapsed() {
        Paragraph::new(Span::styled(
            format!("{elapsed:.1}s"),
            Style::default().add_modifier(Modifier::DIM | Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }

    status_line(app).render(chunks[3], buf);
    help_line(PRACTICE_KEYS).render(chunks[4], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // score
            Constraint::Min(1),
            Constraint::Length(1), // keys
        ])
        .split(area);

    let summary = app.result.map(|r| r.to_string()).unwrap_or_default();
    Paragraph::new(Span::styled(
        summary,
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL).title("Resultados"))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[1], buf);

    help_line(RESULTS_KEYS).render(chunks[3], buf);
}
