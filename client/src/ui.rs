use moviebot_shared::Recommendation;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, Message, Role};

/// Cards rendered per response, regardless of how many items arrive.
pub const MAX_CARDS: usize = 5;

pub const EMPTY_STATE_TEXT: &str = "No recommendations yet.";

/// View-model for one recommendation card. All field-presence and
/// formatting decisions happen here; the render pass below only lays out
/// lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub rank: usize,
    pub title: String,
    /// Joined genre list, omitted when no non-empty segment survives.
    pub genres: Option<String>,
    pub language: Option<String>,
    /// Runtime plus release year, e.g. "102 mins • 2020".
    pub meta: String,
    pub badge: String,
    pub pills: Vec<String>,
}

/// Badge score policy: `final_score`, else `similarity_score`, else zero.
fn score(rec: &Recommendation) -> f64 {
    rec.final_score.or(rec.similarity_score).unwrap_or(0.0)
}

impl Card {
    pub fn new(rank: usize, rec: &Recommendation) -> Self {
        let title = rec
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        let genres = rec
            .genres
            .as_deref()
            .map(|g| {
                g.split('|')
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|g| !g.is_empty());

        let language = rec.language.clone().filter(|l| !l.is_empty());

        let runtime = match rec.runtime {
            Some(mins) => format!("{mins} mins"),
            None => "runtime N/A".to_string(),
        };
        let meta = match rec.release_year {
            Some(year) => format!("{runtime} • {year}"),
            None => runtime,
        };

        let badge = format!("Score {:.3}", score(rec));

        let mut pills = Vec::new();
        if let Some(avg) = rec.vote_average {
            pills.push(format!("⭐ {avg:.1}"));
        }
        if let Some(count) = rec.vote_count {
            pills.push(format!("{count} votes"));
        }
        if let Some(sim) = rec.similarity_score {
            pills.push(format!("sim {sim:.3}"));
        }

        Self {
            rank,
            title,
            genres,
            language,
            meta,
            badge,
            pills,
        }
    }
}

/// Builds at most [`MAX_CARDS`] cards, preserving the server's order.
pub fn build_cards(items: &[Recommendation]) -> Vec<Card> {
    items
        .iter()
        .take(MAX_CARDS)
        .enumerate()
        .map(|(idx, rec)| Card::new(idx + 1, rec))
        .collect()
}

pub fn ui(f: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(38)])
        .split(f.area());

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(columns[0]);

    render_transcript(f, app, left[0]);
    render_input(f, app, left[1]);
    render_recommendations(f, &app.recommendations, columns[1]);
}

fn message_item(msg: &Message) -> ListItem<'_> {
    let prefix = match msg.role {
        Role::User => Span::styled(
            "You: ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Role::Bot => Span::styled(
            "Bot: ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    };
    let text = if msg.pending {
        // Loading indicator for the in-flight placeholder.
        Span::styled(
            msg.text.as_str(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::raw(msg.text.as_str())
    };
    ListItem::new(Line::from(vec![prefix, text]))
}

fn render_transcript(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app.transcript.iter().map(message_item).collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Chat"));

    // Keep the newest message visible.
    let mut state = ListState::default();
    if !app.transcript.is_empty() {
        state.select(Some(app.transcript.len() - 1));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.input_enabled {
        "Input"
    } else {
        "Input (waiting)"
    };
    let input = Paragraph::new(app.input.as_str())
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    f.render_widget(input, area);
}

fn render_recommendations(f: &mut Frame, recommendations: &[Recommendation], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Recommendations");

    if recommendations.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            EMPTY_STATE_TEXT,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for card in build_cards(recommendations) {
        lines.extend(card_lines(&card));
    }
    let cards = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(cards, area);
}

fn card_lines(card: &Card) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{}. {}", card.rank, card.title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            card.badge.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    if let Some(genres) = &card.genres {
        lines.push(Line::from(format!("   Genres: {genres}")));
    }
    if let Some(language) = &card.language {
        lines.push(Line::from(format!("   Language: {language}")));
    }
    lines.push(Line::from(format!("   {}", card.meta)));
    if !card.pills.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("   {}", card.pills.join("  ")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines
}
