use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::styles::Theme;

const FEATURES: [(&str, &str); 3] = [
    (
        "Discover Clubs",
        "Explore a wide variety of student organizations tailored to your interests and passions.",
    ),
    (
        "Join Events",
        "Stay updated with upcoming events and participate in activities that matter to you.",
    ),
    (
        "Engage & Discuss",
        "Connect with fellow students through event discussions and build lasting friendships.",
    ),
];

pub fn render(frame: &mut Frame, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(6)])
        .split(area);

    render_hero(frame, theme, chunks[0]);
    render_features(frame, theme, chunks[1]);
}

fn render_hero(frame: &mut Frame, theme: &Theme, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Welcome to ", theme.text_style()),
            Span::styled("Campus Clubs", theme.title_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Discover, Join, and Engage with Student Organizations",
            theme.highlight_style(),
        )),
        Line::from(Span::styled(
            "Connect with like-minded students, participate in exciting events, \
             and make the most of your college experience.",
            theme.muted_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[g]", theme.help_key_style()),
            Span::styled(" Get Started    ", theme.text_style()),
            Span::styled("[s]", theme.help_key_style()),
            Span::styled(" Sign In", theme.text_style()),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .centered();
    frame.render_widget(paragraph, area);
}

fn render_features(frame: &mut Frame, theme: &Theme, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for ((title, blurb), column) in FEATURES.iter().zip(columns.iter()) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_style(theme.border_style(false));

        let paragraph = Paragraph::new(Span::styled(*blurb, theme.text_style()))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, *column);
    }
}
