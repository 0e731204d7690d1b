use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles::{Palette, Theme};

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(20)])
        .split(area);

    let items: Vec<ListItem> = Palette::ALL
        .iter()
        .map(|palette| {
            let marker = if *palette == app.palette { "●" } else { "○" };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", marker), theme.highlight_style()),
                Span::styled(palette.label(), theme.text_style()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Color Palette ")
                .title_style(theme.muted_style())
                .borders(Borders::ALL)
                .border_style(theme.border_style(true)),
        )
        .highlight_style(theme.selected_style());

    let mut state = ListState::default();
    state.select(Some(app.settings_selection));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    render_preview(frame, app, theme, chunks[1]);
}

fn swatch(label: &str, color: ratatui::style::Color) -> Line<'_> {
    Line::from(vec![
        Span::styled("    ", Style::default().bg(color)),
        Span::raw(format!(" {}", label)),
    ])
}

fn render_preview(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Current: ", theme.muted_style()),
            Span::styled(app.palette.label(), theme.title_style()),
        ]),
        Line::from(""),
        swatch("Primary", theme.primary),
        swatch("Accent", theme.accent),
        swatch("Success", theme.success),
        swatch("Error", theme.error),
        swatch("Selection", theme.selection),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", theme.help_key_style()),
            Span::styled(" apply  ", theme.muted_style()),
            Span::styled("[c]", theme.help_key_style()),
            Span::styled(" cycle  ", theme.muted_style()),
            Span::styled("[r]", theme.help_key_style()),
            Span::styled(" reset to Dark", theme.muted_style()),
        ]),
        Line::from(Span::styled(
            "Palette applies to this session only.",
            theme.muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Preview ")
            .title_style(theme.muted_style())
            .borders(Borders::ALL)
            .border_style(theme.border_style(false)),
    );
    frame.render_widget(paragraph, area);
}
