use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use campus_clubs_core::models::{Club, Event};
use campus_clubs_core::utils::{format_optional, truncate_string};

use crate::app::{App, HomeTab};
use crate::ui::styles::Theme;

/// Longest name or location shown in a table cell
const MAX_CELL_CHARS: usize = 40;

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if app.home.loading {
        let paragraph = Paragraph::new(Span::styled("Loading...", theme.muted_style()))
            .block(Block::default().borders(Borders::ALL).border_style(theme.border_style(false)));
        frame.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    match app.home.tab {
        HomeTab::Events => {
            render_event_list(frame, app, theme, chunks[0]);
            render_event_detail(frame, app.selected_home_event(), theme, chunks[1]);
        }
        HomeTab::Clubs => {
            render_club_list(frame, app, theme, chunks[0]);
            render_club_detail(frame, app.selected_home_club(), theme, chunks[1]);
        }
    }
}

fn list_title(app: &App) -> String {
    let (events, clubs) = match app.home.tab {
        HomeTab::Events => ("[Events]", "Clubs"),
        HomeTab::Clubs => ("Events", "[Clubs]"),
    };
    format!(
        " {} ({}) | {} ({}) ",
        events,
        app.home.events.len(),
        clubs,
        app.home.clubs.len()
    )
}

fn render_empty(frame: &mut Frame, title: String, message: &str, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(title)
        .title_style(theme.muted_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style(true));
    let paragraph = Paragraph::new(Span::styled(message, theme.muted_style())).block(block);
    frame.render_widget(paragraph, area);
}

fn render_event_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if app.home.events.is_empty() {
        render_empty(frame, list_title(app), "No events available at the moment.", theme, area);
        return;
    }

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Starts"),
        Cell::from("Location"),
        Cell::from("Status"),
    ])
    .style(theme.title_style())
    .height(1);

    let rows: Vec<Row> = app
        .home
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let style = if i == app.home.event_selection {
                theme.selected_style()
            } else {
                theme.text_style()
            };
            Row::new(vec![
                Cell::from(fit_cell(&event.name)),
                Cell::from(event.formatted_start("TBD")),
                Cell::from(fit_cell(&event.location_or("Location TBD"))),
                Cell::from(Span::styled(
                    event.status_display().to_string(),
                    theme.status_style(event.status_display()),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(35),
        Constraint::Length(22),
        Constraint::Fill(1),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(list_title(app))
                .title_style(theme.muted_style())
                .borders(Borders::ALL)
                .border_style(theme.border_style(true)),
        )
        .row_highlight_style(theme.selected_style());

    let mut state = TableState::default();
    state.select(Some(app.home.event_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_event_detail(frame: &mut Frame, event: Option<&Event>, theme: &Theme, area: Rect) {
    let content = match event {
        Some(event) => {
            let mut lines = vec![
                Line::from(Span::styled(event.name.as_str(), theme.title_style())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Starts:   ", theme.muted_style()),
                    Span::raw(event.formatted_start("TBD")),
                ]),
                Line::from(vec![
                    Span::styled("Location: ", theme.muted_style()),
                    Span::raw(event.location_or("Location TBD")),
                ]),
            ];
            if !event.type_display().is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("Type:     ", theme.muted_style()),
                    Span::raw(event.type_display()),
                ]));
            }
            if !event.status_display().is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("Status:   ", theme.muted_style()),
                    Span::styled(event.status_display(), theme.status_style(event.status_display())),
                ]));
            }
            if event.has_description() {
                lines.push(Line::from(""));
                lines.push(Line::from(format_optional(event.description.as_deref(), "")));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[c] discussion  [j] join",
                theme.muted_style(),
            )));
            lines
        }
        None => vec![Line::from(Span::styled("No event selected", theme.muted_style()))],
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Details ")
                .title_style(theme.muted_style())
                .borders(Borders::ALL)
                .border_style(theme.border_style(false)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_club_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if app.home.clubs.is_empty() {
        render_empty(frame, list_title(app), "No clubs available at the moment.", theme, area);
        return;
    }

    let header = Row::new([Cell::from("Name"), Cell::from("Status"), Cell::from("Budget")])
        .style(theme.title_style())
        .height(1);

    let rows: Vec<Row> = app
        .home
        .clubs
        .iter()
        .enumerate()
        .map(|(i, club)| {
            let style = if i == app.home.club_selection {
                theme.selected_style()
            } else {
                theme.text_style()
            };
            Row::new(vec![
                Cell::from(fit_cell(&club.name)),
                Cell::from(Span::styled(
                    club.status_display().to_string(),
                    theme.status_style(club.status_display()),
                )),
                Cell::from(club.budget_display()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(list_title(app))
                .title_style(theme.muted_style())
                .borders(Borders::ALL)
                .border_style(theme.border_style(true)),
        )
        .row_highlight_style(theme.selected_style());

    let mut state = TableState::default();
    state.select(Some(app.home.club_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_club_detail(frame: &mut Frame, club: Option<&Club>, theme: &Theme, area: Rect) {
    let content = match club {
        Some(club) => vec![
            Line::from(Span::styled(club.name.as_str(), theme.title_style())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Status: ", theme.muted_style()),
                Span::styled(club.status_display(), theme.status_style(club.status_display())),
            ]),
            Line::from(vec![
                Span::styled("Budget: ", theme.muted_style()),
                Span::raw(club.budget_display()),
            ]),
            Line::from(""),
            Line::from(format_optional(club.description.as_deref(), "No description")),
            Line::from(""),
            Line::from(Span::styled("[j] join  [m] manage events", theme.muted_style())),
        ],
        None => vec![Line::from(Span::styled("No club selected", theme.muted_style()))],
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Details ")
                .title_style(theme.muted_style())
                .borders(Borders::ALL)
                .border_style(theme.border_style(false)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn fit_cell(text: &str) -> String {
    truncate_string(text, MAX_CELL_CHARS)
}
