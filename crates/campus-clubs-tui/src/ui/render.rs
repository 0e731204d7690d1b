use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, Page};

use super::pages::{comments, events, home, landing, login, settings};
use super::styles::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.palette.theme();

    frame.render_widget(Block::default().style(theme.base_style()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, &theme, chunks[0]);
    render_tabs(frame, app, &theme, chunks[1]);
    render_main_content(frame, app, &theme, chunks[2]);
    render_status_bar(frame, app, &theme, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame, &theme),
        AppState::ConfirmingQuit => render_quit_overlay(frame, &theme),
        AppState::ConfirmingDelete => render_delete_overlay(frame, app, &theme),
        AppState::Composing => render_compose_overlay(frame, app, &theme),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let title = "  Campus Clubs";
    let help_hint = "[?] Help";
    let page_title = format!(" · {}", app.page.title());
    let used = title.len() + page_title.chars().count() + help_hint.len() + 4;

    let title_line = Line::from(vec![
        Span::styled(title, theme.title_style()),
        Span::styled(page_title, theme.muted_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(help_hint, theme.muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut spans = vec![Span::raw(" ")];

    if app.is_authenticated() {
        let tabs = [
            ("[1] Home", matches!(app.page, Page::Home | Page::Comments)),
            ("[2] Manage Events", app.page == Page::Events),
            ("[3] Settings", app.page == Page::Settings),
        ];
        for (i, (label, selected)) in tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", theme.muted_style()));
            }
            if *selected {
                spans.push(Span::styled(*label, theme.tab_style(true)));
            } else {
                spans.push(Span::styled(*label, theme.muted_style()));
            }
        }
    } else {
        spans.push(Span::styled("[s]ign in", theme.tab_style(app.page == Page::Login)));
        spans.push(Span::styled(" | ", theme.muted_style()));
        spans.push(Span::styled("[g]et started", theme.muted_style()));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    match app.page {
        Page::Landing => landing::render(frame, theme, area),
        Page::Login => login::render(frame, app, theme, area),
        Page::Home => home::render(frame, app, theme, area),
        Page::Comments => comments::render(frame, app, theme, area),
        Page::Events => events::render(frame, app, theme, area),
        Page::Settings => settings::render(frame, app, theme, area),
    }
}

fn shortcuts(app: &App) -> &'static str {
    match app.page {
        Page::Landing => "[s]ign in | [g]et started | [q]uit",
        Page::Login => "[Tab] next field | [Enter] submit | [Esc] back",
        Page::Home => "[Tab] clubs/events | [c]omments | [j]oin | [m]anage | [u]pdate | [q]uit",
        Page::Comments => "[n]ew | [r]eply | [u]pdate | [Esc] back",
        Page::Events => "[Enter] expand | [d]elete | [u]pdate | [q]uit",
        Page::Settings => "[Enter] apply | [c]ycle | [r]eset | [q]uit",
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if let Some(email) = app.signed_in_as() {
        format!(" Signed in as {} ", email)
    } else {
        " Not signed in ".to_string()
    };

    let right_text = format!(" {} ", shortcuts(app));

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let status_line = Line::from(vec![
        Span::styled(left_text, theme.muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, theme.muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(theme.status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line<'a>(key: &str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), theme.help_key_style()),
        Span::styled(desc, theme.help_desc_style()),
    ])
}

fn section<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(format!(" {}", title), theme.highlight_style()))
}

/// Key listings for the help overlay, as (left, right) columns
fn help_columns(theme: &Theme) -> (Vec<Line<'static>>, Vec<Line<'static>>) {
    let left = vec![
        section("Navigation", theme),
        help_line("1-3", "Switch pages", theme),
        help_line("←/→", "Prev/next page", theme),
        help_line("↑/↓", "Navigate list", theme),
        help_line("PgUp/PgDn", "Scroll a page", theme),
        help_line("Esc", "Go back", theme),
        Line::from(""),
        section("Actions", theme),
        help_line("u", "Update current page", theme),
        help_line("L", "Sign out", theme),
        help_line("q", "Quit", theme),
        Line::from(""),
        section("Home", theme),
        help_line("Tab", "Switch clubs/events", theme),
        help_line("c/Enter", "Open event discussion", theme),
        help_line("j", "Join selected club or event", theme),
        help_line("m", "Manage selected club's events", theme),
    ];

    let right = vec![
        section("Discussion", theme),
        help_line("n", "New comment", theme),
        help_line("r", "Reply to selected comment", theme),
        help_line("Esc", "Back to home", theme),
        Line::from(""),
        section("Manage Events", theme),
        help_line("Enter", "Expand/collapse details", theme),
        help_line("d", "Delete event", theme),
        Line::from(""),
        section("Settings", theme),
        help_line("Enter", "Apply selected palette", theme),
        help_line("c", "Cycle palette", theme),
        help_line("r", "Reset to default", theme),
    ];

    (left, right)
}

fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect_fixed(86, 24, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .style(theme.base_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Min(1),    // Key columns
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let version = env!("CARGO_PKG_VERSION");
    let heading = vec![
        Line::from(Span::styled("  Campus Clubs", theme.title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            theme.muted_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(heading), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let (left, right) = help_columns(theme);
    frame.render_widget(Paragraph::new(left), columns[0]);
    frame.render_widget(Paragraph::new(right), columns[1]);

    let footer = Line::from(vec![
        Span::styled("Press ", theme.muted_style()),
        Span::styled("?", theme.help_key_style()),
        Span::styled(" or ", theme.muted_style()),
        Span::styled("Esc", theme.help_key_style()),
        Span::styled(" to close", theme.muted_style()),
    ]);
    frame.render_widget(Paragraph::new(footer).centered(), rows[2]);
}

fn render_quit_overlay(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect_fixed(46, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            theme.highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", theme.muted_style()),
            Span::styled("[Y]", theme.help_key_style()),
            Span::styled(" to quit, ", theme.muted_style()),
            Span::styled("[N]", theme.help_key_style()),
            Span::styled(" to cancel", theme.muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .style(theme.base_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_delete_overlay(frame: &mut Frame, app: &App, theme: &Theme) {
    let Some((_, ref name)) = app.manage.pending_delete else {
        return;
    };

    let area = centered_rect_fixed(54, 8, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Are you sure you want to delete \"{}\"?", name),
            theme.highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", theme.muted_style()),
            Span::styled("[Y]", theme.help_key_style()),
            Span::styled(" to delete, ", theme.muted_style()),
            Span::styled("[N]", theme.help_key_style()),
            Span::styled(" to cancel", theme.muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Delete Event ")
        .borders(Borders::ALL)
        .border_style(theme.error_style())
        .style(theme.base_style());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .centered();
    frame.render_widget(paragraph, area);
}

fn render_compose_overlay(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = centered_rect_fixed(64, 9, frame.area());
    frame.render_widget(Clear, area);

    let title = match app.comments.reply_to {
        Some((_, ref author)) => format!(" Reply to {} ", author),
        None => " New Comment ".to_string(),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(app.comments.draft.as_str(), theme.text_style()),
            Span::styled("▌", theme.highlight_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", theme.help_key_style()),
            Span::styled(" post  ", theme.muted_style()),
            Span::styled("[Esc]", theme.help_key_style()),
            Span::styled(" cancel", theme.muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .style(theme.base_style());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
pub(crate) fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect_fixed(40, 10, outer);
        assert_eq!(inner, Rect::new(30, 15, 40, 10));
    }

    fn column_text(lines: &[Line]) -> String {
        lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.as_ref()))
            .collect::<Vec<_>>()
            .join("|")
    }

    #[test]
    fn test_help_lists_every_page() {
        let theme = crate::ui::styles::Palette::Dark.theme();
        let (left, right) = help_columns(&theme);
        let left = column_text(&left);
        let right = column_text(&right);

        assert!(left.contains("Navigation"));
        assert!(left.contains("Join selected club or event"));
        assert!(right.contains("Discussion"));
        assert!(right.contains("New comment"));
        assert!(right.contains("Reply to selected comment"));
        assert!(right.contains("Settings"));
        assert!(right.contains("Cycle palette"));
        assert!(right.contains("Reset to default"));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let outer = Rect::new(5, 5, 20, 8);
        let inner = centered_rect_fixed(40, 10, outer);
        assert_eq!(inner.width, 20);
        assert_eq!(inner.height, 8);
        assert_eq!((inner.x, inner.y), (5, 5));
    }
}
