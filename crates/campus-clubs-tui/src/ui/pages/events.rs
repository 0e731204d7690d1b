use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use campus_clubs_core::models::Event;
use campus_clubs_core::utils::format_optional;

use crate::app::App;
use crate::ui::styles::Theme;

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let Some(club_name) = app.managed_club_name() else {
        render_no_club(frame, theme, area);
        return;
    };

    let view = &app.manage;
    let block = Block::default()
        .title(format!(" {} · Events ({}) ", club_name, view.events.len()))
        .title_style(theme.muted_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style(true));

    if view.loading {
        let paragraph = Paragraph::new(Span::styled("Loading...", theme.muted_style())).block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut items: Vec<ListItem> = Vec::new();
    if let Some(ref error) = view.error {
        items.push(ListItem::new(Line::from(Span::styled(error.as_str(), theme.error_style()))));
    }

    if view.events.is_empty() {
        if view.error.is_none() {
            items.push(ListItem::new(vec![
                Line::from(Span::styled("No Events Yet", theme.title_style())),
                Line::from(Span::styled(
                    "This club has no events to manage.",
                    theme.muted_style(),
                )),
            ]));
        }
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let offset = items.len();
    for event in &view.events {
        let expanded = view.expanded.contains(&event.uid);
        items.push(ListItem::new(event_lines(event, expanded, theme)));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected_style());

    let mut state = ListState::default();
    state.select(Some(view.selection + offset));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_no_club(frame: &mut Frame, theme: &Theme, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No Club Selected", theme.title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Choose a club on the Home page (Clubs tab, [m]) to manage its events.",
            theme.muted_style(),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(false)),
        )
        .wrap(Wrap { trim: true })
        .centered();
    frame.render_widget(paragraph, area);
}

fn detail_line<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::raw("      "),
        Span::styled(label, theme.muted_style()),
        Span::raw(value),
    ])
}

fn event_lines<'a>(event: &'a Event, expanded: bool, theme: &Theme) -> Vec<Line<'a>> {
    let toggle = if expanded { "▼" } else { "▶" };
    let status = format_optional(event.status.as_deref(), "N/A");

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", toggle), theme.highlight_style()),
            Span::styled(event.name.as_str(), theme.text_style()),
            Span::raw("  "),
            Span::styled(format!("[{}]", status), theme.status_style(&status)),
        ]),
        Line::from(Span::styled(
            format!(
                "    {} · {} · {} participants",
                event.formatted_start("N/A"),
                event.location_or("TBD"),
                event.participant_count
            ),
            theme.muted_style(),
        )),
    ];

    if expanded {
        lines.push(detail_line("Start:        ", event.formatted_start("N/A"), theme));
        lines.push(detail_line("End:          ", event.formatted_end("N/A"), theme));
        lines.push(detail_line("Location:     ", event.location_or("Not specified"), theme));
        lines.push(detail_line("Type:         ", event.type_display().to_string(), theme));
        lines.push(detail_line("Limit:        ", event.limit_display(), theme));
        lines.push(detail_line("Participants: ", event.participant_count.to_string(), theme));
        if event.has_description() {
            lines.push(detail_line(
                "Description:  ",
                format_optional(event.description.as_deref(), ""),
                theme,
            ));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styles::Palette;

    fn event(json: &str) -> Event {
        serde_json::from_str(json).unwrap()
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_collapsed_event_summary() {
        let theme = Palette::Dark.theme();
        let e = event(r#"{"uid": "e1", "name": "Blitz", "participant_count": 4}"#);
        let lines: Vec<String> = event_lines(&e, false, &theme).iter().map(text).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Blitz"));
        assert!(lines[0].contains("[N/A]"));
        assert!(lines[1].contains("N/A · TBD · 4 participants"));
    }

    #[test]
    fn test_expanded_event_fallbacks() {
        let theme = Palette::Dark.theme();
        let e = event(r#"{"uid": "e1", "name": "Blitz", "limit": 0}"#);
        let lines: Vec<String> = event_lines(&e, true, &theme).iter().map(text).collect();
        assert!(lines.iter().any(|l| l.contains("Start:") && l.contains("N/A")));
        assert!(lines.iter().any(|l| l.contains("End:") && l.contains("N/A")));
        assert!(lines.iter().any(|l| l.contains("Location:") && l.contains("Not specified")));
        assert!(lines.iter().any(|l| l.contains("Limit:") && l.contains("No limit")));
        assert!(lines.iter().any(|l| l.contains("Participants:") && l.contains('0')));
        assert!(!lines.iter().any(|l| l.contains("Description:")));
    }
}
