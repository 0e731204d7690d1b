use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use campus_clubs_core::models::Comment;
use campus_clubs_core::utils::format_datetime;

use crate::app::App;
use crate::ui::styles::Theme;

/// Columns of indentation per reply level
const INDENT: usize = 3;

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let view = &app.comments;
    let total = Comment::count(&view.thread);

    let mut title = format!(" {} · {} comments ", view.event_name, total);
    if view.posting {
        title.push_str("· posting... ");
    }

    let block = Block::default()
        .title(title)
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

    if view.thread.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "No comments yet. Press [n] to start the discussion.",
            theme.muted_style(),
        ))));
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let offset = items.len();
    for flat in Comment::flatten(&view.thread) {
        let pad = " ".repeat(flat.depth * INDENT);
        let marker = if flat.depth > 0 { "↳ " } else { "" };
        let header = Line::from(vec![
            Span::raw(format!("{}{}", pad, marker)),
            Span::styled(flat.comment.user_name.clone(), theme.highlight_style()),
            Span::styled(
                format!("  {}", format_datetime(flat.comment.created_at.as_deref(), "")),
                theme.muted_style(),
            ),
        ]);
        let body = Line::from(Span::styled(
            format!("{}{}{}", pad, " ".repeat(marker.chars().count()), flat.comment.content),
            theme.text_style(),
        ));
        items.push(ListItem::new(vec![header, body]));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected_style());

    let mut state = ListState::default();
    state.select(Some(view.selection + offset));

    frame.render_stateful_widget(list, area, &mut state);
}
