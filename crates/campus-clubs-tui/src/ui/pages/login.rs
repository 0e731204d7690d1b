use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AuthMode, LoginFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles::Theme;

/// Visible width of a text field
const FIELD_WIDTH: usize = 24;

pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let form = &app.login;
    let register = form.mode == AuthMode::Register;

    let mut height = 10;
    if register {
        height += 1;
    }
    if form.error.is_some() {
        height += 2;
    }
    let area = centered_rect_fixed(48, height, area);

    // Clear the area
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];

    if register {
        lines.push(field_line(
            "Name:     ",
            visible_tail(&form.name),
            form.focus == LoginFocus::Name,
            theme,
        ));
    }
    lines.push(field_line(
        "Email:    ",
        visible_tail(&form.email),
        form.focus == LoginFocus::Email,
        theme,
    ));
    let masked = "*".repeat(form.password.chars().count().min(FIELD_WIDTH));
    lines.push(field_line(
        "Password: ",
        masked,
        form.focus == LoginFocus::Password,
        theme,
    ));
    lines.push(Line::from(""));

    // Submit button
    let label = match (form.mode, form.loading) {
        (AuthMode::Login, false) => "Sign In",
        (AuthMode::Login, true) => "Signing in...",
        (AuthMode::Register, false) => "Create Account",
        (AuthMode::Register, true) => "Creating account...",
    };
    let button_focused = form.focus == LoginFocus::Button;
    let button_text = if button_focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };
    let button_style = if button_focused {
        theme.selected_style()
    } else {
        theme.text_style()
    };
    lines.push(
        Line::from(vec![
            Span::raw("["),
            Span::styled(button_text, button_style),
            Span::raw("]"),
        ])
        .centered(),
    );

    // Error message
    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!(" {}", error), theme.error_style())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[Tab] next field  [Esc] back", theme.muted_style())).centered());

    let title = if register { " Create Account " } else { " Sign In " };
    let block = Block::default()
        .title(title)
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .style(theme.base_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line<'a>(label: &'a str, value: String, focused: bool, theme: &Theme) -> Line<'a> {
    let style: Style = if focused {
        theme.selected_style()
    } else {
        theme.text_style()
    };
    let cursor = if focused { "▌" } else { " " };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(label, theme.muted_style()),
        Span::styled("[", theme.muted_style()),
        Span::styled(format!("{:<width$}{}", value, cursor, width = FIELD_WIDTH), style),
        Span::styled("]", theme.muted_style()),
    ])
}

/// The last `FIELD_WIDTH` characters, so the cursor end stays visible
fn visible_tail(value: &str) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(FIELD_WIDTH)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_tail() {
        assert_eq!(visible_tail("ada@campus.edu"), "ada@campus.edu");
        let long = "a".repeat(30) + "@x.edu";
        let tail = visible_tail(&long);
        assert_eq!(tail.chars().count(), FIELD_WIDTH);
        assert!(tail.ends_with("@x.edu"));
    }
}
