use ratatui::{prelude::*, widgets::*};

use crate::messages::FieldView;
use crate::models::User;

/// Height of one form field including its border
pub const FIELD_HEIGHT: u16 = 3;

/// Renders a form input with its label as title and the error (if any) at the bottom
pub fn render_field(field: &FieldView, is_focused: bool) -> Paragraph<'static> {
    let border_style = if field.error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_focused {
        Style::default().fg(Color::Rgb(255, 144, 0))
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", field.label));

    if let Some(error) = &field.error {
        block = block.title_bottom(
            Line::from(Span::styled(format!(" {} ", error), Style::default().fg(Color::Red)))
                .right_aligned(),
        );
    }

    let value = field.display_value();
    let content = if value.is_empty() && !is_focused {
        Span::styled(field.label.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value)
    };

    Paragraph::new(Line::from(content)).block(block)
}

/// Cursor column for a focused field drawn in `area`
pub fn field_cursor(field: &FieldView, area: Rect) -> Position {
    let max_x = area.x + area.width.saturating_sub(2);
    let len = u16::try_from(field.value.chars().count()).unwrap_or(u16::MAX);
    Position::new(area.x.saturating_add(len).saturating_add(1).min(max_x), area.y.saturating_add(1))
}

/// Renders the signed-in user's card
pub fn render_user_card(user: &User) -> Paragraph<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let avatar = user.avatar_url.clone().unwrap_or_else(|| String::from("<no avatar>"));

    let lines = vec![
        Line::from(vec![
            Span::styled("Welcome, ", label),
            Span::styled(user.name.clone(), Style::default().fg(Color::Rgb(255, 144, 0)).bold()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("E-mail   ", label), Span::raw(user.email.clone())]),
        Line::from(vec![Span::styled("Avatar   ", label), Span::raw(avatar)]),
        Line::from(vec![Span::styled("ID       ", label), Span::raw(user.id.clone())]),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Dashboard "))
        .wrap(Wrap { trim: false })
}

/// Rectangle of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 20, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 10);
        assert_eq!(inner.x, 20);
    }

    #[test]
    fn test_cursor_clamped_to_field() {
        let field = FieldView {
            label: "E-mail",
            value: "a".repeat(50),
            secret: false,
            error: None,
        };
        let pos = field_cursor(&field, Rect::new(2, 4, 20, FIELD_HEIGHT));
        assert_eq!(pos, Position::new(20, 5));
    }

    #[test]
    fn test_cursor_survives_huge_paste() {
        let field = FieldView {
            label: "Name",
            value: "x".repeat(70_000),
            secret: false,
            error: None,
        };
        let pos = field_cursor(&field, Rect::new(10, 0, 30, FIELD_HEIGHT));
        assert_eq!(pos, Position::new(38, 1));
    }
}
