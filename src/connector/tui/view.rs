use chrono::Local;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::application::ChatWidget;
use crate::domain::{ChatMessage, Role};

const PANEL_WIDTH: u16 = 72;
const PANEL_HEIGHT: u16 = 32;
const PLACEHOLDER: &str = "Ask about switchboards, wiring...";

pub fn render(frame: &mut Frame, widget: &ChatWidget, tick: usize) {
    let area = frame.area();
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("VoltSafe", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" · Licensed electricians · Ctrl+O chat · Esc/q quit"),
        ])),
        Rect { height: 1, ..area },
    );

    if widget.is_open() {
        render_chat(frame, widget, tick, area);
    } else {
        render_launcher(frame, area);
    }
}

fn anchor_bottom_right(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height.saturating_sub(1));
    Rect {
        x: area.right() - width,
        y: area.bottom() - height,
        width,
        height,
    }
}

fn render_launcher(frame: &mut Frame, area: Rect) {
    let launcher = anchor_bottom_right(area, 30, 3);
    frame.render_widget(
        Paragraph::new("💬 Chat with VoltBot")
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(Color::Yellow))),
        launcher,
    );
}

fn render_chat(frame: &mut Frame, widget: &ChatWidget, tick: usize, area: Rect) {
    let panel = anchor_bottom_right(area, PANEL_WIDTH, PANEL_HEIGHT);
    frame.render_widget(Clear, panel);

    let block = Block::bordered()
        .title(" ⚡ VoltBot Assistant ")
        .title_bottom(Line::from(" Online • AI Powered ").right_aligned())
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let [messages_area, input_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner);

    let messages = Paragraph::new(message_lines(widget, tick)).wrap(Wrap { trim: false });
    let total = messages.line_count(messages_area.width);
    let offset = total.saturating_sub(messages_area.height as usize);
    frame.render_widget(
        messages.scroll((offset.min(u16::MAX as usize) as u16, 0)),
        messages_area,
    );

    render_input(frame, widget, input_area);
}

fn render_input(frame: &mut Frame, widget: &ChatWidget, area: Rect) {
    let title = if widget.is_loading() {
        " Waiting for VoltBot "
    } else {
        " Message "
    };
    let block = Block::bordered()
        .title(title)
        .title_bottom(Line::from(" Enter send · Esc close ").right_aligned());

    let text = if widget.input().is_empty() {
        Line::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Line::raw(widget.input())
    };
    let typed = Line::raw(widget.input()).width();
    let (scroll, cursor) = input_view(typed, area.width.saturating_sub(2));
    frame.render_widget(Paragraph::new(text).block(block).scroll((0, scroll)), area);
    frame.set_cursor_position((area.x + 1 + cursor, area.y + 1));
}

/// Horizontal scroll and cursor column for `typed` display columns of input
/// shown in a box `width` columns wide. Once the text overflows, the cursor
/// sits on the last column.
fn input_view(typed: usize, width: u16) -> (u16, u16) {
    let width = width.max(1) as usize;
    let scroll = (typed + 1).saturating_sub(width);
    (scroll.min(u16::MAX as usize) as u16, (typed - scroll) as u16)
}

fn message_lines(widget: &ChatWidget, tick: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in widget.messages() {
        push_message(&mut lines, message);
    }
    if widget.is_loading() {
        let dots = ".".repeat(tick % 3 + 1);
        lines.push(Line::styled(
            format!("VoltBot is typing{dots}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    lines
}

fn push_message(lines: &mut Vec<Line<'static>>, message: &ChatMessage) {
    let (label, style, alignment) = match message.role() {
        Role::User => ("You", Style::default().fg(Color::Cyan), Alignment::Right),
        Role::Model if message.is_failure() => {
            ("VoltBot", Style::default().fg(Color::Red), Alignment::Left)
        }
        Role::Model => ("VoltBot", Style::default().fg(Color::Yellow), Alignment::Left),
    };

    let time = message.timestamp().with_timezone(&Local).format("%H:%M");
    lines.push(
        Line::styled(
            format!("{label} · {time}"),
            style.add_modifier(Modifier::BOLD),
        )
        .alignment(alignment),
    );
    for text in message.text().lines() {
        lines.push(Line::raw(text.to_string()).alignment(alignment));
    }
    lines.push(Line::default());
}
