//! Short-lived overlay above the status bar
//!
//! Used for clipboard results and rejected filter input; the event loop
//! drops it on the first tick after it expires.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const SHOW_FOR: Duration = Duration::from_secs(2);
/// Gap kept between the toast and the screen edge
const MARGIN: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    /// Input was rejected or an action failed
    Warning,
}

#[derive(Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Warning)
    }

    fn with_kind(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= SHOW_FOR
    }

    /// Bottom-right placement inside `area`, or None when it cannot fit
    fn placement(&self, area: Rect) -> Option<Rect> {
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(MARGIN * 2));
        let height = 3;
        if width < 5 || area.height < height + MARGIN {
            return None;
        }
        Some(Rect::new(
            area.right().saturating_sub(width + MARGIN),
            area.bottom().saturating_sub(height + MARGIN),
            width,
            height,
        ))
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let Some(toast_area) = self.placement(area) else {
            return;
        };
        let color = match self.kind {
            ToastKind::Info => Color::Green,
            ToastKind::Warning => Color::Yellow,
        };

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}
