use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::Frame;

use crate::error::Result;
use crate::fmt::rupiah;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const AMOUNT_POS_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
pub const AMOUNT_NEG_STYLE: Style = Style::new().fg(Color::Red);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

pub const ERROR_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Rgb(140, 30, 30))
    .add_modifier(Modifier::BOLD);

pub const BAR_STYLE: Style = Style::new().fg(Color::Rgb(230, 120, 80));

/// Rupiah amount as a colored Span: green when non-negative, red otherwise.
pub fn money_span(amount: f64) -> Span<'static> {
    let style = if amount < 0.0 {
        AMOUNT_NEG_STYLE
    } else {
        AMOUNT_POS_STYLE
    };
    Span::styled(rupiah(amount), style)
}

/// Truncate to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('\u{2026}');
    out
}

// ---------------------------------------------------------------------------
// Standalone view infrastructure
// ---------------------------------------------------------------------------

pub enum ViewAction {
    Continue,
    Close,
}

pub trait View {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, code: KeyCode) -> ViewAction;
}

/// Run an interactive ratatui view. Sets up the terminal, event loop,
/// and panic hook, then restores the terminal on exit.
pub fn run_view(view: &mut dyn View) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| view.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                match view.handle_key(key.code) {
                    ViewAction::Close => break Ok(()),
                    ViewAction::Continue => {}
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_span_colors() {
        let pos = money_span(1500.0);
        assert_eq!(pos.content, "Rp 1.500");
        assert_eq!(pos.style, AMOUNT_POS_STYLE);
        let neg = money_span(-20.0);
        assert_eq!(neg.content, "-Rp 20");
        assert_eq!(neg.style, AMOUNT_NEG_STYLE);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Kategori", 20), "Kategori");
        assert_eq!(truncate("Transportasi", 6), "Trans\u{2026}");
        assert_eq!(truncate("abc", 0), "");
    }
}
