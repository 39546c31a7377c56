use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::fmt::number;
use crate::models;
use crate::tui::{self, View, ViewAction, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const PAGE_SIZE: usize = 20;
const MIN_COL_WIDTH: u16 = 12;
const ROW_NUM_WIDTH: u16 = 6;

enum BrowseMode {
    Normal,
    GotoRow(String),
}

pub enum BrowseAction {
    Continue,
    Close,
}

/// Paged, horizontally scrollable view over every row of a parsed table.
pub struct DataBrowser {
    title: String,
    table: Arc<models::Table>,
    offset: usize,
    visible_count: usize,
    selected: usize,
    col_offset: usize,
    visible_cols: usize,
    mode: BrowseMode,
    status_message: Option<String>,
    table_state: TableState,
}

impl DataBrowser {
    pub fn new(title: String, table: Arc<models::Table>) -> Self {
        let visible_cols = table.headers.len().max(1);
        Self {
            title,
            table,
            offset: 0,
            visible_count: PAGE_SIZE,
            selected: 0,
            col_offset: 0,
            visible_cols,
            mode: BrowseMode::Normal,
            status_message: None,
            table_state: TableState::default(),
        }
    }

    fn row_count(&self) -> usize {
        self.table.len()
    }

    /// Draw the browser into the given frame. Callable from an external event loop.
    pub fn draw_frame(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let [title_area, table_area, status_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(format!("Full Data View: {}", self.title)).style(HEADER_STYLE),
            title_area,
        );

        // Fit as many columns as the width allows at MIN_COL_WIDTH each.
        let usable = table_area.width.saturating_sub(ROW_NUM_WIDTH + 1);
        let fit = (usable / (MIN_COL_WIDTH + 1)).max(1) as usize;
        let total_cols = self.table.headers.len();
        self.visible_cols = fit.min(total_cols.max(1));
        self.col_offset = self.col_offset.min(total_cols.saturating_sub(self.visible_cols));
        let col_end = (self.col_offset + self.visible_cols).min(total_cols);
        let headers = &self.table.headers[self.col_offset..col_end];
        let col_width = if headers.is_empty() {
            MIN_COL_WIDTH as usize
        } else {
            (usable as usize / headers.len()).saturating_sub(1).max(1)
        };

        let header_overhead = 2u16; // header row + bottom_margin
        let available_height = table_area.height.saturating_sub(header_overhead) as usize;
        self.visible_count = available_height.max(1);

        let end_row = (self.offset + self.visible_count).min(self.row_count());
        let rows: Vec<Row> = (self.offset..end_row)
            .map(|idx| {
                let values = self.table.display_row(idx);
                let mut cells = vec![Cell::from(number(idx + 1)).style(FOOTER_STYLE)];
                cells.extend(
                    values[self.col_offset..col_end]
                        .iter()
                        .map(|v| Cell::from(tui::truncate(v, col_width))),
                );
                Row::new(cells)
            })
            .collect();

        let mut widths = vec![Constraint::Length(ROW_NUM_WIDTH)];
        widths.extend(headers.iter().map(|_| Constraint::Fill(1)));

        let mut header_cells = vec![Cell::from("#")];
        header_cells.extend(headers.iter().map(|h| Cell::from(tui::truncate(h, col_width))));

        if self.row_count() > 0 {
            self.selected = self.selected.min(end_row - self.offset - 1);
            self.table_state.select(Some(self.selected));
        } else {
            self.table_state.select(None);
        }
        let widget = Table::new(rows, widths)
            .header(Row::new(header_cells).style(HEADER_STYLE).bottom_margin(1))
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE);
        frame.render_stateful_widget(widget, table_area, &mut self.table_state);

        let status = format!(
            "Rows {}-{} of {} | Columns {}-{} of {}",
            if end_row == 0 { 0 } else { self.offset + 1 },
            end_row,
            number(self.row_count()),
            if col_end == 0 { 0 } else { self.col_offset + 1 },
            col_end,
            total_cols,
        );
        let status = match &self.status_message {
            Some(msg) => format!("{status} | {msg}"),
            None => status,
        };
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), status_area);

        let keys_widget = match &self.mode {
            BrowseMode::Normal => Paragraph::new(
                "\u{2191}/\u{2193}:select  n/p:page  \u{2190}/\u{2192}:columns  Home/End  g:go to row  q:back",
            )
            .style(FOOTER_STYLE),
            BrowseMode::GotoRow(input) => Paragraph::new(format!("Go to row: {input}\u{2588}")),
        };
        frame.render_widget(keys_widget, keys_area);
    }

    /// Handle a key event. Returns a BrowseAction indicating what the caller should do.
    pub fn handle_key_event(&mut self, code: KeyCode) -> BrowseAction {
        self.status_message = None;

        match &self.mode {
            BrowseMode::Normal => match code {
                KeyCode::Char('q') | KeyCode::Esc => return BrowseAction::Close,
                KeyCode::Down => {
                    let on_screen = self.visible_count.min(self.row_count().saturating_sub(self.offset));
                    if self.selected + 1 < on_screen {
                        self.selected += 1;
                    } else if self.offset + self.visible_count < self.row_count() {
                        self.offset += 1;
                    }
                }
                KeyCode::Up => {
                    if self.selected > 0 {
                        self.selected -= 1;
                    } else if self.offset > 0 {
                        self.offset -= 1;
                    }
                }
                KeyCode::Char('n') | KeyCode::PageDown => {
                    self.scroll_down();
                    self.selected = 0;
                }
                KeyCode::Char('p') | KeyCode::PageUp => {
                    self.scroll_up();
                    self.selected = 0;
                }
                KeyCode::Right => {
                    if self.col_offset + self.visible_cols < self.table.headers.len() {
                        self.col_offset += 1;
                    }
                }
                KeyCode::Left => {
                    self.col_offset = self.col_offset.saturating_sub(1);
                }
                KeyCode::Home => {
                    self.offset = 0;
                    self.selected = 0;
                }
                KeyCode::End => {
                    self.scroll_to_end();
                    self.selected = 0;
                }
                KeyCode::Char('g') => {
                    self.mode = BrowseMode::GotoRow(String::new());
                }
                _ => {}
            },
            BrowseMode::GotoRow(_) => match code {
                KeyCode::Esc => self.mode = BrowseMode::Normal,
                KeyCode::Enter => self.submit_input(),
                KeyCode::Backspace => {
                    if let BrowseMode::GotoRow(s) = &mut self.mode {
                        s.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let BrowseMode::GotoRow(s) = &mut self.mode {
                        s.push(c);
                    }
                }
                _ => {}
            },
        }
        BrowseAction::Continue
    }

    fn scroll_down(&mut self) {
        let new_offset = self.offset + self.visible_count;
        if new_offset < self.row_count() {
            self.offset = new_offset;
        }
    }

    fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.visible_count);
    }

    fn scroll_to_end(&mut self) {
        self.offset = self.row_count().saturating_sub(self.visible_count);
    }

    fn submit_input(&mut self) {
        let mode = std::mem::replace(&mut self.mode, BrowseMode::Normal);
        if let BrowseMode::GotoRow(input) = mode {
            let input = input.trim();
            match input.parse::<usize>() {
                Ok(row) if row >= 1 && row <= self.row_count() => {
                    self.offset = row - 1;
                    self.selected = 0;
                }
                _ if input.is_empty() => {}
                _ => {
                    self.status_message = Some(format!("Row {input} is out of range"));
                }
            }
        }
    }
}

impl View for DataBrowser {
    fn draw(&mut self, frame: &mut Frame) {
        self.draw_frame(frame);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        match self.handle_key_event(code) {
            BrowseAction::Close => ViewAction::Close,
            BrowseAction::Continue => ViewAction::Continue,
        }
    }
}
