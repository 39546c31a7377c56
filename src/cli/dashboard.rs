use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::app::{Activity, AppState, Dataset, PREVIEW_ROWS};
use crate::browser::{BrowseAction, DataBrowser};
use crate::cli::{file_label, load_dataset};
use crate::error::Result;
use crate::fmt::{number, rupiah};
use crate::markdown;
use crate::models::FinancialReport;
use crate::narrative::{request_narrative, GeminiClient, TextGenerator};
use crate::settings::{load_settings, Settings};
use crate::tui::{self, money_span, BAR_STYLE, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE};

const TICK: Duration = Duration::from_millis(100);
const SPINNER: &[&str] = &[
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}", "\u{2827}",
    "\u{2807}", "\u{280f}",
];

enum DashboardScreen {
    Home,
    Data(DataBrowser),
}

/// Completion message sent back from a spawned task.
enum Outcome {
    Loaded { generation: u64, result: Result<Dataset> },
    Analyzed { generation: u64, result: Result<String> },
}

struct Dashboard {
    state: AppState,
    screen: DashboardScreen,
    open_prompt: Option<String>,
    analysis_scroll: u16,
    spinner: usize,
    settings: Settings,
    generator: Arc<dyn TextGenerator>,
    runtime: Handle,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
    tasks: Vec<JoinHandle<()>>,
}

impl Dashboard {
    fn new(settings: Settings, generator: Arc<dyn TextGenerator>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: AppState::new(),
            screen: DashboardScreen::Home,
            open_prompt: None,
            analysis_scroll: 0,
            spinner: 0,
            settings,
            generator,
            runtime,
            tx,
            rx,
            tasks: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    fn open_file(&mut self, path: String) {
        let path = path.trim().to_string();
        if path.is_empty() {
            return;
        }
        let Some(generation) = self.state.begin_load(&file_label(Path::new(&path))) else {
            debug!("Ignoring open while a load is in flight");
            return;
        };
        self.abort_tasks();
        self.screen = DashboardScreen::Home;
        self.analysis_scroll = 0;

        let tx = self.tx.clone();
        let settings = self.settings.clone();
        let handle = self.runtime.spawn(async move {
            let result = load_dataset(&path, &settings).await;
            let _ = tx.send(Outcome::Loaded { generation, result });
        });
        self.tasks.push(handle);
    }

    fn analyze(&mut self) {
        let Some((generation, table)) = self.state.begin_analysis() else {
            return;
        };
        info!("Starting analysis of {} rows", table.len());
        self.analysis_scroll = 0;

        let tx = self.tx.clone();
        let generator = Arc::clone(&self.generator);
        let handle = self.runtime.spawn(async move {
            let result = request_narrative(generator.as_ref(), &table).await;
            let _ = tx.send(Outcome::Analyzed { generation, result });
        });
        self.tasks.push(handle);
    }

    /// Back to the empty upload screen. In-flight work is cancelled.
    fn upload_new(&mut self) {
        self.abort_tasks();
        self.state.reset();
        self.screen = DashboardScreen::Home;
        self.open_prompt = None;
        self.analysis_scroll = 0;
    }

    fn abort_tasks(&mut self) {
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Loaded { generation, result } => self.state.finish_load(generation, result),
            Outcome::Analyzed { generation, result } => {
                self.state.finish_analysis(generation, result)
            }
        }
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
        }
        self.tasks.retain(|h| !h.is_finished());
    }

    fn tick(&mut self) {
        self.spinner = (self.spinner + 1) % SPINNER.len();
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Returns true when the dashboard should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.open_prompt.is_some() {
            match code {
                KeyCode::Esc => self.open_prompt = None,
                KeyCode::Enter => {
                    if let Some(path) = self.open_prompt.take() {
                        self.open_file(path);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(input) = self.open_prompt.as_mut() {
                        input.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(input) = self.open_prompt.as_mut() {
                        input.push(c);
                    }
                }
                _ => {}
            }
            return false;
        }

        if let DashboardScreen::Data(ref mut browser) = self.screen {
            let close = matches!(browser.handle_key_event(code), BrowseAction::Close);
            if close {
                self.screen = DashboardScreen::Home;
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('o') => {
                if self.state.activity != Activity::Loading {
                    self.open_prompt = Some(String::new());
                }
            }
            KeyCode::Char('a') => self.analyze(),
            KeyCode::Char('v') => self.enter_data_view(),
            KeyCode::Char('u') => self.upload_new(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.analysis_scroll = self.analysis_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.analysis_scroll = self.analysis_scroll.saturating_sub(1);
            }
            KeyCode::PageDown => self.analysis_scroll = self.analysis_scroll.saturating_add(10),
            KeyCode::PageUp => self.analysis_scroll = self.analysis_scroll.saturating_sub(10),
            KeyCode::Esc => self.state.error = None,
            _ => {}
        }
        false
    }

    fn enter_data_view(&mut self) {
        match &self.state.dataset {
            Some(d) if !d.table.is_empty() => {
                let browser = DataBrowser::new(d.file_name.clone(), Arc::clone(&d.table));
                self.screen = DashboardScreen::Data(browser);
            }
            _ => self.state.error = Some("No data loaded. Press o to open a file.".to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn draw(&mut self, frame: &mut Frame) {
        if let DashboardScreen::Data(ref mut browser) = self.screen {
            browser.draw_frame(frame);
            return;
        }
        self.draw_home(frame);
    }

    fn draw_home(&self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let [header_area, sep, banner_area, stats_area, body_area, preview_area, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Percentage(45),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(area);

        let title = match &self.state.dataset {
            Some(d) => format!(" FinAnalyzer \u{2502} {}", d.file_name),
            None => " FinAnalyzer".to_string(),
        };
        frame.render_widget(Paragraph::new(title).style(HEADER_STYLE), header_area);
        let sep_line = "\u{2501}".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(sep_line).style(border_style), sep);

        frame.render_widget(self.banner(), banner_area);

        match &self.state.dataset {
            Some(dataset) => {
                self.draw_stats(frame, stats_area, dataset);

                let [chart_area, analysis_area] =
                    Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                        .areas(body_area);
                self.draw_categories(frame, chart_area, dataset);
                self.draw_analysis(frame, analysis_area);
                draw_preview(frame, preview_area, dataset);
            }
            None => {
                let welcome_area = Rect {
                    height: stats_area.height + body_area.height + preview_area.height,
                    ..stats_area
                };
                frame.render_widget(self.welcome(), welcome_area);
            }
        }

        let hints = match &self.open_prompt {
            Some(input) => Paragraph::new(format!(" Open file (.csv/.xlsx/.xls): {input}\u{2588}")),
            None => Paragraph::new(
                " o=open file  a=analyze  v=view data  u=upload new  \u{2191}/\u{2193}=scroll analysis  q=quit",
            )
            .style(FOOTER_STYLE),
        };
        frame.render_widget(hints, hints_area);
    }

    fn banner(&self) -> Paragraph<'static> {
        if let Some(err) = &self.state.error {
            return Paragraph::new(format!(" \u{26a0} {err}  (Esc to dismiss)")).style(ERROR_STYLE);
        }
        let spin = SPINNER[self.spinner];
        let busy = Style::default().fg(Color::Yellow);
        match self.state.activity {
            Activity::Loading => {
                let name = self.state.pending_file.as_deref().unwrap_or("file");
                Paragraph::new(format!(" {spin} Loading {name}...")).style(busy)
            }
            Activity::Analyzing => {
                Paragraph::new(format!(" {spin} Analyzing with Gemini...")).style(busy)
            }
            Activity::Idle => Paragraph::new(""),
        }
    }

    fn welcome(&self) -> Paragraph<'static> {
        let c = &self.settings.columns;
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                " Welcome to FinAnalyzer",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(" Press o to open a CSV, XLSX or XLS file of transactions."),
            Line::from(format!(
                " Totals need the columns \"{}\", \"{}\" and \"{}\".",
                c.type_column, c.amount_column, c.category_column
            )),
            Line::from(format!(
                " Rows typed \"{}\" count as income, \"{}\" as expense.",
                c.income_marker, c.expense_marker
            )),
        ];
        Paragraph::new(lines)
    }

    fn draw_stats(&self, frame: &mut Frame, area: Rect, dataset: &Dataset) {
        let cards: Vec<(&str, Span<'static>)> = match &dataset.report {
            Some(report) => {
                let s = &report.summary;
                vec![
                    ("File", Span::raw(dataset.file_name.clone())),
                    ("Total Income", money_span(s.total_income)),
                    ("Total Expense", Span::styled(rupiah(s.total_expense), tui::AMOUNT_NEG_STYLE)),
                    ("Net Balance", money_span(s.net_balance)),
                ]
            }
            None => vec![
                ("File", Span::raw(dataset.file_name.clone())),
                ("Rows", Span::raw(number(dataset.table.len()))),
                ("Columns", Span::raw(number(dataset.table.headers.len()))),
            ],
        };

        let n = cards.len() as u32;
        let areas = Layout::horizontal(vec![Constraint::Ratio(1, n); cards.len()]).split(area);
        for ((label, value), card_area) in cards.into_iter().zip(areas.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(format!(" {label} "), FOOTER_STYLE));
            frame.render_widget(Paragraph::new(Line::from(value)).block(block), *card_area);
        }
    }

    fn draw_categories(&self, frame: &mut Frame, area: Rect, dataset: &Dataset) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Expense by Category ");
        let inner_width = area.width.saturating_sub(2);
        let lines = match &dataset.report {
            Some(report) => category_lines(report, inner_width),
            None => {
                let missing = self.settings.columns.missing_columns(&dataset.table);
                vec![
                    Line::from(Span::styled(" Summary unavailable.", FOOTER_STYLE)),
                    Line::from(Span::styled(
                        format!(" Missing: {}", missing.join(", ")),
                        FOOTER_STYLE,
                    )),
                ]
            }
        };
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_analysis(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" AI Financial Analysis ");

        let widget = match (&self.state.analysis, self.state.activity) {
            (_, Activity::Analyzing) => Paragraph::new(format!(
                " {} Analyzing your data. This can take a moment...",
                SPINNER[self.spinner]
            ))
            .style(Style::default().fg(Color::Yellow)),
            (Some(text), _) => Paragraph::new(markdown::render(text))
                .wrap(Wrap { trim: false })
                .scroll((self.analysis_scroll, 0)),
            (None, _) => Paragraph::new(" Press a to generate a narrative analysis of this data.")
                .style(FOOTER_STYLE),
        };
        frame.render_widget(widget.block(block), area);
    }
}

/// Horizontal bars for each expense category, largest first, scaled to the largest.
fn category_lines(report: &FinancialReport, width: u16) -> Vec<Line<'static>> {
    let ranked = report.ranked_categories();
    if ranked.is_empty() {
        return vec![Line::from(Span::styled(" No expense data to display.", FOOTER_STYLE))];
    }

    let name_width = ranked
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(16);
    let suffixes: Vec<String> = ranked
        .iter()
        .map(|c| format!(" {} ({:.1}%)", rupiah(c.amount), c.pct))
        .collect();
    let suffix_width = suffixes.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    let bar_room = (width as usize)
        .saturating_sub(name_width + 2 + suffix_width)
        .max(1);
    let max = ranked[0].amount;

    ranked
        .iter()
        .zip(suffixes)
        .map(|(c, suffix)| {
            let len = if max > 0.0 {
                ((c.amount / max) * bar_room as f64).round() as usize
            } else {
                0
            };
            Line::from(vec![
                Span::raw(format!(
                    " {:<w$} ",
                    tui::truncate(&c.name, name_width),
                    w = name_width
                )),
                Span::styled("\u{2588}".repeat(len.max(1)), BAR_STYLE),
                Span::styled(suffix, FOOTER_STYLE),
            ])
        })
        .collect()
}

fn draw_preview(frame: &mut Frame, area: Rect, dataset: &Dataset) {
    let data = &dataset.table;
    let shown = data.len().min(PREVIEW_ROWS);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(
            " Data Preview (first {} of {} rows, v for all) ",
            number(shown),
            number(data.len())
        ));

    let cols = data.headers.len().max(1);
    let col_width = (area.width.saturating_sub(2) as usize / cols)
        .saturating_sub(1)
        .max(1);
    let header = Row::new(
        data.headers
            .iter()
            .map(|h| Cell::from(tui::truncate(h, col_width))),
    )
    .style(HEADER_STYLE);
    let rows: Vec<Row> = (0..shown)
        .map(|idx| {
            Row::new(
                data.display_row(idx)
                    .into_iter()
                    .map(|v| Cell::from(tui::truncate(&v, col_width))),
            )
        })
        .collect();
    let widths = vec![Constraint::Fill(1); cols];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

pub fn run(file: Option<String>, runtime: Handle) -> Result<()> {
    let settings = load_settings();
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::from_settings(&settings));
    let mut dashboard = Dashboard::new(settings, generator, runtime);
    if let Some(path) = file {
        dashboard.open_file(path);
    }

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        dashboard.drain_outcomes();
        if let Err(e) = terminal.draw(|frame| dashboard.draw(frame)) {
            break Err(e.into());
        }

        match event::poll(TICK) {
            Ok(true) => {
                // Key is available, fall through to event::read() below
            }
            Ok(false) => {
                dashboard.tick();
                continue;
            }
            Err(e) => break Err(e.into()),
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                if dashboard.handle_key(key.code) {
                    break Ok(());
                }
            }
            _ => {}
        }
    };

    dashboard.abort_tasks();
    drop(terminal);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::FinancialSummary;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::runtime::Runtime;

    struct Canned {
        calls: AtomicUsize,
        reply: String,
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reply.is_empty() {
                Err(AppError::Gemini("status 500".to_string()))
            } else {
                Ok(self.reply.clone())
            }
        }
    }

    fn setup(reply: &str) -> (Runtime, Arc<Canned>, Dashboard) {
        let rt = Runtime::new().unwrap();
        let canned = Arc::new(Canned {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
        });
        let generator: Arc<dyn TextGenerator> = canned.clone();
        let dashboard = Dashboard::new(Settings::default(), generator, rt.handle().clone());
        (rt, canned, dashboard)
    }

    fn wait(dashboard: &mut Dashboard) {
        let outcome = dashboard.rx.recv_timeout(Duration::from_secs(10)).unwrap();
        dashboard.apply(outcome);
    }

    fn type_path(dashboard: &mut Dashboard, path: &str) {
        dashboard.handle_key(KeyCode::Char('o'));
        for c in path.chars() {
            dashboard.handle_key(KeyCode::Char(c));
        }
        dashboard.handle_key(KeyCode::Enter);
    }

    fn ledger_file(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("ledger.csv");
        std::fs::write(
            &path,
            "Tipe Transaksi,Jumlah (IDR),Kategori\nPemasukan,1000,Gaji\nPengeluaran,400,Food\n",
        )
        .unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_open_file_then_analyze() {
        let dir = tempfile::tempdir().unwrap();
        let (_rt, canned, mut d) = setup("## Executive Summary\nAll good.");

        type_path(&mut d, &ledger_file(&dir));
        assert_eq!(d.state.activity, Activity::Loading);
        d.handle_key(KeyCode::Char('o'));
        assert!(d.open_prompt.is_none());
        wait(&mut d);

        let dataset = d.state.dataset.as_ref().unwrap();
        assert_eq!(dataset.file_name, "ledger.csv");
        assert_eq!(dataset.report.as_ref().unwrap().summary.net_balance, 600.0);

        d.handle_key(KeyCode::Char('a'));
        assert_eq!(d.state.activity, Activity::Analyzing);
        d.handle_key(KeyCode::Char('a'));
        wait(&mut d);
        assert_eq!(d.state.analysis.as_deref(), Some("## Executive Summary\nAll good."));
        assert_eq!(canned.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_analysis_failure_shows_banner() {
        let dir = tempfile::tempdir().unwrap();
        let (_rt, _canned, mut d) = setup("");
        d.open_file(ledger_file(&dir));
        wait(&mut d);
        d.handle_key(KeyCode::Char('a'));
        wait(&mut d);
        assert!(d.state.error.as_deref().unwrap().starts_with("Analysis failed:"));
        d.handle_key(KeyCode::Esc);
        assert!(d.state.error.is_none());
    }

    #[test]
    fn test_analyze_without_data() {
        let (_rt, canned, mut d) = setup("unused");
        d.handle_key(KeyCode::Char('a'));
        assert_eq!(d.state.error.as_deref(), Some("No data available to analyze."));
        assert_eq!(canned.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsupported_file_shows_banner() {
        let (_rt, _canned, mut d) = setup("unused");
        type_path(&mut d, "notes.txt");
        wait(&mut d);
        assert!(d.state.dataset.is_none());
        assert!(d
            .state
            .error
            .as_deref()
            .unwrap()
            .starts_with("Unsupported file type: .txt"));
    }

    #[test]
    fn test_upload_new_discards_everything() {
        let dir = tempfile::tempdir().unwrap();
        let (_rt, _canned, mut d) = setup("late");
        d.open_file(ledger_file(&dir));
        wait(&mut d);
        d.handle_key(KeyCode::Char('a'));
        d.handle_key(KeyCode::Char('u'));
        assert!(d.state.dataset.is_none());
        assert_eq!(d.state.activity, Activity::Idle);
        if let Ok(outcome) = d.rx.recv_timeout(Duration::from_millis(300)) {
            d.apply(outcome);
        }
        assert!(d.state.analysis.is_none());
    }

    #[test]
    fn test_prompt_escape_and_backspace() {
        let (_rt, _canned, mut d) = setup("unused");
        d.handle_key(KeyCode::Char('o'));
        d.handle_key(KeyCode::Char('x'));
        d.handle_key(KeyCode::Char('y'));
        d.handle_key(KeyCode::Backspace);
        assert_eq!(d.open_prompt.as_deref(), Some("x"));
        // 'q' is text while the prompt is open
        assert!(!d.handle_key(KeyCode::Char('q')));
        d.handle_key(KeyCode::Esc);
        assert!(d.open_prompt.is_none());
        assert_eq!(d.state.activity, Activity::Idle);
        assert!(d.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn test_data_view_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (_rt, _canned, mut d) = setup("unused");
        d.handle_key(KeyCode::Char('v'));
        assert!(matches!(d.screen, DashboardScreen::Home));
        assert!(d.state.error.is_some());

        d.open_file(ledger_file(&dir));
        wait(&mut d);
        d.handle_key(KeyCode::Char('v'));
        assert!(matches!(d.screen, DashboardScreen::Data(_)));
        d.handle_key(KeyCode::Char('q'));
        assert!(matches!(d.screen, DashboardScreen::Home));
    }

    #[test]
    fn test_category_lines_ranked_and_scaled() {
        let mut expense_by_category = BTreeMap::new();
        expense_by_category.insert("Food".to_string(), 300.0);
        expense_by_category.insert("Transport".to_string(), 100.0);
        let report = FinancialReport {
            summary: FinancialSummary {
                total_income: 0.0,
                total_expense: 400.0,
                net_balance: -400.0,
            },
            expense_by_category,
        };
        let lines = category_lines(&report, 60);
        assert_eq!(lines.len(), 2);
        let text = |l: &Line| l.spans.iter().map(|s| s.content.to_string()).collect::<String>();
        assert!(text(&lines[0]).contains("Food"));
        assert!(text(&lines[0]).contains("Rp 300 (75.0%)"));
        assert!(text(&lines[1]).contains("Transport"));
        assert!(lines[0].spans[1].content.chars().count() > lines[1].spans[1].content.chars().count());
    }

    #[test]
    fn test_category_lines_empty() {
        let report = FinancialReport {
            summary: FinancialSummary {
                total_income: 10.0,
                total_expense: 0.0,
                net_balance: 10.0,
            },
            expense_by_category: BTreeMap::new(),
        };
        let lines = category_lines(&report, 40);
        assert_eq!(lines.len(), 1);
    }
}
