//! `cdeck`: interactive terminal host for the command palette.
//!
//! Runs a full-screen console over a simulated device fleet. Ctrl+K
//! summons the palette; the stock catalog's actions report through the
//! toast center and destructive ones ask for confirmation inline.
//!
//! Input is owned entirely by the main thread. Spawned actions never
//! touch the terminal: notifications land in the shared [`ToastCenter`]
//! and confirmation prompts travel back over a channel, where the event
//! loop renders them and answers with the next y/n keypress.

use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use colored::Colorize;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::info;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

use command_deck::catalog::{self, CatalogServices};
use command_deck::{
    CommandGroup, CommandRegistry, ConfirmPrompt, Confirmer, Density, DeviceOps,
    NavDirection, Navigator, NotifyKind, Notifier, PaletteController, PanelOps, PrefsStore,
    Presentation, SharedRegistry, ThemeMode, Toast, ToastCenter, UiPrefs, shortcuts,
};

/// Terminal host for the operations command palette.
#[derive(Parser, Debug)]
#[command(
    name = "cdeck",
    version,
    about = "Keyboard-first command palette for the device operations console"
)]
struct Cli {
    /// Start with this theme instead of the persisted preference.
    #[arg(long, value_parser = ThemeMode::from_str)]
    theme: Option<ThemeMode>,

    /// Start with this density instead of the persisted preference.
    #[arg(long, value_parser = Density::from_str)]
    density: Option<Density>,

    /// Keep preferences in memory only.
    #[arg(long)]
    no_persist: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Actions are fire-and-forget; two workers are plenty for a demo
    // fleet.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    run(cli, runtime.handle().clone())
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: Cli, handle: Handle) -> Result<()> {
    let prefs = if cli.no_persist {
        Arc::new(PrefsStore::ephemeral(UiPrefs::default()))
    } else {
        Arc::new(PrefsStore::open_default())
    };
    if cli.theme.is_some() || cli.density.is_some() {
        let mut startup = prefs.current();
        if let Some(theme) = cli.theme {
            startup.theme = theme;
        }
        if let Some(density) = cli.density {
            startup.density = density;
        }
        prefs.set(startup);
    }

    let toasts = Arc::new(ToastCenter::new());
    let (confirm_tx, confirm_rx) = mpsc::unbounded_channel();
    let services = CatalogServices {
        notifier: toasts.clone(),
        confirmer: Arc::new(ChannelConfirmer { tx: confirm_tx }),
        navigator: Arc::new(DemoNavigator {
            notifier: toasts.clone(),
        }),
        devices: Arc::new(DemoDeviceOps),
        panels: Arc::new(DemoPanelOps),
        prefs: prefs.clone(),
    };

    let registry: SharedRegistry = Arc::new(RwLock::new(CommandRegistry::new()));
    {
        let mut reg = registry.write();
        for command in catalog::default_commands(&services) {
            reg.register(command)?;
        }
    }

    let dirty = Arc::new(AtomicBool::new(true));
    let presentation = Arc::new(RedrawSignal {
        dirty: dirty.clone(),
    });
    let palette = PaletteController::new(registry, presentation, handle);

    let mut shell = Shell {
        palette,
        toasts,
        confirm_rx,
        prefs,
        dirty,
        pending_confirm: None,
        drawn_toasts: 0,
    };

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let result = shell.event_loop(&mut stdout);
    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// A confirmation prompt in flight from a spawned action.
struct ConfirmRequest {
    prompt: ConfirmPrompt,
    respond: oneshot::Sender<bool>,
}

/// Ships prompts to the event loop and waits for the operator's answer.
struct ChannelConfirmer {
    tx: mpsc::UnboundedSender<ConfirmRequest>,
}

#[async_trait]
impl Confirmer for ChannelConfirmer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        let (respond, response) = oneshot::channel();
        let request = ConfirmRequest {
            prompt: prompt.clone(),
            respond,
        };
        if self.tx.send(request).is_err() {
            return false;
        }
        response.await.unwrap_or(false)
    }
}

/// Presentation adapter that just requests a redraw; the event loop
/// renders from controller state on its next pass.
struct RedrawSignal {
    dirty: Arc<AtomicBool>,
}

impl RedrawSignal {
    fn mark(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }
}

impl Presentation for RedrawSignal {
    fn show(&self) {
        self.mark();
    }

    fn hide(&self) {
        self.mark();
    }

    fn focus_input(&self) {
        self.mark();
    }

    fn render_groups(&self, _groups: &[CommandGroup]) {
        self.mark();
    }

    fn highlight(&self, _index: usize) {
        self.mark();
    }

    fn show_no_results(&self) {
        self.mark();
    }
}

struct DemoNavigator {
    notifier: Arc<dyn Notifier>,
}

impl Navigator for DemoNavigator {
    fn navigate(&self, route: &str) {
        info!(route, "navigating");
        self.notifier
            .notify(&format!("Opening {route}"), NotifyKind::Info);
    }
}

/// Simulated fleet; real deployments put their API client here.
struct DemoDeviceOps;

#[async_trait]
impl DeviceOps for DemoDeviceOps {
    async fn sync_all(&self) -> Result<(), String> {
        tokio::time::sleep(Duration::from_millis(400)).await;
        Ok(())
    }

    async fn reboot_offline(&self) -> Result<(), String> {
        tokio::time::sleep(Duration::from_millis(600)).await;
        Ok(())
    }
}

struct DemoPanelOps;

impl PanelOps for DemoPanelOps {
    fn export_summary(&self) -> Result<(), String> {
        Ok(())
    }

    fn reload_all(&self) {}
}

struct Shell {
    palette: PaletteController,
    toasts: Arc<ToastCenter>,
    confirm_rx: mpsc::UnboundedReceiver<ConfirmRequest>,
    prefs: Arc<PrefsStore>,
    dirty: Arc<AtomicBool>,
    pending_confirm: Option<ConfirmRequest>,
    drawn_toasts: usize,
}

impl Shell {
    fn event_loop(&mut self, out: &mut impl Write) -> Result<()> {
        loop {
            if self.pending_confirm.is_none() {
                if let Ok(request) = self.confirm_rx.try_recv() {
                    self.pending_confirm = Some(request);
                    self.dirty.store(true, Ordering::SeqCst);
                }
            }

            self.toasts.tick(Instant::now());
            let toast_count = self.toasts.len();
            if toast_count != self.drawn_toasts {
                self.drawn_toasts = toast_count;
                self.dirty.store(true, Ordering::SeqCst);
            }

            if self.dirty.swap(false, Ordering::SeqCst) {
                self.draw(out)?;
            }

            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(_, _) => self.dirty.store(true, Ordering::SeqCst),
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the shell should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // A pending confirmation captures the keyboard until answered.
        if let Some(request) = self.pending_confirm.take() {
            match key.code {
                KeyCode::Char('c') if ctrl => {
                    let _ = request.respond.send(false);
                    return true;
                }
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    let _ = request.respond.send(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    let _ = request.respond.send(false);
                }
                _ => self.pending_confirm = Some(request),
            }
            self.dirty.store(true, Ordering::SeqCst);
            return false;
        }

        match key.code {
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('k') if ctrl => self.palette.toggle(),
            KeyCode::Char('u') if ctrl && self.palette.is_open() => {
                self.palette.on_query_change("");
            }
            KeyCode::Esc => self.palette.on_escape(),
            KeyCode::Up => self.palette.on_navigate(NavDirection::Up),
            KeyCode::Down => self.palette.on_navigate(NavDirection::Down),
            KeyCode::Enter => self.palette.on_activate(),
            KeyCode::Backspace if self.palette.is_open() => {
                let mut query = self.palette.query().to_string();
                query.pop();
                self.palette.on_query_change(&query);
            }
            KeyCode::Char('q') if !self.palette.is_open() => return true,
            KeyCode::Char(c) if self.palette.is_open() && !ctrl => {
                let mut query = self.palette.query().to_string();
                query.push(c);
                self.palette.on_query_change(&query);
            }
            _ => {}
        }
        false
    }

    fn draw(&self, out: &mut impl Write) -> Result<()> {
        queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        let prefs = self.prefs.current();
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!(
            "{}   {}",
            "Operations Console".bold(),
            format!(
                "theme:{} density:{}",
                prefs.theme.as_str(),
                prefs.density.as_str()
            )
            .dimmed()
        ));
        lines.push(String::new());

        if let Some(request) = &self.pending_confirm {
            lines.push(request.prompt.title.yellow().bold().to_string());
            lines.push(request.prompt.message.clone());
            lines.push(
                format!(
                    "[y] {}   [n] {}",
                    request.prompt.confirm_label, request.prompt.cancel_label
                )
                .dimmed()
                .to_string(),
            );
        } else if self.palette.is_open() {
            self.draw_palette(&mut lines, prefs.density);
        } else {
            lines.push(format!(
                "Press {} to open the command palette, {} to quit.",
                shortcuts::PALETTE.bold(),
                shortcuts::QUIT.bold()
            ));
        }

        let toasts = self.toasts.active();
        if !toasts.is_empty() {
            lines.push(String::new());
            for toast in &toasts {
                lines.push(format!("• {}", paint_toast(toast)));
            }
        }

        for line in lines {
            write!(out, "{line}\r\n")?;
        }
        out.flush()?;
        Ok(())
    }

    fn draw_palette(&self, lines: &mut Vec<String>, density: Density) {
        let query = self.palette.query();
        if query.is_empty() {
            lines.push(format!("› {}", "Search commands or devices...".dimmed()));
        } else {
            lines.push(format!("› {query}"));
        }
        lines.push(String::new());

        let results = self.palette.results();
        if results.is_no_results() {
            lines.push(format!("  {}", "No matching commands".dimmed()));
        } else {
            let selected = self.palette.selection();
            let compact = density == Density::Compact;
            let mut flat_index = 0usize;
            for group in &results.groups {
                lines.push(group.category.label().cyan().bold().to_string());
                for command in &group.commands {
                    let is_selected = Some(flat_index) == selected;
                    let marker = if is_selected { "▶" } else { " " };
                    let title = pad_display(&command.title, 28);
                    let row = if compact {
                        format!("{marker} {} {}", command.icon, title)
                    } else {
                        format!(
                            "{marker} {} {}  {}",
                            command.icon,
                            title,
                            command.description.dimmed()
                        )
                    };
                    if is_selected {
                        lines.push(row.reversed().to_string());
                    } else {
                        lines.push(row);
                    }
                    flat_index += 1;
                }
            }
        }

        lines.push(String::new());
        lines.push(
            format!(
                "{} select · {} run · {} clear · {} close",
                shortcuts::NAVIGATE,
                shortcuts::ACTIVATE,
                shortcuts::CLEAR_QUERY,
                shortcuts::CLOSE
            )
            .dimmed()
            .to_string(),
        );
    }
}

/// Pad to a display width, emoji and wide glyphs included.
fn pad_display(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    let mut padded = text.to_string();
    for _ in current..width {
        padded.push(' ');
    }
    padded
}

fn paint_toast(toast: &Toast) -> String {
    match toast.kind {
        NotifyKind::Info => toast.message.blue().to_string(),
        NotifyKind::Success => toast.message.green().to_string(),
        NotifyKind::Warning => toast.message.yellow().to_string(),
        NotifyKind::Error => toast.message.red().to_string(),
    }
}
