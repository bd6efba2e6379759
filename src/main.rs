use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};
use tao::{
    dpi::LogicalSize,
    event::{Event as TaoEvent, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};
use wry::{WebView, WebViewBuilder};

use folio::app::{App, Effect};
use folio::assets::{AssetServer, PROTOCOL};
use folio::config::{project_dirs, Settings};
use folio::ipc::PageMessage;
use folio::paths::PageOrigin;
use folio::portfolio::Portfolio;
use folio::watch::watch_file;

const INITIAL_WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 900.0;
const LOG_FILENAME: &str = "folio.log";
/// Saves often arrive as a burst of filesystem events.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug)]
enum UserEvent {
    Ipc(String),
    Reload,
}

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Browse a markdown portfolio with image galleries")]
struct Cli {
    /// Markdown file describing the portfolio. Images resolve relative to it.
    #[arg(default_value = "portfolio.md")]
    portfolio: PathBuf,

    /// Settings file (defaults to config.json in the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log (defaults to the user cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Do not reload when the portfolio file changes
    #[arg(long)]
    no_watch: bool,
}

fn init_logging(cli: &Cli) -> Result<PathBuf> {
    let path = cli
        .log_file
        .clone()
        .or_else(|| project_dirs().map(|dirs| dirs.cache_dir().join(LOG_FILENAME)))
        .unwrap_or_else(|| PathBuf::from(LOG_FILENAME));

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create log directory {}", dir.display()))?;
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    WriteLogger::init(
        level,
        Config::default(),
        File::create(&path).with_context(|| format!("create log file {}", path.display()))?,
    )?;
    Ok(path)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging(&cli)?;
    info!("Starting Folio, logging to {}", log_path.display());

    let settings = Settings::load_or_default(cli.config.as_deref())?;
    let portfolio_path = cli
        .portfolio
        .canonicalize()
        .with_context(|| format!("portfolio not found: {}", cli.portfolio.display()))?;
    let root = portfolio_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let portfolio = Portfolio::load(&portfolio_path)?;

    let origin = PageOrigin::app();
    let mut app = App::new(portfolio, settings, origin.clone(), Instant::now());
    let server = AssetServer::new(root, app.page());
    info!("Serving {} at {}", server.root().display(), origin.url());

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(window_title(&app))
        .with_inner_size(LogicalSize::new(INITIAL_WIDTH, HEIGHT))
        .build(&event_loop)
        .context("create window")?;

    let protocol_server = server.clone();
    let ipc_proxy = proxy.clone();
    let page_url = origin.url();
    let webview = WebViewBuilder::new()
        .with_custom_protocol(PROTOCOL.to_string(), move |_webview_id, request| {
            protocol_server.respond(request.uri().path())
        })
        .with_ipc_handler(move |req| {
            if ipc_proxy.send_event(UserEvent::Ipc(req.body().clone())).is_err() {
                warn!("Event loop closed, dropping page message");
            }
        })
        .with_navigation_handler(move |url| allow_navigation(&page_url, &url))
        .with_url(origin.url())
        .build(&window)
        .context("create webview")?;

    let watcher = if cli.no_watch {
        None
    } else {
        let reload_proxy = proxy.clone();
        match watch_file(&portfolio_path, move || {
            let _ = reload_proxy.send_event(UserEvent::Reload);
        }) {
            Ok(watcher) => {
                info!("Watching {}", portfolio_path.display());
                Some(watcher)
            }
            Err(e) => {
                warn!("Live reload disabled: {e}");
                None
            }
        }
    };

    let mut last_reload: Option<Instant> = None;

    event_loop.run(move |event, _target, control_flow| {
        let _watching = watcher.as_ref();

        match event {
            TaoEvent::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                if let Some(script) = app.tick(Instant::now()) {
                    eval(&webview, &script);
                }
            }
            TaoEvent::UserEvent(UserEvent::Ipc(body)) => match PageMessage::parse(&body) {
                Ok(message) => {
                    let effects = app.handle(message);
                    if apply(effects, &webview, &mut app) {
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                }
                Err(e) => warn!("{e}"),
            },
            TaoEvent::UserEvent(UserEvent::Reload) => {
                let now = Instant::now();
                if last_reload.is_some_and(|at| now.duration_since(at) < RELOAD_DEBOUNCE) {
                    debug!("Reload debounced");
                } else {
                    last_reload = Some(now);
                    match Portfolio::load(&portfolio_path) {
                        Ok(portfolio) => {
                            server.set_page(app.reload(portfolio, now));
                            window.set_title(&window_title(&app));
                            if let Err(e) = webview.load_url(&origin.url()) {
                                error!("Failed to reload page: {e}");
                            }
                            info!("Reloaded {}", portfolio_path.display());
                        }
                        Err(e) => error!("Reload failed: {e:#}"),
                    }
                }
            }
            TaoEvent::WindowEvent {
                event: WindowEvent::Focused(focused),
                ..
            } => app.set_visible(focused, Instant::now()),
            TaoEvent::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                *control_flow = ControlFlow::Exit;
                return;
            }
            _ => {}
        }

        *control_flow = match app.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    })
}

fn window_title(app: &App) -> String {
    let title = &app.portfolio().title;
    if title.is_empty() {
        "Folio".to_string()
    } else {
        format!("Folio - {title}")
    }
}

fn eval(webview: &WebView, script: &str) {
    if let Err(e) = webview.evaluate_script(script) {
        error!("evaluate_script failed: {e}");
    }
}

/// Apply effects in order. Returns true when the app should exit.
fn apply(effects: Vec<Effect>, webview: &WebView, app: &mut App) -> bool {
    for effect in effects {
        match effect {
            Effect::Script(script) => eval(webview, &script),
            Effect::OpenUrl(url) => {
                if let Err(e) = open::that(&url) {
                    warn!("Failed to open {url}: {e}");
                }
            }
            Effect::SendMail(link) => {
                let script = match open::that(&link) {
                    Ok(()) => app.mail_opened(),
                    Err(e) => {
                        warn!("No mail client: {e}");
                        let copied = copy_to_clipboard(&link);
                        app.mail_failed(&link, copied)
                    }
                };
                if let Some(script) = script {
                    eval(webview, &script);
                }
            }
            Effect::CloseWindow | Effect::Quit => return true,
        }
    }
    false
}

fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
        Ok(()) => true,
        Err(e) => {
            warn!("Clipboard unavailable: {e}");
            false
        }
    }
}

/// Keep the webview on the app origin; everything else goes to the system.
fn allow_navigation(page_url: &str, url: &str) -> bool {
    if url.starts_with(page_url)
        || url.starts_with(&format!("{PROTOCOL}:"))
        || url.starts_with("about:")
        || url.starts_with("data:")
    {
        return true;
    }
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("mailto:") {
        if let Err(e) = open::that(url) {
            warn!("Failed to open {url}: {e}");
        }
        return false;
    }
    debug!("Blocked navigation to {url}");
    false
}

fn main() {
    if let Err(err) = run() {
        error!("Application error: {err:?}");
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}
