//! Terminal bowls scorer (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. Side keys go
//! through a press tracker so a held key can remove a bowl.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bowls_scorer::app::{App, AppControl};
use bowls_scorer::config::AppConfig;
use bowls_scorer::term::{FrameBuffer, ScoreView, TerminalRenderer, Viewport};
use bowls_scorer::types::TICK_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    tracing::info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "scorer stopped");
    }
    result
}

/// Log to a file: the terminal itself is in raw mode on the alternate screen.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut app = App::new(config);
    let view = ScoreView::new();
    let mut fb = FrameBuffer::new(0, 0);
    tracing::debug!(release_events = term.enhanced_keys(), "terminal ready");

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&app.screen(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) == AppControl::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if app.tick(TICK_MS) == AppControl::Quit {
                return Ok(());
            }
        }
    }
}
