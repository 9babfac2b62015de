//! Terminal blockfall runner (default binary).
//!
//! Wiring only: configuration, shape catalog, logging, the engine tasks, the input
//! capture thread and the render loop. Game rules live in `blockfall-core`.
//!
//! Environment:
//! - `BLOCKFALL_CONFIG`: JSON config file (missing keys take defaults)
//! - `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT`, `BLOCKFALL_FALL_MS`, `BLOCKFALL_SEED`,
//!   `BLOCKFALL_WALL_KICKS`, `BLOCKFALL_CATALOG`: overrides
//! - `BLOCKFALL_LOG_PATH`: log file (the terminal is in raw mode while playing)

use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::{Context, Result};

use blockfall::core::{
    load_catalog_file, registry_from_templates, GameConfig, MovementManager, ShapeRegistry, Snapshot,
};
use blockfall::engine::{Engine, EngineConfig};
use blockfall::input::{spawn_capture, TerminalKeys};
use blockfall::term::{Canvas, FieldView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    init_logging()?;

    let config = load_config()?;
    let registry = Arc::new(load_registry(&config)?);
    let manager = MovementManager::new(&config, registry).context("cannot start session")?;

    let runtime = tokio::runtime::Runtime::new().context("cannot create tokio runtime")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = runtime.block_on(run(&mut term, manager, EngineConfig::default()));
    // Always try to restore terminal state.
    let _ = term.exit();

    let last = result?;
    println!(
        "score {}  lines {}  level {}  pieces {}",
        last.score, last.lines, last.level, last.pieces
    );
    Ok(())
}

async fn run(
    term: &mut TerminalRenderer,
    manager: MovementManager,
    engine_config: EngineConfig,
) -> Result<Arc<Snapshot>> {
    let engine = Engine::start(manager, engine_config);
    let shutdown = engine.shutdown_handle();

    let quit = shutdown.clone();
    let input = spawn_capture(TerminalKeys, engine.intents(), shutdown.subscribe(), move || {
        quit.trigger()
    })
    .context("cannot spawn input thread")?;

    let view = FieldView::default();
    let mut frames = engine.snapshots();
    let mut canvas = Canvas::new(0, 0);
    let mut last_size = (0, 0);
    let mut ticker = tokio::time::interval(engine_config.render_interval());
    let stopped = shutdown.wait();
    tokio::pin!(stopped);

    let drawn = loop {
        tokio::select! {
            _ = &mut stopped => break Ok(()),
            _ = ticker.tick() => {
                let size = crossterm::terminal::size().unwrap_or((80, 24));
                let changed = frames.has_changed().unwrap_or(false);
                if !changed && size == last_size {
                    continue;
                }
                last_size = size;
                let snap = frames.borrow_and_update().clone();
                for run in engine.gateway().take_scored_runs() {
                    log::debug!("cleared {run} line(s) in a row, score {}", snap.score);
                }
                view.render_into(&snap, Viewport::new(size.0, size.1), &mut canvas);
                if let Err(err) = term.draw(&canvas) {
                    break Err(err);
                }
            }
        }
    };

    let last = engine.gateway().snapshot();
    shutdown.trigger();
    engine.shutdown().await;
    // The capture thread re-checks the shutdown flag at least every poll interval.
    let joined = tokio::task::spawn_blocking(move || input.join()).await;
    if !matches!(joined, Ok(Ok(_))) {
        log::warn!("input thread did not exit cleanly");
    }

    drawn?;
    Ok(last)
}

fn init_logging() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    match std::env::var("BLOCKFALL_LOG_PATH") {
        Ok(path) if !path.trim().is_empty() => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path.trim())
                .with_context(|| format!("cannot open log file {path}"))?;
            env_logger::Builder::from_env(env)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        _ if std::env::var_os("RUST_LOG").is_some() => env_logger::init(),
        _ => {}
    }
    Ok(())
}

fn load_config() -> Result<GameConfig> {
    let config = match std::env::var("BLOCKFALL_CONFIG") {
        Ok(path) if !path.trim().is_empty() => GameConfig::from_json_file(path.trim())?,
        _ => GameConfig::default(),
    }
    .with_env_overrides();
    config.validate()?;
    Ok(config)
}

fn load_registry(config: &GameConfig) -> Result<ShapeRegistry> {
    match &config.catalog_path {
        Some(path) => {
            let templates = load_catalog_file(path)?;
            registry_from_templates(templates).with_context(|| format!("invalid catalog {path}"))
        }
        None => Ok(ShapeRegistry::with_presets()),
    }
}
