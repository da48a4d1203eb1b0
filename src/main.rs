//! Robot Platformer entry point
//!
//! Headless driver: runs the simulation core at a fixed timestep with a
//! scripted player and prints the final render snapshot as JSON.
//!
//! Usage: `robot-platformer [--settings FILE] [--levels FILE] [--frames N]`

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result, bail};

#[cfg(not(target_arch = "wasm32"))]
use robot_platformer::consts::{FPS, MAX_SUBSTEPS, SIM_DT};
#[cfg(not(target_arch = "wasm32"))]
use robot_platformer::levels::{self, LevelDef};
#[cfg(not(target_arch = "wasm32"))]
use robot_platformer::settings::Settings;
#[cfg(not(target_arch = "wasm32"))]
use robot_platformer::sim::{GameEvent, GamePhase, InputEvent, Key, Session, tick};

#[cfg(not(target_arch = "wasm32"))]
struct Options {
    settings: Option<String>,
    levels: Option<String>,
    frames: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl Options {
    fn parse() -> Result<Self> {
        let mut opts = Self {
            settings: None,
            levels: None,
            frames: FPS * 30,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            let mut value = || args.next().with_context(|| format!("{arg} needs a value"));
            match arg.as_str() {
                "--settings" => opts.settings = Some(value()?),
                "--levels" => opts.levels = Some(value()?),
                "--frames" => {
                    opts.frames = value()?.parse().context("--frames must be a number")?;
                }
                other => bail!("unknown argument: {other}"),
            }
        }
        Ok(opts)
    }
}

/// Session plus the frame-to-tick bookkeeping
#[cfg(not(target_arch = "wasm32"))]
struct Game {
    session: Session,
    accumulator: f32,
    /// Events waiting for the next tick
    pending: Vec<InputEvent>,
    ticks: u64,
}

#[cfg(not(target_arch = "wasm32"))]
impl Game {
    fn new(session: Session) -> Self {
        Self {
            session,
            accumulator: 0.0,
            pending: Vec::new(),
            ticks: 0,
        }
    }

    /// Run as many fixed ticks as the elapsed frame time covers
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // Queued input is delivered once, on the first substep
            let input = std::mem::take(&mut self.pending);
            for event in tick(&mut self.session, &input) {
                log_event(&event);
            }
            self.accumulator -= SIM_DT;
            self.ticks += 1;
            substeps += 1;
        }
    }

    /// Scripted player: start, run right, hop every second, restart after game over
    fn script(&mut self, frame: u32) {
        match self.session.phase {
            GamePhase::MainMenu | GamePhase::GameOver => {
                if frame % FPS == 0 {
                    self.pending.push(InputEvent::KeyDown(Key::Confirm));
                }
            }
            GamePhase::Playing => {
                if !self.session.player.moving_right {
                    self.pending.push(InputEvent::KeyDown(Key::Right));
                }
                if frame % FPS == FPS / 2 {
                    self.pending.push(InputEvent::KeyDown(Key::Jump));
                }
            }
            GamePhase::LevelAdvance => {}
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Jumped => log::trace!("{event:?}"),
        GameEvent::EnemyStomped { .. } | GameEvent::CoinCollected { .. } => {
            log::debug!("{event:?}")
        }
        _ => log::info!("{event:?}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_levels(path: Option<&str>) -> Result<Vec<LevelDef>> {
    let Some(path) = path else {
        return Ok(levels::default_levels());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read level table {path}"))?;
    levels::from_json(&json).with_context(|| format!("invalid level table {path}"))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    env_logger::init();
    log::info!("Robot Platformer (headless) starting...");

    let opts = Options::parse()?;
    let settings = match &opts.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let levels = load_levels(opts.levels.as_deref())?;
    let session = Session::new(settings, levels).context("failed to build session")?;
    log::info!("Loaded {} levels", session.level_count());

    let mut game = Game::new(session);
    let frame_dt = 1.0 / FPS as f32;
    for frame in 0..opts.frames {
        game.script(frame);
        game.update(frame_dt);
        if game.session.quit_requested {
            break;
        }
    }

    log::info!(
        "Stopped after {} ticks: {:?}, score {}, lives {}",
        game.ticks,
        game.session.phase,
        game.session.stats.score,
        game.session.stats.lives
    );
    let snapshot = serde_json::to_string_pretty(&game.session.snapshot())?;
    println!("{snapshot}");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a host page; there is no standalone entry point
}
