mod console;
mod script;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use catalog::{CrisisCatalog, NameTable};
use clap::Parser;
use globe::{DossierBridge, GlobeConfig, GlobeScene, SceneDriver, SceneEvent};
use runtime::{Frame, TimerId, TokioScheduler};
use scene::SharedFeature;
use streaming::{GeoBoundaryLoader, LoaderConfig};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::{ConsoleDossier, ConsoleGlobe};
use crate::script::{Script, Step};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replays a scripted session against the globe scene controller")]
struct Args {
    /// Interaction script (JSON)
    script: PathBuf,

    /// Scene tunables (JSON); missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Crisis records (JSON array)
    #[arg(long)]
    crises: Option<PathBuf>,

    /// Country boundary document, URL or local path
    #[arg(long)]
    countries: Option<String>,

    /// Admin-1 boundary document, URL or local path
    #[arg(long)]
    admin1: Option<String>,

    /// Admin-1 property joining regions to their country
    #[arg(long)]
    join_property: Option<String>,

    /// Frame rate of the presentation loop during waits
    #[arg(long, default_value_t = 60.0, value_parser = parse_fps)]
    fps: f64,
}

type Driver = SceneDriver<ConsoleGlobe, TokioScheduler>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(args))
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let script = Script::from_path(&args.script)?;

    let mut config = match &args.config {
        Some(path) => GlobeConfig::from_path(path)?,
        None => GlobeConfig::default(),
    };
    config.idle_delay_ms = env_var_u64("GLOBE_IDLE_DELAY_MS", config.idle_delay_ms);
    if let Some(width_px) = script.width_px {
        config.initial_width_px = width_px;
    }

    let defaults = LoaderConfig::default();
    let loader_config = LoaderConfig {
        countries_url: args
            .countries
            .unwrap_or_else(|| env_or("GLOBE_COUNTRIES_URL", defaults.countries_url.clone())),
        admin1_url: args
            .admin1
            .unwrap_or_else(|| env_or("GLOBE_ADMIN1_URL", defaults.admin1_url.clone())),
        join_property: args
            .join_property
            .unwrap_or_else(|| env_or("GLOBE_JOIN_PROPERTY", defaults.join_property.clone())),
    };

    let catalog = match &args.crises {
        Some(path) => CrisisCatalog::from_path(path)?,
        None => CrisisCatalog::new(NameTable::with_defaults()),
    };
    info!(records = catalog.len(), "crisis catalog ready");

    let (scheduler, timers) = TokioScheduler::new();
    let globe = ConsoleGlobe::new(config.camera.overview);
    let dossier = DossierBridge::new(catalog, Box::new(ConsoleDossier));
    let mut scene = GlobeScene::new(globe, scheduler, config, dossier);
    scene.on_selection_change(|open| info!(open, "panel state changed"));

    let loader = Arc::new(GeoBoundaryLoader::from_config(&loader_config));
    let driver = SceneDriver::new(scene, loader);
    driver.mount().await;

    let frame_dt = Duration::from_secs_f64(1.0 / args.fps.clamp(1.0, 240.0));
    let mut player = Player {
        driver,
        timers,
        frame: Frame::first(0.0),
        frame_dt,
        loads: Vec::new(),
    };
    for step in script.steps {
        player.play(step).await;
    }
    player.finish().await;
    Ok(())
}

struct Player {
    driver: Driver,
    timers: UnboundedReceiver<TimerId>,
    frame: Frame,
    frame_dt: Duration,
    loads: Vec<JoinHandle<bool>>,
}

impl Player {
    async fn play(&mut self, step: Step) {
        debug!(?step, "step");
        let event = match step {
            Step::Wait { ms } => {
                self.pump(Duration::from_millis(ms)).await;
                return;
            }
            Step::Hover { country: None } => SceneEvent::Hover(None),
            Step::Hover { country: Some(name) } => match self.country(&name) {
                Some(feature) => SceneEvent::Hover(Some(feature)),
                None => return,
            },
            Step::HoverRegion { region } => match self.region(&region) {
                Some(feature) => SceneEvent::Hover(Some(feature)),
                None => return,
            },
            Step::Click { country } => match self.country(&country) {
                Some(feature) => SceneEvent::Click(feature),
                None => return,
            },
            Step::ClickRegion { region } => match self.region(&region) {
                Some(feature) => SceneEvent::Click(feature),
                None => return,
            },
            Step::ClickBackground => SceneEvent::ClickBackground,
            Step::Escape => SceneEvent::Escape,
            Step::Back => SceneEvent::Back,
            Step::Drag => SceneEvent::Drag,
            Step::Resize { width_px } => SceneEvent::Resize { width_px },
        };

        // Region loads run detached so later steps can race them.
        let request = self.driver.scene().borrow_mut().dispatch(event);
        if let Some(request) = request {
            let driver = self.driver.clone();
            self.loads
                .push(tokio::task::spawn_local(async move { driver.complete(request).await }));
        }
    }

    fn country(&self, name: &str) -> Option<SharedFeature> {
        let found = self
            .driver
            .scene()
            .borrow()
            .render_set()
            .find_country(name)
            .cloned();
        if found.is_none() {
            warn!(country = name, "country not in boundary data, step skipped");
        }
        found
    }

    fn region(&self, name: &str) -> Option<SharedFeature> {
        let wanted = name.trim();
        let found = self
            .driver
            .scene()
            .borrow()
            .render_set()
            .regions()
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(wanted))
            .cloned();
        if found.is_none() {
            warn!(region = name, "region not rendered, step skipped");
        }
        found
    }

    /// Runs the frame loop for `duration`, delivering elapsed idle timers.
    async fn pump(&mut self, duration: Duration) {
        let mut ticker = tokio::time::interval(self.frame_dt);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let start = tokio::time::Instant::now();
        let mut last = start;
        while last.duration_since(start) < duration {
            let now = ticker.tick().await;
            self.drain_timers();
            self.frame = self.frame.advance(now.duration_since(last).as_secs_f64());
            last = now;
            self.driver.scene().borrow_mut().tick(&self.frame);
        }
        self.drain_timers();
    }

    fn drain_timers(&mut self) {
        while let Ok(id) = self.timers.try_recv() {
            self.driver
                .scene()
                .borrow_mut()
                .dispatch(SceneEvent::TimerFired(id));
        }
    }

    async fn finish(mut self) {
        for load in self.loads.drain(..) {
            match load.await {
                Ok(applied) => debug!(applied, "region load settled"),
                Err(err) => warn!(%err, "region load task failed"),
            }
        }
        let mut scene = self.driver.scene().borrow_mut();
        let regions = scene.render_set().regions().len();
        info!(
            selected = ?scene.selected().map(|f| f.name().to_string()),
            regions,
            "replay finished"
        );
        scene.dispose();
    }
}

fn parse_fps(value: &str) -> Result<f64, String> {
    let fps: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(format!("fps must be a positive finite number, got {value}"))
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or_else(|_| default)
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
