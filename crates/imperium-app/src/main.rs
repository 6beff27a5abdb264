use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use imperium_app::demo;
use imperium_app::state::SessionCommand;
use imperium_app::Session;
use imperium_campaign::persistence::{self, SaveData};
use imperium_core::config::GameConfig;
use imperium_core::enums::FactionId;

/// Headless IMPERIUM run: a zoom sweep, a barracks, a seeded skirmish and a
/// campaign.
#[derive(Parser, Debug)]
#[command(name = "imperium")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration overriding the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strategic turns to play
    #[arg(short, long, default_value = "10")]
    turns: u32,

    /// Skirmish seed
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Player faction (rome, carthage, gaul)
    #[arg(short, long, default_value = "rome")]
    player: FactionId,

    /// Units per side in the skirmish
    #[arg(long, default_value = "5")]
    units: usize,

    /// Save the campaign to this directory when done
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: Args) -> imperium_core::Result<()> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let mut session = Session::new(config, args.player)?;

    // Sweep from the map down to the ground.
    session.queue_command(SessionCommand::SetTargetZoom(0.7));
    for _ in 0..300 {
        session.step();
    }
    info!(phase = ?session.game_mode().phase(), zoom = session.camera().zoom(), "descended to the field");

    let garrison = demo::raise_garrison(&mut session, Vec3::new(0.0, -2_000.0, 0.0), 3, 60 * 120);
    info!(garrison = garrison.len(), "barracks manned");

    if let Some(enemy) = demo::pick_enemy(&session) {
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        let (ours, theirs) =
            demo::deploy_skirmish(&mut session, &mut rng, enemy, args.units, Vec3::ZERO);
        let snapshot = demo::fight(&mut session, &ours, &theirs, 60 * 120);
        info!(survivors = ?snapshot.living_units, "skirmish over");
    }

    let snapshot = demo::play_turns(&mut session, args.turns);
    info!(turn = snapshot.turn, status = ?snapshot.status, "campaign paused");

    if let Some(dir) = &args.save_dir {
        let data = SaveData::new("autosave", session.campaign());
        persistence::save_to_file(dir, "autosave", &data)?;
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn main() {
    init_tracing();
    let args = Args::parse();
    if let Err(err) = run(args) {
        error!(error = %err, "imperium failed");
        std::process::exit(1);
    }
}
