use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "phonehenge", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ring geometry and packing diagnostics as JSON.
    Ring(RingArgs),
    /// Drive a whole show at a fixed tick cadence and print each state change as a JSON line.
    Simulate(SimulateArgs),
    /// Render the composited frame at a point in a run as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct RingArgs {
    /// Show config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the slot count.
    #[arg(long)]
    count: Option<usize>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = RoleChoice::Leader)]
    role: RoleChoice,

    #[arg(long, value_enum, default_value_t = ModeChoice::Preview)]
    mode: ModeChoice,

    /// Milliseconds between ticks.
    #[arg(long, default_value_t = 100.0)]
    tick_ms: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds since the run started. Omit to render the start view.
    #[arg(long)]
    at_ms: Option<f64>,

    /// Tap this ring slot halfway to `at_ms` (concert mode themes the background).
    #[arg(long)]
    tap_slot: Option<usize>,

    /// Draw hotspots and the last tap.
    #[arg(long)]
    debug_hotspots: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleChoice {
    Leader,
    Consort,
}

impl From<RoleChoice> for phonehenge::Role {
    fn from(r: RoleChoice) -> Self {
        match r {
            RoleChoice::Leader => Self::Leader,
            RoleChoice::Consort => Self::Consort,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Preview,
    Concert,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Ring(args) => cmd_ring(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<phonehenge::ShowConfig> {
    match path {
        Some(p) => phonehenge::ShowConfig::from_json_path(p)
            .with_context(|| format!("load show config '{}'", p.display())),
        None => Ok(phonehenge::ShowConfig::default()),
    }
}

fn cmd_ring(args: RingArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(count) = args.count {
        cfg.ring.count = count;
    }
    let ring = phonehenge::compute_ring(&cfg.ring_spec()?)?;
    let out = serde_json::json!({
        "count": ring.len(),
        "foot_radius": ring.spec.foot_radius,
        "implied_side": ring.implied_side,
        "gap": ring.gap,
        "overlaps": ring.overlaps(),
        "outer_radius": ring.outer_radius(),
        "slots": ring.slots(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Taps through mode select (leader) and starts the run at `now_ms`.
fn start_show(
    session: &mut phonehenge::ShowSession,
    mode: ModeChoice,
    now_ms: f64,
) -> anyhow::Result<()> {
    session.tick(now_ms)?;
    if session.view() == phonehenge::View::ModeSelect {
        let cfg = session.config();
        let regions = phonehenge::HitRegions::new(cfg.canvas, &cfg.hotspots);
        let pick = match mode {
            ModeChoice::Preview => regions.left,
            ModeChoice::Concert => regions.right,
        };
        session.pointer_up(pick, now_ms)?;
        session.pointer_up(regions.confirm, now_ms)?;
    }
    let clock = session.config().canvas.mid();
    let hit = session.pointer_up(clock, now_ms)?;
    if hit != Some(phonehenge::Hit::ClockCenter) || !session.status().running() {
        anyhow::bail!("show did not start (view {:?})", session.view());
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.tick_ms.is_finite() && args.tick_ms > 0.0) {
        anyhow::bail!("--tick-ms must be > 0");
    }
    let cfg = load_config(args.config.as_deref())?;
    let mut session = phonehenge::ShowSession::new(cfg, args.role.into())?;
    start_show(&mut session, args.mode, 0.0)?;

    let mut last_index = None;
    let mut now = 0.0;
    let mut ticks = 0u64;
    loop {
        let report = session.tick(now)?;
        ticks += 1;
        if last_index != Some(report.index) || report.end_screen {
            let line = serde_json::json!({ "t_ms": now, "report": report });
            println!("{line}");
            last_index = Some(report.index);
        }
        if report.end_screen {
            break;
        }
        now += args.tick_ms;
    }

    let snapshot = session.snapshot(now);
    eprintln!(
        "finished after {ticks} ticks at {now} ms (final state {}, clock {})",
        snapshot.state_number, snapshot.clock
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    cfg.debug_hotspots |= args.debug_hotspots;
    let mut session = phonehenge::ShowSession::new(cfg, phonehenge::Role::Consort)?;

    let now = match args.at_ms {
        Some(at_ms) => {
            start_show(&mut session, ModeChoice::Concert, 0.0)?;
            if let Some(slot) = args.tap_slot {
                let half = at_ms / 2.0;
                session.tick(half)?;
                let p = session
                    .ring()
                    .slots()
                    .get(slot)
                    .with_context(|| format!("ring has no slot {slot}"))?
                    .center();
                session.pointer_up(p, half)?;
            }
            at_ms
        }
        None => 0.0,
    };
    session.tick(now)?;

    let frame = session.frame();
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
