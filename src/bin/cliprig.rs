use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cliprig", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a clip's interpolated transform at one or more times (JSON lines).
    Sample(SampleArgs),
    /// Set a transform property the way the inspector does and save the timeline.
    Set(SetArgs),
    /// Print a tone curve's baked lookup table or its SVG path.
    Curve(CurveArgs),
    /// Print the wheel position of a lift/gamma/gain triple.
    Wheel(WheelArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Clip id.
    #[arg(long)]
    clip: String,

    /// Playback times in seconds.
    #[arg(long, num_args = 1.., required = true, allow_negative_numbers = true)]
    at: Vec<f64>,
}

#[derive(Parser, Debug)]
struct SetArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Clip id.
    #[arg(long)]
    clip: String,

    /// Transform property (x, y, scale, rotation, opacity).
    #[arg(long)]
    param: cliprig::TransformKey,

    /// New value.
    #[arg(long, allow_negative_numbers = true)]
    value: f64,

    /// Playback time in seconds.
    #[arg(long, allow_negative_numbers = true)]
    at: f64,

    /// Output timeline JSON (defaults to stdout).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Editor settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CurveArgs {
    /// Five control point values on the 0..100 scale.
    #[arg(long, value_delimiter = ',', required = true)]
    points: Vec<f64>,

    /// Print the render-space SVG path instead of the lookup table.
    #[arg(long)]
    svg: bool,

    /// Plot height for `--svg`.
    #[arg(long, default_value_t = 256.0)]
    height: f64,

    /// Catmull-Rom tension.
    #[arg(long, default_value_t = cliprig::CURVE_TENSION)]
    tension: f64,
}

#[derive(Parser, Debug)]
struct WheelArgs {
    /// Channel triple `r,g,b`.
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    rgb: Vec<f64>,

    /// How the triple is interpreted.
    #[arg(long, value_enum, default_value_t = ModeChoice::Offset)]
    mode: ModeChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Offset,
    Multiplier,
}

impl From<ModeChoice> for cliprig::WheelMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Offset => cliprig::WheelMode::Offset,
            ModeChoice::Multiplier => cliprig::WheelMode::Multiplier,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Set(args) => cmd_set(args),
        Command::Curve(args) => cmd_curve(args),
        Command::Wheel(args) => cmd_wheel(args),
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let timeline = cliprig::Timeline::from_path(&args.in_path)
        .with_context(|| format!("load timeline '{}'", args.in_path.display()))?;
    let clip = timeline
        .clip(&args.clip)
        .with_context(|| format!("no clip '{}' in timeline", args.clip))?;

    for t in args.at {
        let line = serde_json::json!({
            "clip": clip.id,
            "time": t,
            "transform": cliprig::interpolate(clip, t),
        });
        println!("{line}");
    }
    Ok(())
}

fn cmd_set(args: SetArgs) -> anyhow::Result<()> {
    let settings = match &args.settings {
        Some(path) => cliprig::EditorSettings::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => cliprig::EditorSettings::default(),
    };
    let gateway = cliprig::MutationGateway::new(settings);

    let mut timeline = cliprig::Timeline::from_path(&args.in_path)
        .with_context(|| format!("load timeline '{}'", args.in_path.display()))?;
    let clip = timeline
        .clip_mut(&args.clip)
        .with_context(|| format!("no clip '{}' in timeline", args.clip))?;

    let outcome = gateway.set_parameter(Some(clip), args.param, args.value, args.at);
    if outcome == cliprig::EditOutcome::Ignored {
        anyhow::bail!("edit ignored: value and time must be finite");
    }
    eprintln!("{}: {outcome:?}", args.clip);

    match &args.out {
        Some(out) => timeline
            .write_path(out)
            .with_context(|| format!("write timeline '{}'", out.display()))?,
        None => println!("{}", timeline.to_json()?),
    }
    Ok(())
}

fn cmd_curve(args: CurveArgs) -> anyhow::Result<()> {
    let points: [f64; cliprig::CURVE_POINTS] = args
        .points
        .as_slice()
        .try_into()
        .context("expected exactly 5 curve points")?;
    let settings = cliprig::EditorSettings {
        curve_tension: args.tension,
        ..Default::default()
    };
    settings.validate()?;

    let spline = cliprig::CurveSpline::new(&cliprig::ToneCurve(points), settings.curve_tension);
    if args.svg {
        println!("{}", spline.to_render_path(args.height).to_svg());
    } else {
        let lut = spline.bake_lut();
        println!("{}", serde_json::to_string(&lut.as_slice())?);
    }
    Ok(())
}

fn cmd_wheel(args: WheelArgs) -> anyhow::Result<()> {
    let [r, g, b]: [f64; 3] = args
        .rgb
        .as_slice()
        .try_into()
        .context("expected exactly 3 channel values")?;
    let mode = cliprig::WheelMode::from(args.mode);
    let triple = cliprig::ColorTriple::new(r, g, b);

    let polar = cliprig::rgb_to_polar(triple, mode);
    let back = cliprig::polar_to_rgb(polar, mode);
    let line = serde_json::json!({
        "polar": polar,
        "normalizedAngle": polar.normalized_angle(),
        "roundTrip": back,
    });
    println!("{line}");
    Ok(())
}
