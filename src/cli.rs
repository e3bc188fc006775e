use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::f64::consts::FRAC_PI_2;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RendererKind {
    /// Character-grid cross-section repainted in the terminal
    #[default]
    #[clap(alias = "tui")]
    Ascii,
    /// 3-D window (needs the `gui` feature and a display)
    #[clap(alias = "gui")]
    Window,
}

#[derive(Debug, Parser)]
#[command(
    name = "bloch",
    about = "Single-qubit Bloch sphere animations: rotations, measurement flicker, shot sampling",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct BlochCli {
    /// Global: path to config (TOML); default: ~/.bloch/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: more log output on stderr (repeat for trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Animate R_y(θ)|0⟩ as θ sweeps from START to END
    ///
    /// Examples:
    ///   bloch rotate
    ///   bloch rotate --end 3.14159 --frames 90 --renderer window
    Rotate {
        /// Starting angle in radians
        #[arg(long = "start", value_name = "RAD", default_value_t = 0.0, allow_negative_numbers = true)]
        start: f64,

        /// Final angle in radians
        #[arg(long = "end", value_name = "RAD", default_value_t = FRAC_PI_2, allow_negative_numbers = true)]
        end: f64,

        /// Number of frames
        #[arg(long = "frames", value_name = "N", default_value_t = 60)]
        frames: usize,

        #[arg(long = "renderer", value_enum, default_value_t = RendererKind::Ascii)]
        renderer: RendererKind,

        /// Delay between frames (overrides config)
        #[arg(long = "delay-ms", value_name = "MS")]
        delay_ms: Option<u64>,
    },

    /// Simulated Z measurements flicking between |0⟩ and |1⟩, with a running average
    ///
    /// Examples:
    ///   bloch flicker --prob-one 0.5
    ///   bloch flicker --prob-one 0.2 --shots-per-frame 4 --seed 7
    Flicker {
        /// Probability of reading 1
        #[arg(long = "prob-one", value_name = "P", default_value_t = 0.5, allow_negative_numbers = true)]
        prob_one: f64,

        /// Number of frames
        #[arg(long = "frames", value_name = "N", default_value_t = 250)]
        frames: usize,

        /// Measurements per frame; only the last one drives the current arrow
        #[arg(long = "shots-per-frame", value_name = "K", default_value_t = 1)]
        shots_per_frame: u32,

        /// RNG seed (overrides config)
        #[arg(long = "seed", value_name = "SEED")]
        seed: Option<u64>,

        #[arg(long = "renderer", value_enum, default_value_t = RendererKind::Ascii)]
        renderer: RendererKind,

        /// Delay between frames (overrides config)
        #[arg(long = "delay-ms", value_name = "MS")]
        delay_ms: Option<u64>,
    },

    /// Prepare a state, print its Bloch vector and sample measurement counts
    ///
    /// Examples:
    ///   bloch sample --gates h --shots 1024
    ///   bloch sample --alpha 0.6 --beta 0.8i --json
    Sample {
        /// Comma-separated gates applied to |0⟩ (h,x,y,z,s,t,rx:θ,ry:θ,rz:θ)
        #[arg(long = "gates", value_name = "LIST", conflicts_with_all = ["alpha", "beta"])]
        gates: Option<String>,

        /// Amplitude of |0⟩ as a complex number, e.g. 0.6 or 0.5+0.5i
        #[arg(long = "alpha", value_name = "C", requires = "beta", allow_hyphen_values = true)]
        alpha: Option<String>,

        /// Amplitude of |1⟩ as a complex number
        #[arg(long = "beta", value_name = "C", requires = "alpha", allow_hyphen_values = true)]
        beta: Option<String>,

        #[arg(long = "shots", value_name = "N", default_value_t = 1024)]
        shots: u64,

        /// RNG seed (overrides config)
        #[arg(long = "seed", value_name = "SEED")]
        seed: Option<u64>,

        /// Print a JSON report instead of text
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },
}
