//! Command implementations and argument parsing for the nullnet CLI.

use std::io::{self, Write};
use std::ops::Range;

use clap::{Args, Parser, Subcommand, ValueEnum};
use nullnet_core::{
    Adjacency, Connectivity, EdgeSelection, GenerateError, LatticeError, LatticeParams,
    Latticizer, RewireStats, RingDistance, assortativity_directed, classify,
    number_of_links_directed, random_directed_weighted,
};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};

const DEFAULT_NODES: usize = 30;
const DEFAULT_EDGES: usize = 120;
const DEFAULT_MIN_WEIGHT: f64 = 0.5;
const DEFAULT_MAX_WEIGHT: f64 = 1.5;
const DEFAULT_ITERATIONS: usize = 10;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_GENERATION_ATTEMPTS: usize = 32;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "nullnet",
    about = "Generate random directed networks and rewire them into lattice null models."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a connected random digraph and latticize it.
    Latticize(LatticizeCommand),
}

/// Options accepted by the `latticize` command.
#[derive(Debug, Args, Clone)]
pub struct LatticizeCommand {
    /// Number of nodes in the generated graph.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Number of directed edges in the generated graph.
    #[arg(long, default_value_t = DEFAULT_EDGES)]
    pub edges: usize,

    /// Inclusive lower bound of the edge weights.
    #[arg(long, default_value_t = DEFAULT_MIN_WEIGHT)]
    pub min_weight: f64,

    /// Exclusive upper bound of the edge weights.
    #[arg(long, default_value_t = DEFAULT_MAX_WEIGHT)]
    pub max_weight: f64,

    /// Rewiring passes over the eligible edge list.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Seed shared by graph generation and rewiring.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Which edges are eligible for swapping.
    #[arg(long, value_enum, default_value_t = SelectionArg::Lower)]
    pub selection: SelectionArg,

    /// Abort after this many consecutive rejected candidates.
    #[arg(long)]
    pub max_consecutive_rejections: Option<usize>,

    /// Number of graphs to draw before giving up on a connected one.
    #[arg(long, default_value_t = DEFAULT_GENERATION_ATTEMPTS)]
    pub max_generation_attempts: usize,
}

impl LatticizeCommand {
    fn weight_range(&self) -> Range<f64> {
        self.min_weight..self.max_weight
    }

    fn lattice_params(&self) -> Result<LatticeParams, CliError> {
        let params = LatticeParams::new(self.iterations).with_edge_selection(self.selection.into());
        match self.max_consecutive_rejections {
            Some(cap) => Ok(params.with_max_consecutive_rejections(cap)?),
            None => Ok(params),
        }
    }
}

/// Command-line spelling of [`EdgeSelection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelectionArg {
    /// Edges strictly below the diagonal.
    Lower,
    /// Every edge.
    All,
}

impl From<SelectionArg> for EdgeSelection {
    fn from(value: SelectionArg) -> Self {
        match value {
            SelectionArg::Lower => Self::LowerTriangle,
            SelectionArg::All => Self::All,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Random graph generation rejected the request.
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// Rewiring failed.
    #[error(transparent)]
    Core(#[from] LatticeError),
    /// Every generated graph had more than one component.
    #[error("no connected graph found in {attempts} generation attempts")]
    NoConnectedGraph {
        /// Number of graphs drawn.
        attempts: usize,
    },
}

impl CliError {
    /// Returns the stable code of the underlying library error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Generate(err) => Some(err.code().as_str()),
            Self::Core(err) => Some(err.code().as_str()),
            Self::NoConnectedGraph { .. } => None,
        }
    }
}

/// Before/after report for one latticize run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Number of nodes.
    pub nodes: usize,
    /// Number of directed links, equal before and after rewiring.
    pub links: usize,
    /// Seed used for generation and rewiring.
    pub seed: u64,
    /// Graphs drawn until a connected one appeared.
    pub generation_attempts: usize,
    /// Connectivity of the generated graph.
    pub connectivity: Connectivity,
    /// Rewiring counters.
    pub stats: RewireStats,
    /// Ring cost of the generated graph.
    pub cost_before: usize,
    /// Ring cost of the latticized graph.
    pub cost_after: usize,
    /// Directed assortativity of the generated graph, when defined.
    pub assortativity_before: Option<f64>,
    /// Directed assortativity of the latticized graph, when defined.
    pub assortativity_after: Option<f64>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when generation or rewiring fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use nullnet_cli::cli::{Cli, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli::try_parse_from(["nullnet", "latticize", "--nodes", "12", "--edges", "48"])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.links, 48);
/// assert!(summary.cost_after <= summary.cost_before);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Latticize(command) => {
            Span::current().record("command", field::display("latticize"));
            run_latticize(&command)
        }
    }
}

#[instrument(
    name = "cli.latticize",
    err,
    skip(command),
    fields(
        nodes = command.nodes,
        edges = command.edges,
        iterations = command.iterations,
        seed = command.seed,
    ),
)]
pub(super) fn run_latticize(command: &LatticizeCommand) -> Result<ExecutionSummary, CliError> {
    let params = command.lattice_params()?;
    let mut rng = SmallRng::seed_from_u64(command.seed);
    let (graph, generation_attempts) = generate_connected(command, &mut rng)?;

    let result = Latticizer::new(params).run_with_rng(&graph, &mut rng)?;
    let ring = RingDistance::new(graph.node_count());
    let summary = ExecutionSummary {
        nodes: graph.node_count(),
        links: number_of_links_directed(&graph),
        seed: command.seed,
        generation_attempts,
        connectivity: result.input_connectivity(),
        stats: result.stats(),
        cost_before: ring.cost(&graph).unwrap_or_default(),
        cost_after: ring.cost(result.matrix()).unwrap_or_default(),
        assortativity_before: assortativity_directed(&graph).ok(),
        assortativity_after: assortativity_directed(result.matrix()).ok(),
    };

    info!(
        cost_before = summary.cost_before,
        cost_after = summary.cost_after,
        accepted = summary.stats.accepted,
        "command completed"
    );
    Ok(summary)
}

/// Draws graphs until one is weakly connected, returning it with the number
/// of draws it took.
fn generate_connected(
    command: &LatticizeCommand,
    rng: &mut SmallRng,
) -> Result<(Adjacency, usize), CliError> {
    for attempt in 1..=command.max_generation_attempts {
        let graph = random_directed_weighted(command.nodes, command.edges, command.weight_range(), rng)?;
        let connectivity = classify(&graph);
        if connectivity.is_connected() {
            return Ok((graph, attempt));
        }
        debug!(attempt, ?connectivity, "generated graph is disconnected; retrying");
    }
    Err(CliError::NoConnectedGraph {
        attempts: command.max_generation_attempts,
    })
}

/// Renders `summary` to `writer` as `key: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "links: {}", summary.links)?;
    writeln!(writer, "seed: {}", summary.seed)?;
    writeln!(writer, "generation attempts: {}", summary.generation_attempts)?;
    writeln!(writer, "connectivity: {:?}", summary.connectivity)?;
    writeln!(
        writer,
        "swaps: {} accepted / {} attempted",
        summary.stats.accepted, summary.stats.attempts
    )?;
    writeln!(
        writer,
        "rejected: overlap={} duplicate={} cost={} connectivity={}",
        summary.stats.rejected_overlap,
        summary.stats.rejected_duplicate,
        summary.stats.rejected_lattice,
        summary.stats.rejected_connectivity
    )?;
    writeln!(
        writer,
        "ring cost: {} -> {}",
        summary.cost_before, summary.cost_after
    )?;
    writeln!(
        writer,
        "assortativity: {} -> {}",
        format_metric(summary.assortativity_before),
        format_metric(summary.assortativity_after)
    )?;
    Ok(())
}

fn format_metric(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_owned(), |v| format!("{v:.4}"))
}
