use logline::graph::{CommitGraph, Edge, notation};
use logline::{CompactOptions, ForkDecision, IndexOrder, compact_with, validate};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Notation(notation::ParseError),
    Compact(logline::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Notation(err) => write!(f, "Invalid graph notation: {err}"),
            CliError::Compact(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<notation::ParseError> for CliError {
    fn from(value: notation::ParseError) -> Self {
        Self::Notation(value)
    }
}

impl From<logline::Error> for CliError {
    fn from(value: logline::Error) -> Self {
        Self::Compact(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Compact,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    version: bool,
    input: Option<String>,
    json: bool,
    pretty: bool,
    report: bool,
    options: CompactOptions,
}

#[derive(Serialize)]
struct GraphOut<'a> {
    node_count: usize,
    edges: Vec<Edge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decisions: Option<&'a [ForkDecision]>,
}

fn usage() -> &'static str {
    "logline-cli\n\
\n\
USAGE:\n\
  logline-cli [compact] [--json] [--pretty] [--report] [--keep-redundant] [--no-collapse] [--max-bubble <n>] [<path>|-]\n\
  logline-cli check [<path>|-]\n\
  logline-cli --version\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input uses the graph notation `0(4, 1) 1(2) 2(3.dot) ...`; nodes are laid out in index order.\n\
  - compact prints the compacted graph in the same notation; --json prints edges as JSON.\n\
  - --report adds the per-fork decisions (to stderr in notation mode).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--version" | "-V" => args.version = true,
            "compact" => args.command = Command::Compact,
            "check" => args.command = Command::Check,
            "--json" => args.json = true,
            "--pretty" => args.pretty = true,
            "--report" => args.report = true,
            "--keep-redundant" => args.options.drop_redundant_edges = false,
            "--no-collapse" => args.options.collapse_bubbles = false,
            "--max-bubble" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.options.max_bubble_len =
                    n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn graph_out<'a>(g: &CommitGraph, decisions: Option<&'a [ForkDecision]>) -> GraphOut<'a> {
    GraphOut {
        node_count: g.node_count(),
        edges: g.edges().collect(),
        decisions,
    }
}

fn run(args: Args) -> Result<(), CliError> {
    if args.version {
        println!("logline-cli {}", logline::VERSION);
        return Ok(());
    }

    let text = read_input(args.input.as_deref())?;
    let g = notation::parse(&text)?;

    match args.command {
        Command::Check => {
            validate::check(&g, &IndexOrder)?;
            println!(
                "ok: {} nodes, {} edges",
                g.node_count(),
                g.edge_count()
            );
        }
        Command::Compact => {
            let out = compact_with(&g, &IndexOrder, &args.options)?;
            if args.json {
                let decisions = args.report.then_some(out.decisions.as_slice());
                write_json(&graph_out(&out.graph, decisions), args.pretty)?;
            } else {
                println!("{}", notation::format(&out.graph));
                if args.report {
                    for d in &out.decisions {
                        eprintln!("{}", serde_json::to_string(d)?);
                    }
                }
            }
        }
    }
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
