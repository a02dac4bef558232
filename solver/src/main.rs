//! Solve a single board from the command line.
//!
//! ```sh
//! witless-solver 'pp/pp'
//! witless-solver '..' --wrap --start 0,1 --end 1,0
//! witless-solver 'p.p/.2./p.p' --strategy shortest-path --parallel
//! ```
//!
//! Set `RUST_LOG=debug` to see what the search is doing.

use std::process;
use std::time::Instant;

use clap::Parser;
use witless::{parse_cells, BoardBuilder, Position, SolutionStrategy, Solver};

/// A vertex given on the command line, either a corner or explicit coordinates.
#[derive(Debug, Clone, Copy)]
enum Vertex {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    At(Position),
}

impl Vertex {
    fn resolve(self, (width, height): (usize, usize)) -> Position {
        match self {
            Vertex::TopLeft => Position(0, 0),
            Vertex::TopRight => Position(width - 1, 0),
            Vertex::BottomLeft => Position(0, height - 1),
            Vertex::BottomRight => Position(width - 1, height - 1),
            Vertex::At(position) => position,
        }
    }
}

fn parse_vertex(arg: &str) -> Result<Vertex, String> {
    match arg.to_ascii_lowercase().as_str() {
        "tl" => return Ok(Vertex::TopLeft),
        "tr" => return Ok(Vertex::TopRight),
        "bl" => return Ok(Vertex::BottomLeft),
        "br" => return Ok(Vertex::BottomRight),
        _ => {}
    }

    let (x, y) = arg.split_once(',')
        .ok_or_else(|| format!("expected `x,y` or one of tl, tr, bl, br, got `{arg}`"))?;
    let coordinate = |c: &str| c.trim().parse::<usize>().map_err(|e| format!("bad coordinate `{c}`: {e}"));
    Ok(Vertex::At(Position(coordinate(x)?, coordinate(y)?)))
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Cell rows separated by `/`, e.g. `KW/.2`.
    #[arg(value_name = "CELLS")]
    cells: String,

    /// Start vertex as `x,y` or a corner (tl, tr, bl, br). Repeatable; defaults to bl.
    #[arg(long = "start", value_name = "VERTEX", value_parser = parse_vertex)]
    starts: Vec<Vertex>,

    /// End vertex as `x,y` or a corner (tl, tr, bl, br). Repeatable; defaults to tr.
    #[arg(long = "end", value_name = "VERTEX", value_parser = parse_vertex)]
    ends: Vec<Vertex>,

    /// Join the left and right edges of the board.
    #[arg(long)]
    wrap: bool,

    /// Which solutions to report: all, first or shortest-path.
    #[arg(long, value_name = "STRATEGY", default_value_t = SolutionStrategy::All)]
    strategy: SolutionStrategy,

    /// Search sibling branches on all cores.
    #[arg(long)]
    parallel: bool,

    /// Only print the move string of each solution.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let cells = parse_cells(&args.cells).unwrap_or_else(|e| {
        eprintln!("Could not read the board: {e}");
        process::exit(2);
    });

    let (columns, rows) = (cells.ncols(), cells.nrows());
    let vertex_dims = (if args.wrap { columns } else { columns + 1 }, rows + 1);

    let Some(mut builder) = BoardBuilder::with_cells(cells) else {
        eprintln!("The board has no cells.");
        process::exit(2);
    };
    builder.wrap_horizontal(args.wrap);

    let starts = if args.starts.is_empty() { vec![Vertex::BottomLeft] } else { args.starts };
    let ends = if args.ends.is_empty() { vec![Vertex::TopRight] } else { args.ends };
    for start in starts {
        builder.add_start(start.resolve(vertex_dims));
    }
    for end in ends {
        builder.add_end(end.resolve(vertex_dims));
    }

    let board = builder.build().unwrap_or_else(|reasons| {
        eprintln!("Invalid board:");
        for reason in reasons {
            eprintln!("  {reason}");
        }
        process::exit(2);
    });

    let solver = Solver::new(args.strategy).parallel(args.parallel);
    let started = Instant::now();
    let solutions = solver.solve(&board);
    log::info!("{} solution(s) in {:.2?}", solutions.len(), started.elapsed());

    if solutions.is_empty() {
        eprintln!("No solution.");
        process::exit(1);
    }

    for state in &solutions {
        let Some(path) = state.path() else { continue };
        if args.quiet {
            println!("{path}");
        } else {
            println!("{path} from {}", path.start());
            println!("{state}");
        }
    }
}
