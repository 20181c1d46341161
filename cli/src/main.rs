//! Generate (or load) an obstacle map, search it with A*, and print the
//! result as a grid overlay and a line of arrows.
//!
//! Run: cargo run -- --seed 42
//!      cargo run -- --map level.txt --start 0,0 --goal 9,4
//!
//! Set `RUST_LOG=debug` to see search statistics.

use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::style::{StyledContent, Stylize};
use gridpath_core::Point;
use gridpath_map::{GenConfig, Grid, SearchConfig, SearchOutcome, generate, search};
use gridpath_ui::{GridStyle, render_directions, render_grid_with};

#[derive(Parser, Debug)]
#[command(
    name = "gridpath",
    about = "Find the shortest 4-directional path across an obstacle grid",
    version
)]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = 20)]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = 10)]
    height: i32,

    /// Probability in [0, 1] that a cell is an obstacle
    #[arg(long, short = 'p', default_value_t = 0.2)]
    obstacles: f64,

    /// Seed for reproducible maps
    #[arg(long, short = 's')]
    seed: Option<u64>,

    /// Start cell as X,Y (random when generating and omitted)
    #[arg(long, value_parser = parse_point)]
    start: Option<Point>,

    /// Goal cell as X,Y (random when generating and omitted)
    #[arg(long, value_parser = parse_point)]
    goal: Option<Point>,

    /// Load the map from a text file ('.' free, '#' obstacle) instead of
    /// generating one
    #[arg(long, short = 'm', requires_all = ["start", "goal"])]
    map: Option<PathBuf>,

    /// Give up after closing this many cells
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Colour the grid output
    #[arg(long)]
    color: bool,
}

impl Cli {
    fn gen_config(&self) -> GenConfig {
        GenConfig {
            width: self.width,
            height: self.height,
            obstacle_probability: self.obstacles,
            start: self.start,
            goal: self.goal,
            seed: self.seed,
        }
    }

    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_expansions: self.max_expansions,
        }
    }
}

/// Parse `X,Y`, optionally wrapped in parentheses.
fn parse_point(s: &str) -> Result<Point, String> {
    let inner = s
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');
    let (x, y) = inner
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad column in {s:?}: {e}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad row in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn load_map(path: &Path, start: Point, goal: Point) -> Result<Grid, Box<dyn Error>> {
    let grid: Grid = std::fs::read_to_string(path)?.parse()?;
    grid.check(start)?;
    grid.check(goal)?;
    log::info!(
        "loaded {}x{} map from {}",
        grid.width(),
        grid.height(),
        path.display()
    );
    Ok(grid)
}

/// Colour the glyphs of a rendered grid.
fn paint(text: &str, style: &GridStyle) -> String {
    let mut out = String::with_capacity(text.len() * 4);
    for ch in text.chars() {
        let styled: Option<StyledContent<char>> = if ch == style.start || ch == style.goal {
            Some(ch.green().bold())
        } else if ch == style.blocked {
            Some(ch.dark_grey())
        } else if ch == style.path {
            Some(ch.cyan().bold())
        } else {
            None
        };
        match styled {
            Some(s) => out.push_str(&s.to_string()),
            None => out.push(ch),
        }
    }
    out
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let (grid, start, goal) = match (&cli.map, cli.start, cli.goal) {
        (Some(path), Some(start), Some(goal)) => (load_map(path, start, goal)?, start, goal),
        _ => {
            let generated = generate(&cli.gen_config())?;
            (generated.grid, generated.start, generated.goal)
        }
    };

    let style = GridStyle::default();
    let show = |path: Option<&[Point]>| {
        let text = render_grid_with(&style, &grid, start, goal, path);
        if cli.color { paint(&text, &style) } else { text }
    };

    writeln!(out, "{}", show(None))?;
    writeln!(out)?;
    writeln!(out, "Start: {start}, Goal: {goal}")?;

    match search(&grid, start, goal, &cli.search_config())? {
        SearchOutcome::Found(path) => {
            writeln!(out, "{}", show(Some(path.as_slice())))?;
            writeln!(out)?;
            writeln!(out, "Path: {}", render_directions(&path)?)?;
        }
        SearchOutcome::Unreachable => writeln!(out, "No path found")?,
        SearchOutcome::BudgetExhausted { expanded } => {
            writeln!(out, "No path found within {expanded} expansions")?
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli, &mut io::stdout().lock()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert_eq!(parse_point(" (3, 4) "), Ok(Point::new(3, 4)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,4").is_err());
    }

    #[test]
    fn map_requires_endpoints() {
        assert!(Cli::try_parse_from(["gridpath", "--map", "level.txt"]).is_err());
        let cli = Cli::try_parse_from([
            "gridpath", "--map", "level.txt", "--start", "0,0", "--goal", "2,1",
        ])
        .unwrap();
        assert_eq!(cli.goal, Some(Point::new(2, 1)));
    }

    #[test]
    fn defaults_match_gen_config() {
        let cli = Cli::try_parse_from(["gridpath"]).unwrap();
        assert_eq!(cli.gen_config(), GenConfig::default());
        assert_eq!(cli.search_config(), SearchConfig::default());
    }

    fn output(args: &[&str]) -> String {
        let argv = std::iter::once("gridpath").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut buf = Vec::new();
        run(&cli, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn prints_overlay_and_arrows_when_found() {
        let out = output(&[
            "--width", "3", "--height", "1", "-p", "0", "--seed", "7", "--start", "0,0", "--goal",
            "2,0",
        ]);
        assert_eq!(
            out,
            "S . G\n\nStart: (0, 0), Goal: (2, 0)\nS P G\n\nPath: ⇨ ⇨\n"
        );
    }

    #[test]
    fn prints_no_path_when_walled_off() {
        let out = output(&[
            "--width", "3", "--height", "1", "-p", "1", "--seed", "7", "--start", "0,0", "--goal",
            "2,0",
        ]);
        assert_eq!(out, "S █ G\n\nStart: (0, 0), Goal: (2, 0)\nNo path found\n");
    }

    #[test]
    fn prints_expansion_count_when_budget_runs_out() {
        let out = output(&[
            "--width",
            "5",
            "--height",
            "1",
            "-p",
            "0",
            "--start",
            "0,0",
            "--goal",
            "4,0",
            "--max-expansions",
            "1",
        ]);
        assert_eq!(
            out,
            "S . . . G\n\nStart: (0, 0), Goal: (4, 0)\nNo path found within 1 expansions\n"
        );
    }

    #[test]
    fn missing_map_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "gridpath",
            "--map",
            "/nonexistent/gridpath/level.txt",
            "--start",
            "0,0",
            "--goal",
            "1,0",
        ])
        .unwrap();
        let mut buf = Vec::new();
        assert!(run(&cli, &mut buf).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn paint_leaves_free_cells_alone() {
        let style = GridStyle::default();
        assert_eq!(paint(". .", &style), ". .");
        assert!(paint("S", &style).contains('S'));
    }
}
