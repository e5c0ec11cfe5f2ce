use anyhow::{Context, Result};
use clap::Parser;
use fig2icon::{IconSnippet, OptimizeOptions};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

/// Name used when reading from stdin without `--name`
const DEFAULT_NAME: &str = "Icon";

#[derive(Parser)]
#[command(name = "fig2icon")]
#[command(version, about = "Convert exported SVG icons to MUI createSvgIcon modules")]
#[command(long_about = "Convert exported SVG icons to MUI createSvgIcon modules\n\n\
    The SVG is optimized, its root is dropped and the remaining shapes are\n\
    written as JSX path literals.\n\n\
    Usage:\n  \
    fig2icon icon.svg [-n Name] [-o Icon.tsx] [-v]\n  \
    cat icon.svg | fig2icon -n Name --paths-only\n  \
    fig2icon icon.svg --json [--compact]")]
struct Cli {
    /// Input SVG file path (default: stdin)
    input: Option<PathBuf>,

    /// Icon display name (default: input file stem)
    #[arg(short, long)]
    name: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print only the JSX paths instead of the whole module
    #[arg(long, conflicts_with = "json")]
    paths_only: bool,

    /// Print the icon as JSON (name, paths, multipleChildren)
    #[arg(long)]
    json: bool,

    /// Compact JSON output (default is pretty-printed with indentation)
    #[arg(long, requires = "json")]
    compact: bool,

    /// Fractional digits kept in path data and numeric attributes
    #[arg(long, default_value_t = 4)]
    precision: u8,

    /// Run the optimizer pipeline once instead of until the output is stable
    #[arg(long)]
    single_pass: bool,

    /// Verbose output for debugging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        })
        .init();

    let svg = read_input(cli.input.as_deref())?;
    debug!(bytes = svg.len(), "read input");

    let name = cli
        .name
        .clone()
        .or_else(|| cli.input.as_deref().and_then(file_stem))
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let options = OptimizeOptions {
        float_precision: cli.precision,
        multipass: !cli.single_pass,
        ..OptimizeOptions::default()
    };

    let snippet = fig2icon::convert_with_options(&svg, &name, &options)
        .with_context(|| format!("Failed to convert icon \"{name}\""))?;
    info!(name = %snippet.name, multiple_children = snippet.multiple_children, "converted");

    let output = render(&snippet, &cli)?;
    match cli.output.as_ref() {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            print!("{output}");
        }
    }

    Ok(())
}

/// Read the SVG from a file, or from stdin when no path is given
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fig2icon::read_svg(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut svg = String::new();
            io::stdin()
                .read_to_string(&mut svg)
                .context("Failed to read SVG from stdin")?;
            Ok(svg)
        }
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Format the snippet as requested on the command line, newline-terminated
fn render(snippet: &IconSnippet, cli: &Cli) -> Result<String> {
    if cli.json {
        let json = if cli.compact {
            serde_json::to_string(snippet)?
        } else {
            serde_json::to_string_pretty(snippet)?
        };
        Ok(json + "\n")
    } else if cli.paths_only {
        Ok(format!("{}\n", snippet.paths))
    } else {
        Ok(snippet.to_module())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet() -> IconSnippet {
        IconSnippet {
            name: "Dot".to_string(),
            paths: r#"<path d="M0 0" />"#.to_string(),
            multiple_children: false,
        }
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["fig2icon", "home.svg"]);
        assert_eq!(cli.input, Some(PathBuf::from("home.svg")));
        assert_eq!(cli.precision, 4);
        assert!(!cli.single_pass && !cli.json && !cli.paths_only);
    }

    #[test]
    fn test_compact_requires_json() {
        assert!(Cli::try_parse_from(["fig2icon", "--compact"]).is_err());
        assert!(Cli::try_parse_from(["fig2icon", "--json", "--compact"]).is_ok());
    }

    #[test]
    fn test_file_stem_names_the_icon() {
        assert_eq!(file_stem(Path::new("icons/ArrowBack.svg")), Some("ArrowBack".to_string()));
    }

    #[test]
    fn test_render_modes() {
        let paths_only = Cli::parse_from(["fig2icon", "--paths-only"]);
        assert_eq!(render(&snippet(), &paths_only).unwrap(), "<path d=\"M0 0\" />\n");

        let json = Cli::parse_from(["fig2icon", "--json", "--compact"]);
        assert_eq!(
            render(&snippet(), &json).unwrap(),
            "{\"name\":\"Dot\",\"paths\":\"<path d=\\\"M0 0\\\" />\",\"multipleChildren\":false}\n"
        );

        let module = Cli::parse_from(["fig2icon"]);
        assert_eq!(render(&snippet(), &module).unwrap(), snippet().to_module());
    }
}
