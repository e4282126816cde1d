use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

mod core;
mod formatters;
mod tools;

use crate::core::ArchiveAnalyzer;
use crate::formatters::{ClusterMode, ComponentsFormatter, DotFormatter, JsonFormatter};
use crate::tools::{CxxFiltDemangler, Demangler, IdentityDemangler, NmLister};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "ardeps",
    version = "0.1.0",
    author = "ardeps developers",
    about = "Link-dependency graph and cycle analysis for static library archives"
)]
struct Cli {
    /// Static library archives to analyze
    #[arg(value_name = "ARCHIVE", required = true)]
    archives: Vec<PathBuf>,

    /// Write a DOT graph description to this file
    #[arg(short = 'g', long, value_name = "FILE")]
    graph_output: Option<PathBuf>,

    /// Write the component listing to this file
    #[arg(short = 'c', long, value_name = "FILE")]
    components_output: Option<PathBuf>,

    /// Write a compact JSON document to this file
    #[arg(short = 'j', long, value_name = "FILE")]
    json_output: Option<PathBuf>,

    /// Show unresolved external symbols as graph vertices
    #[arg(long)]
    externals: bool,

    /// Visual clustering mode for the DOT output
    #[arg(long, value_name = "MODE", value_enum, default_value_t = ClusterArg::None)]
    cluster: ClusterArg,

    /// Symbol lister binary
    #[arg(long, value_name = "PATH", default_value = "nm")]
    nm: PathBuf,

    /// Demangler binary used for diagnostic messages
    #[arg(long, value_name = "PATH", default_value = "c++filt")]
    demangler: PathBuf,

    /// Print diagnostics with mangled names as-is
    #[arg(long)]
    no_demangle: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum ClusterArg {
    None,
    Component,
    Archive,
}

impl From<ClusterArg> for ClusterMode {
    fn from(arg: ClusterArg) -> Self {
        match arg {
            ClusterArg::None => ClusterMode::None,
            ClusterArg::Component => ClusterMode::Component,
            ClusterArg::Archive => ClusterMode::Archive,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let start_time = Instant::now();

    let lister = NmLister::new().with_binary(&cli.nm);
    let analyzer = ArchiveAnalyzer::new(Box::new(lister)).with_externals(cli.externals);
    let analysis = analyzer.analyze(&cli.archives)?;

    let demangler: Box<dyn Demangler> = if cli.no_demangle {
        Box::new(IdentityDemangler)
    } else {
        Box::new(CxxFiltDemangler::new().with_binary(&cli.demangler))
    };
    for diagnostic in &analysis.table.diagnostics {
        eprintln!("Warning: {}", diagnostic.message(demangler.as_ref())?);
    }

    if let Some(path) = &cli.graph_output {
        DotFormatter::new()
            .with_cluster(cli.cluster.into())
            .format_to_file(&analysis, path)?;
        eprintln!("Graph description: {}", path.display());
    }

    if let Some(path) = &cli.components_output {
        ComponentsFormatter::new().format_to_file(&analysis, path)?;
        eprintln!("Component listing: {}", path.display());
    }

    if let Some(path) = &cli.json_output {
        JsonFormatter::new().format_to_file(&analysis, path)?;
        eprintln!("JSON output: {}", path.display());
    }

    // Stdout stays reserved for the listing; everything else goes to stderr.
    if cli.graph_output.is_none() && cli.components_output.is_none() && cli.json_output.is_none() {
        print!("{}", ComponentsFormatter::new().format(&analysis));
    }

    eprintln!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
