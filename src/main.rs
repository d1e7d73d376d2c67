use clap::Parser;
use pseudoc::config::Config;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "pseudoc",
    about = "Pseudoc — normalize a C-like function into compact depth-marked pseudocode"
)]
struct Cli {
    /// Source fragment; its last line names the function(s) to extract
    #[arg(default_value = "file.txt")]
    input: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Config file path (default: pseudoc.config.json if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leading spaces per indentation step (0 disables collapsing)
    #[arg(long)]
    indent_width: Option<usize>,

    /// Do not echo the result to stdout
    #[arg(short, long)]
    quiet: bool,
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pseudoc=warn".parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let loaded = match cli.config {
        Some(ref path) => Config::load(path),
        None => Config::discover(),
    };
    let mut config = loaded.unwrap_or_else(|e| die(&e.to_string()));

    // CLI overrides
    if let Some(width) = cli.indent_width {
        config.indent_width = width;
    }

    let lines =
        pseudoc::run(&cli.input, &cli.output, &config).unwrap_or_else(|e| die(&e.to_string()));

    if !cli.quiet {
        for line in &lines {
            println!("{}", line);
        }
    }
}
