use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use similar::TextDiff;

use mdcanon::{Config, format, parse};

mod cli;
use cli::{Cli, Commands};

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn load_config(explicit: Option<&Path>, file: &Option<PathBuf>) -> io::Result<Config> {
    let start_dir = start_dir_for(file)?;
    let (cfg, cfg_path) = mdcanon::config::load(explicit, &start_dir)?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }
    Ok(cfg)
}

fn print_diff(file_name: &str, input: &str, formatted: &str) {
    let diff = TextDiff::from_lines(input, formatted);
    print!(
        "{}",
        diff.unified_diff()
            .context_radius(3)
            .header(file_name, &format!("{file_name} (canonical)"))
    );
}

fn main() -> io::Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file } => {
            let cfg = load_config(cli.config.as_deref(), &file)?;
            let input = read_all(file.as_ref())?;
            let tree = parse(&input, Some(cfg));
            println!("{:#?}", tree);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Format { file, check, write } => {
            if write && file.is_none() {
                eprintln!("Error: --write requires an input file");
                return Ok(ExitCode::from(2));
            }

            let cfg = load_config(cli.config.as_deref(), &file)?;
            let input = read_all(file.as_ref())?;
            let output = format(&input, Some(cfg)).map_err(io::Error::other)?;

            if check {
                if input != output {
                    let file_name = file.as_ref().and_then(|p| p.to_str()).unwrap_or("<stdin>");
                    print_diff(file_name, &input, &output);
                    return Ok(ExitCode::FAILURE);
                }
                // Only print success message if there's a file (not stdin)
                if file.is_some() {
                    println!("File is correctly formatted");
                }
            } else if let (true, Some(file_path)) = (write, &file) {
                if input != output {
                    fs::write(file_path, &output)?;
                    println!("Formatted {}", file_path.display());
                }
            } else {
                print!("{output}");
            }

            Ok(ExitCode::SUCCESS)
        }
    }
}
