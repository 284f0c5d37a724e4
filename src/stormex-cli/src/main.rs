//! stormex - list and extract files from game-asset archive storage

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use stormex::{
    parent_directories, DirectoryBackend, Error, ExtractOptions, Extractor, PlanConfig, Scanner,
    SearchCriteria,
};

mod cli;
mod console;

use cli::Args;
use console::ConsoleReport;

fn main() {
    let args = Args::parse();

    if let Err(error) = run(&args) {
        eprintln!("{}", error);
        let code = match error.downcast_ref::<Error>() {
            Some(Error::ArchiveOpen { .. }) => -2,
            Some(Error::NoMatches) => -3,
            _ => -1,
        };
        std::process::exit(code);
    }
}

fn run(args: &Args) -> Result<()> {
    // Container libraries reject storage paths with trailing separators.
    let input = trim_trailing_separators(&args.input);
    let backend = DirectoryBackend::open(&input).map_err(|source| Error::ArchiveOpen {
        name: input.display().to_string(),
        source,
    })?;

    let criteria = SearchCriteria {
        path_substring: args.search.clone(),
        name_pattern: args.filename.clone(),
        extension: args.filetype.clone(),
    };

    let mut report = ConsoleReport::new(args.verbose, args.quiet);

    if !args.quiet {
        println!("Searching for files:");
        if args.verbose {
            for line in criteria_description(args) {
                println!("{}", line);
            }
        }
    }

    let matches = Scanner::new(criteria).scan(&backend, &mut report)?;

    if args.json {
        let paths: Vec<&str> = matches.iter().map(|m| m.full_path.as_str()).collect();
        println!("{}", serde_json::to_string(&paths)?);
    } else if args.directories {
        for dir in parent_directories(&matches) {
            println!("{}", dir);
        }
    } else if !args.quiet {
        println!("  {} files found.", matches.len());
    }

    if matches.is_empty() {
        return Err(Error::NoMatches.into());
    }

    if args.extract {
        let plan = PlanConfig::new(args.out.to_string_lossy().into_owned())
            .preserve_hierarchy(args.full_path)
            .lowercase(args.lowercase);
        let options = ExtractOptions::new(plan).chunk_size(args.chunk_size);

        if !args.quiet {
            println!("Extracting files:");
        }
        report.start_extraction(matches.len());
        let counters = Extractor::new(options).extract(&backend, &matches, &mut report);
        report.finish();

        if !args.quiet {
            println!(
                "  {} of {} files extracted.",
                counters.files_done, counters.files_found
            );
        }
    }

    Ok(())
}

/// One line per active filter, printed alongside the search banner.
fn criteria_description(args: &Args) -> Vec<String> {
    let mut lines = vec![format!("  * full paths matching '{}'", args.search)];
    if let Some(pattern) = &args.filename {
        lines.push(format!("  * filenames matching '{}'", pattern));
    }
    if let Some(ext) = &args.filetype {
        lines.push(format!("  * extensions matching '{}'", ext));
    }
    lines
}

fn trim_trailing_separators(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        path.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separators_are_trimmed() {
        assert_eq!(
            trim_trailing_separators(Path::new("/games/hots/")),
            PathBuf::from("/games/hots")
        );
        assert_eq!(
            trim_trailing_separators(Path::new("data\\\\")),
            PathBuf::from("data")
        );
        assert_eq!(
            trim_trailing_separators(Path::new("data")),
            PathBuf::from("data")
        );
    }

    #[test]
    fn criteria_description_lists_active_filters() {
        let args = Args::parse_from([
            "stormex", "-i", "store", "-s", "enus", "-f", "voice", "-t", "ogg",
        ]);
        assert_eq!(
            criteria_description(&args),
            vec![
                "  * full paths matching 'enus'",
                "  * filenames matching 'voice'",
                "  * extensions matching 'ogg'",
            ]
        );

        let args = Args::parse_from(["stormex", "-i", "store"]);
        assert_eq!(
            criteria_description(&args),
            vec!["  * full paths matching '/'"]
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
