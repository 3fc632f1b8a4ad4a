//! PAR2 verification tool.
//!
//! Parses a PAR2 recovery stream, reports what the scan found, then
//! verifies every described file slice-by-slice across a worker pool.
//! File names are resolved relative to the recovery file's directory.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use rustc_hash::FxHashMap;

use par2check::domain::FileId;
use par2check::source::LazyFileSource;
use par2check::verify;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = par2check::args::parse_args();
    let input = matches
        .get_one::<String>("input")
        .context("input file is required")?;
    let workers = matches.get_one::<usize>("threads").copied().unwrap_or(0);

    let path = Path::new(input);
    let file =
        File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let outcome = par2check::parse_recovery_set(&mut BufReader::new(file));

    if let Some(err) = &outcome.error {
        eprintln!("warning: scan stopped early: {}", err);
    }
    let stats = outcome.stats;
    if stats.checksum_rejects > 0 || stats.foreign_set_rejects > 0 || stats.implausible_lengths > 0
    {
        eprintln!(
            "warning: dropped {} corrupt, {} foreign-set and {} malformed packets",
            stats.checksum_rejects, stats.foreign_set_rejects, stats.implausible_lengths
        );
    }

    let set = outcome.set;
    if set.files.is_empty() {
        bail!("the stream describes no files");
    }

    let complete = set.is_complete();
    if !complete {
        eprintln!(
            "warning: recovery set is incomplete ({} declared, {} descriptions, {} checksum \
             lists); per-file results below are not a full verdict",
            set.file_ids.len(),
            set.files.len(),
            set.slice_checksums.len()
        );
    }

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    // Submission sorted by name for deterministic job order; results still
    // arrive in completion order.
    let mut members: Vec<(FileId, String)> =
        set.files.iter().map(|f| (f.id, f.name.clone())).collect();
    members.sort_by(|a, b| a.1.cmp(&b.1));

    let names: FxHashMap<FileId, String> = members.iter().cloned().collect();
    let jobs: Vec<(FileId, LazyFileSource)> = members
        .into_iter()
        .map(|(id, name)| (id, LazyFileSource::new(base_dir.join(name))))
        .collect();

    let set = Arc::new(set);
    let results = verify::verify_all(set, jobs, workers)?;

    let mut all_clean = true;
    for outcome in results {
        let fallback = outcome.file_id.to_hex();
        let name = names
            .get(&outcome.file_id)
            .map(String::as_str)
            .unwrap_or(&fallback);
        match &outcome.result {
            Ok(corrupt) if corrupt.is_empty() => println!("{}: ok", name),
            Ok(corrupt) => {
                all_clean = false;
                println!("{}: {} corrupt slice(s): {:?}", name, corrupt.len(), corrupt);
            }
            Err(err) => {
                all_clean = false;
                println!("{}: error: {}", name, err);
            }
        }
    }

    if !all_clean || !complete {
        std::process::exit(1);
    }
    Ok(())
}
