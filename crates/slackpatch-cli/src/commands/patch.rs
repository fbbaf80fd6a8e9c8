//! Patch command: load an image, run the substitution pass, write it back.
//!
//! Read failure means nothing is written. Write failure after a successful
//! pass is a total failure; the in-memory result is discarded with a
//! non-zero exit.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use slackpatch_core::{ImageBuffer, Patcher, builtin_terms, format_record, load_terms};

pub fn run(
    input: &Path,
    output: Option<&Path>,
    terms: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let table = match terms {
        Some(path) => {
            let table = load_terms(path).map_err(|e| {
                if e.is_not_found() {
                    anyhow::anyhow!("Term table {} does not exist", path.display())
                } else {
                    anyhow::Error::new(e)
                        .context(format!("Could not load term table {}", path.display()))
                }
            })?;
            eprintln!("Loaded {} term pair(s) from {}", table.len(), path.display());
            table
        }
        None => builtin_terms(),
    };

    let bytes = fs::read(input)
        .with_context(|| format!("Could not open {} for reading", input.display()))?;
    eprintln!("Loaded {} ({} bytes)", input.display(), bytes.len());

    let mut patcher = Patcher::new(ImageBuffer::new(bytes));
    let records = patcher.run(&table)?;

    for record in &records {
        let line = format_record(record);
        if record.is_replaced() {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
        }
    }

    let replaced = records.iter().filter(|r| r.is_replaced()).count();
    eprintln!(
        "{} match(es), {} replaced, {} skipped",
        records.len(),
        replaced,
        records.len() - replaced
    );

    if dry_run {
        eprintln!("Dry run, not writing anything");
        return Ok(());
    }

    // The classic tool patched in place when no output was given.
    let destination = output.unwrap_or(input);
    fs::write(destination, patcher.into_buffer().into_bytes())
        .with_context(|| format!("Could not open {} for writing", destination.display()))?;
    eprintln!("Wrote {}", destination.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("arm9.bin");
        let output = dir.path().join("arm9_patched.bin");
        fs::write(&input, b"https://nas.nintendowifi.net\0\0\0").unwrap();

        run(&input, Some(&output), None, false).unwrap();

        let patched = fs::read(&output).unwrap();
        assert_eq!(&patched, b"http://nas.nintendowifi.net\0\0\0\0");
        // Input untouched when an output path is given.
        let original = fs::read(&input).unwrap();
        assert_eq!(&original, b"https://nas.nintendowifi.net\0\0\0");
    }

    #[test]
    fn test_patch_in_place_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("arm9.bin");
        fs::write(&input, b"https://x\0\0\0").unwrap();

        run(&input, None, None, false).unwrap();

        let patched = fs::read(&input).unwrap();
        assert_eq!(&patched, b"http://x\0\0\0\0");
    }

    #[test]
    fn test_dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("arm9.bin");
        fs::write(&input, b"https://x\0\0\0").unwrap();

        run(&input, None, None, true).unwrap();

        let untouched = fs::read(&input).unwrap();
        assert_eq!(&untouched, b"https://x\0\0\0");
    }

    #[test]
    fn test_missing_terms_file_message() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("arm9.bin");
        fs::write(&input, b"https://x\0\0\0").unwrap();

        let missing = dir.path().join("no_such_terms.json");
        let err = run(&input, None, Some(&missing), false).unwrap_err();
        assert!(err.to_string().contains("does not exist"));

        // Nothing was written before the config failure.
        let untouched = fs::read(&input).unwrap();
        assert_eq!(&untouched, b"https://x\0\0\0");
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.bin");
        assert!(run(&input, None, None, false).is_err());
    }
}
