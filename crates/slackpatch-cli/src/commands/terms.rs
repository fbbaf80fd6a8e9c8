//! Terms command: dump the built-in term table as JSON.
//!
//! The dump is a starting point for a custom `--terms` file.

use std::path::Path;

use anyhow::{Context, Result};
use slackpatch_core::{builtin_terms, save_terms};

pub fn run(output: Option<&Path>) -> Result<()> {
    let table = builtin_terms();

    match output {
        Some(path) => {
            save_terms(path, &table)
                .with_context(|| format!("Could not write term table to {}", path.display()))?;
            eprintln!("Wrote built-in term table to {}", path.display());
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slackpatch_core::load_terms;

    #[test]
    fn test_dumped_table_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.json");

        run(Some(&path)).unwrap();

        let table = load_terms(&path).unwrap();
        assert_eq!(table, builtin_terms());
    }
}
