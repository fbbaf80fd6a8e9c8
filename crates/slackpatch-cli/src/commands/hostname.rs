//! Hostname command: print the master-server hostname for a server name.

use anyhow::Result;
use slackpatch_core::master_hostname;

pub fn run(name: &str) -> Result<()> {
    println!("{}", master_hostname(name));
    Ok(())
}
