//! Hierarchy dump command

use anyhow::Result;
use prism_hierarchy::load_hierarchy;

pub fn run(file: &str) -> Result<()> {
    let data = load_hierarchy(file)?;

    let mut out = String::new();
    let valid = data.dump_to(&mut out)?;
    print!("{}", out);

    tracing::debug!(file, valid, "Dumped hierarchy");
    Ok(())
}
