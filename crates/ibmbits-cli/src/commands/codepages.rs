//! List the built-in code pages.

use ibmbits::CodePageRegistry;

use crate::output::CodePageOutput;

pub fn run() -> Vec<CodePageOutput> {
    CodePageRegistry::all()
        .iter()
        .map(|cp| CodePageOutput {
            name: cp.name,
            ccsid: cp.ccsid,
        })
        .collect()
}
