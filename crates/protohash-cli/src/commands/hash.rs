//! Hash command implementation.

use super::{compute, HasherOptions, Target};
use crate::output::{format_json, HashReport};

pub fn run(
    target: Target,
    options: HasherOptions,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (digest, config) = compute(&target, &options)?;

    if json_output {
        let report = HashReport {
            message: target.message,
            primitive: config.primitive,
            digest,
        };
        println!("{}", format_json(&report));
    } else {
        println!("{}", digest);
    }
    Ok(())
}
