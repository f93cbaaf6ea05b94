//! Verify command implementation.

use protohash::Digest;

use super::{compute, CliError, HasherOptions, Target};
use crate::output::{format_json, VerifyReport};

pub fn run(
    target: Target,
    options: HasherOptions,
    expected: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let expected = Digest::parse_hex(&expected)
        .map_err(|e| format!("Invalid expected digest: {}", e))?;
    let (computed, config) = compute(&target, &options)?;
    let matches = computed == expected;

    if json_output {
        let report = VerifyReport {
            message: target.message,
            primitive: config.primitive,
            expected,
            computed,
            matches,
        };
        println!("{}", format_json(&report));
    } else if matches {
        println!("OK {}", computed);
    } else {
        println!("MISMATCH {} (expected {})", computed, expected);
    }

    if !matches {
        tracing::warn!(%expected, %computed, "digest mismatch");
        return Err(CliError::Mismatch { expected, computed }.into());
    }
    Ok(())
}
