//! Messages command implementation.

use super::load_pool;
use crate::output::{format_json, format_table_row, print_table_header, MessageSummary};

pub fn run(descriptor_set: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pool = load_pool(&descriptor_set)?;

    // Skip the synthesized map entry types.
    let mut summaries: Vec<MessageSummary> = pool
        .all_messages()
        .filter(|message| !message.is_map_entry())
        .map(|message| MessageSummary {
            name: message.full_name().to_string(),
            fields: message.fields().count(),
            file: message.parent_file().name().to_string(),
        })
        .collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));

    if json_output {
        println!("{}", format_json(&summaries));
    } else {
        print_table_header();
        for summary in &summaries {
            println!("{}", format_table_row(summary));
        }
    }
    Ok(())
}
