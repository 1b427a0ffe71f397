//! The `formsmith parse-name` command.

use anyhow::Result;

use formsmith_core::name::parse_name;

pub fn execute(name: String, format: String) -> Result<()> {
    let parsed = parse_name(&name);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        _ => {
            use comfy_table::{Cell, Table};

            let mut table = Table::new();
            table.set_header(vec!["Component", "Value"]);
            for (label, value) in [
                ("Prefix", &parsed.prefix),
                ("First", &parsed.first),
                ("Middle", &parsed.middle),
                ("Last", &parsed.last),
                ("Suffix", &parsed.suffix),
            ] {
                table.add_row(vec![Cell::new(label), Cell::new(value)]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
