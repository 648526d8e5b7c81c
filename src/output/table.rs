use std::io::IsTerminal;

use comfy_table::Color;

use crate::pricing::{GlobalMultiplier, PricingTable};

use super::format::{create_styled_table, effective_rate, format_rate, header_cell, right_cell};

/// Render the pricing table, with effective rates when a multiplier is in force
pub(crate) fn render_models_table(
    table: &PricingTable,
    multiplier: GlobalMultiplier,
    use_color: bool,
) -> String {
    let scaled = multiplier.value() != 1.0;

    let mut out = create_styled_table();
    let mut header = vec![
        header_cell("Model", use_color),
        header_cell("Prompt /1K", use_color),
        header_cell("Completion /1K", use_color),
    ];
    if scaled {
        header.push(header_cell(&format!("Prompt x{}", multiplier.value()), use_color));
        header.push(header_cell(&format!("Completion x{}", multiplier.value()), use_color));
    }
    out.set_header(header);

    let accent = use_color.then_some(Color::Green);
    for entry in table.entries() {
        let mut row = vec![
            comfy_table::Cell::new(&entry.model),
            right_cell(&format_rate(entry.prompt_rate_per_k), None),
            right_cell(&format_rate(entry.completion_rate_per_k), None),
        ];
        if scaled {
            row.push(right_cell(
                &format_rate(effective_rate(entry.prompt_rate_per_k, multiplier)),
                accent,
            ));
            row.push(right_cell(
                &format_rate(effective_rate(entry.completion_rate_per_k, multiplier)),
                accent,
            ));
        }
        out.add_row(row);
    }

    out.to_string()
}

pub(crate) fn print_models_table(table: &PricingTable, multiplier: GlobalMultiplier) {
    let use_color = std::io::stdout().is_terminal();
    println!("{}", render_models_table(table, multiplier, use_color));
    println!("\n  {} models, prices in USD per 1000 tokens\n", table.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_model() {
        let table = PricingTable::builtin().unwrap();
        let rendered = render_models_table(&table, GlobalMultiplier::default(), false);
        for entry in table.entries() {
            assert!(rendered.contains(&entry.model), "missing {}", entry.model);
        }
        assert!(!rendered.contains("Prompt x"));
    }

    #[test]
    fn shows_effective_rates_when_scaled() {
        let table = PricingTable::builtin().unwrap();
        let rendered = render_models_table(&table, GlobalMultiplier::new(2.0).unwrap(), false);
        assert!(rendered.contains("Prompt x2"));
        assert!(rendered.contains("$0.12"));
    }
}
