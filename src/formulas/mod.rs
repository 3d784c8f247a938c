pub mod miner;

pub use miner::{equation_symbols, extract_equations, format_equation, guess_symbol_definitions};

use crate::pipeline::types::FormulaEntry;

/// Formula sheet entries mined from a whole document
///
/// Every detected equation becomes one entry, wrapped for display, with
/// symbol definitions guessed against the full text.
pub fn mine_formulas(text: &str) -> Vec<FormulaEntry> {
    extract_equations(text)
        .into_iter()
        .map(|eq| {
            let symbols = guess_symbol_definitions(text, &eq);
            FormulaEntry::new(format_equation(&eq), symbols)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mine_formulas_wraps_and_defines() {
        let text = "Ohm's law:\nV = I * R\nwhere V is voltage, I is current, R is resistance.";
        let entries = mine_formulas(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].equation, "$ V = I * R $");
        assert_eq!(entries[0].symbols.get("V").map(String::as_str), Some("voltage"));
        assert_eq!(entries[0].symbols.get("R").map(String::as_str), Some("resistance."));
    }

    #[test]
    fn test_mine_formulas_empty() {
        assert!(mine_formulas("").is_empty());
        assert!(mine_formulas("No maths in this paragraph.").is_empty());
    }
}
