//! Totals and Brazilian-real formatting.

use crate::product::ProductItem;

/// Σ price × quantity
pub fn list_total(items: &[ProductItem]) -> f64 {
    items.iter().map(ProductItem::line_total).sum()
}

/// `1234.5` → `R$ 1.234,50`
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let reais = cents / 100;
    let centavos = cents % 100;

    let digits = reais.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, centavos)
}
