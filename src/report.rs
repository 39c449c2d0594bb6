use tabled::{Table, builder::Builder};

use crate::core::{CompensationModel, ComparisonRow, ParameterField, ParameterSet};

pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

fn model_cell(row: &ComparisonRow, model: CompensationModel) -> String {
    let summary = row.model(model).summary();
    format!(
        "{} ({} of revenue)\n+{} setup\nEquity: {}",
        format_currency(summary.ongoing_cash),
        format_percentage(summary.revenue_percentage, 1),
        format_currency(summary.setup_fee),
        format_percentage(summary.equity, 1),
    )
}

pub fn comparison_table(rows: &[ComparisonRow]) -> Table {
    let mut builder = Builder::default();
    let mut header = vec!["AUM Level".to_string(), "Annual Revenue".to_string()];
    header.extend(CompensationModel::ALL.iter().map(|m| m.label().to_string()));
    builder.push_record(header);

    for row in rows {
        let mut record = vec![
            format!("${}M AUM", row.aum),
            format_currency(row.revenue),
        ];
        record.extend(CompensationModel::ALL.iter().map(|&m| model_cell(row, m)));
        builder.push_record(record);
    }
    builder.build()
}

pub fn fields_table(parameters: &ParameterSet) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Label", "Value"]);
    for field in ParameterField::ALL {
        builder.push_record([
            field.as_str().to_string(),
            field.label().to_string(),
            parameters.get(field).to_string(),
        ]);
    }
    builder.build()
}
