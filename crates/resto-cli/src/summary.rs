use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use resto_cli::pipeline::DatasetSummary;
use resto_model::Layer;

use crate::commands::RunReport;

pub fn print_summary(report: &RunReport) {
    println!("Data: {}", report.data_dir.display());
    match &report.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: dry run, nothing written"),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Layer"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for summary in &report.result.datasets {
        table.add_row(vec![
            dataset_cell(summary),
            layer_cell(summary.dataset.layer()),
            count_cell(summary.rows_in),
            Cell::new(summary.rows_out),
            output_cell(summary.output.as_deref(), report.output_dir.as_deref()),
        ]);
    }
    println!("{table}");
}

fn output_cell(path: Option<&Path>, base: Option<&Path>) -> Cell {
    match path {
        Some(path) => {
            let shown = base
                .and_then(|base| path.strip_prefix(base).ok())
                .unwrap_or(path);
            Cell::new(shown.display()).fg(Color::Green)
        }
        None => dim_cell("-"),
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dataset_cell(summary: &DatasetSummary) -> Cell {
    match summary.dataset.layer() {
        Layer::Bronze => Cell::new(summary.dataset.as_str()).fg(Color::DarkGrey),
        Layer::Silver | Layer::Gold => Cell::new(summary.dataset.as_str())
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
    }
}

fn layer_cell(layer: Layer) -> Cell {
    let color = match layer {
        Layer::Bronze => Color::DarkYellow,
        Layer::Silver => Color::Grey,
        Layer::Gold => Color::Yellow,
    };
    Cell::new(layer.as_str()).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
