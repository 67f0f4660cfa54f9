//! Table output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::Attribute;
use comfy_table::Cell;
use comfy_table::CellAlignment;
use comfy_table::Color;
use comfy_table::ColumnConstraint;
use comfy_table::ContentArrangement;
use comfy_table::Table;
use comfy_table::Width;
use quotegrid_lib::model::ColumnModel;
use quotegrid_lib::model::ColumnSpec;
use quotegrid_lib::model::Pinned;
use quotegrid_lib::render;
use quotegrid_lib::render::StyleClass;
use quotegrid_lib::view::GridView;

/// Approximate pixels per terminal column for width hints.
const PIXELS_PER_CHAR: u16 = 8;

/// Prints the grid and a pagination footer.
pub fn print_grid(view: &GridView) {
    println!("{}", grid_table(view));
    println!("{}", footer(view));
    if let Some(error) = &view.error {
        eprintln!("error: {error}");
    }
}

/// Prints the column model.
pub fn print_columns(columns: &ColumnModel) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Width"),
        header_cell("Pinned"),
        header_cell("Sortable"),
        header_cell("Render"),
    ]);
    apply_table_style(&mut table);

    for spec in columns.iter() {
        let key = if spec.key == columns.row_key() {
            Cell::new(&spec.key).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&spec.key)
        };
        table.add_row(vec![
            key,
            Cell::new(&spec.label),
            Cell::new(spec.width),
            Cell::new(pinned_label(spec.pinned)),
            Cell::new(if spec.sortable { "yes" } else { "-" }),
            Cell::new(format!("{:?}", spec.render_policy)),
        ]);
    }
    println!("{table}");
}

pub fn grid_table(view: &GridView) -> Table {
    let mut table = Table::new();
    table.set_header(view.columns.iter().map(|c| header_cell(&c.label)));
    apply_table_style(&mut table);
    table.set_constraints(view.columns.iter().map(column_constraint));

    for (i, spec) in view.columns.iter().enumerate() {
        if spec.render_policy.is_signed() {
            if let Some(column) = table.column_mut(i) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
    }

    for row in &view.rows {
        table.add_row(row.cells.iter().map(styled_cell));
    }
    table
}

pub fn footer(view: &GridView) -> String {
    let mut parts = Vec::new();
    match view.page {
        Some(page) => parts.push(format!("page {page} of {}", view.page_count.max(1))),
        None => parts.push("no request".to_string()),
    }
    parts.push(format!("{} rows", view.total));
    if view.loading {
        parts.push("loading".to_string());
    }
    if view.rows.is_empty() && view.error.is_none() && view.page.is_some() {
        parts.push("no data".to_string());
    }
    parts.join(", ")
}

fn styled_cell(cell: &render::Cell) -> Cell {
    let out = Cell::new(&cell.text);
    // Gains red, losses green, as on mainland exchanges.
    match cell.style {
        StyleClass::Positive => out.fg(Color::Red),
        StyleClass::Negative => out.fg(Color::Green),
        StyleClass::Neutral => out,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn column_constraint(spec: &ColumnSpec) -> ColumnConstraint {
    let chars = (spec.width / PIXELS_PER_CHAR).max(4);
    match spec.pinned {
        Pinned::None => ColumnConstraint::UpperBoundary(Width::Fixed(chars)),
        Pinned::Left | Pinned::Right => ColumnConstraint::LowerBoundary(Width::Fixed(chars)),
    }
}

fn pinned_label(pinned: Pinned) -> &'static str {
    match pinned {
        Pinned::None => "-",
        Pinned::Left => "left",
        Pinned::Right => "right",
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

#[cfg(test)]
mod tests {
    use quotegrid_lib::render::RenderPolicy;
    use quotegrid_lib::view::DisplayRow;

    use super::*;

    fn view(rows: Vec<DisplayRow>, page: Option<u32>) -> GridView {
        GridView {
            columns: vec![
                ColumnSpec::new("code", "Code"),
                ColumnSpec::new("change_pct", "Change %").render(RenderPolicy::SignedPercent),
            ],
            rows,
            total: 45,
            loading: false,
            error: None,
            page,
            page_count: 3,
        }
    }

    #[test]
    fn test_grid_table_rows() {
        let rows = vec![DisplayRow {
            key: "600519".into(),
            cells: vec![
                render::Cell::neutral("600519"),
                RenderPolicy::SignedPercent.format(&1.5.into()),
            ],
        }];
        let table = grid_table(&view(rows, Some(1)));

        assert_eq!(table.row_count(), 1);
        let text = table.to_string();
        assert!(text.contains("Change %"));
        assert!(text.contains("600519"));
        assert!(text.contains("+1.5%"));
    }

    #[test]
    fn test_footer() {
        assert_eq!(footer(&view(Vec::new(), None)), "no request, 45 rows");
        assert_eq!(
            footer(&view(Vec::new(), Some(2))),
            "page 2 of 3, 45 rows, no data"
        );
    }
}
