use mathdisplay::atom::{AtomKind, ColumnAlignment, Table};
use mathdisplay::geom::Point;
use mathdisplay::{LineStyle, MathAtom, MathList};

use crate::*;

fn parsed_table(latex: &str) -> Table {
    let list = parse(latex);
    let atom = list.iter().find_map(|a| match &a.kind {
        AtomKind::Table(table) => Some(table.as_ref().clone()),
        AtomKind::Inner(inner, _) => inner.inner.iter().find_map(|a| match &a.kind {
            AtomKind::Table(table) => Some(table.as_ref().clone()),
            _ => None,
        }),
        _ => None,
    });
    atom.expect("a table")
}

#[test]
fn matrix() {
    let display = layout("\\begin{matrix}1&2\\\\3&4\\end{matrix}");
    assert_eq!(child_kinds(&display), ["list"]);
    let table = &display.children()[0];
    assert_eq!(child_kinds(table), ["list", "list"]);

    let rows = table.children();
    // rows one baseline skip apart, centered on the axis
    assert_eq!(rows[0].position(), Point::from_xy(0.0, 12.0));
    assert_eq!(rows[1].position(), Point::from_xy(0.0, -12.0));
    // columns are 18mu apart
    assert_near!(rows[0].children()[1].position().x, 30.0);
    assert_eq!(run_text(&rows[1].children()[0].children()[0]), "3");
    assert_dims!(table, 26.0, 16.0, 40.0);
}

#[test]
fn matrix_cells_are_in_text_style() {
    let table = parsed_table("\\begin{matrix}1&2\\end{matrix}");
    let first = &table.cells[0][0].atoms[0];
    assert_eq!(first.kind, AtomKind::Style(LineStyle::Text));
    assert_eq!(table.alignment(0), ColumnAlignment::Center);
}

#[test]
fn aligned_columns() {
    let latex = "\\begin{aligned}xx&=y\\\\x&=yy\\end{aligned}";
    let table = parsed_table(latex);
    assert_eq!(table.alignment(0), ColumnAlignment::Right);
    assert_eq!(table.alignment(1), ColumnAlignment::Left);
    assert_eq!(table.inter_row_spacing, 1.0);
    assert_eq!(table.inter_column_spacing, 0.0);

    let display = layout(latex);
    let table = &display.children()[0];
    let rows = table.children();
    assert_eq!(rows.len(), 2);

    // right aligned first column
    assert_near!(rows[0].children()[0].position().x, 0.0);
    assert_near!(rows[1].children()[0].position().x, 10.0);
    // left aligned second column, the relation keeps its spacing
    assert_near!(rows[0].children()[1].position().x, 20.0);
    assert_near!(rows[1].children()[1].position().x, 20.0);
    let thick = 5.0 * mu();
    assert_near!(rows[1].children()[1].width, 30.0 + 2.0 * thick);

    // one jot of extra row spacing
    assert_near!(rows[0].position().y, 15.0);
    assert_near!(rows[1].position().y, -15.0);
    assert_dims!(table, 29.0, 19.0, 50.0 + 2.0 * thick);
}

#[test]
fn cases_open_with_a_brace() {
    let display = layout("\\begin{cases}1&x\\\\2&y\\end{cases}");
    assert_eq!(child_kinds(&display), ["list"]);
    let inner = &display.children()[0];
    assert_eq!(child_kinds(inner)[1], "list");
    // no closing delimiter
    assert_eq!(inner.children().len(), 2);
}

#[test]
fn empty_table() {
    let list = MathList::from_atoms(vec![MathAtom::table(Table::new(None))]);
    let display = mathdisplay::layout(&list, &font(), LineStyle::Display);
    let table = &display.children()[0];
    assert!(table.children().is_empty());
    assert_dims!(display, 0.0, 0.0, 0.0);
}

#[test]
fn table_after_ordinary_is_spaced_as_inner() {
    let display = layout("x\\begin{matrix}1\\end{matrix}");
    assert_near!(display.children()[1].position().x, 10.0 + 3.0 * mu());
}
