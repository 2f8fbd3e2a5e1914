use super::*;

#[test]
fn test_table_aligns_columns() {
    let styles = StyleManager::plain();
    let rendered = Table::new(&styles)
        .header(&["Process", "Need"])
        .row(&["P0", "[7, 4, 3]"])
        .row(&["server", "[0, 1]"])
        .render();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Process | Need");
    assert_eq!(lines[1], "--------+----------");
    assert_eq!(lines[2], "P0      | [7, 4, 3]");
    assert_eq!(lines[3], "server  | [0, 1]");
}

#[test]
fn test_table_pads_short_rows_and_indents() {
    let styles = StyleManager::plain();
    let rendered = Table::new(&styles)
        .indent(2)
        .row(&["a", "b"])
        .row(&["ccc"])
        .render();

    assert_eq!(rendered, "  a   | b\n  ccc\n");
}

#[test]
fn test_empty_table_renders_nothing() {
    let styles = StyleManager::plain();
    assert!(Table::new(&styles).render().is_empty());
}

#[test]
fn test_styled_cells_measured_without_ansi() {
    let styles = StyleManager::with_colors(true);
    let cell = styles.style_success("ok");
    let rendered = Table::new(&styles).row(&[cell.as_str(), "x"]).row(&["long", "y"]).render();
    let plain = console::strip_ansi_codes(&rendered);
    assert_eq!(plain, "ok   | x\nlong | y\n");
}
