use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_table<R: AsRef<[String]>>(headers: &[&str], rows: &[R]) {
    print!("{}", render_table(headers, rows));
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header. Cells beyond the header count are dropped.
fn render_table<R: AsRef<[String]>>(headers: &[&str], rows: &[R]) -> String {
    let widths = column_widths(headers, rows);
    let mut out = render_line(headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&format!("{}\n", rule.join("  ")));
    for row in rows {
        out.push_str(&render_line(
            row.as_ref().iter().map(String::as_str),
            &widths,
        ));
    }
    out
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:w$}"))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

fn column_widths<R: AsRef<[String]>>(headers: &[&str], rows: &[R]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.as_ref()) {
            *width = (*width).max(cell.len());
        }
    }
    widths
}
