use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Render rows under `columns` as a rounded table.
pub fn render_table<I>(columns: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Render `(field, value)` pairs as aligned `field: value` lines.
pub fn render_details(fields: &[(&str, String)]) -> String {
    let width = fields
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    fields
        .iter()
        .map(|(name, value)| {
            let label = format!("{name:<width$}");
            format!("{}  {value}", label.cyan())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table() {
        let out = render_table(
            &["ID", "Name"],
            vec![
                vec!["1".to_string(), "Admin".to_string()],
                vec!["22".to_string(), "HR".to_string()],
            ],
        );
        insta::assert_snapshot!(out, @r"
        ╭────┬───────╮
        │ ID │ Name  │
        ├────┼───────┤
        │ 1  │ Admin │
        │ 22 │ HR    │
        ╰────┴───────╯
        ");
    }

    #[test]
    fn test_render_details_aligns_labels() {
        let out = render_details(&[("ID", "7".to_string()), ("Department", "HR".to_string())]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ID        "));
        assert!(lines[0].ends_with("  7"));
        assert!(lines[1].ends_with("  HR"));
    }
}
