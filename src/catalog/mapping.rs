use super::markup::MarkupTables;

// @module: Human-readable export of the markup id tables

/// Render the four tables as labelled `id = original` sections
pub fn render_mapping(tables: &MarkupTables) -> String {
    let sections: Vec<String> = tables
        .iter()
        .map(|table| {
            let kind = table.kind();
            let mut section = format!("=== {} MAPPING ===\n", kind.label());
            for (id, inner) in table.iter() {
                section.push_str(&format!("{} = {}\n", kind.wrap(&id.to_string()), kind.wrap(inner)));
            }
            section
        })
        .collect();
    sections.join("\n")
}
