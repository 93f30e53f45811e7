use std::path::Path;

/// Replaces the first occurrence of each `{{token}}` marker with its value.
///
/// Only the first occurrence of a repeated token is replaced; a token that
/// does not appear in the template is skipped. Values are inserted verbatim,
/// without escaping.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = template.to_owned();
    for (token, value) in values {
        let marker = format!("{{{{{}}}}}", token);
        if let Some(start) = rendered.find(&marker) {
            rendered.replace_range(start..start + marker.len(), value);
        }
    }
    rendered
}

pub fn render_file(
    path: &Path,
    values: &[(&str, &str)],
) -> Result<String, std::io::Error> {
    let template = std::fs::read_to_string(path)?;
    Ok(fill(&template, values))
}
