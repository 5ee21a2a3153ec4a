//! YAML frontmatter splitting.

use serde_json::{Map, Value};

/// A document split into frontmatter attributes and markdown body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub attrs: Map<String, Value>,
    pub body: String,
}

/// Split a document into frontmatter attributes and body.
///
/// The block must start on the first line with `---` and end with a line
/// holding `---` or `...`. Without a complete block the whole text is the
/// body. A block that is not a YAML mapping is dropped with a warning and
/// the text after it is still used as the body.
pub fn parse_frontmatter(text: &str) -> Parsed {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some((block, body)) = split_block(text) else {
        return Parsed { attrs: Map::new(), body: text.to_string() };
    };

    let attrs = match parse_attrs(block) {
        Ok(attrs) => attrs,
        Err(reason) => {
            tracing::warn!(%reason, "ignoring invalid frontmatter");
            Map::new()
        }
    };

    Parsed { attrs, body: body.to_string() }
}

fn split_block(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if !first.ends_with('\n') || first.trim_end_matches(['\r', '\n']) != "---" {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "---" || trimmed == "..." {
            return Some((&text[start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn parse_attrs(block: &str) -> Result<Map<String, Value>, String> {
    if block.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_yaml::from_str::<Value>(block).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(format!("expected a mapping, found {other}")),
    }
}
