use serde::Deserialize;

/// Deck-wide settings from the optional YAML block at the top of the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeckMeta {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub footer: Option<String>,
    /// Auto-advance interval in seconds.
    pub auto_advance: Option<u64>,
}

/// Split a leading `---`-fenced YAML block off the document.
/// Only a non-empty YAML mapping counts; anything else is left as slide content.
/// A malformed block is reported and ignored rather than failing the whole deck.
pub fn extract(content: &str) -> (DeckMeta, String) {
    let content = content.trim_start_matches('\u{feff}');
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (DeckMeta::default(), content.to_string());
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].to_string();
            let meta = match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
                Ok(serde_yaml::Value::Mapping(map)) if !map.is_empty() => {
                    serde_yaml::from_value(serde_yaml::Value::Mapping(map)).unwrap_or_else(|e| {
                        log::warn!("Ignoring invalid frontmatter: {e}");
                        DeckMeta::default()
                    })
                }
                // Empty or non-mapping: the opening `---` was a slide separator.
                Ok(_) => return (DeckMeta::default(), content.to_string()),
                Err(e) => {
                    log::warn!("Ignoring invalid frontmatter: {e}");
                    DeckMeta::default()
                }
            };
            return (meta, body);
        }
        offset += line.len();
    }

    // No closing fence: treat the whole thing as slide content.
    (DeckMeta::default(), content.to_string())
}
