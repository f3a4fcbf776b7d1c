/// Split a document body (after frontmatter extraction) into raw slide strings.
///
/// Two mechanisms create slide breaks:
/// 1. `---` with blank lines (or the document edge) on both sides
/// 2. A `# ` heading when the current slide already has content
///
/// Lines inside fenced code blocks never break a slide.
pub fn split(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.split('\n').collect();

    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for (i, line) in lines.iter().copied().enumerate() {
        let trimmed = line.trim();

        if !in_fence && is_dash_separator(trimmed) {
            let prev_blank = current.last().is_none_or(|l| l.trim().is_empty());
            let next_blank = lines.get(i + 1).is_none_or(|l| l.trim().is_empty());
            if prev_blank && next_blank {
                flush(&mut current, &mut slides);
                continue;
            }
        }

        if is_fence(trimmed) {
            in_fence = !in_fence;
        } else if !in_fence && line.starts_with("# ") && has_content(&current) {
            // `@key: value` lines just above the heading belong to the new slide.
            let carried = take_trailing_directives(&mut current);
            flush(&mut current, &mut slides);
            current = carried;
        }

        current.push(line);
    }
    flush(&mut current, &mut slides);

    slides
}

fn flush(current: &mut Vec<&str>, slides: &mut Vec<String>) {
    let text = current.join("\n").trim().to_string();
    current.clear();
    if !text.is_empty() {
        slides.push(text);
    }
}

fn has_content(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        !t.is_empty() && !is_directive(t)
    })
}

fn take_trailing_directives<'a>(lines: &mut Vec<&'a str>) -> Vec<&'a str> {
    let mut carried = Vec::new();
    while let Some(last) = lines.last() {
        let t = last.trim();
        if t.is_empty() {
            lines.pop();
        } else if is_directive(t) {
            carried.push(*last);
            lines.pop();
        } else {
            break;
        }
    }
    carried.reverse();
    carried
}

fn is_dash_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

fn is_fence(line: &str) -> bool {
    line.starts_with("```") || line.starts_with("~~~")
}

pub(crate) fn is_directive(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('@') else {
        return false;
    };
    match rest.find(':') {
        Some(colon) if colon > 0 => rest[..colon]
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_'),
        _ => false,
    }
}
