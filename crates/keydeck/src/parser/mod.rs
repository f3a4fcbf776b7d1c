pub mod frontmatter;
pub mod splitter;

use std::sync::LazyLock;

use regex::Regex;

use crate::effects::slide_animation::AnimationHint;

pub use frontmatter::DeckMeta;

/// Line that switches the rest of a slide into speaker notes.
const NOTES_MARKER: &str = "???";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@([A-Za-z0-9_-]+):\s*(.*?)\s*$").expect("directive pattern is valid")
});
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.+?)\s*#*\s*$").expect("heading pattern is valid"));
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+]|\d+[.)])\s+").expect("list pattern is valid"));

#[derive(Debug, Clone)]
pub struct Deck {
    pub meta: DeckMeta,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default)]
pub struct Slide {
    pub title: Option<String>,
    /// Body lines, list markers stripped.
    pub items: Vec<String>,
    pub notes: Vec<String>,
    pub animation: Option<AnimationHint>,
}

pub fn parse(content: &str) -> Deck {
    let (meta, body) = frontmatter::extract(content);
    let slides = splitter::split(&body)
        .into_iter()
        .enumerate()
        .map(|(i, raw)| parse_slide(i, &raw))
        .collect();
    Deck { meta, slides }
}

fn parse_slide(index: usize, raw: &str) -> Slide {
    let mut slide = Slide::default();
    let mut in_notes = false;
    let mut in_fence = false;

    for line in raw.lines() {
        let trimmed = line.trim();

        if trimmed == NOTES_MARKER && !in_fence {
            in_notes = true;
            continue;
        }
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }
        if in_notes {
            slide.notes.push(trimmed.to_string());
            continue;
        }
        if in_fence {
            slide.items.push(line.trim_end().to_string());
            continue;
        }

        if let Some(caps) = DIRECTIVE.captures(trimmed) {
            apply_directive(index, &mut slide, &caps[1], &caps[2]);
            continue;
        }
        if slide.title.is_none() {
            if let Some(caps) = HEADING.captures(trimmed) {
                slide.title = Some(caps[1].to_string());
                continue;
            }
        }
        let item = LIST_MARKER.replace(trimmed, "");
        let item = HEADING
            .captures(&item)
            .map_or_else(|| item.to_string(), |caps| caps[1].to_string());
        slide.items.push(item);
    }

    slide
}

fn apply_directive(index: usize, slide: &mut Slide, name: &str, value: &str) {
    match name {
        "animation" => match AnimationHint::from_name(value) {
            Some(hint) => slide.animation = Some(hint),
            None => log::warn!("Slide {}: unknown animation '{value}'", index + 1),
        },
        _ => log::debug!("Slide {}: ignoring directive @{name}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_deck_parses() {
        let content = include_str!("../../../../sample-presentations/keynote.md");
        let deck = parse(content);
        assert_eq!(deck.meta.title.as_deref(), Some("Building Orb Runner"));
        assert_eq!(deck.meta.theme.as_deref(), Some("dark"));
        assert!(
            deck.slides.len() >= 13,
            "Expected at least 13 slides, got {}",
            deck.slides.len()
        );
        assert_eq!(deck.slides[0].animation, Some(AnimationHint::TitleOrbs));
        assert_eq!(deck.slides[1].animation, Some(AnimationHint::Workflow));
        assert_eq!(deck.slides[4].animation, Some(AnimationHint::Player));
        assert_eq!(deck.slides[12].animation, Some(AnimationHint::OrbCollection));
        assert!(deck.slides.iter().all(|s| s.title.is_some()));
    }

    #[test]
    fn test_title_items_and_notes() {
        let deck = parse("# Welcome\n\n- First\n- Second\n\n???\nSay hello\nSmile");
        assert_eq!(deck.slides.len(), 1);
        let slide = &deck.slides[0];
        assert_eq!(slide.title.as_deref(), Some("Welcome"));
        assert_eq!(slide.items, vec!["First", "Second"]);
        assert_eq!(slide.notes, vec!["Say hello", "Smile"]);
    }

    #[test]
    fn test_animation_directive() {
        let deck = parse("@animation: orb-collection\n# Feedback\n\nCollect them all");
        assert_eq!(deck.slides[0].animation, Some(AnimationHint::OrbCollection));
        assert_eq!(deck.slides[0].items, vec!["Collect them all"]);
    }

    #[test]
    fn test_unknown_animation_is_ignored() {
        let deck = parse("@animation: fireworks\n# Party");
        assert_eq!(deck.slides[0].animation, None);
        assert_eq!(deck.slides[0].title.as_deref(), Some("Party"));
    }

    #[test]
    fn test_ordered_list_and_subheading() {
        let deck = parse("# Plan\n\n## Phase one\n1. Sketch\n2) Build");
        assert_eq!(deck.slides[0].items, vec!["Phase one", "Sketch", "Build"]);
    }

    #[test]
    fn test_notes_marker_inside_fence_is_code() {
        let deck = parse("# Code\n\n```\n???\n```");
        assert!(deck.slides[0].notes.is_empty());
        assert_eq!(deck.slides[0].items, vec!["???"]);
    }

    #[test]
    fn test_slide_without_heading() {
        let deck = parse("Just a line\n\n---\n\n# Next");
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].title, None);
        assert_eq!(deck.slides[0].items, vec!["Just a line"]);
    }

    #[test]
    fn test_leading_separator_is_not_frontmatter() {
        let deck = parse("---\n\n# One\n\n---\n\n# Two\n");
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].title.as_deref(), Some("One"));
        assert_eq!(deck.slides[1].title.as_deref(), Some("Two"));
    }

    #[test]
    fn test_empty_document_has_no_slides() {
        assert!(parse("").slides.is_empty());
        assert!(parse("---\ntitle: Empty\n---\n").slides.is_empty());
    }
}
