pub mod chrome;
pub mod effects;

use eframe::egui::{self, Align2, FontId, Pos2, Rect, vec2};

use crate::effects::slide_animation::{Motion, ORB_COUNT, SlideAnimation};
use crate::parser::Slide;
use crate::theme::Theme;

/// Share of the screen height given to the notes panel.
const NOTES_FRACTION: f32 = 0.28;
const ORB_RADIUS: f32 = 36.0;
const ORB_SPACING: f32 = 180.0;

/// Layouts are authored at 1920x1080 and scaled to the window.
pub fn compute_scale(rect: Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Split the screen into the slide area and, when notes are shown, the notes panel below it.
pub fn split_notes(rect: Rect, show_notes: bool) -> (Rect, Option<Rect>) {
    if !show_notes {
        return (rect, None);
    }
    let split_y = rect.bottom() - rect.height() * NOTES_FRACTION;
    let slide = Rect::from_min_max(rect.min, egui::pos2(rect.right(), split_y));
    let notes = Rect::from_min_max(egui::pos2(rect.left(), split_y), rect.max);
    (slide, Some(notes))
}

/// Resting centres of the decorative orbs, in a row across the lower part of the slide.
pub fn orb_centers(rect: Rect, scale: f32) -> [Pos2; ORB_COUNT] {
    let y = rect.top() + rect.height() * 0.78;
    let mid = ORB_COUNT as f32 / 2.0 - 0.5;
    std::array::from_fn(|i| {
        egui::pos2(
            rect.center().x + (i as f32 - mid) * ORB_SPACING * scale,
            y,
        )
    })
}

/// The orb under `pointer`, if any.
pub fn hit_orb(rect: Rect, scale: f32, pointer: Pos2) -> Option<Pos2> {
    let radius = ORB_RADIUS * scale;
    orb_centers(rect, scale)
        .into_iter()
        .find(|c| c.distance(pointer) <= radius)
}

/// Paint one slide into `rect`. `anim` is the running entrance animation, if effects are on.
pub fn render_slide(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: Rect,
    scale: f32,
    anim: Option<&SlideAnimation>,
    now: f32,
) {
    let painter = ui.painter();
    let padding = 120.0 * scale;
    let content = rect.shrink(padding);
    let item_motion = |i: usize| anim.map_or(Motion::REST, |a| a.item_motion(i, now));

    // Title-only slides sit in the middle of the screen.
    let title_size = theme.title_size * scale;
    let mut y = if slide.items.is_empty() {
        content.center().y - title_size / 2.0
    } else {
        content.top()
    };

    if let Some(title) = &slide.title {
        let galley = painter.layout(
            title.clone(),
            FontId::proportional(title_size),
            theme.heading_color,
            content.width(),
        );
        let x = if slide.items.is_empty() {
            content.center().x - galley.rect.width() / 2.0
        } else {
            content.left()
        };
        let height = galley.rect.height();
        painter.galley(egui::pos2(x, y), galley, theme.heading_color);
        y += height + 48.0 * scale;
    }

    let body_size = theme.body_size * scale;
    let bullet_indent = 40.0 * scale;
    for (i, item) in slide.items.iter().enumerate() {
        let motion = item_motion(i);
        if motion.opacity <= 0.0 {
            y += body_size * 1.6;
            continue;
        }
        let color = Theme::with_opacity(theme.foreground, motion.opacity);
        let galley = painter.layout(
            item.clone(),
            FontId::proportional(body_size * motion.scale),
            color,
            content.width() - bullet_indent,
        );
        let top = y + motion.offset_y * scale;
        painter.circle_filled(
            egui::pos2(content.left() + 10.0 * scale, top + body_size * 0.6),
            6.0 * scale,
            Theme::with_opacity(theme.accent, motion.opacity),
        );
        let height = galley.rect.height();
        painter.galley(egui::pos2(content.left() + bullet_indent, top), galley, color);
        y += height + body_size * 0.6;
    }

    if slide.animation.is_some_and(|h| h.has_orbs()) {
        draw_orbs(ui, theme, rect, scale, anim, now);
    }

    if let Some(position) = anim.and_then(|a| a.player_position(now)) {
        draw_player(ui, theme, content, scale, position);
    }
}

fn draw_orbs(
    ui: &egui::Ui,
    theme: &Theme,
    rect: Rect,
    scale: f32,
    anim: Option<&SlideAnimation>,
    now: f32,
) {
    let painter = ui.painter();
    for (i, center) in orb_centers(rect, scale).into_iter().enumerate() {
        let motion = anim.map_or(Motion::REST, |a| a.orb_motion(i, now));
        if motion.opacity <= 0.0 {
            continue;
        }
        let center = center + vec2(0.0, motion.offset_y * scale);
        let radius = ORB_RADIUS * scale * motion.scale;
        painter.circle_filled(
            center,
            radius * 1.4,
            Theme::with_opacity(theme.accent, motion.opacity * 0.15),
        );
        painter.circle_filled(
            center,
            radius,
            Theme::with_opacity(theme.accent, motion.opacity * 0.85),
        );
        painter.circle_filled(
            center - vec2(radius, radius) * 0.3,
            radius * 0.25,
            Theme::with_opacity(egui::Color32::WHITE, motion.opacity * 0.7),
        );
    }
}

fn draw_player(ui: &egui::Ui, theme: &Theme, content: Rect, scale: f32, position: f32) {
    let painter = ui.painter();
    let track_y = content.bottom() - 20.0 * scale;
    let stroke = egui::Stroke::new(2.0 * scale, Theme::with_opacity(theme.foreground, 0.2));
    painter.line_segment(
        [
            egui::pos2(content.left(), track_y),
            egui::pos2(content.right(), track_y),
        ],
        stroke,
    );
    let size = 28.0 * scale;
    let x = content.left() + size + (content.width() - size * 2.0) * position;
    let marker = Rect::from_center_size(egui::pos2(x, track_y - size), vec2(size, size) * 1.4);
    painter.rect_filled(marker, 6.0 * scale, theme.secondary_accent);
    painter.circle_filled(
        marker.center() + vec2(size * 0.25, -size * 0.15),
        size * 0.12,
        theme.background,
    );
}

/// Speaker notes for the current slide, shown in the lower panel.
pub fn render_notes(ui: &egui::Ui, slide: Option<&Slide>, theme: &Theme, rect: Rect, scale: f32) {
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, theme.panel_background);
    painter.line_segment(
        [rect.left_top(), rect.right_top()],
        egui::Stroke::new(2.0 * scale, Theme::with_opacity(theme.accent, 0.6)),
    );

    let padding = 32.0 * scale;
    let label_color = Theme::with_opacity(theme.accent, 0.9);
    painter.text(
        rect.left_top() + vec2(padding, padding),
        Align2::LEFT_TOP,
        "NOTES",
        FontId::monospace(14.0 * scale.max(0.75)),
        label_color,
    );

    let notes = slide.map(|s| s.notes.join("\n")).unwrap_or_default();
    let (text, color) = if notes.is_empty() {
        (
            "No notes for this slide.".to_string(),
            Theme::with_opacity(theme.foreground, 0.4),
        )
    } else {
        (notes, theme.foreground)
    };
    let galley = painter.layout(
        text,
        FontId::proportional(theme.notes_size * scale.max(0.75)),
        color,
        rect.width() - padding * 2.0,
    );
    painter.galley(
        rect.left_top() + vec2(padding, padding + 32.0 * scale),
        galley,
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(1920.0, 1080.0))
    }

    #[test]
    fn test_scale_fits_smaller_dimension() {
        assert_eq!(compute_scale(screen()), 1.0);
        let wide = Rect::from_min_size(Pos2::ZERO, vec2(1920.0, 540.0));
        assert_eq!(compute_scale(wide), 0.5);
    }

    #[test]
    fn test_split_notes() {
        let (slide, notes) = split_notes(screen(), false);
        assert_eq!(slide, screen());
        assert!(notes.is_none());

        let (slide, notes) = split_notes(screen(), true);
        let notes = notes.unwrap();
        assert_eq!(slide.bottom(), notes.top());
        assert_eq!(notes.bottom(), 1080.0);
        assert!(notes.height() < slide.height());
    }

    #[test]
    fn test_orbs_are_centred_row() {
        let centers = orb_centers(screen(), 1.0);
        assert_eq!(centers[1].x, 960.0);
        assert_eq!(centers[0].y, centers[2].y);
        assert_eq!(centers[1].x - centers[0].x, centers[2].x - centers[1].x);
    }

    #[test]
    fn test_hit_orb() {
        let centers = orb_centers(screen(), 1.0);
        let near = centers[2] + vec2(10.0, -10.0);
        assert_eq!(hit_orb(screen(), 1.0, near), Some(centers[2]));
        assert_eq!(hit_orb(screen(), 1.0, egui::pos2(5.0, 5.0)), None);
    }
}
