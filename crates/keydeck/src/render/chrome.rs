use eframe::egui::{self, Align2, FontId, Rect, RichText, vec2};

use crate::input::Control;
use crate::navigator::view::SlideView;
use crate::theme::Theme;

/// Thin bar along the top edge filled to the deck progress.
pub fn draw_progress_bar(ui: &egui::Ui, theme: &Theme, rect: Rect, view: &SlideView, scale: f32) {
    let height = (6.0 * scale).max(3.0);
    let track = Rect::from_min_size(rect.left_top(), vec2(rect.width(), height));
    ui.painter()
        .rect_filled(track, 0.0, Theme::with_opacity(theme.foreground, 0.08));
    let filled = Rect::from_min_size(
        rect.left_top(),
        vec2(rect.width() * view.progress() as f32, height),
    );
    ui.painter().rect_filled(filled, 0.0, theme.accent);
}

pub fn draw_footer(ui: &egui::Ui, theme: &Theme, rect: Rect, footer: &str, scale: f32) {
    ui.painter().text(
        egui::pos2(rect.center().x, rect.bottom() - 30.0 * scale),
        Align2::CENTER_BOTTOM,
        footer,
        FontId::proportional(16.0 * scale.max(0.75)),
        Theme::with_opacity(theme.foreground, 0.4),
    );
}

/// Counter and the previous / next / notes buttons. Returns the control clicked this frame.
pub fn draw_controls(ctx: &egui::Context, theme: &Theme, view: &SlideView) -> Option<Control> {
    let mut clicked = None;
    egui::Area::new(egui::Id::new("keydeck-controls"))
        .anchor(Align2::RIGHT_BOTTOM, vec2(-20.0, -20.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(&view.counter)
                        .monospace()
                        .color(Theme::with_opacity(theme.foreground, 0.6)),
                );
                ui.add_space(8.0);
                if ui
                    .add_enabled(view.prev_enabled, egui::Button::new("\u{25C0}"))
                    .on_hover_text("Previous slide")
                    .clicked()
                {
                    clicked = Some(Control::Previous);
                }
                if ui
                    .add_enabled(view.next_enabled, egui::Button::new("\u{25B6}"))
                    .on_hover_text("Next slide")
                    .clicked()
                {
                    clicked = Some(Control::Next);
                }
                if ui
                    .add(egui::Button::new("Notes").selected(view.show_notes))
                    .on_hover_text("Toggle speaker notes")
                    .clicked()
                {
                    clicked = Some(Control::Notes);
                }
            });
        });
    clicked
}

pub fn draw_toast(ui: &egui::Ui, theme: &Theme, rect: Rect, message: &str, opacity: f32, scale: f32) {
    let color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        message.to_string(),
        FontId::proportional(20.0 * scale.max(0.75)),
        color,
    );
    let padding = 16.0 * scale;
    let toast_rect = Rect::from_center_size(
        egui::pos2(rect.center().x, rect.bottom() - 100.0 * scale),
        galley.rect.size() + vec2(padding, padding) * 2.0,
    );
    ui.painter().rect_filled(
        toast_rect,
        8.0 * scale,
        Theme::with_opacity(theme.panel_background, opacity * 0.9),
    );
    ui.painter()
        .galley(toast_rect.min + vec2(padding, padding), galley, color);
}

pub fn draw_help(ui: &egui::Ui, theme: &Theme, rect: Rect, scale: f32) {
    let shortcuts = [
        ("\u{2192} / \u{2193} / Space", "Next slide"),
        ("\u{2190} / \u{2191}", "Previous slide"),
        ("Home / End", "First / last slide"),
        ("Swipe", "Next / previous slide"),
        ("N", "Toggle speaker notes"),
        ("F", "Toggle fullscreen"),
        ("Esc", "Leave fullscreen"),
        ("A", "Toggle auto-advance"),
        ("E", "Toggle effects"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let bg = Theme::with_opacity(theme.panel_background, 0.92);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let scale = scale.max(0.75);
    let padding = 24.0 * scale;
    let line_height = 32.0 * scale;
    let height = shortcuts.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
    let width = 400.0 * scale;
    let panel = Rect::from_center_size(rect.center(), vec2(width, height));
    ui.painter().rect_filled(panel, 12.0 * scale, bg);

    ui.painter().text(
        panel.left_top() + vec2(padding, padding),
        Align2::LEFT_TOP,
        "Keyboard Shortcuts",
        FontId::proportional(20.0 * scale),
        Theme::with_opacity(theme.heading_color, 0.9),
    );

    let mut y = panel.top() + padding + 40.0 * scale;
    for (key, desc) in shortcuts {
        ui.painter().text(
            egui::pos2(panel.left() + padding, y),
            Align2::LEFT_TOP,
            key,
            FontId::monospace(15.0 * scale),
            key_color,
        );
        ui.painter().text(
            egui::pos2(panel.left() + padding + 190.0 * scale, y),
            Align2::LEFT_TOP,
            desc,
            FontId::proportional(15.0 * scale),
            text_color,
        );
        y += line_height;
    }
}
