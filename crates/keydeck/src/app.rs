use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::cli::PresentArgs;
use crate::config::Config;
use crate::display::FullscreenMonitor;
use crate::effects::Effects;
use crate::effects::particles::ParticleOptions;
use crate::input::{self, SwipeTracker};
use crate::navigator::auto_advance::{AutoAdvance, DEFAULT_INTERVAL};
use crate::navigator::view::SlideView;
use crate::navigator::{Action, Command, NavState, Transition};
use crate::parser::{self, Deck, DeckMeta};
use crate::render::{self, chrome};
use crate::theme::Theme;

/// Presenter settings after merging CLI flags, deck frontmatter and the config file.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    theme: String,
    /// 0-indexed.
    start_slide: usize,
    /// Interval to arm at launch; `None` leaves auto-advance off.
    auto_advance: Option<Duration>,
    /// Interval used when auto-advance is switched on with `a`.
    toggle_interval: Duration,
    effects: bool,
    chrome: bool,
    windowed: bool,
}

impl Settings {
    /// CLI flags win over the frontmatter, which wins over the config file.
    fn resolve(args: &PresentArgs, meta: &DeckMeta, config: &Config) -> Self {
        let theme = meta
            .theme
            .clone()
            .or_else(|| config.theme().map(str::to_string))
            .unwrap_or_else(|| "dark".to_string());
        let start_slide = args
            .slide
            .or(config.start_slide())
            .unwrap_or(1)
            .saturating_sub(1);
        let secs = args
            .auto_advance
            .or(meta.auto_advance)
            .or(config.auto_advance())
            .unwrap_or(0);
        let auto_advance = (secs > 0).then(|| Duration::from_secs(secs));
        Self {
            theme,
            start_slide,
            auto_advance,
            toggle_interval: auto_advance.unwrap_or(DEFAULT_INTERVAL),
            effects: !args.no_effects && config.effects_enabled(),
            chrome: !args.no_chrome,
            windowed: args.windowed,
        }
    }
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

/// Input gathered inside `ctx.input`, acted on once the input lock is released.
#[derive(Default)]
struct FrameInput {
    actions: Vec<Action>,
    quit: bool,
    leave_fullscreen: bool,
    toggle_help: bool,
    toggle_auto_advance: bool,
    toggle_effects: bool,
    click: Option<egui::Pos2>,
    fullscreen: bool,
    visible: bool,
}

impl FrameInput {
    fn from_events(events: &[egui::Event], swipe: &mut SwipeTracker, fullscreen: bool) -> Self {
        let mut frame = Self {
            fullscreen,
            ..Self::default()
        };
        for event in events {
            if let Some(action) = swipe.handle_event(event) {
                frame.actions.push(action);
                continue;
            }
            let egui::Event::Key {
                key,
                pressed: true,
                repeat,
                modifiers,
                ..
            } = event
            else {
                continue;
            };
            if modifiers.ctrl || modifiers.command || modifiers.alt {
                continue;
            }
            match key {
                egui::Key::Q => frame.quit = true,
                egui::Key::Escape => frame.leave_fullscreen = fullscreen,
                // Toggles fire once per press.
                egui::Key::H if !repeat => frame.toggle_help ^= true,
                egui::Key::A if !repeat => frame.toggle_auto_advance ^= true,
                egui::Key::E if !repeat => frame.toggle_effects ^= true,
                egui::Key::H | egui::Key::A | egui::Key::E => {}
                egui::Key::N | egui::Key::F if *repeat => {}
                key => frame.actions.extend(input::key_action(*key)),
            }
        }
        frame
    }
}

struct KeydeckApp {
    deck: Deck,
    theme: Theme,
    nav: NavState,
    effects: Effects,
    auto_advance: AutoAdvance,
    toggle_interval: Duration,
    swipe: SwipeTracker,
    fullscreen: FullscreenMonitor,
    show_help: bool,
    chrome: bool,
    toast: Option<Toast>,
    /// Slide area and scale from the last frame, used to hit-test orbs.
    last_slide_rect: egui::Rect,
    last_scale: f32,
}

impl KeydeckApp {
    fn new(deck: Deck, settings: Settings, particles: ParticleOptions) -> Self {
        let nav = NavState::starting_at(deck.slides.len(), settings.start_slide);
        let mut effects = Effects::new(settings.effects, particles);
        if let Some(index) = nav.current() {
            effects.slide_changed(index, deck.slides[index].animation);
        }
        let mut auto_advance = AutoAdvance::default();
        if let Some(interval) = settings.auto_advance {
            log::info!("auto-advance every {}s", interval.as_secs());
            auto_advance.start(interval, Instant::now());
        }
        Self {
            deck,
            theme: Theme::from_name(&settings.theme),
            nav,
            effects,
            auto_advance,
            toggle_interval: settings.toggle_interval,
            swipe: SwipeTracker::default(),
            fullscreen: FullscreenMonitor::default(),
            show_help: false,
            chrome: settings.chrome,
            toast: None,
            last_slide_rect: egui::Rect::NOTHING,
            last_scale: 1.0,
        }
    }

    /// Run one action through the navigator and carry out the command it returns.
    fn apply(&mut self, ctx: &egui::Context, action: Action, fullscreen: bool) {
        let Transition { state, command } = self.nav.dispatch(action);
        self.nav = state;
        match command {
            Some(Command::SlideChanged(index)) => {
                log::debug!("slide {} / {}", index + 1, self.nav.total());
                let hint = self.deck.slides.get(index).and_then(|s| s.animation);
                self.effects.slide_changed(index, hint);
            }
            Some(Command::ToggleFullscreen) => self.request_fullscreen(ctx, fullscreen),
            None => {}
        }
    }

    fn request_fullscreen(&mut self, ctx: &egui::Context, currently: bool) {
        let wanted = self.fullscreen.request(currently, Instant::now());
        log::debug!("requesting fullscreen={wanted}");
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(wanted));
    }

    fn toggle_auto_advance(&mut self) {
        if self.auto_advance.is_running() {
            self.auto_advance.stop();
            self.toast = Some(Toast::new("Auto-advance off".to_string()));
        } else {
            self.auto_advance.start(self.toggle_interval, Instant::now());
            if let Some(interval) = self.auto_advance.interval() {
                self.toast = Some(Toast::new(format!(
                    "Auto-advance every {}s",
                    interval.as_secs()
                )));
            }
        }
    }

    fn toggle_effects(&mut self) {
        let enabled = !self.effects.is_enabled();
        self.effects.set_enabled(enabled);
        if let Some(index) = self.nav.current() {
            let hint = self.deck.slides.get(index).and_then(|s| s.animation);
            self.effects.slide_changed(index, hint);
        }
        let state = if enabled { "on" } else { "off" };
        self.toast = Some(Toast::new(format!("Effects {state}")));
    }

    fn read_input(&mut self, ctx: &egui::Context) -> FrameInput {
        ctx.input(|i| {
            let fullscreen = i.viewport().fullscreen.unwrap_or(false);
            let mut frame = FrameInput::from_events(&i.events, &mut self.swipe, fullscreen);
            frame.visible = !i.viewport().minimized.unwrap_or(false);
            if i.pointer.primary_clicked() {
                frame.click = i.pointer.interact_pos();
            }
            frame
        })
    }

    fn collect_clicked_orb(&mut self, pos: egui::Pos2) {
        let has_orbs = self
            .nav
            .current()
            .and_then(|i| self.deck.slides.get(i))
            .and_then(|s| s.animation)
            .is_some_and(|h| h.has_orbs());
        if !has_orbs || !self.effects.is_enabled() {
            return;
        }
        if let Some(center) = render::hit_orb(self.last_slide_rect, self.last_scale, pos) {
            self.effects.collect_orb(center);
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if self.effects.is_animating() || self.toast.is_some() || self.fullscreen.is_pending() {
            ctx.request_repaint();
        } else if let Some(due) = self.auto_advance.next_due() {
            ctx.request_repaint_after(due.saturating_duration_since(now));
        }
    }
}

impl eframe::App for KeydeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Viewport commands are sent after the input closure
        // (sending inside ctx.input() deadlocks on the context lock).
        let input = self.read_input(ctx);
        if input.quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        for action in input.actions {
            self.apply(ctx, action, input.fullscreen);
        }
        if input.leave_fullscreen {
            self.request_fullscreen(ctx, true);
        }
        if input.toggle_help {
            self.show_help = !self.show_help;
        }
        if input.toggle_auto_advance {
            self.toggle_auto_advance();
        }
        if input.toggle_effects {
            self.toggle_effects();
        }
        if let Some(pos) = input.click {
            self.collect_clicked_orb(pos);
        }

        if let Some(action) = self.auto_advance.poll(now, &self.nav) {
            self.apply(ctx, action, input.fullscreen);
        }

        if let Some(rejected) = self.fullscreen.observe(input.fullscreen, now) {
            log::warn!("Fullscreen request failed: {rejected}");
            self.toast = Some(Toast::new("Fullscreen unavailable".to_string()));
        }

        self.effects.tick(now, input.visible);

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.theme.background;
        let mut clicked = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                let scale = render::compute_scale(rect);
                let view = SlideView::from_state(&self.nav);
                let (slide_rect, notes_rect) = render::split_notes(rect, view.show_notes);
                self.last_slide_rect = slide_rect;
                self.last_scale = scale;

                render::effects::paint_backdrop(ui, &self.effects, &self.theme, rect, scale);

                let active = view.active.and_then(|i| self.deck.slides.get(i).map(|s| (i, s)));
                match active {
                    Some((index, slide)) => render::render_slide(
                        ui,
                        slide,
                        &self.theme,
                        slide_rect,
                        scale,
                        self.effects.slide_animation(index),
                        self.effects.now(),
                    ),
                    None => {
                        ui.painter().text(
                            slide_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "No slides",
                            egui::FontId::proportional(self.theme.body_size * scale),
                            Theme::with_opacity(self.theme.foreground, 0.5),
                        );
                    }
                }

                if let Some(notes_rect) = notes_rect {
                    render::render_notes(
                        ui,
                        active.map(|(_, s)| s),
                        &self.theme,
                        notes_rect,
                        scale,
                    );
                }

                render::effects::paint_orb_effects(ui, &self.effects, scale);

                if self.chrome {
                    chrome::draw_progress_bar(ui, &self.theme, rect, &view, scale);
                    if let Some(footer) = &self.deck.meta.footer {
                        chrome::draw_footer(ui, &self.theme, slide_rect, footer, scale);
                    }
                    clicked = chrome::draw_controls(ctx, &self.theme, &view);
                }

                if let Some(toast) = &self.toast {
                    let opacity = toast.opacity();
                    if opacity > 0.0 {
                        chrome::draw_toast(ui, &self.theme, rect, &toast.message, opacity, scale);
                    }
                }

                if self.show_help {
                    chrome::draw_help(ui, &self.theme, rect, scale);
                }
            });

        if let Some(control) = clicked {
            log::trace!("control clicked: {control:?}");
            self.apply(ctx, control.action(), input.fullscreen);
        }

        self.schedule_repaint(ctx, now);
    }
}

pub fn run(file: PathBuf, args: PresentArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", file.display()))?;
    let deck = parser::parse(&content);
    if deck.slides.is_empty() {
        log::warn!("No slides found in {}", file.display());
    }

    let config = Config::load_or_default()?;
    let settings = Settings::resolve(&args, &deck.meta, &config);
    log::info!(
        "presenting {} ({} slides, theme {})",
        file.display(),
        deck.slides.len(),
        settings.theme
    );

    let title = deck.meta.title.clone().unwrap_or_else(|| {
        format!(
            "keydeck - {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let viewport = if settings.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let particles = config.particle_options();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let app = KeydeckApp::new(deck, settings, particles);
            let visuals = if app.theme.name == "light" {
                egui::Visuals::light()
            } else {
                egui::Visuals::dark()
            };
            cc.egui_ctx.set_visuals(visuals);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(theme: Option<&str>, auto_advance: Option<u64>) -> DeckMeta {
        DeckMeta {
            theme: theme.map(str::to_string),
            auto_advance,
            ..DeckMeta::default()
        }
    }

    fn key(key: egui::Key, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_toggle_keys_become_frame_flags() {
        let mut swipe = SwipeTracker::default();
        let events = [
            key(egui::Key::H, false),
            key(egui::Key::A, false),
            key(egui::Key::E, false),
        ];
        let frame = FrameInput::from_events(&events, &mut swipe, false);
        assert!(frame.toggle_help);
        assert!(frame.toggle_auto_advance);
        assert!(frame.toggle_effects);
        assert!(frame.actions.is_empty());
    }

    #[test]
    fn test_repeated_toggle_keys_are_ignored() {
        let mut swipe = SwipeTracker::default();
        let events = [
            key(egui::Key::H, false),
            key(egui::Key::H, true),
            key(egui::Key::N, true),
            key(egui::Key::ArrowRight, true),
        ];
        let frame = FrameInput::from_events(&events, &mut swipe, false);
        assert!(frame.toggle_help);
        assert_eq!(
            frame.actions,
            vec![Action::Step(crate::navigator::Direction::Forward)]
        );
    }

    #[test]
    fn test_escape_only_leaves_fullscreen_when_in_it() {
        let mut swipe = SwipeTracker::default();
        let events = [key(egui::Key::Escape, false)];
        assert!(!FrameInput::from_events(&events, &mut swipe, false).leave_fullscreen);
        assert!(FrameInput::from_events(&events, &mut swipe, true).leave_fullscreen);
    }

    #[test]
    fn test_defaults_without_any_source() {
        let settings = Settings::resolve(
            &PresentArgs::default(),
            &DeckMeta::default(),
            &Config::default(),
        );
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.start_slide, 0);
        assert_eq!(settings.auto_advance, None);
        assert_eq!(settings.toggle_interval, DEFAULT_INTERVAL);
        assert!(settings.effects);
        assert!(settings.chrome);
        assert!(!settings.windowed);
    }

    #[test]
    fn test_frontmatter_overrides_config() {
        let config = Config::from_yaml(
            "defaults:\n  theme: light\n  auto_advance: 90\n  start_slide: 3\n",
        )
        .unwrap();
        let settings = Settings::resolve(
            &PresentArgs::default(),
            &meta(Some("dark"), Some(20)),
            &config,
        );
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.auto_advance, Some(Duration::from_secs(20)));
        assert_eq!(settings.start_slide, 2);

        let settings = Settings::resolve(&PresentArgs::default(), &meta(None, None), &config);
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.auto_advance, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_cli_overrides_everything() {
        let config = Config::from_yaml("defaults:\n  start_slide: 3\n  effects: true\n").unwrap();
        let args = PresentArgs {
            slide: Some(7),
            auto_advance: Some(0),
            no_effects: true,
            no_chrome: true,
            windowed: true,
        };
        let settings = Settings::resolve(&args, &meta(None, Some(20)), &config);
        assert_eq!(settings.start_slide, 6);
        assert_eq!(settings.auto_advance, None);
        assert_eq!(settings.toggle_interval, DEFAULT_INTERVAL);
        assert!(!settings.effects);
        assert!(!settings.chrome);
        assert!(settings.windowed);
    }

    #[test]
    fn test_config_can_disable_effects() {
        let config = Config::from_yaml("defaults:\n  effects: false\n").unwrap();
        let settings = Settings::resolve(&PresentArgs::default(), &DeckMeta::default(), &config);
        assert!(!settings.effects);
    }

    #[test]
    fn test_slide_zero_is_first_slide() {
        let args = PresentArgs {
            slide: Some(0),
            ..PresentArgs::default()
        };
        let settings = Settings::resolve(&args, &DeckMeta::default(), &Config::default());
        assert_eq!(settings.start_slide, 0);
    }
}
