//! Page state owned by the event loop. Every message from the page goes
//! through [`App::handle`], which answers with the effects to apply.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info, warn};
use serde_json::json;

use crate::carousel::{CarouselController, LoadOutcome, ModalClick, ModalKey};
use crate::config::Settings;
use crate::contact::{on_blur, on_input, ContactError, Field};
use crate::gallery::GallerySet;
use crate::ipc::{PageMessage, RevealKind};
use crate::page::behavior::{
    anchor_target, skill_width, IntroOverlay, NavMenu, ReadMore, ScrollMetrics, READ_MORE_MAX_HEIGHT,
};
use crate::page::build_page;
use crate::paths::{PageOrigin, PathResolver};
use crate::portfolio::Portfolio;
use crate::view::{ScriptBuffer, ScriptView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Evaluate in the webview.
    Script(String),
    /// Hand an http(s) link to the system browser.
    OpenUrl(String),
    /// Hand a `mailto:` link to the mail client.
    SendMail(String),
    CloseWindow,
    Quit,
}

pub struct App {
    portfolio: Portfolio,
    settings: Settings,
    origin: PageOrigin,
    carousel: CarouselController<ScriptView>,
    galleries: GallerySet,
    read_more: HashMap<usize, ReadMore>,
    menu: NavMenu,
    intro: IntroOverlay,
    script: ScriptBuffer,
    scroll_flags: Option<(bool, bool)>,
}

impl App {
    pub fn new(portfolio: Portfolio, settings: Settings, origin: PageOrigin, now: Instant) -> Self {
        let resolver = PathResolver::new(settings.name_overrides(), origin.clone());
        let carousel =
            CarouselController::new(ScriptView::new(), resolver).with_labels(settings.labels.carousel());
        let galleries =
            GallerySet::from_layouts(&portfolio.card_layouts(), settings.autoplay_interval(), now);
        let intro = intro_for(&settings);

        info!(
            "{} project cards, {} with autoplay galleries",
            portfolio.projects().count(),
            galleries.len()
        );

        Self {
            portfolio,
            settings,
            origin,
            carousel,
            galleries,
            read_more: HashMap::new(),
            menu: NavMenu::default(),
            intro,
            script: ScriptBuffer::new(),
            scroll_flags: None,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn carousel(&self) -> &CarouselController<ScriptView> {
        &self.carousel
    }

    pub fn galleries(&self) -> &GallerySet {
        &self.galleries
    }

    /// The full document for the current portfolio.
    pub fn page(&self) -> String {
        build_page(&self.portfolio, &self.settings, &self.origin)
    }

    /// Swap in a re-read portfolio. The page is rebuilt from scratch, so all
    /// per-page state starts over and anything still queued is dropped.
    pub fn reload(&mut self, portfolio: Portfolio, now: Instant) -> String {
        self.carousel.close();
        let visible = self.galleries.is_visible();
        self.galleries =
            GallerySet::from_layouts(&portfolio.card_layouts(), self.settings.autoplay_interval(), now);
        self.galleries.set_visible(visible, now);
        self.portfolio = portfolio;
        self.read_more.clear();
        self.menu.close();
        self.intro = intro_for(&self.settings);
        self.scroll_flags = None;
        self.drain_script();
        self.page()
    }

    pub fn handle(&mut self, message: PageMessage) -> Vec<Effect> {
        debug!("page message: {message:?}");
        let mut effects = Vec::new();

        match message {
            PageMessage::OpenProject { card } => self.open_project(card),
            PageMessage::ModalPrev => self.carousel.handle_click(ModalClick::Prev),
            PageMessage::ModalNext => self.carousel.handle_click(ModalClick::Next),
            PageMessage::ModalGoto { index } => self.carousel.handle_click(ModalClick::Indicator(index)),
            PageMessage::ModalClose => self.carousel.handle_click(ModalClick::CloseButton),
            PageMessage::ModalBackdrop => self.carousel.handle_click(ModalClick::Backdrop),
            PageMessage::ImageLoaded { generation, slot } => {
                self.carousel
                    .report_load(generation, slot, LoadOutcome::Loaded)
            }
            PageMessage::ImageFailed { generation, slot } => {
                self.carousel
                    .report_load(generation, slot, LoadOutcome::Failed)
            }
            PageMessage::Key { key } => {
                if let Some(key) = ModalKey::from_key(&key) {
                    self.carousel.handle_key(key);
                }
            }
            PageMessage::GalleryPrev { card } => {
                if let Some(active) = self.galleries.prev(card) {
                    self.show_gallery(card, active);
                }
            }
            PageMessage::GalleryNext { card } => {
                if let Some(active) = self.galleries.next(card) {
                    self.show_gallery(card, active);
                }
            }
            PageMessage::Scroll(metrics) => self.scrolled(metrics),
            PageMessage::Anchor {
                href,
                element_top,
                page_offset,
            } => {
                if let Some(top) = anchor_target(&href, element_top, page_offset) {
                    self.script.call("folio.page.scrollTo", &[json!(top)]);
                }
            }
            PageMessage::BackToTop => self.script.call("folio.page.scrollTo", &[json!(0)]),
            PageMessage::MenuToggle => {
                let open = self.menu.toggle();
                self.toggle_class(".nav-links", "active", open);
            }
            PageMessage::MenuLink => {
                if self.menu.is_open() {
                    self.menu.close();
                    self.toggle_class(".nav-links", "active", false);
                }
            }
            PageMessage::ReadMoreMeasured { card, height } => match ReadMore::measure(height) {
                Some(state) => {
                    self.read_more.insert(card, state);
                    self.script
                        .call("folio.readMore.clamp", &[json!(card), json!(READ_MORE_MAX_HEIGHT)]);
                }
                None => {
                    self.read_more.remove(&card);
                    self.script.call("folio.readMore.hide", &[json!(card)]);
                }
            },
            PageMessage::ReadMoreToggle { card, height } => {
                let labels = &self.settings.labels;
                match self.read_more.get_mut(&card) {
                    Some(state) => {
                        let update = state.toggle(height, &labels.read_more, &labels.read_less);
                        self.script.call(
                            "folio.readMore.set",
                            &[
                                json!(card),
                                json!(update.max_height),
                                json!(update.expanded),
                                json!(update.label),
                            ],
                        );
                    }
                    None => debug!("card {card}: read-more toggle without a clamped description"),
                }
            }
            PageMessage::Reveal {
                kind,
                index,
                progress,
            } => match kind {
                RevealKind::Fade => self.script.call("folio.page.reveal", &[json!(index)]),
                RevealKind::Skill => match skill_width(&progress) {
                    Some(width) => self.script.call("folio.page.skill", &[json!(index), json!(width)]),
                    None => warn!("skill {index}: unreadable progress {progress:?}"),
                },
            },
            PageMessage::IntroDismiss => {
                if self.intro.dismiss() {
                    self.script.call("folio.intro.hide", &[]);
                }
            }
            PageMessage::FieldBlur { field, value } => {
                self.mark_field(field, on_blur(field, &value));
            }
            PageMessage::FieldInput {
                field,
                value,
                had_error,
            } => {
                self.mark_field(field, on_input(field, &value, had_error));
            }
            PageMessage::Submit(form) => {
                match form.mailto(&self.settings.contact_address, &self.settings.labels.contact_subject) {
                    Ok(link) => {
                        for field in Field::ALL {
                            self.mark_field(field, false);
                        }
                        self.script
                            .call("folio.form.sending", &[json!(self.settings.labels.sending)]);
                        effects.push(Effect::SendMail(link));
                    }
                    Err(ContactError::Invalid(invalid)) => {
                        debug!("contact form rejected: {invalid:?}");
                        for field in Field::ALL {
                            self.mark_field(field, invalid.contains(&field));
                        }
                    }
                }
            }
            PageMessage::ExternalLink { url } => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    effects.push(Effect::OpenUrl(url));
                } else {
                    warn!("Ignoring external link {url:?}");
                }
            }
            PageMessage::CloseWindow => effects.push(Effect::CloseWindow),
            PageMessage::QuitApp => effects.push(Effect::Quit),
        }

        if let Some(script) = self.drain_script() {
            effects.insert(0, Effect::Script(script));
        }
        effects
    }

    /// Advance autoplay galleries whose timer expired.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        for (card, active) in self.galleries.tick(now) {
            self.show_gallery(card, active);
        }
        self.drain_script()
    }

    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if visible != self.galleries.is_visible() {
            debug!("window visible: {visible}");
        }
        self.galleries.set_visible(visible, now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.galleries.next_deadline()
    }

    /// The mail client accepted the link.
    pub fn mail_opened(&mut self) -> Option<String> {
        self.script
            .call("folio.form.done", &[json!(self.settings.labels.thanks)]);
        self.drain_script()
    }

    /// The mail client could not be launched. `copied` tells whether the
    /// link reached the clipboard instead.
    pub fn mail_failed(&mut self, link: &str, copied: bool) -> Option<String> {
        let notice = if copied {
            self.settings.labels.clipboard_fallback.clone()
        } else {
            link.to_string()
        };
        self.script.call("folio.form.notice", &[json!(notice)]);
        self.drain_script()
    }

    fn open_project(&mut self, card: usize) {
        let Some(project) = self.portfolio.project(card) else {
            warn!("No project card {card}");
            return;
        };
        match self.carousel.open(&project.image_refs()) {
            Ok(count) => info!("Opened {:?} with {count} images", project.title),
            Err(e) => warn!("Cannot open {:?}: {e}", project.title),
        }
    }

    fn show_gallery(&mut self, card: usize, active: usize) {
        self.script
            .call("folio.gallery.show", &[json!(card), json!(active)]);
    }

    fn scrolled(&mut self, metrics: ScrollMetrics) {
        self.script
            .call("folio.page.progress", &[json!(metrics.progress_percent())]);

        let flags = (metrics.navbar_scrolled(), metrics.back_to_top_visible());
        if self.scroll_flags == Some(flags) {
            return;
        }
        self.scroll_flags = Some(flags);
        self.toggle_class(".navbar", "scrolled", flags.0);
        self.toggle_class(".back-to-top", "show", flags.1);
    }

    fn toggle_class(&mut self, selector: &str, class: &str, on: bool) {
        self.script
            .call("folio.page.toggle", &[json!(selector), json!(class), json!(on)]);
    }

    fn mark_field(&mut self, field: Field, error: bool) {
        self.script
            .call("folio.form.mark", &[json!(field.id()), json!(error)]);
    }

    /// Page updates queued by the app and the carousel, in one script.
    fn drain_script(&mut self) -> Option<String> {
        let page = self.script.take();
        let modal = self.carousel.view_mut().take();
        match (page, modal) {
            (Some(page), Some(modal)) => Some(format!("{modal}\n{page}")),
            (page, modal) => page.or(modal),
        }
    }
}

/// The rebuilt page shows the overlay again whenever settings enable it.
fn intro_for(settings: &Settings) -> IntroOverlay {
    let mut intro = IntroOverlay::default();
    if !settings.intro_overlay {
        intro.dismiss();
    }
    intro
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactForm;
    use std::time::Duration;

    const SAMPLE: &str = r#"# Iris

Hola.

## Proyectos

### Galería

![Uno](Img/g/uno.png)
![Dos](Img/g/dos.png)
![Tres](Img/g/tres.png)

### Sin imágenes

Texto.

### Externo

![Solo](Img/solo.png)

[Demo](https://example.com)

## Habilidades

- Rust: 90
"#;

    fn app() -> (App, Instant) {
        let now = Instant::now();
        let settings = Settings {
            contact_address: "iris@example.com".to_string(),
            ..Settings::default()
        };
        let app = App::new(
            Portfolio::parse(SAMPLE),
            settings,
            PageOrigin::new("folio", "localhost"),
            now,
        );
        (app, now)
    }

    fn script(effects: &[Effect]) -> &str {
        match effects.first() {
            Some(Effect::Script(script)) => script,
            other => panic!("expected a script, got {other:?}"),
        }
    }

    #[test]
    fn test_open_project_mounts_images() {
        let (mut app, _) = app();
        let effects = app.handle(PageMessage::OpenProject { card: 0 });
        let script = script(&effects);
        assert!(script.contains(r#"folio.modal.mount(1,0,"folio://localhost/Img/g/uno.png","Vista 1 del proyecto")"#));
        assert!(script.contains(r#"folio.modal.mount(1,2,"folio://localhost/Img/g/tres.png","Vista 3 del proyecto")"#));
        assert!(script.ends_with("folio.modal.show(true);"));
        assert!(app.carousel().is_open());
        assert_eq!(app.carousel().len(), 3);
    }

    #[test]
    fn test_open_project_without_images_is_a_noop() {
        let (mut app, _) = app();
        let effects = app.handle(PageMessage::OpenProject { card: 1 });
        assert!(effects.is_empty());
        assert!(!app.carousel().is_open());
        assert!(app.handle(PageMessage::OpenProject { card: 40 }).is_empty());
    }

    #[test]
    fn test_modal_navigation_and_keys() {
        let (mut app, _) = app();
        app.handle(PageMessage::OpenProject { card: 0 });

        let effects = app.handle(PageMessage::ModalPrev);
        assert!(script(&effects).contains("folio.modal.offset(-200);"));
        assert_eq!(app.carousel().index(), 2);

        app.handle(PageMessage::Key {
            key: "ArrowRight".to_string(),
        });
        assert_eq!(app.carousel().index(), 0);

        app.handle(PageMessage::ModalGoto { index: 1 });
        assert_eq!(app.carousel().index(), 1);

        app.handle(PageMessage::Key { key: "Escape".to_string() });
        assert!(!app.carousel().is_open());
    }

    #[test]
    fn test_stale_image_failure_is_ignored() {
        let (mut app, _) = app();
        app.handle(PageMessage::OpenProject { card: 0 });
        app.handle(PageMessage::ModalClose);
        app.handle(PageMessage::OpenProject { card: 2 });

        let stale = app.handle(PageMessage::ImageFailed { generation: 1, slot: 0 });
        assert!(stale.is_empty());

        let fresh = app.handle(PageMessage::ImageFailed { generation: 2, slot: 0 });
        assert!(script(&fresh).starts_with("folio.modal.failed(0,\"data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_gallery_buttons_and_autoplay() {
        let (mut app, now) = app();
        assert_eq!(app.galleries().len(), 1);

        let effects = app.handle(PageMessage::GalleryPrev { card: 0 });
        assert_eq!(script(&effects), "folio.gallery.show(0,2);");
        assert!(app.handle(PageMessage::GalleryNext { card: 2 }).is_empty());

        let deadline = app.next_deadline().unwrap();
        assert_eq!(deadline, now + Duration::from_secs(5));
        assert_eq!(app.tick(deadline).as_deref(), Some("folio.gallery.show(0,0);"));

        app.set_visible(false, deadline);
        assert!(app.next_deadline().is_none());
        assert!(app.tick(deadline + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn test_scroll_toggles_only_on_change() {
        let (mut app, _) = app();
        let metrics = |top| {
            PageMessage::Scroll(ScrollMetrics {
                top,
                scroll_height: 2000.0,
                client_height: 1000.0,
            })
        };

        let first = app.handle(metrics(500.0));
        let first = script(&first);
        assert!(first.contains("folio.page.progress(50.0);"));
        assert!(first.contains(r#"folio.page.toggle(".navbar","scrolled",true);"#));
        assert!(first.contains(r#"folio.page.toggle(".back-to-top","show",true);"#));

        let second = app.handle(metrics(600.0));
        assert_eq!(script(&second), "folio.page.progress(60.0);");

        let top = app.handle(metrics(0.0));
        assert!(script(&top).contains(r#"folio.page.toggle(".navbar","scrolled",false);"#));
    }

    #[test]
    fn test_read_more_cycle() {
        let (mut app, _) = app();
        let short = app.handle(PageMessage::ReadMoreMeasured { card: 0, height: 90 });
        assert_eq!(script(&short), "folio.readMore.hide(0);");
        assert!(app
            .handle(PageMessage::ReadMoreToggle { card: 0, height: 90 })
            .is_empty());

        let long = app.handle(PageMessage::ReadMoreMeasured { card: 1, height: 400 });
        assert_eq!(script(&long), "folio.readMore.clamp(1,160);");

        let open = app.handle(PageMessage::ReadMoreToggle { card: 1, height: 420 });
        assert_eq!(script(&open), r#"folio.readMore.set(1,420,true,"VER MENOS");"#);
        let shut = app.handle(PageMessage::ReadMoreToggle { card: 1, height: 420 });
        assert_eq!(script(&shut), r#"folio.readMore.set(1,160,false,"VER MÁS");"#);
    }

    #[test]
    fn test_anchor_menu_and_reveal() {
        let (mut app, _) = app();
        let anchor = app.handle(PageMessage::Anchor {
            href: "#proyectos".to_string(),
            element_top: 300.0,
            page_offset: 100.0,
        });
        assert_eq!(script(&anchor), "folio.page.scrollTo(320.0);");

        let opened = app.handle(PageMessage::MenuToggle);
        assert_eq!(script(&opened), r#"folio.page.toggle(".nav-links","active",true);"#);
        let link = app.handle(PageMessage::MenuLink);
        assert_eq!(script(&link), r#"folio.page.toggle(".nav-links","active",false);"#);
        assert!(app.handle(PageMessage::MenuLink).is_empty());

        let skill = app.handle(PageMessage::Reveal {
            kind: RevealKind::Skill,
            index: 0,
            progress: "90".to_string(),
        });
        assert_eq!(script(&skill), "folio.page.skill(0,90);");
    }

    #[test]
    fn test_intro_dismisses_once() {
        let (mut app, _) = app();
        let first = app.handle(PageMessage::IntroDismiss);
        assert_eq!(script(&first), "folio.intro.hide();");
        assert!(app.handle(PageMessage::IntroDismiss).is_empty());
    }

    #[test]
    fn test_submit_invalid_marks_fields() {
        let (mut app, _) = app();
        let effects = app.handle(PageMessage::Submit(ContactForm::new("Ana", "nope", "")));
        assert_eq!(effects.len(), 1);
        let script = script(&effects);
        assert!(script.contains(r#"folio.form.mark("name",false);"#));
        assert!(script.contains(r#"folio.form.mark("email",true);"#));
        assert!(script.contains(r#"folio.form.mark("message",true);"#));
    }

    #[test]
    fn test_submit_valid_sends_mail() {
        let (mut app, _) = app();
        let effects = app.handle(PageMessage::Submit(ContactForm::new(
            "Ana",
            "ana@example.com",
            "Hola",
        )));
        assert!(script(&effects).contains(r#"folio.form.sending("✓ Enviando...");"#));
        match &effects[1] {
            Effect::SendMail(link) => assert!(link.starts_with("mailto:iris@example.com?subject=")),
            other => panic!("expected mail, got {other:?}"),
        }

        assert!(app.mail_opened().unwrap().starts_with("folio.form.done("));
        let fallback = app.mail_failed("mailto:x", true).unwrap();
        assert!(fallback.contains("portapapeles"));
        assert_eq!(app.mail_failed("mailto:x", false).as_deref(), Some(r#"folio.form.notice("mailto:x");"#));
    }

    #[test]
    fn test_window_and_link_effects() {
        let (mut app, _) = app();
        assert_eq!(app.handle(PageMessage::CloseWindow), vec![Effect::CloseWindow]);
        assert_eq!(app.handle(PageMessage::QuitApp), vec![Effect::Quit]);
        assert_eq!(
            app.handle(PageMessage::ExternalLink {
                url: "https://example.com".to_string()
            }),
            vec![Effect::OpenUrl("https://example.com".to_string())]
        );
        assert!(app
            .handle(PageMessage::ExternalLink {
                url: "file:///etc/passwd".to_string()
            })
            .is_empty());
    }

    #[test]
    fn test_reload_resets_page_state() {
        let (mut app, now) = app();
        app.handle(PageMessage::OpenProject { card: 0 });
        app.handle(PageMessage::ReadMoreMeasured { card: 1, height: 400 });

        let page = app.reload(Portfolio::parse("# Nuevo\n"), now);
        assert!(page.contains("<title>Nuevo</title>"));
        assert!(!app.carousel().is_open());
        assert!(app.galleries().is_empty());
        assert!(app
            .handle(PageMessage::ReadMoreToggle { card: 1, height: 400 })
            .is_empty());
    }

    #[test]
    fn test_reload_shows_intro_again() {
        let (mut app, now) = app();
        assert_eq!(script(&app.handle(PageMessage::IntroDismiss)), "folio.intro.hide();");

        let page = app.reload(Portfolio::parse(SAMPLE), now);
        assert!(page.contains(r#"id="start-overlay""#));
        let effects = app.handle(PageMessage::IntroDismiss);
        assert_eq!(script(&effects), "folio.intro.hide();");
    }

    #[test]
    fn test_reload_keeps_intro_off_when_disabled() {
        let now = Instant::now();
        let settings = Settings {
            intro_overlay: false,
            ..Settings::default()
        };
        let mut app = App::new(Portfolio::parse(SAMPLE), settings, PageOrigin::new("folio", "localhost"), now);
        app.reload(Portfolio::parse(SAMPLE), now);
        assert!(app.handle(PageMessage::IntroDismiss).is_empty());
    }
}
