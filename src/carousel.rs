//! Modal image carousel.
//!
//! The controller owns one viewing session at a time and talks to the page
//! only through [`CarouselView`], so the navigation logic runs the same
//! against the webview and against a recording view in tests.

use log::{debug, error, info, warn};

use crate::paths::PathResolver;
use crate::placeholder::placeholder_data_uri;

/// Result of one image load, as reported by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Visual state of a single image view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    /// Fully visible, no failure treatment.
    Loaded,
    /// Source swapped for the placeholder, desaturated, with a tooltip.
    Failed {
        placeholder: String,
        alt: String,
        tooltip: String,
    },
}

/// Rendering surface of the modal.
pub trait CarouselView {
    /// Toggle the modal's `open` class and the page scroll lock.
    fn show_modal(&mut self, open: bool);
    /// Create an image view for `slot`, initially at opacity 0.
    fn mount_image(&mut self, generation: u64, slot: usize, src: &str, alt: &str);
    fn set_image_state(&mut self, slot: usize, state: &ImageState);
    /// Horizontal offset of the strip, in percent.
    fn set_offset(&mut self, percent: i64);
    /// Rebuild the indicator dots. `count == 0` removes them all.
    fn set_indicators(&mut self, count: usize, active: usize);
    /// Hide or show both the prev/next controls and the indicators.
    fn set_controls_hidden(&mut self, hidden: bool);
    /// Remove every image view and indicator.
    fn clear(&mut self);
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("no images to show")]
    NoImages,
    #[error("none of the {0} image references could be resolved")]
    NoUsableImages(usize),
}

/// Keys the modal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

impl ModalKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" | "Esc" => Some(Self::Escape),
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

/// Clickable parts of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    Prev,
    Next,
    CloseButton,
    /// The dimmed area around the content.
    Backdrop,
    Indicator(usize),
}

/// Text templates; `{n}` is replaced by the 1-based image number.
#[derive(Debug, Clone)]
pub struct CarouselLabels {
    pub image_alt: String,
    pub image_unavailable: String,
    pub load_failed_tooltip: String,
}

impl Default for CarouselLabels {
    fn default() -> Self {
        Self {
            image_alt: "Vista {n} del proyecto".to_string(),
            image_unavailable: "Imagen {n} no disponible".to_string(),
            load_failed_tooltip: "Error: No se pudo cargar la imagen".to_string(),
        }
    }
}

fn fill(template: &str, n: usize) -> String {
    template.replace("{n}", &n.to_string())
}

struct Session {
    generation: u64,
    images: Vec<String>,
    outcomes: Vec<Option<LoadOutcome>>,
    index: usize,
}

pub struct CarouselController<V: CarouselView> {
    view: V,
    resolver: PathResolver,
    labels: CarouselLabels,
    session: Option<Session>,
    generation: u64,
}

impl<V: CarouselView> CarouselController<V> {
    pub fn new(view: V, resolver: PathResolver) -> Self {
        Self {
            view,
            resolver,
            labels: CarouselLabels::default(),
            session: None,
            generation: 0,
        }
    }

    pub fn with_labels(mut self, labels: CarouselLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Current index; 0 while closed.
    pub fn index(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.index)
    }

    /// Resolved image URLs of the open session; empty while closed.
    pub fn images(&self) -> &[String] {
        self.session
            .as_ref()
            .map(|s| s.images.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.images().len()
    }

    pub fn is_empty(&self) -> bool {
        self.images().is_empty()
    }

    /// Generation of the open session, if any.
    pub fn generation(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.generation)
    }

    pub fn outcome(&self, slot: usize) -> Option<LoadOutcome> {
        self.session
            .as_ref()
            .and_then(|s| s.outcomes.get(slot).copied().flatten())
    }

    /// Start a session over `references`. On error nothing changes, an
    /// already open session included.
    pub fn open<S: AsRef<str>>(&mut self, references: &[S]) -> Result<usize, CarouselError> {
        if references.is_empty() {
            error!("open: no images to show");
            return Err(CarouselError::NoImages);
        }

        info!("Opening modal with {} image reference(s)", references.len());

        let images: Vec<String> = self
            .resolver
            .resolve_all(references)
            .into_iter()
            .filter(|src| !src.is_empty())
            .collect();

        if images.is_empty() {
            error!("open: none of the {} references resolved", references.len());
            return Err(CarouselError::NoUsableImages(references.len()));
        }

        if self.session.is_some() {
            debug!("open: replacing the current session");
            self.view.clear();
        }

        self.generation += 1;
        let count = images.len();
        self.session = Some(Session {
            generation: self.generation,
            outcomes: vec![None; count],
            images,
            index: 0,
        });

        self.render();
        self.view.show_modal(true);
        Ok(count)
    }

    fn render(&mut self) {
        let Some(session) = &self.session else {
            return;
        };

        self.view.clear();
        for (slot, src) in session.images.iter().enumerate() {
            let alt = fill(&self.labels.image_alt, slot + 1);
            self.view.mount_image(session.generation, slot, src, &alt);
        }
        self.view.set_controls_hidden(session.images.len() <= 1);
        self.update_position();
    }

    fn update_position(&mut self) {
        let Some(session) = &self.session else {
            return;
        };

        self.view.set_offset(-(session.index as i64) * 100);
        if session.images.len() <= 1 {
            self.view.set_indicators(0, 0);
        } else {
            self.view.set_indicators(session.images.len(), session.index);
        }
    }

    fn step(&mut self, forward: bool) {
        let Some(session) = &mut self.session else {
            return;
        };

        let len = session.images.len();
        session.index = if forward {
            (session.index + 1) % len
        } else {
            (session.index + len - 1) % len
        };
        self.update_position();
    }

    pub fn next(&mut self) {
        self.step(true);
    }

    pub fn prev(&mut self) {
        self.step(false);
    }

    pub fn go_to(&mut self, index: usize) {
        let Some(session) = &mut self.session else {
            return;
        };

        if index >= session.images.len() {
            debug!("go_to: index {index} out of range, ignored");
            return;
        }
        session.index = index;
        self.update_position();
    }

    pub fn close(&mut self) {
        if self.session.take().is_some() {
            info!("Closing modal");
        }
        self.view.show_modal(false);
        self.view.clear();
    }

    /// Apply a load outcome for `slot`. Outcomes from an older session, for
    /// unknown slots, or arriving after the slot already failed are ignored.
    pub fn report_load(&mut self, generation: u64, slot: usize, outcome: LoadOutcome) {
        let Some(session) = &mut self.session else {
            debug!("report_load: modal closed, ignoring slot {slot}");
            return;
        };

        if session.generation != generation {
            debug!(
                "report_load: stale generation {generation} (current {})",
                session.generation
            );
            return;
        }

        let total = session.images.len();
        let Some(previous) = session.outcomes.get_mut(slot) else {
            warn!("report_load: slot {slot} outside session of {total}");
            return;
        };

        // The placeholder firing its own load event must not undo the failure.
        if *previous == Some(LoadOutcome::Failed) {
            return;
        }
        *previous = Some(outcome);

        let src = &session.images[slot];
        let n = slot + 1;
        match outcome {
            LoadOutcome::Loaded => {
                debug!("[{n}/{total}] loaded {src}");
                self.view.set_image_state(slot, &ImageState::Loaded);
            }
            LoadOutcome::Failed => {
                error!("[{n}/{total}] failed to load {src}");
                let label = fill(&self.labels.image_unavailable, n);
                let state = ImageState::Failed {
                    placeholder: placeholder_data_uri(&label),
                    tooltip: format!("{}\nOriginal: {}", self.labels.load_failed_tooltip, src),
                    alt: label,
                };
                self.view.set_image_state(slot, &state);
            }
        }
    }

    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: ModalKey) -> bool {
        if !self.is_open() {
            return false;
        }

        match key {
            ModalKey::Escape => self.close(),
            ModalKey::ArrowLeft => self.prev(),
            ModalKey::ArrowRight => self.next(),
        }
        true
    }

    pub fn handle_click(&mut self, click: ModalClick) {
        if !self.is_open() {
            return;
        }

        match click {
            ModalClick::Prev => self.prev(),
            ModalClick::Next => self.next(),
            ModalClick::CloseButton | ModalClick::Backdrop => self.close(),
            ModalClick::Indicator(index) => self.go_to(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{NameOverrides, PageOrigin};

    #[derive(Default)]
    struct CountingView {
        mounted: usize,
        offset: i64,
        open: bool,
    }

    impl CarouselView for CountingView {
        fn show_modal(&mut self, open: bool) {
            self.open = open;
        }
        fn mount_image(&mut self, _generation: u64, _slot: usize, _src: &str, _alt: &str) {
            self.mounted += 1;
        }
        fn set_image_state(&mut self, _slot: usize, _state: &ImageState) {}
        fn set_offset(&mut self, percent: i64) {
            self.offset = percent;
        }
        fn set_indicators(&mut self, _count: usize, _active: usize) {}
        fn set_controls_hidden(&mut self, _hidden: bool) {}
        fn clear(&mut self) {
            self.mounted = 0;
        }
    }

    fn controller() -> CarouselController<CountingView> {
        let resolver = PathResolver::new(NameOverrides::new(), PageOrigin::new("https", "example.com"));
        CarouselController::new(CountingView::default(), resolver)
    }

    #[test]
    fn test_open_empty_is_noop() {
        let mut c = controller();
        assert_eq!(c.open::<&str>(&[]), Err(CarouselError::NoImages));
        assert_eq!(c.open(&["", "  "]), Err(CarouselError::NoUsableImages(2)));
        assert!(!c.is_open());
        assert!(!c.view().open);
    }

    #[test]
    fn test_failed_open_keeps_current_session() {
        let mut c = controller();
        c.open(&["a.png", "b.png"]).unwrap();
        c.next();
        assert!(c.open::<&str>(&[]).is_err());
        assert_eq!(c.index(), 1);
        assert_eq!(c.view().mounted, 2);
    }

    #[test]
    fn test_offset_follows_index() {
        let mut c = controller();
        c.open(&["a.png", "b.png", "c.png"]).unwrap();
        c.go_to(2);
        assert_eq!(c.view().offset, -200);
        c.go_to(7);
        assert_eq!(c.index(), 2);
        c.prev();
        assert_eq!(c.view().offset, -100);
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut c = controller();
        assert!(!c.handle_key(ModalKey::ArrowRight));
        c.next();
        c.prev();
        c.go_to(1);
        assert_eq!(c.index(), 0);
        assert!(!c.is_open());
    }

    #[test]
    fn test_modal_key_parsing() {
        assert_eq!(ModalKey::from_key("Escape"), Some(ModalKey::Escape));
        assert_eq!(ModalKey::from_key("ArrowLeft"), Some(ModalKey::ArrowLeft));
        assert_eq!(ModalKey::from_key("Right"), Some(ModalKey::ArrowRight));
        assert_eq!(ModalKey::from_key("a"), None);
    }
}
