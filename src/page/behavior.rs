//! Small page behaviors outside the carousel: scroll effects, read-more
//! blocks, anchors, skill bars, the mobile menu and the intro overlay.

use serde::Deserialize;

pub const NAVBAR_SCROLLED_AFTER: f64 = 50.0;
pub const BACK_TO_TOP_AFTER: f64 = 300.0;
pub const NAVBAR_HEIGHT: f64 = 80.0;
pub const READ_MORE_MAX_HEIGHT: u32 = 160;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScrollMetrics {
    pub top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Scrolled share of the page in percent, 0 when the page fits.
    pub fn progress_percent(&self) -> f64 {
        let range = self.scroll_height - self.client_height;
        if range <= 0.0 {
            return 0.0;
        }
        (self.top / range * 100.0).clamp(0.0, 100.0)
    }

    pub fn navbar_scrolled(&self) -> bool {
        self.top > NAVBAR_SCROLLED_AFTER
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.top > BACK_TO_TOP_AFTER
    }
}

/// Where a smooth-scroll anchor lands, or `None` for `#` and empty links.
pub fn anchor_target(href: &str, element_top: f64, page_offset: f64) -> Option<f64> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some((element_top + page_offset - NAVBAR_HEIGHT).max(0.0)),
        _ => None,
    }
}

/// Parse a `data-progress` value into a width percentage.
pub fn skill_width(progress: &str) -> Option<u8> {
    let value: f64 = progress.trim().trim_end_matches('%').trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(0.0, 100.0).round() as u8)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadMoreUpdate {
    pub max_height: u32,
    pub expanded: bool,
    pub label: String,
}

/// Expand/collapse state of one project description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadMore {
    expanded: bool,
}

impl ReadMore {
    /// `None` when the content fits and the button should be hidden.
    pub fn measure(content_height: u32) -> Option<Self> {
        if content_height <= READ_MORE_MAX_HEIGHT {
            return None;
        }
        Some(Self { expanded: false })
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip the state. `content_height` is the freshly measured height.
    pub fn toggle(&mut self, content_height: u32, more: &str, less: &str) -> ReadMoreUpdate {
        self.expanded = !self.expanded;
        if self.expanded {
            ReadMoreUpdate {
                max_height: content_height,
                expanded: true,
                label: less.to_string(),
            }
        } else {
            ReadMoreUpdate {
                max_height: READ_MORE_MAX_HEIGHT,
                expanded: false,
                label: more.to_string(),
            }
        }
    }
}

/// Mobile navigation menu.
#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// One-shot overlay shown before the page is usable.
#[derive(Debug, Clone)]
pub struct IntroOverlay {
    shown: bool,
}

impl Default for IntroOverlay {
    fn default() -> Self {
        Self { shown: true }
    }
}

impl IntroOverlay {
    /// Hide the overlay. True only for the call that actually hid it.
    pub fn dismiss(&mut self) -> bool {
        std::mem::replace(&mut self.shown, false)
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_progress() {
        let m = ScrollMetrics {
            top: 250.0,
            scroll_height: 1500.0,
            client_height: 1000.0,
        };
        assert_eq!(m.progress_percent(), 50.0);
        assert!(m.navbar_scrolled());
        assert!(!m.back_to_top_visible());

        let fits = ScrollMetrics {
            top: 0.0,
            scroll_height: 800.0,
            client_height: 900.0,
        };
        assert_eq!(fits.progress_percent(), 0.0);
        assert!(!fits.navbar_scrolled());
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#proyectos", 500.0, 100.0), Some(520.0));
        assert_eq!(anchor_target("#top", 10.0, 0.0), Some(0.0));
        assert_eq!(anchor_target("#", 500.0, 0.0), None);
        assert_eq!(anchor_target("", 500.0, 0.0), None);
        assert_eq!(anchor_target("https://x.com", 500.0, 0.0), None);
    }

    #[test]
    fn test_skill_width() {
        assert_eq!(skill_width("85"), Some(85));
        assert_eq!(skill_width(" 70% "), Some(70));
        assert_eq!(skill_width("140"), Some(100));
        assert_eq!(skill_width("abc"), None);
    }

    #[test]
    fn test_read_more_toggle() {
        assert!(ReadMore::measure(160).is_none());

        let mut block = ReadMore::measure(420).unwrap();
        let update = block.toggle(420, "VER MÁS", "VER MENOS");
        assert_eq!(update.max_height, 420);
        assert!(update.expanded);
        assert_eq!(update.label, "VER MENOS");

        let update = block.toggle(420, "VER MÁS", "VER MENOS");
        assert_eq!(update.max_height, READ_MORE_MAX_HEIGHT);
        assert!(!block.is_expanded());
        assert_eq!(update.label, "VER MÁS");
    }

    #[test]
    fn test_intro_overlay_dismisses_once() {
        let mut overlay = IntroOverlay::default();
        assert!(overlay.is_shown());
        assert!(overlay.dismiss());
        assert!(!overlay.dismiss());
        assert!(!overlay.is_shown());
    }

    #[test]
    fn test_nav_menu() {
        let mut menu = NavMenu::default();
        assert!(menu.toggle());
        menu.close();
        assert!(!menu.is_open());
    }
}
