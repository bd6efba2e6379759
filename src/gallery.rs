//! Per-card inline galleries that cycle on their own timer.

use std::time::{Duration, Instant};

use log::debug;

pub const DEFAULT_AUTOPLAY: Duration = Duration::from_secs(5);

/// What the page offers for one project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub image_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone)]
pub struct InlineGallery {
    card: usize,
    count: usize,
    active: usize,
    next_advance: Instant,
}

impl InlineGallery {
    /// `None` for cards without images or without both nav buttons.
    pub fn new(card: usize, layout: CardLayout, now: Instant, interval: Duration) -> Option<Self> {
        if layout.image_count == 0 || !layout.has_prev || !layout.has_next {
            return None;
        }

        Some(Self {
            card,
            count: layout.image_count,
            active: 0,
            next_advance: now + interval,
        })
    }

    pub fn card(&self) -> usize {
        self.card
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn next(&mut self) -> usize {
        self.active = (self.active + 1) % self.count;
        self.active
    }

    pub fn prev(&mut self) -> usize {
        self.active = (self.active + self.count - 1) % self.count;
        self.active
    }
}

/// Every gallery on the page plus the shared autoplay clock.
#[derive(Debug, Clone)]
pub struct GallerySet {
    galleries: Vec<InlineGallery>,
    interval: Duration,
    visible: bool,
}

impl GallerySet {
    pub fn new(interval: Duration) -> Self {
        Self {
            galleries: Vec::new(),
            interval,
            visible: true,
        }
    }

    /// Build galleries for every card that qualifies.
    pub fn from_layouts(layouts: &[CardLayout], interval: Duration, now: Instant) -> Self {
        let mut set = Self::new(interval);
        for (card, layout) in layouts.iter().enumerate() {
            match InlineGallery::new(card, *layout, now, interval) {
                Some(gallery) => set.galleries.push(gallery),
                None => debug!("card {card}: no inline gallery"),
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.galleries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.galleries.is_empty()
    }

    pub fn get(&self, card: usize) -> Option<&InlineGallery> {
        self.galleries.iter().find(|g| g.card == card)
    }

    fn get_mut(&mut self, card: usize) -> Option<&mut InlineGallery> {
        self.galleries.iter_mut().find(|g| g.card == card)
    }

    /// Returns the new active image, or `None` if the card has no gallery.
    pub fn next(&mut self, card: usize) -> Option<usize> {
        self.get_mut(card).map(InlineGallery::next)
    }

    pub fn prev(&mut self, card: usize) -> Option<usize> {
        self.get_mut(card).map(InlineGallery::prev)
    }

    /// Pause or resume autoplay. Resuming restarts every timer from `now`.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if visible && !self.visible {
            for gallery in &mut self.galleries {
                gallery.next_advance = now + self.interval;
            }
        }
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Earliest pending advance, if autoplay is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.visible {
            return None;
        }
        self.galleries.iter().map(|g| g.next_advance).min()
    }

    /// Advance every gallery whose timer expired. Returns `(card, active)`
    /// for each gallery that moved.
    pub fn tick(&mut self, now: Instant) -> Vec<(usize, usize)> {
        if !self.visible {
            return Vec::new();
        }

        let interval = self.interval;
        let mut changed = Vec::new();
        for gallery in &mut self.galleries {
            if gallery.next_advance <= now {
                let active = gallery.next();
                // Skip missed ticks instead of replaying them.
                while gallery.next_advance <= now {
                    gallery.next_advance += interval;
                }
                changed.push((gallery.card, active));
            }
        }
        changed
    }
}
