//! Which page section is "in focus" for navigation highlighting.
use serde::{Deserialize, Serialize};

/// Vertical extent of a section in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    #[must_use]
    pub fn new(id: &str, top: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            top,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

/// The part of the viewport left after reserving `margin` pixels top and bottom
/// for fixed navigation, plus the fraction a section must cover there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalBand {
    pub margin: f64,
    pub threshold: f64,
}

impl FocalBand {
    /// Covered fraction given raw heights.
    ///
    /// Sections taller than the band are measured against the band so they can
    /// still qualify.
    #[must_use]
    pub fn ratio_from_heights(intersection: f64, target: f64, band: f64) -> f64 {
        let basis = target.min(band);
        if basis <= 0.0 || intersection <= 0.0 {
            return 0.0;
        }
        (intersection / basis).min(1.0)
    }

    #[must_use]
    pub fn visible_ratio(&self, section: &SectionBounds, viewport: Viewport) -> f64 {
        let band_top = viewport.scroll_y + self.margin;
        let band_bottom = viewport.scroll_y + viewport.height - self.margin;
        let overlap = band_bottom.min(section.top + section.height) - band_top.max(section.top);
        Self::ratio_from_heights(overlap, section.height, band_bottom - band_top)
    }

    #[must_use]
    pub fn qualifies(&self, ratio: f64) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }
}

/// One intersection report for a section.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionSample {
    pub id: String,
    pub ratio: f64,
}

/// Holds the single active section id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTracker {
    active: Option<String>,
}

impl SectionTracker {
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Mark `id` active. Returns `true` when the active section changed.
    pub fn activate(&mut self, id: &str) -> bool {
        if id.is_empty() || self.active.as_deref() == Some(id) {
            return false;
        }
        self.active = Some(id.to_string());
        true
    }

    /// Apply a batch of reports in order; the last qualifying one wins.
    pub fn observe(&mut self, band: FocalBand, samples: &[IntersectionSample]) -> bool {
        samples
            .iter()
            .rev()
            .find(|sample| band.qualifies(sample.ratio))
            .is_some_and(|sample| self.activate(&sample.id))
    }

    /// Recompute from layout, as after a resize.
    pub fn observe_layout(
        &mut self,
        band: FocalBand,
        sections: &[SectionBounds],
        viewport: Viewport,
    ) -> bool {
        let samples: Vec<IntersectionSample> = sections
            .iter()
            .map(|section| IntersectionSample {
                id: section.id.clone(),
                ratio: band.visible_ratio(section, viewport),
            })
            .collect();
        self.observe(band, &samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: FocalBand = FocalBand {
        margin: 80.0,
        threshold: 0.3,
    };

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("about", 0.0, 600.0),
            SectionBounds::new("how-it-works", 600.0, 600.0),
            SectionBounds::new("packages", 1200.0, 600.0),
        ]
    }

    #[test]
    fn ratio_respects_reserved_margin() {
        let viewport = Viewport {
            scroll_y: 0.0,
            height: 800.0,
        };
        let sections = page();
        // band is 80..720: about covers 80..600 of its 600px
        let about = BAND.visible_ratio(&sections[0], viewport);
        assert!((about - 520.0 / 600.0).abs() < 1e-9);
        let how = BAND.visible_ratio(&sections[1], viewport);
        assert!((how - 120.0 / 600.0).abs() < 1e-9);
        assert_eq!(BAND.visible_ratio(&sections[2], viewport), 0.0);
    }

    #[test]
    fn tall_sections_measure_against_band() {
        let tall = SectionBounds::new("showcase", 0.0, 5000.0);
        let viewport = Viewport {
            scroll_y: 1000.0,
            height: 800.0,
        };
        assert!((BAND.visible_ratio(&tall, viewport) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn last_qualifying_sample_wins() {
        let mut tracker = SectionTracker::default();
        let samples = vec![
            IntersectionSample {
                id: "about".into(),
                ratio: 0.5,
            },
            IntersectionSample {
                id: "packages".into(),
                ratio: 0.1,
            },
            IntersectionSample {
                id: "how-it-works".into(),
                ratio: 0.3,
            },
        ];
        assert!(tracker.observe(BAND, &samples));
        assert_eq!(tracker.active(), Some("how-it-works"));
        assert!(!tracker.observe(BAND, &samples));
    }

    #[test]
    fn layout_scroll_selects_middle_section() {
        let mut tracker = SectionTracker::default();
        let viewport = Viewport {
            scroll_y: 500.0,
            height: 800.0,
        };
        // band 580..1220: how-it-works covers 600..1200 fully, packages only 20px
        assert!(tracker.observe_layout(BAND, &page(), viewport));
        assert_eq!(tracker.active(), Some("how-it-works"));
    }

    #[test]
    fn nothing_qualifying_keeps_previous() {
        let mut tracker = SectionTracker::default();
        tracker.activate("about");
        let samples = vec![IntersectionSample {
            id: "packages".into(),
            ratio: 0.05,
        }];
        assert!(!tracker.observe(BAND, &samples));
        assert_eq!(tracker.active(), Some("about"));
    }
}
