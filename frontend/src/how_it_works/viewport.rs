use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::tracker::Signal;

/// Attribute every step element carries with its 0-based index.
pub const STEP_INDEX_ATTR: &str = "data-step-index";

/// Viewport inset in percent, CSS order: top, right, bottom, left.
/// Negative values shrink the observed area, positive ones grow it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub fn to_css(&self) -> String {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .map(|value| {
                if *value == 0.0 {
                    "0px".to_string()
                } else {
                    format!("{}%", value)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Focus,
    Completion,
}

/// A region of the viewport a set of targets is observed against.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportRegion {
    pub kind: RegionKind,
    pub margin: RootMargin,
    pub thresholds: Vec<f64>,
}

impl ViewportRegion {
    /// Middle 20% band: inset 40% from the top and from the bottom.
    pub fn focus_band() -> Self {
        Self {
            kind: RegionKind::Focus,
            margin: RootMargin { top: -40.0, right: 0.0, bottom: -40.0, left: 0.0 },
            thresholds: vec![0.0],
        }
    }

    /// Top half of the viewport. The closing step is often too short to ever
    /// reach the middle band.
    pub fn final_step_band() -> Self {
        Self {
            kind: RegionKind::Focus,
            margin: RootMargin { top: 0.0, right: 0.0, bottom: -50.0, left: 0.0 },
            thresholds: vec![0.0, 0.5, 1.0],
        }
    }

    /// Whole viewport plus 20% below it, so completion fires slightly before
    /// the element has fully left.
    pub fn completion_band() -> Self {
        Self {
            kind: RegionKind::Completion,
            margin: RootMargin { top: 0.0, right: 0.0, bottom: 20.0, left: 0.0 },
            thresholds: vec![0.0],
        }
    }
}

/// One geometry notification for one observed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    /// Parsed from [`STEP_INDEX_ATTR`]; `None` when missing or malformed.
    pub step_index: Option<usize>,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
    /// Top edge of the target relative to the viewport, in CSS pixels.
    pub bounding_top: f64,
}

impl VisibilityEntry {
    /// Translates a raw entry into a tracker signal for the region it was
    /// observed against.
    pub fn signal(&self, kind: RegionKind) -> Option<Signal> {
        let index = self.step_index?;
        match kind {
            RegionKind::Focus if self.is_intersecting => Some(Signal::Focus(index)),
            RegionKind::Completion if !self.is_intersecting && self.bounding_top < 0.0 => {
                Some(Signal::Completed(index))
            }
            _ => None,
        }
    }
}

pub fn parse_step_index(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse().ok())
}

pub type EntryCallback = Rc<dyn Fn(&[VisibilityEntry])>;

/// Something that reports when targets cross into or out of a viewport
/// region. Entries may arrive batched and in any order.
pub trait VisibilityObserver {
    type Target;

    fn observe(&mut self, targets: &[Self::Target], region: &ViewportRegion, on_change: EntryCallback);

    /// Drops every registration. Must be safe to call more than once.
    fn unobserve_all(&mut self);
}

struct Registration {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// Browser adapter backed by one `IntersectionObserver` per registered
/// region.
#[derive(Default)]
pub struct IntersectionViewport {
    registrations: Vec<Registration>,
}

impl IntersectionViewport {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(
        &mut self,
        targets: &[Element],
        region: &ViewportRegion,
        on_change: EntryCallback,
    ) -> Result<(), JsValue> {
        let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            let batch: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| VisibilityEntry {
                    step_index: parse_step_index(entry.target().get_attribute(STEP_INDEX_ATTR).as_deref()),
                    intersection_ratio: entry.intersection_ratio(),
                    is_intersecting: entry.is_intersecting(),
                    bounding_top: entry.bounding_client_rect().top(),
                })
                .collect();
            on_change(&batch);
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let thresholds: Array = region.thresholds.iter().map(|t| JsValue::from_f64(*t)).collect();
        let options = IntersectionObserverInit::new();
        options.set_root_margin(&region.margin.to_css());
        options.set_threshold(&thresholds);

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for target in targets {
            observer.observe(target);
        }
        self.registrations.push(Registration {
            observer,
            _callback: callback,
        });
        Ok(())
    }
}

impl VisibilityObserver for IntersectionViewport {
    type Target = Element;

    fn observe(&mut self, targets: &[Element], region: &ViewportRegion, on_change: EntryCallback) {
        if targets.is_empty() {
            return;
        }
        if let Err(e) = self.register(targets, region, on_change) {
            log::warn!("IntersectionObserver unavailable: {:?}", e);
        }
    }

    fn unobserve_all(&mut self) {
        for registration in self.registrations.drain(..) {
            registration.observer.disconnect();
        }
    }
}

impl Drop for IntersectionViewport {
    fn drop(&mut self) {
        self.unobserve_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(step_index: Option<usize>, is_intersecting: bool, bounding_top: f64) -> VisibilityEntry {
        VisibilityEntry {
            step_index,
            intersection_ratio: if is_intersecting { 0.5 } else { 0.0 },
            is_intersecting,
            bounding_top,
        }
    }

    #[test]
    fn regions_render_as_root_margins() {
        assert_eq!(ViewportRegion::focus_band().margin.to_css(), "-40% 0px -40% 0px");
        assert_eq!(ViewportRegion::final_step_band().margin.to_css(), "0px 0px -50% 0px");
        assert_eq!(ViewportRegion::completion_band().margin.to_css(), "0px 0px 20% 0px");
        assert_eq!(ViewportRegion::final_step_band().thresholds, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn focus_region_reports_entering_targets_only() {
        assert_eq!(entry(Some(2), true, 300.0).signal(RegionKind::Focus), Some(Signal::Focus(2)));
        assert_eq!(entry(Some(2), false, 300.0).signal(RegionKind::Focus), None);
    }

    #[test]
    fn completion_requires_leaving_through_the_top() {
        assert_eq!(
            entry(Some(1), false, -120.0).signal(RegionKind::Completion),
            Some(Signal::Completed(1))
        );
        // Leaving through the bottom while scrolling up is not progress.
        assert_eq!(entry(Some(1), false, 900.0).signal(RegionKind::Completion), None);
        assert_eq!(entry(Some(1), true, -10.0).signal(RegionKind::Completion), None);
    }

    #[test]
    fn malformed_index_is_ignored() {
        assert_eq!(parse_step_index(Some("3")), Some(3));
        assert_eq!(parse_step_index(Some(" 1 ")), Some(1));
        assert_eq!(parse_step_index(Some("three")), None);
        assert_eq!(parse_step_index(Some("-1")), None);
        assert_eq!(parse_step_index(None), None);
        assert_eq!(entry(None, true, 0.0).signal(RegionKind::Focus), None);
    }
}
