//! Dashboard View State
//!
//! In-memory model of the page: city selector, predict trigger, result
//! panel and visualization panel. Locks are never held across an await.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::model::PredictionResult;

/// One entry of the city selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn city(name: &str) -> Self {
        Self {
            value: name.to_string(),
            label: name.to_string(),
        }
    }
}

/// City selector with a leading placeholder option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitySelector {
    options: Vec<SelectOption>,
    selected: String,
}

impl CitySelector {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            options: vec![SelectOption {
                value: String::new(),
                label: placeholder.into(),
            }],
            selected: String::new(),
        }
    }

    /// Replace every option after the placeholder, keeping the given order
    ///
    /// The selection falls back to the placeholder if the selected city is
    /// no longer offered.
    pub fn replace_cities(&mut self, cities: &[String]) {
        self.options.truncate(1);
        self.options.extend(cities.iter().map(|c| SelectOption::city(c)));

        if !self.contains(&self.selected) {
            self.selected.clear();
        }
    }

    /// Select an offered value; returns false if it is not offered
    pub fn select(&mut self, value: &str) -> bool {
        if self.contains(value) {
            self.selected = value.to_string();
            true
        } else {
            false
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// City names, without the placeholder
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.options[1..].iter().map(|o| o.value.as_str())
    }

    /// Selected value; empty when the placeholder is selected
    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn selected_city(&self) -> Option<&str> {
        if self.selected.is_empty() {
            None
        } else {
            Some(&self.selected)
        }
    }
}

/// Score and category display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub visible: bool,
    pub score_text: String,
    pub score_class: String,
    pub category_text: String,
    pub category_class: String,
}

impl Default for ResultPanel {
    fn default() -> Self {
        Self {
            visible: false,
            score_text: String::new(),
            score_class: "score".to_string(),
            category_text: String::new(),
            category_class: "category".to_string(),
        }
    }
}

impl ResultPanel {
    fn show(&mut self, result: &PredictionResult) {
        self.score_text = result.display_score();
        self.score_class = result.score_class();
        self.category_text = result.category.clone();
        self.category_class = result.category_badge_class();
        self.visible = true;
    }
}

/// Result panel plus visualization panel visibility
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panels {
    pub result: ResultPanel,
    pub visualization_visible: bool,
}

/// Loading state of the predict button
///
/// Counts in-flight submissions; the control is loading and disabled while
/// the count is non-zero.
#[derive(Debug, Clone, Default)]
pub struct TriggerControl {
    in_flight: Arc<AtomicUsize>,
}

impl TriggerControl {
    /// Mark a submission as in flight until the guard is dropped
    pub fn engage(&self) -> TriggerGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        TriggerGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn is_disabled(&self) -> bool {
        self.is_loading()
    }
}

/// Releases the trigger on drop, including during unwinding
#[derive(Debug)]
pub struct TriggerGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Point-in-time copy of the whole view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub selector: CitySelector,
    pub panels: Panels,
    pub trigger_loading: bool,
    pub trigger_disabled: bool,
}

/// Shared view state
#[derive(Debug)]
pub struct DashboardView {
    selector: RwLock<CitySelector>,
    panels: RwLock<Panels>,
    trigger: TriggerControl,
}

impl DashboardView {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            selector: RwLock::new(CitySelector::new(placeholder)),
            panels: RwLock::new(Panels::default()),
            trigger: TriggerControl::default(),
        }
    }

    pub fn trigger(&self) -> &TriggerControl {
        &self.trigger
    }

    pub async fn selector(&self) -> CitySelector {
        self.selector.read().await.clone()
    }

    /// Replace the city options and optionally select one
    pub async fn set_cities(&self, cities: &[String], select: Option<&str>) -> bool {
        let mut selector = self.selector.write().await;
        selector.replace_cities(cities);
        select.map(|city| selector.select(city)).unwrap_or(false)
    }

    pub async fn select_city(&self, city: &str) -> bool {
        self.selector.write().await.select(city)
    }

    pub async fn panels(&self) -> Panels {
        self.panels.read().await.clone()
    }

    /// Hide the result and visualization panels
    pub async fn hide_panels(&self) {
        let mut panels = self.panels.write().await;
        panels.result.visible = false;
        panels.visualization_visible = false;
    }

    /// Fill in and reveal the result and visualization panels
    pub async fn show_result(&self, result: &PredictionResult) {
        self.show_result_if(result, || true).await;
    }

    /// Like `show_result`, but only if `still_current()` holds under the
    /// panels lock. Returns whether the panels were updated.
    pub async fn show_result_if<F>(&self, result: &PredictionResult, still_current: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        let mut panels = self.panels.write().await;
        if !still_current() {
            return false;
        }
        panels.result.show(result);
        panels.visualization_visible = true;
        true
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            selector: self.selector().await,
            panels: self.panels().await,
            trigger_loading: self.trigger.is_loading(),
            trigger_disabled: self.trigger.is_disabled(),
        }
    }
}
