//! One-shot animations fired when an element first scrolls into view.
//!
//! The host observes each registered element with [`RevealAnimator::thresholds`]
//! and forwards every notification as an [`IntersectionEntry`]. The first
//! entry whose ratio reaches the element's threshold moves it from
//! [`RevealState::Pending`] to [`RevealState::Triggered`]; later entries for
//! that element are ignored and the host is told to stop observing it.

use std::collections::BTreeMap;

use folio_protocol::{ElementId, Target, ViewCommand};

use crate::config::{CounterConfig, RevealConfig};
use crate::counter::CounterRamp;
use crate::schedule::{Effects, TimerTask};

const REVEAL_ATTR: &str = "data-reveal";
const DELAY_VAR: &str = "--reveal-delay";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealKind {
    /// `.fade-in*` entrance animation.
    Fade,
    /// `.skill-item` progress bar.
    SkillBar,
    /// `.stat-number` numeric ramp.
    Counter,
}

/// Registration data for one animated element, captured at mount.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealSpec {
    pub id: ElementId,
    pub kind: RevealKind,
    /// Position among siblings for grid children that animate in sequence.
    pub stagger_index: Option<usize>,
    /// Original text content; counters read their target from it.
    pub text: String,
}

impl RevealSpec {
    pub fn fade(id: u32) -> Self {
        Self {
            id: ElementId(id),
            kind: RevealKind::Fade,
            stagger_index: None,
            text: String::new(),
        }
    }

    pub fn staggered(id: u32, index: usize) -> Self {
        Self {
            stagger_index: Some(index),
            ..Self::fade(id)
        }
    }

    pub fn skill_bar(id: u32) -> Self {
        Self {
            kind: RevealKind::SkillBar,
            ..Self::fade(id)
        }
    }

    pub fn counter(id: u32, text: impl Into<String>) -> Self {
        Self {
            kind: RevealKind::Counter,
            text: text.into(),
            ..Self::fade(id)
        }
    }
}

const NO_MARGIN: &str = "0px";

/// Observer settings for one animated element.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub element: ElementId,
    pub threshold: f64,
    pub root_margin: String,
}

/// A visibility notification from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub element: ElementId,
    /// Fraction of the element inside the viewport, `0.0..=1.0`.
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Triggered,
}

#[derive(Debug, Clone)]
struct AnimatedElement {
    spec: RevealSpec,
    state: RevealState,
}

pub struct RevealAnimator {
    elements: BTreeMap<ElementId, AnimatedElement>,
    counters: BTreeMap<ElementId, CounterRamp>,
    reveal: RevealConfig,
    counter: CounterConfig,
}

impl RevealAnimator {
    pub fn new(specs: impl IntoIterator<Item = RevealSpec>, reveal: RevealConfig, counter: CounterConfig) -> Self {
        let elements = specs
            .into_iter()
            .map(|spec| {
                (
                    spec.id,
                    AnimatedElement {
                        spec,
                        state: RevealState::Pending,
                    },
                )
            })
            .collect();
        Self {
            elements,
            counters: BTreeMap::new(),
            reveal,
            counter,
        }
    }

    pub fn threshold(&self, kind: RevealKind) -> f64 {
        match kind {
            RevealKind::Fade => self.reveal.fade_threshold,
            RevealKind::SkillBar => self.reveal.skill_threshold,
            RevealKind::Counter => self.reveal.counter_threshold,
        }
    }

    pub fn root_margin(&self, kind: RevealKind) -> &str {
        match kind {
            RevealKind::Fade => &self.reveal.fade_root_margin,
            RevealKind::SkillBar | RevealKind::Counter => NO_MARGIN,
        }
    }

    /// How the host should observe each element.
    pub fn observations(&self) -> Vec<Observation> {
        self.elements
            .values()
            .map(|e| Observation {
                element: e.spec.id,
                threshold: self.threshold(e.spec.kind),
                root_margin: self.root_margin(e.spec.kind).to_string(),
            })
            .collect()
    }

    pub fn state(&self, id: ElementId) -> Option<RevealState> {
        self.elements.get(&id).map(|e| e.state)
    }

    /// Initial presentation: fade targets start hidden until triggered.
    pub fn mount(&self) -> Vec<ViewCommand> {
        self.elements
            .values()
            .filter(|e| e.spec.kind == RevealKind::Fade)
            .map(|e| ViewCommand::set_attribute(Target::Element(e.spec.id), REVEAL_ATTR, "pending"))
            .collect()
    }

    pub fn on_intersection(&mut self, entry: IntersectionEntry) -> Effects {
        let mut effects = Effects::new();
        let Some(threshold) = self
            .elements
            .get(&entry.element)
            .map(|e| self.threshold(e.spec.kind))
        else {
            tracing::debug!(element = entry.element.0, "intersection for unregistered element");
            return effects;
        };
        let Some(element) = self.elements.get_mut(&entry.element) else {
            return effects;
        };
        if element.state == RevealState::Triggered || entry.ratio <= 0.0 || entry.ratio < threshold {
            return effects;
        }
        element.state = RevealState::Triggered;

        let target = Target::Element(element.spec.id);
        match element.spec.kind {
            RevealKind::Fade => {
                if let Some(index) = element.spec.stagger_index {
                    let delay = index as f64 * self.reveal.stagger_unit_secs;
                    effects.push(ViewCommand::set_var(target.clone(), DELAY_VAR, format_seconds(delay)));
                }
                effects.push(ViewCommand::set_attribute(target.clone(), REVEAL_ATTR, "revealed"));
            }
            RevealKind::SkillBar => {
                effects.push(ViewCommand::set_var(
                    target.clone(),
                    DELAY_VAR,
                    format_seconds(self.reveal.skill_delay_secs),
                ));
                effects.push(ViewCommand::add_class(target.clone(), "animate-skill"));
            }
            RevealKind::Counter => {
                let ramp = CounterRamp::from_display(&element.spec.text, &self.counter);
                tracing::debug!(element = element.spec.id.0, target = ramp.target(), "counter ramp started");
                self.counters.insert(element.spec.id, ramp);
                effects.after(self.counter.step_ms, TimerTask::CounterStep(element.spec.id));
            }
        }
        effects.push(ViewCommand::Unobserve { target });
        effects
    }

    /// Advance a running counter by one step.
    pub fn on_counter_step(&mut self, id: ElementId) -> Effects {
        let mut effects = Effects::new();
        let Some(ramp) = self.counters.get_mut(&id) else {
            return effects;
        };
        let value = ramp.tick();
        effects.push(ViewCommand::set_text(Target::Element(id), ramp.format(value)));
        if ramp.is_done() {
            self.counters.remove(&id);
        } else {
            effects.after(self.counter.step_ms, TimerTask::CounterStep(id));
        }
        effects
    }

    /// Drop running counters; their pending steps become no-ops.
    pub fn cancel_counters(&mut self) {
        self.counters.clear();
    }
}

/// `0.30000000000000004` → `"0.3s"`.
fn format_seconds(secs: f64) -> String {
    let rounded = (secs * 1000.0).round() / 1000.0;
    format!("{rounded}s")
}
