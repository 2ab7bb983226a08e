use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::io::tip_store::{DatastoreError, TipDatastore};
use crate::model::config::TipsConfig;
use crate::model::tip::{
    DisplayFrequency, Invalidation, InvalidationReason, TipDisplayRecord, TipId,
};
use crate::ops::board::BoardAction;

use super::engine::{RuleEngine, TipDefinition};
use super::input::RuleInput;

/// Error type for presenter operations
#[derive(Debug, thiserror::Error)]
pub enum TipError {
    #[error("tip datastore error: {0}")]
    Datastore(#[from] DatastoreError),
    #[error("tips are already configured; reset the datastore first")]
    AlreadyConfigured,
}

/// Per-tip display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipState {
    Hidden,
    Shown,
    /// Dismissed or acted upon; stays until the datastore is reset
    Suppressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipTransition {
    pub tip: TipId,
    pub from: TipState,
    pub to: TipState,
}

/// Decides which eligible tips are on screen.
///
/// A tip is shown when its rules hold, it was never dismissed or acted upon,
/// it is not disabled, and the display frequency allows it. All shown inline
/// tips are visible at once; at most one popover is shown at a time, the
/// first in catalog order.
pub struct TipPresenter {
    engine: RuleEngine,
    store: Box<dyn TipDatastore>,
    records: BTreeMap<TipId, TipDisplayRecord>,
    states: BTreeMap<TipId, TipState>,
    config: TipsConfig,
    configured: bool,
}

impl TipPresenter {
    /// Load display history from `store`. A store that cannot be read is
    /// logged and treated as empty.
    pub fn new(engine: RuleEngine, store: Box<dyn TipDatastore>) -> Self {
        let records = store.load_all().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load tip records");
            BTreeMap::new()
        });
        let states = engine
            .tips()
            .iter()
            .map(|tip| {
                let shown = records.get(&tip.id).is_some_and(|r| r.already_shown());
                let state = if shown {
                    TipState::Suppressed
                } else {
                    TipState::Hidden
                };
                (tip.id, state)
            })
            .collect();
        TipPresenter {
            engine,
            store,
            records,
            states,
            config: TipsConfig::default(),
            configured: false,
        }
    }

    /// Apply display options. Fails if already configured since the last
    /// datastore reset.
    pub fn configure(&mut self, config: TipsConfig) -> Result<(), TipError> {
        if self.configured {
            return Err(TipError::AlreadyConfigured);
        }
        tracing::info!(frequency = ?config.display_frequency, "tips configured");
        self.config = config;
        self.configured = true;
        Ok(())
    }

    pub fn config(&self) -> &TipsConfig {
        &self.config
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn state(&self, id: TipId) -> TipState {
        self.states.get(&id).copied().unwrap_or(TipState::Hidden)
    }

    pub fn record(&self, id: TipId) -> Option<&TipDisplayRecord> {
        self.records.get(&id)
    }

    /// True once the tip was dismissed or acted upon in this datastore epoch
    pub fn already_shown(&self, id: TipId) -> bool {
        self.records.get(&id).is_some_and(|r| r.already_shown())
    }

    /// Whether the tip is on screen after the last [`sync`](Self::sync)
    pub fn should_display(&self, id: TipId) -> bool {
        self.state(id) == TipState::Shown
    }

    /// The popover currently on screen, if any
    pub fn visible_popover(&self) -> Option<&'static TipDefinition> {
        self.engine
            .tips()
            .iter()
            .find(|tip| tip.is_popover() && self.should_display(tip.id))
    }

    /// Inline tips currently on screen, in catalog order
    pub fn visible_inline(&self) -> Vec<&'static TipDefinition> {
        self.engine
            .tips()
            .iter()
            .filter(|tip| !tip.is_popover() && self.should_display(tip.id))
            .collect()
    }

    /// Re-evaluate every tip against a fresh snapshot
    pub fn sync(&mut self, input: &RuleInput) -> Vec<TipTransition> {
        self.sync_at(input, Utc::now())
    }

    pub fn sync_at(&mut self, input: &RuleInput, now: DateTime<Utc>) -> Vec<TipTransition> {
        let mut transitions = Vec::new();
        let tips = self.engine.tips();

        // Hide tips that lost eligibility first so a freed popover slot can
        // be taken by the next tip in the same pass.
        for tip in tips {
            self.records.entry(tip.id).or_default();
            if self.state(tip.id) == TipState::Shown && !self.offered(tip.id, input) {
                transitions.push(self.set_state(tip.id, TipState::Hidden));
            }
        }

        for tip in tips {
            if self.state(tip.id) != TipState::Hidden {
                continue;
            }
            if self.display_limit_reached(tip.id) {
                self.invalidate(tip.id, InvalidationReason::DisplayCountExceeded, now);
                transitions.push(self.set_state(tip.id, TipState::Suppressed));
                continue;
            }
            if !self.offered(tip.id, input) || !self.frequency_allows(tip.id, now) {
                continue;
            }
            if tip.is_popover() && self.visible_popover().is_some() {
                continue;
            }
            let record = self.records.entry(tip.id).or_default();
            record.first_shown_at.get_or_insert(now);
            record.last_shown_at = Some(now);
            record.display_count += 1;
            self.persist(tip.id);
            transitions.push(self.set_state(tip.id, TipState::Shown));
        }

        for t in &transitions {
            tracing::debug!(tip = %t.tip, from = ?t.from, to = ?t.to, "tip transition");
        }
        transitions
    }

    /// User closed a visible tip
    pub fn dismiss(&mut self, id: TipId) -> Option<TipTransition> {
        self.dismiss_at(id, Utc::now())
    }

    pub fn dismiss_at(&mut self, id: TipId, now: DateTime<Utc>) -> Option<TipTransition> {
        if self.state(id) != TipState::Shown {
            return None;
        }
        self.invalidate(id, InvalidationReason::TipClosed, now);
        let transition = self.set_state(id, TipState::Suppressed);
        tracing::info!(tip = %id, "tip dismissed");
        Some(transition)
    }

    /// Suppress every visible tip that suggested `action`
    pub fn action_performed(&mut self, action: BoardAction) -> Vec<TipTransition> {
        let now = Utc::now();
        let matching: Vec<TipId> = self
            .engine
            .tips()
            .iter()
            .filter(|tip| tip.action == Some(action) && self.should_display(tip.id))
            .map(|tip| tip.id)
            .collect();
        matching
            .into_iter()
            .map(|id| {
                self.invalidate(id, InvalidationReason::ActionPerformed, now);
                tracing::info!(tip = %id, ?action, "tip acted upon");
                self.set_state(id, TipState::Suppressed)
            })
            .collect()
    }

    /// Forget all display history and re-arm every tip.
    ///
    /// In-memory state is always reset; the error only reports that the
    /// backing store could not be cleared. Display frequency returns to
    /// immediate and the presenter may be configured again.
    pub fn reset_datastore(&mut self) -> Result<(), TipError> {
        let result = self.store.clear().map_err(TipError::from);
        self.records.clear();
        for state in self.states.values_mut() {
            *state = TipState::Hidden;
        }
        self.config.display_frequency = DisplayFrequency::Immediate;
        self.configured = false;
        tracing::info!("tip datastore reset");
        result
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Eligible and not disabled
    fn offered(&self, id: TipId, input: &RuleInput) -> bool {
        !self.config.disabled.contains(&id) && self.engine.is_eligible(id, input)
    }

    fn display_limit_reached(&self, id: TipId) -> bool {
        match (self.config.max_display_count, self.records.get(&id)) {
            (Some(max), Some(record)) => record.display_count >= max,
            _ => false,
        }
    }

    /// No other tip appeared within the configured interval
    fn frequency_allows(&self, id: TipId, now: DateTime<Utc>) -> bool {
        let interval = self.config.display_frequency.interval();
        if interval.is_zero() {
            return true;
        }
        self.records
            .iter()
            .filter(|(other, _)| **other != id)
            .filter_map(|(_, r)| r.last_shown_at)
            .max()
            .is_none_or(|last| now - last >= interval)
    }

    fn invalidate(&mut self, id: TipId, reason: InvalidationReason, at: DateTime<Utc>) {
        let record = self.records.entry(id).or_default();
        record.invalidation = Some(Invalidation { reason, at });
        self.persist(id);
    }

    fn persist(&mut self, id: TipId) {
        if let Some(record) = self.records.get(&id)
            && let Err(e) = self.store.save(id, record)
        {
            tracing::warn!(tip = %id, error = %e, "could not save tip record");
        }
    }

    fn set_state(&mut self, id: TipId, to: TipState) -> TipTransition {
        let from = self.states.insert(id, to).unwrap_or(TipState::Hidden);
        TipTransition { tip: id, from, to }
    }
}
