use crate::model::{LookupFailure, WeatherViewModel};

/// What a host UI shows after the latest applied lookup.
///
/// One tagged value instead of separate nullable result and error fields,
/// so "exactly one of success or failure after a completed lookup" holds
/// by construction.
#[derive(Debug, Clone, Default)]
pub enum LookupState {
    /// Pre-query: nothing looked up yet.
    #[default]
    Idle,
    Success(WeatherViewModel),
    Failure(LookupFailure),
}

impl LookupState {
    pub fn view_model(&self) -> Option<&WeatherViewModel> {
        match self {
            LookupState::Success(vm) => Some(vm),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&LookupFailure> {
        match self {
            LookupState::Failure(f) => Some(f),
            _ => None,
        }
    }
}

/// Tag handed out when a lookup starts; presented again to apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Owns the displayed [`LookupState`] and enforces the stale-result policy:
/// each started lookup gets a generation tag, and only the most recently
/// started one may write the state. Results of superseded lookups are
/// dropped, never applied out of order.
#[derive(Debug, Default)]
pub struct LookupTracker {
    state: LookupState,
    latest: u64,
}

impl LookupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Register a newly started lookup, superseding any in flight.
    pub fn begin(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// Apply a completed lookup's outcome if it is still the latest.
    ///
    /// Returns whether the state was written; a stale generation leaves
    /// the state untouched.
    pub fn apply(
        &mut self,
        generation: Generation,
        outcome: Result<WeatherViewModel, LookupFailure>,
    ) -> bool {
        if generation.0 != self.latest {
            return false;
        }

        self.state = match outcome {
            Ok(vm) => LookupState::Success(vm),
            Err(failure) => LookupState::Failure(failure),
        };
        true
    }
}
