//! Notifications pushed to observers while a hand runs.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cards::Card;
use crate::engine::RoundResult;
use crate::game::Stage;

/// Observer hooks invoked by [`crate::engine::Engine`].
///
/// Every method has a no-op default, so an implementor only overrides what
/// it cares about. Callbacks run synchronously inside the engine call that
/// caused them.
pub trait EngineListener {
    /// The hand moved to `stage`; `community` is the full board so far.
    fn on_stage_changed(&mut self, _stage: Stage, _community: &[Card]) {}

    /// A seat's street bet or stack changed.
    fn on_player_bet_changed(&mut self, _seat: usize, _bet: u32, _chips: u32) {}

    /// Chips have been paid out and the engine is idle again.
    fn on_round_ended(&mut self, _result: &RoundResult) {}
}

/// One notification, as captured by [`EventLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    StageChanged { stage: Stage, community: Vec<Card> },
    BetChanged { seat: usize, bet: u32, chips: u32 },
    RoundEnded { winners: Vec<usize>, pot: u32 },
}

/// Listener that records every notification in memory.
///
/// Clones share the same buffer, so one handle can be boxed into the engine
/// while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    fn push(&self, event: GameEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl EngineListener for EventLog {
    fn on_stage_changed(&mut self, stage: Stage, community: &[Card]) {
        self.push(GameEvent::StageChanged {
            stage,
            community: community.to_vec(),
        });
    }

    fn on_player_bet_changed(&mut self, seat: usize, bet: u32, chips: u32) {
        self.push(GameEvent::BetChanged { seat, bet, chips });
    }

    fn on_round_ended(&mut self, result: &RoundResult) {
        self.push(GameEvent::RoundEnded {
            winners: result.winners(),
            pot: result.pot,
        });
    }
}
