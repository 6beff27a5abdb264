//! Game phase controller.
//!
//! Owns the current `GamePhase`. The phase only moves through
//! `on_zoom_level_changed`, and turns can only be ended from the
//! Strategic phase.

use imperium_campaign::Campaign;
use imperium_core::enums::GamePhase;
use imperium_core::events::PhaseEvent;
use imperium_sim::camera::zoom::game_phase_at;

#[derive(Debug, Clone, Default)]
pub struct GameMode {
    phase: GamePhase,
    events: Vec<PhaseEvent>,
}

impl GameMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Re-derive the phase from the camera's zoom scalar.
    pub fn on_zoom_level_changed(&mut self, zoom: f32) {
        self.set_phase(game_phase_at(zoom));
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        let old = self.phase;
        self.phase = phase;
        tracing::info!(?old, new = ?phase, "game phase changed");
        self.events.push(PhaseEvent::PhaseChanged { old, new: phase });
    }

    /// End the strategic turn and let the campaign resolve it.
    pub fn end_turn(&self, campaign: &mut Campaign) -> bool {
        if self.phase != GamePhase::Strategic {
            tracing::warn!(phase = ?self.phase, "cannot end turn outside of Strategic phase");
            return false;
        }
        campaign.process_turn()
    }

    pub fn drain_events(&mut self) -> Vec<PhaseEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imperium_core::enums::FactionId;

    #[test]
    fn phase_event_only_on_change() {
        let mut mode = GameMode::new();
        mode.on_zoom_level_changed(0.1);
        mode.on_zoom_level_changed(0.3);
        assert!(mode.drain_events().is_empty());

        mode.on_zoom_level_changed(0.5);
        mode.on_zoom_level_changed(0.9);
        assert_eq!(
            mode.drain_events(),
            vec![
                PhaseEvent::PhaseChanged {
                    old: GamePhase::Strategic,
                    new: GamePhase::Tactical
                },
                PhaseEvent::PhaseChanged {
                    old: GamePhase::Tactical,
                    new: GamePhase::FirstPerson
                },
            ]
        );
        assert_eq!(mode.phase(), GamePhase::FirstPerson);
    }

    #[test]
    fn end_turn_only_in_strategic_phase() {
        let mut campaign = Campaign::default();
        campaign.start(FactionId::Rome);
        let mut mode = GameMode::new();

        mode.on_zoom_level_changed(0.7);
        assert!(!mode.end_turn(&mut campaign));
        assert_eq!(campaign.current_turn(), 1);

        mode.on_zoom_level_changed(0.2);
        assert!(mode.end_turn(&mut campaign));
        assert_eq!(campaign.current_turn(), 2);
    }
}
