//! Legionary equipment: testudo formation and a small stock of pila.

use imperium_core::constants::{
    LEGIONARY_MAX_PILA, PILUM_DAMAGE, PILUM_RANGE, TESTUDO_MELEE_DEFENSE_BONUS,
    TESTUDO_RANGED_DEFENSE_BONUS, TESTUDO_SPEED_FACTOR,
};
use imperium_core::enums::FormationType;
use serde::{Deserialize, Serialize};

use super::Combatant;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegionaryKit {
    in_testudo: bool,
    pub max_pila: u32,
    pila: u32,
    pub pilum_damage: f32,
    pub pilum_range: f32,
}

impl Default for LegionaryKit {
    fn default() -> Self {
        Self {
            in_testudo: false,
            max_pila: LEGIONARY_MAX_PILA,
            pila: LEGIONARY_MAX_PILA,
            pilum_damage: PILUM_DAMAGE,
            pilum_range: PILUM_RANGE,
        }
    }
}

impl LegionaryKit {
    pub fn in_testudo(&self) -> bool {
        self.in_testudo
    }

    pub fn pila(&self) -> u32 {
        self.pila
    }

    /// Lock shields. Returns false if already in testudo or dead.
    pub fn activate_testudo(&mut self, unit: &mut Combatant) -> bool {
        if self.in_testudo || !unit.is_alive() {
            return false;
        }
        unit.set_formation(
            FormationType::Testudo,
            TESTUDO_MELEE_DEFENSE_BONUS,
            TESTUDO_RANGED_DEFENSE_BONUS,
            TESTUDO_SPEED_FACTOR,
        );
        self.in_testudo = true;
        true
    }

    /// Break formation. Returns false if not in testudo.
    pub fn deactivate_testudo(&mut self, unit: &mut Combatant) -> bool {
        if !self.in_testudo {
            return false;
        }
        unit.set_formation(FormationType::None, 0, 0, 1.0);
        self.in_testudo = false;
        true
    }

    /// Throw one pilum. Returns its raw ranged damage, or `None` when out of
    /// pila, dead or short of stamina. Range is checked by the caller.
    pub fn throw_pilum(&mut self, unit: &mut Combatant) -> Option<f32> {
        if self.pila == 0 || !unit.is_alive() {
            return None;
        }
        if !unit.spend_stamina(unit.pilum_stamina_cost()) {
            return None;
        }
        self.pila -= 1;
        Some(self.pilum_damage)
    }

    pub fn resupply(&mut self) {
        self.pila = self.max_pila;
    }
}
