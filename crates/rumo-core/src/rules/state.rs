//! Operational state classification

use crate::models::{CaixaStatus, Checkin, Energia, OperationalState, Pressao};

/// Classify a check-in into an operational state.
///
/// First match wins:
/// 1. critico cash → CRITICAL
/// 2. atencao cash with baixa energy → CRITICAL
/// 3. tranquilo cash, alta energy, pressure not alta → ATTACK
/// 4. everything else → CAUTION
pub fn classify_state(checkin: &Checkin) -> OperationalState {
    match (checkin.caixa_status, checkin.energia, checkin.pressao) {
        (CaixaStatus::Critico, _, _) => OperationalState::Critical,
        (CaixaStatus::Atencao, Energia::Baixa, _) => OperationalState::Critical,
        (CaixaStatus::Tranquilo, Energia::Alta, p) if p != Pressao::Alta => {
            OperationalState::Attack
        }
        _ => OperationalState::Caution,
    }
}
