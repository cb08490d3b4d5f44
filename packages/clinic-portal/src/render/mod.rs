//! Renderização de cartões (médicos) e linhas (consultas)
//!
//! Funções puras: mesma entidade e mesma sessão, mesmo fragmento.

pub mod card;
pub mod row;

pub use card::{doctor_card, CardAction};
pub use row::appointment_row;

use crate::dom::{Element, Fragment};

/// Fragmento renderizado com a ação disponível para o papel atual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Chave da entidade no contêiner
    pub key: String,
    pub node: Element,
    pub action: Option<CardAction>,
}

impl Card {
    pub fn into_fragment(self) -> Fragment {
        Fragment {
            key: Some(self.key),
            node: self.node,
        }
    }
}
