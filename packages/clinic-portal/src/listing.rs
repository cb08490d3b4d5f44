//! Controlador de listagem e filtro
//!
//! Cada mudança de filtro dispara uma nova busca completa. O controlador
//! numera as buscas e descarta respostas que chegam depois de uma busca mais
//! nova já ter sido emitida.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::api::ApiResult;
use crate::dom::{Container, Element, Fragment};
use crate::models::{Appointment, Doctor};
use crate::render::{appointment_row, doctor_card, row::message_row, Card, CardAction};
use crate::session::SessionState;
use crate::ui::Ui;

/// Entidade exibida por um [`ListController`]
pub trait Listing {
    /// Busca bem-sucedida sem resultados, salvo outro texto no controlador
    const EMPTY_TEXT: &'static str;
    /// Busca que falhou
    const ERROR_TEXT: &'static str;

    fn container() -> Container;
    fn card(&self, session: &SessionState) -> Card;
    fn placeholder(text: &str) -> Element;
}

impl Listing for Doctor {
    const EMPTY_TEXT: &'static str = "No doctors found with the given filters.";
    const ERROR_TEXT: &'static str = "Failed to load doctors. Please try again later.";

    fn container() -> Container {
        Container::new("div", "content")
    }

    fn card(&self, session: &SessionState) -> Card {
        doctor_card(self, session)
    }

    fn placeholder(text: &str) -> Element {
        Element::new("p").class("noPatientRecord").text(text)
    }
}

impl Listing for Appointment {
    const EMPTY_TEXT: &'static str = "No Appointments found for today.";
    const ERROR_TEXT: &'static str = "Error loading appointments. Try again later.";

    fn container() -> Container {
        Container::new("tbody", "patientTableBody")
    }

    fn card(&self, _session: &SessionState) -> Card {
        appointment_row(self)
    }

    fn placeholder(text: &str) -> Element {
        message_row(text)
    }
}

/// Número de uma busca emitida
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Estado renderizado da lista
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    /// Nada buscado ainda
    Idle,
    Populated(usize),
    Empty,
    Failed,
}

/// O que aconteceu com uma resposta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    Rendered(ListView),
    /// Chegou depois de uma busca mais nova e foi ignorada
    Stale,
}

pub struct ListController<E> {
    container: RefCell<Container>,
    actions: RefCell<HashMap<String, CardAction>>,
    issued: Cell<u64>,
    view: Cell<ListView>,
    empty_text: &'static str,
    _entity: PhantomData<E>,
}

impl<E: Listing> Default for ListController<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Listing> ListController<E> {
    pub fn new() -> Self {
        Self::with_empty_text(E::EMPTY_TEXT)
    }

    /// Controlador com aviso próprio para busca sem resultados
    pub fn with_empty_text(empty_text: &'static str) -> Self {
        Self {
            container: RefCell::new(E::container()),
            actions: RefCell::new(HashMap::new()),
            issued: Cell::new(0),
            view: Cell::new(ListView::Idle),
            empty_text,
            _entity: PhantomData,
        }
    }

    /// Emite o número da próxima busca
    pub fn issue(&self) -> Ticket {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued.get()
    }

    /// Emite um número, aguarda a busca e aplica o resultado
    pub async fn refresh<F>(&self, fetch: F, session: &SessionState, ui: &dyn Ui) -> ListOutcome
    where
        F: Future<Output = ApiResult<Vec<E>>>,
    {
        let ticket = self.issue();
        let result = fetch.await;
        self.apply(ticket, result, session, ui)
    }

    /// Aplica a resposta da busca `ticket`, se ainda for a mais nova
    pub fn apply(
        &self,
        ticket: Ticket,
        result: ApiResult<Vec<E>>,
        session: &SessionState,
        ui: &dyn Ui,
    ) -> ListOutcome {
        if !self.is_current(ticket) {
            debug!(
                "Resposta da busca {} descartada (mais nova: {})",
                ticket.0,
                self.issued.get()
            );
            return ListOutcome::Stale;
        }

        let view = match result {
            ApiResult {
                success: true,
                data: Some(items),
                ..
            } if !items.is_empty() => self.populate(&items, session),
            ApiResult { success: true, .. } => {
                self.show_placeholder(self.empty_text);
                ListView::Empty
            }
            ApiResult {
                success: false,
                message,
                ..
            } => {
                warn!("Falha ao carregar a lista: {}", message);
                self.show_placeholder(E::ERROR_TEXT);
                ui.alert(&message);
                ListView::Failed
            }
        };

        self.view.set(view);
        ListOutcome::Rendered(view)
    }

    fn populate(&self, items: &[E], session: &SessionState) -> ListView {
        let mut actions = HashMap::new();
        let fragments: Vec<Fragment> = items
            .iter()
            .map(|item| {
                let card = item.card(session);
                if let Some(action) = &card.action {
                    actions.insert(card.key.clone(), action.clone());
                }
                card.into_fragment()
            })
            .collect();

        let count = fragments.len();
        self.container.borrow_mut().replace_children(fragments);
        *self.actions.borrow_mut() = actions;
        ListView::Populated(count)
    }

    fn show_placeholder(&self, text: &str) {
        self.container.borrow_mut().replace_children(vec![Fragment {
            key: None,
            node: E::placeholder(text),
        }]);
        self.actions.borrow_mut().clear();
    }

    /// Remove somente o fragmento da entidade, sem recarregar a lista
    pub fn remove(&self, key: &str) -> bool {
        self.actions.borrow_mut().remove(key);
        let removed = self.container.borrow_mut().remove(key);
        if let ListView::Populated(n) = self.view.get() {
            if removed {
                self.view.set(ListView::Populated(n.saturating_sub(1)));
            }
        }
        removed
    }

    /// Ação associada ao cartão com a chave dada
    pub fn action_for(&self, key: &str) -> Option<CardAction> {
        self.actions.borrow().get(key).cloned()
    }

    pub fn view(&self) -> ListView {
        self.view.get()
    }

    pub fn keys(&self) -> Vec<String> {
        self.container
            .borrow()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.container.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.borrow().is_empty()
    }

    pub fn to_element(&self) -> Element {
        self.container.borrow().to_element()
    }

    pub fn to_html(&self) -> String {
        self.to_element().to_html()
    }
}
