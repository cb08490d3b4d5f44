//! Implementação de `Ui` para o terminal

use std::cell::{Cell, RefCell};
use std::io::{BufRead, Write};

use clinic_portal::booking::BookingOverlay;
use clinic_portal::ui::{Modal, Page, Routes, Ui};
use tracing::{debug, error};

/// Alertas e confirmações pelo terminal; navegação só é registrada
pub struct TerminalUi {
    input: RefCell<Box<dyn BufRead>>,
    output: RefCell<Box<dyn Write>>,
    routes: Routes,
    assume_yes: bool,
    navigated: Cell<Option<Page>>,
    booking: RefCell<Option<BookingOverlay>>,
}

impl TerminalUi {
    pub fn new(
        input: Box<dyn BufRead>,
        output: Box<dyn Write>,
        routes: Routes,
        assume_yes: bool,
    ) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
            routes,
            assume_yes,
            navigated: Cell::new(None),
            booking: RefCell::new(None),
        }
    }

    pub fn stdio(routes: Routes, assume_yes: bool) -> Self {
        Self::new(
            Box::new(std::io::BufReader::new(std::io::stdin())),
            Box::new(std::io::stderr()),
            routes,
            assume_yes,
        )
    }

    /// Última página para a qual o portal navegou
    pub fn navigated(&self) -> Option<Page> {
        self.navigated.get()
    }

    /// Overlay aberto pelo último "Book Now", se houver
    pub fn take_booking(&self) -> Option<BookingOverlay> {
        self.booking.borrow_mut().take()
    }

    fn say(&self, line: &str) {
        if let Err(e) = writeln!(self.output.borrow_mut(), "{}", line) {
            error!("Falha ao escrever no terminal: {}", e);
        }
    }
}

impl Ui for TerminalUi {
    fn alert(&self, message: &str) {
        self.say(&format!("! {}", message));
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            self.say(&format!("? {} [y/N] y", message));
            return true;
        }

        self.say(&format!("? {} [y/N]", message));
        if let Err(e) = self.output.borrow_mut().flush() {
            error!("Falha ao escrever no terminal: {}", e);
        }

        let mut answer = String::new();
        match self.input.borrow_mut().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "sim"),
            Err(e) => {
                error!("Falha ao ler a resposta: {}", e);
                false
            }
        }
    }

    fn navigate(&self, page: Page) {
        debug!("Navegação para {:?}", page);
        self.say(&format!("-> {}", self.routes.path(page)));
        self.navigated.set(Some(page));
    }

    fn reload(&self) {
        debug!("Recarga de página solicitada");
    }

    fn open_modal(&self, modal: Modal) {
        debug!("Modal {:?} aberto", modal);
    }

    fn close_modal(&self) {
        debug!("Modal fechado");
    }

    fn open_booking(&self, overlay: BookingOverlay) {
        self.say(&overlay.render().to_html());
        *self.booking.borrow_mut() = Some(overlay);
    }
}
