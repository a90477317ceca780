use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;

use crate::state::{EndMarker, Mode, MovementEntry, StockError, StockState};

/// Shared handle over the screen state, cloned into every UI callback. All
/// callbacks run on the UI event loop, so a plain `Rc<RefCell<_>>` carries
/// the state.
#[derive(Clone)]
pub struct StockStore {
    state: Rc<RefCell<StockState>>,
}

impl StockStore {
    pub fn new() -> Self {
        StockStore {
            state: Rc::new(RefCell::new(StockState::new())),
        }
    }

    /// "Definir Estoque Inicial": overwrite the live stock and stamp the
    /// start marker.
    pub fn set_initial_stock(&self, value: f64) {
        self.state.borrow_mut().set_initial_stock(value, Local::now());
        log::info!("initial stock set to {value}");
    }

    /// "Registrar Saída": record one outflow against the live stock.
    pub fn commit_outflow(
        &self,
        product: &str,
        initial_stock: f64,
        outflow: f64,
    ) -> Result<(), StockError> {
        let mut state = self.state.borrow_mut();
        match state.commit_outflow(product, initial_stock, outflow, Local::now()) {
            Ok(id) => {
                log::info!(
                    "entry {id}: outflow {outflow} of '{product}', {} left",
                    state.current_stock()
                );
                Ok(())
            }
            Err(err) => {
                let StockError::InsufficientStock { requested, available } = &err;
                log::warn!("outflow refused: requested {requested}, only {available} available");
                Err(err)
            }
        }
    }

    /// "Editar": arm the edit cursor and hand the entry back so the form can
    /// be pre-filled.
    pub fn begin_edit(&self, id: u32) -> Option<MovementEntry> {
        let mut state = self.state.borrow_mut();
        let entry = state.begin_edit(id)?.clone();
        log::info!("editing entry {id}");
        Some(entry)
    }

    /// "Salvar Edição": apply the form values to the entry under the cursor.
    pub fn save_edit(&self, product: &str, outflow: f64) -> Result<(), StockError> {
        let mut state = self.state.borrow_mut();
        match state.save_edit(product, outflow, Local::now()) {
            Ok(()) => {
                log::info!("edit saved: outflow {outflow} of '{product}'");
                Ok(())
            }
            Err(err) => {
                let StockError::InsufficientStock { requested, available } = &err;
                log::warn!("edit refused: requested {requested}, only {available} available");
                Err(err)
            }
        }
    }

    /// "Excluir": drop an entry from the history.
    pub fn delete_entry(&self, id: u32) {
        self.state.borrow_mut().delete_entry(id);
        log::info!("entry {id} removed from history");
    }

    // --- Snapshots for the UI ---

    pub fn movements(&self) -> Vec<MovementEntry> {
        self.state.borrow().movements().to_vec()
    }

    pub fn current_stock(&self) -> f64 {
        self.state.borrow().current_stock()
    }

    pub fn start_marker(&self) -> Option<String> {
        self.state.borrow().start_marker().map(str::to_owned)
    }

    pub fn end_marker(&self) -> Option<EndMarker> {
        self.state.borrow().end_marker().cloned()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state.borrow().mode(), Mode::Editing(_))
    }
}
