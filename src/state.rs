use chrono::{DateTime, Local};
use thiserror::Error;

use crate::format::format_timestamp;

/// Raised when a commit or an edit would pull more stock than is available.
/// The Display text is the exact notice shown to the user; the fields feed
/// the log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockError {
    #[error("Saída maior que o estoque disponível!")]
    InsufficientStock { requested: f64, available: f64 },
}

/// One recorded outflow. `remaining` is the stock level captured when the
/// entry was created or last edited; `recorded_at` is stored pre-formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementEntry {
    pub id: u32,
    pub product: String,
    pub outflow: f64,
    pub remaining: f64,
    pub initial_stock: f64,
    pub recorded_at: String,
}

/// End-of-day marker, replaced by every successful commit.
#[derive(Debug, Clone, PartialEq)]
pub struct EndMarker {
    pub recorded_at: String,
    pub remaining: f64,
}

/// Screen mode. `Editing` always carries the id of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Editing(u32),
}

/// The whole screen state. Every mutation happens in one of the action
/// methods below; callers inject the wall-clock moment, so transitions stay
/// deterministic.
#[derive(Debug, Default)]
pub struct StockState {
    current_stock: f64,
    movements: Vec<MovementEntry>,
    start_marker: Option<String>,
    end_marker: Option<EndMarker>,
    mode: Mode,
    next_id: u32,
}

impl StockState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Actions ---

    /// Overwrites the live stock with `value` and stamps the start marker.
    /// Always succeeds; the history, the end marker and the mode are left
    /// untouched.
    pub fn set_initial_stock(&mut self, value: f64, now: DateTime<Local>) {
        self.current_stock = value;
        self.start_marker = Some(format_timestamp(&now));
    }

    /// Records one outflow: subtracts it from the live stock, appends a
    /// history entry and replaces the end marker. `initial_stock` is
    /// whatever the form field holds at commit time, recorded verbatim.
    pub fn commit_outflow(
        &mut self,
        product: &str,
        initial_stock: f64,
        outflow: f64,
        now: DateTime<Local>,
    ) -> Result<u32, StockError> {
        self.ensure_available(outflow)?;

        self.current_stock -= outflow;
        let id = self.allocate_id();
        let stamp = format_timestamp(&now);
        self.movements.push(MovementEntry {
            id,
            product: product.to_owned(),
            outflow,
            remaining: self.current_stock,
            initial_stock,
            recorded_at: stamp.clone(),
        });
        self.end_marker = Some(EndMarker {
            recorded_at: stamp,
            remaining: self.current_stock,
        });
        Ok(id)
    }

    /// Points the edit cursor at `id` and returns the entry so the form can
    /// be pre-filled. Unknown ids leave the screen idle.
    pub fn begin_edit(&mut self, id: u32) -> Option<&MovementEntry> {
        let entry = self.movements.iter().find(|entry| entry.id == id)?;
        self.mode = Mode::Editing(id);
        Some(entry)
    }

    /// Applies the form values to the entry under the edit cursor. The
    /// availability check runs against the live stock, and `remaining` is
    /// recomputed from the live stock as well, not from the entry's prior
    /// value. The live stock itself and the end marker never move here.
    pub fn save_edit(
        &mut self,
        product: &str,
        outflow: f64,
        now: DateTime<Local>,
    ) -> Result<(), StockError> {
        let Mode::Editing(id) = self.mode else {
            return Ok(());
        };

        self.ensure_available(outflow)?;

        let remaining = self.current_stock - outflow;
        if let Some(entry) = self.movements.iter_mut().find(|entry| entry.id == id) {
            entry.product = product.to_owned();
            entry.outflow = outflow;
            entry.remaining = remaining;
            entry.recorded_at = format_timestamp(&now);
        }
        // The cursor drops even when the entry is gone (deleted mid-edit).
        self.mode = Mode::Idle;
        Ok(())
    }

    /// Removes the entry with `id`, if present. Surviving entries keep their
    /// ids and positions; the live stock is not restored.
    pub fn delete_entry(&mut self, id: u32) {
        self.movements.retain(|entry| entry.id != id);
    }

    // --- Snapshots ---

    pub fn current_stock(&self) -> f64 {
        self.current_stock
    }

    pub fn movements(&self) -> &[MovementEntry] {
        &self.movements
    }

    pub fn start_marker(&self) -> Option<&str> {
        self.start_marker.as_deref()
    }

    pub fn end_marker(&self) -> Option<&EndMarker> {
        self.end_marker.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    // --- Internals ---

    fn ensure_available(&self, outflow: f64) -> Result<(), StockError> {
        if outflow > self.current_stock {
            return Err(StockError::InsufficientStock {
                requested: outflow,
                available: self.current_stock,
            });
        }
        Ok(())
    }

    /// Ids are 1-based and strictly increasing; deletions never free them.
    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Coerces free-form field text into a quantity. Unparseable input and NaN
/// count as zero; negative numbers pass through untouched.
pub fn parse_quantity(text: &str) -> f64 {
    let value: f64 = text.trim().parse().unwrap_or(0.0);
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
