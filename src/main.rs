use slint::{ComponentHandle, ModelRc, SharedString, VecModel};

use crate::state::parse_quantity;
use crate::store::StockStore;

pub mod format;
pub mod state;
pub mod store;

slint::include_modules!();

// --- Helper Functions ---

/// Pushes a full store snapshot into the window properties. The form text
/// is deliberately left alone here; each action resets only the fields that
/// belong to it. Runs on success paths only, so it also retires any error
/// notice still on screen.
fn refresh_ui(ui: &MainWindow, store: &StockStore) {
    ui.set_error_message(SharedString::default());

    let rows: Vec<MovementRow> = store
        .movements()
        .into_iter()
        .map(|entry| MovementRow {
            id: entry.id as i32,
            product: SharedString::from(entry.product.as_str()),
            outflow: quantity_text(entry.outflow),
            remaining: quantity_text(entry.remaining),
            initial: quantity_text(entry.initial_stock),
            timestamp: SharedString::from(entry.recorded_at.as_str()),
        })
        .collect();
    ui.set_movements(ModelRc::new(VecModel::from(rows)));

    ui.set_current_stock(quantity_text(store.current_stock()));
    ui.set_start_marker(SharedString::from(store.start_marker().unwrap_or_default()));

    match store.end_marker() {
        Some(marker) => {
            ui.set_end_marker_time(SharedString::from(marker.recorded_at.as_str()));
            ui.set_end_marker_remaining(quantity_text(marker.remaining));
        }
        None => {
            ui.set_end_marker_time(SharedString::default());
            ui.set_end_marker_remaining(SharedString::default());
        }
    }

    ui.set_editing(store.is_editing());
}

/// Whole quantities render bare (`30`, never `30.0`); fractional ones keep
/// their digits.
fn quantity_text(value: f64) -> SharedString {
    SharedString::from(value.to_string())
}

// --- Main Execution ---

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()?;

    let ui = MainWindow::new()?;
    let store = StockStore::new();

    refresh_ui(&ui, &store);

    // --- Callback: Set Initial Stock ---
    ui.on_set_initial_stock({
        let ui_handle = ui.as_weak();
        let store = store.clone();
        move |initial_text| {
            store.set_initial_stock(parse_quantity(&initial_text));
            if let Some(ui) = ui_handle.upgrade() {
                refresh_ui(&ui, &store);
            }
        }
    });

    // --- Callback: Commit Outflow ---
    ui.on_commit_outflow({
        let ui_handle = ui.as_weak();
        let store = store.clone();
        move |product, initial_text, outflow_text| {
            let result = store.commit_outflow(
                product.as_str(),
                parse_quantity(&initial_text),
                parse_quantity(&outflow_text),
            );
            if let Some(ui) = ui_handle.upgrade() {
                match result {
                    Ok(()) => {
                        ui.set_outflow_text(SharedString::from("0"));
                        refresh_ui(&ui, &store);
                    }
                    Err(err) => ui.set_error_message(SharedString::from(format!("Erro: {err}"))),
                }
            }
        }
    });

    // --- Callback: Begin Edit ---
    ui.on_begin_edit({
        let ui_handle = ui.as_weak();
        let store = store.clone();
        move |id| {
            let Some(entry) = store.begin_edit(id as u32) else {
                return;
            };
            if let Some(ui) = ui_handle.upgrade() {
                ui.set_product_text(SharedString::from(entry.product.as_str()));
                ui.set_outflow_text(quantity_text(entry.outflow));
                refresh_ui(&ui, &store);
            }
        }
    });

    // --- Callback: Save Edit ---
    ui.on_save_edit({
        let ui_handle = ui.as_weak();
        let store = store.clone();
        move |product, outflow_text| {
            let result = store.save_edit(product.as_str(), parse_quantity(&outflow_text));
            if let Some(ui) = ui_handle.upgrade() {
                match result {
                    Ok(()) => {
                        ui.set_product_text(SharedString::default());
                        ui.set_outflow_text(SharedString::from("0"));
                        refresh_ui(&ui, &store);
                    }
                    Err(err) => ui.set_error_message(SharedString::from(format!("Erro: {err}"))),
                }
            }
        }
    });

    // --- Callback: Delete Entry ---
    ui.on_delete_entry({
        let ui_handle = ui.as_weak();
        let store = store.clone();
        move |id| {
            store.delete_entry(id as u32);
            if let Some(ui) = ui_handle.upgrade() {
                refresh_ui(&ui, &store);
            }
        }
    });

    // --- Callback: Dismiss Error ---
    ui.on_dismiss_error({
        let ui_handle = ui.as_weak();
        move || {
            if let Some(ui) = ui_handle.upgrade() {
                ui.set_error_message(SharedString::default());
            }
        }
    });

    ui.run()?;
    Ok(())
}
