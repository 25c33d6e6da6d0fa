use gloo_storage::{LocalStorage, Storage};
use shared::ClassificationRecord;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::{Model, Msg, Tab};

const THEME_KEY: &str = "smartwaste_theme";

pub fn handle_switch_tab(model: &mut Model, tab: Tab) -> bool {
    if model.active_tab == tab {
        return false;
    }
    model.active_tab = tab;
    true
}

/// Kick off a history refresh. The result lands back in the update loop as
/// `RecordsLoaded` / `RecordsFailed`.
pub fn refresh_records(ctx: &Context<Model>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        match api::fetch_records().await {
            Ok(records) => link.send_message(Msg::RecordsLoaded(records)),
            Err(err) => link.send_message(Msg::RecordsFailed(err.to_string())),
        }
    });
}

pub fn handle_records_loaded(
    model: &mut Model,
    mut records: Vec<ClassificationRecord>,
) -> bool {
    // Newest first. The store's arrival order is not guaranteed, so the
    // client imposes the display order itself; ISO-8601 timestamps compare
    // lexicographically.
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    model.records = records;
    model.fetch_error = None;
    true
}

/// A failed refresh keeps the previous snapshot; the dashboard just shows
/// a stale-data banner. Scanner sessions are unaffected.
pub fn handle_records_failed(model: &mut Model, message: String) -> bool {
    log::error!("history refresh failed: {message}");
    model.fetch_error = Some(format!("Could not refresh history: {message}"));
    true
}

pub fn load_theme() -> String {
    LocalStorage::get(THEME_KEY).unwrap_or_else(|_| "light".to_string())
}

pub fn apply_theme(theme: &str) {
    let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
    if theme == "dark" {
        body.class_list().add_1("dark-mode").unwrap();
    } else {
        body.class_list().remove_1("dark-mode").unwrap();
    }
}

pub fn handle_toggle_theme(model: &mut Model) -> bool {
    model.theme = if model.theme == "light" {
        "dark".to_string()
    } else {
        "light".to_string()
    };
    apply_theme(&model.theme);
    LocalStorage::set(THEME_KEY, &model.theme).ok();
    true
}
