//! WASM API for the worksheet layout engine
//!
//! The module owns one worksheet. JavaScript loads a cell list as JSON, runs
//! layout cycles against a recorded display list and asks for selections and
//! exports.

use crate::export::MemoryAssets;
use crate::layout::{DisplayList, LayoutConfig, Palette, RenderContext};
use crate::models::{CellId, Point, Rect, Worksheet};
use lazy_static::lazy_static;
use std::sync::{Mutex, MutexGuard};
use wasm_bindgen::prelude::*;

/// Everything the JS side works on
#[derive(Default)]
struct Session {
    sheet: Worksheet,
    head: Option<CellId>,
    config: LayoutConfig,
    palette: Palette,
    assets: MemoryAssets,
}

// WASM-owned worksheet (canonical source of truth)
lazy_static! {
    static ref SESSION: Mutex<Option<Session>> = Mutex::new(None);
}

fn lock_session() -> Result<MutexGuard<'static, Option<Session>>, JsValue> {
    SESSION
        .lock()
        .map_err(|_| JsValue::from_str("Worksheet lock poisoned"))
}

fn loaded(guard: &mut Option<Session>) -> Result<&mut Session, JsValue> {
    guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("No worksheet loaded"))
}

// ============================================================================
// Loading and configuration
// ============================================================================

/// Replace the worksheet with the cells described by `json`
///
/// # Returns
/// Number of top-level cells
#[wasm_bindgen(js_name = loadCells)]
pub fn load_cells(json: &str) -> Result<usize, JsValue> {
    let mut sheet = Worksheet::new();
    let head = sheet.from_json(json).map_err(|e| {
        log::error!("loadCells: {}", e);
        JsValue::from_str(&e.to_string())
    })?;

    let count = sheet.list_len(Some(head));
    log::info!("loadCells: {} cells, {} in arena", count, sheet.len());

    let mut guard = lock_session()?;
    let session = guard.get_or_insert_with(Session::default);
    session.sheet = sheet;
    session.head = Some(head);
    session.assets = MemoryAssets::new();
    Ok(count)
}

/// Replace the layout configuration; missing fields take their defaults
#[wasm_bindgen(js_name = setLayoutConfig)]
pub fn set_layout_config(config: JsValue) -> Result<(), JsValue> {
    let config: LayoutConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid layout config: {}", e)))?;
    let mut guard = lock_session()?;
    let session = guard.get_or_insert_with(Session::default);
    log::debug!("setLayoutConfig: {:?}", config);
    session.config = config;
    Ok(())
}

/// Replace the palette
#[wasm_bindgen(js_name = setPalette)]
pub fn set_palette(palette: JsValue) -> Result<(), JsValue> {
    let palette: Palette = serde_wasm_bindgen::from_value(palette)
        .map_err(|e| JsValue::from_str(&format!("Invalid palette: {}", e)))?;
    let mut guard = lock_session()?;
    guard.get_or_insert_with(Session::default).palette = palette;
    Ok(())
}

// ============================================================================
// Layout and hit testing
// ============================================================================

/// Run a full layout cycle and draw the worksheet
///
/// # Returns
/// The recorded display list (`{commands: [...]}`)
#[wasm_bindgen(js_name = layoutCells)]
pub fn layout_cells() -> Result<JsValue, JsValue> {
    let mut guard = lock_session()?;
    let session = loaded(&mut guard)?;

    let mut display = DisplayList::new();
    let height = {
        let mut ctx = RenderContext::new(&session.config, &session.palette, &mut display);
        session.sheet.layout_list(session.head, &mut ctx);
        let font_size = session.config.font_size;
        session.sheet.draw_lines(session.head, &mut ctx, Point::new(0, 0), font_size)
    };
    log::debug!("layoutCells: {} commands, height {}", display.commands.len(), height);

    serde_wasm_bindgen::to_value(&display)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Cells hit by a rectangle, as `[first, last]` ids or `null`
#[wasm_bindgen(js_name = selectRect)]
pub fn select_rect(x: i32, y: i32, width: i32, height: i32) -> Result<JsValue, JsValue> {
    let mut guard = lock_session()?;
    let session = loaded(&mut guard)?;

    let rect = Rect::new(x, y, width, height);
    let hit = session
        .sheet
        .select_rect(session.head, &rect)
        .map(|(first, last)| [first.index(), last.index()]);
    serde_wasm_bindgen::to_value(&hit)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Export
// ============================================================================

#[wasm_bindgen(js_name = exportPlainText)]
pub fn export_plain_text() -> Result<String, JsValue> {
    let mut guard = lock_session()?;
    let session = loaded(&mut guard)?;
    Ok(session.sheet.list_to_plain_text(session.head))
}

#[wasm_bindgen(js_name = exportTex)]
pub fn export_tex() -> Result<String, JsValue> {
    let mut guard = lock_session()?;
    let session = loaded(&mut guard)?;
    Ok(session.sheet.list_to_tex(session.head))
}

/// Persistence markup; images go to the asset store, see [`get_asset`]
#[wasm_bindgen(js_name = exportXml)]
pub fn export_xml() -> Result<String, JsValue> {
    let mut guard = lock_session()?;
    let session = loaded(&mut guard)?;
    let xml = session.sheet.list_to_xml(session.head, &mut session.assets);
    log::info!("exportXml: {} bytes, {} assets", xml.len(), session.assets.len());
    Ok(xml)
}

/// PNG bytes of an asset registered by [`export_xml`]
#[wasm_bindgen(js_name = getAsset)]
pub fn get_asset(name: &str) -> Result<Vec<u8>, JsValue> {
    let mut guard = lock_session()?;
    let session = loaded(&mut guard)?;
    session
        .assets
        .get(name)
        .map(<[u8]>::to_vec)
        .ok_or_else(|| JsValue::from_str(&format!("No asset named {}", name)))
}
