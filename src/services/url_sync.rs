//! Keeps the search box and the `?search=` URL parameter in step. Off the web
//! there is no URL, so reads find nothing and writes succeed trivially.

use crate::services::error_handling::BenchResult;

pub const SEARCH_PARAM: &str = "search";

#[cfg(target_arch = "wasm32")]
pub fn query_param(key: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()?.get(key)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn query_param(_key: &str) -> Option<String> {
    None
}

/// Filter text the page starts with.
pub fn initial_search() -> String {
    query_param(SEARCH_PARAM).unwrap_or_default()
}

/// Replaces the current history entry so typing does not grow the back stack.
#[cfg(target_arch = "wasm32")]
pub fn write_search_param(query: &str) -> BenchResult<()> {
    use crate::services::error_handling::BenchError;
    use wasm_bindgen::JsValue;

    let window = web_sys::window().ok_or_else(|| BenchError::browser_api("window"))?;
    let href = window
        .location()
        .href()
        .map_err(|_| BenchError::browser_api("location.href"))?;
    let url = web_sys::Url::new(&href).map_err(|_| BenchError::browser_api("URL"))?;

    // The params object is live, edits show up in `url.href()`
    let params = url.search_params();
    if query.is_empty() {
        params.delete(SEARCH_PARAM);
    } else {
        params.set(SEARCH_PARAM, query);
    }

    window
        .history()
        .map_err(|_| BenchError::browser_api("history"))?
        .replace_state_with_url(&JsValue::NULL, "", Some(&url.href()))
        .map_err(|_| BenchError::browser_api("history.replaceState"))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write_search_param(_query: &str) -> BenchResult<()> {
    Ok(())
}
