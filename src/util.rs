// Console logging helpers; silent off wasm32 so native tests stay quiet.

/// Debug-build trace logging.
pub fn clog(msg: &str) {
    if cfg!(debug_assertions) {
        console::debug(msg);
    }
}

pub fn cwarn(msg: &str) {
    console::warn(msg);
}

#[cfg(target_arch = "wasm32")]
mod console {
    use wasm_bindgen::JsValue;

    pub fn debug(msg: &str) {
        web_sys::console::debug_1(&JsValue::from_str(msg));
    }

    pub fn warn(msg: &str) {
        web_sys::console::warn_1(&JsValue::from_str(msg));
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod console {
    pub fn debug(_msg: &str) {}
    pub fn warn(_msg: &str) {}
}
