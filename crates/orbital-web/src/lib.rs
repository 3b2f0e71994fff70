pub mod runner;

pub use runner::SessionRunner;

#[doc(hidden)]
pub use js_sys;
#[doc(hidden)]
pub use orbital_core;

/// Generate all `#[wasm_bindgen]` exports for an orbital-filling app.
///
/// Generates:
/// - `thread_local!` storage for the SessionRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (session_init, session_tick, commands, hints, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// orbital_web::export_session!("my-app");
/// // or with a custom molecule table:
/// orbital_web::export_session!("my-app", catalog = include_str!("../data/molecules.json"));
/// ```
///
/// The calling crate depends on `wasm-bindgen`, `log`, `console_log` and
/// `console_error_panic_hook`.
#[macro_export]
macro_rules! export_session {
    ($app_name:literal) => {
        $crate::export_session!(@exports $app_name, None);
    };

    ($app_name:literal, catalog = $catalog:expr) => {
        $crate::export_session!(@exports $app_name, Some($catalog));
    };

    (@exports $app_name:literal, $catalog:expr) => {
        use std::cell::RefCell;
        use $crate::orbital_core::Command;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SessionRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SessionRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Session not initialized. Call session_init() first.");
                f(runner)
            })
        }

        fn to_js(err: impl std::fmt::Display) -> JsValue {
            JsValue::from_str(&err.to_string())
        }

        /// `config_json` is an optional `SessionConfig` document.
        #[wasm_bindgen]
        pub fn session_init(config_json: Option<String>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let runner = $crate::SessionRunner::from_json(config_json.as_deref(), $catalog)
                .map_err(to_js)?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            log::info!("{}: initialized", $app_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn session_tick() {
            with_runner(|r| r.tick());
        }

        // ---- Commands (applied on the next tick) ----

        #[wasm_bindgen]
        pub fn session_select_molecule(id: &str) {
            with_runner(|r| r.push_command(Command::SelectMolecule(id.to_string())));
        }

        #[wasm_bindgen]
        pub fn session_toggle(orbital_id: &str) {
            with_runner(|r| r.push_command(Command::Toggle(orbital_id.to_string())));
        }

        #[wasm_bindgen]
        pub fn session_undo() {
            with_runner(|r| r.push_command(Command::Undo));
        }

        #[wasm_bindgen]
        pub fn session_auto_fill() {
            with_runner(|r| r.push_command(Command::AutoFill));
        }

        #[wasm_bindgen]
        pub fn session_check() {
            with_runner(|r| r.push_command(Command::Check));
        }

        // ---- Hints ----

        /// Returns the request JSON; answer with `session_finish_hint`.
        #[wasm_bindgen]
        pub fn session_begin_hint() -> Result<String, JsValue> {
            with_runner(|r| r.begin_hint()).map_err(to_js)
        }

        #[wasm_bindgen]
        pub fn session_begin_comparison_hint(ids: $crate::js_sys::Array) -> Result<String, JsValue> {
            let ids: Vec<String> = ids.iter().filter_map(|v| v.as_string()).collect();
            with_runner(|r| r.begin_comparison_hint(&ids)).map_err(to_js)
        }

        /// `text` is `undefined` when the JS request failed or timed out.
        #[wasm_bindgen]
        pub fn session_finish_hint(request_id: u32, text: Option<String>) -> bool {
            with_runner(|r| r.finish_hint(request_id as u64, text))
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_stats_ptr() -> *const f32 {
            with_runner(|r| r.stats_ptr())
        }

        #[wasm_bindgen]
        pub fn get_stats_len() -> u32 {
            with_runner(|r| r.stats_len())
        }

        #[wasm_bindgen]
        pub fn get_cues_ptr() -> *const u8 {
            with_runner(|r| r.cues_ptr())
        }

        #[wasm_bindgen]
        pub fn get_cues_len() -> u32 {
            with_runner(|r| r.cues_len())
        }

        #[wasm_bindgen]
        pub fn get_stat_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_stat_events_len() -> u32 {
            with_runner(|r| r.events_len())
        }

        #[wasm_bindgen]
        pub fn get_molecules_json() -> Result<String, JsValue> {
            with_runner(|r| r.molecules_json()).map_err(to_js)
        }

        #[wasm_bindgen]
        pub fn get_molecule_json() -> Result<String, JsValue> {
            with_runner(|r| r.molecule_json()).map_err(to_js)
        }

        #[wasm_bindgen]
        pub fn get_orbitals_json() -> Result<String, JsValue> {
            with_runner(|r| r.orbitals_json()).map_err(to_js)
        }

        #[wasm_bindgen]
        pub fn get_stats_json() -> Result<String, JsValue> {
            with_runner(|r| r.stats_json()).map_err(to_js)
        }

        #[wasm_bindgen]
        pub fn get_feedback_json() -> Result<String, JsValue> {
            with_runner(|r| r.feedback_json()).map_err(to_js)
        }
    };
}
