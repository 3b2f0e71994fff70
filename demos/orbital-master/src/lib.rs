use wasm_bindgen::prelude::*;

orbital_web::export_session!("orbital-master");
