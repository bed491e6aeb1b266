pub mod excel_wasm;
