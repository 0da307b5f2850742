//! Errors raised while binding the deck to the DOM
//!
//! The simulation modules never fail; only browser setup does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("element {0} has an unexpected type")]
    WrongElementType(String),
    #[error("canvas has no 2d context")]
    NoCanvasContext,
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DeckError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        DeckError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_element() {
        let err = DeckError::MissingElement("#progressBar".into());
        assert_eq!(err.to_string(), "missing element: #progressBar");
    }
}
