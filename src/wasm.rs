use wasm_bindgen::prelude::*;

use crate::config::Config;
use crate::game::ReversiEngine;
use crate::render::NullRenderer;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Reversi environment exported to JavaScript.
#[wasm_bindgen]
pub struct WasmReversi {
    engine: ReversiEngine,
}

#[wasm_bindgen]
impl WasmReversi {
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize, seed: Option<u64>) -> Result<WasmReversi, JsValue> {
        let config = Config {
            size,
            seed,
            first_player: None,
        };
        let engine = ReversiEngine::new(config, Box::new(NullRenderer)).map_err(to_js_error)?;
        Ok(Self { engine })
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn is_legal(&self, action: usize) -> bool {
        self.engine.is_legal(action)
    }

    /// Returns `{ board, reward, terminal, info, flipped }`.
    pub fn step(&mut self, action: usize) -> Result<JsValue, JsValue> {
        let outcome = self.engine.step(action).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&outcome).map_err(JsValue::from)
    }

    pub fn render(&self) -> String {
        self.engine.render_text(None)
    }

    /// Flattened row-major board, -1 for A, 0 for empty, +1 for B.
    pub fn board(&self) -> Vec<i8> {
        self.engine.board().to_values()
    }

    pub fn current_player(&self) -> i8 {
        self.engine.current_player().value()
    }

    pub fn is_terminal(&self) -> bool {
        self.engine.is_terminal()
    }
}

fn to_js_error(err: crate::error::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    #[wasm_bindgen_test]
    fn step_returns_outcome_object() {
        let mut env = WasmReversi::new(4, Some(9)).unwrap();
        let first = env.current_player();

        let value = env.step(1).unwrap();
        let terminal = js_sys::Reflect::get(&value, &JsValue::from_str("terminal")).unwrap();

        assert_eq!(terminal.as_bool(), Some(false));
        assert_eq!(env.current_player(), -first);
        assert_eq!(env.board()[1], first);
    }

    #[wasm_bindgen_test]
    fn invalid_size_and_illegal_moves_become_js_errors() {
        assert!(WasmReversi::new(5, None).is_err());

        let mut env = WasmReversi::new(4, Some(1)).unwrap();
        let err = env.step(5).unwrap_err();
        assert_eq!(err.as_string().as_deref(), Some("illegal move: action 5"));
    }
}
