//! WASM API for mounted cells
//!
//! `WasmCell` owns one cell's view and marquee. JavaScript creates it with the
//! cell's container element, feeds it the formatted output and the measured
//! widths, and frees it on unmount, which cancels the scroll timer.

use super::helpers::{deserialize, deserialize_or_default, serialize};
use super::scheduler::BrowserScheduler;
use crate::marquee::{MarqueePhase, Painter};
use crate::models::{CellConfig, RenderedOutput};
use crate::view::display::transform_for;
use crate::view::CellView;
use crate::wasm_log;
use std::rc::Rc;
use web_sys::HtmlElement;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmCell {
    view: CellView,
    element: HtmlElement,
}

#[wasm_bindgen]
impl WasmCell {
    /// Create a cell bound to its scrolling container element
    ///
    /// # Parameters
    /// - `element`: the element whose `transform` the marquee drives
    /// - `config`: `{ overflow_ellipsis, text_speed, container_height? }`
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, config: JsValue) -> Result<WasmCell, JsValue> {
        let config: CellConfig = deserialize_or_default(config, "Cell config deserialization error")?;

        let painted = element.clone();
        let painter: Painter = Rc::new(move |offset: f64| {
            let _ = painted.style().set_property("transform", &transform_for(offset));
        });

        Ok(WasmCell {
            view: CellView::with_painter(Rc::new(BrowserScheduler), config, painter),
            element,
        })
    }

    /// Replace the rendered output; returns whether it changed
    #[wasm_bindgen(js_name = setOutput)]
    pub fn set_output(&mut self, output: JsValue) -> Result<bool, JsValue> {
        let output: RenderedOutput = deserialize(output, "Rendered output deserialization error")?;
        Ok(self.view.set_output(output))
    }

    /// Report measured widths in pixels
    pub fn measure(&mut self, content_width: f64, container_width: f64) -> MarqueePhase {
        let phase = self.view.measure(content_width, container_width);
        wasm_log!("cell measured: content={} container={} phase={:?}", content_width, container_width, phase);
        phase
    }

    /// Measure the mounted content element against this cell's container
    #[wasm_bindgen(js_name = measureElement)]
    pub fn measure_element(&mut self, content: &HtmlElement) -> MarqueePhase {
        let content_width = f64::from(content.client_width());
        let container_width = f64::from(self.element.client_width());
        self.measure(content_width, container_width)
    }

    #[wasm_bindgen(js_name = setContainerHeight)]
    pub fn set_container_height(&mut self, height: f64) -> MarqueePhase {
        self.view.set_container_height(height)
    }

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<MarqueePhase, JsValue> {
        let config: CellConfig = deserialize(config, "Cell config deserialization error")?;
        Ok(self.view.set_config(config))
    }

    /// Display description for JavaScript to render
    pub fn display(&self) -> Result<JsValue, JsValue> {
        serialize(&self.view.display(), "Cell display serialization error")
    }

    /// Current marquee state `{ containerWidth, contentWidth, isScrolling, offset }`
    #[wasm_bindgen(js_name = marqueeState)]
    pub fn marquee_state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.view.marquee_state(), "Marquee state serialization error")
    }

    #[wasm_bindgen(js_name = isScrolling)]
    pub fn is_scrolling(&self) -> bool {
        self.view.is_scrolling()
    }

    pub fn phase(&self) -> MarqueePhase {
        self.view.phase()
    }

    /// Stop scrolling before the element is removed
    pub fn teardown(&mut self) {
        self.view.teardown();
    }
}
