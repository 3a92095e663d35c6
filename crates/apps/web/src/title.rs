use std::cell::RefCell;

use gloo_timers::callback::Interval;
use site::TitleAnimator;
use site::title::TITLE_TICK_S;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::{log_error, now};

/// A running title animation. Dropping it stops the timer.
struct TitleRun {
    element_id: String,
    _timer: Interval,
}

thread_local! {
    static RUNS: RefCell<Vec<TitleRun>> = const { RefCell::new(Vec::new()) };
}

pub fn start(element_id: &str, text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let element = document
        .get_element_by_id(element_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing {element_id}")))?;

    let started = now();
    let mut animator = TitleAnimator::new(text, started.as_millis() as u64, started);
    paint(&document, &element, &animator)?;

    let tick_ms = (TITLE_TICK_S * 1000.0).round() as u32;
    let timer = Interval::new(tick_ms, move || {
        if animator.advance(now()) {
            if let Err(err) = paint(&document, &element, &animator) {
                log_error(&format!("title paint error: {:?}", err));
            }
        }
    });

    RUNS.with(|runs| {
        let mut runs = runs.borrow_mut();
        runs.retain(|run| run.element_id != element_id);
        runs.push(TitleRun {
            element_id: element_id.to_string(),
            _timer: timer,
        });
    });
    Ok(())
}

pub fn stop(element_id: &str) -> bool {
    RUNS.with(|runs| {
        let mut runs = runs.borrow_mut();
        let before = runs.len();
        runs.retain(|run| run.element_id != element_id);
        runs.len() != before
    })
}

fn paint(document: &web_sys::Document, element: &Element, animator: &TitleAnimator) -> Result<(), JsValue> {
    element.set_text_content(None);
    for (ch, color) in animator.spans() {
        let span = document.create_element("span")?;
        span.set_text_content(Some(&ch.to_string()));
        let style = if ch == ' ' {
            "display:inline-block;width:1rem".to_string()
        } else {
            format!("display:inline-block;color:{}", color.to_css())
        };
        span.set_attribute("style", &style)?;
        element.append_child(&span)?;
    }
    Ok(())
}
