//! Classifier adapter over the packaged Teachable Machine image runtime.
//!
//! The model is an opaque black box loaded once per process from fixed asset
//! paths. Load state lives in a `thread_local!` (the app is single-threaded)
//! with lifecycle `Uninitialized → Loading → Ready | Failed`; callers that
//! arrive while a load is in flight are queued as waiters on that one load
//! instead of triggering another.

use std::cell::RefCell;

use js_sys::{Array, Reflect};
use shared::{Classification, Frame, Prediction, ScanError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};
use yew::Callback;

const MODEL_URL: &str = "/model/model.json";
const METADATA_URL: &str = "/model/metadata.json";

#[wasm_bindgen]
extern "C" {
    /// Handle to a loaded Teachable Machine image model.
    #[derive(Clone)]
    type CustomMobileNet;

    #[wasm_bindgen(js_namespace = tmImage, js_name = load, catch)]
    async fn tm_load(model_url: &str, metadata_url: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    async fn predict(this: &CustomMobileNet, input: &HtmlCanvasElement)
        -> Result<JsValue, JsValue>;
}

enum ModelState {
    Uninitialized,
    Loading(Vec<Callback<Result<(), ScanError>>>),
    Ready(CustomMobileNet),
    Failed,
}

thread_local! {
    static MODEL: RefCell<ModelState> = RefCell::new(ModelState::Uninitialized);
}

/// Kicks off the one-time model load, or joins the load already in flight.
/// `notify` fires once with the load result; callers that arrive after the
/// load settled are answered immediately.
pub fn ensure_loaded(notify: Callback<Result<(), ScanError>>) {
    let settled = MODEL.with(|cell| {
        let mut state = cell.borrow_mut();
        match &mut *state {
            ModelState::Ready(_) => Some(Ok(())),
            ModelState::Failed => Some(Err(ScanError::ModelLoadError)),
            ModelState::Loading(waiters) => {
                waiters.push(notify.clone());
                None
            }
            ModelState::Uninitialized => {
                *state = ModelState::Loading(vec![notify.clone()]);
                spawn_local(run_load());
                None
            }
        }
    });
    if let Some(result) = settled {
        notify.emit(result);
    }
}

async fn run_load() {
    let loaded = tm_load(MODEL_URL, METADATA_URL).await;

    let (waiters, result) = MODEL.with(|cell| {
        let mut state = cell.borrow_mut();
        let waiters = match std::mem::replace(&mut *state, ModelState::Failed) {
            ModelState::Loading(waiters) => waiters,
            other => {
                *state = other;
                return (Vec::new(), Err(ScanError::ModelLoadError));
            }
        };
        let result = match &loaded {
            Ok(value) => {
                log::info!("detection model loaded");
                *state = ModelState::Ready(value.clone().unchecked_into());
                Ok(())
            }
            Err(err) => {
                log::error!("model load failed: {:?}", err);
                Err(ScanError::ModelLoadError)
            }
        };
        (waiters, result)
    });

    // Emit outside the borrow; waiter callbacks may re-enter this module.
    for waiter in waiters {
        waiter.emit(result.clone());
    }
}

fn model_handle() -> Result<CustomMobileNet, ScanError> {
    MODEL.with(|cell| match &*cell.borrow() {
        ModelState::Ready(model) => Ok(model.clone()),
        ModelState::Failed => Err(ScanError::ModelLoadError),
        ModelState::Uninitialized | ModelState::Loading(_) => Err(ScanError::ModelNotReady),
    })
}

/// Runs the model over a grabbed frame and returns its ranked predictions.
/// The frame is only read; the pixels are copied into an offscreen canvas
/// for the runtime to consume.
pub async fn classify(frame: &Frame) -> Result<Classification, ScanError> {
    let model = model_handle()?;
    let canvas = frame_canvas(frame)?;

    let raw = model.predict(&canvas).await.map_err(|err| {
        log::error!("inference failed: {:?}", err);
        ScanError::InferenceError
    })?;

    parse_predictions(&raw)
}

fn frame_canvas(frame: &Frame) -> Result<HtmlCanvasElement, ScanError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ScanError::InferenceError)?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| ScanError::InferenceError)?
        .dyn_into()
        .map_err(|_| ScanError::InferenceError)?;
    canvas.set_width(frame.width);
    canvas.set_height(frame.height);

    let context = canvas
        .get_context("2d")
        .map_err(|_| ScanError::InferenceError)?
        .ok_or(ScanError::InferenceError)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ScanError::InferenceError)?;

    let image =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(&frame.pixels), frame.width, frame.height)
            .map_err(|_| ScanError::InferenceError)?;
    context
        .put_image_data(&image, 0.0, 0.0)
        .map_err(|_| ScanError::InferenceError)?;

    Ok(canvas)
}

/// The runtime yields `[{ className, probability }, ...]`.
fn parse_predictions(raw: &JsValue) -> Result<Classification, ScanError> {
    let mut predictions = Vec::new();
    for entry in Array::from(raw).iter() {
        let label = Reflect::get(&entry, &"className".into())
            .ok()
            .and_then(|v| v.as_string());
        let confidence = Reflect::get(&entry, &"probability".into())
            .ok()
            .and_then(|v| v.as_f64());
        if let (Some(label), Some(confidence)) = (label, confidence) {
            predictions.push(Prediction::new(label, confidence as f32));
        }
    }
    Classification::new(predictions)
}
