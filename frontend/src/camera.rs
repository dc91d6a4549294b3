//! Frame source: camera stream acquisition, warm-up polling, and single
//! frame grabs.
//!
//! Acquisition prefers a back/environment camera. When device enumeration
//! exposes a labeled back camera we pin it by device id; otherwise we ask for
//! `facingMode: { ideal: "environment" }`, which falls back to any camera on
//! devices without one. Permission refusals surface as
//! [`ScanError::PermissionDenied`]; every other hardware failure maps to
//! [`ScanError::CameraUnavailable`].

use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Object, Reflect};
use shared::{Frame, ScanError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaDeviceInfo,
    MediaDeviceKind, MediaDevices, MediaStream, MediaStreamConstraints, MediaStreamTrack,
};

/// Poll cadence and attempt cap while waiting for the camera to produce its
/// first frame with non-zero dimensions.
const WARMUP_POLL_MS: u32 = 100;
const WARMUP_POLLS: u32 = 30;

/// An acquired camera stream. `release` stops every hardware track and is
/// idempotent; dropping an unreleased handle releases it.
pub struct CameraStream {
    stream: MediaStream,
    released: bool,
}

impl CameraStream {
    fn new(stream: MediaStream) -> Self {
        Self {
            stream,
            released: false,
        }
    }

    pub fn media_stream(&self) -> &MediaStream {
        &self.stream
    }

    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        log::info!("camera stream stopped");
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.release();
    }
}

/// Requests a camera stream, preferring the environment-facing camera.
pub async fn acquire() -> Result<CameraStream, ScanError> {
    let devices = media_devices()?;
    let back_id = back_camera_id(&devices).await;

    match request_stream(&devices, &preferred_constraints(back_id.as_deref())).await {
        Ok(stream) => Ok(stream),
        // A refusal is final, but an overconstrained or missing preferred
        // device still leaves "any camera" worth one more try.
        Err(ScanError::PermissionDenied) => Err(ScanError::PermissionDenied),
        Err(_) => request_stream(&devices, &any_camera_constraints()).await,
    }
}

fn media_devices() -> Result<MediaDevices, ScanError> {
    web_sys::window()
        .ok_or(ScanError::CameraUnavailable)?
        .navigator()
        .media_devices()
        .map_err(|_| ScanError::CameraUnavailable)
}

/// Finds a labeled back camera, if enumeration is available and permission
/// has been granted before (labels are empty otherwise).
async fn back_camera_id(devices: &MediaDevices) -> Option<String> {
    let promise = devices.enumerate_devices().ok()?;
    let list = JsFuture::from(promise).await.ok()?;
    Array::from(&list)
        .iter()
        .filter_map(|entry| entry.dyn_into::<MediaDeviceInfo>().ok())
        .find(|info| {
            info.kind() == MediaDeviceKind::Videoinput
                && info.label().to_lowercase().contains("back")
        })
        .map(|info| info.device_id())
}

fn preferred_constraints(back_id: Option<&str>) -> MediaStreamConstraints {
    let constraints = MediaStreamConstraints::new();
    let video = Object::new();
    match back_id {
        Some(id) => {
            let device_id = Object::new();
            let _ = Reflect::set(&device_id, &"exact".into(), &id.into());
            let _ = Reflect::set(&video, &"deviceId".into(), &device_id);
        }
        None => {
            let facing = Object::new();
            let _ = Reflect::set(&facing, &"ideal".into(), &"environment".into());
            let _ = Reflect::set(&video, &"facingMode".into(), &facing);
        }
    }
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);
    constraints
}

fn any_camera_constraints() -> MediaStreamConstraints {
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);
    constraints
}

async fn request_stream(
    devices: &MediaDevices,
    constraints: &MediaStreamConstraints,
) -> Result<CameraStream, ScanError> {
    let promise = devices
        .get_user_media_with_constraints(constraints)
        .map_err(|_| ScanError::CameraUnavailable)?;

    match JsFuture::from(promise).await {
        Ok(value) => {
            let stream: MediaStream = value.dyn_into().map_err(|_| ScanError::CameraUnavailable)?;
            Ok(CameraStream::new(stream))
        }
        Err(err) => {
            log::warn!("getUserMedia rejected: {:?}", err);
            Err(map_media_error(&err))
        }
    }
}

fn map_media_error(err: &JsValue) -> ScanError {
    let name = Reflect::get(err, &"name".into())
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    match name.as_str() {
        "NotAllowedError" | "SecurityError" => ScanError::PermissionDenied,
        _ => ScanError::CameraUnavailable,
    }
}

/// Waits for the stream to produce a frame with non-zero dimensions. Bounded
/// at roughly three seconds, after which the capture fails as `NotReady`
/// rather than grabbing a zero-sized image.
pub async fn wait_for_frame(video: &HtmlVideoElement) -> Result<(), ScanError> {
    for _ in 0..WARMUP_POLLS {
        if video.video_width() > 0 && video.video_height() > 0 {
            return Ok(());
        }
        TimeoutFuture::new(WARMUP_POLL_MS).await;
    }
    Err(ScanError::NotReady)
}

/// Draws the video's current frame onto the capture canvas and reads it back
/// as an owned [`Frame`].
pub fn grab_frame(
    video: &HtmlVideoElement,
    canvas: &HtmlCanvasElement,
) -> Result<Frame, ScanError> {
    let width = video.video_width();
    let height = video.video_height();
    if width == 0 || height == 0 {
        return Err(ScanError::NotReady);
    }

    canvas.set_width(width);
    canvas.set_height(height);

    let context = canvas
        .get_context("2d")
        .map_err(|_| ScanError::NotReady)?
        .ok_or(ScanError::NotReady)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ScanError::NotReady)?;

    context
        .draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(|_| ScanError::NotReady)?;

    let image = context
        .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
        .map_err(|_| ScanError::NotReady)?;

    Ok(Frame {
        pixels: image.data().0,
        width,
        height,
        captured_at_ms: js_sys::Date::now(),
    })
}
