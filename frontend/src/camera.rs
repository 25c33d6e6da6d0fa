//! Camera device access and frame capture for the webcam scanner.

use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("Camera access denied!")]
    AccessDenied,
    #[error("No camera device available in this browser.")]
    Unsupported,
    #[error("Could not capture a frame from the stream.")]
    CaptureFailed,
    #[error("Could not encode the captured frame.")]
    EncodeFailed,
}

/// Owning handle to an active camera stream. Dropping the guard stops
/// every track, so explicit stop and component teardown release the
/// device through the same path.
pub struct StreamGuard(MediaStream);

impl StreamGuard {
    pub fn media_stream(&self) -> &MediaStream {
        &self.0
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        for track in self.0.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

/// Request exclusive access to a video input device.
pub async fn open_camera() -> Result<StreamGuard, CameraError> {
    let window = web_sys::window().ok_or(CameraError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| CameraError::Unsupported)?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|_| CameraError::Unsupported)?;

    JsFuture::from(promise)
        .await
        .map_err(|_| CameraError::AccessDenied)?
        .dyn_into::<MediaStream>()
        .map(StreamGuard)
        .map_err(|_| CameraError::AccessDenied)
}

/// Freeze the current video frame onto the canvas at the stream's native
/// resolution.
pub fn capture_frame(
    video: &HtmlVideoElement,
    canvas: &HtmlCanvasElement,
) -> Result<(), CameraError> {
    canvas.set_width(video.video_width());
    canvas.set_height(video.video_height());

    let context = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(CameraError::CaptureFailed)?;

    context
        .draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(|_| CameraError::CaptureFailed)
}

/// Encode the frozen frame as a compressed JPEG payload.
pub async fn canvas_to_jpeg(canvas: &HtmlCanvasElement) -> Result<Blob, CameraError> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let reject_on_error = reject.clone();
        let callback = Closure::once_into_js(move |blob: JsValue| match blob.dyn_into::<Blob>() {
            Ok(blob) => {
                let _ = resolve.call1(&JsValue::NULL, &blob);
            }
            Err(value) => {
                let _ = reject.call1(&JsValue::NULL, &value);
            }
        });

        if let Err(err) = canvas.to_blob_with_type(callback.unchecked_ref(), "image/jpeg") {
            let _ = reject_on_error.call1(&JsValue::NULL, &err);
        }
    });

    JsFuture::from(promise)
        .await
        .map_err(|_| CameraError::EncodeFailed)?
        .dyn_into::<Blob>()
        .map_err(|_| CameraError::EncodeFailed)
}
