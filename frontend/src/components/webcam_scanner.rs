use shared::Prediction;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Blob, HtmlCanvasElement, HtmlVideoElement};
use yew::prelude::*;

use crate::api;
use crate::camera::{self, StreamGuard};
use crate::components::utils;
use crate::session::CaptureSession;

pub enum Msg {
    StartCamera,
    CameraReady(StreamGuard),
    CameraFailed(String),
    StopCamera,
    CaptureAndClassify,
    FrameEncoded(Blob),
    EncodeFailed(String),
    Classified(Prediction),
    ClassifyFailed(String),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Fired after every stored result so the parent can refresh history.
    pub on_classified: Callback<()>,
}

/// Live-camera capture path: acquire the device, render the stream, freeze
/// a frame on demand and submit it for classification.
pub struct WebcamScanner {
    session: CaptureSession<StreamGuard>,
    video_ref: NodeRef,
    canvas_ref: NodeRef,
}

impl Component for WebcamScanner {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            session: CaptureSession::new(),
            video_ref: NodeRef::default(),
            canvas_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::StartCamera => self.handle_start_camera(ctx),
            Msg::CameraReady(guard) => self.handle_camera_ready(guard),
            Msg::CameraFailed(message) => self.handle_camera_failed(message),
            Msg::StopCamera => self.handle_stop_camera(),
            Msg::CaptureAndClassify => self.handle_capture(ctx),
            Msg::FrameEncoded(blob) => self.handle_frame_encoded(ctx, blob),
            Msg::EncodeFailed(message) => {
                log::error!("frame encode failed: {message}");
                self.session.resolve_err(message);
                true
            }
            Msg::Classified(prediction) => {
                self.session.resolve_ok(prediction);
                ctx.props().on_classified.emit(());
                true
            }
            Msg::ClassifyFailed(message) => {
                log::error!("classification failed: {message}");
                self.session.resolve_err(message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let streaming = self.session.stream().is_some();
        let busy = self.session.is_busy();

        html! {
            <div class="container">
                <h1 class="dashboard-title">{"Webcam Scanner"}</h1>

                <video
                    ref={self.video_ref.clone()}
                    autoplay=true
                    playsinline=true
                    class="webcam-video"
                />
                <canvas ref={self.canvas_ref.clone()} style="display: none;" />

                <div class="controls">
                    { if streaming {
                        html! {
                            <button class="analyze-btn" onclick={link.callback(|_| Msg::StopCamera)}>
                                <i class="fa-solid fa-stop"></i>{" Stop"}
                            </button>
                        }
                    } else {
                        html! {
                            <button class="analyze-btn" onclick={link.callback(|_| Msg::StartCamera)}>
                                <i class="fa-solid fa-video"></i>{" Start Camera"}
                            </button>
                        }
                    }}
                    <button
                        class="analyze-btn"
                        disabled={!streaming || busy}
                        onclick={link.callback(|_| Msg::CaptureAndClassify)}
                    >
                        { if busy {
                            html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Classifying..."}</> }
                        } else {
                            html! { <><i class="fa-solid fa-camera"></i>{" Capture & Classify"}</> }
                        }}
                    </button>
                </div>

                <p class="status-line">{ format!("Status: {}", self.session.phase().as_str()) }</p>

                { utils::render_error(self.session.last_error()) }
                { utils::render_prediction(self.session.last_prediction()) }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        // Dropping the guard stops the device tracks on teardown.
        self.session.stop();
    }
}

impl WebcamScanner {
    fn handle_start_camera(&mut self, ctx: &Context<Self>) -> bool {
        if self.session.stream().is_some() {
            return false;
        }

        let link = ctx.link().clone();
        spawn_local(async move {
            match camera::open_camera().await {
                Ok(guard) => link.send_message(Msg::CameraReady(guard)),
                Err(err) => link.send_message(Msg::CameraFailed(err.to_string())),
            }
        });
        false
    }

    fn handle_camera_ready(&mut self, guard: StreamGuard) -> bool {
        if let Some(video) = self.video_ref.cast::<HtmlVideoElement>() {
            video.set_src_object(Some(guard.media_stream()));
        }
        self.session.stream_started(guard);
        true
    }

    fn handle_camera_failed(&mut self, message: String) -> bool {
        log::error!("camera acquisition failed: {message}");
        self.session.stream_failed(message);
        true
    }

    fn handle_stop_camera(&mut self) -> bool {
        self.session.stop();
        if let Some(video) = self.video_ref.cast::<HtmlVideoElement>() {
            video.set_src_object(None);
        }
        true
    }

    fn handle_capture(&mut self, ctx: &Context<Self>) -> bool {
        if let Err(err) = self.session.begin_capture() {
            // Second click while a request is outstanding lands here.
            log::warn!("capture rejected: {err}");
            return false;
        }

        let video = self.video_ref.cast::<HtmlVideoElement>();
        let canvas = self.canvas_ref.cast::<HtmlCanvasElement>();
        let (video, canvas) = match (video, canvas) {
            (Some(video), Some(canvas)) => (video, canvas),
            _ => {
                self.session.resolve_err("Video surface is not ready.");
                return true;
            }
        };

        if let Err(err) = camera::capture_frame(&video, &canvas) {
            self.session.resolve_err(err.to_string());
            return true;
        }

        let link = ctx.link().clone();
        spawn_local(async move {
            match camera::canvas_to_jpeg(&canvas).await {
                Ok(blob) => link.send_message(Msg::FrameEncoded(blob)),
                Err(err) => link.send_message(Msg::EncodeFailed(err.to_string())),
            }
        });
        true
    }

    fn handle_frame_encoded(&mut self, ctx: &Context<Self>, blob: Blob) -> bool {
        if let Err(err) = self.session.begin_classify() {
            log::warn!("submission rejected: {err}");
            return false;
        }

        let link = ctx.link().clone();
        spawn_local(async move {
            match api::classify_image(&blob, "capture.jpg").await {
                Ok(prediction) => link.send_message(Msg::Classified(prediction)),
                Err(err) => link.send_message(Msg::ClassifyFailed(err.to_string())),
            }
        });
        true
    }
}
