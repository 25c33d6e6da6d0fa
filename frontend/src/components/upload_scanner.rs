use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::Prediction;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, HtmlInputElement};
use yew::prelude::*;

use crate::api;
use crate::camera::StreamGuard;
use crate::components::utils;
use crate::session::CaptureSession;

pub enum Msg {
    FileSelected(Event),
    FilePasted(ClipboardEvent),
    Classify,
    Classified(Prediction),
    ClassifyFailed(String),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_classified: Callback<()>,
}

/// Upload capture path: pick (or paste) a local image, preview it, submit
/// it through the same classification contract as the webcam path.
pub struct UploadScanner {
    session: CaptureSession<StreamGuard>,
    file: Option<GlooFile>,
    preview: Option<ObjectUrl>,
    _paste_listener: Option<EventListener>,
}

impl Component for UploadScanner {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::FilePasted(clipboard_event.clone()));
            }
        });

        Self {
            session: CaptureSession::new(),
            file: None,
            preview: None,
            _paste_listener: Some(listener),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(event) => self.handle_file_selected(event),
            Msg::FilePasted(event) => self.handle_file_pasted(event),
            Msg::Classify => self.handle_classify(ctx),
            Msg::Classified(prediction) => {
                self.session.resolve_ok(prediction);
                ctx.props().on_classified.emit(());
                true
            }
            Msg::ClassifyFailed(message) => {
                // The selection and preview survive so the same file can
                // be resubmitted.
                log::error!("classification failed: {message}");
                self.session.resolve_err(message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let busy = self.session.is_busy();

        html! {
            <div class="container">
                <h1 class="dashboard-title">{"Upload Waste Image"}</h1>

                <input
                    type="file"
                    id="file-input"
                    accept="image/*"
                    onchange={link.callback(Msg::FileSelected)}
                />

                { self.render_preview() }

                { if self.file.is_some() {
                    html! {
                        <button
                            class="analyze-btn"
                            disabled={busy}
                            onclick={utils::debounce(300, {
                                let link = link.clone();
                                move || link.callback(|_| Msg::Classify).emit(())
                            })}
                        >
                            { if busy {
                                html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Classifying..."}</> }
                            } else {
                                html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Classify"}</> }
                            }}
                        </button>
                    }
                } else {
                    html! {}
                }}

                { utils::render_error(self.session.last_error()) }
                { utils::render_prediction(self.session.last_prediction()) }
            </div>
        }
    }
}

impl UploadScanner {
    fn handle_file_selected(&mut self, event: Event) -> bool {
        let input: HtmlInputElement = event.target_unchecked_into();
        let Some(file_list) = input.files() else {
            return false;
        };
        let picked = utils::first_image_file(&file_list);
        input.set_value("");
        self.store_selection(picked)
    }

    fn handle_file_pasted(&mut self, event: ClipboardEvent) -> bool {
        let Some(data_transfer) = event.clipboard_data() else {
            return false;
        };
        let Some(file_list) = data_transfer.files() else {
            return false;
        };
        if file_list.length() == 0 {
            return false;
        }
        event.prevent_default();
        self.store_selection(utils::first_image_file(&file_list))
    }

    /// Stores a valid selection with its preview handle; a validation
    /// failure is surfaced without touching the current selection.
    fn store_selection(&mut self, picked: Result<GlooFile, String>) -> bool {
        match picked {
            Ok(file) => {
                self.preview = Some(ObjectUrl::from(file.clone()));
                self.file = Some(file);
                self.session.clear_error();
                true
            }
            Err(message) => {
                log::warn!("rejected upload selection: {message}");
                self.session.reject_input(message);
                true
            }
        }
    }

    fn handle_classify(&mut self, ctx: &Context<Self>) -> bool {
        let Some(file) = self.file.clone() else {
            self.session.reject_input("No image selected yet.");
            return true;
        };

        if let Err(err) = self.session.begin_classify() {
            log::warn!("submission rejected: {err}");
            return false;
        }

        let link = ctx.link().clone();
        spawn_local(async move {
            match api::classify_image(file.as_ref(), &file.name()).await {
                Ok(prediction) => link.send_message(Msg::Classified(prediction)),
                Err(err) => link.send_message(Msg::ClassifyFailed(err.to_string())),
            }
        });
        true
    }

    fn render_preview(&self) -> Html {
        match &self.preview {
            Some(url) => html! {
                <img
                    src={url.to_string()}
                    alt="Preview"
                    class="preview-img"
                />
            },
            None => html! {},
        }
    }
}
