use shared::ClassificationRecord;
use yew::prelude::*;

mod api;
mod camera;
mod components;
mod session;

use components::dashboard::render_dashboard;
use components::handlers;
use components::sidebar::render_sidebar;
use components::upload_scanner::UploadScanner;
use components::webcam_scanner::WebcamScanner;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Webcam,
    Upload,
}

pub enum Msg {
    SwitchTab(Tab),
    RefreshRecords,
    RecordsLoaded(Vec<ClassificationRecord>),
    RecordsFailed(String),
    ToggleTheme,
}

/// Root component: owns the record history snapshot and the active view.
/// Scanner tabs report each stored result back up, which triggers a
/// history refresh here.
pub struct Model {
    pub active_tab: Tab,
    pub records: Vec<ClassificationRecord>,
    pub fetch_error: Option<String>,
    pub theme: String,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let theme = handlers::load_theme();
        handlers::apply_theme(&theme);
        ctx.link().send_message(Msg::RefreshRecords);

        Self {
            active_tab: Tab::Dashboard,
            records: Vec::new(),
            fetch_error: None,
            theme,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SwitchTab(tab) => handlers::handle_switch_tab(self, tab),
            Msg::RefreshRecords => {
                handlers::refresh_records(ctx);
                false
            }
            Msg::RecordsLoaded(records) => handlers::handle_records_loaded(self, records),
            Msg::RecordsFailed(message) => handlers::handle_records_failed(self, message),
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_classified = ctx.link().callback(|_| Msg::RefreshRecords);

        html! {
            <div class="layout">
                { render_sidebar(self, ctx) }
                <main class="main">
                    { match self.active_tab {
                        Tab::Dashboard => render_dashboard(self, ctx),
                        Tab::Webcam => html! { <WebcamScanner on_classified={on_classified} /> },
                        Tab::Upload => html! { <UploadScanner on_classified={on_classified} /> },
                    }}
                </main>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("SmartWaste client starting...");
    yew::Renderer::<Model>::new().render();
}
