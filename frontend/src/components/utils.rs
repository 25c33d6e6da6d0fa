use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::Prediction;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Pull the first selected file out of the input, enforcing the image-only
/// constraint before anything touches the network.
pub fn first_image_file(file_list: &FileList) -> Result<GlooFile, String> {
    let file = (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .next()
        .ok_or_else(|| "No file selected.".to_string())?;

    if !file.type_().starts_with("image/") {
        return Err(format!("Not an image file: {}", file.name()));
    }

    Ok(GlooFile::from(file))
}

pub fn render_error(error: Option<&str>) -> Html {
    match error {
        Some(message) => html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ message }</p>
            </div>
        },
        None => html! {},
    }
}

pub fn render_prediction(prediction: Option<&Prediction>) -> Html {
    match prediction {
        Some(prediction) => html! {
            <div class="prediction-card">
                <h3>{"Prediction"}</h3>
                <p>{ format!("Waste: {}", prediction.waste_type) }</p>
                <p>{ format!("Route: {}", prediction.route) }</p>
                <p>{ format!("Carbon: {}", prediction.carbon_impact) }</p>
            </div>
        },
        None => html! {},
    }
}
