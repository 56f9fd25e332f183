//! Progress Bar Component

use leptos::*;

/// Horizontal usage bar, `value` in percent
#[component]
pub fn ProgressBar(
    #[prop(into)]
    value: Signal<f64>,
    #[prop(default = "w-20")]
    class: &'static str,
) -> impl IntoView {
    let width = move || format!("width: {:.1}%", value.get().clamp(0.0, 100.0));

    view! {
        <div class=format!("h-2 bg-gray-700 rounded-full overflow-hidden {}", class)>
            <div class="h-full bg-primary-500 transition-all" style=width />
        </div>
    }
}
