//! Loading Component
//!
//! Full-screen gate shown until the dashboard can be displayed.

use leptos::*;
use pc_status::view::Screen;

/// Step indicator for the loading, connecting and error screens
#[component]
pub fn GateScreen(
    screen: Screen,
    /// Last connection error, shown on the error screen
    #[prop(optional)]
    detail: Option<String>,
) -> impl IntoView {
    let failed = screen == Screen::Error;

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center">
            <ul class="flex items-center space-x-6">
                {screen
                    .steps()
                    .iter()
                    .map(|step| {
                        let class = if *step == "Error" {
                            "px-4 py-2 rounded-full bg-red-600 text-white"
                        } else {
                            "px-4 py-2 rounded-full bg-primary-600 text-white"
                        };
                        view! { <li class=class>{*step}</li> }
                    })
                    .collect_view()}
            </ul>

            {(!failed).then(|| view! { <div class="loading-spinner w-8 h-8 mt-8" /> })}

            {failed.then(|| view! {
                <div class="mt-6 flex items-center space-x-3 bg-red-900/60 border border-red-600 text-red-200 px-4 py-3 rounded-lg">
                    <span class="text-lg">"✕"</span>
                    <div class="flex flex-col">
                        <span>"Connection failed. Please check your server connection."</span>
                        {detail.map(|d| view! { <span class="text-sm text-red-300">{d}</span> })}
                    </div>
                </div>
            })}
        </div>
    }
}
