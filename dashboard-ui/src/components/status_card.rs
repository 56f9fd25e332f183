//! Status Card Component
//!
//! Summary card for one host in the dashboard grid.

use leptos::*;
use pc_status::view::HostSummary;

use super::progress::ProgressBar;
use crate::state::use_app_context;

/// Card with CPU, RAM, storage and GPU summary of one host
#[component]
pub fn StatusCard(id: String) -> impl IntoView {
    let ctx = use_app_context();

    let summary = {
        let id = id.clone();
        create_memo(move |_| {
            ctx.status.with(|status| {
                status
                    .as_ref()
                    .and_then(|hosts| hosts.get(&id))
                    .map(|host| HostSummary::new(&id, host))
            })
        })
    };

    let on_focus = move |_| ctx.dashboard.update(|d| d.open_focus(&id));

    view! {
        {move || summary.get().map(|s| {
            let cpu = s.cpu;
            let ram = s.ram;
            let storage = s.storage;
            let caption = s.gpu_caption();

            view! {
                <div id=s.hostname.clone() class="bg-gray-800 rounded-lg shadow-lg p-4 text-center">
                    <img src=s.icon.clone() alt=format!("{} icon", s.os) width="48" height="48" class="mx-auto" />

                    <h2 class="flex items-center justify-between text-lg font-bold mt-2">
                        <span>{s.hostname.clone()}</span>
                        <button
                            class="px-3 py-1 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700"
                            on:click=on_focus.clone()
                        >
                            "Focus"
                        </button>
                    </h2>

                    <p class="text-sm text-gray-400">{format!("used version: {}", s.version)}</p>

                    <div class="grid grid-cols-3 gap-2 mt-4">
                        <Stat label="CPU" value=cpu />
                        <Stat label="RAM" value=ram />
                        <Stat label="Storage" value=storage />
                    </div>

                    <div class="mt-4 text-left">
                        <div class="text-sm text-gray-400">"GPU"</div>
                        {if s.gpus.is_empty() {
                            view! { <div class="text-sm">"No GPU"</div> }.into_view()
                        } else {
                            s.gpus
                                .iter()
                                .map(|name| view! { <div class="text-sm mb-1">{name.clone()}</div> })
                                .collect_view()
                        }}
                        <div class="text-xs text-gray-500">{caption}</div>
                    </div>
                </div>
            }
        })}
    }
}

#[component]
fn Stat(label: &'static str, value: f64) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center">
            <div class="text-sm text-gray-400">{label}</div>
            <div class="text-2xl font-bold">{format!("{}%", value)}</div>
            <ProgressBar value=Signal::derive(move || value) />
        </div>
    }
}
