//! Navigation Component
//!
//! Header bar with the host list, search box and theme toggle.

use leptos::*;
use pc_status::view::{visible_hosts, Theme};

use crate::state::use_app_context;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let ctx = use_app_context();
    let dashboard = ctx.dashboard;

    let on_search = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        dashboard.update(|d| d.search = value);
    };

    view! {
        <nav class="sticky top-0 z-40 bg-gray-800/80 backdrop-blur-sm border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Host jump list and count
                    <div class="flex items-center space-x-3">
                        <HostMenu />
                        <span class="text-gray-300">{move || format!("PC: {}", ctx.host_count())}</span>
                    </div>

                    // Brand and search
                    <div class="flex items-center space-x-4">
                        <span class="text-xl font-bold">"PC Status"</span>
                        <input
                            type="text"
                            placeholder="Search here..."
                            class="w-64 h-10 px-3 rounded-lg bg-transparent border border-primary-500 focus:outline-none"
                            prop:value=move || dashboard.with(|d| d.search.clone())
                            on:input=on_search
                        />
                    </div>

                    // Theme
                    <button
                        class="px-3 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                        on:click=move |_| dashboard.update(|d| d.toggle_theme())
                    >
                        {move || match dashboard.with(|d| d.theme) {
                            Theme::Dark => "🌙",
                            Theme::Light => "☀",
                        }}
                    </button>
                </div>
            </div>
        </nav>
    }
}

/// Dropdown of anchors to the visible host cards
#[component]
fn HostMenu() -> impl IntoView {
    let ctx = use_app_context();
    let open = create_rw_signal(false);

    let hostnames = move || {
        let search = ctx.dashboard.with(|d| d.search.clone());
        ctx.status.with(|status| {
            status
                .as_ref()
                .map(|s| {
                    visible_hosts(s, &search)
                        .into_iter()
                        .map(|(_, host)| host.hostname.clone())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div
            class="relative"
            on:mouseenter=move |_| open.set(true)
            on:mouseleave=move |_| open.set(false)
        >
            <button class="px-3 py-2 rounded-lg text-gray-300 hover:bg-gray-700">"☰"</button>
            <Show when=move || open.get()>
                <ul class="absolute left-0 mt-1 w-52 max-h-96 overflow-auto bg-gray-800 rounded-lg shadow-lg p-1">
                    <li><a href="#" class="block px-3 py-1 rounded hover:bg-gray-700">"none"</a></li>
                    {move || {
                        hostnames()
                            .into_iter()
                            .map(|name| view! {
                                <li>
                                    <a href=format!("#{}", name) class="block px-3 py-1 rounded hover:bg-gray-700">
                                        {name.clone()}
                                    </a>
                                </li>
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
