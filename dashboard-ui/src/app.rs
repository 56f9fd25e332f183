//! App Root Component
//!
//! Owns the application context and the live connection, and switches
//! between the gate screens and the dashboard.

use leptos::*;
use pc_status::view::{visible_hosts, Screen};

use crate::components::{FocusOverlay, GateScreen, Nav, StatusCard, Toast};
use crate::state::{provide_app_context, use_app_context, LiveLink};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let ctx = provide_app_context();

    // Start the push connection; closed again when the root unmounts
    let link = LiveLink::start(ctx);
    on_cleanup(move || link.dispose());

    // The loading gate stays up until the first frame
    request_animation_frame(move || ctx.ready.set(true));

    // Theme lives on the document element
    create_effect(move |_| {
        let theme = ctx.dashboard.with(|d| d.theme);
        if let Some(root) = document().document_element() {
            let _ = root.set_attribute("data-theme", theme.attribute());
        }
    });

    // Drop the focus when its host leaves the mapping
    create_effect(move |_| {
        ctx.status.with(|status| {
            let stale = ctx.dashboard.with_untracked(|d| {
                let mut next = d.clone();
                next.reconcile(status.as_ref());
                (next != *d).then_some(next)
            });
            if let Some(next) = stale {
                ctx.dashboard.set(next);
            }
        });
    });

    let screen = create_memo(move |_| ctx.screen());

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            {move || match screen.get() {
                Screen::Dashboard => view! { <Dashboard /> }.into_view(),
                Screen::Error => view! { <GateScreen screen=Screen::Error detail=ctx.error.get_untracked() /> }.into_view(),
                other => view! { <GateScreen screen=other /> }.into_view(),
            }}

            // Toast notifications
            <Toast />
        </div>
    }
}

/// Host grid with navigation and focus overlay
#[component]
fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();

    let host_ids = move || {
        let search = ctx.dashboard.with(|d| d.search.clone());
        ctx.status.with(|status| {
            status
                .as_ref()
                .map(|s| {
                    visible_hosts(s, &search)
                        .into_iter()
                        .map(|(id, _)| id.to_string())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    view! {
        // Navigation header
        <Nav />

        // Main content area
        <main class="flex-1 container mx-auto px-4 py-8 pb-24">
            <ul class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4">
                <For
                    each=host_ids
                    key=|id| id.clone()
                    children=move |id| view! { <li><StatusCard id=id /></li> }
                />
            </ul>
        </main>

        <FocusOverlay />

        // Footer with connection status
        <Footer />
    }
}

/// Footer component showing connection status
#[component]
fn Footer() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Connection status
                <div class="flex items-center space-x-2">
                    {move || {
                        if ctx.connected.get() {
                            view! {
                                <span class="flex items-center space-x-1 text-green-400">
                                    <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                    <span>"Connected"</span>
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <span class="flex items-center space-x-1 text-red-400">
                                    <span class="w-2 h-2 bg-red-400 rounded-full" />
                                    <span>"Disconnected"</span>
                                </span>
                            }.into_view()
                        }
                    }}
                </div>

                // Last status time
                <div class="text-gray-400">
                    {move || {
                        ctx.last_update.get()
                            .map(|dt| format!("Last update: {}", dt.with_timezone(&chrono::Local).format("%H:%M:%S")))
                            .unwrap_or_else(|| "No data yet".to_string())
                    }}
                </div>
            </div>
        </footer>
    }
}
