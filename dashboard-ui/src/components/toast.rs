//! Toast Notification Component
//!
//! Shows the server's connection notices.

use leptos::*;
use pc_status::live::Severity;

use crate::state::use_app_context;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="fixed top-20 right-4 z-50 space-y-2">
            {move || {
                ctx.toast.get().map(|toast| {
                    let (icon, text_class) = match toast.severity {
                        Severity::Error => ("✕", "text-red-400"),
                        Severity::Info => ("ℹ", "text-blue-400"),
                        Severity::Neutral => ("•", "text-gray-200"),
                    };
                    let border = if toast.color.is_empty() {
                        String::new()
                    } else {
                        format!("border-left: 4px solid {}", toast.color)
                    };

                    view! {
                        <div
                            class=format!(
                                "flex items-center space-x-3 {} bg-gray-800/80 backdrop-blur-sm \
                                 px-4 py-3 rounded-lg shadow-lg animate-slide-in",
                                text_class
                            )
                            style=border
                        >
                            <span class="text-lg">{icon}</span>
                            <span class="text-sm font-medium">{toast.message}</span>
                            <button
                                class="text-gray-400 hover:text-white"
                                on:click=move |_| ctx.toast.set(None)
                            >
                                "✕"
                            </button>
                        </div>
                    }
                })
            }}
        </div>
    }
}
