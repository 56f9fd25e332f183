//! Focus Overlay Component
//!
//! Detailed modal view of one host with per-resource rows and history charts.

use leptos::*;
use pc_status::chart::ChartSpec;
use pc_status::view::{FocusCharts, FocusView};

use super::chart::Chart;
use super::progress::ProgressBar;
use crate::state::use_app_context;

/// Overlay for the focused host; closes on Escape
#[component]
pub fn FocusOverlay() -> impl IntoView {
    let ctx = use_app_context();
    let focused = create_memo(move |_| ctx.dashboard.with(|d| d.focused.clone()));

    let keydown = window_event_listener(ev::keydown, move |ev| {
        let mut dashboard = ctx.dashboard.get_untracked();
        if dashboard.on_key(&ev.key()) {
            ctx.dashboard.set(dashboard);
        }
    });
    on_cleanup(move || keydown.remove());

    move || focused.get().map(|id| view! { <FocusPanel id=id /> })
}

#[component]
fn FocusPanel(id: String) -> impl IntoView {
    let ctx = use_app_context();

    let host = create_memo(move |_| {
        ctx.status.with(|status| {
            status
                .as_ref()
                .and_then(|hosts| hosts.get(&id))
                .map(FocusView::new)
        })
    });

    let chart = move |pick: fn(&FocusCharts) -> Option<&ChartSpec>| {
        Signal::derive(move || {
            host.with(|v| {
                v.as_ref()
                    .and_then(|v| pick(&v.charts))
                    .cloned()
                    .unwrap_or_else(|| ChartSpec::new(Vec::new()))
            })
        })
    };
    let has_gpu = move || host.with(|v| v.as_ref().is_some_and(|v| v.charts.gpu.is_some()));
    let close = move |_| ctx.dashboard.update(|d| d.close_focus());

    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 backdrop-blur-sm">
            <div class="bg-gray-900 rounded-lg shadow-xl max-w-4xl w-full max-h-[90vh] overflow-hidden">
                <div class="flex justify-between items-center sticky top-0 bg-gray-900 shadow-lg py-2 px-5">
                    <h2 class="text-lg font-semibold">
                        {move || host.with(|v| format!("Focus - {}", v.as_ref().map(|v| v.hostname.as_str()).unwrap_or_default()))}
                    </h2>
                    <button class="w-8 h-8 rounded-full hover:bg-gray-700" on:click=close>"✕"</button>
                </div>

                <div class="overflow-y-auto max-h-[calc(90vh-60px)] px-6 py-3 space-y-2">
                    {move || host.get().map(|v| view! { <Header host=v /> })}

                    {move || host.get().map(|v| view! { <CpuRows host=v /> })}
                    <Chart spec=chart(|c| Some(&c.cpu)) />

                    {move || host.get().map(|v| view! { <MemoryRows host=v /> })}
                    <Chart spec=chart(|c| Some(&c.memory)) />

                    {move || host.get().map(|v| view! { <StorageRows host=v /> })}
                    <Chart spec=chart(|c| Some(&c.storage)) />

                    {move || host.get().map(|v| view! { <SystemRows host=v /> })}
                    <Show when=has_gpu>
                        <Chart spec=chart(|c| c.gpu.as_ref()) />
                    </Show>

                    {move || host.get().map(|v| view! { <LoadAndNetwork host=v /> })}
                </div>
            </div>
        </div>
    }
}

#[component]
fn Divider() -> impl IntoView {
    view! { <div class="bg-gray-700 w-full h-0.5 rounded my-2" /> }
}

/// Label, bar and floored percentage on one line
#[component]
fn UsageLine(#[prop(optional)] label: Option<String>, percent: f64) -> impl IntoView {
    view! {
        <div class="flex items-center">
            {label.map(|l| view! { <p>{l}</p> })}
            <ProgressBar value=Signal::derive(move || percent) class="w-full mx-3" />
            <p>{format!("{}%", percent.floor())}</p>
        </div>
    }
}

#[component]
fn Header(host: FocusView) -> impl IntoView {
    view! {
        <div class="flex items-center">
            <img src=host.icon alt=format!("{} icon", host.os) width="48" height="48" />
            <p class="px-2">{host.os.clone()}</p>
        </div>
    }
}

#[component]
fn CpuRows(host: FocusView) -> impl IntoView {
    view! {
        <Divider />
        <p>{format!("CPU: {}", host.cpu_model)}</p>
        <UsageLine percent=host.cpu_total />
        <ul>
            {host
                .cores
                .into_iter()
                .map(|core| view! {
                    <li><UsageLine label=format!("{}:", core.label) percent=core.percent /></li>
                })
                .collect_view()}
        </ul>
    }
}

#[component]
fn MemoryRows(host: FocusView) -> impl IntoView {
    view! {
        <Divider />
        <p>{format!("RAM: {}", host.ram.usage)}</p>
        <UsageLine percent=host.ram.percent />
        {host.swap.map(|swap| view! {
            <Divider />
            <p>{format!("Swap: {}", swap.usage)}</p>
            <UsageLine percent=swap.percent />
        })}
    }
}

#[component]
fn StorageRows(host: FocusView) -> impl IntoView {
    view! {
        <Divider />
        <p>"Storages:"</p>
        <ul class="space-y-1">
            {host
                .storages
                .into_iter()
                .map(|s| view! {
                    <li class="border-2 border-gray-600 p-1">
                        <p>{format!("{}: {}", s.index, s.name)}</p>
                        <UsageLine percent=s.percent />
                        <p>{format!("Usage: {}", s.usage)}</p>
                    </li>
                })
                .collect_view()}
        </ul>
    }
}

#[component]
fn SystemRows(host: FocusView) -> impl IntoView {
    let gpu_count = host.gpus.len();

    view! {
        <Divider />
        <p>{format!("Uptime: {} (raw: {})", host.uptime, host.uptime_raw)}</p>
        {(gpu_count > 0).then(|| view! {
            <Divider />
            <p>{format!("GPUs ({} detected):", gpu_count)}</p>
            {host
                .gpus
                .into_iter()
                .enumerate()
                .map(|(i, gpu)| view! {
                    <div class="mb-4">
                        <p class="font-semibold">{format!("GPU {}: {}", i + 1, gpu.name)}</p>
                        <UsageLine percent=gpu.usage />
                        <p>{format!("VRAM: {}", gpu.vram)}</p>
                        <UsageLine percent=gpu.vram_percent />
                    </div>
                })
                .collect_view()}
        })}
    }
}

#[component]
fn LoadAndNetwork(host: FocusView) -> impl IntoView {
    view! {
        {host.loadavg.map(|[one, five, fifteen]| view! {
            <Divider />
            <p>"Load Average:"</p>
            <p>{format!("1Min: {}", one)}</p>
            <p>{format!("5Min: {}", five)}</p>
            <p>{format!("15Min: {}", fifteen)}</p>
        })}
        {(!host.networks.is_empty()).then(|| view! {
            <Divider />
            <p>"Networks:"</p>
            <ul class="space-y-1">
                {host
                    .networks
                    .into_iter()
                    .map(|net| view! {
                        <li class="border-2 border-gray-600 p-1">
                            <p>{net.name}</p>
                            <p>{format!("rx: {}", net.received)}</p>
                            <p>{format!("tx: {}", net.transmitted)}</p>
                        </li>
                    })
                    .collect_view()}
            </ul>
        })}
    }
}
