//! Browser Live Connection
//!
//! Drives the `ConnectionManager` from `WebSocket` callbacks and gloo timers
//! and mirrors its state into the [`AppContext`] signals.
//!
//! Callbacks hold a `Weak` reference to the link so that the link, which owns
//! the callbacks, can be dropped.

use gloo_timers::callback::Timeout;
use leptos::*;
use pc_status::live::{
    Command, ConnectionManager, Endpoint, ReconnectPolicy, Toast, ToastChannel,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::context::AppContext;

/// Path of the push endpoint on the page origin
const PUSH_PATH: &str = "/server";

/// Callbacks attached to one socket
struct Handlers {
    _on_open: Closure<dyn FnMut(JsValue)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

struct Link {
    this: Weak<RefCell<Link>>,
    ctx: AppContext,
    manager: ConnectionManager,
    toasts: ToastChannel,
    socket: Option<WebSocket>,
    handlers: Option<Handlers>,
    /// Handlers of closed sockets; a callback cannot free itself
    retired: Vec<Handlers>,
    reconnect: Option<Timeout>,
    dismiss: Option<Timeout>,
}

/// Owned handle to the live connection of the dashboard
pub struct LiveLink {
    inner: Rc<RefCell<Link>>,
}

impl LiveLink {
    /// Build the manager for the current page and start connecting
    pub fn start(ctx: AppContext) -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        let endpoint = Endpoint::new(&origin, PUSH_PATH)
            .configured(option_env!("PC_STATUS_WS_URL").map(str::to_string));

        let inner = Rc::new_cyclic(|this| {
            RefCell::new(Link {
                this: this.clone(),
                ctx,
                manager: ConnectionManager::new(endpoint, ReconnectPolicy::default()),
                toasts: ToastChannel::new(),
                socket: None,
                handlers: None,
                retired: Vec::new(),
                reconnect: None,
                dismiss: None,
            })
        });

        {
            let mut link = inner.borrow_mut();
            let commands = link.manager.connect();
            link.run(commands);
        }

        Self { inner }
    }

    /// Cancel timers and close the socket
    pub fn dispose(&self) {
        let mut link = self.inner.borrow_mut();
        let commands = link.manager.dispose();
        link.run(commands);
        link.detach();
        link.dismiss = None;
    }
}

impl Link {
    fn run(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Open(url) => self.open(url.as_str()),
                Command::Close => {
                    if let Some(ws) = &self.socket {
                        let _ = ws.close();
                    }
                }
                Command::ScheduleReconnect { delay, attempt } => {
                    web_sys::console::log_1(
                        &format!("Reconnecting in {}ms (attempt {})", delay.as_millis(), attempt)
                            .into(),
                    );
                    let this = self.this.clone();
                    self.reconnect = Some(Timeout::new(delay.as_millis() as u32, move || {
                        with_link(&this, |link| {
                            let commands = link.manager.on_reconnect_timer();
                            link.run(commands);
                        });
                    }));
                }
                Command::CancelReconnect => self.reconnect = None,
                Command::Notify(data) => self.notify(Toast::from(data)),
            }
        }
        self.publish();
    }

    fn open(&mut self, url: &str) {
        self.detach();
        self.retired.clear();

        match WebSocket::new(url) {
            Ok(ws) => {
                web_sys::console::log_1(&format!("Connecting to {}", url).into());
                let handlers = self.attach(&ws);
                self.socket = Some(ws);
                self.handlers = Some(handlers);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("WebSocket connection failed: {:?}", e).into());
                let commands = self.manager.on_transport_failed(&format!("{:?}", e));
                self.run(commands);
            }
        }
    }

    fn attach(&self, ws: &WebSocket) -> Handlers {
        let this = self.this.clone();
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"WebSocket connected".into());
            with_link(&this, |link| {
                link.manager.on_open();
                link.publish();
            });
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let this = self.this.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                return;
            };
            with_link(&this, |link| {
                let commands = link.manager.on_message(&text);
                link.run(commands);
            });
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let this = self.this.clone();
        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            web_sys::console::error_1(&format!("WebSocket error: {:?}", e).into());
            with_link(&this, |link| {
                link.manager.on_error("");
                link.publish();
            });
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let this = self.this.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!("WebSocket closed: code={}, reason={}", event.code(), event.reason())
                    .into(),
            );
            with_link(&this, |link| {
                link.socket = None;
                if let Some(handlers) = link.handlers.take() {
                    link.retired.push(handlers);
                }
                let commands = link.manager.on_close(Some(event.code()), &event.reason());
                link.run(commands);
            });
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        Handlers {
            _on_open: on_open,
            _on_message: on_message,
            _on_error: on_error,
            _on_close: on_close,
        }
    }

    /// Unhook the current socket so late events are not delivered
    fn detach(&mut self) {
        if let Some(ws) = self.socket.take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
        }
        self.handlers = None;
    }

    fn notify(&mut self, toast: Toast) {
        let ticket = self.toasts.show(toast);
        let this = self.this.clone();
        self.dismiss = Some(Timeout::new(ticket.after.as_millis() as u32, move || {
            with_link(&this, |link| {
                if link.toasts.dismiss(ticket.generation) {
                    link.ctx.toast.set(None);
                }
            });
        }));
        self.ctx.toast.set(self.toasts.current().cloned());
    }

    /// Mirror the manager into the signals
    fn publish(&self) {
        let ctx = self.ctx;
        let manager = &self.manager;

        set_if_changed(ctx.connected, manager.connected());
        set_if_changed(ctx.terminal, manager.is_terminal());
        set_if_changed(ctx.error, manager.error().map(str::to_string));
        set_if_changed(ctx.last_update, manager.store().last_update());
        set_if_changed(ctx.status, manager.status().cloned());
    }
}

fn with_link(this: &Weak<RefCell<Link>>, f: impl FnOnce(&mut Link)) {
    if let Some(link) = this.upgrade() {
        f(&mut link.borrow_mut());
    }
}

fn set_if_changed<T: PartialEq + 'static>(signal: RwSignal<T>, value: T) {
    if signal.with_untracked(|current| *current != value) {
        signal.set(value);
    }
}
