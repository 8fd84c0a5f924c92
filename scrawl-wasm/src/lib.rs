//! # scrawl-wasm: browser host for the shared whiteboard
//!
//! Wires a [`scrawl_core::Board`] to the page:
//!
//! ```text
//!  <canvas> mouse/touch ──▶ events::attach ──▶ Board::handle_input
//!  window resize        ──────────────────────▶ Board::resize
//!  Paho onMessageArrived ─────────────────────▶ Board::on_message
//!  requestAnimationFrame ─────────────────────▶ Board::tick
//! ```
//!
//! The board lives in an `Rc<RefCell<_>>` shared by those callbacks. They
//! all run on the page's single thread, so borrows never overlap; a
//! failed `try_borrow_mut` is logged and the event dropped.

pub mod bus;
pub mod canvas;
pub mod events;
pub mod logger;

use std::cell::RefCell;
use std::rc::Rc;

use scrawl_core::{Board, BoardConfig, LocalIdentity, OfflineTransport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

use bus::{PahoClient, WebTransport};
use canvas::CanvasSurface;

type WebBoard = Board<CanvasSurface, WebTransport>;

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Mount the whiteboard on the canvas with id `canvas_id`.
///
/// `config_json` is an optional, possibly partial, `BoardConfig` object.
#[wasm_bindgen]
pub fn start(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);

    let config = match config_json.as_deref() {
        Some(json) => BoardConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => BoardConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let element: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing canvas #{canvas_id}")))?
        .dyn_into()?;

    let identity = LocalIdentity::generate();
    let surface = CanvasSurface::new(element.clone())?;
    let client = PahoClient::create(&config.broker, identity.id());
    let transport = match &client {
        Some(client) => WebTransport::Paho(client.clone()),
        None => {
            log::warn!("Paho MQTT client not found on the page; drawing locally only");
            WebTransport::Offline(OfflineTransport)
        }
    };

    let broker = config.broker.clone();
    let board: Rc<RefCell<WebBoard>> = Rc::new(RefCell::new(Board::new(config, identity, surface, transport)));
    resize(&board);

    watch_resize(&window, &board)?;
    events::attach(&element, {
        let board = board.clone();
        move |input| match board.try_borrow_mut() {
            Ok(mut board) => board.handle_input(input),
            Err(_) => log::debug!("Board busy, dropping input"),
        }
    })?;

    if let Some(client) = client {
        connect_bus(&client, &broker, &board)?;
    }

    run_frames(board)
}

/// Change console verbosity (`"error"` … `"trace"`, `"off"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::init(logger::parse_level(level));
}

fn resize(board: &Rc<RefCell<WebBoard>>) {
    if let Ok(mut board) = board.try_borrow_mut() {
        let width = board.canvas().surface().container_width();
        board.resize(width);
    }
}

fn watch_resize(window: &Window, board: &Rc<RefCell<WebBoard>>) -> Result<(), JsValue> {
    let board = board.clone();
    let onresize = Closure::<dyn FnMut()>::new(move || resize(&board));
    window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
    onresize.forget();
    Ok(())
}

fn connect_bus(
    client: &PahoClient,
    broker: &scrawl_core::BrokerConfig,
    board: &Rc<RefCell<WebBoard>>,
) -> Result<(), JsValue> {
    {
        let board = board.clone();
        client.on_message(move |topic, payload| match board.try_borrow_mut() {
            Ok(mut board) => board.on_message(&topic, &payload, now_ms()),
            Err(_) => log::debug!("Board busy, dropping message"),
        });
    }
    {
        let board = board.clone();
        client.on_connection_lost(move |reason| match board.try_borrow_mut() {
            Ok(mut board) => board.on_connection_lost(&reason),
            Err(_) => log::debug!("Board busy, dropping connection-lost: {}", reason),
        });
    }

    let board = board.clone();
    log::info!("Connecting to {}:{}{}", broker.host, broker.port, broker.path);
    client.start_connect(broker, move || match board.try_borrow_mut() {
        Ok(mut board) => board.on_connected(),
        Err(_) => log::debug!("Board busy, dropping connected event"),
    })
}

/// Drive `Board::tick` from `requestAnimationFrame` until the page unloads.
fn run_frames(board: Rc<RefCell<WebBoard>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = holder.clone();
    let frame_window = window.clone();

    *holder.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        if let Ok(mut board) = board.try_borrow_mut() {
            board.tick(now_ms());
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = frame_window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed, frame loop stopped: {:?}", e);
            }
        }
    }));

    let scheduled = match holder.borrow().as_ref() {
        Some(callback) => window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(|_| ()),
        None => Err(JsValue::from_str("Frame callback missing")),
    };
    scheduled
}
