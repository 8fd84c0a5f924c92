//! Binding to the page's Paho MQTT client (`Paho.Client`).
//!
//! The library is looked up at runtime. If the page did not load it, the
//! board runs on [`OfflineTransport`] as a single-user whiteboard.

use js_sys::{Function, Object, Reflect};
use scrawl_core::{BrokerConfig, OfflineTransport, Transport, TransportError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// A `Paho.Client` instance.
    #[derive(Clone)]
    pub type PahoClient;

    #[wasm_bindgen(method, js_name = isConnected)]
    fn is_connected(this: &PahoClient) -> bool;

    #[wasm_bindgen(method, catch)]
    fn connect(this: &PahoClient, options: &Object) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn subscribe(this: &PahoClient, topic: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn send(this: &PahoClient, topic: &str, payload: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, setter = onMessageArrived)]
    fn set_on_message_arrived(this: &PahoClient, callback: &Function);

    #[wasm_bindgen(method, setter = onConnectionLost)]
    fn set_on_connection_lost(this: &PahoClient, callback: &Function);
}

impl PahoClient {
    /// `new Paho.Client(host, port, path, clientId)`, or `None` when the
    /// library is not on the page.
    pub fn create(broker: &BrokerConfig, client_id: &str) -> Option<PahoClient> {
        let global = js_sys::global();
        let ctor = Reflect::get(&global, &"Paho".into())
            .ok()
            .filter(|paho| !paho.is_undefined())
            .and_then(|paho| Reflect::get(&paho, &"Client".into()).ok())
            .and_then(|ctor| ctor.dyn_into::<Function>().ok())?;

        let args = js_sys::Array::of4(
            &broker.host.as_str().into(),
            &JsValue::from(broker.port),
            &broker.path.as_str().into(),
            &client_id.into(),
        );
        match Reflect::construct(&ctor, &args) {
            Ok(client) => Some(client.unchecked_into()),
            Err(e) => {
                log::error!("Paho.Client construction failed: {:?}", e);
                None
            }
        }
    }

    /// Install the inbound message callback: `(topic, payload)`.
    pub fn on_message(&self, mut handler: impl FnMut(String, String) + 'static) {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |message: JsValue| {
            let topic = string_prop(&message, "destinationName");
            match string_prop(&message, "payloadString") {
                Some(payload) => handler(topic.unwrap_or_default(), payload),
                None => log::warn!("Discarding non-text message"),
            }
        });
        self.set_on_message_arrived(callback.as_ref().unchecked_ref());
        callback.forget();
    }

    /// Install the connection-lost callback with Paho's error message.
    pub fn on_connection_lost(&self, mut handler: impl FnMut(String) + 'static) {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
            let reason = string_prop(&response, "errorMessage").unwrap_or_else(|| "unknown".to_string());
            handler(reason);
        });
        self.set_on_connection_lost(callback.as_ref().unchecked_ref());
        callback.forget();
    }

    /// Start connecting. `on_success` runs once the broker accepts us.
    pub fn start_connect(
        &self,
        broker: &BrokerConfig,
        on_success: impl FnOnce() + 'static,
    ) -> Result<(), JsValue> {
        let options = Object::new();
        Reflect::set(&options, &"useSSL".into(), &JsValue::from(broker.use_ssl))?;
        Reflect::set(
            &options,
            &"keepAliveInterval".into(),
            &JsValue::from(broker.keep_alive_secs),
        )?;

        let success = Closure::once_into_js(on_success);
        Reflect::set(&options, &"onSuccess".into(), &success)?;

        let failure = Closure::once_into_js(move |response: JsValue| {
            let reason = string_prop(&response, "errorMessage").unwrap_or_else(|| "unknown".to_string());
            log::warn!("Bus connect failed, staying local-only: {}", reason);
        });
        Reflect::set(&options, &"onFailure".into(), &failure)?;

        self.connect(&options)
    }
}

fn string_prop(value: &JsValue, name: &str) -> Option<String> {
    Reflect::get(value, &name.into()).ok().and_then(|v| v.as_string())
}

/// Transport handed to the board: Paho when available, offline otherwise.
pub enum WebTransport {
    Paho(PahoClient),
    Offline(OfflineTransport),
}

impl Transport for WebTransport {
    fn is_connected(&self) -> bool {
        match self {
            WebTransport::Paho(client) => client.is_connected(),
            WebTransport::Offline(offline) => offline.is_connected(),
        }
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), TransportError> {
        match self {
            WebTransport::Paho(client) => client
                .subscribe(topic)
                .map_err(|e| TransportError::Subscribe(format!("{:?}", e))),
            WebTransport::Offline(offline) => offline.subscribe(topic),
        }
    }

    fn send(&mut self, topic: &str, payload: &str) -> Result<(), TransportError> {
        match self {
            WebTransport::Paho(client) => client
                .send(topic, payload)
                .map_err(|e| TransportError::Send(format!("{:?}", e))),
            WebTransport::Offline(offline) => offline.send(topic, payload),
        }
    }
}
