use globe_core::GlobeError;
use smallvec::SmallVec;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub mod pointer;

pub type EventClosure = Closure<dyn FnMut(web::Event)>;

/// One registered DOM listener. Keeps its closure alive while attached.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: EventClosure,
}

impl Listener {
    /// Unregister and hand back the closure. The caller must keep it alive
    /// if the callback may still be on the stack.
    pub fn detach(self) -> EventClosure {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] failed to remove {} listener: {e:?}", self.kind);
        }
        self.closure
    }
}

// pointer down/move/up/leave/enter/cancel + window resize
pub type ListenerSet = SmallVec<[Listener; 7]>;

pub fn listen(
    target: &web::EventTarget,
    kind: &'static str,
    closure: EventClosure,
) -> Result<Listener, GlobeError> {
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(|e| GlobeError::Listener(format!("{kind}: {e:?}")))?;
    Ok(Listener {
        target: target.clone(),
        kind,
        closure,
    })
}
