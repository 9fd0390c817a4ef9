use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

pub mod api;

pub use api::*;

/// An event fired by the host that handlers can observe or modify.
///
/// Implemented through `#[derive(Event)]`.
pub trait Event: Send + Sync {
    fn get_name_static() -> &'static str
    where
        Self: Sized;

    fn get_name(&self) -> &'static str;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn as_any(&self) -> &dyn Any;
}

/// An event the host may skip acting on. Implemented through `#[cancellable]`.
pub trait Cancellable: Send + Sync {
    fn cancelled(&self) -> bool;

    fn set_cancelled(&mut self, cancelled: bool);
}

/// Reacts to one kind of event.
///
/// Blocking handlers get the event mutably and run before the event is handed back to the
/// host. Non-blocking handlers only see the final event.
#[async_trait]
pub trait EventHandler<E: Event>: Send + Sync {
    async fn handle(&self, _event: &E) {}

    async fn handle_blocking(&self, _event: &mut E) {}
}

/// Order in which blocking handlers of the same event run, `Highest` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventPriority {
    Highest,
    High,
    Normal,
    Low,
    Lowest,
}

#[async_trait]
trait DynEventHandler: Send + Sync {
    async fn handle_dyn(&self, event: &dyn Event);
    async fn handle_blocking_dyn(&self, event: &mut dyn Event);
    fn is_blocking(&self) -> bool;
    fn priority(&self) -> EventPriority;
}

struct TypedEventHandler<E, H> {
    handler: Arc<H>,
    priority: EventPriority,
    blocking: bool,
    _phantom: PhantomData<E>,
}

#[async_trait]
impl<E, H> DynEventHandler for TypedEventHandler<E, H>
where
    E: Event + 'static,
    H: EventHandler<E> + 'static,
{
    async fn handle_dyn(&self, event: &dyn Event) {
        if let Some(event) = event.as_any().downcast_ref::<E>() {
            self.handler.handle(event).await;
        }
    }

    async fn handle_blocking_dyn(&self, event: &mut dyn Event) {
        if let Some(event) = event.as_any_mut().downcast_mut::<E>() {
            self.handler.handle_blocking(event).await;
        }
    }

    fn is_blocking(&self) -> bool {
        self.blocking
    }

    fn priority(&self) -> EventPriority {
        self.priority
    }
}

/// Dispatches host events to the registered handlers.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<&'static str, Vec<Box<dyn DynEventHandler>>>,
}

impl EventBus {
    pub fn register<E, H>(&mut self, handler: Arc<H>, priority: EventPriority, blocking: bool)
    where
        E: Event + 'static,
        H: EventHandler<E> + 'static,
    {
        let handlers = self.handlers.entry(E::get_name_static()).or_default();
        handlers.push(Box::new(TypedEventHandler {
            handler,
            priority,
            blocking,
            _phantom: PhantomData::<E>,
        }));
        handlers.sort_by_key(|handler| handler.priority());
        log::debug!(
            "Registered {} handler for {} ({priority:?})",
            if blocking { "blocking" } else { "non-blocking" },
            E::get_name_static()
        );
    }

    /// Runs every handler for `event` and returns it, possibly modified.
    pub async fn fire<E: Event + 'static>(&self, mut event: E) -> E {
        if let Some(handlers) = self.handlers.get(E::get_name_static()) {
            for handler in handlers.iter().filter(|handler| handler.is_blocking()) {
                handler.handle_blocking_dyn(&mut event).await;
            }
            for handler in handlers.iter().filter(|handler| !handler.is_blocking()) {
                handler.handle_dyn(&event).await;
            }
        }
        event
    }

    #[must_use]
    pub fn handler_count(&self, name: &str) -> usize {
        self.handlers.get(name).map_or(0, Vec::len)
    }
}
