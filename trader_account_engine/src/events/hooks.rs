use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, LoyaltyChangeEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub loyalty_change_producer: Vec<EventProducer<LoyaltyChangeEvent>>,
}

pub struct EventHandlers {
    pub on_loyalty_change: Option<EventHandler<LoyaltyChangeEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_loyalty_change = hooks.on_loyalty_change.map(|f| EventHandler::new(buffer_size, f));
        Self { on_loyalty_change }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_loyalty_change {
            result.loyalty_change_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_loyalty_change {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_loyalty_change: Option<Handler<LoyaltyChangeEvent>>,
}

impl EventHooks {
    pub fn on_loyalty_change<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(LoyaltyChangeEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_loyalty_change = Some(Arc::new(f));
        self
    }
}
