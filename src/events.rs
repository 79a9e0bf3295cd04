//! Named sheet events and the handlers registered for them.

/// Something that happened on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEvent {
    /// One of the row's flags changed.
    RowChanged(usize),
    /// The session report was asked for.
    ReportRequested,
    /// A new row was appended at this index.
    RowAdded(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    RowChanged,
    ReportRequested,
    RowAdded,
}

impl SheetEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SheetEvent::RowChanged(_) => EventKind::RowChanged,
            SheetEvent::ReportRequested => EventKind::ReportRequested,
            SheetEvent::RowAdded(_) => EventKind::RowAdded,
        }
    }
}

type Handler<S> = Box<dyn FnMut(&mut S, &SheetEvent)>;

/// Runs every handler registered for an event, synchronously and in registration order.
pub struct Dispatcher<S> {
    handlers: Vec<(EventKind, Handler<S>)>,
}

impl<S> Dispatcher<S> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut S, &SheetEvent) + 'static,
    {
        self.handlers.push((kind, Box::new(handler)));
    }

    /// Returns the number of handlers that ran.
    pub fn dispatch(&mut self, state: &mut S, event: &SheetEvent) -> usize {
        let kind = event.kind();
        let mut ran = 0;
        for (_, handler) in self.handlers.iter_mut().filter(|(k, _)| *k == kind) {
            handler(state, event);
            ran += 1;
        }
        ran
    }
}

impl<S> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_only_to_matching_handlers_in_order() {
        let mut dispatcher: Dispatcher<Vec<String>> = Dispatcher::new();
        dispatcher.on(EventKind::RowChanged, |log, event| {
            log.push(format!("first {event:?}"))
        });
        dispatcher.on(EventKind::RowAdded, |log, _| log.push("added".to_string()));
        dispatcher.on(EventKind::RowChanged, |log, _| log.push("second".to_string()));

        let mut log = Vec::new();
        assert_eq!(dispatcher.dispatch(&mut log, &SheetEvent::RowChanged(2)), 2);
        assert_eq!(log, vec!["first RowChanged(2)", "second"]);

        assert_eq!(dispatcher.dispatch(&mut log, &SheetEvent::ReportRequested), 0);
        assert_eq!(log.len(), 2);
    }
}
