/// Per-component request generation counter.
///
/// Starting a request hands out a [`Ticket`] for the current generation.
/// Closing or reopening the component advances the generation, so a
/// completion that arrives afterwards no longer matches and is dropped.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}
