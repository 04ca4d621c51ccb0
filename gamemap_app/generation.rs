use gamemap_types::game::GameId;

/// Monotonic counter for one asynchronously loaded resource.
///
/// Every load takes a ticket before going to the network; its completion is
/// applied only while the ticket is still the latest one issued.
#[derive(Debug, Default)]
pub struct Generation {
    latest: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub game_id: GameId,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, game_id: GameId) -> LoadTicket {
        self.latest += 1;
        LoadTicket {
            generation: self.latest,
            game_id,
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.latest
    }

    /// Makes every outstanding ticket stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}
