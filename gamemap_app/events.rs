use serde::Serialize;

use gamemap_types::{game::GameId, marker::MarkerId};

/// Actions raised by popup buttons and sidebar rows. They carry only the
/// marker id; the controller looks the marker up in its own store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAction {
    Focus(MarkerId),
    Edit(MarkerId),
    Delete(MarkerId),
}

impl MarkerAction {
    pub fn parse(action: &str, id: MarkerId) -> Option<Self> {
        match action {
            "focus" => Some(MarkerAction::Focus(id)),
            "edit" => Some(MarkerAction::Edit(id)),
            "delete" => Some(MarkerAction::Delete(id)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkerAction::Focus(_) => "focus",
            MarkerAction::Edit(_) => "edit",
            MarkerAction::Delete(_) => "delete",
        }
    }

    pub fn marker_id(&self) -> MarkerId {
        match self {
            MarkerAction::Focus(id) | MarkerAction::Edit(id) | MarkerAction::Delete(id) => *id,
        }
    }
}

/// Destructive action waiting for the user's confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PendingAction {
    DeleteMarker(MarkerId),
    DeleteGame(GameId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmPrompt {
    pub action: PendingAction,
    pub message: &'static str,
}

impl ConfirmPrompt {
    pub fn delete_marker(id: MarkerId) -> Self {
        Self {
            action: PendingAction::DeleteMarker(id),
            message: "Delete this marker?",
        }
    }

    pub fn delete_game(id: GameId) -> Self {
        Self {
            action: PendingAction::DeleteGame(id),
            message: "Delete the currently loaded map and all its markers? This cannot be undone.",
        }
    }
}

/// Alert shown to the user once, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions_only() {
        assert_eq!(MarkerAction::parse("edit", 4), Some(MarkerAction::Edit(4)));
        assert_eq!(MarkerAction::parse("delete", 4).unwrap().name(), "delete");
        assert_eq!(MarkerAction::parse("focus", 9).unwrap().marker_id(), 9);
        assert_eq!(MarkerAction::parse("explode", 4), None);
    }
}
