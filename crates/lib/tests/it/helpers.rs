use roz::Document;
use serde_json::json;

// ==========================
// DOCUMENT FIXTURES
// ==========================

/// A small settings document.
pub fn basic_state() -> Document {
    json!({
        "app_version": "1.0.0",
        "user_settings": {
            "theme": "dark",
            "notifications_enabled": true
        }
    })
}

/// A nested game world with players, characters and rooms.
pub fn gameworld_state() -> Document {
    json!({
        "app_version": "1.0.0",
        "user_settings": {
            "theme": "light",
            "notifications_enabled": false
        },
        "game_state": {
            "current_time": "2025-06-06T08:00:00Z",
            "active_player_id": "player_alpha"
        },
        "players": {
            "player_alpha": {
                "username": "Alpha",
                "character_id": "char_hero"
            }
        },
        "characters": {
            "char_hero": {
                "name": "Hero",
                "health": 100,
                "current_room_id": "room_start"
            }
        },
        "rooms": {
            "room_start": {
                "name": "Starting Area",
                "description": "A quiet beginning.",
                "exits": {"north": "room_forest"}
            }
        }
    })
}

/// A document with arrays at several depths.
pub fn list_state() -> Document {
    json!({
        "list": [0, 1, 2],
        "inventory": [
            {"item": "sword", "tags": ["sharp", "steel"]},
            {"item": "shield", "tags": []}
        ]
    })
}
