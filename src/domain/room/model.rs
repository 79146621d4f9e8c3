//! Room domain entity

/// Bookable hotel room
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Unique room ID (0 until the store assigns one)
    pub id: i32,
    /// Display label, e.g. "101"
    pub number: String,
    /// Category, e.g. "standard" or "suite"
    pub room_type: String,
    pub description: Option<String>,
    /// Price per night in minor currency units
    pub nightly_rate: i64,
    /// Disabled rooms accept no new reservations
    pub enabled: bool,
}

impl Room {
    pub fn new(number: impl Into<String>, room_type: impl Into<String>, nightly_rate: i64) -> Self {
        Self {
            id: 0,
            number: number.into(),
            room_type: room_type.into(),
            description: None,
            nightly_rate,
            enabled: true,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_of_type(&self, room_type: &str) -> bool {
        self.room_type.eq_ignore_ascii_case(room_type)
    }

    /// Price of `nights` nights in minor units
    pub fn price_for(&self, nights: i64) -> i64 {
        self.nightly_rate.saturating_mul(nights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_is_enabled() {
        let mut room = Room::new("101", "standard", 8_000);
        assert!(room.enabled);
        room.disable();
        assert!(!room.enabled);
        room.enable();
        assert!(room.enabled);
    }

    #[test]
    fn room_type_match_ignores_case() {
        let room = Room::new("201", "Suite", 20_000);
        assert!(room.is_of_type("suite"));
        assert!(!room.is_of_type("standard"));
    }

    #[test]
    fn price_scales_with_nights() {
        let room = Room::new("101", "standard", 8_000);
        assert_eq!(room.price_for(4), 32_000);
    }
}
