//! Plain-text confirmation document

use std::fmt::Write;

use async_trait::async_trait;

use crate::config::DocumentConfig;
use crate::domain::{BookingSnapshot, DocumentGenerator, DomainError, DomainResult};

/// Renders a reservation confirmation as UTF-8 text.
///
/// Output depends only on the snapshot and the configured hotel name and
/// currency, so re-rendering a stored reservation yields the same bytes.
pub struct TextDocumentGenerator {
    hotel_name: String,
    currency: String,
}

impl TextDocumentGenerator {
    pub fn new(config: &DocumentConfig) -> Self {
        Self {
            hotel_name: config.hotel_name.clone(),
            currency: config.currency.clone(),
        }
    }

    fn format_amount(&self, minor_units: i64) -> String {
        let sign = if minor_units < 0 { "-" } else { "" };
        let abs = minor_units.unsigned_abs();
        format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, self.currency)
    }

    fn write_document(&self, out: &mut String, snapshot: &BookingSnapshot) -> std::fmt::Result {
        let BookingSnapshot {
            reservation,
            client,
            room,
        } = snapshot;
        let nights = reservation.stay.nights();

        writeln!(out, "{}", self.hotel_name)?;
        writeln!(out, "Reservation confirmation #{}", reservation.id)?;
        writeln!(out)?;
        writeln!(out, "Guest:      {}", client.full_name())?;
        writeln!(out, "Email:      {}", client.email)?;
        writeln!(out, "Room:       {} ({})", room.number, room.room_type)?;
        if let Some(description) = &room.description {
            writeln!(out, "            {}", description)?;
        }
        writeln!(out, "Arrival:    {}", reservation.stay.arrival())?;
        writeln!(out, "Departure:  {}", reservation.stay.departure())?;
        writeln!(out, "Nights:     {}", nights)?;
        writeln!(out, "Rate:       {} / night", self.format_amount(room.nightly_rate))?;
        writeln!(out, "Total:      {}", self.format_amount(room.price_for(nights)))?;
        writeln!(out, "Status:     {}", reservation.status)
    }
}

#[async_trait]
impl DocumentGenerator for TextDocumentGenerator {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    async fn render(&self, snapshot: &BookingSnapshot) -> DomainResult<Vec<u8>> {
        let mut out = String::new();
        self.write_document(&mut out, snapshot)
            .map_err(|e| DomainError::Validation(format!("document formatting failed: {}", e)))?;
        Ok(out.into_bytes())
    }
}
