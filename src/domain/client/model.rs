//! Client domain entity

/// Hotel guest
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    /// Unique client ID (0 until the store assigns one)
    pub id: i32,
    pub first_name: String,
    pub last_names: String,
    /// Contact address for confirmations
    pub email: String,
}

impl Client {
    pub fn new(
        first_name: impl Into<String>,
        last_names: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_names: last_names.into(),
            email: email.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_names)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_parts() {
        let c = Client::new("Ana", "Mora Solís", "ana@example.com");
        assert_eq!(c.full_name(), "Ana Mora Solís");
        assert_eq!(c.id, 0);
    }
}
