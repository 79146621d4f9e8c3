//! Client DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Client;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientDto {
    pub id: i32,
    pub first_name: String,
    pub last_names: String,
    pub email: String,
}

impl From<Client> for ClientDto {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_names: c.last_names,
            email: c.email,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub last_names: String,
    #[validate(email)]
    pub email: String,
}

impl From<CreateClientRequest> for Client {
    fn from(r: CreateClientRequest) -> Self {
        Client::new(r.first_name, r.last_names, r.email)
    }
}
