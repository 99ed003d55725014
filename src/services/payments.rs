use crate::{
    ApiClient, ApiResponse, Error,
    types::{CardInput, PaymentRequest},
};

pub struct PaymentService<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<ApiResponse, Error> {
        self.client.get("/payments/").await
    }

    pub async fn saved_cards(&self) -> Result<ApiResponse, Error> {
        self.client.get("/payments/saved-cards/").await
    }

    pub async fn save_card(&self, card: &CardInput) -> Result<ApiResponse, Error> {
        self.client.post("/payments/save-card/", card).await
    }

    pub async fn delete_card(&self, card: u64) -> Result<ApiResponse, Error> {
        self.client
            .delete(&format!("/payments/saved-cards/delete/{card}/"))
            .await
    }

    /// Settles a pending payment with a previously saved card.
    pub async fn pay(&self, payment: u64, saved_card: u64) -> Result<ApiResponse, Error> {
        self.client
            .post(
                &format!("/payments/pay/{payment}/"),
                &PaymentRequest {
                    saved_card_id: saved_card,
                },
            )
            .await
    }
}
