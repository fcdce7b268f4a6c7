use std::sync::Arc;

use cinema_order::CheckoutService;

#[derive(Clone)]
pub struct AppState {
    pub checkout: Arc<CheckoutService>,
}

impl AppState {
    pub fn new(checkout: CheckoutService) -> Self {
        Self {
            checkout: Arc::new(checkout),
        }
    }
}
