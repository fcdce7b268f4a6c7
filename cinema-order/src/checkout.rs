use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use cinema_catalog::{classify_seat, PricingEngine, Seat, SeatCategory, SeatSelection, Showtime};
use cinema_core::{
    Booking, BookingRequest, BookingService, CatalogService, CoreError, CoreResult, CustomerContact, DiscountDirectory,
    UserIdentity,
};
use cinema_offer::{
    filter_applicable_instruments, Coupon, CouponValidationRequest, DiscountChoice, DiscountInstrument,
    EventValidationRequest, Event, ValidationResult,
};
use cinema_shared::models::{BookingSubmittedEvent, DiscountDroppedEvent};
use cinema_shared::Amount;

use crate::quote::{DiscountNotice, Quote};
use crate::session::BookingSession;

/// A seat as the seat map shows it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    #[serde(flatten)]
    pub seat: Seat,
    pub effective_price: Amount,
    pub category: SeatCategory,
}

/// Discounts the user may pick for the current order amount
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicableDiscounts {
    pub order_amount: Amount,
    pub coupons: Vec<Coupon>,
    pub events: Vec<Event>,
}

/// Drives a booking session against the backend collaborators. Pricing
/// itself stays in `BookingSession::quote`; this type only adds the I/O.
#[derive(Clone)]
pub struct CheckoutService {
    catalog: Arc<dyn CatalogService>,
    discounts: Arc<dyn DiscountDirectory>,
    bookings: Arc<dyn BookingService>,
    engine: PricingEngine,
}

impl CheckoutService {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        discounts: Arc<dyn DiscountDirectory>,
        bookings: Arc<dyn BookingService>,
        engine: PricingEngine,
    ) -> Self {
        Self {
            catalog,
            discounts,
            bookings,
            engine,
        }
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub async fn showtimes(&self, movie_id: i64) -> CoreResult<Vec<Showtime>> {
        self.catalog.list_showtimes(movie_id).await
    }

    pub async fn seat_map(&self, showtime_id: i64, selection: &SeatSelection) -> CoreResult<Vec<SeatView>> {
        let seats = self.catalog.list_seats(showtime_id).await?;
        Ok(seats
            .into_iter()
            .map(|seat| SeatView {
                effective_price: self.engine.effective_seat_price(&seat),
                category: classify_seat(&seat, selection),
                seat,
            })
            .collect())
    }

    /// Coupons and events usable for `order_amount`. A failed fetch on either
    /// side degrades to an empty list for that side.
    pub async fn applicable_discounts(&self, order_amount: Amount) -> ApplicableDiscounts {
        let order_amount = order_amount.max(0);
        let (coupons, events) = tokio::join!(
            self.discounts.list_applicable_coupons(order_amount),
            self.discounts.list_applicable_events(order_amount),
        );

        let coupons = coupons.unwrap_or_else(|e| {
            tracing::warn!(order_amount, error = %e, "coupon list unavailable, showing none");
            Vec::new()
        });
        let events = events.unwrap_or_else(|e| {
            tracing::warn!(order_amount, error = %e, "event list unavailable, showing none");
            Vec::new()
        });

        ApplicableDiscounts {
            order_amount,
            coupons: filter_applicable_instruments(&coupons, order_amount),
            events: filter_applicable_instruments(&events, order_amount),
        }
    }

    /// Apply a pick and ask the backend to confirm it. When the backend cannot
    /// be reached the local preview stands; the booking call re-checks anyway.
    pub async fn select_discount(
        &self,
        mut session: BookingSession,
        choice: DiscountChoice,
        user: &UserIdentity,
    ) -> (BookingSession, Quote) {
        session.select_discount(choice);

        let mut notice = None;
        if let Some(instrument) = session.discount.active() {
            let order_amount = self.engine.subtotal_of(&session.selected_seats);
            match self.validate(&instrument, order_amount, user).await {
                Ok(result) => {
                    tracing::info!(
                        discount = %instrument.reference(),
                        order_amount,
                        valid = result.valid,
                        "discount validated"
                    );
                    notice = session.apply_server_validation(&result, order_amount);
                }
                Err(e) => {
                    tracing::warn!(discount = %instrument.reference(), error = %e, "discount validation unavailable");
                }
            }
        }

        let mut quote = session.quote(&self.engine);
        if notice.is_some() {
            quote.notice = notice;
        }
        (session, quote)
    }

    /// Submit the session as a PENDING booking.
    ///
    /// Seats are re-read first so that a seat taken in the meantime fails the
    /// submission instead of being double-booked, and a selected discount is
    /// re-validated with the backend so the total sent is the one it agrees to.
    pub async fn submit(
        &self,
        mut session: BookingSession,
        user: &UserIdentity,
        customer: CustomerContact,
    ) -> CoreResult<(Booking, Quote)> {
        if session.selected_seats.is_empty() {
            return Err(CoreError::ValidationError("no seats selected".to_string()));
        }
        customer.validate()?;

        let latest = self.catalog.list_seats(session.showtime_id).await?;
        let dropped = session.selected_seats.reconcile(&latest);
        if !dropped.is_empty() {
            let numbers: Vec<&str> = dropped.iter().map(|s| s.seat_number.as_str()).collect();
            return Err(CoreError::ValidationError(format!(
                "seats no longer available: {}",
                numbers.join(", ")
            )));
        }

        let preview = session.quote(&self.engine);
        if let Some(DiscountNotice::Removed { reference, message, .. }) = &preview.notice {
            let event = DiscountDroppedEvent::new(reference.to_string(), preview.subtotal, message.clone());
            tracing::warn!(discount = %event.discount_ref, order_amount = event.order_amount, reason = %event.reason, "discount dropped before submission");
            session.clear_discount();
        }

        if let Some(instrument) = session.discount.active() {
            let current = self.current_terms(&instrument, preview.subtotal).await?;
            session.select_discount(current.clone().into());

            let result = self.validate(&current, preview.subtotal, user).await?;
            if let Some(DiscountNotice::Rejected { message, .. }) =
                session.apply_server_validation(&result, preview.subtotal)
            {
                return Err(CoreError::ValidationError(message));
            }
        }

        let quote = session.quote(&self.engine);
        if let Some(DiscountNotice::Removed { message, .. }) = &quote.notice {
            return Err(CoreError::ValidationError(message.clone()));
        }
        let request = BookingRequest::new(
            user.user_id.clone(),
            session.showtime_id,
            session.selected_seats.seat_ids(),
            quote.total,
            customer,
            quote.discount_ref().cloned(),
        );

        let event = BookingSubmittedEvent {
            correlation_id: Uuid::new_v4(),
            user_id: user.user_id.clone(),
            showtime_id: session.showtime_id,
            seat_count: quote.seat_count,
            subtotal: quote.subtotal,
            discount: quote.discount,
            total: quote.total,
            discount_ref: quote.discount_ref().map(|r| r.to_string()),
            submitted_at: Utc::now(),
        };
        tracing::info!(event = %event.to_json(), "submitting booking");

        let booking = self.bookings.create_booking(&request).await?;
        tracing::info!(correlation_id = %event.correlation_id, booking_id = booking.id, "booking created");
        Ok((booking, quote))
    }

    pub async fn booking(&self, id: i64) -> CoreResult<Booking> {
        self.bookings
            .get_booking(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("booking {}", id)))
    }

    /// The instrument's terms as the backend lists them for `order_amount`.
    /// Terms carried in the session are a display copy and never priced from
    /// at submission.
    async fn current_terms(&self, instrument: &DiscountInstrument, order_amount: Amount) -> CoreResult<DiscountInstrument> {
        let found = match instrument {
            DiscountInstrument::Coupon(coupon) => self
                .discounts
                .list_applicable_coupons(order_amount)
                .await?
                .into_iter()
                .find(|c| c.code == coupon.code)
                .map(DiscountInstrument::Coupon),
            DiscountInstrument::Event(event) => self
                .discounts
                .list_applicable_events(order_amount)
                .await?
                .into_iter()
                .find(|e| e.id == event.id)
                .map(DiscountInstrument::Event),
        };
        found.ok_or_else(|| {
            CoreError::ValidationError(format!("{} is not available for this order", instrument.reference()))
        })
    }

    async fn validate(
        &self,
        instrument: &DiscountInstrument,
        order_amount: Amount,
        user: &UserIdentity,
    ) -> CoreResult<ValidationResult> {
        match instrument {
            DiscountInstrument::Coupon(coupon) => {
                self.discounts
                    .validate_coupon(&CouponValidationRequest {
                        coupon_code: coupon.code.clone(),
                        order_amount,
                        user_id: user.user_id.clone(),
                    })
                    .await
            }
            DiscountInstrument::Event(event) => {
                self.discounts
                    .validate_event(&EventValidationRequest {
                        event_id: event.id,
                        order_amount,
                        user_id: user.user_id.clone(),
                    })
                    .await
            }
        }
    }
}
