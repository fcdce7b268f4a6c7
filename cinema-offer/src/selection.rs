use serde::{Deserialize, Serialize};

use crate::models::{Coupon, DiscountInstrument, Event};

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("a coupon and an event cannot both be selected")]
    BothSelected,
}

/// Which discount the user currently has picked. At most one slot is ever
/// filled; deserialization rejects payloads with both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDiscountSelection")]
pub struct DiscountSelection {
    selected_coupon: Option<Coupon>,
    selected_event: Option<Event>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiscountSelection {
    #[serde(default)]
    selected_coupon: Option<Coupon>,
    #[serde(default)]
    selected_event: Option<Event>,
}

impl TryFrom<RawDiscountSelection> for DiscountSelection {
    type Error = SelectionError;

    fn try_from(raw: RawDiscountSelection) -> Result<Self, Self::Error> {
        if raw.selected_coupon.is_some() && raw.selected_event.is_some() {
            return Err(SelectionError::BothSelected);
        }
        Ok(Self {
            selected_coupon: raw.selected_coupon,
            selected_event: raw.selected_event,
        })
    }
}

/// A pick (or un-pick) for one of the two slots
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountChoice {
    Coupon(Option<Coupon>),
    Event(Option<Event>),
}

impl From<DiscountInstrument> for DiscountChoice {
    fn from(instrument: DiscountInstrument) -> Self {
        match instrument {
            DiscountInstrument::Coupon(c) => DiscountChoice::Coupon(Some(c)),
            DiscountInstrument::Event(e) => DiscountChoice::Event(Some(e)),
        }
    }
}

/// Picking a coupon clears the event and vice versa. Picking `None` clears
/// only that slot and leaves the other one alone.
pub fn select_discount(current: &DiscountSelection, choice: DiscountChoice) -> DiscountSelection {
    match choice {
        DiscountChoice::Coupon(Some(coupon)) => DiscountSelection {
            selected_coupon: Some(coupon),
            selected_event: None,
        },
        DiscountChoice::Event(Some(event)) => DiscountSelection {
            selected_coupon: None,
            selected_event: Some(event),
        },
        DiscountChoice::Coupon(None) => DiscountSelection {
            selected_coupon: None,
            selected_event: current.selected_event.clone(),
        },
        DiscountChoice::Event(None) => DiscountSelection {
            selected_coupon: current.selected_coupon.clone(),
            selected_event: None,
        },
    }
}

impl DiscountSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn selected_coupon(&self) -> Option<&Coupon> {
        self.selected_coupon.as_ref()
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.selected_event.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_coupon.is_none() && self.selected_event.is_none()
    }

    /// The selected instrument, if any
    pub fn active(&self) -> Option<DiscountInstrument> {
        self.selected_coupon
            .clone()
            .map(DiscountInstrument::Coupon)
            .or_else(|| self.selected_event.clone().map(DiscountInstrument::Event))
    }

    pub fn select(&self, choice: DiscountChoice) -> Self {
        select_discount(self, choice)
    }

    pub fn cleared(&self) -> Self {
        Self::none()
    }
}
