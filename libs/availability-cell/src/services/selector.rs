use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{Doctor, TokenSlot};
use crate::services::availability::available_dates;
use crate::services::doctor::DoctorService;

/// Outcome of a date selection.
#[derive(Debug, Clone, PartialEq)]
pub enum DateSelection {
    /// The date is not in the doctor's availability set; nothing was fetched.
    NotAvailable,
    /// Another date was selected while this fetch was in flight; its
    /// response was discarded.
    Superseded,
    /// Tokens for the selected date (possibly empty).
    Tokens(Vec<TokenSlot>),
}

struct PanelState {
    doctor_id: i64,
    dates: HashSet<NaiveDate>,
    selected_date: Option<NaiveDate>,
    tokens: Vec<TokenSlot>,
    loading: bool,
    seq: u64,
}

/// Drives the calendar panel of a doctor's booking page: which dates are
/// selectable, and the token slots for the currently selected date.
///
/// Token fetches are tagged with a request sequence. Selecting a new date
/// clears the token list synchronously and bumps the sequence, so a slow
/// response for a previously selected date can never overwrite the current
/// one.
pub struct AvailabilitySelector {
    doctors: DoctorService,
    state: Mutex<PanelState>,
}

impl AvailabilitySelector {
    pub fn new(doctors: DoctorService, doctor: &Doctor) -> Self {
        Self {
            doctors,
            state: Mutex::new(PanelState {
                doctor_id: doctor.id,
                dates: available_dates(&doctor.availability),
                selected_date: None,
                tokens: Vec::new(),
                loading: false,
                seq: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the doctor record and recompute the available-date set.
    /// Any in-flight fetch for the old doctor is invalidated.
    pub fn set_doctor(&self, doctor: &Doctor) {
        let mut state = self.lock();
        state.doctor_id = doctor.id;
        state.dates = available_dates(&doctor.availability);
        state.selected_date = None;
        state.tokens.clear();
        state.loading = false;
        state.seq += 1;
    }

    /// Whether the calendar control for `date` should be enabled.
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.lock().dates.contains(&date)
    }

    /// Select a calendar date and fetch its token slots.
    ///
    /// Fetch failures fail soft: the panel shows an empty token list and the
    /// error is logged, never returned.
    pub async fn select_date(&self, date: NaiveDate) -> DateSelection {
        let (doctor_id, my_seq) = {
            let mut state = self.lock();
            if !state.dates.contains(&date) {
                debug!("Ignoring selection of unavailable date {}", date);
                return DateSelection::NotAvailable;
            }

            state.seq += 1;
            state.selected_date = Some(date);
            state.tokens.clear();
            state.loading = true;
            (state.doctor_id, state.seq)
        };

        let fetched = self.doctors.get_doctor_for_date(doctor_id, date).await;

        let mut state = self.lock();
        if state.seq != my_seq {
            debug!("Discarding stale token response for {}", date);
            return DateSelection::Superseded;
        }

        state.loading = false;
        match fetched {
            Ok(detail) => {
                debug!("Loaded {} tokens for {}", detail.tokens.len(), date);
                state.tokens = detail.tokens.clone();
                DateSelection::Tokens(detail.tokens)
            }
            Err(err) => {
                warn!("Token fetch for {} failed: {}", date, err);
                state.tokens.clear();
                DateSelection::Tokens(Vec::new())
            }
        }
    }

    /// Clear the selection so the panel is ready for a fresh booking.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.selected_date = None;
        state.tokens.clear();
        state.loading = false;
        state.seq += 1;
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.lock().selected_date
    }

    pub fn tokens(&self) -> Vec<TokenSlot> {
        self.lock().tokens.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }
}
