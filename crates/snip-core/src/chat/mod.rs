//! Slot-filling conversation engine
//!
//! One engine instance per active chat session. The flow walks
//! service → date → time → contact → confirmation, re-prompting in place on
//! invalid input, and commits exactly one store write on confirmation.
//! General inquiries outside the flow are handled by [`intent`] and never
//! touch the store.

pub mod intent;
pub mod parse;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::config::ScheduleConfig;
use crate::error::{Error, Result};
use crate::models::{match_service, BookingRecord, Roster, ServiceId, Stylist, StylistId};
use crate::schedule::{open_times, upcoming_working_days};
use crate::store::BookingStore;

pub use intent::{classify, respond, Intent};

/// Contact details collected during the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Partially collected contact details; sub-fields fill in fixed order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ContactDraft {
    name: Option<String>,
    email: Option<String>,
}

/// One step of the flow, carrying exactly the fields valid at that step
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Service,
    Date {
        service: ServiceId,
    },
    Time {
        service: ServiceId,
        date: NaiveDate,
    },
    Contact {
        service: ServiceId,
        date: NaiveDate,
        time: NaiveTime,
        draft: ContactDraft,
    },
    Confirm {
        service: ServiceId,
        date: NaiveDate,
        time: NaiveTime,
        contact: ContactInfo,
    },
}

/// Turn-based booking conversation bound to one stylist and one store
pub struct ConversationEngine {
    store: Arc<BookingStore>,
    config: ScheduleConfig,
    stylist: Stylist,
    today: NaiveDate,
    step: Step,
}

impl ConversationEngine {
    /// Engine over the default roster and config, starting today
    pub fn new(store: Arc<BookingStore>, stylist: &StylistId) -> Result<Self> {
        Self::with_context(
            store,
            &Roster::default(),
            ScheduleConfig::default(),
            stylist,
            Utc::now().date_naive(),
        )
    }

    pub fn with_context(
        store: Arc<BookingStore>,
        roster: &Roster,
        config: ScheduleConfig,
        stylist: &StylistId,
        today: NaiveDate,
    ) -> Result<Self> {
        let stylist = roster
            .get(stylist)
            .cloned()
            .ok_or_else(|| Error::UnknownStylist(stylist.to_string()))?;

        Ok(Self {
            store,
            config,
            stylist,
            today,
            step: Step::Service,
        })
    }

    /// Opening message shown when the session starts
    #[must_use]
    pub fn greeting(&self) -> String {
        format!(
            "Hi! I'm here to help you book with {}. Here are our available services:\n\n{}\n\nWhich service would you like to book?",
            self.stylist.name,
            intent::catalog_lines()
        )
    }

    /// Feed one user message through the step machine.
    ///
    /// Total over every `(step, input)` pair: invalid input re-prompts the
    /// same step, valid input advances. The only store write happens on a
    /// confirmed `yes`.
    pub fn process_message(&mut self, text: &str) -> Vec<String> {
        let step = std::mem::replace(&mut self.step, Step::Service);
        let (next, replies) = self.transition(step, text.trim());
        self.step = next;
        replies
    }

    /// Discard the in-progress booking, retaining the selected stylist
    pub fn reset(&mut self) {
        self.step = Step::Service;
    }

    /// Name of the current step, for display and assertions
    #[must_use]
    pub fn step_name(&self) -> &'static str {
        match &self.step {
            Step::Service => "service",
            Step::Date { .. } => "date",
            Step::Time { .. } => "time",
            Step::Contact { .. } => "contact",
            Step::Confirm { .. } => "confirmation",
        }
    }

    fn transition(&self, step: Step, input: &str) -> (Step, Vec<String>) {
        match step {
            Step::Service => self.on_service(input),
            Step::Date { service } => self.on_date(service, input),
            Step::Time { service, date } => self.on_time(service, date, input),
            Step::Contact {
                service,
                date,
                time,
                draft,
            } => self.on_contact(service, date, time, draft, input),
            Step::Confirm {
                service,
                date,
                time,
                contact,
            } => self.on_confirm(service, date, time, contact, input),
        }
    }

    fn on_service(&self, input: &str) -> (Step, Vec<String>) {
        let Some(service) = match_service(input) else {
            return (
                Step::Service,
                vec![format!(
                    "I can help you book any of these services:\n\n{}\n\nWhich service would you like?",
                    intent::catalog_lines()
                )],
            );
        };

        let dates = upcoming_working_days(&self.stylist, self.today, self.config.lookahead_days)
            .iter()
            .map(|date| format!("{}, {date}", date.format("%A")))
            .collect::<Vec<_>>()
            .join("\n");

        (
            Step::Date { service },
            vec![format!(
                "Great choice! When would you like to schedule your {}? Here are the available dates:\n\n{dates}\n\nPlease select a date.",
                service.info().name
            )],
        )
    }

    fn on_date(&self, service: ServiceId, input: &str) -> (Step, Vec<String>) {
        let Some(date) = parse::parse_date(input) else {
            return (
                Step::Date { service },
                vec!["I didn't catch that date. Please select a date from the list above.".to_string()],
            );
        };

        let times = self.open_chat_times(date);
        if times.is_empty() {
            return (
                Step::Date { service },
                vec![format!(
                    "I'm sorry, but there are no available times on {}. Please select another date.",
                    date.format("%A")
                )],
            );
        }

        let listed = times
            .iter()
            .map(|time| time.format("%H:%M").to_string())
            .collect::<Vec<_>>()
            .join("\n");

        (
            Step::Time { service, date },
            vec![format!(
                "Great! Here are the available times for {}, {date}:\n\n{listed}\n\nPlease select a time.",
                date.format("%A")
            )],
        )
    }

    fn on_time(&self, service: ServiceId, date: NaiveDate, input: &str) -> (Step, Vec<String>) {
        let Some(time) = parse::parse_time(input) else {
            return (
                Step::Time { service, date },
                vec!["I didn't catch that time. Please select a time from the list above.".to_string()],
            );
        };

        // Re-validate against the live set, not the one shown at the date step
        if !self.open_chat_times(date).contains(&time) {
            return (
                Step::Time { service, date },
                vec!["I'm sorry, but that time is not available. Please select a time from the list above.".to_string()],
            );
        }

        (
            Step::Contact {
                service,
                date,
                time,
                draft: ContactDraft::default(),
            },
            vec![
                "Perfect! To complete your booking, I'll need your contact information. Please provide your:\n\u{2022} Full Name\n\u{2022} Email\n\u{2022} Phone Number"
                    .to_string(),
            ],
        )
    }

    fn on_contact(
        &self,
        service: ServiceId,
        date: NaiveDate,
        time: NaiveTime,
        mut draft: ContactDraft,
        input: &str,
    ) -> (Step, Vec<String>) {
        let again = |draft: ContactDraft, message: &str| {
            (
                Step::Contact {
                    service,
                    date,
                    time,
                    draft,
                },
                vec![message.to_string()],
            )
        };

        if draft.name.is_none() {
            if input.is_empty() {
                return again(draft, "Please provide your full name.");
            }
            draft.name = Some(input.to_string());
            return again(draft, "Thanks! Now, please provide your email address.");
        }

        if draft.email.is_none() {
            if !parse::is_valid_email(input) {
                return again(
                    draft,
                    "That doesn't look like a valid email address. Please try again.",
                );
            }
            draft.email = Some(input.to_string());
            return again(draft, "Great! Finally, please provide your phone number.");
        }

        if !parse::is_valid_phone(input) {
            return again(
                draft,
                "That doesn't look like a valid phone number. Please provide a 10-digit phone number.",
            );
        }

        let contact = ContactInfo {
            name: draft.name.unwrap_or_default(),
            email: draft.email.unwrap_or_default(),
            phone: input.to_string(),
        };
        let summary = self.summary(service, date, time, &contact);

        (
            Step::Confirm {
                service,
                date,
                time,
                contact,
            },
            vec![summary],
        )
    }

    fn on_confirm(
        &self,
        service: ServiceId,
        date: NaiveDate,
        time: NaiveTime,
        contact: ContactInfo,
        input: &str,
    ) -> (Step, Vec<String>) {
        match input.to_lowercase().as_str() {
            "yes" => {
                let record = BookingRecord::new(
                    self.stylist.id.clone(),
                    service,
                    date,
                    time,
                    contact.name.clone(),
                    contact.email.clone(),
                    contact.phone.clone(),
                );

                match self.store.put(record) {
                    Ok(()) => (
                        Step::Service,
                        vec![
                            "Fantastic! Your appointment has been booked successfully! You'll receive a confirmation email shortly. We look forward to seeing you!"
                                .to_string(),
                        ],
                    ),
                    Err(error) => {
                        tracing::error!(%error, "failed to commit booking");
                        (
                            Step::Confirm {
                                service,
                                date,
                                time,
                                contact,
                            },
                            vec![
                                "I'm sorry, there was an issue confirming your booking. Please try again or contact us directly."
                                    .to_string(),
                            ],
                        )
                    }
                }
            }
            "no" => (
                Step::Service,
                vec!["No problem! Let's start over. What service would you like to book?".to_string()],
            ),
            _ => (
                Step::Confirm {
                    service,
                    date,
                    time,
                    contact,
                },
                vec!["Please reply with 'yes' to confirm your booking or 'no' to start over.".to_string()],
            ),
        }
    }

    fn summary(
        &self,
        service: ServiceId,
        date: NaiveDate,
        time: NaiveTime,
        contact: &ContactInfo,
    ) -> String {
        let info = service.info();
        format!(
            "Perfect! Here's your booking summary:\n\nService: {} (${})\nStylist: {}\nDate: {date}\nTime: {}\nName: {}\nEmail: {}\nPhone: {}\n\nIs this correct? Please reply with 'yes' to confirm or 'no' to start over.",
            info.name,
            info.price_dollars,
            self.stylist.name,
            time.format("%H:%M"),
            contact.name,
            contact.email,
            contact.phone
        )
    }

    fn open_chat_times(&self, date: NaiveDate) -> Vec<NaiveTime> {
        open_times(
            &self.store.snapshot(),
            &self.stylist,
            date,
            self.config.chat_slot_minutes,
        )
    }
}
