/// Error type for the medical centre manager.
///
/// Every fallible operation on `MedCenter` reports one of these
/// variants. State is never mutated before validation succeeds, so a
/// returned error means nothing changed.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MedError {
    #[error("doctor '{id}' is already registered")]
    DuplicateDoctor { id: String },

    #[error("speciality '{speciality}' is not offered by the centre")]
    UnknownSpeciality { speciality: String },

    #[error("doctor '{id}' is not registered")]
    UnknownDoctor { id: String },

    #[error("doctor '{doc_id}' has no schedule for {date}")]
    UnscheduledDate { doc_id: String, date: String },

    #[error("slot '{slot}' is not available for doctor '{doc_id}' on {date}")]
    UnknownSlot {
        doc_id: String,
        date: String,
        slot: String,
    },

    #[error("appointment '{id}' is not in the book")]
    UnknownAppointment { id: String },

    #[error("appointment '{app_id}' is not in the accepted queue of doctor '{doc_id}'")]
    NotAcceptedForDoctor { doc_id: String, app_id: String },

    #[error("invalid time '{value}', expected HH:MM")]
    InvalidTime { value: String },
}
