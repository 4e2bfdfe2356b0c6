//! In-memory appointment manager for a single-clinic medical centre.
//!
//! The centre keeps a catalogue of medical specialities, the doctors
//! that practise them, each doctor's daily slot schedule, the patient
//! appointments booked against those slots, and the day-of-service
//! reception flow: check-in, next-patient selection and visit
//! completion. Two aggregate metrics round it off, per-doctor show
//! rate on a date and per-doctor schedule completeness.
//!
//! Everything lives in [`MedCenter`]. Dates are opaque strings, times
//! are `HH:MM`, slots are canonical `"hh:mm-hh:mm"` labels.
//!
//! ```
//! use medcentre::MedCenter;
//!
//! let mut center = MedCenter::new();
//! center.add_specialities(["Cardiology"]);
//! center.add_doctor("D1", "Grace", "Hopper", "Cardiology")?;
//! center.add_daily_schedule("D1", "2024-05-10", "09:00", "10:30", 30)?;
//!
//! let id = center.set_appointment("SSN1", "Ada", "Lovelace", "D1", "2024-05-10", "09:30-10:00")?;
//! center.set_current_date("2024-05-10");
//! center.accept("SSN1");
//! assert_eq!(center.next_appointment("D1"), Some(id.as_str()));
//! center.complete_appointment("D1", &id)?;
//! # Ok::<(), medcentre::MedError>(())
//! ```

mod center;
mod error;
mod models;
mod slots;

pub use center::MedCenter;
pub use error::MedError;
pub use models::{Appointment, CenterPolicy, Doctor};
pub use slots::{format_slot, parse_hm, tile_day};
