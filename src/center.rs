/// The medical centre manager.
///
/// `MedCenter` owns the speciality catalogue, the doctor registry, the
/// appointment book and the reception state for a single clinic. All
/// operations are synchronous and in-memory; wrap the centre in a lock
/// if it must be shared across threads.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::MedError;
use crate::models::{Appointment, CenterPolicy, Doctor};
use crate::slots;

/// Queue entries sort by slot start time; the appointment id breaks
/// ties, which only legacy double booking can produce.
type AcceptedEntry = (String, String);

#[derive(Debug, Default)]
pub struct MedCenter {
    policy: CenterPolicy,
    specialities: BTreeSet<String>,
    doctors: BTreeMap<String, Doctor>,
    appointments: BTreeMap<String, Appointment>,
    booked: BTreeSet<(String, String, String)>,
    accepted: BTreeMap<String, BTreeSet<AcceptedEntry>>,
    current_date: Option<String>,
}

impl MedCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CenterPolicy) -> Self {
        MedCenter {
            policy,
            ..Self::default()
        }
    }

    // --- speciality catalogue -------------------------------------------

    /// Add specialities to the centre's catalogue. Duplicates are
    /// ignored; the call never fails.
    pub fn add_specialities<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.specialities.insert(name.into());
        }
    }

    /// The offered specialities, ascending.
    pub fn specialities(&self) -> Vec<&str> {
        self.specialities.iter().map(String::as_str).collect()
    }

    // --- doctor registry ------------------------------------------------

    /// Register a doctor. The speciality must already be in the
    /// catalogue and the id must be unused.
    pub fn add_doctor(
        &mut self,
        id: &str,
        name: &str,
        surname: &str,
        speciality: &str,
    ) -> Result<(), MedError> {
        if self.doctors.contains_key(id) {
            return Err(MedError::DuplicateDoctor { id: id.to_string() });
        }
        if !self.specialities.contains(speciality) {
            return Err(MedError::UnknownSpeciality {
                speciality: speciality.to_string(),
            });
        }

        debug!(doctor = id, speciality, "registering doctor");
        self.doctors.insert(
            id.to_string(),
            Doctor::new(
                id.to_string(),
                name.to_string(),
                surname.to_string(),
                speciality.to_string(),
            ),
        );
        Ok(())
    }

    /// Ids of all doctors practising `speciality`, ascending by id.
    pub fn get_specialists(&self, speciality: &str) -> Vec<&str> {
        self.doctors
            .values()
            .filter(|d| d.speciality == speciality)
            .map(|d| d.id.as_str())
            .collect()
    }

    pub fn doc_name(&self, id: &str) -> Option<&str> {
        self.doctors.get(id).map(|d| d.name.as_str())
    }

    pub fn doc_surname(&self, id: &str) -> Option<&str> {
        self.doctors.get(id).map(|d| d.surname.as_str())
    }

    /// Tile `[start, end)` into slots of `duration_min` minutes and
    /// install them as the doctor's schedule for `date`, replacing any
    /// previous set for that day. Returns the number of slots created.
    pub fn add_daily_schedule(
        &mut self,
        doc_id: &str,
        date: &str,
        start: &str,
        end: &str,
        duration_min: u32,
    ) -> Result<usize, MedError> {
        let labels = slots::tile_day(start, end, duration_min)?;
        let doctor = self
            .doctors
            .get_mut(doc_id)
            .ok_or_else(|| MedError::UnknownDoctor {
                id: doc_id.to_string(),
            })?;

        let count = labels.len();
        let displaced = doctor.set_day(date.to_string(), labels.into_iter().collect());
        if self.policy.rebuild_slot_counters {
            if let Some(old) = displaced {
                doctor.subtract_total_slots(old as u32);
            }
        }
        doctor.add_total_slots(count as u32);

        debug!(doctor = doc_id, date, slots = count, "daily schedule set");
        Ok(count)
    }

    // --- appointment book -----------------------------------------------

    /// For every doctor of `speciality` with a schedule on `date`, the
    /// day's slot labels in chronological order.
    pub fn find_slots(&self, date: &str, speciality: &str) -> BTreeMap<String, Vec<String>> {
        self.doctors
            .values()
            .filter(|d| d.speciality == speciality)
            .filter_map(|d| {
                d.slots_on(date)
                    .map(|s| (d.id.clone(), s.iter().cloned().collect()))
            })
            .collect()
    }

    /// Book a patient into an existing slot of a doctor's schedule.
    /// Returns the new appointment id, a 1-based decimal string
    /// assigned in call order.
    pub fn set_appointment(
        &mut self,
        ssn: &str,
        name: &str,
        surname: &str,
        doc_id: &str,
        date: &str,
        slot: &str,
    ) -> Result<String, MedError> {
        let doctor = self
            .doctors
            .get_mut(doc_id)
            .ok_or_else(|| MedError::UnknownDoctor {
                id: doc_id.to_string(),
            })?;
        let day = doctor
            .slots_on(date)
            .ok_or_else(|| MedError::UnscheduledDate {
                doc_id: doc_id.to_string(),
                date: date.to_string(),
            })?;
        if !day.contains(slot) {
            return Err(MedError::UnknownSlot {
                doc_id: doc_id.to_string(),
                date: date.to_string(),
                slot: slot.to_string(),
            });
        }

        let key = (doc_id.to_string(), date.to_string(), slot.to_string());
        if self.policy.exclusive_slots && self.booked.contains(&key) {
            return Err(MedError::UnknownSlot {
                doc_id: doc_id.to_string(),
                date: date.to_string(),
                slot: slot.to_string(),
            });
        }

        let app_id = (self.appointments.len() + 1).to_string();
        let appointment = Appointment {
            app_id: app_id.clone(),
            patient_ssn: ssn.to_string(),
            patient_name: name.to_string(),
            patient_surname: surname.to_string(),
            doc_id: doc_id.to_string(),
            date: date.to_string(),
            start_time: slots::slot_start(slot).to_string(),
            slot: slot.to_string(),
            accepted: false,
        };

        doctor.count_booking();
        self.booked.insert(key);
        self.appointments.insert(app_id.clone(), appointment);

        debug!(appointment = %app_id, doctor = doc_id, date, slot, "appointment booked");
        Ok(app_id)
    }

    pub fn appointment_doctor(&self, app_id: &str) -> Option<&str> {
        self.appointments.get(app_id).map(|a| a.doc_id.as_str())
    }

    pub fn appointment_patient(&self, app_id: &str) -> Option<&str> {
        self.appointments
            .get(app_id)
            .map(|a| a.patient_ssn.as_str())
    }

    pub fn appointment_time(&self, app_id: &str) -> Option<&str> {
        self.appointments
            .get(app_id)
            .map(|a| a.start_time.as_str())
    }

    pub fn appointment_date(&self, app_id: &str) -> Option<&str> {
        self.appointments.get(app_id).map(|a| a.date.as_str())
    }

    /// The doctor's appointments as `"HH:MM=SSN"` labels. Under the
    /// legacy policy the date argument is ignored, as the historical
    /// system did.
    pub fn list_appointments(&self, doc_id: &str, date: &str) -> Vec<String> {
        self.appointments
            .values()
            .filter(|a| a.doc_id == doc_id)
            .filter(|a| !self.policy.filter_listings_by_date || a.date == date)
            .map(Appointment::listing_label)
            .collect()
    }

    // --- reception ------------------------------------------------------

    /// Set the centre's operating date and return the number of
    /// appointments booked for it.
    pub fn set_current_date(&mut self, date: &str) -> usize {
        self.current_date = Some(date.to_string());
        let count = self
            .appointments
            .values()
            .filter(|a| a.date == date)
            .count();
        debug!(date, appointments = count, "operating date set");
        count
    }

    pub fn current_date(&self) -> Option<&str> {
        self.current_date.as_deref()
    }

    /// Record the arrival of a patient: every appointment of `ssn` on
    /// the operating date is flagged accepted and queued for its
    /// doctor. Silent when nothing matches or no date is set.
    pub fn accept(&mut self, ssn: &str) {
        let Some(today) = self.current_date.clone() else {
            return;
        };

        for app in self
            .appointments
            .values_mut()
            .filter(|a| a.date == today && a.patient_ssn == ssn)
        {
            app.accepted = true;
            self.accepted
                .entry(app.doc_id.clone())
                .or_default()
                .insert((app.start_time.clone(), app.app_id.clone()));
            debug!(appointment = %app.app_id, doctor = %app.doc_id, "patient accepted");
        }
    }

    /// The id of the earliest accepted, not yet completed appointment
    /// for the doctor. Peeks without removing.
    pub fn next_appointment(&self, doc_id: &str) -> Option<&str> {
        self.accepted
            .get(doc_id)?
            .iter()
            .next()
            .map(|(_, app_id)| app_id.as_str())
    }

    /// Mark a visit as finished and drop it from the doctor's queue.
    /// The appointment itself stays in the book for the metrics.
    pub fn complete_appointment(&mut self, doc_id: &str, app_id: &str) -> Result<(), MedError> {
        if !self.doctors.contains_key(doc_id) {
            return Err(MedError::UnknownDoctor {
                id: doc_id.to_string(),
            });
        }
        let app = self
            .appointments
            .get(app_id)
            .ok_or_else(|| MedError::UnknownAppointment {
                id: app_id.to_string(),
            })?;

        let entry = (app.start_time.clone(), app.app_id.clone());
        let queue = self.accepted.get_mut(doc_id);
        let removed = queue.map(|q| q.remove(&entry)).unwrap_or(false);
        if !removed {
            return Err(MedError::NotAcceptedForDoctor {
                doc_id: doc_id.to_string(),
                app_id: app_id.to_string(),
            });
        }

        debug!(appointment = app_id, doctor = doc_id, "appointment completed");
        Ok(())
    }

    // --- metrics --------------------------------------------------------

    /// Fraction of the doctor's appointments on `date` whose patient
    /// was accepted. NaN when there are no such appointments.
    pub fn show_rate(&self, doc_id: &str, date: &str) -> f64 {
        let day: Vec<&Appointment> = self
            .appointments
            .values()
            .filter(|a| a.doc_id == doc_id && a.date == date)
            .collect();
        let shown = day.iter().filter(|a| a.accepted).count();
        shown as f64 / day.len() as f64
    }

    /// Per-doctor ratio of bookings taken to slots offered, across all
    /// dates. NaN for a doctor with no slots.
    pub fn schedule_completeness(&self) -> BTreeMap<String, f64> {
        self.doctors
            .values()
            .map(|d| {
                (
                    d.id.clone(),
                    d.scheduled_appointments() as f64 / d.total_slots() as f64,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_deduplicates_and_sorts() {
        let mut center = MedCenter::new();
        center.add_specialities(["Surgery", "Cardiology", "Surgery"]);
        assert_eq!(center.specialities(), vec!["Cardiology", "Surgery"]);
    }

    #[test]
    fn specialists_come_out_in_id_order() {
        let mut center = MedCenter::new();
        center.add_specialities(["Cardiology"]);
        center.add_doctor("D9", "Ada", "Lovelace", "Cardiology").unwrap();
        center.add_doctor("D2", "Grace", "Hopper", "Cardiology").unwrap();
        assert_eq!(center.get_specialists("Cardiology"), vec!["D2", "D9"]);
        assert!(center.get_specialists("Surgery").is_empty());
    }

    #[test]
    fn find_slots_lists_only_doctors_scheduled_that_day() {
        let mut center = MedCenter::new();
        center.add_specialities(["Cardiology"]);
        center.add_doctor("D1", "Ada", "Lovelace", "Cardiology").unwrap();
        center.add_doctor("D2", "Grace", "Hopper", "Cardiology").unwrap();
        center
            .add_daily_schedule("D1", "2024-05-10", "09:00", "10:00", 30)
            .unwrap();

        let found = center.find_slots("2024-05-10", "Cardiology");
        assert_eq!(found.len(), 1);
        assert_eq!(found["D1"], vec!["09:00-09:30", "09:30-10:00"]);
    }

    #[test]
    fn unknown_lookups_are_tolerated() {
        let center = MedCenter::new();
        assert_eq!(center.doc_name("nobody"), None);
        assert_eq!(center.appointment_doctor("99"), None);
        assert_eq!(center.next_appointment("nobody"), None);
        assert!(center.list_appointments("nobody", "2024-05-10").is_empty());
    }
}
