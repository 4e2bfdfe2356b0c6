/// Data models for the medical centre.
///
/// This module defines the core data structures used throughout the
/// manager:
/// - Doctor: a registered practitioner with a per-date slot schedule
/// - Appointment: a booking of a patient against one slot
/// - CenterPolicy: switches between fixed and legacy bookkeeping

use std::collections::{BTreeMap, BTreeSet};

/// A registered doctor with their daily schedules and running counters.
///
/// `schedule` maps a date string to the ordered set of canonical slot
/// labels offered that day. Both counters are monotone: `total_slots`
/// counts every slot ever offered, `scheduled_appointments` every
/// booking ever taken, and neither is decremented when a visit
/// completes.
#[derive(Debug, Clone)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub speciality: String,
    schedule: BTreeMap<String, BTreeSet<String>>,
    total_slots: u32,
    scheduled_appointments: u32,
}

impl Doctor {
    pub fn new(id: String, name: String, surname: String, speciality: String) -> Self {
        Doctor {
            id,
            name,
            surname,
            speciality,
            schedule: BTreeMap::new(),
            total_slots: 0,
            scheduled_appointments: 0,
        }
    }

    /// Whether the doctor has any slots scheduled on `date`.
    pub fn has_date(&self, date: &str) -> bool {
        self.schedule.contains_key(date)
    }

    /// The slot labels offered on `date`, in chronological order.
    pub fn slots_on(&self, date: &str) -> Option<&BTreeSet<String>> {
        self.schedule.get(date)
    }

    /// Replace the slot set for `date`, returning the size of the set
    /// it displaced, if any.
    pub fn set_day(&mut self, date: String, slots: BTreeSet<String>) -> Option<usize> {
        self.schedule.insert(date, slots).map(|old| old.len())
    }

    pub fn total_slots(&self) -> u32 {
        self.total_slots
    }

    pub fn scheduled_appointments(&self) -> u32 {
        self.scheduled_appointments
    }

    pub fn add_total_slots(&mut self, n: u32) {
        self.total_slots += n;
    }

    pub fn subtract_total_slots(&mut self, n: u32) {
        self.total_slots = self.total_slots.saturating_sub(n);
    }

    pub fn count_booking(&mut self) {
        self.scheduled_appointments += 1;
    }
}

/// A booked appointment.
///
/// `start_time` is the `HH:MM` prefix of `slot` and orders the
/// reception queue; `accepted` flips when the patient checks in at the
/// desk. Completed appointments stay in the book for the metrics.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub app_id: String,
    pub patient_ssn: String,
    pub patient_name: String,
    pub patient_surname: String,
    pub doc_id: String,
    pub date: String,
    pub start_time: String,
    pub slot: String,
    pub accepted: bool,
}

impl Appointment {
    /// The listing form `"HH:MM=SSN"`.
    pub fn listing_label(&self) -> String {
        format!("{}={}", self.start_time, self.patient_ssn)
    }
}

/// Bookkeeping behaviour of the centre.
///
/// The defaults fix three quirks of the historical system; `legacy()`
/// restores them for behavioural parity with it.
#[derive(Debug, Clone, Copy)]
pub struct CenterPolicy {
    /// Reject booking a slot that already holds an appointment.
    pub exclusive_slots: bool,
    /// Re-scheduling a day replaces its contribution to `total_slots`
    /// instead of accumulating on top of it.
    pub rebuild_slot_counters: bool,
    /// `list_appointments` honours its date argument.
    pub filter_listings_by_date: bool,
}

impl Default for CenterPolicy {
    fn default() -> Self {
        CenterPolicy {
            exclusive_slots: true,
            rebuild_slot_counters: true,
            filter_listings_by_date: true,
        }
    }
}

impl CenterPolicy {
    /// The historical behaviour: double booking allowed, slot counters
    /// accumulate across re-schedules, listings ignore the date.
    pub fn legacy() -> Self {
        CenterPolicy {
            exclusive_slots: false,
            rebuild_slot_counters: false,
            filter_listings_by_date: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_set(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn doctor() -> Doctor {
        Doctor::new(
            "D1".to_string(),
            "Grace".to_string(),
            "Hopper".to_string(),
            "Cardiology".to_string(),
        )
    }

    #[test]
    fn listing_label_joins_time_and_ssn() {
        let app = Appointment {
            app_id: "1".to_string(),
            patient_ssn: "SSN1".to_string(),
            patient_name: "Ada".to_string(),
            patient_surname: "Lovelace".to_string(),
            doc_id: "D1".to_string(),
            date: "2024-05-10".to_string(),
            start_time: "09:30".to_string(),
            slot: "09:30-10:00".to_string(),
            accepted: false,
        };
        assert_eq!(app.listing_label(), "09:30=SSN1");
    }

    #[test]
    fn replacing_a_day_reports_the_displaced_size() {
        let mut doc = doctor();
        assert_eq!(
            doc.set_day("2024-05-10".to_string(), slot_set(&["09:00-09:30"])),
            None
        );
        assert_eq!(
            doc.set_day(
                "2024-05-10".to_string(),
                slot_set(&["14:00-14:30", "14:30-15:00"])
            ),
            Some(1)
        );
        assert_eq!(doc.slots_on("2024-05-10").unwrap().len(), 2);
        assert!(!doc.has_date("2024-05-11"));
    }

    #[test]
    fn slot_counter_never_goes_negative() {
        let mut doc = doctor();
        doc.add_total_slots(2);
        doc.subtract_total_slots(5);
        assert_eq!(doc.total_slots(), 0);
    }

    #[test]
    fn default_policy_is_fixed_and_legacy_is_not() {
        let fixed = CenterPolicy::default();
        assert!(fixed.exclusive_slots && fixed.rebuild_slot_counters);
        let legacy = CenterPolicy::legacy();
        assert!(!legacy.exclusive_slots && !legacy.filter_listings_by_date);
    }
}
