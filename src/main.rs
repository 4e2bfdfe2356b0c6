/// Command-line interface for the medical centre manager.
///
/// This module provides an interactive CLI for managing the centre's
/// catalogue, doctor schedules, bookings and the day-of-service
/// reception flow.

use std::io::{self, Write};

use medcentre::{MedCenter, MedError};

struct CentreCli {
    center: MedCenter,
    running: bool,
}

impl CentreCli {
    fn new() -> Self {
        CentreCli {
            center: MedCenter::new(),
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       MEDICAL CENTRE APPOINTMENT MANAGER");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ---");
        println!("1. Add specialities");
        println!("2. Register doctor");
        println!("3. Define daily schedule");
        println!("4. Find free slots");
        println!("5. Book appointment");
        println!("6. Reception: set date / check in patient");
        println!("7. Reception: next patient / complete visit");
        println!("8. Show metrics");
        println!("9. Run demo");
        println!("0. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&self, prompt: &str, default: Option<&str>) -> String {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        io::stdout().flush().unwrap();

        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        let input = input.trim();

        if input.is_empty() {
            default.unwrap_or("").to_string()
        } else {
            input.to_string()
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<u32>) -> u32 {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref());

            if let Ok(value) = input.parse::<u32>() {
                return value;
            }
            println!("Please enter a valid number");
        }
    }

    fn report(&self, result: Result<String, MedError>) {
        match result {
            Ok(msg) => println!("\n{}", msg),
            Err(e) => println!("\nError: {}", e),
        }
    }

    fn add_specialities(&mut self) {
        println!("\n--- Add Specialities ---");
        let line = self.get_input("Specialities (comma separated)", Some("Cardiology"));
        self.center
            .add_specialities(line.split(',').map(|s| s.trim().to_string()));
        println!("\nCatalogue: {}", self.center.specialities().join(", "));
    }

    fn register_doctor(&mut self) {
        println!("\n--- Register Doctor ---");
        let id = self.get_input("Doctor id", None);
        let name = self.get_input("Name", None);
        let surname = self.get_input("Surname", None);
        let speciality = self.get_input("Speciality", None);

        let result = self
            .center
            .add_doctor(&id, &name, &surname, &speciality)
            .map(|_| format!("Registered {} {} ({})", name, surname, speciality));
        self.report(result);
    }

    fn define_schedule(&mut self) {
        println!("\n--- Define Daily Schedule ---");
        let id = self.get_input("Doctor id", None);
        let date = self.get_input("Date", Some("2024-05-10"));
        let start = self.get_input("Start time (HH:MM)", Some("09:00"));
        let end = self.get_input("End time (HH:MM)", Some("12:00"));
        let duration = self.get_int_input("Slot duration (minutes)", Some(30));

        let result = self
            .center
            .add_daily_schedule(&id, &date, &start, &end, duration)
            .map(|n| format!("Created {} slots for {} on {}", n, id, date));
        self.report(result);
    }

    fn find_slots(&self) {
        println!("\n--- Find Free Slots ---");
        let date = self.get_input("Date", Some("2024-05-10"));
        let speciality = self.get_input("Speciality", None);

        let found = self.center.find_slots(&date, &speciality);
        if found.is_empty() {
            println!("\nNo doctors of that speciality are scheduled on {}", date);
            return;
        }
        for (doc, slots) in found {
            let who = match (self.center.doc_name(&doc), self.center.doc_surname(&doc)) {
                (Some(n), Some(s)) => format!("{} {}", n, s),
                _ => doc.clone(),
            };
            println!("\n{} ({}):", who, doc);
            for slot in slots {
                println!("  {}", slot);
            }
        }
    }

    fn book_appointment(&mut self) {
        println!("\n--- Book Appointment ---");
        let ssn = self.get_input("Patient SSN", None);
        let name = self.get_input("Patient name", None);
        let surname = self.get_input("Patient surname", None);
        let doc = self.get_input("Doctor id", None);
        let date = self.get_input("Date", Some("2024-05-10"));
        let slot = self.get_input("Slot (hh:mm-hh:mm)", None);

        let result = self
            .center
            .set_appointment(&ssn, &name, &surname, &doc, &date, &slot)
            .map(|id| format!("Booked appointment {} for {} at {}", id, name, slot));
        self.report(result);
    }

    fn reception_checkin(&mut self) {
        println!("\n--- Reception: Check-in ---");
        let date = self.get_input("Operating date", Some("2024-05-10"));
        let count = self.center.set_current_date(&date);
        println!("\n{} appointments today", count);

        let ssn = self.get_input("Patient SSN arriving (blank to skip)", Some(""));
        if !ssn.is_empty() {
            self.center.accept(&ssn);
            println!("Checked in {}", ssn);
        }
    }

    fn reception_serve(&mut self) {
        println!("\n--- Reception: Serve Patient ---");
        let doc = self.get_input("Doctor id", None);

        match self.center.next_appointment(&doc) {
            Some(app_id) => {
                let app_id = app_id.to_string();
                let patient = self
                    .center
                    .appointment_patient(&app_id)
                    .unwrap_or("?")
                    .to_string();
                let time = self
                    .center
                    .appointment_time(&app_id)
                    .unwrap_or("?")
                    .to_string();
                println!("\nNext patient: {} at {} (appointment {})", patient, time, app_id);

                let done = self.get_input("Complete this visit? (y/n)", Some("y"));
                if done.to_lowercase() == "y" {
                    let result = self
                        .center
                        .complete_appointment(&doc, &app_id)
                        .map(|_| format!("Appointment {} completed", app_id));
                    self.report(result);
                }
            }
            None => println!("\nNo accepted patients waiting for {}", doc),
        }
    }

    fn show_metrics(&self) {
        println!("\n--- Metrics ---");
        let completeness = self.center.schedule_completeness();
        if completeness.is_empty() {
            println!("\nNo doctors registered");
            return;
        }

        println!("\nSchedule completeness (bookings per offered slot):");
        for (doc, ratio) in &completeness {
            if ratio.is_nan() {
                println!("  {}: no slots offered", doc);
            } else {
                println!("  {}: {:.0}%", doc, ratio * 100.0);
            }
        }

        if let Some(date) = self.center.current_date() {
            let date = date.to_string();
            println!("\nShow rate on {}:", date);
            for doc in completeness.keys() {
                let rate = self.center.show_rate(doc, &date);
                if rate.is_nan() {
                    println!("  {}: no appointments", doc);
                } else {
                    println!("  {}: {:.0}%", doc, rate * 100.0);
                }
            }
        }
    }

    fn run_demo(&mut self) {
        println!("\n--- Running Demo ---");

        let mut center = MedCenter::new();
        center.add_specialities(["Cardiology", "Dermatology"]);
        center
            .add_doctor("D1", "Grace", "Hopper", "Cardiology")
            .unwrap();
        center
            .add_doctor("D2", "Ada", "Lovelace", "Dermatology")
            .unwrap();

        let n1 = center
            .add_daily_schedule("D1", "2024-05-10", "09:00", "12:00", 30)
            .unwrap();
        let n2 = center
            .add_daily_schedule("D2", "2024-05-10", "14:00", "16:00", 20)
            .unwrap();
        println!("Scheduled {} slots for D1 and {} for D2", n1, n2);

        let a1 = center
            .set_appointment("SSN1", "John", "Smith", "D1", "2024-05-10", "09:00-09:30")
            .unwrap();
        let a2 = center
            .set_appointment("SSN2", "Jane", "Doe", "D1", "2024-05-10", "10:30-11:00")
            .unwrap();
        let a3 = center
            .set_appointment("SSN3", "Bob", "Wilson", "D2", "2024-05-10", "14:20-14:40")
            .unwrap();
        println!("Booked appointments {}, {} and {}", a1, a2, a3);

        let today = center.set_current_date("2024-05-10");
        println!("\nOperating date 2024-05-10, {} appointments", today);

        center.accept("SSN2");
        center.accept("SSN1");
        println!("Checked in SSN2 and SSN1");

        while let Some(next) = center.next_appointment("D1") {
            let next = next.to_string();
            let patient = center.appointment_patient(&next).unwrap_or("?").to_string();
            let time = center.appointment_time(&next).unwrap_or("?").to_string();
            println!("  D1 sees {} at {} (appointment {})", patient, time, next);
            center.complete_appointment("D1", &next).unwrap();
        }

        println!("\nShow rate D1: {:.0}%", center.show_rate("D1", "2024-05-10") * 100.0);
        println!("Show rate D2: {:.0}%", center.show_rate("D2", "2024-05-10") * 100.0);
        println!("\nSchedule completeness:");
        for (doc, ratio) in center.schedule_completeness() {
            println!("  {}: {:.0}%", doc, ratio * 100.0);
        }

        println!("\nNote: D1's patients were served in slot order even though");
        println!("SSN2 checked in before SSN1.");

        self.center = center;
    }

    fn run(&mut self) {
        self.print_header();

        while self.running {
            self.print_menu();

            let choice = self.get_int_input("Enter choice", Some(9));

            match choice {
                1 => self.add_specialities(),
                2 => self.register_doctor(),
                3 => self.define_schedule(),
                4 => self.find_slots(),
                5 => self.book_appointment(),
                6 => self.reception_checkin(),
                7 => self.reception_serve(),
                8 => self.show_metrics(),
                9 => self.run_demo(),
                0 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut cli = CentreCli::new();
    cli.run();
}
