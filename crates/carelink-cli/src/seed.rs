//! Sample data for local demos.
//!
//! Seeds the same roster the original deployment shipped for dashboard
//! development: three clients, three programs, one enrollment each.

use anyhow::Context;

use carelink_catalog::NewProgram;
use carelink_ledger::EnrollmentRequest;
use carelink_registry::NewClient;
use carelink_server::AppState;
use carelink_types::{dates, Address};

pub struct SeedSummary {
    pub clients: usize,
    pub programs: usize,
    pub enrollments: usize,
}

pub fn seed_sample_data(state: &AppState) -> anyhow::Result<SeedSummary> {
    let clients = sample_clients()
        .into_iter()
        .map(|payload| state.registry.register(payload))
        .collect::<Result<Vec<_>, _>>()
        .context("seeding clients")?;

    let programs = sample_programs()
        .into_iter()
        .map(|payload| state.catalog.create(payload))
        .collect::<Result<Vec<_>, _>>()
        .context("seeding programs")?;

    let notes = [
        "Client is highly motivated",
        "Client requires follow-up assessment",
        "Dietary restrictions noted",
    ];
    let mut enrollments = 0;
    for ((client, program), note) in clients.iter().zip(&programs).zip(notes) {
        state
            .ledger
            .enroll(EnrollmentRequest {
                client_id: client.id,
                program_id: program.id,
                notes: Some(note.into()),
            })
            .context("seeding enrollments")?;
        enrollments += 1;
    }

    Ok(SeedSummary {
        clients: clients.len(),
        programs: programs.len(),
        enrollments,
    })
}

fn sample_clients() -> Vec<NewClient> {
    vec![
        NewClient {
            first_name: Some("John".into()),
            last_name: Some("Doe".into()),
            gender: Some("Male".into()),
            date_of_birth: Some(dates::parse_date("1985-05-15").unwrap()),
            phone_number: Some("555-123-4567".into()),
            address: Some(Address {
                street: Some("123 Main St".into()),
                city: Some("Springfield".into()),
                state: Some("IL".into()),
                zip_code: Some("62704".into()),
            }),
            medical_history: Some("No significant medical history".into()),
        },
        NewClient {
            first_name: Some("Jane".into()),
            last_name: Some("Smith".into()),
            gender: Some("Female".into()),
            date_of_birth: Some(dates::parse_date("1990-02-20").unwrap()),
            phone_number: Some("555-987-6543".into()),
            address: Some(Address {
                street: Some("456 Oak Ave".into()),
                city: Some("Springfield".into()),
                state: Some("IL".into()),
                zip_code: Some("62701".into()),
            }),
            medical_history: Some("Asthma".into()),
        },
        NewClient {
            first_name: Some("Robert".into()),
            last_name: Some("Johnson".into()),
            gender: Some("Male".into()),
            date_of_birth: Some(dates::parse_date("1975-11-08").unwrap()),
            phone_number: Some("555-456-7890".into()),
            address: Some(Address {
                street: Some("789 Pine Blvd".into()),
                city: Some("Chicago".into()),
                state: Some("IL".into()),
                zip_code: Some("60601".into()),
            }),
            medical_history: Some("Hypertension, Type 2 Diabetes".into()),
        },
    ]
}

fn sample_programs() -> Vec<NewProgram> {
    vec![
        NewProgram {
            name: Some("Wellness Workshop".into()),
            description: Some(
                "A 6-week program focusing on overall wellness and healthy habits".into(),
            ),
            category: Some("Wellness".into()),
            start_date: Some(dates::parse_date("2025-05-01").unwrap()),
            end_date: Some(dates::parse_date("2025-06-12").unwrap()),
            active: Some(true),
        },
        NewProgram {
            name: Some("Physical Therapy Program".into()),
            description: Some(
                "Rehabilitation program for individuals recovering from physical injuries".into(),
            ),
            category: Some("Rehabilitation".into()),
            start_date: Some(dates::parse_date("2025-05-15").unwrap()),
            end_date: Some(dates::parse_date("2025-08-15").unwrap()),
            active: Some(true),
        },
        NewProgram {
            name: Some("Nutrition Counseling".into()),
            description: Some(
                "One-on-one nutrition counseling sessions with certified nutritionists".into(),
            ),
            category: Some("Nutrition".into()),
            start_date: Some(dates::parse_date("2025-04-01").unwrap()),
            end_date: Some(dates::parse_date("2025-12-31").unwrap()),
            active: Some(true),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_full_roster() {
        let state = AppState::new();
        let summary = seed_sample_data(&state).unwrap();

        assert_eq!(summary.clients, 3);
        assert_eq!(summary.programs, 3);
        assert_eq!(summary.enrollments, 3);

        assert_eq!(state.registry.list().unwrap().len(), 3);
        assert_eq!(state.catalog.list().unwrap().len(), 3);
        assert_eq!(state.ledger.list().unwrap().len(), 3);
    }

    #[test]
    fn seeding_twice_hits_unique_indexes() {
        let state = AppState::new();
        seed_sample_data(&state).unwrap();
        // Program names collide on the second pass.
        assert!(seed_sample_data(&state).is_err());
    }

    #[test]
    fn seeded_enrollments_join_cleanly() {
        let state = AppState::new();
        seed_sample_data(&state).unwrap();

        let views = state.ledger.list().unwrap();
        assert!(views
            .iter()
            .any(|v| v.client.first_name == "John" && v.program.name == "Wellness Workshop"));
    }
}
