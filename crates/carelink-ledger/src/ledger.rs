use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use carelink_store::{Collection, StoreError};
use carelink_types::{merge, Client, Enrollment, EnrollmentStatus, Program, RecordId};

use crate::error::{LedgerError, LedgerResult};
use crate::views::{ClientEnrollmentView, EnrollmentView};

/// Enrollment creation payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub client_id: RecordId,
    pub program_id: RecordId,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial-update payload. Only status and notes are mutable; everything
/// else on an enrollment is fixed at creation by contract.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollmentPatch {
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Enrollment Ledger: the relationship between clients and programs.
pub struct EnrollmentLedger {
    enrollments: Arc<dyn Collection<Enrollment>>,
    clients: Arc<dyn Collection<Client>>,
    programs: Arc<dyn Collection<Program>>,
}

impl EnrollmentLedger {
    pub fn new(
        enrollments: Arc<dyn Collection<Enrollment>>,
        clients: Arc<dyn Collection<Client>>,
        programs: Arc<dyn Collection<Program>>,
    ) -> Self {
        Self {
            enrollments,
            clients,
            programs,
        }
    }

    /// Enroll a client in a program.
    ///
    /// Check order is part of the contract: client existence, then program
    /// existence, then the duplicate pair. The compound unique index is
    /// authoritative for uniqueness — if a concurrent enroll slips past the
    /// pre-check, the insert itself reports the same rejection.
    pub fn enroll(&self, request: EnrollmentRequest) -> LedgerResult<Enrollment> {
        if self.clients.find_by_id(&request.client_id)?.is_none() {
            return Err(LedgerError::ClientNotFound);
        }
        if self.programs.find_by_id(&request.program_id)?.is_none() {
            return Err(LedgerError::ProgramNotFound);
        }

        let client_id = request.client_id;
        let program_id = request.program_id;
        let existing = self
            .enrollments
            .find_where(&|e: &Enrollment| e.client == client_id && e.program == program_id)?;
        if !existing.is_empty() {
            return Err(LedgerError::AlreadyEnrolled);
        }

        let now = Utc::now();
        let enrollment = self
            .enrollments
            .insert(Enrollment {
                id: RecordId::generate(),
                client: client_id,
                program: program_id,
                enrollment_date: now,
                status: EnrollmentStatus::Active,
                notes: request.notes,
                created_at: now,
                updated_at: now,
            })
            .map_err(|err| match err {
                StoreError::UniqueViolation { index: "client_program", .. } => {
                    LedgerError::AlreadyEnrolled
                }
                other => LedgerError::Store(other),
            })?;

        tracing::info!(
            enrollment = %enrollment.id,
            client = %client_id,
            program = %program_id,
            "enrolled client in program"
        );
        Ok(enrollment)
    }

    /// All enrollments, joined with client and program display fields.
    /// Rows whose referenced records no longer exist are filtered out.
    pub fn list(&self) -> LedgerResult<Vec<EnrollmentView>> {
        let mut views = Vec::new();
        for enrollment in self.enrollments.find_all()? {
            if let Some(view) = self.project(&enrollment)? {
                views.push(view);
            }
        }
        Ok(views)
    }

    /// One enrollment, joined. An orphaned enrollment (either reference
    /// deleted) is invisible to joined reads and reports NotFound.
    pub fn get(&self, id: &RecordId) -> LedgerResult<EnrollmentView> {
        let enrollment = self
            .enrollments
            .find_by_id(id)?
            .ok_or(LedgerError::NotFound)?;
        self.project(&enrollment)?.ok_or(LedgerError::NotFound)
    }

    /// All of one client's enrollments, each joined with program details.
    /// An unknown client yields an empty list, not an error.
    pub fn list_by_client(&self, client_id: &RecordId) -> LedgerResult<Vec<ClientEnrollmentView>> {
        let client_id = *client_id;
        let enrollments = self
            .enrollments
            .find_where(&|e: &Enrollment| e.client == client_id)?;

        let mut views = Vec::new();
        for enrollment in enrollments {
            if let Some(program) = self.programs.find_by_id(&enrollment.program)? {
                views.push(ClientEnrollmentView::new(&enrollment, &program));
            }
        }
        Ok(views)
    }

    /// Update status and/or notes. Returns the raw updated record.
    pub fn update(&self, id: &RecordId, patch: EnrollmentPatch) -> LedgerResult<Enrollment> {
        let mut enrollment = self
            .enrollments
            .find_by_id(id)?
            .ok_or(LedgerError::NotFound)?;

        if let Some(status) = patch.status.filter(|s| !s.is_empty()) {
            enrollment.status = status
                .parse()
                .map_err(|e: carelink_types::TypeError| LedgerError::Validation(e.to_string()))?;
        }
        merge::opt_text(&mut enrollment.notes, patch.notes);
        enrollment.touch();

        self.enrollments
            .replace(enrollment)?
            .ok_or(LedgerError::NotFound)
    }

    /// Delete an enrollment. Neither referenced record is touched.
    pub fn delete(&self, id: &RecordId) -> LedgerResult<()> {
        if !self.enrollments.delete(id)? {
            return Err(LedgerError::NotFound);
        }
        tracing::info!(enrollment = %id, "deleted enrollment");
        Ok(())
    }

    fn project(&self, enrollment: &Enrollment) -> LedgerResult<Option<EnrollmentView>> {
        let client = self.clients.find_by_id(&enrollment.client)?;
        let program = self.programs.find_by_id(&enrollment.program)?;
        match (client, program) {
            (Some(client), Some(program)) => {
                Ok(Some(EnrollmentView::new(enrollment, &client, &program)))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carelink_store::MemoryCollection;
    use carelink_types::Gender;

    struct Fixture {
        clients: Arc<MemoryCollection<Client>>,
        programs: Arc<MemoryCollection<Program>>,
        enrollments: Arc<MemoryCollection<Enrollment>>,
        ledger: EnrollmentLedger,
    }

    fn fixture() -> Fixture {
        let clients = Arc::new(MemoryCollection::new());
        let programs = Arc::new(MemoryCollection::new());
        let enrollments = Arc::new(MemoryCollection::new());
        let ledger = EnrollmentLedger::new(
            enrollments.clone(),
            clients.clone(),
            programs.clone(),
        );
        Fixture {
            clients,
            programs,
            enrollments,
            ledger,
        }
    }

    fn make_client(fixture: &Fixture, first: &str, last: &str) -> Client {
        let now = Utc::now();
        fixture
            .clients
            .insert(Client {
                id: RecordId::generate(),
                first_name: first.into(),
                last_name: last.into(),
                gender: Gender::Female,
                date_of_birth: now,
                phone_number: "555-0000".into(),
                address: None,
                medical_history: None,
                created_at: now,
                updated_at: now,
            })
            .unwrap()
    }

    fn make_program(fixture: &Fixture, name: &str) -> Program {
        let now = Utc::now();
        fixture
            .programs
            .insert(Program {
                id: RecordId::generate(),
                name: name.into(),
                description: "A test program".into(),
                category: "Testing".into(),
                start_date: now,
                end_date: None,
                active: true,
                created_at: now,
                updated_at: now,
            })
            .unwrap()
    }

    fn request(client: &Client, program: &Program) -> EnrollmentRequest {
        EnrollmentRequest {
            client_id: client.id,
            program_id: program.id,
            notes: None,
        }
    }

    fn probe() -> RecordId {
        RecordId::from_hex("507f1f77bcf86cd799439011").unwrap()
    }

    // -----------------------------------------------------------------------
    // Enroll: happy path
    // -----------------------------------------------------------------------

    #[test]
    fn enroll_creates_active_enrollment() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");

        let enrollment = f
            .ledger
            .enroll(EnrollmentRequest {
                client_id: client.id,
                program_id: program.id,
                notes: Some("Referred by Dr. Lee".into()),
            })
            .unwrap();

        assert_eq!(enrollment.client, client.id);
        assert_eq!(enrollment.program, program.id);
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert_eq!(enrollment.notes.as_deref(), Some("Referred by Dr. Lee"));
    }

    // -----------------------------------------------------------------------
    // Enroll: error precedence
    // -----------------------------------------------------------------------

    #[test]
    fn missing_client_reported_first() {
        let f = fixture();
        let program = make_program(&f, "Wellness");

        // Program valid, client missing.
        let err = f
            .ledger
            .enroll(EnrollmentRequest {
                client_id: probe(),
                program_id: program.id,
                notes: None,
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::ClientNotFound));

        // Both missing: the client check still wins.
        let err = f
            .ledger
            .enroll(EnrollmentRequest {
                client_id: probe(),
                program_id: probe(),
                notes: None,
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::ClientNotFound));
    }

    #[test]
    fn missing_program_reported_second() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");

        let err = f
            .ledger
            .enroll(EnrollmentRequest {
                client_id: client.id,
                program_id: probe(),
                notes: None,
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::ProgramNotFound));
    }

    #[test]
    fn duplicate_pair_rejected_with_one_record_kept() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");

        f.ledger.enroll(request(&client, &program)).unwrap();
        let err = f.ledger.enroll(request(&client, &program)).unwrap_err();

        assert!(matches!(err, LedgerError::AlreadyEnrolled));
        assert_eq!(f.enrollments.count().unwrap(), 1);
    }

    #[test]
    fn same_client_may_join_other_programs() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let wellness = make_program(&f, "Wellness");
        let nutrition = make_program(&f, "Nutrition");

        f.ledger.enroll(request(&client, &wellness)).unwrap();
        f.ledger.enroll(request(&client, &nutrition)).unwrap();
        assert_eq!(f.enrollments.count().unwrap(), 2);
    }

    #[test]
    fn store_index_violation_translates_to_already_enrolled() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");

        // Simulate the race: a conflicting record lands after the ledger's
        // pre-check would have run. Insert directly, then enroll.
        let now = Utc::now();
        f.enrollments
            .insert(Enrollment {
                id: RecordId::generate(),
                client: client.id,
                program: program.id,
                enrollment_date: now,
                status: EnrollmentStatus::Active,
                notes: None,
                created_at: now,
                updated_at: now,
            })
            .unwrap();

        // The pre-check catches it here; the store index would catch it in
        // the true race. Either path must produce the same error.
        let err = f.ledger.enroll(request(&client, &program)).unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyEnrolled));

        // The index itself also reports the conflict.
        let duplicate = Enrollment {
            id: RecordId::generate(),
            client: client.id,
            program: program.id,
            enrollment_date: now,
            status: EnrollmentStatus::Active,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            f.enrollments.insert(duplicate).unwrap_err(),
            StoreError::UniqueViolation { index: "client_program", .. }
        ));
    }

    // -----------------------------------------------------------------------
    // Joined reads
    // -----------------------------------------------------------------------

    #[test]
    fn list_joins_display_fields() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");
        f.ledger.enroll(request(&client, &program)).unwrap();

        let views = f.ledger.list().unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].client.first_name, "Jane");
        assert_eq!(views[0].client.last_name, "Smith");
        assert_eq!(views[0].program.name, "Wellness");
    }

    #[test]
    fn get_joins_display_fields() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");
        let enrollment = f.ledger.enroll(request(&client, &program)).unwrap();

        let view = f.ledger.get(&enrollment.id).unwrap();
        assert_eq!(view.id, enrollment.id);
        assert_eq!(view.program.name, "Wellness");
    }

    #[test]
    fn get_missing_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.ledger.get(&probe()).unwrap_err(),
            LedgerError::NotFound
        ));
    }

    #[test]
    fn list_by_client_carries_program_detail() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");
        f.ledger.enroll(request(&client, &program)).unwrap();

        let views = f.ledger.list_by_client(&client.id).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].client, client.id);
        assert_eq!(views[0].program.name, "Wellness");
        assert_eq!(views[0].program.description, "A test program");
        assert_eq!(views[0].program.category, "Testing");
    }

    #[test]
    fn list_by_client_with_no_matches_is_empty() {
        let f = fixture();
        assert!(f.ledger.list_by_client(&probe()).unwrap().is_empty());
    }

    #[test]
    fn orphaned_rows_are_invisible_to_joined_reads() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");
        let enrollment = f.ledger.enroll(request(&client, &program)).unwrap();

        // Deleting the client does not cascade.
        f.clients.delete(&client.id).unwrap();
        assert_eq!(f.enrollments.count().unwrap(), 1);

        // But joined reads no longer surface the row.
        assert!(f.ledger.list().unwrap().is_empty());
        assert!(matches!(
            f.ledger.get(&enrollment.id).unwrap_err(),
            LedgerError::NotFound
        ));

        // The raw record is still deletable by id.
        f.ledger.delete(&enrollment.id).unwrap();
        assert_eq!(f.enrollments.count().unwrap(), 0);
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn update_status_preserves_notes() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");
        let enrollment = f
            .ledger
            .enroll(EnrollmentRequest {
                client_id: client.id,
                program_id: program.id,
                notes: Some("keep me".into()),
            })
            .unwrap();

        let updated = f
            .ledger
            .update(
                &enrollment.id,
                EnrollmentPatch {
                    status: Some("Completed".into()),
                    notes: None,
                },
            )
            .unwrap();

        assert_eq!(updated.status, EnrollmentStatus::Completed);
        assert_eq!(updated.notes.as_deref(), Some("keep me"));

        // And the change is durable.
        let view = f.ledger.get(&enrollment.id).unwrap();
        assert_eq!(view.status, EnrollmentStatus::Completed);
        assert_eq!(view.notes.as_deref(), Some("keep me"));
    }

    #[test]
    fn transitions_are_free_form() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");
        let enrollment = f.ledger.enroll(request(&client, &program)).unwrap();

        // Completed back to Active is allowed; the ledger is a label store,
        // not a workflow engine.
        for status in ["Completed", "Active", "Suspended", "Active"] {
            let updated = f
                .ledger
                .update(
                    &enrollment.id,
                    EnrollmentPatch {
                        status: Some(status.into()),
                        notes: None,
                    },
                )
                .unwrap();
            assert_eq!(updated.status.to_string(), status);
        }
    }

    #[test]
    fn update_rejects_unknown_status() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");
        let enrollment = f.ledger.enroll(request(&client, &program)).unwrap();

        let err = f
            .ledger
            .update(
                &enrollment.id,
                EnrollmentPatch {
                    status: Some("Paused".into()),
                    notes: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn update_missing_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.ledger
                .update(&probe(), EnrollmentPatch::default())
                .unwrap_err(),
            LedgerError::NotFound
        ));
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_leaves_references_untouched() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");
        let enrollment = f.ledger.enroll(request(&client, &program)).unwrap();

        f.ledger.delete(&enrollment.id).unwrap();

        assert!(f.clients.find_by_id(&client.id).unwrap().is_some());
        assert!(f.programs.find_by_id(&program.id).unwrap().is_some());
        assert!(f.ledger.list_by_client(&client.id).unwrap().is_empty());
    }

    #[test]
    fn delete_frees_the_pair_for_reenrollment() {
        let f = fixture();
        let client = make_client(&f, "Jane", "Smith");
        let program = make_program(&f, "Wellness");
        let enrollment = f.ledger.enroll(request(&client, &program)).unwrap();

        f.ledger.delete(&enrollment.id).unwrap();
        assert!(f.ledger.enroll(request(&client, &program)).is_ok());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.ledger.delete(&probe()).unwrap_err(),
            LedgerError::NotFound
        ));
    }

    // -----------------------------------------------------------------------
    // End-to-end scenario
    // -----------------------------------------------------------------------

    #[test]
    fn enroll_list_delete_roundtrip() {
        let f = fixture();
        let client = make_client(&f, "Ada", "Lovelace");
        let program = make_program(&f, "Heart Health");

        let enrollment = f.ledger.enroll(request(&client, &program)).unwrap();

        let views = f.ledger.list_by_client(&client.id).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].program.name, "Heart Health");

        f.ledger.delete(&enrollment.id).unwrap();
        assert!(f.ledger.list_by_client(&client.id).unwrap().is_empty());
    }
}
