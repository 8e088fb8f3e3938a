use crate::core::accounts::{
    self, AdminRegistration, ClientRegistration, push_password_errors,
};
use crate::core::intake::{IntakeRequest, IntakeValidator};
use crate::core::lifecycle::{self, StatusUpdate, UpdateOutcome};
use crate::core::messaging::{self, ConversationFilter, MessageDraft, StatusTally};
use crate::core::reporting::{self, DeskReport};
use crate::core::tracking::{self, StatusQuery};
use crate::domain::model::{
    AdminUser, Appointment, AppointmentEvent, AppointmentStatus, ClientAccount, ContactMessage,
    MessageStatus, SchoolProgram, StudentType,
};
use crate::domain::ports::{
    AdminStore, AppointmentStore, ClientStore, Clock, MessageStore, Notifier, PasswordHasher,
};
use crate::utils::error::{DeskError, Result};
use std::sync::Arc;

/// Status lookup result; entries are pre-masked when the caller searched
/// without the tracking number.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub results: Vec<Appointment>,
    pub masked: bool,
}

/// The appointment desk: wires the validation engine and the lifecycle rules
/// to the stores, clock, hasher and notifier behind the ports.
pub struct DeskEngine {
    appointments: Arc<dyn AppointmentStore>,
    clients: Arc<dyn ClientStore>,
    admins: Arc<dyn AdminStore>,
    messages: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Option<Arc<dyn Notifier>>,
    validator: IntakeValidator,
    policies_version: String,
}

impl DeskEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        clients: Arc<dyn ClientStore>,
        admins: Arc<dyn AdminStore>,
        messages: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
        hasher: Arc<dyn PasswordHasher>,
        validator: IntakeValidator,
        policies_version: impl Into<String>,
    ) -> Self {
        Self {
            appointments,
            clients,
            admins,
            messages,
            clock,
            hasher,
            notifier: None,
            validator,
            policies_version: policies_version.into(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn validator(&self) -> &IntakeValidator {
        &self.validator
    }

    // ---- accounts -------------------------------------------------------

    pub async fn register_client(&self, registration: &ClientRegistration) -> Result<ClientAccount> {
        let (program, student_type) = accounts::validate_client_registration(registration)
            .map_err(|errors| DeskError::RegistrationRejected { errors })?;

        let email = registration.email.trim().to_lowercase();
        if self.clients.find_by_email(&email).await?.is_some() {
            return Err(DeskError::AlreadyRegistered {
                field: "email".into(),
                value: email,
            });
        }

        let now = self.clock.now_utc();
        let mut client = ClientAccount {
            id: 0,
            email,
            full_name: registration.full_name.trim().to_string(),
            student_id: registration
                .student_id
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            contact_number: registration.contact_number.trim().to_string(),
            school_program: program,
            student_type,
            password_hash: self.hasher.hash(&registration.password),
            is_active: true,
            policies_accepted_at: Some(now),
            policies_version: self.policies_version.clone(),
            created_at: now,
        };
        client.id = self.clients.insert(client.clone()).await?;
        tracing::info!("🧑‍🎓 Registered client {} ({})", client.full_name, client.email);
        Ok(client)
    }

    pub async fn register_admin(&self, registration: &AdminRegistration) -> Result<AdminUser> {
        accounts::validate_admin_registration(registration)
            .map_err(|errors| DeskError::RegistrationRejected { errors })?;

        let username = registration.username.trim().to_string();
        if self.admins.find_by_username(&username).await?.is_some() {
            return Err(DeskError::AlreadyRegistered {
                field: "username".into(),
                value: username,
            });
        }

        let mut admin = AdminUser {
            id: 0,
            username,
            full_name: registration.full_name.trim().to_string(),
            password_hash: self.hasher.hash(&registration.password),
            created_at: self.clock.now_utc(),
        };
        admin.id = self.admins.insert(admin.clone()).await?;
        tracing::info!("🔧 Registered technician account {}", admin.username);
        Ok(admin)
    }

    pub async fn authenticate_client(&self, email: &str, password: &str) -> Result<ClientAccount> {
        let client = self
            .clients
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(DeskError::InvalidCredentials)?;
        if !self.hasher.verify(password, &client.password_hash) {
            return Err(DeskError::InvalidCredentials);
        }
        if !client.is_active {
            return Err(DeskError::AccountDisabled {
                email: client.email.clone(),
            });
        }
        Ok(client)
    }

    pub async fn authenticate_admin(&self, username: &str, password: &str) -> Result<AdminUser> {
        let admin = self
            .admins
            .find_by_username(username.trim())
            .await?
            .ok_or(DeskError::InvalidCredentials)?;
        if !self.hasher.verify(password, &admin.password_hash) {
            return Err(DeskError::InvalidCredentials);
        }
        Ok(admin)
    }

    // ---- booking --------------------------------------------------------

    pub async fn book_appointment(
        &self,
        client_id: u64,
        request: &IntakeRequest,
    ) -> Result<Appointment> {
        let client = self
            .clients
            .fetch(client_id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                entity: "Client".into(),
                key: client_id.to_string(),
            })?;
        if !client.is_active {
            return Err(DeskError::AccountDisabled {
                email: client.email.clone(),
            });
        }

        let now = self.clock.now_utc();
        let validated = self
            .validator
            .validate(request, now)
            .map_err(|errors| DeskError::IntakeRejected { errors })?;

        let appointment = Appointment {
            tracking_id: tracking::new_tracking_id(now, self.validator.offset()),
            client_id: Some(client.id),
            // 預約人資料以帳號為準
            full_name: client.full_name.clone(),
            contact_number: client.contact_number.clone(),
            notification_email: validated
                .notification_email
                .unwrap_or_else(|| client.email.clone()),
            device_type: validated.device_type,
            device_brand: validated.device_brand,
            brand_model: validated.brand_model,
            service_type: validated.service_type,
            issue_description: validated.issue_description,
            preferred_at: validated.preferred_at,
            location: validated.location,
            location_notes: validated.location_notes,
            payment_method: validated.payment_method,
            status: AppointmentStatus::Pending,
            quoted_price: validated.quoted_price,
            admin_notes: String::new(),
            parts_ordered: false,
            policies_accepted_at: Some(now),
            policies_version: self.policies_version.clone(),
            created_at: now,
            updated_at: now,
        };

        self.appointments.insert(appointment.clone()).await?;
        tracing::info!(
            "📋 Appointment {} booked for {} ({} / {})",
            appointment.tracking_id,
            appointment.full_name,
            appointment.device_type.code(),
            appointment.service_type
        );

        self.emit_event(&appointment).await;
        Ok(appointment)
    }

    pub async fn check_status(&self, query: &StatusQuery) -> Result<StatusReport> {
        if !query.has_identifier() {
            return Err(DeskError::ValidationError {
                message:
                    "Provide at least one identifier (tracking number, contact number, or email)."
                        .into(),
            });
        }

        let masked = query.should_mask();
        let mut results: Vec<Appointment> = self
            .appointments
            .all()
            .await?
            .into_iter()
            .filter(|a| query.matches(a))
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if masked {
            for appointment in &mut results {
                appointment.tracking_id = tracking::masked_tracking(&appointment.tracking_id);
            }
        }

        Ok(StatusReport { results, masked })
    }

    pub async fn client_appointments(&self, client_id: u64) -> Result<Vec<Appointment>> {
        let mut results: Vec<Appointment> = self
            .appointments
            .all()
            .await?
            .into_iter()
            .filter(|a| a.client_id == Some(client_id))
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }

    // ---- staff triage ---------------------------------------------------

    pub async fn staff_update(
        &self,
        tracking_id: &str,
        update: StatusUpdate,
    ) -> Result<(Appointment, UpdateOutcome)> {
        let mut appointment = self
            .appointments
            .fetch(tracking_id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                entity: "Appointment".into(),
                key: tracking_id.to_string(),
            })?;

        let outcome = lifecycle::apply_update(&mut appointment, update, self.clock.now_utc())?;
        self.appointments.update(appointment.clone()).await?;

        if outcome.now_locked {
            tracing::info!(
                "🔒 Appointment {} locked ({})",
                appointment.tracking_id,
                appointment.status.label()
            );
        }
        if outcome.status_changed {
            self.emit_event(&appointment).await;
        }
        Ok((appointment, outcome))
    }

    // ---- messaging ------------------------------------------------------

    pub async fn submit_message(
        &self,
        client_id: u64,
        draft: &MessageDraft,
    ) -> Result<ContactMessage> {
        self.clients
            .fetch(client_id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                entity: "Client".into(),
                key: client_id.to_string(),
            })?;
        if draft.body.trim().is_empty() {
            return Err(DeskError::ValidationError {
                message: "Write a message before sending.".into(),
            });
        }

        let mut message = messaging::compose(draft, client_id, self.clock.now_utc());
        message.id = self.messages.insert(message.clone()).await?;
        Ok(message)
    }

    pub async fn reply_to_message(
        &self,
        message_id: u64,
        admin_id: u64,
        body: &str,
    ) -> Result<ContactMessage> {
        if body.trim().is_empty() {
            return Err(DeskError::ValidationError {
                message: "Write a reply before sending.".into(),
            });
        }
        let mut message = self
            .messages
            .fetch(message_id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                entity: "Message".into(),
                key: message_id.to_string(),
            })?;
        let admin_name = self.admins.fetch(admin_id).await?.map(|a| a.full_name);
        messaging::apply_reply(
            &mut message,
            Some(admin_id),
            admin_name,
            body.trim(),
            self.clock.now_utc(),
        );
        self.messages.update(message.clone()).await?;
        Ok(message)
    }

    pub async fn set_message_status(
        &self,
        message_id: u64,
        status: MessageStatus,
    ) -> Result<ContactMessage> {
        let mut message = self
            .messages
            .fetch(message_id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                entity: "Message".into(),
                key: message_id.to_string(),
            })?;
        message.status = status;
        message.updated_at = self.clock.now_utc();
        self.messages.update(message.clone()).await?;
        Ok(message)
    }

    pub async fn conversations(&self, filter: &ConversationFilter) -> Result<Vec<ContactMessage>> {
        let messages = self.messages.all().await?;
        let clients = self.clients.all().await?;
        let list = messaging::conversations(&messages, filter, |id| {
            clients
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.full_name.clone())
        });
        Ok(list.into_iter().cloned().collect())
    }

    pub async fn message_tallies(&self) -> Result<Vec<StatusTally>> {
        Ok(messaging::status_tallies(&self.messages.all().await?))
    }

    pub async fn client_messages(&self, client_id: u64) -> Result<Vec<ContactMessage>> {
        let mut messages: Vec<ContactMessage> = self
            .messages
            .all()
            .await?
            .into_iter()
            .filter(|m| m.client_id == client_id)
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    // ---- client maintenance (staff-side) --------------------------------

    pub async fn set_client_active(&self, client_id: u64, active: bool) -> Result<ClientAccount> {
        let mut client = self.fetch_client(client_id).await?;
        client.is_active = active;
        self.clients.update(client.clone()).await?;
        Ok(client)
    }

    pub async fn update_client_academic(
        &self,
        client_id: u64,
        program: SchoolProgram,
        student_type: StudentType,
    ) -> Result<ClientAccount> {
        let mut client = self.fetch_client(client_id).await?;
        client.school_program = program;
        client.student_type = student_type;
        self.clients.update(client.clone()).await?;
        Ok(client)
    }

    pub async fn reset_client_password(
        &self,
        client_id: u64,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<()> {
        let mut errors = Vec::new();
        push_password_errors(new_password, confirm_password, &mut errors);
        if !errors.is_empty() {
            return Err(DeskError::RegistrationRejected { errors });
        }
        let mut client = self.fetch_client(client_id).await?;
        client.password_hash = self.hasher.hash(new_password);
        self.clients.update(client).await?;
        Ok(())
    }

    pub async fn update_admin_profile(
        &self,
        admin_id: u64,
        full_name: &str,
        username: &str,
    ) -> Result<AdminUser> {
        let full_name = full_name.trim();
        let username = username.trim();
        if full_name.is_empty() || username.is_empty() {
            return Err(DeskError::ValidationError {
                message: "Full name and username are required.".into(),
            });
        }
        if let Some(existing) = self.admins.find_by_username(username).await? {
            if existing.id != admin_id {
                return Err(DeskError::AlreadyRegistered {
                    field: "username".into(),
                    value: username.to_string(),
                });
            }
        }
        let mut admin = self.fetch_admin(admin_id).await?;
        admin.full_name = full_name.to_string();
        admin.username = username.to_string();
        self.admins.update(admin.clone()).await?;
        Ok(admin)
    }

    pub async fn change_admin_password(
        &self,
        admin_id: u64,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<()> {
        let mut admin = self.fetch_admin(admin_id).await?;
        if !self.hasher.verify(current_password, &admin.password_hash) {
            return Err(DeskError::InvalidCredentials);
        }
        let mut errors = Vec::new();
        push_password_errors(new_password, confirm_password, &mut errors);
        if !errors.is_empty() {
            return Err(DeskError::RegistrationRejected { errors });
        }
        admin.password_hash = self.hasher.hash(new_password);
        self.admins.update(admin).await?;
        Ok(())
    }

    // ---- reporting ------------------------------------------------------

    pub async fn report(&self) -> Result<DeskReport> {
        let appointments = self.appointments.all().await?;
        let clients = self.clients.all().await?;
        Ok(reporting::build_report(
            &appointments,
            &clients,
            self.validator.offset(),
        ))
    }

    // ---- internals ------------------------------------------------------

    async fn fetch_client(&self, client_id: u64) -> Result<ClientAccount> {
        self.clients
            .fetch(client_id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                entity: "Client".into(),
                key: client_id.to_string(),
            })
    }

    async fn fetch_admin(&self, admin_id: u64) -> Result<AdminUser> {
        self.admins
            .fetch(admin_id)
            .await?
            .ok_or_else(|| DeskError::NotFound {
                entity: "Admin".into(),
                key: admin_id.to_string(),
            })
    }

    /// Webhook delivery failures never fail the booking path.
    async fn emit_event(&self, appointment: &Appointment) {
        if let Some(notifier) = &self.notifier {
            let event = AppointmentEvent {
                tracking_id: appointment.tracking_id.clone(),
                status: appointment.status,
                quoted_price: appointment.quoted_price,
                full_name: appointment.full_name.clone(),
                occurred_at: appointment.updated_at,
            };
            if let Err(e) = notifier.appointment_event(&event).await {
                tracing::warn!(
                    "⚠️ Notifier failed for {}: {}",
                    appointment.tracking_id,
                    e
                );
            }
        }
    }
}
