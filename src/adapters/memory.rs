use crate::domain::model::{AdminUser, Appointment, ClientAccount, ContactMessage};
use crate::domain::ports::{
    AdminStore, AppointmentStore, ClientStore, Clock, MessageStore, PasswordHasher,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryAppointments {
    inner: RwLock<HashMap<String, Appointment>>,
}

impl InMemoryAppointments {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointments {
    async fn insert(&self, appointment: Appointment) -> Result<()> {
        self.inner
            .write()
            .await
            .insert(appointment.tracking_id.clone(), appointment);
        Ok(())
    }

    async fn fetch(&self, tracking_id: &str) -> Result<Option<Appointment>> {
        Ok(self.inner.read().await.get(tracking_id).cloned())
    }

    async fn update(&self, appointment: Appointment) -> Result<()> {
        self.inner
            .write()
            .await
            .insert(appointment.tracking_id.clone(), appointment);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Appointment>> {
        Ok(self.inner.read().await.values().cloned().collect())
    }
}

pub struct InMemoryClients {
    inner: RwLock<HashMap<u64, ClientAccount>>,
    next_id: AtomicU64,
}

impl Default for InMemoryClients {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryClients {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl ClientStore for InMemoryClients {
    async fn insert(&self, mut client: ClientAccount) -> Result<u64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        client.id = id;
        self.inner.write().await.insert(id, client);
        Ok(id)
    }

    async fn fetch(&self, id: u64) -> Result<Option<ClientAccount>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ClientAccount>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update(&self, client: ClientAccount) -> Result<()> {
        self.inner.write().await.insert(client.id, client);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<ClientAccount>> {
        Ok(self.inner.read().await.values().cloned().collect())
    }
}

pub struct InMemoryAdmins {
    inner: RwLock<HashMap<u64, AdminUser>>,
    next_id: AtomicU64,
}

impl Default for InMemoryAdmins {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAdmins {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl AdminStore for InMemoryAdmins {
    async fn insert(&self, mut admin: AdminUser) -> Result<u64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        admin.id = id;
        self.inner.write().await.insert(id, admin);
        Ok(id)
    }

    async fn fetch(&self, id: u64) -> Result<Option<AdminUser>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .find(|a| a.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn update(&self, admin: AdminUser) -> Result<()> {
        self.inner.write().await.insert(admin.id, admin);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<AdminUser>> {
        Ok(self.inner.read().await.values().cloned().collect())
    }
}

pub struct InMemoryMessages {
    inner: RwLock<HashMap<u64, ContactMessage>>,
    next_id: AtomicU64,
}

impl Default for InMemoryMessages {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMessages {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl MessageStore for InMemoryMessages {
    async fn insert(&self, mut message: ContactMessage) -> Result<u64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        message.id = id;
        self.inner.write().await.insert(id, message);
        Ok(id)
    }

    async fn fetch(&self, id: u64) -> Result<Option<ContactMessage>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn update(&self, message: ContactMessage) -> Result<()> {
        self.inner.write().await.insert(message.id, message);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<ContactMessage>> {
        Ok(self.inner.read().await.values().cloned().collect())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic stand-in hasher for the CLI and tests. Real credential
/// hashing lives outside the desk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevPasswordHasher;

impl PasswordHasher for DevPasswordHasher {
    fn hash(&self, raw: &str) -> String {
        let mut hasher = DefaultHasher::new();
        "repair-desk-dev".hash(&mut hasher);
        raw.hash(&mut hasher);
        format!("dev${:016x}", hasher.finish())
    }

    fn verify(&self, raw: &str, hashed: &str) -> bool {
        self.hash(raw) == hashed
    }
}
