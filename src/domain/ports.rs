use crate::domain::model::{
    AdminUser, Appointment, AppointmentEvent, ClientAccount, ContactMessage,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Byte sink for report archives (local disk in the CLI, anything elsewhere).
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert(&self, appointment: Appointment) -> Result<()>;
    async fn fetch(&self, tracking_id: &str) -> Result<Option<Appointment>>;
    async fn update(&self, appointment: Appointment) -> Result<()>;
    async fn all(&self) -> Result<Vec<Appointment>>;
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn insert(&self, client: ClientAccount) -> Result<u64>;
    async fn fetch(&self, id: u64) -> Result<Option<ClientAccount>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<ClientAccount>>;
    async fn update(&self, client: ClientAccount) -> Result<()>;
    async fn all(&self) -> Result<Vec<ClientAccount>>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn insert(&self, admin: AdminUser) -> Result<u64>;
    async fn fetch(&self, id: u64) -> Result<Option<AdminUser>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>>;
    async fn update(&self, admin: AdminUser) -> Result<()>;
    async fn all(&self) -> Result<Vec<AdminUser>>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert(&self, message: ContactMessage) -> Result<u64>;
    async fn fetch(&self, id: u64) -> Result<Option<ContactMessage>>;
    async fn update(&self, message: ContactMessage) -> Result<()>;
    async fn all(&self) -> Result<Vec<ContactMessage>>;
}

pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Credential hashing is an external collaborator; the desk only ever sees
/// opaque hashes through this seam.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw: &str) -> String;
    fn verify(&self, raw: &str, hashed: &str) -> bool;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn appointment_event(&self, event: &AppointmentEvent) -> Result<()>;
}
