use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Device families the desk accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Android,
    Iphone,
    Laptop,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 3] = [DeviceKind::Android, DeviceKind::Iphone, DeviceKind::Laptop];

    pub fn code(&self) -> &'static str {
        match self {
            DeviceKind::Android => "android",
            DeviceKind::Iphone => "iphone",
            DeviceKind::Laptop => "laptop",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeviceKind::Android => "Android Phone",
            DeviceKind::Iphone => "iPhone",
            DeviceKind::Laptop => "Laptop",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Gcash,
    Personal,
}

impl PaymentMethod {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Gcash => "gcash",
            PaymentMethod::Personal => "personal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Gcash => "GCash (contactless)",
            PaymentMethod::Personal => "Personal / cash meet-up",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "gcash" => Some(PaymentMethod::Gcash),
            "personal" => Some(PaymentMethod::Personal),
            _ => None,
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Personal
    }
}

/// Campus meetup hubs where devices change hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeetupHub {
    #[serde(rename = "meetup-central")]
    Central,
    #[serde(rename = "meetup-east")]
    East,
    #[serde(rename = "meetup-tech")]
    Tech,
}

impl MeetupHub {
    pub const ALL: [MeetupHub; 3] = [MeetupHub::Central, MeetupHub::East, MeetupHub::Tech];

    pub fn code(&self) -> &'static str {
        match self {
            MeetupHub::Central => "meetup-central",
            MeetupHub::East => "meetup-east",
            MeetupHub::Tech => "meetup-tech",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeetupHub::Central => "Central meetup lounge",
            MeetupHub::East => "East transit meetup point",
            MeetupHub::Tech => "Tech plaza drop-off counter",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    InProgress,
    Completed,
    Declined,
    PartsUnavailable,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Pending
    }
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 6] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Approved,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::PartsUnavailable,
        AppointmentStatus::Declined,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Approved => "approved",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Declined => "declined",
            AppointmentStatus::PartsUnavailable => "parts_unavailable",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Approved => "Approved",
            AppointmentStatus::InProgress => "In Progress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Declined => "Declined - Unsupported",
            AppointmentStatus::PartsUnavailable => "Rejected - Parts unavailable",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolProgram {
    Engineering,
    Education,
    Technology,
    Management,
    Nursing,
    CriminalJustice,
    ArtsSciences,
}

impl SchoolProgram {
    pub const ALL: [SchoolProgram; 7] = [
        SchoolProgram::Engineering,
        SchoolProgram::Education,
        SchoolProgram::Technology,
        SchoolProgram::Management,
        SchoolProgram::Nursing,
        SchoolProgram::CriminalJustice,
        SchoolProgram::ArtsSciences,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SchoolProgram::Engineering => "engineering",
            SchoolProgram::Education => "education",
            SchoolProgram::Technology => "technology",
            SchoolProgram::Management => "management",
            SchoolProgram::Nursing => "nursing",
            SchoolProgram::CriminalJustice => "criminal_justice",
            SchoolProgram::ArtsSciences => "arts_sciences",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchoolProgram::Engineering => {
                "School of Engineering – Civil Engineering / Other Engineering"
            }
            SchoolProgram::Education => "School of Teacher Education",
            SchoolProgram::Technology => "School of Technology & Computer Studies",
            SchoolProgram::Management => "School of Management & Entrepreneurship",
            SchoolProgram::Nursing => "School of Nursing & Health Sciences",
            SchoolProgram::CriminalJustice => "School of Criminal Justice Education",
            SchoolProgram::ArtsSciences => "School of Arts & Sciences",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentType {
    Regular,
    Irregular,
}

impl Default for StudentType {
    fn default() -> Self {
        StudentType::Regular
    }
}

impl StudentType {
    pub fn label(&self) -> &'static str {
        match self {
            StudentType::Regular => "Regular student",
            StudentType::Irregular => "Irregular student",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "regular" => Some(StudentType::Regular),
            "irregular" => Some(StudentType::Irregular),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientAccount {
    pub id: u64,
    pub email: String,
    pub full_name: String,
    pub student_id: String,
    pub contact_number: String,
    pub school_program: SchoolProgram,
    pub student_type: StudentType,
    pub password_hash: String,
    pub is_active: bool,
    pub policies_accepted_at: Option<DateTime<Utc>>,
    pub policies_version: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: u64,
    pub username: String,
    pub full_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub tracking_id: String,
    pub client_id: Option<u64>,
    pub full_name: String,
    pub contact_number: String,
    pub notification_email: String,
    pub device_type: DeviceKind,
    pub device_brand: String,
    pub brand_model: String,
    pub service_type: String,
    pub issue_description: String,
    pub preferred_at: DateTime<Utc>,
    pub location: MeetupHub,
    pub location_notes: String,
    pub payment_method: PaymentMethod,
    pub status: AppointmentStatus,
    pub quoted_price: u32,
    pub admin_notes: String,
    pub parts_ordered: bool,
    pub policies_accepted_at: Option<DateTime<Utc>>,
    pub policies_version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    Sms,
    Email,
    Messenger,
}

impl Default for ContactChannel {
    fn default() -> Self {
        ContactChannel::Sms
    }
}

impl ContactChannel {
    pub fn label(&self) -> &'static str {
        match self {
            ContactChannel::Sms => "SMS / Viber",
            ContactChannel::Email => "Email",
            ContactChannel::Messenger => "Messenger / Chat",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "sms" => Some(ContactChannel::Sms),
            "email" => Some(ContactChannel::Email),
            "messenger" => Some(ContactChannel::Messenger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Open,
    InReview,
    Resolved,
}

impl MessageStatus {
    pub const ALL: [MessageStatus; 3] = [
        MessageStatus::Open,
        MessageStatus::InReview,
        MessageStatus::Resolved,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MessageStatus::Open => "open",
            MessageStatus::InReview => "in_review",
            MessageStatus::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MessageStatus::Open => "Open",
            MessageStatus::InReview => "In review",
            MessageStatus::Resolved => "Resolved",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReply {
    pub admin_id: Option<u64>,
    pub admin_name: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: u64,
    pub client_id: u64,
    pub subject: String,
    pub body: String,
    pub preferred_contact: ContactChannel,
    pub status: MessageStatus,
    pub admin_reply: String,
    pub replies: Vec<MessageReply>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status event pushed to the notifier port when an appointment is created
/// or its status changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentEvent {
    pub tracking_id: String,
    pub status: AppointmentStatus,
    pub quoted_price: u32,
    pub full_name: String,
    pub occurred_at: DateTime<Utc>,
}
