use crate::domain::model::{Appointment, AppointmentStatus, ClientAccount};
use crate::domain::ports::Storage;
use crate::utils::error::{DeskError, Result};
use chrono::{Datelike, FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Only approved and completed work counts toward earnings.
pub fn earns(appointment: &Appointment) -> bool {
    matches!(
        appointment.status,
        AppointmentStatus::Approved | AppointmentStatus::Completed
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeskTotals {
    pub total_earnings: u64,
    pub active_clients: usize,
    pub total_appointments: usize,
}

pub fn totals(appointments: &[Appointment], clients: &[ClientAccount]) -> DeskTotals {
    DeskTotals {
        total_earnings: appointments
            .iter()
            .filter(|a| earns(a))
            .map(|a| u64::from(a.quoted_price))
            .sum(),
        active_clients: clients.iter().filter(|c| c.is_active).count(),
        total_appointments: appointments.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub label: String,
    pub value: u64,
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", year, month))
}

fn monthly_series<'a, I, F>(appointments: I, offset: FixedOffset, value: F) -> Vec<MonthlyPoint>
where
    I: Iterator<Item = &'a Appointment>,
    F: Fn(&Appointment) -> u64,
{
    // 依店面當地月份分組，BTreeMap 保持時間順序
    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for appointment in appointments {
        let local = appointment.created_at.with_timezone(&offset);
        *buckets.entry((local.year(), local.month())).or_default() += value(appointment);
    }
    buckets
        .into_iter()
        .map(|((year, month), value)| MonthlyPoint {
            label: month_label(year, month),
            value,
        })
        .collect()
}

pub fn monthly_earnings(appointments: &[Appointment], offset: FixedOffset) -> Vec<MonthlyPoint> {
    monthly_series(appointments.iter().filter(|a| earns(a)), offset, |a| {
        u64::from(a.quoted_price)
    })
}

pub fn monthly_volume(appointments: &[Appointment], offset: FixedOffset) -> Vec<MonthlyPoint> {
    monthly_series(appointments.iter(), offset, |_| 1)
}

#[derive(Debug, Clone, Serialize)]
pub struct DeskReport {
    pub totals: DeskTotals,
    pub monthly_earnings: Vec<MonthlyPoint>,
    pub monthly_appointments: Vec<MonthlyPoint>,
}

pub fn build_report(
    appointments: &[Appointment],
    clients: &[ClientAccount],
    offset: FixedOffset,
) -> DeskReport {
    DeskReport {
        totals: totals(appointments, clients),
        monthly_earnings: monthly_earnings(appointments, offset),
        monthly_appointments: monthly_volume(appointments, offset),
    }
}

fn appointments_csv(appointments: &[Appointment], offset: FixedOffset) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "tracking_id",
        "full_name",
        "device",
        "brand",
        "model",
        "service",
        "status",
        "quoted_price",
        "preferred_at",
        "created_at",
    ])?;
    for a in appointments {
        writer.write_record([
            a.tracking_id.clone(),
            a.full_name.clone(),
            a.device_type.code().to_string(),
            a.device_brand.clone(),
            a.brand_model.clone(),
            a.service_type.clone(),
            a.status.code().to_string(),
            a.quoted_price.to_string(),
            a.preferred_at
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            a.created_at
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| DeskError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })
}

/// Bundles the appointments CSV and the summary JSON into one ZIP archive
/// written through the storage port.
pub struct ReportExporter<S: Storage> {
    storage: S,
    bundle_name: String,
    formats: Vec<String>,
}

impl<S: Storage> ReportExporter<S> {
    pub fn new(storage: S, bundle_name: impl Into<String>) -> Self {
        Self {
            storage,
            bundle_name: bundle_name.into(),
            formats: vec!["csv".to_string(), "json".to_string()],
        }
    }

    pub fn with_formats(mut self, formats: Vec<String>) -> Self {
        self.formats = formats;
        self
    }

    pub async fn export(
        &self,
        appointments: &[Appointment],
        clients: &[ClientAccount],
        offset: FixedOffset,
    ) -> Result<String> {
        let report = build_report(appointments, clients, offset);
        tracing::debug!(
            "Bundling report: {} appointments, {} earning months",
            appointments.len(),
            report.monthly_earnings.len()
        );

        // 打包成 ZIP
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            if self.formats.iter().any(|f| f == "csv") {
                let csv_bytes = appointments_csv(appointments, offset)?;
                zip.start_file::<_, ()>("appointments.csv", FileOptions::default())?;
                zip.write_all(&csv_bytes)?;
            }

            if self.formats.iter().any(|f| f == "json") {
                let summary_json = serde_json::to_string_pretty(&report)?;
                zip.start_file::<_, ()>("summary.json", FileOptions::default())?;
                zip.write_all(summary_json.as_bytes())?;
            }

            zip.finish()?.into_inner()
        };

        self.storage.write_file(&self.bundle_name, &zip_data).await?;
        Ok(self.bundle_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DeviceKind, MeetupHub, PaymentMethod, SchoolProgram, StudentType};
    use chrono::{DateTime, TimeZone, Utc};

    fn manila() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn appointment(
        status: AppointmentStatus,
        price: u32,
        created_at: DateTime<Utc>,
    ) -> Appointment {
        Appointment {
            tracking_id: "BIP-250602-A1B2".into(),
            client_id: Some(1),
            full_name: "Ana Reyes".into(),
            contact_number: "0917 123 4567".into(),
            notification_email: "ana@campus.edu.ph".into(),
            device_type: DeviceKind::Android,
            device_brand: "samsung".into(),
            brand_model: "Galaxy A54".into(),
            service_type: "lcd".into(),
            issue_description: "Cracked screen".into(),
            preferred_at: created_at,
            location: MeetupHub::Central,
            location_notes: String::new(),
            payment_method: PaymentMethod::Personal,
            status,
            quoted_price: price,
            admin_notes: String::new(),
            parts_ordered: false,
            policies_accepted_at: None,
            policies_version: String::new(),
            created_at,
            updated_at: created_at,
        }
    }

    fn client(active: bool) -> ClientAccount {
        ClientAccount {
            id: 1,
            email: "ana@campus.edu.ph".into(),
            full_name: "Ana Reyes".into(),
            student_id: String::new(),
            contact_number: "0917 123 4567".into(),
            school_program: SchoolProgram::Technology,
            student_type: StudentType::Regular,
            password_hash: String::new(),
            is_active: active,
            policies_accepted_at: None,
            policies_version: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn pending_and_declined_do_not_earn() {
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 6, 0, 0).unwrap();
        let appointments = vec![
            appointment(AppointmentStatus::Completed, 600, at),
            appointment(AppointmentStatus::Approved, 1300, at),
            appointment(AppointmentStatus::Pending, 999, at),
            appointment(AppointmentStatus::Declined, 999, at),
        ];
        let totals = totals(&appointments, &[client(true), client(false)]);
        assert_eq!(totals.total_earnings, 1900);
        assert_eq!(totals.active_clients, 1);
        assert_eq!(totals.total_appointments, 4);
    }

    #[test]
    fn monthly_series_groups_by_local_month() {
        // 2025-05-31 23:00 local Manila = 2025-05-31 15:00 UTC
        let may_local = Utc.with_ymd_and_hms(2025, 5, 31, 15, 0, 0).unwrap();
        // 2025-06-01 01:00 local = 2025-05-31 17:00 UTC (still May in UTC!)
        let june_local = Utc.with_ymd_and_hms(2025, 5, 31, 17, 0, 0).unwrap();
        let appointments = vec![
            appointment(AppointmentStatus::Completed, 100, may_local),
            appointment(AppointmentStatus::Completed, 200, june_local),
        ];
        let series = monthly_earnings(&appointments, manila());
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "May 2025");
        assert_eq!(series[0].value, 100);
        assert_eq!(series[1].label, "Jun 2025");
        assert_eq!(series[1].value, 200);
    }

    #[test]
    fn volume_counts_every_status() {
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 6, 0, 0).unwrap();
        let appointments = vec![
            appointment(AppointmentStatus::Pending, 0, at),
            appointment(AppointmentStatus::Declined, 0, at),
        ];
        let series = monthly_volume(&appointments, manila());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 2);
    }
}
