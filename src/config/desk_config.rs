use crate::core::schedule::{parse_utc_offset, OpenWindow, WeeklyCalendar};
use crate::utils::error::{DeskError, Result};
use crate::utils::validation::{
    validate_hour_window, validate_non_empty_string, validate_range, validate_url, Validate,
};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_UTC_OFFSET: &str = "+08:00";
pub const DEFAULT_POLICIES_VERSION: &str = "2025-06";
pub const DEFAULT_BUNDLE_NAME: &str = "desk_report.zip";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    pub desk: DeskInfo,
    pub schedule: Option<ScheduleConfig>,
    pub policies: Option<PoliciesConfig>,
    pub notifications: Option<NotificationsConfig>,
    pub reports: Option<ReportsConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub utc_offset: Option<String>,
    pub week: Option<WeekWindows>,
}

/// Per-day open windows as `[[start, end]]` hour pairs. A missing day is
/// closed; a missing `week` table keeps the built-in default calendar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekWindows {
    pub monday: Option<Vec<[u8; 2]>>,
    pub tuesday: Option<Vec<[u8; 2]>>,
    pub wednesday: Option<Vec<[u8; 2]>>,
    pub thursday: Option<Vec<[u8; 2]>>,
    pub friday: Option<Vec<[u8; 2]>>,
    pub saturday: Option<Vec<[u8; 2]>>,
    pub sunday: Option<Vec<[u8; 2]>>,
}

impl WeekWindows {
    fn days(&self) -> [(&'static str, &Option<Vec<[u8; 2]>>); 7] {
        [
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
            ("sunday", &self.sunday),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoliciesConfig {
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub webhook_endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    pub output_path: String,
    pub output_formats: Option<Vec<String>>,
    pub bundle_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl DeskConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeskError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DeskError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DESK_WEBHOOK})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(schedule) = &self.schedule {
            if let Some(offset) = &schedule.utc_offset {
                if parse_utc_offset(offset).is_none() {
                    return Err(DeskError::InvalidConfigValueError {
                        field: "schedule.utc_offset".to_string(),
                        value: offset.clone(),
                        reason: "Expected a +HH:MM / -HH:MM offset".to_string(),
                    });
                }
            }
            if let Some(week) = &schedule.week {
                for (day, windows) in week.days() {
                    if let Some(windows) = windows {
                        for window in windows {
                            validate_hour_window(
                                &format!("schedule.week.{}", day),
                                window[0],
                                window[1],
                            )?;
                        }
                    }
                }
            }
        }

        if let Some(notifications) = &self.notifications {
            if let Some(endpoint) = &notifications.webhook_endpoint {
                validate_url("notifications.webhook_endpoint", endpoint)?;
            }
            if let Some(timeout) = notifications.timeout_seconds {
                validate_range("notifications.timeout_seconds", timeout, 1, 120)?;
            }
        }

        if let Some(reports) = &self.reports {
            validate_non_empty_string("reports.output_path", &reports.output_path)?;

            // 驗證輸出格式
            let valid_formats = ["csv", "json"];
            if let Some(formats) = &reports.output_formats {
                for format in formats {
                    if !valid_formats.contains(&format.as_str()) {
                        return Err(DeskError::InvalidConfigValueError {
                            field: "reports.output_formats".to_string(),
                            value: format.clone(),
                            reason: format!(
                                "Unsupported format. Valid formats: {}",
                                valid_formats.join(", ")
                            ),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// 店面時區（固定 UTC 偏移）
    pub fn utc_offset(&self) -> FixedOffset {
        self.schedule
            .as_ref()
            .and_then(|s| s.utc_offset.as_deref())
            .and_then(parse_utc_offset)
            .unwrap_or_else(|| {
                parse_utc_offset(DEFAULT_UTC_OFFSET).expect("default offset is valid")
            })
    }

    /// 營業時間表；未設定時使用內建預設
    pub fn calendar(&self) -> WeeklyCalendar {
        match self.schedule.as_ref().and_then(|s| s.week.as_ref()) {
            Some(week) => {
                let mut windows: [Vec<OpenWindow>; 7] = Default::default();
                for (idx, (_, day)) in week.days().iter().enumerate() {
                    if let Some(day_windows) = day {
                        windows[idx] = day_windows
                            .iter()
                            .map(|w| OpenWindow::new(w[0], w[1]))
                            .collect();
                    }
                }
                WeeklyCalendar::from_windows(windows)
            }
            None => WeeklyCalendar::default(),
        }
    }

    pub fn policies_version(&self) -> &str {
        self.policies
            .as_ref()
            .map(|p| p.version.as_str())
            .unwrap_or(DEFAULT_POLICIES_VERSION)
    }

    pub fn webhook_endpoint(&self) -> Option<&str> {
        self.notifications
            .as_ref()
            .and_then(|n| n.webhook_endpoint.as_deref())
            .filter(|endpoint| !endpoint.is_empty())
    }

    pub fn webhook_timeout_seconds(&self) -> u64 {
        self.notifications
            .as_ref()
            .and_then(|n| n.timeout_seconds)
            .unwrap_or(10)
    }

    pub fn output_path(&self) -> &str {
        self.reports
            .as_ref()
            .map(|r| r.output_path.as_str())
            .unwrap_or("./reports")
    }

    pub fn bundle_name(&self) -> &str {
        self.reports
            .as_ref()
            .and_then(|r| r.bundle_name.as_deref())
            .unwrap_or(DEFAULT_BUNDLE_NAME)
    }

    /// 報表輸出格式，預設兩者都出
    pub fn output_formats(&self) -> Vec<String> {
        self.reports
            .as_ref()
            .and_then(|r| r.output_formats.clone())
            .unwrap_or_else(|| vec!["csv".to_string(), "json".to_string()])
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for DeskConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
