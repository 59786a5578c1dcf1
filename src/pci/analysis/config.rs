use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::pci::analysis::error::{ReportError, Result};

/// Title cell the booking software writes above the client column.
pub const COMPANY_HEADER: &str = "Pet Companions, inc.";
/// Optional configuration file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "pci-analysis.toml";

/// Where the columns of the "Total Days Boarded" export live.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BoardingLayout {
    /// Header text that marks the client column.
    pub client_header: String,
    pub pet_column: usize,
    pub in_date_column: usize,
    pub out_date_column: usize,
}

impl Default for BoardingLayout {
    fn default() -> Self {
        Self {
            client_header: COMPANY_HEADER.to_string(),
            pet_column: 8,
            in_date_column: 15,
            out_date_column: 21,
        }
    }
}

/// Where the single data column of the daycare weekly log lives.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DaycareLayout {
    pub data_header: String,
}

impl Default for DaycareLayout {
    fn default() -> Self {
        Self {
            data_header: COMPANY_HEADER.to_string(),
        }
    }
}

/// Where the columns of the expiring-vaccinations export live.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VaccinationLayout {
    pub client_column: usize,
    pub pet_column: usize,
    pub vaccination_column: usize,
    pub phone_column: usize,
    pub expiration_column: usize,
    /// Client-column text of the row right above the first data row.
    pub owner_marker: String,
}

impl Default for VaccinationLayout {
    fn default() -> Self {
        Self {
            client_column: 4,
            pet_column: 6,
            vaccination_column: 11,
            phone_column: 16,
            expiration_column: 19,
            owner_marker: "Owner".to_string(),
        }
    }
}

/// Bounds for lookback periods expressed in days.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    pub lookback_days: u32,
    pub min_lookback_days: u32,
    pub max_lookback_days: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            min_lookback_days: 7,
            max_lookback_days: 365,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub boarding: BoardingLayout,
    pub daycare: DaycareLayout,
    pub vaccination: VaccinationLayout,
    pub windows: WindowSettings,
}

impl AppConfig {
    /// Loads configuration from built-in defaults, then `pci-analysis.toml` in
    /// the working directory, then `explicit` (when given), then `PCI__*`
    /// environment variables (`PCI__BOARDING__PET_COLUMN=9`).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            // Boarding export
            .set_default("boarding.client_header", COMPANY_HEADER)?
            .set_default("boarding.pet_column", 8_i64)?
            .set_default("boarding.in_date_column", 15_i64)?
            .set_default("boarding.out_date_column", 21_i64)?
            // Daycare log
            .set_default("daycare.data_header", COMPANY_HEADER)?
            // Vaccination export
            .set_default("vaccination.client_column", 4_i64)?
            .set_default("vaccination.pet_column", 6_i64)?
            .set_default("vaccination.vaccination_column", 11_i64)?
            .set_default("vaccination.phone_column", 16_i64)?
            .set_default("vaccination.expiration_column", 19_i64)?
            .set_default("vaccination.owner_marker", "Owner")?
            // Lookback windows
            .set_default("windows.lookback_days", 30_i64)?
            .set_default("windows.min_lookback_days", 7_i64)?
            .set_default("windows.max_lookback_days", 365_i64)?
            .add_source(File::from(PathBuf::from(LOCAL_CONFIG_FILE)).required(false));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ReportError::MissingInput(path.to_path_buf()));
            }
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        let settings: AppConfig = builder
            .add_source(
                Environment::with_prefix("PCI")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let windows = &self.windows;
        if windows.min_lookback_days > windows.max_lookback_days {
            return Err(ReportError::InvalidParameter(format!(
                "min_lookback_days ({}) exceeds max_lookback_days ({})",
                windows.min_lookback_days, windows.max_lookback_days
            )));
        }
        if !(windows.min_lookback_days..=windows.max_lookback_days)
            .contains(&windows.lookback_days)
        {
            return Err(ReportError::InvalidParameter(format!(
                "default lookback of {} days is outside {}..={}",
                windows.lookback_days, windows.min_lookback_days, windows.max_lookback_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_layout_defaults_match_export_format() {
        let boarding = BoardingLayout::default();
        assert_eq!(boarding.client_header, "Pet Companions, inc.");
        assert_eq!(
            (boarding.pet_column, boarding.in_date_column, boarding.out_date_column),
            (8, 15, 21)
        );

        let vaccination = VaccinationLayout::default();
        assert_eq!(vaccination.client_column, 4);
        assert_eq!(vaccination.expiration_column, 19);
        assert_eq!(vaccination.owner_marker, "Owner");
    }

    #[test]
    fn test_window_defaults() {
        let windows = WindowSettings::default();
        assert_eq!(windows.lookback_days, 30);
        assert_eq!(windows.min_lookback_days, 7);
        assert_eq!(windows.max_lookback_days, 365);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config");
        writeln!(file, "[boarding]\npet_column = 9\n\n[windows]\nlookback_days = 60")
            .expect("config written");

        let config = AppConfig::load(Some(file.path())).expect("config loaded");
        assert_eq!(config.boarding.pet_column, 9);
        assert_eq!(config.boarding.in_date_column, 15);
        assert_eq!(config.windows.lookback_days, 60);
        assert_eq!(config.daycare, DaycareLayout::default());
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config");
        writeln!(file, "[windows]\nmin_lookback_days = 400").expect("config written");

        let error = AppConfig::load(Some(file.path())).expect_err("bounds rejected");
        assert!(matches!(error, ReportError::InvalidParameter(_)));
    }

    /// Sets `key` for the duration of `f`.
    fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        // SAFETY: each test uses its own key and removes it afterwards
        unsafe {
            std::env::set_var(key, value);
        }
        let result = f();
        unsafe {
            std::env::remove_var(key);
        }
        result
    }

    #[test]
    fn test_env_var_overrides_owner_marker() {
        let config = with_env_var("PCI__VACCINATION__OWNER_MARKER", "Client", || {
            AppConfig::load(None).expect("config loaded")
        });
        assert_eq!(config.vaccination.owner_marker, "Client");
    }

    #[test]
    fn test_env_var_overrides_phone_column() {
        let config = with_env_var("PCI__VACCINATION__PHONE_COLUMN", "17", || {
            AppConfig::load(None).expect("config loaded")
        });
        assert_eq!(config.vaccination.phone_column, 17);
    }

    #[test]
    fn test_missing_explicit_file_is_reported() {
        let error = AppConfig::load(Some(Path::new("/nonexistent/pci.toml")))
            .expect_err("missing file");
        assert!(matches!(error, ReportError::MissingInput(_)));
    }
}
