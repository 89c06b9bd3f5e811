//! Shell state that is independent of rendering

use transfer_wizard_core::{parse_quantity_qnt, FeeDeadline, MAX_ASSET_DECIMALS};

/// Which wizard page is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Edit,
    Review,
    Done,
}

/// Contents of the fee/deadline window. The fee is typed in whole coins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeForm {
    pub open: bool,
    pub fee: String,
    pub deadline: String,
}

impl Default for FeeForm {
    fn default() -> Self {
        Self {
            open: false,
            fee: "1".to_owned(),
            deadline: "1440".to_owned(),
        }
    }
}

impl FeeForm {
    pub fn parse(&self, max_deadline_minutes: u16) -> Result<FeeDeadline, String> {
        let fee_nqt = parse_quantity_qnt(&self.fee, MAX_ASSET_DECIMALS)
            .map_err(|e| format!("Fee: {e}"))?;
        let deadline_minutes: u16 = self
            .deadline
            .trim()
            .parse()
            .map_err(|_| "Deadline must be a whole number of minutes".to_owned())?;
        if deadline_minutes == 0 || deadline_minutes > max_deadline_minutes {
            return Err(format!(
                "Deadline must be between 1 and {max_deadline_minutes} minutes"
            ));
        }
        Ok(FeeDeadline {
            fee_nqt,
            deadline_minutes,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShellState {
    pub page: Page,
    pub fee_form: FeeForm,
    pub last_tx_id: Option<String>,
    pub last_error: Option<String>,
    pub last_info: Option<String>,
}

impl ShellState {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_info = None;
        self.last_error = Some(message.into());
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.last_error = None;
        self.last_info = Some(message.into());
    }

    pub fn clear_notice(&mut self) {
        self.last_error = None;
        self.last_info = None;
    }
}
