//! Main application state and update loop

use eframe::egui;

use transfer_wizard_adapters::{
    AccountFixture, InMemoryAccountAdapter, InMemoryLedgerAdapter, LedgerAdapterConfig,
};
use transfer_wizard_core::{
    ControlHandle, FeeDeadlineChoice, FieldName, FieldRow, PortError, SubmitError,
    TransferAssetWizard, UserAccount, WizardConfig,
};

use crate::prompt::PreparedFeeDeadline;
use crate::state::{Page, ShellState};
use crate::ui;

type ShellWizard = TransferAssetWizard<InMemoryAccountAdapter, InMemoryLedgerAdapter, PreparedFeeDeadline>;

/// The main application state
pub struct App {
    config: WizardConfig,
    ledger_config: LedgerAdapterConfig,
    users: Vec<UserAccount>,
    accounts: InMemoryAccountAdapter,
    ledger: InMemoryLedgerAdapter,
    prompt: PreparedFeeDeadline,
    wizard: ShellWizard,
    state: ShellState,
}

impl App {
    pub fn new(
        config: WizardConfig,
        ledger_config: LedgerAdapterConfig,
        fixture: AccountFixture,
    ) -> Result<Self, PortError> {
        let accounts = InMemoryAccountAdapter::from_fixture(&fixture)?;
        let ledger = InMemoryLedgerAdapter::new(accounts.clone(), ledger_config.clone());
        let prompt = PreparedFeeDeadline::default();
        let users = fixture.users;
        tracing::info!(users = users.len(), "account fixture loaded");
        let wizard = new_wizard(&config, &users, &accounts, &ledger, &prompt);
        Ok(Self {
            config,
            ledger_config,
            users,
            accounts,
            ledger,
            prompt,
            wizard,
            state: ShellState::default(),
        })
    }

    /// Fresh dialog over the same account book and ledger.
    fn restart(&mut self) {
        self.wizard = new_wizard(
            &self.config,
            &self.users,
            &self.accounts,
            &self.ledger,
            &self.prompt,
        );
        self.state = ShellState::default();
    }
}

fn new_wizard(
    config: &WizardConfig,
    users: &[UserAccount],
    accounts: &InMemoryAccountAdapter,
    ledger: &InMemoryLedgerAdapter,
    prompt: &PreparedFeeDeadline,
) -> ShellWizard {
    let initial = (!users.is_empty()).then_some(0);
    TransferAssetWizard::new(
        config.clone(),
        users.to_vec(),
        initial,
        accounts.clone(),
        ledger.clone(),
        prompt.clone(),
    )
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("💸 Transfer Wizard")
                        .size(22.0)
                        .color(egui::Color32::from_rgb(0, 212, 170)),
                );
                ui.add_space(30.0);
                ui.separator();
                ui.add_space(10.0);
                for (page, title) in [
                    (Page::Edit, "1. Details"),
                    (Page::Review, "2. Review"),
                    (Page::Done, "3. Sent"),
                ] {
                    let text = egui::RichText::new(title);
                    let text = if page == self.state.page {
                        text.strong()
                    } else {
                        text.weak()
                    };
                    ui.label(text);
                }
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                match self.state.page {
                    Page::Edit => self.render_edit_page(ui),
                    Page::Review => self.render_review_page(ui),
                    Page::Done => self.render_done_page(ui),
                }
                ui.add_space(10.0);
                if let Some(error) = &self.state.last_error {
                    ui::status_line(ui, false, error);
                }
                if let Some(info) = &self.state.last_info {
                    ui::status_line(ui, true, info);
                }
                ui.add_space(20.0);
            });
        });

        self.render_fee_window(ctx);
    }
}

impl App {
    fn render_edit_page(&mut self, ui: &mut egui::Ui) {
        ui::page_heading(
            ui,
            "Transfer Asset",
            Some("Send an asset held by one of your accounts to another account."),
        );

        let page = self.wizard.page().clone();
        ui::form_frame(ui, |ui| {
            for row in &page.rows {
                ui.horizontal(|ui| {
                    ui.add_sized(
                        [90.0, 20.0],
                        egui::Label::new(egui::RichText::new(format!("{}:", row.label)).strong()),
                    );
                    render_editable(ui, row);
                });
                if let Some((field, err)) = self.wizard.last_outcome().blocking {
                    if field == row.name {
                        ui::status_line(ui, false, &err.to_string());
                    }
                }
                ui.add_space(6.0);
            }
        });

        ui.add_space(15.0);
        let can_submit = self.wizard.last_outcome().can_submit();
        if ui::nav_button(ui, "Next", true, can_submit).clicked() {
            let outcome = self.wizard.verify_all();
            match outcome.message() {
                None => {
                    self.state.clear_notice();
                    self.state.page = Page::Review;
                }
                Some(message) => self.state.set_error(message),
            }
        }
    }

    fn render_review_page(&mut self, ui: &mut egui::Ui) {
        ui::page_heading(ui, "Review Transfer", Some("Check the details before sending."));

        let page = self.wizard.page().clone();
        ui::form_frame(ui, |ui| {
            egui::Grid::new("review_grid")
                .num_columns(2)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    for row in &page.rows {
                        ui.label(egui::RichText::new(&row.label).strong());
                        if let Some(mirror) = row.readonly.as_readonly() {
                            ui.label(egui::RichText::new(mirror.text()).monospace());
                        }
                        ui.end_row();
                    }
                });
        });

        ui.add_space(15.0);
        ui.horizontal(|ui| {
            if ui::nav_button(ui, "Back", false, true).clicked() {
                self.state.clear_notice();
                self.state.page = Page::Edit;
            }
            ui.add_space(10.0);
            let idle = !self.state.fee_form.open;
            if ui::nav_button(ui, "Send", true, idle).clicked() {
                self.begin_send();
            }
        });
    }

    fn render_done_page(&mut self, ui: &mut egui::Ui) {
        ui::page_heading(ui, "Transfer Submitted", None);
        if let Some(id) = &self.state.last_tx_id {
            ui::form_frame(ui, |ui| {
                ui.label("Transaction id:");
                ui::copyable_id(ui, id);
            });
        }

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Ledger").strong());
        ui.separator();
        match self.ledger.transactions() {
            Ok(txs) => {
                egui::Grid::new("ledger_grid")
                    .num_columns(4)
                    .striped(true)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for tx in txs.iter().rev() {
                            ui.label(egui::RichText::new(tx.string_id()).monospace());
                            ui.label(format!("{} → {}", tx.sender, tx.recipient));
                            ui.label(format!("asset {} × {}", tx.asset_id, tx.quantity_qnt));
                            ui.label(format!("fee {} NQT", tx.fee_nqt));
                            ui.end_row();
                        }
                    });
            }
            Err(e) => ui::status_line(ui, false, &e.to_string()),
        }

        ui.add_space(15.0);
        if ui::nav_button(ui, "New transfer", false, true).clicked() {
            self.restart();
        }
    }

    fn render_fee_window(&mut self, ctx: &egui::Context) {
        if !self.state.fee_form.open {
            return;
        }
        let mut confirm = false;
        let mut cancel = false;
        let form = &mut self.state.fee_form;
        egui::Window::new("Fee and deadline")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("fee_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Fee (coins):");
                        ui.add(egui::TextEdit::singleline(&mut form.fee).desired_width(150.0));
                        ui.end_row();
                        ui.label("Deadline (minutes):");
                        ui.add(egui::TextEdit::singleline(&mut form.deadline).desired_width(150.0));
                        ui.end_row();
                    });
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    confirm = ui::nav_button(ui, "Confirm", true, true).clicked();
                    cancel = ui::nav_button(ui, "Cancel", false, true).clicked();
                });
            });

        if cancel {
            self.state.fee_form.open = false;
            self.prompt.prepare(FeeDeadlineChoice::Cancelled);
            self.finish_send();
        } else if confirm {
            match self
                .state
                .fee_form
                .parse(self.ledger_config.max_deadline_minutes)
            {
                Ok(fee_deadline) => {
                    self.state.fee_form.open = false;
                    self.prompt
                        .prepare(FeeDeadlineChoice::Confirmed(fee_deadline));
                    self.finish_send();
                }
                Err(message) => self.state.set_error(message),
            }
        }
    }

    /// The sender check runs before the fee window is shown.
    fn begin_send(&mut self) {
        match self.wizard.verify_sender() {
            Ok(()) => {
                self.state.clear_notice();
                self.state.fee_form.open = true;
            }
            Err(err) => self.state.set_error(err.to_string()),
        }
    }

    fn finish_send(&mut self) {
        match self.wizard.submit() {
            Ok(id) => {
                self.state.set_info(format!("Transfer {id} submitted"));
                self.state.last_tx_id = Some(id);
                self.state.page = Page::Done;
            }
            Err(err) => {
                if matches!(err, SubmitError::Blocked(_)) {
                    self.state.page = Page::Edit;
                }
                self.state.set_error(err.to_string());
            }
        }
    }
}

fn render_editable(ui: &mut egui::Ui, row: &FieldRow) {
    match &row.editable {
        ControlHandle::Text(input) => {
            let mut text = input.text();
            let edit = if row.name == FieldName::Comment {
                egui::TextEdit::multiline(&mut text).desired_rows(3)
            } else {
                egui::TextEdit::singleline(&mut text)
            };
            let response = ui.add(
                edit.desired_width(360.0)
                    .font(egui::TextStyle::Monospace),
            );
            if response.changed() {
                input.set_text(text);
            }
        }
        ControlHandle::Choice(choice) => {
            let entries = choice.entries();
            let selected = choice.selected_index();
            egui::ComboBox::from_id_salt(row.name.label())
                .selected_text(choice.selected_entry().unwrap_or_default())
                .width(360.0)
                .show_ui(ui, |ui| {
                    for (index, entry) in entries.iter().enumerate() {
                        if ui.selectable_label(selected == Some(index), entry).clicked() {
                            choice.select(index);
                        }
                    }
                });
            if entries.is_empty() {
                ui.label(egui::RichText::new("nothing to choose").weak());
            }
        }
        ControlHandle::Readonly(text) => {
            ui.label(text.text());
        }
    }
}
