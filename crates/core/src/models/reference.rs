//! Reference data consumed by the assignment pickers.
//!
//! Procedures and clients are registered elsewhere and only read here.
//! Choices are 1-based, matching the numbered lists the pickers display.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{PlannerError, PlannerResult};

/// A registered procedure: who it is for, what it is and how many hours it takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRecord {
    pub nome: String,
    pub procedimento: String,
    /// Hours, stored either as a number or as a numeric string
    #[serde(default)]
    pub duracao: Value,
}

impl ProcedureRecord {
    /// Duration in whole hours. Unreadable, zero or negative durations count
    /// as one hour.
    pub fn duration_hours(&self) -> u32 {
        let hours = match &self.duracao {
            Value::Number(number) => number
                .as_u64()
                .or_else(|| number.as_f64().filter(|h| *h >= 0.0).map(|h| h.trunc() as u64)),
            Value::String(text) => {
                let digits: String = text
                    .trim()
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                digits.parse::<u64>().ok()
            }
            _ => None,
        };

        match hours.and_then(|h| u32::try_from(h).ok()) {
            Some(0) | None => 1,
            Some(h) => h,
        }
    }

    pub fn picker_label(&self) -> String {
        format!(
            "{} - {} ({}h)",
            self.nome,
            self.procedimento,
            self.duration_hours()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub nome: String,
}

/// One numbered entry of a picker list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerOption {
    pub number: usize,
    pub label: String,
}

/// What a completed pick writes into the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub content: String,
    pub duration_hours: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub procedures: Vec<ProcedureRecord>,
    pub clients: Vec<ClientRecord>,
}

impl ReferenceData {
    pub fn procedure_options(&self) -> Vec<PickerOption> {
        numbered(self.procedures.iter().map(ProcedureRecord::picker_label))
    }

    pub fn client_options(&self) -> Vec<PickerOption> {
        numbered(self.clients.iter().map(|client| client.nome.clone()))
    }

    pub fn select_procedure(&self, choice: usize) -> PlannerResult<&ProcedureRecord> {
        if self.procedures.is_empty() {
            return Err(PlannerError::MissingReferenceData(
                "No procedures registered".to_string(),
            ));
        }
        pick(&self.procedures, choice, "procedure")
    }

    pub fn select_client(&self, choice: usize) -> PlannerResult<&ClientRecord> {
        if self.clients.is_empty() {
            return Err(PlannerError::MissingReferenceData(
                "No clients registered".to_string(),
            ));
        }
        pick(&self.clients, choice, "client")
    }

    /// Resolves a procedure pick, optionally paired with a client pick, into
    /// the text and duration to write.
    ///
    /// The text is `"<client> - <procedure>"`; without a client pick the
    /// procedure record's own name is used.
    pub fn appointment(&self, procedure_choice: usize, client_choice: Option<usize>) -> PlannerResult<Appointment> {
        let procedure = self.select_procedure(procedure_choice)?;
        let name = match client_choice {
            Some(choice) => self.select_client(choice)?.nome.as_str(),
            None => procedure.nome.as_str(),
        };

        Ok(Appointment {
            content: format!("{} - {}", name.trim(), procedure.procedimento.trim()),
            duration_hours: procedure.duration_hours(),
        })
    }
}

fn numbered(labels: impl Iterator<Item = String>) -> Vec<PickerOption> {
    labels
        .enumerate()
        .map(|(index, label)| PickerOption {
            number: index + 1,
            label,
        })
        .collect()
}

fn pick<'a, T>(items: &'a [T], choice: usize, kind: &str) -> PlannerResult<&'a T> {
    choice
        .checked_sub(1)
        .and_then(|index| items.get(index))
        .ok_or_else(|| {
            PlannerError::InvalidSelection(format!(
                "{} choice {} is out of range 1..={}",
                kind,
                choice,
                items.len()
            ))
        })
}
