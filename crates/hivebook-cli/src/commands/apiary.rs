//! Apiary commands - list, add, edit and delete.

use colored::Colorize;
use hivebook::{format_dmy, Apiary, ApiaryForm, Hivebook, HivebookError};

use super::CommandResult;
use crate::cli::{ApiaryCommand, ApiaryFields};

pub fn run(book: &mut Hivebook, command: ApiaryCommand) -> CommandResult {
    match command {
        ApiaryCommand::List { query, json } => list(book, query.as_deref().unwrap_or(""), json),
        ApiaryCommand::Add { name, fields } => {
            let form = apply_fields(ApiaryForm::new(name), fields);
            let apiary = book.add_apiary(&form).map_err(explain)?;
            println!("{} {} ({})", "Added".green().bold(), apiary.name, apiary.id);
            Ok(())
        }
        ApiaryCommand::Edit { id, name, fields } => {
            let existing = book
                .state()
                .apiary(&id)
                .ok_or_else(|| format!("Apiary not found: {}", id))?;
            let mut form = form_from(existing);
            if let Some(name) = name {
                form.name = name;
            }
            let form = apply_fields(form, fields);
            let apiary = book.edit_apiary(&id, &form).map_err(explain)?;
            println!("{} {} ({})", "Updated".green().bold(), apiary.name, apiary.id);
            Ok(())
        }
        ApiaryCommand::Delete { ids } => {
            let removed = book.delete_apiaries(&ids);
            if removed == 0 {
                return Err(format!("No apiaries matched: {}", ids.join(", ")).into());
            }
            println!("{} {} apiaries", "Deleted".green().bold(), removed);
            Ok(())
        }
    }
}

fn list(book: &Hivebook, query: &str, json_output: bool) -> CommandResult {
    let hives = book.state().search_apiaries(query);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&hives)?);
        return Ok(());
    }

    if hives.is_empty() {
        println!("{}", "No apiaries found.".dimmed());
        return Ok(());
    }

    for apiary in hives {
        print_apiary(apiary);
    }
    Ok(())
}

fn print_apiary(apiary: &Apiary) {
    println!(
        "{}  {}  {} / {}",
        apiary.id.cyan(),
        apiary.name.white().bold(),
        apiary.queen_status,
        apiary.strength
    );
    println!(
        "      hives {} (single {}, double {}, queenless {}), nucs {}, inspected {}",
        apiary.num_hives,
        apiary.single_hives,
        apiary.double_hives,
        apiary.queenless_hives,
        apiary.nucs,
        format_dmy(apiary.last_inspection)
    );
    if !apiary.notes.is_empty() {
        println!("      {}", apiary.notes.dimmed());
    }
}

/// Prefill a form with the stored values.
fn form_from(apiary: &Apiary) -> ApiaryForm {
    ApiaryForm {
        name: apiary.name.clone(),
        queen_status: Some(apiary.queen_status),
        strength: Some(apiary.strength),
        num_hives: apiary.num_hives.to_string(),
        single_hives: apiary.single_hives.to_string(),
        double_hives: apiary.double_hives.to_string(),
        queenless_hives: apiary.queenless_hives.to_string(),
        nucs: apiary.nucs.to_string(),
        notes: apiary.notes.clone(),
    }
}

fn apply_fields(mut form: ApiaryForm, fields: ApiaryFields) -> ApiaryForm {
    if let Some(v) = fields.hives {
        form.num_hives = v;
    }
    if let Some(v) = fields.single {
        form.single_hives = v;
    }
    if let Some(v) = fields.double {
        form.double_hives = v;
    }
    if let Some(v) = fields.queenless {
        form.queenless_hives = v;
    }
    if let Some(v) = fields.nucs {
        form.nucs = v;
    }
    if let Some(v) = fields.notes {
        form.notes = v;
    }
    if fields.queen.is_some() {
        form.queen_status = fields.queen;
    }
    if fields.strength.is_some() {
        form.strength = fields.strength;
    }
    form
}

/// Spell out every validation message, one per line.
fn explain(err: HivebookError) -> Box<dyn std::error::Error> {
    match err {
        HivebookError::Invalid(report) => {
            let lines: Vec<String> = report
                .errors
                .iter()
                .map(|(field, message)| format!("  {}: {}", field, message))
                .collect();
            format!("Apiary not saved:\n{}", lines.join("\n")).into()
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hivebook::{QueenStatus, Strength};

    #[test]
    fn test_form_round_trips_stored_values() {
        let state = hivebook::AppState::seed();
        let form = form_from(state.apiary("A-002").unwrap());

        assert_eq!(form.name, "Clover-2");
        assert_eq!(form.queen_status, Some(QueenStatus::Queenless));
        assert_eq!(form.strength, Some(Strength::Weak));
        assert_eq!(form.queenless_hives, "2");
    }

    #[test]
    fn test_fields_only_override_given_values() {
        let fields = ApiaryFields {
            hives: Some("9".to_string()),
            strength: Some(Strength::Strong),
            ..ApiaryFields::default()
        };
        let form = apply_fields(ApiaryForm::new("X").with_hives(3, 2, 1), fields);

        assert_eq!(form.num_hives, "9");
        assert_eq!(form.single_hives, "2");
        assert_eq!(form.strength, Some(Strength::Strong));
    }
}
