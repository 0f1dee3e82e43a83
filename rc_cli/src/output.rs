//! Plain-text tables for the terminal.

use rc_core::calculations::{CheckResult, DesignOption, FinalReinforcement, SlsOutcome};
use rc_core::materials::{MaterialGradeTable, MaterialKind};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_options(options: &[DesignOption]) {
    println!("Design Options");
    println!("==============");
    if options.is_empty() {
        println!("No feasible design in the search grid. Increase the section or the material grades.");
        return;
    }
    println!(
        "{:>3}  {:<10} {:>9} {:>9} {:<16} {:>6} {:>6}  Warnings",
        "#", "Bars", "As,req", "As,prov", "Stirrups", "M*/φMn", "V*/φVn"
    );
    for (i, option) in options.iter().enumerate() {
        println!(
            "{:>3}  {:<10} {:>9.1} {:>9.1} {:<16} {:>6.3} {:>6.3}  {}",
            i + 1,
            format!("{}-D{}", option.n, option.db_mm),
            option.as_required_mm2,
            option.as_provided_mm2,
            format!("R{} x{} @ {}", option.ds_mm, option.legs, option.ss_mm),
            option.m_util,
            option.v_util,
            option.warnings.join("; "),
        );
    }
}

pub fn print_report(title: &str, reinforcement: Option<&FinalReinforcement>, results: &[CheckResult]) {
    print_heading(title, reinforcement);
    if reinforcement.is_none() {
        println!("No reinforcement selected.");
        return;
    }
    for line in results {
        println!(
            "{:<36} {:>20} {:>28}  {}",
            line.check_name, line.value, line.limit, line.status
        );
        if let Some(notes) = &line.notes {
            println!("{:<36} {}", "", notes);
        }
    }
}

pub fn print_sls(reinforcement: Option<&FinalReinforcement>, outcome: &SlsOutcome) {
    match outcome {
        SlsOutcome::Checks(results) => print_report("Serviceability Check", reinforcement, results),
        SlsOutcome::Failed { reason } => {
            print_heading("Serviceability Check", reinforcement);
            println!("FAILED: {}", reason);
        }
    }
}

pub fn print_grades(table: &MaterialGradeTable) {
    for kind in MaterialKind::ALL {
        let grades = table.grades(kind);
        if grades.is_empty() {
            continue;
        }
        let strain = table
            .ultimate_strain(kind)
            .map(|s| format!("{}", s))
            .unwrap_or_else(|| "-".to_string());
        println!("{} (ultimate strain {})", kind, strain);
        for grade in grades {
            println!("  {:<8} {:>7.1} MPa  E = {:>8.0} MPa", grade.name, grade.strength_mpa, grade.modulus_mpa);
        }
    }
}

fn print_heading(title: &str, reinforcement: Option<&FinalReinforcement>) {
    match reinforcement {
        Some(reo) => println!("{} - {}", title, reo.label()),
        None => println!("{}", title),
    }
    println!("{}", "=".repeat(title.len()));
}
