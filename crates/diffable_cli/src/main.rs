//! CLI demo entry point.
//!
//! # Responsibility
//! - Verify `diffable_core` linkage.
//! - Walk the contact list through seed, add, favourite and delete, printing
//!   the edit script each step produces.

use diffable_core::{
    AddContactForm, ContactListService, ContactResult, ContactScript, ContactSection, Position,
    ReconcilerConfig,
};

fn main() {
    println!("diffable_core ping={}", diffable_core::ping());
    println!("diffable_core version={}", diffable_core::core_version());

    let config = match ReconcilerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            std::process::exit(2);
        }
    };
    if let Err(err) = run_demo(config) {
        eprintln!("demo failed: {err}");
        std::process::exit(1);
    }
}

fn run_demo(config: ReconcilerConfig) -> ContactResult<()> {
    println!("reload_policy={}", config.reload_policy.as_str());
    let mut service = ContactListService::new(config);

    print_step("seed", &service.seed()?);
    print_rows(&service);

    let (_, script) =
        service.add_contact(AddContactForm::new("Lena", ContactSection::Secondary))?;
    print_step("add Lena -> secondary", &script);

    print_step(
        "favourite 0:1",
        &service.toggle_favourite_at(Position::new(0, 1))?,
    );
    print_step("delete 0:0", &service.delete_at(Position::new(0, 0))?);
    print_rows(&service);
    Ok(())
}

fn print_step(label: &str, script: &ContactScript) {
    println!("== {label} ({} ops)", script.len());
    for op in script {
        println!("  {op}");
    }
}

fn print_rows(service: &ContactListService) {
    for section in service.rows() {
        println!("[{}]", section.header.title);
        for row in section.rows {
            let star = row.trailing_icon.unwrap_or_default();
            println!("  {} ({star})", row.title);
        }
    }
}
