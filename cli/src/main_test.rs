use super::*;
use clap::CommandFactory;
use std::ffi::OsStr;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn password_reads_env_and_warns_about_flag() {
    let cli = Cli::command();
    for name in ["login", "register"] {
        let sub = cli.find_subcommand(name).unwrap();
        let password = sub.get_arguments().find(|arg| arg.get_id() == "password").unwrap();
        assert_eq!(password.get_env(), Some(OsStr::new("DROCK_PASSWORD")), "{name}");
        assert!(password.is_hide_env_values_set(), "{name}");
        let help = password.get_help().unwrap().to_string();
        assert!(help.contains("process list"), "{name}: {help}");
    }
}

#[test]
fn parses_quote_options_by_wire_value() {
    let cli = Cli::try_parse_from([
        "drock", "quote", "--name", "Dana", "--email", "dana@example.test", "--phone", "555-0100", "--service",
        "exterior-trim", "--details", "Fascia", "--budget", "5k-10k",
    ])
    .unwrap();
    let Command::Quote(quote) = cli.command else {
        panic!("expected quote command");
    };
    assert_eq!(quote.service, ServiceType::ExteriorTrim);
    assert_eq!(quote.contact, ContactMethod::Email);
    assert_eq!(quote.budget, Some(BudgetRange::From5kTo10k));
    assert_eq!(quote.timeline, None);
}
